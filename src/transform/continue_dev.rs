//! @ai:module:intent Render Continue.dev rules as a structured YAML config
//! @ai:module:layer application
//! @ai:module:public_api transform, OUTPUT_FILE
//! @ai:module:depends_on rule, style

use super::TransformContext;
use crate::error::{Error, Result};
use crate::rule::{FileMap, Rule};
use crate::style::comment_wrap;
use serde::Serialize;

pub const OUTPUT_FILE: &str = ".continue/config.yaml";

#[derive(Debug, Serialize)]
struct ContinueConfig {
    name: String,
    version: String,
    schema: String,
    rules: Vec<ContinueRule>,
}

#[derive(Debug, Serialize)]
struct ContinueRule {
    name: String,
    rule: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    globs: Option<Vec<String>>,
}

/// @ai:intent Serialize every rule as an entry of the `rules` list
/// @ai:post output is valid YAML by construction
/// @ai:effects pure
pub fn transform(rules: &[Rule], ctx: &TransformContext<'_>) -> Result<FileMap> {
    let config = ContinueConfig {
        name: "Project standards".to_string(),
        version: "1.0.0".to_string(),
        schema: "v1".to_string(),
        rules: rules
            .iter()
            .map(|rule| ContinueRule {
                name: rule.title.clone(),
                rule: ctx.style.make_imperative(&rule.content),
                globs: (!rule.applies_to_all()).then(|| rule.scope.clone()),
            })
            .collect(),
    };

    let yaml = serde_yaml::to_string(&config).map_err(|e| Error::Transform {
        tool: "Continue.dev".to_string(),
        message: e.to_string(),
    })?;

    let header = comment_wrap(
        &format!("Continue.dev Configuration\nAUTO-GENERATED from {}", ctx.source_name),
        "# ",
    );

    let content = format!("{}\n\n{}", header, yaml);
    Ok(FileMap::from([(OUTPUT_FILE.to_string(), content)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::TextStyle;
    use crate::transform::RoutingTable;

    #[test]
    fn test_rules_round_trip_through_yaml() {
        let style = TextStyle::default();
        let routing = RoutingTable::default();
        let ctx = TransformContext {
            style: &style,
            routing: &routing,
            source_name: "CONTEXT.md",
        };
        let rules = vec![
            Rule {
                section: "Bash Standards".to_string(),
                subsection: Some("Strict mode".to_string()),
                title: "Strict mode".to_string(),
                content: "Scripts should use: set -euo pipefail\n\n- always".to_string(),
                examples: vec![],
                priority: 70,
                scope: vec!["*.sh".to_string(), "*.bash".to_string()],
                tags: vec!["bash".to_string()],
            },
            Rule {
                section: "Security".to_string(),
                subsection: None,
                title: "Secrets".to_string(),
                content: "Never commit secrets.".to_string(),
                examples: vec![],
                priority: 100,
                scope: vec!["all".to_string()],
                tags: vec!["security".to_string()],
            },
        ];

        let mut files = transform(&rules, &ctx).unwrap();
        let content = files.shift_remove(OUTPUT_FILE).unwrap();
        assert!(content.starts_with(
            "# Continue.dev Configuration\n# AUTO-GENERATED from CONTEXT.md\n"
        ));

        let parsed: serde_yaml::Value = serde_yaml::from_str(&content).unwrap();
        let entries = parsed["rules"].as_sequence().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0]["rule"],
            serde_yaml::Value::from("Scripts MUST use: set -euo pipefail\n\n- ALWAYS")
        );
        assert_eq!(entries[0]["globs"][1], serde_yaml::Value::from("*.bash"));
        assert!(entries[1].get("globs").is_none());
    }
}
