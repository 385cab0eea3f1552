//! @ai:module:intent Render an Aider YAML config carrying the rules as comments
//! @ai:module:layer application
//! @ai:module:public_api transform, OUTPUT_FILE
//! @ai:module:depends_on rule, style

use super::TransformContext;
use crate::error::Result;
use crate::rule::{FileMap, Rule};
use crate::style::comment_wrap;
use serde::Serialize;

pub const OUTPUT_FILE: &str = ".aider/.aider.conf.yml";

const COMMENT: &str = "# ";

#[derive(Debug, Serialize)]
struct AiderConfig<'a> {
    read: Vec<&'a str>,
}

/// @ai:intent Render a config whose only key loads the document; rules ride along as comments
/// @ai:effects pure
pub fn transform(rules: &[Rule], ctx: &TransformContext<'_>) -> Result<FileMap> {
    let config = serde_yaml::to_string(&AiderConfig {
        read: vec![ctx.source_name],
    })?;

    let mut parts = vec![
        build_header(ctx.source_name),
        config.trim_end().to_string(),
        format!("# === Standards from {} ===", ctx.source_name),
    ];
    parts.extend(rules.iter().map(render_rule));

    let content = parts.join("\n\n") + "\n";
    Ok(FileMap::from([(OUTPUT_FILE.to_string(), content)]))
}

/// @ai:effects pure
fn render_rule(rule: &Rule) -> String {
    let mut text = format!(
        "[{}] {}\nPriority: {} | Scope: {}\n\n{}",
        rule.section,
        rule.title,
        rule.priority,
        rule.scope.join(", "),
        rule.content
    );

    for example in rule.correct_examples() {
        text.push_str(&format!("\n\nExample ({}):\n{}", example.language, example.code));
    }

    comment_wrap(&text, COMMENT)
}

/// @ai:effects pure
fn build_header(source_name: &str) -> String {
    comment_wrap(
        &format!(
            "Aider Configuration\nAUTO-GENERATED from {source}\n\nAider reads {source} directly; key standards are summarized here as comments",
            source = source_name
        ),
        COMMENT,
    )
}
