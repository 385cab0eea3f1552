//! @ai:module:intent Render imperative Cursor rule files with YAML frontmatter
//! @ai:module:layer application
//! @ai:module:public_api transform, RoutingTable
//! @ai:module:depends_on rule, style

use super::{fenced, TransformContext};
use crate::error::{Error, Result};
use crate::rule::{FileMap, Rule};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

const RULE_SEPARATOR: &str = "\n\n---\n\n";
const ALL_FILES_GLOB: &str = "**/*";

/// @ai:intent Section keyword routed to an output path
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SectionRoute {
    pub keyword: String,
    pub path: String,
}

/// @ai:intent Rule tag routed to an output path
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagRoute {
    pub tag: String,
    pub path: String,
}

/// @ai:intent Routing table for imperative rule files; first match wins
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RoutingTable {
    pub default_path: String,
    pub sections: Vec<SectionRoute>,
    pub tags: Vec<TagRoute>,
}

impl Default for RoutingTable {
    fn default() -> Self {
        let sections = [
            ("Design Principles", ".cursor/rules/001_workspace.mdc"),
            ("Bash Standards", ".cursor/rules/003_bash_standards.mdc"),
            ("Python Standards", ".cursor/rules/004_python_standards.mdc"),
            ("YAML", ".cursor/rules/005_config_standards.mdc"),
            ("JSON", ".cursor/rules/005_config_standards.mdc"),
            ("Security", ".cursor/rules/006_security.mdc"),
            ("Pre-commit", ".cursor/rules/007_precommit.mdc"),
            ("Documentation", ".cursor/rules/008_documentation.mdc"),
        ]
        .into_iter()
        .map(|(keyword, path)| SectionRoute {
            keyword: keyword.to_string(),
            path: path.to_string(),
        })
        .collect();

        let tags = [
            ("security", ".cursor/rules/006_security.mdc"),
            ("bash", ".cursor/rules/003_bash_standards.mdc"),
            ("python", ".cursor/rules/004_python_standards.mdc"),
        ]
        .into_iter()
        .map(|(tag, path)| TagRoute {
            tag: tag.to_string(),
            path: path.to_string(),
        })
        .collect();

        Self {
            default_path: ".cursor/rules/001_workspace.mdc".to_string(),
            sections,
            tags,
        }
    }
}

impl RoutingTable {
    /// @ai:intent Pick the output file for a rule: section, then tags, then default
    /// @ai:effects pure
    pub fn route(&self, rule: &Rule) -> &str {
        let section = rule.section.to_lowercase();

        if let Some(route) = self
            .sections
            .iter()
            .find(|route| section.contains(&route.keyword.to_lowercase()))
        {
            return &route.path;
        }

        if let Some(route) = self.tags.iter().find(|route| rule.has_tag(&route.tag)) {
            return &route.path;
        }

        &self.default_path
    }
}

/// @ai:intent Frontmatter block at the top of every rule file
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Frontmatter {
    description: String,
    globs: Vec<String>,
    always_apply: bool,
    priority: u8,
}

/// @ai:intent Group rules by routed path and render one file per path
/// @ai:effects pure
pub fn transform(rules: &[Rule], ctx: &TransformContext<'_>) -> Result<FileMap> {
    let mut routed: IndexMap<&str, Vec<&Rule>> = IndexMap::new();
    for rule in rules {
        routed.entry(ctx.routing.route(rule)).or_default().push(rule);
    }

    let mut files = FileMap::new();
    for (path, file_rules) in routed {
        let content = render_file(&file_rules, ctx).map_err(|e| Error::Transform {
            tool: "Cursor".to_string(),
            message: format!("{}: {}", path, e),
        })?;
        files.insert(path.to_string(), content);
    }

    Ok(files)
}

/// @ai:effects pure
fn render_file(rules: &[&Rule], ctx: &TransformContext<'_>) -> Result<String> {
    let frontmatter = serde_yaml::to_string(&build_frontmatter(rules))?;
    let body = rules
        .iter()
        .map(|rule| render_rule(rule, ctx))
        .collect::<Vec<_>>()
        .join(RULE_SEPARATOR);

    Ok(format!("---\n{}---\n\n{}\n", frontmatter, body))
}

/// @ai:intent Combine rule metadata: union of globs, highest priority
/// @ai:effects pure
fn build_frontmatter(rules: &[&Rule]) -> Frontmatter {
    let mut sections: Vec<&str> = Vec::new();
    let mut globs: Vec<String> = Vec::new();
    let mut unscoped = false;

    for rule in rules {
        if !sections.contains(&rule.section.as_str()) {
            sections.push(&rule.section);
        }
        if rule.applies_to_all() {
            unscoped = true;
        } else {
            for glob in &rule.scope {
                if !globs.contains(glob) {
                    globs.push(glob.clone());
                }
            }
        }
    }

    if unscoped || globs.is_empty() {
        globs = vec![ALL_FILES_GLOB.to_string()];
    }

    Frontmatter {
        description: sections.join(", "),
        always_apply: globs == [ALL_FILES_GLOB],
        globs,
        priority: rules.iter().map(|r| r.priority).max().unwrap_or_default(),
    }
}

/// @ai:effects pure
fn render_rule(rule: &Rule, ctx: &TransformContext<'_>) -> String {
    let mut parts = vec![
        format!("## {}", rule.title),
        ctx.style.make_imperative(&rule.content),
    ];

    if !rule.applies_to_all() {
        let scope: Vec<String> = rule.scope.iter().map(|g| format!("`{}`", g)).collect();
        parts.push(format!("**Applies to:** {}", scope.join(", ")));
    }

    for example in &rule.examples {
        let label = if example.is_correct {
            "✅ **CORRECT:**"
        } else {
            "❌ **WRONG:**"
        };
        parts.push(label.to_string());
        parts.push(fenced(example));
        if let Some(explanation) = &example.explanation {
            parts.push(explanation.clone());
        }
    }

    parts.join("\n\n")
}
