//! @ai:module:intent Render concise GitHub Copilot instructions with before/after blocks
//! @ai:module:layer application
//! @ai:module:public_api transform, OUTPUT_FILE
//! @ai:module:depends_on rule, style, language

use super::TransformContext;
use crate::language::comment_prefix;
use crate::rule::{group_by_section, FileMap, Rule};
use crate::style::summarize;

pub const OUTPUT_FILE: &str = ".github/copilot-instructions.md";

/// @ai:intent Render all rules into a single quick-reference file
/// @ai:effects pure
pub fn transform(rules: &[Rule], ctx: &TransformContext<'_>) -> FileMap {
    let mut parts = vec![build_header(ctx.source_name)];

    for (section, section_rules) in group_by_section(rules) {
        parts.push(format!("# {}", section));
        parts.extend(section_rules.iter().map(|rule| render_rule(rule)));
    }

    let content = parts.join("\n\n") + "\n";
    FileMap::from([(OUTPUT_FILE.to_string(), content)])
}

/// @ai:effects pure
fn render_rule(rule: &Rule) -> String {
    let mut out = format!("## {}\n\n{}", rule.title, summarize(&rule.content));

    if let Some(comparison) = render_comparison(rule) {
        out.push_str("\n\n");
        out.push_str(&comparison);
    }

    out
}

/// @ai:intent Single before/after block, only when both example kinds exist
/// @ai:effects pure
fn render_comparison(rule: &Rule) -> Option<String> {
    let bad = rule.incorrect_examples().next()?;
    let good = rule.correct_examples().next()?;
    let comment = comment_prefix(&bad.language);

    Some(format!(
        "```{lang}\n{c} ❌ Bad\n{bad}\n\n{c} ✅ Good\n{good}\n```",
        lang = bad.language,
        c = comment,
        bad = bad.code,
        good = good.code,
    ))
}

/// @ai:effects pure
fn build_header(source_name: &str) -> String {
    format!(
        "# GitHub Copilot Instructions

**AUTO-GENERATED** from {} - Do not edit manually.

Quick reference guide for GitHub Copilot code generation.",
        source_name
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::CodeExample;
    use crate::style::TextStyle;
    use crate::transform::RoutingTable;

    fn render(rules: &[Rule]) -> String {
        let style = TextStyle::default();
        let routing = RoutingTable::default();
        let ctx = TransformContext {
            style: &style,
            routing: &routing,
            source_name: "CONTEXT.md",
        };
        transform(rules, &ctx).shift_remove(OUTPUT_FILE).unwrap()
    }

    fn rule(examples: Vec<CodeExample>) -> Rule {
        Rule {
            section: "Rust Standards".to_string(),
            subsection: None,
            title: "Propagate errors".to_string(),
            content: "Propagate errors with the question mark. Do not panic.".to_string(),
            examples,
            priority: 50,
            scope: vec!["all".to_string()],
            tags: vec![],
        }
    }

    #[test]
    fn test_summary_and_comparison() {
        let content = render(&[rule(vec![
            CodeExample::new("let v = parse()?;", Some("rust"), true),
            CodeExample::new("let v = parse().unwrap();", Some("rust"), false),
        ])]);

        assert!(content.contains(
            "# Rust Standards\n\n## Propagate errors\n\nPropagate errors with the question mark."
        ));
        assert!(!content.contains("Do not panic"));
        assert!(content.contains(
            "```rust\n// ❌ Bad\nlet v = parse().unwrap();\n\n// ✅ Good\nlet v = parse()?;\n```"
        ));
    }

    #[test]
    fn test_no_comparison_with_one_kind() {
        let content = render(&[rule(vec![CodeExample::new("ok()", Some("rust"), true)])]);
        assert!(!content.contains("```"));
    }
}
