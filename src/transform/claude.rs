//! @ai:module:intent Render conversational CLAUDE.md instructions grouped by section
//! @ai:module:layer application
//! @ai:module:public_api transform, OUTPUT_FILE
//! @ai:module:depends_on rule, style

use super::{fenced, TransformContext};
use crate::rule::{group_by_section, FileMap, Rule};
use crate::style::make_conversational;

pub const OUTPUT_FILE: &str = "CLAUDE.md";

/// @ai:intent Render all rules into a single narrative file
/// @ai:effects pure
pub fn transform(rules: &[Rule], ctx: &TransformContext<'_>) -> FileMap {
    let mut parts = vec![build_header(ctx.source_name)];

    for (section, section_rules) in group_by_section(rules) {
        parts.push(format!("## {}", section));
        parts.extend(section_rules.iter().map(|rule| render_rule(rule, ctx)));
    }

    let content = parts.join("\n\n") + "\n";
    FileMap::from([(OUTPUT_FILE.to_string(), content)])
}

/// @ai:effects pure
fn render_rule(rule: &Rule, ctx: &TransformContext<'_>) -> String {
    let mut parts = vec![
        format!("### {}", rule.title),
        make_conversational(&rule.content),
        format!("**Why this matters:** {}", ctx.style.generate_reasoning(rule)),
    ];

    for example in &rule.examples {
        let (label, rationale) = if example.is_correct {
            ("✅ **Do this:**", ctx.style.explain_correct(rule))
        } else {
            ("❌ **Don't do this:**", ctx.style.explain_incorrect(rule))
        };

        parts.push(label.to_string());
        parts.push(fenced(example));
        match &example.explanation {
            Some(explanation) => parts.push(explanation.clone()),
            None => parts.push(format!("*This approach {}.*", rationale)),
        }
    }

    parts.join("\n\n")
}

/// @ai:effects pure
fn build_header(source_name: &str) -> String {
    format!(
        "# Claude AI Instructions for Engineering Projects

You are Claude, an AI assistant working on a software engineering project that follows
strict quality and security standards. This document defines your operational guardrails.

**IMPORTANT:** This document is automatically generated from {source}.
Any manual edits will be overwritten. To update, modify {source} and run the sync tool.

---

## 🎯 Your Role

You are working within a **governed framework** where:

- **Documentation is authoritative** - Follow all standards defined here
- **Security is paramount** - Never commit secrets or credentials
- **Quality is enforced** - All changes must pass pre-commit checks
- **Explicitness is required** - No implicit assumptions

---",
        source = source_name
    )
}
