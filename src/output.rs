//! @ai:module:intent Format reports for different formats (JSON, text)
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputFormat, format_validation_report, format_rules, format_dry_run, format_written
//! @ai:module:depends_on validator, rule
//! @ai:module:stateless true

use crate::rule::{group_by_section, FileMap, Rule};
use crate::validator::{Severity, ValidationReport};
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;

/// Lines of each file shown by the dry-run preview.
pub const PREVIEW_LINES: usize = 5;

/// @ai:intent Output format options
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

/// @ai:intent Format a validation report as a string
/// @ai:effects pure
pub fn format_validation_report(report: &ValidationReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(report, false),
        OutputFormat::JsonPretty => to_json(report, true),
        OutputFormat::Text => format_validation_report_text(report),
    }
}

/// @ai:intent Format a validation report as human-readable text
/// @ai:effects pure
fn format_validation_report_text(report: &ValidationReport) -> String {
    let mut output = String::new();

    for issue in &report.issues {
        let severity_str = match issue.severity {
            Severity::Error => "ERROR".red().bold(),
            Severity::Warning => "WARN".yellow().bold(),
        };

        output.push_str(&format!(
            "  {} {} ({})\n",
            severity_str,
            issue,
            issue.code.dimmed()
        ));
    }

    let summary = format!("Checked {} files: ", report.files_checked);
    if report.errors > 0 {
        output.push_str(&format!(
            "  {}{} errors, {} warnings\n",
            summary,
            report.errors.to_string().red().bold(),
            report.warnings.to_string().yellow()
        ));
    } else if report.warnings > 0 {
        output.push_str(&format!(
            "  {}{} {} warnings\n",
            summary,
            "OK".green().bold(),
            report.warnings.to_string().yellow()
        ));
    } else {
        output.push_str(&format!("  {}{} No issues found\n", summary, "OK".green().bold()));
    }

    output
}

/// @ai:intent Format extracted rules as a string
/// @ai:effects pure
pub fn format_rules(rules: &[Rule], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(&rules, false),
        OutputFormat::JsonPretty => to_json(&rules, true),
        OutputFormat::Text => format_rules_text(rules),
    }
}

/// @ai:intent List rules grouped by section with their classification
/// @ai:effects pure
fn format_rules_text(rules: &[Rule]) -> String {
    let mut output = String::new();

    for (section, section_rules) in group_by_section(rules) {
        output.push_str(&format!("{} ({})\n", section.bold(), section_rules.len()));

        for rule in section_rules {
            output.push_str(&format!(
                "  {} [priority {}]\n",
                rule.title.cyan(),
                rule.priority
            ));
            output.push_str(&format!("    scope: {}\n", rule.scope.join(", ")));

            if !rule.tags.is_empty() {
                output.push_str(&format!("    tags: {}\n", rule.tags.join(", ")));
            }

            if !rule.examples.is_empty() {
                let correct = rule.correct_examples().count();
                output.push_str(&format!(
                    "    examples: {} correct, {} incorrect\n",
                    correct,
                    rule.examples.len() - correct
                ));
            }
        }
    }

    output.push_str(&format!("\n{} rules\n", rules.len()));
    output
}

/// @ai:intent Per-section rule counts for the parse stage summary
/// @ai:effects pure
pub fn format_rules_summary(rules: &[Rule]) -> String {
    group_by_section(rules)
        .iter()
        .map(|(section, section_rules)| format!("  - {}: {} rules\n", section, section_rules.len()))
        .collect()
}

/// @ai:intent Preview each generated file: line count and first lines
/// @ai:effects pure
pub fn format_dry_run(files: &FileMap) -> String {
    let mut output = String::new();

    for (path, content) in files {
        let lines: Vec<&str> = content.lines().collect();
        output.push_str(&format!(
            "\n{} ({} lines)\n",
            path.bold(),
            lines.len()
        ));

        for line in lines.iter().take(PREVIEW_LINES) {
            output.push_str(&format!("  {}\n", line.dimmed()));
        }

        if lines.len() > PREVIEW_LINES {
            output.push_str(&format!(
                "  ... ({} more lines)\n",
                lines.len() - PREVIEW_LINES
            ));
        }
    }

    output
}

/// @ai:intent List written files
/// @ai:effects pure
pub fn format_written(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| format!("  {} {}\n", "✓".green(), path.display()))
        .collect()
}

/// @ai:intent Format any serializable value as JSON
/// @ai:effects pure
pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(value).unwrap_or_default()
    } else {
        serde_json::to_string(value).unwrap_or_default()
    }
}
