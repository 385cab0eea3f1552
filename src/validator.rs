//! @ai:module:intent Check generated files for structural validity and hygiene
//! @ai:module:layer application
//! @ai:module:public_api Validator, ValidationConfig, ValidationReport, ValidationIssue, Severity
//! @ai:module:depends_on rule
//! @ai:module:stateless false

use crate::rule::FileMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

const FENCE: &str = "```";
const FRONTMATTER_DELIMITER: &str = "---";

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+").expect("valid heading regex"));

/// @ai:intent Severity level for validation issues
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// @ai:intent A single problem found in a generated file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub code: String,
    pub path: String,
    pub line: Option<usize>,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}: {}", self.path, line, self.message),
            None => write!(f, "{}: {}", self.path, self.message),
        }
    }
}

/// @ai:intent Validator settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ValidationConfig {
    pub max_line_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_line_length: 120,
        }
    }
}

/// @ai:intent Accumulated result of validating a file map
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ValidationReport {
    pub files_checked: usize,
    pub issues: Vec<ValidationIssue>,
    pub errors: usize,
    pub warnings: usize,
}

impl ValidationReport {
    /// @ai:intent Check if validation passed (no errors)
    pub fn passed(&self) -> bool {
        self.errors == 0
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    fn push(
        &mut self,
        severity: Severity,
        code: &str,
        path: &str,
        line: Option<usize>,
        message: String,
    ) {
        match severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
        }
        self.issues.push(ValidationIssue {
            severity,
            code: code.to_string(),
            path: path.to_string(),
            line,
            message,
        });
    }

    fn error(&mut self, code: &str, path: &str, message: impl Into<String>) {
        self.push(Severity::Error, code, path, None, message.into());
    }

    fn warning(&mut self, code: &str, path: &str, line: Option<usize>, message: impl Into<String>) {
        self.push(Severity::Warning, code, path, line, message.into());
    }
}

/// @ai:intent Validate generated files, separating blocking errors from advisory warnings
pub struct Validator {
    config: ValidationConfig,
    report: ValidationReport,
}

impl Validator {
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            config,
            report: ValidationReport::default(),
        }
    }

    /// @ai:intent Validate every file; true when no errors were found
    /// @ai:post report() holds the issues of this call only
    /// @ai:effects pure
    pub fn validate_all(&mut self, files: &FileMap) -> bool {
        self.report = ValidationReport::default();

        for (path, content) in files {
            self.validate_file(path, content);
        }

        debug!(
            files = self.report.files_checked,
            errors = self.report.errors,
            warnings = self.report.warnings,
            "validated generated files"
        );
        self.report.passed()
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    pub fn into_report(self) -> ValidationReport {
        self.report
    }

    /// @ai:intent Dispatch on extension, then run the common checks
    fn validate_file(&mut self, path: &str, content: &str) {
        self.report.files_checked += 1;

        match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => self.validate_yaml(path, content),
            Some("mdc") => self.validate_frontmatter_file(path, content),
            Some("md") => self.validate_markdown(path, content),
            _ => {}
        }

        self.validate_common(path, content);
    }

    fn validate_yaml(&mut self, path: &str, content: &str) {
        // A stream of only comments and blank lines is an empty document.
        let has_document = content.lines().any(|line| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        });
        if !has_document {
            return;
        }

        if let Err(e) = serde_yaml::from_str::<serde_yaml::Value>(content) {
            self.report
                .error("E001", path, format!("Invalid YAML syntax: {}", e));
        }
    }

    /// @ai:intent Frontmatter + Markdown: delimiter, structure, key-value block, body
    fn validate_frontmatter_file(&mut self, path: &str, content: &str) {
        if !content.starts_with(FRONTMATTER_DELIMITER) {
            self.report.error("E002", path, "Missing YAML frontmatter");
            return;
        }

        let parts: Vec<&str> = content.splitn(3, FRONTMATTER_DELIMITER).collect();
        let [_, frontmatter, body] = parts[..] else {
            self.report.error("E003", path, "Invalid frontmatter structure");
            return;
        };

        match serde_yaml::from_str::<serde_yaml::Value>(frontmatter) {
            Ok(serde_yaml::Value::Mapping(metadata)) => {
                for key in ["priority", "globs"] {
                    if !metadata.contains_key(key) {
                        self.report.warning(
                            "W001",
                            path,
                            None,
                            format!("Missing '{}' in frontmatter", key),
                        );
                    }
                }
            }
            Ok(_) => {
                self.report
                    .error("E004", path, "Frontmatter is not a key-value mapping");
            }
            Err(e) => {
                self.report
                    .error("E004", path, format!("Invalid frontmatter YAML: {}", e));
            }
        }

        self.validate_markdown(path, body);
    }

    /// @ai:intent Balanced fences and heading depth that never skips a level
    fn validate_markdown(&mut self, path: &str, content: &str) {
        if content.matches(FENCE).count() % 2 != 0 {
            self.report.error("E005", path, "Unclosed code fence");
        }

        let mut previous: Option<usize> = None;
        let mut in_code_block = false;
        for line in content.split('\n') {
            if line.trim_start().starts_with(FENCE) {
                in_code_block = !in_code_block;
                continue;
            }
            if in_code_block {
                continue;
            }
            let Some(level) = HEADING.captures(line).and_then(|c| c.get(1)).map(|m| m.len()) else {
                continue;
            };
            if let Some(prev) = previous {
                if level > prev + 1 {
                    self.report.warning(
                        "W002",
                        path,
                        None,
                        format!("Heading hierarchy skip (#{} -> #{})", prev, level),
                    );
                }
            }
            previous = Some(level);
        }
    }

    /// @ai:intent Hygiene checks applied to every file
    fn validate_common(&mut self, path: &str, content: &str) {
        let lines: Vec<&str> = content.split('\n').collect();

        for (idx, line) in lines.iter().enumerate() {
            if line.ends_with(' ') || line.ends_with('\t') {
                self.report
                    .warning("W003", path, Some(idx + 1), "Trailing whitespace");
            }
        }

        if !content.is_empty() && !content.ends_with('\n') {
            self.report
                .warning("W004", path, None, "Missing final newline");
        }

        let mut in_code_block = false;
        for (idx, line) in lines.iter().enumerate() {
            if line.trim().starts_with(FENCE) {
                in_code_block = !in_code_block;
                continue;
            }

            let length = line.chars().count();
            if !in_code_block && length > self.config.max_line_length {
                self.report.warning(
                    "W005",
                    path,
                    Some(idx + 1),
                    format!("Line too long ({} chars)", length),
                );
            }
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
