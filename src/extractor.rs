//! @ai:module:intent Extract rules with classified code examples from the standards document
//! @ai:module:layer application
//! @ai:module:public_api RuleExtractor, extract_file, extract_title, MAX_TITLE_LEN
//! @ai:module:depends_on splitter, classify, rule, language, error
//! @ai:module:stateless true

use crate::classify::{Classification, ClassificationTables, ExampleIndicators};
use crate::error::{Error, Result};
use crate::language::known_comment_prefixes;
use crate::rule::{CodeExample, Rule};
use crate::splitter::{split_sections, split_subsections};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::debug;

/// Longest title kept verbatim; longer titles are cut and end in "...".
pub const MAX_TITLE_LEN: usize = 60;

const FALLBACK_TITLE: &str = "Rule";

static CODE_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```([\w+#-]+)?[ \t]*\n(.*?)```").expect("valid code fence regex")
});

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("valid sentence regex"));

static LEADING_BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*]\s*").expect("valid bullet regex"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// @ai:intent Turn document text into rules using explicit classification tables
pub struct RuleExtractor<'a> {
    tables: &'a ClassificationTables,
    indicators: &'a ExampleIndicators,
}

impl<'a> RuleExtractor<'a> {
    pub fn new(tables: &'a ClassificationTables, indicators: &'a ExampleIndicators) -> Self {
        Self { tables, indicators }
    }

    /// @ai:intent Parse the whole document into an ordered list of rules
    /// @ai:post one rule per subsection, or one per section without subsections
    /// @ai:post rules with empty prose are omitted
    /// @ai:post CRLF line endings parse the same as LF
    /// @ai:effects pure
    pub fn parse(&self, content: &str) -> Vec<Rule> {
        let content = content.replace("\r\n", "\n");
        let mut rules = Vec::new();

        for (section, body) in split_sections(&content) {
            let section_rules = self.parse_section(&section, &body);
            debug!(section = %section, rules = section_rules.len(), "parsed section");
            rules.extend(section_rules);
        }

        rules
    }

    /// @ai:intent Parse one section body; preamble before subsections is discarded
    /// @ai:effects pure
    pub fn parse_section(&self, section: &str, body: &str) -> Vec<Rule> {
        let classification = self.tables.classify(section);
        let subsections = split_subsections(body);

        if subsections.is_empty() {
            return self
                .create_rule(section, None, body, &classification)
                .into_iter()
                .collect();
        }

        subsections
            .iter()
            .filter_map(|(title, content)| {
                self.create_rule(section, Some(title), content, &classification)
            })
            .collect()
    }

    /// @ai:intent Build a rule from a body, or None when no prose remains
    /// @ai:effects pure
    fn create_rule(
        &self,
        section: &str,
        subsection: Option<&str>,
        body: &str,
        classification: &Classification,
    ) -> Option<Rule> {
        let (prose, examples) = self.extract_content_and_examples(body);
        let content = prose.trim();

        if content.is_empty() {
            debug!(section, subsection, "skipping rule without prose");
            return None;
        }

        let title = match subsection {
            Some(subsection) => subsection.to_string(),
            None => extract_title(content),
        };

        Some(Rule {
            section: section.to_string(),
            subsection: subsection.map(str::to_string),
            title,
            content: content.to_string(),
            examples,
            priority: classification.priority,
            scope: classification.scope.clone(),
            tags: classification.tags.clone(),
        })
    }

    /// @ai:intent Separate prose from fenced code blocks, classifying each block
    /// @ai:effects pure
    pub fn extract_content_and_examples(&self, body: &str) -> (String, Vec<CodeExample>) {
        let mut prose = String::new();
        let mut examples = Vec::new();
        let mut last_end = 0;

        for captures in CODE_FENCE.captures_iter(body) {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            let preceding = &body[last_end..whole.start()];
            prose.push_str(preceding);
            last_end = whole.end();

            let language = captures.get(1).map(|m| m.as_str());
            let code = captures.get(2).map_or("", |m| m.as_str()).trim();
            let is_correct = self.is_correct_example(preceding, code);

            examples.push(CodeExample::new(code, language, is_correct));
        }

        prose.push_str(&body[last_end..]);
        (prose, examples)
    }

    /// @ai:intent Decide whether a code block is a correct or incorrect example
    /// @ai:assumes unmarked examples are correct; intentionally-bad unmarked blocks are misclassified
    /// @ai:effects pure
    pub fn is_correct_example(&self, preceding_text: &str, code: &str) -> bool {
        let indicators = self.indicators;
        let lines: Vec<&str> = preceding_text.trim().split('\n').collect();
        let start = lines.len().saturating_sub(indicators.lookback_lines);
        let last_text = lines[start..].join(" ").to_lowercase();

        if contains_any(&last_text, &indicators.incorrect) {
            return false;
        }

        if contains_any(&last_text, &indicators.correct) {
            return true;
        }

        if has_code_marker(code, &indicators.incorrect_code_markers) {
            return false;
        }

        if has_code_marker(code, &indicators.correct_code_markers) {
            return true;
        }

        true
    }
}

/// @ai:intent Read the document at `path` and extract its rules
/// @ai:pre path exists and is readable
/// @ai:effects fs:read
pub fn extract_file(
    path: &Path,
    tables: &ClassificationTables,
    indicators: &ExampleIndicators,
) -> Result<Vec<Rule>> {
    if !path.exists() {
        return Err(Error::InputMissing {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(RuleExtractor::new(tables, indicators).parse(&content))
}

/// @ai:intent Derive a title from the first sentence of the prose
/// @ai:post result has at most MAX_TITLE_LEN characters
/// @ai:example ("- Never commit secrets. Ever.") -> "Never commit secrets"
/// @ai:effects pure
pub fn extract_title(text: &str) -> String {
    let text = LEADING_BULLET.replace(text.trim(), "");
    let first = SENTENCE_END.split(&text).next().unwrap_or_default();
    let title = WHITESPACE_RUN.replace_all(first.trim(), " ").to_string();

    if title.is_empty() {
        return FALLBACK_TITLE.to_string();
    }

    truncate_title(&title)
}

/// @ai:effects pure
fn truncate_title(title: &str) -> String {
    if title.chars().count() <= MAX_TITLE_LEN {
        return title.to_string();
    }
    let kept: String = title.chars().take(MAX_TITLE_LEN - 3).collect();
    format!("{}...", kept)
}

/// @ai:effects pure
fn contains_any(text: &str, words: &[String]) -> bool {
    words.iter().any(|word| text.contains(&word.to_lowercase()))
}

/// @ai:intent Look for a marker written as a line comment, e.g. "# WRONG" or "// BAD"
/// @ai:effects pure
fn has_code_marker(code: &str, markers: &[String]) -> bool {
    known_comment_prefixes().iter().any(|prefix| {
        markers
            .iter()
            .any(|marker| code.contains(&format!("{} {}", prefix, marker)))
    })
}
