//! @ai:module:intent Define the rule and code example data model
//! @ai:module:layer domain
//! @ai:module:public_api Rule, CodeExample, FileMap, ALL_FILES
//! @ai:module:stateless true

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Scope sentinel for rules that apply to every file.
pub const ALL_FILES: &str = "all";

/// Fence tag used when a code block declares no language.
pub const DEFAULT_LANGUAGE: &str = "text";

/// Generated output: relative path to full file content, in insertion order.
pub type FileMap = IndexMap<String, String>;

/// @ai:intent A fenced code block classified as a correct or incorrect example
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeExample {
    pub code: String,
    pub language: String,
    pub is_correct: bool,
    pub explanation: Option<String>,
}

/// @ai:intent One governed coding rule extracted from the standards document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rule {
    pub section: String,
    pub subsection: Option<String>,
    pub title: String,
    pub content: String,
    pub examples: Vec<CodeExample>,
    pub priority: u8,
    pub scope: Vec<String>,
    pub tags: Vec<String>,
}

impl CodeExample {
    /// @ai:intent Create an example, falling back to the generic language tag
    /// @ai:example ("ls", None, true) -> language "text"
    pub fn new(code: impl Into<String>, language: Option<&str>, is_correct: bool) -> Self {
        let language = language
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_LANGUAGE);

        Self {
            code: code.into(),
            language: language.to_string(),
            is_correct,
            explanation: None,
        }
    }
}

impl Rule {
    /// @ai:intent Check whether the rule applies to every file
    pub fn applies_to_all(&self) -> bool {
        self.scope.is_empty() || self.scope.iter().any(|s| s == ALL_FILES)
    }

    pub fn correct_examples(&self) -> impl Iterator<Item = &CodeExample> {
        self.examples.iter().filter(|e| e.is_correct)
    }

    pub fn incorrect_examples(&self) -> impl Iterator<Item = &CodeExample> {
        self.examples.iter().filter(|e| !e.is_correct)
    }

    /// @ai:intent Check if the rule carries a tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// @ai:intent Group rules by section, keeping first-appearance order
/// @ai:effects pure
pub fn group_by_section(rules: &[Rule]) -> IndexMap<&str, Vec<&Rule>> {
    let mut sections: IndexMap<&str, Vec<&Rule>> = IndexMap::new();
    for rule in rules {
        sections.entry(rule.section.as_str()).or_default().push(rule);
    }
    sections
}
