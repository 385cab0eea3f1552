//! @ai:module:intent Keyword tables deciding rule priority, file scope and tags
//! @ai:module:layer domain
//! @ai:module:public_api ClassificationTables, Classification, ExampleIndicators
//! @ai:module:stateless true

use crate::rule::ALL_FILES;
use serde::{Deserialize, Serialize};

/// Priority assigned when no keyword matches.
pub const DEFAULT_PRIORITY: u8 = 50;

/// Highest priority a classification entry may carry.
pub const MAX_PRIORITY: u8 = 100;

/// @ai:intent Section keyword mapped to a priority (higher = more important)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PriorityEntry {
    pub keyword: String,
    pub priority: u8,
}

/// @ai:intent Section keyword mapped to the file globs it governs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScopeEntry {
    pub keyword: String,
    pub globs: Vec<String>,
}

/// @ai:intent Tag attached when any of its keywords occurs in the section title
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagEntry {
    pub tag: String,
    pub keywords: Vec<String>,
}

/// @ai:intent Result of classifying one section title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub priority: u8,
    pub scope: Vec<String>,
    pub tags: Vec<String>,
}

/// @ai:intent Ordered, overridable lookup tables for section classification
/// @ai:invariant tables are read-only during a pipeline run; first match wins
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClassificationTables {
    pub priorities: Vec<PriorityEntry>,
    pub scopes: Vec<ScopeEntry>,
    pub tags: Vec<TagEntry>,
}

impl Default for ClassificationTables {
    fn default() -> Self {
        let priorities = [
            ("Security", 100),
            ("Pre-commit", 90),
            ("Bash Standards", 70),
            ("Python Standards", 70),
            ("Design Principles", 60),
            ("YAML", 50),
            ("JSON", 50),
            ("Documentation", 40),
        ]
        .into_iter()
        .map(|(keyword, priority)| PriorityEntry {
            keyword: keyword.to_string(),
            priority,
        })
        .collect();

        let scopes = [
            ("Bash Standards", &["*.sh", "*.bash"][..]),
            ("Python Standards", &["*.py"][..]),
            ("YAML", &["*.yaml"][..]),
            ("JSON", &["*.json"][..]),
        ]
        .into_iter()
        .map(|(keyword, globs)| ScopeEntry {
            keyword: keyword.to_string(),
            globs: globs.iter().map(|g| g.to_string()).collect(),
        })
        .collect();

        let tags = [
            ("bash", &["bash", "shell", "script"][..]),
            ("python", &["python"][..]),
            ("security", &["security", "secret", "credential"][..]),
            ("yaml", &["yaml"][..]),
            ("json", &["json"][..]),
            ("documentation", &["documentation", "doc"][..]),
        ]
        .into_iter()
        .map(|(tag, keywords)| TagEntry {
            tag: tag.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        })
        .collect();

        Self {
            priorities,
            scopes,
            tags,
        }
    }
}

impl ClassificationTables {
    /// @ai:intent Classify a section title into priority, scope and tags
    /// @ai:example ("Security") -> (100, ["all"], ["security"])
    /// @ai:effects pure
    pub fn classify(&self, section: &str) -> Classification {
        Classification {
            priority: self.priority(section),
            scope: self.scope(section),
            tags: self.tags(section),
        }
    }

    /// @ai:intent First case-insensitive keyword match wins, default 50
    /// @ai:effects pure
    pub fn priority(&self, section: &str) -> u8 {
        let section = section.to_lowercase();
        self.priorities
            .iter()
            .find(|entry| section.contains(&entry.keyword.to_lowercase()))
            .map(|entry| entry.priority)
            .unwrap_or(DEFAULT_PRIORITY)
    }

    /// @ai:intent First case-insensitive keyword match wins, default ["all"]
    /// @ai:effects pure
    pub fn scope(&self, section: &str) -> Vec<String> {
        let section = section.to_lowercase();
        self.scopes
            .iter()
            .find(|entry| {
                section.contains(&entry.keyword.to_lowercase()) && !entry.globs.is_empty()
            })
            .map(|entry| entry.globs.clone())
            .unwrap_or_else(|| vec![ALL_FILES.to_string()])
    }

    /// @ai:intent Collect every tag whose keywords occur in the title
    /// @ai:effects pure
    pub fn tags(&self, section: &str) -> Vec<String> {
        let section = section.to_lowercase();
        self.tags
            .iter()
            .filter(|entry| {
                entry
                    .keywords
                    .iter()
                    .any(|keyword| section.contains(&keyword.to_lowercase()))
            })
            .map(|entry| entry.tag.clone())
            .collect()
    }
}

/// @ai:intent Words and in-code markers used to classify code examples
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ExampleIndicators {
    pub incorrect: Vec<String>,
    pub correct: Vec<String>,
    pub incorrect_code_markers: Vec<String>,
    pub correct_code_markers: Vec<String>,
    /// Number of trailing prose lines inspected before a code block.
    pub lookback_lines: usize,
}

impl Default for ExampleIndicators {
    fn default() -> Self {
        let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();

        Self {
            incorrect: strings(&["wrong", "incorrect", "bad", "don't", "never", "avoid", "❌"]),
            correct: strings(&["correct", "right", "good", "do this", "✅"]),
            incorrect_code_markers: strings(&["WRONG", "BAD", "❌"]),
            correct_code_markers: strings(&["CORRECT", "GOOD", "✅"]),
            lookback_lines: 3,
        }
    }
}
