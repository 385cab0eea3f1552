//! @ai:module:intent Pure text rewrites that give each tool its prose style
//! @ai:module:layer application
//! @ai:module:public_api TextStyle, make_conversational, summarize, comment_wrap
//! @ai:module:depends_on rule
//! @ai:module:stateless true

use crate::rule::Rule;
use regex::Regex;
use std::sync::LazyLock;

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("valid sentence regex"));

static LEADING_BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-*]\s*").expect("valid bullet regex"));

const IMPERATIVE_SUBSTITUTIONS: [(&str, &str); 8] = [
    (r"\bmust\b", "MUST"),
    (r"\bshould\b", "MUST"),
    (r"\bmay\b", "CAN"),
    (r"\bnever\b", "NEVER"),
    (r"\balways\b", "ALWAYS"),
    (r"\brequire\b", "REQUIRE"),
    (r"\bdo not\b", "DO NOT"),
    (r"\bdon't\b", "DO NOT"),
];

const REASONING: [(&str, &str); 5] = [
    ("security", "This prevents security vulnerabilities and protects sensitive data."),
    ("bash", "This ensures scripts are reliable, safe, and handle errors properly."),
    ("python", "This improves code quality, maintainability, and catches errors early."),
    (
        "secret",
        "Committed secrets can be exploited and are nearly impossible to remove from git history.",
    ),
    ("credential", "Hardcoded credentials are a critical security risk."),
];

const DEFAULT_REASONING: &str = "This ensures code quality, security, and maintainability.";

const CORRECT_EXPLANATIONS: [(&str, &str); 5] = [
    ("security", "follows security best practices and protects sensitive data"),
    ("bash", "uses safe shell options and proper error handling"),
    ("python", "follows Python best practices with proper types and error handling"),
    ("environment", "loads configuration from environment variables"),
    ("validation", "validates input before processing"),
];

const DEFAULT_CORRECT: &str = "follows best practices and avoids common pitfalls";

const INCORRECT_EXPLANATIONS: [(&str, &str); 5] = [
    ("security", "exposes sensitive data or creates security vulnerabilities"),
    ("bash", "can fail silently or behave unpredictably"),
    ("python", "lacks proper type safety and error handling"),
    ("hardcode", "hardcodes values that should be configurable"),
    ("secret", "commits secrets directly to the codebase"),
];

const DEFAULT_INCORRECT: &str = "violates best practices and can lead to issues";

const MODAL_OPENERS: [&str; 3] = ["must", "never", "always"];
const CONVERSATIONAL_OPENERS: [&str; 3] = ["you must", "you should", "you need to"];

/// @ai:intent Substitution and rationale tables shared by all transformers
/// @ai:invariant built once per run and only read afterwards
#[derive(Debug, Clone)]
pub struct TextStyle {
    imperative: Vec<(Regex, &'static str)>,
    reasoning: Vec<(&'static str, &'static str)>,
    correct_explanations: Vec<(&'static str, &'static str)>,
    incorrect_explanations: Vec<(&'static str, &'static str)>,
}

impl Default for TextStyle {
    fn default() -> Self {
        let imperative = IMPERATIVE_SUBSTITUTIONS
            .iter()
            .map(|(pattern, replacement)| {
                let re = Regex::new(&format!("(?i){}", pattern)).expect("valid substitution regex");
                (re, *replacement)
            })
            .collect();

        Self {
            imperative,
            reasoning: REASONING.to_vec(),
            correct_explanations: CORRECT_EXPLANATIONS.to_vec(),
            incorrect_explanations: INCORRECT_EXPLANATIONS.to_vec(),
        }
    }
}

impl TextStyle {
    /// @ai:intent Strengthen modal verbs into upper-case commands
    /// @ai:example ("You should never do this") -> "You MUST NEVER do this"
    /// @ai:effects pure
    pub fn make_imperative(&self, text: &str) -> String {
        self.imperative
            .iter()
            .fold(text.to_string(), |acc, (re, replacement)| {
                re.replace_all(&acc, *replacement).into_owned()
            })
    }

    /// @ai:intent Explain why a rule matters: tags first, then content keywords
    /// @ai:effects pure
    pub fn generate_reasoning(&self, rule: &Rule) -> &'static str {
        let by_tag = rule.tags.iter().find_map(|tag| {
            self.reasoning
                .iter()
                .find(|(keyword, _)| keyword == tag)
                .map(|(_, reasoning)| *reasoning)
        });

        by_tag
            .or_else(|| keyword_match(&rule.content, &self.reasoning))
            .unwrap_or(DEFAULT_REASONING)
    }

    /// @ai:intent Explain why the rule's correct example is correct
    /// @ai:effects pure
    pub fn explain_correct(&self, rule: &Rule) -> &'static str {
        keyword_match(&rule.content, &self.correct_explanations).unwrap_or(DEFAULT_CORRECT)
    }

    /// @ai:intent Explain why the rule's incorrect example is incorrect
    /// @ai:effects pure
    pub fn explain_incorrect(&self, rule: &Rule) -> &'static str {
        keyword_match(&rule.content, &self.incorrect_explanations).unwrap_or(DEFAULT_INCORRECT)
    }
}

/// @ai:effects pure
fn keyword_match(text: &str, table: &[(&'static str, &'static str)]) -> Option<&'static str> {
    let text = text.to_lowercase();
    table
        .iter()
        .find(|(keyword, _)| text.contains(keyword))
        .map(|(_, value)| *value)
}

/// @ai:intent Rephrase text as second-person guidance
/// @ai:example ("Never commit secrets.") -> "You never commit secrets."
/// @ai:example ("Use strict mode.") -> "You should use strict mode."
/// @ai:effects pure
pub fn make_conversational(text: &str) -> String {
    let text = text.trim();
    let lower = text.to_lowercase();

    if CONVERSATIONAL_OPENERS.iter().any(|opener| lower.starts_with(opener)) {
        return text.to_string();
    }

    let first_word = lower.split_whitespace().next().unwrap_or_default();
    if MODAL_OPENERS.contains(&first_word) {
        format!("You {}", lowercase_first_word(text))
    } else if lower.starts_with("you") {
        text.to_string()
    } else {
        format!("You should {}", lowercase_first_word(text))
    }
}

/// @ai:intent Lower-case the leading verb, keeping acronyms such as "API"
/// @ai:effects pure
fn lowercase_first_word(text: &str) -> String {
    let end = text.find(char::is_whitespace).unwrap_or(text.len());
    let (word, rest) = text.split_at(end);

    let is_modal = MODAL_OPENERS.contains(&word.to_lowercase().as_str());
    let is_acronym = word.chars().count() > 1 && word.chars().all(|c| !c.is_lowercase());

    if is_acronym && !is_modal {
        return text.to_string();
    }
    format!("{}{}", word.to_lowercase(), rest)
}

/// @ai:intent Reduce text to its first sentence, ending in a period
/// @ai:example ("Use bash. It is safer.") -> "Use bash."
/// @ai:effects pure
pub fn summarize(text: &str) -> String {
    let text = LEADING_BULLET.replace(text.trim(), "");
    let first = SENTENCE_END.split(&text).next().unwrap_or_default().trim_end();

    if first.ends_with('.') {
        first.to_string()
    } else {
        format!("{}.", first)
    }
}

/// @ai:intent Prefix every line as a comment; blank lines become a bare marker
/// @ai:example ("a\n\nb", "# ") -> "# a\n#\n# b"
/// @ai:effects pure
pub fn comment_wrap(text: &str, prefix: &str) -> String {
    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                prefix.trim().to_string()
            } else {
                format!("{}{}", prefix, line.trim_end())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::ALL_FILES;

    fn rule(content: &str, tags: &[&str]) -> Rule {
        Rule {
            section: "S".to_string(),
            subsection: None,
            title: "T".to_string(),
            content: content.to_string(),
            examples: vec![],
            priority: 50,
            scope: vec![ALL_FILES.to_string()],
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_make_imperative() {
        let style = TextStyle::default();
        assert_eq!(
            style.make_imperative("You should never skip tests and must always lint."),
            "You MUST NEVER skip tests and MUST ALWAYS lint."
        );
        assert_eq!(
            style.make_imperative("Don't push; you may rebase."),
            "DO NOT push; you CAN rebase."
        );
    }

    #[test]
    fn test_imperative_respects_word_boundaries() {
        let style = TextStyle::default();
        assert_eq!(style.make_imperative("mayonnaise is mustard"), "mayonnaise is mustard");
    }

    #[test]
    fn test_make_conversational() {
        assert_eq!(make_conversational("Never commit secrets."), "You never commit secrets.");
        assert_eq!(make_conversational("Use strict mode."), "You should use strict mode.");
        assert_eq!(make_conversational("You must test."), "You must test.");
        assert_eq!(make_conversational("API keys stay local."), "You should API keys stay local.");
    }

    #[test]
    fn test_summarize() {
        assert_eq!(summarize("Use bash. It is safer."), "Use bash.");
        assert_eq!(summarize("Quote variables! Always"), "Quote variables.");
        assert_eq!(summarize("- No period"), "No period.");
    }

    #[test]
    fn test_comment_wrap() {
        assert_eq!(comment_wrap("a\n\nb", "# "), "# a\n#\n# b");
    }

    #[test]
    fn test_reasoning_prefers_tags() {
        let style = TextStyle::default();
        let r = rule("Keep your secret keys safe", &["bash"]);
        assert_eq!(style.generate_reasoning(&r), REASONING[1].1);

        let r = rule("Keep your secret keys safe", &[]);
        assert_eq!(style.generate_reasoning(&r), REASONING[3].1);

        let r = rule("Be nice", &[]);
        assert_eq!(style.generate_reasoning(&r), DEFAULT_REASONING);
    }

    #[test]
    fn test_example_explanations() {
        let style = TextStyle::default();
        let r = rule("Read settings from the environment", &[]);
        assert_eq!(style.explain_correct(&r), "loads configuration from environment variables");
        assert_eq!(style.explain_incorrect(&r), DEFAULT_INCORRECT);
    }
}
