//! @ai:module:intent Split the standards document into sections and subsections
//! @ai:module:layer application
//! @ai:module:public_api split_sections, split_subsections, strip_ordinal
//! @ai:module:stateless true

use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;

const SECTION_MARKER: &str = "## ";
const SUBSECTION_MARKER: &str = "### ";

static ORDINAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+\.)+\d*\s*").expect("valid ordinal regex"));

/// @ai:intent Split a document into section title -> body at level-2 headings
/// @ai:post text before the first section heading is dropped
/// @ai:effects pure
pub fn split_sections(content: &str) -> IndexMap<String, String> {
    split_at_marker(content, SECTION_MARKER)
}

/// @ai:intent Split a section body into subsection title -> body at level-3 headings
/// @ai:post preamble before the first subsection heading is dropped
/// @ai:effects pure
pub fn split_subsections(content: &str) -> IndexMap<String, String> {
    split_at_marker(content, SUBSECTION_MARKER)
}

/// @ai:intent Remove one leading numeric ordinal such as "3." or "3.1"
/// @ai:example ("3. Bash Standards") -> "Bash Standards"
/// @ai:example ("3.1 File Naming") -> "File Naming"
/// @ai:example ("2024 Goals") -> "2024 Goals"
/// @ai:effects pure
pub fn strip_ordinal(title: &str) -> String {
    ORDINAL.replace(title.trim(), "").trim().to_string()
}

/// @ai:intent Collect heading-delimited blocks for one heading marker
/// @ai:effects pure
fn split_at_marker(content: &str, marker: &str) -> IndexMap<String, String> {
    let mut blocks = IndexMap::new();
    let mut current: Option<(String, Vec<&str>)> = None;

    for line in content.split('\n') {
        if let Some(heading) = line.strip_prefix(marker) {
            if let Some((title, lines)) = current.take() {
                blocks.insert(title, lines.join("\n"));
            }
            current = Some((strip_ordinal(heading), Vec::new()));
        } else if let Some((_, lines)) = current.as_mut() {
            lines.push(line);
        }
    }

    if let Some((title, lines)) = current {
        blocks.insert(title, lines.join("\n"));
    }

    blocks
}
