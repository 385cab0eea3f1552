//! @ai:module:intent Render rules into per-tool configuration files
//! @ai:module:layer application
//! @ai:module:public_api Tool, TransformContext, run_roster, merge_files
//! @ai:module:depends_on rule, style, error
//! @ai:module:stateless true

pub mod aider;
pub mod claude;
pub mod continue_dev;
pub mod copilot;
pub mod cursor;

pub use cursor::RoutingTable;

use crate::error::Result;
use crate::rule::{CodeExample, FileMap, Rule};
use crate::style::TextStyle;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// @ai:intent One supported downstream tool, each with its own renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    /// Imperative `.mdc` rule files routed by section
    Cursor,
    /// Conversational single-file instructions
    Claude,
    /// Concise single-file instructions
    Copilot,
    /// Rules embedded as comments in a YAML config
    Aider,
    /// Rules as structured YAML entries
    Continue,
}

/// @ai:intent Shared read-only inputs handed to every transformer
pub struct TransformContext<'a> {
    pub style: &'a TextStyle,
    pub routing: &'a RoutingTable,
    /// File name of the standards document, used in headers.
    pub source_name: &'a str,
}

impl Tool {
    /// Roster order used when the configuration names none.
    pub const DEFAULT_ROSTER: [Tool; 5] = [
        Tool::Cursor,
        Tool::Claude,
        Tool::Copilot,
        Tool::Aider,
        Tool::Continue,
    ];

    /// @ai:intent Display name of the tool
    /// @ai:effects pure
    pub fn name(&self) -> &'static str {
        match self {
            Tool::Cursor => "Cursor",
            Tool::Claude => "Claude",
            Tool::Copilot => "GitHub Copilot",
            Tool::Aider => "Aider",
            Tool::Continue => "Continue.dev",
        }
    }

    /// @ai:intent Render the full rule list into this tool's files
    /// @ai:post rules missing subsection or examples render without those parts
    /// @ai:effects pure
    pub fn transform(&self, rules: &[Rule], ctx: &TransformContext<'_>) -> Result<FileMap> {
        match self {
            Tool::Cursor => cursor::transform(rules, ctx),
            Tool::Claude => Ok(claude::transform(rules, ctx)),
            Tool::Copilot => Ok(copilot::transform(rules, ctx)),
            Tool::Aider => aider::transform(rules, ctx),
            Tool::Continue => continue_dev::transform(rules, ctx),
        }
    }
}

/// @ai:intent Run every tool in roster order and merge their outputs
/// @ai:post on path collisions the later tool's content wins
/// @ai:effects pure
pub fn run_roster(tools: &[Tool], rules: &[Rule], ctx: &TransformContext<'_>) -> Result<FileMap> {
    let mut all_files = FileMap::new();

    for tool in tools {
        let files = tool.transform(rules, ctx)?;
        debug!(tool = tool.name(), files = files.len(), "transformed rules");
        merge_files(&mut all_files, files);
    }

    Ok(all_files)
}

/// @ai:intent Union two file maps, overwriting existing paths
/// @ai:effects pure
pub fn merge_files(target: &mut FileMap, files: FileMap) {
    for (path, content) in files {
        target.insert(path, content);
    }
}

/// @ai:intent Render a fenced code block for an example
/// @ai:effects pure
pub(crate) fn fenced(example: &CodeExample) -> String {
    format!("```{}\n{}\n```", example.language, example.code)
}
