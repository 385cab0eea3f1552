//! @ai:module:intent Turn one coding standards document into per-tool AI assistant configs
//! @ai:module:layer infrastructure
//! @ai:module:public_api classify, config, error, extractor, language, output, pipeline, rule, splitter, style, transform, validator
//! @ai:module:stateless true
//!
//! # Standards Sync
//!
//! Parses a Markdown standards document into classified rules, renders them in the
//! voice each AI coding tool expects, validates the generated files and writes them.
//!
//! ## Example
//!
//! ```rust,no_run
//! use standards_sync::{output, SyncConfig, SyncPipeline};
//!
//! let config = SyncConfig::default();
//! let outcome = SyncPipeline::new(config, true).run().unwrap();
//! println!("{}", output::format_dry_run(&outcome.files));
//! ```

pub mod classify;
pub mod config;
pub mod error;
pub mod extractor;
pub mod language;
pub mod output;
pub mod pipeline;
pub mod rule;
pub mod splitter;
pub mod style;
pub mod transform;
pub mod validator;

pub use classify::{Classification, ClassificationTables, ExampleIndicators};
pub use config::{PathConfig, SyncConfig, DEFAULT_CONFIG_FILE};
pub use error::{Error, Result};
pub use extractor::{extract_file, RuleExtractor};
pub use language::{comment_prefix, detect_language, Language};
pub use output::{format_dry_run, format_rules, format_validation_report, to_json, OutputFormat};
pub use pipeline::{write_files, SyncOutcome, SyncPipeline};
pub use rule::{CodeExample, FileMap, Rule};
pub use splitter::{split_sections, split_subsections, strip_ordinal};
pub use style::TextStyle;
pub use transform::{merge_files, run_roster, RoutingTable, Tool, TransformContext};
pub use validator::{Severity, ValidationConfig, ValidationIssue, ValidationReport, Validator};
