//! @ai:module:intent Sequence parse, transform, validate and write as hard-stop stages
//! @ai:module:layer application
//! @ai:module:public_api SyncPipeline, SyncOutcome, write_files
//! @ai:module:depends_on config, extractor, transform, validator, style, error

use crate::config::SyncConfig;
use crate::error::{Error, Result};
use crate::extractor::extract_file;
use crate::rule::{FileMap, Rule};
use crate::style::TextStyle;
use crate::transform::{run_roster, TransformContext};
use crate::validator::{ValidationReport, Validator};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// @ai:intent Everything a successful run produced
#[derive(Debug)]
pub struct SyncOutcome {
    pub rules: Vec<Rule>,
    pub files: FileMap,
    pub report: ValidationReport,
    /// Paths written to disk; empty on a dry run.
    pub written: Vec<PathBuf>,
}

/// @ai:intent Single-threaded pipeline over one standards document
pub struct SyncPipeline {
    config: SyncConfig,
    style: TextStyle,
    dry_run: bool,
}

impl SyncPipeline {
    pub fn new(config: SyncConfig, dry_run: bool) -> Self {
        Self {
            config,
            style: TextStyle::default(),
            dry_run,
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// @ai:intent Run all stages, stopping at the first failing one
    /// @ai:post nothing is written unless every earlier stage succeeded
    /// @ai:effects fs:read, fs:write
    pub fn run(&self) -> Result<SyncOutcome> {
        let rules = self.parse()?;
        let files = self.transform(&rules)?;

        let report = self.validate(&files);
        if !report.passed() {
            return Err(Error::Validation {
                errors: report.errors,
                warnings: report.warnings,
            });
        }

        let written = if self.dry_run {
            Vec::new()
        } else {
            self.write(&files)?
        };

        Ok(SyncOutcome {
            rules,
            files,
            report,
            written,
        })
    }

    /// @ai:intent Read the document and extract its rules
    /// @ai:effects fs:read
    pub fn parse(&self) -> Result<Vec<Rule>> {
        let path = &self.config.paths.context;
        let rules = extract_file(path, &self.config.classification, &self.config.indicators)?;

        if rules.is_empty() {
            return Err(Error::Parse(format!(
                "no rules found in {} (expected '## ' section headings)",
                path.display()
            )));
        }

        info!(rules = rules.len(), path = %path.display(), "parsed standards document");
        Ok(rules)
    }

    /// @ai:intent Render the rules with every configured tool, merged in roster order
    /// @ai:effects pure
    pub fn transform(&self, rules: &[Rule]) -> Result<FileMap> {
        let source_name = self.source_name();
        let ctx = TransformContext {
            style: &self.style,
            routing: &self.config.routing,
            source_name: &source_name,
        };

        let files = run_roster(&self.config.tools, rules, &ctx)?;
        info!(files = files.len(), tools = self.config.tools.len(), "generated files");
        Ok(files)
    }

    /// @ai:intent Validate the generated files
    /// @ai:effects pure
    pub fn validate(&self, files: &FileMap) -> ValidationReport {
        let mut validator = Validator::new(self.config.validation.clone());
        validator.validate_all(files);
        validator.into_report()
    }

    /// @ai:intent Write every file under the output root, creating directories
    /// @ai:effects fs:write
    pub fn write(&self, files: &FileMap) -> Result<Vec<PathBuf>> {
        write_files(&self.config.paths.output_dir, files)
    }

    /// @ai:effects pure
    fn source_name(&self) -> String {
        self.config
            .paths
            .context
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.config.paths.context.display().to_string())
    }
}

/// @ai:intent Persist a file map below `root`, overwriting existing files
/// @ai:effects fs:write
pub fn write_files(root: &Path, files: &FileMap) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());

    for (relative, content) in files {
        let path = root.join(relative);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::Write {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        std::fs::write(&path, content).map_err(|e| Error::Write {
            path: path.clone(),
            source: e,
        })?;

        debug!(path = %path.display(), "wrote file");
        written.push(path);
    }

    Ok(written)
}
