//! @ai:module:intent Configuration for the sync pipeline, loadable from TOML
//! @ai:module:layer infrastructure
//! @ai:module:public_api SyncConfig, PathConfig, DEFAULT_CONFIG_FILE
//! @ai:module:depends_on classify, transform, validator, error
//! @ai:module:stateless true

use crate::classify::{ClassificationTables, ExampleIndicators, MAX_PRIORITY};
use crate::error::{Error, Result};
use crate::transform::{RoutingTable, Tool};
use crate::validator::ValidationConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File picked up from the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "standards-sync.toml";

/// @ai:intent Main configuration for the sync pipeline
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SyncConfig {
    /// Transformers in the order their outputs are merged.
    pub tools: Vec<Tool>,
    pub paths: PathConfig,
    pub classification: ClassificationTables,
    pub indicators: ExampleIndicators,
    pub routing: RoutingTable,
    pub validation: ValidationConfig,
}

/// @ai:intent Input document and output root locations
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PathConfig {
    pub context: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            tools: Tool::DEFAULT_ROSTER.to_vec(),
            paths: PathConfig::default(),
            classification: ClassificationTables::default(),
            indicators: ExampleIndicators::default(),
            routing: RoutingTable::default(),
            validation: ValidationConfig::default(),
        }
    }
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            context: PathBuf::from("CONTEXT.md"),
            output_dir: PathBuf::from("."),
        }
    }
}

impl SyncConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::InputMissing {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_toml(&content)
    }

    /// @ai:intent Parse configuration text; missing keys take defaults
    /// @ai:effects pure
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| Error::Write {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// @ai:intent Load the given file, else the default file if present, else defaults
    /// @ai:effects fs:read
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// @ai:intent Reject configurations the pipeline cannot run with
    /// @ai:effects pure
    fn check(&self) -> Result<()> {
        if self.tools.is_empty() {
            return Err(Error::Config("at least one tool must be configured".to_string()));
        }
        if self.routing.default_path.trim().is_empty() {
            return Err(Error::Config("routing.default_path must not be empty".to_string()));
        }
        if let Some(entry) = self
            .classification
            .priorities
            .iter()
            .find(|entry| entry.priority > MAX_PRIORITY)
        {
            return Err(Error::Config(format!(
                "priority for '{}' is {}, must be at most {}",
                entry.keyword, entry.priority, MAX_PRIORITY
            )));
        }
        if self.validation.max_line_length == 0 {
            return Err(Error::Config("validation.max_line_length must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = SyncConfig::from_toml("").unwrap();
        assert_eq!(config, SyncConfig::default());
    }

    #[test]
    fn test_override_tables_and_roster() {
        let config = SyncConfig::from_toml(
            r#"
tools = ["claude", "cursor"]

[paths]
context = "docs/STANDARDS.md"

[[classification.priorities]]
keyword = "Testing"
priority = 80
"#,
        )
        .unwrap();

        assert_eq!(config.tools, vec![Tool::Claude, Tool::Cursor]);
        assert_eq!(config.paths.context, PathBuf::from("docs/STANDARDS.md"));
        assert_eq!(config.paths.output_dir, PathBuf::from("."));
        assert_eq!(config.classification.priority("Testing Standards"), 80);
        assert_eq!(config.classification.priority("Security"), 50);
        assert_eq!(config.classification.scopes, ClassificationTables::default().scopes);
    }

    #[test]
    fn test_empty_roster_rejected() {
        let result = SyncConfig::from_toml("tools = []");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_priority_above_range_rejected() {
        let result = SyncConfig::from_toml(
            r#"
[[classification.priorities]]
keyword = "Testing"
priority = 200
"#,
        );

        assert!(matches!(result, Err(Error::Config(msg)) if msg.contains("Testing")));
    }

    #[test]
    fn test_save_and_load() {
        let file = NamedTempFile::with_suffix(".toml").unwrap();
        let config = SyncConfig::default();

        config.save(file.path()).unwrap();
        let loaded = SyncConfig::load(file.path()).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file() {
        let result = SyncConfig::load(Path::new("/nonexistent/standards-sync.toml"));
        assert!(matches!(result, Err(Error::InputMissing { .. })));
    }
}
