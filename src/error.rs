//! @ai:module:intent Define error types for the standards sync pipeline
//! @ai:module:layer domain
//! @ai:module:public_api Error, Result
//! @ai:module:stateless true

use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Unified error type for all pipeline stages
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input not found: {}", path.display())]
    InputMissing { path: PathBuf },

    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Transformation failed for {tool}: {message}")]
    Transform { tool: String, message: String },

    #[error("Validation failed with {errors} error(s) and {warnings} warning(s)")]
    Validation { errors: usize, warnings: usize },

    #[error("Failed to write file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// @ai:intent Name the pipeline stage this error aborts
    /// @ai:effects pure
    pub fn stage(&self) -> &'static str {
        match self {
            Error::InputMissing { .. } | Error::FileRead { .. } => "input",
            Error::Parse(_) => "parse",
            Error::Transform { .. } | Error::Yaml(_) => "transform",
            Error::Validation { .. } => "validate",
            Error::Write { .. } => "write",
            Error::Config(_) => "config",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_every_variant_names_its_stage() {
        let io_error = || io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("a: [1").unwrap_err();

        let transform = Error::Transform {
            tool: "Cursor".to_string(),
            message: "x".to_string(),
        };
        let cases = [
            (Error::InputMissing { path: "CONTEXT.md".into() }, "input"),
            (
                Error::FileRead {
                    path: "CONTEXT.md".into(),
                    source: io_error(),
                },
                "input",
            ),
            (Error::Parse("no rules".to_string()), "parse"),
            (transform, "transform"),
            (Error::from(yaml_error), "transform"),
            (Error::Validation { errors: 1, warnings: 0 }, "validate"),
            (
                Error::Write {
                    path: "out".into(),
                    source: io_error(),
                },
                "write",
            ),
            (Error::Config("bad".to_string()), "config"),
        ];

        for (error, stage) in cases {
            assert_eq!(error.stage(), stage, "{}", error);
        }
    }
}
