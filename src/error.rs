use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for release docs guard operations
#[derive(Error, Debug)]
pub enum GuardError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("{} missing required link/text: {needle}", .path.display())]
    MissingReference { path: PathBuf, needle: String },

    #[error("Missing required file: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Release {version} failed validation: {source}")]
    ReleaseValidation {
        version: String,
        #[source]
        source: Box<GuardError>,
    },

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Metadata parse error: {0}")]
    Metadata(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Convenience type alias for Results in the guard
pub type Result<T> = std::result::Result<T, GuardError>;

impl GuardError {
    /// Create a configuration error with context
    pub fn configuration(msg: impl Into<String>) -> Self {
        GuardError::Configuration(msg.into())
    }

    /// Create a missing reference error for `needle` absent from `path`
    pub fn missing_reference(path: impl Into<PathBuf>, needle: impl Into<String>) -> Self {
        GuardError::MissingReference {
            path: path.into(),
            needle: needle.into(),
        }
    }

    /// Attach the release version that was being validated
    pub fn for_release(self, version: impl ToString) -> Self {
        GuardError::ReleaseValidation {
            version: version.to_string(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping release wrappers
    pub fn root_cause(&self) -> &GuardError {
        match self {
            GuardError::ReleaseValidation { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
