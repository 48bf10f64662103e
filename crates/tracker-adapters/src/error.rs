//! Errors raised while reading bundles and preheat snapshots.

use std::path::PathBuf;

use thiserror::Error;
use tracker_core::error::{ErrorCategory, TrackerError};

pub type AdapterResult<T> = Result<T, AdapterError>;

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid {what} in {}: {source}", path.display())]
    Parse {
        what: &'static str,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid {what}: {source}")]
    ParseStr {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl AdapterError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotFound { .. } => ErrorCategory::NotFound,
            Self::Io { .. } => ErrorCategory::Internal,
            Self::Parse { .. } | Self::ParseStr { .. } => ErrorCategory::Validation,
        }
    }

    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::NotFound { path } => vec![
                format!("Check that '{}' exists", path.display()),
                "Paths are resolved relative to the current directory".to_string(),
            ],
            Self::Io { .. } => vec!["Check file permissions".to_string()],
            Self::Parse { what, source, .. } | Self::ParseStr { what, source } => vec![
                format!("The {what} must be a JSON document"),
                format!("Fix the input near line {}, column {}", source.line(), source.column()),
            ],
        }
    }
}

impl From<AdapterError> for TrackerError {
    fn from(err: AdapterError) -> Self {
        match err.category() {
            ErrorCategory::Internal => TrackerError::Internal {
                message: err.to_string(),
            },
            _ => TrackerError::Configuration {
                message: err.to_string(),
            },
        }
    }
}
