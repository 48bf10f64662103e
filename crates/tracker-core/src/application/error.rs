//! Application layer errors.
//!
//! These errors represent failures in wiring the pipeline, not findings
//! about a bundle. Findings are reports; broken preconditions are
//! `ValidationFault`s from `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while assembling or running the validation pipeline.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// Two hooks were registered under one name.
    #[error("Hook '{name}' is already registered")]
    DuplicateHook { name: &'static str },

    /// Port/Adapter not configured.
    #[error("Required adapter not configured: {name}")]
    AdapterNotConfigured { name: &'static str },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DuplicateHook { name } => vec![
                format!("Register '{name}' only once"),
                "Reports are stamped with hook names, so names must be unique".into(),
            ],
            Self::AdapterNotConfigured { name } => vec![
                format!("Required component not configured: {}", name),
                "This is likely a configuration error".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DuplicateHook { .. } => ErrorCategory::Internal,
            Self::AdapterNotConfigured { .. } => ErrorCategory::Configuration,
        }
    }
}
