//! Unified error handling for tracker-core.
//!
//! This module provides a unified error type that wraps domain, fault and
//! application errors, with user-actionable suggestions.
//!
//! Validation findings are not errors: they are returned inside a
//! `TrackerValidationReport`.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{DomainError, ValidationFault};

/// Root error type for tracker-core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrackerError {
    /// Errors from the domain layer (contract violations in values).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// A hook found its preconditions broken; the run produced no report.
    #[error("Validation could not run: {0}")]
    Fault(#[from] ValidationFault),

    /// Errors from the application layer (pipeline wiring).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl TrackerError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Fault(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in the tracker validator".into(),
                "Re-run with -vv and include the log when reporting it".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Fault(_) => ErrorCategory::Precondition,
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether the run stopped on a broken precondition.
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::Fault(_))
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Precondition,
    Internal,
}

/// Convenient result type alias.
pub type TrackerResult<T> = Result<T, TrackerError>;
