// ============================================================================
// domain/error.rs - DOMAIN ERRORS AND PRECONDITION FAULTS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// These are contract violations in values handed to the domain, never
/// validation findings. Findings are `TrackerErrorReport`s.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("invalid {field}: '{value}'")]
    InvalidValue { field: &'static str, value: String },

    #[error("unknown tracker error code: '{0}'")]
    UnknownErrorCode(String),

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidValue { field, value } => vec![
                format!("'{value}' is not a valid {field}"),
                "Check the allowed values with --help".into(),
            ],
            Self::UnknownErrorCode(code) => vec![
                format!("'{code}' is not in the error catalog"),
                "Try: tracker codes".into(),
            ],
            Self::MissingRequiredField { field } => {
                vec![format!("Provide a value for '{field}'")]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidValue { .. } | Self::MissingRequiredField { .. } => {
                ErrorCategory::Validation
            }
            Self::UnknownErrorCode(_) => ErrorCategory::NotFound,
        }
    }
}

/// A validation run could not produce a meaningful report.
///
/// Raised when a hook finds its preconditions broken: the caller passed an
/// incomplete bundle, or hooks were registered in an order that lets a
/// dependent hook see unresolved references. Distinct from fail-fast, which
/// is a normal early exit with a valid (partial) report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationFault {
    #[error("bundle has no acting user")]
    UserMissing,

    #[error("{kind} '{uid}' has no organisation unit reference")]
    OrgUnitReferenceMissing { kind: &'static str, uid: String },

    #[error("{kind} '{uid}' references organisation unit '{org_unit}' that was never resolved")]
    OrgUnitUnresolved {
        kind: &'static str,
        uid: String,
        org_unit: String,
    },

    #[error("{kind} '{uid}' reached '{hook}' without a resolved program")]
    ProgramUnresolved {
        kind: &'static str,
        uid: String,
        hook: &'static str,
    },

    #[error("program stage '{program_stage}' points at program '{program}' which is not preheated")]
    OwningProgramMissing {
        program_stage: String,
        program: String,
    },

    #[error("no default category option combo is preheated")]
    DefaultCategoryOptionComboMissing,

    #[error("{kind} '{uid}' is imported as an update or delete but was never persisted")]
    PersistedInstanceMissing { kind: &'static str, uid: String },

    #[error("hook registry: {0}")]
    Registry(String),
}

impl ValidationFault {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UserMissing => vec!["Set the acting user on the bundle before validating".into()],
            Self::OrgUnitReferenceMissing { .. } | Self::OrgUnitUnresolved { .. } => vec![
                "Meta-resolution must run before security checks".into(),
                "Check that the meta hook is registered with a lower ordering key".into(),
            ],
            Self::ProgramUnresolved { hook, .. } => vec![format!(
                "'{hook}' depends on the meta hook having resolved the program"
            )],
            Self::OwningProgramMissing { program, .. } => vec![
                format!("Preheat program '{program}' together with its stages"),
            ],
            Self::DefaultCategoryOptionComboMissing => {
                vec!["Include the default category option combo in the preheat snapshot".into()]
            }
            Self::PersistedInstanceMissing { .. } => vec![
                "Register the existence hook so missing instances are reported".into(),
            ],
            Self::Registry(_) => vec!["Check the hook registration".into()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
