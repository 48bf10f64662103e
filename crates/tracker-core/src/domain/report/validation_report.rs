//! The outcome of one validation run.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    report::{TrackerErrorCode, TrackerErrorReport},
    value_objects::ValidationMode,
};

/// Ordered findings of a validation run.
///
/// A non-empty report means "do not persist this bundle".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerValidationReport {
    pub run_id: Uuid,
    pub mode: ValidationMode,
    /// `true` when fail-fast cut the run short.
    pub aborted: bool,
    pub error_reports: Vec<TrackerErrorReport>,
}

impl TrackerValidationReport {
    pub fn new(mode: ValidationMode, aborted: bool, error_reports: Vec<TrackerErrorReport>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            mode,
            aborted,
            error_reports,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.error_reports.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.is_empty()
    }

    pub fn len(&self) -> usize {
        self.error_reports.len()
    }

    /// Error codes in report order.
    pub fn codes(&self) -> Vec<TrackerErrorCode> {
        self.error_reports.iter().map(|r| r.error_code).collect()
    }

    pub fn has_code(&self, code: TrackerErrorCode) -> bool {
        self.error_reports.iter().any(|r| r.error_code == code)
    }

    /// Reports about `uid`, including nested ones attributed to it.
    pub fn for_entity<'a>(&'a self, uid: &'a str) -> impl Iterator<Item = &'a TrackerErrorReport> {
        self.error_reports.iter().filter(move |r| r.concerns(uid))
    }
}
