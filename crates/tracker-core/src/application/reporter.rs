//! Per-run accumulator of error reports.
//!
//! One reporter is created for every call to
//! [`TrackerValidationService::validate`](crate::application::TrackerValidationService::validate)
//! and is never shared between runs.
//!
//! Fail-fast is expressed through the return type: in fail-fast mode the
//! first [`ValidationErrorReporter::add_error`] returns
//! `Err(ValidationHalt::FailFast { .. })` carrying every report so far, and
//! hooks and the runner propagate it with `?`.
//!
//! Every hook sees every entity. A hook that leaves a reference unresolved
//! marks the matching [`Prerequisite`]; later hooks skip only the checks that
//! need it.

use std::collections::HashSet;

use crate::domain::{
    EntityKind, EntityRef, ErrorReportBuilder, TrackerErrorCode, TrackerErrorReport,
    ValidationFault, ValidationMode,
};

/// Why a run stopped before visiting every hook and entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationHalt {
    /// First error in fail-fast mode. `reports` is the final result.
    FailFast { reports: Vec<TrackerErrorReport> },

    /// A precondition was broken; the run has no meaningful result.
    Fault(ValidationFault),
}

impl From<ValidationFault> for ValidationHalt {
    fn from(fault: ValidationFault) -> Self {
        Self::Fault(fault)
    }
}

/// Outcome of one hook invocation.
pub type HookResult = Result<(), ValidationHalt>;

/// Something a later hook needs resolved before it can check an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prerequisite {
    /// The entity's own organisation unit (E1011, E1070).
    OrgUnit,
    /// The entity's program, after inference (E1069, E1088).
    Program,
    /// The stored instance an update or delete targets (E1063, E1081, E1032).
    PersistedInstance,
}

#[derive(Debug)]
pub struct ValidationErrorReporter {
    mode: ValidationMode,
    reports: Vec<TrackerErrorReport>,
    hook: &'static str,
    kind: Option<EntityKind>,
    position: usize,
    unresolved: HashSet<(EntityKind, usize, Prerequisite)>,
}

impl ValidationErrorReporter {
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            mode,
            reports: Vec::new(),
            hook: "",
            kind: None,
            position: 0,
            unresolved: HashSet::new(),
        }
    }

    /// Start a report seeded with `code`.
    pub fn new_report(code: TrackerErrorCode) -> ErrorReportBuilder {
        ErrorReportBuilder::new(code)
    }

    /// Build and record a report attributed to `entity`.
    ///
    /// The report is stamped with the current hook name and position.
    pub fn add_error(&mut self, entity: EntityRef, builder: ErrorReportBuilder) -> HookResult {
        let report = builder.build(self.hook, self.position, entity);
        self.reports.push(report);

        if self.mode.is_fail_fast() {
            return Err(ValidationHalt::FailFast {
                reports: std::mem::take(&mut self.reports),
            });
        }
        Ok(())
    }

    /// Advance to the next entity; the sequential form of [`Self::set_position`].
    pub fn increment(&mut self) {
        self.position += 1;
    }

    pub fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Point subsequent reports at `hook` validating entities of `kind`.
    pub(crate) fn enter(&mut self, hook: &'static str, kind: EntityKind) {
        self.hook = hook;
        self.kind = Some(kind);
        self.position = 0;
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    pub fn is_fail_fast(&self) -> bool {
        self.mode.is_fail_fast()
    }

    /// Record that the current entity lacks `prerequisite` for the rest of the run.
    pub fn mark_unresolved(&mut self, prerequisite: Prerequisite) {
        if let Some(kind) = self.kind {
            self.unresolved.insert((kind, self.position, prerequisite));
        }
    }

    /// Whether an earlier hook marked `prerequisite` missing for the current entity.
    pub fn is_unresolved(&self, prerequisite: Prerequisite) -> bool {
        self.kind
            .is_some_and(|kind| self.is_unresolved_at(kind, self.position, prerequisite))
    }

    pub fn is_unresolved_at(
        &self,
        kind: EntityKind,
        position: usize,
        prerequisite: Prerequisite,
    ) -> bool {
        self.unresolved.contains(&(kind, position, prerequisite))
    }

    pub fn has_errors(&self) -> bool {
        !self.reports.is_empty()
    }

    pub fn reports(&self) -> &[TrackerErrorReport] {
        &self.reports
    }

    pub fn into_reports(self) -> Vec<TrackerErrorReport> {
        self.reports
    }
}
