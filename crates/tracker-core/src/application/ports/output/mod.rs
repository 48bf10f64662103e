//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the validation pipeline needs from external
//! systems. The `tracker-adapters` crate provides implementations.

use chrono::{DateTime, Utc};

use crate::application::reporter::{HookResult, ValidationErrorReporter};
use crate::domain::{
    CategoryOptionCombo, EntityRef, IdScheme, OrganisationUnit, Program, ProgramInstance,
    ProgramStage, ProgramStageInstance, TrackedEntityInstance, TrackedEntityType,
    TrackerIdentifierParams, User,
};

/// Port for the pre-loaded lookup cache a validation run reads from.
///
/// Implemented by:
/// - `tracker_adapters::preheat::InMemoryPreheat` (snapshot loaded before the run)
///
/// ## Design Notes
///
/// - Every lookup returns `None` for "not found"; that is a validation
///   outcome, never an error
/// - Metadata lookups take identifiers under the scheme reported by
///   [`PreheatContext::identifiers`]; persisted lookups always take uids
/// - [`PreheatContext::put_program`] is the only mutation path, and hooks
///   reach it solely through `ValidationContext::backfill_program`
pub trait PreheatContext: Send + Sync {
    /// Identifier schemes the bundle's references are expressed in.
    fn identifiers(&self) -> &TrackerIdentifierParams;

    fn organisation_unit(&self, id: &str) -> Option<&OrganisationUnit>;

    fn program(&self, id: &str) -> Option<&Program>;

    /// Lookup by uid regardless of the configured program scheme.
    fn program_by_uid(&self, uid: &str) -> Option<&Program>;

    fn program_stage(&self, id: &str) -> Option<&ProgramStage>;

    fn tracked_entity_type(&self, id: &str) -> Option<&TrackedEntityType>;

    fn category_option_combo(&self, id: &str) -> Option<&CategoryOptionCombo>;

    /// The system default combo, used when an event carries none.
    fn default_category_option_combo(&self) -> Option<&CategoryOptionCombo>;

    fn tracked_entity(&self, uid: &str) -> Option<&TrackedEntityInstance>;

    fn enrollment(&self, uid: &str) -> Option<&ProgramInstance>;

    fn event(&self, uid: &str) -> Option<&ProgramStageInstance>;

    /// Register `program` under its identifier in `scheme` (and its uid).
    fn put_program(&mut self, scheme: IdScheme, program: Program);
}

/// Port for capture-scope checks.
///
/// Implemented by:
/// - `tracker_adapters::access::CaptureScopeAccessManager` (org-unit path ancestry)
///
/// A failed check is appended to `reporter` as an E1000 report attributed to
/// `entity`; it never surfaces as an `Err` unless the reporter halts the run.
#[cfg_attr(test, mockall::automock)]
pub trait AccessManager: Send + Sync {
    fn check_org_unit_in_capture_scope(
        &self,
        reporter: &mut ValidationErrorReporter,
        user: &User,
        entity: &EntityRef,
        org_unit: &OrganisationUnit,
    ) -> HookResult;
}

/// Port for the current time.
///
/// Sampled once per run so every hook sees the same "now".
///
/// Implemented by:
/// - `tracker_adapters::clock::SystemClock` (production)
/// - `tracker_adapters::clock::FixedClock` (tests, `--now`)
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
