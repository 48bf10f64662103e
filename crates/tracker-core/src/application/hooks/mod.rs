//! Validation hooks: independent rule units run in ascending order.
//!
//! Ordering keys encode dependencies. Existence runs first, then
//! meta-resolution, then security. Every hook visits every entity of its
//! kinds. Checks that need a reference an earlier hook could not resolve
//! consult [`Prerequisite`](crate::application::reporter::Prerequisite)
//! marks and skip; independent checks on the same entity still run.

pub mod category_option;
pub mod enrollment_date;
pub mod existence;
pub mod meta;
pub mod security;

#[cfg(test)]
pub(crate) mod test_support;

pub use category_option::EventCategoryOptHook;
pub use enrollment_date::EnrollmentDateHook;
pub use existence::ExistenceHook;
pub use meta::MetaHook;
pub use security::SecurityHook;

use crate::application::{
    context::ValidationContext,
    reporter::{HookResult, ValidationErrorReporter},
};
use crate::domain::{EntityKind, Enrollment, Event, TrackedEntity};

/// Entity kinds a hook that validates everything declares.
pub const ALL_KINDS: &[EntityKind] = &EntityKind::DEPENDENCY_ORDER;

/// A unit of validation rules for one or more entity kinds.
///
/// Kind-specific methods default to a no-op; a hook overrides the ones for
/// the kinds it declares in [`ValidationHook::kinds`]. Errors go to the
/// reporter; `Err` is reserved for fail-fast and precondition faults.
pub trait ValidationHook: Send + Sync {
    /// Stamped on every report this hook produces.
    fn name(&self) -> &'static str;

    /// Lower runs first.
    fn order(&self) -> i32;

    fn kinds(&self) -> &'static [EntityKind];

    fn applies_to(&self, kind: EntityKind) -> bool {
        self.kinds().contains(&kind)
    }

    fn validate_tracked_entity(
        &self,
        _reporter: &mut ValidationErrorReporter,
        _ctx: &mut ValidationContext<'_>,
        _tei: &TrackedEntity,
    ) -> HookResult {
        Ok(())
    }

    fn validate_enrollment(
        &self,
        _reporter: &mut ValidationErrorReporter,
        _ctx: &mut ValidationContext<'_>,
        _enrollment: &Enrollment,
    ) -> HookResult {
        Ok(())
    }

    /// Takes `&mut` because meta-resolution may backfill the program.
    fn validate_event(
        &self,
        _reporter: &mut ValidationErrorReporter,
        _ctx: &mut ValidationContext<'_>,
        _event: &mut Event,
    ) -> HookResult {
        Ok(())
    }
}

/// Returns the reference string for a report argument; absent is empty.
pub(crate) fn reference(id: Option<&str>) -> &str {
    id.unwrap_or_default()
}
