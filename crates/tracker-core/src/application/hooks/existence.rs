//! Import strategy versus persisted state.

use crate::application::{
    context::ValidationContext,
    hooks::{ALL_KINDS, ValidationHook},
    reporter::{HookResult, Prerequisite, ValidationErrorReporter},
};
use crate::domain::{
    EntityKind, Enrollment, Event, TrackedEntity, TrackerDto, TrackerErrorCode,
};

/// Reports creates of existing entities and updates or deletes of missing ones.
///
/// Runs first. A missing persisted instance is marked unresolved so later
/// hooks skip their persisted-state checks for that entity.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExistenceHook;

impl ExistenceHook {
    pub const NAME: &'static str = "ExistenceHook";
    pub const ORDER: i32 = 1;

    fn check<T: TrackerDto>(
        reporter: &mut ValidationErrorReporter,
        ctx: &ValidationContext<'_>,
        dto: &T,
        exists: bool,
        (already_exists, does_not_exist): (TrackerErrorCode, TrackerErrorCode),
    ) -> HookResult {
        let strategy = ctx.strategy();
        let code = if strategy.is_create() && exists {
            already_exists
        } else if strategy.is_update_or_delete() && !exists {
            reporter.mark_unresolved(Prerequisite::PersistedInstance);
            does_not_exist
        } else {
            return Ok(());
        };

        reporter.add_error(
            dto.entity_ref(),
            ValidationErrorReporter::new_report(code).arg(dto.uid()),
        )
    }
}

impl ValidationHook for ExistenceHook {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn order(&self) -> i32 {
        Self::ORDER
    }

    fn kinds(&self) -> &'static [EntityKind] {
        ALL_KINDS
    }

    fn validate_tracked_entity(
        &self,
        reporter: &mut ValidationErrorReporter,
        ctx: &mut ValidationContext<'_>,
        tei: &TrackedEntity,
    ) -> HookResult {
        let exists = ctx.preheat().tracked_entity(tei.uid()).is_some();
        Self::check(
            reporter,
            ctx,
            tei,
            exists,
            (TrackerErrorCode::E1002, TrackerErrorCode::E1063),
        )
    }

    fn validate_enrollment(
        &self,
        reporter: &mut ValidationErrorReporter,
        ctx: &mut ValidationContext<'_>,
        enrollment: &Enrollment,
    ) -> HookResult {
        let exists = ctx.preheat().enrollment(enrollment.uid()).is_some();
        Self::check(
            reporter,
            ctx,
            enrollment,
            exists,
            (TrackerErrorCode::E1080, TrackerErrorCode::E1081),
        )
    }

    fn validate_event(
        &self,
        reporter: &mut ValidationErrorReporter,
        ctx: &mut ValidationContext<'_>,
        event: &mut Event,
    ) -> HookResult {
        let exists = ctx.preheat().event(event.uid()).is_some();
        Self::check(
            reporter,
            ctx,
            &*event,
            exists,
            (TrackerErrorCode::E1030, TrackerErrorCode::E1032),
        )
    }
}
