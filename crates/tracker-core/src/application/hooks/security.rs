//! Capture-scope checks on incoming and persisted organisation units.

use std::sync::Arc;

use crate::application::{
    context::ValidationContext,
    hooks::{ALL_KINDS, ValidationHook},
    ports::AccessManager,
    reporter::{HookResult, Prerequisite, ValidationErrorReporter},
};
use crate::domain::{
    EntityKind, Enrollment, Event, OrganisationUnit, TrackedEntity, TrackerDto, User,
    ValidationFault,
};

/// Requires the acting user to have capture access to every org unit an
/// entity touches.
///
/// Runs after [`MetaHook`](super::MetaHook). Org units and persisted
/// instances already marked unresolved are not checked again. Any other
/// missing user, org unit or instance is a pipeline fault, not a data error.
pub struct SecurityHook {
    access: Arc<dyn AccessManager>,
}

impl SecurityHook {
    pub const NAME: &'static str = "SecurityHook";
    pub const ORDER: i32 = 3;

    pub fn new(access: Arc<dyn AccessManager>) -> Self {
        Self { access }
    }

    fn check<T: TrackerDto>(
        &self,
        reporter: &mut ValidationErrorReporter,
        ctx: &ValidationContext<'_>,
        dto: &T,
        persisted_org_unit: Option<&OrganisationUnit>,
    ) -> HookResult {
        let user: &User = ctx.user().ok_or(ValidationFault::UserMissing)?;
        let kind = T::KIND.as_str();
        let entity = dto.entity_ref();

        let org_unit_ref = if reporter.is_unresolved(Prerequisite::OrgUnit) {
            None
        } else {
            Some(dto.org_unit().ok_or_else(|| {
                ValidationFault::OrgUnitReferenceMissing {
                    kind,
                    uid: dto.uid().to_string(),
                }
            })?)
        };

        if ctx.strategy().is_update_or_delete()
            && !reporter.is_unresolved(Prerequisite::PersistedInstance)
        {
            let persisted =
                persisted_org_unit.ok_or_else(|| ValidationFault::PersistedInstanceMissing {
                    kind,
                    uid: dto.uid().to_string(),
                })?;
            self.access
                .check_org_unit_in_capture_scope(reporter, user, &entity, persisted)?;
        }

        let Some(org_unit_ref) = org_unit_ref else {
            return Ok(());
        };
        let incoming = ctx
            .preheat()
            .organisation_unit(org_unit_ref)
            .ok_or_else(|| ValidationFault::OrgUnitUnresolved {
                kind,
                uid: dto.uid().to_string(),
                org_unit: org_unit_ref.to_string(),
            })?;
        self.access
            .check_org_unit_in_capture_scope(reporter, user, &entity, incoming)
    }
}

impl ValidationHook for SecurityHook {
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
        let persisted = ctx
            .preheat()
            .tracked_entity(tei.uid())
            .map(|tei| &tei.organisation_unit);
        self.check(reporter, ctx, tei, persisted)
    }

    fn validate_enrollment(
        &self,
        reporter: &mut ValidationErrorReporter,
        ctx: &mut ValidationContext<'_>,
        enrollment: &Enrollment,
    ) -> HookResult {
        let persisted = ctx
            .preheat()
            .enrollment(enrollment.uid())
            .map(|pi| &pi.organisation_unit);
        self.check(reporter, ctx, enrollment, persisted)
    }

    fn validate_event(
        &self,
        reporter: &mut ValidationErrorReporter,
        ctx: &mut ValidationContext<'_>,
        event: &mut Event,
    ) -> HookResult {
        let persisted = ctx
            .preheat()
            .event(event.uid())
            .map(|psi| &psi.organisation_unit);
        self.check(reporter, ctx, &*event, persisted)
    }
}
