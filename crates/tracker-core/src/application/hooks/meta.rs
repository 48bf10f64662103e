//! Reference resolution against the preheat.
//!
//! Every reference that does not resolve yields exactly one report. Events
//! that carry a stage but no resolvable program get the stage's owning
//! program backfilled, in the event and in the preheat. Unresolved org
//! units and programs are marked for later hooks.

use tracing::debug;

use crate::application::{
    context::ValidationContext,
    hooks::{ALL_KINDS, ValidationHook, reference},
    reporter::{HookResult, Prerequisite, ValidationErrorReporter},
};
use crate::domain::{
    EntityKind, Enrollment, Event, Program, ProgramStage, TrackedEntity, TrackerDto,
    TrackerErrorCode, ValidationFault,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct MetaHook;

impl MetaHook {
    pub const NAME: &'static str = "MetaHook";
    pub const ORDER: i32 = 2;

    /// Program and stage as referenced by `event`, owned so the context can
    /// be borrowed mutably for inference afterwards.
    fn resolve_event_refs(
        ctx: &ValidationContext<'_>,
        event: &Event,
    ) -> (Option<Program>, Option<ProgramStage>) {
        let preheat = ctx.preheat();
        let program = event
            .program
            .as_deref()
            .and_then(|id| preheat.program(id))
            .cloned();
        let stage = event
            .program_stage
            .as_deref()
            .and_then(|id| preheat.program_stage(id))
            .cloned();
        (program, stage)
    }

    fn infer_program(
        ctx: &mut ValidationContext<'_>,
        event: &mut Event,
        stage: &ProgramStage,
    ) -> Result<Program, ValidationFault> {
        let owner = ctx
            .preheat()
            .program_by_uid(&stage.program)
            .cloned()
            .ok_or_else(|| ValidationFault::OwningProgramMissing {
                program_stage: stage.uid.clone(),
                program: stage.program.clone(),
            })?;

        debug!(event = %event.event, program = %owner.uid, "Inferred program from program stage");
        ctx.backfill_program(event, owner.clone());
        Ok(owner)
    }
}

impl ValidationHook for MetaHook {
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
        let preheat = ctx.preheat();

        if tei.org_unit().and_then(|id| preheat.organisation_unit(id)).is_none() {
            reporter.mark_unresolved(Prerequisite::OrgUnit);
            reporter.add_error(
                tei.entity_ref(),
                ValidationErrorReporter::new_report(TrackerErrorCode::E1011)
                    .arg(reference(tei.org_unit())),
            )?;
        }

        let tei_type = tei.tracked_entity_type.as_deref();
        if tei_type.and_then(|id| preheat.tracked_entity_type(id)).is_none() {
            reporter.add_error(
                tei.entity_ref(),
                ValidationErrorReporter::new_report(TrackerErrorCode::E1005)
                    .arg(reference(tei_type)),
            )?;
        }
        Ok(())
    }

    fn validate_enrollment(
        &self,
        reporter: &mut ValidationErrorReporter,
        ctx: &mut ValidationContext<'_>,
        enrollment: &Enrollment,
    ) -> HookResult {
        let preheat = ctx.preheat();
        let entity = enrollment.entity_ref();

        let org_unit = enrollment
            .org_unit()
            .and_then(|id| preheat.organisation_unit(id));
        if org_unit.is_none() {
            reporter.mark_unresolved(Prerequisite::OrgUnit);
            reporter.add_error(
                entity.clone(),
                ValidationErrorReporter::new_report(TrackerErrorCode::E1070)
                    .arg(reference(enrollment.org_unit())),
            )?;
        }

        let program = enrollment
            .program
            .as_deref()
            .and_then(|id| preheat.program(id));
        if program.is_none() {
            reporter.mark_unresolved(Prerequisite::Program);
            reporter.add_error(
                entity.clone(),
                ValidationErrorReporter::new_report(TrackerErrorCode::E1069)
                    .arg(reference(enrollment.program.as_deref())),
            )?;
        }

        if let (Some(program), Some(org_unit)) = (program, org_unit) {
            if !program.has_organisation_unit(org_unit) {
                reporter.add_error(
                    entity.clone(),
                    ValidationErrorReporter::new_report(TrackerErrorCode::E1041)
                        .arg(&org_unit.uid)
                        .arg(&program.uid),
                )?;
            }
        }

        // Existence already reported a missing instance.
        if ctx.strategy().is_update() && !reporter.is_unresolved(Prerequisite::PersistedInstance) {
            let persisted = preheat.enrollment(enrollment.uid()).ok_or_else(|| {
                ValidationFault::PersistedInstanceMissing {
                    kind: EntityKind::Enrollment.as_str(),
                    uid: enrollment.uid().to_string(),
                }
            })?;

            if let Some(program) = program {
                if program.uid != persisted.program {
                    reporter.add_error(
                        entity,
                        ValidationErrorReporter::new_report(TrackerErrorCode::E1094)
                            .arg(&persisted.uid)
                            .arg(&persisted.program),
                    )?;
                }
            }
        }
        Ok(())
    }

    fn validate_event(
        &self,
        reporter: &mut ValidationErrorReporter,
        ctx: &mut ValidationContext<'_>,
        event: &mut Event,
    ) -> HookResult {
        let entity = event.entity_ref();

        let org_unit_missing = event
            .org_unit()
            .and_then(|id| ctx.preheat().organisation_unit(id))
            .is_none();
        if org_unit_missing {
            reporter.mark_unresolved(Prerequisite::OrgUnit);
            reporter.add_error(
                entity.clone(),
                ValidationErrorReporter::new_report(TrackerErrorCode::E1011)
                    .arg(reference(event.org_unit())),
            )?;
        }

        let (program, stage) = Self::resolve_event_refs(ctx, event);

        if program.is_none() && stage.is_none() {
            reporter.mark_unresolved(Prerequisite::Program);
            reporter.add_error(
                entity.clone(),
                ValidationErrorReporter::new_report(TrackerErrorCode::E1088).arg(&event.event),
            )?;
        }

        let program = match (program, &stage) {
            (None, Some(stage)) => Some(Self::infer_program(ctx, event, stage)?),
            (program, _) => program,
        };

        if let Some(program) = &program {
            if stage.is_none() && program.is_registration() {
                reporter.add_error(
                    entity.clone(),
                    ValidationErrorReporter::new_report(TrackerErrorCode::E1086)
                        .arg(&event.event)
                        .arg(&program.uid),
                )?;
            }
        }

        let stage = match (&program, stage) {
            (Some(program), None) if program.is_without_registration() => {
                program.program_stage_by_stage(1).cloned()
            }
            (_, stage) => stage,
        };

        match (&program, &stage) {
            (_, None) => {
                reporter.add_error(
                    entity.clone(),
                    ValidationErrorReporter::new_report(TrackerErrorCode::E1035).arg(&event.event),
                )?;
            }
            (Some(program), Some(stage)) if stage.program != program.uid => {
                reporter.add_error(
                    entity.clone(),
                    ValidationErrorReporter::new_report(TrackerErrorCode::E1089)
                        .arg(&event.event)
                        .arg(&stage.uid)
                        .arg(&program.uid),
                )?;
            }
            _ => {}
        }

        if ctx.strategy().is_update() && !reporter.is_unresolved(Prerequisite::PersistedInstance) {
            let persisted = ctx.preheat().event(&event.event).ok_or_else(|| {
                ValidationFault::PersistedInstanceMissing {
                    kind: EntityKind::Event.as_str(),
                    uid: event.event.clone(),
                }
            })?;

            if let Some(program) = &program {
                if program.uid != persisted.program {
                    reporter.add_error(
                        entity,
                        ValidationErrorReporter::new_report(TrackerErrorCode::E1110)
                            .arg(&persisted.uid)
                            .arg(&persisted.program),
                    )?;
                }
            }
        }
        Ok(())
    }
}
