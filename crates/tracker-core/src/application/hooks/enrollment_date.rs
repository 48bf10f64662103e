use crate::application::{
    context::ValidationContext,
    hooks::ValidationHook,
    reporter::{HookResult, ValidationErrorReporter},
};
use crate::domain::{EntityKind, Enrollment, TrackerDto, TrackerErrorCode};

/// Enrollment and incident date presence and future-date rules.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnrollmentDateHook;

impl EnrollmentDateHook {
    pub const NAME: &'static str = "EnrollmentDateHook";
    pub const ORDER: i32 = 103;
}

impl ValidationHook for EnrollmentDateHook {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn order(&self) -> i32 {
        Self::ORDER
    }

    fn kinds(&self) -> &'static [EntityKind] {
        &[EntityKind::Enrollment]
    }

    fn validate_enrollment(
        &self,
        reporter: &mut ValidationErrorReporter,
        ctx: &mut ValidationContext<'_>,
        enrollment: &Enrollment,
    ) -> HookResult {
        // Unresolved programs were reported as E1069 during meta-resolution.
        let Some(program) = enrollment
            .program
            .as_deref()
            .and_then(|id| ctx.preheat().program(id))
        else {
            return Ok(());
        };
        let now = ctx.now();
        let entity = enrollment.entity_ref();

        match enrollment.enrolled_at {
            None => reporter.add_error(
                entity.clone(),
                ValidationErrorReporter::new_report(TrackerErrorCode::E1025).arg(enrollment.uid()),
            )?,
            Some(enrolled_at) if enrolled_at > now && !program.select_enrollment_dates_in_future => {
                reporter.add_error(
                    entity.clone(),
                    ValidationErrorReporter::new_report(TrackerErrorCode::E1020)
                        .arg(enrolled_at.to_rfc3339()),
                )?
            }
            Some(_) => {}
        }

        match enrollment.occurred_at {
            None if program.display_incident_date => reporter.add_error(
                entity,
                ValidationErrorReporter::new_report(TrackerErrorCode::E1023).arg(enrollment.uid()),
            )?,
            Some(occurred_at) if occurred_at > now && !program.select_incident_dates_in_future => {
                reporter.add_error(
                    entity,
                    ValidationErrorReporter::new_report(TrackerErrorCode::E1021)
                        .arg(occurred_at.to_rfc3339()),
                )?
            }
            _ => {}
        }
        Ok(())
    }
}
