//! Attribute option combo resolution and category option validity windows.

use crate::application::{
    context::ValidationContext,
    hooks::ValidationHook,
    reporter::{HookResult, Prerequisite, ValidationErrorReporter},
};
use crate::domain::{EntityKind, EntityRef, Event, TrackerDto, TrackerErrorCode, ValidationFault};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Checks an event's attribute option combo against its program and the
/// date range of every category option in the combo.
///
/// Out-of-range options are reported against the option, with the event as
/// the parent, so one event can carry several date reports.
#[derive(Debug, Default, Clone, Copy)]
pub struct EventCategoryOptHook;

impl EventCategoryOptHook {
    pub const NAME: &'static str = "EventCategoryOptHook";
    pub const ORDER: i32 = 303;
}

impl ValidationHook for EventCategoryOptHook {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn order(&self) -> i32 {
        Self::ORDER
    }

    fn kinds(&self) -> &'static [EntityKind] {
        &[EntityKind::Event]
    }

    fn validate_event(
        &self,
        reporter: &mut ValidationErrorReporter,
        ctx: &mut ValidationContext<'_>,
        event: &mut Event,
    ) -> HookResult {
        // E1088 already covers the event.
        if reporter.is_unresolved(Prerequisite::Program) {
            return Ok(());
        }
        let preheat = ctx.preheat();
        let entity = event.entity_ref();

        let program = event
            .program
            .as_deref()
            .and_then(|id| preheat.program(id))
            .ok_or_else(|| ValidationFault::ProgramUnresolved {
                kind: EntityKind::Event.as_str(),
                uid: event.event.clone(),
                hook: Self::NAME,
            })?;
        if ctx.user().is_none() {
            return Err(ValidationFault::UserMissing.into());
        }

        let combo = match event.attribute_option_combo.as_deref() {
            Some(id) => match preheat.category_option_combo(id) {
                Some(combo) => combo,
                None => {
                    return reporter.add_error(
                        entity,
                        ValidationErrorReporter::new_report(TrackerErrorCode::E1115).arg(id),
                    );
                }
            },
            None => preheat
                .default_category_option_combo()
                .ok_or(ValidationFault::DefaultCategoryOptionComboMissing)?,
        };

        if combo.is_default && program.has_non_default_category_combo() {
            return reporter.add_error(
                entity,
                ValidationErrorReporter::new_report(TrackerErrorCode::E1055),
            );
        }

        let event_date = event.effective_date(ctx.now());
        let formatted = event_date.format(DATE_FORMAT).to_string();

        for option in &combo.category_options {
            if let Some(start) = option.start_date.filter(|start| event_date < *start) {
                reporter.add_error(
                    EntityRef::category_option(&option.uid),
                    ValidationErrorReporter::new_report(TrackerErrorCode::E1056)
                        .arg(&formatted)
                        .arg(start.format(DATE_FORMAT))
                        .arg(&option.name)
                        .main_id(entity.clone()),
                )?;
            }

            if let Some(end) = option.end_date.filter(|end| event_date > *end) {
                reporter.add_error(
                    EntityRef::category_option(&option.uid),
                    ValidationErrorReporter::new_report(TrackerErrorCode::E1057)
                        .arg(&formatted)
                        .arg(end.format(DATE_FORMAT))
                        .arg(&option.name)
                        .main_id(entity.clone()),
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::hooks::test_support::*;
    use crate::application::reporter::ValidationHalt;
    use crate::domain::{ImportStrategy, ProgramType, TrackerErrorReport, ValidationMode};

    fn preheat() -> FakePreheat {
        let mut preheat = FakePreheat::default();
        preheat
            .programs
            .push(program("p1", ProgramType::WithRegistration, &["ou1"]));
        preheat.combos.push(coc("cocDefault", true, vec![]));
        preheat
    }

    fn run(
        preheat: &mut FakePreheat,
        event: &mut Event,
    ) -> Result<Vec<TrackerErrorReport>, ValidationHalt> {
        let user = user();
        let mut reporter = ValidationErrorReporter::new(ValidationMode::Full);
        reporter.enter(EventCategoryOptHook::NAME, EntityKind::Event);
        let mut ctx = ctx(preheat, Some(&user), ImportStrategy::Create);
        EventCategoryOptHook.validate_event(&mut reporter, &mut ctx, event)?;
        Ok(reporter.into_reports())
    }

    #[test]
    fn option_not_yet_started_reports_e1056_with_arguments() {
        let mut preheat = preheat();
        preheat.combos.push(coc(
            "coc1",
            false,
            vec![option("co1", Some(date(2024, 4, 1)), None)],
        ));
        let mut ev = event("ev1", Some("p1"), Some("ps1"));
        ev.attribute_option_combo = Some("coc1".into());

        let reports = run(&mut preheat, &mut ev).unwrap();

        assert_eq!(reports.len(), 1);
        let report = &reports[0];
        assert_eq!(report.error_code, TrackerErrorCode::E1056);
        assert_eq!(report.args, vec!["2024-03-01", "2024-04-01", "Option co1"]);
        assert_eq!(report.uid, "co1");
        assert!(report.concerns("ev1"));
    }

    #[test]
    fn each_option_is_checked_independently() {
        let mut preheat = preheat();
        preheat.combos.push(coc(
            "coc1",
            false,
            vec![
                option("co1", Some(date(2024, 4, 1)), None),
                option("co2", None, Some(date(2024, 2, 1))),
                option("co3", Some(date(2024, 1, 1)), Some(date(2024, 12, 31))),
            ],
        ));
        let mut ev = event("ev1", Some("p1"), Some("ps1"));
        ev.attribute_option_combo = Some("coc1".into());

        let codes: Vec<_> = run(&mut preheat, &mut ev)
            .unwrap()
            .into_iter()
            .map(|r| r.error_code)
            .collect();

        assert_eq!(codes, vec![TrackerErrorCode::E1056, TrackerErrorCode::E1057]);
    }

    #[test]
    fn effective_date_falls_back_to_now() {
        let mut preheat = preheat();
        preheat.combos.push(coc(
            "coc1",
            false,
            vec![option("co1", None, Some(date(2024, 5, 1)))],
        ));
        let mut ev = event("ev1", Some("p1"), Some("ps1"));
        ev.attribute_option_combo = Some("coc1".into());
        ev.occurred_at = None;

        let reports = run(&mut preheat, &mut ev).unwrap();

        assert_eq!(reports[0].error_code, TrackerErrorCode::E1057);
        assert_eq!(reports[0].args[0], now().format(DATE_FORMAT).to_string());
    }

    #[test]
    fn default_combo_with_non_default_program_combo_is_reported() {
        let mut preheat = preheat();
        preheat.programs[0].category_combo = Some(category_combo("cc1", false));
        let mut ev = event("ev1", Some("p1"), Some("ps1"));

        let reports = run(&mut preheat, &mut ev).unwrap();

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].error_code, TrackerErrorCode::E1055);
        assert_eq!(reports[0].uid, "ev1");
    }

    #[test]
    fn unknown_combo_is_reported() {
        let mut preheat = preheat();
        let mut ev = event("ev1", Some("p1"), Some("ps1"));
        ev.attribute_option_combo = Some("nope".into());

        let reports = run(&mut preheat, &mut ev).unwrap();

        assert_eq!(reports[0].error_code, TrackerErrorCode::E1115);
    }

    #[test]
    fn unresolved_program_is_a_fault() {
        let mut preheat = preheat();
        let mut ev = event("ev1", Some("p9"), Some("ps1"));

        let halt = run(&mut preheat, &mut ev).unwrap_err();

        assert!(matches!(
            halt,
            ValidationHalt::Fault(ValidationFault::ProgramUnresolved { hook, .. })
                if hook == EventCategoryOptHook::NAME
        ));
    }

    #[test]
    fn program_marked_unresolved_is_skipped() {
        let mut preheat = preheat();
        let user = user();
        let mut reporter = ValidationErrorReporter::new(ValidationMode::Full);
        reporter.enter(EventCategoryOptHook::NAME, EntityKind::Event);
        reporter.mark_unresolved(Prerequisite::Program);
        let mut ctx = ctx(&mut preheat, Some(&user), ImportStrategy::Create);

        EventCategoryOptHook
            .validate_event(&mut reporter, &mut ctx, &mut event("ev1", None, None))
            .unwrap();

        assert!(!reporter.has_errors());
    }

    #[test]
    fn missing_default_combo_is_a_fault() {
        let mut preheat = preheat();
        preheat.combos.clear();
        let mut ev = event("ev1", Some("p1"), Some("ps1"));

        let halt = run(&mut preheat, &mut ev).unwrap_err();

        assert_eq!(
            halt,
            ValidationHalt::Fault(ValidationFault::DefaultCategoryOptionComboMissing)
        );
    }
}
