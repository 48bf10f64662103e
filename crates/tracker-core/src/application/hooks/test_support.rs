//! Fixtures shared by the hook unit tests.

use chrono::{DateTime, TimeZone, Utc};

use crate::application::{context::ValidationContext, ports::PreheatContext};
use crate::domain::{
    CategoryCombo, CategoryOption, CategoryOptionCombo, Enrollment, Event, IdScheme,
    IdentifiableObject, ImportStrategy, OrganisationUnit, Program, ProgramInstance, ProgramStage,
    ProgramStageInstance, ProgramType, TrackedEntity, TrackedEntityInstance, TrackedEntityType,
    TrackerIdentifierParams, User,
};

/// Linear-scan preheat; lookups honour `identifiers`.
#[derive(Debug, Default)]
pub(crate) struct FakePreheat {
    pub identifiers: TrackerIdentifierParams,
    pub org_units: Vec<OrganisationUnit>,
    pub programs: Vec<Program>,
    pub stages: Vec<ProgramStage>,
    pub tei_types: Vec<TrackedEntityType>,
    pub combos: Vec<CategoryOptionCombo>,
    pub teis: Vec<TrackedEntityInstance>,
    pub enrollments: Vec<ProgramInstance>,
    pub events: Vec<ProgramStageInstance>,
    pub puts: usize,
}

fn find<'a, T: IdentifiableObject>(items: &'a [T], scheme: IdScheme, id: &str) -> Option<&'a T> {
    items.iter().find(|item| scheme.identifier_of(*item) == id)
}

impl PreheatContext for FakePreheat {
    fn identifiers(&self) -> &TrackerIdentifierParams {
        &self.identifiers
    }

    fn organisation_unit(&self, id: &str) -> Option<&OrganisationUnit> {
        find(&self.org_units, self.identifiers.org_unit, id)
    }

    fn program(&self, id: &str) -> Option<&Program> {
        find(&self.programs, self.identifiers.program, id)
    }

    fn program_by_uid(&self, uid: &str) -> Option<&Program> {
        find(&self.programs, IdScheme::Uid, uid)
    }

    fn program_stage(&self, id: &str) -> Option<&ProgramStage> {
        find(&self.stages, self.identifiers.program_stage, id)
    }

    fn tracked_entity_type(&self, id: &str) -> Option<&TrackedEntityType> {
        find(&self.tei_types, IdScheme::Uid, id)
    }

    fn category_option_combo(&self, id: &str) -> Option<&CategoryOptionCombo> {
        find(&self.combos, self.identifiers.category_option_combo, id)
    }

    fn default_category_option_combo(&self) -> Option<&CategoryOptionCombo> {
        self.combos.iter().find(|c| c.is_default)
    }

    fn tracked_entity(&self, uid: &str) -> Option<&TrackedEntityInstance> {
        self.teis.iter().find(|t| t.uid == uid)
    }

    fn enrollment(&self, uid: &str) -> Option<&ProgramInstance> {
        self.enrollments.iter().find(|e| e.uid == uid)
    }

    fn event(&self, uid: &str) -> Option<&ProgramStageInstance> {
        self.events.iter().find(|e| e.uid == uid)
    }

    fn put_program(&mut self, _scheme: IdScheme, program: Program) {
        self.puts += 1;
        self.programs.retain(|p| p.uid != program.uid);
        self.programs.push(program);
    }
}

pub(crate) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

pub(crate) fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub(crate) fn ctx<'a>(
    preheat: &'a mut FakePreheat,
    user: Option<&'a User>,
    strategy: ImportStrategy,
) -> ValidationContext<'a> {
    ValidationContext::new(user, strategy, now(), preheat)
}

pub(crate) fn user() -> User {
    User {
        uid: "user1".into(),
        username: "capture".into(),
        authorities: vec![],
        organisation_units: vec!["ouRoot".into()],
    }
}

pub(crate) fn org_unit(uid: &str) -> OrganisationUnit {
    OrganisationUnit {
        uid: uid.into(),
        code: None,
        name: format!("Org {uid}"),
        path: format!("/ouRoot/{uid}"),
    }
}

pub(crate) fn stage(uid: &str, program: &str, sort_order: u32) -> ProgramStage {
    ProgramStage {
        uid: uid.into(),
        code: None,
        name: format!("Stage {uid}"),
        program: program.into(),
        sort_order,
    }
}

pub(crate) fn program(uid: &str, program_type: ProgramType, org_units: &[&str]) -> Program {
    Program {
        uid: uid.into(),
        code: Some(format!("{uid}-code")),
        name: format!("Program {uid}"),
        program_type,
        organisation_units: org_units.iter().map(|s| s.to_string()).collect(),
        program_stages: vec![],
        category_combo: None,
        display_incident_date: false,
        select_enrollment_dates_in_future: false,
        select_incident_dates_in_future: false,
    }
}

pub(crate) fn category_combo(uid: &str, is_default: bool) -> CategoryCombo {
    CategoryCombo {
        uid: uid.into(),
        code: None,
        name: format!("Combo {uid}"),
        is_default,
    }
}

pub(crate) fn option(
    uid: &str,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> CategoryOption {
    CategoryOption {
        uid: uid.into(),
        code: None,
        name: format!("Option {uid}"),
        start_date: start,
        end_date: end,
    }
}

pub(crate) fn coc(uid: &str, is_default: bool, options: Vec<CategoryOption>) -> CategoryOptionCombo {
    CategoryOptionCombo {
        uid: uid.into(),
        code: None,
        name: format!("COC {uid}"),
        is_default,
        category_options: options,
    }
}

pub(crate) fn tracked_entity(uid: &str, org_unit: Option<&str>) -> TrackedEntity {
    TrackedEntity {
        tracked_entity: uid.into(),
        tracked_entity_type: Some("tet1".into()),
        org_unit: org_unit.map(Into::into),
        attributes: vec![],
    }
}

pub(crate) fn enrollment(uid: &str, program: Option<&str>, org_unit: Option<&str>) -> Enrollment {
    Enrollment {
        enrollment: uid.into(),
        tracked_entity: Some("te1".into()),
        program: program.map(Into::into),
        org_unit: org_unit.map(Into::into),
        enrolled_at: Some(date(2024, 1, 1)),
        occurred_at: Some(date(2024, 1, 1)),
    }
}

pub(crate) fn event(uid: &str, program: Option<&str>, stage: Option<&str>) -> Event {
    Event {
        event: uid.into(),
        enrollment: None,
        program: program.map(Into::into),
        program_stage: stage.map(Into::into),
        org_unit: Some("ou1".into()),
        attribute_option_combo: None,
        occurred_at: Some(date(2024, 3, 1)),
        scheduled_at: None,
    }
}
