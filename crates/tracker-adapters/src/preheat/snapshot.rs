//! Serializable preheat snapshot.
//!
//! A snapshot is the JSON form of everything a validation run may look up:
//!
//! ```json
//! {
//!   "identifiers": { "program": "code" },
//!   "organisationUnits": [{ "uid": "ou1", "name": "Clinic", "path": "/ou1" }],
//!   "programs": [{ "uid": "p1", "code": "ANC", "name": "Antenatal care", ... }],
//!   "categoryOptionCombos": [{ "uid": "coc1", "name": "default", "isDefault": true }],
//!   "enrollments": [{ "uid": "en1", "program": "p1", "organisationUnit": { ... } }]
//! }
//! ```
//!
//! Every section is optional. Program stages embedded in a program are
//! indexed along with it.

use serde::{Deserialize, Serialize};
use tracker_core::domain::{
    CategoryOptionCombo, OrganisationUnit, Program, ProgramInstance, ProgramStage,
    ProgramStageInstance, TrackedEntityInstance, TrackedEntityType, TrackerIdentifierParams,
};

use super::InMemoryPreheat;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreheatSnapshot {
    pub identifiers: TrackerIdentifierParams,
    pub organisation_units: Vec<OrganisationUnit>,
    pub programs: Vec<Program>,
    pub program_stages: Vec<ProgramStage>,
    pub tracked_entity_types: Vec<TrackedEntityType>,
    pub category_option_combos: Vec<CategoryOptionCombo>,
    pub tracked_entities: Vec<TrackedEntityInstance>,
    pub enrollments: Vec<ProgramInstance>,
    pub events: Vec<ProgramStageInstance>,
}

impl PreheatSnapshot {
    /// Replace the identifier schemes the cache will be keyed under.
    pub fn with_identifiers(mut self, identifiers: TrackerIdentifierParams) -> Self {
        self.identifiers = identifiers;
        self
    }

    pub fn into_preheat(self) -> InMemoryPreheat {
        let mut preheat = InMemoryPreheat::new(self.identifiers);
        self.organisation_units
            .into_iter()
            .for_each(|ou| preheat.insert_organisation_unit(ou));
        self.program_stages
            .into_iter()
            .for_each(|stage| preheat.insert_program_stage(stage));
        self.programs
            .into_iter()
            .for_each(|program| preheat.insert_program(program));
        self.tracked_entity_types
            .into_iter()
            .for_each(|tet| preheat.insert_tracked_entity_type(tet));
        self.category_option_combos
            .into_iter()
            .for_each(|coc| preheat.insert_category_option_combo(coc));
        self.tracked_entities
            .into_iter()
            .for_each(|tei| preheat.insert_tracked_entity(tei));
        self.enrollments
            .into_iter()
            .for_each(|pi| preheat.insert_enrollment(pi));
        self.events
            .into_iter()
            .for_each(|psi| preheat.insert_event(psi));
        preheat
    }
}

impl From<PreheatSnapshot> for InMemoryPreheat {
    fn from(snapshot: PreheatSnapshot) -> Self {
        snapshot.into_preheat()
    }
}
