//! In-memory preheat cache keyed by the configured identifier schemes.

use std::collections::HashMap;

use tracker_core::{
    application::ports::PreheatContext,
    domain::{
        CategoryOptionCombo, IdScheme, IdentifiableObject, OrganisationUnit, Program,
        ProgramInstance, ProgramStage, ProgramStageInstance, TrackedEntityInstance,
        TrackedEntityType, TrackerIdentifierParams,
    },
};

/// Objects stored by uid, reachable through the identifier of one scheme.
#[derive(Debug, Clone)]
struct Index<T> {
    by_uid: HashMap<String, T>,
    keys: HashMap<String, String>,
}

impl<T> Default for Index<T> {
    fn default() -> Self {
        Self {
            by_uid: HashMap::new(),
            keys: HashMap::new(),
        }
    }
}

impl<T: IdentifiableObject> Index<T> {
    fn insert(&mut self, scheme: IdScheme, item: T) {
        let uid = item.uid().to_string();
        self.keys.insert(scheme.identifier_of(&item), uid.clone());
        self.by_uid.insert(uid, item);
    }

    fn get(&self, id: &str) -> Option<&T> {
        self.keys.get(id).and_then(|uid| self.by_uid.get(uid))
    }

    fn by_uid(&self, uid: &str) -> Option<&T> {
        self.by_uid.get(uid)
    }

    fn len(&self) -> usize {
        self.by_uid.len()
    }
}

/// Preheat cache held entirely in memory.
///
/// Metadata is keyed under the schemes given at construction, so build the
/// cache after the identifier params are final.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPreheat {
    identifiers: TrackerIdentifierParams,
    org_units: Index<OrganisationUnit>,
    programs: Index<Program>,
    program_stages: Index<ProgramStage>,
    tracked_entity_types: Index<TrackedEntityType>,
    category_option_combos: Index<CategoryOptionCombo>,
    default_category_option_combo: Option<String>,
    tracked_entities: HashMap<String, TrackedEntityInstance>,
    enrollments: HashMap<String, ProgramInstance>,
    events: HashMap<String, ProgramStageInstance>,
}

impl InMemoryPreheat {
    /// Create an empty cache for payloads using `identifiers`.
    pub fn new(identifiers: TrackerIdentifierParams) -> Self {
        Self {
            identifiers,
            ..Self::default()
        }
    }

    pub fn insert_organisation_unit(&mut self, org_unit: OrganisationUnit) {
        self.org_units.insert(self.identifiers.org_unit, org_unit);
    }

    /// Add a program along with the stages it embeds.
    pub fn insert_program(&mut self, program: Program) {
        for stage in &program.program_stages {
            self.insert_program_stage(stage.clone());
        }
        self.programs.insert(self.identifiers.program, program);
    }

    pub fn insert_program_stage(&mut self, stage: ProgramStage) {
        self.program_stages
            .insert(self.identifiers.program_stage, stage);
    }

    /// Tracked entity types are always referenced by uid.
    pub fn insert_tracked_entity_type(&mut self, tracked_entity_type: TrackedEntityType) {
        self.tracked_entity_types
            .insert(IdScheme::Uid, tracked_entity_type);
    }

    /// Add a combo. The first default combo inserted becomes the system default.
    pub fn insert_category_option_combo(&mut self, combo: CategoryOptionCombo) {
        if combo.is_default && self.default_category_option_combo.is_none() {
            self.default_category_option_combo = Some(combo.uid.clone());
        }
        self.category_option_combos
            .insert(self.identifiers.category_option_combo, combo);
    }

    pub fn insert_tracked_entity(&mut self, tei: TrackedEntityInstance) {
        self.tracked_entities.insert(tei.uid.clone(), tei);
    }

    pub fn insert_enrollment(&mut self, enrollment: ProgramInstance) {
        self.enrollments.insert(enrollment.uid.clone(), enrollment);
    }

    pub fn insert_event(&mut self, event: ProgramStageInstance) {
        self.events.insert(event.uid.clone(), event);
    }

    pub fn program_count(&self) -> usize {
        self.programs.len()
    }

    /// Number of cached metadata objects, persisted instances excluded.
    pub fn metadata_len(&self) -> usize {
        self.org_units.len()
            + self.programs.len()
            + self.program_stages.len()
            + self.tracked_entity_types.len()
            + self.category_option_combos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metadata_len() == 0
            && self.tracked_entities.is_empty()
            && self.enrollments.is_empty()
            && self.events.is_empty()
    }
}

impl PreheatContext for InMemoryPreheat {
    fn identifiers(&self) -> &TrackerIdentifierParams {
        &self.identifiers
    }

    fn organisation_unit(&self, id: &str) -> Option<&OrganisationUnit> {
        self.org_units.get(id)
    }

    fn program(&self, id: &str) -> Option<&Program> {
        self.programs.get(id)
    }

    fn program_by_uid(&self, uid: &str) -> Option<&Program> {
        self.programs.by_uid(uid)
    }

    fn program_stage(&self, id: &str) -> Option<&ProgramStage> {
        self.program_stages.get(id)
    }

    fn tracked_entity_type(&self, id: &str) -> Option<&TrackedEntityType> {
        self.tracked_entity_types.get(id)
    }

    fn category_option_combo(&self, id: &str) -> Option<&CategoryOptionCombo> {
        self.category_option_combos.get(id)
    }

    fn default_category_option_combo(&self) -> Option<&CategoryOptionCombo> {
        self.default_category_option_combo
            .as_deref()
            .and_then(|uid| self.category_option_combos.by_uid(uid))
    }

    fn tracked_entity(&self, uid: &str) -> Option<&TrackedEntityInstance> {
        self.tracked_entities.get(uid)
    }

    fn enrollment(&self, uid: &str) -> Option<&ProgramInstance> {
        self.enrollments.get(uid)
    }

    fn event(&self, uid: &str) -> Option<&ProgramStageInstance> {
        self.events.get(uid)
    }

    fn put_program(&mut self, scheme: IdScheme, program: Program) {
        self.programs.insert(scheme, program);
    }
}
