//! The `TrackerBundle` aggregate: one caller-submitted import batch.

use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::tracker::{Enrollment, Event, TrackedEntity},
    value_objects::{EntityKind, ImportStrategy, ValidationMode},
};

/// Authority granting capture access everywhere.
pub const AUTHORITY_ALL: &str = "ALL";

/// The acting user, with the org units they may capture data into.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub uid: String,
    pub username: String,
    #[serde(default)]
    pub authorities: Vec<String>,
    /// Roots of the capture scope; descendants are included.
    #[serde(default)]
    pub organisation_units: Vec<String>,
}

impl User {
    pub fn is_super(&self) -> bool {
        self.authorities.iter().any(|a| a == AUTHORITY_ALL)
    }
}

/// A batch of tracker objects validated and committed together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackerBundle {
    pub user: Option<User>,
    pub import_strategy: ImportStrategy,
    pub validation_mode: ValidationMode,
    pub tracked_entities: Vec<TrackedEntity>,
    pub enrollments: Vec<Enrollment>,
    pub events: Vec<Event>,
}

impl TrackerBundle {
    pub fn new(user: Option<User>) -> Self {
        Self {
            user,
            ..Self::default()
        }
    }

    pub fn with_import_strategy(mut self, strategy: ImportStrategy) -> Self {
        self.import_strategy = strategy;
        self
    }

    pub fn with_validation_mode(mut self, mode: ValidationMode) -> Self {
        self.validation_mode = mode;
        self
    }

    pub fn with_tracked_entity(mut self, tei: TrackedEntity) -> Self {
        self.tracked_entities.push(tei);
        self
    }

    pub fn with_enrollment(mut self, enrollment: Enrollment) -> Self {
        self.enrollments.push(enrollment);
        self
    }

    pub fn with_event(mut self, event: Event) -> Self {
        self.events.push(event);
        self
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::TrackedEntity => self.tracked_entities.len(),
            EntityKind::Enrollment => self.enrollments.len(),
            EntityKind::Event => self.events.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        EntityKind::DEPENDENCY_ORDER
            .iter()
            .all(|kind| self.count(*kind) == 0)
    }
}
