//! Tracker objects carried by an import bundle.
//!
//! References to metadata (`org_unit`, `program`, ...) are identifier
//! strings under the bundle's [`TrackerIdentifierParams`] and stay
//! unresolved until a hook looks them up in the preheat.
//!
//! [`TrackerIdentifierParams`]: crate::domain::TrackerIdentifierParams

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{EntityKind, TrackerType};

/// Common surface of everything the runner dispatches to hooks.
pub trait TrackerDto {
    const KIND: EntityKind;

    fn uid(&self) -> &str;

    fn org_unit(&self) -> Option<&str>;

    fn entity_ref(&self) -> EntityRef {
        EntityRef::new(Self::KIND.into(), self.uid())
    }
}

/// Points an error report at the object it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRef {
    pub tracker_type: TrackerType,
    pub uid: String,
}

impl EntityRef {
    pub fn new(tracker_type: TrackerType, uid: impl Into<String>) -> Self {
        Self {
            tracker_type,
            uid: uid.into(),
        }
    }

    pub fn category_option(uid: impl Into<String>) -> Self {
        Self::new(TrackerType::CategoryOption, uid)
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.uid, self.tracker_type)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    pub attribute: String,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedEntity {
    pub tracked_entity: String,
    #[serde(default)]
    pub tracked_entity_type: Option<String>,
    #[serde(default)]
    pub org_unit: Option<String>,
    #[serde(default)]
    pub attributes: Vec<Attribute>,
}

impl TrackerDto for TrackedEntity {
    const KIND: EntityKind = EntityKind::TrackedEntity;

    fn uid(&self) -> &str {
        &self.tracked_entity
    }

    fn org_unit(&self) -> Option<&str> {
        self.org_unit.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub enrollment: String,
    #[serde(default)]
    pub tracked_entity: Option<String>,
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub org_unit: Option<String>,
    #[serde(default)]
    pub enrolled_at: Option<DateTime<Utc>>,
    /// Incident date.
    #[serde(default)]
    pub occurred_at: Option<DateTime<Utc>>,
}

impl TrackerDto for Enrollment {
    const KIND: EntityKind = EntityKind::Enrollment;

    fn uid(&self) -> &str {
        &self.enrollment
    }

    fn org_unit(&self) -> Option<&str> {
        self.org_unit.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub event: String,
    #[serde(default)]
    pub enrollment: Option<String>,
    /// May be backfilled from the program stage during meta-resolution.
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub program_stage: Option<String>,
    #[serde(default)]
    pub org_unit: Option<String>,
    /// Absent means the default category option combo.
    #[serde(default)]
    pub attribute_option_combo: Option<String>,
    #[serde(default)]
    pub occurred_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl Event {
    /// Occurred date, else scheduled date, else `now`.
    pub fn effective_date(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        self.occurred_at.or(self.scheduled_at).unwrap_or(now)
    }
}

impl TrackerDto for Event {
    const KIND: EntityKind = EntityKind::Event;

    fn uid(&self) -> &str {
        &self.event
    }

    fn org_unit(&self) -> Option<&str> {
        self.org_unit.as_deref()
    }
}
