//! Domain value objects: EntityKind, TrackerType, ImportStrategy,
//! ValidationMode, IdScheme.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! Each one has a stable string form (used in JSON payloads, config files
//! and CLI flags) and a `FromStr` parser that accepts the common aliases.

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── EntityKind ───────────────────────────────────────────────────────────────

/// The three kinds of tracker object a bundle carries.
///
/// Hooks declare the kinds they validate; the runner dispatches kinds in
/// [`EntityKind::DEPENDENCY_ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntityKind {
    TrackedEntity,
    Enrollment,
    Event,
}

impl EntityKind {
    /// Enrollments reference tracked entities, events reference
    /// enrollments and programs.
    pub const DEPENDENCY_ORDER: [Self; 3] = [Self::TrackedEntity, Self::Enrollment, Self::Event];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TrackedEntity => "tracked-entity",
            Self::Enrollment => "enrollment",
            Self::Event => "event",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── TrackerType ──────────────────────────────────────────────────────────────

/// The type of object an error report points at.
///
/// A superset of [`EntityKind`]: nested objects validated under a parent
/// (category options under an event) get their own type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackerType {
    TrackedEntity,
    Enrollment,
    Event,
    CategoryOption,
}

impl TrackerType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TrackedEntity => "TrackedEntity",
            Self::Enrollment => "Enrollment",
            Self::Event => "Event",
            Self::CategoryOption => "CategoryOption",
        }
    }
}

impl From<EntityKind> for TrackerType {
    fn from(kind: EntityKind) -> Self {
        match kind {
            EntityKind::TrackedEntity => Self::TrackedEntity,
            EntityKind::Enrollment => Self::Enrollment,
            EntityKind::Event => Self::Event,
        }
    }
}

impl fmt::Display for TrackerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── ImportStrategy ───────────────────────────────────────────────────────────

/// What the caller intends to do with the bundle once it validates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportStrategy {
    Create,
    #[default]
    CreateAndUpdate,
    Update,
    Delete,
}

impl ImportStrategy {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::CreateAndUpdate => "create-and-update",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    pub const fn is_create(self) -> bool {
        matches!(self, Self::Create)
    }

    pub const fn is_update(self) -> bool {
        matches!(self, Self::Update)
    }

    pub const fn is_delete(self) -> bool {
        matches!(self, Self::Delete)
    }

    pub const fn is_update_or_delete(self) -> bool {
        self.is_update() || self.is_delete()
    }
}

impl fmt::Display for ImportStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImportStrategy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "create" => Ok(Self::Create),
            "create-and-update" | "upsert" => Ok(Self::CreateAndUpdate),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            other => Err(DomainError::InvalidValue {
                field: "import strategy",
                value: other.to_string(),
            }),
        }
    }
}

// ── ValidationMode ───────────────────────────────────────────────────────────

/// Execution policy for one validation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationMode {
    /// Collect every report, run every hook.
    #[default]
    Full,
    /// Abort the whole run at the first report.
    FailFast,
}

impl ValidationMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::FailFast => "fail-fast",
        }
    }

    pub const fn is_fail_fast(self) -> bool {
        matches!(self, Self::FailFast)
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "full" | "collect-all" => Ok(Self::Full),
            "fail-fast" | "failfast" => Ok(Self::FailFast),
            other => Err(DomainError::InvalidValue {
                field: "validation mode",
                value: other.to_string(),
            }),
        }
    }
}

// ── IdScheme ─────────────────────────────────────────────────────────────────

/// Which property of a metadata object acts as its identifier in a payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdScheme {
    #[default]
    Uid,
    Code,
    Name,
}

impl IdScheme {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Uid => "uid",
            Self::Code => "code",
            Self::Name => "name",
        }
    }

    /// The identifier string `object` is known by under this scheme.
    ///
    /// Objects without a code fall back to their uid under [`IdScheme::Code`].
    pub fn identifier_of<T: IdentifiableObject + ?Sized>(self, object: &T) -> String {
        match self {
            Self::Uid => object.uid().to_string(),
            Self::Code => object.code().unwrap_or_else(|| object.uid()).to_string(),
            Self::Name => object.name().to_string(),
        }
    }
}

impl fmt::Display for IdScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdScheme {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "uid" | "id" => Ok(Self::Uid),
            "code" => Ok(Self::Code),
            "name" => Ok(Self::Name),
            other => Err(DomainError::InvalidValue {
                field: "identifier scheme",
                value: other.to_string(),
            }),
        }
    }
}

/// Anything addressable by uid, code or name.
pub trait IdentifiableObject {
    fn uid(&self) -> &str;
    fn code(&self) -> Option<&str>;
    fn name(&self) -> &str;
}

/// One identifier scheme per metadata kind referenced from a bundle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerIdentifierParams {
    pub org_unit: IdScheme,
    pub program: IdScheme,
    pub program_stage: IdScheme,
    pub category_option_combo: IdScheme,
}
