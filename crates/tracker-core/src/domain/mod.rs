// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for tracker import validation.
//!
//! Pure data and rules with no I/O. Preheat lookups, access checks and the
//! clock are reached through ports defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No tracing**: Observability belongs to the application and CLI layers
//! - **Serializable**: Bundles, metadata and reports round-trip through serde
//!
pub mod entities;
pub mod error;
pub mod report;
pub mod value_objects;

pub use entities::{
    AUTHORITY_ALL, Attribute, CategoryCombo, CategoryOption, CategoryOptionCombo, EntityRef,
    Enrollment, Event, OrganisationUnit, Program, ProgramInstance, ProgramStage,
    ProgramStageInstance, ProgramType, TrackedEntity, TrackedEntityInstance, TrackedEntityType,
    TrackerBundle, TrackerDto, User,
};

pub use error::{DomainError, ErrorCategory, ValidationFault};

pub use report::{ErrorReportBuilder, TrackerErrorCode, TrackerErrorReport, TrackerValidationReport};

pub use value_objects::{
    EntityKind, IdScheme, IdentifiableObject, ImportStrategy, TrackerIdentifierParams,
    TrackerType, ValidationMode,
};
