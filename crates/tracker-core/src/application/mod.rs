//! Application layer for the tracker validation pipeline.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (`TrackerValidationService`)
//! - **Ports**: Interface definitions (traits) for external collaborators
//! - **Hooks**: The validation rule units and the runner that sequences them
//! - **Errors**: Application-specific error types
//!
//! Rules read the domain model; the domain layer holds no orchestration.

pub mod context;
pub mod error;
pub mod hooks;
pub mod ports;
pub mod reporter;
pub mod runner;
pub mod services;

pub use context::ValidationContext;
pub use error::ApplicationError;
pub use hooks::{
    EnrollmentDateHook, EventCategoryOptHook, ExistenceHook, MetaHook, SecurityHook,
    ValidationHook,
};
pub use reporter::{HookResult, Prerequisite, ValidationErrorReporter, ValidationHalt};
pub use runner::{BundleEntities, HookRunner};
pub use services::{TrackerValidationService, TrackerValidationServiceBuilder};

// Re-export port traits (for adapter implementation)
pub use ports::{AccessManager, Clock, PreheatContext};
