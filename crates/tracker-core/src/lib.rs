//! Tracker Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers of the tracker
//! import validation pipeline, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           tracker-cli (CLI)             │
//! │     (Loads bundles, renders reports)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     TrackerValidationService            │
//! │   HookRunner → hooks (ordered)          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  (PreheatContext, AccessManager, Clock) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    tracker-adapters (Infrastructure)    │
//! │ (InMemoryPreheat, CaptureScope, Clocks) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (Bundle, metadata, error-code catalog) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use tracker_core::prelude::*;
//!
//! # fn run(
//! #     access: std::sync::Arc<dyn AccessManager>,
//! #     clock: Box<dyn Clock>,
//! #     preheat: &mut dyn PreheatContext,
//! #     mut bundle: TrackerBundle,
//! # ) -> TrackerResult<()> {
//! let service = TrackerValidationService::builder()
//!     .access_manager(access)
//!     .clock(clock)
//!     .build()?;
//!
//! let report = service.validate(&mut bundle, preheat)?;
//! if report.has_errors() {
//!     // do not persist the bundle
//! }
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        HookRunner, TrackerValidationService, ValidationHook,
        ports::{AccessManager, Clock, PreheatContext},
    };
    pub use crate::domain::{
        EntityKind, Enrollment, Event, IdScheme, ImportStrategy, TrackedEntity, TrackerBundle,
        TrackerErrorCode, TrackerErrorReport, TrackerIdentifierParams, TrackerValidationReport,
        User, ValidationMode,
    };
    pub use crate::error::{TrackerError, TrackerResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
