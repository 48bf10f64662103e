//! Application ports (traits) for external collaborators.
//!
//! In hexagonal architecture, ports define what the validation pipeline
//! needs from the outside world. `tracker-adapters` implements them.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by the pipeline, implemented by infrastructure
//!   - `PreheatContext`: pre-loaded metadata and persisted state
//!   - `AccessManager`: capture-scope membership checks
//!   - `Clock`: the run's notion of "now"
//!
//! - **Driving (Input) Ports**: the `TrackerValidationService` itself, called by the CLI

pub mod output;

pub use output::{AccessManager, Clock, PreheatContext};

#[cfg(test)]
pub use output::{MockAccessManager, MockClock};
