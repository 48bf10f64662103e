//! Infrastructure adapters for tracker import validation.
//!
//! This crate implements the ports defined in `tracker_core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod access;
pub mod clock;
pub mod error;
pub mod loader;
pub mod preheat;

// Re-export commonly used adapters
pub use access::CaptureScopeAccessManager;
pub use clock::{FixedClock, SystemClock};
pub use error::{AdapterError, AdapterResult};
pub use loader::{load_bundle, load_preheat, parse_bundle, parse_snapshot};
pub use preheat::{InMemoryPreheat, PreheatSnapshot};
