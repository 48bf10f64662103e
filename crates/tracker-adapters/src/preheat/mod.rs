//! Preheat cache adapters.

mod memory;
mod snapshot;

pub use memory::InMemoryPreheat;
pub use snapshot::PreheatSnapshot;
