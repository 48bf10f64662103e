//! Subcommand handlers. Each translates arguments, calls into the core and
//! adapters, and renders the result.

pub mod codes;
pub mod completions;
pub mod config;
pub mod validate;
