//! JSON loading for import bundles and preheat snapshots.
//!
//! # Bundle format
//!
//! ```json
//! {
//!   "user": { "uid": "u1", "username": "clerk", "organisationUnits": ["ou1"] },
//!   "importStrategy": "create-and-update",
//!   "validationMode": "full",
//!   "trackedEntities": [],
//!   "enrollments": [],
//!   "events": [{ "event": "ev1", "program": "p1", "programStage": "ps1", "orgUnit": "ou1" }]
//! }
//! ```
//!
//! Every top-level key is optional. A bundle without a `user` still loads;
//! validation then stops with a precondition fault.
//!
//! The snapshot format is described in [`crate::preheat::PreheatSnapshot`].

use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use tracker_core::domain::{EntityKind, TrackerBundle};

use crate::{
    error::{AdapterError, AdapterResult},
    preheat::PreheatSnapshot,
};

/// Read an import bundle from a JSON file.
///
/// # Errors
///
/// Returns [`AdapterError::NotFound`] if the file is missing, and
/// [`AdapterError::Parse`] if it is not a valid bundle.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_bundle(path: &Path) -> AdapterResult<TrackerBundle> {
    let bundle: TrackerBundle = read_json(path, "bundle")?;
    debug!(
        tracked_entities = bundle.count(EntityKind::TrackedEntity),
        enrollments = bundle.count(EntityKind::Enrollment),
        events = bundle.count(EntityKind::Event),
        "Loaded bundle"
    );
    Ok(bundle)
}

/// Read a preheat snapshot from a JSON file.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_preheat(path: &Path) -> AdapterResult<PreheatSnapshot> {
    let snapshot: PreheatSnapshot = read_json(path, "preheat snapshot")?;
    debug!(
        programs = snapshot.programs.len(),
        organisation_units = snapshot.organisation_units.len(),
        "Loaded preheat snapshot"
    );
    Ok(snapshot)
}

pub fn parse_bundle(json: &str) -> AdapterResult<TrackerBundle> {
    serde_json::from_str(json).map_err(|source| AdapterError::ParseStr {
        what: "bundle",
        source,
    })
}

pub fn parse_snapshot(json: &str) -> AdapterResult<PreheatSnapshot> {
    serde_json::from_str(json).map_err(|source| AdapterError::ParseStr {
        what: "preheat snapshot",
        source,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &'static str) -> AdapterResult<T> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            AdapterError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            AdapterError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    serde_json::from_str(&content).map_err(|source| AdapterError::Parse {
        what,
        path: path.to_path_buf(),
        source,
    })
}
