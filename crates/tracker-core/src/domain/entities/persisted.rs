//! Previously persisted state, as the preheat exposes it.
//!
//! Only the fields the validation rules cross-check are modelled.

use serde::{Deserialize, Serialize};

use crate::domain::entities::metadata::OrganisationUnit;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedEntityInstance {
    pub uid: String,
    pub organisation_unit: OrganisationUnit,
}

/// A persisted enrollment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramInstance {
    pub uid: String,
    /// Uid of the program the enrollment was created in.
    pub program: String,
    pub organisation_unit: OrganisationUnit,
}

/// A persisted event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramStageInstance {
    pub uid: String,
    pub program_stage: String,
    /// Uid of the program owning `program_stage`.
    pub program: String,
    pub organisation_unit: OrganisationUnit,
}
