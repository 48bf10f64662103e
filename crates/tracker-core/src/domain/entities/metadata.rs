//! Metadata the preheat step loads before validation runs.
//!
//! These are read-only views: the validation core never creates or edits
//! metadata, it only resolves references against it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::IdentifiableObject;

macro_rules! identifiable {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl IdentifiableObject for $ty {
                fn uid(&self) -> &str {
                    &self.uid
                }
                fn code(&self) -> Option<&str> {
                    self.code.as_deref()
                }
                fn name(&self) -> &str {
                    &self.name
                }
            }
        )+
    };
}

identifiable!(
    OrganisationUnit,
    TrackedEntityType,
    Program,
    ProgramStage,
    CategoryCombo,
    CategoryOption,
    CategoryOptionCombo,
);

/// A node in the organisation-unit hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganisationUnit {
    pub uid: String,
    #[serde(default)]
    pub code: Option<String>,
    pub name: String,
    /// Materialised ancestry, `/root/.../self`, uids separated by `/`.
    #[serde(default)]
    pub path: String,
}

impl OrganisationUnit {
    /// Uids from the root down to and including this unit.
    ///
    /// An empty path is treated as a root unit.
    pub fn ancestry(&self) -> impl Iterator<Item = &str> {
        let own = if self.path.is_empty() {
            Some(self.uid.as_str())
        } else {
            None
        };
        self.path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .chain(own)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedEntityType {
    pub uid: String,
    #[serde(default)]
    pub code: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgramType {
    #[default]
    WithRegistration,
    WithoutRegistration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCombo {
    pub uid: String,
    #[serde(default)]
    pub code: Option<String>,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramStage {
    pub uid: String,
    #[serde(default)]
    pub code: Option<String>,
    pub name: String,
    /// Uid of the owning program.
    pub program: String,
    #[serde(default)]
    pub sort_order: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub uid: String,
    #[serde(default)]
    pub code: Option<String>,
    pub name: String,
    #[serde(default)]
    pub program_type: ProgramType,
    /// Uids of the organisation units the program is registered in.
    #[serde(default)]
    pub organisation_units: Vec<String>,
    #[serde(default)]
    pub program_stages: Vec<ProgramStage>,
    #[serde(default)]
    pub category_combo: Option<CategoryCombo>,
    #[serde(default)]
    pub display_incident_date: bool,
    #[serde(default)]
    pub select_enrollment_dates_in_future: bool,
    #[serde(default)]
    pub select_incident_dates_in_future: bool,
}

impl Program {
    pub fn is_registration(&self) -> bool {
        self.program_type == ProgramType::WithRegistration
    }

    pub fn is_without_registration(&self) -> bool {
        self.program_type == ProgramType::WithoutRegistration
    }

    pub fn has_organisation_unit(&self, org_unit: &OrganisationUnit) -> bool {
        self.organisation_units.iter().any(|uid| *uid == org_unit.uid)
    }

    /// The `stage`-th program stage (1-based) by sort order.
    pub fn program_stage_by_stage(&self, stage: usize) -> Option<&ProgramStage> {
        let mut stages: Vec<&ProgramStage> = self.program_stages.iter().collect();
        stages.sort_by_key(|s| s.sort_order);
        stage.checked_sub(1).and_then(|index| stages.get(index).copied())
    }

    /// A program without a category combo behaves as if it had the default.
    pub fn has_non_default_category_combo(&self) -> bool {
        self.category_combo.as_ref().is_some_and(|cc| !cc.is_default)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOption {
    pub uid: String,
    #[serde(default)]
    pub code: Option<String>,
    pub name: String,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryOptionCombo {
    pub uid: String,
    #[serde(default)]
    pub code: Option<String>,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub category_options: Vec<CategoryOption>,
}
