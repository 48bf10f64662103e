pub mod bundle;
pub mod metadata;
pub mod persisted;
pub mod tracker;

pub use bundle::{AUTHORITY_ALL, TrackerBundle, User};
pub use metadata::{
    CategoryCombo, CategoryOption, CategoryOptionCombo, OrganisationUnit, Program, ProgramStage,
    ProgramType, TrackedEntityType,
};
pub use persisted::{ProgramInstance, ProgramStageInstance, TrackedEntityInstance};
pub use tracker::{Attribute, EntityRef, Enrollment, Event, TrackedEntity, TrackerDto};
