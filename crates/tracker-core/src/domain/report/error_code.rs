//! The tracker error-code catalog.
//!
//! Codes and their triggering conditions are a public contract: import
//! clients match on them. Never renumber or repurpose an existing code;
//! add a new variant instead.
//!
//! Templates use positional `{0}`, `{1}`, ... placeholders filled from the
//! report's arguments in order.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TrackerErrorCode {
    E1000,
    E1002,
    E1005,
    E1011,
    E1020,
    E1021,
    E1023,
    E1025,
    E1030,
    E1032,
    E1035,
    E1041,
    E1055,
    E1056,
    E1057,
    E1063,
    E1069,
    E1070,
    E1080,
    E1081,
    E1086,
    E1088,
    E1089,
    E1094,
    E1110,
    E1115,
}

impl TrackerErrorCode {
    pub const ALL: [Self; 26] = [
        Self::E1000,
        Self::E1002,
        Self::E1005,
        Self::E1011,
        Self::E1020,
        Self::E1021,
        Self::E1023,
        Self::E1025,
        Self::E1030,
        Self::E1032,
        Self::E1035,
        Self::E1041,
        Self::E1055,
        Self::E1056,
        Self::E1057,
        Self::E1063,
        Self::E1069,
        Self::E1070,
        Self::E1080,
        Self::E1081,
        Self::E1086,
        Self::E1088,
        Self::E1089,
        Self::E1094,
        Self::E1110,
        Self::E1115,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::E1000 => "E1000",
            Self::E1002 => "E1002",
            Self::E1005 => "E1005",
            Self::E1011 => "E1011",
            Self::E1020 => "E1020",
            Self::E1021 => "E1021",
            Self::E1023 => "E1023",
            Self::E1025 => "E1025",
            Self::E1030 => "E1030",
            Self::E1032 => "E1032",
            Self::E1035 => "E1035",
            Self::E1041 => "E1041",
            Self::E1055 => "E1055",
            Self::E1056 => "E1056",
            Self::E1057 => "E1057",
            Self::E1063 => "E1063",
            Self::E1069 => "E1069",
            Self::E1070 => "E1070",
            Self::E1080 => "E1080",
            Self::E1081 => "E1081",
            Self::E1086 => "E1086",
            Self::E1088 => "E1088",
            Self::E1089 => "E1089",
            Self::E1094 => "E1094",
            Self::E1110 => "E1110",
            Self::E1115 => "E1115",
        }
    }

    pub const fn message_template(&self) -> &'static str {
        match self {
            Self::E1000 => "User: `{0}`, has no write access to OrganisationUnit: `{1}`.",
            Self::E1002 => "TrackedEntity: `{0}`, already exists.",
            Self::E1005 => "Could not find TrackedEntityType: `{0}`.",
            Self::E1011 => "Could not find OrganisationUnit: `{0}`.",
            Self::E1020 => "Enrollment date: `{0}`, can't be a future date.",
            Self::E1021 => "Incident date: `{0}`, can't be a future date.",
            Self::E1023 => {
                "Program displays an incident date but property occurredAt is missing on Enrollment: `{0}`."
            }
            Self::E1025 => "Property enrolledAt is missing on Enrollment: `{0}`.",
            Self::E1030 => "Event: `{0}`, already exists.",
            Self::E1032 => "Event: `{0}`, does not exist.",
            Self::E1035 => "Event: `{0}`, ProgramStage does not point to a valid programStage.",
            Self::E1041 => {
                "Enrollment OrganisationUnit: `{0}`, and Program: `{1}`, don't match."
            }
            Self::E1055 => {
                "Default AttributeOptionCombo is not allowed since program has non-default CategoryCombo."
            }
            Self::E1056 => {
                "Event date: `{0}`, is before start date: `{1}`, for AttributeOption: `{2}`."
            }
            Self::E1057 => "Event date: `{0}`, is after end date: `{1}`, for AttributeOption: `{2}`.",
            Self::E1063 => "TrackedEntity: `{0}`, does not exist.",
            Self::E1069 => "Could not find Program: `{0}`, linked to Enrollment.",
            Self::E1070 => "Could not find OrganisationUnit: `{0}`, linked to Enrollment.",
            Self::E1080 => "Enrollment: `{0}`, already exists.",
            Self::E1081 => "Enrollment: `{0}`, does not exist.",
            Self::E1086 => {
                "Event: `{0}`, has a program: `{1}`, that is a registration but its ProgramStage is not valid or missing."
            }
            Self::E1088 => "Event: `{0}`, has no program or programStage.",
            Self::E1089 => {
                "Event: `{0}`, references a ProgramStage: `{1}`, that does not belong to Program: `{2}`."
            }
            Self::E1094 => "Not allowed to update Enrollment: `{0}`, existing Program: `{1}`.",
            Self::E1110 => "Not allowed to update Event: `{0}`, existing Program: `{1}`.",
            Self::E1115 => "Could not find CategoryOptionCombo: `{0}`.",
        }
    }
}

impl fmt::Display for TrackerErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackerErrorCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == wanted)
            .ok_or_else(|| DomainError::UnknownErrorCode(s.to_string()))
    }
}

/// Substitute `{i}` placeholders with `args[i]`.
///
/// Placeholders without a matching argument are left as-is.
pub fn render_template(template: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let index = &after[..close];
                match index.parse::<usize>().ok().and_then(|i| args.get(i)) {
                    Some(arg) => out.push_str(arg),
                    None => {
                        out.push('{');
                        out.push_str(index);
                        out.push('}');
                    }
                }
                rest = &after[close + 1..];
            }
            None => {
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}
