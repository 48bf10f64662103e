//! A single validation finding and its builder.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::{
    entities::EntityRef,
    report::error_code::{TrackerErrorCode, render_template},
    value_objects::TrackerType,
};

/// Immutable record of one validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerErrorReport {
    pub error_code: TrackerErrorCode,
    pub message: String,
    /// Name of the hook that produced the report.
    pub validator: String,
    /// Index of the offending entity within its bundle collection.
    pub line_number: usize,
    pub tracker_type: TrackerType,
    pub uid: String,
    /// Parent object when `uid` is nested under another entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_id: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
}

impl TrackerErrorReport {
    pub fn builder(code: TrackerErrorCode) -> ErrorReportBuilder {
        ErrorReportBuilder::new(code)
    }

    /// Whether this report concerns `uid`, directly or as its parent.
    pub fn concerns(&self, uid: &str) -> bool {
        self.uid == uid || self.main_uid() == Some(uid)
    }

    fn main_uid(&self) -> Option<&str> {
        self.main_id
            .as_deref()
            .map(|main| main.split_once(' ').map_or(main, |(uid, _)| uid))
    }
}

impl fmt::Display for TrackerErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} ({} #{}: {})",
            self.error_code, self.message, self.tracker_type, self.line_number, self.uid
        )
    }
}

/// Seeds a report with an error code; arguments are chained before submission.
///
/// Consumed by [`ErrorReportBuilder::build`], so no formatted state is
/// ever shared between two reports.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a report builder does nothing until passed to ValidationErrorReporter::add_error"]
pub struct ErrorReportBuilder {
    code: TrackerErrorCode,
    args: Vec<String>,
    main_id: Option<EntityRef>,
}

impl ErrorReportBuilder {
    pub fn new(code: TrackerErrorCode) -> Self {
        Self {
            code,
            args: Vec::new(),
            main_id: None,
        }
    }

    pub fn arg(mut self, arg: impl fmt::Display) -> Self {
        self.args.push(arg.to_string());
        self
    }

    /// Attribute the report to a parent entity as well.
    pub fn main_id(mut self, parent: EntityRef) -> Self {
        self.main_id = Some(parent);
        self
    }

    pub fn code(&self) -> TrackerErrorCode {
        self.code
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn build(self, validator: &str, line_number: usize, entity: EntityRef) -> TrackerErrorReport {
        TrackerErrorReport {
            error_code: self.code,
            message: render_template(self.code.message_template(), &self.args),
            validator: validator.to_string(),
            line_number,
            tracker_type: entity.tracker_type,
            uid: entity.uid,
            main_id: self.main_id.map(|parent| parent.to_string()),
            args: self.args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(uid: &str) -> EntityRef {
        EntityRef::new(TrackerType::Event, uid)
    }

    #[test]
    fn build_renders_all_arguments_in_order() {
        let report = TrackerErrorReport::builder(TrackerErrorCode::E1056)
            .arg("2020-01-01")
            .arg("2020-02-01")
            .arg("Donor A")
            .build("hook", 3, event("ev1"));

        assert_eq!(
            report.message,
            "Event date: `2020-01-01`, is before start date: `2020-02-01`, for AttributeOption: `Donor A`."
        );
        assert_eq!(report.args, vec!["2020-01-01", "2020-02-01", "Donor A"]);
        assert_eq!(report.line_number, 3);
        assert_eq!(report.validator, "hook");
    }

    #[test]
    fn builders_for_same_code_never_share_state() {
        let first = ErrorReportBuilder::new(TrackerErrorCode::E1011)
            .arg("ou-a")
            .build("hook", 0, event("ev1"));
        let second = ErrorReportBuilder::new(TrackerErrorCode::E1011)
            .arg("ou-b")
            .build("hook", 1, event("ev2"));

        assert!(first.message.contains("ou-a"));
        assert!(!first.message.contains("ou-b"));
        assert!(second.message.contains("ou-b"));
        assert_eq!(second.args, vec!["ou-b"]);
    }

    #[test]
    fn nested_report_concerns_parent() {
        let report = ErrorReportBuilder::new(TrackerErrorCode::E1057)
            .main_id(event("ev1"))
            .build("hook", 0, EntityRef::category_option("co1"));

        assert_eq!(report.main_id.as_deref(), Some("ev1 (Event)"));
        assert!(report.concerns("co1"));
        assert!(report.concerns("ev1"));
        assert!(!report.concerns("ev2"));
    }
}
