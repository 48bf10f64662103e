//! Validation findings: the error-code catalog and the report model.

pub mod error_code;
pub mod error_report;
pub mod validation_report;

pub use error_code::{TrackerErrorCode, render_template};
pub use error_report::{ErrorReportBuilder, TrackerErrorReport};
pub use validation_report::TrackerValidationReport;
