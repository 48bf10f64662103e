//! Implementation of the `tracker codes` command.

use serde_json::json;
use tracker_core::{domain::TrackerErrorCode, error::TrackerError};

use crate::{
    cli::{CodesArgs, CodesFormat},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: CodesArgs, output: OutputManager) -> CliResult<()> {
    let codes = match args.code.as_deref() {
        Some(code) => vec![code.parse::<TrackerErrorCode>().map_err(TrackerError::from)?],
        None => TrackerErrorCode::ALL.to_vec(),
    };

    match args.format {
        CodesFormat::Table => {
            if codes.len() > 1 {
                output.header("Validation error codes:")?;
            }
            for code in codes {
                output.document(&format!(
                    "  {}  {}",
                    output.code(code.as_str()),
                    code.message_template()
                ))?;
            }
        }

        // JSON goes straight to stdout so it stays parseable under --quiet.
        CodesFormat::Json => {
            let entries: Vec<_> = codes
                .iter()
                .map(|code| json!({ "code": code, "template": code.message_template() }))
                .collect();
            output.document(&serde_json::Value::Array(entries).to_string())?;
        }
    }

    Ok(())
}
