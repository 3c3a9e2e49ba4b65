use std::env;
use std::fs;
use std::io;

use serde::Serialize;

use crate::executor::RunSummary;

pub const REPORT_ENV_VAR: &str = "PYEXPAND_REPORT";

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub file: String,
    pub directives: Vec<DirectiveReport>,
}

#[derive(Debug, Serialize)]
pub struct DirectiveReport {
    pub offset: usize,
    pub multiline: bool,
    pub exit_code: u32,
    pub output_bytes: usize,
}

impl RunReport {
    pub fn from_summary(summary: &RunSummary) -> Self {
        Self {
            file: summary.path.display().to_string(),
            directives: summary
                .outcomes
                .iter()
                .map(|outcome| DirectiveReport {
                    offset: outcome.open_start,
                    multiline: outcome.is_multiline,
                    exit_code: outcome.exit_code,
                    output_bytes: outcome.output_len,
                })
                .collect(),
        }
    }
}

/// Write the JSON run report when `PYEXPAND_REPORT` names a path.
/// Best-effort side channel, separate from the file rewrite.
pub fn maybe_write(summary: &RunSummary) -> io::Result<()> {
    let Ok(report_path) = env::var(REPORT_ENV_VAR) else {
        return Ok(());
    };
    let report = RunReport::from_summary(summary);
    let json = serde_json::to_string_pretty(&report)?;
    fs::write(report_path, json)
}
