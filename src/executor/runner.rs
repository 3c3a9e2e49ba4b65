use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ExpandError;
use crate::interpreter::Interpreter;
use crate::scanner;
use crate::splicer::{self, Expansion};
use crate::transform::transform_snippet;

/// What one directive's interpreter run came back with.
#[derive(Debug, Clone)]
pub struct DirectiveOutcome {
    pub open_start: usize,
    pub is_multiline: bool,
    pub exit_code: u32,
    pub output_len: usize,
}

/// Per-run record of the rewritten file and every directive outcome.
#[derive(Debug)]
pub struct RunSummary {
    pub path: PathBuf,
    pub outcomes: Vec<DirectiveOutcome>,
}

/// Expand every directive in `path` and rewrite the file in place.
///
/// Directives run strictly in source order, one interpreter process each.
/// The interpreter's exit code and captured text are printed for every run;
/// a non-zero exit is not fatal, its output is spliced like any other. The
/// temp program file is removed once the last directive has run, also when
/// a run in the middle failed to launch.
pub fn expand_file(path: &Path, interpreter: &Interpreter) -> Result<RunSummary, ExpandError> {
    let source = fs::read(path).map_err(|source| ExpandError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;

    let scan = scanner::scan(&source);
    let mut expansions = Vec::with_capacity(scan.directives.len());
    let mut outcomes = Vec::with_capacity(scan.directives.len());
    let mut failure = None;

    for directive in &scan.directives {
        let program = transform_snippet(directive.body(&source));
        debug!(
            open_start = directive.open_start,
            multiline = program.is_multiline,
            program = %String::from_utf8_lossy(&program.text),
            "running snippet"
        );

        let mut capture = match interpreter.eval(&program.text) {
            Ok(capture) => capture,
            Err(e) => {
                failure = Some(e);
                break;
            }
        };

        println!("Python exit code: {}", capture.exit_code);
        println!(
            "Python output: {}",
            String::from_utf8_lossy(&capture.output)
        );

        splicer::trim_trailing_crlf(&mut capture.output);
        outcomes.push(DirectiveOutcome {
            open_start: directive.open_start,
            is_multiline: program.is_multiline,
            exit_code: capture.exit_code,
            output_len: capture.output.len(),
        });
        expansions.push(Expansion {
            output: capture.output,
            is_multiline: program.is_multiline,
        });
    }

    if !scan.directives.is_empty() {
        interpreter.cleanup();
    }
    if let Some(e) = failure {
        return Err(e);
    }

    let result = splicer::assemble(&source, &scan.kept, &expansions);
    fs::write(path, result).map_err(|source| ExpandError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(RunSummary {
        path: path.to_path_buf(),
        outcomes,
    })
}
