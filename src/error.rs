use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures; each maps to a single stdout diagnostic and exit code 1.
/// A non-zero interpreter exit is not an error.
#[derive(Debug, Error)]
pub enum ExpandError {
    #[error("Failed to read file '{}'!", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create a temporary python file for evaluating python expressions!")]
    TempWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to call {command}. Do you have python installed?")]
    InterpreterLaunch {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to open the target file for writing the result!")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
