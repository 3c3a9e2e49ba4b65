use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use tracing::warn;

use pyexpand::{expand_file, init_tracing, report, Interpreter};

// Usage:
// pyexpand my_file.cpp
fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() != 1 {
        println!("Please provide exactly one argument (the file name)!");
        return ExitCode::from(1);
    }

    let path = PathBuf::from(&args[0]);
    let interpreter = Interpreter::from_env();

    match expand_file(&path, &interpreter) {
        Ok(summary) => {
            if let Err(e) = report::maybe_write(&summary) {
                warn!(error = %e, "could not write run report");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{e}");
            ExitCode::from(1)
        }
    }
}
