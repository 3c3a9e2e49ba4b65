pub mod error;
pub mod executor;
pub mod interpreter;
pub mod report;
pub mod scanner;
pub mod splicer;
pub mod transform;

pub use error::ExpandError;
pub use executor::{expand_file, DirectiveOutcome, RunSummary};
pub use interpreter::{Capture, Interpreter};

/// Set up logging; ambient telemetry is off unless `RUST_LOG` enables it.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}
