mod runner;

pub use runner::{expand_file, DirectiveOutcome, RunSummary};
