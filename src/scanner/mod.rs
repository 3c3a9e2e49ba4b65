mod directives;
mod types;

pub use directives::{find_bytes, scan, CLOSE_MARKER, OPEN_MARKER, TERMINATOR_MARKER};
pub use types::{Directive, ScanResult};
