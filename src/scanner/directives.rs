use tracing::debug;

use super::types::{Directive, ScanResult};

pub const OPEN_MARKER: &[u8] = b"/*.py";
pub const CLOSE_MARKER: &[u8] = b"*/";
pub const TERMINATOR_MARKER: &[u8] = b"/*";

/// Leftmost occurrence of `needle` at or after `from`.
pub fn find_bytes(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    let tail = haystack.get(from..)?;
    tail.windows(needle.len())
        .position(|window| window == needle)
        .map(|pos| from + pos)
}

/// Single pass over the source bytes collecting directives and kept ranges.
///
/// The kept range before each directive runs up to and including its closing
/// `*/`; the next kept range starts at the terminator `/*`, so the bytes
/// between them (last run's expansion output) are dropped and regenerated.
/// A marker with no closing `*/`, or a closed body with no following `/*`,
/// ends the scan: everything from the cursor on is kept and no directive is
/// emitted for it.
pub fn scan(source: &[u8]) -> ScanResult {
    let mut directives = Vec::new();
    let mut kept = Vec::new();
    let mut cursor = 0usize;

    loop {
        let Some(open_start) = find_bytes(source, OPEN_MARKER, cursor) else {
            kept.push(cursor..source.len());
            break;
        };
        let body_start = open_start + OPEN_MARKER.len();

        let Some(body_end) = find_bytes(source, CLOSE_MARKER, body_start) else {
            debug!(open_start, "unterminated snippet body, keeping tail");
            kept.push(cursor..source.len());
            break;
        };

        let Some(terminator_start) = find_bytes(source, TERMINATOR_MARKER, body_end + 2) else {
            debug!(open_start, "no terminator comment, keeping tail");
            kept.push(cursor..source.len());
            break;
        };

        kept.push(cursor..body_end + 2);
        directives.push(Directive {
            open_start,
            body_start,
            body_end,
            terminator_start,
        });
        cursor = terminator_start;
    }

    debug!(
        directives = directives.len(),
        kept = kept.len(),
        "scan complete"
    );
    ScanResult { directives, kept }
}
