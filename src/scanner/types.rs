use std::ops::Range;

/// One `/*.py ... */ ... /*` occurrence, as byte offsets into the source.
///
/// `open_start..body_start` is the opening marker, `body_start..body_end`
/// the snippet body, and `terminator_start` the `/*` that ends the region
/// overwritten with interpreter output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Directive {
    pub open_start: usize,
    pub body_start: usize,
    pub body_end: usize,
    pub terminator_start: usize,
}

impl Directive {
    pub fn body<'a>(&self, source: &'a [u8]) -> &'a [u8] {
        &source[self.body_start..self.body_end]
    }
}

/// Output of scanning: directives in source order plus the byte ranges that
/// are copied through verbatim. `kept.len() == directives.len() + 1`.
#[derive(Debug)]
pub struct ScanResult {
    pub directives: Vec<Directive>,
    pub kept: Vec<Range<usize>>,
}
