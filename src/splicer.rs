use std::ops::Range;

/// One normalized expansion, ready for splicing.
#[derive(Debug, Clone)]
pub struct Expansion {
    pub output: Vec<u8>,
    pub is_multiline: bool,
}

/// Drop exactly one trailing CR+LF. A lone `\n` stays.
pub fn trim_trailing_crlf(output: &mut Vec<u8>) {
    if output.ends_with(b"\r\n") {
        output.truncate(output.len() - 2);
    }
}

/// Leading run of spaces/tabs of the expansion output. Re-emitted before the
/// terminator comment of a multiline directive so the line that follows the
/// expansion keeps its indentation.
pub fn indent_prefix(output: &[u8]) -> &[u8] {
    let len = output
        .iter()
        .take_while(|&&b| b == b' ' || b == b'\t')
        .count();
    &output[..len]
}

/// Interleave kept source ranges with expansion outputs.
///
/// `kept` has one more element than `expansions`; kept bytes are copied
/// verbatim. Around each expansion the separator is a newline for multiline
/// directives and a single space otherwise.
pub fn assemble(source: &[u8], kept: &[Range<usize>], expansions: &[Expansion]) -> Vec<u8> {
    debug_assert_eq!(kept.len(), expansions.len() + 1);

    let mut out = Vec::with_capacity(source.len());
    for (i, range) in kept.iter().enumerate() {
        if i > 0 {
            let expansion = &expansions[i - 1];
            let sep: &[u8] = if expansion.is_multiline { b"\n" } else { b" " };
            let indent: &[u8] = if expansion.is_multiline {
                indent_prefix(&expansion.output)
            } else {
                &[]
            };

            out.extend_from_slice(sep);
            out.extend_from_slice(&expansion.output);
            out.extend_from_slice(sep);
            out.extend_from_slice(indent);
        }
        out.extend_from_slice(&source[range.clone()]);
    }
    out
}
