use crate::scanner::find_bytes;

/// A complete interpreter program generated from one snippet body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub text: Vec<u8>,
    pub is_multiline: bool,
}

const NO_RETURN_PROGRAM: &[u8] =
    b"print('Error: No return statement found in a multiline code block!')";

/// Turn a snippet body into a standalone program.
///
/// A body containing the substring `return` is treated as a multi-statement
/// block and wrapped in a function whose return value is printed; anything
/// else is printed as a bare expression.
pub fn transform_snippet(body: &[u8]) -> Program {
    if find_bytes(body, b"return", 0).is_some() {
        multi_statement(body)
    } else {
        single_expression(body)
    }
}

fn single_expression(body: &[u8]) -> Program {
    if count_nonempty_lines(body) >= 2 {
        // Several lines but no return; the canned error is the whole program.
        return Program {
            text: NO_RETURN_PROGRAM.to_vec(),
            is_multiline: false,
        };
    }

    let mut text = Vec::with_capacity(body.len() + 8);
    text.extend_from_slice(b"print(");
    text.extend_from_slice(body);
    text.extend_from_slice(b")\n");
    Program {
        text,
        is_multiline: false,
    }
}

fn multi_statement(body: &[u8]) -> Program {
    let mut text = Vec::with_capacity(body.len() + 32);
    text.extend_from_slice(b"def user_fn():\n");
    for line in body.split(|&b| b == b'\n') {
        let line = strip_trailing_cr(line);
        if line.is_empty() {
            continue;
        }
        // Bare statements get one indent level; already-indented lines keep
        // whatever the user wrote.
        if line[0] != b'\t' && line[0] != b' ' {
            text.push(b'\t');
        }
        text.extend_from_slice(line);
        text.push(b'\n');
    }
    text.extend_from_slice(b"print(user_fn())\n");
    Program {
        text,
        is_multiline: true,
    }
}

fn count_nonempty_lines(body: &[u8]) -> usize {
    body.split(|&b| b == b'\n')
        .filter(|line| !strip_trailing_cr(line).is_empty())
        .count()
}

fn strip_trailing_cr(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}
