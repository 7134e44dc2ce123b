//! Whole-file parenthesis balance (component C3, consumed by the whole-file
//! engine for E001). Parens inside double-quoted strings or immediately
//! after a caret escape do not count.

use crate::classify::Line;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParenReport {
    /// Net depth at end of file. Zero if balanced.
    pub final_depth: i64,
    /// The first line where the running depth went negative, if any.
    pub first_negative_line: Option<usize>,
}

pub fn balance(lines: &[Line]) -> ParenReport {
    let mut depth: i64 = 0;
    let mut first_negative_line = None;

    for line in lines {
        if !line.is_code() {
            continue;
        }
        let mut in_quotes = false;
        let mut escaped = false;
        for ch in line.text.chars() {
            if escaped {
                escaped = false;
                continue;
            }
            match ch {
                '^' if !in_quotes => escaped = true,
                '"' => in_quotes = !in_quotes,
                '(' if !in_quotes => depth += 1,
                ')' if !in_quotes => {
                    depth -= 1;
                    if depth < 0 && first_negative_line.is_none() {
                        first_negative_line = Some(line.index);
                    }
                }
                _ => {}
            }
        }
    }

    ParenReport {
        final_depth: depth,
        first_negative_line,
    }
}
