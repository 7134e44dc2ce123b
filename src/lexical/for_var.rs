//! Validates `FOR` loop variable references: `%%x` in a batch file body vs
//! `%x` typed at an interactive prompt.

/// `token` is the raw reference text including its percent sign(s), e.g.
/// `"%%i"` or `"%i"`. `in_batch_context` is true for anything evaluated as
/// part of a `.bat`/`.cmd` file body (always true for this crate's callers).
pub fn validate(token: &str, in_batch_context: bool) -> bool {
    let expected_prefix = if in_batch_context { "%%" } else { "%" };
    let Some(rest) = token.strip_prefix(expected_prefix) else {
        return false;
    };
    // A batch-form match must not actually have a third `%`.
    if in_batch_context && rest.starts_with('%') {
        return false;
    }
    rest.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) && rest.len() == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_percent_valid_in_batch() {
        assert!(validate("%%i", true));
    }

    #[test]
    fn single_percent_invalid_in_batch() {
        assert!(!validate("%i", true));
    }

    #[test]
    fn single_percent_valid_interactively() {
        assert!(validate("%i", false));
    }

    #[test]
    fn double_percent_invalid_interactively() {
        assert!(!validate("%%i", false));
    }

    #[test]
    fn multi_character_name_invalid() {
        assert!(!validate("%%ix", true));
    }

    #[test]
    fn digit_variable_invalid() {
        assert!(!validate("%%1", true));
    }
}
