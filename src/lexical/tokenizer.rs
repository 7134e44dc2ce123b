//! Quote-aware, caret-escape-aware tokenizer. Splits a single code line into
//! whitespace-delimited tokens while treating `^` as an escape for the next
//! character and double quotes as grouping (not splitting) delimiters.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub column: usize,
    pub quoted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizeResult {
    pub quote_count: usize,
}

pub fn tokenize(line: &str) -> (Vec<Token>, TokenizeResult) {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut current_start = 0usize;
    let mut in_quotes = false;
    let mut any_quote_in_current = false;
    let mut quote_count = 0usize;
    let mut escaped = false;
    let mut started = false;

    let chars: Vec<(usize, char)> = line.char_indices().collect();

    for &(col, ch) in &chars {
        if escaped {
            if !started {
                current_start = col;
                started = true;
            }
            current.push(ch);
            escaped = false;
            continue;
        }

        match ch {
            '^' if !in_quotes => {
                escaped = true;
                if !started {
                    current_start = col;
                    started = true;
                }
            }
            '"' => {
                quote_count += 1;
                any_quote_in_current = true;
                in_quotes = !in_quotes;
                if !started {
                    current_start = col;
                    started = true;
                }
                current.push(ch);
            }
            c if c.is_whitespace() && !in_quotes => {
                if started {
                    tokens.push(Token {
                        text: std::mem::take(&mut current),
                        column: current_start,
                        quoted: any_quote_in_current,
                    });
                    started = false;
                    any_quote_in_current = false;
                }
            }
            c => {
                if !started {
                    current_start = col;
                    started = true;
                }
                current.push(c);
            }
        }
    }

    if started {
        tokens.push(Token {
            text: current,
            column: current_start,
            quoted: any_quote_in_current,
        });
    }

    (tokens, TokenizeResult { quote_count })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_split() {
        let (tokens, result) = tokenize("echo hello world");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["echo", "hello", "world"]);
        assert_eq!(result.quote_count, 0);
    }

    #[test]
    fn quoted_spaces_stay_together() {
        let (tokens, result) = tokenize(r#"echo "hello world""#);
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["echo", "\"hello world\""]);
        assert_eq!(result.quote_count, 2);
    }

    #[test]
    fn unmatched_quote_counted_odd() {
        let (_tokens, result) = tokenize(r#"echo ""#);
        assert_eq!(result.quote_count, 1);
    }

    #[test]
    fn caret_escapes_next_char() {
        let (tokens, _) = tokenize("echo hello^&world");
        let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["echo", "hello&world"]);
    }

    #[test]
    fn caret_inside_quotes_is_literal() {
        let (tokens, _) = tokenize(r#"echo "a^b""#);
        assert_eq!(tokens[1].text, "\"a^b\"");
    }

    #[test]
    fn columns_track_token_start() {
        let (tokens, _) = tokenize("  echo hi");
        assert_eq!(tokens[0].column, 2);
        assert_eq!(tokens[1].column, 7);
    }

    #[test]
    fn empty_line_has_no_tokens() {
        let (tokens, result) = tokenize("");
        assert!(tokens.is_empty());
        assert_eq!(result.quote_count, 0);
    }
}
