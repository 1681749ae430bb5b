//! Option strings of the form `--name value [--name value ...]`.
//!
//! A value is either a plain token (no whitespace, no quotes) or a quoted
//! string. Quoted values are handed back verbatim, without their quotes, so
//! a nested component can parse them with the same grammar later:
//!
//! ```rust
//! use gedcore::method::options::parse_options;
//!
//! let options = parse_options("--threads 4 --sub '--x 1 --y 2'").unwrap();
//! assert_eq!(options["threads"], "4");
//! assert_eq!(options["sub"], "--x 1 --y 2");
//! ```

use std::collections::BTreeMap;

use crate::errors::GedError;

/// Parsed options keyed by name (without the leading `--`).
pub type OptionMap = BTreeMap<String, String>;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    Plain(String),
    Quoted(String),
}

fn tokenize(input: &str) -> Result<Vec<Token>, GedError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();
    while let Some(&(start, ch)) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }
        if ch == '\'' || ch == '"' {
            chars.next();
            let mut closed = None;
            for (idx, c) in chars.by_ref() {
                if c == ch {
                    closed = Some(idx);
                    break;
                }
            }
            let end = closed.ok_or_else(|| {
                GedError::malformed_options(format!("unterminated quote starting at byte {start}"))
            })?;
            if let Some(&(idx, next)) = chars.peek()
                && !next.is_whitespace()
            {
                return Err(GedError::malformed_options(format!(
                    "unexpected `{next}` after closing quote at byte {idx}"
                )));
            }
            tokens.push(Token::Quoted(input[start + 1..end].to_string()));
            continue;
        }
        let mut end = input.len();
        while let Some(&(idx, c)) = chars.peek() {
            if c.is_whitespace() {
                end = idx;
                break;
            }
            if c == '\'' || c == '"' {
                return Err(GedError::malformed_options(format!(
                    "quote inside unquoted token at byte {idx}"
                )));
            }
            chars.next();
        }
        tokens.push(Token::Plain(input[start..end].to_string()));
    }
    Ok(tokens)
}

/// Parses `input` into ordered `(name, value)` pairs, keeping duplicates.
pub fn parse_option_pairs(input: &str) -> Result<Vec<(String, String)>, GedError> {
    let mut tokens = tokenize(input)?.into_iter();
    let mut pairs = Vec::new();
    while let Some(token) = tokens.next() {
        let name = match token {
            Token::Plain(word) => match word.strip_prefix("--") {
                Some(name) if !name.is_empty() => name.to_string(),
                _ => {
                    return Err(GedError::malformed_options(format!(
                        "expected `--<option>`, found `{word}`"
                    )));
                }
            },
            Token::Quoted(text) => {
                return Err(GedError::malformed_options(format!(
                    "expected `--<option>`, found quoted `{text}`"
                )));
            }
        };
        let value = match tokens.next() {
            Some(Token::Plain(word)) | Some(Token::Quoted(word)) => word,
            None => {
                return Err(GedError::malformed_options(format!(
                    "option `--{name}` has no argument"
                )));
            }
        };
        pairs.push((name, value));
    }
    Ok(pairs)
}

/// Parses `input` into a map; the last occurrence of a name wins.
pub fn parse_options(input: &str) -> Result<OptionMap, GedError> {
    Ok(parse_option_pairs(input)?.into_iter().collect())
}

/// Renders options back into a string accepted by [`parse_options`].
/// Fails when a value cannot be quoted, see [`quote_value`].
pub fn render_options(options: &OptionMap) -> Result<String, GedError> {
    let mut parts = Vec::with_capacity(options.len());
    for (name, value) in options {
        parts.push(format!("--{name} {}", quote_value(value)?));
    }
    Ok(parts.join(" "))
}

/// Quotes a value when it cannot travel as a plain token. Quotes do not
/// nest with escapes, so a value holding both `'` and `"` is rejected.
pub fn quote_value(value: &str) -> Result<String, GedError> {
    let has_single = value.contains('\'');
    let has_double = value.contains('"');
    if has_single && has_double {
        return Err(GedError::malformed_options(format!(
            "value `{value}` contains both quote kinds and cannot be quoted"
        )));
    }
    let needs_quotes =
        value.is_empty() || has_single || has_double || value.chars().any(char::is_whitespace);
    Ok(if !needs_quotes {
        value.to_string()
    } else if has_single {
        format!("\"{value}\"")
    } else {
        format!("'{value}'")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizer_keeps_quoted_groups_together() {
        let tokens = tokenize("--a 1 --b '--c 2'").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Plain("--a".into()),
                Token::Plain("1".into()),
                Token::Plain("--b".into()),
                Token::Quoted("--c 2".into()),
            ]
        );
    }

    #[test]
    fn tokenizer_accepts_double_quotes_around_single_quotes() {
        let tokens = tokenize(r#"--m "--inner '--x 1'""#).unwrap();
        assert_eq!(tokens[1], Token::Quoted("--inner '--x 1'".into()));
    }

    #[test]
    fn tokenizer_rejects_unterminated_quote() {
        let err = tokenize("--a 'open").unwrap_err();
        assert!(matches!(err, GedError::MalformedOptionString(_)));
    }

    #[test]
    fn tokenizer_rejects_text_glued_to_closing_quote() {
        assert!(tokenize("--a 'x'y").is_err());
        assert!(tokenize("--a x'y'").is_err());
    }

    #[test]
    fn tokenizer_handles_extra_whitespace() {
        let tokens = tokenize("  \t--a   1\n").unwrap();
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn quote_value_rejects_mixed_quotes() {
        let err = quote_value(r#"it's "x""#).unwrap_err();
        assert!(matches!(err, GedError::MalformedOptionString(_)));
    }

    #[test]
    fn empty_quoted_value_is_a_token() {
        let pairs = parse_option_pairs("--save ''").unwrap();
        assert_eq!(pairs, vec![("save".to_string(), String::new())]);
    }
}
