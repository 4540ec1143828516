//! Lexing: display text → tokens.
//!
//! Pure function over the input string. Works on bytes because every
//! meaningful character is ASCII; anything else is reported with its
//! full `char` and byte offset.

use crate::types::{EvalError, Token, TokenKind};

/// Split display text into tokens.
///
/// Whitespace is skipped. An empty or all-whitespace input yields an
/// empty vector; deciding that this is an error is the parser's job.
pub fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        let start = i;
        let kind = match bytes[i] {
            b if b.is_ascii_whitespace() => {
                i += 1;
                continue;
            }
            b'0'..=b'9' | b'.' => {
                let (value, end) = scan_number(input, start)?;
                i = end;
                tokens.push(Token::new(TokenKind::Number(value), start));
                continue;
            }
            b'*' if bytes.get(i + 1) == Some(&b'*') => {
                i += 1;
                TokenKind::StarStar
            }
            b'*' => TokenKind::Star,
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            _ => {
                let ch = input[i..].chars().next().unwrap_or(char::REPLACEMENT_CHARACTER);
                return Err(EvalError::UnexpectedChar { ch, pos: i });
            }
        };
        i += 1;
        tokens.push(Token::new(kind, start));
    }

    Ok(tokens)
}

/// Scan a decimal literal starting at `start`.
///
/// Accepts `12`, `1.5`, `.5`, `5.` and an optional exponent (`1e3`,
/// `2.5E-2`). Returns the value and the byte offset just past the literal.
fn scan_number(input: &str, start: usize) -> Result<(f64, usize), EvalError> {
    let bytes = input.as_bytes();
    let mut end = start;

    while end < bytes.len() && (bytes[end].is_ascii_digit() || bytes[end] == b'.') {
        end += 1;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let digits_start = exp;
        while exp < bytes.len() && bytes[exp].is_ascii_digit() {
            exp += 1;
        }
        if exp == digits_start {
            return Err(EvalError::InvalidNumber {
                literal: input[start..exp].to_string(),
                pos: start,
            });
        }
        end = exp;
    }

    let literal = &input[start..end];
    literal
        .parse::<f64>()
        .map(|value| (value, end))
        .map_err(|_| EvalError::InvalidNumber {
            literal: literal.to_string(),
            pos: start,
        })
}

// ============================================================================
// TESTS
// ============================================================================
