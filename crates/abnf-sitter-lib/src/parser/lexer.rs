//! Lexer for ABNF.
//!
//! Produces span-based tokens without storing text; text is sliced from source only when needed.
//!
//! ## Error handling
//!
//! The lexer coalesces consecutive error characters into single `Garbage` tokens rather
//! than producing one error per character.

use logos::Logos;
use rowan::TextRange;
use std::ops::Range;

use super::cst::SyntaxKind;

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: SyntaxKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: SyntaxKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Tokenizes source into a vector of span-based tokens.
///
/// Post-processes the Logos output:
/// - Coalesces consecutive lexer errors into single `Garbage` tokens
/// - Splits `QuotedString` tokens into quote + content + quote
/// - Splits `NumericValue` tokens into `%`, base marker, digit runs and `.`/`-` separators
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = SyntaxKind::lexer(source);
    let mut error_start: Option<usize> = None;

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(start) = error_start.take() {
                    let end = lexer.span().start;
                    tokens.push(Token::new(
                        SyntaxKind::Garbage,
                        range_to_text_range(start..end),
                    ));
                }

                let span = lexer.span();
                match kind {
                    SyntaxKind::QuotedString => split_quoted_string(span, &mut tokens),
                    SyntaxKind::NumericValue => split_numeric_value(source, span, &mut tokens),
                    _ => tokens.push(Token::new(kind, range_to_text_range(span))),
                }
            }
            Some(Err(())) => {
                if error_start.is_none() {
                    error_start = Some(lexer.span().start);
                }
            }
            None => {
                if let Some(start) = error_start.take() {
                    tokens.push(Token::new(
                        SyntaxKind::Garbage,
                        range_to_text_range(start..source.len()),
                    ));
                }
                break;
            }
        }
    }

    tokens
}

/// Splits a quoted string token into: quote + content + quote
fn split_quoted_string(span: Range<usize>, tokens: &mut Vec<Token>) {
    let start = span.start;
    let end = span.end;

    tokens.push(Token::new(
        SyntaxKind::DoubleQuote,
        range_to_text_range(start..start + 1),
    ));

    if end - start > 2 {
        tokens.push(Token::new(
            SyntaxKind::StrVal,
            range_to_text_range(start + 1..end - 1),
        ));
    }

    tokens.push(Token::new(
        SyntaxKind::DoubleQuote,
        range_to_text_range(end - 1..end),
    ));
}

/// Splits `%x41.42` into `%` `x` `41` `.` `42` (and `%x20-7E` likewise with `-`).
///
/// The regex guarantees the shape, so every byte after the base marker is
/// either a hex digit or a single-byte separator.
fn split_numeric_value(source: &str, span: Range<usize>, tokens: &mut Vec<Token>) {
    let start = span.start;
    tokens.push(Token::new(
        SyntaxKind::Percent,
        range_to_text_range(start..start + 1),
    ));
    tokens.push(Token::new(
        SyntaxKind::NumBase,
        range_to_text_range(start + 1..start + 2),
    ));

    let bytes = source.as_bytes();
    let mut pos = start + 2;
    while pos < span.end {
        let kind = match bytes[pos] {
            b'.' => Some(SyntaxKind::Dot),
            b'-' => Some(SyntaxKind::Dash),
            _ => None,
        };
        if let Some(kind) = kind {
            tokens.push(Token::new(kind, range_to_text_range(pos..pos + 1)));
            pos += 1;
            continue;
        }

        let digits_start = pos;
        while pos < span.end && bytes[pos].is_ascii_hexdigit() {
            pos += 1;
        }
        tokens.push(Token::new(
            SyntaxKind::NumDigits,
            range_to_text_range(digits_start..pos),
        ));
    }
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[std::ops::Range::<usize>::from(token.span)]
}
