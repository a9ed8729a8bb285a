//! Terminal values: quoted strings and `%` numeric values.

use abnf_sitter_core::Rule;

/// Longest hex digit run accepted for a character or a range endpoint.
const MAX_CHAR_DIGITS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// `%b` and `%d` values.
    UnsupportedBase(char),
    /// A value or range endpoint with more than four hex digits.
    Overlong(String),
    /// Empty or non-hex digit groups, mixed `.` and `-`, inverted ranges.
    Malformed,
    /// Not a Unicode scalar value (surrogates, above U+10FFFF).
    InvalidCodepoint(u32),
    /// `""`
    EmptyLiteral,
}

/// Decode a numeric value without its `%` marker: `x41`, `x41.42.43`, `x20-7E`.
///
/// - Ranges become a char class over both endpoints, inclusive
/// - Dotted groups become one literal, one character per group
/// - A single value becomes a one-character literal
pub fn decode_num_val(text: &str) -> Result<Rule, ValueError> {
    let mut chars = text.chars();
    let base = chars.next().ok_or(ValueError::Malformed)?;
    if !base.eq_ignore_ascii_case(&'x') {
        return Err(ValueError::UnsupportedBase(base.to_ascii_lowercase()));
    }
    let digits = chars.as_str();

    if let Some((low, high)) = digits.split_once('-') {
        if low.contains('.') || high.contains('.') {
            return Err(ValueError::Malformed);
        }
        let low = decode_char(low, MAX_CHAR_DIGITS)?;
        let high = decode_char(high, MAX_CHAR_DIGITS)?;
        if low > high {
            return Err(ValueError::Malformed);
        }
        return Ok(Rule::char_class(low as u32, high as u32));
    }

    let value = digits
        .split('.')
        .map(|group| decode_char(group, MAX_CHAR_DIGITS))
        .collect::<Result<String, _>>()?;
    Ok(Rule::string(value))
}

/// A quoted string's content, or `None` for `""`.
pub fn decode_char_val(content: Option<&str>) -> Result<Rule, ValueError> {
    match content {
        Some(text) if !text.is_empty() => Ok(Rule::string(text)),
        _ => Err(ValueError::EmptyLiteral),
    }
}

fn decode_char(digits: &str, max_digits: usize) -> Result<char, ValueError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ValueError::Malformed);
    }
    if digits.len() > max_digits {
        return Err(ValueError::Overlong(digits.to_string()));
    }
    let codepoint = u32::from_str_radix(digits, 16).map_err(|_| ValueError::Malformed)?;
    char::from_u32(codepoint).ok_or(ValueError::InvalidCodepoint(codepoint))
}
