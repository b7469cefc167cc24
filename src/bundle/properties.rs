//! Parser for the `java.util.Properties` text format.
//!
//! Supports comments (`#`, `!`), the `=`, `:` and whitespace separators,
//! backslash line continuations and the `\t \n \r \f \uXXXX` escapes.

use thiserror::Error;

/// Errors raised while reading a properties file.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertiesError {
    /// `\u` not followed by four hexadecimal digits.
    #[error("Malformed \\uxxxx encoding on line {line}")]
    MalformedUnicodeEscape { line: usize },
}

/// UTF-8 byte order mark.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decodes properties file bytes.
///
/// UTF-8 is tried first and ISO-8859-1 is used when the bytes are not valid
/// UTF-8, the same order Java applies to property resource bundles.
#[must_use]
pub fn decode(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    encoding_rs::UTF_8
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map_or_else(|| decode_latin1(bytes), std::borrow::Cow::into_owned)
}

/// ISO-8859-1 maps every byte to the code point of the same value.
fn decode_latin1(bytes: &[u8]) -> String {
    tracing::debug!("Properties content is not valid UTF-8, reading it as ISO-8859-1");
    bytes.iter().copied().map(char::from).collect()
}

/// Parses properties text into key/value pairs in file order.
///
/// Repeated keys are returned as they appear; callers decide which one wins.
///
/// # Errors
/// `PropertiesError::MalformedUnicodeEscape` for a broken `\uXXXX` sequence.
pub fn parse(text: &str) -> Result<Vec<(String, String)>, PropertiesError> {
    let mut entries = Vec::new();
    for logical in logical_lines(text) {
        let (raw_key, raw_value) = split_key_value(&logical.text);
        let key = unescape(raw_key, logical.line)?;
        let value = unescape(raw_value, logical.line)?;
        entries.push((key, value));
    }
    Ok(entries)
}

/// A key/value line after joining continuations.
#[derive(Debug)]
struct LogicalLine {
    /// 1-based line number where the logical line starts.
    line: usize,
    /// Raw text with continuation backslashes and line breaks removed.
    text: String,
}

/// Whitespace as defined by the properties format.
const fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{000C}')
}

/// Joins continued lines and drops blank and comment lines.
fn logical_lines(text: &str) -> Vec<LogicalLine> {
    let mut lines = Vec::new();
    let mut current: Option<LogicalLine> = None;

    for (index, raw) in split_lines(text).into_iter().enumerate() {
        let line_number = index + 1;
        let stripped = raw.trim_start_matches(is_blank);

        let mut logical = match current.take() {
            Some(logical) => logical,
            None => {
                if stripped.is_empty() || stripped.starts_with(['#', '!']) {
                    continue;
                }
                LogicalLine { line: line_number, text: String::new() }
            }
        };

        if ends_with_continuation(stripped) {
            logical.text.push_str(stripped.strip_suffix('\\').unwrap_or(stripped));
            current = Some(logical);
        } else {
            logical.text.push_str(stripped);
            lines.push(logical);
        }
    }

    // A continuation on the last line has nothing left to join.
    if let Some(logical) = current {
        lines.push(logical);
    }

    lines
}

/// Splits text into natural lines; `\r\n` counts as one terminator.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut rest = text;
    while let Some(position) = rest.find(['\n', '\r']) {
        let (line, tail) = rest.split_at(position);
        lines.push(line);
        rest = tail
            .strip_prefix("\r\n")
            .or_else(|| tail.strip_prefix('\r'))
            .or_else(|| tail.strip_prefix('\n'))
            .unwrap_or(tail);
    }
    if !rest.is_empty() {
        lines.push(rest);
    }
    lines
}

/// An odd number of trailing backslashes continues the line.
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Splits a logical line at the first unescaped `=`, `:` or whitespace.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut separator = None;
    for (position, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || is_blank(c) {
            separator = Some((position, c));
            break;
        }
    }

    let Some((position, c)) = separator else {
        return (line, "");
    };

    let (key, rest) = line.split_at(position);
    let rest = rest.strip_prefix(c).unwrap_or(rest);
    let mut value = rest.trim_start_matches(is_blank);
    if is_blank(c) {
        value = value.strip_prefix(['=', ':']).unwrap_or(value).trim_start_matches(is_blank);
    }
    (key, value)
}

/// Resolves backslash escapes.
fn unescape(raw: &str, line: usize) -> Result<String, PropertiesError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{000C}'),
            Some('u') => {
                let unit = read_code_unit(&mut chars, line)?;
                let mut units = vec![unit];
                if HIGH_SURROGATES.contains(&unit) {
                    let mut lookahead = chars.clone();
                    if lookahead.next() == Some('\\')
                        && lookahead.next() == Some('u')
                        && let Ok(low) = read_code_unit(&mut lookahead, line)
                        && LOW_SURROGATES.contains(&low)
                    {
                        units.push(low);
                        chars = lookahead;
                    }
                }
                // Lone surrogates cannot be represented in a Rust string.
                out.extend(
                    char::decode_utf16(units)
                        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER)),
                );
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

/// UTF-16 high (leading) surrogates.
const HIGH_SURROGATES: std::ops::RangeInclusive<u16> = 0xD800..=0xDBFF;

/// UTF-16 low (trailing) surrogates.
const LOW_SURROGATES: std::ops::RangeInclusive<u16> = 0xDC00..=0xDFFF;

/// Reads the four hexadecimal digits of a `\uXXXX` escape.
fn read_code_unit(chars: &mut std::str::Chars<'_>, line: usize) -> Result<u16, PropertiesError> {
    let digits: String = chars.by_ref().take(4).collect();
    if digits.len() != 4 || !digits.chars().all(|d| d.is_ascii_hexdigit()) {
        return Err(PropertiesError::MalformedUnicodeEscape { line });
    }
    u16::from_str_radix(&digits, 16).map_err(|_| PropertiesError::MalformedUnicodeEscape { line })
}
