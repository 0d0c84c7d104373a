//! Tag Attribute Parsing
//!
//! Attributes are `key=value` pairs separated by optional whitespace. The
//! value must be quoted with `'` or `"` and ends at the next occurrence of
//! the same quote; there is no escaping inside a value.

use super::cursor::{is_space, Cursor};
use memchr::memchr;

/// A single attribute matched at the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute<'a> {
    /// Attribute name, possibly empty (`="x"` is accepted)
    pub key: &'a str,
    /// Raw attribute value without quotes
    pub value: &'a str,
    /// Bytes consumed, including leading whitespace and both quotes
    len: usize,
}

/// Match one attribute anchored at the start of `input`
///
/// Returns `None` when the text does not form a complete attribute, in which
/// case nothing is consumed.
pub fn match_attribute(input: &str) -> Option<Attribute<'_>> {
    let bytes = input.as_bytes();
    let mut pos = bytes.iter().take_while(|&&b| is_space(b)).count();

    let key_start = pos;
    while pos < bytes.len() && is_key_char(bytes[pos]) {
        pos += 1;
    }
    let key_end = pos;

    if bytes.get(pos) != Some(&b'=') {
        return None;
    }
    pos += 1;

    let quote = match bytes.get(pos) {
        Some(&q @ (b'"' | b'\'')) => q,
        _ => return None,
    };
    pos += 1;

    let value_start = pos;
    let value_len = memchr(quote, &bytes[value_start..])?;
    pos = value_start + value_len + 1;

    Some(Attribute {
        key: &input[key_start..key_end],
        value: &input[value_start..value_start + value_len],
        len: pos,
    })
}

/// Consume attributes at the cursor until one fails to match
///
/// `on_attribute` is called once per attribute, in document order.
pub fn scan_attributes<'a>(
    cursor: &mut Cursor<'a>,
    mut on_attribute: impl FnMut(&'a str, &'a str),
) {
    while let Some(attr) = match_attribute(cursor.remaining()) {
        cursor.advance(attr.len);
        on_attribute(attr.key, attr.value);
    }
}

/// Check if byte may appear in an attribute key
#[inline]
fn is_key_char(b: u8) -> bool {
    !is_space(b) && !matches!(b, b'=' | b'/' | b'>')
}
