//! Text cursor over the source document
//!
//! Uses memchr for fast byte searching with SIMD acceleration. All the
//! delimiters the grammar cares about are ASCII, so every offset the cursor
//! stops at is also a `char` boundary and captured spans can be handed out
//! as `&str` without re-validation.

use memchr::{memchr, memmem};

/// Cursor over immutable source text
///
/// The offset only ever moves forward. Matching methods either succeed,
/// advance past the match and return the captured span, or fail and leave
/// the offset untouched.
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor at the start of `input`
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Cursor { input, pos: 0 }
    }

    /// Get the current byte offset
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Check if we've reached the end
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Get the unscanned text
    #[inline]
    pub fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Peek at current byte without advancing
    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.as_bytes().get(self.pos).copied()
    }

    /// Advance by n bytes
    #[inline]
    pub fn advance(&mut self, n: usize) {
        debug_assert!(self.pos + n <= self.input.len(), "cursor moved past end of input");
        self.pos += n;
    }

    /// Check if the unscanned text starts with `needle`
    #[inline]
    pub fn starts_with(&self, needle: &str) -> bool {
        self.remaining().starts_with(needle)
    }

    /// Consume `byte` if it is the next byte
    #[inline]
    pub fn accept(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Consume `needle` if the input continues with it
    #[inline]
    pub fn accept_str(&mut self, needle: &str) -> bool {
        if self.starts_with(needle) {
            self.pos += needle.len();
            true
        } else {
            false
        }
    }

    /// Consume the longest non-empty run of bytes satisfying `pred`
    ///
    /// `pred` must accept every byte >= 0x80 so that runs end on a `char` boundary.
    pub fn take_while(&mut self, pred: impl Fn(u8) -> bool) -> Option<&'a str> {
        let start = self.pos;
        let len = self.remaining().bytes().take_while(|&b| pred(b)).count();
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(&self.input[start..self.pos])
    }

    /// Consume the longest non-empty run of bytes not equal to `byte` (ASCII)
    #[inline]
    pub fn take_until_byte(&mut self, byte: u8) -> Option<&'a str> {
        let start = self.pos;
        let len = memchr(byte, self.remaining().as_bytes()).unwrap_or(self.input.len() - start);
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(&self.input[start..self.pos])
    }

    /// Skip whitespace characters
    #[inline]
    pub fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if !is_space(b) {
                break;
            }
            self.pos += 1;
        }
    }

    /// Search forward for `needle`, consuming it and everything before it
    ///
    /// Returns the text strictly before the first occurrence of `needle`.
    pub fn scan_until(&mut self, needle: &str) -> Option<&'a str> {
        let start = self.pos;
        let found = memmem::find(self.remaining().as_bytes(), needle.as_bytes())?;
        self.pos = start + found + needle.len();
        Some(&self.input[start..start + found])
    }

    /// Get the text between two earlier offsets
    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.input[start..end]
    }
}

/// Whitespace as the tag grammar sees it: space, tab, LF, VT, FF, CR
#[inline]
pub fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}
