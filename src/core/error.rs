//! Scan errors
//!
//! Every grammar violation is fatal for the current parse. The error keeps
//! the failing offset and a short excerpt of the unscanned text so callers
//! can point at the problem.

use thiserror::Error;

/// Maximum number of characters of unscanned text kept in an error
const EXCERPT_CHARS: usize = 32;

/// What went wrong while scanning
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanErrorKind {
    /// A driver iteration consumed nothing
    #[error("scanner did not advance")]
    Stalled,
    /// No tag name after `<` or `</`
    #[error("invalid tag")]
    InvalidTag,
    /// Unexpected characters before the `>` or `/>` terminator
    #[error("invalid characters in tag")]
    InvalidTagBody,
    /// End tag written as self-closing, e.g. `</a/>`
    #[error("tag cannot be closed at both ends")]
    DoubleClosed,
    /// `<!--` or `<!` without a closing delimiter
    #[error("comment is not closed")]
    UnterminatedComment,
    /// `<?` without a closing `?>`
    #[error("instruction is not closed")]
    UnterminatedInstruction,
}

/// Fatal error raised by [`Scanner::parse`](crate::Scanner::parse)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} at offset {position}: {remaining:?}")]
pub struct ScanError {
    /// Error kind
    pub kind: ScanErrorKind,
    /// Byte offset of the cursor when the error was raised
    pub position: usize,
    /// Beginning of the unscanned text at `position`
    pub remaining: String,
}

impl ScanError {
    /// Create an error, keeping an excerpt of `remaining`
    pub fn new(kind: ScanErrorKind, position: usize, remaining: &str) -> Self {
        let remaining = match remaining.char_indices().nth(EXCERPT_CHARS) {
            Some((end, _)) => format!("{}...", &remaining[..end]),
            None => remaining.to_owned(),
        };
        ScanError {
            kind,
            position,
            remaining,
        }
    }
}

/// Result is an alias for standard result with bound ScanError type.
pub type Result<T> = std::result::Result<T, ScanError>;
