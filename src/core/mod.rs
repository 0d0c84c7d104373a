//! Core scanning primitives
//!
//! - Cursor: memchr-accelerated text cursor with anchored matching
//! - Attributes: `key="value"` pair matching
//! - Scanner: driver loop and tag dispatch
//! - Sink: the event sink trait and tag kinds
//! - Error: fatal scan errors

pub mod attributes;
pub mod cursor;
pub mod error;
pub mod scanner;
pub mod sink;
