//! Scan Event Types
//!
//! Defines the events emitted during scanning as plain values, for callers
//! that prefer a list over implementing [`EventSink`](crate::EventSink).

use crate::core::sink::{TagForm, TagKind};

/// A scan event
///
/// Text borrows from the scanned input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    /// Character data between tag constructs
    Cdata(&'a str),

    /// Start of a tag construct
    BeginTag {
        /// Tag name
        name: &'a str,
        /// `Opened` for `<name`, `Closed` for `</name`
        kind: TagKind,
    },

    /// Attribute of the current tag
    Attribute {
        /// Attribute name
        key: &'a str,
        /// Attribute value without quotes
        value: &'a str,
    },

    /// End of the current tag construct
    FinishTag {
        /// Kind the tag began with
        begin: TagKind,
        /// `Closed` for `/>`, `Opened` for `>`
        end: TagKind,
    },

    /// Comment or declaration body
    Comment(&'a str),

    /// Processing instruction body
    Instruction(&'a str),
}

impl<'a> Event<'a> {
    /// Check if this event begins a tag
    #[inline]
    pub fn is_begin_tag(&self) -> bool {
        matches!(self, Event::BeginTag { .. })
    }

    /// Check if this is a character data event
    #[inline]
    pub fn is_cdata(&self) -> bool {
        matches!(self, Event::Cdata(_))
    }

    /// Get the shape of the tag if this event finishes one
    pub fn tag_form(&self) -> Option<TagForm> {
        match *self {
            Event::FinishTag { begin, end } => TagForm::classify(begin, end),
            _ => None,
        }
    }

    /// Get the text carried by a cdata, comment or instruction event
    pub fn text(&self) -> Option<&'a str> {
        match *self {
            Event::Cdata(text) | Event::Comment(text) | Event::Instruction(text) => Some(text),
            _ => None,
        }
    }
}
