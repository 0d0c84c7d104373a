//! Event Recorder
//!
//! Implements EventSink to collect events for batch return.

use super::events::Event;
use crate::core::error::Result;
use crate::core::scanner::scan;
use crate::core::sink::{EventSink, TagKind};

/// Sink that records every event in order
#[derive(Debug, Default)]
pub struct EventRecorder<'a> {
    events: Vec<Event<'a>>,
}

impl<'a> EventRecorder<'a> {
    /// Create a new recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with estimated capacity
    pub fn with_capacity(events: usize) -> Self {
        Self {
            events: Vec::with_capacity(events),
        }
    }

    /// Get the recorded events as a slice
    pub fn events(&self) -> &[Event<'a>] {
        &self.events
    }

    /// Take the recorded events
    pub fn into_events(self) -> Vec<Event<'a>> {
        self.events
    }
}

impl<'a> EventSink<'a> for EventRecorder<'a> {
    fn cdata(&mut self, text: &'a str) {
        self.events.push(Event::Cdata(text));
    }

    fn begin_tag(&mut self, name: &'a str, kind: TagKind) {
        self.events.push(Event::BeginTag { name, kind });
    }

    fn attribute(&mut self, key: &'a str, value: &'a str) {
        self.events.push(Event::Attribute { key, value });
    }

    fn finish_tag(&mut self, begin: TagKind, end: TagKind) {
        self.events.push(Event::FinishTag { begin, end });
    }

    fn comment(&mut self, text: &'a str) {
        self.events.push(Event::Comment(text));
    }

    fn instruction(&mut self, text: &'a str) {
        self.events.push(Event::Instruction(text));
    }
}

/// Parse input and return its events
pub fn parse_events(input: &str) -> Result<Vec<Event<'_>>> {
    // Roughly one event per 16 bytes of markup
    let mut recorder = EventRecorder::with_capacity(input.len() / 16);
    scan(input, &mut recorder)?;
    Ok(recorder.into_events())
}
