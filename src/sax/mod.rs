//! Event recording
//!
//! Collects the events of a scan into a `Vec<Event>`:
//!
//! ```text
//! Scanner ---> EventRecorder ---> Vec<Event>
//! ```
//!
//! Events borrow their text from the input, so recording allocates only the
//! event list itself.

pub mod collector;
pub mod events;

pub use collector::{parse_events, EventRecorder};
pub use events::Event;
