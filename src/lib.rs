//! xnode - Streaming scanner for an XML-like tag language
//!
//! The scanner walks a fully loaded document once and pushes structural
//! events into a caller-owned [`EventSink`]:
//!
//! ```text
//! Scanner ---> EventSink
//!                |-- EventRecorder (sax)   -> Vec<Event>
//!                |-- TreeBuilder   (dom)   -> Document
//!                `-- your own sink
//! ```
//!
//! The language is deliberately loose: tag names are any run of characters
//! other than whitespace, `/` and `>`; attribute values must be quoted;
//! comments are `<!-- ... -->` or `<! ... >`; instructions are `<? ... ?>`.
//! Entities are not decoded and there is no CDATA section syntax. Any
//! grammar violation aborts the parse with a [`ScanError`].
//!
//! ```
//! use xnode::{parse_events, Event, TagKind};
//!
//! let events = parse_events("<br/>").unwrap();
//! assert_eq!(
//!     events,
//!     vec![
//!         Event::BeginTag { name: "br", kind: TagKind::Opened },
//!         Event::FinishTag { begin: TagKind::Opened, end: TagKind::Closed },
//!     ]
//! );
//! ```
//!
//! Features:
//! - `parallel` (default): scan batches of documents with Rayon
//! - `mimalloc`: use mimalloc as the allocator of the `xnode` binary

pub mod core;
pub mod dom;
pub mod sax;
#[cfg(feature = "parallel")]
pub mod strategy;

pub use crate::core::error::{ScanError, ScanErrorKind};
pub use crate::core::scanner::{scan, Scanner};
pub use crate::core::sink::{EventSink, TagForm, TagKind};
pub use crate::dom::Document;
pub use crate::sax::{parse_events, Event, EventRecorder};
