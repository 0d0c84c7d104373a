//! Scanning strategies for batches of documents
//!
//! - Parallel: one scanner per document on the Rayon pool

pub mod parallel;

pub use parallel::{parse_documents_parallel, parse_events_parallel, scan_map};
