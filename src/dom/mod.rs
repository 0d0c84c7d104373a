//! DOM Module - Arena-based document tree
//!
//! Builds a tree from scan events using:
//! - Arena allocation for nodes and attributes
//! - NodeId (u32) indices for traversal
//! - Zero-copy names and text borrowed from the input

pub mod builder;
pub mod document;
pub mod node;

pub use builder::TreeBuilder;
pub use document::Document;
pub use node::{Attribute, Node, NodeId, NodeKind};
