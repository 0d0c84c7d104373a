//! Tree Builder
//!
//! Implements EventSink to assemble a [`Document`] while scanning.
//!
//! The tag language has no notion of void elements, so structure comes only
//! from the tags themselves: a start tag opens an element, a self-closing tag
//! adds a leaf, and an end tag closes the nearest open element of the same
//! name (and every element opened after it). End tags without an open
//! counterpart are dropped. Elements still open at the end of input are
//! closed implicitly.

use super::document::Document;
use super::node::{Attribute, Node, NodeId, NodeKind};
use crate::core::sink::{EventSink, TagForm, TagKind};

/// Tag being scanned, between `begin_tag` and `finish_tag`
#[derive(Debug, Clone, Copy)]
enum PendingTag<'a> {
    /// Element already appended to the arena
    Element(NodeId),
    /// End tag name
    End(&'a str),
}

/// Sink that builds a document tree
#[derive(Debug, Default)]
pub struct TreeBuilder<'a> {
    doc: Document<'a>,
    /// Open elements, innermost last
    stack: Vec<NodeId>,
    pending: Option<PendingTag<'a>>,
}

impl<'a> TreeBuilder<'a> {
    /// Create a builder with an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of elements currently open
    pub fn open_elements(&self) -> usize {
        self.stack.len()
    }

    /// Finish building, implicitly closing open elements
    pub fn finish(self) -> Document<'a> {
        if !self.stack.is_empty() {
            log::debug!("{} element(s) left open at end of input", self.stack.len());
        }
        self.doc
    }

    fn parent(&self) -> (NodeId, u32) {
        let parent = self.stack.last().copied().unwrap_or(0);
        // Open elements are arena nodes, so the count fits a NodeId
        let depth = u32::try_from(self.stack.len()).unwrap_or(u32::MAX);
        (parent, depth)
    }

    fn append_leaf(&mut self, kind: NodeKind, value: &'a str) {
        let (parent, depth) = self.parent();
        self.doc.append(Node::leaf(kind, value, parent, depth));
    }

    /// Close the innermost open element called `name`
    fn close_element(&mut self, name: &str) {
        let found = self
            .stack
            .iter()
            .rposition(|&id| self.doc.node_name(id) == Some(name));

        match found {
            Some(index) => {
                if index + 1 < self.stack.len() {
                    log::debug!(
                        "</{name}> implicitly closes {} element(s)",
                        self.stack.len() - index - 1
                    );
                }
                self.stack.truncate(index);
            }
            None => log::warn!("ignoring </{name}> without matching open element"),
        }
    }
}

impl<'a> EventSink<'a> for TreeBuilder<'a> {
    fn cdata(&mut self, text: &'a str) {
        self.append_leaf(NodeKind::Text, text);
    }

    fn begin_tag(&mut self, name: &'a str, kind: TagKind) {
        self.pending = Some(match kind {
            TagKind::Opened => {
                let (parent, depth) = self.parent();
                let node = Node::element(name, parent, depth, self.doc.attribute_count());
                PendingTag::Element(self.doc.append(node))
            }
            TagKind::Closed => PendingTag::End(name),
        });
    }

    fn attribute(&mut self, name: &'a str, value: &'a str) {
        // Attributes on end tags carry no structure
        if let Some(PendingTag::Element(id)) = self.pending {
            self.doc.push_attribute(id, Attribute { name, value });
        }
    }

    fn finish_tag(&mut self, begin: TagKind, end: TagKind) {
        let form = TagForm::classify(begin, end);
        let (Some(pending), Some(form)) = (self.pending.take(), form) else {
            return;
        };

        match (pending, form) {
            (PendingTag::Element(id), TagForm::Start) => self.stack.push(id),
            (PendingTag::Element(id), TagForm::SelfClosing) => {
                if let Some(node) = self.doc.get_node_mut(id) {
                    node.self_closing = true;
                }
            }
            (PendingTag::End(name), TagForm::End) => self.close_element(name),
            (pending, form) => log::warn!("unexpected {form:?} tag finish for {pending:?}"),
        }
    }

    fn comment(&mut self, text: &'a str) {
        self.append_leaf(NodeKind::Comment, text);
    }

    fn instruction(&mut self, text: &'a str) {
        self.append_leaf(NodeKind::Instruction, text);
    }
}
