//! Document node representation
//!
//! Uses NodeId (u32) for compact, cache-friendly node references. Names and
//! text borrow from the scanned input.

/// Compact node identifier (index into arena)
pub type NodeId = u32;

/// Type of node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Document root
    Document,
    /// Element node
    Element,
    /// Character data
    Text,
    /// Comment or declaration
    Comment,
    /// Processing instruction
    Instruction,
}

/// A node in the arena
#[derive(Debug, Clone)]
pub struct Node<'a> {
    /// Type of this node
    pub kind: NodeKind,
    /// Parent node (None for document root)
    pub parent: Option<NodeId>,
    /// First child node
    pub first_child: Option<NodeId>,
    /// Last child node
    pub last_child: Option<NodeId>,
    /// Previous sibling
    pub prev_sibling: Option<NodeId>,
    /// Next sibling
    pub next_sibling: Option<NodeId>,
    /// Element name, or the text of text, comment and instruction nodes
    pub value: &'a str,
    /// Start of attributes in attribute arena (for elements)
    pub attr_start: u32,
    /// Number of attributes
    pub attr_count: u32,
    /// Element was written as `<name/>`
    pub self_closing: bool,
    /// Depth in document tree
    pub depth: u32,
}

impl<'a> Node<'a> {
    /// Create a new document root node
    pub fn document() -> Self {
        Self::new(NodeKind::Document, "", None, 0)
    }

    /// Create a new element node
    pub fn element(name: &'a str, parent: NodeId, depth: u32, attr_start: u32) -> Self {
        Node {
            attr_start,
            ..Self::new(NodeKind::Element, name, Some(parent), depth)
        }
    }

    /// Create a text, comment or instruction node
    pub fn leaf(kind: NodeKind, value: &'a str, parent: NodeId, depth: u32) -> Self {
        Self::new(kind, value, Some(parent), depth)
    }

    fn new(kind: NodeKind, value: &'a str, parent: Option<NodeId>, depth: u32) -> Self {
        Node {
            kind,
            parent,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
            value,
            attr_start: 0,
            attr_count: 0,
            self_closing: false,
            depth,
        }
    }

    /// Check if this is an element
    #[inline]
    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    /// Check if this is a text node
    #[inline]
    pub fn is_text(&self) -> bool {
        self.kind == NodeKind::Text
    }
}

/// An attribute in the attribute arena
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attribute<'a> {
    /// Attribute name
    pub name: &'a str,
    /// Attribute value without quotes
    pub value: &'a str,
}
