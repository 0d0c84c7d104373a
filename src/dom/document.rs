//! Document - Arena-based tree representation
//!
//! Node 0 is always the document root. Elements, text, comments and
//! instructions hang below it through first-child / next-sibling links.

use std::fmt;

use super::builder::TreeBuilder;
use super::node::{Attribute, Node, NodeId, NodeKind};
use crate::core::error::Result;
use crate::core::scanner::scan;

/// A document stored in arena format
#[derive(Debug, Clone)]
pub struct Document<'a> {
    /// Arena of nodes
    nodes: Vec<Node<'a>>,
    /// Arena of attributes
    attributes: Vec<Attribute<'a>>,
    /// First top-level element
    root_element: Option<NodeId>,
}

impl<'a> Default for Document<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> Document<'a> {
    /// Create a document holding only the root node
    pub fn new() -> Self {
        Document {
            nodes: vec![Node::document()],
            attributes: Vec::new(),
            root_element: None,
        }
    }

    /// Scan `input` and build its tree
    pub fn parse(input: &'a str) -> Result<Self> {
        let mut builder = TreeBuilder::new();
        scan(input, &mut builder)?;
        Ok(builder.finish())
    }

    /// Add a node to the arena and link it under its parent
    pub(crate) fn append(&mut self, node: Node<'a>) -> NodeId {
        let parent_id = node.parent.unwrap_or(0);
        let is_top_element = node.is_element() && parent_id == 0;

        let node_id = self.nodes.len() as NodeId;
        self.nodes.push(node);
        self.link_child(parent_id, node_id);

        if is_top_element && self.root_element.is_none() {
            self.root_element = Some(node_id);
        }
        node_id
    }

    /// Add an attribute to the element most recently appended
    pub(crate) fn push_attribute(&mut self, element: NodeId, attr: Attribute<'a>) {
        debug_assert_eq!(
            self.nodes[element as usize].attr_start + self.nodes[element as usize].attr_count,
            self.attributes.len() as u32,
            "attributes must be pushed for the newest element"
        );
        self.attributes.push(attr);
        self.nodes[element as usize].attr_count += 1;
    }

    /// Next free slot in the attribute arena
    pub(crate) fn attribute_count(&self) -> u32 {
        self.attributes.len() as u32
    }

    pub(crate) fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node<'a>> {
        self.nodes.get_mut(id as usize)
    }

    /// Link a child node to its parent
    fn link_child(&mut self, parent_id: NodeId, child_id: NodeId) {
        // Get parent's last_child first to avoid borrow issues
        let last_child_opt = self.nodes[parent_id as usize].last_child;

        if let Some(last_child_id) = last_child_opt {
            self.nodes[child_id as usize].prev_sibling = Some(last_child_id);
            self.nodes[last_child_id as usize].next_sibling = Some(child_id);
        } else {
            self.nodes[parent_id as usize].first_child = Some(child_id);
        }
        self.nodes[parent_id as usize].last_child = Some(child_id);
    }

    /// Get the document root node (index 0)
    pub fn document_node(&self) -> &Node<'a> {
        &self.nodes[0]
    }

    /// Get the root element ID (first top-level element)
    pub fn root_element_id(&self) -> Option<NodeId> {
        self.root_element
    }

    /// Get the root element
    pub fn root_element(&self) -> Option<&Node<'a>> {
        self.root_element.and_then(|id| self.get_node(id))
    }

    /// Get a node by ID
    pub fn get_node(&self, id: NodeId) -> Option<&Node<'a>> {
        self.nodes.get(id as usize)
    }

    /// Get element name
    pub fn node_name(&self, id: NodeId) -> Option<&'a str> {
        self.get_node(id).filter(|n| n.is_element()).map(|n| n.value)
    }

    /// Get the text of a text, comment or instruction node
    pub fn text_content(&self, id: NodeId) -> Option<&'a str> {
        self.get_node(id)
            .filter(|n| !matches!(n.kind, NodeKind::Element | NodeKind::Document))
            .map(|n| n.value)
    }

    /// Get attributes for an element
    pub fn attributes(&self, id: NodeId) -> &[Attribute<'a>] {
        match self.get_node(id) {
            Some(node) if node.is_element() => {
                let start = node.attr_start as usize;
                &self.attributes[start..start + node.attr_count as usize]
            }
            _ => &[],
        }
    }

    /// Get attribute value by name. The first occurrence wins.
    pub fn get_attribute(&self, node_id: NodeId, name: &str) -> Option<&'a str> {
        self.attributes(node_id)
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value)
    }

    /// Concatenated text of all text nodes below `id`
    pub fn inner_text(&self, id: NodeId) -> String {
        self.descendants(id)
            .filter_map(|n| self.get_node(n).filter(|node| node.is_text()))
            .map(|node| node.value)
            .collect()
    }

    /// Iterate over children
    pub fn children(&self, id: NodeId) -> ChildIter<'_, 'a> {
        let next = self.get_node(id).and_then(|n| n.first_child);
        ChildIter { doc: self, next }
    }

    /// Iterate over descendants (depth-first, excluding `id` itself)
    pub fn descendants(&self, id: NodeId) -> DescendantIter<'_, 'a> {
        let mut iter = DescendantIter {
            doc: self,
            stack: vec![id],
        };
        iter.next();
        iter
    }

    /// Elements below `id` with the given name, in document order
    pub fn elements_by_name(&self, id: NodeId, name: &str) -> Vec<NodeId> {
        self.descendants(id)
            .filter(|&n| self.node_name(n) == Some(name))
            .collect()
    }

    /// Get total node count, including the document root
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Push the children of `id` so that the first child is popped first
    fn push_children(&self, stack: &mut Vec<Visit>, id: NodeId) {
        let mut child_id = self.get_node(id).and_then(|n| n.last_child);
        while let Some(child) = child_id {
            stack.push(Visit::Enter(child));
            child_id = self.get_node(child).and_then(|n| n.prev_sibling);
        }
    }
}

/// Step of the markup writer's walk
#[derive(Debug, Clone, Copy)]
enum Visit {
    /// Write the node and queue its children
    Enter(NodeId),
    /// Write the end tag of an element whose children are done
    Exit(NodeId),
}

impl fmt::Display for Document<'_> {
    /// Write the tree back as markup
    ///
    /// Walks with an explicit stack, so nesting depth is bounded by memory
    /// rather than by the call stack.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![Visit::Enter(0)];

        while let Some(visit) = stack.pop() {
            let id = match visit {
                Visit::Exit(id) => {
                    write!(f, "</{}>", self.node_name(id).unwrap_or_default())?;
                    continue;
                }
                Visit::Enter(id) => id,
            };
            let Some(node) = self.get_node(id) else {
                continue;
            };

            match node.kind {
                NodeKind::Document => self.push_children(&mut stack, id),
                NodeKind::Text => f.write_str(node.value)?,
                NodeKind::Comment => write!(f, "<!{}>", node.value)?,
                NodeKind::Instruction => write!(f, "<?{}?>", node.value)?,
                NodeKind::Element => {
                    write!(f, "<{}", node.value)?;
                    for attr in self.attributes(id) {
                        // Values cannot escape quotes, so pick one the value lacks
                        let quote = if attr.value.contains('"') { '\'' } else { '"' };
                        write!(f, " {}={quote}{}{quote}", attr.name, attr.value)?;
                    }
                    if node.self_closing && node.first_child.is_none() {
                        f.write_str("/>")?;
                        continue;
                    }
                    f.write_str(">")?;
                    stack.push(Visit::Exit(id));
                    self.push_children(&mut stack, id);
                }
            }
        }
        Ok(())
    }
}

/// Iterator over child nodes
pub struct ChildIter<'d, 'a> {
    doc: &'d Document<'a>,
    next: Option<NodeId>,
}

impl<'d, 'a> Iterator for ChildIter<'d, 'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.get_node(current).and_then(|n| n.next_sibling);
        Some(current)
    }
}

/// Iterator over descendant nodes (depth-first)
pub struct DescendantIter<'d, 'a> {
    doc: &'d Document<'a>,
    stack: Vec<NodeId>,
}

impl<'d, 'a> Iterator for DescendantIter<'d, 'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;

        // Add children to stack in reverse order (so first child is processed first)
        if let Some(node) = self.doc.get_node(current) {
            let mut child_id = node.last_child;
            while let Some(id) = child_id {
                self.stack.push(id);
                child_id = self.doc.get_node(id).and_then(|n| n.prev_sibling);
            }
        }

        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let doc = Document::parse("<root><child/></root>").unwrap();

        let root = doc.root_element_id().unwrap();
        assert_eq!(doc.node_name(root), Some("root"));

        let children: Vec<_> = doc.children(root).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(doc.node_name(children[0]), Some("child"));
        assert!(doc.get_node(children[0]).unwrap().self_closing);
    }

    #[test]
    fn test_attributes() {
        let doc = Document::parse("<a href='x' title=\"y\"></a>").unwrap();
        let root = doc.root_element_id().unwrap();

        assert_eq!(doc.attributes(root).len(), 2);
        assert_eq!(doc.get_attribute(root, "href"), Some("x"));
        assert_eq!(doc.get_attribute(root, "title"), Some("y"));
        assert_eq!(doc.get_attribute(root, "missing"), None);
    }

    #[test]
    fn test_inner_text_and_descendants() {
        let doc = Document::parse("<p>Hello <b>big</b> world</p>").unwrap();
        let root = doc.root_element_id().unwrap();

        assert_eq!(doc.inner_text(root), "Hello big world");
        assert_eq!(doc.descendants(root).count(), 4);
        assert_eq!(doc.elements_by_name(0, "b").len(), 1);
    }

    #[test]
    fn test_root_element_skips_prolog() {
        let doc = Document::parse("<?xml version=\"1.0\"?>\n<!DOCTYPE x><x/>").unwrap();
        let root = doc.root_element_id().unwrap();

        assert_eq!(doc.node_name(root), Some("x"));
        let kinds: Vec<_> = doc
            .children(0)
            .map(|id| doc.get_node(id).unwrap().kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Instruction,
                NodeKind::Text,
                NodeKind::Comment,
                NodeKind::Element
            ]
        );
        let prolog = doc.children(0).next().unwrap();
        assert_eq!(doc.text_content(prolog), Some("xml version=\"1.0\""));
    }

    #[test]
    fn test_display_reproduces_input() {
        let input = concat!(
            "<?xml version=\"1.0\"?><!DOCTYPE html>\n",
            "<html lang=\"en\"><!-- c --><br/><p class='it\"s'>x</p></html>",
        );
        let doc = Document::parse(input).unwrap();

        assert_eq!(doc.to_string(), input);
    }

    #[test]
    fn test_display_deep_nesting() {
        let depth = 200_000;
        let input = "<a>".repeat(depth);
        let doc = Document::parse(&input).unwrap();

        let rendered = doc.to_string();
        assert_eq!(rendered.len(), depth * "<a></a>".len());
        assert!(rendered.starts_with("<a><a>"));
        assert!(rendered.ends_with("</a></a>"));
        assert_eq!(doc.descendants(0).count(), depth);
    }

    #[test]
    fn test_display_siblings_after_nested_element() {
        let input = "<a><b><c/>x</b><!--y--></a><?z?>tail";
        let doc = Document::parse(input).unwrap();

        assert_eq!(doc.to_string(), input);
    }

    #[test]
    fn test_parse_error() {
        assert!(Document::parse("<a></a/>").is_err());
    }
}
