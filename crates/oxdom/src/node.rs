//! XML node types.
use std::{
    cell::{Cell, RefCell},
    fmt::Debug,
};

use crate::{
    attribute::Attribute,
    document::Document,
    element::Element,
    leaf::{Comment, Directive, ProcessingInstruction, Text},
};

/// A reference to a node
pub type Ref<'arena> = &'arena Node<'arena>;
/// A settable reference to a node
pub type Link<'arena> = Cell<Option<Ref<'arena>>>;

#[derive(PartialEq, Eq, Clone, Copy, Debug)]
/// An enum which specifies the type of node.
///
/// [MDN | nodeType](https://developer.mozilla.org/en-US/docs/Web/API/Node/nodeType)
pub enum Type {
    /// The root container of a tree
    Document,
    /// An [Element] node like `<p>` or `<div>`
    Element,
    /// The actual text inside an element, which may be a CDATA section such as
    /// `<![CDATA[ ... ]]>`
    Text,
    /// A `Comment` node, such as `<!-- ... -->`
    Comment,
    /// A `ProcessingInstruction` of an XML document, such as `<?xml-stylesheet ... ?>`
    ProcessingInstruction,
    /// A markup declaration such as `<!DOCTYPE html>`
    Directive,
}

#[derive(derive_more::Debug)]
/// The data of a node in an XML document.
pub enum NodeData {
    /// The document.
    Document,
    /// An element. (e.g. `<a href="#">hello</a>`)
    Element {
        /// The name of the element's tag.
        name: RefCell<String>,
        /// The attributes of the element, in the order they were set.
        attrs: RefCell<Vec<Attribute>>,
    },
    /// A text node. (e.g. `foo` of `<p>foo</p>`)
    Text {
        /// The unescaped character content
        content: RefCell<String>,
        /// Whether the content is printed as a CDATA section
        cdata: Cell<bool>,
    },
    /// A comment node. (e.g. `<!-- foo -->`)
    Comment(RefCell<String>),
    /// A processing instruction. (e.g. `<?xml version="1.0"?>`)
    PI {
        /// The name of the application to which the instruction is targeted
        target: RefCell<String>,
        /// Data for the application
        instruction: RefCell<String>,
    },
    /// A directive. (e.g. `DOCTYPE html` of `<!DOCTYPE html>`)
    Directive(RefCell<String>),
}

/// An XML node.
///
/// Nodes are only ever handled through a [`Ref`] to a node allocated by an
/// [`crate::arena::Allocator`]. Equality is identity: two references are equal when
/// they point at the same allocation.
pub struct Node<'arena> {
    /// The node's parent.
    pub(crate) parent: Link<'arena>,
    /// The node after this of the node's parent's children
    pub(crate) next_sibling: Link<'arena>,
    /// The node before this of the node's parent's children
    pub(crate) previous_sibling: Link<'arena>,
    /// The node's first child.
    pub(crate) first_child: Link<'arena>,
    /// The node's last child.
    pub(crate) last_child: Link<'arena>,
    /// The node's type and associated data.
    pub node_data: NodeData,
    id: usize,
}

impl<'arena> Node<'arena> {
    pub(crate) fn new(node_data: NodeData, id: usize) -> Self {
        Self {
            parent: Cell::new(None),
            next_sibling: Cell::new(None),
            previous_sibling: Cell::new(None),
            first_child: Cell::new(None),
            last_child: Cell::new(None),
            node_data,
            id,
        }
    }

    /// An id unique among the nodes of the arena this node was allocated in
    pub fn id(&self) -> usize {
        self.id
    }

    /// Returns an enum that identifies what the node is.
    pub fn node_type(&self) -> Type {
        match &self.node_data {
            NodeData::Document => Type::Document,
            NodeData::Element { .. } => Type::Element,
            NodeData::Text { .. } => Type::Text,
            NodeData::Comment(_) => Type::Comment,
            NodeData::PI { .. } => Type::ProcessingInstruction,
            NodeData::Directive(_) => Type::Directive,
        }
    }

    /// Whether the underlying pointer is at the same address as the other
    pub fn ptr_eq(&self, other: &Node<'_>) -> bool {
        self.as_ptr_byte() == other.as_ptr_byte()
    }

    /// The raw pointer address to the data
    pub fn as_ptr_byte(&self) -> usize {
        &raw const *self as usize
    }

    /// Returns the value of the node. What the value holds depends on the type of node.
    ///
    /// | Type | Value |
    /// |------|-------|
    /// | Document | an empty string |
    /// | Element | the tag name |
    /// | Text | the character content |
    /// | Comment | the comment's body |
    /// | `ProcessingInstruction` | the target |
    /// | Directive | the directive's body |
    pub fn value(&self) -> String {
        match &self.node_data {
            NodeData::Document => String::new(),
            NodeData::Element { name: value, .. }
            | NodeData::Text { content: value, .. }
            | NodeData::Comment(value)
            | NodeData::PI { target: value, .. }
            | NodeData::Directive(value) => value.borrow().clone(),
        }
    }

    /// Replaces the value of the node. Does nothing for documents.
    pub fn set_value(&self, value: impl Into<String>) {
        match &self.node_data {
            NodeData::Document => {}
            NodeData::Element { name: current, .. }
            | NodeData::Text {
                content: current, ..
            }
            | NodeData::Comment(current)
            | NodeData::PI {
                target: current, ..
            }
            | NodeData::Directive(current) => *current.borrow_mut() = value.into(),
        }
    }

    /// Downcasts self as a document
    pub fn to_document(&'arena self) -> Option<Document<'arena>> {
        matches!(self.node_data, NodeData::Document).then(|| Document::new(self))
    }

    /// Downcasts self as an element
    pub fn to_element(&'arena self) -> Option<Element<'arena>> {
        matches!(self.node_data, NodeData::Element { .. }).then(|| Element::new(self))
    }

    /// Downcasts self as a text node
    pub fn to_text(&'arena self) -> Option<Text<'arena>> {
        matches!(self.node_data, NodeData::Text { .. }).then(|| Text::new(self))
    }

    /// Downcasts self as a comment
    pub fn to_comment(&'arena self) -> Option<Comment<'arena>> {
        matches!(self.node_data, NodeData::Comment(_)).then(|| Comment::new(self))
    }

    /// Downcasts self as a processing instruction
    pub fn to_processing_instruction(&'arena self) -> Option<ProcessingInstruction<'arena>> {
        matches!(self.node_data, NodeData::PI { .. }).then(|| ProcessingInstruction::new(self))
    }

    /// Downcasts self as a directive
    pub fn to_directive(&'arena self) -> Option<Directive<'arena>> {
        matches!(self.node_data, NodeData::Directive(_)).then(|| Directive::new(self))
    }

    /// Returns the document at the root of the tree containing this node.
    ///
    /// A document is its own document. Nodes that are unattached, or that belong to a
    /// subtree which has been split from its document, have no document.
    pub fn document(&'arena self) -> Option<Document<'arena>> {
        let mut current: Ref<'arena> = self;
        while let Some(parent) = current.parent.get() {
            current = parent;
        }
        current.to_document()
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Node<'_> {}

impl Debug for Ref<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let data = &self.node_data;
        let mut child = self.first_child.get();
        let mut child_len = 0;
        while let Some(current_child) = child {
            child_len += 1;
            child = current_child.next_sibling.get();
        }
        f.write_fmt(format_args!(
            "Node {{
    id: {}
    data: {data:?}
    children: {child_len}
}}",
            self.id
        ))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::Type;
    use crate::arena::{Allocator, Arena};

    #[test]
    fn exactly_one_downcast_succeeds() {
        let arena = Arena::new();
        let allocator = Allocator::new(&arena);
        let nodes = [
            *allocator.document(),
            *allocator.element("a"),
            *allocator.text("b"),
            *allocator.comment("c"),
            *allocator.processing_instruction("d", "e"),
            *allocator.directive("f"),
        ];

        for node in nodes {
            let successes = [
                node.to_document().is_some(),
                node.to_element().is_some(),
                node.to_text().is_some(),
                node.to_comment().is_some(),
                node.to_processing_instruction().is_some(),
                node.to_directive().is_some(),
            ]
            .into_iter()
            .filter(|success| *success)
            .count();
            assert_eq!(successes, 1, "{node:?}");
        }
        assert_eq!(nodes[4].node_type(), Type::ProcessingInstruction);
    }

    #[test]
    fn value_depends_on_type() {
        let arena = Arena::new();
        let allocator = Allocator::new(&arena);

        assert_eq!(allocator.document().value(), "");
        assert_eq!(allocator.element("node").value(), "node");
        assert_eq!(allocator.text(" text ").value(), " text ");
        assert_eq!(allocator.processing_instruction("xml", "version").value(), "xml");

        let comment = allocator.comment("before");
        comment.set_value("after");
        assert_eq!(comment.value(), "after");

        let document = allocator.document();
        document.set_value("ignored");
        assert_eq!(document.value(), "");
    }

    #[test]
    fn equality_is_identity() {
        let arena = Arena::new();
        let allocator = Allocator::new(&arena);

        let a = allocator.element("same");
        let b = allocator.element("same");
        assert_ne!(a, b);
        assert_eq!(*a, *a.to_element().expect("is element"));
    }
}
