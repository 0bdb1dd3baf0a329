//! Null-safe navigation through a tree.
use crate::{
    document::Document,
    element::Element,
    leaf::{Comment, Directive, ProcessingInstruction, Text},
    node::Ref,
};

#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
/// Wraps a node that may not exist, so that a chain of navigations can be written without
/// checking each step.
///
/// Navigating from an empty handle returns another empty handle.
///
/// ```
/// use oxdom::{arena::{Allocator, Arena}, handle::Handle};
///
/// let arena = Arena::new();
/// let allocator = Allocator::new(&arena);
/// let root = allocator.element("root");
///
/// let missing = Handle::from(*root).first_child_element("a").next().parent().to_node();
/// assert!(missing.is_none());
/// ```
pub struct Handle<'arena>(Option<Ref<'arena>>);

impl<'arena> Handle<'arena> {
    /// Creates a handle of the given node
    pub fn new(node: Option<Ref<'arena>>) -> Self {
        Self(node)
    }

    /// Returns a handle of the node's parent
    #[must_use]
    pub fn parent(self) -> Self {
        Self(self.0.and_then(|node| node.parent()))
    }

    /// Returns a handle of the node's first child
    #[must_use]
    pub fn first_child(self) -> Self {
        Self(self.0.and_then(|node| node.first_child()))
    }

    /// Returns a handle of the node's last child
    #[must_use]
    pub fn last_child(self) -> Self {
        Self(self.0.and_then(|node| node.last_child()))
    }

    /// Returns a handle of the node's previous sibling
    #[must_use]
    pub fn prev(self) -> Self {
        Self(self.0.and_then(|node| node.prev()))
    }

    /// Returns a handle of the node's next sibling
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.and_then(|node| node.next()))
    }

    /// Returns a handle of the node's first child element named `name`, or any element
    /// when `name` is empty
    #[must_use]
    pub fn first_child_element(self, name: &str) -> Self {
        Self(
            self.0
                .and_then(|node| node.first_child_element(name))
                .map(Element::as_node),
        )
    }

    /// Returns a handle of the node's last child element named `name`, or any element
    /// when `name` is empty
    #[must_use]
    pub fn last_child_element(self, name: &str) -> Self {
        Self(
            self.0
                .and_then(|node| node.last_child_element(name))
                .map(Element::as_node),
        )
    }

    /// Returns a handle of the closest preceding sibling element named `name`, or any
    /// element when `name` is empty
    #[must_use]
    pub fn prev_element(self, name: &str) -> Self {
        Self(
            self.0
                .and_then(|node| node.prev_element(name))
                .map(Element::as_node),
        )
    }

    /// Returns a handle of the closest following sibling element named `name`, or any
    /// element when `name` is empty
    #[must_use]
    pub fn next_element(self, name: &str) -> Self {
        Self(
            self.0
                .and_then(|node| node.next_element(name))
                .map(Element::as_node),
        )
    }

    /// Returns the wrapped node
    pub fn to_node(self) -> Option<Ref<'arena>> {
        self.0
    }

    /// Returns the wrapped node as an element
    pub fn to_element(self) -> Option<Element<'arena>> {
        self.0?.to_element()
    }

    /// Returns the wrapped node as a text node
    pub fn to_text(self) -> Option<Text<'arena>> {
        self.0?.to_text()
    }

    /// Returns the wrapped node as a comment
    pub fn to_comment(self) -> Option<Comment<'arena>> {
        self.0?.to_comment()
    }

    /// Returns the wrapped node as a document
    pub fn to_document(self) -> Option<Document<'arena>> {
        self.0?.to_document()
    }

    /// Returns the wrapped node as a processing instruction
    pub fn to_processing_instruction(self) -> Option<ProcessingInstruction<'arena>> {
        self.0?.to_processing_instruction()
    }

    /// Returns the wrapped node as a directive
    pub fn to_directive(self) -> Option<Directive<'arena>> {
        self.0?.to_directive()
    }
}

impl<'arena> From<Ref<'arena>> for Handle<'arena> {
    fn from(node: Ref<'arena>) -> Self {
        Self(Some(node))
    }
}

impl<'arena> From<Option<Ref<'arena>>> for Handle<'arena> {
    fn from(node: Option<Ref<'arena>>) -> Self {
        Self(node)
    }
}
