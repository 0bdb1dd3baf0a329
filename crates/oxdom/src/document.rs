//! XML document types.
use crate::{
    element::Element,
    node::{NodeData, Ref},
};

#[derive(Clone, Copy, PartialEq, Eq, Debug, derive_more::Deref)]
/// The root container of a tree.
///
/// A document never has a parent or siblings. A document built from tokens has
/// exactly one element child, its root element.
pub struct Document<'arena> {
    node: Ref<'arena>,
}

impl<'arena> Document<'arena> {
    pub(crate) fn new(node: Ref<'arena>) -> Self {
        debug_assert!(matches!(node.node_data, NodeData::Document));
        Self { node }
    }

    /// Returns the document as a generic node
    pub fn as_node(self) -> Ref<'arena> {
        self.node
    }

    /// Returns the first element child of the document
    pub fn root_element(&self) -> Option<Element<'arena>> {
        self.node.first_child_element("")
    }
}

#[cfg(test)]
mod tests {
    use crate::arena::{Allocator, Arena};

    #[test]
    fn root_element() {
        let arena = Arena::new();
        let allocator = Allocator::new(&arena);
        let document = allocator.document();
        assert!(document.root_element().is_none());

        document.insert_end_child(*allocator.comment("comment"));
        assert!(document.root_element().is_none());

        let root = allocator.element("root");
        document.insert_end_child(*root);
        assert_eq!(document.root_element(), Some(root));
        assert_eq!(document.document(), Some(document));
        assert_eq!(root.document(), Some(document));
    }
}
