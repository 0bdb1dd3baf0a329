//! XML element types.
use std::{cell::RefMut, ops::ControlFlow};

use crate::{
    arena::Allocator,
    attribute::{Attribute, Attributes},
    node::{NodeData, Ref},
};

#[derive(Clone, Copy, PartialEq, Eq, Debug, derive_more::Deref)]
/// An XML element type.
///
/// Dereferences to the underlying [`crate::node::Node`], so every node operation is
/// available on an element.
pub struct Element<'arena> {
    node: Ref<'arena>,
}

impl<'arena> Element<'arena> {
    pub(crate) fn new(node: Ref<'arena>) -> Self {
        debug_assert!(matches!(node.node_data, NodeData::Element { .. }));
        Self { node }
    }

    /// Returns the element as a generic node
    pub fn as_node(self) -> Ref<'arena> {
        self.node
    }

    /// The element's tag name. The same as [`crate::node::Node::value`].
    pub fn name(&self) -> String {
        self.node.value()
    }

    /// Renames the element's tag. The same as [`crate::node::Node::set_value`].
    pub fn set_name(&self, name: impl Into<String>) {
        self.node.set_value(name);
    }

    /// Returns the ordered list of attributes of the element
    pub fn attributes(&self) -> Attributes<'arena> {
        if let NodeData::Element { attrs, .. } = &self.node.node_data {
            Attributes(attrs)
        } else {
            unreachable!("Element contains non-element data. This is a bug!")
        }
    }

    /// Returns the number of attributes on the element
    pub fn attribute_count(&self) -> usize {
        self.attributes().len()
    }

    /// Returns a copy of the attribute with the given name
    pub fn find_attribute(&self, name: &str) -> Option<Attribute> {
        self.attributes().get_named_item(name).map(|attr| attr.clone())
    }

    /// Returns the value of the attribute with the given name, or `default` when the
    /// element has no such attribute
    pub fn attribute(&self, name: &str, default: &str) -> String {
        self.attributes()
            .get_named_item(name)
            .map_or_else(|| default.to_string(), |attr| attr.value().to_string())
    }

    /// Sets the value of an attribute, adding it after the existing attributes when
    /// it isn't present yet.
    ///
    /// The returned attribute borrows the element's attributes until it's dropped.
    pub fn set_attribute(
        &self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> RefMut<'arena, Attribute> {
        self.attributes().set_named_item(name, value)
    }

    /// Removes the attribute with the given name, returning it if present
    pub fn delete_attribute(&self, name: &str) -> Option<Attribute> {
        self.attributes().remove_named_item(name)
    }

    /// Removes every attribute of the element
    pub fn clear_attributes(&self) {
        self.attributes().clear();
    }

    /// Calls `f` with each attribute in order. The first [`ControlFlow::Break`] returned
    /// by `f` ends the enumeration and is returned.
    ///
    /// `f` sees the attributes as they were when the enumeration started, and may modify
    /// the element's attributes as it goes.
    pub fn for_each_attribute<B, F>(&self, f: F) -> ControlFlow<B>
    where
        F: FnMut(&Attribute) -> ControlFlow<B>,
    {
        self.attributes().to_vec().iter().try_for_each(f)
    }

    /// Returns the content of the first child when it's a text node, otherwise an
    /// empty string.
    pub fn text(&self) -> String {
        self.node
            .first_child()
            .and_then(|child| child.to_text())
            .map(|text| text.value())
            .unwrap_or_default()
    }

    /// Replaces the content of the first child when it's a text node, otherwise inserts
    /// a new text node before all the other children.
    pub fn set_text(&self, allocator: Allocator<'arena>, text: impl Into<String>) {
        if let Some(first) = self.node.first_child().and_then(|child| child.to_text()) {
            first.set_value(text);
        } else {
            self.node.insert_first_child(*allocator.text(text));
        }
    }
}
