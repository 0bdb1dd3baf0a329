//! XML element attributes
use std::{
    cell::{self, RefCell, RefMut},
    fmt::Debug,
    ops::ControlFlow,
};

#[derive(PartialEq, Eq, Clone, Debug)]
/// The attribute of an element's attributes.
pub struct Attribute {
    /// The name of an attribute (e.g. `foo` of `foo="bar"`)
    name: String,
    /// The unescaped value of an attribute (e.g. `bar` of `foo="bar"`)
    value: String,
}

impl Attribute {
    /// Creates an attribute that doesn't belong to an element yet
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// The attribute's name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The attribute's value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Replaces the attribute's value in place
    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

#[derive(Clone, Copy)]
/// The list of attributes of an element.
///
/// Attributes keep the order they were first set in, and no two attributes share a name.
pub struct Attributes<'arena>(pub(crate) &'arena RefCell<Vec<Attribute>>);

impl<'arena> Attributes<'arena> {
    /// Returns the number of attributes in the list
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// Returns whether the list has no attributes
    pub fn is_empty(&self) -> bool {
        self.0.borrow().is_empty()
    }

    /// Returns the attribute at the given position
    pub fn item(&self, index: usize) -> Option<cell::Ref<'arena, Attribute>> {
        cell::Ref::filter_map(self.0.borrow(), |v| v.get(index)).ok()
    }

    /// Returns the attribute with the given name
    pub fn get_named_item(&self, name: &str) -> Option<cell::Ref<'arena, Attribute>> {
        cell::Ref::filter_map(self.0.borrow(), |v| v.iter().find(|a| a.name == name)).ok()
    }

    /// Returns the attribute with the given name, for modification
    pub fn get_named_item_mut(&self, name: &str) -> Option<RefMut<'arena, Attribute>> {
        RefMut::filter_map(self.0.borrow_mut(), |v| {
            v.iter_mut().find(|a| a.name == name)
        })
        .ok()
    }

    /// Sets the attribute with the given name to `value`, appending it to the list if
    /// it isn't already present. Returns the attribute as it now is.
    pub fn set_named_item(
        &self,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> RefMut<'arena, Attribute> {
        let name = name.into();
        let value = value.into();
        if let Some(mut attr) = self.get_named_item_mut(&name) {
            attr.value = value;
            return attr;
        }
        let mut attrs = self.0.borrow_mut();
        let index = attrs.len();
        attrs.push(Attribute { name, value });
        RefMut::map(attrs, |attrs| &mut attrs[index])
    }

    /// Removes the attribute with the given name, returning it if present
    pub fn remove_named_item(&self, name: &str) -> Option<Attribute> {
        let mut attrs = self.0.borrow_mut();
        let index = attrs.iter().position(|a| a.name == name)?;
        Some(attrs.remove(index))
    }

    /// Removes every attribute
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }

    /// Calls `f` on each attribute in order, stopping at the first [`ControlFlow::Break`]
    /// and returning it.
    ///
    /// The list is borrowed while `f` runs, so `f` must not modify the element's attributes.
    /// See [`crate::element::Element::for_each_attribute`] for a version that can.
    pub fn try_for_each<B, F>(&self, f: F) -> ControlFlow<B>
    where
        F: FnMut(&Attribute) -> ControlFlow<B>,
    {
        self.0.borrow().iter().try_for_each(f)
    }

    /// Returns a snapshot of the attributes, in order
    pub fn to_vec(&self) -> Vec<Attribute> {
        self.0.borrow().clone()
    }
}

impl Debug for Attributes<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Attributes { ")?;
        self.0
            .borrow()
            .iter()
            .try_for_each(|a| f.write_fmt(format_args!(r#"{}="{}" "#, a.name, a.value)))?;
        f.write_str("}")
    }
}
