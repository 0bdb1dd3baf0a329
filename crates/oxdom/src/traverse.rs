//! Navigation of a node's parent, siblings, and children.
use crate::{
    element::Element,
    node::{Node, Ref},
};

impl<'arena> Node<'arena> {
    /// Returns the node's parent
    pub fn parent(&self) -> Option<Ref<'arena>> {
        self.parent.get()
    }

    /// Returns the first child in the node's tree
    pub fn first_child(&self) -> Option<Ref<'arena>> {
        self.first_child.get()
    }

    /// Returns the last child in the node's tree
    pub fn last_child(&self) -> Option<Ref<'arena>> {
        self.last_child.get()
    }

    /// Returns the node immediately preceding itself from the parent's list of children
    pub fn prev(&self) -> Option<Ref<'arena>> {
        self.previous_sibling.get()
    }

    /// Returns the node immediately following itself from the parent's list of children
    pub fn next(&self) -> Option<Ref<'arena>> {
        self.next_sibling.get()
    }

    /// Returns whether the node's list of children is empty
    pub fn no_children(&self) -> bool {
        self.first_child.get().is_none()
    }

    /// Returns an iterator over the node's children, in order
    pub fn children(&self) -> ChildNodes<'arena> {
        ChildNodes {
            front: self.first_child(),
            end: self.last_child(),
        }
    }

    /// Returns the first child element with the given name. An empty name matches any element.
    pub fn first_child_element(&self, name: &str) -> Option<Element<'arena>> {
        self.children().find_map(|child| named_element(child, name))
    }

    /// Returns the last child element with the given name. An empty name matches any element.
    pub fn last_child_element(&self, name: &str) -> Option<Element<'arena>> {
        self.children()
            .rev()
            .find_map(|child| named_element(child, name))
    }

    /// Returns the closest preceding sibling element with the given name. An empty name
    /// matches any element.
    pub fn prev_element(&self, name: &str) -> Option<Element<'arena>> {
        let mut sibling = self.prev();
        while let Some(current) = sibling {
            if let Some(element) = named_element(current, name) {
                return Some(element);
            }
            sibling = current.prev();
        }
        None
    }

    /// Returns the closest following sibling element with the given name. An empty name
    /// matches any element.
    pub fn next_element(&self, name: &str) -> Option<Element<'arena>> {
        let mut sibling = self.next();
        while let Some(current) = sibling {
            if let Some(element) = named_element(current, name) {
                return Some(element);
            }
            sibling = current.next();
        }
        None
    }
}

fn named_element<'arena>(node: Ref<'arena>, name: &str) -> Option<Element<'arena>> {
    let element = node.to_element()?;
    (name.is_empty() || element.name() == name).then_some(element)
}

/// An iterator over the children of a node, which can be walked from either end
pub struct ChildNodes<'arena> {
    front: Option<Ref<'arena>>,
    end: Option<Ref<'arena>>,
}

impl<'arena> Iterator for ChildNodes<'arena> {
    type Item = Ref<'arena>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.front?;
        if self.end.is_some_and(|end| end.ptr_eq(current)) {
            self.front = None;
            self.end = None;
        } else {
            self.front = current.next_sibling.get();
        }
        Some(current)
    }
}

impl DoubleEndedIterator for ChildNodes<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let current = self.end?;
        if self.front.is_some_and(|front| front.ptr_eq(current)) {
            self.front = None;
            self.end = None;
        } else {
            self.end = current.previous_sibling.get();
        }
        Some(current)
    }
}
