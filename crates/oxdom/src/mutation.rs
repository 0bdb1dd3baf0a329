//! Moving, inserting, and removing nodes.
//!
//! Inserting a node that is already in a tree moves it: it's split from its old parent
//! first, keeping its own children. Insertions that would break the tree return `None`
//! and leave every node as it was, namely when
//!
//! - the node is a document,
//! - the node is the new parent or one of its ancestors, or
//! - the reference node isn't a child of the parent.
use crate::{
    arena::Allocator,
    element::Element,
    node::{Node, Ref, Type},
};

impl<'arena> Node<'arena> {
    /// Detaches the node from its parent and siblings. The node keeps its children, so it
    /// can be inserted elsewhere as a whole subtree.
    pub fn split(&'arena self) -> Ref<'arena> {
        if let Some(parent) = self.parent.get() {
            parent.unlink(self);
        }
        self
    }

    /// Appends `node` as the last child, moving it from its previous position
    pub fn insert_end_child(&'arena self, node: Ref<'arena>) -> Option<Ref<'arena>> {
        if !self.can_adopt(node) {
            return None;
        }
        node.split();
        log::trace!("inserting {node:?} as last child of {self:?}");

        node.parent.set(Some(self));
        if let Some(last_child) = self.last_child.get() {
            // last -> node -> None
            last_child.next_sibling.set(Some(node));
            node.previous_sibling.set(Some(last_child));
        } else {
            // None -> node -> None
            self.first_child.set(Some(node));
        }
        self.last_child.set(Some(node));
        Some(node)
    }

    /// Prepends `node` as the first child, moving it from its previous position
    pub fn insert_first_child(&'arena self, node: Ref<'arena>) -> Option<Ref<'arena>> {
        if !self.can_adopt(node) {
            return None;
        }
        node.split();
        log::trace!("inserting {node:?} as first child of {self:?}");

        node.parent.set(Some(self));
        if let Some(first_child) = self.first_child.get() {
            // None -> node -> first
            first_child.previous_sibling.set(Some(node));
            node.next_sibling.set(Some(first_child));
        } else {
            // None -> node -> None
            self.last_child.set(Some(node));
        }
        self.first_child.set(Some(node));
        Some(node)
    }

    /// Inserts `node` immediately after `after`, which must be a child of this node
    pub fn insert_after_child(
        &'arena self,
        after: Ref<'arena>,
        node: Ref<'arena>,
    ) -> Option<Ref<'arena>> {
        if !self.is_parent_of(after) || !self.can_adopt(node) {
            return None;
        }
        if after.ptr_eq(node) {
            return Some(node);
        }
        node.split();

        let Some(next) = after.next_sibling.get() else {
            return self.insert_end_child(node);
        };
        log::trace!("inserting {node:?} after {after:?}");
        // after -> node -> next
        node.parent.set(Some(self));
        node.previous_sibling.set(Some(after));
        node.next_sibling.set(Some(next));
        after.next_sibling.set(Some(node));
        next.previous_sibling.set(Some(node));
        Some(node)
    }

    /// Inserts `node` immediately before `before`, which must be a child of this node
    pub fn insert_before_child(
        &'arena self,
        before: Ref<'arena>,
        node: Ref<'arena>,
    ) -> Option<Ref<'arena>> {
        if !self.is_parent_of(before) || !self.can_adopt(node) {
            return None;
        }
        if before.ptr_eq(node) {
            return Some(node);
        }
        node.split();

        let Some(prev) = before.previous_sibling.get() else {
            return self.insert_first_child(node);
        };
        log::trace!("inserting {node:?} before {before:?}");
        // prev -> node -> before
        node.parent.set(Some(self));
        node.previous_sibling.set(Some(prev));
        node.next_sibling.set(Some(before));
        prev.next_sibling.set(Some(node));
        before.previous_sibling.set(Some(node));
        Some(node)
    }

    /// Inserts `node` as the next sibling. Fails when this node has no parent, which is
    /// always the case for a document.
    pub fn insert_back(&'arena self, node: Ref<'arena>) -> Option<Ref<'arena>> {
        self.parent.get()?.insert_after_child(self, node)
    }

    /// Inserts `node` as the previous sibling. Fails when this node has no parent, which
    /// is always the case for a document.
    pub fn insert_front(&'arena self, node: Ref<'arena>) -> Option<Ref<'arena>> {
        self.parent.get()?.insert_before_child(self, node)
    }

    /// Creates an element and appends it as the last child
    pub fn insert_element_end_child(
        &'arena self,
        allocator: Allocator<'arena>,
        name: impl Into<String>,
    ) -> Option<Element<'arena>> {
        let element = allocator.element(name);
        self.insert_end_child(*element)?;
        Some(element)
    }

    /// Creates an element and prepends it as the first child
    pub fn insert_element_first_child(
        &'arena self,
        allocator: Allocator<'arena>,
        name: impl Into<String>,
    ) -> Option<Element<'arena>> {
        let element = allocator.element(name);
        self.insert_first_child(*element)?;
        Some(element)
    }

    /// Creates an element and inserts it as the next sibling
    pub fn insert_element_back(
        &'arena self,
        allocator: Allocator<'arena>,
        name: impl Into<String>,
    ) -> Option<Element<'arena>> {
        let parent = self.parent.get()?;
        let element = allocator.element(name);
        parent.insert_after_child(self, *element)?;
        Some(element)
    }

    /// Creates an element and inserts it as the previous sibling
    pub fn insert_element_front(
        &'arena self,
        allocator: Allocator<'arena>,
        name: impl Into<String>,
    ) -> Option<Element<'arena>> {
        let parent = self.parent.get()?;
        let element = allocator.element(name);
        parent.insert_before_child(self, *element)?;
        Some(element)
    }

    /// Removes `node` from this node's children, returning it. Returns `None` if `node`
    /// isn't a child of this node.
    pub fn delete_child(&self, node: Ref<'arena>) -> Option<Ref<'arena>> {
        if !self.is_parent_of(node) {
            return None;
        }
        self.unlink(node);
        Some(node)
    }

    /// Removes all the node's children
    pub fn delete_children(&self) {
        self.last_child.set(None);
        let mut child = self.first_child.take();
        while let Some(current) = child {
            child = current.next_sibling.take();
            current.previous_sibling.set(None);
            current.parent.set(None);
        }
    }

    fn is_parent_of(&self, node: Ref<'arena>) -> bool {
        node.parent.get().is_some_and(|parent| parent.ptr_eq(self))
    }

    /// Whether `node` can become a child without creating a cycle
    fn can_adopt(&'arena self, node: Ref<'arena>) -> bool {
        if node.node_type() == Type::Document {
            log::debug!("cannot insert a document into another node");
            return false;
        }
        // a childless node can't be an ancestor
        let mut ancestor = if node.no_children() {
            Some(self).filter(|current| current.ptr_eq(node))
        } else {
            Some(self)
        };
        while let Some(current) = ancestor {
            if current.ptr_eq(node) {
                log::debug!("cannot insert {node:?} into itself");
                return false;
            }
            ancestor = current.parent.get();
        }
        true
    }

    /// Removes `child` from the list of children, clearing its parent and siblings
    fn unlink(&self, child: Ref<'arena>) {
        log::trace!("unlinking {child:?}");
        let previous_sibling = child.previous_sibling.take();
        let next_sibling = child.next_sibling.take();
        child.parent.set(None);

        if let Some(previous_sibling) = previous_sibling {
            previous_sibling.next_sibling.set(next_sibling);
        } else {
            self.first_child.set(next_sibling);
        }
        if let Some(next_sibling) = next_sibling {
            next_sibling.previous_sibling.set(previous_sibling);
        } else {
            self.last_child.set(previous_sibling);
        }
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Context;
    use pretty_assertions::assert_eq;

    use crate::{
        arena::{Allocator, Arena},
        node::Ref,
        serialize::PrintOptions,
    };

    /// Checks that walking both directions of the children agrees with the links
    fn assert_linked(parent: Ref) {
        let forward: Vec<_> = parent.children().collect();
        let mut backward: Vec<_> = parent.children().rev().collect();
        backward.reverse();
        assert_eq!(forward, backward);

        assert!(parent.first_child().is_none_or(|first| first.prev().is_none()));
        assert!(parent.last_child().is_none_or(|last| last.next().is_none()));
        for child in forward {
            assert_eq!(child.parent(), Some(parent));
            assert_linked(child);
        }
    }

    #[test]
    fn inserts() -> anyhow::Result<()> {
        let arena = Arena::new();
        let allocator = Allocator::new(&arena);
        let document = allocator.document();

        let elem1 = document
            .insert_end_child(*allocator.element("elem1"))
            .context("elem1")?;
        let elem2 = elem1
            .insert_first_child(*allocator.element("elem2"))
            .context("elem2")?;
        let elem3 = elem2
            .insert_front(*allocator.element("elem3"))
            .context("elem3")?;
        let elem4 = elem3
            .insert_back(*allocator.element("elem4"))
            .context("elem4")?;
        let elem5 = elem4
            .insert_element_front(allocator, "elem5")
            .context("elem5")?;
        let elem6 = elem5
            .insert_element_back(allocator, "elem6")
            .context("elem6")?;
        let elem7 = elem6
            .insert_element_end_child(allocator, "elem7")
            .context("elem7")?;
        let elem8 = elem7
            .insert_element_first_child(allocator, "elem8")
            .context("elem8")?;
        let elem9 = elem8
            .insert_end_child(*allocator.element("elem9"))
            .context("elem9")?;
        elem9
            .insert_back(*allocator.element("elem10"))
            .context("elem10")?;

        assert_linked(*document);
        insta::assert_snapshot!(
            document.to_xml_string(&PrintOptions::stream())?,
            @"<elem1><elem3/><elem5/><elem6><elem7><elem8><elem9/><elem10/></elem8></elem7></elem6><elem4/><elem2/></elem1>"
        );
        Ok(())
    }

    #[test]
    fn insert_moves_node() {
        let arena = Arena::new();
        let allocator = Allocator::new(&arena);
        let a = allocator.element("a");
        let b = allocator.element("b");
        let x = allocator.element("x");
        x.insert_end_child(*allocator.element("child"));

        a.insert_end_child(*x);
        assert_eq!(x.parent(), Some(*a));

        assert_eq!(b.insert_end_child(*x), Some(*x));
        assert!(a.first_child().is_none());
        assert!(a.last_child().is_none());
        assert_eq!(b.last_child(), Some(*x));
        assert_eq!(x.first_child_element("child").map(|c| c.name()).as_deref(), Some("child"));
        assert_linked(*a);
        assert_linked(*b);
    }

    #[test]
    fn reorders_within_parent() {
        let arena = Arena::new();
        let allocator = Allocator::new(&arena);
        let parent = allocator.element("p");
        let a = parent.insert_element_end_child(allocator, "a");
        let b = parent.insert_element_end_child(allocator, "b");
        let c = parent.insert_element_end_child(allocator, "c");
        let (Some(a), Some(b), Some(c)) = (a, b, c) else {
            panic!("insertions into an unattached element succeed");
        };

        parent.insert_after_child(*c, *a);
        assert_linked(*parent);
        parent.insert_before_child(*b, *c);
        assert_linked(*parent);
        assert_eq!(parent.insert_after_child(*b, *b), Some(*b));
        assert_linked(*parent);

        let names: Vec<_> = parent.children().map(|child| child.value()).collect();
        assert_eq!(names, ["c", "b", "a"]);
    }

    #[test]
    fn rejected_insertions() {
        let arena = Arena::new();
        let allocator = Allocator::new(&arena);
        let document = allocator.document();
        let root = allocator.element("root");
        document.insert_end_child(*root);
        let child = allocator.element("child");
        root.insert_end_child(*child);
        let stranger = allocator.element("stranger");

        // a document never has siblings
        assert_eq!(document.insert_back(*allocator.element("elem1")), None);
        assert_eq!(document.insert_front(*allocator.element("elem2")), None);
        assert_eq!(document.insert_element_back(allocator, "elem3"), None);
        assert_eq!(document.insert_element_front(allocator, "elem4"), None);
        // or a parent
        assert_eq!(root.insert_end_child(*allocator.document()), None);
        // the reference must be a child
        assert_eq!(root.insert_after_child(*stranger, *allocator.element("x")), None);
        assert_eq!(root.insert_before_child(*document, *allocator.element("x")), None);
        // no cycles
        assert_eq!(child.insert_end_child(*root), None);
        assert_eq!(child.insert_first_child(*child), None);

        assert_eq!(document.children().count(), 1);
        assert_eq!(root.children().count(), 1);
        assert_linked(*document);
    }

    #[test]
    fn split() -> anyhow::Result<()> {
        let arena = Arena::new();
        let allocator = Allocator::new(&arena);
        let document = allocator.document();
        document.insert_end_child(*allocator.comment(" comment1 "));
        let node1 = document
            .insert_element_end_child(allocator, "node1")
            .context("node1")?;
        node1.insert_element_end_child(allocator, "node2");

        let other = allocator.document();
        let node3 = other
            .insert_element_end_child(allocator, "node3")
            .context("node3")?;
        node3.insert_end_child(*allocator.comment(" comment3 "));
        other.insert_end_child(*allocator.comment(" yyy "));

        let split = node1.split();
        assert_eq!(split, *node1);
        assert!(node1.parent().is_none());
        assert!(node1.document().is_none());
        assert!(node1.next().is_none() && node1.prev().is_none());
        assert_eq!(node1.children().count(), 1);

        document.insert_end_child(*other.last_child_element("").context("node3")?);
        assert_eq!(node3.document(), Some(document));
        assert_linked(*document);
        assert_linked(*other);
        insta::assert_snapshot!(
            document.to_xml_string(&PrintOptions::stream())?,
            @"<!-- comment1 --><node3><!-- comment3 --></node3>"
        );
        insta::assert_snapshot!(
            other.to_xml_string(&PrintOptions::stream())?,
            @"<!-- yyy -->"
        );
        Ok(())
    }

    #[test]
    fn delete() {
        let arena = Arena::new();
        let allocator = Allocator::new(&arena);
        let parent = allocator.element("p");
        let a = allocator.element("a");
        let b = allocator.element("b");
        let c = allocator.element("c");
        for node in [a, b, c] {
            parent.insert_end_child(*node);
        }

        assert_eq!(parent.delete_child(*allocator.element("x")), None);
        assert_eq!(parent.delete_child(*b), Some(*b));
        assert!(b.parent().is_none());
        assert_eq!(a.next(), Some(*c));
        assert_eq!(c.prev(), Some(*a));
        assert_linked(*parent);

        // deleted nodes can be used again
        a.insert_back(*b);
        assert_eq!(parent.children().count(), 3);

        parent.delete_children();
        assert!(parent.no_children());
        assert!(parent.last_child().is_none());
        for node in [a, b, c] {
            assert!(node.parent().is_none());
            assert!(node.next().is_none() && node.prev().is_none());
        }
    }
}
