//! The arena used to allocate nodes
use crate::{
    attribute::Attribute,
    document::Document,
    element::Element,
    leaf::{Comment, Directive, ProcessingInstruction, Text},
    node::{Node, NodeData},
};
use std::cell::{Cell, RefCell};

/// An arena for [`Node`] values
///
/// Nodes are never freed individually. Nodes deleted from a tree stay allocated until
/// the arena is dropped, which lets them be re-inserted.
pub struct Arena<'arena>(typed_arena::Arena<Node<'arena>>);

impl Arena<'_> {
    /// Returns an empty arena
    pub fn new() -> Self {
        Self(typed_arena::Arena::new())
    }

    /// Returns an empty arena with space for `n` nodes before reallocating
    pub fn with_capacity(n: usize) -> Self {
        Self(typed_arena::Arena::with_capacity(n))
    }

    /// The number of nodes allocated so far
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing has been allocated yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Arena<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
/// The allocator for adding new nodes that live as long as the arena
///
/// Every node created by the allocator starts unattached: it has no parent, no
/// siblings, and no children.
pub struct Allocator<'arena> {
    arena: &'arena typed_arena::Arena<Node<'arena>>,
}

impl<'arena> Allocator<'arena> {
    /// Creates an allocator for the given arena.
    pub fn new(arena: &'arena Arena<'arena>) -> Self {
        Self { arena: &arena.0 }
    }

    /// Allocates a node with the given [`NodeData`]
    pub fn alloc(&self, node_data: NodeData) -> &'arena Node<'arena> {
        // `len` counts every node allocated before this one, so ids stay unique per arena
        let id = self.arena.len();
        self.arena.alloc(Node::new(node_data, id))
    }

    /// Allocates a new document with no children
    pub fn document(&self) -> Document<'arena> {
        Document::new(self.alloc(NodeData::Document))
    }

    /// Allocates an element named `name` with no attributes
    pub fn element(&self, name: impl Into<String>) -> Element<'arena> {
        Element::new(self.alloc(NodeData::Element {
            name: RefCell::new(name.into()),
            attrs: RefCell::new(Vec::<Attribute>::new()),
        }))
    }

    /// Allocates a text node. The node is not a CDATA section until [`Text::set_cdata`] is called.
    pub fn text(&self, content: impl Into<String>) -> Text<'arena> {
        Text::new(self.alloc(NodeData::Text {
            content: RefCell::new(content.into()),
            cdata: Cell::new(false),
        }))
    }

    /// Allocates a comment
    pub fn comment(&self, body: impl Into<String>) -> Comment<'arena> {
        Comment::new(self.alloc(NodeData::Comment(RefCell::new(body.into()))))
    }

    /// Allocates a processing instruction, such as `<?xml-stylesheet href="style.css"?>`
    pub fn processing_instruction(
        &self,
        target: impl Into<String>,
        instruction: impl Into<String>,
    ) -> ProcessingInstruction<'arena> {
        ProcessingInstruction::new(self.alloc(NodeData::PI {
            target: RefCell::new(target.into()),
            instruction: RefCell::new(instruction.into()),
        }))
    }

    /// Allocates a directive, such as the `DOCTYPE html` of `<!DOCTYPE html>`
    pub fn directive(&self, body: impl Into<String>) -> Directive<'arena> {
        Directive::new(self.alloc(NodeData::Directive(RefCell::new(body.into()))))
    }
}
