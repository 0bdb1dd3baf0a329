//! Visitors for walking a tree depth first.
use crate::{
    document::Document,
    element::Element,
    leaf::{Comment, Directive, ProcessingInstruction, Text},
    node::{Node, NodeData, Ref},
};

/// A trait for visiting the nodes of a tree in document order.
///
/// Each method returns whether the walk should continue. Every method defaults to
/// `true`, so a visitor only needs to implement the methods it's interested in.
///
/// Returning `false` only stops the walk over the siblings of the current node. See
/// [`Node::accept`] for how the result of the exit hooks decides what happens to the
/// siblings of ancestors.
#[allow(unused_variables)]
pub trait Visitor<'arena> {
    /// Visits the document, before its children.
    ///
    /// Returning `false` skips the document's children.
    fn document(&mut self, document: Document<'arena>) -> bool {
        true
    }

    /// Exits the document, after its children
    fn exit_document(&mut self, document: Document<'arena>) -> bool {
        true
    }

    /// Visits an element, before its children.
    ///
    /// Returning `false` skips the element's children. [`Visitor::exit_element`] is
    /// called regardless.
    fn element(&mut self, element: Element<'arena>) -> bool {
        true
    }

    /// Exits an element, after its children.
    ///
    /// Returning `false` skips the element's following siblings.
    fn exit_element(&mut self, element: Element<'arena>) -> bool {
        true
    }

    /// Visits a text node or CDATA section
    fn text(&mut self, text: Text<'arena>) -> bool {
        true
    }

    /// Visits a comment
    fn comment(&mut self, comment: Comment<'arena>) -> bool {
        true
    }

    /// Visits a processing instruction
    fn processing_instruction(
        &mut self,
        processing_instruction: ProcessingInstruction<'arena>,
    ) -> bool {
        true
    }

    /// Visits a directive, such as a doctype
    fn directive(&mut self, directive: Directive<'arena>) -> bool {
        true
    }
}

impl<'arena> Node<'arena> {
    /// Walks the node and its descendants depth first, in document order.
    ///
    /// A document or element calls its enter hook. If the hook returns `true`, each child
    /// is accepted in turn until one of them returns `false`. The exit hook is then called
    /// whatever happened to the children, and its result is the result of `accept`.
    ///
    /// Other nodes call their hook and return its result.
    ///
    /// The walk keeps its own stack, so deeply nested trees don't exhaust the thread's stack.
    pub fn accept<V>(&'arena self, visitor: &mut V) -> bool
    where
        V: Visitor<'arena> + ?Sized,
    {
        let mut stack = match self.enter(visitor) {
            Entered::Done(result) => return result,
            Entered::Children => vec![Frame::new(self)],
        };
        let mut result = true;
        while let Some(frame) = stack.last_mut() {
            if let Some(child) = frame.next {
                // read before visiting, in case the visitor moves the child
                frame.next = child.next_sibling.get();
                match child.enter(visitor) {
                    Entered::Children => stack.push(Frame::new(child)),
                    Entered::Done(true) => {}
                    Entered::Done(false) => frame.next = None,
                }
            } else {
                let container = frame.container;
                stack.pop();
                result = container.exit(visitor);
                if !result {
                    if let Some(parent) = stack.last_mut() {
                        parent.next = None;
                    }
                }
            }
        }
        result
    }

    /// Calls the node's enter hook, or its only hook when it isn't a container
    fn enter<V>(&'arena self, visitor: &mut V) -> Entered
    where
        V: Visitor<'arena> + ?Sized,
    {
        match &self.node_data {
            NodeData::Document => {
                if visitor.document(Document::new(self)) {
                    Entered::Children
                } else {
                    Entered::Done(self.exit(visitor))
                }
            }
            NodeData::Element { .. } => {
                let element = Element::new(self);
                log::debug!("visiting {element:?}");
                if visitor.element(element) {
                    Entered::Children
                } else {
                    Entered::Done(self.exit(visitor))
                }
            }
            NodeData::Text { .. } => Entered::Done(visitor.text(Text::new(self))),
            NodeData::Comment(_) => Entered::Done(visitor.comment(Comment::new(self))),
            NodeData::PI { .. } => Entered::Done(
                visitor.processing_instruction(ProcessingInstruction::new(self)),
            ),
            NodeData::Directive(_) => Entered::Done(visitor.directive(Directive::new(self))),
        }
    }

    /// Calls the exit hook of a container
    fn exit<V>(&'arena self, visitor: &mut V) -> bool
    where
        V: Visitor<'arena> + ?Sized,
    {
        match &self.node_data {
            NodeData::Document => visitor.exit_document(Document::new(self)),
            NodeData::Element { .. } => {
                let element = Element::new(self);
                log::debug!("exiting {element:?}");
                visitor.exit_element(element)
            }
            _ => true,
        }
    }
}

/// The outcome of entering a node
enum Entered {
    /// The node's children should be visited, followed by its exit hook
    Children,
    /// The node is finished with, and the walk over its siblings continues if `true`
    Done(bool),
}

/// A container whose children are being visited
struct Frame<'arena> {
    container: Ref<'arena>,
    next: Option<Ref<'arena>>,
}

impl<'arena> Frame<'arena> {
    fn new(container: Ref<'arena>) -> Self {
        Self {
            container,
            next: container.first_child.get(),
        }
    }
}
