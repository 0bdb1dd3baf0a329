//! Typed views of the nodes that don't contain other nodes in a well-formed document.
use crate::node::{NodeData, Ref};

#[derive(Clone, Copy, PartialEq, Eq, Debug, derive_more::Deref)]
/// A text node, which may be printed as a CDATA section
pub struct Text<'arena> {
    node: Ref<'arena>,
}

impl<'arena> Text<'arena> {
    pub(crate) fn new(node: Ref<'arena>) -> Self {
        debug_assert!(matches!(node.node_data, NodeData::Text { .. }));
        Self { node }
    }

    /// Returns the text as a generic node
    pub fn as_node(self) -> Ref<'arena> {
        self.node
    }

    /// Whether the text is printed as `<![CDATA[...]]>` instead of escaped text
    pub fn cdata(&self) -> bool {
        match &self.node.node_data {
            NodeData::Text { cdata, .. } => cdata.get(),
            _ => false,
        }
    }

    /// Changes how the text is printed. The content of the text is left as is.
    pub fn set_cdata(&self, is_cdata: bool) {
        if let NodeData::Text { cdata, .. } = &self.node.node_data {
            cdata.set(is_cdata);
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, derive_more::Deref)]
/// A comment node, such as `<!-- foo -->`
pub struct Comment<'arena> {
    node: Ref<'arena>,
}

impl<'arena> Comment<'arena> {
    pub(crate) fn new(node: Ref<'arena>) -> Self {
        debug_assert!(matches!(node.node_data, NodeData::Comment(_)));
        Self { node }
    }

    /// Returns the comment as a generic node
    pub fn as_node(self) -> Ref<'arena> {
        self.node
    }

    /// The body of the comment, between `<!--` and `-->`
    pub fn comment(&self) -> String {
        self.node.value()
    }

    /// Replaces the body of the comment
    pub fn set_comment(&self, comment: impl Into<String>) {
        self.node.set_value(comment);
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, derive_more::Deref)]
/// A processing instruction, such as `<?xml version="1.0"?>`
pub struct ProcessingInstruction<'arena> {
    node: Ref<'arena>,
}

impl<'arena> ProcessingInstruction<'arena> {
    pub(crate) fn new(node: Ref<'arena>) -> Self {
        debug_assert!(matches!(node.node_data, NodeData::PI { .. }));
        Self { node }
    }

    /// Returns the processing instruction as a generic node
    pub fn as_node(self) -> Ref<'arena> {
        self.node
    }

    /// The application the instruction is for, such as `xml` of `<?xml version="1.0"?>`
    pub fn target(&self) -> String {
        self.node.value()
    }

    /// The data of the instruction, such as `version="1.0"` of `<?xml version="1.0"?>`
    pub fn instruction(&self) -> String {
        match &self.node.node_data {
            NodeData::PI { instruction, .. } => instruction.borrow().clone(),
            _ => String::new(),
        }
    }

    /// Replaces the data of the instruction
    pub fn set_instruction(&self, value: impl Into<String>) {
        if let NodeData::PI { instruction, .. } = &self.node.node_data {
            *instruction.borrow_mut() = value.into();
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, derive_more::Deref)]
/// A markup declaration, such as `<!DOCTYPE html>`. The value excludes the `<!` and `>`.
pub struct Directive<'arena> {
    node: Ref<'arena>,
}

impl<'arena> Directive<'arena> {
    pub(crate) fn new(node: Ref<'arena>) -> Self {
        debug_assert!(matches!(node.node_data, NodeData::Directive(_)));
        Self { node }
    }

    /// Returns the directive as a generic node
    pub fn as_node(self) -> Ref<'arena> {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{
        arena::{Allocator, Arena},
        serialize::PrintOptions,
    };

    #[test]
    fn cdata_only_changes_printing() -> anyhow::Result<()> {
        let arena = Arena::new();
        let allocator = Allocator::new(&arena);
        let element = allocator.element("node");
        element.set_text(allocator, "a < b");

        let text = element.first_child().and_then(|c| c.to_text());
        let text = text.ok_or_else(|| anyhow::anyhow!("expected text"))?;
        assert!(!text.cdata());
        insta::assert_snapshot!(
            element.to_xml_string(&PrintOptions::stream())?,
            @"<node>a &lt; b</node>"
        );

        text.set_cdata(true);
        assert!(text.cdata());
        assert_eq!(text.value(), "a < b");
        assert_eq!(element.text(), "a < b");
        insta::assert_snapshot!(
            element.to_xml_string(&PrintOptions::stream())?,
            @"<node><![CDATA[a < b]]></node>"
        );
        Ok(())
    }

    #[test]
    fn comment() {
        let arena = Arena::new();
        let allocator = Allocator::new(&arena);
        let comment = allocator.comment(" note ");

        assert_eq!(comment.comment(), " note ");
        comment.set_comment("changed");
        assert_eq!(comment.value(), "changed");
    }

    #[test]
    fn processing_instruction() {
        let arena = Arena::new();
        let allocator = Allocator::new(&arena);
        let pi = allocator.processing_instruction("xml-stylesheet", r#"href="a.css""#);

        assert_eq!(pi.target(), "xml-stylesheet");
        assert_eq!(pi.value(), "xml-stylesheet");
        assert_eq!(pi.instruction(), r#"href="a.css""#);
        pi.set_instruction(r#"href="b.css""#);
        assert_eq!(pi.instruction(), r#"href="b.css""#);
    }
}
