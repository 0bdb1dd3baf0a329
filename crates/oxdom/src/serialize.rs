//! Printing a tree as markup.
use std::{
    io::{self, Write},
    ops::ControlFlow,
};

use crate::{
    attribute::Attribute,
    document::Document,
    element::Element,
    error::PrintError,
    escape,
    leaf::{Comment, Directive, ProcessingInstruction, Text},
    node::Node,
    visitor::Visitor,
};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
/// Options for how a tree is printed.
pub struct PrintOptions {
    /// The unit of indentation written for each level of nesting.
    ///
    /// When set, every node after the first starts on a new line, even when the
    /// indent is empty. When `None`, nodes are written one after the other.
    ///
    /// # Examples
    ///
    /// `None`
    ///
    /// ```text
    /// <books><book>Hello</book></books>
    /// ```
    ///
    /// `Some("  ")`
    ///
    /// ```text
    /// <books>
    ///   <book>
    ///     Hello
    ///   </book>
    /// </books>
    /// ```
    ///
    /// Default: `None`
    pub indent: Option<String>,
    /// The width that long text would be wrapped at.
    ///
    /// This is reserved and has no effect on the output.
    pub text_wrap_width: usize,
}

impl PrintOptions {
    /// Options for human readable output, indented by four spaces
    pub fn pretty() -> Self {
        Self {
            indent: Some(String::from("    ")),
            text_wrap_width: 200,
        }
    }

    /// Options for compact output, without any whitespace between nodes
    pub fn stream() -> Self {
        Self {
            indent: None,
            text_wrap_width: 0,
        }
    }
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self::stream()
    }
}

/// A visitor that writes the nodes it visits as markup.
///
/// A failure to write stops the walk, and is returned by [`Printer::finish`].
pub struct Printer<'o, W: Write> {
    writer: W,
    options: &'o PrintOptions,
    level: usize,
    first_print: bool,
    error: Option<io::Error>,
}

impl<'o, W: Write> Printer<'o, W> {
    /// Creates a printer that writes to `writer`
    pub fn new(writer: W, options: &'o PrintOptions) -> Self {
        Self {
            writer,
            options,
            level: 0,
            first_print: true,
            error: None,
        }
    }

    /// Returns the writer once printing is done.
    ///
    /// # Errors
    /// If writing any of the visited nodes failed
    pub fn finish(self) -> Result<W, PrintError> {
        match self.error {
            Some(error) => Err(PrintError::Io(error)),
            None => Ok(self.writer),
        }
    }

    /// Runs `f` unless a previous write failed, storing its error and stopping the walk
    /// if it fails
    fn print(&mut self, f: impl FnOnce(&mut Self) -> io::Result<()>) -> bool {
        if self.error.is_some() {
            return false;
        }
        match f(self) {
            Ok(()) => true,
            Err(error) => {
                log::debug!("failed to print: {error}");
                self.error = Some(error);
                false
            }
        }
    }

    fn indent_space(&mut self) -> io::Result<()> {
        if let Some(indent) = &self.options.indent {
            if !self.first_print {
                self.writer.write_all(b"\n")?;
            }
            for _ in 0..self.level {
                self.writer.write_all(indent.as_bytes())?;
            }
        }
        self.first_print = false;
        Ok(())
    }

    fn start_element(&mut self, element: Element<'_>) -> io::Result<()> {
        self.indent_space()?;
        self.level += 1;

        self.writer.write_all(b"<")?;
        self.writer.write_all(element.name().as_bytes())?;
        let writer = &mut self.writer;
        let attributes = element.for_each_attribute(|attr| match write_attribute(writer, attr) {
            Ok(()) => ControlFlow::Continue(()),
            Err(error) => ControlFlow::Break(error),
        });
        if let ControlFlow::Break(error) = attributes {
            return Err(error);
        }

        if element.no_children() {
            self.level -= 1;
            self.writer.write_all(b"/>")
        } else {
            self.writer.write_all(b">")
        }
    }

    fn end_element(&mut self, element: Element<'_>) -> io::Result<()> {
        if element.no_children() {
            return Ok(());
        }
        self.level -= 1;
        self.indent_space()?;
        self.writer.write_all(b"</")?;
        self.writer.write_all(element.name().as_bytes())?;
        self.writer.write_all(b">")
    }
}

fn write_attribute<W: Write>(writer: &mut W, attr: &Attribute) -> io::Result<()> {
    writer.write_all(b" ")?;
    writer.write_all(attr.name().as_bytes())?;
    writer.write_all(b"=\"")?;
    escape::write_attribute(writer, attr.value())?;
    writer.write_all(b"\"")
}

impl<'arena, W: Write> Visitor<'arena> for Printer<'_, W> {
    fn exit_document(&mut self, _document: Document<'arena>) -> bool {
        self.print(|_| Ok(()))
    }

    fn element(&mut self, element: Element<'arena>) -> bool {
        self.print(|printer| printer.start_element(element))
    }

    fn exit_element(&mut self, element: Element<'arena>) -> bool {
        self.print(|printer| printer.end_element(element))
    }

    fn text(&mut self, text: Text<'arena>) -> bool {
        self.print(|printer| {
            printer.indent_space()?;
            if text.cdata() {
                printer.writer.write_all(b"<![CDATA[")?;
                printer.writer.write_all(text.value().as_bytes())?;
                printer.writer.write_all(b"]]>")
            } else {
                escape::write_text(&mut printer.writer, &text.value())
            }
        })
    }

    fn comment(&mut self, comment: Comment<'arena>) -> bool {
        self.print(|printer| {
            printer.indent_space()?;
            printer.writer.write_all(b"<!--")?;
            printer.writer.write_all(comment.comment().as_bytes())?;
            printer.writer.write_all(b"-->")
        })
    }

    fn processing_instruction(&mut self, pi: ProcessingInstruction<'arena>) -> bool {
        self.print(|printer| {
            printer.indent_space()?;
            printer.writer.write_all(b"<?")?;
            printer.writer.write_all(pi.target().as_bytes())?;
            printer.writer.write_all(b" ")?;
            printer.writer.write_all(pi.instruction().as_bytes())?;
            printer.writer.write_all(b"?>")
        })
    }

    fn directive(&mut self, directive: Directive<'arena>) -> bool {
        self.print(|printer| {
            printer.indent_space()?;
            printer.writer.write_all(b"<!")?;
            escape::write_text(&mut printer.writer, &directive.value())?;
            printer.writer.write_all(b">")
        })
    }
}

impl<'arena> Node<'arena> {
    /// Writes the node and its descendants to `writer` as markup
    ///
    /// # Errors
    /// If the writer fails
    pub fn print<W: Write + ?Sized>(
        &'arena self,
        writer: &mut W,
        options: &PrintOptions,
    ) -> Result<(), PrintError> {
        let mut printer = Printer::new(writer, options);
        self.accept(&mut printer);
        printer.finish()?;
        Ok(())
    }

    /// Returns the node and its descendants as markup
    ///
    /// # Errors
    /// If the printer fails to write, which doesn't happen for an in-memory buffer
    pub fn to_xml_string(&'arena self, options: &PrintOptions) -> Result<String, PrintError> {
        let mut buf = Vec::new();
        self.print(&mut buf, options)?;
        Ok(String::from_utf8(buf)?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::{self, Write};

    use pretty_assertions::assert_eq;

    use super::PrintOptions;
    use crate::{
        arena::{Allocator, Arena},
        document::Document,
        error::PrintError,
    };

    /// `<?xml version="1.0" encoding="UTF-8"?><!--comment1--><!DOCTYPE poem><node ...>...</node>`
    fn poem<'arena>(allocator: Allocator<'arena>) -> Document<'arena> {
        let document = allocator.document();
        document.insert_end_child(
            *allocator.processing_instruction("xml", r#"version="1.0" encoding="UTF-8""#),
        );
        document.insert_end_child(*allocator.comment("comment1"));
        document.insert_end_child(*allocator.directive("DOCTYPE poem"));
        let node = allocator.element("node");
        document.insert_end_child(*node);
        node.set_attribute("attr1", "value1");
        node.set_attribute("attr2", "value2");
        if let Some(elem) = node.insert_element_end_child(allocator, "elem") {
            elem.insert_end_child(*allocator.comment("comment2"));
        }
        if let Some(greeting) = node.insert_element_end_child(allocator, "str") {
            greeting.set_text(allocator, "Hello world");
        }
        node.insert_element_end_child(allocator, "hello");
        document
    }

    #[test]
    fn print_deeply_nested() -> anyhow::Result<()> {
        const DEPTH: usize = 100_000;

        let arena = Arena::new();
        let allocator = Allocator::new(&arena);
        let document = allocator.document();
        let mut parent = *document;
        for _ in 0..DEPTH {
            let child = allocator.element("a");
            parent.insert_end_child(*child);
            parent = *child;
        }

        let expected = format!("{}<a/>{}", "<a>".repeat(DEPTH - 1), "</a>".repeat(DEPTH - 1));
        assert!(document.to_xml_string(&PrintOptions::stream())? == expected);
        Ok(())
    }

    #[test]
    fn stream() -> anyhow::Result<()> {
        let arena = Arena::new();
        let allocator = Allocator::new(&arena);
        let document = poem(allocator);

        insta::assert_snapshot!(
            document.to_xml_string(&PrintOptions::stream())?,
            @r#"<?xml version="1.0" encoding="UTF-8"?><!--comment1--><!DOCTYPE poem><node attr1="value1" attr2="value2"><elem><!--comment2--></elem><str>Hello world</str><hello/></node>"#
        );
        assert_eq!(PrintOptions::default(), PrintOptions::stream());
        Ok(())
    }

    #[test]
    fn pretty() -> anyhow::Result<()> {
        let arena = Arena::new();
        let allocator = Allocator::new(&arena);
        let document = poem(allocator);

        assert_eq!(
            document.to_xml_string(&PrintOptions::pretty())?,
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!--comment1-->
<!DOCTYPE poem>
<node attr1="value1" attr2="value2">
    <elem>
        <!--comment2-->
    </elem>
    <str>
        Hello world
    </str>
    <hello/>
</node>"#
        );
        Ok(())
    }

    #[test]
    fn empty_indent_still_breaks_lines() -> anyhow::Result<()> {
        let arena = Arena::new();
        let allocator = Allocator::new(&arena);
        let element = allocator.element("a");
        element.insert_element_end_child(allocator, "b");

        let options = PrintOptions {
            indent: Some(String::new()),
            ..PrintOptions::stream()
        };
        assert_eq!(element.to_xml_string(&options)?, "<a>\n<b/>\n</a>");
        Ok(())
    }

    #[test]
    fn escapes() -> anyhow::Result<()> {
        let arena = Arena::new();
        let allocator = Allocator::new(&arena);
        let element = allocator.element("elem");
        element.set_attribute("attr", "\"&<\n\r'>");
        element.set_text(allocator, "\"&<\n\r'>");
        element.insert_end_child(*allocator.directive("DOCTYPE <&"));
        element.insert_end_child(*allocator.comment(" <&> "));

        assert_eq!(
            element.to_xml_string(&PrintOptions::stream())?,
            "<elem attr=\"&quot;&amp;&lt;&#xA;&#xD;'>\">\"&amp;&lt;\n\r'><!DOCTYPE &lt;&amp;><!-- <&> --></elem>"
        );
        Ok(())
    }

    #[test]
    fn processing_instruction_always_separates_target() -> anyhow::Result<()> {
        let arena = Arena::new();
        let allocator = Allocator::new(&arena);
        let pi = allocator.processing_instruction("target", "");
        insta::assert_snapshot!(pi.to_xml_string(&PrintOptions::stream())?, @"<?target ?>");
        Ok(())
    }

    /// Accepts a fixed number of bytes before failing
    struct Limited {
        remaining: usize,
        failures: usize,
    }

    impl Write for Limited {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if buf.len() > self.remaining {
                self.failures += 1;
                return Err(io::Error::other("limit reached"));
            }
            self.remaining -= buf.len();
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn stops_at_write_failure() {
        let arena = Arena::new();
        let allocator = Allocator::new(&arena);
        let document = poem(allocator);

        let mut sink = Limited {
            remaining: 50,
            failures: 0,
        };
        let result = document.print(&mut sink, &PrintOptions::stream());
        assert!(matches!(result, Err(PrintError::Io(_))));
        assert_eq!(sink.failures, 1);
    }
}
