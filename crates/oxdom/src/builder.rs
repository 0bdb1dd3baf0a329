//! Building a document from a stream of tokens.
use crate::{
    arena::Allocator,
    document::Document,
    error::BuildError,
    node::{Ref, Type},
};

#[derive(Debug, Clone, PartialEq, Eq)]
/// A lexical unit of XML, as produced by a tokenizer.
pub enum Token {
    /// A start tag, such as `<a href="#">`. Attributes are in the order they're
    /// declared, and may repeat.
    StartTag {
        /// The name of the tag
        name: String,
        /// The unescaped name/value pairs of the tag's attributes
        attributes: Vec<(String, String)>,
    },
    /// An end tag, such as `</a>`
    EndTag {
        /// The name of the tag
        name: String,
    },
    /// Unescaped character data, including the content of CDATA sections
    CharData(String),
    /// The body of a comment
    Comment(String),
    /// A processing instruction or XML declaration
    ProcessingInstruction {
        /// The application the instruction is for
        target: String,
        /// Data for the application
        instruction: String,
    },
    /// The body of a markup declaration, such as `DOCTYPE html`
    Directive(String),
    /// A reference to an entity the tokenizer couldn't resolve, such as `nbsp` of `&nbsp;`
    EntityReference(String),
}

/// Grows a document from tokens, checking that they make a well-formed document.
///
/// ```
/// use oxdom::{arena::{Allocator, Arena}, builder::{Builder, Token}};
///
/// let arena = Arena::new();
/// let mut builder = Builder::new(Allocator::new(&arena));
/// builder.push(Token::StartTag { name: "root".into(), attributes: vec![] }).unwrap();
/// builder.push(Token::EndTag { name: "root".into() }).unwrap();
///
/// let document = builder.finish().unwrap();
/// assert_eq!(document.root_element().map(|root| root.name()).as_deref(), Some("root"));
/// ```
pub struct Builder<'arena> {
    allocator: Allocator<'arena>,
    document: Document<'arena>,
    current: Ref<'arena>,
    root_seen: bool,
}

impl<'arena> Builder<'arena> {
    /// Creates a builder for a new, empty document
    pub fn new(allocator: Allocator<'arena>) -> Self {
        let document = allocator.document();
        Self {
            allocator,
            document,
            current: document.as_node(),
            root_seen: false,
        }
    }

    /// Adds the token to the document.
    ///
    /// # Errors
    /// If the token would make the document malformed
    pub fn push(&mut self, token: Token) -> Result<(), BuildError> {
        log::trace!("building with {token:?}");
        let result = self.push_token(token);
        if let Err(error) = &result {
            log::debug!("failed to build document: {error}");
        }
        result
    }

    fn push_token(&mut self, token: Token) -> Result<(), BuildError> {
        match token {
            Token::StartTag { name, attributes } => {
                let at_document = self.current.node_type() == Type::Document;
                if at_document && self.root_seen {
                    return Err(BuildError::MultipleRootElements { name });
                }
                let element = self.allocator.element(name);
                for (name, value) in attributes {
                    if element.find_attribute(&name).is_some() {
                        return Err(BuildError::DuplicateAttribute { name });
                    }
                    element.set_attribute(name, value);
                }
                self.append(element.as_node());
                self.root_seen |= at_document;
                self.current = element.as_node();
            }
            Token::EndTag { name } => {
                self.current = self
                    .current
                    .parent()
                    .ok_or(BuildError::UnmatchedEndTag { name })?;
            }
            Token::CharData(content) => {
                if content.trim().is_empty() {
                    return Ok(());
                }
                if self.current.node_type() == Type::Document {
                    return Err(BuildError::TextOutsideRoot);
                }
                self.append(self.allocator.text(content).as_node());
            }
            Token::Comment(body) => self.append(self.allocator.comment(body).as_node()),
            Token::ProcessingInstruction {
                target,
                instruction,
            } => self.append(
                self.allocator
                    .processing_instruction(target, instruction)
                    .as_node(),
            ),
            Token::Directive(body) => self.append(self.allocator.directive(body).as_node()),
            Token::EntityReference(name) => {
                return Err(BuildError::UnsupportedToken(format!("&{name};")));
            }
        }
        Ok(())
    }

    fn append(&self, node: Ref<'arena>) {
        // new nodes are unattached, so they can always be appended
        self.current.insert_end_child(node);
    }

    /// Returns the built document.
    ///
    /// # Errors
    /// If the document has no root element
    pub fn finish(self) -> Result<Document<'arena>, BuildError> {
        if self.document.root_element().is_none() {
            log::debug!("failed to build document: no root element");
            return Err(BuildError::MissingRootElement);
        }
        Ok(self.document)
    }
}

/// Builds a document from a sequence of tokens
///
/// # Errors
/// If the tokens don't make a well-formed document
pub fn build<'arena, I>(
    tokens: I,
    allocator: Allocator<'arena>,
) -> Result<Document<'arena>, BuildError>
where
    I: IntoIterator<Item = Token>,
{
    let mut builder = Builder::new(allocator);
    for token in tokens {
        builder.push(token)?;
    }
    builder.finish()
}
