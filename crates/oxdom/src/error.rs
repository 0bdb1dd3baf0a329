//! Error types.
use thiserror::Error;

/// An error while building a document from tokens
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum BuildError {
    /// An element started after the root element was closed
    #[error("multiple root elements, found `<{name}>` after the root element")]
    MultipleRootElements {
        /// The name of the second top-level element
        name: String,
    },
    /// A start tag had two attributes with the same name
    #[error("duplicate attribute `{name}`")]
    DuplicateAttribute {
        /// The name of the repeated attribute
        name: String,
    },
    /// Character data that isn't whitespace appeared outside the root element
    #[error("text outside of the root element")]
    TextOutsideRoot,
    /// The tokens ended without ever starting an element
    #[error("missing root element")]
    MissingRootElement,
    /// An end tag appeared with no element left to close
    #[error("end tag `</{name}>` has no matching start tag")]
    UnmatchedEndTag {
        /// The name of the end tag
        name: String,
    },
    /// A token that can't be represented in a document
    #[error("unsupported token {0}")]
    UnsupportedToken(String),
}

/// An error while parsing text into a document
#[cfg(feature = "quick-xml")]
#[derive(Debug, Error)]
pub enum ParseError {
    /// The text isn't well-formed XML
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),
    /// An entity or character reference couldn't be resolved
    #[error(transparent)]
    Escape(#[from] quick_xml::escape::EscapeError),
    /// The text isn't valid UTF-8
    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),
    /// The text ended before an element was closed
    #[error("unclosed element `<{name}>`")]
    UnclosedElement {
        /// The name of the innermost element still open
        name: String,
    },
    /// The reader failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The tokens don't make a valid document
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// An error while printing a document
#[derive(Debug, Error)]
pub enum PrintError {
    /// The writer failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The printed text couldn't be collected into a string
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}
