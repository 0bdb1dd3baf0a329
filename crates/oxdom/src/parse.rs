//! Parsing XML text into a document, using quick-xml.
use std::io::BufRead;

use crate::{arena::Allocator, builder::Builder, document::Document, error::ParseError};

mod tokenizer;

pub use tokenizer::Tokenizer;

/// Parses the text of `reader` into a document allocated by `allocator`.
///
/// # Errors
/// If the text isn't a well-formed document
pub fn parse_reader<'arena, R: BufRead>(
    reader: R,
    allocator: Allocator<'arena>,
) -> Result<Document<'arena>, ParseError> {
    let mut builder = Builder::new(allocator);
    for token in Tokenizer::new(reader) {
        builder.push(token?)?;
    }
    Ok(builder.finish()?)
}

impl<'arena> Document<'arena> {
    /// Parses `source` into a document allocated by `allocator`.
    ///
    /// # Errors
    /// If the text isn't a well-formed document
    pub fn parse(source: &str, allocator: Allocator<'arena>) -> Result<Self, ParseError> {
        parse_reader(source.as_bytes(), allocator)
    }
}
