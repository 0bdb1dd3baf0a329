//! Reading [`Token`]s from text with quick-xml.
use std::{collections::VecDeque, io::BufRead, mem, str};

use quick_xml::{
    escape::{unescape, EscapeError},
    events::{BytesStart, Event},
    Reader,
};

use crate::{builder::Token, error::ParseError};

/// What a single quick-xml event contributes to the token stream
enum Piece {
    Element {
        name: String,
        attributes: Vec<(String, String)>,
        empty: bool,
    },
    EndTag(String),
    Text(String),
    Reference(String),
    Token(Token),
    Eof,
}

/// An iterator of the [`Token`]s of some XML text.
///
/// - An empty element tag, like `<a/>`, is a start tag followed by an end tag.
/// - Adjacent text, CDATA sections, and entity or character references are joined into
///   one [`Token::CharData`], with references resolved.
/// - The XML declaration is a processing instruction targeting `xml`.
/// - A doctype is a directive starting with `DOCTYPE`.
/// - Attributes aren't checked for duplicates.
///
/// The iterator ends after the first error.
pub struct Tokenizer<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
    text: String,
    open: Vec<String>,
    queue: VecDeque<Result<Token, ParseError>>,
    done: bool,
}

impl<R: BufRead> Tokenizer<R> {
    /// Creates a tokenizer reading from `reader`
    pub fn new(reader: R) -> Self {
        let mut reader = Reader::from_reader(reader);
        reader.config_mut().trim_text(false);
        Self {
            reader,
            buf: Vec::new(),
            text: String::new(),
            open: Vec::new(),
            queue: VecDeque::new(),
            done: false,
        }
    }

    fn read_piece(&mut self) -> Result<Piece, ParseError> {
        self.buf.clear();
        let piece = match self.reader.read_event_into(&mut self.buf)? {
            Event::Start(start) => start_tag(&start, false)?,
            Event::Empty(start) => start_tag(&start, true)?,
            Event::End(end) => Piece::EndTag(str::from_utf8(end.name().as_ref())?.to_string()),
            Event::Text(text) => Piece::Text(unescape(str::from_utf8(&text)?)?.into_owned()),
            Event::CData(cdata) => Piece::Text(str::from_utf8(&cdata)?.to_string()),
            Event::GeneralRef(reference) => Piece::Reference(str::from_utf8(&reference)?.to_string()),
            Event::Comment(comment) => {
                Piece::Token(Token::Comment(str::from_utf8(&comment)?.to_string()))
            }
            Event::Decl(decl) => {
                let raw = str::from_utf8(&decl)?;
                let instruction = raw.strip_prefix("xml").unwrap_or(raw).trim_start();
                Piece::Token(Token::ProcessingInstruction {
                    target: String::from("xml"),
                    instruction: instruction.to_string(),
                })
            }
            Event::PI(pi) => Piece::Token(Token::ProcessingInstruction {
                target: str::from_utf8(pi.target())?.to_string(),
                instruction: str::from_utf8(pi.content())?.trim_start().to_string(),
            }),
            Event::DocType(doctype) => Piece::Token(Token::Directive(format!(
                "DOCTYPE {}",
                str::from_utf8(&doctype)?.trim_start()
            ))),
            Event::Eof => Piece::Eof,
        };
        Ok(piece)
    }

    /// Reads the next event, queueing whatever tokens it completes
    fn advance(&mut self) {
        let piece = match self.read_piece() {
            Ok(piece) => piece,
            Err(error) => return self.fail(error),
        };
        match piece {
            Piece::Element {
                name,
                attributes,
                empty,
            } => {
                self.flush_text();
                self.queue.push_back(Ok(Token::StartTag {
                    name: name.clone(),
                    attributes,
                }));
                if empty {
                    self.queue.push_back(Ok(Token::EndTag { name }));
                } else {
                    self.open.push(name);
                }
            }
            Piece::EndTag(name) => {
                self.flush_text();
                self.open.pop();
                self.queue.push_back(Ok(Token::EndTag { name }));
            }
            Piece::Text(text) => self.text.push_str(&text),
            Piece::Reference(name) => match unescape(&format!("&{name};")) {
                Ok(resolved) => self.text.push_str(&resolved),
                Err(EscapeError::UnrecognizedEntity(..)) => {
                    self.flush_text();
                    self.queue.push_back(Ok(Token::EntityReference(name)));
                }
                Err(error) => self.fail(error.into()),
            },
            Piece::Token(token) => {
                self.flush_text();
                self.queue.push_back(Ok(token));
            }
            Piece::Eof => {
                self.flush_text();
                self.done = true;
                if let Some(name) = self.open.pop() {
                    self.queue.push_back(Err(ParseError::UnclosedElement { name }));
                }
            }
        }
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let text = mem::take(&mut self.text);
            self.queue.push_back(Ok(Token::CharData(text)));
        }
    }

    fn fail(&mut self, error: ParseError) {
        log::debug!("failed to read xml: {error}");
        self.done = true;
        self.queue.push_back(Err(error));
    }
}

impl<R: BufRead> Iterator for Tokenizer<R> {
    type Item = Result<Token, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.queue.pop_front() {
                return Some(item);
            }
            if self.done {
                return None;
            }
            self.advance();
        }
    }
}

fn start_tag(start: &BytesStart, empty: bool) -> Result<Piece, ParseError> {
    let name = str::from_utf8(start.name().as_ref())?.to_string();
    let mut attributes = Vec::new();
    let mut attrs = start.attributes();
    attrs.with_checks(false);
    for attr in attrs {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let key = str::from_utf8(attr.key.as_ref())?.to_string();
        let value = unescape(str::from_utf8(&attr.value)?)?.into_owned();
        attributes.push((key, value));
    }
    Ok(Piece::Element {
        name,
        attributes,
        empty,
    })
}
