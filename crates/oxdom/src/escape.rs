//! Escaping of attribute values and character data.
//!
//! | Character | Attribute | Text |
//! |-----------|-----------|------|
//! | `&` | `&amp;` | `&amp;` |
//! | `<` | `&lt;` | `&lt;` |
//! | `"` | `&quot;` | `"` |
//! | line feed | `&#xA;` | line feed |
//! | carriage return | `&#xD;` | carriage return |
//!
//! Characters that XML doesn't allow are replaced with `U+FFFD`. Everything else is
//! written as is.
use std::io::{self, Write};

#[derive(Clone, Copy, PartialEq, Debug)]
enum Escape {
    AttributeValue,
    Text,
}

/// Writes an attribute's value, for use between double quotes
///
/// # Errors
/// If the writer fails
pub fn write_attribute<W: Write + ?Sized>(writer: &mut W, value: &str) -> io::Result<()> {
    write_escaped(writer, value, Escape::AttributeValue)
}

/// Writes character data, such as the content of a text node
///
/// # Errors
/// If the writer fails
pub fn write_text<W: Write + ?Sized>(writer: &mut W, text: &str) -> io::Result<()> {
    write_escaped(writer, text, Escape::Text)
}

/// Whether `char` is allowed anywhere in an XML document
///
/// [XML | Char](https://www.w3.org/TR/xml/#NT-Char)
pub fn is_xml_char(char: char) -> bool {
    matches!(
        char,
        '\t' | '\n'
            | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

fn write_escaped<W: Write + ?Sized>(writer: &mut W, s: &str, escape: Escape) -> io::Result<()> {
    let mut part_start_pos = 0;
    for (char_pos, char) in s.char_indices() {
        let escaped_char = match char {
            '&' => Some("&amp;"),
            '<' => Some("&lt;"),
            '"' if escape == Escape::AttributeValue => Some("&quot;"),
            '\n' if escape == Escape::AttributeValue => Some("&#xA;"),
            '\r' if escape == Escape::AttributeValue => Some("&#xD;"),
            char if !is_xml_char(char) => Some("\u{FFFD}"),
            _ => None,
        };
        if let Some(escaped_char) = escaped_char {
            writer.write_all(s[part_start_pos..char_pos].as_bytes())?;
            writer.write_all(escaped_char.as_bytes())?;
            part_start_pos = char_pos + char.len_utf8();
        }
    }
    writer.write_all(s[part_start_pos..].as_bytes())
}
