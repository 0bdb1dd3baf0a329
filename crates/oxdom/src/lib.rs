/*!
A small, mutable XML document object model.

Nodes are allocated in an [`arena::Arena`] and linked to each other through shared
references, so a tree can be read, navigated, and rearranged without any ownership
juggling. Documents can be built from a stream of [`builder::Token`]s, walked with a
[`visitor::Visitor`], and printed back to markup with [`serialize::PrintOptions`].

```
use oxdom::{arena::{Allocator, Arena}, document::Document, serialize::PrintOptions};

# #[cfg(feature = "quick-xml")]
# fn main() -> Result<(), Box<dyn std::error::Error>> {
let arena = Arena::new();
let allocator = Allocator::new(&arena);
let document = Document::parse(r#"<books><book id="1"/></books>"#, allocator)?;

let books = document.root_element().ok_or("no root")?;
let book = books.insert_element_end_child(allocator, "book").ok_or("not inserted")?;
book.set_attribute("id", "2");

assert_eq!(
    document.to_xml_string(&PrintOptions::stream())?,
    r#"<books><book id="1"/><book id="2"/></books>"#,
);
# Ok(())
# }
# #[cfg(not(feature = "quick-xml"))]
# fn main() {}
```
*/
pub mod arena;
pub mod attribute;
pub mod builder;
pub mod document;
pub mod element;
pub mod error;
pub mod escape;
pub mod handle;
pub mod leaf;
pub mod mutation;
pub mod node;
#[cfg(feature = "quick-xml")]
pub mod parse;
pub mod serialize;
pub mod traverse;
pub mod visitor;

/// Returns the version of this library
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
#[ctor::ctor]
fn init_test() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn reports_version() {
    assert_eq!(crate::version(), "1.1.0");
}
