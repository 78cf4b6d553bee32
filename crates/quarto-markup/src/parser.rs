/*
 * parser.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Markup parser that builds [`Node`] trees.

use crate::{Attribute, Child, Error, Node, Result, is_void_element};
use quick_xml::Reader;
use quick_xml::escape::{resolve_html5_entity, resolve_predefined_entity};
use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};

/// Parse a markup fragment into a sequence of top-level children.
///
/// A fragment may hold any number of top-level elements and text leaves.
///
/// # Example
///
/// ```rust
/// use quarto_markup::{parse, Child, Node};
///
/// let tree = parse("<p>Hello<br>world</p>").unwrap();
/// assert_eq!(
///     tree,
///     vec![Child::Element(
///         Node::new("p")
///             .with_text("Hello")
///             .with_child(Node::new("br"))
///             .with_text("world")
///     )]
/// );
/// ```
///
/// # Errors
///
/// Returns an error if the markup is malformed: bad syntax, mismatched or
/// stray end tags, or elements left open at the end of input.
pub fn parse(source: &str) -> Result<Vec<Child>> {
    MarkupParser::new(source).parse()
}

/// Internal parser state.
struct MarkupParser<'a> {
    /// The quick-xml reader.
    reader: Reader<&'a [u8]>,

    /// Elements opened but not yet closed.
    stack: Vec<Node>,

    /// Completed top-level children.
    roots: Vec<Child>,
}

impl<'a> MarkupParser<'a> {
    fn new(source: &'a str) -> Self {
        let mut reader = Reader::from_str(source);
        let config = reader.config_mut();
        config.trim_text_start = false;
        config.trim_text_end = false;
        // Void elements never get an end tag, so end names are matched against
        // our own stack instead of quick-xml's.
        config.check_end_names = false;

        Self {
            reader,
            stack: Vec::new(),
            roots: Vec::new(),
        }
    }

    fn parse(mut self) -> Result<Vec<Child>> {
        loop {
            let event_start = self.reader.buffer_position() as u64;

            match self.reader.read_event() {
                Ok(Event::Start(e)) => {
                    let node = self.open_node(&e, event_start)?;
                    if is_void_element(&node.tag) {
                        self.push_child(Child::Element(node));
                    } else {
                        self.stack.push(node);
                    }
                }
                Ok(Event::End(e)) => self.handle_end(&e, event_start)?,
                Ok(Event::Empty(e)) => {
                    let node = self.open_node(&e, event_start)?;
                    self.push_child(Child::Element(node));
                }
                Ok(Event::Text(e)) => self.handle_text(&e, event_start)?,
                Ok(Event::CData(e)) => self.handle_cdata(&e),
                Ok(Event::Eof) => break,
                Ok(_) => {
                    // Comments, processing instructions, declarations and DOCTYPE
                }
                Err(e) => {
                    return Err(Error::Syntax {
                        message: e.to_string(),
                        position: self.reader.error_position() as u64,
                    });
                }
            }
        }

        if let Some(node) = self.stack.pop() {
            return Err(Error::UnclosedElement { name: node.tag });
        }

        Ok(self.roots)
    }

    fn open_node(&self, e: &BytesStart<'_>, event_start: u64) -> Result<Node> {
        let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();

        let mut attrs = e.html_attributes();
        attrs.with_checks(false);

        let mut attributes = Vec::new();
        for attr in attrs {
            let attr = attr.map_err(|err| Error::Syntax {
                message: format!("Invalid attribute: {}", err),
                position: event_start,
            })?;
            // Values are written back double-quoted, so a `"` from a
            // single-quoted value must become a reference.
            attributes.push(Attribute {
                name: String::from_utf8_lossy(attr.key.as_ref()).into_owned(),
                value: String::from_utf8_lossy(&attr.value).replace('"', "&quot;"),
            });
        }

        Ok(Node {
            tag,
            attributes,
            children: Vec::new(),
        })
    }

    fn handle_end(&mut self, e: &BytesEnd<'_>, event_start: u64) -> Result<()> {
        let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();

        // `</br>` after `<br>`: the void element was already closed
        if is_void_element(&name) {
            return Ok(());
        }

        match self.stack.pop() {
            Some(node) if node.tag == name => {
                self.push_child(Child::Element(node));
                Ok(())
            }
            Some(node) => Err(Error::MismatchedEndTag {
                expected: node.tag,
                found: name,
                position: event_start,
            }),
            None => Err(Error::UnexpectedEndTag {
                name,
                position: event_start,
            }),
        }
    }

    fn handle_text(&mut self, e: &BytesText<'_>, event_start: u64) -> Result<()> {
        let text = e.unescape_with(resolve_entity).map_err(|err| Error::Syntax {
            message: format!("Invalid text content: {}", err),
            position: event_start,
        })?;

        self.push_text(text.into_owned());
        Ok(())
    }

    fn handle_cdata(&mut self, e: &BytesCData<'_>) {
        let text = String::from_utf8_lossy(e.as_ref()).into_owned();
        self.push_text(text);
    }

    fn push_child(&mut self, child: Child) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(child),
            None => self.roots.push(child),
        }
    }

    /// Append text, merging with a directly preceding text leaf.
    fn push_text(&mut self, text: String) {
        if text.is_empty() {
            return;
        }

        let siblings = match self.stack.last_mut() {
            Some(parent) => &mut parent.children,
            None => &mut self.roots,
        };

        match siblings.last_mut() {
            Some(Child::Text(previous)) => previous.push_str(&text),
            _ => siblings.push(Child::Text(text)),
        }
    }
}

fn resolve_entity(entity: &str) -> Option<&'static str> {
    resolve_predefined_entity(entity).or_else(|| resolve_html5_entity(entity))
}
