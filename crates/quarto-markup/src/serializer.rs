/*
 * serializer.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Serializer that writes [`Node`] trees back to markup.

use std::borrow::Cow;

use crate::{Child, Error, Node, Result, is_void_element};
use quick_xml::Writer;
use quick_xml::escape::partial_escape;
use quick_xml::events::attributes::Attribute as XmlAttribute;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;

/// Serialize a sequence of children to a markup string.
///
/// Text leaves are escaped. Attribute values are written verbatim since
/// they are already markup-ready. Void elements without children are
/// written self-closing; every other element gets an explicit end tag,
/// so `<div/>` in the source comes back as `<div></div>`.
///
/// # Example
///
/// ```rust
/// use quarto_markup::{serialize, Child, Node};
///
/// let tree = vec![Child::Element(Node::new("p").with_text("a < b"))];
/// assert_eq!(serialize(&tree).unwrap(), "<p>a &lt; b</p>");
/// ```
pub fn serialize(tree: &[Child]) -> Result<String> {
    let mut writer = Writer::new(Vec::new());

    for child in tree {
        write_child(&mut writer, child)?;
    }

    String::from_utf8(writer.into_inner()).map_err(|e| Error::Write {
        message: e.to_string(),
    })
}

fn write_child(writer: &mut Writer<Vec<u8>>, child: &Child) -> Result<()> {
    match child {
        Child::Text(text) => write_event(
            writer,
            Event::Text(BytesText::from_escaped(partial_escape(text.as_str()))),
        ),
        Child::Element(node) => write_node(writer, node),
    }
}

fn write_node(writer: &mut Writer<Vec<u8>>, node: &Node) -> Result<()> {
    let mut start = BytesStart::new(node.tag.as_str());
    for attr in &node.attributes {
        start.push_attribute(XmlAttribute {
            key: QName(attr.name.as_bytes()),
            value: Cow::Borrowed(attr.value.as_bytes()),
        });
    }

    if node.children.is_empty() && is_void_element(&node.tag) {
        return write_event(writer, Event::Empty(start));
    }

    write_event(writer, Event::Start(start))?;
    for child in &node.children {
        write_child(writer, child)?;
    }
    write_event(writer, Event::End(BytesEnd::new(node.tag.as_str())))
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<()> {
    writer.write_event(event).map_err(|e| Error::Write {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;
    use pretty_assertions::assert_eq;

    fn round_trip(source: &str) -> String {
        serialize(&parse(source).unwrap()).unwrap()
    }

    #[test]
    fn test_round_trip() {
        for source in [
            "<div></div>",
            r#"<ul class="menu"><li>One</li><li>Two</li></ul>"#,
            "intro <b>bold</b> outro",
            "<div>\n  <span>x</span>\n</div>",
            r#"<a href="/x?a=1&amp;b=2">link</a>"#,
        ] {
            assert_eq!(round_trip(source), source);
        }
    }

    #[test]
    fn test_single_quoted_attribute_round_trip() {
        let output = round_trip(r#"<p title='say "hi"'>x</p>"#);
        assert_eq!(output, r#"<p title="say &quot;hi&quot;">x</p>"#);

        let reparsed = parse(&output).unwrap();
        assert_eq!(reparsed, parse(r#"<p title='say "hi"'>x</p>"#).unwrap());
        assert_eq!(round_trip(&output), output);
    }

    #[test]
    fn test_self_closing_normalizes() {
        assert_eq!(round_trip("<div/>"), "<div></div>");
        assert_eq!(round_trip("<p>a<br>b</p>"), "<p>a<br/>b</p>");
    }

    #[test]
    fn test_text_is_escaped() {
        let tree = vec![Child::Element(
            Node::new("p").with_text("Tom & Jerry <3"),
        )];
        assert_eq!(serialize(&tree).unwrap(), "<p>Tom &amp; Jerry &lt;3</p>");
    }

    #[test]
    fn test_attribute_values_are_verbatim() {
        let tree = vec![Child::Element(
            Node::new("a")
                .with_attribute("title", "Tom &amp; Jerry")
                .with_attribute("class", "btn"),
        )];
        assert_eq!(
            serialize(&tree).unwrap(),
            r#"<a title="Tom &amp; Jerry" class="btn"></a>"#
        );
    }

    #[test]
    fn test_void_element_with_children_gets_end_tag() {
        let tree = vec![Child::Element(Node::new("br").with_text("odd"))];
        assert_eq!(serialize(&tree).unwrap(), "<br>odd</br>");
    }

    #[test]
    fn test_empty_tree() {
        assert_eq!(serialize(&[]).unwrap(), "");
    }
}
