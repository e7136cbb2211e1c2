//! Serialization of DOM subtrees back to markup.
//!
//! Text is re-escaped for `&`, `<` and `>` only, which is what leaves the
//! `&lt;`/`&gt;`/`&amp;` sequences the entity-repair pass later undoes.
//! [`serialize_with_tail`] also writes the text between the element and its
//! next sibling element, the way ElementTree's `tostring` does.

use std::io::{Cursor, Write};

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use roxmltree::{Node, NodeType};

use super::utils::{get_tag_name, tail_text};
use crate::error::Result;

/// Serialize an element and its descendants to a markup string.
///
/// Elements keep their attributes and document order. Elements without
/// element or text children are written self-closing. Comments and
/// processing instructions are dropped, as is any text following the
/// element's closing tag.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use decisions_extractor::xml::serialize_node;
///
/// let doc = Document::parse(r#"<a id="1">x &amp; y<br/></a>"#).unwrap();
/// let markup = serialize_node(doc.root_element()).unwrap();
/// assert_eq!(markup, r#"<a id="1">x &amp; y<br/></a>"#);
/// ```
pub fn serialize_node(node: Node<'_, '_>) -> Result<String> {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    write_element(&mut writer, node)?;
    let bytes = writer.into_inner().into_inner();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Serialize an element followed by its escaped tail text.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use decisions_extractor::xml::serialize_with_tail;
///
/// let doc = Document::parse("<root><body>x</body>\n  <next/></root>").unwrap();
/// let body = doc.root_element().first_element_child().unwrap();
/// assert_eq!(serialize_with_tail(body).unwrap(), "<body>x</body>\n  ");
/// ```
pub fn serialize_with_tail(node: Node<'_, '_>) -> Result<String> {
    let mut markup = serialize_node(node)?;
    markup.push_str(&partial_escape(&tail_text(node)));
    Ok(markup)
}

fn write_element<W: Write>(writer: &mut Writer<W>, node: Node<'_, '_>) -> Result<()> {
    let name = get_tag_name(node);
    let mut start = BytesStart::new(name);
    for attribute in node.attributes() {
        start.push_attribute((attribute.name(), attribute.value()));
    }

    let has_content = node
        .children()
        .any(|child| child.is_element() || child.is_text());
    if !has_content {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    for child in node.children() {
        match child.node_type() {
            NodeType::Element => write_element(writer, child)?,
            NodeType::Text => {
                if let Some(text) = child.text() {
                    writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(
                        text,
                    ))))?;
                }
            }
            _ => {}
        }
    }
    writer.write_event(Event::End(BytesEnd::new(name)))?;

    Ok(())
}
