//! Mutable SVG element tree.
//!
//! The walker and the layout planner both rewrite the document in place, so
//! unlike a read-only DOM this tree owns its tags, attributes and children
//! and can be serialized back to markup after mutation. Attribute order is
//! preserved across a parse/serialize round trip.
//!
//! Namespace prefixes are stripped from tag names at parse time (`svg:path`
//! becomes `path`), matching how the rest of the crate addresses elements.

use indexmap::IndexMap;
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: IndexMap<String, String>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: IndexMap::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    pub fn require_attr(&self, name: &str) -> Result<&str> {
        self.attr(name).ok_or_else(|| Error::MissingAttribute {
            tag: self.tag.clone(),
            attribute: name.to_string(),
        })
    }

    /// Reads a required attribute as a float.
    pub fn require_f64(&self, name: &str) -> Result<f64> {
        let raw = self.require_attr(name)?;
        raw.trim()
            .parse::<f64>()
            .map_err(|_| Error::MalformedAttribute {
                tag: self.tag.clone(),
                attribute: name.to_string(),
                value: raw.to_string(),
            })
    }

    pub fn push_element(&mut self, element: Element) {
        self.children.push(Node::Element(element));
    }

    /// Iterates the direct child elements (text nodes skipped).
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }
}

/// Splits a namespace prefix off a tag name.
pub fn local_name(tag: &str) -> &str {
    match tag.rsplit_once(':') {
        Some((_, local)) => local,
        None => tag,
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element> {
    let tag = String::from_utf8_lossy(start.name().as_ref()).to_string();
    let mut element = Element::new(local_name(&tag).to_string());

    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::MalformedMarkup {
            message: e.to_string(),
        })?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| Error::MalformedMarkup {
                message: e.to_string(),
            })?
            .to_string();
        element.attrs.insert(key, value);
    }

    Ok(element)
}

/// Parses an SVG document into a mutable element tree rooted at the first
/// top-level element.
pub fn parse_document(text: &str) -> Result<Element> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                stack.push(element_from_start(&e)?);
            }
            Ok(Event::Empty(e)) => {
                let element = element_from_start(&e)?;
                match stack.last_mut() {
                    Some(parent) => parent.push_element(element),
                    None if root.is_none() => root = Some(element),
                    None => {}
                }
            }
            Ok(Event::End(_)) => {
                let Some(element) = stack.pop() else {
                    return Err(Error::MalformedMarkup {
                        message: "unexpected closing tag".to_string(),
                    });
                };
                match stack.last_mut() {
                    Some(parent) => parent.push_element(element),
                    None if root.is_none() => root = Some(element),
                    None => {}
                }
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|e| Error::MalformedMarkup {
                        message: e.to_string(),
                    })?
                    .to_string();
                if !text.is_empty() {
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(Node::Text(text));
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(Error::MalformedMarkup {
                    message: e.to_string(),
                });
            }
            // Declarations, comments, CDATA and processing instructions carry
            // no drawing content.
            Ok(_) => {}
        }
        buf.clear();
    }

    root.ok_or_else(|| Error::MalformedMarkup {
        message: "no root element".to_string(),
    })
}

fn write_element<W: std::io::Write>(writer: &mut Writer<W>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.tag.as_str());
    for (key, value) in &element.attrs {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        writer
            .write_event(Event::Empty(start))
            .map_err(|e| Error::MalformedMarkup {
                message: e.to_string(),
            })?;
        return Ok(());
    }

    writer
        .write_event(Event::Start(start))
        .map_err(|e| Error::MalformedMarkup {
            message: e.to_string(),
        })?;
    for child in &element.children {
        match child {
            Node::Element(el) => write_element(writer, el)?,
            Node::Text(text) => writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(|e| Error::MalformedMarkup {
                    message: e.to_string(),
                })?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.tag.as_str())))
        .map_err(|e| Error::MalformedMarkup {
            message: e.to_string(),
        })?;
    Ok(())
}

/// Serializes the tree back to markup.
pub fn write_document(root: &Element) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    write_element(&mut writer, root)?;
    String::from_utf8(writer.into_inner()).map_err(|e| Error::MalformedMarkup {
        message: e.to_string(),
    })
}
