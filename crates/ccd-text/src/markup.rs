//! Minimal element tree for narrative table fragments.
//!
//! Built from `quick-xml` pull events. Element lookups compare local names,
//! so `hl7:td` and `td` are the same cell.

use std::borrow::Cow;

use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesEnd, BytesRef, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    #[error("malformed markup: {message}")]
    Syntax { message: String },

    #[error("unknown entity reference &{name};")]
    UnknownEntity { name: String },

    #[error("closing tag </{name}> has no matching open element")]
    UnmatchedClose { name: String },

    #[error("element <{name}> is never closed")]
    Unclosed { name: String },

    #[error("markup has more than one root element")]
    MultipleRoots,

    #[error("text found outside the root element")]
    TextOutsideRoot,

    #[error("failed to serialize markup: {message}")]
    Serialize { message: String },
}

impl MarkupError {
    fn syntax(err: impl std::fmt::Display) -> Self {
        Self::Syntax {
            message: err.to_string(),
        }
    }

    fn serialize(err: impl std::fmt::Display) -> Self {
        Self::Serialize {
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

/// Strip a namespace prefix: `hl7:table` -> `table`.
pub fn local_name(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Qualified name as written in the source.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn local_name(&self) -> &str {
        local_name(&self.name)
    }

    pub fn is(&self, local: &str) -> bool {
        self.local_name() == local
    }

    /// Attribute value by local name.
    pub fn attribute(&self, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| local_name(key) == local)
            .map(|(_, value)| value.as_str())
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Child elements with the given local name, in document order.
    pub fn children_named<'s, 'n>(
        &'s self,
        local: &'n str,
    ) -> impl Iterator<Item = &'s Element> + use<'s, 'n> {
        self.child_elements().filter(move |child| child.is(local))
    }

    pub fn child(&self, local: &str) -> Option<&Element> {
        self.child_elements().find(|child| child.is(local))
    }

    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        })
    }

    /// Concatenated text of all descendants, untrimmed.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(element) => element.collect_text(out),
            }
        }
    }

    /// Serialize this subtree back to markup.
    pub fn to_markup(&self) -> Result<String, MarkupError> {
        let mut writer = Writer::new(Vec::new());
        self.write_to(&mut writer)?;
        String::from_utf8(writer.into_inner()).map_err(MarkupError::serialize)
    }

    fn write_to(&self, writer: &mut Writer<Vec<u8>>) -> Result<(), MarkupError> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }
        if self.children.is_empty() {
            return writer
                .write_event(Event::Empty(start))
                .map_err(MarkupError::serialize);
        }
        writer
            .write_event(Event::Start(start))
            .map_err(MarkupError::serialize)?;
        for node in &self.children {
            match node {
                Node::Element(element) => element.write_to(writer)?,
                Node::Text(text) => writer
                    .write_event(Event::Text(BytesText::new(text)))
                    .map_err(MarkupError::serialize)?,
            }
        }
        writer
            .write_event(Event::End(BytesEnd::new(self.name.as_str())))
            .map_err(MarkupError::serialize)
    }

    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        if let Some(Node::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(Node::Text(text.to_string()));
        }
    }
}

/// Parse a markup fragment with a single root element.
///
/// Empty or whitespace-only input has no root and returns `Ok(None)`.
pub fn parse(input: &str) -> Result<Option<Element>, MarkupError> {
    let mut reader = Reader::from_str(input);
    let mut open: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event().map_err(MarkupError::syntax)? {
            Event::Start(start) => open.push(element_from_start(&start, &reader)?),
            Event::Empty(start) => {
                let element = element_from_start(&start, &reader)?;
                attach(element, &mut open, &mut root)?;
            }
            Event::End(end) => {
                let element = open.pop().ok_or_else(|| MarkupError::UnmatchedClose {
                    name: String::from_utf8_lossy(end.name().as_ref()).into_owned(),
                })?;
                attach(element, &mut open, &mut root)?;
            }
            Event::Text(text) => {
                let text = text.decode().map_err(MarkupError::syntax)?;
                append_text(&text, &mut open)?;
            }
            Event::CData(cdata) => {
                let text = cdata.decode().map_err(MarkupError::syntax)?;
                append_text(&text, &mut open)?;
            }
            Event::GeneralRef(reference) => {
                let text = resolve_reference(&reference)?;
                append_text(&text, &mut open)?;
            }
            Event::Eof => break,
            // comments, declarations, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(unclosed) = open.pop() {
        return Err(MarkupError::Unclosed {
            name: unclosed.name,
        });
    }
    Ok(root)
}

fn element_from_start(
    start: &BytesStart<'_>,
    reader: &Reader<&[u8]>,
) -> Result<Element, MarkupError> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut element = Element::new(name);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(MarkupError::syntax)?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .decode_and_unescape_value(reader.decoder())
            .map_err(MarkupError::syntax)?;
        element.attributes.push((key, value.into_owned()));
    }
    Ok(element)
}

fn attach(
    element: Element,
    open: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), MarkupError> {
    match open.last_mut() {
        Some(parent) => parent.children.push(Node::Element(element)),
        None if root.is_some() => return Err(MarkupError::MultipleRoots),
        None => *root = Some(element),
    }
    Ok(())
}

fn append_text(text: &str, open: &mut [Element]) -> Result<(), MarkupError> {
    match open.last_mut() {
        Some(parent) => parent.push_text(text),
        None if text.trim().is_empty() => {}
        None => return Err(MarkupError::TextOutsideRoot),
    }
    Ok(())
}

fn resolve_reference<'a>(reference: &'a BytesRef<'_>) -> Result<Cow<'a, str>, MarkupError> {
    if let Some(ch) = reference.resolve_char_ref().map_err(MarkupError::syntax)? {
        return Ok(Cow::Owned(ch.to_string()));
    }
    let name = reference.decode().map_err(MarkupError::syntax)?;
    resolve_predefined_entity(&name)
        .map(Cow::Borrowed)
        .ok_or_else(|| MarkupError::UnknownEntity {
            name: name.into_owned(),
        })
}
