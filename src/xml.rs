//! Generic XML element tree.
//!
//! The session walker only needs tag names, a handful of attributes, and the
//! text of leaf elements, so the document is read with the `quick-xml` pull
//! parser into a small owned tree. Comments, processing instructions and the
//! XML declaration are dropped.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::ExtractError;

/// One element of a parsed document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Tag name as written, including any namespace prefix
    pub tag: String,
    /// Attributes in document order, values unescaped
    pub attributes: Vec<(String, String)>,
    /// Concatenated text and CDATA content directly inside this element
    pub text: String,
    /// Child elements in document order
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Create an element with no attributes, text or children.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Value of the named attribute, if present.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Whether this element has the given tag and `name` attribute.
    #[must_use]
    pub fn is(&self, tag: &str, name: &str) -> bool {
        self.tag == tag && self.attr("name") == Some(name)
    }

    /// Direct children carrying the given tag.
    pub fn children_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a XmlElement> {
        self.children.iter().filter(move |child| child.tag == tag)
    }

    /// First element in document order (pre-order, starting with `self`)
    /// that matches `predicate`.
    pub fn find<P>(&self, predicate: &P) -> Option<&XmlElement>
    where
        P: Fn(&XmlElement) -> bool,
    {
        if predicate(self) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(predicate))
    }
}

/// Parse a complete XML document into its root element.
///
/// `source_name` is only used for diagnostics.
///
/// # Errors
///
/// Returns [`ExtractError::XmlParse`] when the document is not well-formed:
/// mismatched or unclosed tags, content after the root element, a missing
/// root element, invalid escapes, or an I/O failure while reading.
pub fn parse_document<R: BufRead>(input: R, source_name: &str) -> Result<XmlElement, ExtractError> {
    let mut reader = Reader::from_reader(input);
    let mut buf = Vec::new();
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    let fail = |reader: &Reader<R>, message: String| ExtractError::XmlParse {
        source_name: source_name.to_string(),
        position: reader.buffer_position() as u64,
        message,
    };

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                if stack.is_empty() && root.is_some() {
                    return Err(fail(&reader, "multiple root elements".into()));
                }
                let element = element_from_start(e).map_err(|msg| fail(&reader, msg))?;
                stack.push(element);
            }
            Ok(Event::Empty(ref e)) => {
                if stack.is_empty() && root.is_some() {
                    return Err(fail(&reader, "multiple root elements".into()));
                }
                let element = element_from_start(e).map_err(|msg| fail(&reader, msg))?;
                attach(element, &mut stack, &mut root);
            }
            Ok(Event::End(_)) => match stack.pop() {
                Some(element) => attach(element, &mut stack, &mut root),
                None => return Err(fail(&reader, "unexpected closing tag".into())),
            },
            Ok(Event::Text(ref e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| fail(&reader, err.to_string()))?;
                match stack.last_mut() {
                    Some(parent) => parent.text.push_str(&text),
                    None if text.trim().is_empty() => {}
                    None => return Err(fail(&reader, "text outside the root element".into())),
                }
            }
            Ok(Event::CData(e)) => match stack.last_mut() {
                Some(parent) => parent.text.push_str(&String::from_utf8_lossy(&e)),
                None => return Err(fail(&reader, "CDATA outside the root element".into())),
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(fail(&reader, e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(fail(&reader, format!("unclosed element <{}>", open.tag)));
    }

    root.ok_or_else(|| fail(&reader, "document has no root element".into()))
}

/// Build an element (tag and attributes) from a start or empty tag.
fn element_from_start(e: &BytesStart) -> Result<XmlElement, String> {
    let mut element = XmlElement::new(String::from_utf8_lossy(e.name().as_ref()));
    for attr in e.attributes() {
        let attr = attr.map_err(|err| err.to_string())?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(|err| err.to_string())?;
        element.attributes.push((key, value.into_owned()));
    }
    Ok(element)
}

/// Hand a completed element to its parent, or make it the document root.
fn attach(element: XmlElement, stack: &mut [XmlElement], root: &mut Option<XmlElement>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}
