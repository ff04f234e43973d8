//! Attributed XML tree builder.
//!
//! Turns raw XML text into a semi-structured tree: every element maps its
//! child element names to either a single value or a sequence of values,
//! attributes live under a reserved key prefix and text content under a
//! reserved key. The URDF normalizer only ever reads this tree through the
//! narrow accessors in [`crate::coerce`].

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::io::BufRead;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, UrdfError};

// ============================================================================
// Options
// ============================================================================

/// Key conventions and text handling of the tree builder.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct XmlOptions {
    /// Prefix prepended to attribute names to form their key (default: `@_`).
    pub attribute_prefix: String,
    /// Key under which an element's text content is stored (default: `#text`).
    pub text_key: String,
    /// Trim text content and drop whitespace-only text (default: true).
    pub trim_values: bool,
    /// Turn numeric text of attribute-less leaf elements into numbers (default: true).
    pub parse_tag_value: bool,
}

impl Default for XmlOptions {
    fn default() -> Self {
        Self {
            attribute_prefix: "@_".to_string(),
            text_key: "#text".to_string(),
            trim_values: true,
            parse_tag_value: true,
        }
    }
}

impl XmlOptions {
    /// Key under which attribute `name` is stored.
    #[must_use]
    pub fn attribute_key(&self, name: &str) -> String {
        format!("{}{name}", self.attribute_prefix)
    }
}

// ============================================================================
// Tree values
// ============================================================================

/// One value in the attributed tree.
#[derive(Debug, Clone, PartialEq)]
pub enum XmlValue {
    /// Text of a leaf element, or an attribute value.
    Text(String),
    /// Numeric text of a leaf element (only with `parse_tag_value`).
    Number(f64),
    /// An element carrying attributes and/or child elements.
    Node(XmlNode),
    /// Repeated sibling elements sharing one name, in document order.
    List(Vec<XmlValue>),
}

impl XmlValue {
    /// The element node, if this value is one.
    #[must_use]
    pub fn as_node(&self) -> Option<&XmlNode> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Child entry `key` of this value, if it is a node.
    #[must_use]
    pub fn child(&self, key: &str) -> Option<&XmlValue> {
        self.as_node().and_then(|node| node.get(key))
    }
}

/// An element: ordered mapping from key to value.
///
/// Keys are child element names, prefixed attribute names, or the text key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XmlNode {
    entries: Vec<(String, XmlValue)>,
}

impl XmlNode {
    /// Create an empty node.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an entry by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&XmlValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterate over entries in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &XmlValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the node has no entries at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert a value; a repeated key collapses into a [`XmlValue::List`].
    pub fn insert(&mut self, key: impl Into<String>, value: XmlValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, XmlValue::List(items))) => items.push(value),
            Some((_, existing)) => {
                let first = std::mem::replace(existing, XmlValue::List(Vec::new()));
                *existing = XmlValue::List(vec![first, value]);
            }
            None => self.entries.push((key, value)),
        }
    }
}

// ============================================================================
// Builder
// ============================================================================

/// An element whose end tag has not been seen yet.
struct OpenElement {
    name: String,
    node: XmlNode,
    text: String,
}

/// Build the attributed tree of an XML document.
///
/// The returned node is the document itself: its entries are the top-level
/// elements.
///
/// # Errors
///
/// Returns [`UrdfError::XmlParse`] if the text is not well-formed XML.
pub fn build_tree(xml: &str, options: &XmlOptions) -> Result<XmlNode> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(options.trim_values);
    build_tree_from_reader(&mut reader, options)
}

fn build_tree_from_reader<R: BufRead>(
    reader: &mut Reader<R>,
    options: &XmlOptions,
) -> Result<XmlNode> {
    let mut document = XmlNode::new();
    let mut stack: Vec<OpenElement> = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) => {
                stack.push(open_element(e, options)?);
            }
            Event::Empty(ref e) => {
                let element = open_element(e, options)?;
                close_element(element, &mut stack, &mut document, options);
            }
            Event::End(ref e) => {
                let element = stack.pop().ok_or_else(|| {
                    UrdfError::XmlParse(format!(
                        "unexpected end tag </{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    ))
                })?;
                close_element(element, &mut stack, &mut document, options);
            }
            Event::Text(ref e) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) => {
                if let Some(open) = stack.last_mut() {
                    open.text.push_str(&String::from_utf8_lossy(&e.into_inner()));
                }
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions, doctype.
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(UrdfError::XmlParse(format!(
            "unexpected EOF: <{}> is never closed",
            open.name
        )));
    }

    Ok(document)
}

fn open_element(start: &BytesStart, options: &XmlOptions) -> Result<OpenElement> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    let mut node = XmlNode::new();

    for attr in start.attributes() {
        let attr = attr.map_err(|e| UrdfError::XmlParse(e.to_string()))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value()?.into_owned();
        node.insert(options.attribute_key(&key), XmlValue::Text(value));
    }

    Ok(OpenElement {
        name,
        node,
        text: String::new(),
    })
}

fn close_element(
    element: OpenElement,
    stack: &mut [OpenElement],
    document: &mut XmlNode,
    options: &XmlOptions,
) {
    let OpenElement {
        name,
        mut node,
        text,
    } = element;

    let text = if options.trim_values {
        text.trim().to_string()
    } else {
        text
    };

    let value = if node.is_empty() {
        leaf_value(text, options)
    } else {
        if !text.is_empty() {
            node.insert(options.text_key.clone(), leaf_value(text, options));
        }
        XmlValue::Node(node)
    };

    match stack.last_mut() {
        Some(parent) => parent.node.insert(name, value),
        None => document.insert(name, value),
    }
}

fn leaf_value(text: String, options: &XmlOptions) -> XmlValue {
    if options.parse_tag_value {
        if let Ok(n) = text.trim().parse::<f64>() {
            if n.is_finite() {
                return XmlValue::Number(n);
            }
        }
    }
    XmlValue::Text(text)
}
