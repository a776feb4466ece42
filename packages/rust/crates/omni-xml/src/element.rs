//! Owned XML element tree.
//!
//! `roxmltree` gives a borrowed, read-only view of a document. The handle needs
//! to modify the tree and write it back, so parsed documents are copied into
//! [`Element`] values that own their data.
//!
//! Character data follows the text/tail layout: `text` is everything before
//! the first child element, and each child's `tail` is everything between that
//! child and its next sibling. Comments and processing instructions are
//! dropped.

use std::collections::BTreeMap;

use roxmltree::{Document, Node, ParsingOptions};

/// A single XML element with its attributes, character data and children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    text: Option<String>,
    tail: Option<String>,
    children: Vec<Element>,
}

impl Element {
    /// Create an element with no attributes, text or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set an attribute, returning the element.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Set the leading text, returning the element.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Parse a complete document and return its root element.
    ///
    /// DTDs are accepted; their declarations are not kept in the tree.
    ///
    /// # Errors
    /// Returns the parser error when `text` is not well-formed XML.
    pub fn parse_str(text: &str) -> Result<Self, roxmltree::Error> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let document = Document::parse_with_options(text, options)?;
        Ok(Self::from_node(document.root_element()))
    }

    fn from_node(node: Node<'_, '_>) -> Self {
        let mut element = Self::new(element_name(node));

        // Carry declarations on the element that introduces them.
        let parent = node.parent_element();
        for ns in node.namespaces() {
            if ns.name() == Some("xml") {
                continue;
            }
            let inherited = parent.is_some_and(|p| {
                p.namespaces()
                    .any(|pns| pns.name() == ns.name() && pns.uri() == ns.uri())
            });
            if !inherited {
                let name = match ns.name() {
                    Some(prefix) => format!("xmlns:{prefix}"),
                    None => "xmlns".to_string(),
                };
                element.attributes.insert(name, ns.uri().to_string());
            }
        }

        for attr in node.attributes() {
            element.attributes.insert(
                attribute_name(node, attr.namespace(), attr.name()),
                attr.value().to_string(),
            );
        }

        for child in node.children() {
            if child.is_element() {
                element.children.push(Self::from_node(child));
            } else if child.is_text() {
                let text = child.text().unwrap_or_default();
                match element.children.last_mut() {
                    Some(last) => push_text(&mut last.tail, text),
                    None => push_text(&mut element.text, text),
                }
            }
        }

        element
    }

    /// Tag name, including a namespace prefix when the source used one.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Value of attribute `name`, if set.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// All attributes in name order.
    #[must_use]
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Set or replace an attribute.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Text before the first child element.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Replace the leading text.
    pub fn set_text(&mut self, text: Option<String>) {
        self.text = text;
    }

    /// Text following this element inside its parent.
    #[must_use]
    pub fn tail(&self) -> Option<&str> {
        self.tail.as_deref()
    }

    /// Replace the trailing text.
    pub fn set_tail(&mut self, tail: Option<String>) {
        self.tail = tail;
    }

    /// Direct children in document order.
    #[must_use]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Mutable access to the direct children.
    pub fn children_mut(&mut self) -> &mut Vec<Element> {
        &mut self.children
    }

    /// Append `child` as the last child.
    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Number of direct children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// True when the element has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// First direct child with tag `tag`.
    #[must_use]
    pub fn find(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.tag == tag)
    }

    /// All direct children with tag `tag`.
    pub fn find_all<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.tag == tag)
    }
}

const XML_NAMESPACE: &str = "http://www.w3.org/XML/1998/namespace";

fn element_name(node: Node<'_, '_>) -> String {
    let tag = node.tag_name();
    match tag.namespace().and_then(|uri| node.lookup_prefix(uri)) {
        Some(prefix) => format!("{prefix}:{}", tag.name()),
        None => tag.name().to_string(),
    }
}

// Unprefixed attributes have no namespace, so a namespaced attribute always
// needs a prefix even when its URI is also the default namespace.
fn attribute_name(node: Node<'_, '_>, namespace: Option<&str>, local: &str) -> String {
    let Some(uri) = namespace else {
        return local.to_string();
    };
    if uri == XML_NAMESPACE {
        return format!("xml:{local}");
    }
    node.namespaces()
        .find_map(|ns| ns.name().filter(|_| ns.uri() == uri))
        .map_or_else(|| local.to_string(), |prefix| format!("{prefix}:{local}"))
}

fn push_text(slot: &mut Option<String>, text: &str) {
    match slot {
        Some(existing) => existing.push_str(text),
        None => *slot = Some(text.to_string()),
    }
}
