//! Document tree shared by the parser, normalizer, and renderer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Attribute names mapped to their values.
///
/// Bare boolean attributes (`<input disabled>`) carry `None`. The map is
/// ordered so raw-HTML passthrough renders attributes deterministically.
pub type AttributeMap = BTreeMap<String, Option<String>>;

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    /// An element with a tag name, attributes, and children.
    Element(Element),
    /// A run of character data, entity references undecoded.
    Text(String),
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Lowercased tag name.
    pub tag: String,
    /// Attributes in alphabetical order.
    pub attributes: AttributeMap,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

impl Element {
    /// Creates a childless element.
    #[must_use]
    pub fn new(tag: &str, attributes: &AttributeMap) -> Self {
        Self { tag: tag.to_string(), attributes: attributes.clone(), children: Vec::new() }
    }

    /// Creates an element with the given children.
    #[must_use]
    pub fn with_children(tag: &str, attributes: &AttributeMap, children: Vec<Node>) -> Self {
        Self { tag: tag.to_string(), attributes: attributes.clone(), children }
    }
}

impl Node {
    /// Returns the element if this node is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// Returns `true` for `ul` and `ol` elements.
    #[must_use]
    pub fn is_list_element(&self) -> bool {
        matches!(self, Node::Element(element) if element.tag == "ul" || element.tag == "ol")
    }
}

/// Returns `true` for the HTML void elements, which never take a close tag.
#[must_use]
pub fn is_void_element(tag: &str) -> bool {
    matches!(
        tag,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

/// Returns `true` for elements laid out as blocks in HTML.
#[must_use]
pub fn is_block_element(tag: &str) -> bool {
    matches!(
        tag,
        "address"
            | "article"
            | "aside"
            | "blockquote"
            | "canvas"
            | "dd"
            | "div"
            | "dl"
            | "dt"
            | "fieldset"
            | "figcaption"
            | "figure"
            | "footer"
            | "form"
            | "h1"
            | "h2"
            | "h3"
            | "h4"
            | "h5"
            | "h6"
            | "header"
            | "hr"
            | "li"
            | "main"
            | "nav"
            | "noscript"
            | "ol"
            | "p"
            | "pre"
            | "section"
            | "table"
            | "tfoot"
            | "ul"
            | "video"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ul_and_ol_are_list_elements() {
        let ul = Node::Element(Element::new("ul", &AttributeMap::new()));
        let ol = Node::Element(Element::new("ol", &AttributeMap::new()));
        let p = Node::Element(Element::new("p", &AttributeMap::new()));
        assert!(ul.is_list_element());
        assert!(ol.is_list_element());
        assert!(!p.is_list_element());
        assert!(!Node::Text("ul".to_string()).is_list_element());
    }

    #[test]
    fn void_elements_match_html_spec_list() {
        assert!(is_void_element("br"));
        assert!(is_void_element("img"));
        assert!(!is_void_element("div"));
    }

    #[test]
    fn block_elements_include_structural_tags() {
        assert!(is_block_element("p"));
        assert!(is_block_element("table"));
        assert!(!is_block_element("em"));
        assert!(!is_block_element("span"));
    }
}
