//! Owned markup tree built from `roxmltree`.
//!
//! The tree is normalized once here: every element carries an ordered list of
//! children, whitespace-only text between elements is dropped, and comments and
//! processing instructions never make it in. The rest of the crate walks these
//! nodes without reaching back into the XML parser.

use crate::error::Result;

pub const WML_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Text(String),
    Element(Element),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
    pub namespace: Option<String>,
    pub name: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub namespace: Option<String>,
    pub name: String,
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }
}

impl Element {
    /// True when this is `w:{name}` in the WordprocessingML namespace.
    pub fn is_wml(&self, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == Some(WML_NS)
    }

    /// Child elements in document order, text leaves skipped.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// First `w:{name}` child.
    pub fn wml(&self, name: &str) -> Option<&Element> {
        self.elements().find(|el| el.is_wml(name))
    }

    /// All `w:{name}` children in document order.
    pub fn wml_children<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |el| el.is_wml(name))
    }

    pub fn attribute(&self, namespace: Option<&str>, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name && a.namespace.as_deref() == namespace)
            .map(|a| a.value.as_str())
    }

    /// The `w:val` attribute, which carries the value of most WML property elements.
    pub fn wml_val(&self) -> Option<&str> {
        self.attribute(Some(WML_NS), "val")
    }

    /// Block-level children, with `w:sdt` content controls unwrapped in place.
    pub fn block_children(&self) -> Vec<&Element> {
        let mut blocks = Vec::new();
        for child in self.elements() {
            if child.is_wml("sdt") {
                if let Some(content) = child.wml("sdtContent") {
                    blocks.extend(content.block_children());
                }
            } else {
                blocks.push(child);
            }
        }
        blocks
    }
}

/// Parse XML text and return its root element as an owned tree.
pub fn parse(xml: &str) -> Result<Element> {
    let doc = roxmltree::Document::parse(xml)?;
    Ok(convert_element(doc.root_element(), false))
}

fn convert_element(node: roxmltree::Node, inherited_preserve: bool) -> Element {
    let preserve = match node.attribute((XML_NS, "space")) {
        Some("preserve") => true,
        Some("default") => false,
        _ => inherited_preserve,
    };
    let tag = node.tag_name();
    let is_text_run = tag.name() == "t" && tag.namespace() == Some(WML_NS);

    let attributes = node
        .attributes()
        .map(|a| Attribute {
            namespace: a.namespace().map(str::to_string),
            name: a.name().to_string(),
            value: a.value().to_string(),
        })
        .collect();

    let mut children = Vec::new();
    for child in node.children() {
        if child.is_element() {
            children.push(Node::Element(convert_element(child, preserve)));
        } else if child.is_text() {
            let text = child.text().unwrap_or("");
            if text.is_empty() {
                continue;
            }
            if preserve || is_text_run || !text.trim().is_empty() {
                children.push(Node::Text(text.to_string()));
            }
        }
    }

    Element {
        namespace: tag.namespace().map(str::to_string),
        name: tag.name().to_string(),
        attributes,
        children,
    }
}
