//! DOM Node - Base node type

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use crate::style::InlineStyle;

/// Node ID - unique identifier within a page's node arena.
pub type NodeId = usize;

/// DOM node types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum NodeType {
    Element = 1,
    Text = 3,
    Comment = 8,
    Document = 9,
    DocumentFragment = 11,
}

/// A DOM node.
#[derive(Debug, Clone)]
pub struct Node {
    /// Unique ID of this node.
    pub id: NodeId,
    /// Node type.
    pub node_type: NodeType,
    /// Node data (element, text, etc.)
    pub data: NodeData,
    /// Parent node ID.
    pub parent: Option<NodeId>,
    /// First child node ID.
    pub first_child: Option<NodeId>,
    /// Last child node ID.
    pub last_child: Option<NodeId>,
    /// Previous sibling node ID.
    pub prev_sibling: Option<NodeId>,
    /// Next sibling node ID.
    pub next_sibling: Option<NodeId>,
}

/// Node data union.
#[derive(Debug, Clone)]
pub enum NodeData {
    /// Document node. The scroll fields model the scroll offsets of the
    /// document's root element.
    Document { scroll_top: f32, scroll_left: f32 },
    /// Shadow root fragment attached to a host element.
    ShadowRoot { host: NodeId },
    /// Element node
    Element {
        name: String,
        attrs: Vec<Attribute>,
        /// Element ID attribute value (cached)
        id: Option<String>,
        /// Element class list (cached)
        classes: Vec<String>,
        /// Inline style declarations
        style: InlineStyle,
    },
    /// Text node
    Text { content: String },
    /// Comment node
    Comment { content: String },
}

/// An element attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    /// Create a new attribute.
    pub fn new(name: &str, value: &str) -> Self {
        Attribute {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl Node {
    /// Create a new document node.
    pub fn new_document(id: NodeId) -> Self {
        Node {
            id,
            node_type: NodeType::Document,
            data: NodeData::Document {
                scroll_top: 0.0,
                scroll_left: 0.0,
            },
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
        }
    }

    /// Create a new shadow root fragment for a host element.
    pub fn new_shadow_root(id: NodeId, host: NodeId) -> Self {
        Node {
            id,
            node_type: NodeType::DocumentFragment,
            data: NodeData::ShadowRoot { host },
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
        }
    }

    /// Create a new element node.
    pub fn new_element(id: NodeId, name: &str, attrs: Vec<Attribute>) -> Self {
        let id_attr = attrs.iter().find(|a| a.name == "id").map(|a| a.value.clone());

        let classes: Vec<String> = attrs
            .iter()
            .find(|a| a.name == "class")
            .map(|a| a.value.split_whitespace().map(|s| s.into()).collect())
            .unwrap_or_default();

        Node {
            id,
            node_type: NodeType::Element,
            data: NodeData::Element {
                name: name.into(),
                attrs,
                id: id_attr,
                classes,
                style: InlineStyle::new(),
            },
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
        }
    }

    /// Create a new text node.
    pub fn new_text(id: NodeId, content: String) -> Self {
        Node {
            id,
            node_type: NodeType::Text,
            data: NodeData::Text { content },
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
        }
    }

    /// Create a new comment node.
    pub fn new_comment(id: NodeId, content: String) -> Self {
        Node {
            id,
            node_type: NodeType::Comment,
            data: NodeData::Comment { content },
            parent: None,
            first_child: None,
            last_child: None,
            prev_sibling: None,
            next_sibling: None,
        }
    }

    /// Check if this is an element node.
    pub fn is_element(&self) -> bool {
        self.node_type == NodeType::Element
    }

    /// Check if this is a text node.
    pub fn is_text(&self) -> bool {
        self.node_type == NodeType::Text
    }

    /// Check if this is a document node.
    pub fn is_document(&self) -> bool {
        self.node_type == NodeType::Document
    }

    /// Check if this is a shadow root fragment.
    pub fn is_shadow_root(&self) -> bool {
        matches!(self.data, NodeData::ShadowRoot { .. })
    }

    /// Get the shadow host (if shadow root).
    pub fn shadow_host(&self) -> Option<NodeId> {
        match self.data {
            NodeData::ShadowRoot { host } => Some(host),
            _ => None,
        }
    }

    /// Get tag name (if element).
    pub fn tag_name(&self) -> Option<&str> {
        match &self.data {
            NodeData::Element { name, .. } => Some(name.as_str()),
            _ => None,
        }
    }

    /// Get the DOM node name (`DIV`, `#document`, `#text`, ...).
    pub fn node_name(&self) -> String {
        match &self.data {
            NodeData::Document { .. } => "#document".to_string(),
            NodeData::ShadowRoot { .. } => "#shadow-root".to_string(),
            NodeData::Element { name, .. } => name.to_uppercase(),
            NodeData::Text { .. } => "#text".to_string(),
            NodeData::Comment { .. } => "#comment".to_string(),
        }
    }

    /// Get element ID (if element with id attribute).
    pub fn element_id(&self) -> Option<&str> {
        match &self.data {
            NodeData::Element { id: Some(id), .. } => Some(id.as_str()),
            _ => None,
        }
    }

    /// Get element classes (if element).
    pub fn element_classes(&self) -> &[String] {
        match &self.data {
            NodeData::Element { classes, .. } => classes,
            _ => &[],
        }
    }

    /// Get text content (if text node).
    pub fn text_content(&self) -> Option<&str> {
        match &self.data {
            NodeData::Text { content } => Some(content),
            _ => None,
        }
    }

    /// Get attribute value.
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        match &self.data {
            NodeData::Element { attrs, .. } => attrs
                .iter()
                .find(|a| a.name == name)
                .map(|a| a.value.as_str()),
            _ => None,
        }
    }

    /// Check if an attribute is present.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.get_attribute(name).is_some()
    }

    /// Set an attribute, refreshing the cached id/class values.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        if let NodeData::Element {
            attrs, id, classes, ..
        } = &mut self.data
        {
            match attrs.iter_mut().find(|a| a.name == name) {
                Some(attr) => attr.value = value.into(),
                None => attrs.push(Attribute::new(name, value)),
            }

            if name == "id" {
                *id = Some(value.into());
            } else if name == "class" {
                *classes = value.split_whitespace().map(|s| s.into()).collect();
            }
        }
    }

    /// Remove an attribute.
    pub fn remove_attribute(&mut self, name: &str) {
        if let NodeData::Element {
            attrs, id, classes, ..
        } = &mut self.data
        {
            attrs.retain(|a| a.name != name);
            if name == "id" {
                *id = None;
            } else if name == "class" {
                classes.clear();
            }
        }
    }

    /// Check if element has a class.
    pub fn has_class(&self, class: &str) -> bool {
        match &self.data {
            NodeData::Element { classes, .. } => classes.iter().any(|c| c == class),
            _ => false,
        }
    }

    /// Get the element's inline style.
    pub fn style(&self) -> Option<&InlineStyle> {
        match &self.data {
            NodeData::Element { style, .. } => Some(style),
            _ => None,
        }
    }

    /// Get the element's inline style, mutable.
    pub fn style_mut(&mut self) -> Option<&mut InlineStyle> {
        match &mut self.data {
            NodeData::Element { style, .. } => Some(style),
            _ => None,
        }
    }

    /// Check if this is an element laid out as a block by default.
    pub fn is_block_level_element(&self) -> bool {
        if let Some(name) = self.tag_name() {
            matches!(
                name,
                "address"
                    | "article"
                    | "aside"
                    | "blockquote"
                    | "div"
                    | "fieldset"
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
                    | "main"
                    | "nav"
                    | "ol"
                    | "p"
                    | "pre"
                    | "section"
                    | "table"
                    | "ul"
            )
        } else {
            false
        }
    }

    /// Check if node has children.
    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.data {
            NodeData::Document { .. } => write!(f, "#document"),
            NodeData::ShadowRoot { .. } => write!(f, "#shadow-root"),
            NodeData::Element { name, .. } => write!(f, "<{}>", name),
            NodeData::Text { content } => {
                if content.len() > 20 {
                    write!(f, "\"{}...\"", &content[..20])
                } else {
                    write!(f, "\"{}\"", content)
                }
            }
            NodeData::Comment { content } => write!(f, "<!-- {} -->", content),
        }
    }
}
