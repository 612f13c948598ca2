//! DOM Tree - page-wide node arena and tree management
//!
//! A single arena backs every document, shadow root, and frame of a page so
//! that moving a subtree between documents (which the inspection overlay
//! does when the pointer crosses into an iframe) is plain link surgery,
//! the way DOM adoption behaves.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::events::EventTarget;
use crate::geometry::Rect;
use crate::node::{Attribute, Node, NodeData, NodeId};

/// The node arena for a page.
#[derive(Debug, Default)]
pub struct DomTree {
    /// All nodes of the page.
    pub(crate) nodes: Vec<Node>,
    /// Viewport-relative client rectangles, set by the host/layout.
    pub(crate) client_rects: HashMap<NodeId, Rect>,
    /// Offset heights, set by the host/layout.
    pub(crate) offset_heights: HashMap<NodeId, f32>,
    /// Event listener registries by node.
    pub(crate) event_targets: BTreeMap<NodeId, EventTarget>,
}

impl DomTree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // ========================================================================
    // Node creation
    // ========================================================================

    /// Create a new document node.
    pub fn create_document(&mut self) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new_document(id));
        id
    }

    /// Create a new element.
    pub fn create_element(&mut self, tag_name: &str) -> NodeId {
        self.create_element_with_attrs(tag_name, Vec::new())
    }

    /// Create a new element with attributes.
    pub fn create_element_with_attrs(&mut self, tag_name: &str, attrs: Vec<Attribute>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new_element(id, tag_name, attrs));
        id
    }

    /// Create a new text node.
    pub fn create_text(&mut self, content: String) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new_text(id, content));
        id
    }

    /// Create a new comment node.
    pub fn create_comment(&mut self, content: String) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new_comment(id, content));
        id
    }

    /// Attach a shadow root to a host element. The fragment has no parent
    /// link; `root_of` stops at it.
    pub fn attach_shadow(&mut self, host: NodeId) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new_shadow_root(id, host));
        id
    }

    // ========================================================================
    // Link surgery
    // ========================================================================

    /// Append a child to a parent.
    pub fn append_child(&mut self, parent_id: NodeId, child_id: NodeId) {
        // Set child's parent
        if let Some(child) = self.nodes.get_mut(child_id) {
            child.parent = Some(parent_id);
        }

        // Get parent's current last child
        let old_last_child = self.nodes.get(parent_id).and_then(|p| p.last_child);

        // Update old last child's next_sibling
        if let Some(old_last_id) = old_last_child {
            if let Some(old_last) = self.nodes.get_mut(old_last_id) {
                old_last.next_sibling = Some(child_id);
            }
        }

        // Update child's prev_sibling
        if let Some(child) = self.nodes.get_mut(child_id) {
            child.prev_sibling = old_last_child;
        }

        // Update parent
        if let Some(parent) = self.nodes.get_mut(parent_id) {
            if parent.first_child.is_none() {
                parent.first_child = Some(child_id);
            }
            parent.last_child = Some(child_id);
        }
    }

    /// Insert a child before another child.
    pub fn insert_before(
        &mut self,
        parent_id: NodeId,
        new_child_id: NodeId,
        ref_child_id: Option<NodeId>,
    ) {
        let ref_id = match ref_child_id {
            Some(id) => id,
            None => {
                self.append_child(parent_id, new_child_id);
                return;
            }
        };

        let prev_id = self.nodes.get(ref_id).and_then(|n| n.prev_sibling);

        // Update new child
        if let Some(new_child) = self.nodes.get_mut(new_child_id) {
            new_child.parent = Some(parent_id);
            new_child.prev_sibling = prev_id;
            new_child.next_sibling = Some(ref_id);
        }

        // Update ref child's prev_sibling
        if let Some(ref_child) = self.nodes.get_mut(ref_id) {
            ref_child.prev_sibling = Some(new_child_id);
        }

        // Update previous sibling's next_sibling
        if let Some(prev_id) = prev_id {
            if let Some(prev) = self.nodes.get_mut(prev_id) {
                prev.next_sibling = Some(new_child_id);
            }
        } else {
            // new child is first child
            if let Some(parent) = self.nodes.get_mut(parent_id) {
                parent.first_child = Some(new_child_id);
            }
        }
    }

    /// Detach a node from its parent. The node and its subtree stay in the
    /// arena and can be re-appended elsewhere.
    pub fn detach(&mut self, child_id: NodeId) {
        let (parent_id, prev_id, next_id) = {
            let child = match self.nodes.get(child_id) {
                Some(c) => c,
                None => return,
            };
            (child.parent, child.prev_sibling, child.next_sibling)
        };

        // Update previous sibling
        if let Some(prev_id) = prev_id {
            if let Some(prev) = self.nodes.get_mut(prev_id) {
                prev.next_sibling = next_id;
            }
        } else if let Some(parent_id) = parent_id {
            // child was first child
            if let Some(parent) = self.nodes.get_mut(parent_id) {
                parent.first_child = next_id;
            }
        }

        // Update next sibling
        if let Some(next_id) = next_id {
            if let Some(next) = self.nodes.get_mut(next_id) {
                next.prev_sibling = prev_id;
            }
        } else if let Some(parent_id) = parent_id {
            // child was last child
            if let Some(parent) = self.nodes.get_mut(parent_id) {
                parent.last_child = prev_id;
            }
        }

        // Clear child's links
        if let Some(child) = self.nodes.get_mut(child_id) {
            child.parent = None;
            child.prev_sibling = None;
            child.next_sibling = None;
        }
    }

    // ========================================================================
    // Tree queries
    // ========================================================================

    /// Get children of a node.
    pub fn children(&self, parent_id: NodeId) -> Vec<NodeId> {
        let mut children = Vec::new();
        let mut child_id = self.nodes.get(parent_id).and_then(|p| p.first_child);

        while let Some(id) = child_id {
            children.push(id);
            child_id = self.nodes.get(id).and_then(|n| n.next_sibling);
        }

        children
    }

    /// Get child element nodes.
    pub fn child_elements(&self, parent_id: NodeId) -> Vec<NodeId> {
        self.children(parent_id)
            .into_iter()
            .filter(|&id| self.nodes.get(id).map(|n| n.is_element()).unwrap_or(false))
            .collect()
    }

    /// First element child of a node.
    pub fn first_element_child(&self, parent_id: NodeId) -> Option<NodeId> {
        let mut child_id = self.nodes.get(parent_id).and_then(|p| p.first_child);
        while let Some(id) = child_id {
            let node = self.nodes.get(id)?;
            if node.is_element() {
                return Some(id);
            }
            child_id = node.next_sibling;
        }
        None
    }

    /// Get the parent node.
    pub fn parent(&self, node_id: NodeId) -> Option<NodeId> {
        self.get(node_id).and_then(|n| n.parent)
    }

    /// Get the parent element, `None` across a document or shadow-root
    /// boundary (the `parentElement` contract).
    pub fn parent_element(&self, node_id: NodeId) -> Option<NodeId> {
        let parent_id = self.parent(node_id)?;
        let parent = self.get(parent_id)?;
        if parent.is_element() {
            Some(parent_id)
        } else {
            None
        }
    }

    /// Get ancestors of a node (from parent to root).
    pub fn ancestors(&self, node_id: NodeId) -> Vec<NodeId> {
        let mut ancestors = Vec::new();
        let mut current = self.parent(node_id);

        while let Some(id) = current {
            ancestors.push(id);
            current = self.parent(id);
        }

        ancestors
    }

    /// Get the root node of a node's tree: the document node, or the
    /// shadow-root fragment for nodes inside a shadow tree.
    pub fn root_of(&self, node_id: NodeId) -> NodeId {
        let mut current = node_id;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current
    }

    /// Retarget a node for listeners in document scope: a node inside a
    /// shadow tree is reported as its (outermost) shadow host.
    pub fn retarget(&self, node_id: NodeId) -> NodeId {
        let mut current = node_id;
        loop {
            let root = self.root_of(current);
            match self.get(root).and_then(|n| n.shadow_host()) {
                Some(host) => current = host,
                None => return current,
            }
        }
    }

    /// Get the document element (e.g. `html`) of a document node.
    pub fn document_element(&self, document_id: NodeId) -> Option<NodeId> {
        self.first_element_child(document_id)
    }

    /// Get the body element of a document node.
    pub fn body_of(&self, document_id: NodeId) -> Option<NodeId> {
        let root = self.document_element(document_id)?;
        self.child_elements(root)
            .into_iter()
            .find(|&id| self.get(id).and_then(|n| n.tag_name()) == Some("body"))
    }

    /// Check whether a root node is a document with a body.
    pub fn has_body(&self, root_id: NodeId) -> bool {
        self.get(root_id).map(|n| n.is_document()).unwrap_or(false)
            && self.body_of(root_id).is_some()
    }

    /// Get text content of a node (recursive).
    pub fn text_content(&self, node_id: NodeId) -> String {
        let node = match self.get(node_id) {
            Some(n) => n,
            None => return String::new(),
        };

        match &node.data {
            NodeData::Text { content } => content.clone(),
            NodeData::Element { .. } | NodeData::ShadowRoot { .. } | NodeData::Document { .. } => {
                let mut result = String::new();
                for child_id in self.children(node_id) {
                    result.push_str(&self.text_content(child_id));
                }
                result
            }
            _ => String::new(),
        }
    }

    /// Replace a node's children with a single text node.
    pub fn set_text_content(&mut self, node_id: NodeId, text: &str) {
        for child in self.children(node_id) {
            self.detach(child);
        }
        let text_id = self.create_text(text.into());
        self.append_child(node_id, text_id);
    }

    /// Get the DOM node name of a node.
    pub fn node_name(&self, node_id: NodeId) -> String {
        self.get(node_id)
            .map(|n| n.node_name())
            .unwrap_or_default()
    }

    // ========================================================================
    // Attributes and scroll state
    // ========================================================================

    /// Get an attribute value.
    pub fn get_attribute(&self, node_id: NodeId, name: &str) -> Option<&str> {
        self.get(node_id).and_then(|n| n.get_attribute(name))
    }

    /// Check whether an attribute is present.
    pub fn has_attribute(&self, node_id: NodeId, name: &str) -> bool {
        self.get(node_id).map(|n| n.has_attribute(name)).unwrap_or(false)
    }

    /// Set an attribute value.
    pub fn set_attribute(&mut self, node_id: NodeId, name: &str, value: &str) {
        if let Some(node) = self.get_mut(node_id) {
            node.set_attribute(name, value);
        }
    }

    /// Remove an attribute.
    pub fn remove_attribute(&mut self, node_id: NodeId, name: &str) {
        if let Some(node) = self.get_mut(node_id) {
            node.remove_attribute(name);
        }
    }

    /// Set a single inline style property on an element.
    pub fn set_style_property(&mut self, node_id: NodeId, name: &str, value: &str) {
        if let Some(style) = self.get_mut(node_id).and_then(|n| n.style_mut()) {
            style.set(name, value);
        }
    }

    /// Read a single inline style property off an element.
    pub fn style_property(&self, node_id: NodeId, name: &str) -> Option<&str> {
        self.get(node_id).and_then(|n| n.style()).and_then(|s| s.get(name))
    }

    /// Set a document node's scroll offsets.
    pub fn set_scroll(&mut self, document_id: NodeId, top: f32, left: f32) {
        if let Some(node) = self.get_mut(document_id) {
            if let NodeData::Document {
                scroll_top,
                scroll_left,
            } = &mut node.data
            {
                *scroll_top = top;
                *scroll_left = left;
            }
        }
    }

    /// Read a document node's scroll offsets, `(0, 0)` for non-documents.
    pub fn scroll_of(&self, root_id: NodeId) -> (f32, f32) {
        match self.get(root_id).map(|n| &n.data) {
            Some(NodeData::Document {
                scroll_top,
                scroll_left,
            }) => (*scroll_top, *scroll_left),
            _ => (0.0, 0.0),
        }
    }
}
