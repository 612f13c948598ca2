//! DOM Traversal - tree iteration helpers

use alloc::vec;
use alloc::vec::Vec;

use crate::node::{Node, NodeId};
use crate::tree::DomTree;

/// Depth-first node iterator over a subtree, in document order.
pub struct NodeIterator<'a> {
    tree: &'a DomTree,
    stack: Vec<NodeId>,
    elements_only: bool,
}

impl<'a> NodeIterator<'a> {
    /// Create a new node iterator.
    pub fn new(tree: &'a DomTree, root: NodeId) -> Self {
        NodeIterator {
            tree,
            stack: vec![root],
            elements_only: false,
        }
    }

    /// Create an iterator yielding elements only.
    pub fn elements(tree: &'a DomTree, root: NodeId) -> Self {
        NodeIterator {
            tree,
            stack: vec![root],
            elements_only: true,
        }
    }
}

impl<'a> Iterator for NodeIterator<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node_id) = self.stack.pop() {
            let node = self.tree.get(node_id)?;

            // Add children in reverse order (so first child is processed first)
            let mut child_id = node.last_child;
            while let Some(id) = child_id {
                self.stack.push(id);
                child_id = self.tree.get(id).and_then(|n| n.prev_sibling);
            }

            if !self.elements_only || node.is_element() {
                return Some(node);
            }
        }

        None
    }
}

/// Extension methods for DomTree.
impl DomTree {
    /// Create a node iterator over a subtree.
    pub fn iter_subtree(&self, root: NodeId) -> NodeIterator {
        NodeIterator::new(self, root)
    }

    /// Get all descendants of a node.
    pub fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        NodeIterator::new(self, root)
            .filter(|n| n.id != root)
            .map(|n| n.id)
            .collect()
    }

    /// Get all element descendants of a node, in document order.
    pub fn element_descendants(&self, root: NodeId) -> Vec<NodeId> {
        NodeIterator::elements(self, root)
            .filter(|n| n.id != root)
            .map(|n| n.id)
            .collect()
    }

    /// Check if node is a descendant of another.
    pub fn is_descendant_of(&self, node_id: NodeId, ancestor_id: NodeId) -> bool {
        self.ancestors(node_id).contains(&ancestor_id)
    }
}
