//! Selector matching against the node arena
//!
//! Right-to-left matching: the rightmost compound selector is checked
//! against the candidate element, then combinators walk the ancestor
//! chain. Every query walks the live tree - results are point-in-time
//! snapshots, which the engine's exclusion semantics rely on.

use alloc::string::String;
use alloc::vec::Vec;

use limelight_css::selector::{
    AttributeOperator, CaseSensitivity, Combinator, Selector, SelectorComponent, SelectorList,
};

use crate::node::{Node, NodeId};
use crate::tree::DomTree;

/// Check if any selector in a list matches a node.
pub fn matches(tree: &DomTree, node_id: NodeId, selectors: &SelectorList) -> bool {
    selectors
        .selectors
        .iter()
        .any(|selector| matches_selector(tree, node_id, selector))
}

/// Check if a single selector matches a node.
pub fn matches_selector(tree: &DomTree, node_id: NodeId, selector: &Selector) -> bool {
    if selector.components.is_empty() {
        return false;
    }
    matches_up_to(tree, node_id, &selector.components, selector.components.len())
}

/// Match `components[..end]` with the rightmost compound anchored at `node_id`.
fn matches_up_to(
    tree: &DomTree,
    node_id: NodeId,
    components: &[SelectorComponent],
    end: usize,
) -> bool {
    let node = match tree.get(node_id) {
        Some(n) if n.is_element() => n,
        _ => return false,
    };

    // The rightmost compound runs back to the previous combinator.
    let start = components[..end]
        .iter()
        .rposition(SelectorComponent::is_combinator)
        .map(|pos| pos + 1)
        .unwrap_or(0);

    for component in &components[start..end] {
        if !component_matches(node, component) {
            return false;
        }
    }

    if start == 0 {
        return true;
    }

    match components[start - 1] {
        SelectorComponent::Combinator(Combinator::Child) => tree
            .parent_element(node_id)
            .map(|parent| matches_up_to(tree, parent, components, start - 1))
            .unwrap_or(false),
        SelectorComponent::Combinator(Combinator::Descendant) => {
            let mut current = tree.parent_element(node_id);
            while let Some(ancestor) = current {
                if matches_up_to(tree, ancestor, components, start - 1) {
                    return true;
                }
                current = tree.parent_element(ancestor);
            }
            false
        }
        _ => false,
    }
}

/// Check if a simple component matches a node.
fn component_matches(node: &Node, component: &SelectorComponent) -> bool {
    match component {
        SelectorComponent::Universal => true,

        SelectorComponent::Type(name) => node
            .tag_name()
            .map(|t| t.eq_ignore_ascii_case(name))
            .unwrap_or(false),

        SelectorComponent::Class(class) => node.has_class(class),

        SelectorComponent::Id(id) => node.element_id() == Some(id.as_str()),

        SelectorComponent::Attribute {
            name,
            operator,
            value,
            case_sensitivity,
        } => {
            let attr_value = match node.get_attribute(name) {
                Some(v) => v,
                None => return false,
            };

            let expected = match value {
                Some(expected) => expected.as_str(),
                // Just checking for presence
                None => return matches!(operator, AttributeOperator::Exists),
            };

            let attr_lower: String;
            let expected_lower: String;
            let (attr_value, expected) = match case_sensitivity {
                CaseSensitivity::CaseSensitive => (attr_value, expected),
                CaseSensitivity::AsciiCaseInsensitive => {
                    attr_lower = attr_value.to_ascii_lowercase();
                    expected_lower = expected.to_ascii_lowercase();
                    (attr_lower.as_str(), expected_lower.as_str())
                }
            };

            match operator {
                AttributeOperator::Exists => true,
                AttributeOperator::Equals => attr_value == expected,
                AttributeOperator::Includes => {
                    attr_value.split_whitespace().any(|w| w == expected)
                }
                AttributeOperator::DashMatch => {
                    attr_value == expected
                        || (attr_value.starts_with(expected)
                            && attr_value[expected.len()..].starts_with('-'))
                }
                AttributeOperator::Prefix => attr_value.starts_with(expected),
                AttributeOperator::Suffix => attr_value.ends_with(expected),
                AttributeOperator::Substring => attr_value.contains(expected),
            }
        }

        SelectorComponent::Combinator(_) => false,
    }
}

impl DomTree {
    /// Find the first element under `root` matching the selector list, in
    /// document order.
    pub fn query_selector(&self, root: NodeId, selectors: &SelectorList) -> Option<NodeId> {
        self.element_descendants(root)
            .into_iter()
            .find(|&id| matches(self, id, selectors))
    }

    /// Find every element under `root` matching the selector list, in
    /// document order.
    pub fn query_selector_all(&self, root: NodeId, selectors: &SelectorList) -> Vec<NodeId> {
        self.element_descendants(root)
            .into_iter()
            .filter(|&id| matches(self, id, selectors))
            .collect()
    }
}
