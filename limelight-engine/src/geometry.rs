//! Box-geometry calculator
//!
//! Positions the overlay over a target element given the target's root
//! context (main document, iframe document, or shadow root) and the
//! independent scroll origins involved. Every optional step is guarded
//! and no-ops on absence; there are no error paths.

use alloc::format;
use alloc::string::String;

use limelight_dom::{NodeId, Page};

/// Compute and write the overlay's absolute position and size for a
/// target, and refresh its label.
pub(crate) fn position_overlay(page: &mut Page, target: NodeId, overlay: NodeId) {
    let main_document = page.main_document();
    let tree = &mut page.tree;

    let current_root = tree.root_of(target);
    let origin_root = tree.root_of(overlay);

    // Inspection moved into another document (e.g. an iframe): adopt the
    // overlay's container into that document's body. Shadow roots have no
    // body and keep the overlay where it is.
    if current_root != origin_root && tree.has_body(current_root) {
        if let Some(container) = tree.parent_element(overlay) {
            if let Some(body) = tree.body_of(current_root) {
                tree.detach(container);
                tree.append_child(body, container);
            }
        }
    }

    // Compensation for fixed chrome stacked above the body: block-level
    // children of the main document's root element.
    let mut body_top = 0.0;
    if let Some(root_element) = tree.document_element(main_document) {
        for child in tree.child_elements(root_element) {
            let is_block = tree
                .get(child)
                .map(|n| n.is_block_level_element())
                .unwrap_or(false);
            if is_block {
                body_top += tree.offset_height(child);
            }
        }
    }

    let rect = tree.client_rect(target);

    let scroll_base = if tree.has_body(current_root) {
        current_root
    } else {
        origin_root
    };
    let (scroll_top, scroll_left) = tree.scroll_of(scroll_base);

    let top = (rect.top() - body_top + scroll_top).max(0.0);
    let left = (rect.left() + scroll_left).max(0.0);

    tree.set_style_property(overlay, "top", &px(top));
    tree.set_style_property(overlay, "left", &px(left));
    tree.set_style_property(overlay, "width", &px(rect.width));
    tree.set_style_property(overlay, "height", &px(rect.height));

    if let Some(label) = tree.first_element_child(overlay) {
        let name = tree.node_name(target);
        tree.set_text_content(label, &name);
    }
}

/// Format a pixel length.
pub(crate) fn px(value: f32) -> String {
    format!("{}px", value)
}
