//! Overlay management
//!
//! Resolution and lifecycle of the highlight boxes: the single inspection
//! overlay (with its tag-name label) and the pooled multi-target boxes
//! used by check mode.

use alloc::vec::Vec;

use limelight_css::SelectorParser;
use limelight_dom::{NodeId, Page};

use crate::error::EngineError;
use crate::options::InspectorSpec;
use crate::Engine;

/// Class namespace added to the root document element while running.
pub const NAMESPACE: &str = "limelight";

/// Attribute marking elements (tooltips, hint panels) that must never
/// become inspection targets.
pub const HINT_PANEL_ATTR: &str = "hint-panel";

/// Class carried by every generated overlay box.
pub const OVERLAY_CLASS: &str = "inspector-element";

/// Tag of the generated single-overlay container.
pub const CONTAINER_TAG: &str = "inspector";

/// Tag of the generated multi-target pool container.
pub const POOL_TAG: &str = "inspector-list";

/// Default highlight fill.
pub const DEFAULT_HIGHLIGHT: &str = "rgba(255, 229, 190, 0.4)";

impl Engine {
    /// Resolve the overlay element: selector, explicit element, the
    /// previously resolved overlay, or a freshly created one.
    pub(crate) fn resolve_overlay(
        &mut self,
        page: &mut Page,
        is_check: bool,
    ) -> Result<NodeId, EngineError> {
        match self.options.inspector.clone() {
            InspectorSpec::Selector(selector) => {
                let list = SelectorParser::new(&selector)
                    .parse_selector_list()
                    .map_err(|err| {
                        EngineError::Resolution(alloc::format!(
                            "invalid inspector selector '{}': {}",
                            selector,
                            err
                        ))
                    })?;
                page.tree
                    .query_selector(page.main_document(), &list)
                    .ok_or_else(|| {
                        EngineError::Resolution("inspector element not found".into())
                    })
            }
            InspectorSpec::Element(element) => Ok(element),
            InspectorSpec::None => {
                if let Some(existing) = self.overlay {
                    return Ok(existing);
                }
                if self.options.create_inspector {
                    Ok(self.create_overlay(page, is_check))
                } else {
                    Err(EngineError::Resolution(
                        "inspector must be a css selector or a DOM element".into(),
                    ))
                }
            }
        }
    }

    /// Create the overlay box inside a fresh container under the main
    /// body. Outside check mode it gets a label child for the target's
    /// tag name.
    fn create_overlay(&mut self, page: &mut Page, is_check: bool) -> NodeId {
        let main_document = page.main_document();
        let container = page.tree.create_element(CONTAINER_TAG);
        if let Some(body) = page.tree.body_of(main_document) {
            page.tree.append_child(body, container);
        }

        let overlay = page.tree.create_element("div");
        apply_overlay_style(page, overlay);
        page.tree.append_child(container, overlay);

        if !is_check {
            let label = page.tree.create_element("div");
            for (name, value) in [
                ("position", "absolute"),
                ("left", "0"),
                ("top", "-41px"),
                ("height", "30px"),
                ("line-height", "30px"),
                ("background", "#333"),
                ("color", "#fff"),
                ("padding", "5px 10px"),
                ("width", "max-content"),
                ("white-space", "nowrap"),
            ] {
                page.tree.set_style_property(label, name, value);
            }
            page.tree.append_child(overlay, label);
        }

        self.owns_overlay = true;
        overlay
    }

    /// Grow or shrink the pooled overlay boxes to `count` and return them.
    pub(crate) fn pool_overlays(&mut self, page: &mut Page, count: usize) -> Vec<NodeId> {
        let container = match self.pool {
            Some(container) => container,
            None => {
                let main_document = page.main_document();
                let container = page.tree.create_element(POOL_TAG);
                match page.tree.body_of(main_document) {
                    Some(body) => page.tree.append_child(body, container),
                    None => page.tree.append_child(main_document, container),
                }
                self.pool = Some(container);
                container
            }
        };

        let mut boxes = page.tree.child_elements(container);
        while boxes.len() < count {
            let overlay = page.tree.create_element("div");
            apply_overlay_style(page, overlay);
            page.tree.append_child(container, overlay);
            boxes.push(overlay);
        }
        while boxes.len() > count {
            if let Some(surplus) = boxes.pop() {
                page.tree.detach(surplus);
            }
        }

        boxes
    }

    /// Remove the pool container, if any.
    pub(crate) fn remove_pool(&mut self, page: &mut Page) {
        if let Some(container) = self.pool.take() {
            page.tree.detach(container);
        }
    }

    /// Remove an auto-created overlay's container and clear the reference.
    pub(crate) fn remove_owned_overlay(&mut self, page: &mut Page) {
        if let Some(overlay) = self.overlay.take() {
            if let Some(container) = page.tree.parent_element(overlay) {
                page.tree.detach(container);
            }
        }
        self.owns_overlay = false;
    }

    /// Clear the geometry properties written by the resolver.
    pub(crate) fn clear_overlay_geometry(&self, page: &mut Page) {
        if let Some(overlay) = self.overlay {
            for name in ["top", "left", "width", "height"] {
                page.tree.set_style_property(overlay, name, "");
            }
        }
    }

    /// While inspecting, keep the label readable: drop it below the box
    /// when the hovered element sits against the viewport top.
    pub(crate) fn reposition_label(&self, page: &mut Page, origin_target: NodeId) {
        let overlay = match self.overlay {
            Some(overlay) => overlay,
            None => return,
        };
        let label = match page.tree.first_element_child(overlay) {
            Some(label) => label,
            None => return,
        };
        if page.tree.text_content(label).is_empty() {
            return;
        }

        let top = page.tree.client_rect(origin_target).top();
        let value = if top < 35.0 { "47px" } else { "-41px" };
        page.tree.set_style_property(label, "top", value);
    }

    /// Set the active overlay's background fill.
    pub(crate) fn set_highlight(&self, page: &mut Page, color: &str) {
        if let Some(overlay) = self.overlay {
            page.tree.set_style_property(overlay, "background", color);
        }
    }
}

/// The stock look of a generated overlay box.
fn apply_overlay_style(page: &mut Page, overlay: NodeId) {
    for (name, value) in [
        ("transition", "all 200ms"),
        ("position", "absolute"),
        ("top", "0px"),
        ("left", "0px"),
        ("width", "912px"),
        ("height", "630px"),
        ("pointer-events", "none"),
        ("z-index", "99999999999999999999"),
        ("border", "solid 2px red"),
    ] {
        page.tree.set_style_property(overlay, name, value);
    }
    page.tree.set_attribute(overlay, "class", OVERLAY_CLASS);
}
