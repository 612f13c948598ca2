//! Target resolution
//!
//! Maps a raw pointer event to the effective inspected element: deepest
//! path entry, ancestor climb by the current depth, self-exclusion of the
//! overlay, the hint-panel marker, and the configured exclusion selectors.

use alloc::vec::Vec;

use limelight_css::SelectorParser;
use limelight_dom::{Event, EventType, NodeId, Page};

use crate::geometry;
use crate::handlers::{Dispatch, EventKind};
use crate::overlay::HINT_PANEL_ATTR;
use crate::Engine;

impl Engine {
    /// The click/mousemove path: hook veto, target resolution, geometry,
    /// dispatch.
    pub(crate) fn emit_pointer(&mut self, page: &mut Page, event: &Event) {
        if !self.handlers.hook_allows(event) {
            return;
        }

        let origin_target = event.target;
        let mut target = event.deepest_target();

        // Climb the requested number of ancestors; an exhausted chain
        // stops at the nearest available ancestor.
        for _ in 0..self.depth {
            match page.tree.parent_element(target) {
                Some(parent) => target = parent,
                None => break,
            }
        }

        let is_element = page
            .tree
            .get(target)
            .map(|n| n.is_element())
            .unwrap_or(false);
        if !is_element {
            return;
        }
        if Some(target) == self.overlay {
            return;
        }
        if page.tree.has_attribute(target, HINT_PANEL_ATTR) {
            return;
        }
        if self.is_excluded(page, target) {
            return;
        }

        self.current_element = Some(target);

        if event.event_type == EventType::MouseMove {
            if let Some(overlay) = self.overlay {
                geometry::position_overlay(page, target, overlay);
            }
        }

        self.reposition_label(page, origin_target);

        if let Some(kind) = EventKind::of_event(event.event_type) {
            self.handlers.emit(
                kind,
                &Dispatch {
                    target: Some(target),
                    event: Some(event),
                    origin_target: Some(origin_target),
                    depth: self.depth,
                },
            );
        }
    }

    /// Exclusion check: one combined query against the main document per
    /// event, compared by identity. The query must be re-run every event -
    /// exclusion selectors may match dynamic content.
    fn is_excluded(&self, page: &Page, target: NodeId) -> bool {
        if self.options.excludes.is_empty() {
            return false;
        }

        let combined = self.options.excludes.join(",");
        let selectors = match SelectorParser::new(&combined).parse_selector_list() {
            Ok(selectors) => selectors,
            Err(err) => {
                log::debug!("[limelight] unusable exclusion selector '{}': {}", combined, err);
                return false;
            }
        };

        let excluded: Vec<NodeId> = page
            .tree
            .query_selector_all(page.main_document(), &selectors);
        excluded.contains(&target)
    }

    /// Climb `depth` ancestors from `from`, clamping `depth` to the
    /// nearest available ancestor distance when the chain runs out.
    pub(crate) fn climb_from(&mut self, page: &Page, from: NodeId) -> NodeId {
        let mut node = from;
        for i in 0..self.depth {
            match page.tree.parent_element(node) {
                Some(parent) => node = parent,
                None => {
                    self.depth = i.saturating_sub(1);
                    break;
                }
            }
        }
        node
    }
}
