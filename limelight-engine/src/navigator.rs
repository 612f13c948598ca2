//! Depth navigator and keyboard/mouse routines
//!
//! Ctrl/Cmd + ArrowUp widens the inspection to the next ancestor,
//! Ctrl/Cmd + ArrowDown narrows it back (floored at zero). A depth change
//! while something is inspected re-resolves the ancestor chain and moves
//! the overlay; the generic keydown/keyup dispatch fires regardless.

use limelight_dom::{Event, Page};

use crate::geometry;
use crate::handlers::{Dispatch, EventKind};
use crate::Engine;

impl Engine {
    pub(crate) fn handle_keydown(&mut self, page: &mut Page, event: &mut Event) {
        if event.modifiers().primary() {
            let mut adjusted = false;
            match event.key() {
                Some("ArrowUp") => {
                    adjusted = true;
                    self.depth += 1;
                }
                Some("ArrowDown") => {
                    adjusted = true;
                    self.depth = self.depth.saturating_sub(1);
                }
                _ => {}
            }

            if adjusted {
                if let Some(current) = self.current_element {
                    event.prevent_default();
                    let reached = self.climb_from(page, current);
                    if let Some(overlay) = self.overlay {
                        geometry::position_overlay(page, reached, overlay);
                    }
                }
            }
        }

        self.handlers.emit(
            EventKind::KeyDown,
            &Dispatch {
                target: None,
                event: Some(event),
                origin_target: None,
                depth: self.depth,
            },
        );
    }

    pub(crate) fn handle_keyup(&mut self, event: &Event) {
        self.handlers.emit(
            EventKind::KeyUp,
            &Dispatch {
                target: None,
                event: Some(event),
                origin_target: None,
                depth: self.depth,
            },
        );
    }

    /// Swallow Ctrl/Cmd-clicks so depth chords don't trigger host page
    /// mousedown behavior. Nothing is dispatched here.
    pub(crate) fn handle_mousedown(&mut self, event: &mut Event) {
        if event.modifiers().primary() {
            event.prevent_default();
            event.stop_propagation();
        }
    }
}
