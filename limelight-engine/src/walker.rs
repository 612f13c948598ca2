//! Frame walker and binding state machine
//!
//! Walks the frame tree depth-first, skipping cross-origin subtrees,
//! rebuilding each frame's index path, and binding/unbinding the engine's
//! listeners on every accessible document. Click is bound capture-phase
//! so inspection sees it before host bubble handlers; everything else is
//! bubble-phase.

use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt;

use limelight_dom::{EventType, FrameId, ListenerOptions, Page};

use crate::overlay::NAMESPACE;
use crate::Engine;

/// Engine lifecycle state. `Idle` is only the pre-first-start state; once
/// stopped the engine never returns to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Running,
    Stopped,
}

impl Status {
    /// Get the status name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Running => "running",
            Status::Stopped => "stopped",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The bindings installed per accessible frame document.
const FRAME_BINDINGS: [(EventType, bool); 5] = [
    (EventType::Click, true),
    (EventType::MouseMove, false),
    (EventType::KeyDown, false),
    (EventType::KeyUp, false),
    (EventType::MouseDown, false),
];

impl Engine {
    /// Start sequence: walk, bind, tag, veto, transition to running.
    pub(crate) fn engine_start(&mut self, page: &mut Page) {
        let root = page.root();
        self.walk_start(page, root, &Vec::new());

        let main_document = page.main_document();
        if self.options.html_class {
            if let Some(root_element) = page.tree.document_element(main_document) {
                let class = page
                    .tree
                    .get_attribute(root_element, "class")
                    .unwrap_or("")
                    .to_string();
                page.tree.set_attribute(
                    root_element,
                    "class",
                    &alloc::format!("{} {}", class, NAMESPACE),
                );
            }
        }

        if self.options.block_redirection && !self.veto_installed {
            page.tree.add_event_listener(
                main_document,
                EventType::BeforeUnload,
                ListenerOptions::default(),
                self.tag,
            );
            self.veto_installed = true;
        }

        self.status = Status::Running;
        log::debug!("[limelight] engine running across {} frame(s)", page.frame_count());
    }

    /// Stop sequence: reverse the walk, strip the tag and veto, transition
    /// to stopped. Safe without a prior start - unbinding listeners that
    /// were never bound is a no-op.
    pub(crate) fn engine_stop(&mut self, page: &mut Page) {
        let root = page.root();
        self.walk_stop(page, root);

        let main_document = page.main_document();
        if self.options.html_class {
            if let Some(root_element) = page.tree.document_element(main_document) {
                if let Some(class) = page.tree.get_attribute(root_element, "class") {
                    let stripped =
                        class.replacen(&alloc::format!(" {}", NAMESPACE), "", 1);
                    page.tree.set_attribute(root_element, "class", &stripped);
                }
            }
        }

        if self.veto_installed {
            page.tree.remove_event_listeners(
                main_document,
                EventType::BeforeUnload,
                self.tag,
            );
            self.veto_installed = false;
        }

        self.status = Status::Stopped;
        log::debug!("[limelight] engine stopped");
    }

    /// Depth-first start walk: index subframes, then bind this frame's
    /// document (post-order, the root last).
    fn walk_start(&mut self, page: &mut Page, frame: FrameId, path: &[usize]) {
        let children = page.frame(frame).children.clone();
        for (index, child) in children.into_iter().enumerate() {
            if !page.frame(child).is_accessible() {
                log::debug!(
                    "[limelight] skipping cross-origin frame at index {} under {:?}",
                    index,
                    frame
                );
                continue;
            }

            let mut child_path = path.to_vec();
            child_path.push(index);
            page.frame_mut(child).inspect_path = child_path.clone();
            self.walk_start(page, child, &child_path);
        }

        self.bind_frame(page, frame);
    }

    /// The same walk in reverse, unbinding.
    fn walk_stop(&mut self, page: &mut Page, frame: FrameId) {
        let children = page.frame(frame).children.clone();
        for child in children {
            if !page.frame(child).is_accessible() {
                continue;
            }
            self.walk_stop(page, child);
        }

        self.unbind_frame(page, frame);
    }

    fn bind_frame(&mut self, page: &mut Page, frame: FrameId) {
        let document = page.document(frame);
        for (event_type, capture) in FRAME_BINDINGS {
            page.tree.add_event_listener(
                document,
                event_type,
                ListenerOptions { capture },
                self.tag,
            );
        }
    }

    fn unbind_frame(&mut self, page: &mut Page, frame: FrameId) {
        let document = page.document(frame);
        for (event_type, _) in FRAME_BINDINGS {
            page.tree.remove_event_listeners(document, event_type, self.tag);
        }
    }
}
