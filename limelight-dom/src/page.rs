//! Page and frame tree
//!
//! A page is one node arena plus the frame tree over it: the root window
//! and its same-origin iframes, each with its own document node. Frame
//! accessibility is an explicit capability - a cross-origin frame is
//! marked `CrossOrigin` and its document is simply never touched by
//! consumers honoring the capability, instead of access being probed with
//! a caught exception.

use alloc::vec::Vec;

use crate::events::{Event, EventType, KeyboardEventData, ListenerTag, ModifierKeys, MouseEventData};
use crate::node::NodeId;
use crate::tree::DomTree;

/// Frame ID - index into the page's frame list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(pub usize);

/// Whether a frame's document is accessible to the inspecting script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameAccess {
    /// Same-origin: the document may be instrumented.
    SameOrigin,
    /// Cross-origin: the document is off limits; walkers skip the subtree.
    CrossOrigin,
}

/// A frame: the root window or an iframe.
#[derive(Debug)]
pub struct Frame {
    /// This frame's ID.
    pub id: FrameId,
    /// The frame's document node.
    pub document: NodeId,
    /// Parent frame, `None` for the root window.
    pub parent: Option<FrameId>,
    /// Child frames, in frame-list order.
    pub children: Vec<FrameId>,
    /// Access capability.
    pub access: FrameAccess,
    /// Frame-local walk path from the root window (root: empty), rebuilt
    /// on every engine start.
    pub inspect_path: Vec<usize>,
}

impl Frame {
    /// Check whether this frame's document may be touched.
    pub fn is_accessible(&self) -> bool {
        self.access == FrameAccess::SameOrigin
    }
}

/// A page: node arena + frame tree.
#[derive(Debug)]
pub struct Page {
    /// The page-wide node arena.
    pub tree: DomTree,
    frames: Vec<Frame>,
}

impl Page {
    /// Create a new page with an empty root document.
    pub fn new() -> Self {
        let mut tree = DomTree::new();
        let document = tree.create_document();
        let root = Frame {
            id: FrameId(0),
            document,
            parent: None,
            children: Vec::new(),
            access: FrameAccess::SameOrigin,
            inspect_path: Vec::new(),
        };
        Self {
            tree,
            frames: alloc::vec![root],
        }
    }

    /// The root window frame.
    pub fn root(&self) -> FrameId {
        FrameId(0)
    }

    /// Add a child frame with a fresh document node.
    pub fn add_frame(&mut self, parent: FrameId, access: FrameAccess) -> FrameId {
        let document = self.tree.create_document();
        let id = FrameId(self.frames.len());
        self.frames.push(Frame {
            id,
            document,
            parent: Some(parent),
            children: Vec::new(),
            access,
            inspect_path: Vec::new(),
        });
        self.frames[parent.0].children.push(id);
        id
    }

    /// Get a frame.
    pub fn frame(&self, id: FrameId) -> &Frame {
        &self.frames[id.0]
    }

    /// Get a frame, mutable.
    pub fn frame_mut(&mut self, id: FrameId) -> &mut Frame {
        &mut self.frames[id.0]
    }

    /// Iterate over all frames.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter()
    }

    /// Number of frames.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// A frame's document node.
    pub fn document(&self, id: FrameId) -> NodeId {
        self.frames[id.0].document
    }

    /// The root window's document node.
    pub fn main_document(&self) -> NodeId {
        self.frames[0].document
    }

    /// Create `<html>`/`<body>` under a frame's document and return both.
    pub fn scaffold_document(&mut self, frame: FrameId) -> (NodeId, NodeId) {
        let document = self.document(frame);
        let html = self.tree.create_element("html");
        let body = self.tree.create_element("body");
        self.tree.append_child(document, html);
        self.tree.append_child(html, body);
        (html, body)
    }

    /// Build a pointer event targeting `deepest`, with composed path and
    /// retargeting computed from the tree.
    pub fn pointer_event(&self, event_type: EventType, deepest: NodeId) -> Event {
        self.pointer_event_with(event_type, deepest, MouseEventData::default())
    }

    /// Build a pointer event with explicit mouse data.
    pub fn pointer_event_with(
        &self,
        event_type: EventType,
        deepest: NodeId,
        data: MouseEventData,
    ) -> Event {
        Event::at(&self.tree, event_type, deepest).with_mouse(data)
    }

    /// Build a keyboard event delivered to a frame's document.
    pub fn key_event(
        &self,
        frame: FrameId,
        event_type: EventType,
        key: &str,
        modifiers: ModifierKeys,
    ) -> Event {
        Event::at(&self.tree, event_type, self.document(frame)).with_keyboard(KeyboardEventData {
            key: key.into(),
            modifiers,
        })
    }

    /// Whether navigation is currently vetoed by a before-unload listener
    /// on the root document.
    pub fn navigation_blocked(&self) -> bool {
        self.tree
            .event_listener_count(self.main_document(), EventType::BeforeUnload)
            > 0
    }

    /// Whether a given owner tag has bound listeners on a frame's document.
    pub fn frame_instrumented(&self, frame: FrameId, tag: ListenerTag) -> bool {
        let document = self.document(frame);
        self.tree.has_event_listener(document, EventType::MouseMove, tag)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}
