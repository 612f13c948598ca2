//! Limelight DOM - the document-object-model host shim
//!
//! This crate provides the DOM surface the limelight inspection engine
//! runs against: an arena-allocated node tree shared by every document,
//! shadow root, and same-origin frame of a page, plus layout metrics,
//! inline styles, event listener registries, selector queries, and the
//! frame tree with explicit access capabilities. It implements the subset
//! of DOM semantics the engine and its test harness need, suitable for
//! no_std environments.

#![no_std]

extern crate alloc;

pub mod events;
pub mod geometry;
pub mod node;
pub mod page;
pub mod query;
pub mod style;
pub mod traversal;
pub mod tree;

pub use events::{
    Event, EventData, EventTarget, EventType, KeyboardEventData, Listener, ListenerOptions,
    ListenerTag, ModifierKeys, MouseEventData,
};
pub use geometry::{Point, Rect, Size};
pub use node::{Attribute, Node, NodeData, NodeId, NodeType};
pub use page::{Frame, FrameAccess, FrameId, Page};
pub use style::{InlineStyle, StyleProperty};
pub use traversal::NodeIterator;
pub use tree::DomTree;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Attribute, DomTree, Event, EventType, Frame, FrameAccess, FrameId, InlineStyle,
        ListenerOptions, ListenerTag, ModifierKeys, Node, NodeData, NodeId, NodeType, Page, Point,
        Rect, Size,
    };
}
