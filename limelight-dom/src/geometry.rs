//! Geometry primitives and layout metrics
//!
//! The host (or a test harness) publishes viewport-relative client
//! rectangles and offset heights for the nodes it has laid out; the engine
//! only ever reads them. Absent metrics read as zero, never as an error.

use crate::node::NodeId;
use crate::tree::DomTree;

/// A 2D point with x and y coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

/// A 2D size with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
        }
    }
}

/// A rectangle defined by position (top-left) and size
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn from_point_size(point: Point, size: Size) -> Self {
        Self {
            x: point.x,
            y: point.y,
            width: size.width,
            height: size.height,
        }
    }

    /// Top edge (y).
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Left edge (x).
    pub fn left(&self) -> f32 {
        self.x
    }
}

impl DomTree {
    /// Publish a node's viewport-relative client rectangle.
    pub fn set_client_rect(&mut self, node_id: NodeId, rect: Rect) {
        self.client_rects.insert(node_id, rect);
    }

    /// Read a node's client rectangle; zero when none was published.
    pub fn client_rect(&self, node_id: NodeId) -> Rect {
        self.client_rects.get(&node_id).copied().unwrap_or_default()
    }

    /// Publish a node's offset height.
    pub fn set_offset_height(&mut self, node_id: NodeId, height: f32) {
        self.offset_heights.insert(node_id, height);
    }

    /// Read a node's offset height; 0 when none was published.
    pub fn offset_height(&self, node_id: NodeId) -> f32 {
        self.offset_heights.get(&node_id).copied().unwrap_or(0.0)
    }
}
