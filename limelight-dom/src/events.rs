//! DOM Event System
//!
//! Event types, listener registries, and composed-path construction. The
//! engine binds listeners identified by an opaque owner tag rather than a
//! boxed callback: binding and unbinding are then plain inspectable state
//! on the document, and "remove the same function that was added" has a
//! direct analogue (remove by tag).

use alloc::string::String;
use alloc::vec::Vec;

use crate::node::NodeId;
use crate::tree::DomTree;

/// Event type categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventType {
    Click,
    MouseMove,
    MouseDown,
    KeyDown,
    KeyUp,
    BeforeUnload,
}

impl EventType {
    /// Get event type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Click => "click",
            EventType::MouseMove => "mousemove",
            EventType::MouseDown => "mousedown",
            EventType::KeyDown => "keydown",
            EventType::KeyUp => "keyup",
            EventType::BeforeUnload => "beforeunload",
        }
    }

    /// Parse event type from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "click" => Some(EventType::Click),
            "mousemove" => Some(EventType::MouseMove),
            "mousedown" => Some(EventType::MouseDown),
            "keydown" => Some(EventType::KeyDown),
            "keyup" => Some(EventType::KeyUp),
            "beforeunload" => Some(EventType::BeforeUnload),
            _ => None,
        }
    }

    /// Check if event bubbles by default.
    pub fn bubbles(&self) -> bool {
        !matches!(self, EventType::BeforeUnload)
    }
}

/// Modifier keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierKeys {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl ModifierKeys {
    /// Ctrl or Cmd held - the inspection chord.
    pub fn primary(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse event data.
#[derive(Debug, Clone, Default)]
pub struct MouseEventData {
    /// X coordinate relative to viewport.
    pub client_x: i32,
    /// Y coordinate relative to viewport.
    pub client_y: i32,
    /// Modifier keys.
    pub modifiers: ModifierKeys,
}

/// Keyboard event data.
#[derive(Debug, Clone, Default)]
pub struct KeyboardEventData {
    /// Key value (e.g., "a", "ArrowUp", "Escape").
    pub key: String,
    /// Modifier keys.
    pub modifiers: ModifierKeys,
}

/// Event-specific data.
#[derive(Debug, Clone)]
pub enum EventData {
    /// No additional data.
    None,
    /// Mouse event data.
    Mouse(MouseEventData),
    /// Keyboard event data.
    Keyboard(KeyboardEventData),
}

/// A dispatched event.
#[derive(Debug, Clone)]
pub struct Event {
    /// Event type.
    pub event_type: EventType,
    /// Target as seen in document scope (shadow-tree nodes are retargeted
    /// to their host).
    pub target: NodeId,
    /// Composed event path, deepest node first, crossing shadow boundaries
    /// up to and including the document node.
    pub path: Vec<NodeId>,
    /// Event-specific data.
    pub data: EventData,
    /// Whether default action was prevented.
    pub default_prevented: bool,
    /// Whether propagation was stopped.
    pub propagation_stopped: bool,
}

impl Event {
    /// Create a new event with a bare target and no path information.
    pub fn new(event_type: EventType, target: NodeId) -> Self {
        Self {
            event_type,
            target,
            path: Vec::new(),
            data: EventData::None,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Create an event targeting `deepest`, with the composed path and the
    /// document-scope target computed from the tree.
    pub fn at(tree: &DomTree, event_type: EventType, deepest: NodeId) -> Self {
        let mut path = Vec::new();
        let mut current = Some(deepest);
        while let Some(id) = current {
            path.push(id);
            current = match tree.parent(id) {
                Some(parent) => Some(parent),
                // Jump across a shadow boundary to the host, the way the
                // composed path does.
                None => tree.get(id).and_then(|n| n.shadow_host()),
            };
        }

        Self {
            event_type,
            target: tree.retarget(deepest),
            path,
            data: EventData::None,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Attach mouse data.
    pub fn with_mouse(mut self, data: MouseEventData) -> Self {
        self.data = EventData::Mouse(data);
        self
    }

    /// Attach keyboard data.
    pub fn with_keyboard(mut self, data: KeyboardEventData) -> Self {
        self.data = EventData::Keyboard(data);
        self
    }

    /// Prevent default action.
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Stop propagation.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// The modifier keys held, if the event carries any.
    pub fn modifiers(&self) -> ModifierKeys {
        match &self.data {
            EventData::Mouse(m) => m.modifiers,
            EventData::Keyboard(k) => k.modifiers,
            EventData::None => ModifierKeys::default(),
        }
    }

    /// The key value for keyboard events.
    pub fn key(&self) -> Option<&str> {
        match &self.data {
            EventData::Keyboard(k) => Some(k.key.as_str()),
            _ => None,
        }
    }

    /// The deepest element on the composed path, falling back to the
    /// direct target when no path information is available.
    pub fn deepest_target(&self) -> NodeId {
        self.path.first().copied().unwrap_or(self.target)
    }
}

/// Listener options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// Listen during capture phase.
    pub capture: bool,
}

impl ListenerOptions {
    /// Capture-phase options.
    pub fn capture() -> Self {
        Self { capture: true }
    }
}

/// Opaque owner tag for a listener registration. Listeners added with a
/// tag are removed by the same tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerTag(pub u64);

/// A listener registration.
#[derive(Debug, Clone)]
pub struct Listener {
    /// Event type listened for.
    pub event_type: EventType,
    /// Listener options.
    pub options: ListenerOptions,
    /// Owner tag.
    pub tag: ListenerTag,
    /// Unique ID.
    pub id: u64,
}

/// Event target with listener management.
#[derive(Debug, Default)]
pub struct EventTarget {
    listeners: Vec<Listener>,
    next_id: u64,
}

impl EventTarget {
    /// Create new event target.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener.
    pub fn add_listener(
        &mut self,
        event_type: EventType,
        options: ListenerOptions,
        tag: ListenerTag,
    ) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.listeners.push(Listener {
            event_type,
            options,
            tag,
            id,
        });
        id
    }

    /// Remove every listener of a type owned by a tag. Removing listeners
    /// that were never added is a no-op.
    pub fn remove_listeners(&mut self, event_type: EventType, tag: ListenerTag) {
        self.listeners
            .retain(|l| !(l.event_type == event_type && l.tag == tag));
    }

    /// Check whether a tag holds a listener for an event type.
    pub fn has_listener(&self, event_type: EventType, tag: ListenerTag) -> bool {
        self.listeners
            .iter()
            .any(|l| l.event_type == event_type && l.tag == tag)
    }

    /// Find the registration for a tag and event type.
    pub fn find(&self, event_type: EventType, tag: ListenerTag) -> Option<&Listener> {
        self.listeners
            .iter()
            .find(|l| l.event_type == event_type && l.tag == tag)
    }

    /// Number of listeners for an event type.
    pub fn count(&self, event_type: EventType) -> usize {
        self.listeners
            .iter()
            .filter(|l| l.event_type == event_type)
            .count()
    }

    /// Check if no listeners remain at all.
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl DomTree {
    /// Add a listener on a node.
    pub fn add_event_listener(
        &mut self,
        node_id: NodeId,
        event_type: EventType,
        options: ListenerOptions,
        tag: ListenerTag,
    ) -> u64 {
        self.event_targets
            .entry(node_id)
            .or_default()
            .add_listener(event_type, options, tag)
    }

    /// Remove a tag's listeners for an event type on a node (no-op when
    /// absent).
    pub fn remove_event_listeners(
        &mut self,
        node_id: NodeId,
        event_type: EventType,
        tag: ListenerTag,
    ) {
        if let Some(target) = self.event_targets.get_mut(&node_id) {
            target.remove_listeners(event_type, tag);
            if target.is_empty() {
                self.event_targets.remove(&node_id);
            }
        }
    }

    /// Check whether a tag holds a listener on a node.
    pub fn has_event_listener(
        &self,
        node_id: NodeId,
        event_type: EventType,
        tag: ListenerTag,
    ) -> bool {
        self.event_targets
            .get(&node_id)
            .map(|t| t.has_listener(event_type, tag))
            .unwrap_or(false)
    }

    /// Find a tag's listener registration on a node.
    pub fn event_listener(
        &self,
        node_id: NodeId,
        event_type: EventType,
        tag: ListenerTag,
    ) -> Option<&Listener> {
        self.event_targets
            .get(&node_id)
            .and_then(|t| t.find(event_type, tag))
    }

    /// Number of listeners for an event type on a node.
    pub fn event_listener_count(&self, node_id: NodeId, event_type: EventType) -> usize {
        self.event_targets
            .get(&node_id)
            .map(|t| t.count(event_type))
            .unwrap_or(0)
    }
}
