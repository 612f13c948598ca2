//! Typed event handler slots
//!
//! The handler registry maps a fixed set of event kinds to typed slots,
//! validated when a handler is registered rather than when an event fires.
//! Every slot holds at most one handler; registering again overwrites.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;

use limelight_dom::{Event, EventType, NodeId};

use crate::error::EngineError;

/// The event kinds host code can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Starting,
    Started,
    Stopping,
    Stopped,
    Click,
    MouseMove,
    MouseDown,
    KeyDown,
    KeyUp,
}

impl EventKind {
    /// The registration name of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::Starting => "starting",
            EventKind::Started => "started",
            EventKind::Stopping => "stopping",
            EventKind::Stopped => "stopped",
            EventKind::Click => "click",
            EventKind::MouseMove => "mousemove",
            EventKind::MouseDown => "mousedown",
            EventKind::KeyDown => "keydown",
            EventKind::KeyUp => "keyup",
        }
    }

    /// Parse a registration name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "starting" => Some(EventKind::Starting),
            "started" => Some(EventKind::Started),
            "stopping" => Some(EventKind::Stopping),
            "stopped" => Some(EventKind::Stopped),
            "click" => Some(EventKind::Click),
            "mousemove" => Some(EventKind::MouseMove),
            "mousedown" => Some(EventKind::MouseDown),
            "keydown" => Some(EventKind::KeyDown),
            "keyup" => Some(EventKind::KeyUp),
            _ => None,
        }
    }

    /// The kind dispatched for a DOM event type.
    pub fn of_event(event_type: EventType) -> Option<Self> {
        match event_type {
            EventType::Click => Some(EventKind::Click),
            EventType::MouseMove => Some(EventKind::MouseMove),
            EventType::MouseDown => Some(EventKind::MouseDown),
            EventType::KeyDown => Some(EventKind::KeyDown),
            EventType::KeyUp => Some(EventKind::KeyUp),
            EventType::BeforeUnload => None,
        }
    }
}

/// What a handler receives. Lifecycle events carry no target or event.
#[derive(Debug)]
pub struct Dispatch<'a> {
    /// The resolved inspection target.
    pub target: Option<NodeId>,
    /// The raw event.
    pub event: Option<&'a Event>,
    /// The event's original (unclimbed) target.
    pub origin_target: Option<NodeId>,
    /// The ancestor-climb depth at dispatch time.
    pub depth: usize,
}

impl<'a> Dispatch<'a> {
    /// A lifecycle dispatch: no target, no event.
    pub fn lifecycle() -> Self {
        Self {
            target: None,
            event: None,
            origin_target: None,
            depth: 0,
        }
    }
}

/// An event handler callback.
pub type EventCallback = Box<dyn FnMut(&Dispatch<'_>)>;

/// The hook callback: sees every pointer event first; returning `false`
/// vetoes it (no geometry update, no dispatch).
pub type HookCallback = Box<dyn FnMut(&Event) -> bool>;

/// A handler to register.
pub enum Handler {
    /// Handler for one of the named event kinds.
    Event(EventCallback),
    /// The pointer-event hook.
    Hook(HookCallback),
}

impl Handler {
    /// Wrap an event callback.
    pub fn event<F>(f: F) -> Self
    where
        F: FnMut(&Dispatch<'_>) + 'static,
    {
        Handler::Event(Box::new(f))
    }

    /// Wrap a hook callback.
    pub fn hook<F>(f: F) -> Self
    where
        F: FnMut(&Event) -> bool + 'static,
    {
        Handler::Hook(Box::new(f))
    }
}

impl core::fmt::Debug for Handler {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Handler::Event(_) => f.write_str("Handler::Event(..)"),
            Handler::Hook(_) => f.write_str("Handler::Hook(..)"),
        }
    }
}

/// The registered handler slots.
#[derive(Default)]
pub struct HandlerSlots {
    starting: Option<EventCallback>,
    started: Option<EventCallback>,
    stopping: Option<EventCallback>,
    stopped: Option<EventCallback>,
    click: Option<EventCallback>,
    mouse_move: Option<EventCallback>,
    mouse_down: Option<EventCallback>,
    key_down: Option<EventCallback>,
    key_up: Option<EventCallback>,
    hook: Option<HookCallback>,
}

impl HandlerSlots {
    /// Create empty slots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under a name, overwriting any previous one.
    /// The name and the handler shape are validated here, not at dispatch.
    pub fn register(&mut self, name: &str, handler: Handler) -> Result<(), EngineError> {
        if name == "hook" {
            return match handler {
                Handler::Hook(hook) => {
                    self.hook = Some(hook);
                    Ok(())
                }
                Handler::Event(_) => Err(EngineError::InvalidArgument(String::from(
                    "the hook slot takes a hook handler",
                ))),
            };
        }

        let kind = EventKind::from_name(name).ok_or_else(|| {
            EngineError::InvalidArgument(format!("unknown event name: {}", name))
        })?;

        match handler {
            Handler::Event(callback) => {
                *self.slot_mut(kind) = Some(callback);
                Ok(())
            }
            Handler::Hook(_) => Err(EngineError::InvalidArgument(format!(
                "event handler does not match the signature for: {}",
                name
            ))),
        }
    }

    fn slot_mut(&mut self, kind: EventKind) -> &mut Option<EventCallback> {
        match kind {
            EventKind::Starting => &mut self.starting,
            EventKind::Started => &mut self.started,
            EventKind::Stopping => &mut self.stopping,
            EventKind::Stopped => &mut self.stopped,
            EventKind::Click => &mut self.click,
            EventKind::MouseMove => &mut self.mouse_move,
            EventKind::MouseDown => &mut self.mouse_down,
            EventKind::KeyDown => &mut self.key_down,
            EventKind::KeyUp => &mut self.key_up,
        }
    }

    /// Invoke the handler for a kind, if one is registered.
    pub fn emit(&mut self, kind: EventKind, dispatch: &Dispatch<'_>) {
        if let Some(handler) = self.slot_mut(kind) {
            handler(dispatch);
        }
    }

    /// Run the hook for an event. `true` means the event may proceed.
    pub fn hook_allows(&mut self, event: &Event) -> bool {
        match &mut self.hook {
            Some(hook) => hook(event),
            None => true,
        }
    }
}
