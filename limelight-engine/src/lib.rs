//! Limelight Engine - element-inspection overlay
//!
//! The inspection engine resolves the DOM element under the pointer (or
//! an ancestor of it, navigable by keyboard depth chords), tracks it with
//! an absolutely-positioned highlight box across same-origin iframes and
//! shadow roots, and exposes lifecycle/event hooks to host code.
//!
//! The engine is an owned value: instantiate one per consumer with
//! [`Engine::new`]; independent instances (e.g. in tests) do not
//! interfere. All work is synchronous on the host's event loop.
//!
//! ```
//! use limelight_dom::{EventType, Page, Rect};
//! use limelight_engine::{Engine, OptionsUpdate};
//!
//! let mut page = Page::new();
//! let root = page.root();
//! let (_html, body) = page.scaffold_document(root);
//! let target = page.tree.create_element("div");
//! page.tree.append_child(body, target);
//! page.tree.set_client_rect(target, Rect::new(50.0, 100.0, 200.0, 30.0));
//!
//! let mut engine = Engine::new();
//! engine
//!     .start(
//!         &mut page,
//!         Some(OptionsUpdate {
//!             create_inspector: Some(true),
//!             ..Default::default()
//!         }),
//!     )
//!     .unwrap();
//!
//! let mut event = page.pointer_event(EventType::MouseMove, target);
//! engine.deliver(&mut page, root, &mut event);
//!
//! let overlay = engine.inspector().unwrap();
//! assert_eq!(page.tree.style_property(overlay, "top"), Some("100px"));
//! engine.stop(&mut page, false);
//! ```

#![no_std]

extern crate alloc;

pub mod error;
pub mod handlers;
pub mod options;
pub mod overlay;
pub mod walker;

mod geometry;
mod navigator;
mod target;

#[cfg(test)]
mod tests;

use core::sync::atomic::{AtomicU32, Ordering};

use limelight_dom::{Event, EventType, FrameId, ListenerTag, NodeId, Page};

pub use error::EngineError;
pub use handlers::{Dispatch, EventKind, Handler};
pub use options::{InspectorSpec, Options, OptionsUpdate};
pub use overlay::{DEFAULT_HIGHLIGHT, HINT_PANEL_ATTR, NAMESPACE};
pub use walker::Status;

use handlers::HandlerSlots;

/// Engine-instance counter feeding listener tags, so independent engines
/// on one page never remove each other's bindings.
static NEXT_ENGINE: AtomicU32 = AtomicU32::new(1);

/// The inspection engine.
pub struct Engine {
    pub(crate) options: Options,
    pub(crate) handlers: HandlerSlots,
    pub(crate) status: Status,
    pub(crate) depth: usize,
    pub(crate) current_element: Option<NodeId>,
    pub(crate) overlay: Option<NodeId>,
    pub(crate) owns_overlay: bool,
    pub(crate) pool: Option<NodeId>,
    pub(crate) veto_installed: bool,
    pub(crate) tag: ListenerTag,
}

impl Engine {
    /// Create a new idle engine with default options.
    pub fn new() -> Self {
        let id = NEXT_ENGINE.fetch_add(1, Ordering::Relaxed);
        Self {
            options: Options::default(),
            handlers: HandlerSlots::new(),
            status: Status::Idle,
            depth: 0,
            current_element: None,
            overlay: None,
            owns_overlay: false,
            pool: None,
            veto_installed: false,
            tag: ListenerTag(id as u64),
        }
    }

    /// Merge configuration; every provided field overwrites the stored
    /// value, including across starts.
    pub fn configure(&mut self, update: OptionsUpdate) {
        self.options.apply(update);
    }

    /// Register (or overwrite) an event handler under its name. The name
    /// and handler shape are validated here; registration takes effect
    /// for future events only.
    pub fn on(&mut self, name: &str, handler: Handler) -> Result<(), EngineError> {
        self.handlers.register(name, handler)
    }

    /// Resolve the overlay, bind listeners across every accessible frame,
    /// and begin inspecting. Fires `starting`/`started` around the walk.
    pub fn start(
        &mut self,
        page: &mut Page,
        opts: Option<OptionsUpdate>,
    ) -> Result<(), EngineError> {
        if let Some(update) = opts {
            self.configure(update);
        }

        let overlay = self.resolve_overlay(page, false)?;
        self.overlay = Some(overlay);

        self.handlers.emit(EventKind::Starting, &Dispatch::lifecycle());
        self.engine_start(page);
        self.handlers.emit(EventKind::Started, &Dispatch::lifecycle());
        Ok(())
    }

    /// Unbind everything and stop inspecting. Safe to call without a
    /// prior start. `reset_inspector` clears the geometry styles written
    /// on the overlay; an auto-created overlay is removed outright, and
    /// any check-mode pool always is.
    pub fn stop(&mut self, page: &mut Page, reset_inspector: bool) {
        self.handlers.emit(EventKind::Stopping, &Dispatch::lifecycle());
        self.depth = 0;
        self.engine_stop(page);

        if reset_inspector {
            self.clear_overlay_geometry(page);
        }
        if self.owns_overlay {
            self.remove_owned_overlay(page);
        }
        self.remove_pool(page);

        self.handlers.emit(EventKind::Stopped, &Dispatch::lifecycle());
    }

    /// Statically mark a single element: resolve (or create) the overlay
    /// and position it, without binding any listeners.
    pub fn check(&mut self, page: &mut Page, element: NodeId) -> Result<(), EngineError> {
        let overlay = self.resolve_overlay(page, true)?;
        self.overlay = Some(overlay);
        geometry::position_overlay(page, element, overlay);
        Ok(())
    }

    /// Statically mark a sequence of elements with pooled overlay boxes,
    /// resizing the pool to the requested count.
    pub fn check_all(&mut self, page: &mut Page, elements: &[NodeId]) {
        let boxes = self.pool_overlays(page, elements.len());
        for (&element, overlay) in elements.iter().zip(boxes) {
            geometry::position_overlay(page, element, overlay);
        }
    }

    /// Fill the active overlay's background.
    pub fn highlight(&mut self, page: &mut Page, color: Option<&str>) {
        self.set_highlight(page, color.unwrap_or(DEFAULT_HIGHLIGHT));
    }

    /// Clear the active overlay's background fill.
    pub fn cancel_highlight(&mut self, page: &mut Page) {
        self.set_highlight(page, "unset");
    }

    /// Deliver an event arriving on a frame's document. A no-op unless
    /// this engine's listeners are currently bound there, so events on
    /// uninstrumented (cross-origin, stopped) frames fall through.
    pub fn deliver(&mut self, page: &mut Page, frame: FrameId, event: &mut Event) {
        let document = page.document(frame);
        if !page
            .tree
            .has_event_listener(document, event.event_type, self.tag)
        {
            return;
        }

        match event.event_type {
            EventType::Click | EventType::MouseMove => self.emit_pointer(page, event),
            EventType::KeyDown => self.handle_keydown(page, event),
            EventType::KeyUp => self.handle_keyup(event),
            EventType::MouseDown => self.handle_mousedown(event),
            // The veto is the listener's presence; nothing runs here.
            EventType::BeforeUnload => {}
        }
    }

    /// Current lifecycle state.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Current ancestor-climb depth.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The last-resolved inspection target, if any. Non-owning: the node
    /// may since have been detached, which the ancestor walk treats the
    /// same as an exhausted chain.
    pub fn current_element(&self) -> Option<NodeId> {
        self.current_element
    }

    /// The active overlay element, if resolved.
    pub fn inspector(&self) -> Option<NodeId> {
        self.overlay
    }

    /// Current configuration.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// This engine's listener tag.
    pub fn listener_tag(&self) -> ListenerTag {
        self.tag
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
