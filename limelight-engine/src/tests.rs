//! Engine integration tests: full start -> event -> geometry -> dispatch
//! pipelines over pages with iframes and shadow roots.

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use limelight_css::SelectorParser;
use limelight_dom::{
    EventType, FrameAccess, FrameId, ModifierKeys, MouseEventData, NodeId, Page, Rect,
};

use crate::{Engine, EngineError, Handler, InspectorSpec, OptionsUpdate, Status};

fn ctrl() -> ModifierKeys {
    ModifierKeys {
        ctrl: true,
        ..Default::default()
    }
}

/// Page with a scaffolded main document and one target div.
fn setup() -> (Page, NodeId, NodeId, NodeId) {
    let mut page = Page::new();
    let root = page.root();
    let (html, body) = page.scaffold_document(root);
    let target = page.tree.create_element("div");
    page.tree.append_child(body, target);
    page.tree
        .set_client_rect(target, Rect::new(50.0, 100.0, 200.0, 30.0));
    (page, html, body, target)
}

/// Engine that auto-creates its overlay.
fn auto_engine() -> Engine {
    let mut engine = Engine::new();
    engine.configure(OptionsUpdate {
        create_inspector: Some(true),
        ..Default::default()
    });
    engine
}

fn mousemove(page: &mut Page, engine: &mut Engine, frame: FrameId, node: NodeId) {
    let mut event = page.pointer_event(EventType::MouseMove, node);
    engine.deliver(page, frame, &mut event);
}

fn key_chord(page: &mut Page, engine: &mut Engine, frame: FrameId, key: &str) -> bool {
    let mut event = page.key_event(frame, EventType::KeyDown, key, ctrl());
    engine.deliver(page, frame, &mut event);
    event.default_prevented
}

// ============================================================================
// Options and handlers
// ============================================================================

#[test]
fn test_configure_round_trip() {
    let mut engine = Engine::new();
    engine.configure(OptionsUpdate {
        inspector: Some(InspectorSpec::Selector(".box".into())),
        html_class: Some(false),
        block_redirection: Some(true),
        create_inspector: Some(true),
        excludes: Some(vec![".ignore".into(), "#menu".into()]),
    });

    let options = engine.options();
    assert_eq!(options.inspector, InspectorSpec::Selector(".box".into()));
    assert!(!options.html_class);
    assert!(options.block_redirection);
    assert!(options.create_inspector);
    assert_eq!(
        options.excludes,
        vec![String::from(".ignore"), String::from("#menu")]
    );
}

#[test]
fn test_on_rejects_unknown_names_and_mismatched_handlers() {
    let mut engine = Engine::new();

    assert!(matches!(
        engine.on("dblclick", Handler::event(|_| {})),
        Err(EngineError::InvalidArgument(_))
    ));
    assert!(matches!(
        engine.on("hook", Handler::event(|_| {})),
        Err(EngineError::InvalidArgument(_))
    ));
    assert!(engine.on("click", Handler::event(|_| {})).is_ok());
    assert!(engine.on("hook", Handler::hook(|_| true)).is_ok());
}

#[test]
fn test_lifecycle_event_order() {
    let (mut page, _, _, _) = setup();
    let mut engine = auto_engine();

    let log = Rc::new(RefCell::new(Vec::new()));
    for name in ["starting", "started", "stopping", "stopped"] {
        let log = log.clone();
        engine
            .on(name, Handler::event(move |_| log.borrow_mut().push(name)))
            .unwrap();
    }

    engine.start(&mut page, None).unwrap();
    engine.stop(&mut page, false);

    assert_eq!(
        log.borrow().as_slice(),
        &["starting", "started", "stopping", "stopped"]
    );
}

// ============================================================================
// Lifecycle state machine
// ============================================================================

#[test]
fn test_status_transitions() {
    let (mut page, _, _, _) = setup();
    let mut engine = auto_engine();

    assert_eq!(engine.status(), Status::Idle);
    assert_eq!(engine.status().as_str(), "idle");
    engine.start(&mut page, None).unwrap();
    assert_eq!(engine.status(), Status::Running);
    engine.stop(&mut page, false);
    assert_eq!(engine.status(), Status::Stopped);
    engine.start(&mut page, None).unwrap();
    assert_eq!(engine.status(), Status::Running);
    engine.stop(&mut page, false);
}

#[test]
fn test_stop_before_start_is_safe() {
    let (mut page, _, _, _) = setup();
    let mut engine = auto_engine();

    engine.stop(&mut page, true);
    assert_eq!(engine.status(), Status::Stopped);
    assert_eq!(engine.depth(), 0);
}

#[test]
fn test_start_resolution_errors() {
    let (mut page, _, _, _) = setup();

    let mut engine = Engine::new();
    let err = engine.start(&mut page, None).unwrap_err();
    assert!(matches!(err, EngineError::Resolution(_)));

    let err = engine
        .start(
            &mut page,
            Some(OptionsUpdate {
                inspector: Some(InspectorSpec::Selector(".missing".into())),
                ..Default::default()
            }),
        )
        .unwrap_err();
    assert_eq!(
        err,
        EngineError::Resolution("inspector element not found".into())
    );
    // failed starts fire no lifecycle events and stay idle
    assert_eq!(engine.status(), Status::Idle);
}

#[test]
fn test_supplied_selector_inspector_is_used() {
    let (mut page, _, body, target) = setup();
    let root = page.root();
    let overlay = page.tree.create_element("div");
    page.tree.set_attribute(overlay, "id", "box");
    page.tree.append_child(body, overlay);

    let mut engine = Engine::new();
    engine
        .start(
            &mut page,
            Some(OptionsUpdate {
                inspector: Some(InspectorSpec::Selector("#box".into())),
                ..Default::default()
            }),
        )
        .unwrap();
    assert_eq!(engine.inspector(), Some(overlay));

    mousemove(&mut page, &mut engine, root, target);
    assert_eq!(page.tree.style_property(overlay, "top"), Some("100px"));
}

// ============================================================================
// Binding state: listeners, namespace class, redirection veto
// ============================================================================

#[test]
fn test_click_binds_capture_phase_and_rest_bubble() {
    let (mut page, _, _, _) = setup();
    let mut engine = auto_engine();
    engine.start(&mut page, None).unwrap();

    let document = page.main_document();
    let tag = engine.listener_tag();
    let click = page.tree.event_listener(document, EventType::Click, tag);
    assert!(click.unwrap().options.capture);

    for event_type in [
        EventType::MouseMove,
        EventType::KeyDown,
        EventType::KeyUp,
        EventType::MouseDown,
    ] {
        let listener = page.tree.event_listener(document, event_type, tag);
        assert!(!listener.unwrap().options.capture);
    }

    engine.stop(&mut page, false);
    assert!(page
        .tree
        .event_listener(document, EventType::Click, tag)
        .is_none());
}

#[test]
fn test_namespace_class_append_and_strip() {
    let (mut page, html, _, _) = setup();
    page.tree.set_attribute(html, "class", "app");

    let mut engine = auto_engine();
    engine.start(&mut page, None).unwrap();
    assert_eq!(page.tree.get_attribute(html, "class"), Some("app limelight"));

    engine.stop(&mut page, false);
    assert_eq!(page.tree.get_attribute(html, "class"), Some("app"));
}

#[test]
fn test_namespace_class_on_unclassed_root_keeps_leading_space() {
    let (mut page, html, _, _) = setup();
    let mut engine = auto_engine();

    engine.start(&mut page, None).unwrap();
    assert_eq!(page.tree.get_attribute(html, "class"), Some(" limelight"));

    engine.stop(&mut page, false);
    assert_eq!(page.tree.get_attribute(html, "class"), Some(""));
}

#[test]
fn test_html_class_opt_out() {
    let (mut page, html, _, _) = setup();
    let mut engine = auto_engine();
    engine.configure(OptionsUpdate {
        html_class: Some(false),
        ..Default::default()
    });

    engine.start(&mut page, None).unwrap();
    assert_eq!(page.tree.get_attribute(html, "class"), None);
    engine.stop(&mut page, false);
}

#[test]
fn test_block_redirection_veto_installed_and_removed() {
    let (mut page, _, _, _) = setup();
    let mut engine = auto_engine();
    engine.configure(OptionsUpdate {
        block_redirection: Some(true),
        ..Default::default()
    });

    assert!(!page.navigation_blocked());
    engine.start(&mut page, None).unwrap();
    assert!(page.navigation_blocked());
    engine.stop(&mut page, false);
    assert!(!page.navigation_blocked());
}

#[test]
fn test_independent_engines_do_not_interfere() {
    let (mut page, _, _, target) = setup();
    let root = page.root();
    let mut first = auto_engine();
    let mut second = auto_engine();

    first.start(&mut page, None).unwrap();
    second.start(&mut page, None).unwrap();
    first.stop(&mut page, false);

    // the second engine's bindings survive the first engine's stop
    assert!(page.frame_instrumented(root, second.listener_tag()));
    mousemove(&mut page, &mut second, root, target);
    assert_eq!(second.current_element(), Some(target));
}

// ============================================================================
// Frame walking
// ============================================================================

#[test]
fn test_frame_index_paths_rebuilt_on_start() {
    let mut page = Page::new();
    let root = page.root();
    page.scaffold_document(root);

    let first = page.add_frame(root, FrameAccess::SameOrigin);
    let foreign = page.add_frame(root, FrameAccess::CrossOrigin);
    let third = page.add_frame(root, FrameAccess::SameOrigin);
    let nested = page.add_frame(first, FrameAccess::SameOrigin);
    page.scaffold_document(first);
    page.scaffold_document(third);
    page.scaffold_document(nested);

    let mut engine = auto_engine();
    engine.start(&mut page, None).unwrap();

    assert_eq!(page.frame(root).inspect_path, Vec::<usize>::new());
    assert_eq!(page.frame(first).inspect_path, vec![0]);
    assert_eq!(page.frame(third).inspect_path, vec![2]);
    assert_eq!(page.frame(nested).inspect_path, vec![0, 0]);
    // the cross-origin frame was never touched
    assert_eq!(page.frame(foreign).inspect_path, Vec::<usize>::new());

    engine.stop(&mut page, false);
}

#[test]
fn test_cross_origin_subtree_not_instrumented() {
    let mut page = Page::new();
    let root = page.root();
    page.scaffold_document(root);

    let foreign = page.add_frame(root, FrameAccess::CrossOrigin);
    // same-origin but unreachable behind the cross-origin boundary
    let stranded = page.add_frame(foreign, FrameAccess::SameOrigin);

    let mut engine = auto_engine();
    engine.start(&mut page, None).unwrap();

    let tag = engine.listener_tag();
    assert!(page.frame_instrumented(root, tag));
    assert!(!page.frame_instrumented(foreign, tag));
    assert!(!page.frame_instrumented(stranded, tag));

    // delivery to an uninstrumented frame is a no-op
    let counted = Rc::new(Cell::new(0));
    let seen = counted.clone();
    engine
        .on(
            "mousemove",
            Handler::event(move |_| seen.set(seen.get() + 1)),
        )
        .unwrap();
    let doc = page.document(foreign);
    let mut event = page.pointer_event(EventType::MouseMove, doc);
    engine.deliver(&mut page, foreign, &mut event);
    assert_eq!(counted.get(), 0);

    engine.stop(&mut page, false);
}

#[test]
fn test_iframe_inspection_reparents_overlay_into_frame_body() {
    let (mut page, _, main_body, main_target) = setup();
    let root = page.root();
    let frame = page.add_frame(root, FrameAccess::SameOrigin);
    let (_, frame_body) = page.scaffold_document(frame);
    let frame_target = page.tree.create_element("p");
    page.tree.append_child(frame_body, frame_target);
    page.tree
        .set_client_rect(frame_target, Rect::new(10.0, 30.0, 60.0, 20.0));
    let frame_document = page.document(frame);
    page.tree.set_scroll(frame_document, 5.0, 7.0);

    let mut engine = auto_engine();
    engine.start(&mut page, None).unwrap();
    let overlay = engine.inspector().unwrap();
    let container = page.tree.parent_element(overlay).unwrap();
    assert_eq!(page.tree.parent(container), Some(main_body));

    mousemove(&mut page, &mut engine, frame, frame_target);
    // the overlay container followed the pointer into the iframe document
    assert_eq!(page.tree.parent(container), Some(frame_body));
    // scrolled by the iframe document's offsets
    assert_eq!(page.tree.style_property(overlay, "top"), Some("35px"));
    assert_eq!(page.tree.style_property(overlay, "left"), Some("17px"));

    // moving back to the main document re-adopts the container
    mousemove(&mut page, &mut engine, root, main_target);
    assert_eq!(page.tree.parent(container), Some(main_body));

    engine.stop(&mut page, false);
}

// ============================================================================
// Target resolution
// ============================================================================

#[test]
fn test_mousemove_positions_overlay_and_dispatches() {
    let (mut page, _, _, target) = setup();
    let root = page.root();
    let mut engine = auto_engine();

    let seen: Rc<RefCell<Vec<(Option<NodeId>, Option<NodeId>, usize)>>> =
        Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    engine
        .on(
            "mousemove",
            Handler::event(move |dispatch| {
                log.borrow_mut()
                    .push((dispatch.target, dispatch.origin_target, dispatch.depth));
            }),
        )
        .unwrap();

    engine.start(&mut page, None).unwrap();
    mousemove(&mut page, &mut engine, root, target);

    let overlay = engine.inspector().unwrap();
    assert_eq!(page.tree.style_property(overlay, "top"), Some("100px"));
    assert_eq!(page.tree.style_property(overlay, "left"), Some("50px"));
    assert_eq!(page.tree.style_property(overlay, "width"), Some("200px"));
    assert_eq!(page.tree.style_property(overlay, "height"), Some("30px"));

    assert_eq!(engine.current_element(), Some(target));
    assert_eq!(seen.borrow().as_slice(), &[(Some(target), Some(target), 0)]);

    engine.stop(&mut page, false);
}

#[test]
fn test_click_dispatches_without_geometry() {
    let (mut page, _, _, target) = setup();
    let root = page.root();
    let mut engine = auto_engine();

    let counted = Rc::new(Cell::new(0));
    let seen = counted.clone();
    engine
        .on("click", Handler::event(move |_| seen.set(seen.get() + 1)))
        .unwrap();

    engine.start(&mut page, None).unwrap();
    let overlay = engine.inspector().unwrap();

    let mut event = page.pointer_event(EventType::Click, target);
    engine.deliver(&mut page, root, &mut event);

    assert_eq!(counted.get(), 1);
    // click never moves the overlay
    assert_eq!(page.tree.style_property(overlay, "top"), Some("0px"));

    engine.stop(&mut page, false);
}

#[test]
fn test_excluded_targets_produce_no_dispatch() {
    let (mut page, _, body, _) = setup();
    let root = page.root();
    let ignored = page.tree.create_element("div");
    page.tree.set_attribute(ignored, "class", "ignore");
    page.tree.append_child(body, ignored);

    let mut engine = auto_engine();
    engine.configure(OptionsUpdate {
        excludes: Some(vec![".ignore".into()]),
        ..Default::default()
    });

    let counted = Rc::new(Cell::new(0));
    let seen = counted.clone();
    engine
        .on(
            "mousemove",
            Handler::event(move |_| seen.set(seen.get() + 1)),
        )
        .unwrap();

    engine.start(&mut page, None).unwrap();
    mousemove(&mut page, &mut engine, root, ignored);
    assert_eq!(counted.get(), 0);
    assert_eq!(engine.current_element(), None);

    // exclusion re-queries the live tree every event
    page.tree.set_attribute(ignored, "class", "");
    mousemove(&mut page, &mut engine, root, ignored);
    assert_eq!(counted.get(), 1);

    engine.stop(&mut page, false);
}

#[test]
fn test_exclusion_applies_to_descendant_turned_target() {
    let (mut page, _, body, _) = setup();
    let root = page.root();
    let ignored = page.tree.create_element("div");
    page.tree.set_attribute(ignored, "class", "ignore");
    let inner = page.tree.create_element("span");
    page.tree.append_child(body, ignored);
    page.tree.append_child(ignored, inner);

    let mut engine = auto_engine();
    engine.configure(OptionsUpdate {
        excludes: Some(vec![".ignore".into()]),
        ..Default::default()
    });

    let counted = Rc::new(Cell::new(0));
    let seen = counted.clone();
    engine
        .on(
            "mousemove",
            Handler::event(move |_| seen.set(seen.get() + 1)),
        )
        .unwrap();

    engine.start(&mut page, None).unwrap();

    // the span itself is fair game
    mousemove(&mut page, &mut engine, root, inner);
    assert_eq!(counted.get(), 1);

    // at depth 1 the span resolves to its excluded parent
    key_chord(&mut page, &mut engine, root, "ArrowUp");
    mousemove(&mut page, &mut engine, root, inner);
    assert_eq!(counted.get(), 1);

    engine.stop(&mut page, false);
}

#[test]
fn test_overlay_and_hint_panel_self_exclusion() {
    let (mut page, _, body, _) = setup();
    let root = page.root();
    let panel = page.tree.create_element("div");
    page.tree.set_attribute(panel, "hint-panel", "");
    page.tree.append_child(body, panel);

    let mut engine = auto_engine();
    let counted = Rc::new(Cell::new(0));
    let seen = counted.clone();
    engine
        .on(
            "mousemove",
            Handler::event(move |_| seen.set(seen.get() + 1)),
        )
        .unwrap();

    engine.start(&mut page, None).unwrap();
    let overlay = engine.inspector().unwrap();

    mousemove(&mut page, &mut engine, root, overlay);
    mousemove(&mut page, &mut engine, root, panel);
    assert_eq!(counted.get(), 0);
    assert_eq!(engine.current_element(), None);

    engine.stop(&mut page, false);
}

#[test]
fn test_hook_veto_suppresses_geometry_and_dispatch() {
    let (mut page, _, _, target) = setup();
    let root = page.root();
    let mut engine = auto_engine();

    let counted = Rc::new(Cell::new(0));
    let seen = counted.clone();
    engine
        .on(
            "mousemove",
            Handler::event(move |_| seen.set(seen.get() + 1)),
        )
        .unwrap();
    engine.on("hook", Handler::hook(|_| false)).unwrap();

    engine.start(&mut page, None).unwrap();
    let overlay = engine.inspector().unwrap();

    mousemove(&mut page, &mut engine, root, target);
    assert_eq!(counted.get(), 0);
    // still parked at its creation position
    assert_eq!(page.tree.style_property(overlay, "top"), Some("0px"));

    // a hook returning true lets events through
    engine.on("hook", Handler::hook(|_| true)).unwrap();
    mousemove(&mut page, &mut engine, root, target);
    assert_eq!(counted.get(), 1);
    assert_eq!(page.tree.style_property(overlay, "top"), Some("100px"));

    engine.stop(&mut page, false);
}

#[test]
fn test_shadow_root_target_resolution() {
    let (mut page, _, body, _) = setup();
    let root = page.root();
    let host = page.tree.create_element("x-widget");
    page.tree.append_child(body, host);
    let shadow = page.tree.attach_shadow(host);
    let inner = page.tree.create_element("button");
    page.tree.append_child(shadow, inner);
    page.tree
        .set_client_rect(inner, Rect::new(12.0, 40.0, 80.0, 24.0));
    let main_document = page.main_document();
    page.tree.set_scroll(main_document, 100.0, 0.0);

    let mut engine = auto_engine();
    let seen: Rc<RefCell<Vec<(Option<NodeId>, Option<NodeId>)>>> =
        Rc::new(RefCell::new(Vec::new()));
    let log = seen.clone();
    engine
        .on(
            "mousemove",
            Handler::event(move |dispatch| {
                log.borrow_mut()
                    .push((dispatch.target, dispatch.origin_target));
            }),
        )
        .unwrap();

    engine.start(&mut page, None).unwrap();
    let overlay = engine.inspector().unwrap();

    mousemove(&mut page, &mut engine, root, inner);

    // deepest path entry wins over the retargeted host
    assert_eq!(seen.borrow().as_slice(), &[(Some(inner), Some(host))]);
    // shadow roots have no body: no re-parenting, scroll from the
    // overlay's own (main) document
    let container = page.tree.parent_element(overlay).unwrap();
    assert_eq!(page.tree.parent(container), Some(body));
    assert_eq!(page.tree.style_property(overlay, "top"), Some("140px"));

    engine.stop(&mut page, false);
}

// ============================================================================
// Geometry
// ============================================================================

#[test]
fn test_geometry_clamps_negative_to_zero() {
    let (mut page, _, _, target) = setup();
    let root = page.root();
    page.tree
        .set_client_rect(target, Rect::new(-15.0, -20.0, 200.0, 30.0));

    let mut engine = auto_engine();
    engine.start(&mut page, None).unwrap();
    mousemove(&mut page, &mut engine, root, target);

    let overlay = engine.inspector().unwrap();
    assert_eq!(page.tree.style_property(overlay, "top"), Some("0px"));
    assert_eq!(page.tree.style_property(overlay, "left"), Some("0px"));

    engine.stop(&mut page, false);
}

#[test]
fn test_geometry_adds_scroll_offsets() {
    let (mut page, _, _, target) = setup();
    let root = page.root();
    let main_document = page.main_document();
    page.tree.set_scroll(main_document, 120.0, 8.0);

    let mut engine = auto_engine();
    engine.start(&mut page, None).unwrap();
    mousemove(&mut page, &mut engine, root, target);

    let overlay = engine.inspector().unwrap();
    assert_eq!(page.tree.style_property(overlay, "top"), Some("220px"));
    assert_eq!(page.tree.style_property(overlay, "left"), Some("58px"));

    engine.stop(&mut page, false);
}

#[test]
fn test_geometry_subtracts_block_chrome_above_body() {
    let (mut page, html, body, target) = setup();
    let root = page.root();
    // fixed banner between <html> and <body>
    let banner = page.tree.create_element("div");
    page.tree.insert_before(html, banner, Some(body));
    page.tree.set_offset_height(banner, 40.0);
    // inline chrome does not count
    let inline = page.tree.create_element("span");
    page.tree.insert_before(html, inline, Some(body));
    page.tree.set_offset_height(inline, 99.0);

    let mut engine = auto_engine();
    engine.start(&mut page, None).unwrap();
    mousemove(&mut page, &mut engine, root, target);

    let overlay = engine.inspector().unwrap();
    assert_eq!(page.tree.style_property(overlay, "top"), Some("60px"));

    engine.stop(&mut page, false);
}

#[test]
fn test_overlay_label_text_and_near_top_flip() {
    let (mut page, _, _, target) = setup();
    let root = page.root();
    let mut engine = auto_engine();
    engine.start(&mut page, None).unwrap();
    let overlay = engine.inspector().unwrap();
    let label = page.tree.first_element_child(overlay).unwrap();

    mousemove(&mut page, &mut engine, root, target);
    assert_eq!(page.tree.text_content(label), "DIV");
    assert_eq!(page.tree.style_property(label, "top"), Some("-41px"));

    // against the viewport top the label drops below the box
    page.tree
        .set_client_rect(target, Rect::new(50.0, 10.0, 200.0, 30.0));
    mousemove(&mut page, &mut engine, root, target);
    assert_eq!(page.tree.style_property(label, "top"), Some("47px"));

    engine.stop(&mut page, false);
}

// ============================================================================
// Depth navigation
// ============================================================================

#[test]
fn test_depth_never_goes_negative() {
    let (mut page, _, _, target) = setup();
    let root = page.root();
    let mut engine = auto_engine();
    engine.start(&mut page, None).unwrap();
    mousemove(&mut page, &mut engine, root, target);

    for _ in 0..3 {
        key_chord(&mut page, &mut engine, root, "ArrowDown");
        assert_eq!(engine.depth(), 0);
    }

    engine.stop(&mut page, false);
}

#[test]
fn test_depth_climb_repositions_overlay_on_ancestor() {
    let (mut page, _, body, target) = setup();
    let root = page.root();
    page.tree
        .set_client_rect(body, Rect::new(0.0, 0.0, 800.0, 600.0));

    let mut engine = auto_engine();
    engine.start(&mut page, None).unwrap();
    let overlay = engine.inspector().unwrap();
    mousemove(&mut page, &mut engine, root, target);

    let prevented = key_chord(&mut page, &mut engine, root, "ArrowUp");

    assert_eq!(engine.depth(), 1);
    assert!(prevented);
    assert_eq!(page.tree.style_property(overlay, "width"), Some("800px"));
    // the resolved target for subsequent pointer events climbs too
    mousemove(&mut page, &mut engine, root, target);
    assert_eq!(engine.current_element(), Some(body));

    engine.stop(&mut page, false);
    assert_eq!(engine.depth(), 0);
}

#[test]
fn test_depth_climb_past_root_clamps_with_hysteresis() {
    let (mut page, html, _, target) = setup();
    let root = page.root();
    page.tree
        .set_client_rect(html, Rect::new(0.0, 0.0, 1024.0, 768.0));

    let mut engine = auto_engine();
    engine.start(&mut page, None).unwrap();
    let overlay = engine.inspector().unwrap();
    mousemove(&mut page, &mut engine, root, target);

    key_chord(&mut page, &mut engine, root, "ArrowUp");
    key_chord(&mut page, &mut engine, root, "ArrowUp");
    assert_eq!(engine.depth(), 2);
    assert_eq!(page.tree.style_property(overlay, "width"), Some("1024px"));

    // One more chord walks off the top of the chain. The climb stops on
    // the highest ancestor and the clamp leaves depth one below the
    // distance actually reached - longstanding behavior, kept as is.
    key_chord(&mut page, &mut engine, root, "ArrowUp");
    assert_eq!(engine.depth(), 1);
    assert_eq!(page.tree.style_property(overlay, "width"), Some("1024px"));

    engine.stop(&mut page, false);
}

#[test]
fn test_depth_clamp_saturates_at_zero_when_current_has_no_parent() {
    let (mut page, _, _, _) = setup();
    let root = page.root();
    let orphan = page.tree.create_element("div");
    page.tree
        .set_client_rect(orphan, Rect::new(5.0, 5.0, 10.0, 10.0));

    let mut engine = auto_engine();
    engine.start(&mut page, None).unwrap();
    mousemove(&mut page, &mut engine, root, orphan);
    assert_eq!(engine.current_element(), Some(orphan));

    key_chord(&mut page, &mut engine, root, "ArrowUp");
    assert_eq!(engine.depth(), 0);

    engine.stop(&mut page, false);
}

#[test]
fn test_keydown_and_keyup_dispatch_regardless() {
    let (mut page, _, _, _) = setup();
    let root = page.root();
    let mut engine = auto_engine();

    let log: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
    for name in ["keydown", "keyup"] {
        let log = log.clone();
        engine
            .on(
                name,
                Handler::event(move |dispatch| {
                    log.borrow_mut()
                        .push(alloc::format!("{}@{}", name, dispatch.depth));
                }),
            )
            .unwrap();
    }

    engine.start(&mut page, None).unwrap();

    // no modifier held: plain dispatch, no depth change
    let mut event = page.key_event(root, EventType::KeyDown, "ArrowUp", ModifierKeys::default());
    engine.deliver(&mut page, root, &mut event);
    assert!(!event.default_prevented);
    assert_eq!(engine.depth(), 0);

    let mut event = page.key_event(root, EventType::KeyUp, "ArrowUp", ModifierKeys::default());
    engine.deliver(&mut page, root, &mut event);

    assert_eq!(
        log.borrow().as_slice(),
        &["keydown@0".to_string(), "keyup@0".to_string()]
    );

    engine.stop(&mut page, false);
}

#[test]
fn test_modified_mousedown_is_swallowed_and_never_dispatched() {
    let (mut page, _, _, target) = setup();
    let root = page.root();
    let mut engine = auto_engine();

    let counted = Rc::new(Cell::new(0));
    let seen = counted.clone();
    engine
        .on(
            "mousedown",
            Handler::event(move |_| seen.set(seen.get() + 1)),
        )
        .unwrap();

    engine.start(&mut page, None).unwrap();

    let mut event = page.pointer_event_with(
        EventType::MouseDown,
        target,
        MouseEventData {
            modifiers: ctrl(),
            ..Default::default()
        },
    );
    engine.deliver(&mut page, root, &mut event);
    assert!(event.default_prevented);
    assert!(event.propagation_stopped);

    let mut plain = page.pointer_event(EventType::MouseDown, target);
    engine.deliver(&mut page, root, &mut plain);
    assert!(!plain.default_prevented);
    assert!(!plain.propagation_stopped);

    // the mousedown slot exists but is never dispatched
    assert_eq!(counted.get(), 0);

    engine.stop(&mut page, false);
}

// ============================================================================
// Overlay lifecycle, check mode, highlight
// ============================================================================

#[test]
fn test_auto_created_overlay_removed_on_stop() {
    let (mut page, _, _, _) = setup();
    let mut engine = auto_engine();
    engine.start(&mut page, None).unwrap();

    let overlay = engine.inspector().unwrap();
    let container = page.tree.parent_element(overlay).unwrap();
    assert!(page.tree.parent(container).is_some());

    engine.stop(&mut page, false);
    assert_eq!(page.tree.parent(container), None);
    assert_eq!(engine.inspector(), None);

    // a fresh start creates a fresh overlay
    engine.start(&mut page, None).unwrap();
    assert!(engine.inspector().is_some());
    assert_ne!(engine.inspector(), Some(overlay));
    engine.stop(&mut page, false);
}

#[test]
fn test_supplied_overlay_survives_stop_and_reset_clears_geometry() {
    let (mut page, _, body, target) = setup();
    let root = page.root();
    let overlay = page.tree.create_element("div");
    let shell = page.tree.create_element("aside");
    page.tree.append_child(body, shell);
    page.tree.append_child(shell, overlay);

    let mut engine = Engine::new();
    engine
        .start(
            &mut page,
            Some(OptionsUpdate {
                inspector: Some(InspectorSpec::Element(overlay)),
                ..Default::default()
            }),
        )
        .unwrap();
    mousemove(&mut page, &mut engine, root, target);
    assert_eq!(page.tree.style_property(overlay, "top"), Some("100px"));

    engine.stop(&mut page, true);
    assert_eq!(page.tree.style_property(overlay, "top"), None);
    assert_eq!(page.tree.style_property(overlay, "width"), None);
    // externally supplied overlays stay in the tree and stay referenced
    assert_eq!(page.tree.parent(overlay), Some(shell));
    assert_eq!(engine.inspector(), Some(overlay));
}

#[test]
fn test_check_marks_single_element_without_binding() {
    let (mut page, _, _, target) = setup();
    let root = page.root();
    let mut engine = auto_engine();

    engine.check(&mut page, target).unwrap();
    let overlay = engine.inspector().unwrap();
    assert_eq!(page.tree.style_property(overlay, "top"), Some("100px"));
    // check-mode overlays carry no label
    assert_eq!(page.tree.first_element_child(overlay), None);
    // check never binds listeners or transitions status
    assert_eq!(engine.status(), Status::Idle);
    assert!(!page.frame_instrumented(root, engine.listener_tag()));
}

#[test]
fn test_check_without_inspector_or_create_flag_fails() {
    let (mut page, _, _, target) = setup();
    let mut engine = Engine::new();
    assert!(matches!(
        engine.check(&mut page, target),
        Err(EngineError::Resolution(_))
    ));
}

#[test]
fn test_check_all_pool_grows_and_shrinks() {
    let (mut page, _, body, _) = setup();
    let mut targets = Vec::new();
    for i in 0..3 {
        let el = page.tree.create_element("li");
        page.tree.append_child(body, el);
        page.tree
            .set_client_rect(el, Rect::new(0.0, 10.0 * (i as f32 + 1.0), 50.0, 10.0));
        targets.push(el);
    }

    let mut engine = auto_engine();
    engine.check_all(&mut page, &targets);

    let pool_selector = SelectorParser::new("inspector-list")
        .parse_selector_list()
        .unwrap();
    let main_document = page.main_document();
    let pool = page
        .tree
        .query_selector(main_document, &pool_selector)
        .unwrap();
    let boxes = page.tree.child_elements(pool);
    assert_eq!(boxes.len(), 3);
    assert_eq!(page.tree.style_property(boxes[0], "top"), Some("10px"));
    assert_eq!(page.tree.style_property(boxes[1], "top"), Some("20px"));
    assert_eq!(page.tree.style_property(boxes[2], "top"), Some("30px"));

    engine.check_all(&mut page, &targets[..1]);
    assert_eq!(page.tree.child_elements(pool).len(), 1);

    // stop always removes the pool
    engine.stop(&mut page, false);
    assert!(page
        .tree
        .query_selector(main_document, &pool_selector)
        .is_none());
}

#[test]
fn test_highlight_and_cancel() {
    let (mut page, _, _, _) = setup();
    let mut engine = auto_engine();
    engine.start(&mut page, None).unwrap();
    let overlay = engine.inspector().unwrap();

    engine.highlight(&mut page, None);
    assert_eq!(
        page.tree.style_property(overlay, "background"),
        Some("rgba(255, 229, 190, 0.4)")
    );

    engine.highlight(&mut page, Some("#ff0"));
    assert_eq!(page.tree.style_property(overlay, "background"), Some("#ff0"));

    engine.cancel_highlight(&mut page);
    assert_eq!(
        page.tree.style_property(overlay, "background"),
        Some("unset")
    );

    engine.stop(&mut page, false);
}

#[test]
fn test_check_created_overlay_is_reused_by_start() {
    let (mut page, _, _, target) = setup();
    let mut engine = auto_engine();

    engine.check(&mut page, target).unwrap();
    let overlay = engine.inspector().unwrap();

    engine.start(&mut page, None).unwrap();
    assert_eq!(engine.inspector(), Some(overlay));
    engine.stop(&mut page, false);
}
