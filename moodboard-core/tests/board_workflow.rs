//! Board Workflow Integration Tests
//!
//! Drives the store and interaction engine together the way the browser
//! editor does:
//! - Sidebar adds, default placement
//! - Stacking changes
//! - Lock enforcement through gestures
//! - Pan, zoom and selection
//! - Snapshot delivery to renderers

use std::sync::Arc;

use moodboard_core::view::render_list;
use moodboard_core::{
    ArrangeDirection, BoardCommand, BoardStore, CanvasEvent, ElementContent, ElementId,
    ElementUpdate, InteractionEngine, Placement, PlacementOverrides, Point, PointerTarget,
};

fn text_content() -> ElementContent {
    ElementContent::Text {
        text: "Hi".to_string(),
        font_family: "Inter".to_string(),
        font_size: "16px".to_string(),
        color: "#000".to_string(),
    }
}

fn placement(store: &BoardStore, id: ElementId) -> Placement {
    store
        .board()
        .get_element(id)
        .expect("element should exist")
        .placement
}

/// Press on whatever is under the screen point, then move and release.
fn drag(store: &mut BoardStore, engine: &mut InteractionEngine, from: Point, to: Point) {
    let target = store.board().hit_test(from.x, from.y);
    engine.handle(store, &CanvasEvent::press(target, from.x, from.y));
    engine.handle(store, &CanvasEvent::PointerMove { x: to.x, y: to.y });
    engine.handle(store, &CanvasEvent::PointerUp { x: to.x, y: to.y });
}

// ============================================================================
// Adding elements
// ============================================================================

#[test]
fn test_first_text_element_is_centered() {
    let mut store = BoardStore::new();
    assert!(store.board().is_empty());

    let e1 = store.add_element(text_content(), PlacementOverrides::default());

    let p = placement(&store, e1);
    assert!((p.x - 500.0).abs() < f32::EPSILON);
    assert!((p.y - 300.0).abs() < f32::EPSILON);
    assert!((p.width - 200.0).abs() < f32::EPSILON);
    assert!((p.height - 200.0).abs() < f32::EPSILON);
    assert_eq!(p.z_index, 1);
}

#[test]
fn test_every_kind_can_be_added() {
    let mut store = BoardStore::new();
    let contents = vec![
        ElementContent::Image {
            src: "https://images.example/forest.jpg".to_string(),
            alt: Some("Forest".to_string()),
        },
        ElementContent::color("#d4a373"),
        text_content(),
        ElementContent::Typography {
            font_family: "Playfair Display".to_string(),
        },
        ElementContent::Texture {
            src: "https://images.example/linen.png".to_string(),
            scale: Some("80px".to_string()),
        },
    ];

    let ids: Vec<_> = contents
        .into_iter()
        .map(|c| store.add_element(c, PlacementOverrides::default()))
        .collect();

    let z: Vec<_> = ids.iter().map(|&id| placement(&store, id).z_index).collect();
    assert_eq!(z, vec![1, 2, 3, 4, 5]);
}

// ============================================================================
// Stacking
// ============================================================================

#[test]
fn test_forward_swaps_with_upper_neighbour() {
    let mut store = BoardStore::new();
    let first = store.add_element(ElementContent::color("#111"), PlacementOverrides::default());
    let second = store.add_element(ElementContent::color("#222"), PlacementOverrides::default());

    store.arrange_element(first, ArrangeDirection::Forward);

    assert_eq!(placement(&store, first).z_index, 3);
    assert_eq!(placement(&store, second).z_index, 1);
}

#[test]
fn test_front_is_strictly_highest() {
    let mut store = BoardStore::new();
    let ids: Vec<_> = [4, 9, 9, -2]
        .into_iter()
        .map(|z| {
            store.add_element(
                ElementContent::color("#333"),
                PlacementOverrides::default().with_z_index(z),
            )
        })
        .collect();

    store.arrange_element(ids[3], ArrangeDirection::Front);

    let front = placement(&store, ids[3]).z_index;
    for &other in &ids[..3] {
        assert!(front > placement(&store, other).z_index);
    }
}

#[test]
fn test_arrange_unknown_id_publishes_nothing() {
    let mut store = BoardStore::new();
    store.add_element(ElementContent::color("#111"), PlacementOverrides::default());
    let revision = store.revision();

    store.arrange_element(ElementId::new(), ArrangeDirection::Back);
    assert_eq!(store.revision(), revision);
}

// ============================================================================
// Locking
// ============================================================================

#[test]
fn test_locked_element_is_not_moved_by_gestures() {
    let mut store = BoardStore::new();
    let mut engine = InteractionEngine::new();
    let id = store.add_element(ElementContent::color("#112233"), PlacementOverrides::default());
    store.update_element(id, &ElementUpdate::locked(true));

    drag(
        &mut store,
        &mut engine,
        Point::new(600.0, 400.0),
        Point::new(10.0, 10.0),
    );

    let p = placement(&store, id);
    assert!((p.x - 500.0).abs() < f32::EPSILON);
    assert!((p.y - 300.0).abs() < f32::EPSILON);
}

#[test]
fn test_store_move_bypasses_lock() {
    let mut store = BoardStore::new();
    let id = store.add_element(ElementContent::color("#112233"), PlacementOverrides::default());
    store.lock_element(id, true);

    assert!(store.move_element(id, 10.0, 10.0));
    assert!(store.resize_element(id, 10.0, 10.0));

    let p = placement(&store, id);
    assert!((p.x - 10.0).abs() < f32::EPSILON);
    assert!((p.width - 50.0).abs() < f32::EPSILON);
}

#[test]
fn test_locked_element_can_still_be_selected_by_click() {
    let mut store = BoardStore::new();
    let mut engine = InteractionEngine::new();
    let id = store.add_element(ElementContent::color("#112233"), PlacementOverrides::default());
    store.lock_element(id, true);

    engine.handle(
        &mut store,
        &CanvasEvent::Click {
            target: PointerTarget::Element(id),
        },
    );
    assert_eq!(store.board().selected_id(), Some(id));

    let items = render_list(store.board());
    assert!(items[0].locked);
    assert!(!items[0].show_resize_handle);
}

// ============================================================================
// Move and resize through the canvas
// ============================================================================

#[test]
fn test_drag_then_resize_via_hit_test() {
    let mut store = BoardStore::new();
    let mut engine = InteractionEngine::new();
    let id = store.add_element(
        ElementContent::image("https://images.example/dunes.jpg"),
        PlacementOverrides::at(100.0, 100.0).with_size(200.0, 200.0),
    );

    drag(
        &mut store,
        &mut engine,
        Point::new(150.0, 150.0),
        Point::new(250.0, 170.0),
    );
    let p = placement(&store, id);
    assert!((p.x - 200.0).abs() < f32::EPSILON);
    assert!((p.y - 120.0).abs() < f32::EPSILON);
    assert_eq!(store.board().selected_id(), Some(id));

    // Handle sits in the bottom-right 24x24 corner: (376..400, 296..320).
    assert_eq!(
        store.board().hit_test(390.0, 310.0),
        PointerTarget::ResizeHandle(id)
    );
    drag(
        &mut store,
        &mut engine,
        Point::new(390.0, 310.0),
        Point::new(440.0, 90.0),
    );

    let p = placement(&store, id);
    assert!((p.width - 250.0).abs() < f32::EPSILON);
    assert!((p.height - 50.0).abs() < f32::EPSILON);
    assert!((p.x - 200.0).abs() < f32::EPSILON);
}

#[test]
fn test_release_outside_element_ends_drag() {
    let mut store = BoardStore::new();
    let mut engine = InteractionEngine::new();
    let id = store.add_element(
        ElementContent::color("#abc"),
        PlacementOverrides::at(0.0, 0.0).with_size(100.0, 100.0),
    );

    engine.handle(
        &mut store,
        &CanvasEvent::press(PointerTarget::Element(id), 50.0, 50.0),
    );
    engine.handle(&mut store, &CanvasEvent::PointerMove { x: 900.0, y: 700.0 });
    engine.handle(&mut store, &CanvasEvent::PointerUp { x: 2000.0, y: 2000.0 });
    engine.handle(&mut store, &CanvasEvent::PointerMove { x: 0.0, y: 0.0 });

    let p = placement(&store, id);
    assert!((p.x - 850.0).abs() < f32::EPSILON);
    assert!((p.y - 650.0).abs() < f32::EPSILON);
    assert!(engine.is_idle());
}

#[test]
fn test_element_removed_mid_drag_is_ignored() {
    let mut store = BoardStore::new();
    let mut engine = InteractionEngine::new();
    let id = store.add_element(ElementContent::color("#abc"), PlacementOverrides::default());

    engine.handle(
        &mut store,
        &CanvasEvent::press(PointerTarget::Element(id), 600.0, 400.0),
    );
    store.remove_element(id);
    let revision = store.revision();

    engine.handle(&mut store, &CanvasEvent::PointerMove { x: 0.0, y: 0.0 });
    assert_eq!(store.revision(), revision);
    assert!(store.board().is_empty());
    assert_eq!(store.board().selected_id(), None);
}

// ============================================================================
// Pan, zoom, selection
// ============================================================================

#[test]
fn test_pan_then_click_background_clears_selection() {
    let mut store = BoardStore::new();
    let mut engine = InteractionEngine::new();
    let id = store.add_element(ElementContent::color("#abc"), PlacementOverrides::default());

    drag(
        &mut store,
        &mut engine,
        Point::new(50.0, 50.0),
        Point::new(80.0, 20.0),
    );
    assert_eq!(store.board().offset(), Point::new(30.0, -30.0));

    store.select_element(Some(id));
    drag(
        &mut store,
        &mut engine,
        Point::new(50.0, 50.0),
        Point::new(80.0, 20.0),
    );
    assert_eq!(store.board().offset(), Point::new(30.0, -30.0));

    engine.handle(
        &mut store,
        &CanvasEvent::Click {
            target: PointerTarget::Background,
        },
    );
    assert_eq!(store.board().selected_id(), None);
}

#[test]
fn test_zoom_does_not_move_offset() {
    let mut store = BoardStore::new();
    let mut engine = InteractionEngine::new();
    store.set_offset(Point::new(12.0, 34.0));

    for _ in 0..5 {
        engine.handle(&mut store, &CanvasEvent::Wheel { delta_y: -100.0 });
    }

    assert_eq!(store.board().zoom_percent(), 125);
    assert_eq!(store.board().offset(), Point::new(12.0, 34.0));
}

#[test]
fn test_remove_selected_and_unselected() {
    let mut store = BoardStore::new();
    let a = store.add_element(ElementContent::color("#111"), PlacementOverrides::default());
    let b = store.add_element(ElementContent::color("#222"), PlacementOverrides::default());
    let c = store.add_element(ElementContent::color("#333"), PlacementOverrides::default());

    store.select_element(Some(a));
    store.remove_element(b);
    assert_eq!(store.board().selected_id(), Some(a));

    store.remove_element(a);
    assert_eq!(store.board().selected_id(), None);
    assert_eq!(store.board().element_count(), 1);
    assert!(store.board().get_element(c).is_some());
}

// ============================================================================
// Snapshots
// ============================================================================

#[test]
fn test_renderer_sees_each_gesture_step() {
    let mut store = BoardStore::new();
    let mut engine = InteractionEngine::new();
    let id = store.add_element(
        ElementContent::color("#abc"),
        PlacementOverrides::at(0.0, 0.0).with_size(100.0, 100.0),
    );
    let mut renderer = store.subscribe();

    engine.handle(
        &mut store,
        &CanvasEvent::press(PointerTarget::Element(id), 10.0, 10.0),
    );
    assert!(renderer.has_changed().expect("store alive"));
    let snapshot = Arc::clone(&*renderer.borrow_and_update());
    assert_eq!(snapshot.selected_id(), Some(id));

    engine.handle(&mut store, &CanvasEvent::PointerMove { x: 40.0, y: 10.0 });
    assert!(renderer.has_changed().expect("store alive"));
    let snapshot = Arc::clone(&*renderer.borrow_and_update());
    let p = snapshot.get_element(id).expect("exists").placement;
    assert!((p.x - 30.0).abs() < f32::EPSILON);

    engine.handle(&mut store, &CanvasEvent::PointerUp { x: 40.0, y: 10.0 });
    assert!(!renderer.has_changed().expect("store alive"));
}

#[test]
fn test_commands_replay_like_direct_calls() {
    let mut direct = BoardStore::new();
    let id = direct.add_element(ElementContent::color("#111"), PlacementOverrides::default());
    direct.resize_element(id, 300.0, 20.0);
    direct.zoom_out();

    let mut replayed = BoardStore::new();
    let replay_id = replayed
        .apply(BoardCommand::AddElement {
            content: ElementContent::color("#111"),
            placement: PlacementOverrides::default(),
        })
        .expect("id");
    replayed.apply(BoardCommand::ResizeElement {
        id: replay_id,
        width: 300.0,
        height: 20.0,
    });
    replayed.apply(BoardCommand::ZoomOut);

    assert_eq!(placement(&direct, id), placement(&replayed, replay_id));
    assert!((direct.board().scale() - replayed.board().scale()).abs() < f32::EPSILON);
}
