//! End-to-end interaction through the public `Ui` surface.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use nodal_ui::{
    Behavior, Button, CornerRadii, Dimension, Event, EventCx, HeadlessPlatform, MouseButton,
    NodeId, Panel, Rect, Rgba, ScrollArea, SoftwareBackend, Ui, UiConfig, Vec2, Wheel,
};

// =============================================================================
// HELPERS
// =============================================================================

type Log = Rc<RefCell<Vec<String>>>;

/// Records `label:event` for every event, consuming like a plain node.
struct Recorder {
    label: &'static str,
    log: Log,
}

impl Behavior for Recorder {
    fn handle_event(&mut self, _cx: &mut EventCx<'_>, event: &Event) -> bool {
        let entry = match event {
            Event::MousePress(press) => format!("{}:press#{}", self.label, press.click_index),
            other => format!("{}:{}", self.label, other.name()),
        };
        self.log.borrow_mut().push(entry);
        nodal_ui::event::default_response(event)
    }
}

fn ui_with(platform: HeadlessPlatform, size: Vec2) -> Ui {
    Ui::new(size, UiConfig::default(), Box::new(platform)).unwrap()
}

fn add(ui: &mut Ui, parent: NodeId, behavior: impl Behavior, rect: Rect) -> NodeId {
    let tree = ui.tree_mut();
    let id = tree.create_node(behavior).unwrap();
    tree.flex_mut(id).place(rect.x, rect.y, rect.width, rect.height);
    tree.add_child(parent, id).unwrap();
    id
}

fn matching(log: &Log, kinds: &[&str]) -> Vec<String> {
    log.borrow()
        .iter()
        .filter(|entry| {
            let kind = entry.split(':').nth(1).unwrap_or_default();
            kinds.iter().any(|k| kind.starts_with(k))
        })
        .cloned()
        .collect()
}

// -----------------------------------------------------------------------------
// Hover
// -----------------------------------------------------------------------------

#[test]
fn test_moving_between_nested_siblings_orders_leave_before_enter() {
    let log: Log = Rc::default();
    let mut ui = ui_with(HeadlessPlatform::new(), Vec2::new(200.0, 100.0));
    let root = ui.root();
    let left = add(&mut ui, root, Recorder { label: "left", log: log.clone() }, Rect::new(0.0, 0.0, 100.0, 100.0));
    add(&mut ui, left, Recorder { label: "a", log: log.clone() }, Rect::new(10.0, 10.0, 20.0, 20.0));
    let right = add(&mut ui, root, Recorder { label: "right", log: log.clone() }, Rect::new(100.0, 0.0, 100.0, 100.0));
    add(&mut ui, right, Recorder { label: "b", log: log.clone() }, Rect::new(10.0, 10.0, 20.0, 20.0));
    ui.update().unwrap();

    ui.on_mouse_moved(Vec2::new(15.0, 15.0));
    log.borrow_mut().clear();
    ui.on_mouse_moved(Vec2::new(115.0, 15.0));

    assert_eq!(
        matching(&log, &["enter", "leave", "hover", "unhover"]),
        vec![
            "a:unhover",
            "b:hover",
            "a:leave",
            "left:leave",
            "right:enter",
            "b:enter",
        ]
    );
}

// -----------------------------------------------------------------------------
// Clicks
// -----------------------------------------------------------------------------

#[test]
fn test_double_click_within_interval_only() {
    let log: Log = Rc::default();
    let platform = HeadlessPlatform::new();
    let mut ui = ui_with(platform.clone(), Vec2::new(100.0, 100.0));
    let root = ui.root();
    add(&mut ui, root, Recorder { label: "n", log: log.clone() }, Rect::new(0.0, 0.0, 50.0, 50.0));
    ui.update().unwrap();

    let p = Vec2::new(10.0, 10.0);
    for step in [Duration::ZERO, Duration::from_millis(200), Duration::from_millis(600)] {
        platform.advance(step);
        ui.on_mouse_pressed(p, MouseButton::Left);
        ui.on_mouse_released(p, MouseButton::Left);
    }

    assert_eq!(
        matching(&log, &["press"]),
        vec!["n:press#0", "n:press#1", "n:press#0"]
    );
}

#[test]
fn test_button_click_and_cancel() {
    let clicks = Rc::new(Cell::new(0));
    let counter = clicks.clone();
    let mut ui = ui_with(HeadlessPlatform::new(), Vec2::new(200.0, 100.0));
    let root = ui.root();
    let button = Button::new("Go").with_on_click(move || counter.set(counter.get() + 1));
    add(&mut ui, root, button, Rect::new(10.0, 10.0, 80.0, 30.0));
    ui.update().unwrap();

    let inside = Vec2::new(30.0, 20.0);
    ui.on_mouse_pressed(inside, MouseButton::Left);
    ui.on_mouse_released(inside, MouseButton::Left);
    assert_eq!(clicks.get(), 1);

    ui.on_mouse_pressed(inside, MouseButton::Left);
    ui.on_mouse_moved(Vec2::new(150.0, 90.0));
    ui.on_mouse_released(Vec2::new(150.0, 90.0), MouseButton::Left);
    assert_eq!(clicks.get(), 1);
    assert_eq!(ui.captured(), None);
}

// -----------------------------------------------------------------------------
// Scrolling
// -----------------------------------------------------------------------------

#[test]
fn test_wheel_over_content_scrolls_area() {
    let mut ui = ui_with(HeadlessPlatform::new(), Vec2::new(100.0, 100.0));
    let root = ui.root();
    let area = add(&mut ui, root, ScrollArea::new(), Rect::new(0.0, 0.0, 100.0, 100.0));
    let content = ui.tree_mut().create_node(Panel).unwrap();
    {
        let flex = ui.tree_mut().flex_mut(content);
        flex.height = Dimension::Points(300.0);
        flex.flex_shrink = 0.0;
    }
    ui.tree_mut().add_child(area, content).unwrap();
    ui.update().unwrap();

    assert!(ui.on_mouse_scrolled(Vec2::new(40.0, 40.0), Wheel::Vertical, 5.0));
    ui.update().unwrap();

    assert_eq!(ui.tree()[content].position(), Vec2::new(0.0, -100.0));
    assert_eq!(ui.node_at(Vec2::new(40.0, 40.0)), content);
}

// -----------------------------------------------------------------------------
// Painting
// -----------------------------------------------------------------------------

#[test]
fn test_rounded_panels_leave_stencil_balanced() {
    let mut ui = ui_with(HeadlessPlatform::new(), Vec2::new(40.0, 40.0));
    let root = ui.root();
    let outer = add(&mut ui, root, Panel, Rect::new(0.0, 0.0, 40.0, 40.0));
    let inner = add(&mut ui, outer, Panel, Rect::new(10.0, 10.0, 20.0, 20.0));
    for (id, color) in [(outer, Rgba::RED), (inner, Rgba::BLUE)] {
        let node = ui.tree_mut().node_mut(id).unwrap();
        node.fill_color = color;
        node.radii = CornerRadii::all(10.0);
    }

    let mut backend = SoftwareBackend::new(40, 40);
    backend.clear(Rgba::BLACK);
    let stats = ui.draw(&mut backend).unwrap();

    assert_eq!(stats.masks_pushed, 2);
    assert!(backend.stencil_is_clear());
    assert_eq!(backend.pixel(1, 1), Rgba::BLACK);
    assert_eq!(backend.pixel(10, 10), Rgba::RED);
    assert_eq!(backend.pixel(20, 20), Rgba::BLUE);
}
