//! Mouse routing - capture, hover, enter/leave and bubbling.
//!
//! # Routing rules
//!
//! - **Press**: goes to the captured node if there is one. Otherwise the
//!   event bubbles from the mouse-accepting node under the pointer; the node
//!   that consumes it captures the mouse until that button is released and
//!   takes focus.
//! - **Release**: only the captured node sees it. Releasing the capturing
//!   button ends the capture and re-evaluates hover.
//! - **Move**: the captured node gets every move; it stays hovered only while
//!   the pointer is inside its visible area. Without capture the move bubbles
//!   from the node under the pointer.
//! - **Scroll**: always hit-tested, ignoring capture, then bubbled.
//!
//! Bubbling translates the event into each parent's space and stops below
//! the root.

use crate::engine::NodeId;
use crate::event::{Event, MouseButtonEvent, MouseMoveEvent, MouseScrollEvent};
use crate::pipeline::Ui;
use crate::types::{CursorType, Modifiers, MouseButton, MouseButtons, Vec2, Wheel};

use super::click::ClickTracker;

#[derive(Debug, Default)]
pub struct MouseState {
    pub(crate) position: Option<Vec2>,
    pub(crate) captured: Option<NodeId>,
    pub(crate) capture_button: Option<MouseButton>,
    pub(crate) hovered: Option<NodeId>,
    pub(crate) buttons: MouseButtons,
    pub(crate) clicks: ClickTracker,
}

impl Ui {
    // =========================================================================
    // INPUT
    // =========================================================================

    /// Returns whether a node consumed the press.
    pub fn on_mouse_pressed(&mut self, position: Vec2, button: MouseButton) -> bool {
        self.process_mouse_move(position, false);
        self.mouse.buttons |= MouseButtons::from(button);
        let modifiers = self.platform.modifiers();
        let click_index = self.mouse.clicks.register(
            button,
            position,
            self.platform.now(),
            self.platform.double_click_interval(),
            self.config.double_click_distance,
        );
        let press = |local: Vec2, buttons: MouseButtons| {
            Event::MousePress(MouseButtonEvent {
                local,
                global: position,
                button,
                buttons,
                modifiers,
                click_index,
            })
        };

        if let Some(captured) = self.mouse.captured {
            let local = self.tree.map_to_local(captured, position);
            return self
                .tree
                .send_event(captured, &press(local, self.mouse.buttons));
        }

        let receiver = match self.mouse_accepting_node_at(position) {
            Some(target) => {
                let local = self.tree.map_to_local(target, position);
                self.send_mouse_event(target, press(local, self.mouse.buttons))
            }
            None => None,
        };

        if let Some(receiver) = receiver {
            self.mouse.captured = Some(receiver);
            self.mouse.capture_button = Some(button);
            tracing::debug!(node = ?receiver, ?button, click_index, "mouse captured");
        }
        self.set_focus(receiver);
        receiver.is_some()
    }

    /// Returns whether the captured node consumed the release.
    pub fn on_mouse_released(&mut self, position: Vec2, button: MouseButton) -> bool {
        self.mouse.position = Some(position);
        self.mouse.buttons.remove(MouseButtons::from(button));

        let Some(captured) = self.mouse.captured else {
            return false;
        };
        let event = Event::MouseRelease(MouseButtonEvent {
            local: self.tree.map_to_local(captured, position),
            global: position,
            button,
            buttons: self.mouse.buttons,
            modifiers: self.platform.modifiers(),
            click_index: 0,
        });
        let handled = self.tree.send_event(captured, &event);

        if self.mouse.capture_button == Some(button) {
            self.mouse.captured = None;
            self.mouse.capture_button = None;
            tracing::debug!(node = ?captured, "mouse capture released");
            self.process_mouse_move(position, false);
        }
        handled
    }

    pub fn on_mouse_moved(&mut self, position: Vec2) {
        self.process_mouse_move(position, true);
    }

    /// Wheel input. Shift swaps the axes. Returns whether a node consumed it.
    pub fn on_mouse_scrolled(&mut self, position: Vec2, wheel: Wheel, delta: f32) -> bool {
        self.mouse.position = Some(position);
        let modifiers = self.platform.modifiers();
        let Some(target) = self.mouse_accepting_node_at(position) else {
            return false;
        };

        let wheel = match (wheel, modifiers.contains(Modifiers::SHIFT)) {
            (Wheel::Vertical, true) => Wheel::Horizontal,
            (Wheel::Horizontal, true) => Wheel::Vertical,
            (wheel, false) => wheel,
        };
        let delta = match wheel {
            Wheel::Vertical => Vec2::new(0.0, delta),
            Wheel::Horizontal => Vec2::new(delta, 0.0),
        };

        let event = Event::MouseScroll(MouseScrollEvent {
            local: self.tree.map_to_local(target, position),
            global: position,
            delta,
            buttons: self.mouse.buttons,
            modifiers,
        });
        self.send_mouse_event(target, event).is_some()
    }

    // =========================================================================
    // ROUTING
    // =========================================================================

    /// Re-evaluate hover at `position`. With `send_move`, also deliver a
    /// move event to the captured node or the node under the pointer.
    pub(crate) fn process_mouse_move(&mut self, position: Vec2, send_move: bool) {
        self.mouse.position = Some(position);

        let (hovered, target) = match self.mouse.captured {
            Some(captured) => {
                let inside = self.tree.contains_global_point(captured, position, true);
                (inside.then_some(captured), Some(captured))
            }
            None => {
                let target = self.mouse_accepting_node_at(position);
                (target, target)
            }
        };
        self.set_hovered(hovered);

        if !send_move {
            return;
        }
        let Some(target) = target else {
            return;
        };
        let event = Event::MouseMove(MouseMoveEvent {
            local: self.tree.map_to_local(target, position),
            global: position,
            buttons: self.mouse.buttons,
            modifiers: self.platform.modifiers(),
        });
        if self.mouse.captured == Some(target) {
            self.tree.send_event(target, &event);
        } else {
            self.send_mouse_event(target, event);
        }
    }

    /// Bubble `event` from `target` toward the root, excluding it. Returns
    /// the node that consumed it.
    pub(crate) fn send_mouse_event(&mut self, target: NodeId, mut event: Event) -> Option<NodeId> {
        let root = self.tree.root();
        let mut current = target;
        while current != root {
            if self.tree.send_event(current, &event) {
                return Some(current);
            }
            let parent = self.tree.parent(current)?;
            event.translate(self.tree[current].position());
            current = parent;
        }
        None
    }

    // =========================================================================
    // HOVER
    // =========================================================================

    fn set_hovered(&mut self, hovered: Option<NodeId>) {
        let old = self.mouse.hovered;
        if old == hovered {
            return;
        }
        self.mouse.hovered = hovered;
        tracing::debug!(old = ?old, new = ?hovered, "hover changed");

        if let Some(old) = old {
            self.tree.send_event(old, &Event::Unhover);
        }
        if let Some(new) = hovered {
            self.tree.send_event(new, &Event::Hover);
        }
        self.handle_enter_leave(old, hovered);

        let cursor = hovered
            .and_then(|id| self.tree.node(id))
            .map_or(CursorType::Arrow, |node| node.cursor);
        self.platform.set_cursor(cursor);
    }

    /// `Leave` bottom-up on the old chain, then `Enter` top-down on the new
    /// chain, both stopping at the lowest common ancestor.
    fn handle_enter_leave(&mut self, old: Option<NodeId>, new: Option<NodeId>) {
        let common = self.common_ancestor(old, new);

        let mut current = old;
        while let Some(id) = current {
            if Some(id) == common {
                break;
            }
            self.tree.send_event(id, &Event::Leave);
            current = self.tree.parent(id);
        }

        let mut entering = Vec::new();
        let mut current = new;
        while let Some(id) = current {
            if Some(id) == common {
                break;
            }
            entering.push(id);
            current = self.tree.parent(id);
        }
        for id in entering.into_iter().rev() {
            self.tree.send_event(id, &Event::Enter);
        }
    }

    /// Depth-aligned walk to the lowest node both chains share.
    fn common_ancestor(&self, a: Option<NodeId>, b: Option<NodeId>) -> Option<NodeId> {
        let (mut a, mut b) = (a?, b?);
        let (mut depth_a, mut depth_b) = (self.tree.depth(a), self.tree.depth(b));
        while depth_a > depth_b {
            a = self.tree.parent(a)?;
            depth_a -= 1;
        }
        while depth_b > depth_a {
            b = self.tree.parent(b)?;
            depth_b -= 1;
        }
        while a != b {
            a = self.tree.parent(a)?;
            b = self.tree.parent(b)?;
        }
        Some(a)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::time::Duration;

    use crate::engine::{Behavior, EventCx, NodeId};
    use crate::event::{Event, default_response};
    use crate::pipeline::{HeadlessPlatform, Ui, UiConfig};
    use crate::testing::{Probe, ProbeLog, filtered, probe_log};
    use crate::types::{CursorType, Modifiers, MouseButton, MouseButtons, Rect, Vec2, Wheel};

    /// Keeps a copy of every event.
    struct Recorder(Rc<RefCell<Vec<Event>>>);

    impl Behavior for Recorder {
        fn handle_event(&mut self, _cx: &mut EventCx<'_>, event: &Event) -> bool {
            self.0.borrow_mut().push(event.clone());
            default_response(event)
        }
    }

    fn recorder(ui: &mut Ui, parent: NodeId, seen: &Rc<RefCell<Vec<Event>>>) -> NodeId {
        let id = ui.tree_mut().create_node(Recorder(seen.clone())).unwrap();
        ui.tree_mut().flex_mut(id).place(0.0, 0.0, 50.0, 50.0);
        ui.tree_mut().add_child(parent, id).unwrap();
        id
    }

    fn setup() -> (Ui, HeadlessPlatform, ProbeLog) {
        let platform = HeadlessPlatform::new();
        let ui = Ui::new(
            Vec2::new(200.0, 100.0),
            UiConfig::default(),
            Box::new(platform.clone()),
        )
        .unwrap();
        (ui, platform, probe_log())
    }

    fn probe(ui: &mut Ui, parent: NodeId, label: &str, log: &ProbeLog, rect: Rect) -> NodeId {
        let id = ui.tree_mut().create_node(Probe::new(label, log)).unwrap();
        ui.tree_mut().flex_mut(id).place(rect.x, rect.y, rect.width, rect.height);
        ui.tree_mut().add_child(parent, id).unwrap();
        id
    }

    // -------------------------------------------------------------------------
    // Hover & enter/leave
    // -------------------------------------------------------------------------

    #[test]
    fn test_enter_leave_across_branches() {
        let (mut ui, _, log) = setup();
        let root = ui.root();
        let a = probe(&mut ui, root, "a", &log, Rect::new(0.0, 0.0, 100.0, 100.0));
        let a1 = probe(&mut ui, a, "a1", &log, Rect::new(0.0, 0.0, 50.0, 50.0));
        let _a1x = probe(&mut ui, a1, "a1x", &log, Rect::new(0.0, 0.0, 20.0, 20.0));
        let _a2 = probe(&mut ui, a, "a2", &log, Rect::new(60.0, 60.0, 30.0, 30.0));
        ui.update().unwrap();

        ui.on_mouse_moved(Vec2::new(10.0, 10.0));
        assert_eq!(
            filtered(&log, &["enter", "leave"]),
            vec!["a:enter", "a1:enter", "a1x:enter"]
        );
        log.borrow_mut().clear();

        ui.on_mouse_moved(Vec2::new(70.0, 70.0));
        assert_eq!(
            filtered(&log, &["enter", "leave", "hover", "unhover"]),
            vec!["a1x:unhover", "a2:hover", "a1x:leave", "a1:leave", "a2:enter"]
        );
    }

    #[test]
    fn test_leaving_everything_leaves_whole_chain() {
        let (mut ui, _, log) = setup();
        let root = ui.root();
        let a = probe(&mut ui, root, "a", &log, Rect::new(0.0, 0.0, 50.0, 50.0));
        probe(&mut ui, a, "b", &log, Rect::new(0.0, 0.0, 20.0, 20.0));
        ui.update().unwrap();

        ui.on_mouse_moved(Vec2::new(5.0, 5.0));
        log.borrow_mut().clear();
        ui.on_mouse_moved(Vec2::new(150.0, 80.0));

        assert_eq!(filtered(&log, &["leave"]), vec!["b:leave", "a:leave"]);
        assert_eq!(ui.hovered(), None);
    }

    #[test]
    fn test_cursor_changes_only_with_hover() {
        let (mut ui, platform, log) = setup();
        let root = ui.root();
        let a = probe(&mut ui, root, "a", &log, Rect::new(0.0, 0.0, 50.0, 50.0));
        ui.tree_mut().node_mut(a).unwrap().cursor = CursorType::Hand;
        ui.update().unwrap();

        ui.on_mouse_moved(Vec2::new(5.0, 5.0));
        ui.on_mouse_moved(Vec2::new(6.0, 6.0));
        assert_eq!(platform.cursor(), CursorType::Hand);
        assert_eq!(platform.cursor_changes(), 1);

        ui.on_mouse_moved(Vec2::new(100.0, 5.0));
        assert_eq!(platform.cursor(), CursorType::Arrow);
        assert_eq!(platform.cursor_changes(), 2);
    }

    #[test]
    fn test_hover_follows_layout_without_move_event() {
        let (mut ui, _, log) = setup();
        let root = ui.root();
        let a = probe(&mut ui, root, "a", &log, Rect::new(0.0, 0.0, 50.0, 50.0));
        ui.update().unwrap();
        ui.on_mouse_moved(Vec2::new(10.0, 10.0));
        assert_eq!(ui.hovered(), Some(a));
        log.borrow_mut().clear();

        ui.tree_mut().flex_mut(a).place(100.0, 0.0, 50.0, 50.0);
        ui.update().unwrap();

        assert_eq!(ui.hovered(), None);
        assert_eq!(filtered(&log, &["unhover", "leave"]), vec!["a:unhover", "a:leave"]);
        assert!(filtered(&log, &["mouse-move"]).is_empty());
    }

    // -------------------------------------------------------------------------
    // Capture & bubbling
    // -------------------------------------------------------------------------

    #[test]
    fn test_press_bubbles_to_consumer_and_captures() {
        let (mut ui, _, log) = setup();
        let root = ui.root();
        let outer = probe(&mut ui, root, "outer", &log, Rect::new(0.0, 0.0, 100.0, 100.0));
        let inner = ui
            .tree_mut()
            .create_node(Probe::pass_through("inner", &log))
            .unwrap();
        ui.tree_mut().flex_mut(inner).place(10.0, 10.0, 20.0, 20.0);
        ui.tree_mut().add_child(outer, inner).unwrap();
        ui.update().unwrap();

        assert!(ui.on_mouse_pressed(Vec2::new(15.0, 15.0), MouseButton::Left));
        assert_eq!(
            filtered(&log, &["mouse-press"]),
            vec!["inner:mouse-press", "outer:mouse-press"]
        );
        assert_eq!(ui.captured(), Some(outer));
        assert_eq!(ui.focused(), Some(outer));
        assert_eq!(ui.pressed_buttons(), MouseButtons::LEFT);

        // Captured node gets moves even outside its bounds, unhovered.
        log.borrow_mut().clear();
        ui.on_mouse_moved(Vec2::new(150.0, 50.0));
        assert_eq!(filtered(&log, &["mouse-move"]), vec!["outer:mouse-move"]);
        assert_eq!(ui.hovered(), None);

        ui.on_mouse_released(Vec2::new(150.0, 50.0), MouseButton::Left);
        assert_eq!(ui.captured(), None);
        assert!(ui.pressed_buttons().is_empty());
    }

    #[test]
    fn test_second_button_goes_to_captured_node() {
        let (mut ui, _, log) = setup();
        let root = ui.root();
        let a = probe(&mut ui, root, "a", &log, Rect::new(0.0, 0.0, 50.0, 50.0));
        probe(&mut ui, root, "b", &log, Rect::new(100.0, 0.0, 50.0, 50.0));
        ui.update().unwrap();

        ui.on_mouse_pressed(Vec2::new(10.0, 10.0), MouseButton::Left);
        ui.on_mouse_pressed(Vec2::new(110.0, 10.0), MouseButton::Right);
        assert_eq!(
            filtered(&log, &["mouse-press"]),
            vec!["a:mouse-press", "a:mouse-press"]
        );

        // Releasing the other button keeps the capture.
        ui.on_mouse_released(Vec2::new(110.0, 10.0), MouseButton::Right);
        assert_eq!(ui.captured(), Some(a));
        ui.on_mouse_released(Vec2::new(110.0, 10.0), MouseButton::Left);
        assert_eq!(ui.captured(), None);
    }

    #[test]
    fn test_unconsumed_press_clears_focus() {
        let (mut ui, _, log) = setup();
        let root = ui.root();
        let a = probe(&mut ui, root, "a", &log, Rect::new(0.0, 0.0, 50.0, 50.0));
        ui.update().unwrap();

        ui.on_mouse_pressed(Vec2::new(10.0, 10.0), MouseButton::Left);
        ui.on_mouse_released(Vec2::new(10.0, 10.0), MouseButton::Left);
        assert_eq!(ui.focused(), Some(a));

        assert!(!ui.on_mouse_pressed(Vec2::new(150.0, 10.0), MouseButton::Left));
        assert_eq!(ui.focused(), None);
        assert_eq!(filtered(&log, &["unfocus"]), vec!["a:unfocus"]);
    }

    #[test]
    fn test_press_reports_click_index() {
        let (mut ui, platform, _) = setup();
        let root = ui.root();
        let seen = Rc::new(RefCell::new(Vec::new()));
        recorder(&mut ui, root, &seen);
        ui.update().unwrap();

        let p = Vec2::new(10.0, 10.0);
        ui.on_mouse_pressed(p, MouseButton::Left);
        ui.on_mouse_released(p, MouseButton::Left);
        platform.advance(Duration::from_millis(100));
        ui.on_mouse_pressed(p, MouseButton::Left);
        ui.on_mouse_released(p, MouseButton::Left);
        platform.advance(Duration::from_millis(900));
        ui.on_mouse_pressed(p, MouseButton::Left);

        let indices: Vec<u32> = seen
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::MousePress(press) => Some(press.click_index),
                _ => None,
            })
            .collect();
        assert_eq!(indices, vec![0, 1, 0]);
    }

    // -------------------------------------------------------------------------
    // Scroll
    // -------------------------------------------------------------------------

    #[test]
    fn test_scroll_is_unconsumed_by_default() {
        let (mut ui, _, log) = setup();
        let root = ui.root();
        probe(&mut ui, root, "a", &log, Rect::new(0.0, 0.0, 50.0, 50.0));
        ui.update().unwrap();

        assert!(!ui.on_mouse_scrolled(Vec2::new(10.0, 10.0), Wheel::Vertical, 1.0));
        assert_eq!(filtered(&log, &["mouse-scroll"]), vec!["a:mouse-scroll"]);
    }

    #[test]
    fn test_shift_swaps_wheel_axes() {
        let (mut ui, platform, _) = setup();
        let root = ui.root();
        let seen = Rc::new(RefCell::new(Vec::new()));
        recorder(&mut ui, root, &seen);
        ui.update().unwrap();

        let p = Vec2::new(10.0, 10.0);
        ui.on_mouse_scrolled(p, Wheel::Vertical, 2.0);
        platform.set_modifiers(Modifiers::SHIFT);
        ui.on_mouse_scrolled(p, Wheel::Vertical, 2.0);

        let deltas: Vec<Vec2> = seen
            .borrow()
            .iter()
            .filter_map(|event| match event {
                Event::MouseScroll(scroll) => Some(scroll.delta),
                _ => None,
            })
            .collect();
        assert_eq!(deltas, vec![Vec2::new(0.0, 2.0), Vec2::new(2.0, 0.0)]);
    }
}
