//! ScrollArea - a viewport over children larger than itself.
//!
//! Children are laid out normally; the area shifts them by `-scroll` through
//! its child arrange offset. Scroll bars appear on an axis when the children's
//! margin boxes overflow the viewport, and the area pads itself so the bars
//! never cover content.
//!
//! # Example
//!
//! ```ignore
//! let area = tree.create_node(ScrollArea::new())?;
//! tree.flex_mut(area).set_size(200.0, 150.0);
//! tree.add_child(area, long_list)?;
//! ui.update()?;
//! ScrollArea::scroll_to(ui.tree_mut(), area, Vec2::new(0.0, 80.0));
//! ```

use crate::engine::{Behavior, EventCx, Node, NodeId, Tree};
use crate::event::{Event, default_response};
use crate::renderer::{Drawable, Painter};
use crate::types::{Modifiers, MouseButton, Rect, Rgba, Vec2};

/// Content within this distance of the viewport edge does not count as
/// overflow.
const OVERFLOW_EPSILON: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollAxis {
    Horizontal,
    Vertical,
}

impl ScrollAxis {
    fn along(self, v: Vec2) -> f32 {
        match self {
            ScrollAxis::Horizontal => v.x,
            ScrollAxis::Vertical => v.y,
        }
    }

    fn set(self, v: &mut Vec2, value: f32) {
        match self {
            ScrollAxis::Horizontal => v.x = value,
            ScrollAxis::Vertical => v.y = value,
        }
    }
}

/// Track and handle of one visible bar, in the area's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
struct BarGeometry {
    track: Rect,
    handle: Rect,
}

#[derive(Debug)]
pub struct ScrollArea {
    scroll: Vec2,
    range_min: Vec2,
    range_max: Vec2,
    content: Rect,
    viewport: Vec2,
    show_horizontal: bool,
    show_vertical: bool,

    /// Pixels scrolled per wheel notch.
    pub scroll_multiplier: f32,
    pub bar_thickness: f32,
    pub min_handle_length: f32,
    pub track_color: Rgba,
    pub handle_color: Rgba,
    pub handle_hover_color: Rgba,
    pub corner_color: Rgba,

    /// Axis being dragged and the pointer offset into its handle.
    drag: Option<(ScrollAxis, f32)>,
    hovered_handle: Option<ScrollAxis>,
}

impl Default for ScrollArea {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollArea {
    pub fn new() -> Self {
        Self {
            scroll: Vec2::ZERO,
            range_min: Vec2::ZERO,
            range_max: Vec2::ZERO,
            content: Rect::default(),
            viewport: Vec2::ZERO,
            show_horizontal: false,
            show_vertical: false,
            scroll_multiplier: 20.0,
            bar_thickness: 8.0,
            min_handle_length: 16.0,
            track_color: Rgba::rgb(235, 235, 235),
            handle_color: Rgba::rgb(170, 170, 170),
            handle_hover_color: Rgba::rgb(120, 120, 120),
            corner_color: Rgba::rgb(235, 235, 235),
            drag: None,
            hovered_handle: None,
        }
    }

    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    /// Smallest and largest reachable scroll positions.
    pub fn scroll_range(&self) -> (Vec2, Vec2) {
        (self.range_min, self.range_max)
    }

    /// Union of the visible children's margin boxes, unscrolled.
    pub fn content_rect(&self) -> Rect {
        self.content
    }

    /// Area size minus the visible bars.
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    pub fn shows_horizontal(&self) -> bool {
        self.show_horizontal
    }

    pub fn shows_vertical(&self) -> bool {
        self.show_vertical
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Scroll the area `id` to `position` (clamped to the range).
    ///
    /// Returns whether the position changed. The new offset is applied on
    /// the next settle.
    pub fn scroll_to(tree: &mut Tree, id: NodeId, position: Vec2) -> bool {
        let changed = tree
            .edit_behavior::<ScrollArea, _>(id, |area| area.set_scroll(position))
            .unwrap_or(false);
        if changed {
            tree.request_relayout(id);
        }
        changed
    }

    fn clamp_scroll(&self, position: Vec2) -> Vec2 {
        Vec2::new(
            position.x.clamp(self.range_min.x, self.range_max.x),
            position.y.clamp(self.range_min.y, self.range_max.y),
        )
    }

    fn set_scroll(&mut self, position: Vec2) -> bool {
        let clamped = self.clamp_scroll(position);
        if clamped == self.scroll {
            return false;
        }
        self.scroll = clamped;
        true
    }

    fn bars(&self) -> Vec2 {
        Vec2::new(
            if self.show_vertical { self.bar_thickness } else { 0.0 },
            if self.show_horizontal { self.bar_thickness } else { 0.0 },
        )
    }

    // =========================================================================
    // CONTENT TRACKING
    // =========================================================================

    /// Measure the children, decide bar visibility and clamp the scroll.
    fn recalculate(&mut self, cx: &mut EventCx<'_>) {
        let size = cx.size();
        let content = cx
            .children()
            .iter()
            .filter_map(|&child| cx.tree().node(child))
            .filter(|node| node.visible_self())
            .map(Node::solved_margin_rect)
            .reduce(|acc, rect| acc.union(&rect))
            .unwrap_or_default();
        self.content = content;

        // A bar on one axis shrinks the other axis, so settle twice.
        let (mut horizontal, mut vertical) = (false, false);
        for _ in 0..2 {
            let viewport = Vec2::new(
                size.x - if vertical { self.bar_thickness } else { 0.0 },
                size.y - if horizontal { self.bar_thickness } else { 0.0 },
            );
            horizontal =
                content.right() > viewport.x + OVERFLOW_EPSILON || content.x < -OVERFLOW_EPSILON;
            vertical =
                content.bottom() > viewport.y + OVERFLOW_EPSILON || content.y < -OVERFLOW_EPSILON;
        }

        if horizontal != self.show_horizontal || vertical != self.show_vertical {
            tracing::debug!(node = ?cx.id(), horizontal, vertical, "scroll bars toggled");
            self.show_horizontal = horizontal;
            self.show_vertical = vertical;
            cx.flex_mut().scrollbar_gutter = self.bars();
        }

        self.viewport = (size - self.bars()).max(Vec2::ZERO);
        self.range_min = Vec2::new(content.x.min(0.0), content.y.min(0.0));
        self.range_max = Vec2::new(
            (content.right() - self.viewport.x).max(self.range_min.x),
            (content.bottom() - self.viewport.y).max(self.range_min.y),
        );

        if self.set_scroll(self.scroll) {
            cx.request_relayout();
        }
    }

    // =========================================================================
    // SCROLL BARS
    // =========================================================================

    fn bar(&self, axis: ScrollAxis, size: Vec2) -> Option<BarGeometry> {
        let t = self.bar_thickness;
        let track = match axis {
            ScrollAxis::Horizontal if self.show_horizontal => {
                Rect::new(0.0, size.y - t, size.x - self.bars().x, t)
            }
            ScrollAxis::Vertical if self.show_vertical => {
                Rect::new(size.x - t, 0.0, t, size.y - self.bars().y)
            }
            _ => return None,
        };

        let track_start = axis.along(track.position());
        let track_length = axis.along(track.size());
        let viewport = axis.along(self.viewport);
        let range = axis.along(self.range_max) - axis.along(self.range_min);
        let visible = if viewport + range > 0.0 {
            viewport / (viewport + range)
        } else {
            1.0
        };
        let handle_length = (track_length * visible)
            .max(self.min_handle_length)
            .min(track_length);
        let progress = if range > 0.0 {
            (axis.along(self.scroll) - axis.along(self.range_min)) / range
        } else {
            0.0
        };
        let handle_start = track_start + (track_length - handle_length) * progress;

        let handle = match axis {
            ScrollAxis::Horizontal => Rect::new(handle_start, track.y, handle_length, t),
            ScrollAxis::Vertical => Rect::new(track.x, handle_start, t, handle_length),
        };
        Some(BarGeometry { track, handle })
    }

    fn bar_at(&self, size: Vec2, local: Vec2) -> Option<(ScrollAxis, BarGeometry)> {
        [ScrollAxis::Vertical, ScrollAxis::Horizontal]
            .into_iter()
            .filter_map(|axis| self.bar(axis, size).map(|bar| (axis, bar)))
            .find(|(_, bar)| bar.track.contains(local))
    }

    /// Move the handle so that its leading edge sits at `handle_start`.
    fn drag_to(&mut self, axis: ScrollAxis, size: Vec2, handle_start: f32) -> bool {
        let Some(bar) = self.bar(axis, size) else {
            return false;
        };
        let travel = axis.along(bar.track.size()) - axis.along(bar.handle.size());
        let fraction = if travel > 0.0 {
            ((handle_start - axis.along(bar.track.position())) / travel).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let min = axis.along(self.range_min);
        let max = axis.along(self.range_max);
        let mut target = self.scroll;
        axis.set(&mut target, min + (max - min) * fraction);
        self.set_scroll(target)
    }

    fn draw_bar(&self, axis: ScrollAxis, size: Vec2, painter: &mut dyn Painter) {
        let Some(bar) = self.bar(axis, size) else {
            return;
        };
        painter.draw(&Drawable::Rect {
            rect: bar.track,
            color: self.track_color,
        });
        let active = self.hovered_handle == Some(axis)
            || self.drag.is_some_and(|(dragged, _)| dragged == axis);
        painter.draw(&Drawable::Rect {
            rect: bar.handle,
            color: if active {
                self.handle_hover_color
            } else {
                self.handle_color
            },
        });
    }
}

impl Behavior for ScrollArea {
    fn handle_event(&mut self, cx: &mut EventCx<'_>, event: &Event) -> bool {
        let size = cx.size();
        match event {
            Event::LayoutChange | Event::ChildrenLayoutChange => {
                self.recalculate(cx);
                true
            }
            Event::MouseScroll(scroll) => {
                if scroll
                    .modifiers
                    .intersects(Modifiers::CONTROL | Modifiers::ALT)
                {
                    return false;
                }
                let target = self.scroll + scroll.delta * self.scroll_multiplier;
                if !self.set_scroll(target) {
                    return false;
                }
                cx.request_relayout();
                true
            }
            Event::MousePress(press) if press.button == MouseButton::Left => {
                let Some((axis, bar)) = self.bar_at(size, press.local) else {
                    return default_response(event);
                };
                let along = axis.along(press.local);
                let handle_start = axis.along(bar.handle.position());
                let handle_length = axis.along(bar.handle.size());
                if bar.handle.contains(press.local) {
                    self.drag = Some((axis, along - handle_start));
                } else {
                    let grab = handle_length * 0.5;
                    self.drag = Some((axis, grab));
                    if self.drag_to(axis, size, along - grab) {
                        cx.request_relayout();
                    }
                }
                true
            }
            Event::MouseMove(motion) => {
                if let Some((axis, grab)) = self.drag {
                    if self.drag_to(axis, size, axis.along(motion.local) - grab) {
                        cx.request_relayout();
                    }
                }
                self.hovered_handle = self
                    .bar_at(size, motion.local)
                    .filter(|(_, bar)| bar.handle.contains(motion.local))
                    .map(|(axis, _)| axis);
                true
            }
            Event::MouseRelease(release) if release.button == MouseButton::Left => {
                self.drag = None;
                true
            }
            Event::Unhover => {
                self.hovered_handle = None;
                true
            }
            _ => default_response(event),
        }
    }

    fn draw_after_children(&self, node: &Node, painter: &mut dyn Painter) {
        let size = node.size();
        self.draw_bar(ScrollAxis::Vertical, size, painter);
        self.draw_bar(ScrollAxis::Horizontal, size, painter);
        if self.show_horizontal && self.show_vertical {
            let t = self.bar_thickness;
            painter.draw(&Drawable::Rect {
                rect: Rect::new(size.x - t, size.y - t, t, t),
                color: self.corner_color,
            });
        }
    }

    fn child_arrange_offset(&self) -> Vec2 {
        -self.scroll
    }

    fn scrollbar_size(&self) -> Vec2 {
        self.bars()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Panel;
    use crate::pipeline::{HeadlessPlatform, Ui, UiConfig};
    use crate::types::{Dimension, Wheel};

    /// 100x100 area over a child 300 high.
    fn setup(platform: HeadlessPlatform) -> (Ui, NodeId, NodeId) {
        let mut ui = Ui::new(
            Vec2::new(200.0, 200.0),
            UiConfig::default(),
            Box::new(platform),
        )
        .unwrap();
        let root = ui.root();
        let tree = ui.tree_mut();
        let area = tree.create_named("area", ScrollArea::new()).unwrap();
        tree.flex_mut(area).place(0.0, 0.0, 100.0, 100.0);
        tree.add_child(root, area).unwrap();

        let child = tree.create_named("content", Panel).unwrap();
        let flex = tree.flex_mut(child);
        flex.height = Dimension::Points(300.0);
        flex.flex_shrink = 0.0;
        tree.add_child(area, child).unwrap();

        ui.update().unwrap();
        (ui, area, child)
    }

    fn area_of(ui: &Ui, id: NodeId) -> &ScrollArea {
        ui.tree().behavior::<ScrollArea>(id).unwrap()
    }

    // -------------------------------------------------------------------------
    // Content tracking
    // -------------------------------------------------------------------------

    #[test]
    fn test_vertical_overflow_shows_only_vertical_bar() {
        let (ui, area, child) = setup(HeadlessPlatform::new());
        let state = area_of(&ui, area);
        assert!(state.shows_vertical());
        assert!(!state.shows_horizontal());
        assert_eq!(state.viewport(), Vec2::new(92.0, 100.0));
        assert_eq!(state.scroll_range().1, Vec2::new(0.0, 200.0));
        assert_eq!(ui.tree()[child].size().x, 92.0);
        assert_eq!(ui.tree()[area].scrollbar_size(), Vec2::new(8.0, 0.0));
    }

    #[test]
    fn test_user_padding_survives_bar_toggle() {
        let (mut ui, area, child) = setup(HeadlessPlatform::new());
        ui.tree_mut().flex_mut(area).padding_right = 4.0;
        ui.update().unwrap();
        assert_eq!(ui.tree()[area].flex().scrollbar_gutter, Vec2::new(8.0, 0.0));
        assert_eq!(ui.tree()[child].size().x, 88.0);

        ui.tree_mut().flex_mut(child).height = Dimension::Points(50.0);
        ui.update().unwrap();

        assert!(!area_of(&ui, area).shows_vertical());
        let flex = ui.tree()[area].flex();
        assert_eq!(flex.padding_right, 4.0);
        assert_eq!(flex.scrollbar_gutter, Vec2::ZERO);
        assert_eq!(ui.tree()[child].size().x, 96.0);
    }

    #[test]
    fn test_shrinking_content_hides_bar_and_clamps() {
        let (mut ui, area, child) = setup(HeadlessPlatform::new());
        assert!(ScrollArea::scroll_to(ui.tree_mut(), area, Vec2::new(0.0, 150.0)));
        ui.update().unwrap();

        ui.tree_mut().flex_mut(child).height = Dimension::Points(50.0);
        ui.update().unwrap();

        let state = area_of(&ui, area);
        assert!(!state.shows_vertical());
        assert_eq!(state.scroll(), Vec2::ZERO);
        assert_eq!(ui.tree()[child].position(), Vec2::ZERO);
        assert_eq!(ui.tree()[child].size().x, 100.0);
    }

    // -------------------------------------------------------------------------
    // Wheel
    // -------------------------------------------------------------------------

    #[test]
    fn test_wheel_scrolls_children() {
        let (mut ui, area, child) = setup(HeadlessPlatform::new());
        assert!(ui.on_mouse_scrolled(Vec2::new(50.0, 50.0), Wheel::Vertical, 5.0));
        assert_eq!(area_of(&ui, area).scroll(), Vec2::new(0.0, 100.0));

        ui.update().unwrap();
        assert_eq!(ui.tree()[child].position().y, -100.0);
        assert_eq!(ui.tree()[child].arrange_offset(), Vec2::new(0.0, -100.0));
    }

    #[test]
    fn test_wheel_at_range_end_is_not_consumed() {
        let (mut ui, area, _) = setup(HeadlessPlatform::new());
        let p = Vec2::new(50.0, 50.0);
        assert!(!ui.on_mouse_scrolled(p, Wheel::Vertical, -1.0));
        assert!(ui.on_mouse_scrolled(p, Wheel::Vertical, 50.0));
        assert_eq!(area_of(&ui, area).scroll().y, 200.0);
        assert!(!ui.on_mouse_scrolled(p, Wheel::Vertical, 1.0));
    }

    #[test]
    fn test_wheel_ignored_with_control() {
        let platform = HeadlessPlatform::new();
        let (mut ui, area, _) = setup(platform.clone());
        platform.set_modifiers(Modifiers::CONTROL);
        assert!(!ui.on_mouse_scrolled(Vec2::new(50.0, 50.0), Wheel::Vertical, 1.0));
        assert_eq!(area_of(&ui, area).scroll(), Vec2::ZERO);
    }

    // -------------------------------------------------------------------------
    // Scroll bars
    // -------------------------------------------------------------------------

    #[test]
    fn test_press_on_bar_reaches_area() {
        let (ui, area, _) = setup(HeadlessPlatform::new());
        assert_eq!(ui.node_at(Vec2::new(96.0, 50.0)), area);
    }

    #[test]
    fn test_drag_handle_scrolls() {
        let (mut ui, area, child) = setup(HeadlessPlatform::new());
        // Handle covers a third of the 100 px track: y in 0..33.3.
        ui.on_mouse_pressed(Vec2::new(96.0, 10.0), MouseButton::Left);
        assert!(area_of(&ui, area).is_dragging());

        // Full travel is 66.7 px for 200 px of content.
        ui.on_mouse_moved(Vec2::new(96.0, 10.0 + 100.0 / 3.0));
        let scrolled = area_of(&ui, area).scroll().y;
        assert!((scrolled - 100.0).abs() < 0.01, "scrolled {scrolled}");

        ui.on_mouse_released(Vec2::new(96.0, 43.0), MouseButton::Left);
        assert!(!area_of(&ui, area).is_dragging());
        ui.update().unwrap();
        assert!((ui.tree()[child].position().y + 100.0).abs() < 0.01);
    }

    #[test]
    fn test_track_click_centres_handle() {
        let (mut ui, area, _) = setup(HeadlessPlatform::new());
        ui.on_mouse_pressed(Vec2::new(96.0, 99.0), MouseButton::Left);
        assert_eq!(area_of(&ui, area).scroll().y, 200.0);
    }
}
