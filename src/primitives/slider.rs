//! Slider - a horizontal track with a draggable handle.
//!
//! The value is stored normalized to `[0, 1]` and mapped onto `min..max`
//! for callers. Pressing the track jumps the handle to the pointer;
//! pressing the handle drags it from where it was grabbed. While focused
//! the wheel moves the value by [`Slider::wheel_step`] per notch.

use std::fmt;

use crate::engine::{Behavior, EventCx, Node};
use crate::event::{Event, default_response};
use crate::layout::MeasureRequest;
use crate::renderer::{Drawable, Painter};
use crate::types::{MouseButton, Rect, Rgba, Vec2};

pub struct Slider {
    min: f32,
    max: f32,
    value: f32,
    pub handle_radius: f32,
    pub track_height: f32,
    pub wheel_step: f32,
    pub track_color: Rgba,
    pub active_color: Rgba,
    pub handle_color: Rgba,
    pub handle_hover_color: Rgba,
    /// Pointer offset from the handle center while dragging.
    drag: Option<f32>,
    handle_hovered: bool,
    on_change: Option<Box<dyn FnMut(f32)>>,
}

impl Slider {
    pub fn new(min: f32, max: f32) -> Self {
        Self {
            min,
            max,
            value: 0.0,
            handle_radius: 6.0,
            track_height: 4.0,
            wheel_step: 0.05,
            track_color: Rgba::rgb(200, 200, 200),
            active_color: Rgba::rgb(40, 100, 220),
            handle_color: Rgba::rgb(250, 250, 250),
            handle_hover_color: Rgba::rgb(225, 235, 250),
            drag: None,
            handle_hovered: false,
            on_change: None,
        }
    }

    /// Called with the mapped value after every change.
    pub fn with_on_change(mut self, on_change: impl FnMut(f32) + 'static) -> Self {
        self.on_change = Some(Box::new(on_change));
        self
    }

    pub fn value(&self) -> f32 {
        self.min + (self.max - self.min) * self.value
    }

    pub fn normalized(&self) -> f32 {
        self.value
    }

    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    /// Set the value in `[0, 1]` (clamped). Returns whether it changed.
    pub fn set_normalized(&mut self, value: f32) -> bool {
        let value = value.clamp(0.0, 1.0);
        if value == self.value {
            return false;
        }
        self.value = value;
        let mapped = self.value();
        if let Some(on_change) = self.on_change.as_mut() {
            on_change(mapped);
        }
        true
    }

    /// Set the value in `min..max` units.
    pub fn set_value(&mut self, value: f32) -> bool {
        let span = self.max - self.min;
        if span == 0.0 {
            return self.set_normalized(0.0);
        }
        self.set_normalized((value - self.min) / span)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    // =========================================================================
    // GEOMETRY
    // =========================================================================

    /// Track start and length along x.
    fn track(&self, size: Vec2) -> (f32, f32) {
        let start = self.handle_radius;
        (start, (size.x - 2.0 * start).max(0.0))
    }

    fn handle_center(&self, size: Vec2) -> Vec2 {
        let (start, length) = self.track(size);
        Vec2::new(start + length * self.value, size.y * 0.5)
    }

    fn normalized_at(&self, size: Vec2, x: f32) -> f32 {
        let (start, length) = self.track(size);
        if length <= 0.0 {
            return 0.0;
        }
        ((x - start) / length).clamp(0.0, 1.0)
    }

    fn over_handle(&self, size: Vec2, local: Vec2) -> bool {
        (local - self.handle_center(size)).length_squared()
            <= self.handle_radius * self.handle_radius
    }
}

impl fmt::Debug for Slider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slider")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("value", &self.value)
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}

impl Behavior for Slider {
    fn handle_event(&mut self, cx: &mut EventCx<'_>, event: &Event) -> bool {
        let size = cx.size();
        match event {
            Event::MousePress(press) if press.button == MouseButton::Left => {
                if self.over_handle(size, press.local) {
                    self.drag = Some(press.local.x - self.handle_center(size).x);
                } else {
                    self.set_normalized(self.normalized_at(size, press.local.x));
                    self.drag = Some(0.0);
                }
                true
            }
            Event::MouseMove(motion) => {
                if let Some(grab) = self.drag {
                    self.set_normalized(self.normalized_at(size, motion.local.x - grab));
                }
                self.handle_hovered = self.over_handle(size, motion.local);
                true
            }
            Event::MouseRelease(release) if release.button == MouseButton::Left => {
                self.drag = None;
                true
            }
            Event::MouseScroll(scroll) => {
                if !cx.node().is_focused() {
                    return false;
                }
                // Down and left lower the value.
                let notches = if scroll.delta.y != 0.0 {
                    -scroll.delta.y
                } else {
                    scroll.delta.x
                };
                self.set_normalized(self.value + notches * self.wheel_step)
            }
            Event::Unhover => {
                self.handle_hovered = false;
                true
            }
            _ => default_response(event),
        }
    }

    fn draw(&self, node: &Node, painter: &mut dyn Painter) {
        let size = node.size();
        let (start, length) = self.track(size);
        let top = (size.y - self.track_height) * 0.5;

        painter.draw(&Drawable::Rect {
            rect: Rect::new(start, top, length, self.track_height),
            color: self.track_color,
        });
        painter.draw(&Drawable::Rect {
            rect: Rect::new(start, top, length * self.value, self.track_height),
            color: self.active_color,
        });

        let color = if self.handle_hovered || self.drag.is_some() {
            self.handle_hover_color
        } else {
            self.handle_color
        };
        painter.draw(&Drawable::Circle {
            center: self.handle_center(size),
            radius: self.handle_radius,
            color,
        });
    }

    fn measure(&self, _node: &Node, request: MeasureRequest) -> Option<Vec2> {
        let natural = Vec2::new(120.0, self.handle_radius * 2.0 + 4.0);
        Some(request.constrain(natural))
    }
}
