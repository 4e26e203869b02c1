//! Button - fires a callback when clicked.
//!
//! A click is a left press followed by a left release while the pointer is
//! still over the button. Releasing elsewhere cancels.

use std::fmt;

use crate::engine::{Behavior, EventCx, Node};
use crate::event::{Event, default_response};
use crate::layout::MeasureRequest;
use crate::renderer::{Drawable, Painter};
use crate::types::{CursorType, MouseButton, Rgba, Vec2};

use super::font_of;

/// Space around the caption.
const PADDING: Vec2 = Vec2::new(16.0, 8.0);

pub struct Button {
    text: String,
    pub font_size: f32,
    pub text_color: Rgba,
    pub hover_fill: Rgba,
    pub pressed_fill: Rgba,
    pressed: bool,
    on_click: Option<Box<dyn FnMut()>>,
}

impl Button {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size: 14.0,
            text_color: Rgba::BLACK,
            hover_fill: Rgba::rgb(225, 235, 250),
            pressed_fill: Rgba::rgb(190, 210, 240),
            pressed: false,
            on_click: None,
        }
    }

    pub fn with_on_click(mut self, on_click: impl FnMut() + 'static) -> Self {
        self.on_click = Some(Box::new(on_click));
        self
    }

    pub fn set_on_click(&mut self, on_click: impl FnMut() + 'static) {
        self.on_click = Some(Box::new(on_click));
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    fn fill(&self, node: &Node) -> Rgba {
        match (self.pressed, node.is_hovered()) {
            (true, true) => self.pressed_fill,
            (false, true) => self.hover_fill,
            _ => node.fill_color,
        }
    }
}

impl fmt::Debug for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Button")
            .field("text", &self.text)
            .field("pressed", &self.pressed)
            .finish_non_exhaustive()
    }
}

impl Behavior for Button {
    fn handle_event(&mut self, cx: &mut EventCx<'_>, event: &Event) -> bool {
        match event {
            Event::ParentChange { .. } => {
                cx.node_mut().cursor = CursorType::Hand;
                true
            }
            Event::MousePress(press) if press.button == MouseButton::Left => {
                self.pressed = true;
                true
            }
            Event::MouseRelease(release) if release.button == MouseButton::Left => {
                let was_pressed = std::mem::take(&mut self.pressed);
                if was_pressed && cx.node().is_hovered() {
                    tracing::debug!(node = ?cx.id(), text = %self.text, "button clicked");
                    if let Some(on_click) = self.on_click.as_mut() {
                        on_click();
                    }
                }
                true
            }
            _ => default_response(event),
        }
    }

    fn draw(&self, node: &Node, painter: &mut dyn Painter) {
        painter.draw(&Drawable::Rect {
            rect: node.local_rect(),
            color: self.fill(node),
        });
        if self.text.is_empty() {
            return;
        }
        let font = font_of(node);
        let text_size = font.measure(&self.text, self.font_size);
        painter.draw(&Drawable::Text {
            origin: (node.size() - text_size) * 0.5,
            text: self.text.clone(),
            size: self.font_size,
            color: self.text_color,
            font: Some(font),
        });
    }

    fn measure(&self, node: &Node, request: MeasureRequest) -> Option<Vec2> {
        let natural = font_of(node).measure(&self.text, self.font_size) + PADDING;
        Some(request.constrain(natural))
    }
}
