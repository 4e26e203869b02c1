//! Label - a line (or lines) of text sized by its font.

use crate::engine::{Behavior, EventCx, Node};
use crate::event::{Event, default_response};
use crate::layout::MeasureRequest;
use crate::renderer::{Drawable, Painter};
use crate::types::{Rgba, Vec2};

use super::font_of;

#[derive(Debug, Clone)]
pub struct Label {
    text: String,
    pub font_size: f32,
    pub color: Rgba,
}

impl Label {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size: 14.0,
            color: Rgba::BLACK,
        }
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text. Through [`Tree::edit_behavior`](crate::engine::Tree::edit_behavior)
    /// the label is re-measured on the next update.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Behavior for Label {
    fn handle_event(&mut self, _cx: &mut EventCx<'_>, event: &Event) -> bool {
        match event {
            Event::MousePress(_) | Event::MouseRelease(_) => false,
            _ => default_response(event),
        }
    }

    fn draw(&self, node: &Node, painter: &mut dyn Painter) {
        node.draw_background(painter);
        if self.text.is_empty() {
            return;
        }
        painter.draw(&Drawable::Text {
            origin: Vec2::ZERO,
            text: self.text.clone(),
            size: self.font_size,
            color: self.color,
            font: Some(font_of(node)),
        });
    }

    fn measure(&self, node: &Node, request: MeasureRequest) -> Option<Vec2> {
        let natural = font_of(node).measure(&self.text, self.font_size);
        Some(request.constrain(natural))
    }

    fn accepts_mouse(&self, _node: &Node, _local: Vec2) -> bool {
        false
    }
}
