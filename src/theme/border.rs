//! Border painters.

use std::fmt;

use crate::engine::Node;
use crate::renderer::{Drawable, Painter, RenderState, Shader};

pub trait BorderPainter: fmt::Debug {
    fn draw_border(&self, node: &Node, painter: &mut dyn Painter);
}

/// Outline following the node's corner radii, colored by focus and hover.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundBorder;

impl BorderPainter for RoundBorder {
    fn draw_border(&self, node: &Node, painter: &mut dyn Painter) {
        let width = node.border_width();
        if width <= 0.0 {
            return;
        }
        let color = if node.is_focused() {
            node.border_focus_color
        } else if node.is_hovered() {
            node.border_hover_color
        } else {
            node.border_color
        };
        if color.is_transparent() {
            return;
        }

        painter.draw_with(
            &Drawable::Rect {
                rect: node.local_rect(),
                color,
            },
            &RenderState {
                shader: Shader::RoundedBorder {
                    size: node.size(),
                    radii: node.radii,
                    width,
                },
                ..RenderState::default()
            },
        );
    }
}
