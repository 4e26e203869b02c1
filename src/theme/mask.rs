//! Masks - clip shapes for hit-testing and stencil clipping.
//!
//! A mask answers two questions: "is this local point inside?" (pure math,
//! used by hit-testing) and "paint your shape" (used by the stencil pass).

use std::fmt;

use crate::renderer::{Drawable, Painter, RenderState, Shader};
use crate::types::{CornerRadii, Rect, Rgba, Vec2};

/// What a mask needs to know about its node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskShape {
    pub size: Vec2,
    pub radii: CornerRadii,
}

pub trait Mask: fmt::Debug {
    /// False when the shape would clip nothing; the stencil pass is skipped.
    fn has_mask(&self, shape: &MaskShape) -> bool;

    /// Paint the shape in local coordinates.
    fn draw_mask(&self, shape: &MaskShape, painter: &mut dyn Painter);

    /// Whether the local point lies inside the shape.
    fn contains_point(&self, shape: &MaskShape, point: Vec2) -> bool;
}

// =============================================================================
// RoundBorderMask
// =============================================================================

/// Rounded rectangle with four independent corner radii.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundBorderMask;

impl Mask for RoundBorderMask {
    fn has_mask(&self, shape: &MaskShape) -> bool {
        !shape.radii.is_zero()
    }

    fn draw_mask(&self, shape: &MaskShape, painter: &mut dyn Painter) {
        painter.draw_with(
            &Drawable::Rect {
                rect: Rect::from_pos_size(Vec2::ZERO, shape.size),
                color: Rgba::WHITE,
            },
            &RenderState {
                shader: Shader::RoundedMask {
                    size: shape.size,
                    radii: shape.radii,
                },
                ..RenderState::default()
            },
        );
    }

    fn contains_point(&self, shape: &MaskShape, point: Vec2) -> bool {
        rounded_rect_contains(shape.size, &shape.radii, point)
    }
}

/// Signed-distance test against a rounded rectangle spanning `(0,0)..size`.
///
/// The corner radius is picked by the quadrant of the point relative to the
/// center. Points in the straight parts of the rectangle are always inside;
/// only the corner disks exclude.
pub fn rounded_rect_contains(size: Vec2, radii: &CornerRadii, point: Vec2) -> bool {
    let half = size * 0.5;
    let rel = point - half;
    let radius = radii.for_quadrant(rel);
    if radius <= 0.0 {
        return true;
    }

    let q = rel.abs() - half + Vec2::new(radius, radius);
    if q.x < 0.0 || q.y < 0.0 {
        return true;
    }
    q.length_squared() < radius * radius
}
