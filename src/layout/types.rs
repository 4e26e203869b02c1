//! Layout Types - Values exchanged with the solver.

use crate::types::{Rect, Vec2};

// =============================================================================
// GEOMETRY
// =============================================================================

/// Geometry produced by the solver for one node, relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_top: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
}

impl Geometry {
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Rectangle in the parent, without any arrange offset.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// [`Geometry::rect`] grown by the solved margins.
    pub fn margin_rect(&self) -> Rect {
        self.rect().expanded(
            self.margin_left,
            self.margin_top,
            self.margin_right,
            self.margin_bottom,
        )
    }
}

// =============================================================================
// MEASUREMENT
// =============================================================================

/// How a measured dimension is constrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureMode {
    /// The size is fixed; return it.
    Exactly,
    /// The size may not exceed the given value.
    AtMost,
    /// No constraint; return the natural size.
    Undefined,
}

/// Input to a content measure function.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasureRequest {
    pub width: f32,
    pub width_mode: MeasureMode,
    pub height: f32,
    pub height_mode: MeasureMode,
}

impl MeasureRequest {
    /// Resolve one axis: `natural` is the content's preferred size.
    pub fn resolve(value: f32, mode: MeasureMode, natural: f32) -> f32 {
        match mode {
            MeasureMode::Exactly => value,
            MeasureMode::AtMost => natural.min(value),
            MeasureMode::Undefined => natural,
        }
    }

    /// Resolve both axes against a natural size.
    pub fn constrain(&self, natural: Vec2) -> Vec2 {
        Vec2::new(
            Self::resolve(self.width, self.width_mode, natural.x),
            Self::resolve(self.height, self.height_mode, natural.y),
        )
    }
}
