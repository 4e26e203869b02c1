//! Renderer - drawing surface contracts and the hierarchy painter.
//!
//! The toolkit never touches a GPU directly. It talks to a
//! [`RenderBackend`]: a view transform, a scissor, a stencil unit and a
//! `draw` call. Everything above that (mask nesting, traversal order) lives
//! here.
//!
//! # Backends
//!
//! - [`RecordingBackend`] - logs commands, for protocol assertions
//! - [`SoftwareBackend`] - CPU color + stencil raster with GL stencil rules
//!
//! # Frame
//!
//! ```text
//! draw_hierarchy(root)
//!   per node: view → scissor → [mask: draw shape, depth+1] → use mask
//!             → content → border → children → after-children
//!             → [clear level, depth-1]
//! ```

use std::rc::Rc;

use crate::theme::Font;
use crate::types::{CornerRadii, Rect, Rgba, Vec2};

mod hierarchy;
mod mask_painter;
mod recording;
mod software;

pub use hierarchy::*;
pub use mask_painter::*;
pub use recording::*;
pub use software::*;

// =============================================================================
// DRAWABLES
// =============================================================================

/// Something the backend can paint. Coordinates are local to the current
/// view.
#[derive(Debug, Clone)]
pub enum Drawable {
    Rect {
        rect: Rect,
        color: Rgba,
    },
    Outline {
        rect: Rect,
        thickness: f32,
        color: Rgba,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Rgba,
    },
    Text {
        origin: Vec2,
        text: String,
        size: f32,
        color: Rgba,
        font: Option<Rc<dyn Font>>,
    },
}

/// Fragment program applied while drawing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Shader {
    #[default]
    None,
    /// Discard fragments outside a rounded rectangle spanning `(0,0)..size`.
    RoundedMask { size: Vec2, radii: CornerRadii },
    /// Keep only a band of `width` inside a rounded rectangle's edge.
    RoundedBorder {
        size: Vec2,
        radii: CornerRadii,
        width: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    #[default]
    Alpha,
    /// Overwrite the destination.
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RenderState {
    pub shader: Shader,
    pub blend: BlendMode,
}

// =============================================================================
// STENCIL
// =============================================================================

/// When a fragment passes the stencil test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StencilFunction {
    #[default]
    Always,
    /// `reference == stored`
    Equal,
    /// `reference < stored`
    Less,
}

/// What happens to the stored value when a fragment passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StencilOp {
    #[default]
    Keep,
    Increment,
    Decrement,
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StencilState {
    pub function: StencilFunction,
    pub reference: u32,
    pub write_mask: u32,
    pub pass_op: StencilOp,
    /// Whether passing fragments also write color.
    pub color_write: bool,
}

impl Default for StencilState {
    fn default() -> Self {
        Self {
            function: StencilFunction::Always,
            reference: 0,
            write_mask: 0xFF,
            pass_op: StencilOp::Keep,
            color_write: true,
        }
    }
}

// =============================================================================
// CONTRACTS
// =============================================================================

/// The drawing surface.
pub trait RenderBackend {
    /// Subsequent draws are relative to `view`'s top-left corner.
    fn set_view(&mut self, view: Rect);

    /// Restrict drawing to a window-space rectangle, or lift the restriction.
    fn set_scissor(&mut self, scissor: Option<Rect>);

    fn set_stencil_test(&mut self, enabled: bool);

    fn set_stencil(&mut self, state: StencilState);

    fn draw(&mut self, drawable: &Drawable, state: &RenderState);
}

/// What behaviors paint through.
pub trait Painter {
    fn draw_with(&mut self, drawable: &Drawable, state: &RenderState);

    fn draw(&mut self, drawable: &Drawable) {
        self.draw_with(drawable, &RenderState::default());
    }
}

/// Painter forwarding straight to a backend.
pub struct BackendPainter<'a> {
    backend: &'a mut dyn RenderBackend,
}

impl<'a> BackendPainter<'a> {
    pub fn new(backend: &'a mut dyn RenderBackend) -> Self {
        Self { backend }
    }
}

impl Painter for BackendPainter<'_> {
    fn draw_with(&mut self, drawable: &Drawable, state: &RenderState) {
        self.backend.draw(drawable, state);
    }
}
