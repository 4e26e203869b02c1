//! Mask Painter - nested clip regions on a single stencil buffer.
//!
//! Content is visible where the stored stencil value equals the current
//! depth. Pushing a mask draws its shape with "equal depth → increment", so
//! the new level only exists inside every enclosing level. Popping erases
//! everything above the restored depth with one quad.
//!
//! # Protocol
//!
//! ```text
//! start_draw_mask()                mode = Add
//! draw shape through painter()     stencil: equal(depth), incr, no color
//! finish_draw_mask() -> drawn      depth += 1 when something was drawn
//! start_use_mask()                 stencil: equal(depth), keep, color
//!   ... content and children ...
//! finish_use_mask(drawn)           depth -= 1, clear quad: less(depth), replace
//! ```
//!
//! Every `finish_draw_mask` that returned true must be matched by exactly one
//! `finish_use_mask(true)` before the caller's traversal level returns.

use crate::types::{Rect, Rgba};

use super::{
    Drawable, Painter, RenderBackend, RenderState, StencilFunction, StencilOp, StencilState,
};

/// How mask draws combine with the layer under construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaskMode {
    /// Shapes add to the new level.
    #[default]
    Add,
    /// Shapes carve holes out of the new level.
    Subtract,
}

#[derive(Debug, Default)]
pub struct MaskPainter {
    mode: MaskMode,
    stencil_depth: u32,
    /// Stencil state must be re-sent before the next mask draw.
    dirty: bool,
    /// Shapes added since `start_draw_mask`.
    drawn: usize,
    /// Bounds of the clear quad, in the current view's coordinates.
    paint_rect: Rect,
}

impl MaskPainter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nesting level of active masks.
    pub fn stencil_depth(&self) -> u32 {
        self.stencil_depth
    }

    pub fn mode(&self) -> MaskMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: MaskMode) {
        if self.mode != mode {
            self.mode = mode;
            self.dirty = true;
        }
    }

    pub fn paint_rect(&self) -> Rect {
        self.paint_rect
    }

    pub fn set_paint_rect(&mut self, rect: Rect) {
        self.paint_rect = rect;
    }

    pub fn start_draw_mask(&mut self) {
        self.mode = MaskMode::Add;
        self.dirty = true;
        self.drawn = 0;
    }

    /// Painter that routes shape draws into the stencil buffer.
    pub fn painter<'a>(&'a mut self, backend: &'a mut dyn RenderBackend) -> MaskPass<'a> {
        MaskPass {
            masks: self,
            backend,
        }
    }

    /// Close the shape. Returns whether a level was pushed.
    pub fn finish_draw_mask(&mut self) -> bool {
        if self.drawn == 0 {
            return false;
        }
        self.stencil_depth += 1;
        self.drawn = 0;
        true
    }

    /// Restrict subsequent color draws to the current level.
    pub fn start_use_mask(&mut self, backend: &mut dyn RenderBackend) {
        backend.set_stencil(StencilState {
            function: StencilFunction::Equal,
            reference: self.stencil_depth,
            write_mask: 0,
            pass_op: StencilOp::Keep,
            color_write: true,
        });
        self.dirty = true;
    }

    /// Pop the level pushed by the matching `finish_draw_mask`.
    pub fn finish_use_mask(&mut self, backend: &mut dyn RenderBackend, mask_drawn: bool) {
        if !mask_drawn {
            return;
        }
        debug_assert!(self.stencil_depth > 0, "mask pop without a push");
        self.stencil_depth = self.stencil_depth.saturating_sub(1);

        backend.set_stencil(StencilState {
            function: StencilFunction::Less,
            reference: self.stencil_depth,
            write_mask: 0xFF,
            pass_op: StencilOp::Replace,
            color_write: false,
        });
        backend.draw(
            &Drawable::Rect {
                rect: self.paint_rect,
                color: Rgba::WHITE,
            },
            &RenderState::default(),
        );
        self.start_use_mask(backend);
    }

    fn prepare(&mut self, backend: &mut dyn RenderBackend) {
        if !self.dirty {
            return;
        }
        let state = match self.mode {
            MaskMode::Add => StencilState {
                function: StencilFunction::Equal,
                reference: self.stencil_depth,
                write_mask: 0xFF,
                pass_op: StencilOp::Increment,
                color_write: false,
            },
            MaskMode::Subtract => StencilState {
                function: StencilFunction::Equal,
                reference: self.stencil_depth + 1,
                write_mask: 0xFF,
                pass_op: StencilOp::Decrement,
                color_write: false,
            },
        };
        backend.set_stencil(state);
        self.dirty = false;
    }
}

/// A [`Painter`] drawing into the stencil buffer.
pub struct MaskPass<'a> {
    masks: &'a mut MaskPainter,
    backend: &'a mut dyn RenderBackend,
}

impl Painter for MaskPass<'_> {
    fn draw_with(&mut self, drawable: &Drawable, state: &RenderState) {
        self.masks.prepare(self.backend);
        self.backend.draw(drawable, state);
        if self.masks.mode == MaskMode::Add {
            self.masks.drawn += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{Command, RecordingBackend};
    use crate::types::Vec2;

    fn square() -> Drawable {
        Drawable::Rect {
            rect: Rect::from_pos_size(Vec2::ZERO, Vec2::new(10.0, 10.0)),
            color: Rgba::WHITE,
        }
    }

    #[test]
    fn test_empty_mask_pushes_nothing() {
        let mut masks = MaskPainter::new();
        masks.start_draw_mask();
        assert!(!masks.finish_draw_mask());
        assert_eq!(masks.stencil_depth(), 0);

        let mut backend = RecordingBackend::new();
        masks.finish_use_mask(&mut backend, false);
        assert!(backend.commands.is_empty());
    }

    #[test]
    fn test_push_and_pop_balance() {
        let mut masks = MaskPainter::new();
        let mut backend = RecordingBackend::new();

        masks.start_draw_mask();
        masks.painter(&mut backend).draw(&square());
        assert!(masks.finish_draw_mask());
        assert_eq!(masks.stencil_depth(), 1);

        masks.start_use_mask(&mut backend);
        masks.finish_use_mask(&mut backend, true);
        assert_eq!(masks.stencil_depth(), 0);
    }

    #[test]
    fn test_mask_draw_state_is_sent_once_per_pass() {
        let mut masks = MaskPainter::new();
        let mut backend = RecordingBackend::new();

        masks.start_draw_mask();
        {
            let mut pass = masks.painter(&mut backend);
            pass.draw(&square());
            pass.draw(&square());
        }
        let stencil_states: Vec<_> = backend.stencil_states().collect();
        assert_eq!(stencil_states.len(), 1);
        assert_eq!(stencil_states[0].function, StencilFunction::Equal);
        assert_eq!(stencil_states[0].reference, 0);
        assert_eq!(stencil_states[0].pass_op, StencilOp::Increment);
        assert!(!stencil_states[0].color_write);
    }

    #[test]
    fn test_pop_draws_clear_quad_over_paint_rect() {
        let mut masks = MaskPainter::new();
        let mut backend = RecordingBackend::new();
        masks.set_paint_rect(Rect::new(1.0, 2.0, 3.0, 4.0));

        masks.start_draw_mask();
        masks.painter(&mut backend).draw(&square());
        masks.finish_draw_mask();
        backend.commands.clear();

        masks.finish_use_mask(&mut backend, true);
        match &backend.commands[..] {
            [
                Command::SetStencil(clear),
                Command::Draw { drawable: Drawable::Rect { rect, .. }, .. },
                Command::SetStencil(restore),
            ] => {
                assert_eq!(clear.function, StencilFunction::Less);
                assert_eq!(clear.pass_op, StencilOp::Replace);
                assert_eq!(clear.reference, 0);
                assert_eq!(*rect, Rect::new(1.0, 2.0, 3.0, 4.0));
                assert_eq!(restore.function, StencilFunction::Equal);
                assert!(restore.color_write);
            }
            other => panic!("unexpected commands: {other:?}"),
        }
    }

    #[test]
    fn test_subtract_mode_does_not_count_as_drawn() {
        let mut masks = MaskPainter::new();
        let mut backend = RecordingBackend::new();

        masks.start_draw_mask();
        masks.set_mode(MaskMode::Subtract);
        masks.painter(&mut backend).draw(&square());
        assert!(!masks.finish_draw_mask());

        let last = backend.stencil_states().last();
        assert_eq!(last.map(|s| s.pass_op), Some(StencilOp::Decrement));
    }
}
