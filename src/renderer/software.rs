//! Software backend - CPU raster with a color and a stencil buffer.
//!
//! Pixels are sampled at their centers. Stencil semantics follow GL: the
//! test runs only when enabled, the pass op is masked by the write mask, and
//! color is written only for passing fragments with color writes on.
//! Text is not rasterized.

use crate::theme::rounded_rect_contains;
use crate::types::{CornerRadii, Rect, Rgba, Vec2};

use super::{
    BlendMode, Drawable, RenderBackend, RenderState, Shader, StencilFunction, StencilOp,
    StencilState,
};

pub struct SoftwareBackend {
    width: usize,
    height: usize,
    color: Vec<Rgba>,
    stencil: Vec<u32>,
    view: Rect,
    scissor: Option<Rect>,
    stencil_test: bool,
    stencil_state: StencilState,
}

impl SoftwareBackend {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            color: vec![Rgba::TRANSPARENT; width * height],
            stencil: vec![0; width * height],
            view: Rect::new(0.0, 0.0, width as f32, height as f32),
            scissor: None,
            stencil_test: false,
            stencil_state: StencilState::default(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reset color to `background` and the stencil to zero.
    pub fn clear(&mut self, background: Rgba) {
        self.color.fill(background);
        self.stencil.fill(0);
    }

    /// Resize and clear.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.color = vec![Rgba::TRANSPARENT; width * height];
        self.stencil = vec![0; width * height];
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        self.color[y * self.width + x]
    }

    pub fn stencil_at(&self, x: usize, y: usize) -> u32 {
        self.stencil[y * self.width + x]
    }

    pub fn stencil_is_clear(&self) -> bool {
        self.stencil.iter().all(|&value| value == 0)
    }

    /// Rasterize `bounds` (view-local), keeping pixels accepted by `cover`.
    fn fill(
        &mut self,
        bounds: Rect,
        color: Rgba,
        state: &RenderState,
        cover: impl Fn(Vec2) -> bool,
    ) {
        let origin = self.view.position();
        let mut clip = bounds.translated(origin);
        if let Some(scissor) = self.scissor {
            match clip.intersection(&scissor) {
                Some(inside) => clip = inside,
                None => return,
            }
        }

        let x0 = clip.x.floor().max(0.0) as usize;
        let y0 = clip.y.floor().max(0.0) as usize;
        let x1 = (clip.right().ceil().max(0.0) as usize).min(self.width);
        let y1 = (clip.bottom().ceil().max(0.0) as usize).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                if !clip.contains(center) {
                    continue;
                }
                let local = center - origin;
                if !cover(local) || !shader_covers(&state.shader, local) {
                    continue;
                }
                self.shade(y * self.width + x, color, state.blend);
            }
        }
    }

    fn shade(&mut self, index: usize, color: Rgba, blend: BlendMode) {
        if self.stencil_test {
            let s = self.stencil_state;
            let stored = self.stencil[index];
            let pass = match s.function {
                StencilFunction::Always => true,
                StencilFunction::Equal => s.reference == stored,
                StencilFunction::Less => s.reference < stored,
            };
            if !pass {
                return;
            }
            let updated = match s.pass_op {
                StencilOp::Keep => stored,
                StencilOp::Increment => stored.saturating_add(1),
                StencilOp::Decrement => stored.saturating_sub(1),
                StencilOp::Replace => s.reference,
            };
            self.stencil[index] = (stored & !s.write_mask) | (updated & s.write_mask);
            if !s.color_write {
                return;
            }
        }

        self.color[index] = match blend {
            BlendMode::Alpha => Rgba::blend(color, self.color[index]),
            BlendMode::Replace => color,
        };
    }
}

fn shader_covers(shader: &Shader, local: Vec2) -> bool {
    match *shader {
        Shader::None => true,
        Shader::RoundedMask { size, radii } => {
            Rect::from_pos_size(Vec2::ZERO, size).contains(local)
                && rounded_rect_contains(size, &radii, local)
        }
        Shader::RoundedBorder { size, radii, width } => {
            let outer = Rect::from_pos_size(Vec2::ZERO, size).contains(local)
                && rounded_rect_contains(size, &radii, local);
            if !outer {
                return false;
            }
            let inner_size = (size - Vec2::new(2.0 * width, 2.0 * width)).max(Vec2::ZERO);
            let inner_radii = CornerRadii {
                top_left: (radii.top_left - width).max(0.0),
                top_right: (radii.top_right - width).max(0.0),
                bottom_left: (radii.bottom_left - width).max(0.0),
                bottom_right: (radii.bottom_right - width).max(0.0),
            };
            let p = local - Vec2::new(width, width);
            let inner = Rect::from_pos_size(Vec2::ZERO, inner_size).contains(p)
                && rounded_rect_contains(inner_size, &inner_radii, p);
            !inner
        }
    }
}

impl RenderBackend for SoftwareBackend {
    fn set_view(&mut self, view: Rect) {
        self.view = view;
    }

    fn set_scissor(&mut self, scissor: Option<Rect>) {
        self.scissor = scissor;
    }

    fn set_stencil_test(&mut self, enabled: bool) {
        self.stencil_test = enabled;
    }

    fn set_stencil(&mut self, state: StencilState) {
        self.stencil_state = state;
    }

    fn draw(&mut self, drawable: &Drawable, state: &RenderState) {
        match drawable {
            Drawable::Rect { rect, color } => self.fill(*rect, *color, state, |_| true),
            Drawable::Outline {
                rect,
                thickness,
                color,
            } => {
                let inner = rect.expanded(-thickness, -thickness, -thickness, -thickness);
                self.fill(*rect, *color, state, |p| !inner.contains(p));
            }
            Drawable::Circle {
                center,
                radius,
                color,
            } => {
                let bounds = Rect::new(
                    center.x - radius,
                    center.y - radius,
                    radius * 2.0,
                    radius * 2.0,
                );
                let (center, r2) = (*center, radius * radius);
                self.fill(bounds, *color, state, |p| (p - center).length_squared() <= r2);
            }
            Drawable::Text { .. } => {}
        }
    }
}
