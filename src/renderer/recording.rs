//! Recording backend - keeps every command for later inspection.

use crate::types::Rect;

use super::{Drawable, RenderBackend, RenderState, StencilState};

#[derive(Debug, Clone)]
pub enum Command {
    SetView(Rect),
    SetScissor(Option<Rect>),
    SetStencilTest(bool),
    SetStencil(StencilState),
    Draw {
        drawable: Drawable,
        state: RenderState,
    },
}

#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub commands: Vec<Command>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draws(&self) -> impl Iterator<Item = (&Drawable, &RenderState)> {
        self.commands.iter().filter_map(|command| match command {
            Command::Draw { drawable, state } => Some((drawable, state)),
            _ => None,
        })
    }

    pub fn stencil_states(&self) -> impl Iterator<Item = StencilState> + '_ {
        self.commands.iter().filter_map(|command| match command {
            Command::SetStencil(state) => Some(*state),
            _ => None,
        })
    }
}

impl RenderBackend for RecordingBackend {
    fn set_view(&mut self, view: Rect) {
        self.commands.push(Command::SetView(view));
    }

    fn set_scissor(&mut self, scissor: Option<Rect>) {
        self.commands.push(Command::SetScissor(scissor));
    }

    fn set_stencil_test(&mut self, enabled: bool) {
        self.commands.push(Command::SetStencilTest(enabled));
    }

    fn set_stencil(&mut self, state: StencilState) {
        self.commands.push(Command::SetStencil(state));
    }

    fn draw(&mut self, drawable: &Drawable, state: &RenderState) {
        self.commands.push(Command::Draw {
            drawable: drawable.clone(),
            state: *state,
        });
    }
}
