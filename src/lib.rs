//! # nodal-ui
//!
//! Retained-mode widget toolkit core.
//!
//! A tree of nodes is laid out with flexbox (via Taffy), settled until
//! geometry stops changing, hit-tested with masks and scroll offsets, painted
//! through a stencil-based clipping painter and driven by routed mouse and
//! keyboard events.
//!
//! ## Pipeline
//!
//! ```text
//! input → Ui::on_* → routing (capture, hover, focus) → Behavior::handle_event
//!                                                           │
//! Ui::update → flush FlexNode → solve → update_layout → layout events (≤ cap)
//!                                                           │
//! Ui::draw   → draw_hierarchy → MaskPainter / scissor → RenderBackend
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Geometry, colors, flex enums, input codes
//! - [`engine`] - Node tree, behaviors, per-node flex properties
//! - [`layout`] - Taffy bridge and measurement
//! - [`pipeline`] - [`Ui`]: settle loop, drawing, platform seam
//! - [`state`] - Mouse, keyboard, focus, timers, terminal input adapter
//! - [`renderer`] - Backend abstraction, mask painter, hierarchy painter
//! - [`theme`] - Styles, masks, borders, fonts
//! - [`primitives`] - Stock behaviors (button, label, slider, scroll area)

pub mod engine;
pub mod error;
pub mod event;
pub mod layout;
pub mod pipeline;
pub mod primitives;
pub mod renderer;
pub mod state;
pub mod theme;
pub mod types;

#[cfg(test)]
mod testing;

pub use types::*;

pub use error::{Result, UiError};

pub use event::{Event, KeyEvent, MouseButtonEvent, MouseMoveEvent, MouseScrollEvent};

pub use engine::{Behavior, EventCx, FlexNode, Node, NodeId, Panel, Tree};

pub use pipeline::{HeadlessPlatform, Platform, Ui, UiConfig};

pub use primitives::{Button, Label, RootBehavior, ScrollArea, ScrollAxis, Slider};

pub use renderer::{
    DrawStats, Drawable, MaskPainter, Painter, RecordingBackend, RenderBackend, SoftwareBackend,
};

pub use state::{TerminalInput, TerminalPlatform, TimerId};

pub use theme::{Font, Mask, MonospaceFont, RoundBorder, RoundBorderMask, Style};
