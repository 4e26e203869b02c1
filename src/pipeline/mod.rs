//! Pipeline - the UI controller and what it is configured with.
//!
//! # Frame
//!
//! ```text
//! input  → Ui::on_*        hit-test, capture, hover, focus, bubbling
//! update → settle loop     solve → update_layout → notify, up to the cap
//!                          then hover refresh at the last mouse position
//! draw   → draw_hierarchy  view / scissor / stencil per node
//! ```
//!
//! The controller owns the tree, the interaction pointers (hovered,
//! captured, focused) and the platform proxy. Everything runs on one thread.

mod config;
mod platform;
mod ui;

pub use config::*;
pub use platform::*;
pub use ui::*;
