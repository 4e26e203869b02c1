//! Primitives - the stock behaviors.
//!
//! - [`RootBehavior`] - transparent root, never a mouse target
//! - [`Button`] - click callback fired on release over the button
//! - [`Label`] - measured text, mouse-transparent
//! - [`Slider`] - normalized value with drag, track click and wheel
//! - [`ScrollArea`] - scrolls its children with wheel and scroll bars
//!
//! [`Panel`](crate::engine::Panel) lives with the behavior trait.

use std::rc::Rc;

use crate::engine::Node;
use crate::theme::{Font, MonospaceFont};

mod button;
mod label;
mod root;
mod scroll_area;
mod slider;

pub use button::*;
pub use label::*;
pub use root::*;
pub use scroll_area::*;
pub use slider::*;

/// The node's style font, or default monospace metrics.
pub(crate) fn font_of(node: &Node) -> Rc<dyn Font> {
    node.style()
        .and_then(|style| style.font.clone())
        .unwrap_or_else(|| Rc::new(MonospaceFont::default()))
}
