//! Theme - the inherited style shared by a subtree.
//!
//! A [`Style`] is a flat bundle of flags and strategy objects. One instance
//! is created per UI and shared by reference: attaching a node hands it (and
//! its whole subtree) the parent's style. There is no per-property override.
//!
//! # Strategies
//!
//! - [`Mask`] - clip shape used for hit-testing and stencil clipping
//! - [`BorderPainter`] - draws the node outline
//! - [`Font`] - text metrics for measured content
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use nodal_ui::theme::{Style, RoundBorderMask, RoundBorder};
//!
//! let style = Rc::new(Style {
//!     mask: Some(Rc::new(RoundBorderMask)),
//!     border: Some(Rc::new(RoundBorder)),
//!     ..Style::default()
//! });
//! ```

use std::rc::Rc;

use crate::pipeline::UiConfig;

mod border;
mod font;
mod mask;

pub use border::*;
pub use font::*;
pub use mask::*;

// =============================================================================
// Style
// =============================================================================

#[derive(Debug, Clone)]
pub struct Style {
    /// Clip content and children to the node rectangle (and mask).
    pub enable_clipping: bool,
    /// Outline every node for debugging.
    pub enable_visualizer: bool,
    pub font: Option<Rc<dyn Font>>,
    pub mask: Option<Rc<dyn Mask>>,
    pub border: Option<Rc<dyn BorderPainter>>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            enable_clipping: true,
            enable_visualizer: false,
            font: None,
            mask: None,
            border: None,
        }
    }
}

impl Style {
    /// The root style described by a UI configuration.
    pub fn from_config(config: &UiConfig) -> Self {
        Self {
            enable_clipping: config.enable_clipping,
            enable_visualizer: config.enable_visualizer,
            font: Some(Rc::new(MonospaceFont::default())),
            mask: config
                .rounded_masks
                .then(|| Rc::new(RoundBorderMask) as Rc<dyn Mask>),
            border: config
                .round_borders
                .then(|| Rc::new(RoundBorder) as Rc<dyn BorderPainter>),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_installs_strategies() {
        let style = Style::from_config(&UiConfig::default());
        assert!(style.enable_clipping);
        assert!(!style.enable_visualizer);
        assert!(style.mask.is_some());
        assert!(style.border.is_some());
        assert!(style.font.is_some());

        let bare = Style::from_config(&UiConfig {
            rounded_masks: false,
            round_borders: false,
            enable_clipping: false,
            ..UiConfig::default()
        });
        assert!(bare.mask.is_none());
        assert!(bare.border.is_none());
        assert!(!bare.enable_clipping);
    }
}
