//! UI configuration.

/// Settings for one [`Ui`](super::Ui). Seeds the root style.
#[derive(Debug, Clone, PartialEq)]
pub struct UiConfig {
    /// Cap on solve / update / notify passes per [`Ui::update`](super::Ui::update).
    pub max_settle_iterations: usize,
    /// Clip nodes to their rectangle and mask.
    pub enable_clipping: bool,
    /// Outline every node.
    pub enable_visualizer: bool,
    /// Per-axis tolerance, in pixels, between the presses of a multi-click.
    pub double_click_distance: f32,
    /// Install [`RoundBorderMask`](crate::theme::RoundBorderMask) on the root style.
    pub rounded_masks: bool,
    /// Install [`RoundBorder`](crate::theme::RoundBorder) on the root style.
    pub round_borders: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            max_settle_iterations: 32,
            enable_clipping: true,
            enable_visualizer: false,
            double_click_distance: 4.0,
            rounded_masks: true,
            round_borders: true,
        }
    }
}
