//! FlexNode - Per-node flexbox properties.
//!
//! Each node owns one FlexNode for its entire lifetime. The tree flushes it
//! into the solver whenever it has been touched through
//! [`Tree::flex_mut`](super::Tree::flex_mut).
//!
//! # Example
//!
//! ```ignore
//! let flex = tree.flex_mut(id);
//! flex.width = Dimension::Points(120.0);
//! flex.flex_direction = FlexDirection::Row;
//! flex.set_padding(4.0);
//! ```

use crate::types::{
    AlignContent, AlignItems, AlignSelf, Dimension, FlexDirection, FlexWrap, JustifyContent,
    Position, Vec2,
};

/// Layout properties consumed by the flexbox solver.
///
/// # Property Categories
///
/// - **Container**: direction, wrap, justify, align items/content, gap
/// - **Item**: grow, shrink, basis, align self
/// - **Dimensions**: width/height with min/max, aspect ratio
/// - **Spacing**: margin and padding per edge, uniform border width
/// - **Positioning**: relative/absolute with per-edge insets
/// - **Display**: visible or removed from layout
#[derive(Debug, Clone, PartialEq)]
pub struct FlexNode {
    // =========================================================================
    // CONTAINER PROPERTIES
    // =========================================================================
    pub flex_direction: FlexDirection,
    pub flex_wrap: FlexWrap,
    pub justify_content: JustifyContent,
    pub align_items: AlignItems,
    pub align_content: AlignContent,
    /// Gap between items on both axes.
    pub gap: f32,

    // =========================================================================
    // ITEM PROPERTIES
    // =========================================================================
    /// Flex grow factor (default 0).
    pub flex_grow: f32,
    /// Flex shrink factor (default 1).
    pub flex_shrink: f32,
    /// Initial main size before grow/shrink.
    pub flex_basis: Dimension,
    pub align_self: AlignSelf,

    // =========================================================================
    // DIMENSIONS
    // =========================================================================
    pub width: Dimension,
    pub height: Dimension,
    pub min_width: Dimension,
    pub min_height: Dimension,
    /// Auto = no max.
    pub max_width: Dimension,
    /// Auto = no max.
    pub max_height: Dimension,
    /// Width / height ratio.
    pub aspect_ratio: Option<f32>,

    // =========================================================================
    // SPACING
    // =========================================================================
    pub margin_top: f32,
    pub margin_right: f32,
    pub margin_bottom: f32,
    pub margin_left: f32,
    pub padding_top: f32,
    pub padding_right: f32,
    pub padding_bottom: f32,
    pub padding_left: f32,
    /// Border width applied to all four edges.
    pub border_width: f32,
    /// Space reserved for scroll bars, added to the right (x) and bottom (y)
    /// padding when the solver style is built. Never folded into the
    /// padding fields.
    pub scrollbar_gutter: Vec2,

    // =========================================================================
    // POSITIONING
    // =========================================================================
    pub position: Position,
    pub top: Dimension,
    pub right: Dimension,
    pub bottom: Dimension,
    pub left: Dimension,

    /// False removes the node (and its subtree) from layout, drawing and
    /// hit-testing.
    pub visible: bool,
}

impl Default for FlexNode {
    fn default() -> Self {
        Self {
            flex_direction: FlexDirection::Column,
            flex_wrap: FlexWrap::NoWrap,
            justify_content: JustifyContent::FlexStart,
            align_items: AlignItems::Stretch,
            align_content: AlignContent::Stretch,
            gap: 0.0,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            flex_basis: Dimension::Auto,
            align_self: AlignSelf::Auto,
            width: Dimension::Auto,
            height: Dimension::Auto,
            min_width: Dimension::Auto,
            min_height: Dimension::Auto,
            max_width: Dimension::Auto,
            max_height: Dimension::Auto,
            aspect_ratio: None,
            margin_top: 0.0,
            margin_right: 0.0,
            margin_bottom: 0.0,
            margin_left: 0.0,
            padding_top: 0.0,
            padding_right: 0.0,
            padding_bottom: 0.0,
            padding_left: 0.0,
            border_width: 0.0,
            scrollbar_gutter: Vec2::ZERO,
            position: Position::Relative,
            top: Dimension::Auto,
            right: Dimension::Auto,
            bottom: Dimension::Auto,
            left: Dimension::Auto,
            visible: true,
        }
    }
}

impl FlexNode {
    /// Fixed width and height in pixels.
    pub fn set_size(&mut self, width: f32, height: f32) {
        self.width = Dimension::Points(width);
        self.height = Dimension::Points(height);
    }

    /// Same margin on every edge.
    pub fn set_margin(&mut self, value: f32) {
        self.margin_top = value;
        self.margin_right = value;
        self.margin_bottom = value;
        self.margin_left = value;
    }

    /// Same padding on every edge.
    pub fn set_padding(&mut self, value: f32) {
        self.padding_top = value;
        self.padding_right = value;
        self.padding_bottom = value;
        self.padding_left = value;
    }

    /// Absolute placement at `(x, y)` inside the parent with a fixed size.
    pub fn place(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.position = Position::Absolute;
        self.left = Dimension::Points(x);
        self.top = Dimension::Points(y);
        self.set_size(width, height);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_flexbox_initial_values() {
        let flex = FlexNode::default();
        assert_eq!(flex.flex_direction, FlexDirection::Column);
        assert_eq!(flex.flex_shrink, 1.0);
        assert_eq!(flex.flex_grow, 0.0);
        assert!(flex.visible);
    }

    #[test]
    fn test_place_sets_absolute_insets() {
        let mut flex = FlexNode::default();
        flex.place(5.0, 6.0, 7.0, 8.0);
        assert_eq!(flex.position, Position::Absolute);
        assert_eq!(flex.left, Dimension::Points(5.0));
        assert_eq!(flex.top, Dimension::Points(6.0));
        assert_eq!(flex.width, Dimension::Points(7.0));
        assert_eq!(flex.height, Dimension::Points(8.0));
    }
}
