//! Node - the single concrete tree entity.
//!
//! A node carries geometry, flags, appearance and a pluggable [`Behavior`].
//! Structural fields (parent, children, cached geometry) are owned by the
//! [`Tree`](super::Tree) and only readable from outside.

use std::fmt;
use std::rc::Rc;

use crate::layout::{Geometry, SolverNode};
use crate::renderer::{Drawable, Painter};
use crate::theme::{MaskShape, Style};
use crate::types::{CornerRadii, CursorType, Rect, Rgba, Vec2};

use super::behavior::Behavior;
use super::flex_node::FlexNode;

slotmap::new_key_type! {
    /// Handle of a node inside a [`Tree`](super::Tree).
    pub struct NodeId;
}

// =============================================================================
// LAYOUT HANDLE
// =============================================================================

/// The node's solver node plus pending-work flags.
#[derive(Debug)]
pub(crate) struct LayoutHandle {
    pub(crate) solver: SolverNode,
    /// FlexNode changed since the last flush.
    pub(crate) style_dirty: bool,
    /// Measured content changed since the last flush.
    pub(crate) content_dirty: bool,
    /// Relayout requested by an event handler.
    pub(crate) forced: bool,
}

impl LayoutHandle {
    pub(crate) fn new(solver: SolverNode) -> Self {
        Self {
            solver,
            style_dirty: false,
            content_dirty: false,
            forced: false,
        }
    }
}

// =============================================================================
// NODE
// =============================================================================

pub struct Node {
    /// Debug label.
    pub name: Option<String>,
    /// Own enabled flag. See [`Tree::is_enabled`](super::Tree::is_enabled)
    /// for the cascaded value.
    pub enabled_self: bool,
    pub fill_color: Rgba,
    pub border_color: Rgba,
    pub border_hover_color: Rgba,
    pub border_focus_color: Rgba,
    pub radii: CornerRadii,
    /// Cursor shown while this node is hovered.
    pub cursor: CursorType,

    pub(crate) style: Option<Rc<Style>>,
    pub(crate) flex: FlexNode,
    pub(crate) layout: LayoutHandle,
    pub(crate) geometry: Geometry,
    pub(crate) arrange_offset: Vec2,
    pub(crate) hovered: bool,
    pub(crate) focused: bool,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    /// Empty only while the behavior is handling an event.
    pub(crate) behavior: Option<Box<dyn Behavior>>,
    pub(crate) layout_dirty_self: bool,
    pub(crate) layout_dirty_children: bool,
}

impl Node {
    pub(crate) fn new(behavior: Box<dyn Behavior>, flex: FlexNode, solver: SolverNode) -> Self {
        Self {
            name: None,
            enabled_self: true,
            fill_color: Rgba::WHITE,
            border_color: Rgba::GRAY,
            border_hover_color: Rgba::rgb(90, 140, 220),
            border_focus_color: Rgba::rgb(40, 100, 220),
            radii: CornerRadii::ZERO,
            cursor: CursorType::Arrow,
            style: None,
            flex,
            layout: LayoutHandle::new(solver),
            geometry: Geometry::default(),
            arrange_offset: Vec2::ZERO,
            hovered: false,
            focused: false,
            parent: None,
            children: Vec::new(),
            behavior: Some(behavior),
            layout_dirty_self: false,
            layout_dirty_children: false,
        }
    }

    // -------------------------------------------------------------------------
    // Structure
    // -------------------------------------------------------------------------

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in insertion (paint) order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn style(&self) -> Option<&Rc<Style>> {
        self.style.as_ref()
    }

    pub fn flex(&self) -> &FlexNode {
        &self.flex
    }

    pub fn behavior(&self) -> Option<&dyn Behavior> {
        self.behavior.as_deref()
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn arrange_offset(&self) -> Vec2 {
        self.arrange_offset
    }

    /// Position in the parent, arrange offset included.
    pub fn position(&self) -> Vec2 {
        self.geometry.position() + self.arrange_offset
    }

    pub fn size(&self) -> Vec2 {
        self.geometry.size()
    }

    /// Rectangle in the parent's coordinates, arrange offset included.
    pub fn rect_in_parent(&self) -> Rect {
        Rect::from_pos_size(self.position(), self.size())
    }

    /// Own rectangle in local coordinates.
    pub fn local_rect(&self) -> Rect {
        Rect::from_pos_size(Vec2::ZERO, self.size())
    }

    /// Margin box in the parent as solved, ignoring the arrange offset.
    pub fn solved_margin_rect(&self) -> Rect {
        self.geometry.margin_rect()
    }

    /// Space reserved for scroll bars along the right and bottom edges.
    pub fn scrollbar_size(&self) -> Vec2 {
        self.behavior
            .as_ref()
            .map_or(Vec2::ZERO, |behavior| behavior.scrollbar_size())
    }

    // -------------------------------------------------------------------------
    // Flags
    // -------------------------------------------------------------------------

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn visible_self(&self) -> bool {
        self.flex.visible
    }

    pub fn is_clipping_enabled(&self) -> bool {
        self.style.as_ref().is_none_or(|style| style.enable_clipping)
    }

    pub fn is_visualizer_enabled(&self) -> bool {
        self.style.as_ref().is_some_and(|style| style.enable_visualizer)
    }

    pub fn border_width(&self) -> f32 {
        self.flex.border_width
    }

    // -------------------------------------------------------------------------
    // Mouse
    // -------------------------------------------------------------------------

    /// Whether this node wants to be the target of mouse input at `local`.
    pub fn accepts_mouse(&self, local: Vec2) -> bool {
        self.behavior
            .as_ref()
            .is_none_or(|behavior| behavior.accepts_mouse(self, local))
    }

    // -------------------------------------------------------------------------
    // Mask
    // -------------------------------------------------------------------------

    pub fn mask_shape(&self) -> MaskShape {
        MaskShape {
            size: self.size(),
            radii: self.radii,
        }
    }

    pub fn has_mask(&self) -> bool {
        self.style
            .as_ref()
            .and_then(|style| style.mask.as_ref())
            .is_some_and(|mask| mask.has_mask(&self.mask_shape()))
    }

    /// True when there is no mask or the mask covers `local`.
    pub fn mask_contains_point(&self, local: Vec2) -> bool {
        match self.style.as_ref().and_then(|style| style.mask.as_ref()) {
            Some(mask) => mask.contains_point(&self.mask_shape(), local),
            None => true,
        }
    }

    // -------------------------------------------------------------------------
    // Painting helpers
    // -------------------------------------------------------------------------

    pub fn draw_mask(&self, painter: &mut dyn Painter) {
        if let Some(mask) = self.style.as_ref().and_then(|style| style.mask.as_ref()) {
            mask.draw_mask(&self.mask_shape(), painter);
        }
    }

    /// Fill the local rectangle with [`Node::fill_color`].
    pub fn draw_background(&self, painter: &mut dyn Painter) {
        if self.fill_color.is_transparent() {
            return;
        }
        painter.draw(&Drawable::Rect {
            rect: self.local_rect(),
            color: self.fill_color,
        });
    }

    pub fn draw_border(&self, painter: &mut dyn Painter) {
        if let Some(border) = self.style.as_ref().and_then(|style| style.border.as_ref()) {
            border.draw_border(self, painter);
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name)
            .field("geometry", &self.geometry)
            .field("arrange_offset", &self.arrange_offset)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .field("hovered", &self.hovered)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}
