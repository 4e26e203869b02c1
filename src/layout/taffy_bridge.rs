//! Taffy Bridge - Integration with the Taffy layout engine
//!
//! Converts FlexNode properties to Taffy styles, keeps one solver node per
//! widget node, runs layout computation and extracts results as [`Geometry`].
//!
//! Taffy has no "has new layout" flag of its own. The bridge derives it: just
//! before a solve it records every solver node whose cache is empty (new,
//! restyled or invalidated by a descendant), and the tree consumes that mark
//! with [`LayoutEngine::take_new_layout`].

use std::collections::HashSet;

use taffy::{
    AlignContent as TaffyAlignContent, AlignItems as TaffyAlignItems,
    AlignSelf as TaffyAlignSelf, AvailableSpace, Dimension as TaffyDimension, Display,
    FlexDirection as TaffyFlexDirection, FlexWrap as TaffyFlexWrap,
    JustifyContent as TaffyJustifyContent, LengthPercentage, LengthPercentageAuto,
    Position as TaffyPosition, Rect, Size, Style, TaffyTree,
};

use crate::engine::{FlexNode, NodeId};
use crate::error::Result;
use crate::types::{
    AlignContent, AlignItems, AlignSelf, Dimension, FlexDirection, FlexWrap, JustifyContent,
    Position, Vec2,
};

use super::types::{Geometry, MeasureMode, MeasureRequest};

/// Handle of a node inside the solver.
pub type SolverNode = taffy::NodeId;

// =============================================================================
// DIMENSION CONVERSION
// =============================================================================

/// Convert our Dimension to Taffy's Dimension.
fn to_taffy_dimension(dim: Dimension) -> TaffyDimension {
    match dim {
        Dimension::Auto => TaffyDimension::Auto,
        Dimension::Points(n) => TaffyDimension::Length(n),
        Dimension::Percent(p) => TaffyDimension::Percent(p / 100.0),
    }
}

/// Convert our Dimension to Taffy's LengthPercentageAuto.
fn to_taffy_lpa(dim: Dimension) -> LengthPercentageAuto {
    match dim {
        Dimension::Auto => LengthPercentageAuto::Auto,
        Dimension::Points(n) => LengthPercentageAuto::Length(n),
        Dimension::Percent(p) => LengthPercentageAuto::Percent(p / 100.0),
    }
}

// =============================================================================
// ENUM CONVERSIONS
// =============================================================================

fn to_taffy_flex_direction(dir: FlexDirection) -> TaffyFlexDirection {
    match dir {
        FlexDirection::Column => TaffyFlexDirection::Column,
        FlexDirection::Row => TaffyFlexDirection::Row,
        FlexDirection::ColumnReverse => TaffyFlexDirection::ColumnReverse,
        FlexDirection::RowReverse => TaffyFlexDirection::RowReverse,
    }
}

fn to_taffy_flex_wrap(wrap: FlexWrap) -> TaffyFlexWrap {
    match wrap {
        FlexWrap::NoWrap => TaffyFlexWrap::NoWrap,
        FlexWrap::Wrap => TaffyFlexWrap::Wrap,
        FlexWrap::WrapReverse => TaffyFlexWrap::WrapReverse,
    }
}

fn to_taffy_justify_content(justify: JustifyContent) -> Option<TaffyJustifyContent> {
    Some(match justify {
        JustifyContent::FlexStart => TaffyJustifyContent::FlexStart,
        JustifyContent::Center => TaffyJustifyContent::Center,
        JustifyContent::FlexEnd => TaffyJustifyContent::FlexEnd,
        JustifyContent::SpaceBetween => TaffyJustifyContent::SpaceBetween,
        JustifyContent::SpaceAround => TaffyJustifyContent::SpaceAround,
        JustifyContent::SpaceEvenly => TaffyJustifyContent::SpaceEvenly,
    })
}

fn to_taffy_align_items(align: AlignItems) -> Option<TaffyAlignItems> {
    Some(match align {
        AlignItems::Stretch => TaffyAlignItems::Stretch,
        AlignItems::FlexStart => TaffyAlignItems::FlexStart,
        AlignItems::Center => TaffyAlignItems::Center,
        AlignItems::FlexEnd => TaffyAlignItems::FlexEnd,
        AlignItems::Baseline => TaffyAlignItems::Baseline,
    })
}

fn to_taffy_align_content(align: AlignContent) -> Option<TaffyAlignContent> {
    Some(match align {
        AlignContent::Stretch => TaffyAlignContent::Stretch,
        AlignContent::FlexStart => TaffyAlignContent::FlexStart,
        AlignContent::Center => TaffyAlignContent::Center,
        AlignContent::FlexEnd => TaffyAlignContent::FlexEnd,
        AlignContent::SpaceBetween => TaffyAlignContent::SpaceBetween,
        AlignContent::SpaceAround => TaffyAlignContent::SpaceAround,
    })
}

fn to_taffy_align_self(align: AlignSelf) -> Option<TaffyAlignSelf> {
    match align {
        AlignSelf::Auto => None, // inherit from parent
        AlignSelf::Stretch => Some(TaffyAlignSelf::Stretch),
        AlignSelf::FlexStart => Some(TaffyAlignSelf::FlexStart),
        AlignSelf::Center => Some(TaffyAlignSelf::Center),
        AlignSelf::FlexEnd => Some(TaffyAlignSelf::FlexEnd),
        AlignSelf::Baseline => Some(TaffyAlignSelf::Baseline),
    }
}

fn to_taffy_position(position: Position) -> TaffyPosition {
    match position {
        Position::Relative => TaffyPosition::Relative,
        Position::Absolute => TaffyPosition::Absolute,
    }
}

// =============================================================================
// STYLE BUILDING
// =============================================================================

/// Build a Taffy Style from a FlexNode.
pub fn build_style(node: &FlexNode) -> Style {
    let length = LengthPercentage::Length;

    Style {
        display: if node.visible { Display::Flex } else { Display::None },
        position: to_taffy_position(node.position),
        inset: Rect {
            top: to_taffy_lpa(node.top),
            right: to_taffy_lpa(node.right),
            bottom: to_taffy_lpa(node.bottom),
            left: to_taffy_lpa(node.left),
        },

        // Flex container properties
        flex_direction: to_taffy_flex_direction(node.flex_direction),
        flex_wrap: to_taffy_flex_wrap(node.flex_wrap),
        justify_content: to_taffy_justify_content(node.justify_content),
        align_items: to_taffy_align_items(node.align_items),
        align_content: to_taffy_align_content(node.align_content),
        gap: Size {
            width: length(node.gap),
            height: length(node.gap),
        },

        // Flex item properties
        flex_grow: node.flex_grow,
        flex_shrink: node.flex_shrink,
        flex_basis: to_taffy_dimension(node.flex_basis),
        align_self: to_taffy_align_self(node.align_self),

        // Dimensions
        size: Size {
            width: to_taffy_dimension(node.width),
            height: to_taffy_dimension(node.height),
        },
        min_size: Size {
            width: to_taffy_dimension(node.min_width),
            height: to_taffy_dimension(node.min_height),
        },
        max_size: Size {
            width: to_taffy_dimension(node.max_width),
            height: to_taffy_dimension(node.max_height),
        },
        aspect_ratio: node.aspect_ratio,

        margin: Rect {
            top: LengthPercentageAuto::Length(node.margin_top),
            right: LengthPercentageAuto::Length(node.margin_right),
            bottom: LengthPercentageAuto::Length(node.margin_bottom),
            left: LengthPercentageAuto::Length(node.margin_left),
        },
        padding: Rect {
            top: length(node.padding_top),
            right: length(node.padding_right + node.scrollbar_gutter.x),
            bottom: length(node.padding_bottom + node.scrollbar_gutter.y),
            left: length(node.padding_left),
        },
        border: Rect {
            top: length(node.border_width),
            right: length(node.border_width),
            bottom: length(node.border_width),
            left: length(node.border_width),
        },

        ..Default::default()
    }
}

// =============================================================================
// MEASUREMENT
// =============================================================================

fn measure_axis(known: Option<f32>, available: AvailableSpace) -> (f32, MeasureMode) {
    match (known, available) {
        (Some(value), _) => (value, MeasureMode::Exactly),
        (None, AvailableSpace::Definite(value)) => (value, MeasureMode::AtMost),
        (None, _) => (f32::INFINITY, MeasureMode::Undefined),
    }
}

fn measure_request(known: Size<Option<f32>>, available: Size<AvailableSpace>) -> MeasureRequest {
    let (width, width_mode) = measure_axis(known.width, available.width);
    let (height, height_mode) = measure_axis(known.height, available.height);
    MeasureRequest {
        width,
        width_mode,
        height,
        height_mode,
    }
}

// =============================================================================
// ENGINE
// =============================================================================

/// Owner of the solver tree.
///
/// Solver nodes carry the owning [`NodeId`] as context so measure requests
/// can be routed back to the node's behavior.
pub struct LayoutEngine {
    taffy: TaffyTree<NodeId>,
    fresh: HashSet<SolverNode>,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self {
            taffy: TaffyTree::new(),
            fresh: HashSet::new(),
        }
    }

    /// Create a detached solver node for `owner`.
    pub fn create_node(&mut self, owner: NodeId, flex: &FlexNode) -> Result<SolverNode> {
        Ok(self.taffy.new_leaf_with_context(build_style(flex), owner)?)
    }

    /// Append `child` to `parent`'s children.
    pub fn add_child(&mut self, parent: SolverNode, child: SolverNode) -> Result<()> {
        self.taffy.add_child(parent, child)?;
        Ok(())
    }

    /// Replace a node's style. Invalidates the node and its ancestors.
    pub fn set_style(&mut self, node: SolverNode, flex: &FlexNode) -> Result<()> {
        self.taffy.set_style(node, build_style(flex))?;
        Ok(())
    }

    /// Invalidate a node whose measured content changed.
    pub fn mark_dirty(&mut self, node: SolverNode) -> Result<()> {
        self.taffy.mark_dirty(node)?;
        Ok(())
    }

    /// Solve the tree under `root` for the given viewport.
    ///
    /// `measure` is called for leaves; returning `None` means "no intrinsic
    /// content" and sizes the leaf from its style alone.
    pub fn compute<F>(&mut self, root: SolverNode, available: Vec2, mut measure: F) -> Result<()>
    where
        F: FnMut(NodeId, MeasureRequest) -> Option<Vec2>,
    {
        self.collect_invalidated(root)?;

        let space = Size {
            width: AvailableSpace::Definite(available.x),
            height: AvailableSpace::Definite(available.y),
        };

        self.taffy.compute_layout_with_measure(
            root,
            space,
            |known: Size<Option<f32>>,
             available: Size<AvailableSpace>,
             _node: SolverNode,
             context: Option<&mut NodeId>,
             _style: &Style| {
                let natural = context
                    .and_then(|owner| measure(*owner, measure_request(known, available)))
                    .unwrap_or(Vec2::ZERO);
                Size {
                    width: known.width.unwrap_or(natural.x),
                    height: known.height.unwrap_or(natural.y),
                }
            },
        )?;
        Ok(())
    }

    /// Consume the "has new layout" mark of a node.
    pub fn take_new_layout(&mut self, node: SolverNode) -> bool {
        self.fresh.remove(&node)
    }

    /// Last solved geometry of a node, relative to its parent.
    pub fn geometry(&self, node: SolverNode) -> Result<Geometry> {
        let layout = self.taffy.layout(node)?;
        Ok(Geometry {
            x: layout.location.x,
            y: layout.location.y,
            width: layout.size.width,
            height: layout.size.height,
            margin_left: layout.margin.left,
            margin_top: layout.margin.top,
            margin_right: layout.margin.right,
            margin_bottom: layout.margin.bottom,
        })
    }

    fn collect_invalidated(&mut self, root: SolverNode) -> Result<()> {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if self.taffy.dirty(node)? {
                self.fresh.insert(node);
            }
            stack.extend(self.taffy.children(node)?);
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::KeyData;

    fn owner(n: u64) -> NodeId {
        NodeId::from(KeyData::from_ffi(n))
    }

    fn no_measure(_: NodeId, _: MeasureRequest) -> Option<Vec2> {
        None
    }

    fn row_with_two_growing_children() -> (LayoutEngine, SolverNode, SolverNode, SolverNode) {
        let mut engine = LayoutEngine::new();

        let mut root_flex = FlexNode::default();
        root_flex.flex_direction = FlexDirection::Row;
        root_flex.set_size(100.0, 50.0);
        let root = engine.create_node(owner(1), &root_flex).unwrap();

        let mut child_flex = FlexNode::default();
        child_flex.flex_grow = 1.0;
        let a = engine.create_node(owner(2), &child_flex).unwrap();
        let b = engine.create_node(owner(3), &child_flex).unwrap();
        engine.add_child(root, a).unwrap();
        engine.add_child(root, b).unwrap();

        (engine, root, a, b)
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    #[test]
    fn test_flex_grow_splits_row() {
        let (mut engine, root, a, b) = row_with_two_growing_children();
        engine.compute(root, Vec2::new(100.0, 50.0), no_measure).unwrap();

        let ga = engine.geometry(a).unwrap();
        let gb = engine.geometry(b).unwrap();
        assert_eq!((ga.x, ga.width, ga.height), (0.0, 50.0, 50.0));
        assert_eq!((gb.x, gb.width), (50.0, 50.0));
    }

    #[test]
    fn test_absolute_insets() {
        let mut engine = LayoutEngine::new();
        let mut root_flex = FlexNode::default();
        root_flex.set_size(200.0, 100.0);
        let root = engine.create_node(owner(1), &root_flex).unwrap();

        let mut child_flex = FlexNode::default();
        child_flex.place(15.0, 25.0, 30.0, 40.0);
        let child = engine.create_node(owner(2), &child_flex).unwrap();
        engine.add_child(root, child).unwrap();

        engine.compute(root, Vec2::new(200.0, 100.0), no_measure).unwrap();
        let g = engine.geometry(child).unwrap();
        assert_eq!((g.x, g.y, g.width, g.height), (15.0, 25.0, 30.0, 40.0));
    }

    #[test]
    fn test_hidden_node_has_no_size() {
        let (mut engine, root, a, b) = row_with_two_growing_children();
        let mut hidden = FlexNode::default();
        hidden.flex_grow = 1.0;
        hidden.visible = false;
        engine.set_style(a, &hidden).unwrap();

        engine.compute(root, Vec2::new(100.0, 50.0), no_measure).unwrap();
        assert_eq!(engine.geometry(a).unwrap().width, 0.0);
        assert_eq!(engine.geometry(b).unwrap().width, 100.0);
    }

    // -------------------------------------------------------------------------
    // Measure
    // -------------------------------------------------------------------------

    #[test]
    fn test_measure_sizes_leaf() {
        let mut engine = LayoutEngine::new();
        let mut root_flex = FlexNode::default();
        root_flex.set_size(100.0, 100.0);
        root_flex.align_items = AlignItems::FlexStart;
        let root = engine.create_node(owner(1), &root_flex).unwrap();
        let leaf = engine.create_node(owner(2), &FlexNode::default()).unwrap();
        engine.add_child(root, leaf).unwrap();

        let leaf_owner = owner(2);
        engine
            .compute(root, Vec2::new(100.0, 100.0), |id, request| {
                (id == leaf_owner).then(|| request.constrain(Vec2::new(30.0, 10.0)))
            })
            .unwrap();

        let g = engine.geometry(leaf).unwrap();
        assert_eq!((g.width, g.height), (30.0, 10.0));
    }

    // -------------------------------------------------------------------------
    // Has-new-layout marks
    // -------------------------------------------------------------------------

    #[test]
    fn test_new_layout_marks_are_consumed() {
        let (mut engine, root, a, _b) = row_with_two_growing_children();
        engine.compute(root, Vec2::new(100.0, 50.0), no_measure).unwrap();

        assert!(engine.take_new_layout(root));
        assert!(engine.take_new_layout(a));
        assert!(!engine.take_new_layout(a));

        // Unchanged tree: nothing new.
        engine.compute(root, Vec2::new(100.0, 50.0), no_measure).unwrap();
        assert!(!engine.take_new_layout(root));
        assert!(!engine.take_new_layout(a));
    }

    #[test]
    fn test_restyle_marks_node_and_ancestors() {
        let (mut engine, root, a, b) = row_with_two_growing_children();
        engine.compute(root, Vec2::new(100.0, 50.0), no_measure).unwrap();
        for node in [root, a, b] {
            engine.take_new_layout(node);
        }

        let mut wider = FlexNode::default();
        wider.flex_grow = 3.0;
        engine.set_style(a, &wider).unwrap();
        engine.compute(root, Vec2::new(100.0, 50.0), no_measure).unwrap();

        assert!(engine.take_new_layout(a));
        assert!(engine.take_new_layout(root));
        assert_eq!(engine.geometry(a).unwrap().width, 75.0);
    }
}
