//! Hierarchy painter - depth-first traversal of the node tree.
//!
//! Each node is drawn in its own view (local coordinates), scissored to the
//! part of it that survives every enclosing clip, and stencil-masked when its
//! style supplies a mask. Children are drawn in insertion order, so later
//! siblings paint over earlier ones.

use crate::engine::{NodeId, Tree};
use crate::types::{Rect, Rgba, Vec2};

use super::{BackendPainter, Drawable, MaskPainter, Painter, RenderBackend};

/// Outline color of the debug visualizer.
pub const VISUALIZER_COLOR: Rgba = Rgba::new(255, 0, 255, 200);

/// Counters collected during one traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub nodes_drawn: usize,
    pub masks_pushed: usize,
    pub max_stencil_depth: u32,
}

/// Draw `id` and its subtree.
///
/// `origin` is the window-space position of `id`'s parent and `paint_rect`
/// the window-space region still visible at this level. Scissor and stencil
/// test are left disabled on return.
pub fn draw_hierarchy(
    tree: &Tree,
    id: NodeId,
    origin: Vec2,
    paint_rect: Rect,
    backend: &mut dyn RenderBackend,
    masks: &mut MaskPainter,
) -> DrawStats {
    let mut stats = DrawStats::default();
    draw_node(tree, id, origin, paint_rect, None, backend, masks, &mut stats);
    backend.set_scissor(None);
    backend.set_stencil_test(false);
    stats
}

#[allow(clippy::too_many_arguments)]
fn draw_node(
    tree: &Tree,
    id: NodeId,
    origin: Vec2,
    paint_rect: Rect,
    scissor: Option<Rect>,
    backend: &mut dyn RenderBackend,
    masks: &mut MaskPainter,
    stats: &mut DrawStats,
) {
    let Some(node) = tree.node(id) else {
        return;
    };
    if !node.visible_self() {
        return;
    }

    let rect = Rect::from_pos_size(origin + node.position(), node.size());
    let clipping = node.is_clipping_enabled();
    let overlap = if clipping {
        match rect.intersection(&paint_rect) {
            Some(overlap) => overlap,
            None => return,
        }
    } else {
        paint_rect
    };
    let local_overlap = overlap.translated(-rect.position());
    let active_scissor = if clipping { Some(overlap) } else { scissor };
    let entry_depth = masks.stencil_depth();

    backend.set_view(rect);
    masks.set_paint_rect(local_overlap);
    if clipping {
        backend.set_scissor(Some(overlap));
        backend.set_stencil_test(true);
    }

    // =========================================================================
    // MASK
    // =========================================================================
    let mut mask_drawn = false;
    if clipping && node.has_mask() {
        masks.start_draw_mask();
        node.draw_mask(&mut masks.painter(&mut *backend));
        mask_drawn = masks.finish_draw_mask();
        if mask_drawn {
            stats.masks_pushed += 1;
            stats.max_stencil_depth = stats.max_stencil_depth.max(masks.stencil_depth());
        }
    }
    if active_scissor.is_some() {
        masks.start_use_mask(&mut *backend);
    }

    // =========================================================================
    // CONTENT
    // =========================================================================
    stats.nodes_drawn += 1;
    {
        let mut painter = BackendPainter::new(&mut *backend);
        if let Some(behavior) = node.behavior() {
            behavior.draw(node, &mut painter);
        }
        node.draw_border(&mut painter);
    }

    // =========================================================================
    // CHILDREN
    // =========================================================================
    let reserved = node.scrollbar_size();
    let inner = Rect::from_pos_size(rect.position(), (node.size() - reserved).max(Vec2::ZERO));
    let children_rect = if clipping {
        inner.intersection(&overlap)
    } else {
        Some(paint_rect)
    };
    if let Some(children_rect) = children_rect {
        for &child in node.children() {
            draw_node(
                tree,
                child,
                rect.position(),
                children_rect,
                active_scissor,
                backend,
                masks,
                stats,
            );
        }
    }

    backend.set_view(rect);
    masks.set_paint_rect(local_overlap);
    {
        let mut painter = BackendPainter::new(&mut *backend);
        if let Some(behavior) = node.behavior() {
            behavior.draw_after_children(node, &mut painter);
        }
        if node.is_visualizer_enabled() {
            painter.draw(&Drawable::Outline {
                rect: node.local_rect(),
                thickness: 1.0,
                color: VISUALIZER_COLOR,
            });
        }
    }

    masks.finish_use_mask(&mut *backend, mask_drawn);
    debug_assert_eq!(
        masks.stencil_depth(),
        entry_depth,
        "unbalanced mask stack below {id:?}"
    );

    if clipping {
        backend.set_scissor(scissor);
        backend.set_stencil_test(scissor.is_some());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Panel;
    use crate::renderer::{Command, RecordingBackend, SoftwareBackend};
    use crate::testing::settle;
    use crate::theme::{RoundBorderMask, Style};
    use crate::types::CornerRadii;
    use std::rc::Rc;

    fn masked_tree() -> Tree {
        let style = Rc::new(Style {
            mask: Some(Rc::new(RoundBorderMask)),
            ..Style::default()
        });
        let mut tree = Tree::new(Panel, Some(style)).unwrap();
        let root = tree.root();
        tree.flex_mut(root).set_size(40.0, 40.0);
        tree
    }

    fn panel(tree: &mut Tree, parent: NodeId, rect: Rect, color: Rgba, radius: f32) -> NodeId {
        let id = tree.create_node(Panel).unwrap();
        tree.flex_mut(id).place(rect.x, rect.y, rect.width, rect.height);
        let node = tree.node_mut(id).unwrap();
        node.fill_color = color;
        node.radii = CornerRadii::all(radius);
        tree.add_child(parent, id).unwrap();
        id
    }

    fn window() -> Rect {
        Rect::new(0.0, 0.0, 40.0, 40.0)
    }

    #[test]
    fn test_nested_rounded_masks_clip_and_clear() {
        let mut tree = masked_tree();
        let root = tree.root();
        let outer = panel(&mut tree, root, window(), Rgba::RED, 10.0);
        panel(&mut tree, outer, Rect::new(10.0, 10.0, 20.0, 20.0), Rgba::BLUE, 10.0);
        settle(&mut tree, Vec2::new(40.0, 40.0));

        let mut backend = SoftwareBackend::new(40, 40);
        let mut masks = MaskPainter::new();
        let stats = draw_hierarchy(&tree, root, Vec2::ZERO, window(), &mut backend, &mut masks);

        assert_eq!(stats.masks_pushed, 2);
        assert_eq!(stats.max_stencil_depth, 2);
        assert_eq!(masks.stencil_depth(), 0);
        assert!(backend.stencil_is_clear());

        // Outer corner: root background only.
        assert_eq!(backend.pixel(1, 1), Rgba::WHITE);
        // Inner corner: outer fill.
        assert_eq!(backend.pixel(10, 10), Rgba::RED);
        assert_eq!(backend.pixel(20, 20), Rgba::BLUE);
    }

    #[test]
    fn test_child_is_clipped_to_parent() {
        let mut tree = masked_tree();
        let root = tree.root();
        let parent = panel(&mut tree, root, Rect::new(0.0, 0.0, 20.0, 20.0), Rgba::RED, 0.0);
        panel(&mut tree, parent, Rect::new(10.0, 10.0, 20.0, 20.0), Rgba::BLUE, 0.0);
        settle(&mut tree, Vec2::new(40.0, 40.0));

        let mut backend = SoftwareBackend::new(40, 40);
        let mut masks = MaskPainter::new();
        draw_hierarchy(&tree, root, Vec2::ZERO, window(), &mut backend, &mut masks);

        assert_eq!(backend.pixel(15, 15), Rgba::BLUE);
        assert_eq!(backend.pixel(25, 25), Rgba::WHITE);
    }

    #[test]
    fn test_hidden_and_offscreen_nodes_are_skipped() {
        let mut tree = masked_tree();
        let root = tree.root();
        let hidden = panel(&mut tree, root, Rect::new(0.0, 0.0, 10.0, 10.0), Rgba::RED, 0.0);
        panel(&mut tree, root, Rect::new(100.0, 100.0, 10.0, 10.0), Rgba::RED, 0.0);
        panel(&mut tree, root, Rect::new(5.0, 5.0, 10.0, 10.0), Rgba::RED, 0.0);
        tree.set_visible(hidden, false);
        settle(&mut tree, Vec2::new(40.0, 40.0));

        let mut backend = RecordingBackend::new();
        let mut masks = MaskPainter::new();
        let stats = draw_hierarchy(&tree, root, Vec2::ZERO, window(), &mut backend, &mut masks);

        assert_eq!(stats.nodes_drawn, 2);
        assert_eq!(stats.masks_pushed, 0);
    }

    #[test]
    fn test_traversal_leaves_scissor_and_stencil_off() {
        let mut tree = masked_tree();
        let root = tree.root();
        panel(&mut tree, root, Rect::new(0.0, 0.0, 20.0, 20.0), Rgba::RED, 4.0);
        settle(&mut tree, Vec2::new(40.0, 40.0));

        let mut backend = RecordingBackend::new();
        let mut masks = MaskPainter::new();
        draw_hierarchy(&tree, root, Vec2::ZERO, window(), &mut backend, &mut masks);

        let tail: Vec<_> = backend.commands.iter().rev().take(2).collect();
        assert!(matches!(tail[0], Command::SetStencilTest(false)));
        assert!(matches!(tail[1], Command::SetScissor(None)));
    }

    #[test]
    fn test_visualizer_outlines_nodes() {
        let style = Rc::new(Style {
            enable_visualizer: true,
            ..Style::default()
        });
        let mut tree = Tree::new(Panel, Some(style)).unwrap();
        let root = tree.root();
        tree.flex_mut(root).set_size(40.0, 40.0);
        settle(&mut tree, Vec2::new(40.0, 40.0));

        let mut backend = RecordingBackend::new();
        let mut masks = MaskPainter::new();
        draw_hierarchy(&tree, root, Vec2::ZERO, window(), &mut backend, &mut masks);

        assert!(backend.draws().any(|(drawable, _)| matches!(
            drawable,
            Drawable::Outline { color, .. } if *color == VISUALIZER_COLOR
        )));
    }
}
