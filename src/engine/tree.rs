//! Tree - arena of nodes with the structural, geometric and dispatch
//! operations.
//!
//! # Ownership
//!
//! Nodes live in a `SlotMap` owned by the tree. A parent owns its children
//! through the arena; a child's `parent` is a plain [`NodeId`] and never keeps
//! anything alive.
//!
//! # Layout passes
//!
//! ```text
//! compute_layout   solver solve for the root (flushes FlexNode edits first)
//! update_layout    pull fresh geometry top-down, report whether anything moved
//! notify_layout_changes
//!                  fire LayoutChange / ChildrenLayoutChange after the whole
//!                  tree is consistent
//! ```

use std::ops::Index;
use std::rc::Rc;

use slotmap::SlotMap;

use crate::error::{Result, UiError};
use crate::event::{Event, default_response};
use crate::layout::LayoutEngine;
use crate::theme::Style;
use crate::types::{Rect, Vec2};

use super::behavior::{AsAny, Behavior};
use super::flex_node::FlexNode;
use super::node::{Node, NodeId};

pub struct Tree {
    nodes: SlotMap<NodeId, Node>,
    layout: LayoutEngine,
    root: NodeId,
}

impl Tree {
    /// New tree holding only a root node with the given behavior and style.
    pub fn new(root_behavior: impl Behavior, style: Option<Rc<Style>>) -> Result<Self> {
        let mut tree = Self {
            nodes: SlotMap::with_key(),
            layout: LayoutEngine::new(),
            root: NodeId::default(),
        };
        let root = tree.create_node(root_behavior)?;
        tree.nodes[root].style = style;
        tree.nodes[root].name = Some("root".to_string());
        tree.root = root;
        Ok(tree)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // =========================================================================
    // CREATION & STRUCTURE
    // =========================================================================

    /// Create a detached node.
    pub fn create_node(&mut self, behavior: impl Behavior) -> Result<NodeId> {
        self.create_boxed(Box::new(behavior))
    }

    /// Create a detached node with a debug label.
    pub fn create_named(&mut self, name: &str, behavior: impl Behavior) -> Result<NodeId> {
        let id = self.create_boxed(Box::new(behavior))?;
        self.nodes[id].name = Some(name.to_string());
        Ok(id)
    }

    pub fn create_boxed(&mut self, behavior: Box<dyn Behavior>) -> Result<NodeId> {
        let layout = &mut self.layout;
        self.nodes.try_insert_with_key(|id| {
            let flex = FlexNode::default();
            let solver = layout.create_node(id, &flex)?;
            Ok(Node::new(behavior, flex, solver))
        })
    }

    /// Attach `child` as the last child of `parent`.
    ///
    /// The child (and its subtree) takes over the parent's style. Events, in
    /// order: `StyleChange` on every node whose style changed, `ParentChange`
    /// on the child, `ChildAdd` on the parent.
    ///
    /// # Panics
    ///
    /// If `child` already has a parent, is the root, or is an ancestor of
    /// `parent`.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let child_node = self.nodes.get(child).ok_or(UiError::UnknownNode(child))?;
        let child_solver = child_node.layout.solver;
        assert!(
            child_node.parent.is_none(),
            "node {child:?} already has a parent"
        );
        assert!(child != self.root, "the root cannot be attached to a parent");
        let parent_solver = self
            .nodes
            .get(parent)
            .ok_or(UiError::UnknownNode(parent))?
            .layout
            .solver;
        assert!(
            parent != child && !self.has_in_parents(parent, child),
            "attaching {child:?} under {parent:?} would create a cycle"
        );

        self.layout.add_child(parent_solver, child_solver)?;
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);

        let style = self.nodes[parent].style.clone();
        self.propagate_style(child, style);

        self.send_event(
            child,
            &Event::ParentChange {
                old: None,
                new: Some(parent),
            },
        );
        self.send_event(parent, &Event::ChildAdd { child });
        Ok(())
    }

    fn propagate_style(&mut self, id: NodeId, style: Option<Rc<Style>>) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = &mut self.nodes[current];
            stack.extend(node.children.iter().rev().copied());

            let same = match (&node.style, &style) {
                (Some(a), Some(b)) => Rc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            };
            if same {
                continue;
            }
            let old = std::mem::replace(&mut node.style, style.clone());
            self.send_event(
                current,
                &Event::StyleChange {
                    old,
                    new: style.clone(),
                },
            );
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map_or(&[], |node| node.children.as_slice())
    }

    /// Layout properties of `id`; marks them for flushing into the solver.
    ///
    /// # Panics
    ///
    /// If `id` is not in this tree.
    pub fn flex_mut(&mut self, id: NodeId) -> &mut FlexNode {
        let node = &mut self.nodes[id];
        node.layout.style_dirty = true;
        &mut node.flex
    }

    pub fn set_visible(&mut self, id: NodeId, visible: bool) {
        if self.nodes.get(id).is_some_and(|node| node.flex.visible != visible) {
            self.flex_mut(id).visible = visible;
        }
    }

    pub fn set_enabled(&mut self, id: NodeId, enabled: bool) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.enabled_self = enabled;
        }
    }

    /// Enabled when the node and all its ancestors are enabled.
    pub fn is_enabled(&self, id: NodeId) -> bool {
        self.ancestors_and_self(id)
            .all(|node| self.nodes[node].enabled_self)
    }

    /// Visible when the node and all its ancestors are visible.
    pub fn is_visible(&self, id: NodeId) -> bool {
        self.ancestors_and_self(id)
            .all(|node| self.nodes[node].visible_self())
    }

    /// The node itself, then each ancestor up to the root.
    pub fn ancestors_and_self(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.nodes.contains_key(id).then_some(id), move |&current| {
            self.nodes[current].parent
        })
    }

    /// True if `ancestor` is a strict ancestor of `id`.
    pub fn has_in_parents(&self, id: NodeId, ancestor: NodeId) -> bool {
        self.ancestors_and_self(id).skip(1).any(|node| node == ancestor)
    }

    /// Number of ancestors; the root has depth 0.
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors_and_self(id).count().saturating_sub(1)
    }

    // =========================================================================
    // BEHAVIORS
    // =========================================================================

    /// Downcast the behavior of `id`.
    pub fn behavior<T: Behavior>(&self, id: NodeId) -> Option<&T> {
        let behavior = self.nodes.get(id)?.behavior.as_deref()?;
        AsAny::as_any(behavior).downcast_ref::<T>()
    }

    /// Mutate the behavior of `id` in place.
    ///
    /// The node's measured content is assumed to have changed and is
    /// re-measured on the next solve.
    pub fn edit_behavior<T: Behavior, R>(
        &mut self,
        id: NodeId,
        edit: impl FnOnce(&mut T) -> R,
    ) -> Option<R> {
        let node = self.nodes.get_mut(id)?;
        let behavior = node.behavior.as_deref_mut()?;
        let typed = AsAny::as_any_mut(behavior).downcast_mut::<T>()?;
        let result = edit(typed);
        node.layout.content_dirty = true;
        Some(result)
    }

    // =========================================================================
    // COORDINATES
    // =========================================================================

    pub fn map_to_parent(&self, id: NodeId, point: Vec2) -> Vec2 {
        self.nodes.get(id).map_or(point, |node| point + node.position())
    }

    pub fn map_from_parent(&self, id: NodeId, point: Vec2) -> Vec2 {
        self.nodes.get(id).map_or(point, |node| point - node.position())
    }

    pub fn map_to_global(&self, id: NodeId, point: Vec2) -> Vec2 {
        self.ancestors_and_self(id)
            .fold(point, |p, node| p + self.nodes[node].position())
    }

    pub fn map_to_local(&self, id: NodeId, point: Vec2) -> Vec2 {
        self.ancestors_and_self(id)
            .fold(point, |p, node| p - self.nodes[node].position())
    }

    /// Window-space rectangle of `id`.
    pub fn global_rect(&self, id: NodeId) -> Rect {
        let Some(node) = self.nodes.get(id) else {
            return Rect::default();
        };
        Rect::from_pos_size(self.map_to_global(id, Vec2::ZERO), node.size())
    }

    // =========================================================================
    // HIT-TESTING
    // =========================================================================

    /// Topmost visible child of `id` containing `point` (in `id`'s space).
    ///
    /// Children are tested last-inserted first. With `check_mask`, a child
    /// whose mask excludes the point is skipped.
    pub fn child_at(&self, id: NodeId, point: Vec2, check_mask: bool) -> Option<NodeId> {
        let node = self.nodes.get(id)?;
        node.children.iter().rev().copied().find(|&child_id| {
            let child = &self.nodes[child_id];
            if !child.visible_self() || !child.rect_in_parent().contains(point) {
                return false;
            }
            !check_mask || child.mask_contains_point(point - child.position())
        })
    }

    /// Deepest node under a window-space point, masks respected. Falls back to
    /// the root.
    ///
    /// A point over a node's scroll bar reservation stops the descent at that
    /// node.
    pub fn node_at(&self, point: Vec2) -> NodeId {
        let mut current = self.root;
        let mut local = self.map_from_parent(current, point);
        loop {
            let node = &self.nodes[current];
            let content = Rect::from_pos_size(
                Vec2::ZERO,
                (node.size() - node.scrollbar_size()).max(Vec2::ZERO),
            );
            if !content.contains(local) {
                return current;
            }
            let Some(child) = self.child_at(current, local, true) else {
                return current;
            };
            local = self.map_from_parent(child, local);
            current = child;
        }
    }

    /// Whether `local` is visible through the whole clip chain of `id`.
    ///
    /// Each ancestor's rectangle is shrunk by its scroll bar reservation when
    /// `check_mask` is set, and each mask on the way must contain the point.
    pub fn contains_local_point(&self, id: NodeId, local: Vec2, check_mask: bool) -> bool {
        let Some(mut node) = self.nodes.get(id) else {
            return false;
        };
        let mut point = local;
        let mut is_self = true;
        loop {
            let mut rect = node.local_rect();
            if check_mask && !is_self {
                let reserved = node.scrollbar_size();
                rect.width = (rect.width - reserved.x).max(0.0);
                rect.height = (rect.height - reserved.y).max(0.0);
            }
            if !rect.contains(point) || (check_mask && !node.mask_contains_point(point)) {
                return false;
            }
            let Some(parent) = node.parent else {
                return true;
            };
            point += node.position();
            node = &self.nodes[parent];
            is_self = false;
        }
    }

    pub fn contains_global_point(&self, id: NodeId, global: Vec2, check_mask: bool) -> bool {
        self.contains_local_point(id, self.map_to_local(id, global), check_mask)
    }

    // =========================================================================
    // LAYOUT
    // =========================================================================

    /// Push pending FlexNode and content edits into the solver.
    pub fn flush_layout(&mut self) -> Result<()> {
        for node in self.nodes.values_mut() {
            if std::mem::take(&mut node.layout.style_dirty) {
                self.layout.set_style(node.layout.solver, &node.flex)?;
            }
            if std::mem::take(&mut node.layout.content_dirty) {
                self.layout.mark_dirty(node.layout.solver)?;
            }
        }
        Ok(())
    }

    /// Flush edits and solve the whole tree for a viewport.
    pub fn compute_layout(&mut self, available: Vec2) -> Result<()> {
        self.flush_layout()?;
        let root = self.nodes[self.root].layout.solver;
        let nodes = &self.nodes;
        self.layout.compute(root, available, |owner, request| {
            let node = nodes.get(owner)?;
            node.behavior.as_ref()?.measure(node, request)
        })
    }

    /// Refresh cached geometry of `id` and its subtree.
    ///
    /// Geometry is pulled when the solver reports new layout for the node,
    /// when relayout was requested, or when `arrange_offset` differs from the
    /// last call. Returns true if this node or any descendant moved or
    /// resized.
    pub fn update_layout(&mut self, id: NodeId, arrange_offset: Vec2) -> Result<bool> {
        let node = self.nodes.get_mut(id).ok_or(UiError::UnknownNode(id))?;
        let solved = self.layout.take_new_layout(node.layout.solver);
        let forced = std::mem::take(&mut node.layout.forced);
        let geometry = self.layout.geometry(node.layout.solver)?;

        let same = geometry == node.geometry && arrange_offset == node.arrange_offset;
        if !solved && !forced && same {
            return Ok(false);
        }
        node.geometry = geometry;
        node.arrange_offset = arrange_offset;

        let child_offset = node
            .behavior
            .as_ref()
            .map_or(Vec2::ZERO, |behavior| behavior.child_arrange_offset());
        let children = node.children.clone();

        let mut children_changed = false;
        for child in children {
            children_changed |= self.update_layout(child, child_offset)?;
        }

        let node = &mut self.nodes[id];
        node.layout_dirty_self |= !same;
        node.layout_dirty_children |= children_changed;
        Ok(!same || children_changed)
    }

    /// Fire the layout events recorded by [`Tree::update_layout`].
    ///
    /// Children are notified before their parent's `ChildrenLayoutChange`,
    /// which comes before the parent's own `LayoutChange`.
    pub fn notify_layout_changes(&mut self, id: NodeId) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if std::mem::take(&mut node.layout_dirty_children) {
            let children = node.children.clone();
            for child in children {
                self.notify_layout_changes(child);
            }
            self.send_event(id, &Event::ChildrenLayoutChange);
        }

        let dirty_self = self
            .nodes
            .get_mut(id)
            .is_some_and(|node| std::mem::take(&mut node.layout_dirty_self));
        if dirty_self {
            self.send_event(id, &Event::LayoutChange);
        }
    }

    /// Force fresh geometry on `id`, its ancestors and its direct children at
    /// the next [`Tree::update_layout`].
    pub fn request_relayout(&mut self, id: NodeId) {
        let ancestors: Vec<NodeId> = self.ancestors_and_self(id).collect();
        for node in ancestors {
            self.nodes[node].layout.forced = true;
        }
        let children = self.children(id).to_vec();
        for child in children {
            self.nodes[child].layout.forced = true;
        }
    }

    // =========================================================================
    // DISPATCH
    // =========================================================================

    /// Deliver one event to one node. Returns whether it was consumed.
    ///
    /// Hover, focus and their inverses update the node's flags before the
    /// behavior runs.
    pub fn send_event(&mut self, id: NodeId, event: &Event) -> bool {
        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        match event {
            Event::Hover => node.hovered = true,
            Event::Unhover => node.hovered = false,
            Event::Focus => node.focused = true,
            Event::Unfocus => node.focused = false,
            _ => {}
        }
        tracing::trace!(node = ?id, name = node.name.as_deref(), event = event.name(), "dispatch");

        let Some(mut behavior) = node.behavior.take() else {
            tracing::debug!(node = ?id, event = event.name(), "re-entrant dispatch, using defaults");
            return default_response(event);
        };
        let handled = {
            let mut cx = EventCx { tree: self, id };
            behavior.handle_event(&mut cx, event)
        };
        if let Some(node) = self.nodes.get_mut(id) {
            node.behavior = Some(behavior);
        }
        handled
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }
}

// =============================================================================
// EVENT CONTEXT
// =============================================================================

/// Access to the tree from inside a behavior's event handler.
pub struct EventCx<'a> {
    tree: &'a mut Tree,
    id: NodeId,
}

impl EventCx<'_> {
    /// The node receiving the event.
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &Tree {
        self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        self.tree
    }

    pub fn node(&self) -> &Node {
        &self.tree.nodes[self.id]
    }

    pub fn node_mut(&mut self) -> &mut Node {
        &mut self.tree.nodes[self.id]
    }

    pub fn size(&self) -> Vec2 {
        self.node().size()
    }

    pub fn children(&self) -> &[NodeId] {
        self.tree.children(self.id)
    }

    /// Layout properties of the receiving node; flushed before the next solve.
    pub fn flex_mut(&mut self) -> &mut FlexNode {
        self.tree.flex_mut(self.id)
    }

    /// Ask the settle loop for another geometry pass over this node.
    pub fn request_relayout(&mut self) {
        self.tree.request_relayout(self.id);
    }
}

// =============================================================================
// TESTS
// =============================================================================
