//! Ui - the controller tying tree, layout, input and drawing together.
//!
//! # Example
//!
//! ```ignore
//! let mut ui = Ui::new(Vec2::new(800.0, 600.0), UiConfig::default(), Box::new(platform))?;
//! let button = ui.tree_mut().create_node(Button::new("OK"))?;
//! ui.tree_mut().add_child(ui.root(), button)?;
//!
//! ui.on_mouse_moved(Vec2::new(10.0, 10.0));
//! let stats = ui.draw(&mut backend)?;
//! ```

use std::rc::Rc;

use crate::engine::{NodeId, Tree};
use crate::error::Result;
use crate::primitives::RootBehavior;
use crate::renderer::{DrawStats, MaskPainter, RenderBackend, draw_hierarchy};
use crate::state::{KeyRegistry, MouseState, TimerQueue};
use crate::theme::Style;
use crate::types::{MouseButtons, Rect, Vec2};

use super::config::UiConfig;
use super::platform::Platform;

pub struct Ui {
    pub(crate) tree: Tree,
    pub(crate) config: UiConfig,
    pub(crate) platform: Box<dyn Platform>,
    pub(crate) mouse: MouseState,
    pub(crate) keys: KeyRegistry,
    pub(crate) focused: Option<NodeId>,
    pub(crate) timers: TimerQueue,
    mask_painter: MaskPainter,
    size: Vec2,
}

impl Ui {
    /// New UI whose root fills a `size` viewport.
    pub fn new(size: Vec2, config: UiConfig, platform: Box<dyn Platform>) -> Result<Self> {
        let style = Rc::new(Style::from_config(&config));
        let mut tree = Tree::new(RootBehavior, Some(style))?;
        let root = tree.root();
        tree.flex_mut(root).set_size(size.x, size.y);

        Ok(Self {
            tree,
            config,
            platform,
            mouse: MouseState::default(),
            keys: KeyRegistry::default(),
            focused: None,
            timers: TimerQueue::default(),
            mask_painter: MaskPainter::new(),
            size,
        })
    }

    // =========================================================================
    // ACCESSORS
    // =========================================================================

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    pub fn config(&self) -> &UiConfig {
        &self.config
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Resize the viewport. The root follows on the next update.
    pub fn set_size(&mut self, size: Vec2) {
        if self.size == size {
            return;
        }
        self.size = size;
        let root = self.tree.root();
        self.tree.flex_mut(root).set_size(size.x, size.y);
        tracing::debug!(width = size.x, height = size.y, "viewport resized");
    }

    pub fn hovered(&self) -> Option<NodeId> {
        self.mouse.hovered
    }

    pub fn captured(&self) -> Option<NodeId> {
        self.mouse.captured
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    pub fn pressed_buttons(&self) -> MouseButtons {
        self.mouse.buttons
    }

    /// Last pointer position seen, in window space.
    pub fn mouse_position(&self) -> Option<Vec2> {
        self.mouse.position
    }

    // =========================================================================
    // HIT-TESTING
    // =========================================================================

    /// Deepest node under a window-space point.
    pub fn node_at(&self, position: Vec2) -> NodeId {
        self.tree.node_at(position)
    }

    /// The node under `position` that takes mouse input: the hit node or its
    /// nearest enabled ancestor whose behavior accepts the point.
    pub fn mouse_accepting_node_at(&self, position: Vec2) -> Option<NodeId> {
        let hit = self.tree.node_at(position);
        self.tree.ancestors_and_self(hit).find(|&id| {
            let local = self.tree.map_to_local(id, position);
            self.tree.is_enabled(id) && self.tree[id].accepts_mouse(local)
        })
    }

    // =========================================================================
    // FRAME
    // =========================================================================

    /// Settle layout and refresh hover. Returns the number of passes run.
    ///
    /// Each pass solves, pulls geometry and fires the deferred layout events.
    /// Handlers may dirty the layout again, so passes repeat until nothing
    /// moves or [`UiConfig::max_settle_iterations`] is reached.
    pub fn update(&mut self) -> Result<usize> {
        let root = self.tree.root();
        let cap = self.config.max_settle_iterations.max(1);
        let mut iterations = 0;
        let mut settled = false;

        while iterations < cap {
            iterations += 1;
            self.tree.compute_layout(self.size)?;
            let changed = self.tree.update_layout(root, Vec2::ZERO)?;
            self.tree.notify_layout_changes(root);
            if !changed {
                settled = true;
                break;
            }
        }

        if settled {
            tracing::trace!(iterations, "layout settled");
        } else {
            tracing::warn!(iterations, "layout did not settle, giving up for this frame");
        }

        if let Some(position) = self.mouse.position {
            self.process_mouse_move(position, false);
        }
        Ok(iterations)
    }

    /// Settle, then paint the whole tree clipped to the viewport.
    pub fn draw(&mut self, backend: &mut dyn RenderBackend) -> Result<DrawStats> {
        self.update()?;
        let viewport = Rect::from_pos_size(Vec2::ZERO, self.size);
        let stats = draw_hierarchy(
            &self.tree,
            self.tree.root(),
            Vec2::ZERO,
            viewport,
            backend,
            &mut self.mask_painter,
        );
        tracing::trace!(?stats, "frame drawn");
        Ok(stats)
    }
}
