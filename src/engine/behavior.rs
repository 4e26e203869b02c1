//! Behavior - per-node override points.
//!
//! Every node holds one boxed behavior. All methods have defaults, so a
//! behavior only implements what it changes.
//!
//! # Example
//!
//! ```ignore
//! struct Counter { clicks: u32 }
//!
//! impl Behavior for Counter {
//!     fn handle_event(&mut self, cx: &mut EventCx<'_>, event: &Event) -> bool {
//!         if let Event::MousePress(_) = event {
//!             self.clicks += 1;
//!         }
//!         default_response(event)
//!     }
//! }
//! ```

use std::any::Any;

use crate::event::{Event, default_response};
use crate::layout::MeasureRequest;
use crate::renderer::Painter;
use crate::types::Vec2;

use super::node::Node;
use super::tree::EventCx;

/// Upcast to `Any` for downcasting boxed behaviors.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub trait Behavior: AsAny {
    /// Handle one event. Returning true consumes it and stops bubbling.
    fn handle_event(&mut self, cx: &mut EventCx<'_>, event: &Event) -> bool {
        let _ = cx;
        default_response(event)
    }

    /// Paint the node's own content in local coordinates.
    fn draw(&self, node: &Node, painter: &mut dyn Painter) {
        node.draw_background(painter);
    }

    /// Paint on top of the children, still inside the node's clip.
    fn draw_after_children(&self, _node: &Node, _painter: &mut dyn Painter) {}

    /// Intrinsic content size, or `None` for nodes without content.
    fn measure(&self, _node: &Node, _request: MeasureRequest) -> Option<Vec2> {
        None
    }

    fn accepts_mouse(&self, _node: &Node, _local: Vec2) -> bool {
        true
    }

    /// Offset added to every child's solved position.
    fn child_arrange_offset(&self) -> Vec2 {
        Vec2::ZERO
    }

    /// Space reserved for scroll bars along the right (x) and bottom (y).
    fn scrollbar_size(&self) -> Vec2 {
        Vec2::ZERO
    }
}

/// Plain container: paints its background and uses every default.
#[derive(Debug, Default)]
pub struct Panel;

impl Behavior for Panel {}
