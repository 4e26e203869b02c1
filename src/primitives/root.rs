use crate::engine::{Behavior, Node};
use crate::renderer::Painter;
use crate::types::Vec2;

/// Behavior of the tree root: paints nothing and lets the pointer through.
#[derive(Debug, Default)]
pub struct RootBehavior;

impl Behavior for RootBehavior {
    fn draw(&self, _node: &Node, _painter: &mut dyn Painter) {}

    fn accepts_mouse(&self, _node: &Node, _local: Vec2) -> bool {
        false
    }
}
