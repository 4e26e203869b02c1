//! Engine - the widget tree.
//!
//! The engine owns every node and keeps three things in lockstep:
//! - Structure: parent and child links, insertion order = paint order
//! - Layout: one solver node per widget node, flushed from its [`FlexNode`]
//! - Dispatch: events delivered to the node's [`Behavior`]
//!
//! # Architecture
//!
//! Nodes live in a slot map keyed by [`NodeId`]. Parents are looked up by
//! id, never by pointer, so a subtree can be walked and mutated without
//! aliasing:
//!
//! ```text
//! root (RootBehavior)
//! ├── panel (Panel)          paint order 0
//! │   └── label (Label)
//! └── area (ScrollArea)      paint order 1
//!     └── list (Panel)       arranged at -scroll
//! ```

mod behavior;
mod flex_node;
mod node;
mod tree;

pub use behavior::*;
pub use flex_node::*;
pub use node::*;
pub use tree::*;
