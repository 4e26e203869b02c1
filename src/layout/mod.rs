//! Layout Module
//!
//! Flexbox layout computation using Taffy.
//!
//! # Architecture
//!
//! Every node owns one solver node. The bridge:
//!
//! 1. Converts [`FlexNode`](crate::engine::FlexNode) properties → Taffy styles
//! 2. Links solver nodes in lockstep with the widget tree
//! 3. Routes measure requests to node behaviors for intrinsic sizing
//! 4. Reports which nodes received fresh layout ("has new layout")
//!
//! # Example
//!
//! ```ignore
//! let mut engine = LayoutEngine::new();
//! let id = engine.create_node(owner, &FlexNode::default())?;
//! engine.compute(id, Vec2::new(800.0, 600.0), |_, _| None)?;
//! let geometry = engine.geometry(id)?;
//! ```

mod taffy_bridge;
mod types;

pub use taffy_bridge::*;
pub use types::*;
