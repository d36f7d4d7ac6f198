//! Scene graph
//!
//! Hierarchies of nodes, each with a local [`Transform`] whose world matrix is
//! derived from the parent chain.
//!
//! ```text
//! host mutates transforms (marks dirty)
//!      ↓
//! SceneGraph::update_self_and_children (lazy resweep)
//!      ↓
//! render::submit_frame (world matrix + payload per node)
//! ```

mod graph;
mod transform;
mod walker;

#[cfg(test)]
mod tests;

pub use graph::{DepthFirst, Node, NodeId, SceneGraph};
pub use transform::Transform;
pub use walker::WalkStats;
