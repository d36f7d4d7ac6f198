//! World-matrix propagation
//!
//! The walk is two-tiered. A cheap pass descends through clean nodes looking
//! for a dirty one; the first dirty node found on a path triggers a forced
//! resweep of its entire subtree, since a parent's new world matrix
//! invalidates every descendant even when their local transforms are
//! unchanged. A dirty subtree therefore always resolves fully in one pass.
//!
//! Each recompute is a pure function of the node's local transform and its
//! parent's cached world matrix. Parents are always written before their
//! children, so the cached parent value is current when read.

use super::graph::{NodeId, SceneGraph};

/// Work performed by one walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Nodes inspected
    pub visited: usize,
    /// World matrices recomputed
    pub recomputed: usize,
}

impl WalkStats {
    fn merge(&mut self, other: WalkStats) {
        self.visited += other.visited;
        self.recomputed += other.recomputed;
    }
}

impl<P> SceneGraph<P> {
    /// Bring the world matrices of `node`'s subtree up to date
    ///
    /// A dirty node is resolved with [`Self::force_update_self_and_children`];
    /// a clean node passes the check on to each child in insertion order,
    /// because a clean parent may still have a child that was mutated directly.
    pub fn update_self_and_children(&mut self, node: NodeId) -> WalkStats {
        let mut stats = WalkStats::default();
        let mut pending = vec![node];

        while let Some(id) = pending.pop() {
            let Some(current) = self.nodes.get(id) else {
                continue;
            };

            if current.transform.is_dirty() {
                stats.merge(self.force_update_self_and_children(id));
            } else {
                stats.visited += 1;
                pending.extend(current.children.iter().rev().copied());
            }
        }

        log::trace!(
            "Scene walk from {:?}: visited {}, recomputed {}",
            node,
            stats.visited,
            stats.recomputed
        );
        stats
    }

    /// Recompute `node` and every descendant regardless of dirty flags
    ///
    /// The node's own matrix is composed with its parent's cached world matrix
    /// (none for a root). Descendants follow top-down.
    pub fn force_update_self_and_children(&mut self, node: NodeId) -> WalkStats {
        let mut stats = WalkStats::default();
        let mut pending = vec![node];

        while let Some(id) = pending.pop() {
            let parent_world = self
                .nodes
                .get(id)
                .and_then(|current| current.parent)
                .and_then(|parent| self.nodes.get(parent))
                .map(|parent| *parent.transform.world_matrix());

            let Some(current) = self.nodes.get_mut(id) else {
                continue;
            };

            current.transform.compute_world_matrix(parent_world.as_ref());
            stats.visited += 1;
            stats.recomputed += 1;
            pending.extend(current.children.iter().rev().copied());
        }

        stats
    }

    /// Update every hierarchy in the graph
    pub fn update_all(&mut self) -> WalkStats {
        let mut stats = WalkStats::default();
        for root in self.roots().to_vec() {
            stats.merge(self.update_self_and_children(root));
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
    use approx::assert_relative_eq;

    fn chain(depth: usize) -> (SceneGraph<usize>, Vec<NodeId>) {
        let mut graph = SceneGraph::new();
        let mut ids = vec![graph.create_root(0)];
        for level in 1..depth {
            let parent = ids[level - 1];
            ids.push(graph.add_child(parent, level).unwrap());
        }
        for (level, id) in ids.iter().enumerate() {
            graph.transform_mut(*id).unwrap().set_position(Vec3::new(1.0, level as f32, 0.0));
        }
        (graph, ids)
    }

    #[test]
    fn test_first_update_computes_everything() {
        let (mut graph, ids) = chain(4);

        let stats = graph.update_self_and_children(ids[0]);

        assert_eq!(stats, WalkStats { visited: 4, recomputed: 4 });
        assert!(ids.iter().all(|id| !graph.transform(*id).unwrap().is_dirty()));
    }

    #[test]
    fn test_clean_update_recomputes_nothing() {
        let (mut graph, ids) = chain(4);
        graph.update_self_and_children(ids[0]);

        let stats = graph.update_self_and_children(ids[0]);

        assert_eq!(stats, WalkStats { visited: 4, recomputed: 0 });
    }

    #[test]
    fn test_dirty_leaf_only_recomputes_leaf() {
        let (mut graph, ids) = chain(4);
        graph.update_self_and_children(ids[0]);

        graph.transform_mut(ids[3]).unwrap().set_scale(Vec3::new(2.0, 2.0, 2.0));
        let stats = graph.update_self_and_children(ids[0]);

        assert_eq!(stats.recomputed, 1);
    }

    #[test]
    fn test_dirty_parent_forces_clean_descendants() {
        let (mut graph, ids) = chain(4);
        graph.update_self_and_children(ids[0]);

        graph.transform_mut(ids[1]).unwrap().set_position(Vec3::new(10.0, 0.0, 0.0));
        let stats = graph.update_self_and_children(ids[0]);

        assert_eq!(stats.recomputed, 3);
        // Positions accumulate down the chain: x = 1 + 10 + 1 + 1
        let leaf = graph.transform(ids[3]).unwrap().world_matrix().translation_part();
        assert_relative_eq!(leaf, Vec3::new(13.0, 0.0 + 2.0 + 3.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_force_update_uses_cached_parent() {
        let (mut graph, ids) = chain(2);
        graph.update_self_and_children(ids[0]);

        // Child only: parent's cached matrix is reused as-is
        let stats = graph.force_update_self_and_children(ids[1]);

        assert_eq!(stats.recomputed, 1);
        let expected = graph.transform(ids[0]).unwrap().world_matrix()
            * graph.transform(ids[1]).unwrap().compute_local_matrix();
        assert_eq!(*graph.transform(ids[1]).unwrap().world_matrix(), expected);
    }

    #[test]
    fn test_update_all_covers_every_root() {
        let mut graph = SceneGraph::new();
        let a = graph.create_root(());
        let b = graph.create_root(());
        graph.transform_mut(b).unwrap().set_position(Vec3::new(0.0, 0.0, -3.0));

        let stats = graph.update_all();

        assert_eq!(stats.recomputed, 2);
        assert_eq!(*graph.transform(a).unwrap().world_matrix(), Mat4::identity());
        assert_relative_eq!(
            graph.transform(b).unwrap().world_matrix().translation_part(),
            Vec3::new(0.0, 0.0, -3.0)
        );
    }

    #[test]
    fn test_update_on_removed_node_is_noop() {
        let (mut graph, ids) = chain(3);
        graph.remove_subtree(ids[1]);

        assert_eq!(graph.update_self_and_children(ids[1]), WalkStats::default());
        assert_eq!(graph.force_update_self_and_children(ids[2]), WalkStats::default());
    }
}
