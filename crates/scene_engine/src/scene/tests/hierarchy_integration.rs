//! End-to-end hierarchy behaviour: propagation, idempotence, root handling

use crate::foundation::math::{Mat4, Mat4Ext, Vec3};
use crate::scene::{NodeId, SceneGraph};
use approx::assert_relative_eq;

/// World matrix rebuilt from scratch by multiplying local matrices root-first
fn fresh_world(graph: &SceneGraph<u32>, id: NodeId) -> Mat4 {
    let mut chain = vec![id];
    let mut cursor = id;
    while let Some(parent) = graph.parent(cursor) {
        chain.push(parent);
        cursor = parent;
    }

    chain
        .iter()
        .rev()
        .map(|node| graph.transform(*node).unwrap().compute_local_matrix())
        .fold(Mat4::identity(), |world, local| world * local)
}

/// Deterministic spread of values in [-range, range]
fn sample(seed: u32, range: f32) -> f32 {
    let hashed = seed.wrapping_mul(2_654_435_761) >> 8;
    (hashed % 2001) as f32 / 1000.0 * range - range
}

/// Three-level tree: root, 3 children, 2 grandchildren each
fn build_tree() -> (SceneGraph<u32>, NodeId) {
    let mut graph = SceneGraph::new();
    let root = graph.create_root(0);
    let mut tag = 1;
    for _ in 0..3 {
        let child = graph.add_child(root, tag).unwrap();
        tag += 1;
        for _ in 0..2 {
            graph.add_child(child, tag).unwrap();
            tag += 1;
        }
    }

    let ids: Vec<_> = graph.depth_first(root).collect();
    for id in ids {
        let seed = *graph.node(id).unwrap().payload();
        let transform = graph.transform_mut(id).unwrap();
        transform.set_position(Vec3::new(
            sample(seed, 5.0),
            sample(seed + 11, 5.0),
            sample(seed + 23, 5.0),
        ));
        transform.set_rotation(Vec3::new(
            sample(seed + 31, 180.0),
            sample(seed + 47, 180.0),
            sample(seed + 59, 180.0),
        ));
        transform.set_scale(Vec3::new(
            1.0 + sample(seed + 61, 0.5),
            1.0,
            1.0 + sample(seed + 73, 0.5),
        ));
    }

    (graph, root)
}

fn assert_matches_fresh(graph: &SceneGraph<u32>, root: NodeId) {
    for id in graph.depth_first(root) {
        let cached = graph.transform(id).unwrap().world_matrix();
        assert_relative_eq!(*cached, fresh_world(graph, id), epsilon = 1e-4);
    }
}

#[test]
fn test_parent_offset_reaches_child() {
    let mut graph = SceneGraph::new();
    let root = graph.create_root("R");
    graph.transform_mut(root).unwrap().set_position(Vec3::zeros());
    let child = graph.add_child(root, "C").unwrap();
    graph.transform_mut(child).unwrap().set_position(Vec3::new(5.0, 0.0, 0.0));

    graph.update_self_and_children(root);

    assert_relative_eq!(
        graph.transform(root).unwrap().world_matrix().translation_part(),
        Vec3::zeros()
    );
    assert_relative_eq!(
        graph.transform(child).unwrap().world_matrix().translation_part(),
        Vec3::new(5.0, 0.0, 0.0)
    );

    graph.transform_mut(root).unwrap().set_position(Vec3::new(1.0, 1.0, 1.0));
    assert!(!graph.transform(child).unwrap().is_dirty());
    graph.update_self_and_children(root);

    assert_relative_eq!(
        graph.transform(root).unwrap().world_matrix().translation_part(),
        Vec3::new(1.0, 1.0, 1.0)
    );
    assert_relative_eq!(
        graph.transform(child).unwrap().world_matrix().translation_part(),
        Vec3::new(6.0, 1.0, 1.0)
    );
    assert_eq!(graph.transform(child).unwrap().position(), Vec3::new(5.0, 0.0, 0.0));
}

#[test]
fn test_clean_update_is_bit_identical() {
    let (mut graph, root) = build_tree();
    graph.update_self_and_children(root);
    let before: Vec<Mat4> = graph
        .depth_first(root)
        .map(|id| *graph.transform(id).unwrap().world_matrix())
        .collect();

    for _ in 0..3 {
        let stats = graph.update_self_and_children(root);
        assert_eq!(stats.recomputed, 0);
    }

    let after: Vec<Mat4> = graph
        .depth_first(root)
        .map(|id| *graph.transform(id).unwrap().world_matrix())
        .collect();
    assert_eq!(before, after);
}

#[test]
fn test_any_mutation_matches_full_recompute() {
    let (mut graph, root) = build_tree();
    graph.update_self_and_children(root);
    assert_matches_fresh(&graph, root);

    let ids: Vec<_> = graph.depth_first(root).collect();
    for (step, id) in ids.iter().enumerate() {
        let seed = 100 + step as u32;
        let transform = graph.transform_mut(*id).unwrap();
        match step % 3 {
            0 => transform.set_position(Vec3::new(sample(seed, 8.0), 0.0, sample(seed + 1, 8.0))),
            1 => transform.set_rotation(Vec3::new(0.0, sample(seed, 90.0), sample(seed + 1, 90.0))),
            _ => transform.set_scale(Vec3::new(1.5, 0.5, 1.0)),
        }

        graph.update_self_and_children(root);
        assert_matches_fresh(&graph, root);
    }
}

#[test]
fn test_sibling_subtrees_are_independent() {
    let (mut graph, root) = build_tree();
    graph.update_self_and_children(root);

    let first = graph.get_child(root, 0).unwrap();
    let second = graph.get_child(root, 1).unwrap();
    let second_leaf = graph.get_child(second, 1).unwrap();
    let untouched = *graph.transform(second_leaf).unwrap().world_matrix();

    graph.transform_mut(first).unwrap().set_position(Vec3::new(100.0, 0.0, 0.0));
    let stats = graph.update_self_and_children(root);

    // The first child plus its two grandchildren
    assert_eq!(stats.recomputed, 3);
    assert_eq!(*graph.transform(second_leaf).unwrap().world_matrix(), untouched);
}

#[test]
fn test_root_world_is_local_for_varied_values() {
    for seed in 0..32 {
        let mut graph = SceneGraph::new();
        let root = graph.create_root(seed);
        let transform = graph.transform_mut(root).unwrap();
        transform.set_position(Vec3::new(
            sample(seed, 50.0),
            sample(seed + 3, 50.0),
            sample(seed + 5, 50.0),
        ));
        transform.set_rotation(Vec3::new(
            sample(seed + 7, 360.0),
            sample(seed + 9, 360.0),
            sample(seed + 13, 360.0),
        ));
        transform.set_scale(Vec3::new(
            sample(seed + 17, 4.0),
            sample(seed + 19, 4.0),
            sample(seed + 29, 4.0),
        ));

        graph.update_self_and_children(root);

        let transform = graph.transform(root).unwrap();
        assert_eq!(*transform.world_matrix(), transform.compute_local_matrix());
    }
}

#[test]
fn test_grandchild_mutation_under_clean_ancestors() {
    let (mut graph, root) = build_tree();
    graph.update_self_and_children(root);

    let middle = graph.get_child(root, 2).unwrap();
    let leaf = graph.get_child(middle, 0).unwrap();
    graph.transform_mut(leaf).unwrap().set_rotation(Vec3::new(0.0, 0.0, 90.0));

    let stats = graph.update_self_and_children(root);

    assert_eq!(stats.recomputed, 1);
    assert_matches_fresh(&graph, root);
}
