//! Fibonacci-lattice sphere distribution and the rigid rotation that turns a
//! chosen lattice point toward the viewer.
//!
//! Lattice indices are 1-based: the node at position `k` in the node set uses
//! lattice index `k + 1`, so index 0 of the formula is never produced.

use std::f64::consts::{PI, TAU};

use glam::{DQuat, DVec3};

use super::node::Node;

const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;
const PARALLEL_TOLERANCE: f64 = 1e-9;

/// Point `index` (1-based) of a `count`-point lattice on a sphere of `radius`.
pub fn fibonacci_point(index: usize, count: usize, radius: f64) -> DVec3 {
    let i = index as f64;
    let phi = (1.0 - 2.0 * i / (count as f64 + 1.0)).acos();
    let theta = TAU * i / GOLDEN_RATIO;

    DVec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.sin() * theta.sin(),
        radius * phi.cos(),
    )
}

/// Un-rotated lattice positions for `count` nodes, in node order.
pub fn distribute(count: usize, radius: f64) -> Vec<DVec3> {
    (1..=count)
        .map(|index| fibonacci_point(index, count, radius))
        .collect()
}

/// The point directly facing the camera.
pub fn viewer_axis(radius: f64) -> DVec3 {
    DVec3::new(0.0, 0.0, -radius)
}

/// Rotation taking the direction of `from` onto the direction of `to`.
///
/// Parallel inputs give the identity and antiparallel inputs a half turn about
/// an axis orthogonal to `from`; zero-length inputs give the identity.
pub fn rotation_between(from: DVec3, to: DVec3) -> DQuat {
    let (Some(from), Some(to)) = (from.try_normalize(), to.try_normalize()) else {
        return DQuat::IDENTITY;
    };

    let dot = from.dot(to);
    if dot >= 1.0 - PARALLEL_TOLERANCE {
        DQuat::IDENTITY
    } else if dot <= -1.0 + PARALLEL_TOLERANCE {
        DQuat::from_axis_angle(from.any_orthonormal_vector(), PI)
    } else {
        DQuat::from_rotation_arc(from, to)
    }
}

/// Rotation that brings the lattice point of the node at `target` (0-based)
/// onto the viewer axis.
pub fn recenter_rotation(target: usize, count: usize, radius: f64) -> DQuat {
    if target >= count {
        return DQuat::IDENTITY;
    }
    let point = fibonacci_point(target + 1, count, radius);
    rotation_between(point, viewer_axis(radius))
}

/// Rotate every point and push it back onto the sphere surface.
pub fn rotate_onto_sphere(points: &mut [DVec3], rotation: DQuat, radius: f64) {
    for point in points.iter_mut() {
        let rotated = rotation * *point;
        *point = rotated.try_normalize().map_or(rotated, |unit| unit * radius);
    }
}

/// Place every node on the sphere, optionally turning the node at `target`
/// toward the viewer, and reset each node to its sphere-state scale.
pub fn sphere_layout(nodes: &mut [Node], target: Option<usize>, radius: f64) {
    if nodes.is_empty() {
        return;
    }

    let count = nodes.len();
    let mut points = distribute(count, radius);
    let rotation = target.map_or(DQuat::IDENTITY, |target| {
        recenter_rotation(target, count, radius)
    });
    rotate_onto_sphere(&mut points, rotation, radius);

    for (node, point) in nodes.iter_mut().zip(points) {
        node.enter_sphere(point);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::node::NodeMetadata;
    use proptest::prelude::*;

    const R: f64 = 1000.0;

    fn nodes(count: usize) -> Vec<Node> {
        (0..count)
            .map(|index| Node::new(format!("n{index}"), NodeMetadata::default()))
            .collect()
    }

    fn assert_close(a: DVec3, b: DVec3) {
        assert!(a.distance(b) < 1e-6, "{a} != {b}");
    }

    #[test]
    fn first_point_matches_formula() {
        let point = fibonacci_point(1, 1, R);
        // phi = acos(0) = pi/2, so the point lies on the equator
        assert!(point.z.abs() < 1e-9);
        assert!((point.length() - R).abs() < 1e-9);
    }

    #[test]
    fn distribution_is_deterministic() {
        assert_eq!(distribute(12, R), distribute(12, R));
    }

    #[test]
    fn parallel_rotation_is_identity() {
        let axis = viewer_axis(R);
        assert_eq!(rotation_between(axis, axis * 3.0), DQuat::IDENTITY);
    }

    #[test]
    fn identity_rotation_leaves_points_unchanged() {
        let original = distribute(9, R);
        let mut points = original.clone();
        rotate_onto_sphere(&mut points, rotation_between(viewer_axis(R), viewer_axis(R)), R);
        for (a, b) in original.into_iter().zip(points) {
            assert_close(a, b);
        }
    }

    #[test]
    fn antiparallel_rotation_is_well_defined() {
        let from = DVec3::new(0.0, 0.0, R);
        let rotation = rotation_between(from, viewer_axis(R));
        assert!(rotation.is_finite());
        assert_close(rotation * from, viewer_axis(R));
    }

    #[test]
    fn zero_vector_rotation_is_identity() {
        assert_eq!(rotation_between(DVec3::ZERO, viewer_axis(R)), DQuat::IDENTITY);
    }

    #[test]
    fn recentered_target_faces_viewer() {
        let mut set = nodes(7);
        sphere_layout(&mut set, Some(3), R);
        assert_close(set[3].position, viewer_axis(R));
    }

    #[test]
    fn recentering_preserves_pairwise_distances() {
        let mut plain = nodes(10);
        let mut rotated = nodes(10);
        sphere_layout(&mut plain, None, R);
        sphere_layout(&mut rotated, Some(6), R);

        for i in 0..10 {
            for j in 0..10 {
                let before = plain[i].position.distance(plain[j].position);
                let after = rotated[i].position.distance(rotated[j].position);
                assert!((before - after).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn empty_layout_is_noop() {
        let mut set: Vec<Node> = Vec::new();
        sphere_layout(&mut set, Some(0), R);
        assert!(set.is_empty());
    }

    #[test]
    fn out_of_range_target_is_identity() {
        assert_eq!(recenter_rotation(5, 5, R), DQuat::IDENTITY);
    }

    #[test]
    fn sphere_layout_resets_focus_state() {
        let mut set = nodes(3);
        set[1].enter_focus(DVec3::ZERO, 5.0);
        set[1].is_flipped = true;
        sphere_layout(&mut set, None, R);

        assert!(!set[1].is_in_liminal_view);
        assert!(!set[1].is_flipped);
        assert_eq!(set[1].liminal_scale_factor, 1.0);
    }

    proptest! {
        #[test]
        fn points_are_distinct_and_on_surface(count in 1usize..200) {
            let points = distribute(count, R);
            prop_assert_eq!(points.len(), count);
            for (i, a) in points.iter().enumerate() {
                prop_assert!((a.length() - R).abs() < 1e-6);
                for b in &points[i + 1..] {
                    prop_assert!(a.distance(*b) > 1e-6);
                }
            }
        }

        #[test]
        fn any_target_lands_on_viewer_axis(count in 1usize..64, seed in 0usize..64) {
            let target = seed % count;
            let mut set = nodes(count);
            sphere_layout(&mut set, Some(target), R);
            prop_assert!(set[target].position.distance(viewer_axis(R)) < 1e-6);
            for node in &set {
                prop_assert!((node.position.length() - R).abs() < 1e-6);
            }
        }
    }
}
