//! Focused layout: the clicked node at the origin, cross-type relations on a
//! tight inner ring and everything else on a wide outer ring.

use std::f64::consts::TAU;

use glam::DVec3;

use super::node::Node;

pub const CENTER_SCALE: f64 = 5.0;
pub const RELATED_RADIUS: f64 = 30.0;
pub const RELATED_SCALE: f64 = 1.0;
pub const UNRELATED_RADIUS: f64 = 200.0;
pub const UNRELATED_SCALE: f64 = 0.5;

/// Whether `candidate` belongs on the inner ring around `focus`.
///
/// The candidate must list the focus among its related nodes and be of a
/// different type; same-type nodes never count as related here.
pub fn is_cross_type_related(candidate: &Node, focus: &Node) -> bool {
    candidate.metadata.relates_to(&focus.id)
        && candidate.metadata.node_type != focus.metadata.node_type
}

/// Indices of the related and unrelated nodes around `focus`, in node order.
/// Both are empty when `focus` is out of range.
pub fn partition(nodes: &[Node], focus: usize) -> (Vec<usize>, Vec<usize>) {
    let Some(focus_node) = nodes.get(focus) else {
        return (Vec::new(), Vec::new());
    };
    (0..nodes.len())
        .filter(|&index| index != focus)
        .partition(|&index| is_cross_type_related(&nodes[index], focus_node))
}

/// Evenly spaced point `index` of `count` on a circle in the z = 0 plane.
pub(crate) fn ring_point(index: usize, count: usize, radius: f64) -> DVec3 {
    let angle = (index as f64 / count as f64) * TAU;
    DVec3::new(angle.cos() * radius, angle.sin() * radius, 0.0)
}

fn place_ring(nodes: &mut [Node], members: &[usize], radius: f64, scale: f64) {
    let count = members.len();
    for (slot, &index) in members.iter().enumerate() {
        nodes[index].enter_focus(ring_point(slot, count, radius), scale);
    }
}

/// Lay out `nodes` around the node at `focus`. Returns the partition sizes.
pub fn liminal_layout(nodes: &mut [Node], focus: usize) -> (usize, usize) {
    if focus >= nodes.len() {
        return (0, 0);
    }

    let (related, unrelated) = partition(nodes, focus);
    nodes[focus].enter_focus(DVec3::ZERO, CENTER_SCALE);
    place_ring(nodes, &related, RELATED_RADIUS, RELATED_SCALE);
    place_ring(nodes, &unrelated, UNRELATED_RADIUS, UNRELATED_SCALE);

    (related.len(), unrelated.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::node::NodeMetadata;

    fn node(id: &str, node_type: &str, related: &[&str]) -> Node {
        Node::new(id, NodeMetadata::new(node_type, related))
    }

    fn fixture() -> Vec<Node> {
        vec![
            node("alice", "person", &["idea-a"]),
            node("idea-a", "idea", &["alice", "idea-b"]),
            node("idea-b", "idea", &["idea-a"]),
            node("bob", "person", &["idea-a"]),
            node("carol", "person", &[]),
        ]
    }

    #[test]
    fn cross_type_predicate() {
        let set = fixture();
        // idea-a <- alice: declared and cross-type
        assert!(is_cross_type_related(&set[0], &set[1]));
        // idea-a <- idea-b: declared but same type
        assert!(!is_cross_type_related(&set[2], &set[1]));
        // idea-a <- carol: not declared
        assert!(!is_cross_type_related(&set[4], &set[1]));
    }

    #[test]
    fn focus_sits_at_origin() {
        let mut set = fixture();
        liminal_layout(&mut set, 1);

        assert_eq!(set[1].position, DVec3::ZERO);
        assert_eq!(set[1].liminal_scale_factor, CENTER_SCALE);
        assert!(set.iter().all(|node| node.is_in_liminal_view));
    }

    #[test]
    fn rings_follow_partition() {
        let mut set = fixture();
        let (related, unrelated) = liminal_layout(&mut set, 1);
        assert_eq!((related, unrelated), (2, 2));

        for id in ["alice", "bob"] {
            let node = set.iter().find(|node| node.id == id).unwrap();
            assert!((node.position.length() - RELATED_RADIUS).abs() < 1e-9);
            assert_eq!(node.liminal_scale_factor, RELATED_SCALE);
        }
        for id in ["idea-b", "carol"] {
            let node = set.iter().find(|node| node.id == id).unwrap();
            assert!((node.position.length() - UNRELATED_RADIUS).abs() < 1e-9);
            assert_eq!(node.liminal_scale_factor, UNRELATED_SCALE);
        }
    }

    #[test]
    fn partition_covers_every_other_node_once() {
        let set = fixture();
        for focus in 0..set.len() {
            let (related, unrelated) = partition(&set, focus);
            let mut all: Vec<usize> = related.into_iter().chain(unrelated).collect();
            all.push(focus);
            all.sort_unstable();
            assert_eq!(all, (0..set.len()).collect::<Vec<_>>());
        }
    }

    #[test]
    fn empty_related_ring_is_skipped() {
        let mut set = vec![node("solo", "idea", &[]), node("other", "idea", &[])];
        let (related, unrelated) = liminal_layout(&mut set, 0);
        assert_eq!((related, unrelated), (0, 1));
        assert!(set[1].position.is_finite());
    }

    #[test]
    fn single_node_layout() {
        let mut set = vec![node("solo", "idea", &[])];
        assert_eq!(liminal_layout(&mut set, 0), (0, 0));
        assert_eq!(set[0].position, DVec3::ZERO);
    }

    #[test]
    fn out_of_range_focus_partitions_nothing() {
        let set = fixture();
        assert_eq!(partition(&set, set.len()), (Vec::new(), Vec::new()));
        assert_eq!(partition(&[], 0), (Vec::new(), Vec::new()));
    }
}
