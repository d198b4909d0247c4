//! Per-frame view scale for nodes on the sphere.
//!
//! Nodes near the middle of the viewport are drawn larger; the falloff is
//! twice as steep as the raw distance from the center.

use std::collections::HashMap;

use glam::{DMat4, DVec3};

use super::node::{Node, NodeId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleRange {
    pub min: f64,
    pub max: f64,
    /// Smallest change worth committing.
    pub epsilon: f64,
}

impl Default for ScaleRange {
    fn default() -> Self {
        Self {
            min: 1.0,
            max: 50.0,
            epsilon: 0.01,
        }
    }
}

/// Camera transform as seen by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub view_projection: DMat4,
}

impl Camera {
    pub fn new(view_projection: DMat4) -> Self {
        Self { view_projection }
    }

    /// Normalized device coordinates of `point` after the perspective divide.
    pub fn project(&self, point: DVec3) -> DVec3 {
        self.view_projection.project_point3(point)
    }
}

/// Viewport size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Pixel position of a point in normalized device coordinates.
    pub fn to_pixels(&self, ndc: DVec3) -> (f64, f64) {
        (
            (ndc.x * 0.5 + 0.5) * self.width,
            (ndc.y * -0.5 + 0.5) * self.height,
        )
    }
}

/// Scale for a node on the sphere given the current camera.
pub fn view_scale_factor(node: &Node, camera: &Camera, viewport: &Viewport, range: &ScaleRange) -> f64 {
    let (screen_x, screen_y) = viewport.to_pixels(camera.project(node.position));
    let (center_x, center_y) = viewport.center();

    let distance = ((screen_x - center_x).powi(2) + (screen_y - center_y).powi(2)).sqrt();
    let max_distance = (center_x.powi(2) + center_y.powi(2)).sqrt();
    let normalized = if max_distance > 0.0 {
        distance / max_distance
    } else {
        0.0
    };

    let focused = (normalized * 2.0).min(1.0);
    let scale = range.max * (1.0 - focused);

    let base = if node.base_scale > 0.0 { node.base_scale } else { 1.0 };
    scale.clamp(range.min / base, range.max / base)
}

/// New view scales for every sphere-state node whose scale moved by more than
/// the range's epsilon. Nodes in a focused view are left out.
pub fn tick(
    nodes: &[Node],
    camera: &Camera,
    viewport: &Viewport,
    range: &ScaleRange,
) -> HashMap<NodeId, f64> {
    nodes
        .iter()
        .filter(|node| !node.is_in_liminal_view)
        .filter_map(|node| {
            let next = view_scale_factor(node, camera, viewport, range);
            ((next - node.view_scale_factor).abs() > range.epsilon).then(|| (node.id.clone(), next))
        })
        .collect()
}

/// Write `updates` into `view_scale_factor`. Returns the number of nodes
/// changed; focused nodes are never touched.
pub fn commit(nodes: &mut [Node], updates: &HashMap<NodeId, f64>) -> usize {
    let mut changed = 0;
    for node in nodes.iter_mut().filter(|node| !node.is_in_liminal_view) {
        if let Some(&scale) = updates.get(&node.id) {
            node.view_scale_factor = scale;
            changed += 1;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::node::NodeMetadata;

    fn camera() -> Camera {
        // Camera at z = 100 looking down -z, 90 degree vertical field of view.
        let view = DMat4::look_at_rh(DVec3::new(0.0, 0.0, 100.0), DVec3::ZERO, DVec3::Y);
        let projection = DMat4::perspective_rh(std::f64::consts::FRAC_PI_2, 1.0, 0.1, 3000.0);
        Camera::new(projection * view)
    }

    fn node_at(id: &str, position: DVec3) -> Node {
        let mut node = Node::new(id, NodeMetadata::default());
        node.position = position;
        node
    }

    #[test]
    fn center_of_view_gets_max_scale() {
        let node = node_at("a", DVec3::new(0.0, 0.0, -500.0));
        let scale = view_scale_factor(&node, &camera(), &Viewport::new(800.0, 800.0), &ScaleRange::default());
        assert!((scale - 50.0).abs() < 1e-6);
    }

    #[test]
    fn halfway_to_corner_gets_min_scale() {
        // At depth 100 from the camera a 90 degree view spans +-100 units, so
        // (50, 50) lands exactly halfway to the corner.
        let node = node_at("a", DVec3::new(50.0, 50.0, 0.0));
        let scale = view_scale_factor(&node, &camera(), &Viewport::new(800.0, 800.0), &ScaleRange::default());
        assert!((scale - 1.0).abs() < 1e-6);
    }

    #[test]
    fn quarter_way_gets_half_scale() {
        let node = node_at("a", DVec3::new(25.0, 25.0, 0.0));
        let scale = view_scale_factor(&node, &camera(), &Viewport::new(800.0, 800.0), &ScaleRange::default());
        assert!((scale - 25.0).abs() < 1e-6);
    }

    #[test]
    fn base_scale_narrows_the_range() {
        let mut node = node_at("a", DVec3::new(0.0, 0.0, -500.0));
        node.base_scale = 2.0;
        let scale = view_scale_factor(&node, &camera(), &Viewport::new(800.0, 800.0), &ScaleRange::default());
        assert!((scale - 25.0).abs() < 1e-6);
    }

    #[test]
    fn tick_skips_focused_and_unchanged_nodes() {
        let mut centered = node_at("centered", DVec3::new(0.0, 0.0, -500.0));
        centered.view_scale_factor = 49.995;
        let mut focused = node_at("focused", DVec3::new(0.0, 0.0, -500.0));
        focused.is_in_liminal_view = true;
        let moved = node_at("moved", DVec3::new(25.0, 25.0, 0.0));

        let updates = tick(
            &[centered, focused, moved],
            &camera(),
            &Viewport::new(800.0, 800.0),
            &ScaleRange::default(),
        );

        assert_eq!(updates.len(), 1);
        assert!((updates["moved"] - 25.0).abs() < 1e-6);
    }

    #[test]
    fn commit_only_touches_sphere_nodes() {
        let mut nodes = vec![node_at("a", DVec3::ZERO), node_at("b", DVec3::ZERO)];
        nodes[1].is_in_liminal_view = true;
        let updates = HashMap::from([("a".to_owned(), 7.0), ("b".to_owned(), 9.0)]);

        assert_eq!(commit(&mut nodes, &updates), 1);
        assert_eq!(nodes[0].view_scale_factor, 7.0);
        assert_eq!(nodes[1].view_scale_factor, 1.0);
    }
}
