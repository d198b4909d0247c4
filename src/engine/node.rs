use glam::DVec3;
use serde::Deserialize;
use serde_json::{Map, Value};

pub type NodeId = String;

/// Metadata record read from a node's `.pl` file.
///
/// Only `type` and `relatedNodes` drive layout; every other key is kept so the
/// details panel can show it.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct NodeMetadata {
    #[serde(default, rename = "type")]
    pub node_type: String,
    #[serde(default, rename = "relatedNodes")]
    pub related_nodes: Vec<NodeId>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NodeMetadata {
    pub fn new(node_type: impl Into<String>, related_nodes: &[&str]) -> Self {
        Self {
            node_type: node_type.into(),
            related_nodes: related_nodes.iter().map(|id| (*id).to_owned()).collect(),
            extra: Map::new(),
        }
    }

    pub fn relates_to(&self, id: &str) -> bool {
        self.related_nodes.iter().any(|related| related == id)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub position: DVec3,
    pub base_scale: f64,
    pub view_scale_factor: f64,
    pub liminal_scale_factor: f64,
    pub is_in_liminal_view: bool,
    pub is_flipped: bool,
    pub metadata: NodeMetadata,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, metadata: NodeMetadata) -> Self {
        Self {
            id: id.into(),
            position: DVec3::ZERO,
            base_scale: 1.0,
            view_scale_factor: 1.0,
            liminal_scale_factor: 1.0,
            is_in_liminal_view: false,
            is_flipped: false,
            metadata,
        }
    }

    /// Scale the renderer should draw this node at.
    pub fn render_scale(&self) -> f64 {
        let factor = if self.is_in_liminal_view {
            self.liminal_scale_factor
        } else {
            self.view_scale_factor
        };
        self.base_scale * factor
    }

    pub(crate) fn enter_sphere(&mut self, position: DVec3) {
        self.position = position;
        self.view_scale_factor = 1.0;
        self.liminal_scale_factor = 1.0;
        self.is_in_liminal_view = false;
        self.is_flipped = false;
    }

    pub(crate) fn enter_focus(&mut self, position: DVec3, scale: f64) {
        self.position = position;
        self.view_scale_factor = scale;
        self.liminal_scale_factor = scale;
        self.is_in_liminal_view = true;
        self.is_flipped = false;
    }
}

/// Committed `{id, position, scale}` triple handed to the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    pub id: NodeId,
    pub position: DVec3,
    pub scale: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_keeps_unknown_keys() {
        let raw = r#"{
            "type": "idea",
            "relatedNodes": ["Alice", "Bob"],
            "interactions": ["call"]
        }"#;
        let metadata: NodeMetadata = serde_json::from_str(raw).unwrap();

        assert_eq!(metadata.node_type, "idea");
        assert!(metadata.relates_to("Bob"));
        assert!(!metadata.relates_to("Carol"));
        assert!(metadata.extra.contains_key("interactions"));
    }

    #[test]
    fn metadata_fields_default_when_missing() {
        let metadata: NodeMetadata = serde_json::from_str("{}").unwrap();
        assert_eq!(metadata, NodeMetadata::default());
    }

    #[test]
    fn render_scale_follows_view_flag() {
        let mut node = Node::new("a", NodeMetadata::default());
        node.base_scale = 2.0;
        node.view_scale_factor = 3.0;
        node.liminal_scale_factor = 5.0;
        assert_eq!(node.render_scale(), 6.0);

        node.is_in_liminal_view = true;
        assert_eq!(node.render_scale(), 10.0);
    }
}
