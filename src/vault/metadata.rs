use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use crate::engine::NodeMetadata;

/// Per-repository metadata file, JSON.
pub const METADATA_FILE_NAME: &str = ".pl";

pub fn parse_metadata(raw: &str) -> Result<NodeMetadata> {
    if raw.trim().is_empty() {
        return Ok(NodeMetadata::default());
    }
    serde_json::from_str(raw).context("invalid metadata JSON")
}

/// Read a repository's metadata. A missing file yields defaults; a broken
/// one is logged and also yields defaults so the node still shows up.
pub fn read_metadata(repo_path: &Path) -> NodeMetadata {
    let metadata_path = repo_path.join(METADATA_FILE_NAME);

    let raw = match std::fs::read_to_string(&metadata_path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == ErrorKind::NotFound => return NodeMetadata::default(),
        Err(error) => {
            warn!(path = %metadata_path.display(), %error, "failed to read node metadata");
            return NodeMetadata::default();
        }
    };

    parse_metadata(&raw).unwrap_or_else(|error| {
        warn!(path = %metadata_path.display(), error = %format!("{error:#}"), "failed to parse node metadata");
        NodeMetadata::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_file_is_default() {
        assert_eq!(parse_metadata("  \n").unwrap(), NodeMetadata::default());
    }

    #[test]
    fn rejects_non_object_json() {
        assert!(parse_metadata("[1, 2]").is_err());
    }

    #[test]
    fn broken_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(METADATA_FILE_NAME), "{ not json").unwrap();
        assert_eq!(read_metadata(dir.path()), NodeMetadata::default());
    }

    #[test]
    fn reads_type_and_relations() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(METADATA_FILE_NAME),
            r#"{"type": "person", "relatedNodes": ["Garden"]}"#,
        )
        .unwrap();

        let metadata = read_metadata(dir.path());
        assert_eq!(metadata.node_type, "person");
        assert_eq!(metadata.related_nodes, vec!["Garden".to_owned()]);
    }
}
