use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info};

use crate::engine::Node;

use super::metadata::read_metadata;

/// Names of the immediate subdirectories of `vault_path` that are git
/// repositories, sorted.
pub fn find_node_repos(vault_path: &Path) -> Result<Vec<String>> {
    if !vault_path.is_dir() {
        return Err(anyhow!(
            "vault path {} is not a directory",
            vault_path.display()
        ));
    }

    let entries = std::fs::read_dir(vault_path)
        .with_context(|| format!("failed to read vault directory {}", vault_path.display()))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.context("failed to read vault directory entry")?;
        let path = entry.path();
        if !path.is_dir() || !path.join(".git").exists() {
            continue;
        }

        match entry.file_name().into_string() {
            Ok(name) => names.push(name),
            Err(raw) => debug!(name = ?raw, "skipping repository with non UTF-8 name"),
        }
    }

    names.sort();
    Ok(names)
}

/// Load every node in the vault, in id order, with its metadata.
pub fn scan_vault(vault_path: &Path) -> Result<Vec<Node>> {
    let names = find_node_repos(vault_path)?;

    let nodes = names
        .into_iter()
        .map(|name| {
            let repo_path: PathBuf = vault_path.join(&name);
            let metadata = read_metadata(&repo_path);
            Node::new(name, metadata)
        })
        .collect::<Vec<_>>();

    info!(vault = %vault_path.display(), nodes = nodes.len(), "scanned vault");
    Ok(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vault::METADATA_FILE_NAME;

    fn make_repo(root: &Path, name: &str, metadata: Option<&str>) {
        let repo = root.join(name);
        std::fs::create_dir_all(repo.join(".git")).unwrap();
        if let Some(metadata) = metadata {
            std::fs::write(repo.join(METADATA_FILE_NAME), metadata).unwrap();
        }
    }

    #[test]
    fn only_git_directories_become_nodes() {
        let dir = tempfile::tempdir().unwrap();
        make_repo(dir.path(), "Zebra", None);
        make_repo(dir.path(), "Apple", Some(r#"{"type": "idea"}"#));
        std::fs::create_dir(dir.path().join("plain-folder")).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "hi").unwrap();

        let nodes = scan_vault(dir.path()).unwrap();
        let ids = nodes.iter().map(|node| node.id.as_str()).collect::<Vec<_>>();

        assert_eq!(ids, vec!["Apple", "Zebra"]);
        assert_eq!(nodes[0].metadata.node_type, "idea");
        assert_eq!(nodes[1].metadata.node_type, "");
    }

    #[test]
    fn empty_vault_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_vault(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn missing_vault_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_vault(&dir.path().join("nope")).is_err());
    }
}
