mod metadata;
mod scan;

pub use metadata::{METADATA_FILE_NAME, parse_metadata, read_metadata};
pub use scan::{find_node_repos, scan_vault};
