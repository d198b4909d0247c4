use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::engine::{LayoutSettings, ScaleRange};

pub const CONFIG_FILE_NAME: &str = ".dreamspace.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub layout: LayoutSettings,
    pub search: SearchSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSettings {
    /// Cap on how many matches enter the honeycomb; `None` keeps all.
    pub max_results: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    layout: Option<RawLayout>,
    scale: Option<RawScale>,
    search: Option<RawSearch>,
}

#[derive(Debug, Deserialize)]
struct RawLayout {
    sphere_radius: Option<f64>,
    hex_cell_size: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawScale {
    min: Option<f64>,
    max: Option<f64>,
    epsilon: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawSearch {
    max_results: Option<usize>,
}

impl Config {
    /// Load `.dreamspace.toml` from the vault root, or defaults if absent.
    pub fn load(vault_path: &Path) -> Result<Self, ConfigError> {
        let config_path = vault_path.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        Self::from_file(&config_path)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;
        let defaults = LayoutSettings::default();

        let (sphere_radius, hex_cell_size) = match raw.layout {
            Some(layout) => (
                layout.sphere_radius.unwrap_or(defaults.sphere_radius),
                layout.hex_cell_size.unwrap_or(defaults.hex_cell_size),
            ),
            None => (defaults.sphere_radius, defaults.hex_cell_size),
        };

        let scale = match raw.scale {
            Some(s) => ScaleRange {
                min: s.min.unwrap_or(defaults.scale.min),
                max: s.max.unwrap_or(defaults.scale.max),
                epsilon: s.epsilon.unwrap_or(defaults.scale.epsilon),
            },
            None => defaults.scale,
        };

        let search = SearchSettings {
            max_results: raw.search.and_then(|s| s.max_results),
        };

        Ok(Self {
            layout: LayoutSettings {
                sphere_radius,
                hex_cell_size,
                scale,
            },
            search,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::parse(
            r#"
            [layout]
            sphere_radius = 400.0

            [scale]
            max = 20.0

            [search]
            max_results = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.layout.sphere_radius, 400.0);
        assert_eq!(config.layout.hex_cell_size, 12.0);
        assert_eq!(config.layout.scale.max, 20.0);
        assert_eq!(config.layout.scale.min, 1.0);
        assert_eq!(config.search.max_results, Some(7));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        assert!(matches!(
            Config::parse("[layout\nsphere_radius = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());
    }
}
