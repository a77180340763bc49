//! Workspace configuration
//!
//! Commands read an optional `.bomwerk.yaml` from the working directory for
//! per-workspace defaults. A missing file is simply the default
//! configuration; command-line flags always take precedence.

use std::path::PathBuf;

use serde::Deserialize;

/// Optional workspace defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default product name for `extract`
    pub product: Option<String>,

    /// Default product version for `extract`
    pub version: Option<String>,

    /// Default parts catalog path for `produce`
    pub parts: Option<PathBuf>,

    /// Default numeric tolerance for `diff`
    pub epsilon: Option<f64>,
}

impl Config {
    pub const FILE_NAME: &'static str = ".bomwerk.yaml";

    /// Load the workspace config from the current directory.
    pub fn load() -> Self {
        Self::load_from(Self::FILE_NAME)
    }

    fn load_from(path: &str) -> Self {
        let Ok(content) = std::fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_yml::from_str(&content) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("WARNING: ignoring malformed {path}: {err}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let config = Config::load_from("/nonexistent/.bomwerk.yaml");
        assert!(config.product.is_none());
        assert!(config.epsilon.is_none());
    }

    #[test]
    fn test_parse_defaults() {
        let config: Config =
            serde_yml::from_str("product: filterslang\nversion: 1.0.0\nepsilon: 0.001\n").unwrap();
        assert_eq!(config.product.as_deref(), Some("filterslang"));
        assert_eq!(config.version.as_deref(), Some("1.0.0"));
        assert_eq!(config.epsilon, Some(0.001));
        assert!(config.parts.is_none());
    }
}
