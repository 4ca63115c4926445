//! # Configuration
//!
//! Repository layout settings. Built-in defaults match the conventional
//! layout; a YAML file may override any subset of fields, and `OAX_*`
//! environment variables override both.
//!
//! ```yaml
//! openapi_dir: openapi
//! spec_version: v1
//! spec_file: openapi.yaml
//! generated_dir: examples/generated
//! catalog_file: examples/examples-map.json
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Config file picked up from the repository root when `--config` is not
/// given.
pub const CONFIG_FILE_NAME: &str = "oax.yaml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Repository layout. Relative paths are relative to the repository root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OaxConfig {
    /// Directory holding one sub-directory per service.
    pub openapi_dir: PathBuf,
    /// Version directory under each service.
    pub spec_version: String,
    /// Document file name inside the version directory.
    pub spec_file: String,
    /// Where example artifacts are written.
    pub generated_dir: PathBuf,
    pub catalog_file: PathBuf,
}

impl Default for OaxConfig {
    fn default() -> Self {
        Self {
            openapi_dir: PathBuf::from("openapi"),
            spec_version: "v1".to_string(),
            spec_file: "openapi.yaml".to_string(),
            generated_dir: PathBuf::from("examples/generated"),
            catalog_file: PathBuf::from("examples/examples-map.json"),
        }
    }
}

impl OaxConfig {
    /// Parse YAML config text. Missing fields keep their defaults; an empty
    /// file is the default config.
    pub fn from_yaml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text, path)
    }

    /// Override fields from `OAX_*` variables as returned by `lookup`.
    /// Empty values are ignored.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());
        if let Some(value) = var("OAX_OPENAPI_DIR") {
            self.openapi_dir = PathBuf::from(value);
        }
        if let Some(value) = var("OAX_SPEC_VERSION") {
            self.spec_version = value;
        }
        if let Some(value) = var("OAX_SPEC_FILE") {
            self.spec_file = value;
        }
        if let Some(value) = var("OAX_GENERATED_DIR") {
            self.generated_dir = PathBuf::from(value);
        }
        if let Some(value) = var("OAX_CATALOG_FILE") {
            self.catalog_file = PathBuf::from(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults_match_conventional_layout() {
        let config = OaxConfig::default();
        assert_eq!(config.openapi_dir, PathBuf::from("openapi"));
        assert_eq!(config.spec_version, "v1");
        assert_eq!(config.spec_file, "openapi.yaml");
        assert_eq!(config.generated_dir, PathBuf::from("examples/generated"));
        assert_eq!(config.catalog_file, PathBuf::from("examples/examples-map.json"));
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = OaxConfig::from_yaml_str("spec_version: v2\n", Path::new("oax.yaml")).unwrap();
        assert_eq!(config.spec_version, "v2");
        assert_eq!(config.openapi_dir, PathBuf::from("openapi"));
    }

    #[test]
    fn empty_file_is_default() {
        let config = OaxConfig::from_yaml_str("\n", Path::new("oax.yaml")).unwrap();
        assert_eq!(config, OaxConfig::default());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = OaxConfig::from_yaml_str("spec_dir: specs\n", Path::new("oax.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("oax.yaml"));
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = OaxConfig::from_yaml_str("spec_file: api.yaml\n", Path::new("oax.yaml")).unwrap();
        let env: HashMap<&str, &str> = [
            ("OAX_SPEC_FILE", "openapi.json"),
            ("OAX_CATALOG_FILE", "catalog.json"),
            ("OAX_SPEC_VERSION", ""),
        ]
        .into_iter()
        .collect();
        config.apply_env(|name| env.get(name).map(|v| v.to_string()));
        assert_eq!(config.spec_file, "openapi.json");
        assert_eq!(config.catalog_file, PathBuf::from("catalog.json"));
        assert_eq!(config.spec_version, "v1");
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = OaxConfig::load(&dir.path().join("oax.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
