//! # Catalog Persistence
//!
//! The catalog file is a JSON list of `{service, path, method, example}`
//! records. A file that is not a list cannot be checked at all and is an
//! error; an individual record that does not decode is kept aside as a
//! [`RejectedEntry`] so reconciliation can report it alongside everything
//! else.

use std::path::{Path, PathBuf};

use oax_core::{HttpMethod, OperationKey};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Errors reading or writing a catalog file.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to access catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not JSON, or not a JSON list.
    #[error("invalid catalog {path}: {reason}")]
    InvalidFormat { path: PathBuf, reason: String },

    #[error("catalog serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// One catalog record: the example artifact for one operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub service: String,
    pub path: String,
    pub method: HttpMethod,
    /// Artifact location relative to the repository root, `/`-separated.
    pub example: String,
}

impl CatalogEntry {
    pub fn new(key: &OperationKey, example: impl Into<String>) -> Self {
        Self {
            service: key.service.clone(),
            path: key.path.clone(),
            method: key.method,
            example: example.into(),
        }
    }

    pub fn key(&self) -> OperationKey {
        OperationKey::new(self.service.as_str(), self.path.as_str(), self.method)
    }
}

/// A catalog record that could not be decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedEntry {
    /// Position in the catalog list.
    pub index: usize,
    pub record: Value,
    pub reason: String,
}

/// A parsed catalog, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub entries: Vec<CatalogEntry>,
    pub rejected: Vec<RejectedEntry>,
}

impl Catalog {
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        Self {
            entries,
            rejected: Vec::new(),
        }
    }

    /// Parse catalog text. `origin` names the source in errors.
    ///
    /// # Errors
    ///
    /// [`CatalogError::InvalidFormat`] if the text is not JSON or its top
    /// level is not a list.
    pub fn parse(text: &str, origin: &Path) -> Result<Self, CatalogError> {
        let invalid = |reason: String| CatalogError::InvalidFormat {
            path: origin.to_path_buf(),
            reason,
        };

        let value: Value = serde_json::from_str(text).map_err(|e| invalid(e.to_string()))?;
        let Value::Array(records) = value else {
            return Err(invalid("catalog must contain a list".to_string()));
        };

        let mut catalog = Catalog::default();
        for (index, record) in records.into_iter().enumerate() {
            match CatalogEntry::deserialize(&record) {
                Ok(entry) => catalog.entries.push(entry),
                Err(e) => {
                    tracing::debug!(index, error = %e, "rejected catalog record");
                    catalog.rejected.push(RejectedEntry {
                        index,
                        record,
                        reason: e.to_string(),
                    });
                }
            }
        }
        Ok(catalog)
    }

    /// Read and parse the catalog at `path`.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, path)
    }

    /// The entries as a pretty-printed JSON list with a trailing newline.
    /// Rejected records are not written back.
    pub fn to_json_pretty(&self) -> Result<String, CatalogError> {
        let mut text = serde_json::to_string_pretty(&self.entries)?;
        text.push('\n');
        Ok(text)
    }

    /// Write the catalog to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), CatalogError> {
        let text = self.to_json_pretty()?;
        let io = |source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io)?;
        }
        std::fs::write(path, text).map_err(io)
    }

    pub fn len(&self) -> usize {
        self.entries.len() + self.rejected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
