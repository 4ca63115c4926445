//! # OpenAPI Documents
//!
//! A loaded document is kept as a plain `serde_json::Value` tree. The
//! toolchain reads only a handful of keys (`paths`, `components`, and the
//! schema keywords), and a generic tree is what `$ref` pointers are written
//! against, so there is no full typed OpenAPI model here.
//!
//! YAML sources are converted to the JSON data model on load. Mapping keys
//! that YAML parses as numbers or booleans (status codes such as `200:` are
//! the common case) become strings.

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use crate::node::SchemaNode;
use crate::resolve::{resolve, ResolveError};

/// Error loading a document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The document file could not be read.
    #[error("cannot read document '{path}': {source}")]
    Io {
        /// Path that failed to read.
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document text could not be parsed.
    #[error("cannot parse document '{path}': {reason}")]
    Parse {
        /// Path (or `<inline>`) of the document.
        path: String,
        /// Parser message.
        reason: String,
    },
}

/// One parsed OpenAPI document.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenApiDocument {
    root: Value,
    source: Option<PathBuf>,
}

impl OpenApiDocument {
    /// Wrap an already-parsed document tree.
    pub fn from_value(root: Value) -> Self {
        Self { root, source: None }
    }

    /// Parse YAML text. JSON is a subset of YAML, so JSON text is accepted too.
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Parse`] if the text is not valid YAML or
    /// contains mapping keys with no JSON rendering.
    pub fn from_yaml_str(text: &str) -> Result<Self, DocumentError> {
        parse_yaml(text, "<inline>").map(Self::from_value)
    }

    /// Load a document from disk, choosing the parser by extension
    /// (`.json` as JSON, anything else as YAML).
    ///
    /// # Errors
    ///
    /// Returns [`DocumentError::Io`] if the file cannot be read and
    /// [`DocumentError::Parse`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, DocumentError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: display.clone(),
            source,
        })?;

        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let root = if is_json {
            serde_json::from_str(&content).map_err(|e| DocumentError::Parse {
                path: display.clone(),
                reason: format!("invalid JSON: {e}"),
            })?
        } else {
            parse_yaml(&content, &display)?
        };

        Ok(Self {
            root,
            source: Some(path.to_path_buf()),
        })
    }

    /// The document root.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// File the document was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// The `paths` mapping, if the document has one.
    pub fn paths(&self) -> Option<&serde_json::Map<String, Value>> {
        self.root.get("paths").and_then(Value::as_object)
    }

    /// Follow a local reference from the document root.
    pub fn resolve(&self, reference: &str) -> Result<&Value, ResolveError> {
        resolve(&self.root, reference)
    }

    /// Follow a local reference and read the target as a schema node.
    ///
    /// # Errors
    ///
    /// Propagates resolution errors; returns [`ResolveError::InvalidTarget`]
    /// if the target's shape cannot be read as a schema.
    pub fn resolve_schema(&self, reference: &str) -> Result<SchemaNode, ResolveError> {
        let target = self.resolve(reference)?;
        SchemaNode::from_value(target).map_err(|e| ResolveError::InvalidTarget {
            reference: reference.to_string(),
            reason: e.to_string(),
        })
    }
}

fn parse_yaml(text: &str, path: &str) -> Result<Value, DocumentError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(text).map_err(|e| DocumentError::Parse {
        path: path.to_string(),
        reason: format!("invalid YAML: {e}"),
    })?;
    yaml_to_json_value(&yaml).map_err(|reason| DocumentError::Parse {
        path: path.to_string(),
        reason,
    })
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`, preserving
/// mapping order and dropping YAML tags.
pub(crate) fn yaml_to_json_value(yaml: &serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::from(i))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::from(u))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n:?}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s.clone())),
        serde_yaml::Value::Sequence(seq) => seq
            .iter()
            .map(yaml_to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut json_map = serde_json::Map::with_capacity(map.len());
            for (k, v) in map {
                let key = match k {
                    serde_yaml::Value::String(s) => s.clone(),
                    serde_yaml::Value::Number(n) => n.to_string(),
                    serde_yaml::Value::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key: {other:?}")),
                };
                json_map.insert(key, yaml_to_json_value(v)?);
            }
            Ok(Value::Object(json_map))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(&tagged.value),
    }
}
