//! # Example Records
//!
//! The serialized form of one operation's example. Empty sections are
//! omitted entirely rather than written as empty maps, and field order is
//! fixed, so the YAML a record renders to is stable across runs.

use oax_core::{HttpMethod, OperationKey};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// One synthesized example for one operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleRecord {
    pub service: String,
    pub path: String,
    pub method: HttpMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "ExampleRequest::is_empty")]
    pub request: ExampleRequest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<ExampleResponse>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleRequest {
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub path_params: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub query_params: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub headers: Map<String, Value>,
    /// `Some(Value::Null)` is a declared body whose schema sampled to null.
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub body: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub headers: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub body: Option<Value>,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl ExampleRequest {
    pub fn is_empty(&self) -> bool {
        self.path_params.is_empty()
            && self.query_params.is_empty()
            && self.headers.is_empty()
            && self.body.is_none()
    }
}

impl ExampleRecord {
    pub fn key(&self) -> OperationKey {
        OperationKey::new(self.service.as_str(), self.path.as_str(), self.method)
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    pub fn from_yaml(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}
