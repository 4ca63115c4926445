//! # Schema Nodes
//!
//! Typed read-only view of the JSON-Schema keywords the synthesizer acts
//! on. Every other keyword (`description`, `nullable`, `maxLength`,
//! `minItems`, vendor extensions, ...) is ignored on deserialization.
//!
//! Presence matters for a few keywords: `example: null` and `default: null`
//! are declared values, and `properties: {}` still marks a node as an
//! object. Those fields keep the distinction between "absent" and "present
//! but empty or null".

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// The `type` keyword, either a single name or an OpenAPI 3.1 type list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TypeDecl {
    Single(String),
    Union(Vec<String>),
}

impl TypeDecl {
    /// The first non-`null` type name.
    pub fn primary(&self) -> Option<&str> {
        match self {
            TypeDecl::Single(name) => Some(name.as_str()),
            TypeDecl::Union(names) => names.iter().map(String::as_str).find(|n| *n != "null"),
        }
    }
}

/// Value shapes the synthesizer knows how to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaType {
    Object,
    Array,
    String,
    Integer,
    Number,
    Boolean,
}

impl SchemaType {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "object" => Some(SchemaType::Object),
            "array" => Some(SchemaType::Array),
            "string" => Some(SchemaType::String),
            "integer" => Some(SchemaType::Integer),
            "number" => Some(SchemaType::Number),
            "boolean" => Some(SchemaType::Boolean),
            _ => None,
        }
    }
}

/// A structural description of a value's shape.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchemaNode {
    /// `$ref`; when present every other keyword is deferred to the target.
    #[serde(rename = "$ref", default)]
    pub reference: Option<String>,

    #[serde(rename = "type", default)]
    pub type_decl: Option<TypeDecl>,

    /// Declared properties, in declaration order.
    #[serde(default)]
    pub properties: Option<IndexMap<String, SchemaNode>>,

    #[serde(default)]
    pub required: Vec<String>,

    #[serde(default)]
    pub items: Option<Box<SchemaNode>>,

    #[serde(rename = "enum", default)]
    pub enumeration: Vec<Value>,

    #[serde(default, deserialize_with = "present")]
    pub default: Option<Value>,

    #[serde(default, deserialize_with = "present")]
    pub example: Option<Value>,

    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub pattern: Option<String>,

    #[serde(default)]
    pub minimum: Option<Number>,

    /// Upper bound hint. Not used to pick values.
    #[serde(default)]
    pub maximum: Option<Number>,

    #[serde(default)]
    pub all_of: Vec<SchemaNode>,

    #[serde(default)]
    pub one_of: Vec<SchemaNode>,

    #[serde(default)]
    pub any_of: Vec<SchemaNode>,
}

/// Keeps an explicit `null` as `Some(Value::Null)` instead of folding it into `None`.
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}

impl SchemaNode {
    /// Read a schema node out of a document subtree.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        SchemaNode::deserialize(value)
    }

    /// A node carrying none of the keywords the synthesizer acts on.
    pub fn is_empty(&self) -> bool {
        *self == SchemaNode::default()
    }

    /// The declared type, if it names a known shape.
    pub fn declared_type(&self) -> Option<SchemaType> {
        self.type_decl
            .as_ref()
            .and_then(TypeDecl::primary)
            .and_then(SchemaType::from_name)
    }

    /// The declared type, or `object` / `array` inferred from `properties` /
    /// `items` when no `type` keyword is present at all.
    pub fn effective_type(&self) -> Option<SchemaType> {
        match &self.type_decl {
            Some(_) => self.declared_type(),
            None if self.properties.is_some() => Some(SchemaType::Object),
            None if self.items.is_some() => Some(SchemaType::Array),
            None => None,
        }
    }
}
