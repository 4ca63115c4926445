//! # Operation Model
//!
//! Reads operations out of a loaded document into typed form. References
//! to shared parameters, request bodies, responses and headers are
//! resolved here, so the builder works on plain values.
//!
//! An unresolvable reference never fails the operation: it is logged and
//! the referencing piece degrades (a parameter is skipped, a response or
//! request body is treated as declaring nothing, a header samples as
//! `null`). A parameter with no name or an unrecognised location is
//! skipped the same way. Only structure of the wrong shape is an error.

use indexmap::IndexMap;
use oax_core::{HttpMethod, OperationKey, ParameterLocation};
use oax_schema::{OpenApiDocument, SchemaNode};
use serde_json::Value;
use thiserror::Error;

/// Error reading one operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExampleError {
    /// The operation's structure is not the shape an HTTP operation must have.
    #[error("malformed operation {operation}: {reason}")]
    MalformedOperation {
        /// The operation that could not be read.
        operation: OperationKey,
        /// What was the wrong shape.
        reason: String,
    },
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub location: ParameterLocation,
    pub required: bool,
    pub schema: SchemaNode,
}

/// One entry of a `content` mapping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaType {
    pub schema: Option<SchemaNode>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestBody {
    /// Media types in declaration order.
    pub content: IndexMap<String, MediaType>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    pub description: Option<String>,
    /// Header schemas in declaration order.
    pub headers: IndexMap<String, SchemaNode>,
    /// Media types in declaration order.
    pub content: IndexMap<String, MediaType>,
}

/// One HTTP method on one path, with references resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub key: OperationKey,
    pub summary: Option<String>,
    /// Path-item parameters first, then operation parameters; an operation
    /// parameter with the same (location, name) replaces the path-item one
    /// in place.
    pub parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
    /// Status code → response, in declaration order.
    pub responses: IndexMap<String, Response>,
}

/// Keys of every operation the document declares under `paths`, in
/// declaration order. Path items that are not mappings declare nothing;
/// keys that are not recognised methods (`parameters`, `summary`, `x-*`)
/// are not operations.
pub fn declared_operations(document: &OpenApiDocument, service: &str) -> Vec<OperationKey> {
    let Some(paths) = document.paths() else {
        tracing::debug!(service, "document has no paths mapping");
        return Vec::new();
    };

    let mut keys = Vec::new();
    for (path, item) in paths {
        let Some(item) = item.as_object() else {
            tracing::debug!(service, path = %path, "skipping non-mapping path item");
            continue;
        };
        for name in item.keys() {
            if let Ok(method) = name.parse::<HttpMethod>() {
                keys.push(OperationKey::new(service, path.as_str(), method));
            }
        }
    }
    keys
}

impl Operation {
    /// Read the operation named by `key` from `document`.
    ///
    /// # Errors
    ///
    /// Returns [`ExampleError::MalformedOperation`] if the path item or the
    /// operation is missing or not a mapping, if either `parameters` is not
    /// a sequence or holds a non-mapping entry, or if the request body, `responses`, a response, its `headers` or any
    /// `content` is not a mapping.
    pub fn parse(document: &OpenApiDocument, key: &OperationKey) -> Result<Self, ExampleError> {
        let reader = Reader { document, key };

        let item = document
            .paths()
            .and_then(|paths| paths.get(&key.path))
            .ok_or_else(|| reader.malformed("path is not declared under paths"))?
            .as_object()
            .ok_or_else(|| reader.malformed("path item is not a mapping"))?;

        let operation = item
            .iter()
            .find(|(name, _)| name.parse::<HttpMethod>().ok() == Some(key.method))
            .map(|(_, value)| value)
            .ok_or_else(|| reader.malformed("method is not declared on the path item"))?
            .as_object()
            .ok_or_else(|| reader.malformed("operation is not a mapping"))?;

        let mut merged: IndexMap<(ParameterLocation, String), Parameter> = IndexMap::new();
        for (scope, list) in [("path item", item.get("parameters")), ("operation", operation.get("parameters"))] {
            for parameter in reader.parameters(scope, list)? {
                merged.insert((parameter.location, parameter.name.clone()), parameter);
            }
        }

        let request_body = operation
            .get("requestBody")
            .map(|body| reader.request_body(body))
            .transpose()?;

        let responses = match operation.get("responses") {
            None => IndexMap::new(),
            Some(Value::Object(map)) => map
                .iter()
                .map(|(status, response)| Ok((status.clone(), reader.response(status, response)?)))
                .collect::<Result<_, ExampleError>>()?,
            Some(_) => return Err(reader.malformed("responses is not a mapping")),
        };

        Ok(Operation {
            key: key.clone(),
            summary: operation
                .get("summary")
                .and_then(Value::as_str)
                .map(str::to_string),
            parameters: merged.into_values().collect(),
            request_body,
            responses,
        })
    }
}

struct Reader<'a> {
    document: &'a OpenApiDocument,
    key: &'a OperationKey,
}

impl<'a> Reader<'a> {
    fn malformed(&self, reason: impl Into<String>) -> ExampleError {
        ExampleError::MalformedOperation {
            operation: self.key.clone(),
            reason: reason.into(),
        }
    }

    /// Follows `value` if it is a `{$ref: ...}` object. `None` when the
    /// reference cannot be resolved.
    fn deref(&self, value: &'a Value, what: &str) -> Option<&'a Value> {
        match value.get("$ref").and_then(Value::as_str) {
            Some(reference) => match self.document.resolve(reference) {
                Ok(target) => Some(target),
                Err(e) => {
                    tracing::warn!(operation = %self.key, what, error = %e, "unresolvable reference");
                    None
                }
            },
            None => Some(value),
        }
    }

    fn schema(&self, value: Option<&Value>, what: &str) -> SchemaNode {
        let Some(value) = value else {
            return SchemaNode::default();
        };
        SchemaNode::from_value(value).unwrap_or_else(|e| {
            tracing::warn!(operation = %self.key, what, error = %e, "unreadable schema sampled as null");
            SchemaNode::default()
        })
    }

    fn parameters(&self, scope: &str, list: Option<&'a Value>) -> Result<Vec<Parameter>, ExampleError> {
        let entries = match list {
            None => return Ok(Vec::new()),
            Some(Value::Array(entries)) => entries,
            Some(_) => return Err(self.malformed(format!("{scope} parameters is not a sequence"))),
        };

        let mut parameters = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let Some(resolved) = self.deref(entry, "parameter") else {
                continue;
            };
            let fields = resolved.as_object().ok_or_else(|| {
                self.malformed(format!("{scope} parameter #{index} is not a mapping"))
            })?;
            let Some(name) = fields.get("name").and_then(Value::as_str) else {
                tracing::warn!(operation = %self.key, scope, index, "skipping parameter without a name");
                continue;
            };
            let location = match fields.get("in").and_then(Value::as_str) {
                Some(raw) => match raw.parse::<ParameterLocation>() {
                    Ok(location) => location,
                    Err(e) => {
                        tracing::warn!(operation = %self.key, parameter = name, error = %e, "skipping parameter");
                        continue;
                    }
                },
                None => {
                    tracing::warn!(operation = %self.key, parameter = name, "skipping parameter without a location");
                    continue;
                }
            };

            // `content` is the alternative to `schema` for complex parameters.
            let schema_value = match fields.get("schema") {
                Some(schema) => Some(schema),
                None => fields
                    .get("content")
                    .and_then(Value::as_object)
                    .and_then(|content| content.values().next())
                    .and_then(|media| media.get("schema")),
            };

            parameters.push(Parameter {
                name: name.to_string(),
                location,
                required: fields.get("required").and_then(Value::as_bool).unwrap_or(false),
                schema: self.schema(schema_value, name),
            });
        }
        Ok(parameters)
    }

    fn content(&self, what: &str, value: Option<&Value>) -> Result<IndexMap<String, MediaType>, ExampleError> {
        let entries = match value {
            None => return Ok(IndexMap::new()),
            Some(Value::Object(entries)) => entries,
            Some(_) => return Err(self.malformed(format!("{what} content is not a mapping"))),
        };
        entries
            .iter()
            .map(|(media_type, media)| {
                let media = media.as_object().ok_or_else(|| {
                    self.malformed(format!("{what} content '{media_type}' is not a mapping"))
                })?;
                let schema = media
                    .get("schema")
                    .map(|schema| self.schema(Some(schema), media_type));
                Ok((media_type.clone(), MediaType { schema }))
            })
            .collect()
    }

    fn request_body(&self, value: &'a Value) -> Result<RequestBody, ExampleError> {
        let Some(resolved) = self.deref(value, "requestBody") else {
            return Ok(RequestBody::default());
        };
        let fields = resolved
            .as_object()
            .ok_or_else(|| self.malformed("requestBody is not a mapping"))?;
        Ok(RequestBody {
            content: self.content("requestBody", fields.get("content"))?,
        })
    }

    fn response(&self, status: &str, value: &'a Value) -> Result<Response, ExampleError> {
        let Some(resolved) = self.deref(value, "response") else {
            return Ok(Response::default());
        };
        let fields = resolved
            .as_object()
            .ok_or_else(|| self.malformed(format!("response '{status}' is not a mapping")))?;

        let headers = match fields.get("headers") {
            None => IndexMap::new(),
            Some(Value::Object(headers)) => headers
                .iter()
                .map(|(name, header)| (name.clone(), self.header(name, header)))
                .collect(),
            Some(_) => {
                return Err(self.malformed(format!("response '{status}' headers is not a mapping")))
            }
        };

        Ok(Response {
            description: fields
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
            headers,
            content: self.content(&format!("response '{status}'"), fields.get("content"))?,
        })
    }

    /// A header object samples its `schema`; a header without one is read
    /// as a schema itself.
    fn header(&self, name: &str, value: &'a Value) -> SchemaNode {
        match self.deref(value, "header") {
            Some(resolved) if resolved.is_object() => {
                self.schema(Some(resolved.get("schema").unwrap_or(resolved)), name)
            }
            _ => SchemaNode::default(),
        }
    }
}
