//! # Operation Example Builder
//!
//! Builds one [`ExampleRecord`] per operation.
//!
//! ## Parameters
//!
//! Each parameter's schema is sampled, then presentation overrides apply:
//!
//! | Parameter name | Rendered as |
//! |---|---|
//! | `limit`, `page_size` (any case) | the integer page size |
//! | `after`, `before`, `cursor` (any case) | the opaque cursor token |
//! | `id` (exactly) | the canonical UUID |
//!
//! A `null` sample for any other parameter becomes `1` for integer schemas,
//! `true` for boolean schemas and a placeholder string otherwise. Cookie
//! parameters are not rendered.
//!
//! ## Bodies and Responses
//!
//! Content negotiation and response selection are fixed tie-breaks, see
//! [`select_media`] and [`select_status`].

use indexmap::IndexMap;
use oax_core::samples;
use oax_core::{OperationKey, ParameterLocation};
use oax_schema::{sample, OpenApiDocument, SchemaNode, SchemaType};
use serde_json::{Map, Value};

use crate::operation::{ExampleError, MediaType, Operation, Parameter, Response};
use crate::record::{ExampleRecord, ExampleRequest, ExampleResponse};

/// Preferred media type for bodies.
pub const JSON_MEDIA_TYPE: &str = "application/json";

const PAGE_SIZE_PARAMETERS: [&str; 2] = ["limit", "page_size"];
const CURSOR_PARAMETERS: [&str; 3] = ["after", "before", "cursor"];
const ID_PARAMETER: &str = "id";

/// Parse and build the example for `key` in one step.
///
/// # Errors
///
/// Returns [`ExampleError::MalformedOperation`] if the operation's
/// structure cannot be read. See [`Operation::parse`].
pub fn build_example(
    document: &OpenApiDocument,
    key: &OperationKey,
) -> Result<ExampleRecord, ExampleError> {
    let operation = Operation::parse(document, key)?;
    Ok(build(document, &operation))
}

/// Build the example record for an already-parsed operation.
pub fn build(document: &OpenApiDocument, operation: &Operation) -> ExampleRecord {
    let mut request = ExampleRequest::default();
    for parameter in &operation.parameters {
        let value = parameter_sample(parameter, document);
        let name = parameter.name.clone();
        match parameter.location {
            ParameterLocation::Path => request.path_params.insert(name, value),
            ParameterLocation::Query => request.query_params.insert(name, value),
            ParameterLocation::Header => request.headers.insert(name, value),
            ParameterLocation::Cookie => {
                tracing::debug!(operation = %operation.key, parameter = %name, "cookie parameter not rendered");
                None
            }
        };
    }

    if let Some(body) = &operation.request_body {
        if let Some((media_type, media)) = select_media(&body.content) {
            tracing::trace!(operation = %operation.key, media_type, "sampling request body");
            let schema = media.schema.clone().unwrap_or_default();
            request.body = Some(sample(&schema, document));
        }
    }

    let response = select_status(&operation.responses).map(|status| {
        response_example(status, &operation.responses[status], document)
    });

    ExampleRecord {
        service: operation.key.service.clone(),
        path: operation.key.path.clone(),
        method: operation.key.method,
        summary: operation.summary.clone(),
        request,
        response,
    }
}

/// Sample one parameter and apply the presentation overrides.
pub fn parameter_sample(parameter: &Parameter, document: &OpenApiDocument) -> Value {
    let name = parameter.name.as_str();
    if PAGE_SIZE_PARAMETERS.iter().any(|p| p.eq_ignore_ascii_case(name)) {
        return Value::from(samples::PAGE_SIZE);
    }
    if CURSOR_PARAMETERS.iter().any(|p| p.eq_ignore_ascii_case(name)) {
        return Value::from(samples::CURSOR_TOKEN);
    }
    if name == ID_PARAMETER {
        return Value::from(samples::canonical_uuid());
    }

    match sample(&parameter.schema, document) {
        Value::Null => match declared_type(&parameter.schema, document) {
            Some(SchemaType::Integer) => Value::from(1),
            Some(SchemaType::Boolean) => Value::Bool(true),
            _ => Value::from(samples::PARAMETER_PLACEHOLDER),
        },
        value => value,
    }
}

/// The declared type of a schema, looking through one `$ref`.
fn declared_type(schema: &SchemaNode, document: &OpenApiDocument) -> Option<SchemaType> {
    match schema.reference.as_deref() {
        Some(reference) => document.resolve_schema(reference).ok()?.declared_type(),
        None => schema.declared_type(),
    }
}

/// `application/json` if declared, otherwise the first declared media type.
pub fn select_media(content: &IndexMap<String, MediaType>) -> Option<(&str, &MediaType)> {
    content
        .get_key_value(JSON_MEDIA_TYPE)
        .or_else(|| content.first())
        .map(|(media_type, media)| (media_type.as_str(), media))
}

/// The lexicographically first status code starting with `2`; if there is
/// none, the first status in declaration order.
pub fn select_status(responses: &IndexMap<String, Response>) -> Option<&str> {
    responses
        .keys()
        .filter(|status| status.starts_with('2'))
        .min()
        .or_else(|| responses.keys().next())
        .map(String::as_str)
}

fn response_example(status: &str, response: &Response, document: &OpenApiDocument) -> ExampleResponse {
    let headers: Map<String, Value> = response
        .headers
        .iter()
        .map(|(name, schema)| (name.clone(), sample(schema, document)))
        .collect();

    let body = select_media(&response.content)
        .and_then(|(_, media)| media.schema.as_ref())
        .map(|schema| sample(schema, document));

    ExampleResponse {
        status: status.to_string(),
        description: response.description.clone(),
        headers,
        body,
    }
}
