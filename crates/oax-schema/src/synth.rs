//! # Sample Synthesis
//!
//! Produces one concrete, deterministic example value for a schema node.
//!
//! ## Rule Order
//!
//! Keywords may co-occur, so the first matching rule wins:
//!
//! 1. empty node → `null`
//! 2. `$ref` → follow it, unless already on the current path (cycle → `null`)
//! 3. `example` → copied verbatim
//! 4. `default` → copied verbatim
//! 5. non-empty `enum` → its first member
//! 6. `allOf` → shallow merge of the object-valued branches
//! 7. `oneOf` / `anyOf` → the first alternative only
//! 8. dispatch on the declared or inferred `type`
//!
//! ## Cycle Guard
//!
//! The set of references followed so far travels down the recursion by
//! value. Each branch extends its own copy, so two sibling properties that
//! point at the same schema are both expanded; only a reference that
//! reappears on its own path is cut.

use std::collections::BTreeSet;

use oax_core::samples;
use serde_json::{Map, Value};

use crate::document::OpenApiDocument;
use crate::node::{SchemaNode, SchemaType};

/// Object examples show at most this many declared properties.
pub const MAX_SAMPLED_PROPERTIES: usize = 5;

/// References already followed on the current recursion path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefTrail(BTreeSet<String>);

impl RefTrail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, reference: &str) -> bool {
        self.0.contains(reference)
    }

    /// A copy of this trail extended with `reference`. `self` is unchanged.
    pub fn with(&self, reference: &str) -> Self {
        let mut next = self.clone();
        next.0.insert(reference.to_string());
        next
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Synthesize a value for `node` with a fresh cycle guard.
pub fn sample(node: &SchemaNode, document: &OpenApiDocument) -> Value {
    synthesize(node, document, &RefTrail::new())
}

/// Synthesize a value for `node`, treating every reference in `visiting`
/// as already being expanded further up the current path.
pub fn synthesize(node: &SchemaNode, document: &OpenApiDocument, visiting: &RefTrail) -> Value {
    if node.is_empty() {
        return Value::Null;
    }
    if let Some(reference) = node.reference.as_deref() {
        return follow_reference(reference, document, visiting);
    }
    if let Some(example) = &node.example {
        return example.clone();
    }
    if let Some(default) = &node.default {
        return default.clone();
    }
    if let Some(first) = node.enumeration.first() {
        return first.clone();
    }
    if !node.all_of.is_empty() {
        return merge_all_of(&node.all_of, document, visiting);
    }
    if let Some(first) = node.one_of.first().or_else(|| node.any_of.first()) {
        return synthesize(first, document, visiting);
    }

    match node.effective_type() {
        Some(SchemaType::Object) => object_sample(node, document, visiting),
        Some(SchemaType::Array) => {
            let item = node
                .items
                .as_deref()
                .map_or(Value::Null, |items| synthesize(items, document, visiting));
            Value::Array(vec![item])
        }
        Some(SchemaType::Integer) => node.minimum.clone().map_or(Value::from(1), Value::Number),
        Some(SchemaType::Number) => node.minimum.clone().map_or(Value::from(0.0), Value::Number),
        Some(SchemaType::Boolean) => Value::Bool(true),
        Some(SchemaType::String) => string_sample(node),
        None => Value::Null,
    }
}

fn follow_reference(reference: &str, document: &OpenApiDocument, visiting: &RefTrail) -> Value {
    if visiting.contains(reference) {
        tracing::trace!(reference, depth = visiting.len(), "reference cycle cut");
        return Value::Null;
    }
    match document.resolve_schema(reference) {
        Ok(target) => synthesize(&target, document, &visiting.with(reference)),
        Err(e) => {
            tracing::warn!(reference, error = %e, "unresolvable schema reference sampled as null");
            Value::Null
        }
    }
}

/// `null` only when no branch samples to an object. Object branches that
/// all sample to `{}` merge to `{}`, not `null`.
fn merge_all_of(branches: &[SchemaNode], document: &OpenApiDocument, visiting: &RefTrail) -> Value {
    let mut merged = Map::new();
    let mut saw_object = false;
    for branch in branches {
        if let Value::Object(part) = synthesize(branch, document, visiting) {
            saw_object = true;
            merged.extend(part);
        }
    }
    if saw_object {
        Value::Object(merged)
    } else {
        Value::Null
    }
}

fn object_sample(node: &SchemaNode, document: &OpenApiDocument, visiting: &RefTrail) -> Value {
    let mut sample = Map::new();
    if let Some(properties) = &node.properties {
        for (name, property) in properties.iter().take(MAX_SAMPLED_PROPERTIES) {
            sample.insert(name.clone(), synthesize(property, document, visiting));
        }
    }
    // Required keys always appear, past the cap or without a declared schema.
    for name in &node.required {
        sample.entry(name.clone()).or_insert(Value::Null);
    }
    Value::Object(sample)
}

fn string_sample(node: &SchemaNode) -> Value {
    let text = match node.format.as_deref() {
        Some("uuid") => samples::canonical_uuid(),
        Some("email") => samples::EXAMPLE_EMAIL.to_string(),
        Some("date-time") => samples::EXAMPLE_DATE_TIME.to_string(),
        Some("uri") => samples::EXAMPLE_URI.to_string(),
        Some("duration") => samples::EXAMPLE_DURATION.to_string(),
        _ => node
            .pattern
            .clone()
            .unwrap_or_else(|| samples::PLACEHOLDER_STRING.to_string()),
    };
    Value::String(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn node(value: Value) -> SchemaNode {
        SchemaNode::from_value(&value).unwrap()
    }

    fn empty_doc() -> OpenApiDocument {
        OpenApiDocument::from_value(json!({}))
    }

    fn sample_of(schema: Value) -> Value {
        sample(&node(schema), &empty_doc())
    }

    #[test]
    fn empty_schema_is_null() {
        assert_eq!(sample_of(json!({})), Value::Null);
        assert_eq!(sample_of(json!({"description": "prose only"})), Value::Null);
    }

    #[test]
    fn self_reference_terminates_with_null_child() {
        let doc = OpenApiDocument::from_value(json!({
            "A": {
                "type": "object",
                "properties": {"child": {"$ref": "#/A"}}
            }
        }));
        let value = sample(&node(json!({"$ref": "#/A"})), &doc);
        assert_eq!(value, json!({"child": null}));
    }

    #[test]
    fn mutual_recursion_terminates() {
        let doc = OpenApiDocument::from_value(json!({
            "components": {"schemas": {
                "Folder": {"properties": {"files": {"type": "array", "items": {"$ref": "#/components/schemas/File"}}}},
                "File": {"properties": {"parent": {"$ref": "#/components/schemas/Folder"}}}
            }}
        }));
        let value = sample(&node(json!({"$ref": "#/components/schemas/Folder"})), &doc);
        assert_eq!(value, json!({"files": [{"parent": null}]}));
    }

    #[test]
    fn sibling_branches_do_not_share_cycle_state() {
        let doc = OpenApiDocument::from_value(json!({
            "components": {"schemas": {"Money": {"type": "object", "properties": {"amount": {"type": "integer"}}}}}
        }));
        let schema = node(json!({
            "type": "object",
            "properties": {
                "price": {"$ref": "#/components/schemas/Money"},
                "tax": {"$ref": "#/components/schemas/Money"}
            }
        }));
        assert_eq!(
            sample(&schema, &doc),
            json!({"price": {"amount": 1}, "tax": {"amount": 1}})
        );
    }

    #[test]
    fn all_of_branches_each_expand_shared_reference() {
        let doc = OpenApiDocument::from_value(json!({
            "components": {"schemas": {"Base": {"properties": {"id": {"type": "string", "format": "uuid"}}}}}
        }));
        let schema = node(json!({
            "allOf": [
                {"$ref": "#/components/schemas/Base"},
                {"properties": {"owner": {"$ref": "#/components/schemas/Base"}}}
            ]
        }));
        assert_eq!(
            sample(&schema, &doc),
            json!({
                "id": "123e4567-e89b-12d3-a456-426614174000",
                "owner": {"id": "123e4567-e89b-12d3-a456-426614174000"}
            })
        );
    }

    #[test]
    fn unresolvable_references_degrade_to_null() {
        assert_eq!(sample_of(json!({"$ref": "#/components/schemas/Nope"})), Value::Null);
        assert_eq!(sample_of(json!({"$ref": "other.yaml#/Pet"})), Value::Null);
    }

    #[test]
    fn reference_takes_precedence_over_siblings() {
        let doc = OpenApiDocument::from_value(json!({"S": {"type": "boolean"}}));
        let schema = node(json!({"$ref": "#/S", "example": "ignored", "type": "string"}));
        assert_eq!(sample(&schema, &doc), Value::Bool(true));
    }

    #[test]
    fn example_beats_default_beats_enum() {
        assert_eq!(
            sample_of(json!({"example": {"k": [1, 2]}, "default": "d", "enum": ["e"]})),
            json!({"k": [1, 2]})
        );
        assert_eq!(sample_of(json!({"default": "d", "enum": ["e"]})), json!("d"));
        assert_eq!(sample_of(json!({"enum": ["e", "f"], "type": "string"})), json!("e"));
    }

    #[test]
    fn explicit_null_example_is_returned() {
        assert_eq!(sample_of(json!({"example": null, "type": "integer"})), Value::Null);
    }

    #[test]
    fn empty_enum_falls_through_to_type() {
        assert_eq!(sample_of(json!({"enum": [], "type": "integer"})), json!(1));
    }

    #[test]
    fn all_of_merges_objects() {
        let value = sample_of(json!({
            "allOf": [
                {"type": "object", "properties": {"a": {"type": "integer"}}},
                {"type": "object", "properties": {"b": {"type": "integer"}}}
            ]
        }));
        assert_eq!(value, json!({"a": 1, "b": 1}));
    }

    #[test]
    fn all_of_later_branch_overwrites_and_keeps_position() {
        let value = sample_of(json!({
            "allOf": [
                {"properties": {"a": {"example": "first"}, "b": {"example": "b"}}},
                {"properties": {"a": {"example": "second"}}}
            ]
        }));
        assert_eq!(value, json!({"a": "second", "b": "b"}));
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn all_of_without_objects_is_null() {
        assert_eq!(
            sample_of(json!({"allOf": [{"type": "string"}, {"type": "integer"}]})),
            Value::Null
        );
    }

    #[test]
    fn all_of_with_only_empty_objects_is_empty_object() {
        assert_eq!(
            sample_of(json!({"allOf": [{"type": "object"}, {"type": "object", "properties": {}}]})),
            json!({})
        );
    }

    #[test]
    fn one_of_and_any_of_take_first_alternative() {
        assert_eq!(
            sample_of(json!({"oneOf": [{"type": "boolean"}, {"type": "string"}]})),
            json!(true)
        );
        assert_eq!(
            sample_of(json!({"anyOf": [{"type": "integer", "minimum": 3}, {"type": "string"}]})),
            json!(3)
        );
    }

    #[test]
    fn required_without_properties_yields_null_keys() {
        assert_eq!(
            sample_of(json!({"type": "object", "properties": {}, "required": ["x"]})),
            json!({"x": null})
        );
    }

    #[test]
    fn property_cap_keeps_first_five_plus_required() {
        let value = sample_of(json!({
            "type": "object",
            "properties": {
                "p1": {"type": "integer"}, "p2": {"type": "integer"}, "p3": {"type": "integer"},
                "p4": {"type": "integer"}, "p5": {"type": "integer"}, "p6": {"type": "integer"},
                "p7": {"type": "integer"}, "p8": {"type": "integer"}
            },
            "required": ["p7", "p2"]
        }));
        let object = value.as_object().unwrap();
        let keys: Vec<&str> = object.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["p1", "p2", "p3", "p4", "p5", "p7"]);
        assert_eq!(object["p2"], json!(1));
        assert_eq!(object["p7"], Value::Null);
    }

    #[test]
    fn array_has_exactly_one_item() {
        assert_eq!(
            sample_of(json!({"type": "array", "items": {"type": "string"}, "minItems": 3})),
            json!(["string-value"])
        );
        assert_eq!(sample_of(json!({"type": "array"})), json!([null]));
        assert_eq!(sample_of(json!({"items": {"type": "boolean"}})), json!([true]));
    }

    #[test]
    fn numeric_samples_use_minimum() {
        assert_eq!(sample_of(json!({"type": "integer"})), json!(1));
        assert_eq!(sample_of(json!({"type": "integer", "minimum": 10, "maximum": 20})), json!(10));
        assert_eq!(sample_of(json!({"type": "integer", "maximum": 0})), json!(1));
        assert_eq!(sample_of(json!({"type": "number"})), json!(0.0));
        assert_eq!(sample_of(json!({"type": "number", "minimum": 2.5})), json!(2.5));
    }

    #[test]
    fn string_formats_use_fixed_placeholders() {
        let cases = [
            ("uuid", "123e4567-e89b-12d3-a456-426614174000"),
            ("email", "builder@example.com"),
            ("date-time", "2025-11-06T12:00:00Z"),
            ("uri", "https://api.example.com/resource/123"),
            ("duration", "PT1H"),
        ];
        for (format, expected) in cases {
            assert_eq!(
                sample_of(json!({"type": "string", "format": format})),
                json!(expected),
                "format {format}"
            );
        }
    }

    #[test]
    fn string_falls_back_to_pattern_then_placeholder() {
        assert_eq!(
            sample_of(json!({"type": "string", "format": "hostname", "pattern": "^[a-z]+$"})),
            json!("^[a-z]+$")
        );
        assert_eq!(sample_of(json!({"type": "string"})), json!("string-value"));
    }

    #[test]
    fn boolean_is_true_and_unknown_type_is_null() {
        assert_eq!(sample_of(json!({"type": "boolean"})), json!(true));
        assert_eq!(sample_of(json!({"type": "file"})), Value::Null);
        assert_eq!(sample_of(json!({"format": "uuid"})), Value::Null);
    }

    #[test]
    fn synthesis_does_not_mutate_caller_trail() {
        let doc = OpenApiDocument::from_value(json!({"S": {"type": "integer"}}));
        let trail = RefTrail::new().with("#/Outer");
        let _ = synthesize(&node(json!({"$ref": "#/S"})), &doc, &trail);
        assert_eq!(trail.len(), 1);
        assert!(trail.contains("#/Outer"));
        assert!(!trail.contains("#/S"));
    }

    #[test]
    fn reference_already_on_trail_is_cut() {
        let doc = OpenApiDocument::from_value(json!({"S": {"type": "integer"}}));
        let trail = RefTrail::new().with("#/S");
        assert_eq!(synthesize(&node(json!({"$ref": "#/S"})), &doc, &trail), Value::Null);
    }

    #[test]
    fn samples_validate_against_their_schema() {
        let schemas = [
            json!({"type": "object", "properties": {
                "id": {"type": "integer", "minimum": 5},
                "name": {"type": "string"},
                "tags": {"type": "array", "items": {"type": "string", "enum": ["a", "b"]}},
                "active": {"type": "boolean"}
            }, "required": ["id", "name"]}),
            json!({"type": "array", "items": {"type": "number", "minimum": 1.5}}),
            json!({"oneOf": [{"type": "string", "format": "email"}, {"type": "integer"}]}),
            json!({"allOf": [
                {"type": "object", "properties": {"a": {"type": "integer"}}},
                {"type": "object", "properties": {"b": {"type": "string", "default": "x"}}}
            ]}),
        ];
        for schema in schemas {
            let value = sample_of(schema.clone());
            let validator = jsonschema::validator_for(&schema).unwrap();
            assert!(
                validator.is_valid(&value),
                "sample {value} does not satisfy {schema}"
            );
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        const SELF_REF: &str = "#/components/schemas/Node";

        fn schema_value() -> impl Strategy<Value = Value> {
            let leaf = prop_oneof![
                Just(json!({"type": "string"})),
                Just(json!({"type": "string", "format": "uuid"})),
                Just(json!({"type": "boolean"})),
                (0i64..100).prop_map(|n| json!({"type": "integer", "minimum": n})),
                Just(json!({"$ref": SELF_REF})),
                Just(json!({"$ref": "#/components/schemas/Missing"})),
                Just(json!({})),
            ];
            leaf.prop_recursive(4, 48, 8, |inner| {
                prop_oneof![
                    prop::collection::btree_map("[a-z]{1,6}", inner.clone(), 0..8).prop_map(|props| {
                        let properties: Map<String, Value> = props.into_iter().collect();
                        json!({"type": "object", "properties": properties})
                    }),
                    inner.clone().prop_map(|items| json!({"type": "array", "items": items})),
                    prop::collection::vec(inner.clone(), 1..4).prop_map(|parts| json!({"allOf": parts})),
                    prop::collection::vec(inner, 1..4).prop_map(|parts| json!({"oneOf": parts})),
                ]
            })
        }

        proptest! {
            /// Sampling terminates and is deterministic even when the schema
            /// refers back to itself from arbitrary depths.
            #[test]
            fn sampling_is_deterministic(schema in schema_value()) {
                let doc = OpenApiDocument::from_value(json!({
                    "components": {"schemas": {"Node": schema.clone()}}
                }));
                let root = node(json!({"$ref": SELF_REF}));
                let first = sample(&root, &doc);
                let second = sample(&root, &doc);
                prop_assert_eq!(
                    serde_json::to_vec(&first).unwrap(),
                    serde_json::to_vec(&second).unwrap()
                );
            }

            /// Object samples never carry more than the cap of declared properties.
            #[test]
            fn object_samples_respect_cap(schema in schema_value()) {
                if let Ok(n) = SchemaNode::from_value(&schema) {
                    if let Value::Object(map) = sample(&n, &empty_doc()) {
                        if n.all_of.is_empty() && n.one_of.is_empty() {
                            prop_assert!(map.len() <= MAX_SAMPLED_PROPERTIES);
                        }
                    }
                }
            }
        }
    }
}
