//! # oax-schema — Documents, References & Sample Synthesis
//!
//! Loads OpenAPI documents and walks the JSON-Schema-shaped type
//! descriptions inside them to produce illustrative example values.
//!
//! ## Documents (`document`)
//!
//! [`OpenApiDocument`] holds one parsed document as a `serde_json::Value`
//! tree. YAML and JSON sources are both accepted; YAML is converted to the
//! JSON data model with mapping order preserved, because the order in which
//! properties and responses are declared decides which ones an example shows.
//!
//! ## Reference Resolution (`resolve`)
//!
//! [`resolve`] follows a local `#/...` pointer from the document root.
//! Remote and relative-file references are rejected with
//! [`ResolveError::UnsupportedReference`]; the toolchain never fetches
//! anything.
//!
//! ## Sample Synthesis (`synth`)
//!
//! [`synthesize`] turns a [`SchemaNode`] into one concrete value. It never
//! fails: missing or contradictory schema information degrades to `null` or
//! a fixed placeholder. Self-referential schemas terminate through a
//! branch-local [`RefTrail`].
//!
//! ## Crate Policy
//!
//! - Depends only on `oax-core` internally.
//! - Synthesis reads the document and never mutates it.
//! - Output is a pure function of (schema, document): no randomness, no clock.

pub mod document;
pub mod node;
pub mod resolve;
pub mod synth;

pub use document::{DocumentError, OpenApiDocument};
pub use node::{SchemaNode, SchemaType, TypeDecl};
pub use resolve::{resolve, ResolveError, LOCAL_REF_PREFIX};
pub use synth::{sample, synthesize, RefTrail, MAX_SAMPLED_PROPERTIES};
