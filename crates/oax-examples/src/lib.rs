//! # oax-examples — Operation Example Records
//!
//! Turns each operation declared in an OpenAPI document into one
//! [`ExampleRecord`]: sample path/query/header parameters, an optional
//! request body, and one chosen response with its headers and body.
//!
//! ## Pipeline
//!
//! 1. [`declared_operations`] enumerates the `(service, path, method)` keys
//!    a document declares. The catalog reconciler consumes the same keys.
//! 2. [`Operation::parse`] reads one operation out of the document,
//!    resolving parameter, request-body, response and header references.
//!    Structure that is the wrong shape (a `parameters` that is not a
//!    sequence, a `responses` that is not a mapping, ...) is a
//!    [`ExampleError::MalformedOperation`] for that operation only.
//! 3. [`build`] samples every schema through `oax_schema::synthesize` and
//!    applies the parameter presentation overrides. It never fails.
//!
//! ## Crate Policy
//!
//! - Never mutates the document.
//! - One operation's failure never prevents building the others.

pub mod builder;
pub mod operation;
pub mod record;

pub use builder::{build, build_example, parameter_sample, select_media, select_status};
pub use operation::{
    declared_operations, ExampleError, MediaType, Operation, Parameter, RequestBody, Response,
};
pub use record::{ExampleRecord, ExampleRequest, ExampleResponse};
