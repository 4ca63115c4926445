//! # oax-core — Foundational Types for the Example Toolchain
//!
//! Leaf crate of the workspace. Defines the identity of an API operation
//! and the small closed vocabularies every other crate shares.
//!
//! ## Key Design Principles
//!
//! 1. **One operation identity.** `OperationKey` (service, path template,
//!    method) is the join key between the example builder and the catalog
//!    reconciler. Both sides speak it, neither side knows how the other
//!    produced it.
//!
//! 2. **Closed method set.** `HttpMethod` covers exactly the methods the
//!    toolchain recognises in a path item. Anything else in a path item
//!    (`parameters`, `summary`, `x-*` extensions) is not an operation.
//!
//! 3. **Fixed placeholders.** Every literal the synthesizer can emit lives
//!    in [`samples`], so generated examples are byte-identical across runs.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `oax-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod samples;

pub use error::CoreError;
pub use identity::{HttpMethod, OperationKey, ParameterLocation};
