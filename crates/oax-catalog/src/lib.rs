//! # oax-catalog — Example Catalog
//!
//! The catalog (`examples-map.json`) lists one example artifact per
//! declared operation. This crate reads and writes it, checks that the
//! artifacts it names exist, and reconciles it against the set of
//! operations the OpenAPI documents declare.
//!
//! ## Reconciliation
//!
//! [`reconcile`] is exhaustive: duplicates, missing or unsupported
//! artifacts, undocumented operations and stale entries are all collected
//! into one [`ReconciliationReport`] so every discrepancy is visible in a
//! single pass.
//!
//! ## Crate Policy
//!
//! - Independent of document parsing: operations arrive as
//!   [`oax_core::OperationKey`] sets.
//! - Reconciliation itself performs no I/O beyond the injected
//!   [`ArtifactStore`].

pub mod entry;
pub mod layout;
pub mod reconcile;
pub mod store;

pub use entry::{Catalog, CatalogEntry, CatalogError, RejectedEntry};
pub use layout::{
    discover_specs, example_file_name, example_location, slugify, unique_location, SpecLocation,
};
pub use reconcile::{reconcile, CatalogProblem, ReconciliationReport, ACCEPTED_EXTENSIONS};
pub use store::{ArtifactStore, FsArtifactStore};
