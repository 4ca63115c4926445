//! # Error Types
//!
//! Errors raised when parsing the closed vocabularies in [`crate::identity`].

use thiserror::Error;

/// Error parsing a core vocabulary value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The string is not one of the recognised HTTP operation methods.
    #[error("unknown HTTP method '{0}' (expected one of get, post, put, patch, delete)")]
    UnknownMethod(String),

    /// The string is not a recognised parameter location.
    #[error("unknown parameter location '{0}' (expected one of path, query, header, cookie)")]
    UnknownLocation(String),
}
