//! # Local Reference Resolution
//!
//! Follows `$ref` strings of the form `#/a/b/c` from a document root.
//! Each slash-separated segment is unescaped per RFC 6901 (`~1` is `/`,
//! `~0` is `~`) and looked up as a mapping key, or as a decimal index when
//! the current node is a sequence.
//!
//! Resolution is pure: it borrows from the root and caches nothing.

use serde_json::Value;
use thiserror::Error;

/// Prefix every supported reference starts with.
pub const LOCAL_REF_PREFIX: &str = "#/";

/// Error following a `$ref`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The reference points outside the current document.
    #[error("unsupported reference '{reference}': only local '#/' references are resolved")]
    UnsupportedReference {
        /// The reference as written.
        reference: String,
    },

    /// A path segment of a local reference does not exist.
    #[error("broken reference '{reference}': segment '{segment}' not found")]
    BrokenReference {
        /// The reference as written.
        reference: String,
        /// The first segment that could not be followed (unescaped).
        segment: String,
    },

    /// The reference resolved, but the target is not a usable schema node.
    #[error("reference '{reference}' does not point at a schema: {reason}")]
    InvalidTarget {
        /// The reference as written.
        reference: String,
        /// Why the target could not be read as a schema.
        reason: String,
    },
}

/// Resolve a local reference against `root`.
///
/// # Errors
///
/// Returns [`ResolveError::UnsupportedReference`] if `reference` does not
/// start with [`LOCAL_REF_PREFIX`], and [`ResolveError::BrokenReference`]
/// naming the first segment that is absent.
pub fn resolve<'a>(root: &'a Value, reference: &str) -> Result<&'a Value, ResolveError> {
    let pointer = reference
        .strip_prefix(LOCAL_REF_PREFIX)
        .ok_or_else(|| ResolveError::UnsupportedReference {
            reference: reference.to_string(),
        })?;

    let mut node = root;
    for raw in pointer.split('/') {
        let segment = unescape(raw);
        let next = match node {
            Value::Object(map) => map.get(&segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        };
        node = next.ok_or_else(|| ResolveError::BrokenReference {
            reference: reference.to_string(),
            segment: segment.clone(),
        })?;
    }
    Ok(node)
}

fn unescape(segment: &str) -> String {
    if segment.contains('~') {
        segment.replace("~1", "/").replace("~0", "~")
    } else {
        segment.to_string()
    }
}
