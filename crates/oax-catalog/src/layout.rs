//! # Repository Layout
//!
//! Where documents are found and where example artifacts are written.
//!
//! Documents live at `<openapi_dir>/<service>/<version>/<file>`; the
//! service name is the directory under `openapi_dir`. Each operation's
//! example is written to `<generated_dir>/<service>/<method>-<slug>.yaml`.

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use oax_core::OperationKey;

use crate::entry::CatalogError;

/// One discovered OpenAPI document.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SpecLocation {
    pub service: String,
    pub path: PathBuf,
}

/// Find `<openapi_dir>/*/<version>/<file>`, sorted by service.
///
/// A missing `openapi_dir` yields no documents.
pub fn discover_specs(
    openapi_dir: &Path,
    version: &str,
    file: &str,
) -> Result<Vec<SpecLocation>, CatalogError> {
    let io = |source| CatalogError::Io {
        path: openapi_dir.to_path_buf(),
        source,
    };
    if !openapi_dir.is_dir() {
        tracing::warn!(dir = %openapi_dir.display(), "openapi directory not found");
        return Ok(Vec::new());
    }

    let mut found = Vec::new();
    for entry in std::fs::read_dir(openapi_dir).map_err(io)? {
        let entry = entry.map_err(io)?;
        let Some(service) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        let path = entry.path().join(version).join(file);
        if path.is_file() {
            found.push(SpecLocation { service, path });
        }
    }
    found.sort();
    tracing::debug!(count = found.len(), "discovered specifications");
    Ok(found)
}

/// File-name-safe form of a path template.
///
/// Surrounding slashes are dropped, inner slashes become `-`, braces are
/// removed, and anything else outside `[A-Za-z0-9-]` becomes `-`. The root
/// path slugs to `root`.
pub fn slugify(path: &str) -> String {
    let slug: String = path
        .trim_matches('/')
        .chars()
        .filter(|c| !matches!(c, '{' | '}'))
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '-' })
        .collect();
    if slug.is_empty() {
        "root".to_string()
    } else {
        slug
    }
}

/// `<method>-<slug>.yaml`, method in lower case.
pub fn example_file_name(key: &OperationKey) -> String {
    format!("{}-{}.yaml", key.method.as_lower(), slugify(&key.path))
}

/// Catalog path of an operation's example under `generated_dir`, with `/`
/// separators regardless of platform.
pub fn example_location(generated_dir: &Path, key: &OperationKey) -> String {
    let relative = generated_dir.join(&key.service).join(example_file_name(key));
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// `location` if no earlier operation claimed it, otherwise the first of
/// `<stem>-2.yaml`, `<stem>-3.yaml`, ... not in `taken`.
///
/// Distinct path templates can slug to the same name (`/items/{id}` and
/// `/items/id`); each operation still gets its own file.
pub fn unique_location(location: String, taken: &BTreeSet<String>) -> String {
    if !taken.contains(&location) {
        return location;
    }
    let (stem, extension) = match location.rsplit_once('.') {
        Some((stem, extension)) if !stem.ends_with('/') => (stem, Some(extension)),
        _ => (location.as_str(), None),
    };
    let free = (2u32..)
        .map(|n| match extension {
            Some(extension) => format!("{stem}-{n}.{extension}"),
            None => format!("{stem}-{n}"),
        })
        .find(|candidate| !taken.contains(candidate));
    free.unwrap_or(location)
}
