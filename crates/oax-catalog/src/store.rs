//! # Artifact Storage
//!
//! Where catalog entries point. Reconciliation only needs to know whether
//! an artifact exists; the trait keeps that check injectable so tests can
//! run without touching disk.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Existence check for example artifacts named by catalog-relative paths.
pub trait ArtifactStore {
    fn exists(&self, example: &str) -> bool;
}

/// Artifacts on the local filesystem, relative to a repository root.
#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    root: PathBuf,
}

impl FsArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem location of a catalog-relative artifact path.
    pub fn artifact_path(&self, example: &str) -> PathBuf {
        self.root.join(example)
    }
}

impl ArtifactStore for FsArtifactStore {
    fn exists(&self, example: &str) -> bool {
        self.artifact_path(example).exists()
    }
}

/// A fixed set of present artifacts.
impl ArtifactStore for BTreeSet<String> {
    fn exists(&self, example: &str) -> bool {
        self.contains(example)
    }
}
