//! # oax-cli — OpenAPI Example Tooling
//!
//! Provides the `oax` command-line interface.
//!
//! ## Subcommands
//!
//! - `oax generate` — write one example per declared operation and rewrite
//!   the catalog.
//! - `oax check` — reconcile the catalog against the documents and the
//!   example files; exits non-zero listing every problem.
//! - `oax sample <spec> <ref>` — print the sample for one schema.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers take parsed arguments
//!   and a resolved [`Workspace`].
//! - Handlers return the process exit code; errors are reserved for
//!   conditions that stop the command outright.

pub mod check;
pub mod config;
pub mod generate;
pub mod sample;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use oax_catalog::SpecLocation;
use oax_schema::OpenApiDocument;

pub use config::{ConfigError, OaxConfig, CONFIG_FILE_NAME};

/// A repository root and the layout configured for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub root: PathBuf,
    pub config: OaxConfig,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>, config: OaxConfig) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    /// Locate the repository and load its configuration.
    ///
    /// The root is `root` if given, else the nearest ancestor of `cwd`
    /// containing the configured `openapi_dir`, else `cwd`. Configuration
    /// is the defaults, overlaid by `config` (or `oax.yaml` at the root when
    /// present), overlaid by the variables `env` returns.
    pub fn open(
        root: Option<&Path>,
        config: Option<&Path>,
        cwd: &Path,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut settings = match config {
            Some(path) => OaxConfig::load(&cwd.join(path))?,
            None => OaxConfig::default(),
        };
        settings.apply_env(&env);

        let root = match root {
            Some(root) => cwd.join(root),
            None => find_root(cwd, &settings.openapi_dir).unwrap_or_else(|| {
                tracing::warn!("could not locate repository root; using current directory");
                cwd.to_path_buf()
            }),
        };

        if config.is_none() {
            let default_file = root.join(CONFIG_FILE_NAME);
            if default_file.is_file() {
                tracing::debug!(path = %default_file.display(), "loading repository config");
                settings = OaxConfig::load(&default_file)?;
                settings.apply_env(&env);
            }
        }

        tracing::debug!(root = %root.display(), "resolved repository root");
        Ok(Self::new(root, settings))
    }

    pub fn openapi_dir(&self) -> PathBuf {
        self.root.join(&self.config.openapi_dir)
    }

    pub fn catalog_path(&self) -> PathBuf {
        self.root.join(&self.config.catalog_file)
    }

    /// Every document under the OpenAPI directory, sorted by service.
    pub fn discover(&self) -> Result<Vec<SpecLocation>> {
        oax_catalog::discover_specs(
            &self.openapi_dir(),
            &self.config.spec_version,
            &self.config.spec_file,
        )
        .context("failed to discover specifications")
    }

    /// Load one discovered document.
    pub fn load(&self, spec: &SpecLocation) -> Result<OpenApiDocument> {
        OpenApiDocument::load(&spec.path)
            .with_context(|| format!("failed to load specification for service '{}'", spec.service))
    }
}

/// Nearest ancestor of `start` (inclusive) containing `marker` as a
/// directory.
pub fn find_root(start: &Path, marker: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(marker).is_dir())
        .map(Path::to_path_buf)
}

/// Resolve a path that may be relative to the repository root.
///
/// Absolute paths are returned as-is. A relative path that exists under
/// `repo_root` resolves there; otherwise it is left relative to the
/// current directory.
pub fn resolve_path(path: &Path, repo_root: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let repo_relative = repo_root.join(path);
    if repo_relative.exists() {
        repo_relative
    } else {
        path.to_path_buf()
    }
}
