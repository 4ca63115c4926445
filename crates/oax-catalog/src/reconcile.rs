//! # Catalog Reconciler
//!
//! Compares the catalog against the declared operations and the artifact
//! store, and reports every discrepancy found.
//!
//! Problems are listed in a fixed order: rejected records, then
//! per-entry findings in catalog order (duplicate, then artifact checks),
//! then undocumented operations, then stale entries, the last two sorted
//! by operation key.
//!
//! When a key appears more than once, the first entry is the one compared
//! against the declared set; later ones are only reported.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

use oax_core::OperationKey;

use crate::entry::Catalog;
use crate::store::ArtifactStore;

/// File extensions an example artifact may have.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// One discrepancy between the catalog, the artifacts and the documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogProblem {
    /// A catalog record that does not decode into an entry.
    MalformedEntry { index: usize, reason: String },
    /// A second entry for an operation already in the catalog.
    DuplicateEntry { key: OperationKey, example: String },
    MissingArtifact { key: OperationKey, example: String },
    UnsupportedArtifactFormat { key: OperationKey, example: String },
    /// A declared operation with no catalog entry.
    MissingExample { key: OperationKey },
    /// A catalog entry for an operation no document declares.
    StaleEntry { key: OperationKey },
}

impl fmt::Display for CatalogProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedEntry { index, reason } => {
                write!(f, "catalog entry #{index} is malformed: {reason}")
            }
            Self::DuplicateEntry { key, example } => {
                write!(f, "duplicate catalog entry for {key} ({example})")
            }
            Self::MissingArtifact { example, .. } => write!(f, "example file missing: {example}"),
            Self::UnsupportedArtifactFormat { example, .. } => {
                write!(f, "unsupported example extension for {example}")
            }
            Self::MissingExample { key } => write!(f, "missing example for {key}"),
            Self::StaleEntry { key } => write!(f, "catalog contains stale entry for {key}"),
        }
    }
}

/// Everything [`reconcile`] found. Clean when there are no problems.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationReport {
    problems: Vec<CatalogProblem>,
    declared: usize,
    records: usize,
}

impl ReconciliationReport {
    pub fn is_clean(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn problems(&self) -> &[CatalogProblem] {
        &self.problems
    }

    /// Number of declared operations checked.
    pub fn declared(&self) -> usize {
        self.declared
    }

    /// Number of catalog records checked, including rejected ones.
    pub fn records(&self) -> usize {
        self.records
    }

    /// Declared operations with no catalog entry, sorted.
    pub fn missing(&self) -> impl Iterator<Item = &OperationKey> {
        self.problems.iter().filter_map(|p| match p {
            CatalogProblem::MissingExample { key } => Some(key),
            _ => None,
        })
    }

    /// Catalog keys no document declares, sorted.
    pub fn stale(&self) -> impl Iterator<Item = &OperationKey> {
        self.problems.iter().filter_map(|p| match p {
            CatalogProblem::StaleEntry { key } => Some(key),
            _ => None,
        })
    }
}

/// One ` - problem` line per problem.
impl fmt::Display for ReconciliationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for problem in &self.problems {
            writeln!(f, " - {problem}")?;
        }
        Ok(())
    }
}

/// Reconcile `catalog` against `declared` and the artifacts in `store`.
pub fn reconcile(
    declared: &BTreeSet<OperationKey>,
    catalog: &Catalog,
    store: &dyn ArtifactStore,
) -> ReconciliationReport {
    let mut problems: Vec<CatalogProblem> = catalog
        .rejected
        .iter()
        .map(|rejected| CatalogProblem::MalformedEntry {
            index: rejected.index,
            reason: rejected.reason.clone(),
        })
        .collect();

    let mut targets: BTreeMap<OperationKey, &str> = BTreeMap::new();
    for entry in &catalog.entries {
        let key = entry.key();
        if targets.contains_key(&key) {
            problems.push(CatalogProblem::DuplicateEntry {
                key: key.clone(),
                example: entry.example.clone(),
            });
        } else {
            targets.insert(key.clone(), entry.example.as_str());
        }

        if !store.exists(&entry.example) {
            problems.push(CatalogProblem::MissingArtifact {
                key,
                example: entry.example.clone(),
            });
        } else if !has_accepted_extension(&entry.example) {
            problems.push(CatalogProblem::UnsupportedArtifactFormat {
                key,
                example: entry.example.clone(),
            });
        }
    }

    problems.extend(
        declared
            .iter()
            .filter(|key| !targets.contains_key(*key))
            .map(|key| CatalogProblem::MissingExample { key: key.clone() }),
    );
    problems.extend(
        targets
            .keys()
            .filter(|key| !declared.contains(*key))
            .map(|key| CatalogProblem::StaleEntry { key: key.clone() }),
    );

    tracing::debug!(
        declared = declared.len(),
        records = catalog.len(),
        problems = problems.len(),
        "catalog reconciled"
    );

    ReconciliationReport {
        problems,
        declared: declared.len(),
        records: catalog.len(),
    }
}

fn has_accepted_extension(example: &str) -> bool {
    Path::new(example)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext))
}
