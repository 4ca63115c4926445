//! # Check Subcommand
//!
//! Verifies that every declared operation has exactly one catalog entry
//! pointing at an existing example file, and that the catalog lists
//! nothing else.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use oax_catalog::{reconcile, Catalog, FsArtifactStore, ReconciliationReport};
use oax_core::OperationKey;
use oax_examples::declared_operations;

use crate::Workspace;

/// Execute the check subcommand.
pub fn run_check(workspace: &Workspace) -> Result<u8> {
    let report = check(workspace)?;
    if report.is_clean() {
        println!(
            "Validated {} endpoints with {} mapped examples.",
            report.declared(),
            report.records()
        );
        return Ok(0);
    }
    eprintln!("Example catalog validation failed:\n");
    eprint!("{report}");
    Ok(1)
}

/// Reconcile the catalog against the documents and the example files.
pub fn check(workspace: &Workspace) -> Result<ReconciliationReport> {
    let mut declared = BTreeSet::<OperationKey>::new();
    for spec in workspace.discover()? {
        let document = workspace.load(&spec)?;
        declared.extend(declared_operations(&document, &spec.service));
    }

    let catalog_path = workspace.catalog_path();
    let catalog = Catalog::load(&catalog_path)
        .with_context(|| format!("failed to load catalog {}", catalog_path.display()))?;

    Ok(reconcile(
        &declared,
        &catalog,
        &FsArtifactStore::new(&workspace.root),
    ))
}
