//! # Generate Subcommand
//!
//! Writes one YAML example per declared operation under the generated
//! directory and rewrites the catalog to list exactly those files. Every
//! operation gets its own file; a name already taken in this run gets a
//! numeric suffix.
//!
//! An operation whose structure cannot be read is logged and left out of
//! the catalog; the rest are still written, and the command exits 1.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use oax_catalog::{example_location, unique_location, Catalog, CatalogEntry};
use oax_examples::{build_example, declared_operations};

use crate::Workspace;

/// What a generate run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateSummary {
    pub specs: usize,
    pub written: usize,
    pub failed: usize,
}

/// Execute the generate subcommand.
pub fn run_generate(workspace: &Workspace) -> Result<u8> {
    let summary = generate(workspace)?;
    println!(
        "Generated {} endpoint examples across {} specs.",
        summary.written, summary.specs
    );
    if summary.failed > 0 {
        eprintln!("{} operations could not be built; see the log for details.", summary.failed);
        return Ok(1);
    }
    Ok(0)
}

/// Write every example and the catalog.
pub fn generate(workspace: &Workspace) -> Result<GenerateSummary> {
    let specs = workspace.discover()?;
    let mut summary = GenerateSummary {
        specs: specs.len(),
        ..GenerateSummary::default()
    };
    let mut entries = Vec::new();
    let mut written = BTreeSet::new();

    for spec in &specs {
        let document = workspace.load(spec)?;
        for key in declared_operations(&document, &spec.service) {
            let record = match build_example(&document, &key) {
                Ok(record) => record,
                Err(e) => {
                    tracing::error!(error = %e, "example build failed");
                    summary.failed += 1;
                    continue;
                }
            };

            let location = unique_location(
                example_location(&workspace.config.generated_dir, &key),
                &written,
            );
            written.insert(location.clone());
            let target = workspace.root.join(&location);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            let yaml = record
                .to_yaml()
                .with_context(|| format!("failed to render example for {key}"))?;
            std::fs::write(&target, yaml)
                .with_context(|| format!("failed to write {}", target.display()))?;

            tracing::debug!(operation = %key, example = %location, "wrote example");
            entries.push(CatalogEntry::new(&key, location));
            summary.written += 1;
        }
    }

    let catalog_path = workspace.catalog_path();
    Catalog::from_entries(entries)
        .save(&catalog_path)
        .with_context(|| format!("failed to write catalog {}", catalog_path.display()))?;
    tracing::info!(
        specs = summary.specs,
        written = summary.written,
        failed = summary.failed,
        "generation complete"
    );
    Ok(summary)
}
