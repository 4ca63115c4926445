//! # Sample Subcommand
//!
//! Prints the synthesized sample for one schema reference:
//!
//! ```bash
//! oax sample openapi/registry/v1/openapi.yaml '#/components/schemas/Record'
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use oax_schema::{sample, OpenApiDocument, SchemaNode};
use serde_json::Value;

use crate::{resolve_path, Workspace};

/// Arguments for the sample subcommand.
#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Document to load, relative to the repository root or the current
    /// directory.
    pub spec: PathBuf,

    /// Local reference to sample, e.g. `#/components/schemas/Record`.
    pub reference: String,

    /// Print on one line instead of pretty-printed.
    #[arg(long)]
    pub compact: bool,
}

/// Execute the sample subcommand.
pub fn run_sample(args: &SampleArgs, workspace: &Workspace) -> Result<u8> {
    let path = resolve_path(&args.spec, &workspace.root);
    let document = OpenApiDocument::load(&path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    let value = sample_reference(&document, &args.reference)?;

    let text = if args.compact {
        serde_json::to_string(&value)?
    } else {
        serde_json::to_string_pretty(&value)?
    };
    println!("{text}");
    Ok(0)
}

/// Sample the schema at `reference`. The reference itself counts as
/// visited, so a schema that refers back to itself is cut on first reentry.
pub fn sample_reference(document: &OpenApiDocument, reference: &str) -> Result<Value> {
    document
        .resolve(reference)
        .with_context(|| format!("cannot sample {reference}"))?;
    let node = SchemaNode {
        reference: Some(reference.to_string()),
        ..SchemaNode::default()
    };
    Ok(sample(&node, document))
}
