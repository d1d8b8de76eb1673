#![deny(missing_docs)]

//! # Fixup Command
//!
//! Normalizes the managed document after schema inference:
//! 1. Lifts inline response schemas into `components.schemas`.
//! 2. Merges operation ids, summaries, tags and security.
//! 3. Extracts the profile's nested schemas under canonical names.
//! 4. Optionally consolidates remaining inline copies into references.

use crate::discover::discover_endpoints;
use crate::error::CliResult;
use crate::fetch::PageSource;
use crate::profile::Profile;
use crate::spec_file;
use docspec_core::endpoint::ValueMode;
use docspec_core::schema::{Extraction, Insertion};
use std::path::Path;
use tracing::{debug, info};

/// Arguments for the fixup command.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FixupArgs {
    /// Replace inline copies of catalog schemas with references.
    #[clap(long)]
    pub consolidate: bool,
}

/// What a fixup run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixupReport {
    /// Response schemas moved into the catalog.
    pub lifted: usize,
    /// Operations that received metadata.
    pub annotated: usize,
    /// Selectors that produced a catalog entry.
    pub extracted: usize,
    /// Selectors whose root schema or property path was missing.
    pub unresolved: Vec<String>,
    /// Schemas whose name was taken by a different definition.
    pub conflicts: Vec<String>,
    /// Inline copies replaced by references.
    pub consolidated: usize,
}

/// Executes the fixup on the document at `spec_path`.
pub fn execute(
    args: &FixupArgs,
    profile: &Profile,
    docs: &impl PageSource,
    spec_path: &Path,
) -> CliResult<FixupReport> {
    let endpoints = discover_endpoints(profile, docs, ValueMode::Template)?;
    let mut document = spec_file::load_managed(spec_path)?;
    let mut report = FixupReport::default();

    for endpoint in &endpoints {
        for lifted in document.lift_response_schemas(endpoint, &profile.status_names)? {
            if lifted.insertion == Insertion::Conflict {
                report.conflicts.push(lifted.name);
            }
            report.lifted += 1;
        }
    }

    let operations = profile.annotation.build_operation_map(&endpoints);
    report.annotated = document.merge_operation_data(&operations).merged.len();

    document.with_catalog(|catalog| {
        for (selector, name) in &profile.schema_extractions {
            match catalog.extract_schema(selector, name) {
                Extraction::Extracted(insertion) => {
                    if insertion == Insertion::Conflict {
                        report.conflicts.push(name.clone());
                    }
                    report.extracted += 1;
                }
                Extraction::MissingRoot | Extraction::NotFound => {
                    report.unresolved.push(selector.clone());
                }
            }
        }

        if args.consolidate {
            let replaced = catalog.consolidate_references();
            for consolidation in &replaced {
                debug!(
                    schema = %consolidation.schema,
                    path = ?consolidation.path,
                    reference = %consolidation.target,
                    "consolidated reference"
                );
            }
            report.consolidated = replaced.len();
        }
    })?;

    info!(
        lifted = report.lifted,
        annotated = report.annotated,
        extracted = report.extracted,
        unresolved = report.unresolved.len(),
        conflicts = report.conflicts.len(),
        consolidated = report.consolidated,
        "fixup finished"
    );
    spec_file::save(spec_path, &document)?;
    Ok(report)
}
