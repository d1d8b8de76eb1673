//! # Merge Command
//!
//! Copies the hand-maintained sections of the base document into the managed one.

use crate::error::CliResult;
use crate::profile::Profile;
use crate::spec_file;
use std::path::{Path, PathBuf};
use tracing::info;

/// Arguments for the merge command.
#[derive(clap::Args, Debug, Clone)]
pub struct MergeArgs {
    /// Document the merged sections are read from.
    #[clap(long, default_value = "openapi.base.yaml")]
    pub base_spec: PathBuf,
}

/// Overwrites every profile merge key of the document at `spec_path` with the
/// base document's value. Keys the base document lacks are skipped.
///
/// Returns the keys that were copied.
pub fn execute(args: &MergeArgs, profile: &Profile, spec_path: &Path) -> CliResult<Vec<String>> {
    let source = spec_file::load(&args.base_spec)?.into_node();
    let mut document = spec_file::load_managed(spec_path)?;

    let mut copied = Vec::new();
    for key in &profile.merge_keys {
        if document.overwrite_subtree(key, &source)? {
            copied.push(key.clone());
        }
    }

    info!(copied = copied.len(), of = profile.merge_keys.len(), "merged base document");
    spec_file::save(spec_path, &document)?;
    Ok(copied)
}
