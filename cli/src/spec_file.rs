//! Reading and writing the YAML documents a run works on.

use crate::error::{CliError, CliResult};
use docspec_core::SpecDocument;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Loads the managed document. A missing file starts an empty document.
pub fn load_managed(path: &Path) -> CliResult<SpecDocument> {
    if !path.exists() {
        warn!(path = %path.display(), "document not found, starting an empty one");
        return Ok(SpecDocument::default());
    }
    load(path)
}

/// Loads a document that must exist.
pub fn load(path: &Path) -> CliResult<SpecDocument> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::General(format!("Failed to read {}: {}", path.display(), e)))?;
    Ok(SpecDocument::from_yaml_str(&content)?)
}

/// Writes `document` to `path` as YAML.
pub fn save(path: &Path, document: &SpecDocument) -> CliResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, document.to_yaml_string()?)?;
    info!(path = %path.display(), "wrote document");
    Ok(())
}
