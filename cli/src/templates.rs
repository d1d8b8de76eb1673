//! # Apply Path Templates Command
//!
//! Records every endpoint's path templates in the managed document.

use crate::discover::discover_endpoints;
use crate::error::CliResult;
use crate::fetch::PageSource;
use crate::profile::Profile;
use crate::spec_file;
use docspec_core::endpoint::ValueMode;
use std::path::Path;
use tracing::{debug, info};

/// Prepends the discovered path templates to the document at `spec_path`.
///
/// Returns how many templates were new.
pub fn execute(profile: &Profile, docs: &impl PageSource, spec_path: &Path) -> CliResult<usize> {
    let endpoints = discover_endpoints(profile, docs, ValueMode::Template)?;
    let mut document = spec_file::load_managed(spec_path)?;

    let mut added = 0;
    for endpoint in &endpoints {
        let templates = endpoint.distinct_paths();
        debug!(endpoint = %endpoint.id, ?templates, "adding templated paths");
        added += document.add_path_templates(templates)?;
    }

    info!(added, "applied path templates");
    spec_file::save(spec_path, &document)?;
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discover::tests::uex_docs;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_templates_written_once() {
        let dir = tempdir().unwrap();
        let spec_path = dir.path().join("openapi.yaml");
        fs::write(&spec_path, "openapi: 3.0.0\nx-path-templates:\n- /legacy/\n").unwrap();
        let profile = Profile::builtin().unwrap();

        assert_eq!(execute(&profile, &uex_docs(), &spec_path).unwrap(), 3);
        // second run adds nothing
        assert_eq!(execute(&profile, &uex_docs(), &spec_path).unwrap(), 0);

        let document = spec_file::load(&spec_path).unwrap();
        assert_eq!(
            document.path_templates(),
            vec![
                "/marketplace_advertise/id_item/{id_item}/",
                "/user/",
                "/cities/id_star_system/{id_star_system}/",
                "/legacy/",
            ]
        );
    }
}
