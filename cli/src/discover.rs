//! Walks the documentation index and turns every endpoint page into an [`Endpoint`].

use crate::error::{CliError, CliResult};
use crate::fetch::PageSource;
use crate::profile::Profile;
use docspec_core::endpoint::{Endpoint, ValueMode};
use docspec_core::{endpoint_links, EndpointPage};
use tracing::{error, info};
use url::Url;

/// Parses every endpoint linked from the profile's documentation index.
///
/// The index itself must load. Pages that fail to load or parse are logged and
/// skipped.
pub fn discover_endpoints(
    profile: &Profile,
    docs: &impl PageSource,
    mode: ValueMode,
) -> CliResult<Vec<Endpoint>> {
    let index_url = Url::parse(&profile.docs_url)
        .map_err(|e| CliError::Profile(format!("invalid docs_url '{}': {}", profile.docs_url, e)))?;
    let index = docs.fetch(index_url.as_str())?;
    let links = endpoint_links(&index)?;
    info!("discovered {} endpoints", links.len());
    if links.is_empty() {
        error!(url = %index_url, "no endpoint links found");
    }

    let generator = profile.generator(mode);
    let mut endpoints = Vec::new();
    for link in links {
        let url = match index_url.join(&link) {
            Ok(url) => url,
            Err(e) => {
                error!(link = %link, error = %e, "invalid endpoint link, skipping");
                continue;
            }
        };
        let page = docs
            .fetch(url.as_str())
            .map_err(|e| e.to_string())
            .and_then(|html| EndpointPage::parse(url.as_str(), &html).map_err(|e| e.to_string()));
        match page {
            Ok(page) => {
                info!(
                    "discovered endpoint: {} {} ({})",
                    page.method, page.id, page.description
                );
                endpoints.push(page.into_endpoint(&generator));
            }
            Err(e) => error!(url = %url, error = %e, "failed to process endpoint, skipping"),
        }
    }
    Ok(endpoints)
}
