#![deny(missing_docs)]

//! # Collect Command
//!
//! Requests every sample variant of every `GET` endpoint so the responses land
//! in the cache.

use crate::discover::discover_endpoints;
use crate::error::CliResult;
use crate::fetch::PageSource;
use crate::profile::Profile;
use docspec_core::endpoint::{Endpoint, ValueMode};
use tracing::{debug, error, info};

/// Arguments for the collect command.
#[derive(clap::Args, Debug, Clone)]
pub struct CollectArgs {
    /// Application token sent as a bearer token.
    #[clap(long, env = "APP_TOKEN", hide_env_values = true)]
    pub app_token: String,

    /// User secret sent as the `secret_key` header.
    #[clap(long, env = "USER_TOKEN", hide_env_values = true)]
    pub user_token: String,
}

/// Outcome counts of a collect run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectReport {
    /// Responses fetched or served from cache.
    pub fetched: usize,
    /// Endpoints whose collection stopped at a failed request.
    pub failed_endpoints: Vec<String>,
    /// Endpoints skipped because they are not `GET`.
    pub skipped_endpoints: Vec<String>,
}

/// Executes the collection.
///
/// # Arguments
///
/// * `profile` - The API profile.
/// * `docs` - Source of documentation pages.
/// * `api` - Source of API responses, carrying the credentials.
pub fn execute(profile: &Profile, docs: &impl PageSource, api: &impl PageSource) -> CliResult<CollectReport> {
    let endpoints = discover_endpoints(profile, docs, ValueMode::Sample)?;
    let mut report = CollectReport::default();

    for endpoint in &endpoints {
        if !endpoint.method.eq_ignore_ascii_case("GET") {
            debug!(endpoint = %endpoint.id, method = %endpoint.method, "skipping non-GET endpoint");
            report.skipped_endpoints.push(endpoint.id.clone());
            continue;
        }
        let (fetched, complete) = collect_endpoint(profile, endpoint, api);
        report.fetched += fetched;
        if !complete {
            report.failed_endpoints.push(endpoint.id.clone());
        }
    }

    info!(
        fetched = report.fetched,
        failed = report.failed_endpoints.len(),
        "collection finished"
    );
    Ok(report)
}

/// Fetches each variant in order; the first failure ends the endpoint.
///
/// Returns the number of responses fetched and whether every variant was.
fn collect_endpoint(profile: &Profile, endpoint: &Endpoint, api: &impl PageSource) -> (usize, bool) {
    let mut fetched = 0;
    for variant in &endpoint.variants {
        let url = format!("{}{}", profile.api_base_url, variant.url());
        if let Err(e) = api.fetch(&url) {
            error!(endpoint = %endpoint.id, url = %url, error = %e, "request failed, skipping endpoint");
            return (fetched, false);
        }
        fetched += 1;
    }
    (fetched, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discover::tests::{uex_docs, StaticPages};
    use pretty_assertions::assert_eq;

    const API: &str = "https://api.uexcorp.space/2.0";

    #[test]
    fn test_collect_get_variants() {
        let profile = Profile::builtin().unwrap();
        let api = StaticPages::default()
            .with(&format!("{}/cities/id_star_system/68/", API), "{}")
            .with(&format!("{}/cities/id_star_system/68/?id_planet=116", API), "{}")
            .with(&format!("{}/user/", API), "{}");

        let report = execute(&profile, &uex_docs(), &api).unwrap();
        assert_eq!(
            report,
            CollectReport {
                fetched: 3,
                failed_endpoints: vec![],
                skipped_endpoints: vec!["marketplace_advertise".to_string()],
            }
        );
    }

    #[test]
    fn test_failed_request_skips_rest_of_endpoint() {
        let profile = Profile::builtin().unwrap();
        let api = StaticPages::default()
            .with(&format!("{}/cities/id_star_system/68/?id_planet=116", API), "{}")
            .with(&format!("{}/user/", API), "{}");

        let report = execute(&profile, &uex_docs(), &api).unwrap();
        assert_eq!(report.fetched, 1);
        assert_eq!(report.failed_endpoints, vec!["cities".to_string()]);
        let requested = api.requested.borrow();
        assert!(!requested.iter().any(|u| u.ends_with("?id_planet=116")));
    }
}
