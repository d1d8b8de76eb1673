#![deny(missing_docs)]

//! # Fetching
//!
//! Blocking HTTP through `ureq`, with every successful response mirrored into
//! an on-disk cache keyed by URL.

use crate::error::{CliError, CliResult};
use crate::profile::BasicAuth;
use base64::Engine;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error};
use ureq::tls::TlsConfig;
use ureq::Agent;
use url::Url;

/// Anything that returns the body behind a URL.
pub trait PageSource {
    /// Fetches `url` and returns the response body.
    fn fetch(&self, url: &str) -> CliResult<String>;
}

/// Cache and TLS settings shared by every fetcher of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Directory holding cached responses.
    pub cache_dir: PathBuf,
    /// Serve cached responses without a request.
    pub use_cache: bool,
    /// Skip TLS certificate verification.
    pub insecure: bool,
}

/// HTTP fetcher with a response cache.
pub struct Fetcher {
    agent: Agent,
    headers: Vec<(String, String)>,
    options: FetchOptions,
}

impl Fetcher {
    /// Creates a fetcher without credentials.
    pub fn new(options: FetchOptions) -> Self {
        let agent: Agent = Agent::config_builder()
            .tls_config(
                TlsConfig::builder()
                    .disable_verification(options.insecure)
                    .build(),
            )
            .build()
            .into();
        Self {
            agent,
            headers: Vec::new(),
            options,
        }
    }

    /// Sends HTTP basic auth with every request.
    pub fn with_basic_auth(mut self, auth: &BasicAuth) -> Self {
        let credentials = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", auth.username, auth.password));
        self.headers
            .push(("Authorization".to_string(), format!("Basic {}", credentials)));
        self
    }

    /// Sends the application bearer token and the user's secret key with every request.
    pub fn with_api_tokens(mut self, app_token: &str, user_token: &str) -> Self {
        self.headers
            .push(("Authorization".to_string(), format!("Bearer {}", app_token)));
        self.headers
            .push(("secret_key".to_string(), user_token.to_string()));
        self
    }

    /// Where the response for `url` is cached.
    pub fn cache_path(&self, url: &str) -> CliResult<PathBuf> {
        let parsed = Url::parse(url)
            .map_err(|e| CliError::Http(format!("invalid URL '{}': {}", url, e)))?;
        Ok(self.options.cache_dir.join(cache_file_name(&parsed)))
    }

    fn request(&self, url: &str) -> CliResult<String> {
        debug!(url, "GET");
        let mut request = self.agent.get(url);
        for (name, value) in &self.headers {
            request = request.header(name.as_str(), value.as_str());
        }
        let mut response = request.call().map_err(|e| {
            error!(url, error = %e, "request failed");
            CliError::from(e)
        })?;
        let status = response.status();
        if !status.is_success() {
            error!(url, status = status.as_u16(), "request failed");
            return Err(CliError::Http(format!("{} returned {}", url, status)));
        }
        Ok(response.body_mut().read_to_string()?)
    }
}

impl PageSource for Fetcher {
    fn fetch(&self, url: &str) -> CliResult<String> {
        let cache_path = self.cache_path(url)?;
        if self.options.use_cache && cache_path.exists() {
            debug!(url, "using cache");
            return Ok(fs::read_to_string(&cache_path)?);
        }

        let body = self.request(url)?;
        write_cache(&cache_path, &body)?;
        Ok(body)
    }
}

fn write_cache(path: &Path, body: &str) -> CliResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, body)?;
    Ok(())
}

/// Flattens one URL component into a file name fragment.
pub fn cache_key(component: &str) -> String {
    component
        .trim_matches('/')
        .replace('/', "-")
        .replace('?', "__")
        .replace('=', "--")
        .replace('&', "__")
}

/// `{path}[__{query}].{html|json}` for `url`.
pub fn cache_file_name(url: &Url) -> String {
    let path_part = cache_key(url.path());
    let query_part = url.query().map(cache_key).unwrap_or_default();
    let key = if query_part.is_empty() {
        path_part
    } else {
        format!("{}__{}", path_part, query_part)
    };
    let ext = if url.path().contains("documentation") {
        "html"
    } else {
        "json"
    };
    format!("{}.{}", key, ext)
}
