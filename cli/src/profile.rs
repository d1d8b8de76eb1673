#![deny(missing_docs)]

//! # Profiles
//!
//! Static tables describing one documented API: where its docs live, sample
//! values, tag rules, schema extractions and merge keys.

use crate::error::{CliError, CliResult};
use docspec_core::annotate::AnnotationRules;
use docspec_core::endpoint::{CombinationGenerator, DefaultValueResolver, DefaultsConfig, ValueMode};
use docspec_core::default_status_names;
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Profile embedded in the binary.
const BUILTIN_PROFILE: &str = include_str!("../profile.yaml");

/// Credentials for the documentation site.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BasicAuth {
    /// User name.
    pub username: String,
    /// Password.
    pub password: String,
}

/// Everything a run needs to know about the documented API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Profile {
    /// Documentation index page.
    pub docs_url: String,
    /// Prefix of every API request URL.
    pub api_base_url: String,
    /// Basic auth for documentation pages.
    #[serde(default)]
    pub docs_auth: Option<BasicAuth>,
    /// Sample values.
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Endpoint ids whose required parameters are always sent together.
    #[serde(default)]
    pub all_required: Vec<String>,
    /// Tag and security rules.
    #[serde(default)]
    pub annotation: AnnotationRules,
    /// Extraction selector -> canonical schema name, applied in order.
    #[serde(default)]
    pub schema_extractions: IndexMap<String, String>,
    /// Dotted keys copied from the base document in merge mode.
    #[serde(default)]
    pub merge_keys: Vec<String>,
    /// Status code -> name used in response schema names.
    #[serde(default = "default_status_names")]
    pub status_names: IndexMap<String, String>,
}

impl Profile {
    /// The embedded UEX Corp 2.0 profile.
    pub fn builtin() -> CliResult<Self> {
        Self::from_yaml_str(BUILTIN_PROFILE)
            .map_err(|e| CliError::Profile(format!("built-in profile: {}", e)))
    }

    /// Parses a profile document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Reads a profile from `path`.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
            .map_err(|e| CliError::Profile(format!("{}: {}", path.display(), e)))
    }

    /// Reads `path` when given, else the built-in profile.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let profile = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::builtin()?,
        };
        debug!(
            docs_url = %profile.docs_url,
            overrides = profile.defaults.overrides.len(),
            extractions = profile.schema_extractions.len(),
            "loaded profile"
        );
        Ok(profile)
    }

    /// A variant generator over this profile's defaults.
    pub fn generator(&self, mode: ValueMode) -> CombinationGenerator {
        CombinationGenerator::new(
            DefaultValueResolver::new(self.defaults.clone()).with_mode(mode),
            self.all_required.iter().cloned(),
        )
    }
}
