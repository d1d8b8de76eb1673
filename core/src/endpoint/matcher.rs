#![deny(missing_docs)]

//! # Matcher Rules
//!
//! Exact-string or regular-expression matchers, evaluated as ordered lists where
//! the first matching rule wins. Used for per-endpoint default overrides (keyed
//! by endpoint id) and tag classification (keyed by base path).

use regex::Regex;
use serde::Deserialize;

/// Matches a key exactly or by pattern.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "MatcherDef")]
pub enum Matcher {
    /// Matches only the identical string.
    Exact(String),
    /// Matches when the regex finds a match; anchor with `^` for prefixes.
    Pattern(Regex),
}

impl Matcher {
    /// Builds an exact matcher.
    pub fn exact(value: impl Into<String>) -> Self {
        Matcher::Exact(value.into())
    }

    /// Compiles a pattern matcher.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Matcher::Pattern)
    }

    /// Returns whether `key` is matched.
    pub fn matches(&self, key: &str) -> bool {
        match self {
            Matcher::Exact(value) => value == key,
            Matcher::Pattern(regex) => regex.is_match(key),
        }
    }
}

impl PartialEq for Matcher {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Matcher::Exact(a), Matcher::Exact(b)) => a == b,
            (Matcher::Pattern(a), Matcher::Pattern(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

/// Profile representation: a bare string is exact, `{pattern: ...}` is a regex.
#[derive(Deserialize)]
#[serde(untagged)]
enum MatcherDef {
    Exact(String),
    Pattern { pattern: String },
}

impl TryFrom<MatcherDef> for Matcher {
    type Error = String;

    fn try_from(def: MatcherDef) -> Result<Self, Self::Error> {
        match def {
            MatcherDef::Exact(value) => Ok(Matcher::Exact(value)),
            MatcherDef::Pattern { pattern } => Matcher::pattern(&pattern)
                .map_err(|e| format!("invalid matcher pattern '{}': {}", pattern, e)),
        }
    }
}
