#![deny(missing_docs)]

//! # Default Sample Values
//!
//! Supplies the value substituted for a parameter when building request variants.
//!
//! Resolution order:
//! 1. `{name}` placeholder when the resolver runs in template mode.
//! 2. The first override rule matching the endpoint id that defines the name.
//! 3. The global name-keyed default.
//! 4. The caller's fallback.

use crate::endpoint::matcher::Matcher;
use indexmap::IndexMap;
use serde::Deserialize;
use std::borrow::Cow;
use std::fmt;

/// A sample value as written in a profile.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SampleValue {
    /// Integer value, e.g. an id.
    Integer(i64),
    /// Decimal value, e.g. a price or ratio.
    Float(f64),
    /// Boolean flag.
    Boolean(bool),
    /// Free text (codes, slugs, comma separated lists).
    Text(String),
}

impl fmt::Display for SampleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleValue::Integer(v) => write!(f, "{}", v),
            SampleValue::Float(v) => write!(f, "{}", v),
            SampleValue::Boolean(v) => write!(f, "{}", v),
            SampleValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for SampleValue {
    fn from(v: i64) -> Self {
        SampleValue::Integer(v)
    }
}

impl From<&str> for SampleValue {
    fn from(v: &str) -> Self {
        SampleValue::Text(v.to_string())
    }
}

/// Values that replace the global defaults for matching endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OverrideRule {
    /// Endpoint ids this rule applies to.
    pub endpoint: Matcher,
    /// Parameter values, keyed by parameter name.
    pub values: IndexMap<String, SampleValue>,
}

/// Static default tables, immutable once handed to a resolver.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DefaultsConfig {
    /// Defaults keyed by parameter name.
    #[serde(default)]
    pub global: IndexMap<String, SampleValue>,
    /// Per-endpoint overrides, first matching rule wins.
    #[serde(default)]
    pub overrides: Vec<OverrideRule>,
}

/// Whether variants carry sample values or `{name}` placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueMode {
    /// Executable requests with sample values.
    #[default]
    Sample,
    /// Path templates with `{name}` placeholders.
    Template,
}

/// Resolves parameter sample values against a [`DefaultsConfig`].
#[derive(Debug, Clone)]
pub struct DefaultValueResolver {
    config: DefaultsConfig,
    mode: ValueMode,
}

impl DefaultValueResolver {
    /// Creates a resolver producing sample values.
    pub fn new(config: DefaultsConfig) -> Self {
        Self {
            config,
            mode: ValueMode::Sample,
        }
    }

    /// Switches the value mode.
    pub fn with_mode(mut self, mode: ValueMode) -> Self {
        self.mode = mode;
        self
    }

    /// Resolves the value for `name` on `endpoint_id`, or `None` when nothing defines it.
    pub fn resolve(&self, endpoint_id: &str, name: &str) -> Option<Cow<'_, str>> {
        if self.mode == ValueMode::Template {
            return Some(Cow::Owned(format!("{{{}}}", name)));
        }

        let overridden = self
            .config
            .overrides
            .iter()
            .filter(|rule| rule.endpoint.matches(endpoint_id))
            .find_map(|rule| rule.values.get(name));

        overridden
            .or_else(|| self.config.global.get(name))
            .map(|value| match value {
                SampleValue::Text(text) => Cow::Borrowed(text.as_str()),
                other => Cow::Owned(other.to_string()),
            })
    }

    /// Resolves the value for `name`, falling back to `fallback`.
    pub fn resolve_or<'a>(
        &'a self,
        endpoint_id: &str,
        name: &str,
        fallback: &'a str,
    ) -> Cow<'a, str> {
        self.resolve(endpoint_id, name)
            .unwrap_or(Cow::Borrowed(fallback))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> DefaultsConfig {
        let mut global = IndexMap::new();
        global.insert("id_commodity".to_string(), SampleValue::Integer(33));
        global.insert("id_terminal".to_string(), SampleValue::Integer(74));
        global.insert("is_lagrange".to_string(), SampleValue::Boolean(true));

        let mut raw_prices = IndexMap::new();
        raw_prices.insert("id_terminal".to_string(), SampleValue::from("237,241"));
        let mut items = IndexMap::new();
        items.insert("id_terminal".to_string(), SampleValue::Integer(268));

        DefaultsConfig {
            global,
            overrides: vec![
                OverrideRule {
                    endpoint: Matcher::exact("commodities_raw_prices"),
                    values: raw_prices,
                },
                OverrideRule {
                    endpoint: Matcher::pattern("^items").unwrap(),
                    values: items,
                },
            ],
        }
    }

    #[test]
    fn test_global_default() {
        let resolver = DefaultValueResolver::new(config());
        assert_eq!(resolver.resolve("commodities", "id_commodity").as_deref(), Some("33"));
    }

    #[test]
    fn test_exact_override_wins_over_global() {
        let resolver = DefaultValueResolver::new(config());
        assert_eq!(
            resolver.resolve("commodities_raw_prices", "id_terminal").as_deref(),
            Some("237,241")
        );
        // names the rule does not define still come from the global table
        assert_eq!(
            resolver.resolve("commodities_raw_prices", "id_commodity").as_deref(),
            Some("33")
        );
    }

    #[test]
    fn test_pattern_override() {
        let resolver = DefaultValueResolver::new(config());
        assert_eq!(resolver.resolve("items_prices", "id_terminal").as_deref(), Some("268"));
    }

    #[test]
    fn test_overlapping_rules_fall_through_to_next_match() {
        let mut config = config();
        let mut vehicle = IndexMap::new();
        vehicle.insert("id_vehicle".to_string(), SampleValue::Integer(19));
        let mut items = IndexMap::new();
        items.insert("id_item".to_string(), SampleValue::Integer(1743));
        items.insert("id_vehicle".to_string(), SampleValue::Integer(7));
        config.global.insert("id_item".to_string(), SampleValue::Integer(1));
        config.overrides = vec![
            OverrideRule {
                endpoint: Matcher::exact("items_prices"),
                values: vehicle,
            },
            OverrideRule {
                endpoint: Matcher::pattern("^items").unwrap(),
                values: items,
            },
        ];

        let resolver = DefaultValueResolver::new(config);
        // the exact rule lacks id_item, the pattern rule defines it
        assert_eq!(resolver.resolve("items_prices", "id_item").as_deref(), Some("1743"));
        // both define id_vehicle, the earlier rule wins
        assert_eq!(resolver.resolve("items_prices", "id_vehicle").as_deref(), Some("19"));
        assert_eq!(resolver.resolve("cities", "id_item").as_deref(), Some("1"));
    }

    #[test]
    fn test_profile_values_of_every_kind() {
        let config: DefaultsConfig = serde_yaml::from_str(
            "global:\n  id_vehicle: 19\n  ratio: 1.5\n  is_lagrange: true\n  code: TDORI\n",
        )
        .unwrap();
        assert_eq!(config.global["id_vehicle"], SampleValue::Integer(19));
        assert_eq!(config.global["ratio"], SampleValue::Float(1.5));

        let resolver = DefaultValueResolver::new(config);
        assert_eq!(resolver.resolve("any", "ratio").as_deref(), Some("1.5"));
        assert_eq!(resolver.resolve("any", "is_lagrange").as_deref(), Some("true"));
        assert_eq!(resolver.resolve("any", "code").as_deref(), Some("TDORI"));
    }

    #[test]
    fn test_template_mode_placeholder() {
        let resolver = DefaultValueResolver::new(config()).with_mode(ValueMode::Template);
        assert_eq!(
            resolver.resolve("commodities_raw_prices", "id_terminal").as_deref(),
            Some("{id_terminal}")
        );
        assert_eq!(resolver.resolve("x", "unknown").as_deref(), Some("{unknown}"));
    }

    #[test]
    fn test_fallback() {
        let resolver = DefaultValueResolver::new(config());
        assert_eq!(resolver.resolve("x", "unknown"), None);
        assert_eq!(resolver.resolve_or("x", "unknown", ""), "");
    }

    #[test]
    fn test_boolean_rendering() {
        let resolver = DefaultValueResolver::new(config());
        assert_eq!(resolver.resolve("x", "is_lagrange").as_deref(), Some("true"));
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
global:
  id_commodity: 33
  commodity_code: GOLD
  is_item_manufacturer: true
overrides:
  - endpoint: organizations
    values:
      slug: uexcorp
  - endpoint:
      pattern: "^items"
    values:
      id_item: 1743
"#;
        let config: DefaultsConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.global["id_commodity"], SampleValue::Integer(33));
        assert_eq!(config.global["commodity_code"], SampleValue::from("GOLD"));
        assert_eq!(config.global["is_item_manufacturer"], SampleValue::Boolean(true));
        assert_eq!(config.overrides.len(), 2);
        assert!(config.overrides[1].endpoint.matches("items_attributes"));
    }
}
