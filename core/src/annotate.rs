#![deny(missing_docs)]

//! # Operation Annotation
//!
//! Derives `operationId`, `summary`, `tags` and `security` for every request
//! variant of an endpoint, keyed by the variant's path template.

use crate::document::PathOperationMap;
use crate::endpoint::{Endpoint, Matcher, Variant};
use crate::schema::{ObjectMap, SchemaNode};
use heck::ToSnakeCase;
use serde::Deserialize;

/// Tag given to every user-bound endpoint, ahead of classified tags.
pub const USER_TAG: &str = "User";

/// Assigns `tag` to endpoints whose base path matches any of `paths`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TagRule {
    /// Tag name.
    pub tag: String,
    /// Base path matchers, tried in order.
    pub paths: Vec<Matcher>,
}

/// Static annotation tables.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnnotationRules {
    /// Tag rules in output order.
    #[serde(default)]
    pub tags: Vec<TagRule>,
    /// Base paths that need no application token.
    #[serde(default)]
    pub unauthenticated: Vec<String>,
}

impl AnnotationRules {
    /// Tags for `endpoint`: [`USER_TAG`] when user-bound, then each matching rule's tag once.
    pub fn tags_for(&self, endpoint: &Endpoint) -> Vec<String> {
        let mut tags = Vec::new();
        if endpoint.is_user_bound {
            tags.push(USER_TAG.to_string());
        }
        for rule in &self.tags {
            let matched = rule.paths.iter().any(|m| m.matches(&endpoint.base_path));
            if matched && !tags.contains(&rule.tag) {
                tags.push(rule.tag.clone());
            }
        }
        tags
    }

    /// Security requirement names for `endpoint`, in order.
    pub fn security_for(&self, endpoint: &Endpoint) -> Vec<&'static str> {
        let mut schemes = Vec::new();
        if endpoint.is_user_bound {
            schemes.push("user");
        }
        if !self.unauthenticated.contains(&endpoint.base_path) {
            schemes.push("application");
        }
        schemes
    }

    /// Operation attributes for one variant of `endpoint`.
    pub fn operation_attributes(&self, endpoint: &Endpoint, variant: &Variant) -> ObjectMap {
        let tags = self.tags_for(endpoint);
        let security = self
            .security_for(endpoint)
            .into_iter()
            .map(|scheme| {
                let mut requirement = ObjectMap::new();
                requirement.insert(scheme.to_string(), SchemaNode::Array(Vec::new()));
                SchemaNode::Object(requirement)
            })
            .collect();

        let mut attributes = ObjectMap::new();
        attributes.insert(
            "operationId".to_string(),
            SchemaNode::string(operation_id(&endpoint.method, &endpoint.id, variant)),
        );
        attributes.insert(
            "summary".to_string(),
            SchemaNode::string(endpoint.description.clone()),
        );
        attributes.insert(
            "tags".to_string(),
            SchemaNode::Array(tags.into_iter().map(SchemaNode::string).collect()),
        );
        attributes.insert("security".to_string(), SchemaNode::Array(security));
        attributes
    }

    /// Attributes for every variant of every endpoint, keyed by path and method.
    ///
    /// Variants sharing a path template share one entry; the last one wins.
    pub fn build_operation_map<'a, I>(&self, endpoints: I) -> PathOperationMap
    where
        I: IntoIterator<Item = &'a Endpoint>,
    {
        let mut map = PathOperationMap::new();
        for endpoint in endpoints {
            for variant in &endpoint.variants {
                map.entry(variant.path.clone())
                    .or_default()
                    .insert(
                        endpoint.method.to_lowercase(),
                        self.operation_attributes(endpoint, variant),
                    );
            }
        }
        map
    }
}

/// `GET` + `commodities_prices` + required `id_commodity` -> `get_commodities_prices_by_commodity`.
pub fn operation_id(method: &str, endpoint_id: &str, variant: &Variant) -> String {
    let mut raw = format!("{}_{}", method.to_lowercase(), endpoint_id);
    if !variant.required_params.is_empty() {
        let names: Vec<String> = variant
            .required_params
            .iter()
            .map(|p| p.name.replace("id_", ""))
            .collect();
        raw.push_str("_by_");
        raw.push_str(&names.join("_and_"));
    }
    raw.to_snake_case()
}
