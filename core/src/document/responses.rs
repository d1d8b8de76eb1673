//! # Response Schemas
//!
//! Moves inline response body schemas of an endpoint's operations into the
//! catalog, named after method, endpoint and status, and leaves references in
//! their place.

use crate::document::SpecDocument;
use crate::endpoint::Endpoint;
use crate::error::AppResult;
use crate::schema::{Insertion, SchemaNode};
use heck::ToUpperCamelCase;
use indexmap::IndexMap;
use tracing::warn;

/// A response schema moved into the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiftedSchema {
    /// Catalog name, e.g. `GetCommoditiesOkResponse`.
    pub name: String,
    /// Outcome of the catalog insertion.
    pub insertion: Insertion,
}

/// Status code names used in response schema names.
pub fn default_status_names() -> IndexMap<String, String> {
    [
        ("200", "Ok"),
        ("201", "Created"),
        ("400", "Bad_Request"),
        ("401", "Unauthorized"),
        ("403", "Forbidden"),
        ("404", "Not_Found"),
        ("405", "Method_Not_Allowed"),
        ("429", "Too_Many_Requests"),
        ("500", "Internal_Server_Error"),
        ("503", "Service_Unavailable"),
    ]
    .into_iter()
    .map(|(code, name)| (code.to_string(), name.to_string()))
    .collect()
}

/// `get` + `/commodities_prices` + `Ok` -> `GetCommoditiesPricesOkResponse`.
pub fn response_schema_name(method: &str, base_path: &str, status_name: &str) -> String {
    let endpoint_name = base_path.replace('/', "_");
    let endpoint_name = endpoint_name.trim_matches('_').to_lowercase();
    format!(
        "{}_{}_{}_response",
        method.to_lowercase(),
        endpoint_name,
        status_name.to_lowercase()
    )
    .to_upper_camel_case()
}

impl SpecDocument {
    /// Lifts the inline response schemas found under `endpoint`'s variant paths.
    ///
    /// Status codes missing from `status_names` are reported and skipped; schemas
    /// that already are references are left alone. `components.schemas` is only
    /// created when at least one schema is lifted.
    pub fn lift_response_schemas(
        &mut self,
        endpoint: &Endpoint,
        status_names: &IndexMap<String, String>,
    ) -> AppResult<Vec<LiftedSchema>> {
        let mut pending = Vec::new();

        if let Some(paths) = self.paths_mut() {
            for path in endpoint.distinct_paths() {
                let Some(operations) = paths.get_mut(path).and_then(SchemaNode::as_object_mut)
                else {
                    continue;
                };
                for (method, operation) in operations.iter_mut() {
                    let Some(responses) = operation
                        .as_object_mut()
                        .and_then(|op| op.get_mut("responses"))
                        .and_then(SchemaNode::as_object_mut)
                    else {
                        continue;
                    };

                    for (code, response) in responses.iter_mut() {
                        let Some(status) = status_names.get(code) else {
                            warn!(path, code = %code, "unknown response status, skipping");
                            continue;
                        };
                        let Some(content) = response
                            .as_object_mut()
                            .and_then(|r| r.get_mut("content"))
                            .and_then(SchemaNode::as_object_mut)
                        else {
                            continue;
                        };

                        for media in content.values_mut() {
                            let Some(schema) = media
                                .as_object_mut()
                                .and_then(|m| m.get_mut("schema"))
                            else {
                                continue;
                            };
                            if schema.as_reference().is_some() {
                                continue;
                            }
                            let name = response_schema_name(method, &endpoint.base_path, status);
                            let inline = std::mem::replace(schema, SchemaNode::reference(&name));
                            pending.push((name, inline));
                        }
                    }
                }
            }
        }

        if pending.is_empty() {
            return Ok(Vec::new());
        }
        self.with_catalog(|catalog| {
            pending
                .into_iter()
                .map(|(name, inline)| {
                    let insertion = catalog.add_schema(&name, &inline);
                    LiftedSchema { name, insertion }
                })
                .collect()
        })
    }
}
