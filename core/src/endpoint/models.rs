#![deny(missing_docs)]

//! # Endpoint Models
//!
//! Value objects produced from a documentation page: parameters, the request
//! variants generated for them, and the endpoint that owns both.

/// A single documented input of an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Parameter {
    /// Parameter name, unique within one endpoint (e.g. `id_commodity`).
    pub name: String,
    /// Declared type name (e.g. `int`, `string`).
    pub ty: String,
    /// Declared maximum length, `0` when the documentation gives none.
    pub length: u32,
    /// Whether the documentation marks the parameter as required.
    pub is_required: bool,
}

impl Parameter {
    /// Creates a required parameter.
    pub fn required(name: impl Into<String>, ty: impl Into<String>, length: u32) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            length,
            is_required: true,
        }
    }

    /// Creates an optional parameter.
    pub fn optional(name: impl Into<String>, ty: impl Into<String>, length: u32) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            length,
            is_required: false,
        }
    }
}

/// One concrete or templated request shape derived from an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    /// Base path followed by the required parameters, e.g. `/commodity/id_commodity/33/`.
    pub path: String,
    /// Query string without the leading `?`; empty for the baseline variant.
    pub query: String,
    /// Required parameters substituted into `path`, in declaration order.
    pub required_params: Vec<Parameter>,
}

impl Variant {
    /// The request target: path plus `?query` when a query exists.
    pub fn url(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }
}

/// One documented API operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    /// Identifier taken from the documentation URL (e.g. `commodities_prices`).
    pub id: String,
    /// HTTP method, as written in the documentation (e.g. `GET`).
    pub method: String,
    /// Path relative to the API base (e.g. `/commodities_prices`).
    pub base_path: String,
    /// One-line description.
    pub description: String,
    /// URL of the documentation page the endpoint was parsed from.
    pub docs_url: String,
    /// Whether requests need the user's `secret_key`.
    pub is_user_bound: bool,
    /// Generated request variants.
    pub variants: Vec<Variant>,
}

impl Endpoint {
    /// Distinct variant paths in generation order.
    ///
    /// In template mode these are the path templates of the endpoint.
    pub fn distinct_paths(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for variant in &self.variants {
            if !seen.contains(&variant.path.as_str()) {
                seen.push(variant.path.as_str());
            }
        }
        seen
    }
}
