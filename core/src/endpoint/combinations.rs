#![deny(missing_docs)]

//! # Parameter Combinations
//!
//! Turns an endpoint's required and optional parameters into a bounded,
//! deterministic list of request variants.
//!
//! For every required-combination the generator emits one baseline variant with
//! no optional parameters, then one variant per entry of the optional pool, each
//! added alone. The pool is the declared optional parameters followed by the
//! required parameters the combination does not use.
//!
//! Output order depends only on declaration order and the required mode.

use crate::endpoint::defaults::DefaultValueResolver;
use crate::endpoint::models::{Parameter, Variant};
use std::collections::HashSet;
use tracing::{debug, warn};

/// How an endpoint's required parameters combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredMode {
    /// One combination containing every required parameter.
    AllRequired,
    /// One combination per required parameter; any single one identifies the resource.
    OneOfRequired,
}

/// Generates request variants for endpoints.
#[derive(Debug, Clone)]
pub struct CombinationGenerator {
    resolver: DefaultValueResolver,
    all_required: HashSet<String>,
}

impl CombinationGenerator {
    /// Creates a generator. Endpoint ids listed in `all_required` use
    /// [`RequiredMode::AllRequired`], every other endpoint [`RequiredMode::OneOfRequired`].
    pub fn new<I, S>(resolver: DefaultValueResolver, all_required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            resolver,
            all_required: all_required.into_iter().map(Into::into).collect(),
        }
    }

    /// The resolver used for value substitution.
    pub fn resolver(&self) -> &DefaultValueResolver {
        &self.resolver
    }

    /// The required mode selected for `endpoint_id`.
    pub fn mode_for(&self, endpoint_id: &str) -> RequiredMode {
        if self.all_required.contains(endpoint_id) {
            RequiredMode::AllRequired
        } else {
            RequiredMode::OneOfRequired
        }
    }

    /// Produces the ordered variants for one endpoint.
    pub fn generate(
        &self,
        endpoint_id: &str,
        base_path: &str,
        required: &[Parameter],
        optional: &[Parameter],
    ) -> Vec<Variant> {
        let combinations = required_combinations(self.mode_for(endpoint_id), required);
        let mut variants = Vec::new();

        if combinations.is_empty() {
            debug!(endpoint = endpoint_id, "no required parameters");
            let pool: Vec<&Parameter> = optional.iter().collect();
            self.push_family(&mut variants, endpoint_id, base_path, &[], &pool);
            return variants;
        }

        for combination in &combinations {
            let pool: Vec<&Parameter> = optional
                .iter()
                .chain(required.iter().filter(|p| !combination.contains(p)))
                .collect();
            self.push_family(&mut variants, endpoint_id, base_path, combination, &pool);
        }

        variants
    }

    /// Baseline plus one variant per pool entry.
    fn push_family(
        &self,
        out: &mut Vec<Variant>,
        endpoint_id: &str,
        base_path: &str,
        required: &[&Parameter],
        pool: &[&Parameter],
    ) {
        out.push(self.build_variant(endpoint_id, base_path, required, None));
        for optional in pool {
            out.push(self.build_variant(endpoint_id, base_path, required, Some(*optional)));
        }
    }

    fn build_variant(
        &self,
        endpoint_id: &str,
        base_path: &str,
        required: &[&Parameter],
        optional: Option<&Parameter>,
    ) -> Variant {
        let mut path = format!("{}/", base_path);
        for param in required {
            let value = match self.resolver.resolve(endpoint_id, &param.name) {
                Some(value) => value,
                None => {
                    warn!(
                        endpoint = endpoint_id,
                        parameter = %param.name,
                        "no default value for required parameter"
                    );
                    "".into()
                }
            };
            path.push_str(&format!("{}/{}/", param.name, value));
        }

        let query = optional
            .map(|param| {
                let value = self.resolver.resolve_or(endpoint_id, &param.name, "");
                format!("{}={}", param.name, value)
            })
            .unwrap_or_default();

        let variant = Variant {
            path,
            query,
            required_params: required.iter().map(|p| (*p).clone()).collect(),
        };
        debug!(endpoint = endpoint_id, url = %variant.url(), "generated variant");
        variant
    }
}

/// Groups the required parameters according to `mode`.
///
/// Returns no combination when there are no required parameters.
pub fn required_combinations(mode: RequiredMode, required: &[Parameter]) -> Vec<Vec<&Parameter>> {
    if required.is_empty() {
        return Vec::new();
    }
    match mode {
        RequiredMode::AllRequired => vec![required.iter().collect()],
        RequiredMode::OneOfRequired => required.iter().map(|p| vec![p]).collect(),
    }
}
