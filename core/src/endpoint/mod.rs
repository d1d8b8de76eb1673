#![deny(missing_docs)]

//! # Endpoints
//!
//! - **models**: Parameter, variant and endpoint value objects.
//! - **matcher**: Ordered exact / pattern matcher rules.
//! - **defaults**: Sample value resolution with per-endpoint overrides.
//! - **combinations**: Request variant generation.

pub mod combinations;
pub mod defaults;
pub mod matcher;
pub mod models;

pub use combinations::{required_combinations, CombinationGenerator, RequiredMode};
pub use defaults::{DefaultValueResolver, DefaultsConfig, OverrideRule, SampleValue, ValueMode};
pub use matcher::Matcher;
pub use models::{Endpoint, Parameter, Variant};
