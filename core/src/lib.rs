#![deny(missing_docs)]

//! # Docspec Core
//!
//! Core library for reverse-engineering an OpenAPI document from scraped API
//! documentation: endpoint variants, schema catalogs and document merging.

/// Shared error types.
pub mod error;

/// Endpoint models, sample values and request variant generation.
pub mod endpoint;

/// Schema trees, path traversal and the named schema catalog.
pub mod schema;

/// The managed OpenAPI document.
pub mod document;

/// Operation metadata derived from endpoints.
pub mod annotate;

/// Documentation page scraping.
pub mod docs;

pub use annotate::{operation_id, AnnotationRules, TagRule};
pub use docs::{endpoint_links, EndpointPage};
pub use document::{default_status_names, LiftedSchema, MergeReport, PathOperationMap, SpecDocument};
pub use endpoint::{
    CombinationGenerator, DefaultValueResolver, DefaultsConfig, Endpoint, Matcher, Parameter,
    SampleValue, ValueMode, Variant,
};
pub use error::{AppError, AppResult};
pub use schema::{Consolidation, Extraction, Insertion, SchemaCatalog, SchemaNode};
