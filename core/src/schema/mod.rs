#![deny(missing_docs)]

//! # Schema Trees
//!
//! - **node**: The recursive document tree and structural equality.
//! - **path**: Read-only and creating path traversal.
//! - **catalog**: Named schema catalog with deduplication, extraction and
//!   reference consolidation.

pub mod catalog;
pub mod node;
pub mod path;

pub use catalog::{Consolidation, Extraction, Insertion, SchemaCatalog};
pub use node::{parse_schema_ref, schema_ref, structural_equal, ObjectMap, Scalar, SchemaNode};
pub use path::{resolve_path, set_path, split_dotted};
