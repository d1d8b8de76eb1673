#![deny(missing_docs)]

//! # Documentation Scraping
//!
//! - **index**: Endpoint links on the documentation index.
//! - **page**: One endpoint's method, paths, description and parameters.

pub mod index;
pub mod page;

pub use index::endpoint_links;
pub use page::{endpoint_id, parse_type_annotation, EndpointPage, SECRET_KEY_PARAM};
