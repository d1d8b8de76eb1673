#![deny(missing_docs)]

//! # Document Merging
//!
//! Enriches an existing document without adding new paths or operations, and
//! copies whole sections between documents by dotted key.

use crate::document::SpecDocument;
use crate::error::AppResult;
use crate::schema::{resolve_path, set_path, split_dotted, ObjectMap, SchemaNode};
use indexmap::IndexMap;
use tracing::{debug, warn};

/// Operation attributes keyed by path, then by lower-case HTTP method.
pub type PathOperationMap = IndexMap<String, IndexMap<String, ObjectMap>>;

/// Operation keys of an OpenAPI path item.
const HTTP_METHODS: [&str; 8] = [
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// What [`SpecDocument::merge_operation_data`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// `(path, method)` pairs whose attributes were updated.
    pub merged: Vec<(String, String)>,
    /// Document operations for which no data was supplied.
    pub without_data: Vec<(String, String)>,
    /// Supplied operations the document does not define; never added.
    pub unmatched: Vec<(String, String)>,
}

impl SpecDocument {
    /// Shallow-merges supplied attributes into existing operations.
    ///
    /// Supplied keys overwrite keys of the same name; other keys are kept. Paths
    /// and methods missing from the document are reported, never created.
    pub fn merge_operation_data(&mut self, data: &PathOperationMap) -> MergeReport {
        let mut report = MergeReport::default();

        if let Some(paths) = self.paths_mut() {
            for (path, item) in paths.iter_mut() {
                let Some(operations) = item.as_object_mut() else {
                    continue;
                };
                let supplied = data.get(path);
                if supplied.is_none() {
                    warn!(path = %path, "no data mapping set for path");
                }

                for (method, operation) in operations.iter_mut() {
                    if !HTTP_METHODS.contains(&method.as_str()) {
                        continue;
                    }
                    let key = (path.clone(), method.clone());
                    let Some(attributes) = supplied.and_then(|ops| ops.get(method)) else {
                        if supplied.is_some() {
                            warn!(path = %path, method = %method, "no data set for operation");
                        }
                        report.without_data.push(key);
                        continue;
                    };
                    let Some(existing) = operation.as_object_mut() else {
                        warn!(path = %path, method = %method, "operation is not a mapping, skipping");
                        report.without_data.push(key);
                        continue;
                    };
                    for (name, value) in attributes {
                        existing.insert(name.clone(), value.clone());
                    }
                    report.merged.push(key);
                }
            }
        } else {
            warn!("document has no paths section");
        }

        let paths = self.paths();
        for (path, methods) in data {
            for method in methods.keys() {
                let defined = paths
                    .and_then(|p| p.get(path))
                    .and_then(|item| item.get(method))
                    .is_some();
                if !defined {
                    warn!(path = %path, method = %method, "operation not defined in document, skipping");
                    report.unmatched.push((path.clone(), method.clone()));
                }
            }
        }

        debug!(
            merged = report.merged.len(),
            unmatched = report.unmatched.len(),
            "merged operation data"
        );
        report
    }

    /// Copies the value at `dotted_key` in `source` to the same location in this
    /// document, creating intermediate objects as needed.
    ///
    /// Returns `Ok(false)` when `source` has nothing at `dotted_key`; the document
    /// is unchanged then.
    pub fn overwrite_subtree(&mut self, dotted_key: &str, source: &SchemaNode) -> AppResult<bool> {
        let keys = split_dotted(dotted_key);
        let Some(value) = resolve_path(source, &keys) else {
            warn!(key = dotted_key, "key not found in source document");
            return Ok(false);
        };
        debug!(key = dotted_key, "overwriting subtree");
        set_path(&mut self.root, &keys, value.clone())?;
        Ok(true)
    }
}
