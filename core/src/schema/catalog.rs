#![deny(missing_docs)]

//! # Schema Catalog
//!
//! The deduplicated set of named, reusable schemas (`components.schemas`).
//!
//! A name, once inserted, is never overwritten. Inserting a structurally
//! different tree under an existing name is reported as a conflict and the
//! original entry is kept.

use crate::schema::node::{structural_equal, ObjectMap, SchemaNode};
use crate::schema::path::{resolve_path, set_path, split_dotted};
use tracing::{debug, error, warn};

/// Result of [`SchemaCatalog::add_schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// The name was new and the schema was stored.
    Inserted,
    /// The name existed with an identical structure.
    Unchanged,
    /// The name existed with a different structure; the existing entry was kept.
    Conflict,
}

/// Result of [`SchemaCatalog::extract_schema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extraction {
    /// The node was registered and its location now holds a reference.
    Extracted(Insertion),
    /// The selector's root schema is not in the catalog.
    MissingRoot,
    /// The selector's property path does not resolve inside the root schema.
    NotFound,
}

/// One inline node replaced by [`SchemaCatalog::consolidate_references`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consolidation {
    /// Catalog entry containing the replaced node.
    pub schema: String,
    /// Path of the replaced node inside that entry.
    pub path: Vec<String>,
    /// Catalog entry the node now references.
    pub target: String,
}

/// Named schemas in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaCatalog {
    entries: ObjectMap,
}

impl SchemaCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps existing entries.
    pub fn from_entries(entries: ObjectMap) -> Self {
        Self { entries }
    }

    /// Gives the entries back.
    pub fn into_entries(self) -> ObjectMap {
        self.entries
    }

    /// Looks up an entry.
    pub fn get(&self, name: &str) -> Option<&SchemaNode> {
        self.entries.get(name)
    }

    /// Whether `name` is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &SchemaNode)> {
        self.entries.iter()
    }

    /// Stores a copy of `node` under `name` unless the name is taken.
    ///
    /// First writer wins: an existing entry is never replaced.
    pub fn add_schema(&mut self, name: &str, node: &SchemaNode) -> Insertion {
        match self.entries.get(name) {
            None => {
                debug!(schema = name, "creating new component schema");
                self.entries.insert(name.to_string(), node.clone());
                Insertion::Inserted
            }
            Some(existing) if structural_equal(existing, node) => Insertion::Unchanged,
            Some(_) => {
                error!(
                    schema = name,
                    "schema already defined with a different structure, keeping the existing one"
                );
                Insertion::Conflict
            }
        }
    }

    /// Moves the node selected by `selector` into the catalog as `canonical_name`.
    ///
    /// `selector` is `RootSchema.prop.prop...`. The node is registered through
    /// [`add_schema`](Self::add_schema) and its location is replaced by a
    /// reference to `canonical_name`, also when registration reports a conflict.
    /// A location that already references `canonical_name` is left as it is and
    /// reported as [`Insertion::Unchanged`].
    pub fn extract_schema(&mut self, selector: &str, canonical_name: &str) -> Extraction {
        let segments = split_dotted(selector);
        let Some((root_name, path)) = segments.split_first() else {
            return Extraction::NotFound;
        };

        let Some(root) = self.entries.get(*root_name) else {
            warn!(schema = *root_name, selector, "schema not found");
            return Extraction::MissingRoot;
        };
        if path.is_empty() {
            warn!(selector, "selector names no property path");
            return Extraction::NotFound;
        }
        let Some(node) = resolve_path(root, path).cloned() else {
            warn!(selector, "selector path not found");
            return Extraction::NotFound;
        };
        if node.as_reference() == Some(canonical_name) {
            debug!(selector, reference = canonical_name, "already extracted");
            return Extraction::Extracted(Insertion::Unchanged);
        }

        let insertion = self.add_schema(canonical_name, &node);
        debug!(schema = *root_name, reference = canonical_name, "updating schema ref");
        if let Some(root) = self.entries.get_mut(*root_name) {
            if let Err(e) = set_path(root, path, SchemaNode::reference(canonical_name)) {
                // unreachable in practice: the path resolved above
                warn!(selector, error = %e, "could not replace extracted node");
            }
        }
        Extraction::Extracted(insertion)
    }

    /// Replaces inline property schemas by references to equal catalog entries.
    ///
    /// Walks the `properties` of every entry. An inline object property, or the
    /// inline `items` of a property, is compared against the catalog in catalog
    /// order and replaced by a reference to the first equal entry. Unmatched
    /// nodes are searched recursively. All comparisons see the catalog as it was
    /// before any replacement.
    pub fn consolidate_references(&mut self) -> Vec<Consolidation> {
        let mut found = Vec::new();
        for (name, schema) in &self.entries {
            let mut path = Vec::new();
            self.collect_replacements(name, schema, &mut path, &mut found);
        }

        for item in &found {
            if let Some(root) = self.entries.get_mut(&item.schema) {
                if let Err(e) = set_path(root, &item.path, SchemaNode::reference(&item.target)) {
                    warn!(schema = %item.schema, error = %e, "could not apply reference");
                }
            }
        }
        found
    }

    fn collect_replacements(
        &self,
        owner: &str,
        node: &SchemaNode,
        path: &mut Vec<String>,
        out: &mut Vec<Consolidation>,
    ) {
        let Some(properties) = node.get("properties").and_then(SchemaNode::as_object) else {
            return;
        };

        for (prop_name, prop) in properties {
            path.push("properties".to_string());
            path.push(prop_name.clone());

            let candidate = match prop.get("items") {
                Some(items) => {
                    path.push("items".to_string());
                    items
                }
                None => prop,
            };

            if candidate.is_object() {
                match self.first_equal(candidate) {
                    Some(target) => {
                        debug!(schema = owner, reference = target, "consolidating inline schema");
                        out.push(Consolidation {
                            schema: owner.to_string(),
                            path: path.clone(),
                            target: target.to_string(),
                        });
                    }
                    None => self.collect_replacements(owner, candidate, path, out),
                }
            }

            if prop.get("items").is_some() {
                path.pop();
            }
            path.pop();
            path.pop();
        }
    }

    fn first_equal(&self, node: &SchemaNode) -> Option<&str> {
        self.entries
            .iter()
            .find(|(_, entry)| structural_equal(entry, node))
            .map(|(name, _)| name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn node(value: Value) -> SchemaNode {
        SchemaNode::from(value)
    }

    fn foo_catalog() -> SchemaCatalog {
        let mut catalog = SchemaCatalog::new();
        catalog.add_schema(
            "Foo",
            &node(json!({"type": "object", "properties": {"x": {"type": "string"}}})),
        );
        catalog
    }

    #[test]
    fn test_add_identical_is_idempotent() {
        let mut catalog = foo_catalog();
        let before = catalog.clone();
        let outcome = catalog.add_schema(
            "Foo",
            &node(json!({"type": "object", "properties": {"x": {"type": "string"}}})),
        );
        assert_eq!(outcome, Insertion::Unchanged);
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_add_conflict_keeps_original() {
        let mut catalog = foo_catalog();
        let outcome = catalog.add_schema(
            "Foo",
            &node(json!({"type": "object", "properties": {"x": {"type": "number"}}})),
        );
        assert_eq!(outcome, Insertion::Conflict);
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            resolve_path(catalog.get("Foo").unwrap(), &["properties", "x", "type"]),
            Some(&SchemaNode::string("string"))
        );
    }

    #[test]
    fn test_add_stores_a_copy() {
        let mut catalog = SchemaCatalog::new();
        let mut original = node(json!({"type": "string"}));
        assert_eq!(catalog.add_schema("S", &original), Insertion::Inserted);
        original = node(json!({"type": "number"}));
        assert_ne!(catalog.get("S"), Some(&original));
    }

    fn response_catalog() -> SchemaCatalog {
        let mut catalog = SchemaCatalog::new();
        catalog.add_schema(
            "GetFooOkResponse",
            &node(json!({
                "type": "object",
                "properties": {
                    "status": {"type": "string"},
                    "data": {
                        "type": "array",
                        "items": {"type": "object", "properties": {"id": {"type": "integer"}}}
                    }
                }
            })),
        );
        catalog
    }

    #[test]
    fn test_extract_schema() {
        let mut catalog = response_catalog();
        let outcome = catalog.extract_schema("GetFooOkResponse.properties.data.items", "FooDTO");

        assert_eq!(outcome, Extraction::Extracted(Insertion::Inserted));
        assert_eq!(
            catalog.get("FooDTO"),
            Some(&node(json!({"type": "object", "properties": {"id": {"type": "integer"}}})))
        );
        assert_eq!(
            resolve_path(
                catalog.get("GetFooOkResponse").unwrap(),
                &["properties", "data", "items"]
            ),
            Some(&SchemaNode::reference("FooDTO"))
        );
    }

    #[test]
    fn test_extract_twice_is_unchanged() {
        let mut catalog = response_catalog();
        assert_eq!(
            catalog.extract_schema("GetFooOkResponse.properties.data.items", "FooDTO"),
            Extraction::Extracted(Insertion::Inserted)
        );
        let before = catalog.clone();
        assert_eq!(
            catalog.extract_schema("GetFooOkResponse.properties.data.items", "FooDTO"),
            Extraction::Extracted(Insertion::Unchanged)
        );
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_extract_missing_root_is_skipped() {
        let mut catalog = response_catalog();
        let before = catalog.clone();
        assert_eq!(
            catalog.extract_schema("GetBarOkResponse.properties.data", "BarDTO"),
            Extraction::MissingRoot
        );
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_extract_unresolved_path_is_skipped() {
        let mut catalog = response_catalog();
        let before = catalog.clone();
        assert_eq!(
            catalog.extract_schema("GetFooOkResponse.properties.nope.items", "NopeDTO"),
            Extraction::NotFound
        );
        assert_eq!(catalog.extract_schema("GetFooOkResponse", "Whole"), Extraction::NotFound);
        assert_eq!(catalog, before);
    }

    #[test]
    fn test_extract_conflict_still_references() {
        let mut catalog = response_catalog();
        catalog.add_schema("FooDTO", &node(json!({"type": "string"})));
        let outcome = catalog.extract_schema("GetFooOkResponse.properties.data.items", "FooDTO");
        assert_eq!(outcome, Extraction::Extracted(Insertion::Conflict));
        assert_eq!(catalog.get("FooDTO"), Some(&node(json!({"type": "string"}))));
        assert_eq!(
            resolve_path(
                catalog.get("GetFooOkResponse").unwrap(),
                &["properties", "data", "items"]
            ),
            Some(&SchemaNode::reference("FooDTO"))
        );
    }

    #[test]
    fn test_consolidate_items_and_properties() {
        let point = json!({"type": "object", "properties": {"x": {"type": "number"}}});
        let mut catalog = SchemaCatalog::new();
        catalog.add_schema("Point", &node(point.clone()));
        catalog.add_schema(
            "Shape",
            &node(json!({
                "type": "object",
                "properties": {
                    "origin": point.clone(),
                    "vertices": {"type": "array", "items": point.clone()},
                    "name": {"type": "string"}
                }
            })),
        );

        let replaced = catalog.consolidate_references();
        assert_eq!(
            replaced,
            vec![
                Consolidation {
                    schema: "Shape".into(),
                    path: vec!["properties".into(), "origin".into()],
                    target: "Point".into(),
                },
                Consolidation {
                    schema: "Shape".into(),
                    path: vec!["properties".into(), "vertices".into(), "items".into()],
                    target: "Point".into(),
                },
            ]
        );
        assert_eq!(
            catalog.get("Shape"),
            Some(&node(json!({
                "type": "object",
                "properties": {
                    "origin": {"$ref": "#/components/schemas/Point"},
                    "vertices": {"type": "array", "items": {"$ref": "#/components/schemas/Point"}},
                    "name": {"type": "string"}
                }
            })))
        );
    }

    #[test]
    fn test_consolidate_first_match_in_catalog_order() {
        let shape = json!({"type": "object", "properties": {"id": {"type": "integer"}}});
        let mut catalog = SchemaCatalog::new();
        catalog.add_schema("First", &node(shape.clone()));
        catalog.add_schema("Second", &node(shape.clone()));
        catalog.add_schema(
            "Holder",
            &node(json!({"type": "object", "properties": {"inner": shape.clone()}})),
        );

        let replaced = catalog.consolidate_references();
        assert_eq!(replaced.len(), 1);
        assert_eq!(replaced[0].target, "First");
    }

    #[test]
    fn test_consolidate_recurses_into_unmatched() {
        let leaf = json!({"type": "object", "properties": {"v": {"type": "boolean"}}});
        let mut catalog = SchemaCatalog::new();
        catalog.add_schema("Leaf", &node(leaf.clone()));
        catalog.add_schema(
            "Outer",
            &node(json!({
                "type": "object",
                "properties": {
                    "middle": {"type": "object", "properties": {"leaf": leaf.clone()}}
                }
            })),
        );

        let replaced = catalog.consolidate_references();
        assert_eq!(
            replaced[0].path,
            vec!["properties", "middle", "properties", "leaf"]
        );
        assert_eq!(
            resolve_path(
                catalog.get("Outer").unwrap(),
                &["properties", "middle", "properties", "leaf"]
            ),
            Some(&SchemaNode::reference("Leaf"))
        );
    }

    #[test]
    fn test_consolidate_skips_existing_references() {
        let mut catalog = SchemaCatalog::new();
        catalog.add_schema("A", &node(json!({"type": "object"})));
        catalog.add_schema(
            "B",
            &node(json!({
                "type": "object",
                "properties": {
                    "a": {"$ref": "#/components/schemas/A"},
                    "list": {"type": "array", "items": {"$ref": "#/components/schemas/A"}}
                }
            })),
        );
        let before = catalog.clone();
        assert!(catalog.consolidate_references().is_empty());
        assert_eq!(catalog, before);
    }
}
