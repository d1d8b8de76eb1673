#![deny(missing_docs)]

//! # OpenAPI Document
//!
//! The managed OpenAPI document as a [`SchemaNode`] tree.
//!
//! - **merge**: Operation attribute merging and dotted-key subtree copies.
//! - **responses**: Lifting inline response schemas into the catalog.

pub mod merge;
pub mod responses;

use crate::error::{AppError, AppResult};
use crate::schema::{ObjectMap, SchemaCatalog, SchemaNode};
use tracing::debug;

pub use merge::{MergeReport, PathOperationMap};
pub use responses::{default_status_names, LiftedSchema};

/// Top-level key holding the generated path templates.
pub const PATH_TEMPLATES_KEY: &str = "x-path-templates";

/// An OpenAPI document owned by one run.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecDocument {
    root: SchemaNode,
}

impl Default for SpecDocument {
    /// A document with an empty `paths` section.
    fn default() -> Self {
        let mut root = ObjectMap::new();
        root.insert("paths".to_string(), SchemaNode::object());
        Self {
            root: SchemaNode::Object(root),
        }
    }
}

impl SpecDocument {
    /// Wraps a tree. The root must be an object.
    pub fn from_node(root: SchemaNode) -> AppResult<Self> {
        if !root.is_object() {
            return Err(AppError::Yaml(format!(
                "document root must be a mapping, found {}",
                root.kind()
            )));
        }
        Ok(Self { root })
    }

    /// Parses a YAML (or JSON) document. An empty document yields [`SpecDocument::default`].
    ///
    /// Scalar mapping keys such as unquoted status codes are read as strings.
    pub fn from_yaml_str(yaml: &str) -> AppResult<Self> {
        let value: serde_yaml::Value = serde_yaml::from_str(yaml)?;
        match value {
            serde_yaml::Value::Null => Ok(Self::default()),
            value => Self::from_node(SchemaNode::from(yaml_to_json(value)?)),
        }
    }

    /// Serializes the document to YAML.
    pub fn to_yaml_string(&self) -> AppResult<String> {
        Ok(serde_yaml::to_string(&self.root)?)
    }

    /// The document tree.
    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    /// Consumes the document, returning its tree.
    pub fn into_node(self) -> SchemaNode {
        self.root
    }

    /// The `paths` section, if present.
    pub fn paths(&self) -> Option<&ObjectMap> {
        self.root.get("paths").and_then(SchemaNode::as_object)
    }

    pub(crate) fn paths_mut(&mut self) -> Option<&mut ObjectMap> {
        self.root
            .as_object_mut()
            .and_then(|root| root.get_mut("paths"))
            .and_then(SchemaNode::as_object_mut)
    }

    /// The path templates recorded under [`PATH_TEMPLATES_KEY`].
    pub fn path_templates(&self) -> Vec<&str> {
        self.root
            .get(PATH_TEMPLATES_KEY)
            .and_then(SchemaNode::as_array)
            .map(|items| items.iter().filter_map(SchemaNode::as_str).collect())
            .unwrap_or_default()
    }

    /// Prepends `templates` to the path template list, skipping templates already
    /// listed. Returns how many were added.
    pub fn add_path_templates<I, S>(&mut self, templates: I) -> AppResult<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let root = self
            .root
            .as_object_mut()
            .ok_or_else(|| AppError::NotAnObject(String::new()))?;
        let slot = root
            .entry(PATH_TEMPLATES_KEY.to_string())
            .or_insert_with(|| SchemaNode::Array(Vec::new()));
        let SchemaNode::Array(existing) = slot else {
            return Err(AppError::General(format!(
                "'{}' must be a list, found {}",
                PATH_TEMPLATES_KEY,
                slot.kind()
            )));
        };

        let mut added: Vec<SchemaNode> = Vec::new();
        for template in templates {
            let node = SchemaNode::string(template.as_ref());
            if !existing.contains(&node) && !added.contains(&node) {
                added.push(node);
            }
        }
        let count = added.len();
        debug!(count, "adding path templates");
        added.append(existing);
        *existing = added;
        Ok(count)
    }

    /// Lends the `components.schemas` catalog to `f`, creating it when absent.
    pub fn with_catalog<R>(&mut self, f: impl FnOnce(&mut SchemaCatalog) -> R) -> AppResult<R> {
        let mut catalog = self.take_catalog()?;
        let result = f(&mut catalog);
        self.restore_catalog(catalog)?;
        Ok(result)
    }

    /// A copy of the current catalog.
    pub fn catalog(&self) -> SchemaCatalog {
        self.root
            .get("components")
            .and_then(|c| c.get("schemas"))
            .and_then(SchemaNode::as_object)
            .cloned()
            .map(SchemaCatalog::from_entries)
            .unwrap_or_default()
    }

    /// Moves the catalog out, leaving an empty mapping in place so its key
    /// position is kept.
    fn take_catalog(&mut self) -> AppResult<SchemaCatalog> {
        let slot = self.schemas_slot()?;
        Ok(SchemaCatalog::from_entries(std::mem::take(slot)))
    }

    fn restore_catalog(&mut self, catalog: SchemaCatalog) -> AppResult<()> {
        *self.schemas_slot()? = catalog.into_entries();
        Ok(())
    }

    fn schemas_slot(&mut self) -> AppResult<&mut ObjectMap> {
        let root = self
            .root
            .as_object_mut()
            .ok_or_else(|| AppError::NotAnObject(String::new()))?;
        let components = root
            .entry("components".to_string())
            .or_insert_with(SchemaNode::object)
            .as_object_mut()
            .ok_or_else(|| AppError::NotAnObject("components".into()))?;
        components
            .entry("schemas".to_string())
            .or_insert_with(SchemaNode::object)
            .as_object_mut()
            .ok_or_else(|| AppError::NotAnObject("components.schemas".into()))
    }
}

fn yaml_to_json(value: serde_yaml::Value) -> AppResult<serde_json::Value> {
    use serde_yaml::Value as Yaml;
    Ok(match value {
        Yaml::Null => serde_json::Value::Null,
        Yaml::Bool(b) => serde_json::Value::Bool(b),
        Yaml::Number(n) => serde_json::to_value(&n)?,
        Yaml::String(s) => serde_json::Value::String(s),
        Yaml::Sequence(items) => serde_json::Value::Array(
            items.into_iter().map(yaml_to_json).collect::<AppResult<_>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut object = serde_json::Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                let key = match key {
                    Yaml::String(s) => s,
                    Yaml::Number(n) => n.to_string(),
                    Yaml::Bool(b) => b.to_string(),
                    other => {
                        return Err(AppError::Yaml(format!(
                            "unsupported mapping key: {:?}",
                            other
                        )))
                    }
                };
                object.insert(key, yaml_to_json(value)?);
            }
            serde_json::Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}
