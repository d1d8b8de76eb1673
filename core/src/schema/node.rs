#![deny(missing_docs)]

//! # Schema Nodes
//!
//! A tagged tree able to hold any fragment of an OpenAPI document, including the
//! whole document. Object key order is preserved.
//!
//! `{"$ref": "#/components/schemas/Name"}` is read as [`SchemaNode::Reference`] and
//! written back in the same form. Any other `$ref` stays a plain object.

use indexmap::IndexMap;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

/// JSON Pointer prefix of component schema references.
pub const SCHEMA_REF_PREFIX: &str = "#/components/schemas/";

/// Ordered object members.
pub type ObjectMap = IndexMap<String, SchemaNode>;

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// `null`
    Null,
    /// `true` / `false`
    Bool(bool),
    /// Integer or float; `1` and `1.0` are different values.
    Number(Number),
    /// Text.
    String(String),
}

/// One node of a document tree.
#[derive(Debug, Clone)]
pub enum SchemaNode {
    /// Mapping of names to nodes, insertion order preserved.
    Object(ObjectMap),
    /// Ordered sequence.
    Array(Vec<SchemaNode>),
    /// Leaf value.
    Scalar(Scalar),
    /// Pointer to a named entry of the schema catalog.
    Reference(String),
}

impl SchemaNode {
    /// An empty object.
    pub fn object() -> Self {
        SchemaNode::Object(ObjectMap::new())
    }

    /// A string scalar.
    pub fn string(value: impl Into<String>) -> Self {
        SchemaNode::Scalar(Scalar::String(value.into()))
    }

    /// A reference to the catalog entry `name`.
    pub fn reference(name: impl Into<String>) -> Self {
        SchemaNode::Reference(name.into())
    }

    /// Object members, if this node is an object.
    pub fn as_object(&self) -> Option<&ObjectMap> {
        match self {
            SchemaNode::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Mutable object members, if this node is an object.
    pub fn as_object_mut(&mut self) -> Option<&mut ObjectMap> {
        match self {
            SchemaNode::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Elements, if this node is an array.
    pub fn as_array(&self) -> Option<&Vec<SchemaNode>> {
        match self {
            SchemaNode::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Text, if this node is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SchemaNode::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    /// Target name, if this node is a reference.
    pub fn as_reference(&self) -> Option<&str> {
        match self {
            SchemaNode::Reference(name) => Some(name),
            _ => None,
        }
    }

    /// Member `key` of an object node.
    pub fn get(&self, key: &str) -> Option<&SchemaNode> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Whether this node is an (inline) object.
    pub fn is_object(&self) -> bool {
        matches!(self, SchemaNode::Object(_))
    }

    /// Short kind name for log and error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            SchemaNode::Object(_) => "object",
            SchemaNode::Array(_) => "array",
            SchemaNode::Scalar(_) => "scalar",
            SchemaNode::Reference(_) => "reference",
        }
    }
}

impl Default for SchemaNode {
    fn default() -> Self {
        SchemaNode::object()
    }
}

/// Structural equality.
///
/// - Objects: same key set, values pairwise equal; key order is ignored.
/// - Arrays: same length, elements equal at the same index.
/// - Scalars: same type and value.
/// - References: same target name.
pub fn structural_equal(a: &SchemaNode, b: &SchemaNode) -> bool {
    match (a, b) {
        (SchemaNode::Object(left), SchemaNode::Object(right)) => {
            left.len() == right.len()
                && left.iter().all(|(key, value)| {
                    right
                        .get(key)
                        .is_some_and(|other| structural_equal(value, other))
                })
        }
        (SchemaNode::Array(left), SchemaNode::Array(right)) => {
            left.len() == right.len()
                && left
                    .iter()
                    .zip(right.iter())
                    .all(|(x, y)| structural_equal(x, y))
        }
        (SchemaNode::Scalar(left), SchemaNode::Scalar(right)) => left == right,
        (SchemaNode::Reference(left), SchemaNode::Reference(right)) => left == right,
        _ => false,
    }
}

impl PartialEq for SchemaNode {
    fn eq(&self, other: &Self) -> bool {
        structural_equal(self, other)
    }
}

/// Extracts the catalog name from a `#/components/schemas/{name}` pointer.
pub fn parse_schema_ref(ref_str: &str) -> Option<String> {
    let name = ref_str.strip_prefix(SCHEMA_REF_PREFIX)?;
    if name.is_empty() || name.contains('/') {
        return None;
    }
    Some(decode_pointer_segment(name))
}

/// Builds the `#/components/schemas/{name}` pointer for a catalog name.
pub fn schema_ref(name: &str) -> String {
    format!("{}{}", SCHEMA_REF_PREFIX, encode_pointer_segment(name))
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`).
fn decode_pointer_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

fn encode_pointer_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

impl From<Value> for SchemaNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => SchemaNode::Scalar(Scalar::Null),
            Value::Bool(b) => SchemaNode::Scalar(Scalar::Bool(b)),
            Value::Number(n) => SchemaNode::Scalar(Scalar::Number(n)),
            Value::String(s) => SchemaNode::Scalar(Scalar::String(s)),
            Value::Array(items) => SchemaNode::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                if map.len() == 1 {
                    if let Some(name) = map
                        .get("$ref")
                        .and_then(Value::as_str)
                        .and_then(parse_schema_ref)
                    {
                        return SchemaNode::Reference(name);
                    }
                }
                SchemaNode::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<&SchemaNode> for Value {
    fn from(node: &SchemaNode) -> Self {
        match node {
            SchemaNode::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::from(v)))
                    .collect(),
            ),
            SchemaNode::Array(items) => Value::Array(items.iter().map(Value::from).collect()),
            SchemaNode::Scalar(Scalar::Null) => Value::Null,
            SchemaNode::Scalar(Scalar::Bool(b)) => Value::Bool(*b),
            SchemaNode::Scalar(Scalar::Number(n)) => Value::Number(n.clone()),
            SchemaNode::Scalar(Scalar::String(s)) => Value::String(s.clone()),
            SchemaNode::Reference(name) => {
                let mut map = serde_json::Map::new();
                map.insert("$ref".to_string(), Value::String(schema_ref(name)));
                Value::Object(map)
            }
        }
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SchemaNode::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (key, value) in map {
                    out.serialize_entry(key, value)?;
                }
                out.end()
            }
            SchemaNode::Array(items) => {
                let mut out = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    out.serialize_element(item)?;
                }
                out.end()
            }
            SchemaNode::Scalar(Scalar::Null) => serializer.serialize_unit(),
            SchemaNode::Scalar(Scalar::Bool(b)) => serializer.serialize_bool(*b),
            SchemaNode::Scalar(Scalar::Number(n)) => n.serialize(serializer),
            SchemaNode::Scalar(Scalar::String(s)) => serializer.serialize_str(s),
            SchemaNode::Reference(name) => {
                let mut out = serializer.serialize_map(Some(1))?;
                out.serialize_entry("$ref", &schema_ref(name))?;
                out.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for SchemaNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(SchemaNode::from)
    }
}
