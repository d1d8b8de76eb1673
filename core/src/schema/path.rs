//! # Path Traversal
//!
//! Object-key paths into a [`SchemaNode`] tree. Dotted keys such as
//! `components.securitySchemes` split into one segment per key.

use crate::error::{AppError, AppResult};
use crate::schema::node::SchemaNode;

/// Splits a dotted key into path segments.
pub fn split_dotted(key: &str) -> Vec<&str> {
    key.split('.').collect()
}

/// Read-only lookup of the node at `path`.
///
/// Returns `None` when a segment is missing or a non-object node is met on the
/// way. The tree is never modified.
pub fn resolve_path<'a, S: AsRef<str>>(root: &'a SchemaNode, path: &[S]) -> Option<&'a SchemaNode> {
    path.iter()
        .try_fold(root, |node, segment| node.get(segment.as_ref()))
}

/// Assigns `value` at `path`, creating empty objects for missing intermediate
/// segments.
///
/// An empty path replaces `root`. Meeting an existing non-object node before
/// the final segment is an [`AppError::NotAnObject`]; nothing is modified then.
pub fn set_path<S: AsRef<str>>(root: &mut SchemaNode, path: &[S], value: SchemaNode) -> AppResult<()> {
    let Some((last, parents)) = path.split_last() else {
        *root = value;
        return Ok(());
    };

    // check before creating anything so a failed assignment leaves no trace
    let mut probe = Some(&*root);
    for (depth, segment) in parents.iter().enumerate() {
        match probe {
            Some(SchemaNode::Object(map)) => probe = map.get(segment.as_ref()),
            Some(_) => return Err(not_an_object(&path[..depth])),
            None => break,
        }
    }
    if let Some(node) = probe {
        if !node.is_object() {
            return Err(not_an_object(parents));
        }
    }

    let mut node = root;
    for segment in parents {
        let map = node
            .as_object_mut()
            .ok_or_else(|| not_an_object(parents))?;
        node = map
            .entry(segment.as_ref().to_string())
            .or_insert_with(SchemaNode::object);
    }
    node.as_object_mut()
        .ok_or_else(|| not_an_object(parents))?
        .insert(last.as_ref().to_string(), value);
    Ok(())
}

fn not_an_object<S: AsRef<str>>(path: &[S]) -> AppError {
    let joined: Vec<&str> = path.iter().map(AsRef::as_ref).collect();
    AppError::NotAnObject(joined.join("."))
}
