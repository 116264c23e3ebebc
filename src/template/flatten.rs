//! Template flattening into ordered leaf paths.
//!
//! Traversal follows document order. A value is a leaf when it is a
//! generator spec (never recursed into, whatever it contains), an array,
//! an empty object or a scalar; any other object is descended into.

use crate::generator::is_generator_spec;
use crate::path::FieldPath;
use serde_json::{Map, Value};

/// One template's leaves in production order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlatTemplate {
    leaves: Vec<(FieldPath, Value)>,
}

impl FlatTemplate {
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &Value)> {
        self.leaves.iter().map(|(path, spec)| (path, spec))
    }

    pub fn paths(&self) -> impl Iterator<Item = &FieldPath> {
        self.leaves.iter().map(|(path, _)| path)
    }

    pub fn get(&self, path: &FieldPath) -> Option<&Value> {
        self.leaves
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, spec)| spec)
    }

    /// Rebuild a nested document by writing every leaf back at its path
    pub fn unflatten(&self) -> Value {
        let mut doc = Value::Object(Map::new());
        for (path, spec) in &self.leaves {
            path.set(&mut doc, spec.clone());
        }
        doc
    }
}

/// Flatten a template document.
///
/// A non-object root is a single leaf at the root path.
pub fn flatten(doc: &Value) -> FlatTemplate {
    let mut leaves = Vec::new();
    match doc {
        Value::Object(map) => flatten_into(map, &FieldPath::root(), &mut leaves),
        other => leaves.push((FieldPath::root(), other.clone())),
    }
    FlatTemplate { leaves }
}

fn flatten_into(map: &Map<String, Value>, prefix: &FieldPath, leaves: &mut Vec<(FieldPath, Value)>) {
    for (key, value) in map {
        let path = prefix.child(key);
        match value {
            Value::Object(inner) if !inner.is_empty() && !is_generator_spec(value) => {
                flatten_into(inner, &path, leaves);
            }
            _ => leaves.push((path, value.clone())),
        }
    }
}
