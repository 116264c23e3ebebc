//! Dotted field paths addressing values inside nested records.
//!
//! A [`FieldPath`] is an ordered list of object keys. Templates are flattened
//! into paths and records are rebuilt by writing each produced value back at
//! its path, so `get` and `set` must agree exactly on how segments map onto
//! nested objects.

use serde_json::{Map, Value};
use std::fmt;

/// Separator used by the textual form of a path (`a.b.c`)
pub const PATH_SEPARATOR: char = '.';

/// Location of a leaf inside a nested document
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// The empty path, addressing the whole document
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse the dotted textual form. Empty segments are dropped.
    pub fn parse(text: &str) -> Self {
        Self {
            segments: text
                .split(PATH_SEPARATOR)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// A new path extended by one key
    pub fn child(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        Self { segments }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Look up the value at this path, if every segment resolves to an object key
    pub fn get<'a>(&self, doc: &'a Value) -> Option<&'a Value> {
        self.segments
            .iter()
            .try_fold(doc, |current, segment| current.as_object()?.get(segment))
    }

    /// Write `value` at this path, creating intermediate objects as needed.
    ///
    /// A non-object found on the way is replaced by an empty object. Writing
    /// at the root path replaces the whole document.
    pub fn set(&self, doc: &mut Value, value: Value) {
        let Some((last, parents)) = self.segments.split_last() else {
            *doc = value;
            return;
        };

        let mut current = doc;
        for segment in parents {
            current = ensure_object(current)
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
        }
        ensure_object(current).insert(last.clone(), value);
    }
}

fn ensure_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!("value was just replaced by an object"),
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", PATH_SEPARATOR)?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl From<&str> for FieldPath {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_and_display() {
        let path = FieldPath::parse("user.address.city");
        assert_eq!(path.segments(), &["user", "address", "city"]);
        assert_eq!(path.to_string(), "user.address.city");
        assert!(FieldPath::parse("").is_root());
    }

    #[test]
    fn test_set_materializes_objects() {
        let mut doc = json!({});
        FieldPath::parse("a.b.c").set(&mut doc, json!(1));
        FieldPath::parse("a.d").set(&mut doc, json!("x"));
        assert_eq!(doc, json!({"a": {"b": {"c": 1}, "d": "x"}}));
    }

    #[test]
    fn test_set_replaces_scalar_intermediate() {
        let mut doc = json!({"a": 5});
        FieldPath::parse("a.b").set(&mut doc, json!(true));
        assert_eq!(doc, json!({"a": {"b": true}}));
    }

    #[test]
    fn test_get() {
        let doc = json!({"a": {"b": [1, 2]}});
        assert_eq!(FieldPath::parse("a.b").get(&doc), Some(&json!([1, 2])));
        assert_eq!(FieldPath::parse("a.c").get(&doc), None);
        assert_eq!(FieldPath::parse("a.b.c").get(&doc), None);
        assert_eq!(FieldPath::root().get(&doc), Some(&doc));
    }

    #[test]
    fn test_root_set_replaces_document() {
        let mut doc = json!({"a": 1});
        FieldPath::root().set(&mut doc, json!([1]));
        assert_eq!(doc, json!([1]));
    }
}
