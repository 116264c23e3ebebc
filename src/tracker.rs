//! Cross-template value tracking.
//!
//! Only paths some consumer has declared a dependency on are tracked. Each
//! tracked path keeps every value it has produced, in generation order, for
//! the whole run. Lists are never pruned.

use crate::path::FieldPath;
use ahash::AHashMap;
use serde_json::Value;

/// Historical values of the tracked paths of one producer template
#[derive(Debug, Default)]
pub struct ValueTracker {
    values: AHashMap<FieldPath, Vec<Value>>,
}

impl ValueTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a path as tracked. Idempotent.
    pub fn track(&mut self, path: &FieldPath) {
        self.values.entry(path.clone()).or_default();
    }

    pub fn tracks(&self, path: &FieldPath) -> bool {
        self.values.contains_key(path)
    }

    /// Append a produced value, tracking the path if it was not already
    pub fn add(&mut self, path: &FieldPath, value: Value) {
        self.values.entry(path.clone()).or_default().push(value);
    }

    /// All values produced so far at `path` (empty when untracked)
    pub fn get(&self, path: &FieldPath) -> &[Value] {
        self.values.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Tracked paths
    pub fn paths(&self) -> impl Iterator<Item = &FieldPath> {
        self.values.keys()
    }
}

/// One [`ValueTracker`] per producer template name
#[derive(Debug, Default)]
pub struct TrackerRegistry {
    trackers: AHashMap<String, ValueTracker>,
}

impl TrackerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tracker(&self, template: &str) -> Option<&ValueTracker> {
        self.trackers.get(template)
    }

    pub fn tracker_mut(&mut self, template: &str) -> &mut ValueTracker {
        self.trackers.entry(template.to_string()).or_default()
    }

    /// Declare that some consumer reads `template`'s values at `path`
    pub fn track(&mut self, template: &str, path: &FieldPath) {
        self.tracker_mut(template).track(path);
    }

    pub fn tracks(&self, template: &str, path: &FieldPath) -> bool {
        self.tracker(template).is_some_and(|t| t.tracks(path))
    }

    pub fn add(&mut self, template: &str, path: &FieldPath, value: Value) {
        self.tracker_mut(template).add(path, value);
    }

    pub fn values(&self, template: &str, path: &FieldPath) -> &[Value] {
        self.tracker(template).map(|t| t.get(path)).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_track_is_idempotent() {
        let mut tracker = ValueTracker::new();
        let path = FieldPath::parse("id");
        tracker.track(&path);
        tracker.add(&path, json!(1));
        tracker.track(&path);
        assert!(tracker.tracks(&path));
        assert_eq!(tracker.get(&path), &[json!(1)]);
    }

    #[test]
    fn test_add_auto_tracks() {
        let mut tracker = ValueTracker::new();
        let path = FieldPath::parse("a.b");
        assert!(!tracker.tracks(&path));
        tracker.add(&path, json!("x"));
        tracker.add(&path, json!("y"));
        assert!(tracker.tracks(&path));
        assert_eq!(tracker.get(&path), &[json!("x"), json!("y")]);
    }

    #[test]
    fn test_untracked_path_is_empty() {
        let tracker = ValueTracker::new();
        assert!(tracker.get(&FieldPath::parse("missing")).is_empty());
    }

    #[test]
    fn test_registry_per_template() {
        let mut registry = TrackerRegistry::new();
        let path = FieldPath::parse("id");
        registry.track("users", &path);
        registry.add("users", &path, json!(7));

        assert!(registry.tracks("users", &path));
        assert!(!registry.tracks("orders", &path));
        assert_eq!(registry.values("users", &path), &[json!(7)]);
        assert!(registry.values("orders", &path).is_empty());
    }
}
