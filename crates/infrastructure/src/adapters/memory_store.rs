//! In-memory variable store.

use std::collections::BTreeMap;

use respcheck_application::ports::{VariableSnapshot, VariableStore};
use serde_json::Value;

/// A variable store that lives as long as the session object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryVariableStore {
    variables: BTreeMap<String, Value>,
}

impl InMemoryVariableStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Whether the store holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl From<VariableSnapshot> for InMemoryVariableStore {
    fn from(variables: VariableSnapshot) -> Self {
        Self { variables }
    }
}

impl VariableStore for InMemoryVariableStore {
    fn get(&self, name: &str) -> Option<Value> {
        self.variables.get(name).cloned()
    }

    fn set(&mut self, name: &str, value: Value) {
        self.variables.insert(name.to_string(), value);
    }

    fn unset(&mut self, name: &str) -> Option<Value> {
        self.variables.remove(name)
    }

    fn snapshot(&self) -> VariableSnapshot {
        self.variables.clone()
    }

    fn restore(&mut self, snapshot: VariableSnapshot) {
        self.variables = snapshot;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_get_unset() {
        let mut store = InMemoryVariableStore::new();
        store.set("userId", json!(42));
        assert_eq!(store.get("userId"), Some(json!(42)));

        store.set("userId", json!(43));
        assert_eq!(store.len(), 1);

        assert_eq!(store.unset("userId"), Some(json!(43)));
        assert_eq!(store.unset("userId"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn restore_replaces_content() {
        let mut store = InMemoryVariableStore::new();
        store.set("stale", json!(true));

        let mut snapshot = VariableSnapshot::new();
        snapshot.insert("fresh".to_string(), json!("x"));
        store.restore(snapshot.clone());

        assert_eq!(store.snapshot(), snapshot);
    }
}
