//! Variable store port
//!
//! The host's key-value store that outlives a single check call.

use std::collections::BTreeMap;

use serde_json::Value;

/// All variables of a store, keyed by name.
pub type VariableSnapshot = BTreeMap<String, Value>;

/// Named variables shared between checks of a session.
pub trait VariableStore {
    /// Returns the value stored under `name`, if any.
    fn get(&self, name: &str) -> Option<Value>;

    /// Stores `value` under `name`, replacing any previous value.
    fn set(&mut self, name: &str, value: Value);

    /// Removes `name`, returning its previous value.
    fn unset(&mut self, name: &str) -> Option<Value>;

    /// Returns every variable currently stored.
    fn snapshot(&self) -> VariableSnapshot;

    /// Replaces the whole content of the store.
    fn restore(&mut self, snapshot: VariableSnapshot) {
        for name in self.snapshot().into_keys() {
            self.unset(&name);
        }
        for (name, value) in snapshot {
            self.set(&name, value);
        }
    }
}

impl VariableStore for VariableSnapshot {
    fn get(&self, name: &str) -> Option<Value> {
        BTreeMap::get(self, name).cloned()
    }

    fn set(&mut self, name: &str, value: Value) {
        self.insert(name.to_string(), value);
    }

    fn unset(&mut self, name: &str) -> Option<Value> {
        self.remove(name)
    }

    fn snapshot(&self) -> VariableSnapshot {
        self.clone()
    }
}
