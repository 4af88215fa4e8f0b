//! One-shot test description override.
//!
//! A description set through the store names the next check that asks for
//! one and is then cleared.

use respcheck_domain::display_value;
use serde_json::Value;

use crate::ports::VariableStore;

/// The reserved variable holding the pending description.
pub struct DescriptionSlot<'a> {
    store: &'a mut dyn VariableStore,
    variable: &'a str,
}

impl<'a> DescriptionSlot<'a> {
    /// Opens the slot stored under `variable`.
    pub fn new(store: &'a mut dyn VariableStore, variable: &'a str) -> Self {
        Self { store, variable }
    }

    /// Stores the description for the next check. The last write wins.
    pub fn set(&mut self, description: impl Into<String>) {
        self.store
            .set(self.variable, Value::String(description.into()));
    }

    /// Returns the pending description without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<String> {
        self.store.get(self.variable).and_then(|value| pending(&value))
    }

    /// Consumes the pending description, falling back to `default`.
    ///
    /// The variable is cleared only when a description was actually taken;
    /// otherwise the store is left untouched.
    pub fn take(&mut self, default: impl Into<String>) -> String {
        match self.peek() {
            Some(description) => {
                self.store.unset(self.variable);
                tracing::trace!(%description, "consumed pending test description");
                description
            }
            None => default.into(),
        }
    }
}

/// Falsy values (`null`, `false`, zero and the empty string) leave the
/// default name in place.
fn pending(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.is_empty() => None,
        other => Some(display_value(other)),
    }
}
