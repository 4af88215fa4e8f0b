//! Field keys over a JSON body.
//!
//! A field key is a dot-separated path into the body (`user.address.city`).
//! Array elements are addressed by their decimal index (`items.0.id`).

use serde_json::Value;

use crate::error::{DomainError, DomainResult};

/// Separator between the segments of a field key.
pub const KEY_SEPARATOR: char = '.';

/// Generates every field key of a JSON value.
///
/// The walk is depth-first in property order. Each property at every depth
/// yields one key, so a nested object contributes its own key followed by the
/// keys of its children. Null and scalar values yield no keys.
///
/// ```
/// use respcheck_domain::fields::generate_keys;
/// use serde_json::json;
///
/// let keys = generate_keys(&json!({"user": {"name": "Ann", "age": null}}));
/// assert_eq!(keys, ["user", "user.name", "user.age"]);
/// ```
#[must_use]
pub fn generate_keys(body: &Value) -> Vec<String> {
    generate_entries(body).into_iter().map(|(key, _)| key).collect()
}

/// Generates every field key together with the value it names.
///
/// Keys are the same, and in the same order, as [`generate_keys`]. The value
/// comes from the walk itself, so a property whose name contains the
/// separator (`"@odata.context"`) is still paired with its value even though
/// its key does not resolve through [`resolve_path`].
#[must_use]
pub fn generate_entries(body: &Value) -> Vec<(String, &Value)> {
    let mut entries = Vec::new();
    let mut parents = Vec::new();
    collect_entries(body, &mut parents, &mut entries);
    entries
}

fn collect_entries<'a>(
    value: &'a Value,
    parents: &mut Vec<String>,
    entries: &mut Vec<(String, &'a Value)>,
) {
    match value {
        Value::Object(map) => {
            for (name, child) in map {
                push_entry(name.clone(), child, parents, entries);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                push_entry(index.to_string(), child, parents, entries);
            }
        }
        _ => {}
    }
}

fn push_entry<'a>(
    segment: String,
    child: &'a Value,
    parents: &mut Vec<String>,
    entries: &mut Vec<(String, &'a Value)>,
) {
    parents.push(segment);
    entries.push((parents.join("."), child));
    if is_container(child) {
        collect_entries(child, parents, entries);
    }
    parents.pop();
}

/// Whether a value has properties of its own (object or array).
#[must_use]
pub const fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// Resolves a dotted field path against a JSON value.
///
/// Returns `None` when any segment is missing, when an array segment is not a
/// valid index, or when the walk reaches a scalar before the path ends.
#[must_use]
pub fn resolve_path<'a>(body: &'a Value, path: &str) -> Option<&'a Value> {
    path.split(KEY_SEPARATOR)
        .try_fold(body, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}

/// Checks that a field path is usable for resolution.
///
/// # Errors
///
/// Returns `DomainError::InvalidPath` for an empty path or one with an empty
/// segment (`user..name`, `.name`).
pub fn validate_path(path: &str) -> DomainResult<()> {
    if path.is_empty() || path.split(KEY_SEPARATOR).any(str::is_empty) {
        return Err(DomainError::InvalidPath(path.to_string()));
    }
    Ok(())
}
