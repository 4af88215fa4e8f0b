//! Serialization of settings, suites and variable snapshots.
//!
//! Written JSON is deterministic: keys sorted (via `BTreeMap` sources),
//! 2-space indentation and a trailing newline. Suites and settings may also
//! be read from YAML.

mod format;
mod json;

pub use format::*;
pub use json::*;
