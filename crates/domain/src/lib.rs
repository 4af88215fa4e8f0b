//! Respcheck Domain - Core assertion types
//!
//! This crate defines the domain model for respcheck: response snapshots,
//! field keys, whitelists, checks and their outcomes.
//! All types here are pure Rust with no I/O dependencies.

pub mod error;
pub mod fields;
pub mod response;
pub mod settings;
pub mod testing;
pub mod whitelist;

pub use error::{DomainError, DomainResult};
pub use fields::{generate_entries, generate_keys, resolve_path, validate_path};
pub use response::{ResponseSnapshot, StatusCode};
pub use settings::{CheckSettings, DEFAULT_DESCRIPTION_VARIABLE};
pub use testing::{
    Check, CheckStep, CheckSuite, ComparisonOperator, TestOutcome, TestReport, display_value,
    ensure_not_empty, values_equal,
};
pub use whitelist::{MatchMode, Whitelist, find_field_in_keys, in_whitelist};
