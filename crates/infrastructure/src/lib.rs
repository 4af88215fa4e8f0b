//! Respcheck Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus file loaders for settings,
//! suites and session variables.

pub mod adapters;
pub mod config;
pub mod logging;
pub mod persistence;
pub mod serialization;

pub use adapters::{CollectingReporter, InMemoryVariableStore, SystemClock};
pub use config::{ConfigError, SettingsLoader, SuiteLoader};
pub use logging::init_tracing;
pub use persistence::FileVariableRepository;
pub use serialization::{
    DocumentFormat, SerializationError, from_json_bytes, to_json_stable, to_json_stable_bytes,
};
