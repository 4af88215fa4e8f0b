//! Respcheck Application - Named checks and use cases
//!
//! This crate evaluates declarative checks against a response snapshot and
//! reports every outcome through the ports the host provides.

pub mod checks;
pub mod description;
pub mod error;
pub mod ports;
pub mod registry;
pub mod use_cases;

pub use checks::ResponseTests;
pub use description::DescriptionSlot;
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{
    Clock, TestReporter, VariableError, VariableRepository, VariableSnapshot, VariableStore,
};
pub use registry::{Args, CheckHandler, CheckRegistry};
pub use use_cases::{RunCheckSuite, SyncVariables};
