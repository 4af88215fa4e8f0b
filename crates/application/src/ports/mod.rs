//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the assertion core and the host that
//! executed the request. Each port is a trait implemented by the host or by
//! adapters in the infrastructure layer.

mod clock;
mod reporter;
mod variable_repository;
mod variable_store;

pub use clock::Clock;
pub use reporter::TestReporter;
pub use variable_repository::{VariableError, VariableRepository};
pub use variable_store::{VariableSnapshot, VariableStore};
