//! In-process adapters for the application ports.

mod collecting_reporter;
mod memory_store;
mod system_clock;

pub use collecting_reporter::CollectingReporter;
pub use memory_store::InMemoryVariableStore;
pub use system_clock::SystemClock;
