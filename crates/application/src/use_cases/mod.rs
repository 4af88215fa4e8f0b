//! Application use cases (check orchestration).

mod run_check_suite;
mod sync_variables;

pub use run_check_suite::*;
pub use sync_variables::*;
