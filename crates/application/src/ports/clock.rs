//! Clock port for report timestamps

use chrono::{DateTime, Utc};

/// Port for getting the current time.
///
/// Reports are stamped and timed through this port so runs can be tested
/// with a fixed clock.
pub trait Clock: Send + Sync {
    /// Returns the current UTC timestamp.
    fn now(&self) -> DateTime<Utc>;

    /// Whole milliseconds since `started_at`; zero if the clock went backwards.
    fn elapsed_ms(&self, started_at: DateTime<Utc>) -> u64 {
        u64::try_from((self.now() - started_at).num_milliseconds()).unwrap_or_default()
    }
}
