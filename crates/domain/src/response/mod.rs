//! HTTP response snapshots checked by assertions.

mod spec;

pub use spec::{ResponseSnapshot, StatusCode};
