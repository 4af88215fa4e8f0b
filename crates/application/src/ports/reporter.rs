//! Test reporter port
//!
//! The host's register-and-report mechanism for named assertions.

use respcheck_domain::TestOutcome;

/// Receives every named pass/fail outcome a check records.
pub trait TestReporter {
    /// Records one outcome.
    fn record(&mut self, outcome: TestOutcome);
}

impl TestReporter for Vec<TestOutcome> {
    fn record(&mut self, outcome: TestOutcome) {
        self.push(outcome);
    }
}

impl<R: TestReporter + ?Sized> TestReporter for &mut R {
    fn record(&mut self, outcome: TestOutcome) {
        (**self).record(outcome);
    }
}
