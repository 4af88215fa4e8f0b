//! Reporter that keeps every outcome in memory.

use std::time::Instant;

use chrono::{DateTime, Utc};
use respcheck_application::ports::TestReporter;
use respcheck_domain::{TestOutcome, TestReport};

/// Collects outcomes in registration order and turns them into a report.
#[derive(Debug)]
pub struct CollectingReporter {
    name: String,
    started_at: DateTime<Utc>,
    started: Instant,
    outcomes: Vec<TestOutcome>,
}

impl CollectingReporter {
    /// Starts collecting outcomes for the run called `name`.
    #[must_use]
    pub fn new(name: impl Into<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            started_at,
            started: Instant::now(),
            outcomes: Vec::new(),
        }
    }

    /// Outcomes recorded so far.
    #[must_use]
    pub fn outcomes(&self) -> &[TestOutcome] {
        &self.outcomes
    }

    /// Number of failed outcomes recorded so far.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.passed).count()
    }

    /// Finishes the run.
    #[must_use]
    pub fn into_report(self) -> TestReport {
        let duration_ms = u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX);
        let report = TestReport::new(self.name, self.started_at, self.outcomes, duration_ms);

        tracing::info!(
            run = %report.suite_name,
            passed = report.passed,
            failed = report.failed,
            "run finished"
        );
        report
    }
}

impl TestReporter for CollectingReporter {
    fn record(&mut self, outcome: TestOutcome) {
        tracing::trace!(
            run = %self.name,
            name = %outcome.name,
            passed = outcome.passed,
            "outcome recorded"
        );
        self.outcomes.push(outcome);
    }
}
