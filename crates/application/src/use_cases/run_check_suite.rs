//! Run check suite use case.

use respcheck_domain::{CheckSettings, CheckSuite, ResponseSnapshot, TestOutcome, TestReport};

use crate::checks::ResponseTests;
use crate::error::ApplicationResult;
use crate::ports::{Clock, VariableStore};

/// Use case for evaluating a declarative suite against one response.
pub struct RunCheckSuite<C: Clock> {
    clock: C,
    settings: CheckSettings,
}

impl<C: Clock> RunCheckSuite<C> {
    /// Creates a new `RunCheckSuite` use case with default settings.
    #[must_use]
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            settings: CheckSettings::default(),
        }
    }

    /// Replaces the settings (builder pattern).
    #[must_use]
    pub fn with_settings(mut self, settings: CheckSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Runs every step of `suite` in order and reports the outcomes.
    ///
    /// With `stop_on_failure` set, the run ends after the first step that
    /// recorded a failed outcome.
    ///
    /// # Errors
    /// Returns the first caller-contract error raised by a step. The steps
    /// after it do not run.
    pub fn execute(
        &self,
        suite: &CheckSuite,
        response: &ResponseSnapshot,
        variables: &mut dyn VariableStore,
    ) -> ApplicationResult<TestReport> {
        let started_at = self.clock.now();
        tracing::info!(suite = %suite.name, steps = suite.len(), "running check suite");

        let mut outcomes: Vec<TestOutcome> = Vec::new();
        {
            let mut tests = ResponseTests::new(response, variables, &mut outcomes)
                .with_settings(self.settings.clone());

            for (index, step) in suite.steps.iter().enumerate() {
                if let Err(error) = tests.run_step(step) {
                    tracing::error!(
                        suite = %suite.name,
                        step = index,
                        check = step.check.name(),
                        %error,
                        "check suite aborted"
                    );
                    return Err(error);
                }
                if self.settings.stop_on_failure && tests.failed_count() > 0 {
                    tracing::info!(
                        suite = %suite.name,
                        step = index,
                        check = step.check.name(),
                        "stopping at first failure"
                    );
                    break;
                }
            }
        }

        let duration_ms = self.clock.elapsed_ms(started_at);
        let report = TestReport::new(&suite.name, started_at, outcomes, duration_ms);

        tracing::info!(
            suite = %suite.name,
            passed = report.passed,
            failed = report.failed,
            "check suite finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApplicationError;
    use crate::ports::VariableSnapshot;
    use chrono::{DateTime, TimeZone, Utc};
    use respcheck_domain::{Check, ComparisonOperator, Whitelist};
    use serde_json::json;
    use std::time::Duration;

    struct FixedClock(DateTime<Utc>);

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn clock() -> FixedClock {
        FixedClock(
            Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5)
                .single()
                .expect("valid timestamp"),
        )
    }

    fn user_response() -> ResponseSnapshot {
        ResponseSnapshot::new(
            404,
            json!({"user": {"name": "Ann", "age": null}}),
            Duration::from_millis(80),
        )
    }

    fn suite() -> CheckSuite {
        CheckSuite::new("users")
            .with_check(Check::ResponseCode { code: None })
            .with_check(Check::IsNull {
                whitelist: Whitelist::from("user"),
                mode: None,
            })
            .with_described_check(
                Check::Compare {
                    field: "user.name".to_string(),
                    operator: ComparisonOperator::Equals,
                    expected: json!("Ann"),
                },
                "name matches",
            )
    }

    #[test]
    fn execute_collects_all_outcomes() {
        let use_case = RunCheckSuite::new(clock());
        let mut variables = VariableSnapshot::new();

        let report = use_case
            .execute(&suite(), &user_response(), &mut variables)
            .expect("suite should run");

        assert_eq!(report.suite_name, "users");
        assert_eq!(report.started_at, clock().0);
        assert_eq!(report.duration_ms, 0);
        let names: Vec<_> = report.results.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Response is 200",
                "user is on the response object",
                "user is null",
                "user.name is null",
                "user.age is null",
                "name matches",
            ]
        );
        assert_eq!(report.passed, 3);
        assert_eq!(report.failed, 3);
    }

    #[test]
    fn execute_stops_on_failure_when_configured() {
        let use_case = RunCheckSuite::new(clock()).with_settings(CheckSettings {
            stop_on_failure: true,
            ..CheckSettings::default()
        });
        let mut variables = VariableSnapshot::new();

        let report = use_case
            .execute(&suite(), &user_response(), &mut variables)
            .expect("suite should run");

        assert_eq!(report.total, 1);
        assert!(!report.all_passed());
    }

    #[test]
    fn execute_aborts_on_contract_violation() {
        let use_case = RunCheckSuite::new(clock());
        let mut variables = VariableSnapshot::new();
        let suite = CheckSuite::new("broken")
            .with_check(Check::ResponseCode { code: Some(404) })
            .with_check(Check::IsNotNull {
                whitelist: Whitelist::default(),
                mode: None,
            })
            .with_check(Check::AllFieldsNotNull);

        let result = use_case.execute(&suite, &user_response(), &mut variables);
        assert!(matches!(
            result,
            Err(ApplicationError::MissingArgument {
                argument: "whitelist",
                check: "IsNotNull"
            })
        ));
    }

    #[test]
    fn execute_uses_configured_defaults() {
        let use_case = RunCheckSuite::new(clock()).with_settings(CheckSettings {
            default_status: 404,
            default_max_response_ms: 50,
            ..CheckSettings::default()
        });
        let mut variables = VariableSnapshot::new();
        let suite = CheckSuite::new("defaults")
            .with_check(Check::ResponseCode { code: None })
            .with_check(Check::ResponseTime { max_ms: None });

        let report = use_case
            .execute(&suite, &user_response(), &mut variables)
            .expect("suite should run");

        assert_eq!(report.results[0].name, "Response is 404");
        assert!(report.results[0].passed);
        assert_eq!(report.results[1].name, "Response time is less than 50ms");
        assert!(!report.results[1].passed);
    }
}
