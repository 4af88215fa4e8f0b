//! Assertion entry points over the current response.
//!
//! Every check reads the response (or the variable store) synchronously and
//! records zero or more named outcomes with the reporter. Pass/fail is never
//! an error; only caller-contract violations return `Err`.

use respcheck_domain::{
    Check, CheckSettings, CheckStep, ComparisonOperator, MatchMode, ResponseSnapshot, TestOutcome,
    Whitelist, display_value, ensure_not_empty, find_field_in_keys, generate_entries, in_whitelist,
    resolve_path, validate_path,
};
use serde_json::Value;

use crate::description::DescriptionSlot;
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{TestReporter, VariableStore};

/// Which nullability rule a whitelist check applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NullRule {
    Null,
    NotNull,
}

impl NullRule {
    const fn check_name(self) -> &'static str {
        match self {
            Self::Null => "IsNull",
            Self::NotNull => "IsNotNull",
        }
    }

    fn outcome(self, key: &str, value: &Value) -> TestOutcome {
        match self {
            Self::Null => {
                let name = format!("{key} is null");
                if value.is_null() {
                    TestOutcome::pass(name)
                } else {
                    TestOutcome::fail_with_value(
                        name,
                        value.to_string(),
                        "expected value to be null",
                    )
                }
            }
            Self::NotNull => not_null_outcome(key, value),
        }
    }
}

fn not_null_outcome(key: &str, value: &Value) -> TestOutcome {
    let name = format!("{key} is not null");
    match ensure_not_empty(value) {
        Ok(()) => TestOutcome::pass_with_value(name, value.to_string()),
        Err(reason) => TestOutcome::fail_with_value(name, value.to_string(), reason),
    }
}

fn not_found(field: &str) -> String {
    format!("field '{field}' not found in response body")
}

/// The assertion surface for one response.
///
/// Borrows the host's variable store and reporter for as long as checks are
/// being registered.
pub struct ResponseTests<'a> {
    response: &'a ResponseSnapshot,
    variables: &'a mut dyn VariableStore,
    reporter: &'a mut dyn TestReporter,
    settings: CheckSettings,
    passed: usize,
    failed: usize,
}

impl<'a> ResponseTests<'a> {
    /// Creates the assertion surface with default settings.
    pub fn new(
        response: &'a ResponseSnapshot,
        variables: &'a mut dyn VariableStore,
        reporter: &'a mut dyn TestReporter,
    ) -> Self {
        Self {
            response,
            variables,
            reporter,
            settings: CheckSettings::default(),
            passed: 0,
            failed: 0,
        }
    }

    /// Replaces the settings (builder pattern).
    #[must_use]
    pub fn with_settings(mut self, settings: CheckSettings) -> Self {
        self.settings = settings;
        self
    }

    /// The response under test.
    #[must_use]
    pub const fn response(&self) -> &ResponseSnapshot {
        self.response
    }

    /// The settings in effect.
    #[must_use]
    pub const fn settings(&self) -> &CheckSettings {
        &self.settings
    }

    /// Number of passed outcomes recorded so far.
    #[must_use]
    pub const fn passed_count(&self) -> usize {
        self.passed
    }

    /// Number of failed outcomes recorded so far.
    #[must_use]
    pub const fn failed_count(&self) -> usize {
        self.failed
    }

    fn record(&mut self, outcome: TestOutcome) {
        if outcome.passed {
            self.passed += 1;
            tracing::debug!(name = %outcome.name, "check passed");
        } else {
            self.failed += 1;
            tracing::warn!(
                name = %outcome.name,
                error = outcome.error.as_deref().unwrap_or_default(),
                "check failed"
            );
        }
        self.reporter.record(outcome);
    }

    /// An explicit description wins; otherwise the pending one-shot override
    /// is consumed, falling back to `default`.
    fn describe(&mut self, explicit: Option<&str>, default: String) -> String {
        if let Some(description) = explicit {
            return description.to_string();
        }
        DescriptionSlot::new(&mut *self.variables, &self.settings.description_variable)
            .take(default)
    }

    // ---- status code -------------------------------------------------------

    /// Asserts the status code, defaulting to the configured status (200).
    pub fn response_code(&mut self, code: Option<u16>) {
        self.status_check(code, None);
    }

    /// Asserts status 200.
    pub fn response_200(&mut self) {
        self.response_code(Some(200));
    }

    /// Asserts status 201.
    pub fn response_201(&mut self) {
        self.response_code(Some(201));
    }

    /// Asserts status 204.
    pub fn response_204(&mut self) {
        self.response_code(Some(204));
    }

    /// Asserts status 400.
    pub fn response_400(&mut self) {
        self.response_code(Some(400));
    }

    /// Asserts status 401.
    pub fn response_401(&mut self) {
        self.response_code(Some(401));
    }

    /// Asserts status 403.
    pub fn response_403(&mut self) {
        self.response_code(Some(403));
    }

    /// Asserts status 404.
    pub fn response_404(&mut self) {
        self.response_code(Some(404));
    }

    /// Asserts the status code under an explicit outcome name.
    ///
    /// A `Some` description leaves any pending override in the store
    /// untouched; `None` behaves like [`Self::response_code`].
    pub fn response_code_with(&mut self, code: Option<u16>, description: Option<&str>) {
        self.status_check(code, description);
    }

    fn status_check(&mut self, code: Option<u16>, explicit: Option<&str>) {
        let code = code.unwrap_or(self.settings.default_status);
        let name = self.describe(explicit, format!("Response is {code}"));
        let actual = self.response.status_code();

        let outcome = if actual.as_u16() == code {
            TestOutcome::pass_with_value(name, actual.to_string())
        } else {
            TestOutcome::fail_with_value(
                name,
                actual.to_string(),
                format!("expected response to have status code {code} but got {actual}"),
            )
        };
        self.record(outcome);
    }

    // ---- nullability -------------------------------------------------------

    /// Asserts that every whitelisted field is null.
    ///
    /// Records one presence outcome per whitelist entry, then one
    /// `"<key> is null"` outcome per matching key.
    ///
    /// # Errors
    ///
    /// Returns `MissingArgument` when the whitelist names no field.
    pub fn is_null(
        &mut self,
        whitelist: impl Into<Whitelist>,
        mode: MatchMode,
    ) -> ApplicationResult<()> {
        self.null_check(&whitelist.into(), mode, NullRule::Null)
    }

    /// Asserts that every whitelisted field is present and non-empty.
    ///
    /// Strings must not be blank once trimmed; objects and arrays must have
    /// at least one entry.
    ///
    /// # Errors
    ///
    /// Returns `MissingArgument` when the whitelist names no field.
    pub fn is_not_null(
        &mut self,
        whitelist: impl Into<Whitelist>,
        mode: MatchMode,
    ) -> ApplicationResult<()> {
        self.null_check(&whitelist.into(), mode, NullRule::NotNull)
    }

    fn null_check(
        &mut self,
        whitelist: &Whitelist,
        mode: MatchMode,
        rule: NullRule,
    ) -> ApplicationResult<()> {
        if whitelist.is_blank() {
            return Err(ApplicationError::missing("whitelist", rule.check_name()));
        }

        let response = self.response;
        let entries = generate_entries(&response.body);
        let keys: Vec<String> = entries.iter().map(|(key, _)| key.clone()).collect();
        self.assert_fields_present(&keys, whitelist);

        let lower = whitelist.to_lowercase();
        for (key, value) in entries {
            if in_whitelist(&key, &lower, mode) {
                self.record(rule.outcome(&key, value));
            }
        }
        Ok(())
    }

    /// Records `"<entry> is on the response object"` for every whitelist entry.
    ///
    /// Entries and keys are compared lower-cased.
    pub fn assert_fields_present(&mut self, keys: &[String], whitelist: &Whitelist) {
        let lower_keys: Vec<String> = keys.iter().map(|key| key.to_lowercase()).collect();
        let lower = whitelist.to_lowercase();

        for entry in lower.entries() {
            let name = format!("{entry} is on the response object");
            let outcome = if find_field_in_keys(entry, &lower_keys) {
                TestOutcome::pass(name)
            } else {
                TestOutcome::fail(name, not_found(entry))
            };
            self.record(outcome);
        }
    }

    /// Applies the not-null rule to every field of the body.
    pub fn all_response_fields_not_null(&mut self) {
        let response = self.response;
        for (key, value) in generate_entries(&response.body) {
            self.record(not_null_outcome(&key, value));
        }
    }

    // ---- comparisons -------------------------------------------------------

    /// Asserts `field` equals `expected`.
    ///
    /// # Errors
    ///
    /// Returns `MissingArgument` on an empty field path and `Domain` on a
    /// malformed one.
    pub fn is_equal(&mut self, field: &str, expected: impl Into<Value>) -> ApplicationResult<()> {
        self.compare(field, ComparisonOperator::Equals, expected.into(), None)
    }

    /// Asserts `field` does not equal `expected`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::is_equal`].
    pub fn is_not_equal(
        &mut self,
        field: &str,
        expected: impl Into<Value>,
    ) -> ApplicationResult<()> {
        self.compare(field, ComparisonOperator::NotEquals, expected.into(), None)
    }

    /// Asserts `field` is greater than `expected`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::is_equal`].
    pub fn is_greater_than(
        &mut self,
        field: &str,
        expected: impl Into<Value>,
    ) -> ApplicationResult<()> {
        self.compare(field, ComparisonOperator::GreaterThan, expected.into(), None)
    }

    /// Asserts `field` is greater than or equal to `expected`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::is_equal`].
    pub fn is_greater_or_equal_to(
        &mut self,
        field: &str,
        expected: impl Into<Value>,
    ) -> ApplicationResult<()> {
        self.compare(field, ComparisonOperator::GreaterThanOrEqual, expected.into(), None)
    }

    /// Asserts `field` is less than `expected`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::is_equal`].
    pub fn is_less_than(
        &mut self,
        field: &str,
        expected: impl Into<Value>,
    ) -> ApplicationResult<()> {
        self.compare(field, ComparisonOperator::LessThan, expected.into(), None)
    }

    /// Asserts `field` is less than or equal to `expected`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::is_equal`].
    pub fn is_less_or_equal_to(
        &mut self,
        field: &str,
        expected: impl Into<Value>,
    ) -> ApplicationResult<()> {
        self.compare(field, ComparisonOperator::LessThanOrEqual, expected.into(), None)
    }

    /// Compares one field against `expected` and records a single outcome.
    ///
    /// `description` replaces the default outcome name and leaves any pending
    /// override in the store untouched. A field that does not resolve records
    /// a failed outcome.
    ///
    /// # Errors
    ///
    /// Returns `MissingArgument` on an empty field path and `Domain` on a
    /// malformed one. Nothing is recorded in either case.
    pub fn compare(
        &mut self,
        field: &str,
        operator: ComparisonOperator,
        expected: Value,
        description: Option<&str>,
    ) -> ApplicationResult<()> {
        if field.is_empty() {
            return Err(ApplicationError::missing("field", operator.check_name()));
        }
        validate_path(field)?;

        let name = self.describe(
            description,
            format!("{field} {} {}", operator.phrase(), display_value(&expected)),
        );

        let response = self.response;
        let outcome = match resolve_path(&response.body, field) {
            None => TestOutcome::fail(name, not_found(field)),
            Some(actual) => {
                let shown = actual.to_string();
                match operator.evaluate(actual, &expected) {
                    Ok(true) => TestOutcome::pass_with_value(name, shown),
                    Ok(false) => {
                        let error = format!("expected {shown} {} {expected}", operator.symbol());
                        TestOutcome::fail_with_value(name, shown, error)
                    }
                    Err(reason) => TestOutcome::fail_with_value(name, shown, reason),
                }
            }
        };
        self.record(outcome);
        Ok(())
    }

    // ---- timing ------------------------------------------------------------

    /// Asserts the response took strictly less than `max_ms` milliseconds,
    /// defaulting to the configured bound (200).
    pub fn response_time(&mut self, max_ms: Option<u64>) {
        self.time_check(max_ms, None);
    }

    /// Asserts the response time under an explicit outcome name.
    pub fn response_time_with(&mut self, max_ms: Option<u64>, description: Option<&str>) {
        self.time_check(max_ms, description);
    }

    fn time_check(&mut self, max_ms: Option<u64>, explicit: Option<&str>) {
        let max_ms = max_ms.unwrap_or(self.settings.default_max_response_ms);
        let name = self.describe(explicit, format!("Response time is less than {max_ms}ms"));
        let actual = self.response.duration_ms();

        let outcome = if actual < max_ms {
            TestOutcome::pass_with_value(name, format!("{actual}ms"))
        } else {
            TestOutcome::fail_with_value(
                name,
                format!("{actual}ms"),
                format!("Response took {actual}ms, expected below {max_ms}ms"),
            )
        };
        self.record(outcome);
    }

    // ---- variables ---------------------------------------------------------

    /// Reads a variable from the host store.
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<Value> {
        self.variables.get(name)
    }

    /// Writes a variable into the host store.
    pub fn set_variable(&mut self, name: &str, value: impl Into<Value>) {
        tracing::debug!(name, "setting variable");
        self.variables.set(name, value.into());
    }

    /// Removes a variable from the host store, returning its previous value.
    pub fn delete_variable(&mut self, name: &str) -> Option<Value> {
        tracing::debug!(name, "deleting variable");
        self.variables.unset(name)
    }

    /// Stores the description used by the next check that records one
    /// outcome (status code, comparisons, response time).
    pub fn description(&mut self, description: impl Into<String>) {
        DescriptionSlot::new(&mut *self.variables, &self.settings.description_variable)
            .set(description);
    }

    // ---- declarative steps -------------------------------------------------

    /// Runs one declarative step.
    ///
    /// The step's description applies to checks that record a single
    /// outcome; whitelist checks keep their per-field names.
    ///
    /// # Errors
    ///
    /// Propagates the caller-contract errors of the underlying check.
    pub fn run_step(&mut self, step: &CheckStep) -> ApplicationResult<()> {
        let explicit = step.description.as_deref();
        match &step.check {
            Check::ResponseCode { code } => self.status_check(*code, explicit),
            Check::IsNull { whitelist, mode } => {
                let mode = mode.unwrap_or(self.settings.default_match_mode);
                self.null_check(whitelist, mode, NullRule::Null)?;
            }
            Check::IsNotNull { whitelist, mode } => {
                let mode = mode.unwrap_or(self.settings.default_match_mode);
                self.null_check(whitelist, mode, NullRule::NotNull)?;
            }
            Check::Compare {
                field,
                operator,
                expected,
            } => self.compare(field, *operator, expected.clone(), explicit)?,
            Check::AllFieldsNotNull => self.all_response_fields_not_null(),
            Check::ResponseTime { max_ms } => self.time_check(*max_ms, explicit),
        }
        Ok(())
    }
}
