//! Response checks and their outcomes.
//!
//! This module provides types for defining checks against HTTP responses
//! and for collecting the named pass/fail outcomes they record.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::whitelist::{MatchMode, Whitelist};

/// A declarative check to run against a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum Check {
    /// Check the response status code.
    ResponseCode {
        /// Expected status code; the configured default when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code: Option<u16>,
    },
    /// Check that every whitelisted field is null.
    IsNull {
        /// Fields of interest.
        whitelist: Whitelist,
        /// Match mode; the configured default when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mode: Option<MatchMode>,
    },
    /// Check that every whitelisted field is present and non-empty.
    IsNotNull {
        /// Fields of interest.
        whitelist: Whitelist,
        /// Match mode; the configured default when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        mode: Option<MatchMode>,
    },
    /// Compare one field against an expected value.
    Compare {
        /// Dotted field path.
        field: String,
        /// Comparison operator.
        operator: ComparisonOperator,
        /// Value to compare against.
        expected: Value,
    },
    /// Check that every field of the body is present and non-empty.
    AllFieldsNotNull,
    /// Check the response time.
    ResponseTime {
        /// Exclusive upper bound in milliseconds; the configured default when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max_ms: Option<u64>,
    },
}

impl Check {
    /// Name of the check as exposed in the named function table.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ResponseCode { .. } => "ResponseCode",
            Self::IsNull { .. } => "IsNull",
            Self::IsNotNull { .. } => "IsNotNull",
            Self::Compare { operator, .. } => operator.check_name(),
            Self::AllFieldsNotNull => "AllResponseFieldsNotNull",
            Self::ResponseTime { .. } => "ResponseTime",
        }
    }
}

/// Comparison operators for field checks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    /// Equal to.
    Equals,
    /// Not equal to.
    NotEquals,
    /// Greater than.
    GreaterThan,
    /// Greater than or equal to.
    GreaterThanOrEqual,
    /// Less than.
    LessThan,
    /// Less than or equal to.
    LessThanOrEqual,
}

impl ComparisonOperator {
    /// Get the symbol for this operator.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Equals => "==",
            Self::NotEquals => "!=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
        }
    }

    /// Get the phrase used in outcome names (`<field> <phrase> <expected>`).
    #[must_use]
    pub const fn phrase(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "does not equal",
            Self::GreaterThan => "is greater than",
            Self::GreaterThanOrEqual => "is greater than or equal to",
            Self::LessThan => "is less than",
            Self::LessThanOrEqual => "is less than or equal to",
        }
    }

    /// Name of the matching entry in the named function table.
    #[must_use]
    pub const fn check_name(&self) -> &'static str {
        match self {
            Self::Equals => "IsEqual",
            Self::NotEquals => "IsNotEqual",
            Self::GreaterThan => "IsGreaterThan",
            Self::GreaterThanOrEqual => "IsGreaterOrEqualTo",
            Self::LessThan => "IsLessThan",
            Self::LessThanOrEqual => "IsLessOrEqualTo",
        }
    }

    /// Compares an actual value against the expected one.
    ///
    /// Equality is deep JSON equality where numbers compare by value.
    /// Ordering needs both sides to be numbers.
    ///
    /// # Errors
    ///
    /// Returns a message describing the mismatch when an ordering operator is
    /// applied to a non-numeric value.
    pub fn evaluate(&self, actual: &Value, expected: &Value) -> Result<bool, String> {
        match self {
            Self::Equals => Ok(values_equal(actual, expected)),
            Self::NotEquals => Ok(!values_equal(actual, expected)),
            Self::GreaterThan => compare_numbers(actual, expected).map(Ordering::is_gt),
            Self::GreaterThanOrEqual => compare_numbers(actual, expected).map(Ordering::is_ge),
            Self::LessThan => compare_numbers(actual, expected).map(Ordering::is_lt),
            Self::LessThanOrEqual => compare_numbers(actual, expected).map(Ordering::is_le),
        }
    }
}

/// Deep JSON equality where numbers compare by numeric value (`1 == 1.0`).
#[must_use]
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(_), Value::Number(_)) => {
            compare_numbers(left, right).is_ok_and(Ordering::is_eq)
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a
                    .iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| values_equal(x, y)))
        }
        _ => left == right,
    }
}

fn compare_numbers(actual: &Value, expected: &Value) -> Result<Ordering, String> {
    let (Value::Number(a), Value::Number(b)) = (actual, expected) else {
        return Err(format!(
            "expected numbers to compare, got {} and {}",
            type_name(actual),
            type_name(expected)
        ));
    };

    if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
        return Ok(a.cmp(&b));
    }
    if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
        return Ok(a.cmp(&b));
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(a), Some(b)) => a
            .partial_cmp(&b)
            .ok_or_else(|| "numbers are not comparable".to_string()),
        _ => Err("numbers are not comparable".to_string()),
    }
}

/// Name of a JSON value's type, for failure messages.
#[must_use]
pub const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Renders a value for outcome names: strings bare, everything else as JSON.
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Checks a value against the "not null" rule.
///
/// The value must not be null; a string must not be blank once trimmed and an
/// object or array must have at least one entry.
///
/// # Errors
///
/// Returns the reason the value is considered empty.
pub fn ensure_not_empty(value: &Value) -> Result<(), String> {
    match value {
        Value::Null => Err("expected value not to be null".to_string()),
        Value::String(s) if s.trim().is_empty() => {
            Err("expected string not to be empty".to_string())
        }
        Value::Object(map) if map.is_empty() => Err("expected object to have keys".to_string()),
        Value::Array(items) if items.is_empty() => {
            Err("expected array to have entries".to_string())
        }
        _ => Ok(()),
    }
}

/// Result of one named assertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestOutcome {
    /// Display name of the assertion.
    pub name: String,
    /// Whether the assertion passed.
    pub passed: bool,
    /// Actual value found (for display).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    /// Error message if failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TestOutcome {
    /// Create a passed outcome.
    #[must_use]
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            actual: None,
            error: None,
        }
    }

    /// Create a passed outcome with actual value.
    #[must_use]
    pub fn pass_with_value(name: impl Into<String>, actual: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            actual: Some(actual.into()),
            error: None,
        }
    }

    /// Create a failed outcome.
    #[must_use]
    pub fn fail(name: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            actual: None,
            error: Some(error.into()),
        }
    }

    /// Create a failed outcome with actual value.
    #[must_use]
    pub fn fail_with_value(
        name: impl Into<String>,
        actual: impl Into<String>,
        error: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            passed: false,
            actual: Some(actual.into()),
            error: Some(error.into()),
        }
    }
}

/// One step of a suite: a check plus an optional explicit description.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckStep {
    /// The check to run.
    #[serde(flatten)]
    pub check: Check,
    /// Display name that replaces the check's default one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<Check> for CheckStep {
    fn from(check: Check) -> Self {
        Self {
            check,
            description: None,
        }
    }
}

/// A named, ordered list of checks.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct CheckSuite {
    /// Suite name.
    #[serde(default)]
    pub name: String,
    /// Steps to run, in order.
    #[serde(default)]
    pub steps: Vec<CheckStep>,
}

impl CheckSuite {
    /// Create a new empty suite.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Vec::new(),
        }
    }

    /// Add a check (builder pattern).
    #[must_use]
    pub fn with_check(mut self, check: Check) -> Self {
        self.steps.push(check.into());
        self
    }

    /// Add a check with an explicit description (builder pattern).
    #[must_use]
    pub fn with_described_check(mut self, check: Check, description: impl Into<String>) -> Self {
        self.steps.push(CheckStep {
            check,
            description: Some(description.into()),
        });
        self
    }

    /// Check if the suite is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Get the number of steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }
}

/// Outcomes collected from one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestReport {
    /// Run identifier.
    pub id: Uuid,
    /// Name of the suite (or ad-hoc run).
    pub suite_name: String,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// Individual outcomes, in the order they were recorded.
    pub results: Vec<TestOutcome>,
    /// Total number of outcomes.
    pub total: usize,
    /// Number of passed outcomes.
    pub passed: usize,
    /// Number of failed outcomes.
    pub failed: usize,
    /// Execution time in milliseconds.
    pub duration_ms: u64,
}

impl TestReport {
    /// Create a new report.
    #[must_use]
    pub fn new(
        suite_name: impl Into<String>,
        started_at: DateTime<Utc>,
        results: Vec<TestOutcome>,
        duration_ms: u64,
    ) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = total - passed;

        Self {
            id: Uuid::now_v7(),
            suite_name: suite_name.into(),
            started_at,
            results,
            total,
            passed,
            failed,
            duration_ms,
        }
    }

    /// Check if all outcomes passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Get pass rate as percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }

    /// Iterate over the failed outcomes.
    pub fn failures(&self) -> impl Iterator<Item = &TestOutcome> {
        self.results.iter().filter(|r| !r.passed)
    }
}
