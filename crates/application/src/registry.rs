//! Named function table.
//!
//! Exposes every check under its published name so scripts can invoke them
//! with positional JSON arguments. The table is an ordinary value handed to
//! whoever needs it; nothing is stored globally.

use respcheck_domain::{ComparisonOperator, MatchMode, Whitelist};
use serde_json::Value;

use crate::checks::ResponseTests;
use crate::error::{ApplicationError, ApplicationResult};

/// Signature of a registered check.
///
/// Returns a value only for accessors such as `GetVariable`.
pub type CheckHandler = fn(&mut ResponseTests<'_>, &Args<'_>) -> ApplicationResult<Option<Value>>;

/// Positional arguments of one invocation.
#[derive(Debug, Clone, Copy)]
pub struct Args<'v> {
    check: &'static str,
    values: &'v [Value],
}

impl<'v> Args<'v> {
    /// Wraps the arguments passed to `check`.
    #[must_use]
    pub const fn new(check: &'static str, values: &'v [Value]) -> Self {
        Self { check, values }
    }

    /// Name of the check being invoked.
    #[must_use]
    pub const fn check(&self) -> &'static str {
        self.check
    }

    /// The argument at `index`, treating JSON `null` as absent.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&'v Value> {
        self.values.get(index).filter(|value| !value.is_null())
    }

    fn missing(&self, argument: &'static str) -> ApplicationError {
        ApplicationError::missing(argument, self.check)
    }

    fn invalid(&self, argument: &'static str, reason: impl Into<String>) -> ApplicationError {
        ApplicationError::InvalidArgument {
            argument,
            check: self.check,
            reason: reason.into(),
        }
    }

    /// A required, non-empty string argument.
    ///
    /// # Errors
    ///
    /// `MissingArgument` when absent, null, `false` or empty;
    /// `InvalidArgument` for any other non-string.
    pub fn required_str(&self, index: usize, argument: &'static str) -> ApplicationResult<&'v str> {
        match self.get(index) {
            None | Some(Value::Bool(false)) => Err(self.missing(argument)),
            Some(Value::String(s)) if s.is_empty() => Err(self.missing(argument)),
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(other) => Err(self.invalid(argument, format!("expected a string, got {other}"))),
        }
    }

    /// A required string argument that may be empty.
    ///
    /// # Errors
    ///
    /// `MissingArgument` when absent or null;
    /// `InvalidArgument` for any other non-string.
    pub fn any_str(&self, index: usize, argument: &'static str) -> ApplicationResult<&'v str> {
        match self.get(index) {
            None => Err(self.missing(argument)),
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(other) => Err(self.invalid(argument, format!("expected a string, got {other}"))),
        }
    }

    /// A required value of any type. `null` counts as a value here.
    ///
    /// # Errors
    ///
    /// `MissingArgument` when fewer arguments were passed.
    pub fn required_value(&self, index: usize, argument: &'static str) -> ApplicationResult<Value> {
        self.values
            .get(index)
            .cloned()
            .ok_or_else(|| self.missing(argument))
    }

    /// A required whitelist: one string or an array of strings.
    ///
    /// # Errors
    ///
    /// `MissingArgument` when absent or blank; `InvalidArgument` when it is
    /// neither a string nor an array of strings.
    pub fn required_whitelist(
        &self,
        index: usize,
        argument: &'static str,
    ) -> ApplicationResult<Whitelist> {
        let whitelist = match self.get(index) {
            None | Some(Value::Bool(false)) => return Err(self.missing(argument)),
            Some(Value::String(s)) => Whitelist::from(s.as_str()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        self.invalid(argument, format!("expected string entries, got {item}"))
                    })
                })
                .collect::<ApplicationResult<Vec<_>>>()?
                .into(),
            Some(other) => {
                return Err(
                    self.invalid(argument, format!("expected a string or list, got {other}"))
                );
            }
        };

        if whitelist.is_blank() {
            return Err(self.missing(argument));
        }
        Ok(whitelist)
    }

    /// An optional string, `None` when absent, null or empty.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a non-string.
    pub fn optional_str(
        &self,
        index: usize,
        argument: &'static str,
    ) -> ApplicationResult<Option<&'v str>> {
        match self.get(index) {
            None => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(self.invalid(argument, format!("expected a string, got {other}"))),
        }
    }

    /// An optional boolean flag, `false` when absent.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for a non-boolean.
    pub fn optional_bool(&self, index: usize, argument: &'static str) -> ApplicationResult<bool> {
        match self.get(index) {
            None => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(other) => Err(self.invalid(argument, format!("expected a boolean, got {other}"))),
        }
    }

    /// An optional non-negative integer.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for anything that is not an integer within `u64`.
    pub fn optional_u64(
        &self,
        index: usize,
        argument: &'static str,
    ) -> ApplicationResult<Option<u64>> {
        self.get(index)
            .map(|value| {
                value.as_u64().ok_or_else(|| {
                    self.invalid(argument, format!("expected an integer, got {value}"))
                })
            })
            .transpose()
    }

    /// An optional HTTP status code.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for anything outside `u16`.
    pub fn optional_status(
        &self,
        index: usize,
        argument: &'static str,
    ) -> ApplicationResult<Option<u16>> {
        self.optional_u64(index, argument)?
            .map(|code| {
                u16::try_from(code)
                    .map_err(|_| self.invalid(argument, format!("{code} is not a status code")))
            })
            .transpose()
    }
}

/// Named checks in registration order.
#[derive(Clone)]
pub struct CheckRegistry {
    handlers: Vec<(&'static str, CheckHandler)>,
}

impl std::fmt::Debug for CheckRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

fn match_mode(
    tests: &ResponseTests<'_>,
    args: &Args<'_>,
    index: usize,
) -> ApplicationResult<MatchMode> {
    Ok(match args.get(index) {
        None => tests.settings().default_match_mode,
        Some(_) => MatchMode::from_fuzzy(args.optional_bool(index, "fuzzySearch")?),
    })
}

fn compare(
    tests: &mut ResponseTests<'_>,
    args: &Args<'_>,
    operator: ComparisonOperator,
) -> ApplicationResult<Option<Value>> {
    let field = args.required_str(0, "field")?;
    let expected = args.required_value(1, "expected")?;
    let description = args.optional_str(2, "desc")?;
    tests
        .compare(field, operator, expected, description)
        .map(|()| None)
}

impl CheckRegistry {
    /// An empty table.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// The table with every published check.
    #[must_use]
    pub fn standard() -> Self {
        let mut registry = Self::empty();

        registry.register("ResponseCode", |t, a| {
            t.response_code_with(a.optional_status(0, "code")?, a.optional_str(1, "desc")?);
            Ok(None)
        });
        registry.register("Response200", |t, _| {
            t.response_200();
            Ok(None)
        });
        registry.register("Response201", |t, _| {
            t.response_201();
            Ok(None)
        });
        registry.register("Response204", |t, _| {
            t.response_204();
            Ok(None)
        });
        registry.register("Response400", |t, _| {
            t.response_400();
            Ok(None)
        });
        registry.register("Response401", |t, _| {
            t.response_401();
            Ok(None)
        });
        registry.register("Response403", |t, _| {
            t.response_403();
            Ok(None)
        });
        registry.register("Response404", |t, _| {
            t.response_404();
            Ok(None)
        });

        registry.register("IsNull", |t, a| {
            let whitelist = a.required_whitelist(0, "whitelist")?;
            let mode = match_mode(t, a, 1)?;
            t.is_null(whitelist, mode).map(|()| None)
        });
        registry.register("IsNotNull", |t, a| {
            let whitelist = a.required_whitelist(0, "whitelist")?;
            let mode = match_mode(t, a, 1)?;
            t.is_not_null(whitelist, mode).map(|()| None)
        });

        registry.register("IsEqual", |t, a| compare(t, a, ComparisonOperator::Equals));
        registry.register("IsNotEqual", |t, a| compare(t, a, ComparisonOperator::NotEquals));
        registry.register("IsGreaterThan", |t, a| compare(t, a, ComparisonOperator::GreaterThan));
        registry.register("IsGreaterOrEqualTo", |t, a| {
            compare(t, a, ComparisonOperator::GreaterThanOrEqual)
        });
        registry.register("IsLessThan", |t, a| compare(t, a, ComparisonOperator::LessThan));
        registry.register("IsLessOrEqualTo", |t, a| {
            compare(t, a, ComparisonOperator::LessThanOrEqual)
        });

        registry.register("AllResponseFieldsNotNull", |t, _| {
            t.all_response_fields_not_null();
            Ok(None)
        });
        registry.register("ResponseTime", |t, a| {
            t.response_time_with(a.optional_u64(0, "maxTime")?, a.optional_str(1, "desc")?);
            Ok(None)
        });

        registry.register("GetVariable", |t, a| {
            let name = a.required_str(0, "name")?;
            Ok(Some(t.get_variable(name).unwrap_or(Value::Null)))
        });
        registry.register("SetVariable", |t, a| {
            let name = a.required_str(0, "name")?;
            let value = a.values.get(1).cloned().unwrap_or(Value::Null);
            t.set_variable(name, value);
            Ok(None)
        });
        registry.register("DeleteVariable", |t, a| {
            t.delete_variable(a.required_str(0, "name")?);
            Ok(None)
        });
        registry.register("Description", |t, a| {
            t.description(a.any_str(0, "desc")?);
            Ok(None)
        });

        registry
    }

    /// Registers `handler` under `name`, replacing any previous entry.
    pub fn register(&mut self, name: &'static str, handler: CheckHandler) {
        match self.handlers.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = handler,
            None => self.handlers.push((name, handler)),
        }
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.iter().map(|(name, _)| *name)
    }

    /// Whether a check is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.iter().any(|(existing, _)| *existing == name)
    }

    /// Invokes the check registered under `name`.
    ///
    /// # Errors
    ///
    /// `UnknownCheck` for an unregistered name, plus whatever the check
    /// itself returns for bad arguments.
    pub fn invoke(
        &self,
        name: &str,
        tests: &mut ResponseTests<'_>,
        args: &[Value],
    ) -> ApplicationResult<Option<Value>> {
        let &(check, handler) = self
            .handlers
            .iter()
            .find(|(existing, _)| *existing == name)
            .ok_or_else(|| ApplicationError::UnknownCheck(name.to_string()))?;

        tracing::debug!(check, args = args.len(), "invoking check");
        handler(tests, &Args::new(check, args))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::VariableSnapshot;
    use pretty_assertions::assert_eq;
    use respcheck_domain::{ResponseSnapshot, TestOutcome};
    use serde_json::json;
    use std::time::Duration;

    fn invoke_all(
        body: Value,
        variables: &mut VariableSnapshot,
        calls: &[(&str, Vec<Value>)],
    ) -> (Vec<TestOutcome>, Vec<ApplicationResult<Option<Value>>>) {
        let response = ResponseSnapshot::new(200, body, Duration::from_millis(20));
        let registry = CheckRegistry::standard();
        let mut outcomes = Vec::new();
        let results = {
            let mut tests = ResponseTests::new(&response, variables, &mut outcomes);
            calls
                .iter()
                .map(|(name, args)| registry.invoke(name, &mut tests, args))
                .collect()
        };
        (outcomes, results)
    }

    #[test]
    fn test_standard_table_names() {
        let names: Vec<_> = CheckRegistry::standard().names().collect();
        assert_eq!(
            names,
            vec![
                "ResponseCode",
                "Response200",
                "Response201",
                "Response204",
                "Response400",
                "Response401",
                "Response403",
                "Response404",
                "IsNull",
                "IsNotNull",
                "IsEqual",
                "IsNotEqual",
                "IsGreaterThan",
                "IsGreaterOrEqualTo",
                "IsLessThan",
                "IsLessOrEqualTo",
                "AllResponseFieldsNotNull",
                "ResponseTime",
                "GetVariable",
                "SetVariable",
                "DeleteVariable",
                "Description",
            ]
        );
    }

    #[test]
    fn test_invoke_by_name() {
        let mut variables = VariableSnapshot::new();
        let (outcomes, results) = invoke_all(
            json!({"user": {"name": "Ann", "age": null}}),
            &mut variables,
            &[
                ("ResponseCode", vec![]),
                ("IsEqual", vec![json!("user.name"), json!("Ann")]),
                ("IsNull", vec![json!(["age"]), json!(true)]),
                ("ResponseTime", vec![json!(10)]),
            ],
        );

        assert!(results.iter().all(Result::is_ok));
        let names: Vec<_> = outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "Response is 200",
                "user.name equals Ann",
                "age is on the response object",
                "user.age is null",
                "Response time is less than 10ms",
            ]
        );
        assert!(!outcomes[4].passed);
    }

    #[test]
    fn test_missing_arguments() {
        let mut variables = VariableSnapshot::new();
        let (outcomes, results) = invoke_all(
            json!({"a": 1}),
            &mut variables,
            &[
                ("IsNull", vec![]),
                ("IsNotNull", vec![json!("")]),
                ("IsEqual", vec![json!("a")]),
                ("IsGreaterThan", vec![Value::Null, json!(1)]),
            ],
        );

        assert!(outcomes.is_empty());
        let messages: Vec<_> = results
            .into_iter()
            .map(|r| r.map_err(|e| e.to_string()).err().unwrap_or_default())
            .collect();
        assert_eq!(
            messages,
            vec![
                "Required property 'whitelist' not found in test IsNull",
                "Required property 'whitelist' not found in test IsNotNull",
                "Required property 'expected' not found in test IsEqual",
                "Required property 'field' not found in test IsGreaterThan",
            ]
        );
    }

    #[test]
    fn test_null_expected_is_a_value() {
        let mut variables = VariableSnapshot::new();
        let (outcomes, results) = invoke_all(
            json!({"deleted": null}),
            &mut variables,
            &[("IsEqual", vec![json!("deleted"), Value::Null])],
        );

        assert!(results[0].is_ok());
        assert_eq!(outcomes[0].name, "deleted equals null");
        assert!(outcomes[0].passed);
    }

    #[test]
    fn test_invalid_and_unknown() {
        let mut variables = VariableSnapshot::new();
        let (_, results) = invoke_all(
            json!({}),
            &mut variables,
            &[
                ("ResponseCode", vec![json!("200")]),
                ("IsNull", vec![json!([1, 2])]),
                ("Nope", vec![]),
                ("ResponseCode", vec![json!(70000)]),
            ],
        );

        assert!(matches!(
            results[0],
            Err(ApplicationError::InvalidArgument { argument: "code", .. })
        ));
        assert!(matches!(
            results[1],
            Err(ApplicationError::InvalidArgument { argument: "whitelist", .. })
        ));
        assert!(matches!(&results[2], Err(ApplicationError::UnknownCheck(name)) if name == "Nope"));
        assert!(results[3].is_err());
    }

    #[test]
    fn test_variable_functions() {
        let mut variables = VariableSnapshot::new();
        let (outcomes, results) = invoke_all(
            json!({}),
            &mut variables,
            &[
                ("SetVariable", vec![json!("token"), json!("abc")]),
                ("GetVariable", vec![json!("token")]),
                ("DeleteVariable", vec![json!("token")]),
                ("GetVariable", vec![json!("token")]),
                ("Description", vec![json!("status is fine")]),
                ("Response200", vec![]),
            ],
        );

        assert_eq!(results[1].as_ref().ok(), Some(&Some(json!("abc"))));
        assert_eq!(results[3].as_ref().ok(), Some(&Some(Value::Null)));
        assert_eq!(outcomes[0].name, "status is fine");
        assert!(variables.is_empty());
    }

    #[test]
    fn test_trailing_description_argument() {
        let mut variables = VariableSnapshot::new();
        let (outcomes, results) = invoke_all(
            json!({"count": 3}),
            &mut variables,
            &[
                ("Description", vec![json!("pending name")]),
                ("IsGreaterThan", vec![json!("count"), json!(1), json!("has items")]),
                ("ResponseCode", vec![Value::Null, json!("ok status")]),
                ("ResponseTime", vec![]),
            ],
        );

        assert!(results.iter().all(Result::is_ok));
        let names: Vec<_> = outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["has items", "ok status", "pending name"]);
        assert!(variables.is_empty());
    }

    #[test]
    fn test_empty_description_is_stored_and_falls_back() {
        let mut variables = VariableSnapshot::new();
        let (outcomes, results) = invoke_all(
            json!({}),
            &mut variables,
            &[
                ("Description", vec![json!("")]),
                ("Response200", vec![]),
                ("Description", vec![]),
            ],
        );

        assert!(results[0].is_ok());
        assert_eq!(outcomes[0].name, "Response is 200");
        assert!(matches!(
            results[2],
            Err(ApplicationError::MissingArgument { argument: "desc", .. })
        ));
        assert_eq!(variables.get("testDescription"), Some(&json!("")));
    }

    #[test]
    fn test_register_replaces_existing() {
        let mut registry = CheckRegistry::standard();
        let before = registry.names().count();
        registry.register("Response200", |t, _| {
            t.response_code(Some(299));
            Ok(None)
        });
        registry.register("Custom", |_, _| Ok(Some(json!("custom"))));

        assert_eq!(registry.names().count(), before + 1);
        assert!(registry.contains("Custom"));
        assert!(!CheckRegistry::empty().contains("Response200"));
    }
}
