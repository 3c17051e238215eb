//! Test case registry.
//!
//! An ordered, append-only list of [`Expectation`]s. Records are never
//! mutated or removed; re-checking something means recording it again.

use crate::equality;
use crate::error::{HarnessError, HarnessResult};
use core_types::Value;
use regex::Regex;

/// One recorded `(expected, actual, passed)` triple.
#[derive(Debug, Clone)]
pub struct Expectation {
    description: String,
    expected: Value,
    actual: Value,
    passed: bool,
    reason: String,
}

impl Expectation {
    /// Evaluates `expected` against `actual` and freezes the outcome.
    pub fn new(description: impl Into<String>, expected: Value, actual: Value) -> Self {
        let passed = equality::deep_equals(&expected, &actual);
        let reason = if passed {
            String::new()
        } else {
            failure_reason(&expected, &actual)
        };
        Self::with_outcome(description, expected, actual, passed, reason)
    }

    /// Builds a record whose outcome was decided elsewhere.
    pub(crate) fn with_outcome(
        description: impl Into<String>,
        expected: Value,
        actual: Value,
        passed: bool,
        reason: String,
    ) -> Self {
        Self {
            description: description.into(),
            expected,
            actual,
            passed,
            reason,
        }
    }

    /// What was being checked.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The expected value.
    pub fn expected(&self) -> &Value {
        &self.expected
    }

    /// The value actually produced.
    pub fn actual(&self) -> &Value {
        &self.actual
    }

    /// Whether the expectation held when it was recorded.
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Empty when passed; otherwise why not.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// Explains a failed comparison the way legacy `reportCompare` did.
fn failure_reason(expected: &Value, actual: &Value) -> String {
    if expected.type_of() != actual.type_of() {
        format!(
            "Type mismatch, expected type {}, actual type {}",
            expected.type_of(),
            actual.type_of()
        )
    } else {
        format!(
            "Expected value '{}', Actual value '{}'",
            expected.pretty(),
            actual.pretty()
        )
    }
}

/// Ordered list of everything recorded during a run.
///
/// # Examples
///
/// ```
/// use assert_harness::Registry;
/// use core_types::Value;
///
/// let mut registry = Registry::new();
/// assert!(registry.record("1 + 1", Value::from(2), Value::from(2)).passed());
/// assert!(!registry.record("0 === -0", Value::Number(0.0), Value::Number(-0.0)).passed());
/// assert_eq!(registry.len(), 2);
/// assert_eq!(registry.failed_count(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Registry {
    expectations: Vec<Expectation>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            expectations: Vec::new(),
        }
    }

    /// Records `expected` vs `actual` and returns the stored record.
    pub fn record(
        &mut self,
        description: impl Into<String>,
        expected: Value,
        actual: Value,
    ) -> &Expectation {
        self.push(Expectation::new(description, expected, actual))
    }

    /// `reportCompare(expected, actual, description)`; same as [`Registry::record`]
    /// with the legacy argument order.
    pub fn report_compare(
        &mut self,
        expected: Value,
        actual: Value,
        description: impl Into<String>,
    ) -> &Expectation {
        self.record(description, expected, actual)
    }

    /// `reportMatch(pattern, actual, description)`.
    ///
    /// Passes when `actual` is a string matching `pattern`. The pattern text
    /// is stored as the expected value.
    pub fn report_match(
        &mut self,
        pattern: &str,
        actual: Value,
        description: impl Into<String>,
    ) -> HarnessResult<&Expectation> {
        let regex = Regex::new(pattern)
            .map_err(|e| HarnessError::Usage(format!("invalid pattern {:?}: {}", pattern, e)))?;
        let (passed, reason) = match &actual {
            Value::String(text) if regex.is_match(text) => (true, String::new()),
            Value::String(_) => (
                false,
                format!("Expected match to '{}', Actual value '{}'", pattern, actual.pretty()),
            ),
            other => (
                false,
                format!(
                    "Type mismatch, expected type string, actual type {}",
                    other.type_of()
                ),
            ),
        };
        let expectation = Expectation::with_outcome(
            description,
            Value::String(pattern.to_string()),
            actual,
            passed,
            reason,
        );
        Ok(self.push(expectation))
    }

    /// Appends a prepared record.
    pub(crate) fn push(&mut self, expectation: Expectation) -> &Expectation {
        if expectation.passed() {
            tracing::debug!("PASSED! {}", expectation.description());
        } else {
            tracing::warn!(
                "FAILED! {} : {}",
                expectation.description(),
                expectation.reason()
            );
        }
        let index = self.expectations.len();
        self.expectations.push(expectation);
        &self.expectations[index]
    }

    /// Iterates over records in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Expectation> {
        self.expectations.iter()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.expectations.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.expectations.is_empty()
    }

    /// Number of passed records.
    pub fn passed_count(&self) -> usize {
        self.iter().filter(|e| e.passed()).count()
    }

    /// Number of failed records.
    pub fn failed_count(&self) -> usize {
        self.len() - self.passed_count()
    }

    /// Failed records, in insertion order.
    pub fn failures(&self) -> impl Iterator<Item = &Expectation> {
        self.iter().filter(|e| !e.passed())
    }
}

impl std::ops::Index<usize> for Registry {
    type Output = Expectation;

    fn index(&self, index: usize) -> &Expectation {
        &self.expectations[index]
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Expectation;
    type IntoIter = std::slice::Iter<'a, Expectation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
