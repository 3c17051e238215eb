//! Assertion library.
//!
//! Thin wrappers over the [equality engine](crate::equality). Each function
//! either returns `Ok(())` or a failure describing both sides; nothing is
//! recorded here.

use crate::equality::{self, ArrayMismatch, InstanceMismatch};
use crate::error::{AssertionFailure, HarnessError, HarnessResult};
use crate::host::ScriptHost;
use core_types::Value;
use std::cell::Ref;
use std::fmt;

/// A value thrown by code run under [`assert_throws`].
#[derive(Debug, Clone)]
pub struct CaughtError(pub Value);

impl fmt::Display for CaughtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fails unless `same_value(expected, found)`.
pub fn assert_same(
    expected: &Value,
    found: &Value,
    label: Option<&str>,
) -> Result<(), AssertionFailure> {
    if equality::same_value(expected, found) {
        Ok(())
    } else {
        Err(AssertionFailure::mismatch(expected.pretty(), found.pretty(), label))
    }
}

/// Same rule as [`assert_same`]; kept as a separate name for scripts that
/// read better with it.
pub fn assert_equals(
    expected: &Value,
    found: &Value,
    label: Option<&str>,
) -> Result<(), AssertionFailure> {
    assert_same(expected, found, label)
}

/// Fails if `same_value(expected, found)`.
pub fn assert_not_same(
    expected: &Value,
    found: &Value,
    label: Option<&str>,
) -> Result<(), AssertionFailure> {
    if equality::same_value(expected, found) {
        let message = match label {
            Some(label) => format!("{}: expected not <{}>", label, expected.pretty()),
            None => format!("expected not <{}>", expected.pretty()),
        };
        Err(AssertionFailure::with_message(message, expected.pretty(), found.pretty(), label))
    } else {
        Ok(())
    }
}

/// `assert_same(true, value)`.
pub fn assert_true(value: &Value, label: Option<&str>) -> Result<(), AssertionFailure> {
    assert_same(&Value::Boolean(true), value, label)
}

/// `assert_same(false, value)`.
pub fn assert_false(value: &Value, label: Option<&str>) -> Result<(), AssertionFailure> {
    assert_same(&Value::Boolean(false), value, label)
}

/// `assert_same(null, value)`.
pub fn assert_null(value: &Value, label: Option<&str>) -> Result<(), AssertionFailure> {
    assert_same(&Value::Null, value, label)
}

/// Always fails; marks code that must not run.
pub fn assert_unreachable(label: Option<&str>) -> Result<(), AssertionFailure> {
    let message = match label {
        Some(label) => format!("Fail: unreachable: {}", label),
        None => "Fail: unreachable".to_string(),
    };
    Err(AssertionFailure::with_message(
        message,
        "unreachable".to_string(),
        "reached".to_string(),
        label,
    ))
}

fn array_items<'v>(
    value: &'v Value,
    side: &str,
    prefix: &str,
) -> Result<Ref<'v, Vec<Value>>, AssertionFailure> {
    match value {
        Value::Array(items) => Ok(items.borrow()),
        other => Err(AssertionFailure::with_message(
            format!("{}{} is not an array: <{}>", prefix, side, other.pretty()),
            "array".to_string(),
            other.pretty(),
            None,
        )),
    }
}

/// Compares lengths first and, only when they agree, every element with
/// [`assert_same`] semantics.
///
/// A length mismatch is reported alone. Element failures name the index.
pub fn assert_array_equals(
    expected: &Value,
    found: &Value,
    label: Option<&str>,
) -> Result<(), AssertionFailure> {
    let prefix = label.map(|l| format!("{} - ", l)).unwrap_or_default();
    let expected_items = array_items(expected, "expected", &prefix)?;
    let found_items = array_items(found, "found", &prefix)?;

    match equality::array_equals(&expected_items, &found_items) {
        Ok(()) => Ok(()),
        Err(ArrayMismatch::Length { expected, found }) => Err(AssertionFailure::mismatch(
            expected.to_string(),
            found.to_string(),
            Some(&format!("{}array length", prefix)),
        )),
        Err(ArrayMismatch::Element { index, .. }) => Err(AssertionFailure::mismatch(
            expected_items[index].pretty(),
            found_items[index].pretty(),
            Some(&format!("{}array element at index {}", prefix, index)),
        )),
    }
}

/// Fails unless `value instanceof constructor`.
///
/// The message names the actual constructor when one can be found. A
/// non-function `constructor` is a usage error.
pub fn assert_instanceof(value: &Value, constructor: &Value) -> HarnessResult<()> {
    match equality::instance_of(value, constructor) {
        Ok(()) => Ok(()),
        Err(InstanceMismatch::NotAConstructor) => Err(HarnessError::Usage(format!(
            "right-hand side of instanceof is not a function: <{}>",
            constructor.pretty()
        ))),
        Err(InstanceMismatch::NotAnInstance { actual_type }) => {
            let type_name = match constructor.get("name") {
                Value::String(name) if !name.is_empty() => name,
                _ => constructor.to_string(),
            };
            let mut message = format!("Object <{}> is not an instance of <{}>", value, type_name);
            if let Some(actual) = &actual_type {
                message.push_str(&format!(" but of <{}>", actual));
            }
            Err(AssertionFailure::with_message(
                message,
                type_name,
                actual_type.unwrap_or_else(|| value.type_of().to_string()),
                None,
            )
            .into())
        }
    }
}

/// Runs `code` and reports its completion.
///
/// The outer `Result` is for harness misuse; the inner one separates normal
/// completion from a thrown value.
fn run_code(
    code: &Value,
    host: Option<&mut dyn ScriptHost>,
) -> HarnessResult<Result<Value, CaughtError>> {
    let completion = match code {
        Value::Function(function) => function.call(&[]),
        Value::String(source) => match host {
            Some(host) => host.evaluate(source),
            None => {
                return Err(HarnessError::Usage(
                    "assertThrows was given source text but no script host is attached".to_string(),
                ))
            }
        },
        other => {
            return Err(HarnessError::Usage(format!(
                "assertThrows expects a function or a source string, got {}",
                other.type_of()
            )))
        }
    };
    Ok(completion.map_err(CaughtError))
}

/// Runs `code` and requires it to throw.
///
/// * `code` - a callable function value, or source text evaluated by `host`
/// * `expected_type` - when a function, the thrown value must be an instance of it
/// * `expected_cause` - when supplied, the thrown value's `type` property must match it
///
/// The thrown value is swallowed on success.
///
/// # Examples
///
/// ```
/// use assert_harness::assertions::assert_throws;
/// use core_types::{ErrorKind, Intrinsics, Value};
/// use std::rc::Rc;
///
/// let intrinsics = Rc::new(Intrinsics::new());
/// let realm = intrinsics.clone();
/// let thrower = Value::native_fn("thrower", move |_| Err(realm.error(ErrorKind::TypeError, "x")));
/// let type_error = intrinsics.error_constructor_value(ErrorKind::TypeError);
///
/// assert!(assert_throws(&thrower, Some(&type_error), None, None).is_ok());
///
/// let quiet = Value::native_fn("quiet", |_| Ok(Value::Undefined));
/// let err = assert_throws(&quiet, Some(&type_error), None, None).unwrap_err();
/// assert_eq!(err.as_assertion().unwrap().message, "Did not throw exception");
/// ```
pub fn assert_throws(
    code: &Value,
    expected_type: Option<&Value>,
    expected_cause: Option<&Value>,
    host: Option<&mut dyn ScriptHost>,
) -> HarnessResult<()> {
    let thrown = match run_code(code, host)? {
        Ok(completion) => {
            let expected = expected_type
                .map(|t| t.get("name").to_string())
                .unwrap_or_else(|| "exception".to_string());
            return Err(AssertionFailure::with_message(
                "Did not throw exception",
                expected,
                format!("completion <{}>", completion.pretty()),
                None,
            )
            .into());
        }
        Err(CaughtError(thrown)) => thrown,
    };

    if let Some(constructor) = expected_type.filter(|t| matches!(t, Value::Function(_))) {
        assert_instanceof(&thrown, constructor)?;
    }
    if let Some(cause) = expected_cause {
        assert_equals(cause, &thrown.get("type"), Some("exception type"))?;
    }
    tracing::debug!("assertThrows caught expected exception: {}", thrown);
    Ok(())
}
