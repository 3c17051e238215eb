//! Equality engine.
//!
//! Strict equality (`===`) is the baseline. Two exceptions are layered on
//! top: `NaN` equals `NaN`, and `+0` / `-0` are told apart by comparing
//! `1/expected` with `1/found` when both operands are zero. All functions in
//! this module are pure; turning a mismatch into a failure is the caller's
//! job.

use core_types::Value;
use std::cell::RefCell;
use std::rc::Rc;

/// Array pairs currently being compared by [`deep_equals`].
type Comparing = Vec<(*const RefCell<Vec<Value>>, *const RefCell<Vec<Value>>)>;

/// Why two values are not the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mismatch {
    /// Different `typeof` tags
    Type {
        /// `typeof expected`
        expected: &'static str,
        /// `typeof found`
        found: &'static str,
    },
    /// Same tag, different value (or different identity for references)
    Value,
    /// `+0` against `-0`
    SignedZero,
}

/// Outcome of [`compare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// The values are the same
    Equal,
    /// The values differ
    Mismatch(Mismatch),
}

impl Comparison {
    /// Returns true for [`Comparison::Equal`].
    pub fn is_equal(self) -> bool {
        matches!(self, Comparison::Equal)
    }
}

/// Compares two numbers under the harness rules.
fn compare_numbers(expected: f64, found: f64) -> Comparison {
    if expected == found {
        // +0 == -0 at this point; 1/x is +Infinity or -Infinity
        if expected == 0.0 && (1.0 / expected) != (1.0 / found) {
            return Comparison::Mismatch(Mismatch::SignedZero);
        }
        Comparison::Equal
    } else if expected.is_nan() && found.is_nan() {
        Comparison::Equal
    } else {
        Comparison::Mismatch(Mismatch::Value)
    }
}

/// Compares `expected` with `found`, one rule per tag.
///
/// # Examples
///
/// ```
/// use assert_harness::equality::{compare, Comparison, Mismatch};
/// use core_types::Value;
///
/// assert_eq!(compare(&Value::Number(f64::NAN), &Value::Number(f64::NAN)), Comparison::Equal);
/// assert_eq!(
///     compare(&Value::Number(0.0), &Value::Number(-0.0)),
///     Comparison::Mismatch(Mismatch::SignedZero)
/// );
/// ```
pub fn compare(expected: &Value, found: &Value) -> Comparison {
    match (expected, found) {
        (Value::Number(a), Value::Number(b)) => compare_numbers(*a, *b),
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => Comparison::Equal,
        (Value::Boolean(_), Value::Boolean(_))
        | (Value::String(_), Value::String(_))
        | (Value::Array(_), Value::Array(_))
        | (Value::Object(_), Value::Object(_))
        | (Value::Function(_), Value::Function(_)) => {
            if expected == found {
                Comparison::Equal
            } else {
                Comparison::Mismatch(Mismatch::Value)
            }
        }
        _ if expected.type_of() != found.type_of() => Comparison::Mismatch(Mismatch::Type {
            expected: expected.type_of(),
            found: found.type_of(),
        }),
        // Same typeof, different tag: null vs object, array vs object
        _ => Comparison::Mismatch(Mismatch::Value),
    }
}

/// `sameValue(expected, found)`.
///
/// ```
/// use assert_harness::equality::same_value;
/// use core_types::Value;
///
/// assert!(same_value(&Value::Number(f64::NAN), &Value::Number(f64::NAN)));
/// assert!(!same_value(&Value::Number(0.0), &Value::Number(-0.0)));
/// assert!(same_value(&Value::Number(-0.0), &Value::Number(-0.0)));
/// ```
pub fn same_value(expected: &Value, found: &Value) -> bool {
    compare(expected, found).is_equal()
}

/// `same_value` extended so that two arrays compare element-wise, recursively.
///
/// A pair of arrays reached again while it is still being compared counts
/// as equal, so self-referencing arrays terminate.
pub fn deep_equals(expected: &Value, found: &Value) -> bool {
    deep_equals_within(expected, found, &mut Vec::new())
}

fn deep_equals_within(expected: &Value, found: &Value, comparing: &mut Comparing) -> bool {
    match (expected, found) {
        (Value::Array(a), Value::Array(b)) => {
            if Rc::ptr_eq(a, b) {
                return true;
            }
            let pair = (Rc::as_ptr(a), Rc::as_ptr(b));
            if comparing.contains(&pair) {
                return true;
            }
            comparing.push(pair);
            let equal = {
                let (a, b) = (a.borrow(), b.borrow());
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|(x, y)| deep_equals_within(x, y, comparing))
            };
            comparing.pop();
            equal
        }
        _ => same_value(expected, found),
    }
}

/// First difference found by [`array_equals`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayMismatch {
    /// Lengths differ; elements were not inspected
    Length {
        /// `expected.length`
        expected: usize,
        /// `found.length`
        found: usize,
    },
    /// First element that is not the same value
    Element {
        /// Index of the element
        index: usize,
        /// How it differs
        mismatch: Mismatch,
    },
}

/// Compares lengths, then elements with [`compare`].
///
/// ```
/// use assert_harness::equality::{array_equals, ArrayMismatch};
/// use core_types::Value;
///
/// let a = [Value::from(1), Value::from(2), Value::from(3)];
/// assert!(array_equals(&a, &a.clone()).is_ok());
/// assert_eq!(
///     array_equals(&a, &a[..2]),
///     Err(ArrayMismatch::Length { expected: 3, found: 2 })
/// );
/// ```
pub fn array_equals(expected: &[Value], found: &[Value]) -> Result<(), ArrayMismatch> {
    if expected.len() != found.len() {
        return Err(ArrayMismatch::Length {
            expected: expected.len(),
            found: found.len(),
        });
    }
    for (index, (e, f)) in expected.iter().zip(found.iter()).enumerate() {
        if let Comparison::Mismatch(mismatch) = compare(e, f) {
            return Err(ArrayMismatch::Element { index, mismatch });
        }
    }
    Ok(())
}

/// Why `value instanceof constructor` does not hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstanceMismatch {
    /// The right-hand side is not a function
    NotAConstructor,
    /// The prototype chain does not contain `constructor.prototype`
    NotAnInstance {
        /// Name of the value's actual constructor, if one could be found
        actual_type: Option<String>,
    },
}

/// Checks `value instanceof constructor` by walking the prototype chain.
pub fn instance_of(value: &Value, constructor: &Value) -> Result<(), InstanceMismatch> {
    let Value::Function(ctor) = constructor else {
        return Err(InstanceMismatch::NotAConstructor);
    };
    let holds = match value {
        Value::Object(obj) => obj.inherits_from(ctor.prototype()),
        _ => false,
    };
    if holds {
        Ok(())
    } else {
        Err(InstanceMismatch::NotAnInstance {
            actual_type: actual_type_name(value),
        })
    }
}

/// `Object.getPrototypeOf(value).constructor.name`, falling back to
/// `String(constructor)` for anonymous constructors.
///
/// Primitives report the wrapper they would be boxed into; `null` and
/// `undefined` have no prototype and report `None`.
pub fn actual_type_name(value: &Value) -> Option<String> {
    match value {
        Value::Undefined | Value::Null => None,
        Value::Boolean(_) => Some("Boolean".to_string()),
        Value::Number(_) => Some("Number".to_string()),
        Value::String(_) => Some("String".to_string()),
        Value::Array(_) => Some("Array".to_string()),
        Value::Function(_) => Some("Function".to_string()),
        Value::Object(obj) => {
            let ctor = obj.prototype()?.constructor()?;
            if ctor.name().is_empty() {
                Some(Value::Function(ctor).to_string())
            } else {
                Some(ctor.name().to_string())
            }
        }
    }
}
