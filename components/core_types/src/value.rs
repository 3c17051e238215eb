//! JavaScript value representation as a tagged union.
//!
//! This module provides the core `Value` enum that represents every value a
//! script under test can hand to the harness. Primitives are stored inline;
//! arrays, objects and functions are shared references, so `===` on them is
//! reference identity.

use crate::object::{JsFunction, JsObject};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared, mutable array storage.
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;

/// Arrays currently being rendered, innermost last.
type Visiting = Vec<*const RefCell<Vec<Value>>>;

/// Represents any JavaScript value.
///
/// # Examples
///
/// ```
/// use core_types::Value;
///
/// let undefined = Value::Undefined;
/// let number = Value::Number(42.0);
///
/// assert!(!undefined.is_truthy());
/// assert!(number.is_truthy());
/// assert_eq!(number.type_of(), "number");
/// ```
#[derive(Clone)]
pub enum Value {
    /// JavaScript undefined value
    Undefined,
    /// JavaScript null value
    Null,
    /// JavaScript boolean (true or false)
    Boolean(bool),
    /// IEEE 754 double-precision number, including NaN and signed zeros
    Number(f64),
    /// JavaScript string value
    String(String),
    /// Array, shared by reference
    Array(ArrayRef),
    /// Plain object, shared by reference
    Object(Rc<JsObject>),
    /// Function object, shared by reference
    Function(Rc<JsFunction>),
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Null => write!(f, "Null"),
            Value::Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
            Value::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Array(_) => write!(f, "Array({})", self.pretty()),
            Value::Object(obj) => f.debug_tuple("Object").field(&obj.debug_name()).finish(),
            Value::Function(func) => f.debug_tuple("Function").field(&func.name()).finish(),
        }
    }
}

/// Strict equality (`===`).
///
/// `NaN !== NaN` and `0 === -0` hold here, exactly as in the language; the
/// harness layers its own rules on top of this baseline.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}

impl Value {
    /// Creates a new array value owning `items`.
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    /// Creates a callable function value backed by a native closure.
    ///
    /// The closure returns `Err(value)` to throw `value`.
    pub fn native_fn<F>(name: &str, body: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, Value> + 'static,
    {
        Value::Function(JsFunction::native(name, body))
    }

    /// Returns whether this value is truthy in JavaScript semantics.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_types::Value;
    ///
    /// assert!(!Value::Undefined.is_truthy());
    /// assert!(!Value::Number(0.0).is_truthy());
    /// assert!(!Value::Number(f64::NAN).is_truthy());
    /// assert!(!Value::from("").is_truthy());
    /// assert!(Value::array(vec![]).is_truthy());
    /// ```
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined => false,
            Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Number(n) => !n.is_nan() && *n != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) | Value::Function(_) => true,
        }
    }

    /// Returns the JavaScript `typeof` result for this value.
    ///
    /// # Examples
    ///
    /// ```
    /// use core_types::Value;
    ///
    /// assert_eq!(Value::Undefined.type_of(), "undefined");
    /// assert_eq!(Value::Null.type_of(), "object");
    /// assert_eq!(Value::array(vec![]).type_of(), "object");
    /// assert_eq!(Value::native_fn("f", |_| Ok(Value::Undefined)).type_of(), "function");
    /// ```
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "object", // JavaScript quirk
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) | Value::Object(_) => "object",
            Value::Function(_) => "function",
        }
    }

    /// Returns true for `NaN`.
    pub fn is_nan(&self) -> bool {
        matches!(self, Value::Number(n) if n.is_nan())
    }

    /// Returns the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the function, if this value is callable.
    pub fn as_function(&self) -> Option<&Rc<JsFunction>> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Reads a property, walking the prototype chain for objects.
    ///
    /// Arrays expose `length`; primitives expose nothing.
    pub fn get(&self, key: &str) -> Value {
        match self {
            Value::Object(obj) => obj.get(key),
            Value::Function(func) => match key {
                "name" => Value::String(func.name().to_string()),
                "prototype" => Value::Object(func.prototype().clone()),
                _ => Value::Undefined,
            },
            Value::Array(items) if key == "length" => Value::from(items.borrow().len() as f64),
            Value::String(s) if key == "length" => Value::from(s.encode_utf16().count() as f64),
            _ => Value::Undefined,
        }
    }

    /// Renders the value for diagnostics.
    ///
    /// Unlike `Display` (which follows `String(value)`), strings are quoted,
    /// `-0` is shown with its sign and arrays are bracketed. An array that
    /// contains itself is shown as `[...]` where it recurs.
    ///
    /// ```
    /// use core_types::Value;
    ///
    /// assert_eq!(Value::from("a").pretty(), "\"a\"");
    /// assert_eq!(Value::Number(-0.0).pretty(), "-0");
    /// assert_eq!(Value::array(vec![1.into(), "x".into()]).pretty(), "[1, \"x\"]");
    /// ```
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        self.write_pretty(&mut out, &mut Vec::new());
        out
    }

    fn write_pretty(&self, out: &mut String, visiting: &mut Visiting) {
        match self {
            Value::Number(n) if *n == 0.0 && n.is_sign_negative() => out.push_str("-0"),
            Value::String(s) => out.push_str(&format!("{:?}", s)),
            Value::Array(items) => {
                let ptr = Rc::as_ptr(items);
                if visiting.contains(&ptr) {
                    out.push_str("[...]");
                    return;
                }
                visiting.push(ptr);
                out.push('[');
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    item.write_pretty(out, visiting);
                }
                out.push(']');
                visiting.pop();
            }
            other => out.push_str(&other.to_string()),
        }
    }

    fn write_string(&self, f: &mut fmt::Formatter<'_>, visiting: &mut Visiting) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => format_number(f, *n),
            Value::String(s) => write!(f, "{}", s),
            Value::Array(items) => {
                // Array.prototype.join yields "" for an array already being joined
                let ptr = Rc::as_ptr(items);
                if visiting.contains(&ptr) {
                    return Ok(());
                }
                visiting.push(ptr);
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    // holes-like values join as empty
                    if !matches!(item, Value::Undefined | Value::Null) {
                        item.write_string(f, visiting)?;
                    }
                }
                visiting.pop();
                Ok(())
            }
            Value::Object(obj) => write!(f, "{}", obj),
            Value::Function(func) => write!(f, "function {}() {{ [native code] }}", func.name()),
        }
    }
}

/// Formats a number the way `Number.prototype.toString()` does.
///
/// Rust's `{:e}` already yields the shortest round-tripping digits; only the
/// placement of the decimal point differs.
fn format_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_nan() {
        return write!(f, "NaN");
    }
    if n.is_infinite() {
        return write!(f, "{}Infinity", if n < 0.0 { "-" } else { "" });
    }
    if n == 0.0 {
        // -0 prints as 0
        return write!(f, "0");
    }
    if n < 0.0 {
        write!(f, "-")?;
    }

    let scientific = format!("{:e}", n.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((&scientific, "0"));
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let k = digits.len() as i32;
    // position of the decimal point relative to the first digit
    let point = exponent + 1;

    if k <= point && point <= 21 {
        write!(f, "{}{}", digits, "0".repeat((point - k) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        write!(f, "{}.{}", int, frac)
    } else if -6 < point && point <= 0 {
        write!(f, "0.{}{}", "0".repeat((-point) as usize), digits)
    } else {
        let (head, tail) = digits.split_at(1);
        let sign = if point > 0 { '+' } else { '-' };
        if tail.is_empty() {
            write!(f, "{}e{}{}", head, sign, (point - 1).abs())
        } else {
            write!(f, "{}.{}e{}{}", head, tail, sign, (point - 1).abs())
        }
    }
}

/// JavaScript `String(value)` conversion.
///
/// # Examples
///
/// ```
/// use core_types::Value;
///
/// assert_eq!(Value::Undefined.to_string(), "undefined");
/// assert_eq!(Value::Number(42.0).to_string(), "42");
/// assert_eq!(Value::Number(-0.0).to_string(), "0");
/// assert_eq!(Value::array(vec![1.into(), 2.into()]).to_string(), "1,2");
/// ```
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_string(f, &mut Vec::new())
    }
}
