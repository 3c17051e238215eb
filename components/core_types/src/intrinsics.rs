//! Built-in constructors a harness needs to reason about thrown values.

use crate::error::{ErrorKind, JsError};
use crate::object::{JsFunction, JsObject};
use crate::value::Value;
use std::collections::HashMap;
use std::rc::Rc;

/// The `Object` constructor plus the native error hierarchy.
///
/// `Error.prototype` carries `name` and `message`; every other error
/// constructor's prototype inherits from it and overrides `name`.
///
/// # Examples
///
/// ```
/// use core_types::{ErrorKind, Intrinsics};
///
/// let intrinsics = Intrinsics::new();
/// let err = intrinsics.error(ErrorKind::TypeError, "x");
/// assert_eq!(err.to_string(), "TypeError: x");
/// assert_eq!(err.get("name").to_string(), "TypeError");
/// ```
pub struct Intrinsics {
    object: Rc<JsFunction>,
    errors: HashMap<ErrorKind, Rc<JsFunction>>,
}

impl Intrinsics {
    /// Creates a fresh set of intrinsics.
    pub fn new() -> Self {
        let object = JsFunction::constructor("Object", None);
        let error = JsFunction::constructor("Error", Some(&object));
        error.prototype().set("name", Value::from("Error"));
        error.prototype().set("message", Value::from(""));

        let mut errors = HashMap::new();
        for kind in ErrorKind::ALL {
            let ctor = if kind == ErrorKind::Error {
                error.clone()
            } else {
                let ctor = JsFunction::constructor(kind.name(), Some(&error));
                ctor.prototype().set("name", Value::from(kind.name()));
                ctor
            };
            errors.insert(kind, ctor);
        }

        Self { object, errors }
    }

    /// The `Object` constructor.
    pub fn object_constructor(&self) -> &Rc<JsFunction> {
        &self.object
    }

    /// The constructor for `kind`.
    pub fn error_constructor(&self, kind: ErrorKind) -> &Rc<JsFunction> {
        // ALL is inserted in new(), so every kind is present
        &self.errors[&kind]
    }

    /// The constructor for `kind`, as a value.
    pub fn error_constructor_value(&self, kind: ErrorKind) -> Value {
        Value::Function(self.error_constructor(kind).clone())
    }

    /// Creates a plain object inheriting from `Object.prototype`.
    pub fn new_object(&self) -> Rc<JsObject> {
        self.object.construct()
    }

    /// `new <Kind>(message)`.
    pub fn error(&self, kind: ErrorKind, message: &str) -> Value {
        let obj = self.error_constructor(kind).construct();
        obj.set("message", Value::from(message));
        Value::Object(obj)
    }

    /// Converts a host error into the value a script would have caught.
    pub fn throw_value(&self, error: &JsError) -> Value {
        self.error(error.kind, &error.message)
    }
}

impl Default for Intrinsics {
    fn default() -> Self {
        Self::new()
    }
}
