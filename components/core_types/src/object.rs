//! Minimal object model: prototype chains, own properties and constructors.
//!
//! Only what an assertion harness needs to ask of a value is modelled here:
//! property reads along the prototype chain, `instanceof` walks and
//! `Object.getPrototypeOf(obj).constructor.name` introspection.

use crate::value::Value;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

/// Native function body. `Err` carries a thrown value.
pub type NativeFn = Rc<dyn Fn(&[Value]) -> Result<Value, Value>>;

/// A JavaScript object.
///
/// Prototype objects keep a weak link back to the function that owns them,
/// standing in for the `constructor` property without a reference cycle.
pub struct JsObject {
    prototype: Option<Rc<JsObject>>,
    properties: RefCell<BTreeMap<String, Value>>,
    constructor: RefCell<Weak<JsFunction>>,
}

impl JsObject {
    /// Creates an empty object whose `[[Prototype]]` is `prototype`.
    pub fn new(prototype: Option<Rc<JsObject>>) -> Rc<Self> {
        Rc::new(Self::bare(prototype))
    }

    fn bare(prototype: Option<Rc<JsObject>>) -> Self {
        Self {
            prototype,
            properties: RefCell::new(BTreeMap::new()),
            constructor: RefCell::new(Weak::new()),
        }
    }

    /// Returns `Object.getPrototypeOf(this)`.
    pub fn prototype(&self) -> Option<&Rc<JsObject>> {
        self.prototype.as_ref()
    }

    /// Sets an own property.
    pub fn set(&self, key: &str, value: Value) {
        self.properties.borrow_mut().insert(key.to_string(), value);
    }

    /// Returns true if `key` is an own property.
    pub fn has_own(&self, key: &str) -> bool {
        self.properties.borrow().contains_key(key)
    }

    /// Reads a property, walking the prototype chain.
    pub fn get(&self, key: &str) -> Value {
        if let Some(value) = self.properties.borrow().get(key) {
            return value.clone();
        }
        if key == "constructor" {
            if let Some(ctor) = self.constructor.borrow().upgrade() {
                return Value::Function(ctor);
            }
        }
        match &self.prototype {
            Some(proto) => proto.get(key),
            None => Value::Undefined,
        }
    }

    /// Resolves the `constructor` link along the prototype chain, starting at
    /// this object.
    pub fn constructor(&self) -> Option<Rc<JsFunction>> {
        match self.get("constructor") {
            Value::Function(ctor) => Some(ctor),
            _ => None,
        }
    }

    /// Returns true if `target` appears on this object's prototype chain.
    pub fn inherits_from(&self, target: &Rc<JsObject>) -> bool {
        let mut current = self.prototype.clone();
        while let Some(proto) = current {
            if Rc::ptr_eq(&proto, target) {
                return true;
            }
            current = proto.prototype.clone();
        }
        false
    }

    pub(crate) fn debug_name(&self) -> String {
        self.prototype
            .as_ref()
            .and_then(|p| p.constructor())
            .map(|c| c.name().to_string())
            .unwrap_or_else(|| "Object".to_string())
    }
}

/// `String(obj)`: error-shaped objects render as `name: message`.
impl fmt::Display for JsObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.get("name"), self.get("message")) {
            (Value::String(name), Value::String(message)) if message.is_empty() => {
                write!(f, "{}", name)
            }
            (Value::String(name), Value::String(message)) => write!(f, "{}: {}", name, message),
            _ => write!(f, "[object Object]"),
        }
    }
}

/// A JavaScript function object.
///
/// Every function owns a `prototype` object so it can serve as the right-hand
/// side of `instanceof`. A function without a native body behaves like an
/// empty function when called.
pub struct JsFunction {
    name: String,
    prototype: Rc<JsObject>,
    body: Option<NativeFn>,
}

impl JsFunction {
    /// Creates a constructor whose instances inherit from `parent`'s
    /// prototype (for example `TypeError` from `Error`).
    pub fn constructor(name: &str, parent: Option<&Rc<JsFunction>>) -> Rc<Self> {
        Self::build(name, parent.map(|p| p.prototype.clone()), None)
    }

    /// Creates a callable function backed by a native closure.
    pub fn native<F>(name: &str, body: F) -> Rc<Self>
    where
        F: Fn(&[Value]) -> Result<Value, Value> + 'static,
    {
        Self::build(name, None, Some(Rc::new(body)))
    }

    fn build(name: &str, parent_proto: Option<Rc<JsObject>>, body: Option<NativeFn>) -> Rc<Self> {
        Rc::new_cyclic(|weak| {
            let prototype = JsObject::bare(parent_proto);
            *prototype.constructor.borrow_mut() = weak.clone();
            Self {
                name: name.to_string(),
                prototype: Rc::new(prototype),
                body,
            }
        })
    }

    /// The function's `name`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The function's `prototype` object.
    pub fn prototype(&self) -> &Rc<JsObject> {
        &self.prototype
    }

    /// Calls the function. `Err` is a thrown value.
    pub fn call(&self, args: &[Value]) -> Result<Value, Value> {
        match &self.body {
            Some(body) => body(args),
            None => Ok(Value::Undefined),
        }
    }

    /// Creates a fresh instance (`new F()` without running a body).
    pub fn construct(&self) -> Rc<JsObject> {
        JsObject::new(Some(self.prototype.clone()))
    }
}
