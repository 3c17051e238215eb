//! Core JavaScript value types and error handling.
//!
//! This crate provides the value vocabulary shared by the harness
//! components: a tagged value union, a minimal object model with prototype
//! chains, the native error constructors and host-side errors.
//!
//! # Overview
//!
//! - [`Value`] - Tagged representation of JavaScript values
//! - [`JsObject`] / [`JsFunction`] - Objects, constructors and prototype chains
//! - [`Intrinsics`] - `Object` and the native `Error` hierarchy
//! - [`JsError`] - Host-side errors
//! - [`ErrorKind`] - Types of JavaScript errors
//!
//! # Examples
//!
//! ```
//! use core_types::{ErrorKind, Intrinsics, Value};
//!
//! let num = Value::Number(42.0);
//! assert!(num.is_truthy());
//! assert_eq!(num.type_of(), "number");
//!
//! let intrinsics = Intrinsics::new();
//! let error = intrinsics.error(ErrorKind::TypeError, "undefined is not a function");
//! assert_eq!(error.to_string(), "TypeError: undefined is not a function");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod intrinsics;
mod object;
mod value;

pub use error::{ErrorKind, JsError};
pub use intrinsics::Intrinsics;
pub use object::{JsFunction, JsObject, NativeFn};
pub use value::{ArrayRef, Value};
