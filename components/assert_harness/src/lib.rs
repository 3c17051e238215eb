//! Assertion and comparison harness.
//!
//! This crate provides the primitives conformance scripts and promise tests
//! are written against:
//! - [`equality`] - `sameValue` with NaN and signed-zero rules, array and
//!   `instanceof` comparisons
//! - [`assertions`] - `assertSame`, `assertArrayEquals`, `assertThrows`, ...
//! - [`Registry`] - ordered record of `(expected, actual, passed)` expectations
//! - [`DeferredScheduler`] - assertions re-checked on each tick until they hold
//! - [`source`] - formatting-insensitive comparison of code strings
//! - [`TestRunContext`] - all of the above for a single run
//!
//! # Examples
//!
//! ```
//! use assert_harness::TestRunContext;
//! use async_runtime::MicroTask;
//! use core_types::Value;
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let mut ctx = TestRunContext::new();
//! ctx.assert_array_equals(
//!     &Value::array(vec![1.into(), 2.into()]),
//!     &Value::array(vec![1.into(), 2.into()]),
//!     Some("split"),
//! )
//! .unwrap();
//!
//! let settled = Rc::new(Cell::new(false));
//! let s = settled.clone();
//! ctx.enqueue_microtask(MicroTask::new(move || {
//!     s.set(true);
//!     Ok(Value::Undefined)
//! }));
//! let s = settled.clone();
//! ctx.assert_later("settled", move || s.get()).unwrap();
//! ctx.assert_async_done().unwrap();
//!
//! assert_eq!(ctx.report().passed, 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod assertions;
pub mod config;
pub mod context;
pub mod deferred;
pub mod equality;
pub mod error;
pub mod host;
pub mod logging;
pub mod registry;
pub mod report;
pub mod source;

// Re-export main types at crate root
pub use assertions::CaughtError;
pub use config::HarnessConfig;
pub use context::TestRunContext;
pub use deferred::{DeferredScheduler, PendingAssertion};
pub use equality::{same_value, Comparison, Mismatch};
pub use error::{AssertionFailure, HarnessError, HarnessResult};
pub use host::ScriptHost;
pub use registry::{Expectation, Registry};
pub use report::RunReport;
pub use source::{compare_source, normalize_source};
