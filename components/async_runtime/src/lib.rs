//! Async runtime for JavaScript execution.
//!
//! This crate provides the host scheduling primitive the harness consumes:
//! - [`EventLoop`] - Event loop coordinating task and microtask execution
//! - [`Task`] / [`MicroTask`] - Units of scheduled work
//! - [`TaskQueue`] / [`MicrotaskQueue`] - FIFO queues backing the loop
//!
//! Everything here is single-threaded: callbacks are not `Send`.
//!
//! # Examples
//!
//! ```
//! use async_runtime::{EventLoop, MicroTask};
//! use core_types::Value;
//!
//! let mut event_loop = EventLoop::new();
//! event_loop.enqueue_microtask(MicroTask::with_event_loop(|el| {
//!     el.enqueue_microtask(MicroTask::new(|| Ok(Value::Undefined)));
//!     Ok(Value::Undefined)
//! }));
//!
//! assert!(event_loop.tick().unwrap());
//! assert_eq!(event_loop.pending_microtasks(), 1);
//! event_loop.run_until_done().unwrap();
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod event_loop;
pub mod task_queue;

// Re-export main types at crate root
pub use event_loop::EventLoop;
pub use task_queue::{MicroTask, MicrotaskQueue, Task, TaskQueue};
