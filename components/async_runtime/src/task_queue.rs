//! Task and microtask queue management.
//!
//! This module provides the task and microtask queues used by the event loop.
//! Callbacks may either run standalone or receive the event loop so they can
//! schedule follow-up work.

use crate::EventLoop;
use core_types::{JsError, Value};
use std::collections::VecDeque;

type PlainCallback = Box<dyn FnOnce() -> Result<Value, JsError>>;
type LoopCallback = Box<dyn FnOnce(&mut EventLoop) -> Result<Value, JsError>>;

enum Callback {
    Plain(PlainCallback),
    WithLoop(LoopCallback),
}

impl Callback {
    fn invoke(self, event_loop: &mut EventLoop) -> Result<Value, JsError> {
        match self {
            Callback::Plain(f) => f(),
            Callback::WithLoop(f) => f(event_loop),
        }
    }
}

/// A task to be executed by the event loop.
///
/// Tasks represent work to be done in a later iteration of the event loop,
/// such as timer callbacks.
pub struct Task {
    callback: Callback,
}

impl Task {
    /// Creates a new Task from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() -> Result<Value, JsError> + 'static,
    {
        Self {
            callback: Callback::Plain(Box::new(f)),
        }
    }

    /// Creates a new Task that has access to the event loop.
    ///
    /// This allows tasks to enqueue more tasks or microtasks.
    pub fn with_event_loop<F>(f: F) -> Self
    where
        F: FnOnce(&mut EventLoop) -> Result<Value, JsError> + 'static,
    {
        Self {
            callback: Callback::WithLoop(Box::new(f)),
        }
    }

    /// Executes the task.
    pub fn run(self, event_loop: &mut EventLoop) -> Result<Value, JsError> {
        self.callback.invoke(event_loop)
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Task {{ ... }}")
    }
}

/// A microtask to be executed by the event loop.
///
/// Microtasks model promise reactions: they run before any further task.
pub struct MicroTask {
    callback: Callback,
}

impl MicroTask {
    /// Creates a new MicroTask from a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce() -> Result<Value, JsError> + 'static,
    {
        Self {
            callback: Callback::Plain(Box::new(f)),
        }
    }

    /// Creates a new MicroTask that has access to the event loop.
    ///
    /// A microtask enqueued from here runs in the next generation.
    pub fn with_event_loop<F>(f: F) -> Self
    where
        F: FnOnce(&mut EventLoop) -> Result<Value, JsError> + 'static,
    {
        Self {
            callback: Callback::WithLoop(Box::new(f)),
        }
    }

    /// Executes the microtask.
    pub fn run(self, event_loop: &mut EventLoop) -> Result<Value, JsError> {
        self.callback.invoke(event_loop)
    }
}

impl std::fmt::Debug for MicroTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MicroTask {{ ... }}")
    }
}

/// A queue for tasks.
///
/// Tasks are processed in FIFO order, one at a time.
#[derive(Debug, Default)]
pub struct TaskQueue {
    queue: VecDeque<Task>,
}

impl TaskQueue {
    /// Creates a new empty TaskQueue.
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Adds a task to the end of the queue.
    pub fn enqueue(&mut self, task: Task) {
        self.queue.push_back(task);
    }

    /// Removes and returns the next task from the queue.
    pub fn dequeue(&mut self) -> Option<Task> {
        self.queue.pop_front()
    }

    /// Returns true if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the number of tasks in the queue.
    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

/// A queue for microtasks.
#[derive(Debug, Default)]
pub struct MicrotaskQueue {
    queue: VecDeque<MicroTask>,
}

impl MicrotaskQueue {
    /// Creates a new empty MicrotaskQueue.
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Adds a microtask to the end of the queue.
    pub fn enqueue(&mut self, microtask: MicroTask) {
        self.queue.push_back(microtask);
    }

    /// Removes and returns the next microtask from the queue.
    pub fn dequeue(&mut self) -> Option<MicroTask> {
        self.queue.pop_front()
    }

    /// Returns true if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the number of microtasks in the queue.
    pub fn len(&self) -> usize {
        self.queue.len()
    }
}
