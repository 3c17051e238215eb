//! Event loop implementation.
//!
//! This module provides the event loop that stands in for the host's
//! "enqueue microtask" primitive. Besides the classic drain-everything
//! operations it offers generation-based ticks, which is the unit the
//! deferred assertion scheduler counts in.

use crate::task_queue::{MicroTask, MicrotaskQueue, Task, TaskQueue};
use core_types::JsError;

/// The JavaScript event loop.
///
/// Each classic iteration (turn) of the loop:
/// 1. Takes the oldest task from the task queue and executes it
/// 2. Drains all microtasks in the microtask queue
/// 3. Repeats
///
/// [`EventLoop::tick`] instead runs a single *generation*: the microtasks
/// that were queued when the tick began. Microtasks they enqueue wait for
/// the next tick.
///
/// # Examples
///
/// ```
/// use async_runtime::{EventLoop, Task};
/// use core_types::Value;
///
/// let mut event_loop = EventLoop::new();
///
/// event_loop.enqueue_task(Task::new(|| Ok(Value::Undefined)));
/// event_loop.run_until_done().unwrap();
/// ```
#[derive(Debug, Default)]
pub struct EventLoop {
    task_queue: TaskQueue,
    microtask_queue: MicrotaskQueue,
}

impl EventLoop {
    /// Creates a new EventLoop with empty queues.
    pub fn new() -> Self {
        Self {
            task_queue: TaskQueue::new(),
            microtask_queue: MicrotaskQueue::new(),
        }
    }

    /// Runs the event loop until all tasks and microtasks are processed.
    ///
    /// # Returns
    ///
    /// `Ok(())` if all tasks completed successfully, or an error if any task failed.
    pub fn run_until_done(&mut self) -> Result<(), JsError> {
        while !self.is_idle() {
            // Execute one task (if available)
            if let Some(task) = self.task_queue.dequeue() {
                task.run(self)?;
            }

            // Drain all microtasks
            self.run_all_microtasks()?;
        }

        Ok(())
    }

    /// Adds a task to the task queue.
    pub fn enqueue_task(&mut self, task: Task) {
        self.task_queue.enqueue(task);
    }

    /// Adds a microtask to the microtask queue.
    pub fn enqueue_microtask(&mut self, microtask: MicroTask) {
        self.microtask_queue.enqueue(microtask);
    }

    /// Returns true if the task queue is empty.
    pub fn is_task_queue_empty(&self) -> bool {
        self.task_queue.is_empty()
    }

    /// Returns true if the microtask queue is empty.
    pub fn is_microtask_queue_empty(&self) -> bool {
        self.microtask_queue.is_empty()
    }

    /// Returns true when neither tasks nor microtasks are queued.
    pub fn is_idle(&self) -> bool {
        self.task_queue.is_empty() && self.microtask_queue.is_empty()
    }

    /// Number of queued microtasks.
    pub fn pending_microtasks(&self) -> usize {
        self.microtask_queue.len()
    }

    /// Number of queued tasks.
    pub fn pending_tasks(&self) -> usize {
        self.task_queue.len()
    }

    /// Runs all microtasks in the queue until empty.
    ///
    /// New microtasks added during execution are also processed before this
    /// method returns.
    pub fn run_all_microtasks(&mut self) -> Result<(), JsError> {
        while let Some(microtask) = self.microtask_queue.dequeue() {
            microtask.run(self)?;
        }
        Ok(())
    }

    /// Processes one complete cycle: one task followed by all microtasks.
    pub fn process_one_cycle(&mut self) -> Result<(), JsError> {
        if let Some(task) = self.task_queue.dequeue() {
            task.run(self)?;
        }

        self.run_all_microtasks()
    }

    /// Runs exactly the microtasks queued before this call.
    ///
    /// Returns how many ran.
    pub fn run_microtask_generation(&mut self) -> Result<usize, JsError> {
        let generation = self.microtask_queue.len();
        for _ in 0..generation {
            match self.microtask_queue.dequeue() {
                Some(microtask) => {
                    microtask.run(self)?;
                }
                None => break,
            }
        }
        Ok(generation)
    }

    /// Advances the loop by one tick.
    ///
    /// Runs one microtask generation; if no microtasks are queued, runs the
    /// oldest task instead. Returns false if there was nothing to do.
    pub fn tick(&mut self) -> Result<bool, JsError> {
        if !self.microtask_queue.is_empty() {
            self.run_microtask_generation()?;
            return Ok(true);
        }
        match self.task_queue.dequeue() {
            Some(task) => {
                task.run(self)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
