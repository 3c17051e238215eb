//! Deferred assertion scheduler.
//!
//! Promise tests cannot check their outcome synchronously: the value they
//! care about only settles after some microtasks have run. `assert_later`
//! registers a predicate that is re-checked once per [`DeferredScheduler::tick`]
//! until it holds or its retry budget runs out.
//!
//! A tick is one host microtask generation followed by one pass over the
//! pending assertions queued before the tick began.

use crate::config::HarnessConfig;
use crate::error::{HarnessError, HarnessResult};
use crate::registry::{Expectation, Registry};
use async_runtime::{EventLoop, MicroTask};
use core_types::Value;
use std::collections::VecDeque;
use std::fmt;

/// Label reported when the aggregate `assert_async_done` check gives up.
pub const ASYNC_DONE_LABEL: &str = "assertAsyncDone";

/// Label reported when `run_until_idle` hits `max_ticks`.
pub const SCHEDULER_LABEL: &str = "scheduler";

/// A predicate waiting to become true.
pub struct PendingAssertion {
    label: String,
    predicate: Box<dyn FnMut() -> bool>,
    attempts_remaining: u32,
}

impl PendingAssertion {
    /// Label the assertion was registered under.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Re-checks left before the assertion is exhausted.
    pub fn attempts_remaining(&self) -> u32 {
        self.attempts_remaining
    }
}

impl fmt::Debug for PendingAssertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingAssertion")
            .field("label", &self.label)
            .field("attempts_remaining", &self.attempts_remaining)
            .finish()
    }
}

/// What happened to one pending assertion during a tick.
enum Outcome {
    Converged(String),
    Retrying(PendingAssertion),
    Exhausted(String),
}

impl PendingAssertion {
    fn check(mut self) -> Outcome {
        if (self.predicate)() {
            Outcome::Converged(self.label)
        } else if self.attempts_remaining > 0 {
            self.attempts_remaining -= 1;
            Outcome::Retrying(self)
        } else {
            Outcome::Exhausted(self.label)
        }
    }
}

/// Drives the host event loop and re-checks pending assertions.
///
/// # Examples
///
/// ```
/// use assert_harness::{DeferredScheduler, HarnessConfig, Registry};
/// use async_runtime::MicroTask;
/// use core_types::Value;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let mut scheduler = DeferredScheduler::new(HarnessConfig::default());
/// let mut registry = Registry::new();
///
/// let resolved = Rc::new(Cell::new(false));
/// let r = resolved.clone();
/// scheduler.enqueue_microtask(MicroTask::new(move || {
///     r.set(true);
///     Ok(Value::Undefined)
/// }));
///
/// let r = resolved.clone();
/// scheduler.assert_later("resolved", move || r.get()).unwrap();
/// scheduler.assert_async_done(&mut registry).unwrap();
///
/// assert_eq!(registry.len(), 1);
/// assert!(registry.iter().all(|e| e.passed()));
/// ```
pub struct DeferredScheduler {
    host: EventLoop,
    queue: VecDeque<PendingAssertion>,
    unresolved: usize,
    /// Unresolved ticks seen by an armed `assert_async_done` check.
    async_done: Option<u32>,
    ticks: u64,
    config: HarnessConfig,
}

impl DeferredScheduler {
    /// Creates a scheduler with its own event loop.
    pub fn new(config: HarnessConfig) -> Self {
        Self::with_event_loop(EventLoop::new(), config)
    }

    /// Creates a scheduler driving an existing event loop.
    pub fn with_event_loop(host: EventLoop, config: HarnessConfig) -> Self {
        Self {
            host,
            queue: VecDeque::new(),
            unresolved: 0,
            async_done: None,
            ticks: 0,
            config,
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// The host event loop.
    pub fn event_loop(&self) -> &EventLoop {
        &self.host
    }

    /// Mutable access to the host event loop, e.g. to queue tasks.
    pub fn event_loop_mut(&mut self) -> &mut EventLoop {
        &mut self.host
    }

    /// Queues a host microtask; it runs on the next tick.
    pub fn enqueue_microtask(&mut self, microtask: MicroTask) {
        self.host.enqueue_microtask(microtask);
    }

    /// Number of assertions that have not converged yet.
    pub fn pending_count(&self) -> usize {
        self.unresolved
    }

    /// Ticks driven so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Returns true when there is nothing left to run or re-check.
    pub fn is_idle(&self) -> bool {
        self.host.is_idle() && self.queue.is_empty() && self.async_done.is_none()
    }

    /// Registers `predicate` to be re-checked on each tick.
    ///
    /// The predicate must not hold yet; a check that is already true belongs
    /// in a synchronous assertion.
    pub fn assert_later<F>(
        &mut self,
        label: impl Into<String>,
        mut predicate: F,
    ) -> HarnessResult<()>
    where
        F: FnMut() -> bool + 'static,
    {
        let label = label.into();
        if predicate() {
            return Err(HarnessError::Usage(format!(
                "{}: predicate already holds when registered",
                label
            )));
        }
        tracing::debug!(label = %label, "deferred assertion scheduled");
        self.queue.push_back(PendingAssertion {
            label,
            predicate: Box::new(predicate),
            attempts_remaining: self.config.later_attempts,
        });
        self.unresolved += 1;
        Ok(())
    }

    /// Runs one tick.
    ///
    /// Converged assertions are recorded in `registry` as passing
    /// `(label, true, true)` expectations, in convergence order. An exhausted
    /// assertion is dropped, and any error disarms a running
    /// `assert_async_done` check.
    pub fn tick(&mut self, registry: &mut Registry) -> HarnessResult<()> {
        let result = self.step(registry);
        if result.is_err() {
            self.async_done = None;
        }
        result
    }

    fn step(&mut self, registry: &mut Registry) -> HarnessResult<()> {
        self.ticks += 1;
        self.host.tick()?;

        let generation = self.queue.len();
        for _ in 0..generation {
            let Some(pending) = self.queue.pop_front() else {
                break;
            };
            match pending.check() {
                Outcome::Converged(label) => {
                    tracing::info!("{} succeeded", label);
                    self.unresolved = self.unresolved.saturating_sub(1);
                    registry.push(Expectation::new(
                        label,
                        Value::Boolean(true),
                        Value::Boolean(true),
                    ));
                }
                Outcome::Retrying(pending) => {
                    tracing::debug!(
                        label = %pending.label,
                        remaining = pending.attempts_remaining,
                        "deferred assertion not yet true"
                    );
                    self.queue.push_back(pending);
                }
                Outcome::Exhausted(label) => {
                    self.unresolved = self.unresolved.saturating_sub(1);
                    let attempts = self.config.later_attempts + 1;
                    tracing::error!("{} FAILED after {} attempts", label, attempts);
                    return Err(HarnessError::SchedulingExhaustion { label, attempts });
                }
            }
        }

        if let Some(iteration) = self.async_done {
            if self.unresolved == 0 {
                tracing::info!("{} succeeded", ASYNC_DONE_LABEL);
                self.async_done = None;
            } else {
                let iteration = iteration + 1;
                if iteration > self.config.async_done_iterations {
                    tracing::error!(
                        "{} FAILED with {} assertions outstanding",
                        ASYNC_DONE_LABEL,
                        self.unresolved
                    );
                    self.async_done = None;
                    return Err(HarnessError::SchedulingExhaustion {
                        label: ASYNC_DONE_LABEL.to_string(),
                        attempts: iteration,
                    });
                }
                self.async_done = Some(iteration);
            }
        }
        Ok(())
    }

    /// Drives exactly `n` ticks, stopping early only on error.
    pub fn run_ticks(&mut self, n: u32, registry: &mut Registry) -> HarnessResult<()> {
        for _ in 0..n {
            self.tick(registry)?;
        }
        Ok(())
    }

    /// Drives ticks until nothing is queued, at most `max_ticks` of them.
    pub fn run_until_idle(&mut self, registry: &mut Registry) -> HarnessResult<()> {
        let mut driven = 0;
        while !self.is_idle() {
            if driven >= self.config.max_ticks {
                tracing::error!("{} FAILED: still busy after {} ticks", SCHEDULER_LABEL, driven);
                return Err(HarnessError::SchedulingExhaustion {
                    label: SCHEDULER_LABEL.to_string(),
                    attempts: driven,
                });
            }
            self.tick(registry)?;
            driven += 1;
        }
        Ok(())
    }

    /// Waits until every `assert_later` assertion has converged.
    ///
    /// Fails once more than `async_done_iterations` ticks pass with
    /// assertions still outstanding.
    pub fn assert_async_done(&mut self, registry: &mut Registry) -> HarnessResult<()> {
        self.async_done = Some(0);
        while self.async_done.is_some() {
            self.tick(registry)?;
        }
        Ok(())
    }
}

impl Default for DeferredScheduler {
    fn default() -> Self {
        Self::new(HarnessConfig::default())
    }
}

impl fmt::Debug for DeferredScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredScheduler")
            .field("host", &self.host)
            .field("queue", &self.queue)
            .field("unresolved", &self.unresolved)
            .field("async_done", &self.async_done)
            .field("ticks", &self.ticks)
            .field("config", &self.config)
            .finish()
    }
}
