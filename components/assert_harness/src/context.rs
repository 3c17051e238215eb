//! Per-run harness state.
//!
//! Scripts used to share one global list of test cases and a global
//! "outstanding async asserts" counter. A [`TestRunContext`] owns both, so
//! independent runs never see each other's records.

use crate::assertions;
use crate::config::HarnessConfig;
use crate::deferred::DeferredScheduler;
use crate::error::HarnessResult;
use crate::host::ScriptHost;
use crate::registry::{Expectation, Registry};
use crate::report::RunReport;
use crate::source;
use async_runtime::MicroTask;
use core_types::Value;
use std::fmt;

/// Expected outcome of the "does `actual` compile too" check.
const NO_ERROR: &str = "No Error";

/// Registry, deferred scheduler, configuration and optional script host for
/// one test run.
///
/// Synchronous `assert_*` methods record a passing [`Expectation`] on
/// success and return the failure without recording anything otherwise.
/// `record`, `report_compare`, `report_match` and `compare_source` always
/// record and never fail on a mismatch.
///
/// # Examples
///
/// ```
/// use assert_harness::TestRunContext;
/// use core_types::Value;
///
/// let mut ctx = TestRunContext::new();
/// ctx.assert_same(&Value::from(3), &Value::from(3), Some("sum")).unwrap();
/// ctx.report_compare(Value::from("a,b"), Value::from("a,b"), "join");
/// assert!(ctx.assert_same(&Value::Number(0.0), &Value::Number(-0.0), None).is_err());
///
/// let report = ctx.into_report();
/// assert_eq!(report.total, 2);
/// assert!(report.is_success());
/// ```
pub struct TestRunContext {
    registry: Registry,
    scheduler: DeferredScheduler,
    host: Option<Box<dyn ScriptHost>>,
}

impl TestRunContext {
    /// Creates a context with the default configuration and no script host.
    pub fn new() -> Self {
        Self::with_config(HarnessConfig::default())
    }

    /// Creates a context with `config`.
    pub fn with_config(config: HarnessConfig) -> Self {
        Self {
            registry: Registry::new(),
            scheduler: DeferredScheduler::new(config),
            host: None,
        }
    }

    /// Attaches a script host used for source-text `assert_throws` and the
    /// compile check in `compare_source`.
    pub fn with_host<H>(mut self, host: H) -> Self
    where
        H: ScriptHost + 'static,
    {
        self.host = Some(Box::new(host));
        self
    }

    /// Active configuration.
    pub fn config(&self) -> &HarnessConfig {
        self.scheduler.config()
    }

    /// Recorded expectations.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// The deferred scheduler, e.g. to reach its event loop.
    pub fn scheduler_mut(&mut self) -> &mut DeferredScheduler {
        &mut self.scheduler
    }

    fn host(&mut self) -> Option<&mut dyn ScriptHost> {
        match self.host.as_mut() {
            Some(host) => Some(host.as_mut() as &mut dyn ScriptHost),
            None => None,
        }
    }

    fn pass(&mut self, description: &str, expected: &Value, actual: &Value) {
        self.registry.push(Expectation::with_outcome(
            description,
            expected.clone(),
            actual.clone(),
            true,
            String::new(),
        ));
    }

    // Recording

    /// Records `expected` vs `actual`.
    pub fn record(
        &mut self,
        description: impl Into<String>,
        expected: Value,
        actual: Value,
    ) -> &Expectation {
        self.registry.record(description, expected, actual)
    }

    /// `reportCompare(expected, actual, description)`.
    pub fn report_compare(
        &mut self,
        expected: Value,
        actual: Value,
        description: impl Into<String>,
    ) -> &Expectation {
        self.registry.report_compare(expected, actual, description)
    }

    /// `reportMatch(pattern, actual, description)`.
    pub fn report_match(
        &mut self,
        pattern: &str,
        actual: Value,
        description: impl Into<String>,
    ) -> HarnessResult<&Expectation> {
        self.registry.report_match(pattern, actual, description)
    }

    /// `compareSource(expected, actual, label)`.
    ///
    /// Records the formatting-insensitive comparison. With a script host
    /// attached, also records whether `actual` evaluates cleanly whenever
    /// `expected` does, as `"<label>: compile actual"`.
    pub fn compare_source(&mut self, expected: &str, actual: &str, label: &str) -> &Expectation {
        tracing::debug!("expect:\n{}", expected);
        tracing::debug!("actual:\n{}", actual);
        let (passed, reason) = match source::compare_source(expected, actual, label) {
            Ok(()) => (true, String::new()),
            Err(failure) => (false, failure.message),
        };
        let index = self.registry.len();
        self.registry.push(Expectation::with_outcome(
            label,
            Value::from(expected),
            Value::from(actual),
            passed,
            reason,
        ));

        if let Some(host) = self.host.as_mut() {
            // Only meaningful when the expected text itself is valid.
            if host.evaluate(expected).is_ok() {
                let actual_compile = match host.evaluate(actual) {
                    Ok(_) => NO_ERROR.to_string(),
                    Err(thrown) => thrown.to_string(),
                };
                self.registry.record(
                    format!("{}: compile actual", label),
                    Value::from(NO_ERROR),
                    Value::from(actual_compile),
                );
            }
        }
        &self.registry[index]
    }

    // Synchronous assertions

    /// `assertSame(expected, found, label)`.
    pub fn assert_same(
        &mut self,
        expected: &Value,
        found: &Value,
        label: Option<&str>,
    ) -> HarnessResult<()> {
        assertions::assert_same(expected, found, label)?;
        self.pass(label.unwrap_or("assertSame"), expected, found);
        Ok(())
    }

    /// `assertEquals(expected, found, label)`.
    pub fn assert_equals(
        &mut self,
        expected: &Value,
        found: &Value,
        label: Option<&str>,
    ) -> HarnessResult<()> {
        assertions::assert_equals(expected, found, label)?;
        self.pass(label.unwrap_or("assertEquals"), expected, found);
        Ok(())
    }

    /// `assertNotSame(expected, found, label)`.
    pub fn assert_not_same(
        &mut self,
        expected: &Value,
        found: &Value,
        label: Option<&str>,
    ) -> HarnessResult<()> {
        assertions::assert_not_same(expected, found, label)?;
        self.pass(label.unwrap_or("assertNotSame"), expected, found);
        Ok(())
    }

    /// `assertTrue(value, label)`.
    pub fn assert_true(&mut self, value: &Value, label: Option<&str>) -> HarnessResult<()> {
        assertions::assert_true(value, label)?;
        self.pass(label.unwrap_or("assertTrue"), &Value::Boolean(true), value);
        Ok(())
    }

    /// `assertFalse(value, label)`.
    pub fn assert_false(&mut self, value: &Value, label: Option<&str>) -> HarnessResult<()> {
        assertions::assert_false(value, label)?;
        self.pass(label.unwrap_or("assertFalse"), &Value::Boolean(false), value);
        Ok(())
    }

    /// `assertNull(value, label)`.
    pub fn assert_null(&mut self, value: &Value, label: Option<&str>) -> HarnessResult<()> {
        assertions::assert_null(value, label)?;
        self.pass(label.unwrap_or("assertNull"), &Value::Null, value);
        Ok(())
    }

    /// `assertArrayEquals(expected, found, label)`.
    pub fn assert_array_equals(
        &mut self,
        expected: &Value,
        found: &Value,
        label: Option<&str>,
    ) -> HarnessResult<()> {
        assertions::assert_array_equals(expected, found, label)?;
        self.pass(label.unwrap_or("assertArrayEquals"), expected, found);
        Ok(())
    }

    /// `assertInstanceof(value, constructor)`.
    pub fn assert_instanceof(&mut self, value: &Value, constructor: &Value) -> HarnessResult<()> {
        assertions::assert_instanceof(value, constructor)?;
        self.pass("assertInstanceof", constructor, value);
        Ok(())
    }

    /// `assertThrows(code, type, cause)`.
    ///
    /// String `code` is evaluated by the attached script host.
    pub fn assert_throws(
        &mut self,
        code: &Value,
        expected_type: Option<&Value>,
        expected_cause: Option<&Value>,
    ) -> HarnessResult<()> {
        assertions::assert_throws(code, expected_type, expected_cause, self.host())?;
        let expected = expected_type.cloned().unwrap_or(Value::Undefined);
        self.pass("assertThrows", &expected, &expected);
        Ok(())
    }

    /// `assertUnreachable(label)`; always an error.
    pub fn assert_unreachable(&mut self, label: Option<&str>) -> HarnessResult<()> {
        assertions::assert_unreachable(label)?;
        Ok(())
    }

    // Deferred assertions

    /// `assertLater(predicate, label)`.
    pub fn assert_later<F>(&mut self, label: impl Into<String>, predicate: F) -> HarnessResult<()>
    where
        F: FnMut() -> bool + 'static,
    {
        self.scheduler.assert_later(label, predicate)
    }

    /// `assertAsyncDone()`; drives ticks until every deferred assertion
    /// has converged.
    pub fn assert_async_done(&mut self) -> HarnessResult<()> {
        self.scheduler.assert_async_done(&mut self.registry)
    }

    /// Queues a host microtask.
    pub fn enqueue_microtask(&mut self, microtask: MicroTask) {
        self.scheduler.enqueue_microtask(microtask);
    }

    /// Runs one scheduler tick.
    pub fn tick(&mut self) -> HarnessResult<()> {
        self.scheduler.tick(&mut self.registry)
    }

    /// Runs `n` scheduler ticks.
    pub fn run_ticks(&mut self, n: u32) -> HarnessResult<()> {
        self.scheduler.run_ticks(n, &mut self.registry)
    }

    /// Runs ticks until nothing is left to do.
    pub fn run_until_idle(&mut self) -> HarnessResult<()> {
        self.scheduler.run_until_idle(&mut self.registry)
    }

    /// Deferred assertions that have not converged yet.
    pub fn pending_count(&self) -> usize {
        self.scheduler.pending_count()
    }

    // Shell helpers

    /// `printStatus(message)`.
    pub fn print_status(&self, message: &str) {
        for line in message.lines() {
            tracing::info!("STATUS: {}", line);
        }
    }

    /// `printBugNumber(bug)`.
    pub fn print_bug_number(&self, bug: impl fmt::Display) {
        tracing::info!("BUGNUMBER: {}", bug);
    }

    /// `writeHeaderToLog(summary)`.
    pub fn write_header(&self, summary: &str) {
        tracing::info!("{}", summary);
    }

    // Reporting

    /// Snapshot of the run so far.
    pub fn report(&self) -> RunReport {
        RunReport::from_registry(&self.registry)
    }

    /// Finishes the run.
    pub fn into_report(self) -> RunReport {
        RunReport::from_registry(&self.registry)
    }
}

impl Default for TestRunContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TestRunContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestRunContext")
            .field("registry", &self.registry)
            .field("scheduler", &self.scheduler)
            .field("host", &self.host.is_some())
            .finish()
    }
}
