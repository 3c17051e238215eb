//! Harness configuration.
//!
//! The retry budgets of the deferred scheduler used to be loop constants in
//! the scripts; here they are explicit, serializable parameters.

use crate::error::{HarnessError, HarnessResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of re-checks granted to an `assert_later` predicate.
pub const DEFAULT_LATER_ATTEMPTS: u32 = 10;

/// Default number of unresolved ticks `assert_async_done` tolerates.
pub const DEFAULT_ASYNC_DONE_ITERATIONS: u32 = 10;

/// Default upper bound for `run_until_idle`.
pub const DEFAULT_MAX_TICKS: u32 = 1000;

/// Tunable parameters of a test run.
///
/// # Examples
///
/// ```
/// use assert_harness::HarnessConfig;
///
/// let config = HarnessConfig::from_yaml_str("later_attempts: 3").unwrap();
/// assert_eq!(config.later_attempts, 3);
/// assert_eq!(config.async_done_iterations, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Re-checks a pending assertion gets after its first failed tick
    pub later_attempts: u32,
    /// Unresolved ticks tolerated by `assert_async_done`
    pub async_done_iterations: u32,
    /// Hard cap on ticks driven by `run_until_idle`
    pub max_ticks: u32,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            later_attempts: DEFAULT_LATER_ATTEMPTS,
            async_done_iterations: DEFAULT_ASYNC_DONE_ITERATIONS,
            max_ticks: DEFAULT_MAX_TICKS,
        }
    }
}

impl HarnessConfig {
    /// Parses a YAML document; missing keys keep their defaults.
    pub fn from_yaml_str(yaml: &str) -> HarnessResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)
            .map_err(|e| HarnessError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()
    }

    /// Loads a YAML configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> HarnessResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            HarnessError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&text)
    }

    /// Sets the `assert_later` retry budget.
    pub fn with_later_attempts(mut self, attempts: u32) -> Self {
        self.later_attempts = attempts;
        self
    }

    /// Sets the `assert_async_done` budget.
    pub fn with_async_done_iterations(mut self, iterations: u32) -> Self {
        self.async_done_iterations = iterations;
        self
    }

    /// Sets the `run_until_idle` cap.
    pub fn with_max_ticks(mut self, ticks: u32) -> Self {
        self.max_ticks = ticks;
        self
    }

    /// Rejects budgets that could never let a check converge.
    pub fn validate(self) -> HarnessResult<Self> {
        if self.max_ticks == 0 {
            return Err(HarnessError::Config("max_ticks must be positive".to_string()));
        }
        if self.async_done_iterations == 0 {
            return Err(HarnessError::Config(
                "async_done_iterations must be positive".to_string(),
            ));
        }
        Ok(self)
    }
}
