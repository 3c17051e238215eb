//! Error types for the harness.
//!
//! Every failure the harness can report is a [`HarnessError`]. Assertion
//! mismatches carry both rendered values so a log line is enough to
//! diagnose them.

use core_types::JsError;
use std::fmt;
use thiserror::Error;

/// An expected/found mismatch.
///
/// `expected` and `found` are the diagnostic renderings of the compared
/// values; `message` is the full human-readable text.
#[derive(Debug, Clone, PartialEq)]
pub struct AssertionFailure {
    /// Full failure text
    pub message: String,
    /// Rendering of the expected value
    pub expected: String,
    /// Rendering of the value actually found
    pub found: String,
    /// Optional caller-supplied label
    pub label: Option<String>,
}

impl AssertionFailure {
    /// A mismatch between two rendered values.
    pub fn mismatch(expected: String, found: String, label: Option<&str>) -> Self {
        let message = match label {
            Some(label) => format!("{}: expected <{}> found <{}>", label, expected, found),
            None => format!("expected <{}> found <{}>", expected, found),
        };
        Self {
            message,
            expected,
            found,
            label: label.map(str::to_string),
        }
    }

    /// A failure with a fixed message.
    pub fn with_message(
        message: impl Into<String>,
        expected: String,
        found: String,
        label: Option<&str>,
    ) -> Self {
        Self {
            message: message.into(),
            expected,
            found,
            label: label.map(str::to_string),
        }
    }
}

impl fmt::Display for AssertionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for AssertionFailure {}

/// Harness error taxonomy.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// Expected vs. actual mismatch
    #[error("assertion failed: {0}")]
    Assertion(#[from] AssertionFailure),

    /// A deferred assertion never converged within its budget
    #[error("{label} FAILED: did not converge after {attempts} attempts")]
    SchedulingExhaustion {
        /// Label of the pending assertion (or aggregate check)
        label: String,
        /// Number of evaluations performed
        attempts: u32,
    },

    /// The harness was used incorrectly by the test author
    #[error("usage error: {0}")]
    Usage(String),

    /// A host microtask or task failed while being driven by the scheduler
    #[error("host error: {0}")]
    Host(#[from] JsError),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(String),
}

impl HarnessError {
    /// Returns the assertion failure, if this is one.
    pub fn as_assertion(&self) -> Option<&AssertionFailure> {
        match self {
            HarnessError::Assertion(failure) => Some(failure),
            _ => None,
        }
    }

    /// Returns true for author mistakes.
    pub fn is_usage(&self) -> bool {
        matches!(self, HarnessError::Usage(_))
    }

    /// Returns true when a deferred check ran out of attempts.
    pub fn is_exhaustion(&self) -> bool {
        matches!(self, HarnessError::SchedulingExhaustion { .. })
    }
}

/// Result type for harness operations
pub type HarnessResult<T> = Result<T, HarnessError>;
