use crate::registry::{Expectation, Registry};
use serde::{Deserialize, Serialize};

/// Run report with statistics and failure details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Total number of expectations recorded
    pub total: usize,
    /// Number of expectations that passed
    pub passed: usize,
    /// Number of expectations that failed
    pub failed: usize,
    /// List of failures with (description, reason)
    pub failures: Vec<(String, String)>,
}

impl RunReport {
    /// Create a new empty report
    pub fn new() -> Self {
        Self {
            total: 0,
            passed: 0,
            failed: 0,
            failures: Vec::new(),
        }
    }

    /// Build a report from everything in `registry`
    pub fn from_registry(registry: &Registry) -> Self {
        let mut report = Self::new();
        for expectation in registry {
            report.add_expectation(expectation);
        }
        report
    }

    /// Add one expectation to the report
    pub fn add_expectation(&mut self, expectation: &Expectation) {
        self.total += 1;
        if expectation.passed() {
            self.passed += 1;
        } else {
            self.failed += 1;
            self.failures.push((
                expectation.description().to_string(),
                expectation.reason().to_string(),
            ));
        }
    }

    /// Calculate the pass rate as a percentage
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }

    /// Generate a human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "Results:\n\
             Total: {}\n\
             Passed: {} ({:.1}%)\n\
             Failed: {}",
            self.total,
            self.passed,
            self.pass_rate(),
            self.failed
        )
    }

    /// Generate a detailed report including failures
    pub fn detailed_summary(&self) -> String {
        let mut output = self.summary();

        if !self.failures.is_empty() {
            output.push_str("\n\nFailures:\n");
            for (description, reason) in &self.failures {
                output.push_str(&format!("  - {}\n    Reason: {}\n", description, reason));
            }
        }

        output
    }

    /// Merge another report into this one
    pub fn merge(&mut self, other: &RunReport) {
        self.total += other.total;
        self.passed += other.passed;
        self.failed += other.failed;
        self.failures.extend(other.failures.iter().cloned());
    }

    /// Check if nothing failed
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    /// Export report as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Import report from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl From<&Registry> for RunReport {
    fn from(registry: &Registry) -> Self {
        Self::from_registry(registry)
    }
}
