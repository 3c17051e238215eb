//! Source comparator.
//!
//! Decompiler tests compare the engine's pretty-printed output against a
//! hand-written expectation. Formatting differs freely between the two, so
//! both sides are pushed through the same textual normalization first. No
//! parsing happens here.

use crate::error::AssertionFailure;
use regex::Regex;
use std::sync::LazyLock;

static PUNCTUATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([(){},.:\[\]])").expect("valid regex pattern"));
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\w+)").expect("valid regex pattern"));
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(/)? (\w+) (/)?>").expect("valid regex pattern"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex pattern"));
static EMPTY_NEW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"new (\w+)\s*\(\s*\)").expect("valid regex pattern"));

/// Normalizes a code string for formatting-insensitive comparison.
///
/// ```
/// use assert_harness::source::normalize_source;
///
/// assert_eq!(normalize_source("f(a,b)"), "f ( a , b )");
/// assert_eq!(normalize_source("x = new Foo();"), "x = new Foo ;");
/// ```
pub fn normalize_source(text: &str) -> String {
    let padded = PUNCTUATION.replace_all(text, " $1 ");
    let padded = WORD.replace_all(&padded, " $1 ");
    let tagged = TAG.replace_all(&padded, "<$1$2$3>");
    let collapsed = WHITESPACE.replace_all(&tagged, " ");
    let result = EMPTY_NEW.replace_all(&collapsed, "new $1");
    result.trim().to_string()
}

/// Compares two code strings modulo formatting.
///
/// On mismatch the failure shows both strings as given, not their
/// normalized forms.
pub fn compare_source(expected: &str, actual: &str, label: &str) -> Result<(), AssertionFailure> {
    if normalize_source(expected) == normalize_source(actual) {
        return Ok(());
    }
    Err(AssertionFailure::with_message(
        format!("{}\nexpected:\n{}\nactual:\n{}", label, expected, actual),
        expected.to_string(),
        actual.to_string(),
        Some(label),
    ))
}
