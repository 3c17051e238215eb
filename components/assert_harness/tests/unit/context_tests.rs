//! Unit tests for TestRunContext

use assert_harness::{HarnessConfig, TestRunContext};
use core_types::{ErrorKind, Intrinsics, Value};
use std::rc::Rc;

/// A script host that understands just enough to exercise the context:
/// sources containing `@syntax` fail to compile, sources starting with
/// `throw` throw a TypeError, everything else evaluates to undefined.
fn toy_host(intrinsics: Rc<Intrinsics>) -> impl FnMut(&str) -> Result<Value, Value> {
    move |source: &str| {
        if source.contains("@syntax") {
            Err(intrinsics.error(ErrorKind::SyntaxError, "missing ; before statement"))
        } else if source.starts_with("throw") {
            Err(intrinsics.error(ErrorKind::TypeError, "thrown"))
        } else {
            Ok(Value::Undefined)
        }
    }
}

#[test]
fn test_successful_assertions_are_recorded() {
    let mut ctx = TestRunContext::new();
    ctx.assert_same(&Value::from(1), &Value::from(1), Some("one")).unwrap();
    ctx.assert_true(&Value::Boolean(true), None).unwrap();
    ctx.assert_not_same(&Value::Number(0.0), &Value::Number(-0.0), Some("zeros"))
        .unwrap();

    let descriptions: Vec<&str> = ctx.registry().iter().map(|e| e.description()).collect();
    assert_eq!(descriptions, vec!["one", "assertTrue", "zeros"]);
    assert!(ctx.registry().iter().all(|e| e.passed()));
}

#[test]
fn test_failed_assertion_is_not_recorded() {
    let mut ctx = TestRunContext::new();
    let err = ctx
        .assert_equals(&Value::from("a"), &Value::from("b"), Some("letters"))
        .unwrap_err();
    assert_eq!(
        err.as_assertion().unwrap().message,
        "letters: expected <\"a\"> found <\"b\">"
    );
    assert!(ctx.registry().is_empty());
}

#[test]
fn test_record_does_not_fail() {
    let mut ctx = TestRunContext::new();
    let passed = ctx.record("mismatch", Value::from(1), Value::from(2)).passed();
    assert!(!passed);
    assert_eq!(ctx.registry().failed_count(), 1);
}

#[test]
fn test_record_cyclic_values() {
    let cyclic = |head: &str| {
        let a = Value::array(vec![Value::from(head)]);
        if let Value::Array(items) = &a {
            items.borrow_mut().push(a.clone());
        }
        a
    };
    let mut ctx = TestRunContext::new();
    assert!(ctx.record("equal", cyclic("x"), cyclic("x")).passed());
    assert!(!ctx.record("unequal", cyclic("x"), cyclic("y")).passed());
    assert!(ctx.assert_equals(&cyclic("x"), &Value::Null, None).is_err());

    let report = ctx.into_report();
    assert_eq!(
        report.failures[0].1,
        "Expected value '[\"x\", [...]]', Actual value '[\"y\", [...]]'"
    );
}

#[test]
fn test_report_match() {
    let mut ctx = TestRunContext::new();
    let e = ctx
        .report_match(r"^\d+ms$", Value::from("15ms"), "timing")
        .unwrap();
    assert!(e.passed());
    assert!(ctx.report_match("[", Value::from(""), "bad").unwrap_err().is_usage());
}

#[test]
fn test_compare_source_records_without_host() {
    let mut ctx = TestRunContext::new();
    let passed = ctx
        .compare_source("function f(){}", "function f() {\n}", "decompile")
        .passed();
    assert!(passed);
    assert_eq!(ctx.registry().len(), 1);

    let e = ctx.compare_source("a + b", "a - b", "op");
    assert!(!e.passed());
    assert_eq!(e.reason(), "op\nexpected:\na + b\nactual:\na - b");
}

#[test]
fn test_compare_source_compile_check() {
    let intrinsics = Rc::new(Intrinsics::new());
    let mut ctx = TestRunContext::new().with_host(toy_host(intrinsics));

    ctx.compare_source("x = 1;", "x  =  1;", "clean");
    ctx.compare_source("x = 1;", "x = 1; @syntax", "broken");

    let records: Vec<(String, bool)> = ctx
        .registry()
        .iter()
        .map(|e| (e.description().to_string(), e.passed()))
        .collect();
    assert_eq!(
        records,
        vec![
            ("clean".to_string(), true),
            ("clean: compile actual".to_string(), true),
            ("broken".to_string(), false),
            ("broken: compile actual".to_string(), false),
        ]
    );
    let last = &ctx.registry()[3];
    assert_eq!(last.actual(), &Value::from("SyntaxError: missing ; before statement"));
}

#[test]
fn test_compare_source_skips_compile_check_for_invalid_expected() {
    let intrinsics = Rc::new(Intrinsics::new());
    let mut ctx = TestRunContext::new().with_host(toy_host(intrinsics));
    ctx.compare_source("@syntax", "@syntax", "both invalid");
    assert_eq!(ctx.registry().len(), 1);
}

#[test]
fn test_assert_throws_with_host() {
    let intrinsics = Rc::new(Intrinsics::new());
    let type_error = intrinsics.error_constructor_value(ErrorKind::TypeError);
    let mut ctx = TestRunContext::new().with_host(toy_host(intrinsics));

    ctx.assert_throws(&Value::from("throw 1"), Some(&type_error), None)
        .unwrap();
    let err = ctx
        .assert_throws(&Value::from("1 + 1"), Some(&type_error), None)
        .unwrap_err();
    assert_eq!(err.as_assertion().unwrap().message, "Did not throw exception");
    assert_eq!(ctx.registry().len(), 1);
}

#[test]
fn test_assert_throws_source_without_host() {
    let mut ctx = TestRunContext::new();
    assert!(ctx
        .assert_throws(&Value::from("throw 1"), None, None)
        .unwrap_err()
        .is_usage());
}

#[test]
fn test_assert_instanceof_records_constructor() {
    let intrinsics = Intrinsics::new();
    let mut ctx = TestRunContext::new();
    let err = intrinsics.error(ErrorKind::URIError, "malformed");
    let error = intrinsics.error_constructor_value(ErrorKind::Error);
    ctx.assert_instanceof(&err, &error).unwrap();
    assert_eq!(ctx.registry()[0].description(), "assertInstanceof");
}

#[test]
fn test_assert_unreachable_always_fails() {
    let mut ctx = TestRunContext::new();
    assert!(ctx.assert_unreachable(None).is_err());
    assert!(ctx.registry().is_empty());
}

#[test]
fn test_custom_config() {
    let ctx = TestRunContext::with_config(HarnessConfig::default().with_later_attempts(2));
    assert_eq!(ctx.config().later_attempts, 2);
    assert_eq!(ctx.pending_count(), 0);
}

#[test]
fn test_shell_helpers_do_not_record() {
    let ctx = TestRunContext::new();
    ctx.write_header("Array.prototype.find");
    ctx.print_bug_number(346642);
    ctx.print_status("line one\nline two");
    assert!(ctx.registry().is_empty());
}

#[test]
fn test_into_report() {
    let mut ctx = TestRunContext::new();
    ctx.assert_null(&Value::Null, None).unwrap();
    ctx.report_compare(Value::from(1), Value::from(2), "off by one");
    let report = ctx.into_report();
    assert_eq!(report.total, 2);
    assert_eq!(report.failed, 1);
    assert!(!report.is_success());
}
