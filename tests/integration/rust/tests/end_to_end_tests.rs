//! End-to-end harness runs mixing every kind of check
//!
//! Each test plays the role of one conformance script: it prints its header,
//! performs synchronous and deferred checks and hands the final report back.

use assert_harness::{HarnessResult, RunReport, TestRunContext};
use async_runtime::MicroTask;
use core_types::{ErrorKind, Intrinsics, Value};
use integration_tests::toy_host;
use std::cell::RefCell;
use std::rc::Rc;

fn run_script(ctx: &mut TestRunContext, intrinsics: &Rc<Intrinsics>) -> HarnessResult<()> {
    ctx.write_header("Array.prototype.find");
    ctx.print_bug_number("none");

    // synchronous checks
    let found = Value::array(vec![Value::from(1), Value::Number(f64::NAN)]);
    let expected = Value::array(vec![Value::from(1), Value::Number(f64::NAN)]);
    ctx.assert_array_equals(&expected, &found, Some("NaN survives"))?;
    ctx.assert_same(&Value::Number(-0.0), &Value::Number(-0.0), Some("negative zero"))?;

    let type_error = intrinsics.error_constructor_value(ErrorKind::TypeError);
    let code = Value::from("throw TypeError: find is not callable");
    ctx.assert_throws(&code, Some(&type_error), None)?;

    // deferred check on a microtask-settled result
    let result = Rc::new(RefCell::new(Value::Undefined));
    let r = result.clone();
    ctx.enqueue_microtask(MicroTask::new(move || {
        *r.borrow_mut() = Value::from("fulfilled");
        Ok(Value::Undefined)
    }));
    let r = result.clone();
    ctx.assert_later("promise fulfilled", move || {
        matches!(&*r.borrow(), Value::String(s) if s == "fulfilled")
    })?;
    ctx.assert_async_done()?;

    // legacy comparisons
    let decompiled = "function (x) {\n    return x;\n}";
    ctx.compare_source("function(x){return x;}", decompiled, "identity");
    ctx.report_match(r"^fulfil", result.borrow().clone(), "state")?;
    Ok(())
}

#[test]
fn test_full_script_passes() {
    let intrinsics = Rc::new(Intrinsics::new());
    let mut ctx = TestRunContext::new().with_host(toy_host(intrinsics.clone()));

    run_script(&mut ctx, &intrinsics).unwrap();

    let report = ctx.into_report();
    // 4 synchronous/deferred passes, compareSource + compile check, reportMatch
    assert_eq!(report.total, 7);
    assert!(report.is_success(), "{}", report.detailed_summary());
}

#[test]
fn test_reports_merge_across_scripts() {
    let intrinsics = Rc::new(Intrinsics::new());
    let mut combined = RunReport::new();
    for _ in 0..3 {
        let mut ctx = TestRunContext::new().with_host(toy_host(intrinsics.clone()));
        run_script(&mut ctx, &intrinsics).unwrap();
        combined.merge(&ctx.report());
    }
    assert_eq!(combined.total, 21);
    assert_eq!(combined.pass_rate(), 100.0);
}

#[test]
fn test_compile_check_catches_broken_decompilation() {
    let intrinsics = Rc::new(Intrinsics::new());
    let mut ctx = TestRunContext::new().with_host(toy_host(intrinsics));

    ctx.compare_source("1;", "1; @@", "garbled");
    let report = ctx.report();
    assert_eq!(report.failed, 2);
    assert_eq!(report.failures[1].0, "garbled: compile actual");
    assert_eq!(
        report.failures[1].1,
        "Expected value '\"No Error\"', Actual value '\"SyntaxError: illegal character\"'"
    );
}

#[test]
fn test_script_stops_at_first_failure() {
    let mut ctx = TestRunContext::new();
    let outcome = (|| -> HarnessResult<()> {
        ctx.assert_true(&Value::Boolean(true), Some("first"))?;
        ctx.assert_equals(&Value::from(1), &Value::from(2), Some("second"))?;
        ctx.assert_true(&Value::Boolean(true), Some("third"))?;
        Ok(())
    })();

    let err = outcome.unwrap_err();
    assert_eq!(err.to_string(), "assertion failed: second: expected <1> found <2>");
    assert_eq!(ctx.registry().len(), 1);
}
