//! Legacy shell-script style scenarios: TestCase / reportCompare / compareSource

use assert_harness::{RunReport, TestRunContext};
use core_types::{ErrorKind, Intrinsics, Value};
use std::rc::Rc;

#[test]
fn test_regression_script_flow() {
    let mut ctx = TestRunContext::new();
    let bug = 346642;
    let summary = "decompilation of destructuring assignment";

    ctx.write_header(summary);
    ctx.print_bug_number(bug);
    ctx.print_status(summary);

    let pairs = [
        ("function () {var [x] = [];}", "function () {\n    var [x] = [];\n}"),
        ("function () {({a: x} = y);}", "function () {\n    ({a: x} = y);\n}"),
    ];
    for (i, (expected, actual)) in pairs.iter().enumerate() {
        ctx.compare_source(expected, actual, &format!("{}: {}", summary, i + 1));
    }
    ctx.report_compare(Value::from("No Crash"), Value::from("No Crash"), summary);

    let report = ctx.into_report();
    assert_eq!(report.total, 3);
    assert!(report.is_success(), "{}", report.detailed_summary());
}

#[test]
fn test_array_find_style_checks() {
    let intrinsics = Rc::new(Intrinsics::new());
    let mut ctx = TestRunContext::new();

    let array = Value::array(vec![Value::from(4), Value::from(5), Value::from(6)]);
    let visited = Value::array(vec![Value::from(4), Value::from(5)]);
    let expected = Value::array(vec![Value::from(4), Value::from(5)]);
    ctx.assert_array_equals(&expected, &visited, Some("visited prefix"))
        .unwrap();
    ctx.assert_equals(&Value::from(3), &array.get("length"), Some("length"))
        .unwrap();

    let realm = intrinsics.clone();
    let find_on_null = Value::native_fn("findOnNull", move |_| {
        Err(realm.error(ErrorKind::TypeError, "Array.prototype.find called on null"))
    });
    let type_error = intrinsics.error_constructor_value(ErrorKind::TypeError);
    ctx.assert_throws(&find_on_null, Some(&type_error), None)
        .unwrap();

    assert_eq!(ctx.registry().len(), 3);
}

#[test]
fn test_failures_collected_in_report() {
    let mut ctx = TestRunContext::new();
    ctx.report_compare(Value::Number(f64::NAN), Value::Number(f64::NAN), "NaN");
    ctx.report_compare(Value::Number(0.0), Value::Number(-0.0), "signed zero");
    ctx.report_compare(Value::from("3"), Value::from(3), "string vs number");

    let report = ctx.report();
    assert_eq!(report.passed, 1);
    assert_eq!(
        report.failures,
        vec![
            (
                "signed zero".to_string(),
                "Expected value '0', Actual value '-0'".to_string()
            ),
            (
                "string vs number".to_string(),
                "Type mismatch, expected type string, actual type number".to_string()
            ),
        ]
    );

    let json = report.to_json().unwrap();
    assert_eq!(RunReport::from_json(&json).unwrap(), report);
}
