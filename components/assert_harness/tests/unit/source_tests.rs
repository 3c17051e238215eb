//! Unit tests for the source comparator

use assert_harness::{compare_source, normalize_source};

#[test]
fn test_function_formatting_ignored() {
    assert!(compare_source(
        "function(){ return 1; }",
        "function () {\n  return 1;\n}",
        "decompile"
    )
    .is_ok());
}

#[test]
fn test_different_bodies_fail_with_both_strings() {
    let failure = compare_source("return 1;", "return 2;", "body").unwrap_err();
    assert!(failure.message.contains("expected:\nreturn 1;"));
    assert!(failure.message.contains("actual:\nreturn 2;"));
    assert_eq!(failure.label.as_deref(), Some("body"));
}

#[test]
fn test_object_literal_spacing() {
    assert_eq!(
        normalize_source("({a:1, b:[2,3]})"),
        normalize_source("( { a : 1 , b : [ 2 , 3 ] } )")
    );
}

#[test]
fn test_let_block_decompilation() {
    let expected = "function () {let (x = 1) {print(x);}}";
    let actual = "function () {\n    let (x = 1) {\n        print(x);\n    }\n}";
    assert!(compare_source(expected, actual, "let block").is_ok());
}

#[test]
fn test_new_without_arguments() {
    assert!(compare_source("x = new Object()", "x = new Object", "new").is_ok());
}

#[test]
fn test_empty_strings() {
    assert_eq!(normalize_source("   \n\t"), "");
    assert!(compare_source("", "  ", "blank").is_ok());
}
