//! Unit tests for JsError and ErrorKind

use core_types::{ErrorKind, JsError};

#[cfg(test)]
mod error_kind_tests {
    use super::*;

    #[test]
    fn test_all_kinds_have_distinct_names() {
        let mut names: Vec<&str> = ErrorKind::ALL.iter().map(|k| k.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), ErrorKind::ALL.len());
    }

    #[test]
    fn test_error_kind_equality() {
        assert_eq!(ErrorKind::TypeError, ErrorKind::TypeError);
        assert_ne!(ErrorKind::TypeError, ErrorKind::RangeError);
    }
}

#[cfg(test)]
mod js_error_tests {
    use super::*;

    #[test]
    fn test_js_error_display() {
        let error = JsError::new(ErrorKind::ReferenceError, "x is not defined");
        assert_eq!(error.to_string(), "ReferenceError: x is not defined");
    }

    #[test]
    fn test_js_error_clone() {
        let error = JsError::new(ErrorKind::InternalError, "too much recursion");
        assert_eq!(error.clone(), error);
    }
}
