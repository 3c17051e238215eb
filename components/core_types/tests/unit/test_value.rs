//! Unit tests for the Value enum

use core_types::Value;

#[cfg(test)]
mod value_creation_tests {
    use super::*;

    #[test]
    fn test_value_from_primitives() {
        assert!(matches!(Value::from(true), Value::Boolean(true)));
        assert!(matches!(Value::from(7), Value::Number(n) if n == 7.0));
        assert!(matches!(Value::from("s"), Value::String(ref s) if s == "s"));
    }

    #[test]
    fn test_value_array_from_vec() {
        let val = Value::from(vec![Value::from(1), Value::from(2)]);
        match val {
            Value::Array(items) => assert_eq!(items.borrow().len(), 2),
            other => panic!("expected array, got {:?}", other),
        }
    }

    #[test]
    fn test_value_negative_zero_keeps_sign() {
        let val = Value::Number(-0.0);
        assert!(matches!(val, Value::Number(n) if n == 0.0 && n.is_sign_negative()));
    }
}

#[cfg(test)]
mod value_type_of_tests {
    use super::*;

    #[test]
    fn test_type_of_every_tag() {
        assert_eq!(Value::Undefined.type_of(), "undefined");
        assert_eq!(Value::Null.type_of(), "object");
        assert_eq!(Value::Boolean(false).type_of(), "boolean");
        assert_eq!(Value::Number(f64::NAN).type_of(), "number");
        assert_eq!(Value::from("x").type_of(), "string");
        assert_eq!(Value::array(vec![]).type_of(), "object");
        assert_eq!(
            Value::native_fn("f", |_| Ok(Value::Undefined)).type_of(),
            "function"
        );
    }

    #[test]
    fn test_is_nan() {
        assert!(Value::Number(f64::NAN).is_nan());
        assert!(!Value::Number(1.0).is_nan());
        assert!(!Value::from("NaN").is_nan());
    }
}

#[cfg(test)]
mod value_display_tests {
    use super::*;

    #[test]
    fn test_display_follows_string_conversion() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::Number(0.5).to_string(), "0.5");
        assert_eq!(Value::Number(f64::INFINITY).to_string(), "Infinity");
    }

    #[test]
    fn test_display_array_joins_with_commas() {
        let val = Value::array(vec![Value::from(1), Value::Null, Value::from("b")]);
        assert_eq!(val.to_string(), "1,,b");
    }

    #[test]
    fn test_pretty_distinguishes_types() {
        assert_eq!(Value::from("1").pretty(), "\"1\"");
        assert_eq!(Value::from(1).pretty(), "1");
        assert_eq!(Value::Number(-0.0).pretty(), "-0");
        assert_eq!(Value::Number(0.0).pretty(), "0");
    }

    #[test]
    fn test_display_function() {
        let f = Value::native_fn("answer", |_| Ok(Value::from(42)));
        assert_eq!(f.to_string(), "function answer() { [native code] }");
    }
}

#[cfg(test)]
mod value_call_tests {
    use super::*;

    #[test]
    fn test_native_fn_returns_value() {
        let f = Value::native_fn("answer", |_| Ok(Value::from(42)));
        let result = f.as_function().map(|func| func.call(&[]));
        assert!(matches!(result, Some(Ok(Value::Number(n))) if n == 42.0));
    }

    #[test]
    fn test_native_fn_throws_value() {
        let f = Value::native_fn("thrower", |_| Err(Value::from("boom")));
        let result = f.as_function().map(|func| func.call(&[]));
        assert!(matches!(result, Some(Err(Value::String(ref s))) if s == "boom"));
    }
}
