use serde_json::Value;

/// Whether a value counts as set: null, false, zero and "" do not.
/// Arrays and objects always do, even when empty.
pub(crate) fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Field of an object, if present
pub(crate) fn field<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    value.get(key).filter(|v| is_present(v))
}

/// First element of an array, or the value itself
pub(crate) fn first_or_self(value: &Value) -> Option<&Value> {
    match value {
        Value::Array(items) => items.first(),
        other => Some(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn falsy_values_are_absent() {
        for value in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_present(&value), "{value} should be absent");
        }
        for value in [json!(true), json!(3), json!("x"), json!([]), json!({})] {
            assert!(is_present(&value), "{value} should be present");
        }
    }

    #[test]
    fn field_skips_falsy_and_non_objects() {
        let value = json!({"a": "", "b": "x"});
        assert_eq!(field(&value, "a"), None);
        assert_eq!(field(&value, "b"), Some(&json!("x")));
        assert_eq!(field(&json!("text"), "a"), None);
        assert_eq!(field(&json!([{"a": 1}]), "a"), None);
    }

    #[test]
    fn first_or_self_unwraps_arrays() {
        assert_eq!(first_or_self(&json!([1, 2])), Some(&json!(1)));
        assert_eq!(first_or_self(&json!([])), None);
        assert_eq!(first_or_self(&json!({"k": 1})), Some(&json!({"k": 1})));
    }
}
