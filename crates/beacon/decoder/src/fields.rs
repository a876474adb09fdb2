//! Helpers for picking fields out of raw JSON objects.

use alloy_primitives::FixedBytes;
use beacon_primitives::{expect_fixed, RawObject, ValidationError, WireValue};
use serde_json::Value;

/// Removes `key`, treating an explicit `null` like an absent key.
pub(crate) fn take_present(raw: &mut RawObject, key: &str) -> Option<Value> {
    raw.remove(key).filter(|value| !value.is_null())
}

/// Removes the first present key out of `keys`.
pub(crate) fn take_any(raw: &mut RawObject, keys: &[&str]) -> Option<Value> {
    keys.iter().find_map(|key| take_present(raw, key))
}

pub(crate) fn take_required(
    raw: &mut RawObject,
    key: &str,
    field: &'static str,
) -> Result<Value, ValidationError> {
    take_present(raw, key).ok_or(ValidationError::MissingField { field })
}

pub(crate) fn into_object(field: &'static str, value: Value) -> Result<RawObject, ValidationError> {
    match value {
        Value::Object(object) => Ok(object),
        other => Err(ValidationError::UnexpectedShape {
            field,
            expected: "an object",
            value: other.to_string(),
        }),
    }
}

/// Length of an operation list. Absent lists count as empty.
pub(crate) fn list_len(field: &'static str, value: Option<Value>) -> Result<u64, ValidationError> {
    match value {
        None => Ok(0),
        Some(Value::Array(items)) => Ok(items.len() as u64),
        Some(other) => Err(ValidationError::UnexpectedShape {
            field,
            expected: "a list",
            value: other.to_string(),
        }),
    }
}

pub(crate) fn fixed<const N: usize>(
    field: &'static str,
    value: Value,
) -> Result<FixedBytes<N>, ValidationError> {
    expect_fixed(field, WireValue::from(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> RawObject {
        into_object("test", value).unwrap()
    }

    #[test]
    fn null_is_absent() {
        let mut raw = object(json!({"a": null, "b": 1}));
        assert_eq!(take_present(&mut raw, "a"), None);
        assert_eq!(take_present(&mut raw, "b"), Some(json!(1)));
        assert!(raw.is_empty());
    }

    #[test]
    fn aliases_prefer_first_present() {
        let mut raw = object(json!({"gasLimit": 2, "gas_limit": null}));
        assert_eq!(take_any(&mut raw, &["gas_limit", "gasLimit"]), Some(json!(2)));
    }

    #[test]
    fn counts_lists() {
        assert_eq!(list_len("body.deposits", None), Ok(0));
        assert_eq!(list_len("body.deposits", Some(json!([1, 2, 3]))), Ok(3));
        assert_eq!(
            list_len("body.deposits", Some(json!("nope"))),
            Err(ValidationError::UnexpectedShape {
                field: "body.deposits",
                expected: "a list",
                value: r#""nope""#.to_owned(),
            })
        );
    }
}
