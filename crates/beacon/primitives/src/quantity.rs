//! Numeric wire fields.
//!
//! Beacon API nodes encode every integer as a decimal string (`"15796864"`), execution clients
//! use `0x` quantities, and hand-written fixtures use plain JSON numbers. All three are accepted.

use crate::ValidationError;
use alloy_primitives::U256;
use serde_json::Value;

/// Parses a non-negative integer that fits in 256 bits.
pub fn parse_u256(field: &'static str, value: &Value) -> Result<U256, ValidationError> {
    let parsed = match value {
        Value::Number(number) => number.as_u64().map(U256::from),
        Value::String(text) => parse_text(text),
        _ => None,
    };
    parsed.ok_or_else(|| ValidationError::InvalidQuantity { field, value: value.to_string() })
}

/// Decimal digits, or `0x`/`0X` followed by hex digits. Empty, signed, padded or separated text
/// is rejected.
fn parse_text(text: &str) -> Option<U256> {
    let (digits, radix) = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(hex) => (hex, 16),
        None => (text, 10),
    };
    let valid = |byte: &u8| {
        if radix == 16 {
            byte.is_ascii_hexdigit()
        } else {
            byte.is_ascii_digit()
        }
    };
    if digits.is_empty() || !digits.as_bytes().iter().all(valid) {
        return None
    }
    U256::from_str_radix(digits, radix).ok()
}

/// Parses a non-negative integer that fits in 64 bits.
pub fn parse_u64(field: &'static str, value: &Value) -> Result<u64, ValidationError> {
    let int = parse_u256(field, value)?;
    u64::try_from(int)
        .map_err(|_| ValidationError::InvalidQuantity { field, value: value.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!("15796864"), 15_796_864 ; "decimal string")]
    #[test_case(json!("0xf10a80"), 15_796_864 ; "hex quantity")]
    #[test_case(json!(15_796_864), 15_796_864 ; "json number")]
    #[test_case(json!("0"), 0 ; "zero")]
    #[test_case(json!("0XF10A80"), 15_796_864 ; "upper case hex")]
    #[test_case(json!("0x0"), 0 ; "hex zero")]
    fn parses_u64(value: Value, expected: u64) {
        assert_eq!(parse_u64("block_number", &value).unwrap(), expected);
    }

    #[test]
    fn parses_total_difficulty_beyond_u64() {
        let value = json!("58750003716598352816469");
        let parsed = parse_u256("total_difficulty", &value).unwrap();
        assert_eq!(parsed, U256::from(58_750_003_716_598_352_816_469u128));
        assert!(parse_u64("total_difficulty", &value).is_err());
    }

    #[test_case(json!("-1") ; "negative")]
    #[test_case(json!(1.5) ; "fraction")]
    #[test_case(json!("twelve") ; "words")]
    #[test_case(json!(null) ; "null")]
    #[test_case(json!("") ; "empty")]
    #[test_case(json!("0x") ; "bare prefix")]
    #[test_case(json!(" ") ; "blank")]
    #[test_case(json!(" 12") ; "padded")]
    #[test_case(json!("1_000") ; "separators")]
    #[test_case(json!("0b101") ; "binary")]
    #[test_case(json!("0o17") ; "octal")]
    #[test_case(json!("0xfg") ; "bad hex digit")]
    fn rejects_non_quantities(value: Value) {
        assert_eq!(
            parse_u64("slot", &value).unwrap_err(),
            ValidationError::InvalidQuantity { field: "slot", value: value.to_string() }
        );
    }
}
