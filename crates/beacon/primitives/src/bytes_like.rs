//! Normalization of loosely typed "bytes-like" wire values into canonical hex bytes.
//!
//! Beacon API nodes (and callers handing in already decoded values) do not agree on how a byte
//! string is spelled: it may arrive as `0x`-prefixed or bare hex text, as an integer, as a
//! boolean flag or as a raw buffer. [`WireValue`] closes that set of shapes and
//! [`normalize_bytes_like`] is the single conversion over it.

use crate::ValidationError;
use alloy_primitives::{hex, Bytes, FixedBytes, U256};
use core::fmt;
use serde_json::Value;

/// A single value as it appears on the wire, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireValue {
    /// Boolean flag, normalizes to a single `0x00`/`0x01` byte.
    Bool(bool),
    /// Non-negative integer, normalizes to its minimal big-endian bytes.
    Int(U256),
    /// Hex text with or without the `0x` prefix.
    Text(String),
    /// Raw byte buffer.
    Raw(Vec<u8>),
    /// Already canonical hex bytes.
    Hex(Bytes),
    /// Anything that is not bytes-like: objects, arrays, null, non-integral numbers.
    Json(Value),
}

impl WireValue {
    /// Returns `true` if [`normalize_bytes_like`] converts this value to [`WireValue::Hex`].
    pub const fn is_bytes_like(&self) -> bool {
        !matches!(self, Self::Json(_))
    }

    /// Returns the canonical bytes if the value is already normalized.
    pub const fn as_hex(&self) -> Option<&Bytes> {
        match self {
            Self::Hex(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Converts the value back into JSON. Byte values are rendered as `0x`-prefixed lowercase
    /// hex, integers that do not fit a JSON number as decimal strings.
    pub fn into_json(self) -> Value {
        match self {
            Self::Bool(flag) => Value::Bool(flag),
            Self::Int(int) => u64::try_from(int)
                .map(Value::from)
                .unwrap_or_else(|_| Value::String(int.to_string())),
            Self::Text(text) => Value::String(text),
            Self::Raw(raw) => Value::String(hex::encode_prefixed(raw)),
            Self::Hex(bytes) => Value::String(bytes.to_string()),
            Self::Json(value) => value,
        }
    }
}

impl fmt::Display for WireValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Int(int) => write!(f, "{int}"),
            Self::Text(text) => f.write_str(text),
            Self::Raw(raw) => f.write_str(&hex::encode_prefixed(raw)),
            Self::Hex(bytes) => write!(f, "{bytes}"),
            Self::Json(value) => write!(f, "{value}"),
        }
    }
}

impl From<Value> for WireValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(flag) => Self::Bool(flag),
            Value::Number(number) => match number.as_u64() {
                Some(int) => Self::Int(U256::from(int)),
                None => Self::Json(Value::Number(number)),
            },
            Value::String(text) => Self::Text(text),
            other => Self::Json(other),
        }
    }
}

impl From<bool> for WireValue {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<u64> for WireValue {
    fn from(int: u64) -> Self {
        Self::Int(U256::from(int))
    }
}

impl From<U256> for WireValue {
    fn from(int: U256) -> Self {
        Self::Int(int)
    }
}

impl From<&str> for WireValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for WireValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Vec<u8>> for WireValue {
    fn from(raw: Vec<u8>) -> Self {
        Self::Raw(raw)
    }
}

impl From<&[u8]> for WireValue {
    fn from(raw: &[u8]) -> Self {
        Self::Raw(raw.to_vec())
    }
}

impl From<Bytes> for WireValue {
    fn from(bytes: Bytes) -> Self {
        Self::Hex(bytes)
    }
}

impl<const N: usize> From<FixedBytes<N>> for WireValue {
    fn from(bytes: FixedBytes<N>) -> Self {
        Self::Hex(Bytes::copy_from_slice(bytes.as_slice()))
    }
}

/// Error returned when text that should be hex is not.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BytesLikeError {
    /// The text contains non-hex characters.
    #[error("`{text}` is not a hex string: {source}")]
    InvalidHex {
        /// The offending text.
        text: String,
        /// Underlying decoder error.
        #[source]
        source: hex::FromHexError,
    },
}

/// Converts a bytes-like value into [`WireValue::Hex`], passing every other value through.
///
/// Normalizing an already canonical value returns it unchanged.
pub fn normalize_bytes_like(value: WireValue) -> Result<WireValue, BytesLikeError> {
    let bytes = match value {
        WireValue::Hex(bytes) => bytes,
        WireValue::Bool(flag) => Bytes::from(vec![u8::from(flag)]),
        WireValue::Int(int) => int_to_bytes(int),
        WireValue::Text(text) => decode_hex_text(&text)?,
        WireValue::Raw(raw) => Bytes::from(raw),
        json @ WireValue::Json(_) => return Ok(json),
    };
    Ok(WireValue::Hex(bytes))
}

/// Normalizes `value` and requires the result to be hex bytes.
pub fn expect_hex(field: &'static str, value: WireValue) -> Result<Bytes, ValidationError> {
    match normalize_bytes_like(value) {
        Ok(WireValue::Hex(bytes)) => Ok(bytes),
        Ok(other) => Err(ValidationError::NotHexBytes { field, value: other.to_string() }),
        Err(BytesLikeError::InvalidHex { text, .. }) => {
            Err(ValidationError::NotHexBytes { field, value: text })
        }
    }
}

/// Normalizes `value` and requires exactly `N` bytes.
pub fn expect_fixed<const N: usize>(
    field: &'static str,
    value: WireValue,
) -> Result<FixedBytes<N>, ValidationError> {
    let bytes = expect_hex(field, value)?;
    FixedBytes::<N>::try_from(bytes.as_ref()).map_err(|_| ValidationError::InvalidLength {
        field,
        expected: N,
        actual: bytes.len(),
        value: bytes.to_string(),
    })
}

fn int_to_bytes(int: U256) -> Bytes {
    let mut bytes = int.to_be_bytes_trimmed_vec();
    if bytes.is_empty() {
        bytes.push(0);
    }
    Bytes::from(bytes)
}

fn decode_hex_text(text: &str) -> Result<Bytes, BytesLikeError> {
    let digits = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")).unwrap_or(text);
    // odd-length text is read as if it had a leading zero nibble
    let decoded = if digits.len() % 2 == 1 {
        hex::decode(format!("0{digits}"))
    } else {
        hex::decode(digits)
    };
    decoded
        .map(Bytes::from)
        .map_err(|source| BytesLikeError::InvalidHex { text: text.to_owned(), source })
}
