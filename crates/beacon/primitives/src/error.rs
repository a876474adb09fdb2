/// A wire field failed validation while building a block.
///
/// `field` is the dotted path of the offending key relative to the block message, `value` the
/// raw input rendered as text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A required key was absent or null.
    #[error("missing required field `{field}`")]
    MissingField {
        /// Path of the missing key.
        field: &'static str,
    },
    /// A hash-shaped field did not normalize to hex bytes.
    #[error("hash `{value}` in field `{field}` is not valid hex bytes")]
    NotHexBytes {
        /// Path of the offending key.
        field: &'static str,
        /// The raw value.
        value: String,
    },
    /// A fixed-size byte field had the wrong length.
    #[error("field `{field}` must be {expected} bytes, got {actual} (`{value}`)")]
    InvalidLength {
        /// Path of the offending key.
        field: &'static str,
        /// Required length.
        expected: usize,
        /// Decoded length.
        actual: usize,
        /// The normalized value.
        value: String,
    },
    /// A numeric field was neither a JSON integer nor a decimal or `0x` string.
    #[error("field `{field}` is not a valid quantity: `{value}`")]
    InvalidQuantity {
        /// Path of the offending key.
        field: &'static str,
        /// The raw value.
        value: String,
    },
    /// The value had the wrong JSON shape (e.g. a string where an object is required).
    #[error("field `{field}` must be {expected}, got `{value}`")]
    UnexpectedShape {
        /// Path of the offending key.
        field: &'static str,
        /// Human readable description of the required shape.
        expected: &'static str,
        /// The raw value.
        value: String,
    },
}
