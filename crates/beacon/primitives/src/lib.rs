//! Beacon primitives: the normalized block model plus the wire-value helpers shared by the
//! decoder and the provider.

mod block;
pub use block::*;

mod block_id;
pub use block_id::{to_beacon_identifier, BeaconBlockId, BlockId};

mod bytes_like;
pub use bytes_like::{expect_fixed, expect_hex, normalize_bytes_like, BytesLikeError, WireValue};

mod error;
pub use error::ValidationError;

pub mod quantity;

/// A JSON object as received from a Beacon API node.
pub type RawObject = serde_json::Map<String, serde_json::Value>;

/// 96-byte BLS signature (e.g. `randao_reveal`).
pub type BlsSignature = alloy_primitives::FixedBytes<96>;

/// Validator registry index.
pub type ValidatorIndex = u64;

