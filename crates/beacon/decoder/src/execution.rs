use crate::fields::{fixed, list_len, take_any, take_present, take_required};
use alloy_primitives::{B256, U256};
use beacon_primitives::{quantity, CanonicalBlock, ExecutionBlock, RawObject, ValidationError};
use core::fmt::Debug;

/// Error returned by an [`ExecutionBlockDecoder`].
#[derive(Debug, thiserror::Error)]
pub enum ExecutionDecodeError {
    /// A field of the execution block failed validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// Implementation specific failure.
    #[error(transparent)]
    Other(Box<dyn core::error::Error + Send + Sync>),
}

impl ExecutionDecodeError {
    /// Wraps an arbitrary error.
    pub fn other<E>(err: E) -> Self
    where
        E: core::error::Error + Send + Sync + 'static,
    {
        Self::Other(Box::new(err))
    }
}

/// Decodes an execution-layer block from a raw JSON object.
///
/// The beacon decoder hands over the execution payload after renaming `block_number` to `number`
/// and `block_hash` to `hash`, removing `prev_randao` and setting `size` to zero.
#[auto_impl::auto_impl(&, Box, Arc)]
pub trait ExecutionBlockDecoder: Debug + Send + Sync {
    /// Decodes the block.
    fn decode_block(&self, raw: RawObject) -> Result<ExecutionBlock, ExecutionDecodeError>;
}

/// Decoder for Ethereum execution blocks.
///
/// Accepts both snake_case payload keys and camelCase JSON-RPC keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EthereumBlockDecoder;

impl EthereumBlockDecoder {
    /// Creates a new decoder.
    pub const fn new() -> Self {
        Self
    }
}

impl ExecutionBlockDecoder for EthereumBlockDecoder {
    fn decode_block(&self, mut raw: RawObject) -> Result<ExecutionBlock, ExecutionDecodeError> {
        let number = take_present(&mut raw, "number")
            .map(|v| quantity::parse_u64("number", &v))
            .transpose()?;
        let hash = take_present(&mut raw, "hash").map(|v| fixed::<32>("hash", v)).transpose()?;
        let parent_hash = take_any(&mut raw, &["parent_hash", "parentHash"])
            .map(|v| fixed::<32>("parent_hash", v))
            .transpose()?
            .unwrap_or(B256::ZERO);
        let timestamp =
            quantity::parse_u64("timestamp", &take_required(&mut raw, "timestamp", "timestamp")?)?;
        let size = quantity::parse_u64("size", &take_required(&mut raw, "size", "size")?)?;

        let gas_limit = take_any(&mut raw, &["gas_limit", "gasLimit"])
            .ok_or(ValidationError::MissingField { field: "gas_limit" })?;
        let gas_used = take_any(&mut raw, &["gas_used", "gasUsed"])
            .ok_or(ValidationError::MissingField { field: "gas_used" })?;
        let base_fee = take_any(&mut raw, &["base_fee", "base_fee_per_gas", "baseFeePerGas"])
            .map(|v| quantity::parse_u64("base_fee", &v))
            .transpose()?
            .unwrap_or_default();
        let difficulty = take_present(&mut raw, "difficulty")
            .map(|v| quantity::parse_u256("difficulty", &v))
            .transpose()?
            .unwrap_or(U256::ZERO);
        let total_difficulty = take_any(&mut raw, &["total_difficulty", "totalDifficulty"])
            .map(|v| quantity::parse_u256("total_difficulty", &v))
            .transpose()?
            .unwrap_or(U256::ZERO);
        let num_transactions = list_len("transactions", take_present(&mut raw, "transactions"))?;

        Ok(ExecutionBlock {
            inner: CanonicalBlock { number, hash, parent_hash, timestamp, size },
            num_transactions,
            gas_limit: quantity::parse_u64("gas_limit", &gas_limit)?,
            gas_used: quantity::parse_u64("gas_used", &gas_used)?,
            base_fee,
            difficulty,
            total_difficulty,
        })
    }
}
