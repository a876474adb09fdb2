use crate::{
    fields::{fixed, take_present, take_required},
    BlockDecodeError, ExecutionBlockDecoder,
};
use alloy_primitives::B256;
use beacon_primitives::{expect_hex, BeaconExecutionPayload, RawObject, ValidationError, WireValue};
use serde_json::Value;
use tracing::trace;

/// An execution payload reshaped into the input expected by an [`ExecutionBlockDecoder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReshapedPayload {
    /// The execution block object.
    pub block: RawObject,
    /// The `prev_randao` taken out of the payload.
    pub prev_randao: B256,
}

/// Renames the payload keys to their execution block names and detaches `prev_randao`.
///
/// `block_number` becomes `number`, `block_hash` becomes `hash` and `size` is set to zero. Hash
/// fields are normalized to `0x` hex strings.
pub fn reshape_execution_payload(mut raw: RawObject) -> Result<ReshapedPayload, ValidationError> {
    let prev_randao = take_required(&mut raw, "prev_randao", "body.execution_payload.prev_randao")?;
    let prev_randao = fixed::<32>("body.execution_payload.prev_randao", prev_randao)?;

    if let Some(number) = take_present(&mut raw, "block_number") {
        raw.insert("number".to_owned(), number);
    }
    if let Some(hash) = take_present(&mut raw, "block_hash") {
        let hash = expect_hex("body.execution_payload.block_hash", WireValue::from(hash))?;
        raw.insert("hash".to_owned(), Value::String(hash.to_string()));
    }
    if let Some(parent_hash) = take_present(&mut raw, "parent_hash") {
        let parent_hash =
            expect_hex("body.execution_payload.parent_hash", WireValue::from(parent_hash))?;
        raw.insert("parent_hash".to_owned(), Value::String(parent_hash.to_string()));
    }
    // payloads carry no block size
    raw.insert("size".to_owned(), Value::from(0u64));

    Ok(ReshapedPayload { block: raw, prev_randao })
}

/// Decodes the execution payload of a beacon block body.
///
/// Errors from `execution` are returned unchanged.
pub fn decode_payload<D>(
    raw: RawObject,
    execution: &D,
) -> Result<BeaconExecutionPayload, BlockDecodeError>
where
    D: ExecutionBlockDecoder + ?Sized,
{
    let ReshapedPayload { block, prev_randao } = reshape_execution_payload(raw)?;
    let block = execution.decode_block(block)?;
    trace!(
        target: "beacon::decoder",
        number = ?block.inner.number,
        hash = ?block.inner.hash,
        "Decoded execution payload"
    );
    Ok(BeaconExecutionPayload { block, prev_randao })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test_utils, EthereumBlockDecoder, ExecutionDecodeError};
    use alloy_primitives::U256;
    use assert_matches::assert_matches;
    use beacon_primitives::ExecutionBlock;
    use std::sync::Mutex;

    /// Records every object it is handed and returns a fixed block.
    #[derive(Debug, Default)]
    struct RecordingDecoder {
        seen: Mutex<Vec<RawObject>>,
        output: ExecutionBlock,
    }

    impl ExecutionBlockDecoder for RecordingDecoder {
        fn decode_block(&self, raw: RawObject) -> Result<ExecutionBlock, ExecutionDecodeError> {
            self.seen.lock().unwrap().push(raw);
            Ok(self.output.clone())
        }
    }

    #[derive(Debug)]
    struct FailingDecoder;

    impl ExecutionBlockDecoder for FailingDecoder {
        fn decode_block(&self, _raw: RawObject) -> Result<ExecutionBlock, ExecutionDecodeError> {
            Err(ExecutionDecodeError::other(std::io::Error::other("unsupported fork")))
        }
    }

    fn payload() -> RawObject {
        test_utils::execution_payload().as_object().cloned().unwrap()
    }

    #[test]
    fn reshapes_payload_keys() {
        let reshaped = reshape_execution_payload(payload()).unwrap();
        assert_eq!(reshaped.prev_randao, test_utils::PREV_RANDAO);

        let block = reshaped.block;
        assert!(!block.contains_key("prev_randao"));
        assert!(!block.contains_key("block_number"));
        assert!(!block.contains_key("block_hash"));
        assert_eq!(block["number"], "15796864");
        assert_eq!(block["hash"], test_utils::EXECUTION_BLOCK_HASH.to_string());
        assert_eq!(block["size"], 0);
    }

    #[test]
    fn payload_is_decoder_output_plus_prev_randao() {
        let decoder = RecordingDecoder {
            output: ExecutionBlock { gas_limit: 7, ..Default::default() },
            ..Default::default()
        };

        let decoded = decode_payload(payload(), &decoder).unwrap();
        assert_eq!(
            decoded,
            BeaconExecutionPayload {
                block: decoder.output.clone(),
                prev_randao: test_utils::PREV_RANDAO,
            }
        );

        let seen = decoder.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], reshape_execution_payload(payload()).unwrap().block);
    }

    #[test]
    fn decodes_fixture_with_ethereum_decoder() {
        let decoded = decode_payload(payload(), &EthereumBlockDecoder::new()).unwrap();
        assert_eq!(decoded.block.inner.number, Some(15_796_864));
        assert_eq!(decoded.block.inner.timestamp, 1_660_932_629);
        assert_eq!(decoded.block.inner.size, 0);
        assert_eq!(decoded.block.inner.hash, Some(test_utils::EXECUTION_BLOCK_HASH));
        assert_eq!(decoded.block.base_fee, 30_487_386_013);
        assert_eq!(
            decoded.block.total_difficulty,
            U256::from(58_750_003_716_598_352_816_469u128)
        );
        assert_eq!(decoded.block.num_transactions, 0);
    }

    #[test]
    fn missing_prev_randao_is_rejected() {
        let mut raw = payload();
        raw.remove("prev_randao");
        assert_matches!(
            reshape_execution_payload(raw),
            Err(ValidationError::MissingField { field: "body.execution_payload.prev_randao" })
        );
    }

    #[test]
    fn invalid_block_hash_is_rejected() {
        let mut raw = payload();
        raw.insert("block_hash".to_owned(), Value::from("0xnothex"));
        assert_matches!(
            reshape_execution_payload(raw),
            Err(ValidationError::NotHexBytes { field: "body.execution_payload.block_hash", .. })
        );
    }

    #[test]
    fn execution_errors_propagate() {
        let err = decode_payload(payload(), &FailingDecoder).unwrap_err();
        assert_matches!(err, BlockDecodeError::Execution(ExecutionDecodeError::Other(_)));
        assert_eq!(err.to_string(), "unsupported fork");
    }

    #[test]
    fn prev_randao_must_be_32_bytes() {
        let mut raw = payload();
        raw.insert("prev_randao".to_owned(), Value::from("0x01"));
        assert_matches!(
            reshape_execution_payload(raw),
            Err(ValidationError::InvalidLength { expected: 32, actual: 1, .. })
        );
    }
}
