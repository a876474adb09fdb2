use crate::{
    decode_body,
    fields::{fixed, into_object, take_present},
    BlockDecodeError, EthereumBlockDecoder, ExecutionBlockDecoder,
};
use alloy_primitives::B256;
use beacon_primitives::{
    quantity, BeaconBlock, BeaconBlockBody, CanonicalBlock, RawObject, ValidationError,
};
use serde_json::Value;
use tracing::{debug, trace};

/// Decodes Beacon API block messages.
///
/// The execution payload of post-merge blocks is decoded by `D`.
#[derive(Debug, Clone, Default)]
pub struct BeaconBlockDecoder<D = EthereumBlockDecoder> {
    execution: D,
}

impl BeaconBlockDecoder {
    /// Creates a decoder for Ethereum execution payloads.
    pub const fn ethereum() -> Self {
        Self::new(EthereumBlockDecoder::new())
    }
}

impl<D> BeaconBlockDecoder<D> {
    /// Creates a decoder that hands execution payloads to `execution`.
    pub const fn new(execution: D) -> Self {
        Self { execution }
    }

    /// Returns the execution block decoder.
    pub const fn execution_decoder(&self) -> &D {
        &self.execution
    }
}

impl<D: ExecutionBlockDecoder> BeaconBlockDecoder<D> {
    /// Decodes a block message (the `data.message` object of a block response).
    ///
    /// If the body carries an execution payload, the block's `number`, `timestamp` and `size`
    /// are taken from it.
    pub fn decode_block(&self, raw: RawObject) -> Result<BeaconBlock, BlockDecodeError> {
        let fields = RenamedFields::from_message(raw).validate()?;
        trace!(
            target: "beacon::decoder",
            slot = ?fields.header.inner.number,
            state_root = ?fields.header.inner.hash,
            "Decoding block body"
        );

        let body = decode_body(fields.body, &self.execution)?;
        let block = fields.header.into_block(body);
        debug!(
            target: "beacon::decoder",
            number = ?block.inner.number,
            hash = ?block.inner.hash,
            post_merge = block.body.execution_payload.is_some(),
            "Decoded beacon block"
        );
        Ok(block)
    }

    /// Decodes a block message given as a JSON value.
    pub fn decode_value(&self, message: Value) -> Result<BeaconBlock, BlockDecodeError> {
        self.decode_block(into_object("message", message)?)
    }

    /// Decodes the full `GET /eth/v2/beacon/blocks/{block_id}` response, reading the block
    /// message from `data.message`.
    pub fn decode_block_response(
        &self,
        mut response: Value,
    ) -> Result<BeaconBlock, BlockDecodeError> {
        let message = response
            .get_mut("data")
            .and_then(|data| data.get_mut("message"))
            .map(Value::take)
            .filter(|message| !message.is_null())
            .ok_or(ValidationError::MissingField { field: "data.message" })?;
        self.decode_value(message)
    }
}

/// Block message with its keys renamed to the canonical block fields, not yet validated.
#[derive(Debug)]
struct RenamedFields {
    number: Option<Value>,
    hash: Option<Value>,
    parent_hash: Option<Value>,
    proposer_index: Option<Value>,
    body: Option<Value>,
}

impl RenamedFields {
    fn from_message(mut raw: RawObject) -> Self {
        Self {
            number: take_present(&mut raw, "slot"),
            hash: take_present(&mut raw, "state_root"),
            parent_hash: take_present(&mut raw, "parent_root"),
            proposer_index: take_present(&mut raw, "proposer_index"),
            body: take_present(&mut raw, "body"),
        }
    }

    fn validate(self) -> Result<BlockFields, ValidationError> {
        let number = self.number.map(|slot| quantity::parse_u64("slot", &slot)).transpose()?;
        let hash = self.hash.map(|root| fixed::<32>("state_root", root)).transpose()?;
        // a falsy root means no parent
        let parent_hash = self
            .parent_hash
            .filter(|root| !is_falsy(root))
            .map(|root| fixed::<32>("parent_root", root))
            .transpose()?
            .unwrap_or(B256::ZERO);
        let proposer_index = self
            .proposer_index
            .map(|index| quantity::parse_u64("proposer_index", &index))
            .transpose()?;
        let body = self.body.ok_or(ValidationError::MissingField { field: "body" })?;
        let body = into_object("body", body)?;

        Ok(BlockFields {
            body,
            header: BlockHeader {
                inner: CanonicalBlock { number, hash, parent_hash, timestamp: 0, size: 0 },
                proposer_index,
            },
        })
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => !flag,
        Value::String(text) => text.is_empty(),
        Value::Number(number) => number.as_u64() == Some(0),
        _ => false,
    }
}

/// Validated block fields, waiting for the decoded body.
#[derive(Debug)]
struct BlockFields {
    body: RawObject,
    header: BlockHeader,
}

#[derive(Debug)]
struct BlockHeader {
    inner: CanonicalBlock,
    proposer_index: Option<u64>,
}

impl BlockHeader {
    fn into_block(self, body: BeaconBlockBody) -> BeaconBlock {
        let inner = match &body.execution_payload {
            Some(payload) => CanonicalBlock {
                number: payload.block.inner.number.or(self.inner.number),
                timestamp: payload.block.inner.timestamp,
                size: payload.block.inner.size,
                ..self.inner
            },
            None => self.inner,
        };
        BeaconBlock { inner, proposer_index: self.proposer_index, body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{test_utils, ExecutionDecodeError};
    use assert_matches::assert_matches;
    use beacon_primitives::{Block, ExecutionBlock};
    use serde_json::json;
    use similar_asserts::assert_eq;
    use std::sync::Arc;

    fn message(value: Value) -> RawObject {
        value.as_object().cloned().unwrap()
    }

    #[derive(Debug)]
    struct StaticDecoder(ExecutionBlock);

    impl ExecutionBlockDecoder for StaticDecoder {
        fn decode_block(&self, _raw: RawObject) -> Result<ExecutionBlock, ExecutionDecodeError> {
            Ok(self.0.clone())
        }
    }

    #[derive(Debug)]
    struct RejectingDecoder;

    impl ExecutionBlockDecoder for RejectingDecoder {
        fn decode_block(&self, _raw: RawObject) -> Result<ExecutionBlock, ExecutionDecodeError> {
            Err(ValidationError::MissingField { field: "withdrawals" }.into())
        }
    }

    #[test]
    fn decodes_slot_one_block() {
        let raw = message(test_utils::block_message());
        let block = BeaconBlockDecoder::ethereum().decode_block(raw).unwrap();

        assert_eq!(block.number(), Some(1));
        assert_eq!(block.hash(), Some(test_utils::STATE_ROOT));
        assert_eq!(block.parent_hash(), test_utils::PARENT_ROOT);
        assert_eq!(block.timestamp(), 0);
        assert_eq!(block.size(), 0);
        assert_eq!(block.proposer_index, Some(61_090));
        assert_eq!(block.body.num_attestations, 1);
        assert_eq!(block.execution_payload(), None);
    }

    #[test]
    fn payload_overrides_number_and_timestamp() {
        let block = BeaconBlockDecoder::ethereum()
            .decode_block(message(test_utils::block_message_with_payload()))
            .unwrap();

        assert_eq!(block.number(), Some(15_796_864));
        assert_eq!(block.timestamp(), 1_660_932_629);
        assert_eq!(block.size(), 0);
        // the beacon roots are kept
        assert_eq!(block.hash(), Some(test_utils::STATE_ROOT));
        assert_eq!(block.parent_hash(), test_utils::PARENT_ROOT);
        assert_eq!(
            block.execution_payload().map(|payload| payload.prev_randao),
            Some(test_utils::PREV_RANDAO)
        );
    }

    #[test]
    fn payload_fields_come_from_execution_decoder() {
        let output = ExecutionBlock {
            inner: CanonicalBlock {
                number: Some(42),
                timestamp: 1_700_000_000,
                size: 1_024,
                ..Default::default()
            },
            ..Default::default()
        };
        let decoder = BeaconBlockDecoder::new(Arc::new(StaticDecoder(output.clone())));
        let block =
            decoder.decode_block(message(test_utils::block_message_with_payload())).unwrap();

        assert_eq!(block.number(), Some(42));
        assert_eq!(block.timestamp(), 1_700_000_000);
        assert_eq!(block.size(), 1_024);
        assert_eq!(block.execution_payload().map(|payload| &payload.block), Some(&output));
    }

    #[test]
    fn decodes_response_envelope() {
        let decoder = BeaconBlockDecoder::ethereum();
        let response = test_utils::signed_block_response(test_utils::block_message());
        assert_eq!(
            decoder.decode_block_response(response).unwrap(),
            decoder.decode_value(test_utils::block_message()).unwrap()
        );
    }

    #[test]
    fn missing_message_is_rejected() {
        let err = BeaconBlockDecoder::ethereum()
            .decode_block_response(json!({"data": {"signature": "0x"}}))
            .unwrap_err();
        assert_matches!(
            err,
            BlockDecodeError::Validation(ValidationError::MissingField { field: "data.message" })
        );
    }

    #[test]
    fn missing_body_is_rejected() {
        let mut raw = message(test_utils::block_message());
        raw.remove("body");
        assert_matches!(
            BeaconBlockDecoder::ethereum().decode_block(raw),
            Err(BlockDecodeError::Validation(ValidationError::MissingField { field: "body" }))
        );
    }

    #[test]
    fn optional_header_fields() {
        let mut raw = message(test_utils::block_message());
        raw.remove("slot");
        raw.remove("state_root");
        raw.remove("parent_root");
        raw.remove("proposer_index");
        let block = BeaconBlockDecoder::ethereum().decode_block(raw).unwrap();
        assert_eq!(block.number(), None);
        assert_eq!(block.hash(), None);
        assert_eq!(block.parent_hash(), B256::ZERO);
        assert_eq!(block.proposer_index, None);
    }

    #[test]
    fn invalid_parent_root_is_rejected() {
        let mut raw = message(test_utils::block_message());
        raw.insert("parent_root".to_owned(), json!({"root": "0x00"}));
        assert_matches!(
            BeaconBlockDecoder::ethereum().decode_block(raw),
            Err(BlockDecodeError::Validation(ValidationError::NotHexBytes {
                field: "parent_root",
                ..
            }))
        );
    }

    #[test]
    fn falsy_parent_root_means_no_parent() {
        for root in [json!(""), json!(0), json!(false)] {
            let mut raw = message(test_utils::block_message());
            raw.insert("parent_root".to_owned(), root);
            let block = BeaconBlockDecoder::ethereum().decode_block(raw).unwrap();
            assert_eq!(block.parent_hash(), B256::ZERO);
        }

        let mut raw = message(test_utils::block_message());
        raw.insert("parent_root".to_owned(), json!("0x"));
        assert_matches!(
            BeaconBlockDecoder::ethereum().decode_block(raw),
            Err(BlockDecodeError::Validation(ValidationError::InvalidLength {
                field: "parent_root",
                actual: 0,
                ..
            }))
        );
    }

    #[test]
    fn malformed_quantities_are_rejected() {
        let mut raw = message(test_utils::block_message());
        raw.insert("slot".to_owned(), json!(""));
        assert_matches!(
            BeaconBlockDecoder::ethereum().decode_block(raw),
            Err(BlockDecodeError::Validation(ValidationError::InvalidQuantity {
                field: "slot",
                ..
            }))
        );

        let mut raw = test_utils::block_message_with_payload();
        raw["body"]["execution_payload"]["timestamp"] = json!("0x");
        assert_matches!(
            BeaconBlockDecoder::ethereum().decode_value(raw),
            Err(BlockDecodeError::Execution(ExecutionDecodeError::Invalid(
                ValidationError::InvalidQuantity { field: "timestamp", .. }
            )))
        );

        let mut raw = test_utils::block_message();
        raw["body"]["eth1_data"]["deposit_count"] = json!(" ");
        assert_matches!(
            BeaconBlockDecoder::ethereum().decode_value(raw),
            Err(BlockDecodeError::Validation(ValidationError::InvalidQuantity {
                field: "body.eth1_data.deposit_count",
                ..
            }))
        );
    }

    #[test]
    fn payload_without_number_keeps_slot() {
        let mut raw = test_utils::block_message_with_payload();
        raw["body"]["execution_payload"].as_object_mut().unwrap().remove("block_number");
        let block = BeaconBlockDecoder::ethereum().decode_value(raw).unwrap();
        assert_eq!(block.number(), Some(1));
        assert_eq!(block.timestamp(), 1_660_932_629);
    }

    #[test]
    fn execution_errors_propagate_unchanged() {
        let err = BeaconBlockDecoder::new(RejectingDecoder)
            .decode_block(message(test_utils::block_message_with_payload()))
            .unwrap_err();
        assert_matches!(
            err,
            BlockDecodeError::Execution(ExecutionDecodeError::Invalid(
                ValidationError::MissingField { field: "withdrawals" }
            ))
        );
    }

    #[test]
    fn serializes_flat_block() {
        let raw = message(test_utils::block_message());
        let block = BeaconBlockDecoder::ethereum().decode_block(raw).unwrap();
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["number"], json!(1));
        assert_eq!(value["hash"], json!(test_utils::STATE_ROOT.to_string()));
        assert_eq!(value["body"]["num_attestations"], json!(1));
    }
}
