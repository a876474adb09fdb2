use crate::{BlsSignature, ValidatorIndex};
use alloy_primitives::{B256, U256};
use serde::{Deserialize, Serialize};

/// Fields every decoded block carries, whether it came from the consensus or the execution
/// layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalBlock {
    /// Slot for beacon blocks, block number for execution blocks.
    pub number: Option<u64>,
    /// Beacon `state_root` or execution `block_hash`.
    pub hash: Option<B256>,
    /// Beacon `parent_root` or execution `parent_hash`; zero when the source had none.
    pub parent_hash: B256,
    /// Unix timestamp in seconds.
    pub timestamp: u64,
    /// Block size in bytes.
    pub size: u64,
}

/// Accessors shared by every block flavour.
pub trait Block {
    /// Returns the canonical header fields.
    fn canonical(&self) -> &CanonicalBlock;

    /// Slot or block number.
    fn number(&self) -> Option<u64> {
        self.canonical().number
    }

    /// Block hash.
    fn hash(&self) -> Option<B256> {
        self.canonical().hash
    }

    /// Parent hash.
    fn parent_hash(&self) -> B256 {
        self.canonical().parent_hash
    }

    /// Timestamp in seconds.
    fn timestamp(&self) -> u64 {
        self.canonical().timestamp
    }

    /// Size in bytes.
    fn size(&self) -> u64 {
        self.canonical().size
    }
}

impl Block for CanonicalBlock {
    fn canonical(&self) -> &CanonicalBlock {
        self
    }
}

/// An execution-layer block, the output of an execution block decoder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionBlock {
    /// Canonical header fields.
    #[serde(flatten)]
    pub inner: CanonicalBlock,
    /// Number of transactions in the block.
    pub num_transactions: u64,
    /// Gas limit.
    pub gas_limit: u64,
    /// Gas used.
    pub gas_used: u64,
    /// EIP-1559 base fee per gas, zero before London.
    pub base_fee: u64,
    /// Proof-of-work difficulty, zero after the merge.
    pub difficulty: U256,
    /// Total difficulty of the chain up to this block.
    pub total_difficulty: U256,
}

impl Block for ExecutionBlock {
    fn canonical(&self) -> &CanonicalBlock {
        &self.inner
    }
}

/// The execution payload embedded in a post-merge beacon block body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeaconExecutionPayload {
    /// The execution block decoded from the payload.
    #[serde(flatten)]
    pub block: ExecutionBlock,
    /// RANDAO mix the payload was built on.
    pub prev_randao: B256,
}

impl Block for BeaconExecutionPayload {
    fn canonical(&self) -> &CanonicalBlock {
        &self.block.inner
    }
}

/// Eth1 deposit contract snapshot voted on by the proposer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eth1Data {
    /// Root of the deposit tree.
    pub deposit_root: B256,
    /// Total number of deposits.
    pub deposit_count: u64,
    /// Eth1 block the vote refers to.
    pub block_hash: B256,
}

/// Normalized beacon block body.
///
/// Operation lists are not decoded; only their lengths are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeaconBlockBody {
    /// Proposer's RANDAO reveal.
    pub randao_reveal: BlsSignature,
    /// Eth1 vote.
    pub eth1_data: Eth1Data,
    /// Arbitrary proposer data.
    pub graffiti: B256,
    /// Number of proposer slashings.
    pub num_proposer_slashings: u64,
    /// Number of attester slashings.
    pub num_attester_slashings: u64,
    /// Number of attestations.
    pub num_attestations: u64,
    /// Number of deposits.
    pub num_deposits: u64,
    /// Number of voluntary exits.
    pub num_voluntary_exits: u64,
    /// Capella and later.
    pub num_bls_to_execution_changes: u64,
    /// Deneb and later.
    pub num_blob_kzg_commitments: u64,
    /// Present for post-merge blocks only.
    pub execution_payload: Option<BeaconExecutionPayload>,
}

/// A normalized beacon chain block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeaconBlock {
    /// Canonical fields. When the body carries an execution payload, `number`, `timestamp`
    /// and `size` are the payload's.
    #[serde(flatten)]
    pub inner: CanonicalBlock,
    /// Index of the proposing validator.
    pub proposer_index: Option<ValidatorIndex>,
    /// Block body.
    pub body: BeaconBlockBody,
}

impl BeaconBlock {
    /// Returns the execution payload, if the block is post-merge.
    pub const fn execution_payload(&self) -> Option<&BeaconExecutionPayload> {
        self.body.execution_payload.as_ref()
    }
}

impl Block for BeaconBlock {
    fn canonical(&self) -> &CanonicalBlock {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn payload_serializes_flat() {
        let payload = BeaconExecutionPayload {
            block: ExecutionBlock {
                inner: CanonicalBlock { number: Some(5), timestamp: 12, ..Default::default() },
                gas_limit: 30_000_000,
                ..Default::default()
            },
            prev_randao: B256::repeat_byte(0x11),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["number"], json!(5));
        assert_eq!(value["timestamp"], json!(12));
        assert_eq!(value["gas_limit"], json!(30_000_000));
        assert_eq!(value["prev_randao"], json!(B256::repeat_byte(0x11)));
        assert_eq!(payload.timestamp(), 12);
    }
}
