use crate::BeaconApiError;
use beacon_decoder::BlockDecodeError;
use beacon_primitives::{BlockId, ValidationError};

/// Error returned by a [`BeaconProvider`](crate::BeaconProvider).
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// No client is connected.
    #[error("not connected to a beacon node")]
    NotConnected,
    /// The node did not report itself healthy.
    #[error("No node found on '{0}'")]
    NoNodeFound(String),
    /// The node has no block for the requested id.
    #[error("block '{block_id}' not found")]
    BlockNotFound {
        /// The id as requested by the caller.
        block_id: BlockId,
        /// The failed request, if the node answered with an error.
        #[source]
        source: Option<BeaconApiError>,
    },
    /// The node has no validator for the requested address or index.
    #[error("Validator address '{address}' not found.")]
    ValidatorNotFound {
        /// Validator public key or index.
        address: String,
        /// The failed request, if the node answered with an error.
        #[source]
        source: Option<BeaconApiError>,
    },
    /// The chain id could not be read while connecting.
    #[error("{0}")]
    ChainId(String),
    /// The node serves a different chain than the configured network.
    #[error("node reports chain id {actual} but network '{network}' has chain id {expected}")]
    ChainIdMismatch {
        /// Network name.
        network: String,
        /// Registry chain id.
        expected: u64,
        /// Chain id reported by the node.
        actual: u64,
    },
    /// A Beacon API request failed.
    #[error(transparent)]
    Api(#[from] BeaconApiError),
    /// The block could not be decoded.
    #[error(transparent)]
    Decode(#[from] BlockDecodeError),
    /// A response field was malformed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
