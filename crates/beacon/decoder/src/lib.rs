//! Decoding of Beacon API block messages.
//!
//! [`BeaconBlockDecoder`] turns the `data.message` object of a `GET /eth/v2/beacon/blocks/{id}`
//! response into a [`BeaconBlock`](beacon_primitives::BeaconBlock). The embedded execution
//! payload, if any, is reshaped into an execution block and handed to an
//! [`ExecutionBlockDecoder`].

mod block;
pub use block::BeaconBlockDecoder;

mod body;
pub use body::decode_body;

mod error;
pub use error::BlockDecodeError;

mod execution;
pub use execution::{EthereumBlockDecoder, ExecutionBlockDecoder, ExecutionDecodeError};

mod fields;

mod payload;
pub use payload::{decode_payload, reshape_execution_payload, ReshapedPayload};

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
