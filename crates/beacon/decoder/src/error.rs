use crate::ExecutionDecodeError;
use beacon_primitives::ValidationError;

/// Error returned when a beacon block message cannot be decoded.
#[derive(Debug, thiserror::Error)]
pub enum BlockDecodeError {
    /// A field of the beacon message failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The execution block decoder rejected the payload.
    #[error(transparent)]
    Execution(#[from] ExecutionDecodeError),
}
