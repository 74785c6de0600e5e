//! Error types for the fair draw protocol.

use thiserror::Error;

/// Errors from the sampler and the commit-reveal session
///
/// `RangeTooLarge` and `AlreadyResolved` signal protocol misuse by the
/// caller. `ValueOutOfRange` is bad external input and leaves the session
/// untouched, so the caller may ask again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FairnessError {
    #[error("Range maximum {max} exceeds the single-byte sampler limit of 255")]
    RangeTooLarge { max: usize },

    #[error("Value {value} is outside 0..={range_max}")]
    ValueOutOfRange { value: usize, range_max: u8 },

    #[error("Session already resolved")]
    AlreadyResolved,
}

/// Reasons a revealed draw does not check out against its commitment
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RevealError {
    #[error("key is not 64 hex characters")]
    MalformedKey,

    #[error("key does not open the commitment")]
    CommitmentMismatch,

    #[error("reveal range 0..={revealed} differs from the committed 0..={committed}")]
    RangeMismatch { committed: u8, revealed: u8 },

    #[error("committed value {value} is outside 0..={range_max}")]
    CommittedValueOutOfRange { value: u8, range_max: u8 },

    #[error("user value {value} is outside 0..={range_max}")]
    UserValueOutOfRange { value: u8, range_max: u8 },

    #[error("result {claimed} should be {expected}")]
    WrongResult { claimed: u8, expected: u8 },
}
