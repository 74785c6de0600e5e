//! Protocol messages.

use crate::crypto::{Commitment, SecureKey};
use crate::error::RevealError;
use serde::{Deserialize, Serialize};

/// Published before the counterpart contributes
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitMessage {
    pub commitment: Commitment,
    pub range_max: u8,
}

/// Everything needed to check a resolved draw
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub range_max: u8,
    pub committed_value: u8,
    /// Session key, 64 lowercase hex characters
    pub key: String,
    pub user_value: u8,
    pub result: u8,
}

impl Reveal {
    /// Check the reveal against the commit message published before the draw.
    ///
    /// The key must open the commitment, the range must match the published
    /// one, both contributions must lie in it and the result must be their
    /// sum modulo `range_max + 1`.
    pub fn check(&self, published: &CommitMessage) -> Result<(), RevealError> {
        let key = SecureKey::from_hex(&self.key).map_err(|_| RevealError::MalformedKey)?;
        if !published.commitment.verify(&key, self.committed_value) {
            return Err(RevealError::CommitmentMismatch);
        }

        let range_max = published.range_max;
        if self.range_max != range_max {
            return Err(RevealError::RangeMismatch {
                committed: range_max,
                revealed: self.range_max,
            });
        }
        if self.committed_value > range_max {
            return Err(RevealError::CommittedValueOutOfRange {
                value: self.committed_value,
                range_max,
            });
        }
        if self.user_value > range_max {
            return Err(RevealError::UserValueOutOfRange {
                value: self.user_value,
                range_max,
            });
        }

        let outcomes = range_max as u16 + 1;
        let expected = ((self.committed_value as u16 + self.user_value as u16) % outcomes) as u8;
        if self.result != expected {
            return Err(RevealError::WrongResult {
                claimed: self.result,
                expected,
            });
        }
        Ok(())
    }

    pub fn verify(&self, published: &CommitMessage) -> bool {
        self.check(published).is_ok()
    }
}
