//! Commit-reveal session for a single fair draw.
//!
//! A session commits to a secret value before the counterpart contributes
//! theirs. The commitment fixes the value; the key that opens it is only
//! released by [`FairRandomSession::resolve`].

use super::messages::{CommitMessage, Reveal};
use crate::crypto::{Commitment, EntropySource, SecureKey, SecureRandom, MAX_RANGE};
use crate::error::FairnessError;
use std::fmt;
use tracing::debug;

/// Session state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Commitment published, waiting for the counterpart's value
    Committed,
    /// Secret revealed, terminal
    Resolved,
}

/// One fairness-critical draw over `0..=range_max`
pub struct FairRandomSession {
    range_max: u8,
    committed_value: u8,
    key: SecureKey,
    commitment: Commitment,
    state: SessionState,
}

impl FairRandomSession {
    /// Open a session: generate a key, sample the committed value and
    /// commit to it.
    pub fn open<E: EntropySource>(
        rng: &mut SecureRandom<E>,
        range_max: usize,
    ) -> Result<Self, FairnessError> {
        if range_max > MAX_RANGE as usize {
            return Err(FairnessError::RangeTooLarge { max: range_max });
        }

        let key = rng.generate_key();
        let committed_value = rng.generate_unbiased_int(range_max)?;
        let commitment = Commitment::compute(&key, committed_value);
        debug!(%commitment, range_max, "opened fair random session");

        Ok(Self {
            range_max: range_max as u8,
            committed_value,
            key,
            commitment,
            state: SessionState::Committed,
        })
    }

    /// Largest value either party may contribute
    pub fn range_max(&self) -> u8 {
        self.range_max
    }

    /// The published commitment
    pub fn commitment(&self) -> &Commitment {
        &self.commitment
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Public half of the session, safe to publish before resolution
    pub fn commit_message(&self) -> CommitMessage {
        CommitMessage {
            commitment: self.commitment,
            range_max: self.range_max,
        }
    }

    /// Combine the counterpart's value with the committed one and reveal.
    ///
    /// Fails without changing state if `user_value` is out of range or the
    /// session was already resolved.
    pub fn resolve(&mut self, user_value: usize) -> Result<Reveal, FairnessError> {
        if self.state == SessionState::Resolved {
            return Err(FairnessError::AlreadyResolved);
        }
        if user_value > self.range_max as usize {
            return Err(FairnessError::ValueOutOfRange {
                value: user_value,
                range_max: self.range_max,
            });
        }

        let outcomes = self.range_max as usize + 1;
        let result = (self.committed_value as usize + user_value) % outcomes;
        self.state = SessionState::Resolved;

        let reveal = Reveal {
            range_max: self.range_max,
            committed_value: self.committed_value,
            key: self.key.to_hex(),
            user_value: user_value as u8,
            result: result as u8,
        };
        debug!(
            commitment = %self.commitment,
            key = %reveal.key,
            committed_value = reveal.committed_value,
            user_value = reveal.user_value,
            result = reveal.result,
            "resolved fair random session"
        );
        Ok(reveal)
    }
}

impl fmt::Debug for FairRandomSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FairRandomSession")
            .field("range_max", &self.range_max)
            .field("commitment", &self.commitment)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
