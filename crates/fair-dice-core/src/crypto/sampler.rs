//! Unbiased integer sampling over a secure entropy source.

use super::commitment::Commitment;
use super::entropy::{EntropySource, OsEntropy};
use super::key::SecureKey;
use crate::error::FairnessError;
use tracing::trace;

/// Largest `max` the single-byte sampler supports
pub const MAX_RANGE: u8 = u8::MAX;

/// Secure random source for keys, unbiased integers and commitments
#[derive(Clone, Debug, Default)]
pub struct SecureRandom<E: EntropySource = OsEntropy> {
    entropy: E,
}

impl SecureRandom<OsEntropy> {
    /// Create a source backed by the operating system CSPRNG
    pub fn new() -> Self {
        Self { entropy: OsEntropy }
    }
}

impl<E: EntropySource> SecureRandom<E> {
    /// Create a source over a custom entropy source
    pub fn with_entropy(entropy: E) -> Self {
        Self { entropy }
    }

    /// Borrow the underlying entropy source
    pub fn entropy(&self) -> &E {
        &self.entropy
    }

    /// Generate a fresh 256-bit key
    pub fn generate_key(&mut self) -> SecureKey {
        SecureKey::generate(&mut self.entropy)
    }

    /// Draw a uniform integer in `0..=max` by rejection sampling single bytes.
    ///
    /// Bytes at or above the largest multiple of `max + 1` that fits in 256
    /// are discarded, so every outcome has exactly the same number of
    /// accepting bytes. At worst about half the bytes are rejected.
    pub fn generate_unbiased_int(&mut self, max: usize) -> Result<u8, FairnessError> {
        if max > MAX_RANGE as usize {
            return Err(FairnessError::RangeTooLarge { max });
        }

        let outcomes = max as u16 + 1;
        let limit = 256 - (256 % outcomes);
        loop {
            let byte = self.entropy.next_byte() as u16;
            if byte < limit {
                return Ok((byte % outcomes) as u8);
            }
            trace!(byte, limit, "rejected sample");
        }
    }

    /// Compute the commitment to `value` under `key`
    pub fn compute_commitment(key: &SecureKey, value: u8) -> Commitment {
        Commitment::compute(key, value)
    }
}
