//! Entropy source abstraction.

use rand::rngs::OsRng;
use rand::RngCore;

/// Source of uniformly distributed random bytes.
///
/// This trait abstracts where draw randomness comes from.
/// Implementations can be:
/// - OsEntropy for real matches
/// - ScriptedEntropy for deterministic tests
pub trait EntropySource {
    /// Fill `dest` with random bytes
    fn fill_bytes(&mut self, dest: &mut [u8]);

    /// Draw a single random byte
    fn next_byte(&mut self) -> u8 {
        let mut byte = [0u8; 1];
        self.fill_bytes(&mut byte);
        byte[0]
    }
}

/// Operating system CSPRNG
#[derive(Clone, Copy, Debug, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest);
    }
}
