//! Scripted entropy for deterministic tests.

use super::entropy::EntropySource;
use std::collections::VecDeque;

/// Deterministic entropy source for testing
///
/// Single-byte draws (the sampler) are served from a script in order, so a
/// test controls every committed value and every rejected sample. Bulk
/// draws (keys) are filled from an incrementing counter, which keeps keys
/// distinct per session without consuming the script.
#[derive(Clone, Debug, Default)]
pub struct ScriptedEntropy {
    script: VecDeque<u8>,
    counter: u8,
}

impl ScriptedEntropy {
    /// Create a source that will serve `bytes` to the sampler
    pub fn new(bytes: impl IntoIterator<Item = u8>) -> Self {
        Self {
            script: bytes.into_iter().collect(),
            counter: 0,
        }
    }

    /// Append more sampler bytes
    pub fn push(&mut self, byte: u8) {
        self.script.push_back(byte);
    }

    /// Number of sampler bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl EntropySource for ScriptedEntropy {
    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for byte in dest.iter_mut() {
            *byte = self.counter;
            self.counter = self.counter.wrapping_add(1);
        }
    }

    fn next_byte(&mut self) -> u8 {
        self.script
            .pop_front()
            .expect("scripted entropy exhausted")
    }
}
