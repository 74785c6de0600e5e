//! Cryptographic primitives for the Fair Dice protocol.
//!
//! This module provides:
//! - EntropySource and its OS-backed and scripted implementations
//! - SecureKey, the per-draw HMAC key revealed after resolution
//! - Commitment, the HMAC-SHA3-256 tag published before a draw
//! - SecureRandom, the unbiased sampler tying the above together

mod commitment;
mod entropy;
mod key;
mod mock;
mod sampler;

pub use commitment::{Commitment, CommitmentParseError};
pub use entropy::{EntropySource, OsEntropy};
pub use key::SecureKey;
pub use mock::ScriptedEntropy;
pub use sampler::{SecureRandom, MAX_RANGE};
