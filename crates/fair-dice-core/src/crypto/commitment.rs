//! HMAC-SHA3-256 commitment for the commit-reveal scheme.

use super::key::SecureKey;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha3::Sha3_256;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

type HmacSha3_256 = Hmac<Sha3_256>;

/// Errors from parsing a published commitment
#[derive(Debug, Error)]
pub enum CommitmentParseError {
    #[error("Commitment must be 64 hex characters: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Commitment = HMAC-SHA3-256(key, decimal(value))
///
/// The message is the decimal ASCII form of the committed value with no sign
/// and no leading zeros. Any verifier must rebuild exactly that message.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commitment(#[serde(with = "hex_bytes")] [u8; 32]);

impl Commitment {
    /// Compute the commitment to `value` under `key`
    pub fn compute(key: &SecureKey, value: u8) -> Self {
        let mut mac = HmacSha3_256::new_from_slice(key.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(value.to_string().as_bytes());
        Self(mac.finalize().into_bytes().into())
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Verify that the given key and value produce this commitment
    pub fn verify(&self, key: &SecureKey, value: u8) -> bool {
        *self == Self::compute(key, value)
    }
}

impl FromStr for Commitment {
    type Err = CommitmentParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s.trim(), &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8; 32], s: S) -> Result<S::Ok, S::Error> {
        hex::encode(bytes).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<[u8; 32], D::Error> {
        let hex_str = String::deserialize(d)?;
        let mut arr = [0u8; 32];
        hex::decode_to_slice(&hex_str, &mut arr).map_err(serde::de::Error::custom)?;
        Ok(arr)
    }
}
