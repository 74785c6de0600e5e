//! Per-draw secret key.

use super::entropy::EntropySource;
use std::fmt;

/// 32-byte HMAC key, generated fresh for every fair draw
///
/// The key stays private until the draw is resolved. `Debug` never prints
/// key material; the hex form is only handed out through a reveal.
#[derive(Clone, PartialEq, Eq)]
pub struct SecureKey([u8; 32]);

impl SecureKey {
    /// Length of the key in bytes
    pub const LEN: usize = 32;

    /// Generate a new key from the given entropy source
    pub fn generate<E: EntropySource>(entropy: &mut E) -> Self {
        let mut bytes = [0u8; Self::LEN];
        entropy.fill_bytes(&mut bytes);
        Self(bytes)
    }

    /// Create from raw bytes
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse a revealed key from 64 hex characters
    pub fn from_hex(s: &str) -> Result<Self, hex::FromHexError> {
        let mut bytes = [0u8; Self::LEN];
        hex::decode_to_slice(s.trim(), &mut bytes)?;
        Ok(Self(bytes))
    }

    /// Get the underlying bytes
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex encoding, used only when revealing
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for SecureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecureKey(<redacted>)")
    }
}
