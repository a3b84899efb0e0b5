//! Key identifiers: the Hash160 of an encoded public key.

use std::fmt;

use crate::PrimitivesError;

/// Length of a key identifier in bytes.
pub const KEY_ID_LEN: usize = 20;

/// The 20-byte RIPEMD-160(SHA-256(pubkey)) identity embedded in an address.
///
/// The identifier depends on how the public key was encoded: the
/// compressed and uncompressed encodings of the same point produce
/// different identifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyId([u8; KEY_ID_LEN]);

impl KeyId {
    /// Wrap raw identifier bytes.
    pub const fn new(bytes: [u8; KEY_ID_LEN]) -> Self {
        KeyId(bytes)
    }

    /// Create a key identifier from a slice that must be exactly 20 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let arr: [u8; KEY_ID_LEN] = bytes.try_into().map_err(|_| {
            PrimitivesError::InvalidAddress(format!(
                "key identifier must be {} bytes, got {}",
                KEY_ID_LEN,
                bytes.len()
            ))
        })?;
        Ok(KeyId(arr))
    }

    /// Parse a 40-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_slice(&bytes)
    }

    /// Borrow the raw identifier bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_ID_LEN] {
        &self.0
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; KEY_ID_LEN]> for KeyId {
    fn from(bytes: [u8; KEY_ID_LEN]) -> Self {
        KeyId(bytes)
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
