//! secp256k1 public key.
//!
//! Supports compressed/uncompressed SEC1 serialization and key identifier
//! derivation. Public keys are obtained from a private key or recovered
//! from a compact signature.

use std::fmt;

use k256::ecdsa::VerifyingKey;

use crate::ec::key_id::KeyId;
use crate::hash::hash160;
use crate::PrimitivesError;

/// Length of a compressed public key in bytes (prefix + 32 byte x-coordinate).
pub const COMPRESSED_LEN: usize = 33;

/// Length of an uncompressed public key in bytes (prefix + 32 byte x + 32 byte y).
pub const UNCOMPRESSED_LEN: usize = 65;

/// A secp256k1 public key.
#[derive(Clone, Copy, Debug)]
pub struct PublicKey {
    /// The underlying k256 verifying key.
    inner: VerifyingKey,
}

impl PublicKey {
    /// Create a PublicKey from SEC1 encoded bytes.
    ///
    /// Accepts both compressed (33-byte) and uncompressed (65-byte) formats.
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, or `InvalidPublicKey` if the bytes do not
    /// describe a point on the curve.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.is_empty() {
            return Err(PrimitivesError::InvalidPublicKey(
                "pubkey bytes are empty".to_string(),
            ));
        }
        let vk = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string()))?;
        Ok(PublicKey { inner: vk })
    }

    /// Create a PublicKey from a hex-encoded SEC1 string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize in compressed SEC1 format (33 bytes).
    ///
    /// The first byte is 0x02 (even Y) or 0x03 (odd Y), followed by the X coordinate.
    pub fn to_compressed(&self) -> [u8; COMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize in uncompressed SEC1 format (65 bytes).
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_LEN] {
        let point = self.inner.to_encoded_point(false);
        let mut out = [0u8; UNCOMPRESSED_LEN];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Serialize in the requested SEC1 encoding.
    pub fn to_encoded(&self, compressed: bool) -> Vec<u8> {
        if compressed {
            self.to_compressed().to_vec()
        } else {
            self.to_uncompressed().to_vec()
        }
    }

    /// Lowercase hex of the compressed encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_compressed())
    }

    /// Compute the key identifier (Hash160) of the chosen encoding.
    ///
    /// # Arguments
    /// * `compressed` - Hash the 33-byte encoding if true, the 65-byte one otherwise.
    pub fn key_id(&self, compressed: bool) -> KeyId {
        KeyId::new(hash160(&self.to_encoded(compressed)))
    }

    pub(crate) fn from_k256_verifying_key(vk: &VerifyingKey) -> Self {
        PublicKey { inner: *vk }
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_compressed() == other.to_compressed()
    }
}

impl Eq for PublicKey {}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const G_COMPRESSED: &str =
        "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const G_UNCOMPRESSED: &str = "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\
                                  483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

    #[test]
    fn test_parse_both_encodings() {
        let from_compressed = PublicKey::from_hex(G_COMPRESSED).unwrap();
        let from_uncompressed = PublicKey::from_hex(G_UNCOMPRESSED).unwrap();
        assert_eq!(from_compressed, from_uncompressed);
        assert_eq!(hex::encode(from_compressed.to_uncompressed()), G_UNCOMPRESSED);
        assert_eq!(from_uncompressed.to_string(), G_COMPRESSED);
    }

    #[test]
    fn test_rejects_invalid_points() {
        assert!(PublicKey::from_bytes(&[]).is_err());
        assert!(PublicKey::from_bytes(&[0x05]).is_err());
        // x changed: no longer on the curve
        let mut bad = hex::decode(G_UNCOMPRESSED).unwrap();
        bad[1] ^= 0x04;
        assert!(PublicKey::from_bytes(&bad).is_err());
    }

    #[test]
    fn test_key_id_depends_on_encoding() {
        let pk = PublicKey::from_hex(G_COMPRESSED).unwrap();
        assert_eq!(
            pk.key_id(true).to_hex(),
            "751e76e8199196d454941c45d1b3a323f1433bd6"
        );
        assert_eq!(
            pk.key_id(false).to_hex(),
            "91b24bf9f5288532960ac687abb035127b1d28a5"
        );
        assert_eq!(pk.to_encoded(true).len(), COMPRESSED_LEN);
        assert_eq!(pk.to_encoded(false).len(), UNCOMPRESSED_LEN);
    }
}
