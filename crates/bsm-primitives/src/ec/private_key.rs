//! secp256k1 private key.
//!
//! Wraps a k256 signing key and adds hex and WIF decoding. Key material is
//! never printed: `Debug` is redacted and intermediate buffers holding the
//! scalar are zeroized.

use std::fmt;

use k256::ecdsa::SigningKey;
use zeroize::Zeroizing;

use crate::base58;
use crate::ec::key_id::KeyId;
use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

/// Length of a serialized private key in bytes.
const PRIVATE_KEY_BYTES_LEN: usize = 32;

/// Mainnet WIF prefix byte.
const MAINNET_PREFIX: u8 = 0x80;

/// Testnet WIF prefix byte.
const TESTNET_PREFIX: u8 = 0xef;

/// Compression flag byte appended to WIF for compressed public keys.
const COMPRESS_MAGIC: u8 = 0x01;

/// A secp256k1 private key used for signing.
#[derive(Clone)]
pub struct PrivateKey {
    /// The underlying k256 signing key.
    inner: SigningKey,
}

impl PrivateKey {
    /// Create a private key from a raw 32-byte scalar.
    ///
    /// # Arguments
    /// * `bytes` - A 32-byte big-endian scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` if the scalar is in `1..n`, or `InvalidPrivateKey`
    /// if it is zero, out of range, or the wrong length.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != PRIVATE_KEY_BYTES_LEN {
            return Err(PrimitivesError::InvalidPrivateKey(format!(
                "expected {} bytes, got {}",
                PRIVATE_KEY_BYTES_LEN,
                bytes.len()
            )));
        }
        let signing_key = SigningKey::from_slice(bytes)
            .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
        Ok(PrivateKey { inner: signing_key })
    }

    /// Create a private key from a 64-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        if hex_str.is_empty() {
            return Err(PrimitivesError::InvalidPrivateKey(
                "private key hex is empty".to_string(),
            ));
        }
        let bytes = Zeroizing::new(hex::decode(hex_str)?);
        Self::from_bytes(&bytes)
    }

    /// Decode a WIF (Wallet Import Format) string.
    ///
    /// Accepts mainnet (0x80) and testnet (0xef) prefixes, with or without
    /// the trailing compression flag.
    ///
    /// # Returns
    /// The key and whether its public key is meant to be used compressed.
    pub fn decode_wif(wif: &str) -> Result<(Self, bool), PrimitivesError> {
        let payload = Zeroizing::new(base58::check_decode(wif).map_err(|e| match e {
            PrimitivesError::ChecksumMismatch => e,
            other => PrimitivesError::InvalidWif(other.to_string()),
        })?);

        // prefix + key (+ compression flag)
        let compressed = match payload.len() {
            34 => {
                if payload[33] != COMPRESS_MAGIC {
                    return Err(PrimitivesError::InvalidWif(
                        "invalid compression flag".to_string(),
                    ));
                }
                true
            }
            33 => false,
            n => {
                return Err(PrimitivesError::InvalidWif(format!(
                    "invalid payload length {}",
                    n
                )));
            }
        };

        if payload[0] != MAINNET_PREFIX && payload[0] != TESTNET_PREFIX {
            return Err(PrimitivesError::InvalidWif(format!(
                "unknown prefix 0x{:02x}",
                payload[0]
            )));
        }

        let key = Self::from_bytes(&payload[1..1 + PRIVATE_KEY_BYTES_LEN])?;
        Ok((key, compressed))
    }

    /// Decode a WIF string, discarding the compression flag.
    pub fn from_wif(wif: &str) -> Result<Self, PrimitivesError> {
        Self::decode_wif(wif).map(|(key, _)| key)
    }

    /// Encode the key as a mainnet WIF string.
    ///
    /// # Arguments
    /// * `compressed` - Whether to append the compression flag.
    pub fn to_wif(&self, compressed: bool) -> String {
        let key_bytes = self.to_bytes();
        let mut payload = Zeroizing::new(Vec::with_capacity(1 + PRIVATE_KEY_BYTES_LEN + 1));
        payload.push(MAINNET_PREFIX);
        payload.extend_from_slice(key_bytes.as_slice());
        if compressed {
            payload.push(COMPRESS_MAGIC);
        }
        base58::check_encode(&payload)
    }

    /// Serialize the private key as a 32-byte big-endian array.
    ///
    /// The returned buffer is wiped when dropped.
    pub fn to_bytes(&self) -> Zeroizing<[u8; PRIVATE_KEY_BYTES_LEN]> {
        let mut out = Zeroizing::new([0u8; PRIVATE_KEY_BYTES_LEN]);
        out.copy_from_slice(&self.inner.to_bytes());
        out
    }

    /// Derive the corresponding public key.
    pub fn pub_key(&self) -> PublicKey {
        PublicKey::from_k256_verifying_key(self.inner.verifying_key())
    }

    /// Key identifier of this key's public key in the given encoding.
    pub fn key_id(&self, compressed: bool) -> KeyId {
        self.pub_key().key_id(compressed)
    }

    /// Access the underlying k256 `SigningKey`.
    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.inner
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("pub_key", &self.pub_key().to_hex())
            .finish_non_exhaustive()
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        *self.to_bytes() == *other.to_bytes()
    }
}

impl Eq for PrivateKey {}

#[cfg(test)]
mod tests {
    use super::*;

    fn one() -> PrivateKey {
        let mut bytes = [0u8; 32];
        bytes[31] = 1;
        PrivateKey::from_bytes(&bytes).unwrap()
    }

    #[test]
    fn test_from_bytes_rejects_out_of_range_scalars() {
        assert!(PrivateKey::from_bytes(&[0u8; 32]).is_err(), "zero scalar");
        assert!(PrivateKey::from_bytes(&[0xffu8; 32]).is_err(), "scalar >= n");
        // n itself
        let n = hex::decode("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141")
            .unwrap();
        assert!(PrivateKey::from_bytes(&n).is_err());
        // n - 1 is the largest valid scalar
        let n_minus_1 =
            hex::decode("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140")
                .unwrap();
        assert!(PrivateKey::from_bytes(&n_minus_1).is_ok());
        assert!(PrivateKey::from_bytes(&[1u8; 31]).is_err(), "short input");
    }

    #[test]
    fn test_from_hex() {
        let key = PrivateKey::from_hex(
            "0000000000000000000000000000000000000000000000000000000000000001",
        )
        .unwrap();
        assert_eq!(key, one());
        assert!(PrivateKey::from_hex("").is_err());
        assert!(PrivateKey::from_hex("not hex").is_err());
    }

    #[test]
    fn test_wif_vectors() {
        let (key, compressed) =
            PrivateKey::decode_wif("KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn")
                .unwrap();
        assert_eq!(key, one());
        assert!(compressed);

        let (key, compressed) =
            PrivateKey::decode_wif("5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf")
                .unwrap();
        assert_eq!(key, one());
        assert!(!compressed);

        assert_eq!(
            one().to_wif(true),
            "KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWn"
        );
        assert_eq!(
            one().to_wif(false),
            "5HpHagT65TZzG1PH3CSu63k8DbpvD8s5ip4nEB3kEsreAnchuDf"
        );
    }

    #[test]
    fn test_invalid_wif() {
        // modified character
        assert!(PrivateKey::from_wif("KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoWm").is_err());
        // truncated
        assert!(PrivateKey::from_wif("KwDiBf89QgGbjEhKnhXJuH7LrciVrZi3qYjgd9M7rFU73sVHnoW").is_err());
        // an address is valid Base58Check but not a WIF
        assert!(PrivateKey::from_wif("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH").is_err());
    }

    #[test]
    fn test_debug_does_not_leak_scalar() {
        let rendered = format!("{:?}", one());
        assert!(!rendered.contains(&"0".repeat(63)), "got: {}", rendered);
        assert!(rendered.contains("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"));
    }

    #[test]
    fn test_key_id() {
        assert_eq!(
            one().key_id(true).to_hex(),
            "751e76e8199196d454941c45d1b3a323f1433bd6"
        );
        assert_eq!(
            one().key_id(false).to_hex(),
            "91b24bf9f5288532960ac687abb035127b1d28a5"
        );
    }
}
