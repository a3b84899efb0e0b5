//! Compact-signature signing and address verification over message digests.
//!
//! Verification is key recovery: the signer's public key is reconstructed
//! from the digest and the signature, hashed into a key identifier, and
//! compared with the identifier embedded in the claimed address.

use base64::Engine;

use bsm_primitives::ec::{CompactSignature, KeyId, PrivateKey, RecoveredKey};

use crate::hashing::MessageDigest;
use crate::MessageError;

/// Whether verification accepts signatures whose S is in the upper half
/// of the curve order. Signing always produces low-S.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LowSPolicy {
    /// Accept high-S signatures; they recover the same key as their low-S twin.
    #[default]
    Permissive,
    /// Reject high-S signatures as malformed.
    Strict,
}

impl LowSPolicy {
    /// Whether `signature` is acceptable under this policy.
    ///
    /// # Returns
    /// `MalformedSignature` for a high-S signature under `Strict`.
    pub fn check(self, signature: &CompactSignature) -> Result<(), MessageError> {
        if self == LowSPolicy::Strict && !signature.is_low_s() {
            return Err(MessageError::MalformedSignature(
                "S is not in canonical low form".to_string(),
            ));
        }
        Ok(())
    }
}

/// Detailed outcome of checking a signature against an address.
///
/// `verify_address` collapses everything but `Valid` into `false`; this
/// type keeps "could not decode", "decoded but no key recovers" and
/// "recovered somebody else" apart.
#[derive(Debug)]
pub enum Verification {
    /// The signature recovers the expected key identifier.
    Valid,
    /// A key was recovered but it belongs to a different identifier.
    KeyMismatch {
        /// Identifier of the key the signature actually recovers.
        recovered: KeyId,
    },
    /// The signature failed structural decoding.
    Malformed(MessageError),
    /// The signature is well formed but no key is consistent with it.
    Invalid(MessageError),
}

impl Verification {
    /// True only for `Verification::Valid`.
    pub fn is_valid(&self) -> bool {
        matches!(self, Verification::Valid)
    }
}

/// Sign a digest with `key`.
///
/// # Arguments
/// * `digest` - The message digest.
/// * `key` - The signer's private key, borrowed for this call only.
/// * `compressed` - Whether the signer's address hashes the compressed key.
pub fn sign(
    digest: &MessageDigest,
    key: &PrivateKey,
    compressed: bool,
) -> Result<CompactSignature, MessageError> {
    Ok(CompactSignature::sign(digest.as_bytes(), key, compressed)?)
}

/// Recover the signer's public key from a 65-byte signature blob.
///
/// The result carries the encoding named by the header, so it only equals
/// the signer's key when the compression flag is intact.
///
/// # Returns
/// `MalformedSignature` when the blob does not decode, `InvalidSignature`
/// when no key is consistent with the digest.
pub fn recover_public_key(
    digest: &MessageDigest,
    signature: &[u8],
) -> Result<RecoveredKey, MessageError> {
    let signature = CompactSignature::from_bytes(signature)?;
    Ok(signature.recover_public_key(digest.as_bytes())?)
}

/// Check a 65-byte signature blob against an expected key identifier.
pub fn check_address(
    digest: &MessageDigest,
    signature: &[u8],
    expected: &KeyId,
    policy: LowSPolicy,
) -> Verification {
    match CompactSignature::from_bytes(signature) {
        Ok(signature) => check_signature(digest, &signature, expected, policy),
        Err(e) => {
            tracing::warn!(digest = %digest, error = %e, "malformed message signature");
            Verification::Malformed(e.into())
        }
    }
}

/// Check a decoded signature against an expected key identifier.
pub fn check_signature(
    digest: &MessageDigest,
    signature: &CompactSignature,
    expected: &KeyId,
    policy: LowSPolicy,
) -> Verification {
    if let Err(e) = policy.check(signature) {
        tracing::warn!(digest = %digest, error = %e, "high-S message signature rejected");
        return Verification::Malformed(e);
    }

    match signature.recover_key_id(digest.as_bytes()) {
        Ok(recovered) if recovered == *expected => {
            tracing::debug!(digest = %digest, key_id = %recovered, "message signature verified");
            Verification::Valid
        }
        Ok(recovered) => {
            tracing::debug!(
                digest = %digest,
                expected = %expected,
                recovered = %recovered,
                "message signature recovers a different key"
            );
            Verification::KeyMismatch { recovered }
        }
        Err(e) => match MessageError::from(e) {
            err @ MessageError::MalformedSignature(_) => {
                tracing::warn!(digest = %digest, error = %err, "malformed message signature");
                Verification::Malformed(err)
            }
            err => {
                tracing::warn!(digest = %digest, error = %err, "message signature recovery failed");
                Verification::Invalid(err)
            }
        },
    }
}

/// Verify that a 65-byte signature blob was made by the holder of `expected`.
///
/// Malformed and unrecoverable signatures both yield `false`; use
/// [`check_address`] to tell them apart.
pub fn verify_address(digest: &MessageDigest, signature: &[u8], expected: &KeyId) -> bool {
    check_address(digest, signature, expected, LowSPolicy::default()).is_valid()
}

/// Encode a signature as standard padded Base64.
pub fn encode_signature(signature: &CompactSignature) -> String {
    base64::engine::general_purpose::STANDARD.encode(signature.to_bytes())
}

/// Decode a Base64 signature text.
///
/// # Returns
/// `MalformedSignature` for characters outside the alphabet, bad or
/// missing padding, non-canonical trailing bits, or a blob that is not a
/// structurally valid compact signature.
pub fn decode_signature(text: &str) -> Result<CompactSignature, MessageError> {
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(text)
        .map_err(|e| MessageError::MalformedSignature(format!("invalid base64: {}", e)))?;
    Ok(CompactSignature::from_bytes(&bytes)?)
}
