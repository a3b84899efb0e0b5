//! Compact recoverable ECDSA signatures.
//!
//! A compact signature is 65 bytes: one header byte followed by the 32-byte
//! big-endian R and S values. The header is `27 + recovery_id`, plus 4 when
//! the signer's public key is identified by its compressed encoding. The
//! recovery id selects which of the candidate points consistent with
//! `(digest, R, S)` is the signer's public key, so the key never has to be
//! transmitted alongside the signature.

use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{self, RecoveryId, VerifyingKey};
use k256::FieldBytes;

use crate::ec::key_id::KeyId;
use crate::ec::private_key::PrivateKey;
use crate::ec::public_key::PublicKey;
use crate::PrimitivesError;

/// Length of a serialized compact signature.
pub const COMPACT_SIGNATURE_LEN: usize = 65;

/// Header value for recovery id 0 with an uncompressed key.
const HEADER_BASE: u8 = 27;

/// Header offset marking a compressed public key.
const COMPRESSED_FLAG: u8 = 4;

/// Largest recovery id; ids 2 and 3 cover an R whose x-coordinate overflowed n.
const MAX_RECOVERY_ID: u8 = 3;

/// The secp256k1 curve order N.
const CURVE_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
    0x41, 0x41,
];

/// Half of the secp256k1 curve order (N/2), the largest low-S value.
const HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B,
    0x20, 0xA0,
];

/// A recoverable ECDSA signature in the 65-byte compact format.
///
/// Values of this type are always structurally valid: R and S are in
/// `1..n` and the recovery id is in `0..=3`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CompactSignature {
    recovery_id: u8,
    compressed: bool,
    r: [u8; 32],
    s: [u8; 32],
}

impl CompactSignature {
    /// Sign a 32-byte digest, producing a compact recoverable signature.
    ///
    /// The nonce is derived deterministically (RFC 6979) and S is normalized
    /// to the lower half of the curve order. The recovery id is found by
    /// trial recovery over `0..=3`, keeping the first candidate that yields
    /// the signer's own public key.
    ///
    /// # Arguments
    /// * `digest` - The 32-byte value to sign.
    /// * `key` - The signer's private key, borrowed for this call only.
    /// * `compressed` - Whether the signer is identified by its compressed key.
    ///
    /// # Returns
    /// The signature, or `InvalidPrivateKey` if the key cannot produce a
    /// signature whose recovery reproduces it.
    pub fn sign(
        digest: &[u8; 32],
        key: &PrivateKey,
        compressed: bool,
    ) -> Result<Self, PrimitivesError> {
        let signature: ecdsa::Signature = key
            .signing_key()
            .sign_prehash(digest)
            .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
        let signature = signature.normalize_s().unwrap_or(signature);
        let (r_bytes, s_bytes) = signature.split_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&r_bytes);
        s.copy_from_slice(&s_bytes);

        let expected = key.pub_key();
        for recovery_id in 0..=MAX_RECOVERY_ID {
            let candidate = CompactSignature {
                recovery_id,
                compressed,
                r,
                s,
            };
            if let Ok(recovered) = candidate.recover_public_key(digest) {
                if *recovered.public_key() == expected {
                    return Ok(candidate);
                }
            }
        }

        Err(PrimitivesError::InvalidPrivateKey(
            "no recovery id reproduces the signing key".to_string(),
        ))
    }

    /// Parse a 65-byte compact signature.
    ///
    /// # Returns
    /// `MalformedSignature` if the length is wrong, the header is outside
    /// `27..=34`, or R or S is zero or not below the curve order.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() != COMPACT_SIGNATURE_LEN {
            return Err(PrimitivesError::MalformedSignature(format!(
                "expected {} bytes, got {}",
                COMPACT_SIGNATURE_LEN,
                bytes.len()
            )));
        }

        let header = bytes[0];
        if !(HEADER_BASE..=HEADER_BASE + COMPRESSED_FLAG + MAX_RECOVERY_ID).contains(&header) {
            return Err(PrimitivesError::MalformedSignature(format!(
                "header byte {} out of range",
                header
            )));
        }
        let flags = header - HEADER_BASE;

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[1..33]);
        s.copy_from_slice(&bytes[33..65]);
        check_scalar("R", &r)?;
        check_scalar("S", &s)?;

        Ok(CompactSignature {
            recovery_id: flags & MAX_RECOVERY_ID,
            compressed: flags & COMPRESSED_FLAG != 0,
            r,
            s,
        })
    }

    /// Serialize to the 65-byte wire format.
    pub fn to_bytes(&self) -> [u8; COMPACT_SIGNATURE_LEN] {
        let mut out = [0u8; COMPACT_SIGNATURE_LEN];
        out[0] = self.header();
        out[1..33].copy_from_slice(&self.r);
        out[33..65].copy_from_slice(&self.s);
        out
    }

    /// The header byte: `27 + recovery_id (+ 4 if compressed)`.
    pub fn header(&self) -> u8 {
        let flag = if self.compressed { COMPRESSED_FLAG } else { 0 };
        HEADER_BASE + flag + self.recovery_id
    }

    /// The recovery id in `0..=3`.
    pub fn recovery_id(&self) -> u8 {
        self.recovery_id
    }

    /// Whether the signer is identified by its compressed public key.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// The R component (32 bytes, big-endian).
    pub fn r(&self) -> &[u8; 32] {
        &self.r
    }

    /// The S component (32 bytes, big-endian).
    pub fn s(&self) -> &[u8; 32] {
        &self.s
    }

    /// True if S is in the lower half of the curve order.
    pub fn is_low_s(&self) -> bool {
        !is_greater_than(&self.s, &HALF_ORDER)
    }

    /// The equivalent signature with S replaced by `n - S`.
    ///
    /// Negating S negates the nonce point, so the parity bit of the recovery
    /// id flips; both forms recover the same public key.
    pub fn complement_s(&self) -> Self {
        CompactSignature {
            recovery_id: self.recovery_id ^ 1,
            compressed: self.compressed,
            r: self.r,
            s: subtract_from_order(&self.s),
        }
    }

    /// The low-S form of this signature.
    pub fn normalize_s(&self) -> Self {
        if self.is_low_s() {
            *self
        } else {
            self.complement_s()
        }
    }

    /// Recover the signer's public key from this signature and the digest.
    ///
    /// High-S signatures are recovered through their low-S equivalent.
    ///
    /// # Returns
    /// The public key tagged with the header's encoding, or
    /// `InvalidSignature` if no point on the curve is consistent with
    /// `(digest, R, S, recovery_id)`.
    pub fn recover_public_key(&self, digest: &[u8; 32]) -> Result<RecoveredKey, PrimitivesError> {
        let normalized = self.normalize_s();

        let recovery_id = RecoveryId::from_byte(normalized.recovery_id).ok_or_else(|| {
            PrimitivesError::MalformedSignature(format!(
                "recovery id {} out of range",
                normalized.recovery_id
            ))
        })?;

        let signature = ecdsa::Signature::from_scalars(
            FieldBytes::from(normalized.r),
            FieldBytes::from(normalized.s),
        )
        .map_err(|e| PrimitivesError::MalformedSignature(e.to_string()))?;

        let recovered = VerifyingKey::recover_from_prehash(digest, &signature, recovery_id)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;

        Ok(RecoveredKey {
            public_key: PublicKey::from_k256_verifying_key(&recovered),
            compressed: self.compressed,
        })
    }

    /// Recover the signer's key identifier, honoring the compression flag.
    pub fn recover_key_id(&self, digest: &[u8; 32]) -> Result<KeyId, PrimitivesError> {
        Ok(self.recover_public_key(digest)?.key_id())
    }
}

/// A public key recovered from a compact signature.
///
/// Carries the encoding named by the signature header, so the same point
/// recovered as compressed and as uncompressed compares unequal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoveredKey {
    public_key: PublicKey,
    compressed: bool,
}

impl RecoveredKey {
    /// Pair a public key with an encoding.
    pub fn new(public_key: PublicKey, compressed: bool) -> Self {
        RecoveredKey {
            public_key,
            compressed,
        }
    }

    /// The recovered curve point.
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Whether the signer is identified by the compressed encoding.
    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    /// SEC1 bytes in the recovered encoding.
    pub fn to_encoded(&self) -> Vec<u8> {
        self.public_key.to_encoded(self.compressed)
    }

    /// Key identifier of the recovered encoding.
    pub fn key_id(&self) -> KeyId {
        self.public_key.key_id(self.compressed)
    }
}

/// Reject a signature scalar that is zero or not below the curve order.
fn check_scalar(name: &str, val: &[u8; 32]) -> Result<(), PrimitivesError> {
    if is_zero(val) {
        return Err(PrimitivesError::MalformedSignature(format!(
            "signature {} is zero",
            name
        )));
    }
    if !is_less_than(val, &CURVE_ORDER) {
        return Err(PrimitivesError::MalformedSignature(format!(
            "signature {} is >= curve.N",
            name
        )));
    }
    Ok(())
}

/// Check if a 32-byte big-endian integer is zero.
fn is_zero(val: &[u8; 32]) -> bool {
    val.iter().all(|&b| b == 0)
}

/// Compare two 32-byte big-endian integers: a < b.
fn is_less_than(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a < b
}

/// Compare two 32-byte big-endian integers: a > b.
fn is_greater_than(a: &[u8; 32], b: &[u8; 32]) -> bool {
    a > b
}

/// Compute N - val where N is the secp256k1 curve order.
fn subtract_from_order(val: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;
    for i in (0..32).rev() {
        let diff = CURVE_ORDER[i] as i32 - val[i] as i32 - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }
    result
}
