/// Unified error type for all primitives operations.
///
/// Covers errors from key parsing, signature decoding and recovery,
/// and the Base58 / address encodings.
#[derive(Debug, thiserror::Error)]
pub enum PrimitivesError {
    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// The signature blob failed structural decoding.
    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    /// The signature is well formed but does not recover a key for the digest.
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("invalid WIF format: {0}")]
    InvalidWif(String),

    #[error("checksum mismatch")]
    ChecksumMismatch,

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("address not supported: {0}")]
    UnsupportedAddress(String),
}

impl From<hex::FromHexError> for PrimitivesError {
    fn from(e: hex::FromHexError) -> Self {
        PrimitivesError::InvalidHex(e.to_string())
    }
}
