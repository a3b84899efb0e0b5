use bsm_primitives::PrimitivesError;

/// Error types for message signing and verification.
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    /// The address text does not decode to a key identifier.
    #[error("{0} is not a valid address")]
    InvalidAddress(String),
    /// The address is valid but names a script rather than a key.
    #[error("{0} does not refer to a key")]
    NotKeyAddress(String),
    /// The keystore cannot provide a private key for the address.
    #[error("private key for {address} is not available: {reason}")]
    KeyUnavailable {
        /// The address text as given.
        address: String,
        /// Why the key could not be produced.
        reason: &'static str,
    },
    /// The private key could not produce a signature.
    #[error("sign failed: {0}")]
    Signing(String),
    /// The signature blob or its text encoding failed structural decoding.
    #[error("malformed signature: {0}")]
    MalformedSignature(String),
    /// The signature is well formed but recovers no key for the digest.
    #[error("invalid signature: {0}")]
    InvalidSignature(String),
    /// Any other failure from the primitives layer.
    #[error("{0}")]
    Primitives(#[source] PrimitivesError),
}

impl From<PrimitivesError> for MessageError {
    fn from(e: PrimitivesError) -> Self {
        match e {
            PrimitivesError::MalformedSignature(msg) => MessageError::MalformedSignature(msg),
            PrimitivesError::InvalidSignature(msg) => MessageError::InvalidSignature(msg),
            PrimitivesError::InvalidPrivateKey(msg) => MessageError::Signing(msg),
            other => MessageError::Primitives(other),
        }
    }
}
