#![deny(missing_docs)]

//! Signed messages: prove control of an address's key over arbitrary text.
//!
//! A message is hashed under a magic domain prefix, signed into a 65-byte
//! compact recoverable signature, and exchanged as Base64. A verifier
//! recovers the signer's public key from the signature alone and compares
//! its key identifier with the one embedded in the claimed address.

mod error;
pub mod address;
pub mod config;
pub mod hashing;
pub mod keystore;
pub mod signed;
pub mod signer;

pub use address::{AddressCodec, Base58AddressCodec};
pub use config::Config;
pub use error::MessageError;
pub use hashing::{magic_hash, MessageDigest, MessageHasher};
pub use keystore::{Keystore, MemoryKeystore};
pub use signed::{
    check_address, decode_signature, encode_signature, recover_public_key, sign,
    verify_address, LowSPolicy, Verification,
};
pub use signer::{MessageSigner, MessageVerifier};
