//! Elliptic curve cryptography on secp256k1.
//!
//! Provides private keys, public keys, key identifiers and compact
//! recoverable ECDSA signatures.

pub mod private_key;
pub mod public_key;
pub mod key_id;
pub mod compact;

pub use compact::{CompactSignature, RecoveredKey};
pub use key_id::KeyId;
pub use private_key::PrivateKey;
pub use public_key::PublicKey;
