//! Signed-message primitives: hashing, encodings, and secp256k1 keys.
//!
//! This crate provides the building blocks the message protocol sits on:
//! - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
//! - Variable-length integer encoding and a byte writer
//! - Base58 and Base58Check encoding
//! - P2PKH / P2SH address encoding and decoding
//! - secp256k1 private and public keys, key identifiers, and compact
//!   recoverable signatures

pub mod hash;
pub mod util;
pub mod base58;
pub mod address;
pub mod ec;

mod error;
pub use error::PrimitivesError;
