//! Domain-separated message digests.
//!
//! The digest of a message is
//! `SHA-256d(varint(len(magic)) || magic || varint(len(message)) || message)`.
//! The magic string binds the digest to this protocol so a signature over
//! it cannot be replayed as a signature over a transaction or another
//! protocol's data hashed by the same key.

use std::fmt;

use bsm_primitives::hash::sha256d;
use bsm_primitives::util::ByteWriter;

/// Magic string of signed-message protocol version 1.
pub const BITCOIN_SIGNED_MESSAGE_MAGIC: &str = "Bitcoin Signed Message:\n";

/// A 32-byte message digest, the value actually signed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageDigest([u8; 32]);

impl MessageDigest {
    /// Borrow the digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; 32]> for MessageDigest {
    fn from(bytes: [u8; 32]) -> Self {
        MessageDigest(bytes)
    }
}

impl fmt::Display for MessageDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Computes message digests under a fixed magic domain string.
///
/// Each magic string is its own protocol: digests under different magics
/// are unrelated, and signatures made under one never verify under another.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MessageHasher {
    magic: &'static str,
}

impl MessageHasher {
    /// Protocol version 1, the Bitcoin signed-message magic.
    pub const BITCOIN: MessageHasher = MessageHasher {
        magic: BITCOIN_SIGNED_MESSAGE_MAGIC,
    };

    /// A hasher for a different protocol identified by `magic`.
    pub const fn with_magic(magic: &'static str) -> Self {
        MessageHasher { magic }
    }

    /// The magic domain string.
    pub fn magic(&self) -> &'static str {
        self.magic
    }

    /// The exact byte buffer that is double-hashed for `message`.
    pub fn preimage(&self, message: &[u8]) -> Vec<u8> {
        let mut writer = ByteWriter::with_capacity(self.magic.len() + message.len() + 18);
        writer.write_var_bytes(self.magic.as_bytes());
        writer.write_var_bytes(message);
        writer.into_bytes()
    }

    /// Digest `message`. Any byte sequence, including the empty one, is valid.
    pub fn digest(&self, message: &[u8]) -> MessageDigest {
        MessageDigest(sha256d(&self.preimage(message)))
    }
}

impl Default for MessageHasher {
    fn default() -> Self {
        MessageHasher::BITCOIN
    }
}

/// Digest `message` under protocol version 1.
pub fn magic_hash(message: &[u8]) -> MessageDigest {
    MessageHasher::BITCOIN.digest(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digests() {
        assert_eq!(
            magic_hash(b"hello").to_hex(),
            "cf0447ec85f0ce7150a257db32ebfcb7523dae17c36dbd1be598779fec0484f4"
        );
        assert_eq!(
            magic_hash(b"").to_hex(),
            "80e795d4a4caadd7047af389d9f7f220562feb6196032e2131e10563352c4bcc"
        );
    }

    #[test]
    fn test_preimage_layout() {
        let preimage = MessageHasher::BITCOIN.preimage(b"hello");
        assert_eq!(preimage[0], 24);
        assert_eq!(&preimage[1..25], BITCOIN_SIGNED_MESSAGE_MAGIC.as_bytes());
        assert_eq!(preimage[25], 5);
        assert_eq!(&preimage[26..], b"hello");
    }

    #[test]
    fn test_long_message_uses_multibyte_length() {
        let message = vec![b'a'; 300];
        let preimage = MessageHasher::BITCOIN.preimage(&message);
        assert_eq!(&preimage[25..28], &[0xfd, 0x2c, 0x01]);
        assert_eq!(preimage.len(), 25 + 3 + 300);
        assert_eq!(
            magic_hash(&message).to_hex(),
            "3ec158a43b80359df647352dac1d37dbf26a94e5f06e5790760290c75cd11dc0"
        );
    }

    #[test]
    fn test_magic_changes_digest() {
        let other = MessageHasher::with_magic("Other Signed Message:\n");
        assert_eq!(other.magic(), "Other Signed Message:\n");
        for msg in [&b""[..], b"hello", b"Bitcoin Signed Message:\n"] {
            assert_ne!(other.digest(msg), magic_hash(msg));
        }
    }

    #[test]
    fn test_length_prefix_prevents_ambiguity() {
        // Same concatenation, different split.
        let a = MessageHasher::with_magic("ab").digest(b"c");
        let b = MessageHasher::with_magic("a").digest(b"bc");
        assert_ne!(a, b);
    }

    #[test]
    fn test_digest_display() {
        let digest = MessageDigest::from([0xab; 32]);
        assert_eq!(digest.to_string(), "ab".repeat(32));
        assert_eq!(digest.as_bytes(), &[0xab; 32]);
    }
}
