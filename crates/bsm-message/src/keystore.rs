//! Keystore collaborator.
//!
//! The signer never owns key storage. It asks a `Keystore` for the private
//! key behind an address's key identifier, uses it for one signature, and
//! drops it.

use std::collections::HashMap;

use bsm_primitives::ec::{KeyId, PrivateKey};

use crate::MessageError;

/// Source of private keys for signing.
pub trait Keystore {
    /// Whether keys may currently be handed out.
    fn is_unlocked(&self) -> bool;

    /// Look up the private key whose public key hashes to `key_id`.
    fn lookup_private_key(&self, key_id: &KeyId) -> Option<PrivateKey>;
}

impl<K: Keystore + ?Sized> Keystore for &K {
    fn is_unlocked(&self) -> bool {
        (**self).is_unlocked()
    }

    fn lookup_private_key(&self, key_id: &KeyId) -> Option<PrivateKey> {
        (**self).lookup_private_key(key_id)
    }
}

/// An in-memory keystore indexed by key identifier.
///
/// Starts unlocked. A key is indexed under the identifier of the encoding
/// it was imported with, so an uncompressed WIF only answers for its
/// uncompressed address.
#[derive(Debug, Default)]
pub struct MemoryKeystore {
    keys: HashMap<KeyId, PrivateKey>,
    locked: bool,
}

impl MemoryKeystore {
    /// Create an empty, unlocked keystore.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key, returning the identifier it is stored under.
    pub fn insert(&mut self, key: PrivateKey, compressed: bool) -> KeyId {
        let key_id = key.key_id(compressed);
        self.keys.insert(key_id, key);
        key_id
    }

    /// Import a WIF-encoded key, honoring its compression flag.
    ///
    /// Every decode failure, including an out-of-range scalar, is reported
    /// as `MessageError::Primitives`.
    pub fn import_wif(&mut self, wif: &str) -> Result<KeyId, MessageError> {
        let (key, compressed) = PrivateKey::decode_wif(wif).map_err(MessageError::Primitives)?;
        Ok(self.insert(key, compressed))
    }

    /// Forget the key stored under `key_id`.
    pub fn remove(&mut self, key_id: &KeyId) -> bool {
        self.keys.remove(key_id).is_some()
    }

    /// Refuse to hand out keys until `unlock` is called.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Allow keys to be handed out again.
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True when no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Keystore for MemoryKeystore {
    fn is_unlocked(&self) -> bool {
        !self.locked
    }

    fn lookup_private_key(&self, key_id: &KeyId) -> Option<PrivateKey> {
        if self.locked {
            return None;
        }
        self.keys.get(key_id).cloned()
    }
}
