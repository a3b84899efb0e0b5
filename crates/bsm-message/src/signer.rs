//! Sign-message and verify-message flows over plain strings.
//!
//! These tie the pieces together the way a wallet front end uses them:
//! address text in, Base64 signature text out, and back again. The
//! keystore and address codec are injected; nothing here holds global
//! wallet state.

use crate::address::{AddressCodec, Base58AddressCodec};
use crate::config::Config;
use crate::keystore::Keystore;
use crate::signed::{self, Verification};
use crate::MessageError;

/// Verifies message signatures against addresses. Needs no keys.
#[derive(Clone, Debug)]
pub struct MessageVerifier<C = Base58AddressCodec> {
    config: Config,
    codec: C,
}

impl MessageVerifier<Base58AddressCodec> {
    /// A verifier using Base58 addresses of the configured network.
    pub fn from_config(config: Config) -> Self {
        MessageVerifier {
            codec: Base58AddressCodec::new(config.network),
            config,
        }
    }
}

impl<C: AddressCodec> MessageVerifier<C> {
    /// A verifier with an explicit address codec.
    pub fn new(config: Config, codec: C) -> Self {
        MessageVerifier { config, codec }
    }

    /// Active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Address codec in use.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Check `signature` (Base64 text) over `message` against `address`.
    ///
    /// Surrounding whitespace in the address and signature text is ignored.
    ///
    /// # Returns
    /// `Err` only when the address itself is unusable. Every signature
    /// problem is reported through the returned `Verification`.
    pub fn verify_message(
        &self,
        address: &str,
        signature: &str,
        message: &str,
    ) -> Result<Verification, MessageError> {
        let key_id = self.codec.decode_address(address.trim())?;
        let digest = self.config.hasher.digest(message.as_bytes());

        let signature = match signed::decode_signature(signature.trim()) {
            Ok(signature) => signature,
            Err(e) => {
                tracing::warn!(address, digest = %digest, error = %e, "malformed message signature");
                return Ok(Verification::Malformed(e));
            }
        };

        Ok(signed::check_signature(
            &digest,
            &signature,
            &key_id,
            self.config.low_s_policy,
        ))
    }

    /// Address of whoever produced `signature` over `message`.
    pub fn recover_address(&self, signature: &str, message: &str) -> Result<String, MessageError> {
        let signature = signed::decode_signature(signature.trim())?;
        self.config.low_s_policy.check(&signature)?;
        let digest = self.config.hasher.digest(message.as_bytes());
        let key_id = signature.recover_key_id(digest.as_bytes())?;
        Ok(self.codec.encode_address(&key_id))
    }
}

/// Signs messages with keys drawn from a `Keystore`.
#[derive(Clone, Debug)]
pub struct MessageSigner<K, C = Base58AddressCodec> {
    verifier: MessageVerifier<C>,
    keystore: K,
}

impl<K: Keystore> MessageSigner<K, Base58AddressCodec> {
    /// A signer using Base58 addresses of the configured network.
    pub fn from_config(config: Config, keystore: K) -> Self {
        MessageSigner {
            verifier: MessageVerifier::from_config(config),
            keystore,
        }
    }
}

impl<K: Keystore, C: AddressCodec> MessageSigner<K, C> {
    /// A signer with an explicit address codec.
    pub fn new(config: Config, codec: C, keystore: K) -> Self {
        MessageSigner {
            verifier: MessageVerifier::new(config, codec),
            keystore,
        }
    }

    /// The keystore keys are drawn from.
    pub fn keystore(&self) -> &K {
        &self.keystore
    }

    /// The verifier sharing this signer's configuration and codec.
    pub fn verifier(&self) -> &MessageVerifier<C> {
        &self.verifier
    }

    /// Sign `message` with the key behind `address`.
    ///
    /// # Returns
    /// The Base64 signature text, or:
    /// - `InvalidAddress` / `NotKeyAddress` if the address is unusable;
    /// - `KeyUnavailable` if the keystore is locked or lacks the key;
    /// - `Signing` if the key cannot produce a signature for the address.
    pub fn sign_message(&self, address: &str, message: &str) -> Result<String, MessageError> {
        let address = address.trim();
        let key_id = self.verifier.codec.decode_address(address)?;

        if !self.keystore.is_unlocked() {
            return Err(MessageError::KeyUnavailable {
                address: address.to_string(),
                reason: "wallet is locked",
            });
        }
        let key = self
            .keystore
            .lookup_private_key(&key_id)
            .ok_or_else(|| MessageError::KeyUnavailable {
                address: address.to_string(),
                reason: "no private key for this address",
            })?;

        let compressed = if key.key_id(true) == key_id {
            true
        } else if key.key_id(false) == key_id {
            false
        } else {
            return Err(MessageError::Signing(
                "keystore returned a key that does not match the address".to_string(),
            ));
        };

        let digest = self.verifier.config.hasher.digest(message.as_bytes());
        let signature = signed::sign(&digest, &key, compressed)?;
        drop(key);

        tracing::debug!(address, digest = %digest, "message signed");
        Ok(signed::encode_signature(&signature))
    }

    /// See [`MessageVerifier::verify_message`].
    pub fn verify_message(
        &self,
        address: &str,
        signature: &str,
        message: &str,
    ) -> Result<Verification, MessageError> {
        self.verifier.verify_message(address, signature, message)
    }

    /// See [`MessageVerifier::recover_address`].
    pub fn recover_address(&self, signature: &str, message: &str) -> Result<String, MessageError> {
        self.verifier.recover_address(signature, message)
    }
}
