//! Signer configuration.

use bsm_primitives::address::Network;

use crate::hashing::MessageHasher;
use crate::signed::LowSPolicy;

/// Protocol parameters for a `MessageSigner`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Network whose addresses are accepted and produced.
    pub network: Network,
    /// Digest construction, including the magic domain string.
    pub hasher: MessageHasher,
    /// Whether verification accepts high-S signatures.
    pub low_s_policy: LowSPolicy,
}

impl Config {
    /// Mainnet addresses, v1 magic, permissive low-S handling.
    pub fn mainnet() -> Self {
        Config {
            network: Network::Mainnet,
            hasher: MessageHasher::BITCOIN,
            low_s_policy: LowSPolicy::Permissive,
        }
    }

    /// Same as `mainnet` but with testnet addresses.
    pub fn testnet() -> Self {
        Config {
            network: Network::Testnet,
            ..Self::mainnet()
        }
    }

    /// Replace the digest construction.
    pub fn with_hasher(mut self, hasher: MessageHasher) -> Self {
        self.hasher = hasher;
        self
    }

    /// Replace the low-S policy used when verifying.
    pub fn with_low_s_policy(mut self, policy: LowSPolicy) -> Self {
        self.low_s_policy = policy;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::mainnet()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config, Config::mainnet());
        assert_eq!(config.hasher, MessageHasher::BITCOIN);
        assert_eq!(config.low_s_policy, LowSPolicy::Permissive);
    }

    #[test]
    fn test_builders() {
        let hasher = MessageHasher::with_magic("Test Signed Message:\n");
        let config = Config::testnet()
            .with_hasher(hasher)
            .with_low_s_policy(LowSPolicy::Strict);
        assert_eq!(config.network, Network::Testnet);
        assert_eq!(config.hasher, hasher);
        assert_eq!(config.low_s_policy, LowSPolicy::Strict);
    }
}
