/// Bitcoin address handling.
///
/// Decodes and encodes Base58Check P2PKH and P2SH addresses for mainnet
/// and testnet. Only P2PKH addresses carry a key identifier; a P2SH
/// address names a script, not a key.

use std::fmt;

use crate::base58;
use crate::ec::key_id::{KeyId, KEY_ID_LEN};
use crate::PrimitivesError;

/// Mainnet P2PKH address version byte.
const MAINNET_P2PKH: u8 = 0x00;
/// Mainnet P2SH address version byte.
const MAINNET_P2SH: u8 = 0x05;
/// Testnet P2PKH address version byte.
const TESTNET_P2PKH: u8 = 0x6f;
/// Testnet P2SH address version byte.
const TESTNET_P2SH: u8 = 0xc4;

/// Bitcoin network type for address prefix selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Network {
    /// Mainnet (P2PKH addresses start with '1').
    Mainnet,
    /// Testnet (P2PKH addresses start with 'm' or 'n').
    Testnet,
}

/// What the 20-byte hash inside an address commits to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressKind {
    /// Hash160 of a public key.
    PubKeyHash,
    /// Hash160 of a redeem script.
    ScriptHash,
}

/// A decoded Base58Check address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    network: Network,
    kind: AddressKind,
    hash: [u8; KEY_ID_LEN],
}

impl Address {
    /// Parse a Base58Check-encoded address string.
    ///
    /// # Returns
    /// `InvalidAddress` for bad characters, a failed checksum or a wrong
    /// payload length; `UnsupportedAddress` for an unknown version byte.
    pub fn from_string(addr: &str) -> Result<Self, PrimitivesError> {
        let payload = base58::check_decode(addr)
            .map_err(|e| PrimitivesError::InvalidAddress(format!("'{}': {}", addr, e)))?;

        if payload.len() != 1 + KEY_ID_LEN {
            return Err(PrimitivesError::InvalidAddress(format!(
                "'{}': payload is {} bytes",
                addr,
                payload.len()
            )));
        }

        let (network, kind) = match payload[0] {
            MAINNET_P2PKH => (Network::Mainnet, AddressKind::PubKeyHash),
            MAINNET_P2SH => (Network::Mainnet, AddressKind::ScriptHash),
            TESTNET_P2PKH => (Network::Testnet, AddressKind::PubKeyHash),
            TESTNET_P2SH => (Network::Testnet, AddressKind::ScriptHash),
            _ => return Err(PrimitivesError::UnsupportedAddress(addr.to_string())),
        };

        let mut hash = [0u8; KEY_ID_LEN];
        hash.copy_from_slice(&payload[1..]);
        Ok(Address {
            network,
            kind,
            hash,
        })
    }

    /// Build the P2PKH address for a key identifier.
    pub fn from_key_id(key_id: &KeyId, network: Network) -> Self {
        Address {
            network,
            kind: AddressKind::PubKeyHash,
            hash: *key_id.as_bytes(),
        }
    }

    /// The network this address belongs to.
    pub fn network(&self) -> Network {
        self.network
    }

    /// Whether the address commits to a key or a script.
    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    /// The key identifier, or `None` for a script-hash address.
    pub fn key_id(&self) -> Option<KeyId> {
        match self.kind {
            AddressKind::PubKeyHash => Some(KeyId::new(self.hash)),
            AddressKind::ScriptHash => None,
        }
    }

    fn version(&self) -> u8 {
        match (self.network, self.kind) {
            (Network::Mainnet, AddressKind::PubKeyHash) => MAINNET_P2PKH,
            (Network::Mainnet, AddressKind::ScriptHash) => MAINNET_P2SH,
            (Network::Testnet, AddressKind::PubKeyHash) => TESTNET_P2PKH,
            (Network::Testnet, AddressKind::ScriptHash) => TESTNET_P2SH,
        }
    }
}

impl fmt::Display for Address {
    /// Display the address as its Base58Check string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut payload = Vec::with_capacity(1 + KEY_ID_LEN);
        payload.push(self.version());
        payload.extend_from_slice(&self.hash);
        write!(f, "{}", base58::check_encode(&payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY_ONE_ID: &str = "751e76e8199196d454941c45d1b3a323f1433bd6";

    #[test]
    fn test_mainnet_p2pkh() {
        let addr = Address::from_string("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH").unwrap();
        assert_eq!(addr.network(), Network::Mainnet);
        assert_eq!(addr.kind(), AddressKind::PubKeyHash);
        assert_eq!(addr.key_id().unwrap().to_hex(), KEY_ONE_ID);
        assert_eq!(addr.to_string(), "1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMH");
    }

    #[test]
    fn test_testnet_p2pkh() {
        let id = KeyId::from_hex(KEY_ONE_ID).unwrap();
        let addr = Address::from_key_id(&id, Network::Testnet);
        assert_eq!(addr.to_string(), "mrCDrCybB6J1vRfbwM5hemdJz73FwDBC8r");
        let parsed = Address::from_string("mrCDrCybB6J1vRfbwM5hemdJz73FwDBC8r").unwrap();
        assert_eq!(parsed, addr);
    }

    #[test]
    fn test_script_hash_has_no_key_id() {
        let mainnet = Address::from_string("31h1vYVSYuKP6AhS86fbRdMw9XHieotbST").unwrap();
        assert_eq!(mainnet.kind(), AddressKind::ScriptHash);
        assert_eq!(mainnet.network(), Network::Mainnet);
        assert!(mainnet.key_id().is_none());

        let testnet = Address::from_string("2MsFDzHRUAMpjHxKyoEHU3aMCMsVtMqs1PV").unwrap();
        assert_eq!(testnet.kind(), AddressKind::ScriptHash);
        assert_eq!(testnet.network(), Network::Testnet);
    }

    #[test]
    fn test_invalid_addresses() {
        // checksum broken by changing the last character
        assert!(matches!(
            Address::from_string("1BgGZ9tcN4rm9KBzDn7KprQz87SZ26SAMJ"),
            Err(PrimitivesError::InvalidAddress(_))
        ));
        assert!(matches!(
            Address::from_string("not an address"),
            Err(PrimitivesError::InvalidAddress(_))
        ));
        assert!(matches!(
            Address::from_string(""),
            Err(PrimitivesError::InvalidAddress(_))
        ));
        // valid Base58Check, but a version byte no network here uses
        assert!(matches!(
            Address::from_string("LVuDpNCSSj6pQ7t9Pv6d6sUkLKoqDEVUnJ"),
            Err(PrimitivesError::UnsupportedAddress(_))
        ));
    }
}
