//! Address codec collaborator.

use bsm_primitives::address::{Address, AddressKind, Network};
use bsm_primitives::ec::KeyId;
use bsm_primitives::PrimitivesError;

use crate::MessageError;

/// Converts between address text and the key identifier it embeds.
pub trait AddressCodec {
    /// Decode `text` into a key identifier.
    ///
    /// # Returns
    /// `InvalidAddress` if the text is not an address of the codec's
    /// network, `NotKeyAddress` if it is a script address.
    fn decode_address(&self, text: &str) -> Result<KeyId, MessageError>;

    /// Encode a key identifier as address text.
    fn encode_address(&self, key_id: &KeyId) -> String;
}

/// Base58Check P2PKH addresses for one network.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Base58AddressCodec {
    network: Network,
}

impl Base58AddressCodec {
    /// Codec for `network` addresses.
    pub fn new(network: Network) -> Self {
        Base58AddressCodec { network }
    }

    /// The network this codec accepts.
    pub fn network(&self) -> Network {
        self.network
    }
}

impl Default for Base58AddressCodec {
    fn default() -> Self {
        Base58AddressCodec::new(Network::Mainnet)
    }
}

impl AddressCodec for Base58AddressCodec {
    fn decode_address(&self, text: &str) -> Result<KeyId, MessageError> {
        let address = Address::from_string(text).map_err(|e| match e {
            PrimitivesError::InvalidAddress(_) | PrimitivesError::UnsupportedAddress(_) => {
                MessageError::InvalidAddress(text.to_string())
            }
            other => MessageError::from(other),
        })?;

        if address.network() != self.network {
            return Err(MessageError::InvalidAddress(text.to_string()));
        }

        match address.kind() {
            AddressKind::PubKeyHash => address
                .key_id()
                .ok_or_else(|| MessageError::NotKeyAddress(text.to_string())),
            AddressKind::ScriptHash => Err(MessageError::NotKeyAddress(text.to_string())),
        }
    }

    fn encode_address(&self, key_id: &KeyId) -> String {
        Address::from_key_id(key_id, self.network).to_string()
    }
}
