use proptest::prelude::*;

use bsm_primitives::address::{Address, Network};
use bsm_primitives::ec::{CompactSignature, PrivateKey, RecoveredKey};
use bsm_primitives::hash::sha256d;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn compact_sign_recover_roundtrip(
        seed in prop::array::uniform32(any::<u8>()),
        msg in prop::collection::vec(any::<u8>(), 0..256),
        compressed in any::<bool>(),
    ) {
        // Not all 32-byte arrays are valid private keys (must be < curve order, nonzero).
        if let Ok(key) = PrivateKey::from_bytes(&seed) {
            let digest = sha256d(&msg);
            let sig = CompactSignature::sign(&digest, &key, compressed).unwrap();
            prop_assert!(sig.is_low_s());
            prop_assert_eq!(sig.is_compressed(), compressed);

            let parsed = CompactSignature::from_bytes(&sig.to_bytes()).unwrap();
            prop_assert_eq!(
                parsed.recover_public_key(&digest).unwrap(),
                RecoveredKey::new(key.pub_key(), compressed)
            );
            prop_assert_eq!(parsed.recover_key_id(&digest).unwrap(), key.key_id(compressed));
        }
    }

    #[test]
    fn compact_sign_is_deterministic(
        seed in prop::array::uniform32(any::<u8>()),
        digest in prop::array::uniform32(any::<u8>()),
    ) {
        if let Ok(key) = PrivateKey::from_bytes(&seed) {
            let a = CompactSignature::sign(&digest, &key, true).unwrap();
            let b = CompactSignature::sign(&digest, &key, true).unwrap();
            prop_assert_eq!(a.to_bytes(), b.to_bytes());
        }
    }

    #[test]
    fn corrupted_signature_never_recovers_signer(
        digest in prop::array::uniform32(any::<u8>()),
        bit in 0usize..520,
    ) {
        let key = PrivateKey::from_hex(
            "eaf02ca348c524e6392655ba4d29603cd1a7347d9d65cfe93ce1ebffdca22694",
        ).unwrap();
        let mut blob = CompactSignature::sign(&digest, &key, true).unwrap().to_bytes();
        blob[bit / 8] ^= 1 << (bit % 8);
        let signer = RecoveredKey::new(key.pub_key(), true);

        if let Ok(sig) = CompactSignature::from_bytes(&blob) {
            if let Ok(recovered) = sig.recover_public_key(&digest) {
                prop_assert_ne!(recovered, signer);
            }
        }
    }

    #[test]
    fn address_string_roundtrip(seed in prop::array::uniform32(any::<u8>())) {
        if let Ok(key) = PrivateKey::from_bytes(&seed) {
            for network in [Network::Mainnet, Network::Testnet] {
                let addr = Address::from_key_id(&key.key_id(true), network);
                let parsed = Address::from_string(&addr.to_string()).unwrap();
                prop_assert_eq!(parsed.key_id(), Some(key.key_id(true)));
                prop_assert_eq!(parsed.network(), network);
            }
        }
    }
}
