// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! BIP-32 secp256k1 derivation: both hardened and
//! non-hardened components, via HMAC-SHA512 and scalar tweak-add on the
//! secp256k1 group order.

use super::DerivationPath;
use crate::{error::MnemonicError, hash::hmac_sha512};
use libsecp256k1::{PublicKey, SecretKey};

const SECP256K1_SEED_KEY: &[u8] = b"Bitcoin seed";
const HARDENED_OFFSET: u32 = 0x8000_0000;

struct Node {
    key: SecretKey,
    chain_code: [u8; 32],
}

fn master_node(seed: &[u8]) -> Result<Node, MnemonicError> {
    let i = hmac_sha512(SECP256K1_SEED_KEY, seed);
    let key = SecretKey::parse_slice(&i[0..32]).map_err(|_| MnemonicError::DerivationFailed)?;
    let mut chain_code = [0u8; 32];
    chain_code.copy_from_slice(&i[32..64]);
    Ok(Node { key, chain_code })
}

/// One BIP-32 child-key-derivation step. Hardened steps hash the parent
/// private key; non-hardened steps hash the parent's compressed public key.
/// Returns `None` (rather than failing the whole walk) when the resulting
/// scalar is invalid, matching BIP-32's "skip to the next index" guidance —
/// callers that need strict single-index derivation should treat `None` as
/// `MnemonicError::DerivationFailed`.
fn derive_child(parent: &Node, index: u32, hardened: bool) -> Option<Node> {
    let serialized_index = if hardened {
        index | HARDENED_OFFSET
    } else {
        index & !HARDENED_OFFSET
    };

    let mut data = Vec::with_capacity(1 + 32 + 4);
    if hardened {
        data.push(0u8);
        data.extend_from_slice(&parent.key.serialize());
    } else {
        let public_key = PublicKey::from_secret_key(&parent.key);
        data.extend_from_slice(&public_key.serialize_compressed());
    }
    data.extend_from_slice(&serialized_index.to_be_bytes());

    let i = hmac_sha512(&parent.chain_code, &data);
    let tweak = SecretKey::parse_slice(&i[0..32]).ok()?;
    let mut child_key = parent.key.clone();
    child_key.tweak_add_assign(&tweak).ok()?;

    let mut chain_code = [0u8; 32];
    chain_code.copy_from_slice(&i[32..64]);
    Some(Node {
        key: child_key,
        chain_code,
    })
}

/// Walks `path` from the BIP-39 `seed`, returning the raw 32-byte secp256k1
/// private key scalar at the leaf.
pub fn derive_secp256k1_private_key(
    seed: &[u8],
    path: &DerivationPath,
) -> Result<[u8; 32], MnemonicError> {
    let mut node = master_node(seed)?;
    for component in path.components() {
        node = derive_child(&node, component.index, component.hardened)
            .ok_or(MnemonicError::DerivationFailed)?;
    }
    Ok(node.key.serialize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derivation::DerivationPathComponent;

    #[test]
    fn same_path_is_deterministic() {
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let path = DerivationPath::new(vec![
            DerivationPathComponent::hardened(44),
            DerivationPathComponent::hardened(0),
        ]);
        let a = derive_secp256k1_private_key(&seed, &path).unwrap();
        let b = derive_secp256k1_private_key(&seed, &path).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn hardened_and_non_hardened_diverge() {
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let hardened = derive_secp256k1_private_key(
            &seed,
            &DerivationPath::new(vec![DerivationPathComponent::hardened(0)]),
        )
        .unwrap();
        let normal = derive_secp256k1_private_key(
            &seed,
            &DerivationPath::new(vec![DerivationPathComponent::normal(0)]),
        )
        .unwrap();
        assert_ne!(hardened, normal);
    }

    #[test]
    fn non_hardened_child_is_reachable_from_parent_public_key() {
        // The defining BIP-32 property: deriving a non-hardened child only
        // needs the parent's chain code and public key, not its private key.
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let parent = master_node(&seed).unwrap();
        let child = derive_child(&parent, 0, false).unwrap();

        let parent_public = PublicKey::from_secret_key(&parent.key);
        let mut data = Vec::new();
        data.extend_from_slice(&parent_public.serialize_compressed());
        data.extend_from_slice(&0u32.to_be_bytes());
        let i = hmac_sha512(&parent.chain_code, &data);
        let tweak = SecretKey::parse_slice(&i[0..32]).unwrap();
        let mut expected_public = parent_public;
        expected_public.tweak_add_assign(&tweak).unwrap();

        let child_public = PublicKey::from_secret_key(&child.key);
        assert_eq!(child_public.serialize(), expected_public.serialize());
    }

    #[test]
    fn deep_path_does_not_panic() {
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let path = DerivationPath::default_aptos();
        let key = derive_secp256k1_private_key(&seed, &path).unwrap();
        assert_eq!(key.len(), 32);
    }
}
