// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! SLIP-0010 Ed25519 derivation: hardened components only,
//! since ed25519 has no well-defined group structure for non-hardened
//! child keys.

use super::DerivationPath;
use crate::{error::MnemonicError, hash::hmac_sha512};

const ED25519_SEED_KEY: &[u8] = b"ed25519 seed";

/// Intermediate SLIP-0010 node: a 32-byte private scalar and its chain code.
struct Node {
    key: [u8; 32],
    chain_code: [u8; 32],
}

fn master_node(seed: &[u8]) -> Node {
    let i = hmac_sha512(ED25519_SEED_KEY, seed);
    let mut key = [0u8; 32];
    let mut chain_code = [0u8; 32];
    key.copy_from_slice(&i[0..32]);
    chain_code.copy_from_slice(&i[32..64]);
    Node { key, chain_code }
}

fn derive_hardened_child(parent: &Node, index: u32) -> Node {
    let mut data = Vec::with_capacity(1 + 32 + 4);
    data.push(0u8);
    data.extend_from_slice(&parent.key);
    data.extend_from_slice(&(index | 0x8000_0000).to_be_bytes());
    let i = hmac_sha512(&parent.chain_code, &data);
    let mut key = [0u8; 32];
    let mut chain_code = [0u8; 32];
    key.copy_from_slice(&i[0..32]);
    chain_code.copy_from_slice(&i[32..64]);
    Node { key, chain_code }
}

/// Walks `path` from the BIP-39 `seed`, returning the raw 32-byte Ed25519
/// private key at the leaf. Every component in `path` must be hardened.
pub fn derive_ed25519_private_key(
    seed: &[u8],
    path: &DerivationPath,
) -> Result<[u8; 32], MnemonicError> {
    let mut node = master_node(seed);
    for component in path.components() {
        if !component.hardened {
            return Err(MnemonicError::NonHardenedSlip10Component);
        }
        node = derive_hardened_child(&node, component.index);
    }
    Ok(node.key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derivation::DerivationPathComponent;

    #[test]
    fn master_node_has_expected_lengths() {
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let node = master_node(&seed);
        assert_eq!(node.key.len(), 32);
        assert_eq!(node.chain_code.len(), 32);
    }

    #[test]
    fn rejects_non_hardened_component() {
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let path = DerivationPath::new(vec![DerivationPathComponent::normal(0)]);
        assert_eq!(
            derive_ed25519_private_key(&seed, &path).unwrap_err(),
            MnemonicError::NonHardenedSlip10Component
        );
    }

    #[test]
    fn same_path_is_deterministic() {
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let path = DerivationPath::default_aptos();
        let a = derive_ed25519_private_key(&seed, &path).unwrap();
        let b = derive_ed25519_private_key(&seed, &path).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn different_indices_diverge() {
        let seed = hex::decode("000102030405060708090a0b0c0d0e0f").unwrap();
        let a = derive_ed25519_private_key(
            &seed,
            &DerivationPath::new(vec![DerivationPathComponent::hardened(0)]),
        )
        .unwrap();
        let b = derive_ed25519_private_key(
            &seed,
            &DerivationPath::new(vec![DerivationPathComponent::hardened(1)]),
        )
        .unwrap();
        assert_ne!(a, b);
    }
}
