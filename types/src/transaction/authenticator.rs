// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Authentication keys and transaction authenticators. An
//! [`AuthenticationKey`] is `SHA3-256(public_key_material || scheme_byte)`;
//! a [`TransactionAuthenticator`] is the tagged union of signature proofs
//! a submitted transaction carries.

use crate::{account_address::AccountAddress, error::Error};
use aptos_crypto::{
    ed25519::{Ed25519PublicKey, Ed25519Signature},
    multi_ed25519::{MultiEd25519PublicKey, MultiEd25519Signature},
    secp256k1::{Secp256k1PublicKey, Secp256k1Signature},
    keyless::KeylessPublicKey,
    traits::ValidCryptoMaterial,
};
use serde::{Deserialize, Serialize};

/// Scheme tag bytes, the last byte hashed into every authentication key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Scheme {
    Ed25519 = 0,
    MultiEd25519 = 1,
    SingleKey = 2,
    MultiKey = 3,
}

/// `AnyPublicKey`/`AnySignature`'s inner scheme discriminant — which
/// concrete key the `SingleKey` framing wraps.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnyPublicKey {
    Ed25519 { public_key: Ed25519PublicKeyBytes },
    Secp256k1Ecdsa { public_key: Secp256k1PublicKeyBytes },
    Keyless { public_key: KeylessPublicKey },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnySignature {
    Ed25519 { signature: Ed25519SignatureBytes },
    Secp256k1Ecdsa { signature: Secp256k1SignatureBytes },
    Keyless { signature: Ed25519SignatureBytes },
}

/// Thin BCS-friendly wrappers: `aptos-crypto`'s own key/signature types
/// already round-trip through BCS via their `Serialize`/`Deserialize`
/// impls, these newtypes exist only so `AnyPublicKey`/`AnySignature` stay
/// in this crate without a circular dependency back onto the enum.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ed25519PublicKeyBytes(pub Ed25519PublicKey);
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secp256k1PublicKeyBytes(pub Secp256k1PublicKey);
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ed25519SignatureBytes(pub Ed25519Signature);
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secp256k1SignatureBytes(pub Secp256k1Signature);

pub const LENGTH: usize = 32;

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticationKey([u8; LENGTH]);

impl AuthenticationKey {
    pub fn new(bytes: [u8; LENGTH]) -> Self {
        AuthenticationKey(bytes)
    }

    /// `SHA3-256(public_key_material || scheme_byte)`.
    pub fn from_preimage(public_key_material: &[u8], scheme: Scheme) -> Self {
        let mut buf = Vec::with_capacity(public_key_material.len() + 1);
        buf.extend_from_slice(public_key_material);
        buf.push(scheme as u8);
        AuthenticationKey(aptos_crypto::hash::sha3_256(&buf))
    }

    pub fn ed25519(public_key: &Ed25519PublicKey) -> Self {
        AuthenticationKey::from_preimage(&public_key.to_bytes(), Scheme::Ed25519)
    }

    pub fn multi_ed25519(public_key: &MultiEd25519PublicKey) -> Self {
        AuthenticationKey::from_preimage(&public_key.to_bytes(), Scheme::MultiEd25519)
    }

    /// `SingleKey` framing: the preimage is the BCS encoding of the wrapped
    /// `AnyPublicKey`, scheme byte `0x02`.
    pub fn any_key(public_key: &AnyPublicKey) -> Result<Self, Error> {
        let encoded = aptos_bcs::to_bytes(public_key)?;
        Ok(AuthenticationKey::from_preimage(&encoded, Scheme::SingleKey))
    }

    pub fn account_address(&self) -> AccountAddress {
        AccountAddress::new(self.0)
    }

    pub fn bytes(&self) -> [u8; LENGTH] {
        self.0
    }
}

impl std::fmt::Debug for AuthenticationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthenticationKey({})", hex::encode(self.0))
    }
}

/// The proof(s) attached to a [`super::SignedTransaction`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum TransactionAuthenticator {
    Ed25519 {
        public_key: Ed25519PublicKeyBytes,
        signature: Ed25519SignatureBytes,
    },
    MultiEd25519 {
        public_key: MultiEd25519PublicKeyBytes,
        signature: MultiEd25519SignatureBytes,
    },
    MultiAgent {
        sender: AccountAuthenticator,
        secondary_signer_addresses: Vec<AccountAddress>,
        secondary_signers: Vec<AccountAuthenticator>,
    },
    FeePayer {
        sender: AccountAuthenticator,
        secondary_signer_addresses: Vec<AccountAddress>,
        secondary_signers: Vec<AccountAuthenticator>,
        fee_payer_address: AccountAddress,
        fee_payer_signer: AccountAuthenticator,
    },
    SingleSender {
        sender: AccountAuthenticator,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiEd25519PublicKeyBytes(pub MultiEd25519PublicKey);
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiEd25519SignatureBytes(pub MultiEd25519Signature);

/// One signer's individual proof, used inside multi-agent/fee-payer
/// authenticators and as the sole payload of `SingleSender`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum AccountAuthenticator {
    Ed25519 {
        public_key: Ed25519PublicKeyBytes,
        signature: Ed25519SignatureBytes,
    },
    MultiEd25519 {
        public_key: MultiEd25519PublicKeyBytes,
        signature: MultiEd25519SignatureBytes,
    },
    SingleKey {
        public_key: AnyPublicKey,
        signature: AnySignature,
    },
}

impl AccountAuthenticator {
    pub fn ed25519(public_key: Ed25519PublicKey, signature: Ed25519Signature) -> Self {
        AccountAuthenticator::Ed25519 {
            public_key: Ed25519PublicKeyBytes(public_key),
            signature: Ed25519SignatureBytes(signature),
        }
    }

    pub fn multi_ed25519(
        public_key: MultiEd25519PublicKey,
        signature: MultiEd25519Signature,
    ) -> Self {
        AccountAuthenticator::MultiEd25519 {
            public_key: MultiEd25519PublicKeyBytes(public_key),
            signature: MultiEd25519SignatureBytes(signature),
        }
    }

    pub fn secp256k1_ecdsa(public_key: Secp256k1PublicKey, signature: Secp256k1Signature) -> Self {
        AccountAuthenticator::SingleKey {
            public_key: AnyPublicKey::Secp256k1Ecdsa {
                public_key: Secp256k1PublicKeyBytes(public_key),
            },
            signature: AnySignature::Secp256k1Ecdsa {
                signature: Secp256k1SignatureBytes(signature),
            },
        }
    }

    pub fn keyless(public_key: KeylessPublicKey, signature: Ed25519Signature) -> Self {
        AccountAuthenticator::SingleKey {
            public_key: AnyPublicKey::Keyless { public_key },
            signature: AnySignature::Keyless {
                signature: Ed25519SignatureBytes(signature),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aptos_crypto::{ed25519::Ed25519PrivateKey, traits::Uniform};

    #[test]
    fn known_test_vector_default_derivation_path_auth_key_and_address() {
        let private_key = Ed25519PrivateKey::from_bytes(
            &hex::decode("cc92c0eaf80206d817f150e21917f797e49cf644a33ac514de3c316baa2f1bf5")
                .unwrap(),
        )
        .unwrap();
        let public_key = private_key.public_key();
        let auth_key = AuthenticationKey::ed25519(&public_key);
        assert_eq!(
            auth_key.account_address().to_hex_literal(),
            "0xeb663b681209e7087d681c5d3eed12aaa8e1915e7c87794542c3f96e94b3d3bf"
        );
    }

    #[test]
    fn fresh_keypair_auth_key_matches_manual_hash() {
        let private_key = Ed25519PrivateKey::generate_for_testing();
        let public_key = private_key.public_key();
        let auth_key = AuthenticationKey::ed25519(&public_key);

        let mut preimage = public_key.to_bytes().to_vec();
        preimage.push(0x00);
        let expected = aptos_crypto::hash::sha3_256(&preimage);
        assert_eq!(auth_key.bytes(), expected);
        assert_eq!(auth_key.account_address().into_bytes(), expected);
    }

    #[test]
    fn bcs_round_trips_transaction_authenticator() {
        let private_key = Ed25519PrivateKey::generate_for_testing();
        let public_key = private_key.public_key();
        let signature = private_key.sign_arbitrary_message(b"msg");
        let auth = TransactionAuthenticator::Ed25519 {
            public_key: Ed25519PublicKeyBytes(public_key),
            signature: Ed25519SignatureBytes(signature),
        };
        let encoded = aptos_bcs::to_bytes(&auth).unwrap();
        // Variant tag 0 for Ed25519.8's authenticator table.
        assert_eq!(encoded[0], 0);
        let _decoded: TransactionAuthenticator = aptos_bcs::from_bytes(&encoded).unwrap();
    }
}
