// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! `KeylessAccount`: an OIDC-derived identity bound to an ephemeral
//! Ed25519 signing key with an explicit expiry. This SDK never produces
//! the ZK proof that authorizes the binding on-chain — it only carries
//! whatever opaque proof bytes the caller obtained from a prover service
//! alongside the signature at submission time (§4.7).

use crate::error::Result;
use aptos_crypto::{
    ed25519::Ed25519Signature,
    keyless::{EphemeralKeyPair, KeylessPublicKey},
};
use aptos_types::{
    account_address::AccountAddress,
    error::Error,
    transaction::{
        authenticator::{AccountAuthenticator, AnyPublicKey, AuthenticationKey},
        builder::TransactionSigner,
    },
};

pub struct KeylessAccount {
    address: AccountAddress,
    ephemeral_key_pair: EphemeralKeyPair,
    /// The opaque ZK proof obtained from a prover service. Not part of any
    /// BCS type in this crate — carried verbatim for whatever submission
    /// path stitches it alongside the signed transaction bytes.
    zk_proof: Vec<u8>,
}

impl KeylessAccount {
    /// `zk_proof` is consumed from an external prover; this constructor
    /// never generates one (out of scope, §1/§9).
    pub fn new(ephemeral_key_pair: EphemeralKeyPair, zk_proof: Vec<u8>) -> Result<Self> {
        let public_key = ephemeral_key_pair.public_key().clone();
        let any_key = AnyPublicKey::Keyless { public_key };
        let address = AuthenticationKey::any_key(&any_key)?.account_address();
        Ok(KeylessAccount {
            address,
            ephemeral_key_pair,
            zk_proof,
        })
    }

    pub fn address(&self) -> AccountAddress {
        self.address
    }

    pub fn public_key(&self) -> &KeylessPublicKey {
        self.ephemeral_key_pair.public_key()
    }

    pub fn expiration_date_secs(&self) -> u64 {
        self.ephemeral_key_pair.expiration_date_secs()
    }

    pub fn is_expired(&self, now_seconds: u64) -> bool {
        self.ephemeral_key_pair.is_expired(now_seconds)
    }

    pub fn zk_proof(&self) -> &[u8] {
        &self.zk_proof
    }
}

impl TransactionSigner for KeylessAccount {
    fn address(&self) -> AccountAddress {
        self.address
    }

    fn sign_message(
        &self,
        now_seconds: u64,
        message: &[u8],
    ) -> std::result::Result<AccountAuthenticator, Error> {
        let signature: Ed25519Signature = self
            .ephemeral_key_pair
            .sign_arbitrary_message(now_seconds, message)
            .map_err(Error::CryptoMaterial)?;
        Ok(AccountAuthenticator::keyless(
            self.ephemeral_key_pair.public_key().clone(),
            signature,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aptos_crypto::{ed25519::Ed25519PrivateKey, traits::Uniform};

    fn sample_account(expiration_date_secs: u64) -> KeylessAccount {
        let ephemeral_private_key = Ed25519PrivateKey::generate_for_testing();
        let public_key = KeylessPublicKey::new(
            "https://accounts.example.com".to_string(),
            "my-client-id".to_string(),
            "sub".to_string(),
            "user-123".to_string(),
            [9u8; 31],
        );
        let pair = EphemeralKeyPair::new(ephemeral_private_key, public_key, expiration_date_secs);
        KeylessAccount::new(pair, vec![1, 2, 3]).unwrap()
    }

    #[test]
    fn signing_fails_once_ephemeral_key_has_expired() {
        let account = sample_account(1_000);
        assert!(account.sign_message(999, b"hello").is_ok());
        assert!(account.sign_message(1_000, b"hello").is_err());
    }

    #[test]
    fn zk_proof_is_carried_verbatim() {
        let account = sample_account(1_000);
        assert_eq!(account.zk_proof(), &[1, 2, 3]);
    }

    #[test]
    fn address_is_derived_through_single_key_framing() {
        let account = sample_account(1_000);
        let any_key = AnyPublicKey::Keyless {
            public_key: account.public_key().clone(),
        };
        let expected = AuthenticationKey::any_key(&any_key).unwrap().account_address();
        assert_eq!(account.address(), expected);
    }
}
