// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! `LocalAccount`: an address plus whichever signature scheme it holds
//! private key material for, plus the monotone sequence-number counter a
//! caller needs to keep bumping between submissions. Immutable except for
//! that counter — rotating the underlying key is out of scope (see
//! `spec.md` §4.6).

use crate::error::{Result, SdkError};
use aptos_crypto::{
    derivation::{bip32, slip10, DerivationPath},
    ed25519::Ed25519PrivateKey,
    mnemonic::Mnemonic,
    multi_ed25519::{MultiEd25519PublicKey, MultiEd25519Signature},
    secp256k1::{Secp256k1PrivateKey, Secp256k1PublicKey},
    traits::{PrivateKey, SigningKey, Uniform},
};
use aptos_types::{
    account_address::AccountAddress,
    error::Error,
    transaction::{
        authenticator::{AccountAuthenticator, AnyPublicKey, AuthenticationKey, Secp256k1PublicKeyBytes},
        builder::TransactionSigner,
        SignedTransaction, TransactionBuilder,
    },
};
use std::sync::atomic::{AtomicU64, Ordering};

/// Which scheme a [`LocalAccount`] actually holds signing material for.
/// A tagged union rather than a trait object: the authenticator each
/// variant produces is a fixed, scheme-specific BCS shape (see
/// `aptos_types::transaction::authenticator`), so matching here keeps
/// that mapping local instead of behind a second layer of dynamic dispatch.
enum AccountKey {
    Ed25519(Ed25519PrivateKey),
    Secp256k1(Secp256k1PrivateKey),
    /// The full committee's public key plus whichever signers' private
    /// keys this particular `LocalAccount` was built with. `signer_index`
    /// is each held key's position in `public_key.public_keys()`.
    MultiEd25519 {
        public_key: MultiEd25519PublicKey,
        signers: Vec<(u8, Ed25519PrivateKey)>,
    },
}

pub struct LocalAccount {
    address: AccountAddress,
    key: AccountKey,
    sequence_number: AtomicU64,
}

impl LocalAccount {
    /// A fresh, randomly generated Ed25519 account.
    pub fn generate_ed25519(sequence_number: u64) -> Self {
        let private_key = Ed25519PrivateKey::generate(&mut rand::rngs::OsRng);
        Self::from_ed25519_private_key(private_key, sequence_number)
    }

    /// A fresh, randomly generated Secp256k1 account.
    pub fn generate_secp256k1(sequence_number: u64) -> Self {
        let private_key = Secp256k1PrivateKey::generate(&mut rand::rngs::OsRng);
        Self::from_secp256k1_private_key(private_key, sequence_number)
    }

    pub fn from_ed25519_private_key(private_key: Ed25519PrivateKey, sequence_number: u64) -> Self {
        let public_key = private_key.public_key();
        let address = AuthenticationKey::ed25519(&public_key).account_address();
        LocalAccount {
            address,
            key: AccountKey::Ed25519(private_key),
            sequence_number: AtomicU64::new(sequence_number),
        }
    }

    pub fn from_secp256k1_private_key(
        private_key: Secp256k1PrivateKey,
        sequence_number: u64,
    ) -> Self {
        let public_key = private_key.public_key();
        let address = secp256k1_address(&public_key);
        LocalAccount {
            address,
            key: AccountKey::Secp256k1(private_key),
            sequence_number: AtomicU64::new(sequence_number),
        }
    }

    /// A k-of-n MultiEd25519 account. `signers` must name at least
    /// `public_key.threshold()` of `public_key`'s own keys by index, or
    /// this account could never produce a valid signature — rejected here
    /// with the same *illegal argument* the signing step itself would
    /// raise on too few contributors (§4.5).
    pub fn multi_ed25519(
        public_key: MultiEd25519PublicKey,
        signers: Vec<(u8, Ed25519PrivateKey)>,
        sequence_number: u64,
    ) -> Result<Self> {
        if signers.len() < usize::from(public_key.threshold()) {
            return Err(SdkError::Account(format!(
                "account holds only {} of the {} signers required by threshold",
                signers.len(),
                public_key.threshold()
            )));
        }
        let address = AuthenticationKey::multi_ed25519(&public_key).account_address();
        Ok(LocalAccount {
            address,
            key: AccountKey::MultiEd25519 { public_key, signers },
            sequence_number: AtomicU64::new(sequence_number),
        })
    }

    /// Derives an Ed25519 account via SLIP-0010 (hardened-only) from a
    /// BIP-39 mnemonic and derivation path, e.g.
    /// [`DerivationPath::default_aptos`].
    pub fn from_mnemonic_ed25519(
        mnemonic: &Mnemonic,
        passphrase: &str,
        path: &DerivationPath,
        sequence_number: u64,
    ) -> Result<Self> {
        let seed = mnemonic.to_seed(passphrase);
        let raw_key = slip10::derive_ed25519_private_key(&seed, path)?;
        let private_key = Ed25519PrivateKey::from_bytes(&raw_key)?;
        Ok(Self::from_ed25519_private_key(private_key, sequence_number))
    }

    /// Derives a Secp256k1 account via BIP-32 (hardened or non-hardened
    /// components) from a BIP-39 mnemonic and derivation path.
    pub fn from_mnemonic_secp256k1(
        mnemonic: &Mnemonic,
        passphrase: &str,
        path: &DerivationPath,
        sequence_number: u64,
    ) -> Result<Self> {
        let seed = mnemonic.to_seed(passphrase);
        let raw_key = bip32::derive_secp256k1_private_key(&seed, path)?;
        let private_key = Secp256k1PrivateKey::from_bytes(&raw_key)?;
        Ok(Self::from_secp256k1_private_key(private_key, sequence_number))
    }

    pub fn address(&self) -> AccountAddress {
        self.address
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number.load(Ordering::SeqCst)
    }

    /// Returns the sequence number to use for the next submission and
    /// advances the counter. Callers are responsible for monotone
    /// sequence numbers per sender (§5); this just saves them a manual
    /// read-then-write.
    pub fn increment_sequence_number(&self) -> u64 {
        self.sequence_number.fetch_add(1, Ordering::SeqCst)
    }

    pub fn set_sequence_number(&self, sequence_number: u64) {
        self.sequence_number.store(sequence_number, Ordering::SeqCst);
    }

    /// Convenience over [`TransactionBuilder::sign`] for the common
    /// single-sender case: no secondary signers, no fee payer.
    pub fn sign_transaction(
        &self,
        builder: &TransactionBuilder,
        now_seconds: u64,
    ) -> Result<SignedTransaction> {
        Ok(builder.sign(now_seconds, self, &[], None)?)
    }
}

impl TransactionSigner for LocalAccount {
    fn address(&self) -> AccountAddress {
        self.address
    }

    fn sign_message(&self, _now_seconds: u64, message: &[u8]) -> std::result::Result<AccountAuthenticator, Error> {
        match &self.key {
            AccountKey::Ed25519(private_key) => {
                let signature = private_key.sign_arbitrary_message(message);
                Ok(AccountAuthenticator::ed25519(private_key.public_key(), signature))
            },
            AccountKey::Secp256k1(private_key) => {
                let signature = private_key.sign_arbitrary_message(message);
                Ok(AccountAuthenticator::secp256k1_ecdsa(
                    private_key.public_key(),
                    signature,
                ))
            },
            AccountKey::MultiEd25519 { public_key, signers } => {
                let indexed = signers
                    .iter()
                    .map(|(index, private_key)| (*index, private_key.sign_arbitrary_message(message)))
                    .collect::<Vec<_>>();
                let signature = MultiEd25519Signature::from_indexed_signatures(indexed)
                    .map_err(Error::CryptoMaterial)?;
                Ok(AccountAuthenticator::multi_ed25519(public_key.clone(), signature))
            },
        }
    }
}

/// A Secp256k1 account's address is derived through the `SingleKey`
/// framing (scheme byte `0x02`), wrapping the uncompressed public key in
/// [`AnyPublicKey::Secp256k1Ecdsa`] rather than hashing it directly the
/// way a plain Ed25519 key is (§4.6).
fn secp256k1_address(public_key: &Secp256k1PublicKey) -> AccountAddress {
    let any_key = AnyPublicKey::Secp256k1Ecdsa {
        public_key: Secp256k1PublicKeyBytes(public_key.clone()),
    };
    AuthenticationKey::any_key(&any_key)
        .expect("BCS-encoding an AnyPublicKey cannot fail")
        .account_address()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aptos_crypto::traits::Uniform as _;
    use aptos_types::transaction::{EntryFunction, Identifier, ModuleId};

    fn sample_payload() -> aptos_types::transaction::TransactionPayload {
        aptos_types::transaction::TransactionPayload::EntryFunction(EntryFunction::new(
            ModuleId::new(AccountAddress::ONE, "coin".to_string()),
            Identifier::new("transfer"),
            vec![],
            vec![],
        ))
    }

    #[test]
    fn ed25519_account_address_matches_auth_key() {
        let account = LocalAccount::generate_ed25519(0);
        match &account.key {
            AccountKey::Ed25519(private_key) => {
                let expected = AuthenticationKey::ed25519(&private_key.public_key()).account_address();
                assert_eq!(account.address(), expected);
            },
            _ => unreachable!(),
        }
    }

    #[test]
    fn sequence_number_increments_return_old_value() {
        let account = LocalAccount::generate_ed25519(5);
        assert_eq!(account.increment_sequence_number(), 5);
        assert_eq!(account.sequence_number(), 6);
    }

    #[test]
    fn ed25519_account_signs_a_transaction_end_to_end() {
        let account = LocalAccount::generate_ed25519(0);
        let builder = TransactionBuilder::new()
            .sender(account.address())
            .sequence_number(0)
            .payload(sample_payload())
            .chain_id(4);
        let signed = account.sign_transaction(&builder, 1_700_000_000).unwrap();
        match signed.authenticator {
            aptos_types::transaction::authenticator::TransactionAuthenticator::Ed25519 { .. } => {},
            other => panic!("expected Ed25519 authenticator, got {other:?}"),
        }
    }

    #[test]
    fn secp256k1_account_signs_through_single_sender() {
        let account = LocalAccount::generate_secp256k1(0);
        let builder = TransactionBuilder::new()
            .sender(account.address())
            .sequence_number(0)
            .payload(sample_payload())
            .chain_id(4);
        let signed = account.sign_transaction(&builder, 1_700_000_000).unwrap();
        match signed.authenticator {
            aptos_types::transaction::authenticator::TransactionAuthenticator::SingleSender { .. } => {},
            other => panic!("expected SingleSender authenticator, got {other:?}"),
        }
    }

    #[test]
    fn multi_ed25519_account_requires_enough_held_signers() {
        let privates: Vec<_> = (0..3).map(|_| Ed25519PrivateKey::generate_for_testing()).collect();
        let publics: Vec<_> = privates.iter().map(|k| k.public_key()).collect();
        let multi_pk = MultiEd25519PublicKey::new(publics, 2).unwrap();
        let one_signer = vec![(0u8, privates[0].clone())];
        assert!(LocalAccount::multi_ed25519(multi_pk.clone(), one_signer, 0).is_err());

        let two_signers = vec![(0u8, privates[0].clone()), (1u8, privates[1].clone())];
        let account = LocalAccount::multi_ed25519(multi_pk, two_signers, 0).unwrap();

        let builder = TransactionBuilder::new()
            .sender(account.address())
            .sequence_number(0)
            .payload(sample_payload())
            .chain_id(4);
        let signed = account.sign_transaction(&builder, 1_700_000_000).unwrap();
        match signed.authenticator {
            aptos_types::transaction::authenticator::TransactionAuthenticator::MultiEd25519 { .. } => {},
            other => panic!("expected MultiEd25519 authenticator, got {other:?}"),
        }
    }

    #[test]
    fn derivation_path_matches_known_test_vector() {
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon \
                       abandon abandon abandon about";
        let mnemonic = Mnemonic::from_phrase(phrase).unwrap();
        let account = LocalAccount::from_mnemonic_ed25519(
            &mnemonic,
            "",
            &DerivationPath::default_aptos(),
            0,
        )
        .unwrap();
        assert_eq!(
            account.address().to_hex_literal(),
            "0xeb663b681209e7087d681c5d3eed12aaa8e1915e7c87794542c3f96e94b3d3bf"
        );
    }
}
