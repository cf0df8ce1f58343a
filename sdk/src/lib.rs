// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! The Aptos Rust SDK facade: one namespace over the cryptographic account
//! and transaction core described in `spec.md` — BCS, addresses and type
//! tags, mnemonic/key derivation, signature schemes, the transaction
//! builder and authenticators, and the REST/faucet transport.
//!
//! Downstream code is expected to depend on this crate alone; the
//! `aptos-bcs`/`aptos-crypto`/`aptos-types`/`aptos-rest-client` crates it
//! re-exports are the library's internal layering, not a surface callers
//! should need to pick apart themselves.

pub mod account;
pub mod error;

pub use account::{KeylessAccount, LocalAccount};
pub use error::{Result, SdkError};

pub use aptos_bcs as bcs;
pub use aptos_crypto as crypto;
pub use aptos_rest_client as rest_client;
pub use aptos_types as types;

pub use aptos_rest_client::{Client, ClientBuilder, ClientConfig, FaucetClient, RestError, RetryConfig};
pub use aptos_types::{
    account_address::AccountAddress,
    chain_id::ChainId,
    transaction::{
        authenticator::{AuthenticationKey, TransactionAuthenticator},
        builder::TransactionSigner,
        RawTransaction, SignedTransaction, TransactionBuilder, TransactionPayload,
    },
};

#[cfg(test)]
mod tests {
    use super::*;
    use aptos_types::transaction::{EntryFunction, Identifier, ModuleId};

    /// The facade's own end-to-end smoke test: build a raw transaction
    /// through `TransactionBuilder`, sign it with a freshly generated
    /// `LocalAccount`, and confirm the submission bytes round-trip
    /// through BCS as a `SignedTransaction`.
    #[test]
    fn build_sign_and_bcs_round_trip_a_signed_transaction() {
        let account = LocalAccount::generate_ed25519(0);
        let payload = TransactionPayload::EntryFunction(EntryFunction::new(
            ModuleId::new(AccountAddress::ONE, "coin".to_string()),
            Identifier::new("transfer"),
            vec![],
            vec![aptos_bcs::to_bytes(&AccountAddress::ONE).unwrap()],
        ));
        let builder = TransactionBuilder::new()
            .sender(account.address())
            .sequence_number(account.increment_sequence_number())
            .payload(payload)
            .chain_id(ChainId::testnet().id());

        let signed = account.sign_transaction(&builder, 1_700_000_000).unwrap();
        let bytes = signed.bcs_to_bytes().unwrap();

        let decoded: SignedTransaction = aptos_bcs::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.raw_txn, signed.raw_txn);
        assert_eq!(decoded.raw_txn.sender, account.address());
        assert_eq!(account.sequence_number(), 1);
    }
}
