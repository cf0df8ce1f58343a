// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! The transaction builder: an immutable record plus `with*` constructors,
//! `build()` rejecting missing required fields with a precise error, and
//! `sign()` driving the right single-sender/multi-agent/fee-payer
//! authenticator path depending on which optional fields were set.

use super::{
    authenticator::AccountAuthenticator, RawTransaction, RawTransactionWithData,
    SignedTransaction, TransactionAuthenticator, TransactionPayload,
};
use crate::{account_address::AccountAddress, error::Error};

const DEFAULT_MAX_GAS_AMOUNT: u64 = 200_000;
const DEFAULT_GAS_UNIT_PRICE: u64 = 100;
const DEFAULT_EXPIRATION_SECS_FROM_NOW: u64 = 600;

/// A capability that can prove ownership of an address by signing
/// arbitrary bytes and reporting the resulting [`AccountAuthenticator`].
/// `aptos-sdk::LocalAccount`/`KeylessAccount` are the concrete
/// implementations; the builder is generic over this trait instead of a
/// class hierarchy so BCS framing stays local to each signer's own
/// authenticator constructor.
pub trait TransactionSigner {
    fn address(&self) -> AccountAddress;

    /// `now_seconds` is threaded through from the same clock reading
    /// `build()` used to default `expiration_timestamp_secs`, so a
    /// keyless signer can check its ephemeral key's expiry against the
    /// identical instant the rest of the transaction was built against.
    fn sign_message(&self, now_seconds: u64, message: &[u8]) -> Result<AccountAuthenticator, Error>;
}

/// Required fields are `Option`s until `build()`; optional fields carry
/// sensible defaults.
#[derive(Clone, Debug, Default)]
pub struct TransactionBuilder {
    sender: Option<AccountAddress>,
    sequence_number: Option<u64>,
    payload: Option<TransactionPayload>,
    max_gas_amount: Option<u64>,
    gas_unit_price: Option<u64>,
    expiration_timestamp_secs: Option<u64>,
    chain_id: Option<u8>,
    secondary_signer_addresses: Vec<AccountAddress>,
    fee_payer_address: Option<AccountAddress>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        TransactionBuilder::default()
    }

    pub fn sender(mut self, sender: AccountAddress) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn sequence_number(mut self, sequence_number: u64) -> Self {
        self.sequence_number = Some(sequence_number);
        self
    }

    pub fn payload(mut self, payload: TransactionPayload) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn max_gas_amount(mut self, max_gas_amount: u64) -> Self {
        self.max_gas_amount = Some(max_gas_amount);
        self
    }

    pub fn gas_unit_price(mut self, gas_unit_price: u64) -> Self {
        self.gas_unit_price = Some(gas_unit_price);
        self
    }

    pub fn expiration_timestamp_secs(mut self, expiration_timestamp_secs: u64) -> Self {
        self.expiration_timestamp_secs = Some(expiration_timestamp_secs);
        self
    }

    pub fn chain_id(mut self, chain_id: u8) -> Self {
        self.chain_id = Some(chain_id);
        self
    }

    pub fn secondary_signers(mut self, addresses: Vec<AccountAddress>) -> Self {
        self.secondary_signer_addresses = addresses;
        self
    }

    pub fn fee_payer(mut self, address: AccountAddress) -> Self {
        self.fee_payer_address = Some(address);
        self
    }

    /// Assembles the [`RawTransaction`], filling in the documented
    /// defaults for any optional field left unset and failing with
    /// *transaction build error* enumerating every unset required field.
    pub fn build(&self, now_seconds: u64) -> Result<RawTransaction, Error> {
        let mut missing = Vec::new();
        if self.sender.is_none() {
            missing.push("sender");
        }
        if self.sequence_number.is_none() {
            missing.push("sequence_number");
        }
        if self.payload.is_none() {
            missing.push("payload");
        }
        if self.chain_id.is_none() {
            missing.push("chain_id");
        }
        if !missing.is_empty() {
            return Err(Error::TransactionBuild(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )));
        }

        Ok(RawTransaction {
            sender: self.sender.unwrap(),
            sequence_number: self.sequence_number.unwrap(),
            payload: self.payload.clone().unwrap(),
            max_gas_amount: self.max_gas_amount.unwrap_or(DEFAULT_MAX_GAS_AMOUNT),
            gas_unit_price: self.gas_unit_price.unwrap_or(DEFAULT_GAS_UNIT_PRICE),
            expiration_timestamp_secs: self
                .expiration_timestamp_secs
                .unwrap_or(now_seconds + DEFAULT_EXPIRATION_SECS_FROM_NOW),
            chain_id: self.chain_id.unwrap(),
        })
    }

    /// Builds and signs with `primary`, routing through the multi-agent
    /// or fee-payer signing domain whenever secondary signers or a fee
    /// payer were configured, and through plain single-sender signing
    /// otherwise.
    pub fn sign(
        &self,
        now_seconds: u64,
        primary: &dyn TransactionSigner,
        secondary_signers: &[&dyn TransactionSigner],
        fee_payer_signer: Option<&dyn TransactionSigner>,
    ) -> Result<SignedTransaction, Error> {
        let raw_txn = self.build(now_seconds)?;

        if self.secondary_signer_addresses.is_empty() && self.fee_payer_address.is_none() {
            let message = raw_txn.signing_message()?;
            let sender_auth = primary.sign_message(now_seconds, &message)?;
            let authenticator = single_sender_authenticator(sender_auth);
            return Ok(SignedTransaction::new(raw_txn, authenticator));
        }

        if secondary_signers.len() != self.secondary_signer_addresses.len() {
            return Err(Error::TransactionBuild(
                "secondary signer count does not match configured secondary addresses"
                    .to_string(),
            ));
        }

        match self.fee_payer_address {
            None => {
                let wrapped = RawTransactionWithData::MultiAgent {
                    raw_txn: raw_txn.clone(),
                    secondary_signer_addresses: self.secondary_signer_addresses.clone(),
                };
                let message = wrapped.signing_message()?;
                let sender = primary.sign_message(now_seconds, &message)?;
                let secondary_auths = secondary_signers
                    .iter()
                    .map(|signer| signer.sign_message(now_seconds, &message))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(SignedTransaction::new(
                    raw_txn,
                    TransactionAuthenticator::MultiAgent {
                        sender,
                        secondary_signer_addresses: self.secondary_signer_addresses.clone(),
                        secondary_signers: secondary_auths,
                    },
                ))
            },
            Some(fee_payer_address) => {
                let fee_payer_signer = fee_payer_signer.ok_or_else(|| {
                    Error::TransactionBuild(
                        "fee payer address was configured but no fee payer signer was provided"
                            .to_string(),
                    )
                })?;
                let wrapped = RawTransactionWithData::FeePayer {
                    raw_txn: raw_txn.clone(),
                    secondary_signer_addresses: self.secondary_signer_addresses.clone(),
                    fee_payer_address,
                };
                let message = wrapped.signing_message()?;
                let sender = primary.sign_message(now_seconds, &message)?;
                let secondary_auths = secondary_signers
                    .iter()
                    .map(|signer| signer.sign_message(now_seconds, &message))
                    .collect::<Result<Vec<_>, _>>()?;
                let fee_payer_auth = fee_payer_signer.sign_message(now_seconds, &message)?;
                Ok(SignedTransaction::new(
                    raw_txn,
                    TransactionAuthenticator::FeePayer {
                        sender,
                        secondary_signer_addresses: self.secondary_signer_addresses.clone(),
                        secondary_signers: secondary_auths,
                        fee_payer_address,
                        fee_payer_signer: fee_payer_auth,
                    },
                ))
            },
        }
    }
}

/// `Ed25519`/`MultiEd25519` senders get their dedicated top-level
/// authenticator variant; every other scheme (Secp256k1, Keyless) wraps
/// through `SingleSender`.
fn single_sender_authenticator(sender_auth: AccountAuthenticator) -> TransactionAuthenticator {
    match sender_auth {
        AccountAuthenticator::Ed25519 {
            public_key,
            signature,
        } => TransactionAuthenticator::Ed25519 {
            public_key,
            signature,
        },
        AccountAuthenticator::MultiEd25519 {
            public_key,
            signature,
        } => TransactionAuthenticator::MultiEd25519 {
            public_key,
            signature,
        },
        single_key @ AccountAuthenticator::SingleKey { .. } => {
            TransactionAuthenticator::SingleSender { sender: single_key }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::{EntryFunction, Identifier, ModuleId};
    use aptos_crypto::{ed25519::Ed25519PrivateKey, traits::Uniform, SigningKey};

    struct Ed25519Signer(Ed25519PrivateKey);

    impl TransactionSigner for Ed25519Signer {
        fn address(&self) -> AccountAddress {
            let auth_key =
                crate::transaction::authenticator::AuthenticationKey::ed25519(&self.0.public_key());
            auth_key.account_address()
        }

        fn sign_message(
            &self,
            _now_seconds: u64,
            message: &[u8],
        ) -> Result<AccountAuthenticator, Error> {
            let signature = self.0.sign_arbitrary_message(message);
            Ok(AccountAuthenticator::ed25519(self.0.public_key(), signature))
        }
    }

    fn sample_payload() -> TransactionPayload {
        TransactionPayload::EntryFunction(EntryFunction::new(
            ModuleId::new(AccountAddress::ONE, "coin".to_string()),
            Identifier::new("transfer"),
            vec![],
            vec![],
        ))
    }

    #[test]
    fn build_fails_with_missing_fields_enumerated() {
        let builder = TransactionBuilder::new().payload(sample_payload());
        let err = builder.build(0).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("sender"));
        assert!(message.contains("sequence_number"));
        assert!(message.contains("chain_id"));
    }

    #[test]
    fn build_fills_in_documented_defaults() {
        let signer = Ed25519Signer(Ed25519PrivateKey::generate_for_testing());
        let builder = TransactionBuilder::new()
            .sender(signer.address())
            .sequence_number(0)
            .payload(sample_payload())
            .chain_id(2);
        let raw = builder.build(1_700_000_000).unwrap();
        assert_eq!(raw.max_gas_amount, DEFAULT_MAX_GAS_AMOUNT);
        assert_eq!(raw.gas_unit_price, DEFAULT_GAS_UNIT_PRICE);
        assert_eq!(raw.expiration_timestamp_secs, 1_700_000_600);
    }

    #[test]
    fn single_sender_ed25519_sign_round_trips_through_verification() {
        let signer = Ed25519Signer(Ed25519PrivateKey::generate_for_testing());
        let builder = TransactionBuilder::new()
            .sender(signer.address())
            .sequence_number(0)
            .payload(sample_payload())
            .chain_id(2);
        let signed = builder.sign(1_700_000_000, &signer, &[], None).unwrap();
        match signed.authenticator {
            TransactionAuthenticator::Ed25519 { .. } => {},
            other => panic!("expected Ed25519 authenticator, got {other:?}"),
        }
    }

    #[test]
    fn multi_agent_sign_requires_matching_secondary_signer_count() {
        let signer = Ed25519Signer(Ed25519PrivateKey::generate_for_testing());
        let secondary = Ed25519Signer(Ed25519PrivateKey::generate_for_testing());
        let builder = TransactionBuilder::new()
            .sender(signer.address())
            .sequence_number(0)
            .payload(sample_payload())
            .chain_id(2)
            .secondary_signers(vec![secondary.address()]);

        assert!(builder.sign(1_700_000_000, &signer, &[], None).is_err());

        let secondary_dyn: &dyn TransactionSigner = &secondary;
        let signed = builder
            .sign(1_700_000_000, &signer, &[secondary_dyn], None)
            .unwrap();
        match signed.authenticator {
            TransactionAuthenticator::MultiAgent {
                secondary_signer_addresses,
                ..
            } => assert_eq!(secondary_signer_addresses, vec![secondary.address()]),
            other => panic!("expected MultiAgent authenticator, got {other:?}"),
        }
    }

    #[test]
    fn fee_payer_sign_requires_fee_payer_signer() {
        let signer = Ed25519Signer(Ed25519PrivateKey::generate_for_testing());
        let fee_payer = Ed25519Signer(Ed25519PrivateKey::generate_for_testing());
        let builder = TransactionBuilder::new()
            .sender(signer.address())
            .sequence_number(0)
            .payload(sample_payload())
            .chain_id(2)
            .fee_payer(fee_payer.address());

        assert!(builder.sign(1_700_000_000, &signer, &[], None).is_err());

        let fee_payer_dyn: &dyn TransactionSigner = &fee_payer;
        let signed = builder
            .sign(1_700_000_000, &signer, &[], Some(fee_payer_dyn))
            .unwrap();
        match signed.authenticator {
            TransactionAuthenticator::FeePayer {
                fee_payer_address, ..
            } => assert_eq!(fee_payer_address, fee_payer.address()),
            other => panic!("expected FeePayer authenticator, got {other:?}"),
        }
    }
}
