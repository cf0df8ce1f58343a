// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! The transaction model: raw transactions, payloads,
//! the multi-agent/fee-payer signing-message framing, and signed
//! transactions ready for BCS-over-HTTP submission.

pub mod authenticator;
mod builder;

pub use builder::TransactionBuilder;

use crate::{account_address::AccountAddress, error::Error};
use authenticator::TransactionAuthenticator;
use serde::{Deserialize, Serialize};

/// A dotted Move module path: `address::name`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleId {
    pub address: AccountAddress,
    pub name: String,
}

impl ModuleId {
    pub fn new(address: AccountAddress, name: String) -> Self {
        ModuleId { address, name }
    }
}

/// A Move entry-function or script-argument identifier. Kept as a
/// thin `String` newtype rather than validating Move's identifier
/// grammar, which is out of scope for this core.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn new(s: impl Into<String>) -> Self {
        Identifier(s.into())
    }
}

/// `(module, function, ty_args, args)`. `args` are pre-serialized BCS
/// byte strings — the caller BCS-encodes each argument once, and this
/// type's own BCS encoding length-prefixes the resulting opaque bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFunction {
    pub module: ModuleId,
    pub function: Identifier,
    pub ty_args: Vec<crate::type_tag::TypeTag>,
    #[serde(with = "serde_bytes_vec_of_vec")]
    pub args: Vec<Vec<u8>>,
}

impl EntryFunction {
    pub fn new(
        module: ModuleId,
        function: Identifier,
        ty_args: Vec<crate::type_tag::TypeTag>,
        args: Vec<Vec<u8>>,
    ) -> Self {
        EntryFunction {
            module,
            function,
            ty_args,
            args,
        }
    }
}

/// A raw Move script: bytecode plus BCS-pre-serialized arguments.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    #[serde(with = "serde_bytes")]
    pub code: Vec<u8>,
    pub ty_args: Vec<crate::type_tag::TypeTag>,
    #[serde(with = "serde_bytes_vec_of_vec")]
    pub args: Vec<Vec<u8>>,
}

/// A multisig-account-sponsored entry function call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Multisig {
    pub multisig_address: AccountAddress,
    pub transaction_payload: Option<EntryFunction>,
}

/// The tagged union of what a transaction can execute.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionPayload {
    Script(Script),
    EntryFunction(EntryFunction),
    Multisig(Multisig),
}

/// Every field a transaction needs before it can be signed:
/// serialized in exactly this declared order, since BCS struct encoding
/// has no field names on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub sender: AccountAddress,
    pub sequence_number: u64,
    pub payload: TransactionPayload,
    pub max_gas_amount: u64,
    pub gas_unit_price: u64,
    pub expiration_timestamp_secs: u64,
    pub chain_id: u8,
}

/// The multi-agent/fee-payer signing-message wrapper: a
/// distinct BCS-tagged union from `RawTransaction` itself, carrying the
/// extra signer addresses that must also enter the signed digest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawTransactionWithData {
    MultiAgent {
        raw_txn: RawTransaction,
        secondary_signer_addresses: Vec<AccountAddress>,
    },
    FeePayer {
        raw_txn: RawTransaction,
        secondary_signer_addresses: Vec<AccountAddress>,
        fee_payer_address: AccountAddress,
    },
}

/// `SHA3-256("APTOS::RawTransaction")` — the domain-separation prefix for
/// single-sender / Ed25519 / SingleSender signing messages.
pub fn raw_transaction_signing_prefix() -> [u8; 32] {
    aptos_crypto::hash::sha3_256(b"APTOS::RawTransaction")
}

/// `SHA3-256("APTOS::RawTransactionWithData")` — the domain-separation
/// prefix for multi-agent / fee-payer signing messages.
pub fn raw_transaction_with_data_signing_prefix() -> [u8; 32] {
    aptos_crypto::hash::sha3_256(b"APTOS::RawTransactionWithData")
}

impl RawTransaction {
    /// `prefix || BCS(self)` — the bytes a single-sender/Ed25519/
    /// SingleSender signer actually signs.
    pub fn signing_message(&self) -> Result<Vec<u8>, Error> {
        let mut message = raw_transaction_signing_prefix().to_vec();
        message.extend_from_slice(&aptos_bcs::to_bytes(self)?);
        Ok(message)
    }
}

impl RawTransactionWithData {
    /// `prefix' || BCS(self)` — the bytes a multi-agent/fee-payer signer
    /// actually signs.
    pub fn signing_message(&self) -> Result<Vec<u8>, Error> {
        let mut message = raw_transaction_with_data_signing_prefix().to_vec();
        message.extend_from_slice(&aptos_bcs::to_bytes(self)?);
        Ok(message)
    }
}

/// `(raw_transaction, authenticator)` — the BCS bytes posted to
/// `POST /transactions` with the `application/x.aptos.signed_transaction+bcs`
/// content type.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub raw_txn: RawTransaction,
    pub authenticator: TransactionAuthenticator,
}

impl SignedTransaction {
    pub fn new(raw_txn: RawTransaction, authenticator: TransactionAuthenticator) -> Self {
        SignedTransaction {
            raw_txn,
            authenticator,
        }
    }

    /// The exact bytes to POST as the transaction submission body.
    pub fn bcs_to_bytes(&self) -> Result<Vec<u8>, Error> {
        Ok(aptos_bcs::to_bytes(self)?)
    }

    /// `SHA3-256(SHA3-256("APTOS::Transaction") || 0x00 || BCS(self))` —
    /// the client-side display hash of a *user* transaction variant.
    pub fn client_hash(&self) -> Result<[u8; 32], Error> {
        let mut prefix = aptos_crypto::hash::sha3_256(b"APTOS::Transaction").to_vec();
        prefix.push(0x00);
        prefix.extend_from_slice(&self.bcs_to_bytes()?);
        Ok(aptos_crypto::hash::sha3_256(&prefix))
    }
}

/// `Vec<Vec<u8>>` BCS-encodes as a uleb128-prefixed sequence of
/// uleb128-prefixed byte strings; `serde_bytes` only optimizes the inner
/// `Vec<u8>` elements, so this module wires that per-element behavior in
/// without pulling in a second crate.
mod serde_bytes_vec_of_vec {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Wrapper(#[serde(with = "serde_bytes")] Vec<u8>);

    pub fn serialize<S: Serializer>(value: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error> {
        let wrapped: Vec<Wrapper> = value.iter().cloned().map(Wrapper).collect();
        wrapped.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Vec<u8>>, D::Error> {
        let wrapped = Vec::<Wrapper>::deserialize(deserializer)?;
        Ok(wrapped.into_iter().map(|w| w.0).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_raw_transaction() -> RawTransaction {
        RawTransaction {
            sender: AccountAddress::ONE,
            sequence_number: 7,
            payload: TransactionPayload::EntryFunction(EntryFunction::new(
                ModuleId::new(AccountAddress::ONE, "coin".to_string()),
                Identifier::new("transfer"),
                vec![],
                vec![vec![1, 2, 3], vec![4]],
            )),
            max_gas_amount: 200_000,
            gas_unit_price: 100,
            expiration_timestamp_secs: 1_700_000_000,
            chain_id: 2,
        }
    }

    #[test]
    fn raw_transaction_bcs_round_trips() {
        let txn = sample_raw_transaction();
        let encoded = aptos_bcs::to_bytes(&txn).unwrap();
        let decoded: RawTransaction = aptos_bcs::from_bytes(&encoded).unwrap();
        assert_eq!(decoded, txn);
    }

    #[test]
    fn signing_message_starts_with_domain_separation_prefix() {
        let txn = sample_raw_transaction();
        let message = txn.signing_message().unwrap();
        assert!(message.starts_with(&raw_transaction_signing_prefix()));
        assert_eq!(
            message.len(),
            32 + aptos_bcs::to_bytes(&txn).unwrap().len()
        );
    }

    #[test]
    fn multi_agent_signing_message_uses_distinct_prefix() {
        let txn = sample_raw_transaction();
        let wrapped = RawTransactionWithData::MultiAgent {
            raw_txn: txn.clone(),
            secondary_signer_addresses: vec![AccountAddress::ZERO],
        };
        let message = wrapped.signing_message().unwrap();
        assert!(message.starts_with(&raw_transaction_with_data_signing_prefix()));
        assert_ne!(
            raw_transaction_signing_prefix(),
            raw_transaction_with_data_signing_prefix()
        );
    }
}
