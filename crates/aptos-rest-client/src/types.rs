// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! The JSON REST surface's response bodies. Every
//! integer-valued field that can exceed 2^32 is transported as a string,
//! matching the node's own JSON encoding — these types preserve that
//! verbatim rather than eagerly parsing to `u64`, since a param-less
//! `LedgerInfo` is displayed far more often than it is arithmetic'd on.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LedgerInfo {
    pub chain_id: u8,
    pub epoch: String,
    pub ledger_version: String,
    pub oldest_ledger_version: String,
    pub ledger_timestamp: String,
    pub node_role: String,
    pub oldest_block_height: String,
    pub block_height: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub git_hash: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AccountData {
    pub sequence_number: String,
    pub authentication_key: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct MoveResource {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub data: Value,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PendingTransaction {
    pub hash: String,
    #[serde(flatten)]
    pub extra: Value,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SimulationResult {
    pub success: bool,
    #[serde(default)]
    pub vm_status: String,
    #[serde(flatten)]
    pub extra: Value,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct GasEstimation {
    pub gas_estimate: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prioritized_gas_estimate: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprioritized_gas_estimate: Option<u64>,
}

/// The typed subset of a fetched-by-hash/version transaction this crate
/// promises: `type`/`hash`/`success`, everything else carried through as
/// opaque JSON since the full transaction schema is the API service's
/// concern, not this transport's.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub transaction_type: String,
    #[serde(default)]
    pub hash: Option<String>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(flatten)]
    pub extra: Value,
}

/// Faucet success body: surfaced to the caller rather than discarded,
/// since discarding a response the caller paid a round trip for has no
/// upside.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct FaucetResponse {
    #[serde(default)]
    pub txn_hashes: Vec<String>,
}
