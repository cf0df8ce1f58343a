// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Account abstractions that glue a concrete signing capability to the
//! transaction builder's [`TransactionSigner`](aptos_types::transaction::builder::TransactionSigner)
//! seam: [`LocalAccount`] for Ed25519/Secp256k1/MultiEd25519 key holders,
//! [`KeylessAccount`] for OIDC-derived identities.

mod keyless_account;
mod local_account;

pub use keyless_account::KeylessAccount;
pub use local_account::LocalAccount;
