// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

/// Every way a value in this crate can fail to parse, build, or encode.
#[derive(Clone, Debug, thiserror::Error)]
pub enum Error {
    #[error("address parse error: {0}")]
    AddressParse(String),
    #[error("type-tag parse error: {0}")]
    TypeTagParse(String),
    #[error("transaction build error: {0}")]
    TransactionBuild(String),
    #[error("BCS encode/decode error: {0}")]
    Bcs(#[from] aptos_bcs::Error),
    #[error("cryptographic material error: {0}")]
    CryptoMaterial(#[from] aptos_crypto::CryptoMaterialError),
}

pub type Result<T> = std::result::Result<T, Error>;
