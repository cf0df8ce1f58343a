// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! The facade's own error: every failure an `aptos-sdk` call can produce is
//! one of its collaborators' own root errors, wrapped here so callers only
//! ever match on one type regardless of which layer actually failed.

#[derive(Debug, thiserror::Error)]
pub enum SdkError {
    #[error(transparent)]
    Types(#[from] aptos_types::Error),
    #[error(transparent)]
    Rest(#[from] aptos_rest_client::RestError),
    #[error(transparent)]
    CryptoMaterial(#[from] aptos_crypto::CryptoMaterialError),
    #[error(transparent)]
    Mnemonic(#[from] aptos_crypto::MnemonicError),
    #[error("account error: {0}")]
    Account(String),
}

pub type Result<T> = std::result::Result<T, SdkError>;
