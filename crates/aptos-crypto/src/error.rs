// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

/// Every way a cryptographic operation in this crate can fail.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum CryptoMaterialError {
    #[error("key or signature has the wrong length")]
    WrongLengthError,
    #[error("key or signature bytes do not decode to a valid curve point / scalar")]
    DeserializationError,
    #[error("signature failed to validate")]
    ValidationError,
    #[error("canonical signature representation was violated (e.g. high-S)")]
    CanonicalRepresentationError,
    #[error("small-subgroup / identity point rejected")]
    SmallSubgroupError,
    #[error("bit vector is malformed")]
    BitVecError(String),
}

/// Failures from BIP-39/SLIP-0010/BIP-32, kept distinct from
/// `CryptoMaterialError` since these originate from mnemonic/derivation
/// parsing rather than raw key material.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("word count must be one of 12, 15, 18, 21, 24; got {0}")]
    InvalidWordCount(usize),
    #[error("unknown BIP-39 word: {0}")]
    UnknownWord(String),
    #[error("mnemonic checksum did not match")]
    InvalidChecksum,
    #[error("SLIP-0010 does not support non-hardened derivation components")]
    NonHardenedSlip10Component,
    #[error("derived key material was invalid")]
    DerivationFailed,
    #[error("malformed derivation path: {0}")]
    InvalidDerivationPath(String),
}
