// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Key/signature schemes, mnemonic and hierarchical key derivation,
//! hashing, and keyless identity material.
//!
//! Every key and signature type implements the small trait family in
//! [`traits`] (`Uniform`, `PrivateKey`, `PublicKey`, `SigningKey`,
//! `Signature`, `ValidCryptoMaterial`) instead of living behind one
//! shared class hierarchy; callers generic over a scheme bound
//! `T: SigningKey` rather than matching on an enum.

pub mod derivation;
pub mod ed25519;
pub mod error;
pub mod hash;
pub mod keyless;
pub mod mnemonic;
pub mod multi_ed25519;
pub mod secp256k1;
pub mod traits;

pub use error::{CryptoMaterialError, MnemonicError};
pub use mnemonic::Mnemonic;
pub use traits::{PrivateKey, PublicKey, Signature, SigningKey, Uniform, ValidCryptoMaterial, ValidCryptoMaterialStringExt};
