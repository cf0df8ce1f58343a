// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Deterministic (RFC 6979) Secp256k1 ECDSA. Signatures are
//! 64 bytes `(r || s)` with low-S normalization; the uncompressed,
//! `0x04`-prefixed 65-byte public key is what feeds the authentication-key
//! hash.

use crate::{
    error::CryptoMaterialError,
    hash::sha3_256,
    traits::{PrivateKey, PublicKey, Signature, SigningKey, Uniform, ValidCryptoMaterial},
};
use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

pub const PRIVATE_KEY_LENGTH: usize = 32;
pub const PUBLIC_KEY_LENGTH: usize = 65;
pub const SIGNATURE_LENGTH: usize = 64;

#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "SerializedSecp256k1PrivateKey")]
#[serde(into = "SerializedSecp256k1PrivateKey")]
pub struct Secp256k1PrivateKey(libsecp256k1::SecretKey);

impl Secp256k1PrivateKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoMaterialError> {
        if bytes.len() != PRIVATE_KEY_LENGTH {
            return Err(CryptoMaterialError::WrongLengthError);
        }
        let mut fixed = [0u8; PRIVATE_KEY_LENGTH];
        fixed.copy_from_slice(bytes);
        let key = libsecp256k1::SecretKey::parse(&fixed)
            .map_err(|_| CryptoMaterialError::DeserializationError)?;
        Ok(Secp256k1PrivateKey(key))
    }

    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_LENGTH] {
        self.0.serialize()
    }
}

impl std::fmt::Debug for Secp256k1PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secp256k1PrivateKey(<elided>)")
    }
}

impl PrivateKey for Secp256k1PrivateKey {
    type PublicKeyMaterial = Secp256k1PublicKey;

    fn public_key(&self) -> Secp256k1PublicKey {
        Secp256k1PublicKey(libsecp256k1::PublicKey::from_secret_key(&self.0))
    }
}

impl SigningKey for Secp256k1PrivateKey {
    type SignatureMaterial = Secp256k1Signature;

    fn sign_arbitrary_message(&self, message: &[u8]) -> Secp256k1Signature {
        let digest = sha3_256(message);
        let msg = libsecp256k1::Message::parse(&digest);
        let (mut signature, _recovery_id) = libsecp256k1::sign(&msg, &self.0);
        // libsecp256k1 already emits low-S signatures; normalize defensively
        // so the invariant holds even if that internal guarantee ever changes.
        signature.normalize_s();
        Secp256k1Signature(signature.serialize())
    }
}

impl Uniform for Secp256k1PrivateKey {
    fn generate<R>(rng: &mut R) -> Self
    where
        R: RngCore + CryptoRng,
    {
        Secp256k1PrivateKey(libsecp256k1::SecretKey::random(rng))
    }
}

impl ValidCryptoMaterial for Secp256k1PrivateKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.serialize().to_vec()
    }
}

impl TryFrom<&[u8]> for Secp256k1PrivateKey {
    type Error = CryptoMaterialError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Secp256k1PrivateKey::from_bytes(bytes)
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SerializedSecp256k1PublicKey")]
#[serde(into = "SerializedSecp256k1PublicKey")]
pub struct Secp256k1PublicKey(libsecp256k1::PublicKey);

impl Secp256k1PublicKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoMaterialError> {
        if bytes.len() != PUBLIC_KEY_LENGTH {
            return Err(CryptoMaterialError::WrongLengthError);
        }
        let mut fixed = [0u8; PUBLIC_KEY_LENGTH];
        fixed.copy_from_slice(bytes);
        let key = libsecp256k1::PublicKey::parse(&fixed)
            .map_err(|_| CryptoMaterialError::DeserializationError)?;
        Ok(Secp256k1PublicKey(key))
    }

    /// Uncompressed, `0x04`-prefixed encoding — the bytes that enter the
    /// authentication-key hash.
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.0.serialize()
    }
}

impl std::fmt::Debug for Secp256k1PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secp256k1PublicKey({})", hex::encode(self.to_bytes()))
    }
}

impl PublicKey for Secp256k1PublicKey {
    type PrivateKeyMaterial = Secp256k1PrivateKey;
}

impl ValidCryptoMaterial for Secp256k1PublicKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.serialize().to_vec()
    }
}

impl TryFrom<&[u8]> for Secp256k1PublicKey {
    type Error = CryptoMaterialError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Secp256k1PublicKey::from_bytes(bytes)
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SerializedSecp256k1Signature")]
#[serde(into = "SerializedSecp256k1Signature")]
pub struct Secp256k1Signature([u8; SIGNATURE_LENGTH]);

impl Secp256k1Signature {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoMaterialError> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(CryptoMaterialError::WrongLengthError);
        }
        let mut out = [0u8; SIGNATURE_LENGTH];
        out.copy_from_slice(bytes);
        Ok(Secp256k1Signature(out))
    }

    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        self.0
    }

    /// `s <= n/2`, the low-S canonical form this crate always signs with.
    pub fn has_low_s(&self) -> bool {
        const ORDER_HALF: [u8; 32] = [
            0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFF, 0xFF, 0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46,
            0x68, 0x1B, 0x20, 0xA0,
        ];
        self.0[32..64] <= ORDER_HALF
    }
}

impl std::fmt::Debug for Secp256k1Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Secp256k1Signature({})", hex::encode(self.0))
    }
}

impl Signature for Secp256k1Signature {
    type VerifyingKeyMaterial = Secp256k1PublicKey;
    type SigningKeyMaterial = Secp256k1PrivateKey;

    fn verify_arbitrary_msg(
        &self,
        message: &[u8],
        public_key: &Secp256k1PublicKey,
    ) -> Result<(), CryptoMaterialError> {
        if !self.has_low_s() {
            return Err(CryptoMaterialError::CanonicalRepresentationError);
        }
        let digest = sha3_256(message);
        let msg = libsecp256k1::Message::parse(&digest);
        let signature = libsecp256k1::Signature::parse_standard(&self.0)
            .map_err(|_| CryptoMaterialError::DeserializationError)?;
        if libsecp256k1::verify(&msg, &signature, &public_key.0) {
            Ok(())
        } else {
            Err(CryptoMaterialError::ValidationError)
        }
    }
}

impl ValidCryptoMaterial for Secp256k1Signature {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl TryFrom<&[u8]> for Secp256k1Signature {
    type Error = CryptoMaterialError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Secp256k1Signature::from_bytes(bytes)
    }
}

#[derive(Serialize, Deserialize)]
struct SerializedSecp256k1PrivateKey(#[serde(with = "serde_bytes")] Vec<u8>);

impl TryFrom<SerializedSecp256k1PrivateKey> for Secp256k1PrivateKey {
    type Error = CryptoMaterialError;

    fn try_from(value: SerializedSecp256k1PrivateKey) -> Result<Self, Self::Error> {
        Secp256k1PrivateKey::from_bytes(&value.0)
    }
}

impl From<Secp256k1PrivateKey> for SerializedSecp256k1PrivateKey {
    fn from(key: Secp256k1PrivateKey) -> Self {
        SerializedSecp256k1PrivateKey(key.to_bytes().to_vec())
    }
}

#[derive(Serialize, Deserialize)]
struct SerializedSecp256k1PublicKey(#[serde(with = "serde_bytes")] Vec<u8>);

impl TryFrom<SerializedSecp256k1PublicKey> for Secp256k1PublicKey {
    type Error = CryptoMaterialError;

    fn try_from(value: SerializedSecp256k1PublicKey) -> Result<Self, Self::Error> {
        Secp256k1PublicKey::from_bytes(&value.0)
    }
}

impl From<Secp256k1PublicKey> for SerializedSecp256k1PublicKey {
    fn from(key: Secp256k1PublicKey) -> Self {
        SerializedSecp256k1PublicKey(key.to_bytes().to_vec())
    }
}

#[derive(Serialize, Deserialize)]
struct SerializedSecp256k1Signature(#[serde(with = "serde_bytes")] Vec<u8>);

impl TryFrom<SerializedSecp256k1Signature> for Secp256k1Signature {
    type Error = CryptoMaterialError;

    fn try_from(value: SerializedSecp256k1Signature) -> Result<Self, Self::Error> {
        Secp256k1Signature::from_bytes(&value.0)
    }
}

impl From<Secp256k1Signature> for SerializedSecp256k1Signature {
    fn from(sig: Secp256k1Signature) -> Self {
        SerializedSecp256k1Signature(sig.to_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify_round_trips() {
        let private_key = Secp256k1PrivateKey::generate_for_testing();
        let public_key = private_key.public_key();
        let message = b"aptos secp256k1";
        let signature = private_key.sign_arbitrary_message(message);
        assert!(signature.has_low_s());
        assert!(signature
            .verify_arbitrary_msg(message, &public_key)
            .is_ok());
    }

    #[test]
    fn signing_is_deterministic() {
        let private_key = Secp256k1PrivateKey::generate_for_testing();
        let message = b"rfc6979";
        let sig1 = private_key.sign_arbitrary_message(message);
        let sig2 = private_key.sign_arbitrary_message(message);
        assert_eq!(sig1.to_bytes(), sig2.to_bytes());
    }

    #[test]
    fn public_key_is_uncompressed_with_0x04_prefix() {
        let private_key = Secp256k1PrivateKey::generate_for_testing();
        let public_key = private_key.public_key();
        assert_eq!(public_key.to_bytes()[0], 0x04);
        assert_eq!(public_key.to_bytes().len(), PUBLIC_KEY_LENGTH);
    }

    #[test]
    fn tampered_message_fails_verification() {
        let private_key = Secp256k1PrivateKey::generate_for_testing();
        let public_key = private_key.public_key();
        let signature = private_key.sign_arbitrary_message(b"original");
        assert!(signature
            .verify_arbitrary_msg(b"tampered", &public_key)
            .is_err());
    }
}
