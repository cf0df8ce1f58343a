// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! RFC 8032 Ed25519 keys and signatures: a 32-byte scalar
//! private key, a 32-byte compressed-point public key, a 64-byte signature.

use crate::{
    error::CryptoMaterialError,
    traits::{PrivateKey, PublicKey, Signature, SigningKey, Uniform, ValidCryptoMaterial},
};
use ed25519_dalek::{Keypair, SecretKey, Signer as _, Verifier as _};
use rand_core::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

pub const PRIVATE_KEY_LENGTH: usize = 32;
pub const PUBLIC_KEY_LENGTH: usize = 32;
pub const SIGNATURE_LENGTH: usize = 64;

#[derive(Serialize, Deserialize)]
#[serde(try_from = "SerializedEd25519PrivateKey")]
#[serde(into = "SerializedEd25519PrivateKey")]
pub struct Ed25519PrivateKey(SecretKey);

impl Clone for Ed25519PrivateKey {
    fn clone(&self) -> Self {
        // `ed25519_dalek::SecretKey` is deliberately not `Clone`; rebuild it
        // from its own bytes instead.
        Ed25519PrivateKey(SecretKey::from_bytes(&self.0.to_bytes()).expect("valid key"))
    }
}

impl Ed25519PrivateKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoMaterialError> {
        if bytes.len() != PRIVATE_KEY_LENGTH {
            return Err(CryptoMaterialError::WrongLengthError);
        }
        let secret =
            SecretKey::from_bytes(bytes).map_err(|_| CryptoMaterialError::DeserializationError)?;
        Ok(Ed25519PrivateKey(secret))
    }

    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_LENGTH] {
        self.0.to_bytes()
    }

    fn keypair(&self) -> Keypair {
        let secret = SecretKey::from_bytes(&self.0.to_bytes()).expect("valid key");
        let public: ed25519_dalek::PublicKey = (&secret).into();
        Keypair { secret, public }
    }
}

impl std::fmt::Debug for Ed25519PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519PrivateKey(<elided>)")
    }
}

impl PrivateKey for Ed25519PrivateKey {
    type PublicKeyMaterial = Ed25519PublicKey;

    fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey::from(self)
    }
}

impl SigningKey for Ed25519PrivateKey {
    type SignatureMaterial = Ed25519Signature;

    fn sign_arbitrary_message(&self, message: &[u8]) -> Ed25519Signature {
        let signature = self.keypair().sign(message);
        Ed25519Signature(signature.to_bytes())
    }
}

impl Uniform for Ed25519PrivateKey {
    fn generate<R>(rng: &mut R) -> Self
    where
        R: RngCore + CryptoRng,
    {
        let mut bytes = [0u8; PRIVATE_KEY_LENGTH];
        rng.fill_bytes(&mut bytes);
        // Rejection is unnecessary: every 32-byte string is a valid Ed25519 seed.
        Ed25519PrivateKey(SecretKey::from_bytes(&bytes).expect("32 bytes is always valid"))
    }
}

impl ValidCryptoMaterial for Ed25519PrivateKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes().to_vec()
    }
}

impl TryFrom<&[u8]> for Ed25519PrivateKey {
    type Error = CryptoMaterialError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Ed25519PrivateKey::from_bytes(bytes)
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SerializedEd25519PublicKey")]
#[serde(into = "SerializedEd25519PublicKey")]
pub struct Ed25519PublicKey(ed25519_dalek::PublicKey);

impl Ed25519PublicKey {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoMaterialError> {
        if bytes.len() != PUBLIC_KEY_LENGTH {
            return Err(CryptoMaterialError::WrongLengthError);
        }
        let key = ed25519_dalek::PublicKey::from_bytes(bytes)
            .map_err(|_| CryptoMaterialError::DeserializationError)?;
        Ok(Ed25519PublicKey(key))
    }

    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.0.to_bytes()
    }
}

impl std::fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519PublicKey({})", hex::encode(self.to_bytes()))
    }
}

impl From<&Ed25519PrivateKey> for Ed25519PublicKey {
    fn from(private_key: &Ed25519PrivateKey) -> Self {
        let public: ed25519_dalek::PublicKey = (&private_key.0).into();
        Ed25519PublicKey(public)
    }
}

impl PublicKey for Ed25519PublicKey {
    type PrivateKeyMaterial = Ed25519PrivateKey;
}

impl ValidCryptoMaterial for Ed25519PublicKey {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes().to_vec()
    }
}

impl TryFrom<&[u8]> for Ed25519PublicKey {
    type Error = CryptoMaterialError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Ed25519PublicKey::from_bytes(bytes)
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SerializedEd25519Signature")]
#[serde(into = "SerializedEd25519Signature")]
pub struct Ed25519Signature([u8; SIGNATURE_LENGTH]);

impl Ed25519Signature {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoMaterialError> {
        if bytes.len() != SIGNATURE_LENGTH {
            return Err(CryptoMaterialError::WrongLengthError);
        }
        let mut out = [0u8; SIGNATURE_LENGTH];
        out.copy_from_slice(bytes);
        Ok(Ed25519Signature(out))
    }

    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        self.0
    }
}

impl std::fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ed25519Signature({})", hex::encode(self.0))
    }
}

impl Signature for Ed25519Signature {
    type VerifyingKeyMaterial = Ed25519PublicKey;
    type SigningKeyMaterial = Ed25519PrivateKey;

    fn verify_arbitrary_msg(
        &self,
        message: &[u8],
        public_key: &Ed25519PublicKey,
    ) -> Result<(), CryptoMaterialError> {
        let signature = ed25519_dalek::Signature::from_bytes(&self.0)
            .map_err(|_| CryptoMaterialError::DeserializationError)?;
        public_key
            .0
            .verify(message, &signature)
            .map_err(|_| CryptoMaterialError::ValidationError)
    }
}

impl ValidCryptoMaterial for Ed25519Signature {
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_vec()
    }
}

impl TryFrom<&[u8]> for Ed25519Signature {
    type Error = CryptoMaterialError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Ed25519Signature::from_bytes(bytes)
    }
}

// serde passes through a plain byte buffer; these adapter types give us
// precise length validation on deserialize without a custom Visitor.
#[derive(Serialize, Deserialize)]
struct SerializedEd25519PrivateKey(#[serde(with = "serde_bytes")] Vec<u8>);

impl TryFrom<SerializedEd25519PrivateKey> for Ed25519PrivateKey {
    type Error = CryptoMaterialError;

    fn try_from(value: SerializedEd25519PrivateKey) -> Result<Self, Self::Error> {
        Ed25519PrivateKey::from_bytes(&value.0)
    }
}

impl From<Ed25519PrivateKey> for SerializedEd25519PrivateKey {
    fn from(key: Ed25519PrivateKey) -> Self {
        SerializedEd25519PrivateKey(key.to_bytes().to_vec())
    }
}

#[derive(Serialize, Deserialize)]
struct SerializedEd25519PublicKey(#[serde(with = "serde_bytes")] Vec<u8>);

impl TryFrom<SerializedEd25519PublicKey> for Ed25519PublicKey {
    type Error = CryptoMaterialError;

    fn try_from(value: SerializedEd25519PublicKey) -> Result<Self, Self::Error> {
        Ed25519PublicKey::from_bytes(&value.0)
    }
}

impl From<Ed25519PublicKey> for SerializedEd25519PublicKey {
    fn from(key: Ed25519PublicKey) -> Self {
        SerializedEd25519PublicKey(key.to_bytes().to_vec())
    }
}

#[derive(Serialize, Deserialize)]
struct SerializedEd25519Signature(#[serde(with = "serde_bytes")] Vec<u8>);

impl TryFrom<SerializedEd25519Signature> for Ed25519Signature {
    type Error = CryptoMaterialError;

    fn try_from(value: SerializedEd25519Signature) -> Result<Self, Self::Error> {
        Ed25519Signature::from_bytes(&value.0)
    }
}

impl From<Ed25519Signature> for SerializedEd25519Signature {
    fn from(sig: Ed25519Signature) -> Self {
        SerializedEd25519Signature(sig.to_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify_round_trips() {
        let private_key = Ed25519PrivateKey::generate_for_testing();
        let public_key = private_key.public_key();
        let message = b"aptos";
        let signature = private_key.sign_arbitrary_message(message);
        assert!(signature.verify_arbitrary_msg(message, &public_key).is_ok());
    }

    #[test]
    fn signing_is_deterministic() {
        let private_key = Ed25519PrivateKey::generate_for_testing();
        let message = b"deterministic please";
        let sig1 = private_key.sign_arbitrary_message(message);
        let sig2 = private_key.sign_arbitrary_message(message);
        assert_eq!(sig1.to_bytes(), sig2.to_bytes());
    }

    #[test]
    fn tampered_signature_fails_verification() {
        let private_key = Ed25519PrivateKey::generate_for_testing();
        let public_key = private_key.public_key();
        let message = b"aptos";
        let mut signature = private_key.sign_arbitrary_message(message).to_bytes();
        signature[0] ^= 0xFF;
        let bad_signature = Ed25519Signature::from_bytes(&signature).unwrap();
        assert!(bad_signature
            .verify_arbitrary_msg(message, &public_key)
            .is_err());
    }

    #[test]
    fn known_test_vector_default_derivation_path() {
        let private_key = Ed25519PrivateKey::from_bytes(
            &hex::decode("cc92c0eaf80206d817f150e21917f797e49cf644a33ac514de3c316baa2f1bf5")
                .unwrap(),
        )
        .unwrap();
        let public_key = private_key.public_key();
        assert_eq!(
            hex::encode(public_key.to_bytes()),
            "a686f0309ab80312979606cfccc10ea2740147ae6888351488d11c46f08fbf60"
        );
    }
}
