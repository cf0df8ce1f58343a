// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! The scheme-polymorphism seam: every key/signature type in this crate
//! implements these small traits instead of living in a class hierarchy, so
//! BCS shape decisions stay local to each type's own `Serialize`/
//! `Deserialize` impl (see the design rationale in `DESIGN.md`).

use crate::error::CryptoMaterialError;
use rand_core::{CryptoRng, RngCore};

/// A private key paired with exactly one public key type.
pub trait PrivateKey {
    type PublicKeyMaterial: PublicKey;

    fn public_key(&self) -> Self::PublicKeyMaterial;
}

/// A public key paired with exactly one private key type.
pub trait PublicKey: Clone {
    type PrivateKeyMaterial: PrivateKey;
}

/// A private key that can produce a signature over an arbitrary byte message.
/// Transaction-level domain separation (the `prefix || BCS(..)` framing) is
/// applied by the caller before bytes reach this trait.
pub trait SigningKey: PrivateKey + Sized {
    type SignatureMaterial: Signature<SigningKeyMaterial = Self>;

    fn sign_arbitrary_message(&self, message: &[u8]) -> Self::SignatureMaterial;
}

/// A signature that can be checked against its matching public key.
pub trait Signature: Sized + Clone {
    type VerifyingKeyMaterial: PublicKey;
    type SigningKeyMaterial: SigningKey<SignatureMaterial = Self>;

    fn verify_arbitrary_msg(
        &self,
        message: &[u8],
        public_key: &Self::VerifyingKeyMaterial,
    ) -> Result<(), CryptoMaterialError>;
}

/// Random generation, isolated from `rand`'s own traits so every key type
/// gets one canonical entry point.
pub trait Uniform: Sized {
    fn generate<R>(rng: &mut R) -> Self
    where
        R: RngCore + CryptoRng;

    fn generate_for_testing() -> Self {
        Self::generate(&mut rand::rngs::OsRng)
    }
}

/// Raw wire bytes of a key or signature, independent of any outer framing
/// (BCS, hex, etc.) that wraps it.
pub trait ValidCryptoMaterial {
    fn to_bytes(&self) -> Vec<u8>;
}

/// Hex convenience built only on top of `ValidCryptoMaterial`/`TryFrom<&[u8]>`.
pub trait ValidCryptoMaterialStringExt: ValidCryptoMaterial {
    fn to_encoded_string(&self) -> Result<String, CryptoMaterialError> {
        Ok(format!("0x{}", hex::encode(self.to_bytes())))
    }

    fn from_encoded_string(encoded: &str) -> Result<Self, CryptoMaterialError>
    where
        Self: Sized + for<'a> TryFrom<&'a [u8], Error = CryptoMaterialError>,
    {
        let stripped = encoded.strip_prefix("0x").unwrap_or(encoded);
        let bytes = hex::decode(stripped).map_err(|_| CryptoMaterialError::DeserializationError)?;
        Self::try_from(&bytes[..])
    }
}

impl<T: ValidCryptoMaterial> ValidCryptoMaterialStringExt for T {}
