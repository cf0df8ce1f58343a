// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! k-of-n MultiEd25519: a public key is `n` Ed25519
//! public keys plus a threshold byte; a signature is the concatenation of
//! the contributing signatures (in ascending signer-index order) plus a
//! 4-byte, MSB-first bitmap recording which signers contributed.

use crate::{
    ed25519::{Ed25519PublicKey, Ed25519Signature, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH},
    error::CryptoMaterialError,
    traits::{PublicKey, Signature as SignatureTrait, ValidCryptoMaterial},
};
use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

pub const MAX_NUM_OF_KEYS: usize = 32;
pub const BITMAP_NUM_OF_BYTES: usize = 4;

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SerializedMultiEd25519PublicKey")]
#[serde(into = "SerializedMultiEd25519PublicKey")]
pub struct MultiEd25519PublicKey {
    public_keys: Vec<Ed25519PublicKey>,
    threshold: u8,
}

impl MultiEd25519PublicKey {
    pub fn new(
        public_keys: Vec<Ed25519PublicKey>,
        threshold: u8,
    ) -> Result<Self, CryptoMaterialError> {
        if public_keys.is_empty() || public_keys.len() > MAX_NUM_OF_KEYS {
            return Err(CryptoMaterialError::WrongLengthError);
        }
        if threshold == 0 || usize::from(threshold) > public_keys.len() {
            return Err(CryptoMaterialError::ValidationError);
        }
        Ok(MultiEd25519PublicKey {
            public_keys,
            threshold,
        })
    }

    pub fn public_keys(&self) -> &[Ed25519PublicKey] {
        &self.public_keys
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoMaterialError> {
        if bytes.is_empty() || (bytes.len() - 1) % PUBLIC_KEY_LENGTH != 0 {
            return Err(CryptoMaterialError::WrongLengthError);
        }
        let num_keys = (bytes.len() - 1) / PUBLIC_KEY_LENGTH;
        let threshold = bytes[bytes.len() - 1];
        let public_keys = (0..num_keys)
            .map(|i| {
                let start = i * PUBLIC_KEY_LENGTH;
                Ed25519PublicKey::from_bytes(&bytes[start..start + PUBLIC_KEY_LENGTH])
            })
            .collect::<Result<Vec<_>, _>>()?;
        MultiEd25519PublicKey::new(public_keys, threshold)
    }
}

impl std::fmt::Debug for MultiEd25519PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MultiEd25519PublicKey({}-of-{})",
            self.threshold,
            self.public_keys.len()
        )
    }
}

impl ValidCryptoMaterial for MultiEd25519PublicKey {
    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.public_keys.len() * PUBLIC_KEY_LENGTH + 1);
        for key in &self.public_keys {
            out.extend_from_slice(&key.to_bytes());
        }
        out.push(self.threshold);
        out
    }
}

impl TryFrom<&[u8]> for MultiEd25519PublicKey {
    type Error = CryptoMaterialError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        MultiEd25519PublicKey::from_bytes(bytes)
    }
}

/// A signature index paired with the Ed25519 signature it contributed.
pub type IndexedSignature = (u8, Ed25519Signature);

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SerializedMultiEd25519Signature")]
#[serde(into = "SerializedMultiEd25519Signature")]
pub struct MultiEd25519Signature {
    signatures: Vec<Ed25519Signature>,
    bitmap: [u8; BITMAP_NUM_OF_BYTES],
}

impl MultiEd25519Signature {
    /// Builds the k-of-n signature from a set of `(signer_index, signature)`
    /// pairs. Rejects duplicate or out-of-range indices, and emits
    /// signatures in ascending signer-index order.
    pub fn from_indexed_signatures(
        mut indexed: Vec<IndexedSignature>,
    ) -> Result<Self, CryptoMaterialError> {
        if indexed.is_empty() {
            return Err(CryptoMaterialError::WrongLengthError);
        }
        indexed.sort_by_key(|(index, _)| *index);
        for w in indexed.windows(2) {
            if w[0].0 == w[1].0 {
                return Err(CryptoMaterialError::ValidationError);
            }
        }
        let mut bitmap = [0u8; BITMAP_NUM_OF_BYTES];
        let mut signatures = Vec::with_capacity(indexed.len());
        for (index, signature) in indexed {
            if usize::from(index) >= MAX_NUM_OF_KEYS {
                return Err(CryptoMaterialError::ValidationError);
            }
            set_bitmap_bit(&mut bitmap, index);
            signatures.push(signature);
        }
        Ok(MultiEd25519Signature { signatures, bitmap })
    }

    pub fn bitmap_indices(&self) -> Vec<u8> {
        bitmap_indices(&self.bitmap)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoMaterialError> {
        if bytes.len() < BITMAP_NUM_OF_BYTES
            || (bytes.len() - BITMAP_NUM_OF_BYTES) % SIGNATURE_LENGTH != 0
        {
            return Err(CryptoMaterialError::WrongLengthError);
        }
        let sig_bytes_len = bytes.len() - BITMAP_NUM_OF_BYTES;
        let num_sigs = sig_bytes_len / SIGNATURE_LENGTH;
        let signatures = (0..num_sigs)
            .map(|i| {
                let start = i * SIGNATURE_LENGTH;
                Ed25519Signature::from_bytes(&bytes[start..start + SIGNATURE_LENGTH])
            })
            .collect::<Result<Vec<_>, _>>()?;
        let mut bitmap = [0u8; BITMAP_NUM_OF_BYTES];
        bitmap.copy_from_slice(&bytes[sig_bytes_len..]);
        if bitmap_indices(&bitmap).len() != signatures.len() {
            return Err(CryptoMaterialError::BitVecError(
                "bitmap population count does not match signature count".to_string(),
            ));
        }
        Ok(MultiEd25519Signature { signatures, bitmap })
    }
}

impl std::fmt::Debug for MultiEd25519Signature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MultiEd25519Signature({} signatures, bitmap {:08b}{:08b}{:08b}{:08b})",
            self.signatures.len(),
            self.bitmap[0],
            self.bitmap[1],
            self.bitmap[2],
            self.bitmap[3]
        )
    }
}

impl SignatureTrait for MultiEd25519Signature {
    type VerifyingKeyMaterial = MultiEd25519PublicKey;
    type SigningKeyMaterial = crate::ed25519::Ed25519PrivateKey;

    fn verify_arbitrary_msg(
        &self,
        message: &[u8],
        public_key: &MultiEd25519PublicKey,
    ) -> Result<(), CryptoMaterialError> {
        let indices = self.bitmap_indices();
        if indices.len() != self.signatures.len() {
            return Err(CryptoMaterialError::BitVecError(
                "bitmap/signature count mismatch".to_string(),
            ));
        }
        if indices.len() < usize::from(public_key.threshold()) {
            return Err(CryptoMaterialError::ValidationError);
        }
        for (index, signature) in indices.iter().zip(self.signatures.iter()) {
            let key = public_key
                .public_keys()
                .get(usize::from(*index))
                .ok_or(CryptoMaterialError::ValidationError)?;
            signature.verify_arbitrary_msg(message, key)?;
        }
        Ok(())
    }
}

impl ValidCryptoMaterial for MultiEd25519Signature {
    fn to_bytes(&self) -> Vec<u8> {
        let mut out =
            Vec::with_capacity(self.signatures.len() * SIGNATURE_LENGTH + BITMAP_NUM_OF_BYTES);
        for signature in &self.signatures {
            out.extend_from_slice(&signature.to_bytes());
        }
        out.extend_from_slice(&self.bitmap);
        out
    }
}

impl TryFrom<&[u8]> for MultiEd25519Signature {
    type Error = CryptoMaterialError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        MultiEd25519Signature::from_bytes(bytes)
    }
}

fn set_bitmap_bit(bitmap: &mut [u8; BITMAP_NUM_OF_BYTES], index: u8) {
    let byte = usize::from(index) / 8;
    let bit = 7 - (usize::from(index) % 8);
    bitmap[byte] |= 1 << bit;
}

fn bitmap_indices(bitmap: &[u8; BITMAP_NUM_OF_BYTES]) -> Vec<u8> {
    let mut indices = Vec::new();
    for (byte_index, byte) in bitmap.iter().enumerate() {
        for bit in 0..8u8 {
            if byte & (1 << (7 - bit)) != 0 {
                indices.push((byte_index as u8) * 8 + bit);
            }
        }
    }
    indices
}

#[derive(Serialize, Deserialize)]
struct SerializedMultiEd25519PublicKey(#[serde(with = "serde_bytes")] Vec<u8>);

impl TryFrom<SerializedMultiEd25519PublicKey> for MultiEd25519PublicKey {
    type Error = CryptoMaterialError;

    fn try_from(value: SerializedMultiEd25519PublicKey) -> Result<Self, Self::Error> {
        MultiEd25519PublicKey::from_bytes(&value.0)
    }
}

impl From<MultiEd25519PublicKey> for SerializedMultiEd25519PublicKey {
    fn from(key: MultiEd25519PublicKey) -> Self {
        SerializedMultiEd25519PublicKey(key.to_bytes())
    }
}

#[derive(Serialize, Deserialize)]
struct SerializedMultiEd25519Signature(#[serde(with = "serde_bytes")] Vec<u8>);

impl TryFrom<SerializedMultiEd25519Signature> for MultiEd25519Signature {
    type Error = CryptoMaterialError;

    fn try_from(value: SerializedMultiEd25519Signature) -> Result<Self, Self::Error> {
        MultiEd25519Signature::from_bytes(&value.0)
    }
}

impl From<MultiEd25519Signature> for SerializedMultiEd25519Signature {
    fn from(sig: MultiEd25519Signature) -> Self {
        SerializedMultiEd25519Signature(sig.to_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ed25519::Ed25519PrivateKey, traits::Uniform};

    fn keypairs(n: usize) -> (Vec<Ed25519PrivateKey>, Vec<Ed25519PublicKey>) {
        let privates: Vec<_> = (0..n).map(|_| Ed25519PrivateKey::generate_for_testing()).collect();
        let publics = privates.iter().map(|k| k.public_key()).collect();
        (privates, publics)
    }

    #[test]
    fn two_of_three_signature_size_and_bitmap_match_expected_layout() {
        let (privates, publics) = keypairs(3);
        let multi_pk = MultiEd25519PublicKey::new(publics.clone(), 2).unwrap();
        let message = [7u8; 32];

        let sig0 = privates[0].sign_arbitrary_message(&message);
        let sig1 = privates[1].sign_arbitrary_message(&message);
        let multi_sig =
            MultiEd25519Signature::from_indexed_signatures(vec![(0, sig0), (1, sig1)]).unwrap();

        let bytes = multi_sig.to_bytes();
        assert_eq!(bytes.len(), 2 * SIGNATURE_LENGTH + BITMAP_NUM_OF_BYTES);
        assert_eq!(bytes.len(), 132);
        assert_eq!(bytes[bytes.len() - 4], 0b1100_0000);
        assert_eq!(&bytes[bytes.len() - 3..], &[0, 0, 0]);

        assert!(multi_sig.verify_arbitrary_msg(&message, &multi_pk).is_ok());
    }

    #[test]
    fn fewer_than_threshold_signers_fails_verification() {
        let (privates, publics) = keypairs(3);
        let multi_pk = MultiEd25519PublicKey::new(publics, 2).unwrap();
        let message = [1u8; 32];
        let sig0 = privates[0].sign_arbitrary_message(&message);
        let multi_sig = MultiEd25519Signature::from_indexed_signatures(vec![(0, sig0)]).unwrap();
        assert!(multi_sig.verify_arbitrary_msg(&message, &multi_pk).is_err());
    }

    #[test]
    fn malformed_bitmap_never_panics() {
        let mut bytes = vec![0u8; SIGNATURE_LENGTH + BITMAP_NUM_OF_BYTES];
        // Bitmap claims two signers contributed but only one signature is present.
        bytes[SIGNATURE_LENGTH] = 0b1100_0000;
        assert!(MultiEd25519Signature::from_bytes(&bytes).is_err());
    }

    #[test]
    fn threshold_out_of_range_is_rejected() {
        let (_privates, publics) = keypairs(3);
        assert!(MultiEd25519PublicKey::new(publics.clone(), 0).is_err());
        assert!(MultiEd25519PublicKey::new(publics, 4).is_err());
    }
}
