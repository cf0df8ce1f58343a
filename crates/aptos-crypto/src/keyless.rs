// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Keyless (OIDC-derived) identity: a public key made of
//! JWT claims plus a privacy pepper, bound to an ephemeral Ed25519
//! signing key with an explicit expiry. The JWT's own signature is
//! never checked here — the node enforces it at submission time — so
//! this module only ever extracts `iss`/`aud`/`sub` from the unverified
//! payload segment.

use crate::{
    ed25519::{Ed25519PrivateKey, Ed25519PublicKey, Ed25519Signature},
    error::CryptoMaterialError,
    traits::SigningKey,
};
use serde::{Deserialize, Serialize};

pub const PEPPER_LENGTH: usize = 31;

/// `(iss, aud, uidKey, uidVal, pepper[31])`, BCS-encoded as part of the
/// SingleKey/AnyKey authentication-key framing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeylessPublicKey {
    pub iss: String,
    pub aud: String,
    pub uid_key: String,
    pub uid_val: String,
    #[serde(with = "serde_bytes")]
    pepper: Vec<u8>,
}

impl KeylessPublicKey {
    pub fn new(
        iss: String,
        aud: String,
        uid_key: String,
        uid_val: String,
        pepper: [u8; PEPPER_LENGTH],
    ) -> Self {
        KeylessPublicKey {
            iss,
            aud,
            uid_key,
            uid_val,
            pepper: pepper.to_vec(),
        }
    }

    pub fn pepper(&self) -> [u8; PEPPER_LENGTH] {
        let mut out = [0u8; PEPPER_LENGTH];
        out.copy_from_slice(&self.pepper);
        out
    }

    /// Builds the public key directly from an unverified JWT, binding
    /// `uidVal := claims.sub` unconditionally. `uid_key` is carried for
    /// future extensibility but does not select an alternate claim.
    pub fn from_jwt(
        jwt: &str,
        aud: String,
        pepper: [u8; PEPPER_LENGTH],
    ) -> Result<Self, CryptoMaterialError> {
        let claims = JwtClaims::decode_unverified(jwt)?;
        Ok(KeylessPublicKey::new(
            claims.iss,
            aud,
            "sub".to_string(),
            claims.sub,
            pepper,
        ))
    }
}

/// The three OIDC claims this module reads. No other claim, and no
/// signature, is inspected.
struct JwtClaims {
    iss: String,
    sub: String,
}

#[derive(Deserialize)]
struct JwtClaimsWire {
    iss: String,
    sub: String,
}

impl JwtClaims {
    fn decode_unverified(jwt: &str) -> Result<Self, CryptoMaterialError> {
        let mut parts = jwt.split('.');
        let _header = parts.next().ok_or(CryptoMaterialError::DeserializationError)?;
        let payload = parts.next().ok_or(CryptoMaterialError::DeserializationError)?;
        if parts.next().is_none() {
            return Err(CryptoMaterialError::DeserializationError);
        }
        let payload_bytes = base64::decode_config(payload, base64::URL_SAFE_NO_PAD)
            .map_err(|_| CryptoMaterialError::DeserializationError)?;
        let wire: JwtClaimsWire = serde_json::from_slice(&payload_bytes)
            .map_err(|_| CryptoMaterialError::DeserializationError)?;
        Ok(JwtClaims {
            iss: wire.iss,
            sub: wire.sub,
        })
    }
}

/// An ephemeral Ed25519 keypair bound to a keyless identity, with an
/// explicit expiry. The ZK proof that actually authorizes this binding
/// on-chain is opaque to the SDK and carried alongside the signature at
/// submission time; this type never produces one.
#[derive(Debug)]
pub struct EphemeralKeyPair {
    private_key: Ed25519PrivateKey,
    public_key: KeylessPublicKey,
    expiration_date_secs: u64,
}

impl EphemeralKeyPair {
    pub fn new(
        private_key: Ed25519PrivateKey,
        public_key: KeylessPublicKey,
        expiration_date_secs: u64,
    ) -> Self {
        EphemeralKeyPair {
            private_key,
            public_key,
            expiration_date_secs,
        }
    }

    pub fn public_key(&self) -> &KeylessPublicKey {
        &self.public_key
    }

    pub fn expiration_date_secs(&self) -> u64 {
        self.expiration_date_secs
    }

    pub fn is_expired(&self, now_seconds: u64) -> bool {
        now_seconds >= self.expiration_date_secs
    }

    /// Signs `message` with the ephemeral Ed25519 key, refusing once the
    /// key has expired relative to `now_seconds`.
    pub fn sign_arbitrary_message(
        &self,
        now_seconds: u64,
        message: &[u8],
    ) -> Result<Ed25519Signature, CryptoMaterialError> {
        if self.is_expired(now_seconds) {
            return Err(CryptoMaterialError::ValidationError);
        }
        Ok(self.private_key.sign_arbitrary_message(message))
    }

    pub fn ephemeral_public_key(&self) -> Ed25519PublicKey {
        self.private_key.public_key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Uniform;

    fn sample_jwt(iss: &str, sub: &str, aud: &str) -> String {
        let header = base64::encode_config(br#"{"alg":"RS256","typ":"JWT"}"#, base64::URL_SAFE_NO_PAD);
        let payload = serde_json::json!({ "iss": iss, "aud": aud, "sub": sub });
        let payload = base64::encode_config(payload.to_string(), base64::URL_SAFE_NO_PAD);
        format!("{header}.{payload}.unverified-signature")
    }

    #[test]
    fn from_jwt_binds_uid_val_to_sub() {
        let jwt = sample_jwt("https://accounts.example.com", "user-123", "my-client-id");
        let pk = KeylessPublicKey::from_jwt(&jwt, "my-client-id".to_string(), [7u8; PEPPER_LENGTH])
            .unwrap();
        assert_eq!(pk.iss, "https://accounts.example.com");
        assert_eq!(pk.uid_key, "sub");
        assert_eq!(pk.uid_val, "user-123");
        assert_eq!(pk.pepper(), [7u8; PEPPER_LENGTH]);
    }

    #[test]
    fn malformed_jwt_is_rejected() {
        assert!(KeylessPublicKey::from_jwt("not-a-jwt", "aud".to_string(), [0u8; PEPPER_LENGTH])
            .is_err());
    }

    #[test]
    fn expired_ephemeral_key_refuses_to_sign() {
        let private_key = Ed25519PrivateKey::generate_for_testing();
        let public_key = KeylessPublicKey::new(
            "iss".to_string(),
            "aud".to_string(),
            "sub".to_string(),
            "user".to_string(),
            [0u8; PEPPER_LENGTH],
        );
        let pair = EphemeralKeyPair::new(private_key, public_key, 1_000);
        assert!(pair.is_expired(1_001));
        assert!(pair.sign_arbitrary_message(1_001, b"hello").is_err());
        assert!(pair.sign_arbitrary_message(999, b"hello").is_ok());
    }
}
