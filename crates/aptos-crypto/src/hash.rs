// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! The four hash primitives the rest of the crate builds on:
//! SHA2-256 for BIP-32 child derivation, SHA3-256 for authentication keys
//! and transaction signing-message domain separation, HMAC-SHA512 for
//! SLIP-0010/BIP-32, and PBKDF2-HMAC-SHA512 for the BIP-39 seed.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};
use sha3::Sha3_256;

pub fn sha2_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// HMAC-SHA512 as used by SLIP-0010 and BIP-32: returns the 64-byte `I`
/// value whose left/right halves are `I_L`/`I_R`.
pub fn hmac_sha512(key: &[u8], data: &[u8]) -> [u8; 64] {
    let mut mac = Hmac::<Sha512>::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(data);
    mac.finalize().into_bytes().into()
}

const PBKDF2_ITERATIONS: u32 = 2048;
const PBKDF2_OUTPUT_LEN: usize = 64;

/// PBKDF2-HMAC-SHA512 with the BIP-39 parameters: 2048 iterations, 64-byte
/// output, salt `"mnemonic" || passphrase`.
pub fn pbkdf2_hmac_sha512(phrase: &[u8], passphrase: &str) -> [u8; PBKDF2_OUTPUT_LEN] {
    let mut salt = Vec::with_capacity(8 + passphrase.len());
    salt.extend_from_slice(b"mnemonic");
    salt.extend_from_slice(passphrase.as_bytes());

    let mut output = [0u8; PBKDF2_OUTPUT_LEN];
    let mut block_index: u32 = 1;
    let mut written = 0usize;
    while written < PBKDF2_OUTPUT_LEN {
        let mut block_salt = salt.clone();
        block_salt.extend_from_slice(&block_index.to_be_bytes());

        let mut mac =
            Hmac::<Sha512>::new_from_slice(phrase).expect("HMAC accepts keys of any length");
        mac.update(&block_salt);
        let mut u: [u8; 64] = mac.finalize_reset().into_bytes().into();
        let mut t = u;

        for _ in 1..PBKDF2_ITERATIONS {
            mac.update(&u);
            u = mac.finalize_reset().into_bytes().into();
            for (t_byte, u_byte) in t.iter_mut().zip(u.iter()) {
                *t_byte ^= u_byte;
            }
        }

        let remaining = PBKDF2_OUTPUT_LEN - written;
        let take = remaining.min(64);
        output[written..written + take].copy_from_slice(&t[..take]);
        written += take;
        block_index += 1;
    }
    output
}
