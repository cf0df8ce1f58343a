// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! BIP-39 mnemonics: entropy <-> English word phrase <->
//! PBKDF2 seed. Generation, parsing and checksum verification are delegated
//! to `tiny-bip39`; the 2048-iteration/64-byte seed derivation matches
//! `crate::hash::pbkdf2_hmac_sha512` exactly since both follow the same
//! published BIP-39 parameters.

use crate::error::MnemonicError;
use bip39::{Language, MnemonicType};

/// An ordered sequence of BIP-39 English words whose checksum verifies.
/// Immutable once constructed.
#[derive(Clone, PartialEq, Eq)]
pub struct Mnemonic(bip39::Mnemonic);

impl Mnemonic {
    /// Draws fresh entropy and renders it as an `n`-word phrase, `n` in
    /// `{12, 15, 18, 21, 24}`.
    pub fn generate(word_count: usize) -> Result<Self, MnemonicError> {
        let mnemonic_type = word_count_to_type(word_count)?;
        Ok(Mnemonic(bip39::Mnemonic::new(
            mnemonic_type,
            Language::English,
        )))
    }

    /// Tokenizes on ASCII whitespace, rejects unknown words, and verifies
    /// the embedded checksum.
    pub fn from_phrase(phrase: &str) -> Result<Self, MnemonicError> {
        let word_count = phrase.split_whitespace().count();
        word_count_to_type(word_count)?;
        let mnemonic = bip39::Mnemonic::from_phrase(phrase, Language::English).map_err(|e| {
            let message = e.to_string();
            if message.contains("checksum") {
                MnemonicError::InvalidChecksum
            } else {
                // tiny-bip39 reports the offending word in its error message.
                MnemonicError::UnknownWord(message)
            }
        })?;
        Ok(Mnemonic(mnemonic))
    }

    pub fn phrase(&self) -> &str {
        self.0.phrase()
    }

    pub fn word_count(&self) -> usize {
        self.0.phrase().split_whitespace().count()
    }

    /// PBKDF2-HMAC-SHA512 over the phrase, 2048 iterations, 64-byte output,
    /// salt `"mnemonic" || passphrase`.
    pub fn to_seed(&self, passphrase: &str) -> [u8; 64] {
        crate::hash::pbkdf2_hmac_sha512(self.phrase().as_bytes(), passphrase)
    }
}

impl std::fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Mnemonic({} words, <elided>)", self.word_count())
    }
}

fn word_count_to_type(word_count: usize) -> Result<MnemonicType, MnemonicError> {
    match word_count {
        12 => Ok(MnemonicType::Words12),
        15 => Ok(MnemonicType::Words15),
        18 => Ok(MnemonicType::Words18),
        21 => Ok(MnemonicType::Words21),
        24 => Ok(MnemonicType::Words24),
        other => Err(MnemonicError::InvalidWordCount(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bip39_seed_vector_matches_published_test_vector() {
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon \
                       abandon abandon abandon about";
        let mnemonic = Mnemonic::from_phrase(phrase).unwrap();
        let seed = mnemonic.to_seed("");
        assert_eq!(
            hex::encode(seed),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
    }

    #[test]
    fn generate_then_reparse_round_trips_seed() {
        for word_count in [12, 15, 18, 21, 24] {
            let mnemonic = Mnemonic::generate(word_count).unwrap();
            assert_eq!(mnemonic.word_count(), word_count);
            let reparsed = Mnemonic::from_phrase(mnemonic.phrase()).unwrap();
            assert_eq!(reparsed.to_seed(""), mnemonic.to_seed(""));
            assert_eq!(reparsed.to_seed("").len(), 64);
        }
    }

    #[test]
    fn invalid_word_count_is_rejected() {
        assert_eq!(
            Mnemonic::generate(13).unwrap_err(),
            MnemonicError::InvalidWordCount(13)
        );
    }

    #[test]
    fn unknown_word_is_rejected() {
        let phrase = "notaword abandon abandon abandon abandon abandon abandon abandon \
                       abandon abandon abandon about";
        assert!(Mnemonic::from_phrase(phrase).is_err());
    }

    #[test]
    fn bad_checksum_is_rejected() {
        // Valid words, wrong final word so the embedded checksum fails.
        let phrase = "abandon abandon abandon abandon abandon abandon abandon abandon \
                       abandon abandon abandon abandon";
        assert!(Mnemonic::from_phrase(phrase).is_err());
    }
}
