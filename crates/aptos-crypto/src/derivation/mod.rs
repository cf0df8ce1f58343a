// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Hierarchical-deterministic derivation paths and the two
//! concrete derivation schemes built on them.

pub mod bip32;
pub mod slip10;

use crate::error::MnemonicError;
use std::{fmt, str::FromStr};

/// One `index'`/`index` path component. `hardened` mirrors whether bit 31
/// of the serialized index (`index | 0x8000_0000`) is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DerivationPathComponent {
    pub index: u32,
    pub hardened: bool,
}

impl DerivationPathComponent {
    pub fn hardened(index: u32) -> Self {
        DerivationPathComponent {
            index,
            hardened: true,
        }
    }

    pub fn normal(index: u32) -> Self {
        DerivationPathComponent {
            index,
            hardened: false,
        }
    }
}

impl fmt::Display for DerivationPathComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

/// An ordered sequence of path components rooted at `m/`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivationPath(Vec<DerivationPathComponent>);

impl DerivationPath {
    pub fn new(components: Vec<DerivationPathComponent>) -> Self {
        DerivationPath(components)
    }

    pub fn components(&self) -> &[DerivationPathComponent] {
        &self.0
    }

    /// `m/44'/637'/0'/0'/0'` — the default Aptos account path, every
    /// component hardened.
    pub fn default_aptos() -> Self {
        DerivationPath(vec![
            DerivationPathComponent::hardened(44),
            DerivationPathComponent::hardened(637),
            DerivationPathComponent::hardened(0),
            DerivationPathComponent::hardened(0),
            DerivationPathComponent::hardened(0),
        ])
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for component in &self.0 {
            write!(f, "/{}", component)?;
        }
        Ok(())
    }
}

impl FromStr for DerivationPath {
    type Err = MnemonicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        match parts.next() {
            Some("m") => {},
            _ => {
                return Err(MnemonicError::InvalidDerivationPath(
                    "path must start with the literal root prefix `m/`".to_string(),
                ))
            },
        }
        let mut components = Vec::new();
        for part in parts {
            if part.is_empty() {
                return Err(MnemonicError::InvalidDerivationPath(format!(
                    "empty path component in {s:?}"
                )));
            }
            let (digits, hardened) = match part.strip_suffix('\'').or_else(|| part.strip_suffix('h')) {
                Some(digits) => (digits, true),
                None => (part, false),
            };
            let index: u32 = digits.parse().map_err(|_| {
                MnemonicError::InvalidDerivationPath(format!("not a valid index: {part:?}"))
            })?;
            components.push(DerivationPathComponent { index, hardened });
        }
        if components.is_empty() {
            return Err(MnemonicError::InvalidDerivationPath(
                "path has no components".to_string(),
            ));
        }
        Ok(DerivationPath(components))
    }
}
