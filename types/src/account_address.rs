// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! A 32-byte on-chain address. Two parse modes:
//! [`AccountAddress::from_str_strict`] demands exactly 64 hex digits after
//! `0x`; [`AccountAddress::from_str_relaxed`] accepts 1..=64 hex digits,
//! with or without the prefix, and left-zero-pads to 32 bytes.

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub const LENGTH: usize = 32;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AccountAddress([u8; LENGTH]);

impl AccountAddress {
    pub const ZERO: AccountAddress = AccountAddress([0u8; LENGTH]);

    pub const ONE: AccountAddress = {
        let mut bytes = [0u8; LENGTH];
        bytes[LENGTH - 1] = 1;
        AccountAddress(bytes)
    };

    pub const fn new(bytes: [u8; LENGTH]) -> Self {
        AccountAddress(bytes)
    }

    pub fn into_bytes(self) -> [u8; LENGTH] {
        self.0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    /// `0x` + 64 lowercase hex characters, full width, no trimming.
    pub fn to_hex_literal(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Strict parse: requires the `0x` prefix and exactly 64 hex digits.
    pub fn from_str_strict(literal: &str) -> Result<Self, Error> {
        let hex_part = literal.strip_prefix("0x").ok_or_else(|| {
            Error::AddressParse(format!("address {literal:?} must start with 0x"))
        })?;
        if hex_part.len() != LENGTH * 2 {
            return Err(Error::AddressParse(format!(
                "address {literal:?} must have exactly {} hex digits after 0x, found {}",
                LENGTH * 2,
                hex_part.len()
            )));
        }
        let bytes = hex::decode(hex_part)
            .map_err(|e| Error::AddressParse(format!("invalid hex in {literal:?}: {e}")))?;
        let mut out = [0u8; LENGTH];
        out.copy_from_slice(&bytes);
        Ok(AccountAddress(out))
    }

    /// Relaxed parse: 1..=64 hex digits, `0x` prefix optional, left-padded
    /// with zeros to 32 bytes.
    pub fn from_str_relaxed(literal: &str) -> Result<Self, Error> {
        let hex_part = literal.strip_prefix("0x").unwrap_or(literal);
        if hex_part.is_empty() || hex_part.len() > LENGTH * 2 {
            return Err(Error::AddressParse(format!(
                "address {literal:?} must have 1..={} hex digits",
                LENGTH * 2
            )));
        }
        let padded = if hex_part.len() % 2 == 1 {
            format!("0{hex_part}")
        } else {
            hex_part.to_string()
        };
        let decoded = hex::decode(&padded)
            .map_err(|e| Error::AddressParse(format!("invalid hex in {literal:?}: {e}")))?;
        let mut out = [0u8; LENGTH];
        out[LENGTH - decoded.len()..].copy_from_slice(&decoded);
        Ok(AccountAddress(out))
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_literal())
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountAddress({})", self.to_hex_literal())
    }
}

impl FromStr for AccountAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AccountAddress::from_str_strict(s)
    }
}

impl From<[u8; LENGTH]> for AccountAddress {
    fn from(bytes: [u8; LENGTH]) -> Self {
        AccountAddress(bytes)
    }
}

impl TryFrom<&[u8]> for AccountAddress {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != LENGTH {
            return Err(Error::AddressParse(format!(
                "expected {LENGTH} bytes, found {}",
                bytes.len()
            )));
        }
        let mut out = [0u8; LENGTH];
        out.copy_from_slice(bytes);
        Ok(AccountAddress(out))
    }
}

impl AsRef<[u8]> for AccountAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn zero_and_one_are_distinct() {
        assert_ne!(AccountAddress::ZERO, AccountAddress::ONE);
        assert_eq!(
            AccountAddress::ONE.to_hex_literal(),
            format!("0x{}1", "0".repeat(63))
        );
    }

    #[test]
    fn strict_requires_full_width() {
        assert!(AccountAddress::from_str_strict("0x1").is_err());
        assert!(AccountAddress::from_str_strict("1").is_err());
        let full = format!("0x{}", "0".repeat(63));
        assert!(AccountAddress::from_str_strict(&format!("{full}1")).is_ok());
    }

    #[test]
    fn relaxed_pads_short_hex() {
        let addr = AccountAddress::from_str_relaxed("0x1").unwrap();
        assert_eq!(addr, AccountAddress::ONE);
        let addr2 = AccountAddress::from_str_relaxed("1").unwrap();
        assert_eq!(addr2, AccountAddress::ONE);
    }

    #[test]
    fn relaxed_rejects_non_hex() {
        assert!(AccountAddress::from_str_relaxed("0xzz").is_err());
    }

    #[test]
    fn relaxed_rejects_overlong() {
        let too_long = "a".repeat(65);
        assert!(AccountAddress::from_str_relaxed(&too_long).is_err());
    }

    #[test]
    fn known_test_vector_address_parses() {
        let addr = AccountAddress::from_str_strict(
            "0xeb663b681209e7087d681c5d3eed12aaa8e1915e7c87794542c3f96e94b3d3bf",
        )
        .unwrap();
        assert_eq!(addr.as_slice().len(), LENGTH);
    }

    #[test]
    fn bcs_round_trips() {
        let valid = "0x".to_string() + &"ab".repeat(32);
        let addr = AccountAddress::from_str_strict(&valid).unwrap();
        let encoded = aptos_bcs::to_bytes(&addr).unwrap();
        assert_eq!(encoded.len(), LENGTH);
        let decoded: AccountAddress = aptos_bcs::from_bytes(&encoded).unwrap();
        assert_eq!(decoded, addr);
    }

    proptest! {
        #[test]
        fn prop_relaxed_round_trips_to_full_width_lowercase(
            hex_digits in "[0-9a-fA-F]{1,64}"
        ) {
            let addr = AccountAddress::from_str_relaxed(&hex_digits).unwrap();
            let rendered = addr.to_hex_literal();
            prop_assert!(rendered.starts_with("0x"));
            prop_assert_eq!(rendered.len(), 66);
            prop_assert_eq!(&rendered, &rendered.to_lowercase());
        }
    }
}
