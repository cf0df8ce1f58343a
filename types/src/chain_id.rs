// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! A single-byte chain identifier, distinguishing mainnet,
//! testnet, and local/devnet networks in the signed-transaction domain.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAINNET: u8 = 1;
pub const TESTNET: u8 = 2;
pub const LOCAL: u8 = 4;

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainId(u8);

impl ChainId {
    pub fn new(id: u8) -> Self {
        ChainId(id)
    }

    pub fn mainnet() -> Self {
        ChainId(MAINNET)
    }

    pub fn testnet() -> Self {
        ChainId(TESTNET)
    }

    pub fn local() -> Self {
        ChainId(LOCAL)
    }

    pub fn id(&self) -> u8 {
        self.0
    }

    pub fn is_mainnet(&self) -> bool {
        self.0 == MAINNET
    }
}

impl fmt::Debug for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChainId({})", self.0)
    }
}

impl From<u8> for ChainId {
    fn from(id: u8) -> Self {
        ChainId(id)
    }
}
