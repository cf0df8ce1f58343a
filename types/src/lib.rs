// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! On-chain types: addresses, type tags, and the transaction model
//! (construction, signing-message domain separation, authenticators)
//! that the rest of the SDK builds transactions out of.

pub mod account_address;
pub mod chain_id;
pub mod error;
pub mod transaction;
pub mod type_tag;

pub use account_address::AccountAddress;
pub use chain_id::ChainId;
pub use error::{Error, Result};
pub use type_tag::{StructTag, TypeTag};
