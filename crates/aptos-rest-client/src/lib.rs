// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! REST/faucet transport: JSON endpoints over a shared
//! `reqwest::Client`, exponential backoff with jitter on idempotent
//! GETs, and the faucet's `/fund` -> `/mint` fallback.

pub mod client;
pub mod error;
pub mod faucet;
pub mod retry;
pub mod types;

pub use client::{Client, ClientBuilder, ClientConfig};
pub use error::{abort_category, ErrorResponse, RestError, Result};
pub use faucet::FaucetClient;
pub use retry::RetryConfig;
