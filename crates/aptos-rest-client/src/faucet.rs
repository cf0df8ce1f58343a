// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! The faucet client: `POST /fund`, falling back to
//! the legacy `POST /mint` query-parameter form when `/fund` itself is
//! unavailable on a given network.

use crate::error::{RestError, Result};
use crate::types::FaucetResponse;
use aptos_types::account_address::AccountAddress;
use serde::Serialize;
use std::sync::Arc;
use url::Url;

#[derive(Serialize)]
struct FundRequest {
    address: String,
    amount: u64,
}

pub struct FaucetClient {
    http: reqwest::Client,
    base_url: Url,
}

impl FaucetClient {
    pub fn new(base_url: Url) -> Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| RestError::Transport(e.to_string()))?;
        Ok(FaucetClient { http, base_url })
    }

    pub fn new_with_client(base_url: Url, http: Arc<reqwest::Client>) -> Self {
        FaucetClient {
            http: (*http).clone(),
            base_url,
        }
    }

    /// `POST /fund`; on any non-2xx status, falls back to the legacy
    /// `POST /mint?address=..&amount=..` alternate with the same data as
    /// query parameters. Raises *API error* carrying the first
    /// response's body and status if both fail.
    pub async fn fund_account(
        &self,
        address: AccountAddress,
        amount: u64,
    ) -> Result<FaucetResponse> {
        let fund_url = self
            .base_url
            .join("/fund")
            .map_err(|e| RestError::Transport(e.to_string()))?;
        let body = FundRequest {
            address: address.to_hex_literal(),
            amount,
        };
        let response = self
            .http
            .post(fund_url)
            .json(&body)
            .send()
            .await
            .map_err(|e| RestError::Transport(e.to_string()))?;

        if response.status().is_success() {
            return parse_faucet_body(response).await;
        }
        let first_status = response.status().as_u16();
        let first_body = response.text().await.unwrap_or_default();

        let mut mint_url = self
            .base_url
            .join("/mint")
            .map_err(|e| RestError::Transport(e.to_string()))?;
        mint_url
            .query_pairs_mut()
            .append_pair("address", &address.to_hex_literal())
            .append_pair("amount", &amount.to_string());

        let mint_response = self
            .http
            .post(mint_url)
            .send()
            .await
            .map_err(|e| RestError::Transport(e.to_string()))?;

        if mint_response.status().is_success() {
            return parse_faucet_body(mint_response).await;
        }
        Err(RestError::api(first_status, &first_body))
    }
}

async fn parse_faucet_body(response: reqwest::Response) -> Result<FaucetResponse> {
    let body = response
        .text()
        .await
        .map_err(|e| RestError::Transport(e.to_string()))?;
    if body.trim().is_empty() {
        return Ok(FaucetResponse::default());
    }
    Ok(serde_json::from_str(&body).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fund_request_serializes_address_as_hex_literal() {
        let body = FundRequest {
            address: AccountAddress::ONE.to_hex_literal(),
            amount: 100_000_000,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("0x"));
        assert!(json.contains("100000000"));
    }
}
