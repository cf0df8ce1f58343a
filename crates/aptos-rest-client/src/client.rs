// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! The REST client: typed wrappers over the node's
//! JSON endpoints plus BCS-over-HTTP transaction submission, all routed
//! through the shared retry envelope in [`crate::retry`].

use crate::{
    error::{RestError, Result},
    retry::{is_retryable_status, with_retry, RetryConfig},
    types::{
        AccountData, GasEstimation, LedgerInfo, MoveResource, PendingTransaction,
        SimulationResult, Transaction,
    },
};
use aptos_types::account_address::AccountAddress;
use serde::{de::DeserializeOwned, Serialize};
use std::{sync::Arc, time::Duration};
use url::Url;

const SIGNED_TRANSACTION_BCS_CONTENT_TYPE: &str = "application/x.aptos.signed_transaction+bcs";

#[derive(Clone, Copy, Debug)]
pub struct ClientConfig {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub retry_config: RetryConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            retry_config: RetryConfig::default(),
        }
    }
}

/// Builds a [`Client`] the way `reqwest::ClientBuilder` builds a
/// `reqwest::Client`: immutable fluent setters, one terminal `build()`.
pub struct ClientBuilder {
    base_url: Url,
    config: ClientConfig,
}

impl ClientBuilder {
    pub fn new(base_url: Url) -> Self {
        ClientBuilder {
            base_url,
            config: ClientConfig::default(),
        }
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    pub fn retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.config.retry_config = retry_config;
        self
    }

    pub fn build(self) -> Result<Client> {
        let http = reqwest::Client::builder()
            .connect_timeout(self.config.connect_timeout)
            .timeout(self.config.request_timeout)
            .build()
            .map_err(|e| RestError::Transport(e.to_string()))?;
        Ok(Client {
            inner: Arc::new(ClientInner {
                http,
                base_url: self.base_url,
                config: self.config,
            }),
        })
    }
}

struct ClientInner {
    http: reqwest::Client,
    base_url: Url,
    config: ClientConfig,
}

/// A cheaply-cloneable handle onto one shared `reqwest::Client`. Every method here is
/// cooperative-suspending: it only ever awaits at the HTTP
/// request/response boundary and, for retried calls, at backoff sleeps.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

impl Client {
    pub fn new(base_url: Url) -> Result<Self> {
        ClientBuilder::new(base_url).build()
    }

    pub fn builder(base_url: Url) -> ClientBuilder {
        ClientBuilder::new(base_url)
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.inner
            .base_url
            .join(path)
            .map_err(|e| RestError::Transport(e.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path)?;
        with_retry(self.inner.config.retry_config, || {
            let request = self.inner.http.get(url.clone());
            async move { fetch_json(request).await }
        })
        .await
    }

    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = self.url(path)?;
        let response = self
            .inner
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| RestError::Transport(e.to_string()))?;
        parse_json_response(response).await
    }

    pub async fn get_ledger_info(&self) -> Result<LedgerInfo> {
        self.get_json("/").await
    }

    pub async fn get_account(&self, address: AccountAddress) -> Result<AccountData> {
        self.get_json(&format!("/accounts/{address}")).await
    }

    pub async fn get_account_resources(
        &self,
        address: AccountAddress,
    ) -> Result<Vec<MoveResource>> {
        self.get_json(&format!("/accounts/{address}/resources"))
            .await
    }

    pub async fn get_account_resource(
        &self,
        address: AccountAddress,
        resource_type: &str,
    ) -> Result<MoveResource> {
        self.get_json(&format!(
            "/accounts/{address}/resource/{}",
            urlencoding_path_segment(resource_type)
        ))
        .await
    }

    pub async fn get_transaction_by_hash(&self, hash: &str) -> Result<Transaction> {
        self.get_json(&format!("/transactions/by_hash/{hash}"))
            .await
    }

    pub async fn get_transaction_by_version(&self, version: u64) -> Result<Transaction> {
        self.get_json(&format!("/transactions/by_version/{version}"))
            .await
    }

    pub async fn get_account_transactions(
        &self,
        address: AccountAddress,
        start: Option<u64>,
        limit: Option<u64>,
    ) -> Result<Vec<Transaction>> {
        let query = query_string(&[
            ("start", start.map(|v| v.to_string())),
            ("limit", limit.map(|v| v.to_string())),
        ]);
        self.get_json(&format!("/accounts/{address}/transactions{query}"))
            .await
    }

    pub async fn get_events(
        &self,
        address: AccountAddress,
        handle: &str,
        field: &str,
        start: Option<u64>,
        limit: Option<u64>,
    ) -> Result<Vec<serde_json::Value>> {
        let query = query_string(&[
            ("start", start.map(|v| v.to_string())),
            ("limit", limit.map(|v| v.to_string())),
        ]);
        self.get_json(&format!(
            "/accounts/{address}/events/{handle}/{field}{query}"
        ))
        .await
    }

    pub async fn view(&self, request: &serde_json::Value) -> Result<Vec<serde_json::Value>> {
        self.post_json("/view", request).await
    }

    pub async fn simulate_bcs(&self, signed_transaction_bytes: &[u8]) -> Result<Vec<SimulationResult>> {
        self.submit_bcs("/transactions/simulate", signed_transaction_bytes)
            .await
    }

    /// Submits the BCS-encoded bytes of a `SignedTransaction` with the `application/x.aptos.signed_transaction+bcs`
    /// content type. This is not retried — submission is not guaranteed
    /// idempotent.
    pub async fn submit_bcs(
        &self,
        path: &str,
        signed_transaction_bytes: &[u8],
    ) -> Result<Vec<SimulationResult>> {
        let url = self.url(path)?;
        let response = self
            .inner
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, SIGNED_TRANSACTION_BCS_CONTENT_TYPE)
            .body(signed_transaction_bytes.to_vec())
            .send()
            .await
            .map_err(|e| RestError::Transport(e.to_string()))?;
        parse_json_response(response).await
    }

    pub async fn submit_transaction(
        &self,
        signed_transaction_bytes: &[u8],
    ) -> Result<PendingTransaction> {
        let url = self.url("/transactions")?;
        let response = self
            .inner
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, SIGNED_TRANSACTION_BCS_CONTENT_TYPE)
            .body(signed_transaction_bytes.to_vec())
            .send()
            .await
            .map_err(|e| RestError::Transport(e.to_string()))?;
        parse_json_response(response).await
    }

    pub async fn estimate_gas_price(&self) -> Result<GasEstimation> {
        self.get_json("/estimate_gas_price").await
    }

    /// Polls `GET /transactions/by_hash/{hash}` until it stops returning
    /// "not found", up to `timeout`, sleeping `poll_interval` between
    /// attempts. Both the timeout and every poll sleep
    /// are suspension points a caller can cancel out of.
    pub async fn wait_for_transaction(
        &self,
        hash: &str,
        timeout: Duration,
        poll_interval: Duration,
    ) -> Result<Transaction> {
        let deadline = tokio::time::Instant::now() + timeout;
        loop {
            match self.get_transaction_by_hash(hash).await {
                Ok(txn) => return Ok(txn),
                Err(RestError::Api {
                    status_code: 404, ..
                }) => {},
                Err(other) => return Err(other),
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(RestError::Timeout(timeout.as_millis() as u64));
            }
            tokio::time::sleep(poll_interval).await;
        }
    }
}

async fn fetch_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> std::result::Result<T, (RestError, bool)> {
    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => return Err((RestError::Transport(e.to_string()), false)),
    };
    let status = response.status().as_u16();
    if !response.status().is_success() {
        let body = response.text().await.unwrap_or_default();
        let err = RestError::api(status, &body);
        return Err((err, is_retryable_status(status)));
    }
    match response.json::<T>().await {
        Ok(value) => Ok(value),
        Err(e) => Err((RestError::Transport(e.to_string()), false)),
    }
}

async fn parse_json_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status().as_u16();
    if !response.status().is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(RestError::api(status, &body));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| RestError::Transport(e.to_string()))
}

fn query_string(params: &[(&str, Option<String>)]) -> String {
    let parts: Vec<String> = params
        .iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| format!("{key}={v}")))
        .collect();
    if parts.is_empty() {
        String::new()
    } else {
        format!("?{}", parts.join("&"))
    }
}

fn urlencoding_path_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_string_omits_unset_params() {
        assert_eq!(query_string(&[("start", None), ("limit", None)]), "");
        assert_eq!(
            query_string(&[("start", Some("5".to_string())), ("limit", None)]),
            "?start=5"
        );
        assert_eq!(
            query_string(&[
                ("start", Some("5".to_string())),
                ("limit", Some("10".to_string()))
            ]),
            "?start=5&limit=10"
        );
    }

    #[test]
    fn path_segment_is_percent_encoded() {
        let encoded = urlencoding_path_segment("0x1::coin::CoinStore<0x1::aptos_coin::AptosCoin>");
        assert!(!encoded.contains('<'));
        assert!(!encoded.contains(':'));
    }
}
