// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! Retry discipline for idempotent GETs and faucet POSTs:
//! exponential backoff with uniform jitter, bounded attempt count,
//! non-retryable statuses surfacing immediately. Retry state lives on
//! the stack of each call — never shared across concurrent callers.

use crate::error::RestError;
use rand::Rng;
use std::time::Duration;

const RETRYABLE_STATUS_CODES: [u16; 5] = [429, 500, 502, 503, 504];

#[derive(Clone, Copy, Debug)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            max_retries: 3,
            initial_delay_ms: 200,
            max_delay_ms: 10_000,
            backoff_multiplier: 2.0,
        }
    }
}

pub fn is_retryable_status(status: u16) -> bool {
    RETRYABLE_STATUS_CODES.contains(&status)
}

/// Runs `attempt` up to `config.max_retries + 1` times. `attempt` returns
/// `Ok` on success or `Err((RestError, retryable))`; a non-retryable
/// error surfaces immediately, a retryable one backs off and tries again
/// until attempts are exhausted, at which point the *last* failure
/// surfaces unchanged.
///
/// Every sleep is a `tokio::time::sleep`, a genuine suspension point —
/// cancelling the calling task (e.g. via `tokio::select!`/`timeout`)
/// aborts the wait immediately rather than swallowing it as "retryable".
pub async fn with_retry<F, Fut, T>(config: RetryConfig, mut attempt: F) -> Result<T, RestError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, (RestError, bool)>>,
{
    let mut delay_ms = config.initial_delay_ms;
    let total_attempts = config.max_retries + 1;

    for attempt_index in 0..total_attempts {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err((err, retryable)) => {
                let is_last = attempt_index + 1 == total_attempts;
                if !retryable || is_last {
                    return Err(err);
                }
                tracing::debug!(
                    attempt = attempt_index + 1,
                    total_attempts,
                    delay_ms,
                    "retrying after transient failure: {err}"
                );
                let jitter_ms = rand::thread_rng().gen_range(0, (delay_ms / 2).max(1) + 1);
                tokio::time::sleep(Duration::from_millis(delay_ms + jitter_ms)).await;
                delay_ms = ((delay_ms as f64) * config.backoff_multiplier) as u64;
                delay_ms = delay_ms.min(config.max_delay_ms);
            },
        }
    }
    unreachable!("loop always returns within total_attempts iterations")
}
