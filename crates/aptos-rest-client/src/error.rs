// Copyright (c) Aptos Foundation
// SPDX-License-Identifier: Apache-2.0

//! The transport's error surface: every HTTP/JSON/timeout
//! failure funnels through [`RestError::Api`], carrying the node's own
//! error body plus the HTTP status so callers can branch on
//! `error_code` without re-parsing anything.

use serde::Deserialize;

/// The JSON error body every Aptos node endpoint returns on failure:
/// `{ message, error_code?, vm_error_code? }`.
#[derive(Clone, Debug, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    pub error_code: Option<String>,
    pub vm_error_code: Option<i64>,
}

#[derive(Clone, Debug, thiserror::Error)]
pub enum RestError {
    #[error("API error ({status_code}): {message}{}", error_code.as_ref().map(|c| format!(" [{c}]")).unwrap_or_default())]
    Api {
        message: String,
        status_code: u16,
        error_code: Option<String>,
    },
    #[error("request timed out after {0}ms")]
    Timeout(u64),
    #[error("BCS encode/decode error: {0}")]
    Bcs(#[from] aptos_bcs::Error),
    #[error("on-chain type error: {0}")]
    Types(#[from] aptos_types::Error),
    #[error("request failed before a response was received: {0}")]
    Transport(String),
}

impl RestError {
    pub fn api(status_code: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorResponse>(body) {
            Ok(parsed) => RestError::Api {
                message: parsed.message,
                status_code,
                error_code: parsed.error_code,
            },
            Err(_) => RestError::Api {
                message: body.to_string(),
                status_code,
                error_code: None,
            },
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            RestError::Api { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    pub fn error_code(&self) -> Option<&str> {
        match self {
            RestError::Api { error_code, .. } => error_code.as_deref(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, RestError>;

/// Maps a Move abort category (1..12) to a human string.
/// Unknown codes return `"unknown"` rather than failing — this helper
/// annotates errors, it does not validate them.
pub fn abort_category(category: u64) -> &'static str {
    match category {
        1 => "Invalid argument",
        2 => "Out of range",
        3 => "Invalid state",
        4 => "Requires address",
        5 => "Not found",
        6 => "Aborted",
        7 => "Already exists",
        8 => "Resource exhausted",
        9 => "Internal",
        10 => "Not implemented",
        11 => "Unavailable",
        12 => "Permission denied",
        _ => "unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abort_category_maps_documented_range() {
        assert_eq!(abort_category(1), "Invalid argument");
        assert_eq!(abort_category(12), "Permission denied");
        assert_eq!(abort_category(0), "unknown");
        assert_eq!(abort_category(13), "unknown");
    }

    #[test]
    fn api_error_parses_known_body() {
        let body = r#"{"message":"sequence number too old","error_code":"sequence_number_too_old"}"#;
        let err = RestError::api(400, body);
        assert_eq!(err.status_code(), Some(400));
        assert_eq!(err.error_code(), Some("sequence_number_too_old"));
    }

    #[test]
    fn api_error_falls_back_to_raw_body_when_not_json() {
        let err = RestError::api(500, "internal server error");
        assert_eq!(err.status_code(), Some(500));
        assert_eq!(err.error_code(), None);
    }
}
