//! The `{ ok, message, data }` envelope every endpoint answers with.
//!
//! Routing and serialization to the wire are the embedding server's job; the
//! SDK produces the envelope values so every delivery layer emits the same
//! shapes. Successful responses carry `data` and either the fixed success
//! message or the joined advisories recorded during range resolution.
//! Failures carry only `ok: false` and the error's message, with the HTTP
//! status kept out-of-band.

use serde::Serialize;

use crate::config;
use crate::error::{CovidError, Result};
use crate::resolve::Resolved;

// ---------------------------------------------------------------------------
// ApiResponse
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub ok: bool,
    pub message: String,
    #[serde(rename = "lastUpdated", skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip)]
    pub status: u16,
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful response. Advisories recorded during resolution replace
    /// the fixed success message so callers see which substitutions applied.
    pub fn success(data: T, advisories: &[String]) -> Self {
        let message = if advisories.is_empty() {
            config::SUCCESS_MESSAGE.to_string()
        } else {
            advisories.join(" ")
        };
        Self {
            ok: true,
            message,
            last_updated: None,
            data: Some(data),
            status: 200,
        }
    }

    /// Failed response: no data, the error's message, its mapped status.
    pub fn failure(err: &CovidError) -> Self {
        Self {
            ok: false,
            message: err.to_string(),
            last_updated: None,
            data: None,
            status: err.status(),
        }
    }

    /// Collapse a query outcome into the envelope.
    pub fn from_result(result: Result<Resolved<T>>) -> Self {
        match result {
            Ok(resolved) => Self::success(resolved.value, &resolved.advisories),
            Err(err) => Self::failure(&err),
        }
    }

    /// Attach the upstream publication date (general-update endpoint only).
    pub fn with_last_updated(mut self, timestamp: impl Into<String>) -> Self {
        self.last_updated = Some(timestamp.into());
        self
    }

    /// Serialize the envelope to a JSON body.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl ApiResponse<()> {
    /// The fixed payload for unmatched routes.
    pub fn invalid_endpoint() -> Self {
        Self {
            ok: false,
            message: config::INVALID_ENDPOINT_MESSAGE.to_string(),
            last_updated: None,
            data: None,
            status: 404,
        }
    }
}
