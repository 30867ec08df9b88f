//! The external fetch boundary: one GET of the upstream `update.json`.
//!
//! Every query performs its own fetch; nothing is cached across requests.
//! Any transport failure, non-success status, or undecodable body collapses
//! into [`CovidError::UpstreamUnavailable`] and is never retried here.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::config;
use crate::error::{CovidError, Result};
use crate::models::UpdateDocument;

/// HTTP client bound to one upstream base URL.
pub struct Upstream {
    client: Client,
    base_url: String,
}

impl Upstream {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch and decode the current upstream snapshot.
    pub(crate) fn fetch_update(&self) -> Result<UpdateDocument> {
        let url = format!("{}{}", self.base_url, config::UPDATE_PATH);
        tracing::debug!(%url, "fetching upstream daily series");

        let response = self.client.get(&url).send().map_err(|err| {
            tracing::warn!(error = %err, "upstream fetch failed");
            CovidError::UpstreamUnavailable
        })?;
        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "upstream returned non-success");
            return Err(CovidError::UpstreamUnavailable);
        }
        response.json::<UpdateDocument>().map_err(|err| {
            tracing::warn!(error = %err, "upstream payload failed to decode");
            CovidError::UpstreamUnavailable
        })
    }
}
