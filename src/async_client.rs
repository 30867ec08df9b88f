//! Async wrapper around [`CovidSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while
//! the blocking upstream fetch and the CPU-bound extraction run.
//!
//! # Example
//!
//! ```no_run
//! use covid_sdk::AsyncCovidSdk;
//!
//! async fn demo() -> covid_sdk::Result<()> {
//!     let sdk = AsyncCovidSdk::builder().build().await?;
//!
//!     // Run any sync SDK method via closure
//!     let year = sdk.run(|s| s.yearly().get(Some("2021"))).await?;
//!
//!     // Convenience method for the general update
//!     let update = sdk.general_update().await?;
//!     Ok(())
//! }
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;

use crate::error::{CovidError, Result};
use crate::models::GeneralUpdate;
use crate::CovidSdk;

// ---------------------------------------------------------------------------
// AsyncCovidSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AsyncCovidSdk`] instance.
#[derive(Default)]
pub struct AsyncCovidSdkBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    today: Option<NaiveDate>,
}

impl AsyncCovidSdkBuilder {
    /// Point the SDK at a different upstream base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the HTTP request timeout for the upstream fetch.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Pin the reference date used for the current-period rules.
    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Build the async SDK. Client construction runs on the blocking pool
    /// so it won't block the event loop.
    pub async fn build(self) -> Result<AsyncCovidSdk> {
        tokio::task::spawn_blocking(move || {
            let mut builder = CovidSdk::builder();
            if let Some(base_url) = self.base_url {
                builder = builder.base_url(base_url);
            }
            if let Some(timeout) = self.timeout {
                builder = builder.timeout(timeout);
            }
            if let Some(today) = self.today {
                builder = builder.today(today);
            }
            let sdk = builder.build()?;
            Ok(AsyncCovidSdk {
                inner: Arc::new(sdk),
            })
        })
        .await
        .map_err(|e| CovidError::Internal(format!("task join error: {e}")))?
    }
}

// ---------------------------------------------------------------------------
// AsyncCovidSdk
// ---------------------------------------------------------------------------

/// Async wrapper around [`CovidSdk`].
///
/// Cheap to clone; clones share the underlying SDK.
#[derive(Clone)]
pub struct AsyncCovidSdk {
    inner: Arc<CovidSdk>,
}

impl AsyncCovidSdk {
    /// Create a new builder for configuring the async SDK.
    pub fn builder() -> AsyncCovidSdkBuilder {
        AsyncCovidSdkBuilder::default()
    }

    /// Run any sync SDK operation on the blocking thread pool.
    pub async fn run<F, R>(&self, f: F) -> Result<R>
    where
        F: FnOnce(&CovidSdk) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let sdk = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || f(&sdk))
            .await
            .map_err(|e| CovidError::Internal(format!("task join error: {e}")))?
    }

    /// Convenience wrapper for the general-update query.
    pub async fn general_update(&self) -> Result<GeneralUpdate> {
        self.run(|sdk| sdk.update().get()).await
    }
}
