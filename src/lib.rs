//! COVID-19 SDK for Rust.
//!
//! Provides a high-level client over the Indonesian COVID-19 open API.
//! Each query fetches the current upstream snapshot (one JSON document
//! carrying the full daily series), resolves the caller's possibly partial
//! or malformed date parameters into a validated calendar range, and
//! extracts snapshots at yearly, monthly, or daily granularity.
//!
//! # Quick start
//!
//! ```no_run
//! use covid_sdk::CovidSdk;
//!
//! let sdk = CovidSdk::builder().build().unwrap();
//!
//! // Today's totals and deltas
//! let update = sdk.update().get().unwrap();
//!
//! // The 2021 year-close snapshot
//! let year = sdk.yearly().get(Some("2021")).unwrap();
//!
//! // Daily records for the first ten days of June 2022
//! let days = sdk
//!     .daily()
//!     .get_range(Some("2022.06.01"), Some("2022.06.10"))
//!     .unwrap();
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod queries;
pub mod resolve;
pub mod upstream;

#[cfg(feature = "async")]
pub use async_client::AsyncCovidSdk;
pub use error::{CovidError, Result};
pub use models::{ApiResponse, CaseCounters, DailyRecord, GeneralUpdate, Series, Snapshot};
pub use resolve::{RangeBound, Resolved, ResolvedRange};
pub use upstream::Upstream;

use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;

use crate::models::UpdateDocument;

// ---------------------------------------------------------------------------
// CovidSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`CovidSdk`] instance.
///
/// Use [`CovidSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](CovidSdkBuilder::build) to create the SDK.
pub struct CovidSdkBuilder {
    base_url: String,
    timeout: Duration,
    today: Option<NaiveDate>,
}

impl Default for CovidSdkBuilder {
    fn default() -> Self {
        Self {
            base_url: config::UPSTREAM_BASE.to_string(),
            timeout: config::DEFAULT_TIMEOUT,
            today: None,
        }
    }
}

impl CovidSdkBuilder {
    /// Point the SDK at a different upstream base URL (e.g. a mock server).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the HTTP request timeout for the upstream fetch.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Pin the reference date used for "today", "yesterday", and the
    /// current-period rules.
    ///
    /// If not set, the local calendar date is read per query. Pinning makes
    /// range resolution fully deterministic, which tests rely on.
    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Build the SDK. Constructs the HTTP client but performs no fetch;
    /// data is retrieved per query.
    pub fn build(self) -> Result<CovidSdk> {
        let upstream = Upstream::new(self.base_url, self.timeout)?;
        Ok(CovidSdk {
            upstream,
            today: self.today,
        })
    }
}

// ---------------------------------------------------------------------------
// CovidSdk
// ---------------------------------------------------------------------------

/// The main entry point for the COVID-19 SDK.
///
/// Wraps the [`Upstream`] fetch boundary and exposes one query interface per
/// endpoint family as lightweight borrowing wrappers. Holds no per-request
/// state: every query fetches its own copy of the series, so a shared SDK
/// can serve concurrent requests without coordination.
///
/// Created via [`CovidSdk::builder()`].
pub struct CovidSdk {
    upstream: Upstream,
    today: Option<NaiveDate>,
}

impl CovidSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> CovidSdkBuilder {
        CovidSdkBuilder::default()
    }

    // -- Query accessors ---------------------------------------------------

    /// Access the general-update query interface.
    pub fn update(&self) -> queries::update::UpdateQuery<'_> {
        queries::update::UpdateQuery::new(self)
    }

    /// Access the yearly snapshot query interface.
    pub fn yearly(&self) -> queries::yearly::YearlyQuery<'_> {
        queries::yearly::YearlyQuery::new(self)
    }

    /// Access the monthly snapshot query interface.
    pub fn monthly(&self) -> queries::monthly::MonthlyQuery<'_> {
        queries::monthly::MonthlyQuery::new(self)
    }

    /// Access the daily snapshot query interface.
    pub fn daily(&self) -> queries::daily::DailyQuery<'_> {
        queries::daily::DailyQuery::new(self)
    }

    // -- Shared plumbing ---------------------------------------------------

    /// The reference date for resolution: the pinned date if one was
    /// configured, otherwise the local calendar date.
    pub fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    pub(crate) fn fetch(&self) -> Result<UpdateDocument> {
        self.upstream.fetch_update()
    }

    pub(crate) fn fetch_series(&self) -> Result<Series> {
        Ok(self.fetch()?.series())
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for CovidSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CovidSdk(base_url={})", self.upstream.base_url())
    }
}
