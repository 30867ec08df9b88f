//! Daily snapshot queries: unscoped ranges, path-scoped ranges, and single
//! day lookups.
//!
//! Bound policy differs between the two range paths and both are part of
//! the contract: the unscoped range includes both endpoints, while a range
//! under a year or year+month path scope excludes its lower endpoint and
//! includes the upper.

use chrono::Datelike;

use crate::config;
use crate::error::Result;
use crate::models::Snapshot;
use crate::resolve::{self, days_in_month, RangeBound, Resolved};
use crate::{extract, CovidSdk};

/// Query interface for daily snapshots.
pub struct DailyQuery<'a> {
    sdk: &'a CovidSdk,
}

impl<'a> DailyQuery<'a> {
    pub fn new(sdk: &'a CovidSdk) -> Self {
        Self { sdk }
    }

    /// Every record in the resolved since/upto range, both bounds inclusive.
    /// Defaults to the first day of data through today.
    pub fn get_range(
        &self,
        since: Option<&str>,
        upto: Option<&str>,
    ) -> Result<Resolved<Vec<Snapshot>>> {
        let today = self.sdk.today();
        let series = self.sdk.fetch_series()?;
        let default_since =
            RangeBound::ymd(config::SERIES_FLOOR_YEAR, config::DEFAULT_SINCE_MONTH, 1);
        let default_upto = RangeBound::ymd(today.year(), today.month(), today.day());
        let range = resolve::resolve_daily_range(since, upto, default_since, default_upto, today);
        let snapshots = extract::daily_range(&series, &range.value);
        Ok(range.map(|_| snapshots))
    }

    /// Records within one path year, since-exclusive and upto-inclusive.
    /// Defaults span the whole year; tokens outside it lose to the scope.
    pub fn get_in_year(
        &self,
        year: Option<&str>,
        since: Option<&str>,
        upto: Option<&str>,
    ) -> Result<Resolved<Vec<Snapshot>>> {
        let today = self.sdk.today();
        let series = self.sdk.fetch_series()?;
        let mut out = Resolved::clean(());
        let year = out.absorb(resolve::resolve_year(year, today));
        let range = out.absorb(resolve::resolve_scoped_daily_range(
            year, None, since, upto, today,
        ));
        let snapshots = extract::scoped_daily_range(&series, &range);
        Ok(out.map(|()| snapshots))
    }

    /// Records within one path year+month, since-exclusive and
    /// upto-inclusive.
    pub fn get_in_month(
        &self,
        year: Option<&str>,
        month: Option<&str>,
        since: Option<&str>,
        upto: Option<&str>,
    ) -> Result<Resolved<Vec<Snapshot>>> {
        let today = self.sdk.today();
        let series = self.sdk.fetch_series()?;
        let mut out = Resolved::clean(());
        let year = out.absorb(resolve::resolve_year(year, today));
        let month = out.absorb(resolve::resolve_month(month, today));
        let range = out.absorb(resolve::resolve_scoped_daily_range(
            year,
            Some(month),
            since,
            upto,
            today,
        ));
        let snapshots = extract::scoped_daily_range(&series, &range);
        Ok(out.map(|()| snapshots))
    }

    /// The single record at one path year+month+date, by exact calendar-date
    /// equality. A missing record is a not-found error.
    pub fn get_day(
        &self,
        year: Option<&str>,
        month: Option<&str>,
        date: Option<&str>,
    ) -> Result<Resolved<Snapshot>> {
        let today = self.sdk.today();
        let series = self.sdk.fetch_series()?;
        let mut out = Resolved::clean(());
        let year = out.absorb(resolve::resolve_year(year, today));
        let month = out.absorb(resolve::resolve_month(month, today));
        let date = out.absorb(resolve::resolve_date(date, days_in_month(year, month)));
        let snapshot = extract::daily_snapshot(&series, year, month, date)?;
        Ok(out.map(|()| snapshot))
    }
}
