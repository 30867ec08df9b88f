//! Yearly snapshot queries: a single year, or a since/upto span of years.

use crate::config;
use crate::error::Result;
use crate::models::Snapshot;
use crate::resolve::{self, Resolved};
use crate::{extract, CovidSdk};

/// Query interface for yearly snapshots.
pub struct YearlyQuery<'a> {
    sdk: &'a CovidSdk,
}

impl<'a> YearlyQuery<'a> {
    pub fn new(sdk: &'a CovidSdk) -> Self {
        Self { sdk }
    }

    /// Snapshot for one year. The current year is represented by yesterday's
    /// record; a year with no closing record is a not-found error.
    pub fn get(&self, year: Option<&str>) -> Result<Resolved<Snapshot>> {
        let today = self.sdk.today();
        let series = self.sdk.fetch_series()?;
        let resolved = resolve::resolve_year(year, today);
        let snapshot = extract::yearly_snapshot(&series, resolved.value, today)?;
        Ok(resolved.map(|_| snapshot))
    }

    /// Snapshots for every year in `[since, upto]`, ascending. Defaults to
    /// the full span of available data; years without a closing record are
    /// omitted.
    pub fn get_range(
        &self,
        since: Option<&str>,
        upto: Option<&str>,
    ) -> Result<Resolved<Vec<Snapshot>>> {
        let today = self.sdk.today();
        let series = self.sdk.fetch_series()?;
        let mut out = Resolved::clean(());
        let since = out.absorb(resolve::resolve_year_or(
            since,
            config::SERIES_FLOOR_YEAR,
            today,
        ));
        let upto = out.absorb(resolve::resolve_year(upto, today));
        let snapshots = extract::ranged_yearly(&series, since, upto, today);
        Ok(out.map(|()| snapshots))
    }
}
