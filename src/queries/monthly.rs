//! Monthly snapshot queries, optionally scoped to a path year or year+month.

use crate::error::Result;
use crate::models::Snapshot;
use crate::resolve::{self, RangeBound, Resolved, ResolvedRange};
use crate::{extract, CovidSdk};

/// Query interface for monthly snapshots.
pub struct MonthlyQuery<'a> {
    sdk: &'a CovidSdk,
}

impl<'a> MonthlyQuery<'a> {
    pub fn new(sdk: &'a CovidSdk) -> Self {
        Self { sdk }
    }

    /// Month-close snapshots for every month in the resolved since/upto
    /// range, defaulting to March 2020 through the current month.
    pub fn get_range(
        &self,
        since: Option<&str>,
        upto: Option<&str>,
    ) -> Result<Resolved<Vec<Snapshot>>> {
        let today = self.sdk.today();
        let series = self.sdk.fetch_series()?;
        let range = resolve::resolve_monthly_range(since, upto, today);
        let snapshots = extract::monthly_range(&series, &range.value, today);
        Ok(range.map(|_| snapshots))
    }

    /// Month-close snapshots within one path year. Since/upto tokens naming
    /// a different year lose to the path year and the range collapses to the
    /// full year.
    pub fn get_in_year(
        &self,
        year: Option<&str>,
        since: Option<&str>,
        upto: Option<&str>,
    ) -> Result<Resolved<Vec<Snapshot>>> {
        let today = self.sdk.today();
        let series = self.sdk.fetch_series()?;
        let range = resolve::resolve_year_scoped_monthly_range(year, since, upto, today);
        let snapshots = extract::monthly_range(&series, &range.value, today);
        Ok(range.map(|_| snapshots))
    }

    /// The month-close snapshot for one path year+month. Resolves like the
    /// single-value queries (invalid month falls back to the current month)
    /// and yields zero or one snapshot.
    pub fn get_month(
        &self,
        year: Option<&str>,
        month: Option<&str>,
    ) -> Result<Resolved<Vec<Snapshot>>> {
        let today = self.sdk.today();
        let series = self.sdk.fetch_series()?;
        let mut out = Resolved::clean(());
        let year = out.absorb(resolve::resolve_year(year, today));
        let month = out.absorb(resolve::resolve_month(month, today));
        let range = ResolvedRange {
            since: RangeBound::ym(year, month),
            upto: RangeBound::ym(year, month),
        };
        let snapshots = extract::monthly_range(&series, &range, today);
        Ok(out.map(|()| snapshots))
    }
}
