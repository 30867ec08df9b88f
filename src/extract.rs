//! Series extraction: select or aggregate daily records for a resolved range.
//!
//! The series arrives sorted ascending and gap-free from the upstream
//! source, so every pass here is a single linear scan. Extraction is pure in
//! `(series, range, today)`; the reference date decides how the still-open
//! current year and month are represented.

use chrono::{Datelike, Days, NaiveDate};

use crate::error::{CovidError, Result};
use crate::models::{Series, Snapshot};
use crate::resolve::{days_in_month, ResolvedRange};

// ---------------------------------------------------------------------------
// Yearly
// ---------------------------------------------------------------------------

/// The snapshot closing a year: the record at `year-12-31`, or at yesterday
/// when the year is the current one and its Dec 31 does not exist yet.
///
/// Fails with [`CovidError::PeriodNotFound`] when the series has no record
/// at the computed cutoff.
pub fn yearly_snapshot(series: &Series, year: i32, today: NaiveDate) -> Result<Snapshot> {
    let cutoff = if year == today.year() {
        today.checked_sub_days(Days::new(1)).unwrap_or(today)
    } else {
        NaiveDate::from_ymd_opt(year, 12, 31)
            .ok_or_else(|| CovidError::PeriodNotFound(year.to_string()))?
    };
    series
        .iter()
        .find(|record| record.date == cutoff)
        .map(|record| Snapshot::of_year(year, record))
        .ok_or_else(|| CovidError::PeriodNotFound(year.to_string()))
}

/// Yearly snapshots for every year in `[since, upto]`, ascending. Years with
/// no record at their cutoff are omitted rather than failing the range; an
/// inverted range yields an empty list.
pub fn ranged_yearly(series: &Series, since: i32, upto: i32, today: NaiveDate) -> Vec<Snapshot> {
    (since..=upto)
        .filter_map(|year| yearly_snapshot(series, year, today).ok())
        .collect()
}

// ---------------------------------------------------------------------------
// Monthly
// ---------------------------------------------------------------------------

/// A record closes a month when it falls on the month's last day, or when it
/// is today's record and the month is the still-open current month.
fn closes_month(date: NaiveDate, today: NaiveDate) -> bool {
    date.day() == days_in_month(date.year(), date.month())
        || (date.year() == today.year() && date.month() == today.month() && date.day() == today.day())
}

/// One snapshot per month whose `(year, month)` falls inside the range,
/// compared lexicographically and inclusive on both ends, ascending.
///
/// Only month-closing records qualify, so each month contributes at most one
/// snapshot. An inverted range yields an empty list.
pub fn monthly_range(series: &Series, range: &ResolvedRange, today: NaiveDate) -> Vec<Snapshot> {
    let since = range.since.month_key();
    let upto = range.upto.month_key();
    series
        .iter()
        .filter(|record| closes_month(record.date, today))
        .filter(|record| {
            let key = (record.date.year(), record.date.month());
            key >= since && key <= upto
        })
        .map(|record| Snapshot::of_month(record.date.year(), record.date.month(), record))
        .collect()
}

// ---------------------------------------------------------------------------
// Daily
// ---------------------------------------------------------------------------

/// The record at exactly `(year, month, date)`, by calendar-date equality.
///
/// Fails with [`CovidError::PeriodNotFound`] when no record matches.
pub fn daily_snapshot(series: &Series, year: i32, month: u32, date: u32) -> Result<Snapshot> {
    let label = format!("{year}-{month:02}-{date:02}");
    series
        .iter()
        .find(|record| {
            record.date.year() == year && record.date.month() == month && record.date.day() == date
        })
        .map(Snapshot::of_day)
        .ok_or(CovidError::PeriodNotFound(label))
}

/// Every record in `[since, upto]`, both bounds inclusive. Used by the
/// unscoped daily range path. An unconstructible bound or an inverted range
/// yields an empty list.
pub fn daily_range(series: &Series, range: &ResolvedRange) -> Vec<Snapshot> {
    let (Some(since), Some(upto)) = (range.since.start_date(), range.upto.end_date()) else {
        return Vec::new();
    };
    series
        .iter()
        .filter(|record| record.date >= since && record.date <= upto)
        .map(Snapshot::of_day)
        .collect()
}

/// Every record in `(since, upto]`: the lower bound is exclusive, the upper
/// inclusive. This asymmetry is the contract of the year/month-scoped daily
/// paths and differs deliberately from [`daily_range`].
pub fn scoped_daily_range(series: &Series, range: &ResolvedRange) -> Vec<Snapshot> {
    let (Some(since), Some(upto)) = (range.since.start_date(), range.upto.end_date()) else {
        return Vec::new();
    };
    series
        .iter()
        .filter(|record| record.date > since && record.date <= upto)
        .map(Snapshot::of_day)
        .collect()
}
