//! Range resolution: raw caller parameters → validated calendar ranges.
//!
//! Callers may omit parameters, send garbage, or ask for periods outside the
//! available data. Resolution never fails: every input degrades to a
//! documented default or clamp, and each substitution records a
//! human-readable advisory that travels with the value instead of being
//! written into shared mutable state. The advisories end up in the response
//! message so callers can see how their request was interpreted.
//!
//! All functions here are pure in `(raw input, today)`; the reference date is
//! injected so resolution is deterministic under test.

use chrono::{Datelike, NaiveDate};

use crate::config;

// ---------------------------------------------------------------------------
// Resolved — a value plus the advisories produced while resolving it
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    pub value: T,
    pub advisories: Vec<String>,
}

impl<T> Resolved<T> {
    /// A value that resolved without any substitution.
    pub fn clean(value: T) -> Self {
        Self {
            value,
            advisories: Vec::new(),
        }
    }

    /// A value that resolved with a single advisory.
    pub fn with(value: T, advisory: impl Into<String>) -> Self {
        let mut resolved = Self::clean(value);
        resolved.advise(advisory);
        resolved
    }

    /// Record an advisory against this value.
    pub fn advise(&mut self, advisory: impl Into<String>) {
        let advisory = advisory.into();
        tracing::debug!(advisory = %advisory, "range resolution advisory");
        self.advisories.push(advisory);
    }

    /// Fold another resolved value into this one, keeping its advisories.
    pub fn absorb<U>(&mut self, other: Resolved<U>) -> U {
        self.advisories.extend(other.advisories);
        other.value
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Resolved<U> {
        Resolved {
            value: f(self.value),
            advisories: self.advisories,
        }
    }
}

// ---------------------------------------------------------------------------
// Range types
// ---------------------------------------------------------------------------

/// One side of a resolved range. `date` is present only for daily queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeBound {
    pub year: i32,
    pub month: u32,
    pub date: Option<u32>,
}

impl RangeBound {
    pub fn ym(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            date: None,
        }
    }

    pub fn ymd(year: i32, month: u32, date: u32) -> Self {
        Self {
            year,
            month,
            date: Some(date),
        }
    }

    /// Lexicographic key for `(year, month)` comparisons.
    pub fn month_key(&self) -> (i32, u32) {
        (self.year, self.month)
    }

    /// This bound as a calendar date, defaulting a missing day to the 1st.
    /// `None` when the fields do not form a real date.
    pub fn start_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.date.unwrap_or(1))
    }

    /// This bound as a calendar date, defaulting a missing day to the last
    /// day of the month.
    pub fn end_date(&self) -> Option<NaiveDate> {
        let day = self
            .date
            .unwrap_or_else(|| days_in_month(self.year, self.month));
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }
}

/// A closed query interval. `since <= upto` is not guaranteed; the extractor
/// compares per-record and an inverted interval selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRange {
    pub since: RangeBound,
    pub upto: RangeBound,
}

// ---------------------------------------------------------------------------
// Calendar helpers
// ---------------------------------------------------------------------------

/// Number of days in `(year, month)`; 31 for a month outside `[1, 12]`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    if !(1..=12).contains(&month) {
        return 31;
    }
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

// ---------------------------------------------------------------------------
// Single-field resolution
// ---------------------------------------------------------------------------

/// Clamp an already-numeric year into `[2020, current year]`.
fn clamp_year(year: i32, today: NaiveDate) -> Resolved<i32> {
    if year < config::SERIES_FLOOR_YEAR {
        Resolved::with(
            config::SERIES_FLOOR_YEAR,
            format!(
                "There is no data before {floor}; showing {floor} instead.",
                floor = config::SERIES_FLOOR_YEAR
            ),
        )
    } else if year > today.year() {
        Resolved::with(
            today.year(),
            "Cannot predict the future; showing the current year instead.",
        )
    } else {
        Resolved::clean(year)
    }
}

/// Resolve a raw year parameter, falling back to `default` when the
/// parameter is absent or not a number, then clamping into
/// `[2020, current year]`.
pub fn resolve_year_or(raw: Option<&str>, default: i32, today: NaiveDate) -> Resolved<i32> {
    let mut out = Resolved::clean(());
    let year = match raw {
        None => default,
        Some(token) => match token.trim().parse::<i32>() {
            Ok(y) => y,
            Err(_) => {
                out.advise(format!(
                    "Queried year is not a valid number; showing data for {default} instead."
                ));
                default
            }
        },
    };
    let clamped = out.absorb(clamp_year(year, today));
    out.map(|()| clamped)
}

/// Resolve a raw year parameter with the current year as the fallback.
pub fn resolve_year(raw: Option<&str>, today: NaiveDate) -> Resolved<i32> {
    resolve_year_or(raw, today.year(), today)
}

/// Resolve a raw month parameter. Anything absent, unparseable, or outside
/// `[1, 12]` becomes the current month.
pub fn resolve_month(raw: Option<&str>, today: NaiveDate) -> Resolved<u32> {
    match raw {
        None => Resolved::clean(today.month()),
        Some(token) => match token.trim().parse::<i64>() {
            Ok(m) if (1..=12).contains(&m) => Resolved::clean(m as u32),
            _ => Resolved::with(
                today.month(),
                "Queried month is invalid; showing the current month instead.",
            ),
        },
    }
}

/// Resolve a raw day-of-month parameter against the month's length.
/// Anything absent, unparseable, or outside `[1, max_date]` becomes 1.
pub fn resolve_date(raw: Option<&str>, max_date: u32) -> Resolved<u32> {
    match raw {
        None => Resolved::clean(1),
        Some(token) => match token.trim().parse::<i64>() {
            Ok(d) if d >= 1 && d <= i64::from(max_date) => Resolved::clean(d as u32),
            _ => Resolved::with(
                1,
                "Queried date is invalid for that month; showing the 1st instead.",
            ),
        },
    }
}

// ---------------------------------------------------------------------------
// Compound tokens ("YYYY.MM" and "YYYY.MM.DD")
// ---------------------------------------------------------------------------

/// Parse a dot-separated `"YYYY.MM"` token. The month is returned unchecked
/// so callers apply their own bound policy.
fn parse_year_month(token: &str) -> Option<(i32, i64)> {
    let mut parts = token.split('.');
    let year = parts.next()?.trim().parse::<i32>().ok()?;
    let month = parts.next()?.trim().parse::<i64>().ok()?;
    Some((year, month))
}

/// Parse a dot-separated `"YYYY.MM.DD"` token. A token shorter than the ten
/// characters a fully-qualified date needs is rejected outright rather than
/// partially applied.
fn parse_year_month_date(token: &str) -> Option<(i32, i64, i64)> {
    if token.len() < 10 {
        return None;
    }
    let mut parts = token.split('.');
    let year = parts.next()?.trim().parse::<i32>().ok()?;
    let month = parts.next()?.trim().parse::<i64>().ok()?;
    let date = parts.next()?.trim().parse::<i64>().ok()?;
    Some((year, month, date))
}

// ---------------------------------------------------------------------------
// Monthly ranges
// ---------------------------------------------------------------------------

/// Resolve an unscoped monthly range from raw `since`/`upto` tokens.
///
/// Defaults to March 2020 (the first month with data) through the current
/// month. A `since` year outside `[2020, current year]` resets the whole
/// since pair to the default, not just the year; the same applies to an
/// `upto` year outside `[2000, current year]`. Months then clamp
/// independently to 1 (since) or 12 (upto).
pub fn resolve_monthly_range(
    since: Option<&str>,
    upto: Option<&str>,
    today: NaiveDate,
) -> Resolved<ResolvedRange> {
    let default_since = (config::SERIES_FLOOR_YEAR, i64::from(config::DEFAULT_SINCE_MONTH));
    let default_upto = (today.year(), i64::from(today.month()));
    let mut out = Resolved::clean(());

    let (mut since_year, mut since_month) = match since {
        None => default_since,
        Some(token) => match parse_year_month(token) {
            Some(pair) => pair,
            None => {
                out.advise("Could not read the 'since' parameter; using the default range start.");
                default_since
            }
        },
    };
    let (mut upto_year, mut upto_month) = match upto {
        None => default_upto,
        Some(token) => match parse_year_month(token) {
            Some(pair) => pair,
            None => {
                out.advise("Could not read the 'upto' parameter; using the default range end.");
                default_upto
            }
        },
    };

    // A bad year invalidates the whole pair, so the two fields never drift
    // apart under partial resets.
    if since_year < config::SERIES_FLOOR_YEAR || since_year > today.year() {
        out.advise("The 'since' year is outside the available data; using the default range start.");
        (since_year, since_month) = default_since;
    }
    if upto_year < config::UPTO_FLOOR_YEAR || upto_year > today.year() {
        out.advise("The 'upto' year is outside the available data; using the default range end.");
        (upto_year, upto_month) = default_upto;
    }
    if !(1..=12).contains(&since_month) {
        out.advise("The 'since' month is out of range; defaulting to January.");
        since_month = 1;
    }
    if !(1..=12).contains(&upto_month) {
        out.advise("The 'upto' month is out of range; defaulting to December.");
        upto_month = 12;
    }

    out.map(|()| ResolvedRange {
        since: RangeBound::ym(since_year, since_month as u32),
        upto: RangeBound::ym(upto_year, upto_month as u32),
    })
}

/// Resolve a monthly range constrained by a year path scope.
///
/// The path year wins every conflict: if either token names a different
/// year, the range collapses to the full path year. Parsed months pass
/// through a disjunctive validity check (`m >= 1 || m <= 12`), so any
/// numeric month is accepted as-is; an out-of-range month simply selects no
/// records.
pub fn resolve_year_scoped_monthly_range(
    year: Option<&str>,
    since: Option<&str>,
    upto: Option<&str>,
    today: NaiveDate,
) -> Resolved<ResolvedRange> {
    let resolved_year = resolve_year(year, today);
    let scope_year = resolved_year.value;
    let mut out = resolved_year.map(|_| ());

    let mut conflict = false;
    let mut side = |token: Option<&str>, name: &str, fallback: i64, out: &mut Resolved<()>| -> i64 {
        match token {
            None => fallback,
            Some(raw) => match parse_year_month(raw) {
                None => {
                    out.advise(format!(
                        "Could not read the '{name}' parameter; using the default for this year."
                    ));
                    fallback
                }
                Some((token_year, month)) => {
                    if token_year != scope_year {
                        conflict = true;
                        fallback
                    } else if month >= 1 || month <= 12 {
                        month
                    } else {
                        fallback
                    }
                }
            },
        }
    };

    let mut since_month = side(since, "since", 1, &mut out);
    let mut upto_month = side(upto, "upto", 12, &mut out);

    if conflict {
        out.advise(format!(
            "Query range does not match the requested year; showing all of {scope_year} instead."
        ));
        since_month = 1;
        upto_month = 12;
    }

    out.map(|()| ResolvedRange {
        since: RangeBound::ym(scope_year, since_month.clamp(0, i64::from(u32::MAX)) as u32),
        upto: RangeBound::ym(scope_year, upto_month.clamp(0, i64::from(u32::MAX)) as u32),
    })
}

// ---------------------------------------------------------------------------
// Daily ranges
// ---------------------------------------------------------------------------

/// Resolve one side of a daily range from a `"YYYY.MM.DD"` token.
///
/// A token that fails to parse into all three fields falls back to the
/// side's default triple in full; parsed fields are never partially applied.
/// Otherwise each field resolves independently (year clamped, month
/// defaulting to `month_fallback`, date defaulting to 1), and if the
/// resolved fields still fail to form a real calendar date the whole triple
/// is discarded for the default.
fn resolve_daily_bound(
    name: &str,
    token: Option<&str>,
    default: RangeBound,
    month_fallback: u32,
    today: NaiveDate,
) -> Resolved<RangeBound> {
    let Some(raw) = token else {
        return Resolved::clean(default);
    };
    let Some((year, month, date)) = parse_year_month_date(raw) else {
        return Resolved::with(
            default,
            format!("Could not read the '{name}' date; using the default."),
        );
    };

    let mut out = Resolved::clean(());
    let year = out.absorb(clamp_year(year, today));
    let month = if (1..=12).contains(&month) {
        month as u32
    } else {
        out.advise(format!(
            "The '{name}' month is out of range; defaulting to {month_fallback}."
        ));
        month_fallback
    };
    let max_date = days_in_month(year, month);
    let date = if date >= 1 && date <= i64::from(max_date) {
        date as u32
    } else {
        out.advise(format!("The '{name}' date is out of range; defaulting to 1."));
        1
    };

    if NaiveDate::from_ymd_opt(year, month, date).is_none() {
        out.advise(format!(
            "The '{name}' fields do not form a valid date; using the default."
        ));
        return out.map(|()| default);
    }
    out.map(|()| RangeBound::ymd(year, month, date))
}

/// Resolve an unscoped daily range from raw `since`/`upto` tokens and the
/// caller-supplied default triples.
pub fn resolve_daily_range(
    since: Option<&str>,
    upto: Option<&str>,
    default_since: RangeBound,
    default_upto: RangeBound,
    today: NaiveDate,
) -> Resolved<ResolvedRange> {
    let mut out = Resolved::clean(());
    let since = out.absorb(resolve_daily_bound("since", since, default_since, 1, today));
    let upto = out.absorb(resolve_daily_bound("upto", upto, default_upto, 12, today));
    out.map(|()| ResolvedRange { since, upto })
}

/// Resolve a daily range under a year (and optionally month) path scope.
///
/// Defaults span the whole scoped period. A token that resolves outside the
/// scope is replaced by the side's default; the path scope wins, matching
/// the precedence rule of the monthly path.
pub fn resolve_scoped_daily_range(
    scope_year: i32,
    scope_month: Option<u32>,
    since: Option<&str>,
    upto: Option<&str>,
    today: NaiveDate,
) -> Resolved<ResolvedRange> {
    let since_month = scope_month.unwrap_or(1);
    let upto_month = scope_month.unwrap_or(12);
    let default_since = RangeBound::ymd(scope_year, since_month, 1);
    let default_upto = RangeBound::ymd(
        scope_year,
        upto_month,
        days_in_month(scope_year, upto_month),
    );

    let mut out = Resolved::clean(());
    let mut since = out.absorb(resolve_daily_bound("since", since, default_since, since_month, today));
    let mut upto = out.absorb(resolve_daily_bound("upto", upto, default_upto, upto_month, today));

    if since.year != scope_year || scope_month.is_some_and(|m| since.month != m) {
        out.advise("The 'since' date is outside the requested period; using the default.");
        since = default_since;
    }
    if upto.year != scope_year || scope_month.is_some_and(|m| upto.month != m) {
        out.advise("The 'upto' date is outside the requested period; using the default.");
        upto = default_upto;
    }

    out.map(|()| ResolvedRange { since, upto })
}
