//! End-to-end query tests against a mocked upstream endpoint.
//!
//! The fixture series runs from 2020-01-01 through 2022-06-10 and "today" is
//! pinned to 2022-06-11, so 2022 is the open current year and 2022-06-10 is
//! its most recent fully-closed day.

mod common;

use common::{mock_upstream, record_for, sample_series, sdk_for, update_document};
use covid_sdk::{CovidError, CovidSdk};
use httpmock::prelude::*;

const START: &str = "2020-01-01";
const END: &str = "2022-06-10";
const TODAY: &str = "2022-06-11";

fn sdk(server: &MockServer) -> CovidSdk {
    mock_upstream(server, update_document(START, END));
    sdk_for(server, TODAY)
}

// ---------------------------------------------------------------------------
// General update
// ---------------------------------------------------------------------------

#[test]
fn general_update_carries_totals_and_deltas() {
    let server = MockServer::start();
    let sdk = sdk(&server);
    let series = sample_series(START, END);
    let last = series.last().unwrap();

    let update = sdk.update().get().unwrap();
    assert_eq!(update.last_updated, END);
    assert_eq!(update.counters.total_positive, last.positive);
    assert_eq!(update.counters.total_recovered, last.recovered);
    assert_eq!(update.counters.total_deaths, last.deaths);
    assert_eq!(update.counters.new_positive, 3);
    assert_eq!(update.counters.new_active, 0);
}

// ---------------------------------------------------------------------------
// Yearly
// ---------------------------------------------------------------------------

#[test]
fn yearly_closed_year_returns_its_dec_31_snapshot() {
    let server = MockServer::start();
    let sdk = sdk(&server);
    let series = sample_series(START, END);

    let resolved = sdk.yearly().get(Some("2020")).unwrap();
    let expected = record_for(&series, "2020-12-31");
    assert_eq!(resolved.value.period, "2020");
    assert_eq!(resolved.value.positive, expected.positive);
    assert!(resolved.advisories.is_empty());
}

#[test]
fn yearly_current_year_returns_yesterday() {
    let server = MockServer::start();
    let sdk = sdk(&server);
    let series = sample_series(START, END);

    let resolved = sdk.yearly().get(Some("2022")).unwrap();
    let expected = record_for(&series, "2022-06-10");
    assert_eq!(resolved.value.period, "2022");
    assert_eq!(resolved.value.positive, expected.positive);
}

#[test]
fn yearly_clamps_early_years_and_says_so() {
    let server = MockServer::start();
    let sdk = sdk(&server);

    let resolved = sdk.yearly().get(Some("1999")).unwrap();
    assert_eq!(resolved.value.period, "2020");
    assert_eq!(resolved.advisories.len(), 1);
}

#[test]
fn yearly_range_defaults_to_every_available_year() {
    let server = MockServer::start();
    let sdk = sdk(&server);

    let resolved = sdk.yearly().get_range(None, None).unwrap();
    let periods: Vec<&str> = resolved.value.iter().map(|s| s.period.as_str()).collect();
    assert_eq!(periods, ["2020", "2021", "2022"]);
}

// ---------------------------------------------------------------------------
// Monthly
// ---------------------------------------------------------------------------

#[test]
fn monthly_default_range_spans_march_2020_through_last_closed_month() {
    let server = MockServer::start();
    let sdk = sdk(&server);

    let resolved = sdk.monthly().get_range(None, None).unwrap();
    // 2020: Mar..Dec, 2021: all, 2022: Jan..May. June 2022 has no month-end
    // record yet and its latest record is yesterday's, not today's.
    assert_eq!(resolved.value.len(), 10 + 12 + 5);
    assert_eq!(resolved.value.first().unwrap().period, "2020-03");
    assert_eq!(resolved.value.last().unwrap().period, "2022-05");
}

#[test]
fn monthly_in_year_returns_twelve_months_for_a_closed_year() {
    let server = MockServer::start();
    let sdk = sdk(&server);

    let resolved = sdk.monthly().get_in_year(Some("2021"), None, None).unwrap();
    assert_eq!(resolved.value.len(), 12);
    assert_eq!(resolved.value[0].period, "2021-01");
    assert_eq!(resolved.value[11].period, "2021-12");
}

#[test]
fn monthly_scope_conflict_collapses_to_the_path_year() {
    let server = MockServer::start();
    let sdk = sdk(&server);

    let resolved = sdk
        .monthly()
        .get_in_year(Some("2021"), Some("2020.05"), None)
        .unwrap();
    assert_eq!(resolved.value.len(), 12);
    assert!(!resolved.advisories.is_empty());
}

#[test]
fn monthly_single_month_uses_todays_record_for_the_open_month() {
    let server = MockServer::start();
    mock_upstream(&server, update_document(START, END));
    // Pin today to the series' last day so June's open month is represented.
    let sdk = sdk_for(&server, "2022-06-10");
    let series = sample_series(START, END);

    let resolved = sdk.monthly().get_month(Some("2022"), Some("6")).unwrap();
    let expected = record_for(&series, "2022-06-10");
    assert_eq!(resolved.value.len(), 1);
    assert_eq!(resolved.value[0].period, "2022-06");
    assert_eq!(resolved.value[0].positive, expected.positive);
}

#[test]
fn monthly_single_month_is_empty_when_nothing_qualifies() {
    let server = MockServer::start();
    let sdk = sdk(&server);

    // Today is 06-11 but the series ends 06-10, so June has no qualifying day.
    let resolved = sdk.monthly().get_month(Some("2022"), Some("6")).unwrap();
    assert!(resolved.value.is_empty());
}

// ---------------------------------------------------------------------------
// Daily
// ---------------------------------------------------------------------------

#[test]
fn unscoped_daily_range_is_inclusive_on_both_ends() {
    let server = MockServer::start();
    let sdk = sdk(&server);

    let resolved = sdk
        .daily()
        .get_range(Some("2022.06.01"), Some("2022.06.10"))
        .unwrap();
    assert_eq!(resolved.value.len(), 10);
    assert_eq!(resolved.value[0].period, "2022-06-01");
}

#[test]
fn year_scoped_daily_range_excludes_its_lower_bound() {
    let server = MockServer::start();
    let sdk = sdk(&server);

    let resolved = sdk
        .daily()
        .get_in_year(Some("2022"), Some("2022.06.01"), Some("2022.06.10"))
        .unwrap();
    assert_eq!(resolved.value.len(), 9);
    assert_eq!(resolved.value[0].period, "2022-06-02");
}

#[test]
fn month_scoped_daily_range_defaults_to_the_whole_month() {
    let server = MockServer::start();
    let sdk = sdk(&server);

    let resolved = sdk
        .daily()
        .get_in_month(Some("2021"), Some("2"), None, None)
        .unwrap();
    // Since defaults to Feb 1 and is exclusive; Feb 2021 has 28 days.
    assert_eq!(resolved.value.len(), 27);
    assert_eq!(resolved.value[0].period, "2021-02-02");
}

#[test]
fn single_day_lookup_matches_exactly_or_fails() {
    let server = MockServer::start();
    let sdk = sdk(&server);
    let series = sample_series(START, END);

    let resolved = sdk
        .daily()
        .get_day(Some("2021"), Some("6"), Some("15"))
        .unwrap();
    let expected = record_for(&series, "2021-06-15");
    assert_eq!(resolved.value.period, "2021-06-15");
    assert_eq!(resolved.value.deaths, expected.deaths);

    let err = sdk
        .daily()
        .get_day(Some("2022"), Some("6"), Some("11"))
        .unwrap_err();
    assert!(matches!(err, CovidError::PeriodNotFound(_)));
    assert_eq!(err.status(), 404);
}

// ---------------------------------------------------------------------------
// Upstream failure
// ---------------------------------------------------------------------------

#[test]
fn upstream_failure_maps_to_service_unavailable() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/update.json");
        then.status(500);
    });
    let sdk = sdk_for(&server, TODAY);

    let err = sdk.update().get().unwrap_err();
    assert!(matches!(err, CovidError::UpstreamUnavailable));
    assert_eq!(err.status(), 503);
    assert_eq!(
        err.to_string(),
        "Service unavailable due to 3rd party API error."
    );
}
