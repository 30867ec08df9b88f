//! Shared fixtures for the covid-sdk integration tests.
//!
//! Provides a deterministic daily series (counters derived from the day's
//! index so expected values are easy to compute in assertions), the same
//! series rendered as an upstream `update.json` document for `httpmock`,
//! and an SDK constructor pinned to a fixed reference date.

#![allow(dead_code)]

use chrono::NaiveDate;
use covid_sdk::{CovidSdk, DailyRecord, Series};
use httpmock::prelude::*;
use serde_json::{json, Value};

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// The record for day `index` of the sample series: positive = 100 + 3i,
/// recovered = 40 + 2i, deaths = 10 + i, active = positive - recovered - deaths.
pub fn record_at(day: NaiveDate, index: u64) -> DailyRecord {
    let positive = 100 + 3 * index;
    let recovered = 40 + 2 * index;
    let deaths = 10 + index;
    DailyRecord {
        date: day,
        positive,
        recovered,
        deaths,
        active: positive - recovered - deaths,
    }
}

/// One record per day from `start` through `end`, inclusive.
pub fn sample_series(start: &str, end: &str) -> Series {
    let mut out = Vec::new();
    let mut day = date(start);
    let end = date(end);
    let mut index = 0u64;
    while day <= end {
        out.push(record_at(day, index));
        day = day.succ_opt().unwrap();
        index += 1;
    }
    out
}

/// Find the sample-series record for a given day.
pub fn record_for(series: &Series, day: &str) -> DailyRecord {
    let day = date(day);
    *series.iter().find(|r| r.date == day).unwrap()
}

/// Render a sample series as the upstream `update.json` document.
pub fn update_document(start: &str, end: &str) -> Value {
    let series = sample_series(start, end);
    let last = series.last().unwrap();
    let harian: Vec<Value> = series
        .iter()
        .map(|r| {
            json!({
                "key_as_string": format!("{}T00:00:00.000Z", r.date),
                "key": 0,
                "doc_count": 1,
                "jumlah_positif": { "value": 3.0 },
                "jumlah_sembuh": { "value": 2.0 },
                "jumlah_meninggal": { "value": 1.0 },
                "jumlah_dirawat": { "value": 0.0 },
                "jumlah_positif_kum": { "value": r.positive as f64 },
                "jumlah_sembuh_kum": { "value": r.recovered as f64 },
                "jumlah_meninggal_kum": { "value": r.deaths as f64 },
                "jumlah_dirawat_kum": { "value": r.active as f64 },
            })
        })
        .collect();
    json!({
        "update": {
            "penambahan": {
                "jumlah_positif": 3,
                "jumlah_sembuh": 2,
                "jumlah_meninggal": 1,
                "jumlah_dirawat": 0,
                "tanggal": last.date.format("%Y-%m-%d").to_string(),
                "created": format!("{}T17:00:00.000Z", last.date),
            },
            "total": {
                "jumlah_positif": last.positive,
                "jumlah_sembuh": last.recovered,
                "jumlah_meninggal": last.deaths,
                "jumlah_dirawat": last.active,
            },
            "harian": harian,
        }
    })
}

/// Mock the upstream `update.json` endpoint with the given document.
pub fn mock_upstream(server: &MockServer, document: Value) {
    server.mock(|when, then| {
        when.method(GET).path("/update.json");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(document);
    });
}

/// An SDK pointed at the mock server, pinned to `today`.
pub fn sdk_for(server: &MockServer, today: &str) -> CovidSdk {
    CovidSdk::builder()
        .base_url(server.base_url())
        .today(date(today))
        .build()
        .unwrap()
}
