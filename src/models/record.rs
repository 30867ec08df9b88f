use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DailyRecord / Series — the in-memory daily series
// ---------------------------------------------------------------------------

/// One day of the upstream series: cumulative counters as of midnight UTC.
///
/// Records are immutable once fetched and live only for the duration of a
/// single query; the SDK never caches a series across requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub positive: u64,
    pub recovered: u64,
    pub deaths: u64,
    pub active: u64,
}

/// The full daily series, one record per calendar day, ascending by date.
///
/// The upstream source emits it sorted and gap-free; the extractor relies on
/// that and never re-sorts.
pub type Series = Vec<DailyRecord>;

// ---------------------------------------------------------------------------
// Snapshot — one extracted result row
// ---------------------------------------------------------------------------

/// A single result row at yearly, monthly, or daily granularity.
///
/// `period` is `"2021"`, `"2021-06"`, or `"2021-06-15"` depending on the
/// granularity of the query that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub period: String,
    pub positive: u64,
    pub recovered: u64,
    pub deaths: u64,
    pub active: u64,
}

impl Snapshot {
    /// Snapshot labelled with a year. The backing record is the year's close
    /// (Dec 31, or yesterday for the still-open current year), so the label
    /// is the queried year rather than the record's own date.
    pub fn of_year(year: i32, record: &DailyRecord) -> Self {
        Self::labelled(year.to_string(), record)
    }

    /// Snapshot labelled with a `year-month` pair.
    pub fn of_month(year: i32, month: u32, record: &DailyRecord) -> Self {
        Self::labelled(format!("{year}-{month:02}"), record)
    }

    /// Snapshot labelled with the record's own full date.
    pub fn of_day(record: &DailyRecord) -> Self {
        Self::labelled(record.date.format("%Y-%m-%d").to_string(), record)
    }

    fn labelled(period: String, record: &DailyRecord) -> Self {
        Self {
            period,
            positive: record.positive,
            recovered: record.recovered,
            deaths: record.deaths,
            active: record.active,
        }
    }
}

// ---------------------------------------------------------------------------
// GeneralUpdate — today's totals and deltas
// ---------------------------------------------------------------------------

/// The eight counters of the general-update endpoint, with the exact key
/// names the upstream consumers expect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CaseCounters {
    pub total_positive: u64,
    pub total_recovered: u64,
    pub total_deaths: u64,
    pub total_active: u64,
    pub new_positive: i64,
    pub new_recovered: i64,
    pub new_deaths: i64,
    pub new_active: i64,
}

/// Result of the general-update query: current totals, the latest daily
/// deltas, and the date the upstream last published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralUpdate {
    pub last_updated: String,
    pub counters: CaseCounters,
}

// ---------------------------------------------------------------------------
// Raw upstream payload (update.json)
// ---------------------------------------------------------------------------

/// The upstream `update.json` document, as served by the public API.
///
/// Counters under `harian` are wrapped in `{ "value": n }` objects and
/// published as floats; the `_kum` fields carry the cumulative series.
#[derive(Debug, Deserialize)]
pub(crate) struct UpdateDocument {
    pub update: UpdateSection,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UpdateSection {
    pub penambahan: DeltaSection,
    pub total: TotalSection,
    pub harian: Vec<HarianEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeltaSection {
    pub jumlah_positif: i64,
    pub jumlah_sembuh: i64,
    pub jumlah_meninggal: i64,
    pub jumlah_dirawat: i64,
    pub tanggal: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TotalSection {
    pub jumlah_positif: u64,
    pub jumlah_sembuh: u64,
    pub jumlah_meninggal: u64,
    pub jumlah_dirawat: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HarianEntry {
    pub key_as_string: String,
    pub jumlah_positif_kum: Counter,
    pub jumlah_sembuh_kum: Counter,
    pub jumlah_meninggal_kum: Counter,
    pub jumlah_dirawat_kum: Counter,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Counter {
    pub value: f64,
}

impl Counter {
    fn as_count(&self) -> u64 {
        self.value.max(0.0) as u64
    }
}

impl UpdateDocument {
    /// Convert the raw daily entries into a [`Series`].
    ///
    /// Timestamps arrive as `"2020-03-02T00:00:00.000Z"`; only the date part
    /// matters. Entries whose timestamp fails to parse are skipped.
    pub(crate) fn series(&self) -> Series {
        self.update
            .harian
            .iter()
            .filter_map(|entry| {
                let raw = entry.key_as_string.get(..10)?;
                let date = match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                    Ok(d) => d,
                    Err(_) => {
                        tracing::warn!(timestamp = %entry.key_as_string, "skipping unparseable series entry");
                        return None;
                    }
                };
                Some(DailyRecord {
                    date,
                    positive: entry.jumlah_positif_kum.as_count(),
                    recovered: entry.jumlah_sembuh_kum.as_count(),
                    deaths: entry.jumlah_meninggal_kum.as_count(),
                    active: entry.jumlah_dirawat_kum.as_count(),
                })
            })
            .collect()
    }

    pub(crate) fn general_update(&self) -> GeneralUpdate {
        let total = &self.update.total;
        let delta = &self.update.penambahan;
        GeneralUpdate {
            last_updated: delta.tanggal.clone(),
            counters: CaseCounters {
                total_positive: total.jumlah_positif,
                total_recovered: total.jumlah_sembuh,
                total_deaths: total.jumlah_meninggal,
                total_active: total.jumlah_dirawat,
                new_positive: delta.jumlah_positif,
                new_recovered: delta.jumlah_sembuh,
                new_deaths: delta.jumlah_meninggal,
                new_active: delta.jumlah_dirawat,
            },
        }
    }
}
