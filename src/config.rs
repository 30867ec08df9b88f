use std::time::Duration;

pub const UPSTREAM_BASE: &str = "https://data.covid19.go.id/public/api";
pub const UPDATE_PATH: &str = "/update.json";

/// The upstream series has no data before this year.
pub const SERIES_FLOOR_YEAR: i32 = 2020;

/// Lower validity bound applied to `upto` years only (looser than the
/// series floor; an early `upto` simply yields an empty range).
pub const UPTO_FLOOR_YEAR: i32 = 2000;

/// First month with upstream data (March 2020), used as the default
/// `since` for unscoped range queries.
pub const DEFAULT_SINCE_MONTH: u32 = 3;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const SUCCESS_MESSAGE: &str = "Request success!";
pub const INVALID_ENDPOINT_MESSAGE: &str = "Invalid endpoint requested with forbidden method.";
