//! The general-update query: current totals and the latest daily deltas.

use crate::error::Result;
use crate::models::GeneralUpdate;
use crate::CovidSdk;

/// Query interface for the general update, backed by one upstream fetch.
pub struct UpdateQuery<'a> {
    sdk: &'a CovidSdk,
}

impl<'a> UpdateQuery<'a> {
    pub fn new(sdk: &'a CovidSdk) -> Self {
        Self { sdk }
    }

    /// Today's cumulative totals, the newest deltas, and the upstream
    /// publication date.
    pub fn get(&self) -> Result<GeneralUpdate> {
        let document = self.sdk.fetch()?;
        Ok(document.general_update())
    }
}
