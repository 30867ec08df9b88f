#[derive(Debug, thiserror::Error)]
pub enum CovidError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Service unavailable due to 3rd party API error.")]
    UpstreamUnavailable,

    #[error("No data found for the requested period: {0}")]
    PeriodNotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CovidError {
    /// HTTP status code this error maps to at the response boundary.
    ///
    /// Fetch and decode failures are upstream-dependency errors and share
    /// the service-unavailable status.
    pub fn status(&self) -> u16 {
        match self {
            CovidError::Http(_) | CovidError::Json(_) | CovidError::UpstreamUnavailable => 503,
            CovidError::PeriodNotFound(_) => 404,
            CovidError::Internal(_) => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, CovidError>;
