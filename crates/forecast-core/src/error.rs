// File: crates/forecast-core/src/error.rs
// Summary: Error type for the fallible edges of the core (parsing and data loading).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("invalid timestamp '{value}': {source}")]
    InvalidTimestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("unknown forecast range '{0}' (expected 48h or 7d)")]
    UnknownRange(String),

    #[error("failed to parse geographic data: {0}")]
    GeoData(#[from] serde_json::Error),

    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
}

pub type Result<T> = std::result::Result<T, ForecastError>;
