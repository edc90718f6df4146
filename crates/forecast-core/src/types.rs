// File: crates/forecast-core/src/types.rs
// Summary: Raw forecast records as delivered by the forecast API, plus shared constants.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ForecastError, Result};

/// Milliseconds in one hour.
pub const HOUR_MS: i64 = 3_600_000;

/// One swell train reported for a forecast sample.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Swell {
    /// Significant height, meters.
    pub height: f64,
    /// Peak period, seconds.
    pub period: f64,
    /// Mean direction, degrees.
    pub angle: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wind {
    /// Speed in km/h.
    pub speed: f64,
    /// Direction in degrees (0-360).
    pub angle: f64,
}

/// A single forecast sample.
/// Contract: `valid_swells[0]`, when present, is the primary swell.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRecord {
    #[serde(deserialize_with = "deserialize_date")]
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub valid_swells: Vec<Swell>,
    #[serde(default)]
    pub wind: Wind,
    /// Wave energy, kJ.
    #[serde(default)]
    pub energy: f64,
}

impl ForecastRecord {
    /// Parse an ISO 8601 timestamp. Values without an offset are taken as UTC.
    pub fn parse_date(value: &str) -> Result<DateTime<Utc>> {
        let value = value.trim();
        match DateTime::parse_from_rfc3339(value) {
            Ok(dt) => Ok(dt.with_timezone(&Utc)),
            Err(rfc_err) => NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
                .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f"))
                .map(|naive| naive.and_utc())
                .map_err(|_| ForecastError::InvalidTimestamp { value: value.to_string(), source: rfc_err }),
        }
    }

    /// First swell entry, if any.
    pub fn primary_swell(&self) -> Option<&Swell> {
        self.valid_swells.first()
    }
}

fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    ForecastRecord::parse_date(&raw).map_err(serde::de::Error::custom)
}

/// Round to `decimals` places, half away from zero.
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
