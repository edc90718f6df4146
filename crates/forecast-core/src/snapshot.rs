// File: crates/forecast-core/src/snapshot.rs
// Summary: Snapshot rows (now, +6h, ... or one per day) picked as the nearest samples to target times.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Locale, TimeZone, Utc};
use serde::Serialize;

use crate::error::ForecastError;
use crate::series::{local_date, ForecastChartPoint};
use crate::types::HOUR_MS;

pub const NOW_LABEL: &str = "Ahora";
/// Meters.
pub const WAVE_HEIGHT_TREND_TOLERANCE: f64 = 0.05;
/// kJ.
pub const ENERGY_TREND_TOLERANCE: f64 = 25.0;

const SHORT_RANGE_OFFSETS: [(&str, i64); 4] = [(NOW_LABEL, 0), ("+6h", 6), ("+24h", 24), ("+36h", 36)];
const MISSING: &str = "--";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ForecastRange {
    #[serde(rename = "48h")]
    H48,
    #[serde(rename = "7d")]
    D7,
}

impl ForecastRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastRange::H48 => "48h",
            ForecastRange::D7 => "7d",
        }
    }
}

impl FromStr for ForecastRange {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "48h" => Ok(ForecastRange::H48),
            "7d" => Ok(ForecastRange::D7),
            other => Err(ForecastError::UnknownRange(other.to_string())),
        }
    }
}

impl fmt::Display for ForecastRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

impl Trend {
    pub fn classify(current: f64, baseline: f64, tolerance: f64) -> Self {
        let diff = current - baseline;
        if diff.abs() <= tolerance {
            Trend::Flat
        } else if diff > 0.0 {
            Trend::Up
        } else {
            Trend::Down
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Trend::Up => "↑",
            Trend::Down => "↓",
            Trend::Flat => "→",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotItem {
    pub label: String,
    pub time: Option<i64>,
    /// Local `HH:MM`, or `--` for a placeholder.
    pub hour: String,
    pub wave_height: Option<f64>,
    pub wave_height_trend: Option<Trend>,
    pub wave_period: Option<f64>,
    pub energy: Option<f64>,
    pub energy_trend: Option<Trend>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<f64>,
}

impl SnapshotItem {
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            time: None,
            hour: MISSING.to_string(),
            wave_height: None,
            wave_height_trend: None,
            wave_period: None,
            energy: None,
            energy_trend: None,
            wind_speed: None,
            wind_direction: None,
        }
    }

    /// Text row: label, hour, height, period, energy, wind speed, wind direction.
    pub fn cells(&self) -> [String; 7] {
        fn num(v: Option<f64>, decimals: usize) -> String {
            v.map(|x| format!("{x:.decimals$}")).unwrap_or_else(|| MISSING.to_string())
        }
        fn with_trend(text: String, trend: Option<Trend>) -> String {
            match trend {
                Some(t) => format!("{text} {}", t.symbol()),
                None => text,
            }
        }
        [
            self.label.clone(),
            self.hour.clone(),
            with_trend(num(self.wave_height, 1), self.wave_height_trend),
            num(self.wave_period, 1),
            with_trend(num(self.energy, 0), self.energy_trend),
            num(self.wind_speed, 1),
            num(self.wind_direction, 0),
        ]
    }
}

/// Nearest sample to `target`; ties keep the earliest index.
pub fn nearest_point(points: &[ForecastChartPoint], target: i64) -> Option<&ForecastChartPoint> {
    let mut best: Option<(&ForecastChartPoint, u64)> = None;
    for p in points {
        let d = p.time.abs_diff(target);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((p, d)),
        }
    }
    best.map(|(p, _)| p)
}

/// Map a BCP 47 style tag (`es-ES`, `en`) onto chrono's locale tables.
pub fn resolve_locale(tag: &str) -> Locale {
    let normalized = tag.trim().replace('-', "_");
    if let Ok(locale) = Locale::try_from(normalized.as_str()) {
        return locale;
    }
    if !normalized.contains('_') && !normalized.is_empty() {
        let region = format!("{}_{}", normalized.to_lowercase(), normalized.to_uppercase());
        if let Ok(locale) = Locale::try_from(region.as_str()) {
            return locale;
        }
    }
    log::warn!("unknown locale '{tag}', falling back to es_ES");
    Locale::es_ES
}

/// Snapshot rows in UTC.
pub fn build_snapshots(
    points: &[ForecastChartPoint],
    range: ForecastRange,
    locale: &str,
    now_ms: i64,
) -> Vec<SnapshotItem> {
    build_snapshots_in(points, range, locale, now_ms, &Utc)
}

/// Snapshot rows with calendar days and hours taken in `tz`.
pub fn build_snapshots_in<Tz>(
    points: &[ForecastChartPoint],
    range: ForecastRange,
    locale: &str,
    now_ms: i64,
    tz: &Tz,
) -> Vec<SnapshotItem>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    if points.is_empty() {
        return Vec::new();
    }

    let targets: Vec<(String, i64)> = match range {
        ForecastRange::H48 => SHORT_RANGE_OFFSETS
            .iter()
            .map(|&(label, hours)| (label.to_string(), now_ms.saturating_add(hours * HOUR_MS)))
            .collect(),
        ForecastRange::D7 => {
            let locale = resolve_locale(locale);
            let mut seen = HashSet::new();
            points
                .iter()
                .filter(|p| local_date(p.time, tz).is_some_and(|d| seen.insert(d)))
                .map(|p| (day_label(p.time, tz, locale), p.time))
                .collect()
        }
    };

    let baseline = nearest_point(points, now_ms);
    targets
        .into_iter()
        .map(|(label, target)| match nearest_point(points, target) {
            Some(p) => snapshot_for(label, p, baseline, tz),
            None => SnapshotItem::placeholder(label),
        })
        .collect()
}

fn snapshot_for<Tz>(label: String, p: &ForecastChartPoint, baseline: Option<&ForecastChartPoint>, tz: &Tz) -> SnapshotItem
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    // no trend for the baseline row itself
    let base = baseline.filter(|b| b.time.abs_diff(p.time) > 1);
    SnapshotItem {
        label,
        time: Some(p.time),
        hour: tz
            .timestamp_millis_opt(p.time)
            .single()
            .map(|dt| dt.format("%H:%M").to_string())
            .unwrap_or_else(|| MISSING.to_string()),
        wave_height: Some(p.wave_height),
        wave_height_trend: base.map(|b| Trend::classify(p.wave_height, b.wave_height, WAVE_HEIGHT_TREND_TOLERANCE)),
        wave_period: Some(p.wave_period),
        energy: Some(p.energy),
        energy_trend: base.map(|b| Trend::classify(p.energy, b.energy, ENERGY_TREND_TOLERANCE)),
        wind_speed: Some(p.wind_speed),
        wind_direction: Some(p.wind_direction),
    }
}

fn day_label<Tz>(time_ms: i64, tz: &Tz, locale: Locale) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    tz.timestamp_millis_opt(time_ms)
        .single()
        .map(|dt| dt.format_localized("%a %-d", locale).to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

/// The requested label if present, else `Ahora`, else the first label, else `Ahora`.
pub fn resolve_active_snapshot_label(items: &[SnapshotItem], requested: Option<&str>) -> String {
    if let Some(req) = requested {
        if items.iter().any(|i| i.label == req) {
            return req.to_string();
        }
    }
    if items.iter().any(|i| i.label == NOW_LABEL) {
        return NOW_LABEL.to_string();
    }
    items.first().map(|i| i.label.clone()).unwrap_or_else(|| NOW_LABEL.to_string())
}
