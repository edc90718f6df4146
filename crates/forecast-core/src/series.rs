// File: crates/forecast-core/src/series.rs
// Summary: Forecast chart series: normalized points built from raw records, and per-day spans.

use chrono::{NaiveDate, TimeZone};
use serde::Serialize;

use crate::types::{round_to, ForecastRecord};

/// One chart sample. `time` is epoch milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastChartPoint {
    pub time: i64,
    pub wave_height: f64,
    pub energy: f64,
    pub wave_period: f64,
    pub wind_speed: f64,
    pub wind_direction: f64,
}

impl ForecastChartPoint {
    pub fn from_record(record: &ForecastRecord) -> Self {
        let (height, period) = record
            .primary_swell()
            .map(|s| (s.height, s.period))
            .unwrap_or((0.0, 0.0));
        Self {
            time: record.date.timestamp_millis(),
            wave_height: round_to(height, 1),
            energy: record.energy,
            wave_period: round_to(period, 1),
            wind_speed: round_to(record.wind.speed, 1),
            wind_direction: round_to(record.wind.angle, 1),
        }
    }
}

/// Map records 1:1 onto chart points, preserving order.
pub fn build_chart_data(forecasts: &[ForecastRecord]) -> Vec<ForecastChartPoint> {
    forecasts.iter().map(ForecastChartPoint::from_record).collect()
}

/// Contiguous run of points sharing a calendar day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DaySpan {
    pub date: NaiveDate,
    /// First `time` in the run.
    pub start: i64,
    /// Last `time` in the run.
    pub end: i64,
}

/// Group consecutive points by calendar day in `tz`. Expects time-sorted input.
pub fn day_spans<Tz: TimeZone>(points: &[ForecastChartPoint], tz: &Tz) -> Vec<DaySpan> {
    let mut spans: Vec<DaySpan> = Vec::new();
    for p in points {
        let Some(date) = local_date(p.time, tz) else { continue };
        match spans.last_mut() {
            Some(last) if last.date == date => last.end = p.time,
            _ => spans.push(DaySpan { date, start: p.time, end: p.time }),
        }
    }
    spans
}

pub(crate) fn local_date<Tz: TimeZone>(time_ms: i64, tz: &Tz) -> Option<NaiveDate> {
    tz.timestamp_millis_opt(time_ms).single().map(|dt| dt.date_naive())
}
