// File: crates/forecast-core/src/conditions.rs
// Summary: Quality bands (epic/limit/poor) for wind direction and swell period, and spot assessment.
// Notes:
// - Angle bands are circular; `from > to` wraps through north.
// - A configured ranges object that matches nothing classifies as `Poor`, not `None`.

use serde::{Deserialize, Serialize};

use crate::geometry::LatLng;
use crate::series::ForecastChartPoint;

/// Upper angle bound used in place of an exact 360 so it stays distinct from 0.
const FULL_TURN_EDGE: f64 = 359.999_999;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConditionQuality {
    Epic,
    Limit,
    Poor,
}

impl ConditionQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionQuality::Epic => "epic",
            ConditionQuality::Limit => "limit",
            ConditionQuality::Poor => "poor",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConditionRange {
    pub from: f64,
    pub to: f64,
}

impl ConditionRange {
    pub const fn new(from: f64, to: f64) -> Self {
        Self { from, to }
    }
}

/// Priority-ordered bands: epic beats limit beats poor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConditionRanges {
    pub epic: Vec<ConditionRange>,
    pub limit: Vec<ConditionRange>,
    pub poor: Vec<ConditionRange>,
}

impl ConditionRanges {
    fn classify_with(&self, matches: impl Fn(&ConditionRange) -> bool) -> ConditionQuality {
        if self.epic.iter().any(&matches) {
            ConditionQuality::Epic
        } else if self.limit.iter().any(&matches) {
            ConditionQuality::Limit
        } else {
            // poor bands and the unmatched case both land here
            ConditionQuality::Poor
        }
    }
}

#[inline]
fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

#[inline]
fn normalize_bound(bound: f64) -> f64 {
    if bound == 360.0 { FULL_TURN_EDGE } else { normalize_angle(bound) }
}

/// Circular membership test. Bounds are inclusive.
pub fn is_angle_in_range(angle: f64, range: &ConditionRange) -> bool {
    if !angle.is_finite() || !range.from.is_finite() || !range.to.is_finite() {
        return false;
    }
    let a = normalize_angle(angle);
    let from = normalize_bound(range.from);
    let to = normalize_bound(range.to);
    if from <= to {
        a >= from && a <= to
    } else {
        a >= from || a <= to
    }
}

/// Linear membership test; `from`/`to` may come in either order.
pub fn is_value_in_range(value: f64, range: &ConditionRange) -> bool {
    if !value.is_finite() || !range.from.is_finite() || !range.to.is_finite() {
        return false;
    }
    let lo = range.from.min(range.to);
    let hi = range.from.max(range.to);
    value >= lo && value <= hi
}

pub fn classify_angle(angle: f64, ranges: Option<&ConditionRanges>) -> Option<ConditionQuality> {
    ranges.map(|r| r.classify_with(|band| is_angle_in_range(angle, band)))
}

pub fn classify_scalar(value: f64, ranges: Option<&ConditionRanges>) -> Option<ConditionQuality> {
    ranges.map(|r| r.classify_with(|band| is_value_in_range(value, band)))
}

/// True when at least one band list is non-empty.
pub fn has_condition_ranges(ranges: Option<&ConditionRanges>) -> bool {
    ranges.is_some_and(|r| !(r.epic.is_empty() && r.limit.is_empty() && r.poor.is_empty()))
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptimalConditions {
    pub swell_period: Option<ConditionRanges>,
    pub wind_direction: Option<ConditionRanges>,
}

/// Per-point classification used to color a forecast row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PointConditions {
    pub wind: Option<ConditionQuality>,
    pub period: Option<ConditionQuality>,
}

impl OptimalConditions {
    pub fn assess(&self, point: &ForecastChartPoint) -> PointConditions {
        PointConditions {
            wind: classify_angle(point.wind_direction, self.wind_direction.as_ref()),
            period: classify_scalar(point.wave_period, self.swell_period.as_ref()),
        }
    }
}

/// Surf spot configuration as served by the spots endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotConfig {
    pub spot_id: String,
    pub spot_name: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub location: Option<LatLng>,
    #[serde(default)]
    pub optimal_conditions: OptimalConditions,
}
