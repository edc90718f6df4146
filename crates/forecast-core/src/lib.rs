// File: crates/forecast-core/src/lib.rs
// Summary: Core library entry point; forecast chart pipeline, condition bands and coastal validation.

pub mod axis;
pub mod coast;
pub mod conditions;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod scale;
pub mod series;
pub mod snapshot;
pub mod types;

pub use axis::{build_axes, left_tick_step, Axis, ForecastAxes};
pub use coast::{CoastGeometry, CoastValidator, InvalidReason, ValidationResult, ValidatorConfig};
pub use conditions::{
    classify_angle, classify_scalar, has_condition_ranges, is_angle_in_range, is_value_in_range,
    ConditionQuality, ConditionRange, ConditionRanges, OptimalConditions, PointConditions, SpotConfig,
};
pub use error::{ForecastError, Result};
pub use geometry::{haversine_distance, point_to_segment_distance, LatLng, Polygon};
pub use scale::{map_energy_to_left_axis, nice_step, EnergyScale, ScaledEnergy};
pub use series::{build_chart_data, day_spans, DaySpan, ForecastChartPoint};
pub use snapshot::{
    build_snapshots, build_snapshots_in, nearest_point, resolve_active_snapshot_label, ForecastRange,
    SnapshotItem, Trend, NOW_LABEL,
};
pub use types::{ForecastRecord, Swell, Wind};
