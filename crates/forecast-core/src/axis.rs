// File: crates/forecast-core/src/axis.rs
// Summary: Dual Y-axis model (wave height on the left, energy on the right) and its builder.

use serde::Serialize;

use crate::grid::{linspace, ticks_by_step};
use crate::scale::nice_step;
use crate::series::ForecastChartPoint;
use crate::types::round_to;

/// Number of intervals the raw energy range is split into before rounding.
const ENERGY_DIVISIONS: f64 = 8.0;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Axis {
    pub label: String,
    pub step: f64,
    pub min: f64,
    pub max: f64,
    /// Contract: non-empty, strictly increasing.
    pub ticks: Vec<f64>,
}

impl Axis {
    pub fn new(label: impl Into<String>, step: f64, min: f64, max: f64, ticks: Vec<f64>) -> Self {
        Self { label: label.into(), step, min, max, ticks }
    }

    pub fn first_tick(&self) -> f64 {
        self.ticks.first().copied().unwrap_or(self.min)
    }

    pub fn last_tick(&self) -> f64 {
        self.ticks.last().copied().unwrap_or(self.max)
    }

    pub fn tick_span(&self) -> f64 {
        self.last_tick() - self.first_tick()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ForecastAxes {
    /// Left axis, meters.
    pub height: Axis,
    /// Right axis, kJ. `min`/`max` are the energy anchors drawn at the first/last height ticks.
    pub energy: Axis,
    pub max_wave_height: f64,
    pub min_wave_height: f64,
    pub max_energy: f64,
    pub min_energy: f64,
}

/// Tick step for the height axis: 2 m above 7 m, 0.5 m below 4 m, else 1 m.
pub fn left_tick_step(max_wave_height: f64) -> f64 {
    if max_wave_height > 7.0 {
        2.0
    } else if max_wave_height < 4.0 {
        0.5
    } else {
        1.0
    }
}

/// (max, min) over finite values; max starts at 0 and an empty min collapses to 0.
fn extent(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (max, min) = values
        .filter(|v| v.is_finite())
        .fold((0.0f64, f64::INFINITY), |(max, min), v| (max.max(v), min.min(v)));
    let min = if min.is_finite() { min.min(max) } else { 0.0 };
    (max, min)
}

/// Decimals needed to show `step` without collapsing it; never fewer than 2.
fn step_decimals(step: f64) -> i32 {
    if !(step > 0.0 && step.is_finite()) {
        return 2;
    }
    (1 - step.log10().floor() as i32).max(2)
}

pub fn build_axes(points: &[ForecastChartPoint]) -> ForecastAxes {
    let (max_h, min_h) = extent(points.iter().map(|p| p.wave_height));
    let (max_e, min_e) = extent(points.iter().map(|p| p.energy));

    // Left (height) axis
    let step = left_tick_step(max_h);
    let first_tick = ((min_h.floor() / step).floor() * step).max(step);
    let left_min = (first_tick - step / 2.0).max(0.0);
    let headroom = (max_h * 1.1).max(max_h + step / 2.0);
    let left_max = ((headroom / step) - 1e-9).ceil() * step;
    let left_ticks = ticks_by_step(first_tick, left_max, step);

    // Right (energy) axis mirrors the left tick count
    let tick_count = left_ticks.len().max(2);
    let raw_step = (max_e - min_e) / ENERGY_DIVISIONS;
    if !(raw_step > 0.0) && !points.is_empty() {
        log::warn!("flat energy range ({min_e}..{max_e}); using unit energy step");
    }
    let energy_step = nice_step(raw_step);
    let energy_first = (min_e / energy_step).floor() * energy_step;
    let mut energy_last = (max_e / energy_step).ceil() * energy_step;
    if energy_last <= energy_first {
        energy_last = energy_first + energy_step;
    }
    let energy_decimals = step_decimals(energy_step);
    let energy_ticks = linspace(energy_first, energy_last, tick_count, energy_decimals);

    log::debug!(
        "axes: height step={step} range=[{left_min:.2}, {left_max:.2}] ticks={}; energy step={energy_step} range=[{energy_first}, {energy_last}]",
        left_ticks.len()
    );

    ForecastAxes {
        height: Axis::new("Altura (m)", step, round_to(left_min, 2), round_to(left_max, 2), left_ticks),
        energy: Axis::new(
            "Energía (kJ)",
            round_to(energy_step, energy_decimals),
            round_to(energy_first, energy_decimals),
            round_to(energy_last, energy_decimals),
            energy_ticks,
        ),
        max_wave_height: max_h,
        min_wave_height: min_h,
        max_energy: max_e,
        min_energy: min_e,
    }
}
