// File: crates/forecast-core/src/scale.rs
// Summary: Nice-step rounding and the affine energy -> height-axis transform.

use serde::Serialize;

use crate::axis::ForecastAxes;
use crate::series::ForecastChartPoint;
use crate::types::round_to;

/// Round a raw step up to 1, 2, 2.5, 5 or 10 times its power of ten.
/// Non-positive or non-finite input yields 1.
pub fn nice_step(raw: f64) -> f64 {
    if !(raw > 0.0) || !raw.is_finite() {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let normalized = raw / magnitude;
    let factor = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 2.5 {
        2.5
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    factor * magnitude
}

/// Maps energy values onto the height axis so both series share one plot area.
/// Built once per render; every point goes through the same transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnergyScale {
    pub energy_first: f64,
    pub energy_span: f64,
    pub left_first_tick: f64,
    pub left_tick_span: f64,
}

impl EnergyScale {
    pub fn from_axes(axes: &ForecastAxes) -> Self {
        Self {
            energy_first: axes.energy.min,
            energy_span: (axes.energy.max - axes.energy.min).max(1e-12),
            left_first_tick: axes.height.first_tick(),
            left_tick_span: axes.height.tick_span(),
        }
    }

    #[inline]
    pub fn apply(&self, energy: f64) -> Option<f64> {
        if !energy.is_finite() {
            return None;
        }
        let v = self.left_first_tick + (energy - self.energy_first) / self.energy_span * self.left_tick_span;
        Some(round_to(v, 2))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ScaledEnergy {
    pub time: i64,
    pub energy: f64,
    /// Position on the height axis; `None` when `energy` is not finite.
    pub value: Option<f64>,
}

pub fn map_energy_to_left_axis(points: &[ForecastChartPoint], axes: &ForecastAxes) -> Vec<ScaledEnergy> {
    let scale = EnergyScale::from_axes(axes);
    points
        .iter()
        .map(|p| ScaledEnergy { time: p.time, energy: p.energy, value: scale.apply(p.energy) })
        .collect()
}
