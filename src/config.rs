//! Caller-owned simulation settings, read once per tick.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Adjustable between ticks; treated as an immutable value within one.
/// `step` and `draw` take it explicitly so the simulation stays a pure
/// function of (state, config).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Dye injected per pointer sample.
    pub density_amount: f32,
    /// Momentum diffusion rate for the velocity field.
    pub viscosity: f32,
    /// Diffusion rate for the density field.
    pub diffusion: f32,
    /// Alpha multiplier applied to the color ramp each draw.
    pub color_intensity: f32,
    /// Per-tick multiplier on every density cell, in `[0, 1)`.
    pub decay_rate: f32,
}

pub const DENSITY_AMOUNT_RANGE: RangeInclusive<f32> = 50.0..=200.0;
pub const VISCOSITY_RANGE: RangeInclusive<f32> = 0.0001..=0.01;
pub const DIFFUSION_RANGE: RangeInclusive<f32> = 0.0001..=0.01;
pub const COLOR_INTENSITY_RANGE: RangeInclusive<f32> = 0.5..=3.0;
pub const DECAY_RATE_RANGE: RangeInclusive<f32> = 0.95..=0.999;

impl Default for Config {
    fn default() -> Self {
        Self {
            density_amount: 120.0,
            viscosity: 0.0002,
            diffusion: 0.0003,
            color_intensity: 1.0,
            decay_rate: 0.992,
        }
    }
}
