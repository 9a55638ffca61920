//! Configuration types for the cloth solver.

use crate::float::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default world extent along x.
pub const DEFAULT_WIDTH: f32 = 1920.0;
/// Default world extent along y.
pub const DEFAULT_HEIGHT: f32 = 1080.0;
/// Default world extent along z.
pub const DEFAULT_DEPTH: f32 = 1000.0;
pub const DEFAULT_GRAVITY: f32 = 10.0;
pub const DEFAULT_TIME_STEP: f32 = 0.1;
pub const DEFAULT_ITERATIONS: usize = 5;
/// Strength wind snaps to when switched on while at zero.
pub const DEFAULT_WIND_STRENGTH: f32 = 100.0;
/// Pick radius for nearest-particle queries, in world units.
pub const DEFAULT_PICK_RADIUS: f32 = 30.0;

/// Axis-aligned box `[0, width] x [0, height] x [0, depth]` that every
/// particle is clamped into after integration.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldBounds<F: Float> {
    pub width: F,
    pub height: F,
    pub depth: F,
}

impl<F: Float> WorldBounds<F> {
    pub fn new(width: F, height: F, depth: F) -> Self {
        WorldBounds { width, height, depth }
    }
}

impl<F: Float> Default for WorldBounds<F> {
    fn default() -> Self {
        WorldBounds::new(
            F::from_f32(DEFAULT_WIDTH),
            F::from_f32(DEFAULT_HEIGHT),
            F::from_f32(DEFAULT_DEPTH),
        )
    }
}

/// Per-tick control parameters.
///
/// # Builder Pattern
/// ```
/// use weft::config::SolverConfig;
///
/// let config: SolverConfig<f32> = SolverConfig::new()
///     .with_iterations(8)
///     .with_gravity(9.81)
///     .with_wind(40.0, true)
///     .with_time_step(1.0 / 60.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig<F: Float> {
    /// Gravity magnitude, applied as `(0, -gravity, 0)`. Default: 10.
    pub gravity: F,
    /// Wind force along +x. Default: 0.
    pub wind_strength: F,
    /// Wind is only applied when enabled. Default: false.
    pub wind_enabled: bool,
    /// Integration timestep. Default: 0.1.
    pub dt: F,
    /// Relaxation passes over all constraints per tick. Default: 5.
    pub iterations: usize,
}

impl<F: Float> SolverConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        SolverConfig {
            gravity: F::from_f32(DEFAULT_GRAVITY),
            wind_strength: F::zero(),
            wind_enabled: false,
            dt: F::from_f32(DEFAULT_TIME_STEP),
            iterations: DEFAULT_ITERATIONS,
        }
    }

    /// Set the number of relaxation passes.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the gravity magnitude.
    pub fn with_gravity(mut self, gravity: F) -> Self {
        self.gravity = gravity;
        self
    }

    /// Set wind strength and whether it is applied.
    pub fn with_wind(mut self, strength: F, enabled: bool) -> Self {
        self.wind_strength = strength;
        self.wind_enabled = enabled;
        self
    }

    /// Set the timestep.
    pub fn with_time_step(mut self, dt: F) -> Self {
        self.dt = dt;
        self
    }
}

impl<F: Float> Default for SolverConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
