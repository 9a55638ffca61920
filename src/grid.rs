//! Cloth topology generation: particle grids with square, triangle or
//! hexagon connectivity.

use crate::config::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::constraint::DistanceConstraint;
use crate::float::Float;
use crate::particle::Particle;
use crate::vec::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Horizontal hexagon spacing as a fraction of the edge length (cos 30°).
const HEX_COS_30: f32 = 0.866;
/// Hexagon row spacing as a fraction of the edge length.
const HEX_ROW_SPACING: f32 = 0.75;

/// Connectivity scheme used when generating constraints over a particle grid.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GridPattern {
    /// Horizontal and vertical neighbours.
    #[default]
    Square,
    /// Square plus both diagonals of every cell.
    Triangle,
    /// Offset rows forming a honeycomb.
    Hexagon,
}

/// Dimensions and placement of a generated cloth.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GridConfig<F: Float> {
    pub rows: usize,
    pub cols: usize,
    pub spacing: F,
    pub x_offset: F,
    pub y_offset: F,
}

impl<F: Float> GridConfig<F> {
    pub fn new(rows: usize, cols: usize, spacing: F) -> Self {
        GridConfig { rows, cols, spacing, ..Self::default() }
    }

    pub fn with_offset(mut self, x_offset: F, y_offset: F) -> Self {
        self.x_offset = x_offset;
        self.y_offset = y_offset;
        self
    }

    /// Particle index of grid cell `(row, col)`.
    pub fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// Deterministic depth perturbation so the initial sheet is not planar.
    pub fn z_bias(&self, row: usize, col: usize) -> F {
        let t = F::from_usize(row + col) / F::from_usize(self.rows + self.cols);
        t * F::from_f32(200.0) + F::from_f32(100.0)
    }
}

impl<F: Float> Default for GridConfig<F> {
    fn default() -> Self {
        GridConfig {
            rows: 60,
            cols: 60,
            spacing: F::from_f32(8.0),
            x_offset: F::from_f32(DEFAULT_WIDTH / 6.0),
            y_offset: F::from_f32(DEFAULT_HEIGHT / 6.0),
        }
    }
}

/// Freshly generated particles and constraints. Row 0 is pinned; constraints
/// are listed in generation order, which is also relaxation order.
pub struct Topology<F: Float> {
    pub particles: Vec<Particle<F>>,
    pub constraints: Vec<DistanceConstraint<F>>,
}

impl<F: Float> Topology<F> {
    /// Generate `rows * cols` particles (index `row * cols + col`) connected
    /// according to `pattern`. Neighbours outside the grid are skipped.
    pub fn build(pattern: GridPattern, config: &GridConfig<F>) -> Self {
        match pattern {
            GridPattern::Square => Self::square(config, false),
            GridPattern::Triangle => Self::square(config, true),
            GridPattern::Hexagon => Self::hexagon(config),
        }
    }

    fn square(config: &GridConfig<F>, diagonals: bool) -> Self {
        let (rows, cols, spacing) = (config.rows, config.cols, config.spacing);
        let mut particles = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                let x = F::from_usize(col) * spacing + config.x_offset;
                let y = F::from_usize(row) * spacing + config.y_offset;
                let z = config.z_bias(row, col);
                particles.push(Particle::with_pinned(Vec3::new(x, y, z), row == 0));
            }
        }

        let diag = spacing * F::two().sqrt();
        let mut constraints = Vec::new();
        for row in 0..rows {
            for col in 0..cols {
                let idx = config.index(row, col);
                let has_right = col + 1 < cols;
                let has_down = row + 1 < rows;
                if has_right {
                    constraints.push(DistanceConstraint::with_rest_length(idx, idx + 1, spacing, &particles));
                }
                if has_down {
                    constraints.push(DistanceConstraint::with_rest_length(idx, idx + cols, spacing, &particles));
                }
                if !diagonals || !has_down {
                    continue;
                }
                // Bottom-right
                if has_right {
                    constraints.push(DistanceConstraint::with_rest_length(idx, idx + cols + 1, diag, &particles));
                }
                // Bottom-left
                if col > 0 {
                    constraints.push(DistanceConstraint::with_rest_length(idx, idx + cols - 1, diag, &particles));
                }
            }
        }

        Topology { particles, constraints }
    }

    fn hexagon(config: &GridConfig<F>) -> Self {
        let (rows, cols, spacing) = (config.rows, config.cols, config.spacing);
        let dx = spacing * F::from_f32(HEX_COS_30);
        let dy = spacing * F::from_f32(HEX_ROW_SPACING);

        let mut particles = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            let shift = if row % 2 == 1 { dx * F::half() } else { F::zero() };
            for col in 0..cols {
                let x = F::from_usize(col) * dx + shift + config.x_offset;
                let y = F::from_usize(row) * dy + config.y_offset;
                let z = config.z_bias(row, col);
                particles.push(Particle::with_pinned(Vec3::new(x, y, z), row == 0));
            }
        }

        let mut constraints = Vec::new();
        for row in 0..rows {
            for col in 0..cols {
                let idx = config.index(row, col);
                if col + 1 < cols {
                    constraints.push(DistanceConstraint::with_rest_length(idx, idx + 1, dx, &particles));
                }
                if row + 1 >= rows {
                    continue;
                }
                let below = idx + cols;
                if row % 2 == 1 {
                    // Odd rows are shifted right: down-left, then straight down.
                    if col > 0 {
                        constraints.push(DistanceConstraint::with_rest_length(idx, below - 1, spacing, &particles));
                    }
                    constraints.push(DistanceConstraint::with_rest_length(idx, below, spacing, &particles));
                } else {
                    constraints.push(DistanceConstraint::with_rest_length(idx, below, spacing, &particles));
                    if col + 1 < cols {
                        constraints.push(DistanceConstraint::with_rest_length(idx, below + 1, spacing, &particles));
                    }
                }
            }
        }

        Topology { particles, constraints }
    }
}
