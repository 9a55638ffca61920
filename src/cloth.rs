//! Cloth simulation state: the particle/constraint collections plus the
//! control parameters and topology selection that drive them.

use crate::config::{SolverConfig, WorldBounds, DEFAULT_GRAVITY, DEFAULT_WIND_STRENGTH};
use crate::constraint::DistanceConstraint;
use crate::error::ClothError;
use crate::float::Float;
use crate::grid::{GridConfig, GridPattern, Topology};
use crate::handle::ParticleHandle;
use crate::interaction::Drag;
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::particle::Particle;
use crate::solver::ConstraintSolver;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Everything needed to build a cloth.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClothConfig<F: Float> {
    pub pattern: GridPattern,
    pub grid: GridConfig<F>,
    pub bounds: WorldBounds<F>,
}

/// A simulated cloth.
///
/// Owns its particles and constraints exclusively. Callers address particles
/// through [`ParticleHandle`]s, which stop resolving once the collection is
/// rebuilt by [`Cloth::reset`], [`Cloth::set_pattern`] or a load.
pub struct Cloth<F: Float = f32> {
    solver: ConstraintSolver<F>,
    pattern: GridPattern,
    grid: GridConfig<F>,
    bounds: WorldBounds<F>,
    generation: u32,
    gravity: F,
    wind_strength: F,
    wind_on: bool,
    tear_mode: bool,
    pub(crate) active_drag: Option<Drag<F>>,
}

impl<F: Float> Cloth<F> {
    pub fn new(config: ClothConfig<F>) -> Self {
        let mut cloth = Cloth {
            solver: ConstraintSolver::new(),
            pattern: config.pattern,
            grid: config.grid,
            bounds: config.bounds,
            generation: 0,
            gravity: F::from_f32(DEFAULT_GRAVITY),
            wind_strength: F::zero(),
            wind_on: false,
            tear_mode: false,
            active_drag: None,
        };
        cloth.rebuild();
        cloth
    }

    /// Regenerate the current pattern from scratch.
    pub fn reset(&mut self) {
        self.rebuild();
    }

    /// Switch connectivity pattern. Always rebuilds, even for the same pattern.
    pub fn set_pattern(&mut self, pattern: GridPattern) {
        self.pattern = pattern;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let topology = Topology::build(self.pattern, &self.grid);
        self.replace(ConstraintSolver::from_topology(topology));
        tracing::info!(
            pattern = ?self.pattern,
            particles = self.solver.particle_count(),
            constraints = self.solver.constraint_count(),
            generation = self.generation,
            "cloth rebuilt"
        );
    }

    /// Swap in a new particle/constraint set. Invalidates every handle and
    /// ends any drag.
    pub(crate) fn replace(&mut self, solver: ConstraintSolver<F>) {
        self.solver = solver;
        self.generation = self.generation.wrapping_add(1);
        self.active_drag = None;
    }

    /// Advance one tick using the stored control state.
    pub fn advance(&mut self, dt: F, iterations: usize) {
        let config = self.solver_config().with_time_step(dt).with_iterations(iterations);
        self.step(&config, &mut NoOpStepObserver);
    }

    /// Advance one tick with explicit control parameters.
    pub fn tick(&mut self, gravity: F, wind_strength: F, wind_enabled: bool, dt: F, iterations: usize) {
        let config = SolverConfig::new()
            .with_gravity(gravity)
            .with_wind(wind_strength, wind_enabled)
            .with_time_step(dt)
            .with_iterations(iterations);
        self.step(&config, &mut NoOpStepObserver);
    }

    /// Advance one tick. An active drag pins its particle to the drag target
    /// before forces are applied.
    pub fn step<O: StepObserver>(&mut self, config: &SolverConfig<F>, observer: &mut O) {
        self.apply_drag();
        self.solver.step(config, &self.bounds, observer);
    }

    /// Solver settings reflecting the stored gravity and wind.
    pub fn solver_config(&self) -> SolverConfig<F> {
        SolverConfig::new()
            .with_gravity(self.gravity)
            .with_wind(self.wind_strength, self.wind_on)
    }

    pub fn gravity(&self) -> F { self.gravity }
    pub fn set_gravity(&mut self, gravity: F) { self.gravity = gravity; }
    pub fn adjust_gravity(&mut self, delta: F) { self.gravity = self.gravity + delta; }

    pub fn wind_strength(&self) -> F { self.wind_strength }
    pub fn set_wind_strength(&mut self, strength: F) { self.wind_strength = strength; }
    pub fn is_wind_on(&self) -> bool { self.wind_on }

    /// Switching wind off also zeroes its strength.
    pub fn set_wind_on(&mut self, on: bool) {
        self.wind_on = on;
        if !on {
            self.wind_strength = F::zero();
        }
    }

    /// Flip wind. Switching on from zero strength uses the default strength.
    pub fn toggle_wind(&mut self) {
        self.set_wind_on(!self.wind_on);
        if self.wind_on && self.wind_strength == F::zero() {
            self.wind_strength = F::from_f32(DEFAULT_WIND_STRENGTH);
        }
    }

    /// Nudge wind strength, never below zero. Any positive strength turns wind on.
    pub fn adjust_wind_strength(&mut self, delta: F) {
        self.wind_strength = (self.wind_strength + delta).max(F::zero());
        if self.wind_strength > F::zero() {
            self.wind_on = true;
        }
    }

    pub fn is_tear_mode(&self) -> bool { self.tear_mode }
    pub fn set_tear_mode(&mut self, on: bool) { self.tear_mode = on; }
    pub fn toggle_tear_mode(&mut self) { self.tear_mode = !self.tear_mode; }

    pub fn pattern(&self) -> GridPattern { self.pattern }
    pub fn grid(&self) -> &GridConfig<F> { &self.grid }
    pub fn bounds(&self) -> &WorldBounds<F> { &self.bounds }
    pub fn generation(&self) -> u32 { self.generation }

    /// Handle to the particle at `index` in the current generation.
    pub fn handle(&self, index: usize) -> Option<ParticleHandle> {
        (index < self.solver.particle_count()).then(|| ParticleHandle::new(index, self.generation))
    }

    pub fn handles(&self) -> impl Iterator<Item = ParticleHandle> + '_ {
        (0..self.solver.particle_count()).map(move |i| ParticleHandle::new(i, self.generation))
    }

    pub(crate) fn resolve(&self, handle: ParticleHandle) -> Result<usize, ClothError> {
        handle.resolve(self.generation, self.solver.particle_count())
    }

    pub fn particle(&self, handle: ParticleHandle) -> Result<&Particle<F>, ClothError> {
        let index = self.resolve(handle)?;
        Ok(self.solver.particle(index))
    }

    /// All particles in index order.
    pub fn particles(&self) -> &[Particle<F>] { self.solver.particles() }
    /// All constraints in relaxation order, torn ones included.
    pub fn constraints(&self) -> &[DistanceConstraint<F>] { self.solver.constraints() }

    pub fn particle_count(&self) -> usize { self.solver.particle_count() }
    pub fn constraint_count(&self) -> usize { self.solver.constraint_count() }
    pub fn active_constraint_count(&self) -> usize { self.solver.active_constraint_count() }

    pub(crate) fn solver_mut(&mut self) -> &mut ConstraintSolver<F> { &mut self.solver }
}

impl<F: Float> Default for Cloth<F> {
    fn default() -> Self {
        Self::new(ClothConfig::default())
    }
}
