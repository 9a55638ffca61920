//! Tick driver: forces, Verlet integration, bounds clamping and iterative
//! constraint relaxation over one particle collection.

use crate::config::{SolverConfig, WorldBounds};
use crate::constraint::DistanceConstraint;
use crate::float::Float;
use crate::grid::Topology;
use crate::observer::StepObserver;
use crate::particle::Particle;
use crate::vec::Vec3;

/// Owns a particle collection and the constraints indexing into it.
///
/// Constraints address particles by index, so the two collections are only
/// ever replaced together.
#[derive(Clone, Debug, Default)]
pub struct ConstraintSolver<F: Float> {
    particles: Vec<Particle<F>>,
    constraints: Vec<DistanceConstraint<F>>,
}

impl<F: Float> ConstraintSolver<F> {
    pub fn new() -> Self {
        ConstraintSolver {
            particles: Vec::new(),
            constraints: Vec::new(),
        }
    }

    pub fn from_parts(particles: Vec<Particle<F>>, constraints: Vec<DistanceConstraint<F>>) -> Self {
        ConstraintSolver { particles, constraints }
    }

    pub fn from_topology(topology: Topology<F>) -> Self {
        Self::from_parts(topology.particles, topology.constraints)
    }

    pub fn add_particle(&mut self, particle: Particle<F>) -> usize {
        let idx = self.particles.len();
        self.particles.push(particle);
        idx
    }

    /// Connect two existing particles at their current distance.
    ///
    /// Panics if either index is out of range.
    pub fn connect(&mut self, a: usize, b: usize) -> usize {
        let idx = self.constraints.len();
        self.constraints.push(DistanceConstraint::new(a, b, &self.particles));
        idx
    }

    /// Add a prebuilt constraint, e.g. one with an explicit rest length.
    pub fn add_constraint(&mut self, constraint: DistanceConstraint<F>) -> usize {
        let idx = self.constraints.len();
        self.constraints.push(constraint);
        idx
    }

    pub fn apply_force(&mut self, force: Vec3<F>) {
        for p in self.particles.iter_mut() {
            p.apply_force(force);
        }
    }

    /// Advance one tick.
    ///
    /// Order is fixed: gravity, wind, integrate, clamp, then
    /// `config.iterations` in-place passes over the constraints in
    /// construction order. Later constraints in a pass see corrections made
    /// by earlier ones. Pushing apart a compressed edge can leave the world
    /// box, so particles are clamped once more after the last pass.
    ///
    /// That closing clamp is not part of the plain Verlet/Gauss-Seidel
    /// sequence. Wherever relaxation pushes a particle past a wall, positions
    /// (and the implicit velocity of the next tick) differ from a solver that
    /// clamps only after integration.
    pub fn step<O: StepObserver>(
        &mut self,
        config: &SolverConfig<F>,
        bounds: &WorldBounds<F>,
        observer: &mut O,
    ) {
        self.apply_force(Vec3::new(F::zero(), -config.gravity, F::zero()));
        if config.wind_enabled {
            self.apply_force(Vec3::new(config.wind_strength, F::zero(), F::zero()));
        }

        for p in self.particles.iter_mut() {
            p.integrate(config.dt);
            p.clamp_to_bounds(bounds);
        }
        observer.on_integrate();

        self.relax(config.iterations, observer);
        self.clamp_to_bounds(bounds);

        tracing::trace!(
            particles = self.particles.len(),
            active_constraints = self.active_constraint_count(),
            iterations = config.iterations,
            "cloth tick"
        );
        observer.on_step_complete();
    }

    pub fn clamp_to_bounds(&mut self, bounds: &WorldBounds<F>) {
        for p in self.particles.iter_mut() {
            p.clamp_to_bounds(bounds);
        }
    }

    /// Run `iterations` Gauss-Seidel passes over all constraints.
    pub fn relax<O: StepObserver>(&mut self, iterations: usize, observer: &mut O) {
        for i in 0..iterations {
            for c in self.constraints.iter() {
                c.relax(&mut self.particles);
            }
            observer.on_constraint_iteration(i);
        }
    }

    /// Deactivate every constraint touching `index`. Returns how many were
    /// newly deactivated.
    pub fn tear(&mut self, index: usize) -> usize {
        let mut torn = 0;
        for c in self.constraints.iter_mut() {
            if c.is_active() && c.touches(index) {
                c.deactivate();
                torn += 1;
            }
        }
        torn
    }

    pub fn particles(&self) -> &[Particle<F>] { &self.particles }
    pub fn constraints(&self) -> &[DistanceConstraint<F>] { &self.constraints }
    pub fn particle_count(&self) -> usize { self.particles.len() }
    pub fn constraint_count(&self) -> usize { self.constraints.len() }
    pub fn particle(&self, index: usize) -> &Particle<F> { &self.particles[index] }
    pub fn particle_mut(&mut self, index: usize) -> &mut Particle<F> { &mut self.particles[index] }

    pub fn active_constraint_count(&self) -> usize {
        self.constraints.iter().filter(|c| c.is_active()).count()
    }

    pub fn active_constraints(&self) -> impl Iterator<Item = &DistanceConstraint<F>> {
        self.constraints.iter().filter(|c| c.is_active())
    }
}
