//! Verlet point masses.

use crate::config::WorldBounds;
use crate::float::Float;
use crate::vec::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A Verlet particle: velocity is implicit in `position - prev_position`.
///
/// A pinned particle ignores forces and integration; only explicit
/// repositioning ([`Particle::move_to`]) or bounds clamping moves it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Particle<F: Float> {
    pub position: Vec3<F>,
    pub prev_position: Vec3<F>,
    pub force: Vec3<F>,
    pub pinned: bool,
}

impl<F: Float> Particle<F> {
    /// A free particle at rest.
    pub fn new(position: Vec3<F>) -> Self {
        Particle {
            position,
            prev_position: position,
            force: Vec3::zero(),
            pinned: false,
        }
    }

    /// A pinned particle at rest.
    pub fn pinned(position: Vec3<F>) -> Self {
        Particle { pinned: true, ..Particle::new(position) }
    }

    pub fn with_pinned(position: Vec3<F>, pinned: bool) -> Self {
        Particle { pinned, ..Particle::new(position) }
    }

    /// Accumulate a force for the next integration. Ignored while pinned.
    pub fn apply_force(&mut self, force: Vec3<F>) {
        if !self.pinned {
            self.force += force;
        }
    }

    /// Störmer-Verlet step with no damping term. Clears the force accumulator.
    pub fn integrate(&mut self, dt: F) {
        if self.pinned {
            return;
        }
        let velocity = self.position - self.prev_position;
        self.prev_position = self.position;
        self.position = self.position + velocity + self.force.scale(dt * dt);
        self.force = Vec3::zero();
    }

    /// Hard-truncate every axis into `[0, dimension]`. Applies to pinned particles too.
    pub fn clamp_to_bounds(&mut self, bounds: &WorldBounds<F>) {
        let p = &mut self.position;
        p.x = p.x.clamp(F::zero(), bounds.width);
        p.y = p.y.clamp(F::zero(), bounds.height);
        p.z = p.z.clamp(F::zero(), bounds.depth);
    }

    /// Teleport without inducing velocity: both current and previous position
    /// are set, so the next integration sees the particle at rest.
    pub fn move_to(&mut self, position: Vec3<F>) {
        self.position = position;
        self.prev_position = position;
    }

    /// Per-step displacement, the implicit velocity scaled by `dt`.
    pub fn velocity_raw(&self) -> Vec3<F> {
        self.position - self.prev_position
    }

    pub fn toggle_pin(&mut self) -> bool {
        self.pinned = !self.pinned;
        self.pinned
    }
}
