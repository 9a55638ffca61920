//! Distance constraints between two particles.

use crate::float::Float;
use crate::particle::Particle;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A distance edge between particles `a` and `b`, addressed by index into the
/// owning particle collection.
///
/// `rest_length` is fixed at construction. A torn constraint keeps its slot
/// with `active == false` and is skipped by relaxation and rendering.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DistanceConstraint<F: Float> {
    pub a: usize,
    pub b: usize,
    rest_length: F,
    active: bool,
}

impl<F: Float> DistanceConstraint<F> {
    /// Capture the current distance between `a` and `b` as rest length.
    ///
    /// Panics if either index is out of range for `particles`.
    pub fn new(a: usize, b: usize, particles: &[Particle<F>]) -> Self {
        let rest = particles[a].position.distance(particles[b].position);
        DistanceConstraint { a, b, rest_length: floor_rest(rest), active: true }
    }

    /// Use an explicit rest length. A non-positive value falls back to the
    /// current distance, and a zero distance to `F::epsilon()`.
    pub fn with_rest_length(a: usize, b: usize, rest_length: F, particles: &[Particle<F>]) -> Self {
        if rest_length > F::zero() {
            DistanceConstraint { a, b, rest_length, active: true }
        } else {
            Self::new(a, b, particles)
        }
    }

    pub fn rest_length(&self) -> F {
        self.rest_length
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Tombstone this constraint. Idempotent.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn touches(&self, index: usize) -> bool {
        self.a == index || self.b == index
    }

    /// Current endpoint separation.
    pub fn length(&self, particles: &[Particle<F>]) -> F {
        particles[self.a].position.distance(particles[self.b].position)
    }

    /// Stretch relative to half the rest length, saturating at 1.
    pub fn strain(&self, particles: &[Particle<F>]) -> F {
        let deviation = (self.length(particles) - self.rest_length).abs();
        (deviation / (self.rest_length * F::half())).min(F::one())
    }

    /// One Gauss-Seidel projection step.
    ///
    /// Each free endpoint moves by half the error regardless of whether its
    /// partner is pinned, so edges next to pins converge more slowly.
    pub fn relax(&self, particles: &mut [Particle<F>]) {
        if !self.active {
            return;
        }
        let delta = particles[self.b].position - particles[self.a].position;
        let current = delta.length();
        if current == F::zero() {
            return;
        }
        let ratio = (current - self.rest_length) / current;
        let correction = delta.scale(F::half() * ratio);

        if !particles[self.a].pinned {
            particles[self.a].position += correction;
        }
        if !particles[self.b].pinned {
            particles[self.b].position -= correction;
        }
    }
}

fn floor_rest<F: Float>(rest: F) -> F {
    if rest > F::zero() { rest } else { F::epsilon() }
}
