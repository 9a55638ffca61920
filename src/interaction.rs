//! Runtime manipulation: nearest-particle picking, pin toggling, tearing
//! and dragging.

use crate::cloth::Cloth;
use crate::error::ClothError;
use crate::float::Float;
use crate::handle::ParticleHandle;
use crate::vec::Vec3;

/// An in-progress drag. Cleared whenever the particle collection is rebuilt.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Drag<F: Float> {
    pub(crate) handle: ParticleHandle,
    pub(crate) target: Vec3<F>,
}

/// What a [`Cloth::press`] did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PressOutcome {
    /// Tear mode: the particle lost this many constraints.
    Torn { handle: ParticleHandle, constraints: usize },
    /// A drag started on the particle.
    Dragging(ParticleHandle),
    /// Nothing in range, or the nearest particle is pinned.
    Ignored,
}

impl<F: Float> Cloth<F> {
    /// Particle closest to `point`, if strictly within `radius`.
    ///
    /// Linear scan. Equidistant candidates resolve to the lowest index; that
    /// is an artifact of scan order, not a guarantee.
    pub fn find_nearest(&self, point: Vec3<F>, radius: F) -> Option<ParticleHandle> {
        let mut best: Option<(usize, F)> = None;
        for (i, p) in self.particles().iter().enumerate() {
            let d = p.position.distance(point);
            if d >= radius {
                continue;
            }
            if best.map_or(true, |(_, best_d)| d < best_d) {
                best = Some((i, d));
            }
        }
        best.and_then(|(i, _)| self.handle(i))
    }

    /// Flip the pinned flag. Returns the new state. Constraints are untouched.
    pub fn toggle_pin(&mut self, handle: ParticleHandle) -> Result<bool, ClothError> {
        let index = self.resolve(handle)?;
        let pinned = self.solver_mut().particle_mut(index).toggle_pin();
        tracing::debug!(index, pinned, "toggled pin");
        Ok(pinned)
    }

    /// Deactivate every constraint attached to the particle, leaving it as an
    /// isolated point. Returns how many constraints were torn.
    pub fn tear(&mut self, handle: ParticleHandle) -> Result<usize, ClothError> {
        let index = self.resolve(handle)?;
        let torn = self.solver_mut().tear(index);
        tracing::debug!(index, torn, "tore particle");
        Ok(torn)
    }

    /// Start (or retarget) a drag and move the particle to `target` at once.
    ///
    /// Until [`Cloth::release_drag`], every tick places the particle at
    /// `target` with zero implicit velocity. Pinned particles are not dragged;
    /// returns whether a drag is active.
    pub fn drag(&mut self, handle: ParticleHandle, target: Vec3<F>) -> Result<bool, ClothError> {
        let index = self.resolve(handle)?;
        if self.particles()[index].pinned {
            return Ok(false);
        }
        if self.active_drag.map(|d| d.handle) != Some(handle) {
            tracing::debug!(index, "drag started");
        }
        self.active_drag = Some(Drag { handle, target });
        self.apply_drag();
        Ok(true)
    }

    /// End the current drag, if any. The particle keeps zero velocity.
    pub fn release_drag(&mut self) {
        if let Some(drag) = self.active_drag.take() {
            tracing::debug!(index = drag.handle.index(), "drag released");
        }
    }

    pub fn dragged(&self) -> Option<ParticleHandle> {
        self.active_drag.map(|d| d.handle)
    }

    /// Pointer press at `point`: tears the nearest particle in tear mode,
    /// otherwise starts dragging it.
    pub fn press(&mut self, point: Vec3<F>, radius: F) -> PressOutcome {
        let Some(handle) = self.find_nearest(point, radius) else {
            return PressOutcome::Ignored;
        };
        if self.is_tear_mode() {
            return match self.tear(handle) {
                Ok(constraints) => PressOutcome::Torn { handle, constraints },
                Err(_) => PressOutcome::Ignored,
            };
        }
        match self.drag(handle, point) {
            Ok(true) => PressOutcome::Dragging(handle),
            _ => PressOutcome::Ignored,
        }
    }

    pub(crate) fn apply_drag(&mut self) {
        let Some(drag) = self.active_drag else { return };
        let Ok(index) = self.resolve(drag.handle) else {
            self.active_drag = None;
            return;
        };
        let particle = self.solver_mut().particle_mut(index);
        if !particle.pinned {
            particle.move_to(drag.target);
        }
    }
}
