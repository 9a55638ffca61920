//! Hooks into the phases of a cloth tick.

/// Receives a callback at each phase boundary of [`ConstraintSolver::step`].
///
/// Every hook defaults to doing nothing, so an observer only overrides the
/// phases it cares about. Useful for counting passes in tests or sampling
/// particle state mid-tick.
///
/// [`ConstraintSolver::step`]: crate::ConstraintSolver::step
pub trait StepObserver {
    /// Forces have been consumed and every particle has moved, with its new
    /// position already clamped into the world box. No constraint has been
    /// relaxed yet.
    fn on_integrate(&mut self) {}

    /// One relaxation pass over all constraints has finished. `pass` counts
    /// from 0, so the last call of a tick sees `iterations - 1`.
    fn on_constraint_iteration(&mut self, _pass: usize) {}

    /// Relaxation and the closing clamp are done. Particle state is what the
    /// next read will see.
    fn on_step_complete(&mut self) {}
}

/// Observer for callers that do not watch ticks.
pub struct NoOpStepObserver;

impl StepObserver for NoOpStepObserver {}
