//! Propagators: the four families named in spec section 4 that turn a
//! state and a time span into a trajectory.
//!
//! Generalizes `physics::mod::physics_step`'s single ECS-coupled stepping
//! function into a set of composable, non-ECS propagators sharing one
//! trait, so a caller can swap a closed-form Keplerian propagator for a
//! force-model-driven numerical one without touching calling code.

mod analytical;
mod keplerian;
mod numerical;
mod sgp4;

#[cfg(test)]
mod proptest_propagators;

pub use analytical::{AnalyticalPropagator, PerturbationMode};
pub use keplerian::KeplerianPropagator;
pub use numerical::NumericalPropagator;
pub use sgp4::ReducedSgp4Propagator;

use crate::state::StateVector;
use glam::DVec3;

/// Common propagation contract. `propagate` is the bulk operation;
/// `step`/`acceleration` expose the single-step and instantaneous-force
/// primitives a caller composing propagators (e.g. patching a Keplerian
/// coast onto a numerical burn) needs directly.
pub trait Propagator {
    fn propagate(&self, state0: StateVector, dt: f64, total_t: f64) -> Vec<StateVector>;
    fn step(&self, state: &StateVector, dt: f64) -> StateVector;
    fn acceleration(&self, position: DVec3, velocity: DVec3, time: f64) -> DVec3;
}
