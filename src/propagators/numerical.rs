//! Force-model-driven numerical propagation: any [`Integrator`] advances
//! `y' = (v, a(p, v, t))` where `a` is the composite
//! [`ForceModel::total_acceleration`].
//!
//! Generalizes `physics::mod::physics_step`'s ECS system — which glues an
//! `Ephemeris` lookup and a `ContinuousDeflector` query into one ad hoc
//! ship-specific closure run every frame — into a reusable, non-ECS
//! propagator that owns (or borrows) a `ForceModel` and drives it with
//! whatever `Integrator` the caller picks.

use super::Propagator;
use crate::forces::ForceModel;
use crate::integrators::{integrate, Integrator};
use crate::state::StateVector;
use glam::DVec3;

/// A propagator that advances state by integrating the total acceleration
/// of a [`ForceModel`] with a caller-supplied [`Integrator`].
///
/// `mass` is fixed for the lifetime of this propagator; a caller tracking
/// propellant depletion under continuous thrust should construct a fresh
/// instance (or otherwise feed the updated mass) per burn segment rather
/// than expecting this propagator to deplete it internally — `StateVector`
/// carries no mass slot (spec section 3).
pub struct NumericalPropagator<I: Integrator + Clone> {
    pub force_model: ForceModel,
    pub integrator: I,
    pub mass: f64,
}

impl<I: Integrator + Clone> NumericalPropagator<I> {
    pub fn new(force_model: ForceModel, integrator: I, mass: f64) -> Self {
        Self { force_model, integrator, mass }
    }

    fn derivative(&self, state: &StateVector) -> StateVector {
        let acceleration = self.force_model.total_acceleration(state.position, state.velocity, self.mass, state.time);
        StateVector::new(state.velocity, acceleration, state.time)
    }
}

impl<I: Integrator + Clone> Propagator for NumericalPropagator<I> {
    fn propagate(&self, state0: StateVector, dt: f64, total_t: f64) -> Vec<StateVector> {
        // `integrate` takes `&mut I`; this propagator is shared (`&self`)
        // so each call gets its own integrator clone, matching the
        // "configure-then-run" / re-entrant contract of spec section 5 —
        // Verlet callers must clone before using across independent runs
        // anyway, so cloning here for every `propagate` call is consistent
        // rather than surprising.
        let mut integrator = self.integrator.clone();
        let f = |s: &StateVector| self.derivative(s);
        integrate(&mut integrator, state0, &f, dt, total_t)
    }

    fn step(&self, state: &StateVector, dt: f64) -> StateVector {
        let mut integrator = self.integrator.clone();
        let f = |s: &StateVector| self.derivative(s);
        integrator.step(state, &f, dt)
    }

    fn acceleration(&self, position: DVec3, velocity: DVec3, time: f64) -> DVec3 {
        self.force_model.total_acceleration(position, velocity, self.mass, time)
    }
}
