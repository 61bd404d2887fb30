//! Forward Euler integrator: `y + dt * f(y, t)`. Local error ~O(dt^2).

use super::{Derivative, Integrator};
use crate::state::StateVector;

#[derive(Clone, Copy, Debug, Default)]
pub struct EulerIntegrator;

impl Integrator for EulerIntegrator {
    fn name(&self) -> &'static str {
        "euler"
    }

    fn step(&mut self, state: &StateVector, f: Derivative, dt: f64) -> StateVector {
        let deriv = f(state);
        let mut next = state.add_scaled(&deriv, dt);
        next.time = state.time + dt;
        next
    }
}
