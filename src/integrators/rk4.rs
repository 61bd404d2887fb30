//! Classical 4-stage Runge-Kutta integrator, weights 1/6, 1/3, 1/3, 1/6.
//!
//! The adaptive variant uses Richardson extrapolation: one full step is
//! compared against two half steps, the twin-step (more accurate) solution
//! is taken, and the error estimate is `|full - twin| / 15` (the standard
//! doubling-error normalization for a 4th-order method).

use super::{AdaptiveIntegrator, Derivative, Integrator};
use crate::state::StateVector;

#[derive(Clone, Copy, Debug, Default)]
pub struct Rk4Integrator;

impl Rk4Integrator {
    fn stage(&self, state: &StateVector, f: Derivative, dt: f64) -> StateVector {
        let k1 = f(state);
        let s2 = state.add_scaled(&k1, dt / 2.0);
        let k2 = f(&s2);
        let s3 = state.add_scaled(&k2, dt / 2.0);
        let k3 = f(&s3);
        let s4 = state.add_scaled(&k3, dt);
        let k4 = f(&s4);

        let mut avg = k1;
        avg.position = (k1.position + k2.position * 2.0 + k3.position * 2.0 + k4.position) / 6.0;
        avg.velocity = (k1.velocity + k2.velocity * 2.0 + k3.velocity * 2.0 + k4.velocity) / 6.0;

        let mut next = state.add_scaled(&avg, dt);
        next.time = state.time + dt;
        next
    }
}

impl Integrator for Rk4Integrator {
    fn name(&self) -> &'static str {
        "rk4"
    }

    fn step(&mut self, state: &StateVector, f: Derivative, dt: f64) -> StateVector {
        self.stage(state, f, dt)
    }
}

impl AdaptiveIntegrator for Rk4Integrator {
    fn adaptive_step(&mut self, state: &StateVector, f: Derivative, dt: f64) -> (StateVector, f64, f64) {
        let full = self.stage(state, f, dt);

        let half = self.stage(state, f, dt / 2.0);
        let twin = self.stage(&half, f, dt / 2.0);

        let err = full.error_norm(&twin) / 15.0;
        (twin, dt, err)
    }
}
