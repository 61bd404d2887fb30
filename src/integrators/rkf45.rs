//! Runge-Kutta-Fehlberg 4(5), an embedded pair that produces an order-5
//! solution and an order-4 companion from the same six stage evaluations;
//! `error = ||y5 - y4||` (normalized by [`StateVector::error_norm`]).

use super::{AdaptiveIntegrator, Derivative, Integrator};
use crate::state::StateVector;

#[derive(Clone, Copy, Debug, Default)]
pub struct Rkf45Integrator;

impl Rkf45Integrator {
    fn stages(&self, state: &StateVector, f: Derivative, dt: f64) -> [StateVector; 6] {
        let k1 = f(state);

        let s2 = state.add_scaled(&k1, dt * (1.0 / 4.0));
        let k2 = f(&s2);

        let s3 = state
            .add_scaled(&k1, dt * (3.0 / 32.0))
            .add_scaled(&k2, dt * (9.0 / 32.0));
        let k3 = f(&s3);

        let s4 = state
            .add_scaled(&k1, dt * (1932.0 / 2197.0))
            .add_scaled(&k2, dt * (-7200.0 / 2197.0))
            .add_scaled(&k3, dt * (7296.0 / 2197.0));
        let k4 = f(&s4);

        let s5 = state
            .add_scaled(&k1, dt * (439.0 / 216.0))
            .add_scaled(&k2, dt * -8.0)
            .add_scaled(&k3, dt * (3680.0 / 513.0))
            .add_scaled(&k4, dt * (-845.0 / 4104.0));
        let k5 = f(&s5);

        let s6 = state
            .add_scaled(&k1, dt * (-8.0 / 27.0))
            .add_scaled(&k2, dt * 2.0)
            .add_scaled(&k3, dt * (-3544.0 / 2565.0))
            .add_scaled(&k4, dt * (1859.0 / 4104.0))
            .add_scaled(&k5, dt * (-11.0 / 40.0));
        let k6 = f(&s6);

        [k1, k2, k3, k4, k5, k6]
    }

    /// Combine stage derivatives into a state increment with the given
    /// per-stage weights.
    fn combine(state: &StateVector, k: &[StateVector; 6], w: [f64; 6], dt: f64) -> StateVector {
        let mut acc = StateVector::default();
        for i in 0..6 {
            acc.position += k[i].position * w[i];
            acc.velocity += k[i].velocity * w[i];
        }
        let mut next = state.add_scaled(&acc, dt);
        next.time = state.time + dt;
        next
    }
}

const B5: [f64; 6] = [16.0 / 135.0, 0.0, 6656.0 / 12825.0, 28561.0 / 56430.0, -9.0 / 50.0, 2.0 / 55.0];
const B4: [f64; 6] = [25.0 / 216.0, 0.0, 1408.0 / 2565.0, 2197.0 / 4104.0, -1.0 / 5.0, 0.0];

impl Integrator for Rkf45Integrator {
    fn name(&self) -> &'static str {
        "rkf45"
    }

    fn step(&mut self, state: &StateVector, f: Derivative, dt: f64) -> StateVector {
        let k = self.stages(state, f, dt);
        Self::combine(state, &k, B5, dt)
    }
}

impl AdaptiveIntegrator for Rkf45Integrator {
    fn adaptive_step(&mut self, state: &StateVector, f: Derivative, dt: f64) -> (StateVector, f64, f64) {
        let k = self.stages(state, f, dt);
        let y5 = Self::combine(state, &k, B5, dt);
        let y4 = Self::combine(state, &k, B4, dt);
        let err = y5.error_norm(&y4);
        (y5, dt, err)
    }
}
