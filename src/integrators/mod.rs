//! Pluggable ODE integrators over [`StateVector`].
//!
//! Generalizes the upstream project's single hardcoded Velocity-Verlet
//! integrator (`physics::integrator::IAS15State`) into a small capability
//! set any of Euler / RK4 / RKF45 / Velocity-Verlet can implement, plus a
//! generic [`AdaptiveStepController`] that wraps any of them — per the
//! "polymorphism via base classes -> capability set" redesign flag.

mod adaptive;
mod euler;
mod rk4;
mod rkf45;
mod verlet;

pub use adaptive::AdaptiveStepController;
pub use euler::EulerIntegrator;
pub use rk4::Rk4Integrator;
pub use rkf45::Rkf45Integrator;
pub use verlet::VelocityVerletIntegrator;

use crate::state::StateVector;

/// A pure state derivative: given a state (position, velocity, time),
/// returns a state whose `position` field carries the velocity
/// contribution and whose `velocity` field carries the acceleration
/// contribution (spec section 3's `StateDerivative`).
pub type Derivative<'a> = &'a dyn Fn(&StateVector) -> StateVector;

/// A single-step ODE integrator.
pub trait Integrator {
    fn name(&self) -> &'static str;

    /// Advance `state` by `dt` using derivative `f`. Pure except for
    /// Velocity-Verlet's cached prior acceleration.
    fn step(&mut self, state: &StateVector, f: Derivative, dt: f64) -> StateVector;
}

/// An integrator that can also estimate its own local truncation error and
/// propose a next step size, independent of [`AdaptiveStepController`]'s
/// generic wrapper (RKF45 computes both from its embedded pair; RK4 uses
/// Richardson extrapolation instead and should be wrapped by
/// `AdaptiveStepController` rather than implementing this directly).
pub trait AdaptiveIntegrator: Integrator {
    /// Returns `(next_state, proposed_next_dt, error_estimate)`.
    fn adaptive_step(&mut self, state: &StateVector, f: Derivative, dt: f64) -> (StateVector, f64, f64);
}

/// Drive `integrator` from `state0` for total time `total_t`, in fixed steps
/// of `dt`, clamping the final step so the total elapsed time is exact.
/// Emits `ceil(total_t / dt) + 1` states including `state0`.
pub fn integrate<I: Integrator>(
    integrator: &mut I,
    state0: StateVector,
    f: Derivative,
    dt: f64,
    total_t: f64,
) -> Vec<StateVector> {
    assert!(dt > 0.0, "dt must be positive");
    assert!(total_t >= 0.0, "total_t must be non-negative");

    let n_full_steps = (total_t / dt).ceil() as usize;
    let mut history = Vec::with_capacity(n_full_steps + 1);
    history.push(state0);

    let mut state = state0;
    let mut elapsed = 0.0;
    for _ in 0..n_full_steps {
        let remaining = total_t - elapsed;
        let step_dt = if remaining < dt { remaining } else { dt };
        if step_dt <= 0.0 {
            break;
        }
        state = integrator.step(&state, f, step_dt);
        elapsed += step_dt;
        history.push(state);
    }

    history
}
