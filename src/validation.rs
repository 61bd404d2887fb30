//! Non-test validation harness: runs a named propagation scenario against
//! an expected end state and reports the position/velocity/energy/angular
//! momentum drift.
//!
//! Generalizes `test_utils.rs`'s `fixtures`/`assertions` split (fixtures
//! build states, assertions compute/compare invariants) into a reusable
//! runtime module, so the end-to-end scenarios in spec section 8 can be
//! driven outside `#[cfg(test)]` — e.g. from a CLI, a benchmark harness, or
//! a notebook-style caller — rather than only from the crate's own test
//! suite.

use glam::DVec3;

use crate::state::StateVector;

/// A single validation scenario: propagate `initial_state` for `duration`
/// seconds with `propagate` and compare against `expected_state`.
pub struct ValidationTestCase<F>
where
    F: Fn(StateVector, f64) -> StateVector,
{
    pub name: &'static str,
    pub initial_state: StateVector,
    pub propagate: F,
    pub duration: f64,
    pub expected_state: StateVector,
    /// Gravitational parameter used for the energy/angular-momentum
    /// invariant checks (not necessarily the only attracting body the
    /// propagator itself models, for perturbed scenarios this is the
    /// dominant central-body `mu`).
    pub mu: f64,
}

/// Position/velocity error against the expected end state, plus specific
/// energy and angular-momentum drift against the initial state — the four
/// invariants `test_utils.rs`'s `assertions` module checked individually,
/// bundled into one report.
#[derive(Clone, Copy, Debug)]
pub struct ValidationReport {
    pub name: &'static str,
    /// `‖position_actual - position_expected‖`, km.
    pub position_error: f64,
    /// `‖velocity_actual - velocity_expected‖`, km/s.
    pub velocity_error: f64,
    /// Relative drift of specific orbital energy between the initial and
    /// final state of the actual propagation.
    pub energy_error: f64,
    /// Relative drift of specific angular momentum magnitude between the
    /// initial and final state of the actual propagation.
    pub angular_momentum_error: f64,
}

impl ValidationReport {
    /// Whether every error metric is within `tolerance`.
    pub fn within_tolerance(&self, tolerance: f64) -> bool {
        self.position_error <= tolerance
            && self.velocity_error <= tolerance
            && self.energy_error <= tolerance
            && self.angular_momentum_error <= tolerance
    }
}

fn specific_energy(position: DVec3, velocity: DVec3, mu: f64) -> f64 {
    let r = position.length();
    let v = velocity.length();
    0.5 * v * v - mu / r
}

fn specific_angular_momentum(position: DVec3, velocity: DVec3) -> DVec3 {
    position.cross(velocity)
}

impl<F> ValidationTestCase<F>
where
    F: Fn(StateVector, f64) -> StateVector,
{
    pub fn run(&self) -> ValidationReport {
        let actual = (self.propagate)(self.initial_state, self.duration);

        let position_error = (actual.position - self.expected_state.position).length();
        let velocity_error = (actual.velocity - self.expected_state.velocity).length();

        let energy0 = specific_energy(self.initial_state.position, self.initial_state.velocity, self.mu);
        let energy1 = specific_energy(actual.position, actual.velocity, self.mu);
        let energy_error = relative_drift(energy0, energy1);

        let h0 = specific_angular_momentum(self.initial_state.position, self.initial_state.velocity).length();
        let h1 = specific_angular_momentum(actual.position, actual.velocity).length();
        let angular_momentum_error = relative_drift(h0, h1);

        ValidationReport {
            name: self.name,
            position_error,
            velocity_error,
            energy_error,
            angular_momentum_error,
        }
    }
}

fn relative_drift(initial: f64, final_value: f64) -> f64 {
    if initial.abs() > 1e-10 {
        ((final_value - initial) / initial).abs()
    } else {
        (final_value - initial).abs()
    }
}
