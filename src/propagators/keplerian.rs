//! Closed-form Keplerian propagation: state -> elements -> advance mean
//! anomaly analytically -> solve Kepler -> elements -> state.
//!
//! Direct generalization of `ephemeris::kepler::KeplerOrbit` (2D,
//! argument-of-periapsis-only parameterization, fixed to the Sun) to the
//! full 3D classical element set routed through
//! [`crate::solvers::OrbitalMechanicsSolver`], so any central body's `mu`
//! works, not just `GM_SUN`.

use super::Propagator;
use crate::solvers::{mean_to_true, true_to_mean, ClassicalElements, OrbitalMechanicsSolver};
use crate::state::StateVector;
use glam::DVec3;

/// Propagates a state analytically under pure two-body (Keplerian)
/// motion: no force model, no integrator, exact to the precision of the
/// Kepler-equation solve.
pub struct KeplerianPropagator {
    pub mu: f64,
}

impl KeplerianPropagator {
    pub fn new(mu: f64) -> Self {
        Self { mu }
    }

    /// Advance `elements` by `dt` seconds: `n = sqrt(mu / a^3)`, mean
    /// anomaly advances linearly, then the true anomaly is recovered by
    /// solving Kepler's equation. Panics (via the solver's `unwrap`) only
    /// if Kepler's equation fails to converge, which `solve_kepler_*`
    /// guards against for valid eccentricities; a hyperbolic orbit
    /// (`eccentricity > 1`) uses the hyperbolic branch.
    pub fn advance_elements(&self, elements: &ClassicalElements, dt: f64) -> ClassicalElements {
        let mut next = *elements;

        if elements.eccentricity < 1.0 {
            let n = (self.mu / elements.semi_major_axis.powi(3)).sqrt();
            let m0 = true_to_mean(elements.true_anomaly, elements.eccentricity);
            let m1 = m0 + n * dt;
            next.true_anomaly = mean_to_true(m1, elements.eccentricity).expect("elliptic Kepler solve should converge for a valid orbit");
        } else {
            let a = elements.semi_major_axis.abs();
            let n = (self.mu / a.powi(3)).sqrt();
            let m0 = crate::solvers::true_to_hyperbolic(elements.true_anomaly, elements.eccentricity);
            let m0 = crate::solvers::hyperbolic_to_mean(m0, elements.eccentricity);
            let m1 = m0 + n * dt;
            let h1 = crate::solvers::mean_to_hyperbolic(m1, elements.eccentricity).expect("hyperbolic Kepler solve should converge for a valid orbit");
            next.true_anomaly = crate::solvers::hyperbolic_to_true(h1, elements.eccentricity);
        }

        next
    }
}

impl Propagator for KeplerianPropagator {
    /// Emits `ceil(total_t / dt) + 1` states including `state0`, matching
    /// the integrator driver's sampling convention (spec section 4.2) even
    /// though this propagator has no per-step truncation error to bound.
    fn propagate(&self, state0: StateVector, dt: f64, total_t: f64) -> Vec<StateVector> {
        assert!(dt > 0.0, "dt must be positive");
        assert!(total_t >= 0.0, "total_t must be non-negative");

        let solver = OrbitalMechanicsSolver::new(self.mu);
        let elements0 = solver.state_to_elements(state0.position, state0.velocity).expect("state0 must not be degenerate");

        let n_full_steps = (total_t / dt).ceil() as usize;
        let mut history = Vec::with_capacity(n_full_steps + 1);
        history.push(state0);

        let mut elapsed = 0.0;
        for _ in 0..n_full_steps {
            let remaining = total_t - elapsed;
            let step_dt = if remaining < dt { remaining } else { dt };
            if step_dt <= 0.0 {
                break;
            }
            elapsed += step_dt;
            let elements = self.advance_elements(&elements0, elapsed);
            let (position, velocity) = solver.elements_to_state_vector(&elements);
            history.push(StateVector::new(position, velocity, state0.time + elapsed));
        }

        history
    }

    fn step(&self, state: &StateVector, dt: f64) -> StateVector {
        let solver = OrbitalMechanicsSolver::new(self.mu);
        let elements = solver.state_to_elements(state.position, state.velocity).expect("state must not be degenerate");
        let next_elements = self.advance_elements(&elements, dt);
        let (position, velocity) = solver.elements_to_state_vector(&next_elements);
        StateVector::new(position, velocity, state.time + dt)
    }

    /// The central-gravity acceleration this propagator's analytic motion
    /// is equivalent to — used by callers composing a Keplerian coast with
    /// a numerical burn.
    fn acceleration(&self, position: DVec3, _velocity: DVec3, _time: f64) -> DVec3 {
        let r = position.length();
        position * (-self.mu / (r * r * r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MU_EARTH;

    #[test]
    fn leo_circular_orbit_period_matches_closed_form() {
        let a = 6778.137;
        let v = (MU_EARTH / a).sqrt();
        let s0 = StateVector::new(DVec3::new(a, 0.0, 0.0), DVec3::new(0.0, v, 0.0), 0.0);
        let period = std::f64::consts::TAU * (a.powi(3) / MU_EARTH).sqrt();

        let propagator = KeplerianPropagator::new(MU_EARTH);
        let history = propagator.propagate(s0, 10.0, period);
        let last = history.last().unwrap();

        assert!((last.position - s0.position).length() < 1.0e-6);
    }

    #[test]
    fn step_is_consistent_with_propagate() {
        let a = 7000.0;
        let v = (MU_EARTH / a).sqrt();
        let s0 = StateVector::new(DVec3::new(a, 0.0, 0.0), DVec3::new(0.0, v, 0.0), 0.0);
        let propagator = KeplerianPropagator::new(MU_EARTH);

        let stepped = propagator.step(&s0, 500.0);
        let propagated = propagator.propagate(s0, 500.0, 500.0);

        assert!((stepped.position - propagated.last().unwrap().position).length() < 1.0e-6);
    }

    #[test]
    fn hyperbolic_orbit_advances_without_panicking() {
        let s0 = StateVector::new(DVec3::new(10_000.0, 0.0, 0.0), DVec3::new(0.0, 12.0, 1.0), 0.0);
        let propagator = KeplerianPropagator::new(MU_EARTH);
        let history = propagator.propagate(s0, 60.0, 600.0);
        assert!(history.last().unwrap().is_finite());
    }
}
