//! Reduced mean-element propagator, SGP4-shaped but not SGP4.
//!
//! Accepts TLE mean elements, advances mean motion with a quadratic
//! secular model (`n(t) = n0 + ndot*t + nddot*t^2`), solves Kepler's
//! equation per step, and rotates the resulting perifocal state into an
//! inertial (TEME-like) frame by `(raan, inclination, argument_of_perigee)`.
//!
//! Spec section 9 is explicit that this is a simplified stand-in, not the
//! Brouwer-Lyddane SGP4/SDP4 (no periodic corrections for J2 long/short
//! period terms, no SGP4 deep-space branch). `acceleration()` returns zero
//! and must not be used as a derivative source (spec section 4.4) — this
//! propagator only produces positions/velocities directly, the way the
//! real SGP4 does.

use super::Propagator;
use crate::constants::{MU_EARTH, SECONDS_PER_DAY};
use crate::diagnostics::DiagnosticSink;
use crate::solvers::{mean_to_true, ClassicalElements, OrbitalMechanicsSolver};
use crate::state::StateVector;
use crate::tle::TleData;
use glam::DVec3;

/// A reduced stand-in for SGP4: propagates TLE mean elements with a
/// quadratic mean-motion secular model and per-step Kepler solves. Not
/// bit-exact to the Brouwer-Lyddane SGP4/SDP4 algorithm.
pub struct ReducedSgp4Propagator {
    pub mu: f64,
    n0: f64,
    ndot: f64,
    nddot: f64,
    eccentricity: f64,
    inclination: f64,
    raan: f64,
    argument_of_perigee: f64,
    mean_anomaly_0: f64,
}

impl ReducedSgp4Propagator {
    /// Build from parsed TLE mean elements. `mu` defaults to Earth's in
    /// `from_tle`; a caller targeting a different central body (unusual
    /// for a TLE-format input, but the unit contract doesn't forbid it)
    /// should use `new` directly.
    pub fn new(mu: f64, tle: &TleData) -> Self {
        let deg = std::f64::consts::PI / 180.0;
        Self {
            mu,
            // n0 in rad/s; ndot/nddot converted from the TLE's rev/day^2,
            // rev/day^3 units to rad/s^2, rad/s^3 so `mean_motion_at`'s
            // polynomial can take `t` in seconds directly.
            n0: tle.mean_motion_rad_per_min() / 60.0,
            ndot: tle.mean_motion_dot * std::f64::consts::TAU / (SECONDS_PER_DAY * SECONDS_PER_DAY),
            nddot: tle.mean_motion_ddot * std::f64::consts::TAU / (SECONDS_PER_DAY * SECONDS_PER_DAY * SECONDS_PER_DAY),
            eccentricity: tle.eccentricity,
            inclination: tle.inclination_deg * deg,
            raan: tle.raan_deg * deg,
            argument_of_perigee: tle.argument_of_perigee_deg * deg,
            mean_anomaly_0: tle.mean_anomaly_deg * deg,
        }
    }

    pub fn from_tle(tle: &TleData) -> Self {
        Self::new(MU_EARTH, tle)
    }

    fn mean_motion_at(&self, t: f64) -> f64 {
        self.n0 + self.ndot * t + self.nddot * t * t
    }

    /// State at `t` seconds since the TLE epoch. `diagnostics`, if
    /// supplied, receives a warning if Kepler's equation fails to
    /// converge (this propagator degrades gracefully to the last mean
    /// anomaly rather than panicking, since SGP4-style extrapolation is
    /// routinely run far past a TLE's practical validity window).
    pub fn state_at(&self, t: f64, diagnostics: Option<&mut DiagnosticSink>) -> StateVector {
        let n = self.mean_motion_at(t);
        let mean_anomaly = self.mean_anomaly_0 + n * t;

        let true_anomaly = match mean_to_true(mean_anomaly, self.eccentricity) {
            Ok(nu) => nu,
            Err(_) => {
                if let Some(sink) = diagnostics {
                    sink.warn("sgp4", format!("Kepler solve did not converge at t={t}; holding last mean anomaly"));
                }
                mean_anomaly
            }
        };

        let semi_major_axis = (self.mu / (n * n)).cbrt();
        let elements = ClassicalElements {
            semi_major_axis,
            eccentricity: self.eccentricity,
            inclination: self.inclination,
            raan: self.raan,
            argument_of_periapsis: self.argument_of_perigee,
            true_anomaly,
        };

        let solver = OrbitalMechanicsSolver::new(self.mu);
        let (position, velocity) = solver.elements_to_state_vector(&elements);
        StateVector::new(position, velocity, t)
    }

    /// Convenience: elapsed seconds from a TLE epoch (year + fractional
    /// day) to an arbitrary later epoch expressed the same way. Uses a
    /// fixed 365.25-day year, adequate for the reduced propagator's own
    /// precision budget (spec section 1's "sub-millisecond time systems"
    /// non-goal already excludes exact calendar/leap-second handling).
    pub fn seconds_since_epoch(epoch_year: u32, epoch_day: f64, target_year: u32, target_day: f64) -> f64 {
        let years = target_year as f64 - epoch_year as f64;
        ((years * 365.25) + (target_day - epoch_day)) * SECONDS_PER_DAY
    }
}

impl Propagator for ReducedSgp4Propagator {
    fn propagate(&self, state0: StateVector, dt: f64, total_t: f64) -> Vec<StateVector> {
        assert!(dt > 0.0, "dt must be positive");
        assert!(total_t >= 0.0, "total_t must be non-negative");

        let n_full_steps = (total_t / dt).ceil() as usize;
        let mut history = Vec::with_capacity(n_full_steps + 1);
        history.push(self.state_at(state0.time, None));

        let mut elapsed = 0.0;
        for _ in 0..n_full_steps {
            let remaining = total_t - elapsed;
            let step_dt = if remaining < dt { remaining } else { dt };
            if step_dt <= 0.0 {
                break;
            }
            elapsed += step_dt;
            history.push(self.state_at(state0.time + elapsed, None));
        }

        history
    }

    fn step(&self, state: &StateVector, dt: f64) -> StateVector {
        self.state_at(state.time + dt, None)
    }

    /// Always zero: this propagator is a closed-form mean-element model,
    /// not a force-driven one, and spec section 4.4 requires this not be
    /// used as a derivative source.
    fn acceleration(&self, _position: DVec3, _velocity: DVec3, _time: f64) -> DVec3 {
        DVec3::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE1: &str = "1 25544U 98067A   24001.50000000  .00016717  00000-0  10270-3 0 90009";
    const LINE2: &str = "2 25544  51.6400 208.9163 0006317 299.0196  62.3362 15.49560239000095";

    #[test]
    fn propagates_without_panicking_and_emits_finite_state() {
        let tle = TleData::parse(LINE1, LINE2).unwrap();
        let propagator = ReducedSgp4Propagator::from_tle(&tle);

        let state0 = propagator.state_at(0.0, None);
        assert!(state0.is_finite());

        let history = propagator.propagate(state0, 60.0, 3600.0);
        assert!(history.last().unwrap().is_finite());
    }

    #[test]
    fn acceleration_is_always_zero() {
        let tle = TleData::parse(LINE1, LINE2).unwrap();
        let propagator = ReducedSgp4Propagator::from_tle(&tle);
        assert_eq!(propagator.acceleration(DVec3::new(7000.0, 0.0, 0.0), DVec3::ZERO, 0.0), DVec3::ZERO);
    }

    #[test]
    fn orbit_stays_near_leo_altitude_over_one_orbit() {
        let tle = TleData::parse(LINE1, LINE2).unwrap();
        let propagator = ReducedSgp4Propagator::from_tle(&tle);
        let period_s = 86400.0 / tle.mean_motion_rev_per_day;

        let history = propagator.propagate(propagator.state_at(0.0, None), 60.0, period_s);
        for state in &history {
            let altitude = state.position.length() - crate::constants::R_EARTH;
            assert!(altitude > 300.0 && altitude < 500.0, "altitude {altitude}");
        }
    }
}
