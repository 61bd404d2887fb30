//! Event detection: sign-changing scalar functions of state whose zero
//! crossings mark orbital events (apoapsis/periapsis, node crossings,
//! eclipse entry/exit).
//!
//! Grounded on `collision.rs`'s straddling-sample idiom (check a condition
//! between consecutive physics samples, flag the crossing) and
//! `outcome::TrajectoryOutcome`'s sign/threshold classification style,
//! generalized from that module's fixed collision/escape/stable
//! trichotomy into reusable signed detectors a caller composes freely.

use crate::state::StateVector;

/// Radial-velocity detector: zero at apoapsis and periapsis, positive
/// while climbing, negative while descending.
pub fn apoapsis_periapsis(state: &StateVector) -> f64 {
    state.position.normalize_or_zero().dot(state.velocity)
}

/// Z-coordinate detector: zero at the ascending/descending nodes (where
/// the orbit crosses the reference xy-plane).
pub fn node_crossing(state: &StateVector) -> f64 {
    state.position.z
}

/// Eclipse detector from a precomputed shadow factor (1.0 = fully lit,
/// 0.0 = fully shadowed, matching `forces::srp`'s convention): zero at
/// the shadow boundary.
pub fn eclipse(shadow_factor: f64) -> f64 {
    shadow_factor - 0.5
}

/// Bisect the time of a zero crossing straddled by `state_before` and
/// `state_after` (consecutive propagation samples with `g` of opposite
/// sign), given the scalar detector `g`. Up to `max_iterations` bisection
/// steps; `propagate_to` re-evaluates a state at an arbitrary intermediate
/// time (typically a single-step numerical or Keplerian propagate call).
pub fn refine_event<G, P>(
    state_before: StateVector,
    state_after: StateVector,
    g: G,
    propagate_to: P,
    max_iterations: u32,
) -> f64
where
    G: Fn(&StateVector) -> f64,
    P: Fn(f64) -> StateVector,
{
    let mut t_lo = state_before.time;
    let mut t_hi = state_after.time;
    let mut g_lo = g(&state_before);

    for _ in 0..max_iterations {
        let t_mid = 0.5 * (t_lo + t_hi);
        let state_mid = propagate_to(t_mid);
        let g_mid = g(&state_mid);

        if g_mid == 0.0 {
            return t_mid;
        }
        if g_lo.signum() == g_mid.signum() {
            t_lo = t_mid;
            g_lo = g_mid;
        } else {
            t_hi = t_mid;
        }
    }

    0.5 * (t_lo + t_hi)
}

/// Secant-interpolated estimate of the zero-crossing time between two
/// straddling samples, without re-evaluating the propagator — a cheaper
/// alternative to [`refine_event`] when only the two bracketing states
/// are available.
pub fn secant_refine_event(state_before: &StateVector, g_before: f64, state_after: &StateVector, g_after: f64) -> f64 {
    if (g_after - g_before).abs() < f64::EPSILON {
        return 0.5 * (state_before.time + state_after.time);
    }
    state_before.time - g_before * (state_after.time - state_before.time) / (g_after - g_before)
}

/// Whether two consecutive detector samples straddle a zero crossing.
pub fn straddles_zero(g_before: f64, g_after: f64) -> bool {
    g_before == 0.0 || (g_before.signum() != g_after.signum() && g_before != 0.0 && g_after != 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MU_EARTH;
    use crate::propagators::{KeplerianPropagator, Propagator};
    use glam::DVec3;

    #[test]
    fn apoapsis_periapsis_crosses_zero_at_periapsis_of_eccentric_orbit() {
        let a = 10_000.0;
        let e = 0.3;
        let r_p = a * (1.0 - e);
        let v_p = ((MU_EARTH / a) * (1.0 + e) / (1.0 - e)).sqrt();

        let s0 = StateVector::new(DVec3::new(r_p, 0.0, 0.0), DVec3::new(0.0, v_p, 0.0), 0.0);
        assert!(apoapsis_periapsis(&s0).abs() < 1e-9);

        let propagator = KeplerianPropagator::new(MU_EARTH);
        let quarter_period = std::f64::consts::TAU * (a.powi(3) / MU_EARTH).sqrt() / 4.0;
        let later = propagator.step(&s0, quarter_period);
        assert!(apoapsis_periapsis(&later) > 0.0, "expected climbing after periapsis");
    }

    #[test]
    fn node_crossing_is_zero_for_equatorial_orbit() {
        let s = StateVector::new(DVec3::new(7000.0, 0.0, 0.0), DVec3::new(0.0, 7.5, 0.0), 0.0);
        assert_eq!(node_crossing(&s), 0.0);
    }

    #[test]
    fn refine_event_converges_to_periapsis_time() {
        let a = 10_000.0;
        let e = 0.3;
        let mu = MU_EARTH;
        let propagator = KeplerianPropagator::new(mu);

        let r_p = a * (1.0 - e);
        let v_p = ((mu / a) * (1.0 + e) / (1.0 - e)).sqrt();
        let periapsis_state = StateVector::new(DVec3::new(r_p, 0.0, 0.0), DVec3::new(0.0, v_p, 0.0), 0.0);

        let period = std::f64::consts::TAU * (a.powi(3) / mu).sqrt();
        let before = propagator.step(&periapsis_state, -10.0);
        let after = propagator.step(&periapsis_state, 10.0);

        let t_event = refine_event(before, after, apoapsis_periapsis, |t| propagator.step(&periapsis_state, t), 30);
        assert!(t_event.abs() < 1e-6, "t_event = {t_event}, period = {period}");
    }

    #[test]
    fn eclipse_detector_zero_at_half_shadow() {
        assert_eq!(eclipse(0.5), 0.0);
        assert!(eclipse(1.0) > 0.0);
        assert!(eclipse(0.0) < 0.0);
    }

    #[test]
    fn straddles_zero_detects_sign_change_only() {
        assert!(straddles_zero(-1.0, 1.0));
        assert!(!straddles_zero(1.0, 2.0));
        assert!(straddles_zero(0.0, 1.0));
    }
}
