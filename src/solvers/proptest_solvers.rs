//! Property-based tests for the Kepler/anomaly/element conversions.
//!
//! Mirrors the upstream project's `ephemeris::proptest_ephemeris` style —
//! sample a wide range of orbital parameters and check the algebraic
//! identities the solvers are supposed to hold for all of them, rather
//! than just the handful of fixed cases the unit tests exercise.

use proptest::prelude::*;
use std::f64::consts::TAU;

use super::anomaly::{eccentric_to_mean, eccentric_to_true, mean_to_eccentric, true_to_eccentric};
use super::elements::{ClassicalElements, OrbitalMechanicsSolver};
use super::kepler_equation::solve_kepler_elliptic;

const MU_EARTH: f64 = 398_600.4418;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every converged eccentric anomaly must satisfy Kepler's equation
    /// itself, for any valid mean anomaly and eccentricity.
    #[test]
    fn prop_kepler_solver_satisfies_keplers_equation(
        mean_anomaly in -TAU..TAU,
        eccentricity in 0.0f64..0.95,
    ) {
        let e_anom = solve_kepler_elliptic(mean_anomaly, eccentricity).unwrap();
        let residual = e_anom - eccentricity * e_anom.sin() - wrap_to_pi(mean_anomaly);
        prop_assert!(residual.abs() < 1e-9, "residual {residual} for M={mean_anomaly}, e={eccentricity}");
    }

    /// `M -> E -> nu -> E -> M` is the identity for any valid mean
    /// anomaly and eccentricity, matching spec section 8's round-trip
    /// invariant #2.
    #[test]
    fn prop_anomaly_round_trip_is_identity(
        mean_anomaly in -TAU..TAU,
        eccentricity in 0.0f64..0.95,
    ) {
        let eccentric = mean_to_eccentric(mean_anomaly, eccentricity).unwrap();
        let true_anom = eccentric_to_true(eccentric, eccentricity);
        let back_eccentric = true_to_eccentric(true_anom, eccentricity);
        let back_mean = eccentric_to_mean(back_eccentric, eccentricity);

        prop_assert!((back_eccentric - eccentric).abs() < 1e-10);
        let wrapped = wrap_to_pi(back_mean - wrap_to_pi(mean_anomaly));
        prop_assert!(wrapped.abs() < 1e-9, "wrapped mean anomaly drift {wrapped}");
    }

    /// `state -> elements -> state` is the identity for any non-degenerate
    /// bound orbit, matching spec section 8's round-trip invariant #1.
    #[test]
    fn prop_state_elements_round_trip_is_identity(
        semi_major_axis in 6800.0f64..50_000.0,
        eccentricity in 0.0f64..0.9,
        inclination_deg in 1.0f64..179.0,
        raan_deg in 0.0f64..360.0,
        arg_periapsis_deg in 0.0f64..360.0,
        true_anomaly_deg in 0.0f64..360.0,
    ) {
        let elements = ClassicalElements {
            semi_major_axis,
            eccentricity,
            inclination: inclination_deg.to_radians(),
            raan: raan_deg.to_radians(),
            argument_of_periapsis: arg_periapsis_deg.to_radians(),
            true_anomaly: true_anomaly_deg.to_radians(),
        };

        let solver = OrbitalMechanicsSolver::new(MU_EARTH);
        let (p0, v0) = solver.elements_to_state_vector(&elements);
        let recovered = solver.state_to_elements(p0, v0).unwrap();
        let (p1, v1) = solver.elements_to_state_vector(&recovered);

        prop_assert!((p1 - p0).length() / p0.length() < 1e-7);
        prop_assert!((v1 - v0).length() / v0.length() < 1e-8);
    }
}

fn wrap_to_pi(angle: f64) -> f64 {
    let wrapped = (angle + std::f64::consts::PI).rem_euclid(TAU) - std::f64::consts::PI;
    wrapped
}
