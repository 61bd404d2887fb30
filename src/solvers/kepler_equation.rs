//! Kepler's equation: elliptic and hyperbolic Newton solvers.
//!
//! Direct descendant of `ephemeris::kepler::solve_eccentric_anomaly`, with
//! its own TODOs acted on: a typed `Result` instead of silently returning
//! whatever the last iteration produced, and the hyperbolic branch the
//! TODOs flagged as unsupported.

use crate::error::KeplerError;

const TOLERANCE: f64 = 1e-12;
const MAX_ITERATIONS: usize = 50;

/// Solve `M = E - e sin(E)` for `E`, elliptic orbits (`0 <= e < 1`).
/// Newton's method from the upstream project's initial guess (`M` itself,
/// or `pi` for high eccentricity where `M` is a poor starting point).
pub fn solve_kepler_elliptic(mean_anomaly: f64, eccentricity: f64) -> Result<f64, KeplerError> {
    if !(0.0..1.0).contains(&eccentricity) {
        return Err(KeplerError::InvalidDomain { eccentricity });
    }

    let m = wrap_to_pi(mean_anomaly);
    let mut e_anom = if eccentricity >= 0.8 { std::f64::consts::PI } else { m + eccentricity * m.sin() };

    for iteration in 0..MAX_ITERATIONS {
        let f = e_anom - eccentricity * e_anom.sin() - m;
        let f_prime = 1.0 - eccentricity * e_anom.cos();
        let delta = f / f_prime;
        e_anom -= delta;

        if delta.abs() < TOLERANCE {
            return Ok(e_anom);
        }

        if iteration == MAX_ITERATIONS - 1 {
            return Err(KeplerError::NonConvergence { iterations: MAX_ITERATIONS, residual: delta.abs() });
        }
    }

    unreachable!("loop always returns within MAX_ITERATIONS")
}

/// Solve `M = e sinh(H) - H` for the hyperbolic anomaly `H`, `e > 1`.
/// Initial guess from Vallado: `ln(2|M|/e + 1.8)`, signed to match `M`.
pub fn solve_kepler_hyperbolic(mean_anomaly: f64, eccentricity: f64) -> Result<f64, KeplerError> {
    if eccentricity <= 1.0 {
        return Err(KeplerError::InvalidDomain { eccentricity });
    }

    let m = mean_anomaly;
    let sign = if m < 0.0 { -1.0 } else { 1.0 };
    let mut h = sign * (2.0 * m.abs() / eccentricity + 1.8).ln();

    for iteration in 0..MAX_ITERATIONS {
        let f = eccentricity * h.sinh() - h - m;
        let f_prime = eccentricity * h.cosh() - 1.0;
        let delta = f / f_prime;
        h -= delta;

        if delta.abs() < TOLERANCE {
            return Ok(h);
        }

        if iteration == MAX_ITERATIONS - 1 {
            return Err(KeplerError::NonConvergence { iterations: MAX_ITERATIONS, residual: delta.abs() });
        }
    }

    unreachable!("loop always returns within MAX_ITERATIONS")
}

fn wrap_to_pi(angle: f64) -> f64 {
    let wrapped = angle % std::f64::consts::TAU;
    if wrapped > std::f64::consts::PI {
        wrapped - std::f64::consts::TAU
    } else if wrapped < -std::f64::consts::PI {
        wrapped + std::f64::consts::TAU
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elliptic_solution_satisfies_keplers_equation() {
        let m = 1.0;
        let e = 0.5;
        let eccentric_anomaly = solve_kepler_elliptic(m, e).unwrap();
        let residual = eccentric_anomaly - e * eccentric_anomaly.sin() - m;
        assert!(residual.abs() < 1e-10);
    }

    #[test]
    fn circular_orbit_mean_equals_eccentric_anomaly() {
        let eccentric_anomaly = solve_kepler_elliptic(2.0, 0.0).unwrap();
        assert!((eccentric_anomaly - 2.0).abs() < 1e-12);
    }

    #[test]
    fn high_eccentricity_converges() {
        let eccentric_anomaly = solve_kepler_elliptic(0.1, 0.95).unwrap();
        let residual = eccentric_anomaly - 0.95 * eccentric_anomaly.sin() - 0.1;
        assert!(residual.abs() < 1e-10);
    }

    #[test]
    fn invalid_eccentricity_rejected_for_elliptic_branch() {
        assert_eq!(solve_kepler_elliptic(1.0, 1.2), Err(KeplerError::InvalidDomain { eccentricity: 1.2 }));
        assert_eq!(solve_kepler_elliptic(1.0, -0.1), Err(KeplerError::InvalidDomain { eccentricity: -0.1 }));
    }

    #[test]
    fn hyperbolic_solution_satisfies_keplers_equation() {
        let m = 2.0;
        let e = 1.5;
        let h = solve_kepler_hyperbolic(m, e).unwrap();
        let residual = e * h.sinh() - h - m;
        assert!(residual.abs() < 1e-9);
    }

    #[test]
    fn hyperbolic_branch_rejects_elliptic_eccentricity() {
        assert_eq!(solve_kepler_hyperbolic(1.0, 0.5), Err(KeplerError::InvalidDomain { eccentricity: 0.5 }));
    }

    #[test]
    fn hyperbolic_solution_is_odd_in_mean_anomaly() {
        let h_pos = solve_kepler_hyperbolic(3.0, 2.0).unwrap();
        let h_neg = solve_kepler_hyperbolic(-3.0, 2.0).unwrap();
        assert!((h_pos + h_neg).abs() < 1e-9);
    }
}
