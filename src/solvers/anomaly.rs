//! Conversions between true, eccentric/hyperbolic, and mean anomaly.
//!
//! Generalizes `ephemeris::kepler::eccentric_to_true_anomaly`'s single
//! elliptic conversion into the full conversion graph spec section 4.5
//! calls for, plus the hyperbolic analogues, using the half-angle
//! `atan2`/`atanh` forms that stay well-conditioned near `e = 0` and near
//! periapsis (`nu = 0`) where a naive `acos` form loses precision.

use super::kepler_equation::{solve_kepler_elliptic, solve_kepler_hyperbolic};
use crate::error::KeplerError;

/// `E -> nu`, elliptic.
pub fn eccentric_to_true(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let half = eccentric_anomaly / 2.0;
    2.0 * ((1.0 + eccentricity).sqrt() * half.sin()).atan2((1.0 - eccentricity).sqrt() * half.cos())
}

/// `nu -> E`, elliptic.
pub fn true_to_eccentric(true_anomaly: f64, eccentricity: f64) -> f64 {
    let half = true_anomaly / 2.0;
    2.0 * ((1.0 - eccentricity).sqrt() * half.sin()).atan2((1.0 + eccentricity).sqrt() * half.cos())
}

/// `E -> M`, elliptic.
pub fn eccentric_to_mean(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    eccentric_anomaly - eccentricity * eccentric_anomaly.sin()
}

/// `M -> E`, elliptic.
pub fn mean_to_eccentric(mean_anomaly: f64, eccentricity: f64) -> Result<f64, KeplerError> {
    solve_kepler_elliptic(mean_anomaly, eccentricity)
}

/// `M -> nu`, elliptic. Composition convenience for propagators.
pub fn mean_to_true(mean_anomaly: f64, eccentricity: f64) -> Result<f64, KeplerError> {
    mean_to_eccentric(mean_anomaly, eccentricity).map(|e_anom| eccentric_to_true(e_anom, eccentricity))
}

/// `nu -> M`, elliptic.
pub fn true_to_mean(true_anomaly: f64, eccentricity: f64) -> f64 {
    eccentric_to_mean(true_to_eccentric(true_anomaly, eccentricity), eccentricity)
}

/// `H -> nu`, hyperbolic.
pub fn hyperbolic_to_true(hyperbolic_anomaly: f64, eccentricity: f64) -> f64 {
    let half = hyperbolic_anomaly / 2.0;
    2.0 * ((eccentricity + 1.0).sqrt() * half.sinh()).atan2((eccentricity - 1.0).sqrt() * half.cosh())
}

/// `nu -> H`, hyperbolic.
pub fn true_to_hyperbolic(true_anomaly: f64, eccentricity: f64) -> f64 {
    let half = true_anomaly / 2.0;
    let ratio = ((eccentricity - 1.0) / (eccentricity + 1.0)).sqrt() * half.tan();
    2.0 * ratio.atanh()
}

/// `H -> M`, hyperbolic.
pub fn hyperbolic_to_mean(hyperbolic_anomaly: f64, eccentricity: f64) -> f64 {
    eccentricity * hyperbolic_anomaly.sinh() - hyperbolic_anomaly
}

/// `M -> H`, hyperbolic.
pub fn mean_to_hyperbolic(mean_anomaly: f64, eccentricity: f64) -> Result<f64, KeplerError> {
    solve_kepler_hyperbolic(mean_anomaly, eccentricity)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elliptic_round_trip_true_eccentric() {
        let nu = 1.2;
        let e = 0.3;
        let e_anom = true_to_eccentric(nu, e);
        let nu2 = eccentric_to_true(e_anom, e);
        assert!((nu - nu2).abs() < 1e-12);
    }

    #[test]
    fn elliptic_round_trip_through_mean() {
        let nu = 2.0;
        let e = 0.6;
        let m = true_to_mean(nu, e);
        let nu2 = mean_to_true(m, e).unwrap();
        assert!((nu - nu2).abs() < 1e-9);
    }

    #[test]
    fn hyperbolic_round_trip_true_hyperbolic() {
        let nu = 0.8;
        let e = 1.8;
        let h = true_to_hyperbolic(nu, e);
        let nu2 = hyperbolic_to_true(h, e);
        assert!((nu - nu2).abs() < 1e-9);
    }

    #[test]
    fn hyperbolic_round_trip_through_mean() {
        let h = 1.5;
        let e = 2.2;
        let m = hyperbolic_to_mean(h, e);
        let h2 = mean_to_hyperbolic(m, e).unwrap();
        assert!((h - h2).abs() < 1e-9);
    }

    #[test]
    fn circular_orbit_true_equals_eccentric_anomaly() {
        let nu = 1.0;
        assert!((true_to_eccentric(nu, 0.0) - nu).abs() < 1e-12);
    }
}
