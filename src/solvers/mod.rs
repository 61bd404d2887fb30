//! Two-point boundary value and anomaly-conversion solvers: Kepler's
//! equation, Lambert's problem, classical-element conversion, and maneuver
//! design built atop them.

mod anomaly;
mod elements;
mod kepler_equation;
mod lambert;
mod maneuver;

#[cfg(test)]
mod proptest_solvers;

pub use anomaly::{
    eccentric_to_mean, eccentric_to_true, hyperbolic_to_mean, hyperbolic_to_true, mean_to_eccentric, mean_to_hyperbolic, mean_to_true,
    true_to_eccentric, true_to_hyperbolic, true_to_mean,
};
pub use elements::{ClassicalElements, OrbitClass, OrbitalMechanicsSolver};
pub use kepler_equation::{solve_kepler_elliptic, solve_kepler_hyperbolic};
pub use lambert::{solve_lambert, solve_lambert_multi_rev, LambertConfig, LambertSolution};
pub use maneuver::ManeuverOptimizer;

use crate::forces::j2_secular_rates;

fn zonal_rates(a: f64, e: f64, i: f64, mu: f64, j2: f64, equatorial_radius: f64) -> (f64, f64, f64) {
    j2_secular_rates(a, e, i, mu, j2, equatorial_radius)
}
