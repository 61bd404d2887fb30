//! End-to-end scenarios exercising public entry points the way a caller
//! would: build a state or configuration, run a propagator or solver, and
//! check the result against a closed-form or textbook reference value.

use astrodyne_core::constants::MU_EARTH;
use astrodyne_core::forces::{CentralGravity, ForceModel};
use astrodyne_core::integrators::Rk4Integrator;
use astrodyne_core::propagators::{KeplerianPropagator, NumericalPropagator, Propagator};
use astrodyne_core::solvers::{solve_kepler_elliptic, solve_lambert, ClassicalElements, LambertConfig, ManeuverOptimizer, OrbitalMechanicsSolver};
use astrodyne_core::state::StateVector;
use glam::DVec3;

fn orbit_state(elements: &ClassicalElements, mu: f64) -> StateVector {
    let solver = OrbitalMechanicsSolver::new(mu);
    let (position, velocity) = solver.elements_to_state_vector(elements);
    StateVector::new(position, velocity, 0.0)
}

#[test]
fn leo_circular_400km_one_period_matches_predicted_period_and_closes_position() {
    let elements = ClassicalElements {
        semi_major_axis: 6778.137,
        eccentricity: 0.0,
        inclination: 51.6_f64.to_radians(),
        raan: 0.0,
        argument_of_periapsis: 0.0,
        true_anomaly: 0.0,
    };
    let state0 = orbit_state(&elements, MU_EARTH);

    let predicted_period = std::f64::consts::TAU * (elements.semi_major_axis.powi(3) / MU_EARTH).sqrt();
    assert!((predicted_period - 5553.64).abs() < 0.05, "period = {predicted_period}");

    let mut model = ForceModel::new();
    model.add(Box::new(CentralGravity::new(MU_EARTH)));
    let propagator = NumericalPropagator::new(model, Rk4Integrator, 1000.0);

    let history = propagator.propagate(state0, 10.0, predicted_period);
    let drift = (history.last().unwrap().position - state0.position).length();
    assert!(drift < 1.0e-3, "position drift {drift} km after one period");
}

#[test]
fn geo_period_matches_sidereal_day() {
    let elements = ClassicalElements {
        semi_major_axis: 42_164.137,
        eccentricity: 0.0,
        inclination: 0.0,
        raan: 0.0,
        argument_of_periapsis: 0.0,
        true_anomaly: 0.0,
    };
    let period = std::f64::consts::TAU * (elements.semi_major_axis.powi(3) / MU_EARTH).sqrt();
    assert!((period - 86_164.09).abs() < 1.0, "period = {period}");
}

#[test]
fn hohmann_leo_to_geo_matches_published_delta_v_and_tof() {
    let optimizer = ManeuverOptimizer::new(MU_EARTH);
    let plan = optimizer.hohmann(6778.0, 42_164.0);

    assert!((plan.delta_v1 - 2.431).abs() < 1e-3, "dv1 = {}", plan.delta_v1);
    assert!((plan.delta_v2 - 1.466).abs() < 1e-3, "dv2 = {}", plan.delta_v2);
    assert!((plan.total_delta_v - 3.897).abs() < 1e-3, "total = {}", plan.total_delta_v);
    assert!((plan.transfer_time - 19_041.0).abs() < 5.0, "tof = {}", plan.transfer_time);
}

#[test]
fn kepler_solver_matches_textbook_value() {
    let e_anom = solve_kepler_elliptic(1.0, 0.5).unwrap();
    assert!((e_anom - 1.498_635_2).abs() < 1e-9, "E = {e_anom}");
}

#[test]
fn lambert_earth_to_earth_transfer_reproduces_target_under_numerical_propagation() {
    let r1 = DVec3::new(7000.0, 0.0, 0.0);
    let r2 = DVec3::new(0.0, 8000.0, 0.0);
    let tof = 3600.0;

    let config = LambertConfig::new(r1, r2, tof, MU_EARTH, true);
    let solution = solve_lambert(config);
    assert!(solution.feasible);
    assert!(solution.v1.is_finite());
    assert!(solution.v2.is_finite());

    let mut model = ForceModel::new();
    model.add(Box::new(CentralGravity::new(MU_EARTH)));
    let propagator = NumericalPropagator::new(model, Rk4Integrator, 1000.0);

    let s0 = StateVector::new(r1, solution.v1, 0.0);
    let history = propagator.propagate(s0, 10.0, tof);
    let arrival_error = (history.last().unwrap().position - r2).length();
    assert!(arrival_error < 10.0, "arrival error {arrival_error} km");
}

#[test]
fn j2_nodal_regression_matches_sun_synchronous_rate_within_half_percent() {
    use astrodyne_core::constants::{J2, R_EARTH};
    use astrodyne_core::propagators::{AnalyticalPropagator, PerturbationMode};

    let elements = ClassicalElements {
        semi_major_axis: 7178.0,
        eccentricity: 0.0,
        inclination: 98.6_f64.to_radians(),
        raan: 0.0,
        argument_of_periapsis: 0.0,
        true_anomaly: 0.0,
    };
    let state0 = orbit_state(&elements, MU_EARTH);

    let propagator = AnalyticalPropagator::new(MU_EARTH, PerturbationMode::J2Secular, J2, R_EARTH);
    let thirty_days = 30.0 * 86_400.0;
    let history = propagator.propagate(state0, 600.0, thirty_days);

    let solver = OrbitalMechanicsSolver::new(MU_EARTH);
    let final_elements = solver.state_to_elements(history.last().unwrap().position, history.last().unwrap().velocity).unwrap();

    let raan_change_deg = (final_elements.raan - elements.raan).to_degrees().rem_euclid(360.0);
    let regressed_deg = 360.0 - raan_change_deg;
    let expected_30_day_deg = 360.0 * (30.0 / 365.25);
    let relative_error = (regressed_deg - expected_30_day_deg).abs() / expected_30_day_deg;
    assert!(relative_error < 0.005, "regressed {regressed_deg} deg vs expected {expected_30_day_deg} deg (error {relative_error})");
}

#[test]
fn keplerian_propagator_matches_numerical_propagator_for_pure_two_body_motion() {
    let elements = ClassicalElements {
        semi_major_axis: 7500.0,
        eccentricity: 0.1,
        inclination: 30.0_f64.to_radians(),
        raan: 10.0_f64.to_radians(),
        argument_of_periapsis: 20.0_f64.to_radians(),
        true_anomaly: 0.0,
    };
    let state0 = orbit_state(&elements, MU_EARTH);
    let period = std::f64::consts::TAU * (elements.semi_major_axis.powi(3) / MU_EARTH).sqrt();

    let keplerian = KeplerianPropagator::new(MU_EARTH);
    let kep_final = keplerian.propagate(state0, 30.0, period / 2.0);

    let mut model = ForceModel::new();
    model.add(Box::new(CentralGravity::new(MU_EARTH)));
    let numerical = NumericalPropagator::new(model, Rk4Integrator, 1000.0);
    let num_final = numerical.propagate(state0, 30.0, period / 2.0);

    let drift = (kep_final.last().unwrap().position - num_final.last().unwrap().position).length();
    assert!(drift < 1.0, "keplerian/numerical disagreement {drift} km over half a period");
}
