//! Central-body gravity and third-body perturbations.
//!
//! Generalizes `physics::gravity::compute_acceleration`'s
//! "sum GM/r^2 toward every ephemeris body" loop: `CentralGravity` is the
//! always-on primary term, `ThirdBody` is the per-body perturbation with
//! the indirect (central-body) term spec section 9's third open question
//! flags as "nominally correct but fragile at close encounters" — kept,
//! since the formula is standard, but documented.

use super::Force;
use glam::DVec3;

/// `a = -mu * p / |p|^3`, always enabled and always applicable — the
/// dominant term a numerical propagator's force model always carries.
#[derive(Clone, Copy, Debug)]
pub struct CentralGravity {
    mu: f64,
    enabled: bool,
}

impl CentralGravity {
    pub fn new(mu: f64) -> Self {
        Self { mu, enabled: true }
    }
}

impl Force for CentralGravity {
    fn name(&self) -> &str {
        "central_gravity"
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn applicable(&self, _position: DVec3, _velocity: DVec3, _time: f64) -> bool {
        true
    }

    fn acceleration(&self, position: DVec3, _velocity: DVec3, _mass: f64, _time: f64) -> DVec3 {
        let r = position.length();
        position * (-self.mu / (r * r * r))
    }
}

/// A single perturbing body: `mu_b * ((r_b - p)/|r_b - p|^3 - r_b/|r_b|^3)`.
/// The position function is evaluated at the current time so third bodies
/// can move along their own ephemeris during propagation.
///
/// Gated off below 1000 km altitude above the central body per spec
/// section 4.3 (negligible relative to the central term that close in).
///
/// Carries its own `name` (e.g. `"sun"`, `"moon"`) rather than a fixed
/// `"third_body"` literal: `ForceModel::add` replaces any existing force
/// of the same name, so a model with more than one third body needs each
/// instance to report a distinct name or they'd overwrite each other.
pub struct ThirdBody {
    name: String,
    mu: f64,
    position_at: Box<dyn Fn(f64) -> DVec3>,
    central_body_radius: f64,
    enabled: bool,
}

impl ThirdBody {
    pub fn new(name: impl Into<String>, mu: f64, central_body_radius: f64, position_at: impl Fn(f64) -> DVec3 + 'static) -> Self {
        Self { name: name.into(), mu, position_at: Box::new(position_at), central_body_radius, enabled: true }
    }
}

impl Force for ThirdBody {
    fn name(&self) -> &str {
        &self.name
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn applicable(&self, position: DVec3, _velocity: DVec3, _time: f64) -> bool {
        position.length() - self.central_body_radius > 1000.0
    }

    fn acceleration(&self, position: DVec3, _velocity: DVec3, _mass: f64, time: f64) -> DVec3 {
        let r_b = (self.position_at)(time);
        let delta = r_b - position;
        let d = delta.length();
        let rb_mag = r_b.length();
        if d < 1e-9 || rb_mag < 1e-9 {
            return DVec3::ZERO;
        }
        delta * (self.mu / (d * d * d)) - r_b * (self.mu / (rb_mag * rb_mag * rb_mag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MU_EARTH, R_EARTH};

    #[test]
    fn central_gravity_points_toward_origin() {
        let force = CentralGravity::new(MU_EARTH);
        let p = DVec3::new(7000.0, 0.0, 0.0);
        let a = force.acceleration(p, DVec3::ZERO, 1.0, 0.0);
        assert!(a.x < 0.0);
        assert!(a.y.abs() < 1e-12 && a.z.abs() < 1e-12);
    }

    #[test]
    fn central_gravity_magnitude_matches_inverse_square() {
        let force = CentralGravity::new(MU_EARTH);
        let p = DVec3::new(7000.0, 0.0, 0.0);
        let a = force.acceleration(p, DVec3::ZERO, 1.0, 0.0);
        let expected = MU_EARTH / (7000.0 * 7000.0);
        assert!((a.length() - expected).abs() / expected < 1e-12);
    }

    #[test]
    fn third_body_gated_off_close_to_central_body() {
        let moon = ThirdBody::new("moon", 4902.8, R_EARTH, |_t| DVec3::new(384_400.0, 0.0, 0.0));
        let near = DVec3::new(R_EARTH + 10.0, 0.0, 0.0);
        assert!(!moon.applicable(near, DVec3::ZERO, 0.0));
        let far = DVec3::new(R_EARTH + 2000.0, 0.0, 0.0);
        assert!(moon.applicable(far, DVec3::ZERO, 0.0));
    }
}
