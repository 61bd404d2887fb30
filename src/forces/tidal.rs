//! Degree-2 solid-body tidal correction.
//!
//! Not present upstream; grounded on `ThirdBody`'s closure-based
//! perturbing-body position and on the standard closed-form degree-2 tidal
//! acceleration (Montenbruck & Gill, *Satellite Orbits*, eq. 3.10): the
//! central body's tidal bulge raised by a perturbing body adds a small,
//! always-on correction to the satellite's gravity.

use super::Force;
use glam::DVec3;

/// `a = k2 * mu_p * Re^5 / r^6 * [(3 - 15 cos(g)^2) r_hat + 6 cos(g) r_hat_p]`,
/// where `g` is the angle between the satellite and the perturbing body as
/// seen from the central body.
pub struct Tidal {
    love_number: f64,
    perturbing_mu: f64,
    central_radius: f64,
    perturbing_position_at: Box<dyn Fn(f64) -> DVec3>,
    enabled: bool,
}

impl Tidal {
    /// `love_number` is the central body's degree-2 Love number (k2 ~ 0.3
    /// for Earth).
    pub fn new(love_number: f64, perturbing_mu: f64, central_radius: f64, perturbing_position_at: impl Fn(f64) -> DVec3 + 'static) -> Self {
        Self {
            love_number,
            perturbing_mu,
            central_radius,
            perturbing_position_at: Box::new(perturbing_position_at),
            enabled: true,
        }
    }
}

impl Force for Tidal {
    fn name(&self) -> &str {
        "tidal"
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

    fn acceleration(&self, position: DVec3, _velocity: DVec3, _mass: f64, time: f64) -> DVec3 {
        let r = position.length();
        if r < 1e-9 {
            return DVec3::ZERO;
        }
        let r_hat = position / r;

        let perturbing_position = (self.perturbing_position_at)(time);
        let perturbing_distance = perturbing_position.length();
        if perturbing_distance < 1e-9 {
            return DVec3::ZERO;
        }
        let perturbing_hat = perturbing_position / perturbing_distance;

        let cos_g = r_hat.dot(perturbing_hat);
        let coefficient = self.love_number * self.perturbing_mu * self.central_radius.powi(5) / r.powi(6);

        (r_hat * (3.0 - 15.0 * cos_g * cos_g) + perturbing_hat * (6.0 * cos_g)) * coefficient
    }
}
