//! Exponential-atmosphere drag.
//!
//! Not present upstream (a heliocentric asteroid simulator has no
//! atmosphere); grounded on the pack's perturbation-force shape
//! (`physics::gravity`'s single acceleration contribution) generalized to
//! the drag model spec section 4.3 describes: an exponential density
//! profile, corotating atmosphere, and a hard altitude cutoff above which
//! the force is not even evaluated.

use super::Force;
use crate::constants::OMEGA_EARTH;
use glam::DVec3;

/// `a = -0.5 * Cd * (area/mass) * rho(h) * |v_rel| * v_rel`, with
/// `v_rel = v - omega_earth x r` accounting for atmospheric corotation and
/// `rho(h) = rho0 * exp(-h / H)` an exponential density profile anchored at
/// the central body's surface. Gated off above 1000 km altitude.
#[derive(Clone, Copy, Debug)]
pub struct ExponentialDrag {
    drag_coefficient: f64,
    area_to_mass: f64,
    reference_density: f64,
    scale_height: f64,
    equatorial_radius: f64,
    omega: f64,
    enabled: bool,
}

impl ExponentialDrag {
    /// `area_to_mass` in m^2/kg (a spacecraft's ballistic coefficient
    /// input), `reference_density` in kg/m^3, `scale_height` in km.
    pub fn new(drag_coefficient: f64, area_to_mass: f64, reference_density: f64, scale_height: f64, equatorial_radius: f64) -> Self {
        Self {
            drag_coefficient,
            area_to_mass,
            reference_density,
            scale_height,
            equatorial_radius,
            omega: OMEGA_EARTH,
            enabled: true,
        }
    }

    /// Earth defaults: `rho0 = 1.225 kg/m^3` at the surface, `H = 8.5 km`.
    pub fn earth_default(drag_coefficient: f64, area_to_mass: f64) -> Self {
        Self::new(drag_coefficient, area_to_mass, 1.225, 8.5, crate::constants::R_EARTH)
    }

    fn altitude(&self, position: DVec3) -> f64 {
        position.length() - self.equatorial_radius
    }

    fn density(&self, altitude: f64) -> f64 {
        self.reference_density * (-altitude / self.scale_height).exp()
    }
}

impl Force for ExponentialDrag {
    fn name(&self) -> &str {
        "drag"
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn applicable(&self, position: DVec3, _velocity: DVec3, _time: f64) -> bool {
        self.altitude(position) < 1000.0
    }

    fn acceleration(&self, position: DVec3, velocity: DVec3, _mass: f64, _time: f64) -> DVec3 {
        let omega_vec = DVec3::new(0.0, 0.0, self.omega);
        let v_rel = velocity - omega_vec.cross(position);
        let speed = v_rel.length();
        let rho = self.density(self.altitude(position));
        // 1000x collects the km/s -> m/s conversion implicit in rho (kg/m^3)
        // and area_to_mass (m^2/kg) being expressed in SI while position and
        // velocity stay in km and km/s throughout this crate.
        let factor = -500.0 * self.drag_coefficient * self.area_to_mass * rho * speed;
        v_rel * factor
    }
}
