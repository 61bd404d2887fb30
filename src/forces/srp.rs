//! Solar radiation pressure with a cylindrical shadow model.
//!
//! Not present upstream; grounded on `ThirdBody`'s pattern of taking a
//! `position_at` closure for a time-varying body (here, the Sun) and on
//! spec section 4.3's area-to-mass applicability gate and cylindrical
//! eclipse test.

use super::Force;
use crate::constants::{AU, SOLAR_CONSTANT, SPEED_OF_LIGHT};
use glam::DVec3;

/// `a = Cr * (area/mass) * (flux/c) * u_sun_to_sat`, zeroed out inside a
/// cylindrical shadow behind the central body. Gated off entirely when
/// `area/mass < 0.001 m^2/kg` — below that, SRP is negligible next to
/// central-body gravity for any orbit this crate targets.
pub struct SolarRadiationPressure {
    reflectivity_coefficient: f64,
    area_to_mass: f64,
    sun_position_at: Box<dyn Fn(f64) -> DVec3>,
    central_body_radius: f64,
    enabled: bool,
}

impl SolarRadiationPressure {
    pub fn new(
        reflectivity_coefficient: f64,
        area_to_mass: f64,
        central_body_radius: f64,
        sun_position_at: impl Fn(f64) -> DVec3 + 'static,
    ) -> Self {
        Self {
            reflectivity_coefficient,
            area_to_mass,
            sun_position_at: Box::new(sun_position_at),
            central_body_radius,
            enabled: true,
        }
    }

    /// True if `position` lies within the cylindrical shadow cast by the
    /// central body along the Earth-to-Sun line.
    fn in_shadow(&self, position: DVec3, sun_position: DVec3) -> bool {
        let sun_direction = sun_position.normalize();
        let along_sun_axis = position.dot(sun_direction);
        if along_sun_axis >= 0.0 {
            return false;
        }
        let perpendicular = position - sun_direction * along_sun_axis;
        perpendicular.length() < self.central_body_radius
    }
}

impl Force for SolarRadiationPressure {
    fn name(&self) -> &str {
        "solar_radiation_pressure"
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn applicable(&self, _position: DVec3, _velocity: DVec3, _time: f64) -> bool {
        self.area_to_mass >= 0.001
    }

    fn acceleration(&self, position: DVec3, _velocity: DVec3, _mass: f64, time: f64) -> DVec3 {
        let sun_position = (self.sun_position_at)(time);
        if self.in_shadow(position, sun_position) {
            return DVec3::ZERO;
        }

        let sun_to_sat = position - sun_position;
        let distance_au = sun_to_sat.length() / AU;
        let flux = SOLAR_CONSTANT / (distance_au * distance_au);
        let pressure = flux / SPEED_OF_LIGHT;
        let accel_magnitude_m_s2 = self.reflectivity_coefficient * self.area_to_mass * pressure;

        sun_to_sat.normalize() * (accel_magnitude_m_s2 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::R_EARTH;

    fn sun_at(_t: f64) -> DVec3 {
        DVec3::new(AU, 0.0, 0.0)
    }

    #[test]
    fn gated_off_for_low_area_to_mass() {
        let force = SolarRadiationPressure::new(1.3, 0.0001, R_EARTH, sun_at);
        assert!(!force.applicable(DVec3::new(7000.0, 0.0, 0.0), DVec3::ZERO, 0.0));
    }

    #[test]
    fn zero_in_shadow() {
        let force = SolarRadiationPressure::new(1.3, 0.02, R_EARTH, sun_at);
        // On the opposite side of Earth from the Sun, well within the
        // cylindrical shadow radius.
        let shadowed = DVec3::new(-(R_EARTH + 100.0), 0.0, 0.0);
        let a = force.acceleration(shadowed, DVec3::ZERO, 1.0, 0.0);
        assert_eq!(a, DVec3::ZERO);
    }

    #[test]
    fn pushes_away_from_sun_in_sunlight() {
        let force = SolarRadiationPressure::new(1.3, 0.02, R_EARTH, sun_at);
        let sunlit = DVec3::new(R_EARTH + 500.0, 0.0, 0.0);
        let a = force.acceleration(sunlit, DVec3::ZERO, 1.0, 0.0);
        assert!(a.x > 0.0);
    }
}
