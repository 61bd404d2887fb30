//! Factory constructors bundling a handful of forces into the `ForceModel`
//! combinations spec section 4.4 names as reference regimes: LEO, GEO, and
//! interplanetary. These are starting points, not prescriptions — every
//! force they add can be toggled or replaced afterward through the usual
//! `ForceModel` API.
//!
//! The Sun/Moon positions used here are simplified circular-orbit
//! approximations, not a full ephemeris service (coordinate frames and
//! ephemerides beyond GMST/geodetic conversions are out of scope); callers
//! needing precise third-body positions should build their own `ThirdBody`
//! with a real ephemeris closure instead of using these presets as-is.

use super::{CentralGravity, ExponentialDrag, ForceModel, SolarRadiationPressure, ThirdBody, J2, J3J4};
use crate::constants::{AU, MU_EARTH, MU_MOON, MU_SUN, R_EARTH, SECONDS_PER_DAY};
use glam::DVec3;

fn circular_position(distance: f64, period_seconds: f64, inclination: f64, time: f64) -> DVec3 {
    let angle = std::f64::consts::TAU * time / period_seconds;
    let x = distance * angle.cos();
    let y = distance * angle.sin() * inclination.cos();
    let z = distance * angle.sin() * inclination.sin();
    DVec3::new(x, y, z)
}

fn sun_position_approx(time: f64) -> DVec3 {
    circular_position(AU, 365.25 * SECONDS_PER_DAY, 0.0, time)
}

fn moon_position_approx(time: f64) -> DVec3 {
    circular_position(384_400.0, 27.32 * SECONDS_PER_DAY, 5.145_f64.to_radians(), time)
}

impl ForceModel {
    /// Central gravity, J2/J3+J4 oblateness, and exponential drag. Suitable
    /// for LEO propagation where third-body and SRP effects are usually
    /// second-order next to oblateness and drag.
    pub fn leo_preset(drag_coefficient: f64, area_to_mass: f64) -> Self {
        let mut model = Self::new();
        model.add(Box::new(CentralGravity::new(MU_EARTH)));
        model.add(Box::new(J2::new(MU_EARTH, crate::constants::J2, R_EARTH)));
        model.add(Box::new(J3J4::new(MU_EARTH, crate::constants::J3, crate::constants::J4, R_EARTH)));
        model.add(Box::new(ExponentialDrag::earth_default(drag_coefficient, area_to_mass)));
        model
    }

    /// Central gravity, J2, lunisolar third-body perturbations, and SRP —
    /// the long-period drivers of GEO station-keeping analysis.
    pub fn geo_preset(reflectivity_coefficient: f64, area_to_mass: f64) -> Self {
        let mut model = Self::new();
        model.add(Box::new(CentralGravity::new(MU_EARTH)));
        model.add(Box::new(J2::new(MU_EARTH, crate::constants::J2, R_EARTH)));
        model.add(Box::new(ThirdBody::new("sun", MU_SUN, R_EARTH, sun_position_approx)));
        model.add(Box::new(ThirdBody::new("moon", MU_MOON, R_EARTH, moon_position_approx)));
        model.add(Box::new(SolarRadiationPressure::new(reflectivity_coefficient, area_to_mass, R_EARTH, sun_position_approx)));
        model
    }

    /// Heliocentric central gravity plus SRP, for cruise-phase
    /// interplanetary trajectories where Earth/Moon are third bodies only
    /// near departure and arrival (not modeled by this preset — add a
    /// `ThirdBody` explicitly for those phases).
    pub fn interplanetary_preset(reflectivity_coefficient: f64, area_to_mass: f64) -> Self {
        let mut model = Self::new();
        model.add(Box::new(CentralGravity::new(MU_SUN)));
        model.add(Box::new(SolarRadiationPressure::new(reflectivity_coefficient, area_to_mass, 0.0, |_t| DVec3::ZERO)));
        model
    }
}
