//! Classical orbital elements: state vector <-> element conversion, orbit
//! classification, and J2 secular rates.
//!
//! Generalizes `outcome::compute_orbital_elements`'s vis-viva-based
//! `{a, e, energy, h, period}` (2D, Sun-centric, no plane orientation) to
//! the full classical six-element set, resolving the upstream's implicit
//! choice of argument-of-periapsis convention into the explicit
//! circular/equatorial singularity handling below (Open Question decision
//! recorded in `DESIGN.md`): when the orbit is circular the "argument of
//! periapsis" slot instead holds the argument of latitude, when equatorial
//! it holds the longitude of periapsis, and when both it holds the true
//! longitude — each substitution documented at the field, not silently
//! returned as zero.

use super::zonal_rates;
use crate::error::CoordinateError;
use glam::DVec3;

const EQUATORIAL_TOLERANCE: f64 = 1e-8;
const CIRCULAR_TOLERANCE: f64 = 1e-8;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OrbitClass {
    Circular,
    Elliptical,
    Parabolic,
    Hyperbolic,
}

/// Classical elements. When the orbit is circular and/or equatorial,
/// `argument_of_periapsis` and/or `true_anomaly` hold the substitute
/// angles described above rather than being undefined.
#[derive(Clone, Copy, Debug)]
pub struct ClassicalElements {
    pub semi_major_axis: f64,
    pub eccentricity: f64,
    pub inclination: f64,
    pub raan: f64,
    pub argument_of_periapsis: f64,
    pub true_anomaly: f64,
}

pub struct OrbitalMechanicsSolver {
    pub mu: f64,
}

impl OrbitalMechanicsSolver {
    pub fn new(mu: f64) -> Self {
        Self { mu }
    }

    pub fn state_to_elements(&self, position: DVec3, velocity: DVec3) -> Result<ClassicalElements, CoordinateError> {
        let r = position.length();
        if r < 1e-9 {
            return Err(CoordinateError::DegenerateState);
        }

        let h_vec = position.cross(velocity);
        let h = h_vec.length();
        if h < 1e-9 {
            return Err(CoordinateError::DegenerateState);
        }

        let node_vec = DVec3::Z.cross(h_vec);
        let n = node_vec.length();

        let e_vec = (velocity.cross(h_vec) / self.mu) - position / r;
        let e = e_vec.length();

        let speed_sq = velocity.length_squared();
        let specific_energy = speed_sq / 2.0 - self.mu / r;
        let semi_major_axis = if e.abs() > 1.0 - 1e-12 && e.abs() < 1.0 + 1e-12 {
            f64::INFINITY
        } else {
            -self.mu / (2.0 * specific_energy)
        };

        let inclination = (h_vec.z / h).clamp(-1.0, 1.0).acos();
        let equatorial = inclination.abs() < EQUATORIAL_TOLERANCE || (std::f64::consts::PI - inclination).abs() < EQUATORIAL_TOLERANCE;
        let circular = e < CIRCULAR_TOLERANCE;

        let raan = if equatorial {
            0.0
        } else {
            let raw = (node_vec.x / n).clamp(-1.0, 1.0).acos();
            if node_vec.y < 0.0 {
                std::f64::consts::TAU - raw
            } else {
                raw
            }
        };

        let argument_of_periapsis = if circular {
            0.0
        } else if equatorial {
            // Longitude of periapsis: angle from x-axis to periapsis.
            let raw = (e_vec.x / e).clamp(-1.0, 1.0).acos();
            if e_vec.y < 0.0 {
                std::f64::consts::TAU - raw
            } else {
                raw
            }
        } else {
            let raw = (node_vec.dot(e_vec) / (n * e)).clamp(-1.0, 1.0).acos();
            if e_vec.z < 0.0 {
                std::f64::consts::TAU - raw
            } else {
                raw
            }
        };

        let true_anomaly = if circular && equatorial {
            // True longitude: angle from x-axis to position.
            let raw = (position.x / r).clamp(-1.0, 1.0).acos();
            if position.y < 0.0 {
                std::f64::consts::TAU - raw
            } else {
                raw
            }
        } else if circular {
            // Argument of latitude: angle from node to position.
            let raw = (node_vec.dot(position) / (n * r)).clamp(-1.0, 1.0).acos();
            if position.z < 0.0 {
                std::f64::consts::TAU - raw
            } else {
                raw
            }
        } else {
            let raw = (e_vec.dot(position) / (e * r)).clamp(-1.0, 1.0).acos();
            if position.dot(velocity) < 0.0 {
                std::f64::consts::TAU - raw
            } else {
                raw
            }
        };

        Ok(ClassicalElements { semi_major_axis, eccentricity: e, inclination, raan, argument_of_periapsis, true_anomaly })
    }

    pub fn elements_to_state(&self, elements: &ClassicalElements) -> DVec3 {
        self.elements_to_state_vector(elements).0
    }

    /// Returns `(position, velocity)` in the parent inertial frame.
    pub fn elements_to_state_vector(&self, elements: &ClassicalElements) -> (DVec3, DVec3) {
        let p = elements.semi_major_axis * (1.0 - elements.eccentricity * elements.eccentricity);
        let r = p / (1.0 + elements.eccentricity * elements.true_anomaly.cos());

        let r_perifocal = DVec3::new(r * elements.true_anomaly.cos(), r * elements.true_anomaly.sin(), 0.0);
        let v_perifocal = (self.mu / p).sqrt()
            * DVec3::new(-elements.true_anomaly.sin(), elements.eccentricity + elements.true_anomaly.cos(), 0.0);

        let rotation = perifocal_to_inertial(elements.raan, elements.inclination, elements.argument_of_periapsis);
        (rotation * r_perifocal, rotation * v_perifocal)
    }

    pub fn classify_orbit(&self, elements: &ClassicalElements) -> OrbitClass {
        classify(elements.eccentricity)
    }

    /// J2 secular rates for this element set; delegates to the same
    /// closed form used by `forces::zonal::j2_secular_rates`.
    pub fn j2_secular_rates(&self, elements: &ClassicalElements, j2: f64, equatorial_radius: f64) -> (f64, f64, f64) {
        zonal_rates(elements.semi_major_axis, elements.eccentricity, elements.inclination, self.mu, j2, equatorial_radius)
    }
}

fn classify(eccentricity: f64) -> OrbitClass {
    if eccentricity < CIRCULAR_TOLERANCE {
        OrbitClass::Circular
    } else if eccentricity < 1.0 - 1e-9 {
        OrbitClass::Elliptical
    } else if eccentricity < 1.0 + 1e-9 {
        OrbitClass::Parabolic
    } else {
        OrbitClass::Hyperbolic
    }
}

fn perifocal_to_inertial(raan: f64, inclination: f64, argument_of_periapsis: f64) -> glam::DMat3 {
    glam::DMat3::from_rotation_z(raan) * glam::DMat3::from_rotation_x(inclination) * glam::DMat3::from_rotation_z(argument_of_periapsis)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MU_EARTH;

    #[test]
    fn round_trip_inclined_elliptical_orbit() {
        let solver = OrbitalMechanicsSolver::new(MU_EARTH);
        let elements = ClassicalElements {
            semi_major_axis: 8000.0,
            eccentricity: 0.2,
            inclination: 0.9,
            raan: 1.1,
            argument_of_periapsis: 0.5,
            true_anomaly: 2.3,
        };
        let (position, velocity) = solver.elements_to_state_vector(&elements);
        let recovered = solver.state_to_elements(position, velocity).unwrap();

        assert!((recovered.semi_major_axis - elements.semi_major_axis).abs() < 1e-6);
        assert!((recovered.eccentricity - elements.eccentricity).abs() < 1e-9);
        assert!((recovered.inclination - elements.inclination).abs() < 1e-9);
    }

    #[test]
    fn circular_orbit_uses_argument_of_latitude() {
        let solver = OrbitalMechanicsSolver::new(MU_EARTH);
        let v = (MU_EARTH / 7000.0_f64).sqrt();
        let elements = solver.state_to_elements(DVec3::new(7000.0, 0.0, 0.0), DVec3::new(0.0, v, 0.0)).unwrap();
        assert!(elements.eccentricity < 1e-8);
        assert_eq!(elements.argument_of_periapsis, 0.0);
    }

    #[test]
    fn equatorial_orbit_has_zero_raan() {
        let solver = OrbitalMechanicsSolver::new(MU_EARTH);
        let v = (MU_EARTH / 8000.0_f64 * (1.3 / 8000.0)).sqrt();
        let elements = solver.state_to_elements(DVec3::new(8000.0, 0.0, 0.0), DVec3::new(0.0, v, 0.0)).unwrap();
        assert_eq!(elements.raan, 0.0);
    }

    #[test]
    fn classify_hyperbolic_orbit() {
        let solver = OrbitalMechanicsSolver::new(MU_EARTH);
        let elements = ClassicalElements {
            semi_major_axis: -10000.0,
            eccentricity: 1.5,
            inclination: 0.2,
            raan: 0.0,
            argument_of_periapsis: 0.0,
            true_anomaly: 0.1,
        };
        assert_eq!(solver.classify_orbit(&elements), OrbitClass::Hyperbolic);
    }
}
