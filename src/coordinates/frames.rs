//! Frame rotations and local orbital bases.

use glam::{DMat3, DVec3};

use super::gmst;

/// A right-handed orthonormal local basis: radial (outward along
/// position), cross-track (normal to the orbit plane), along-track
/// (completes the triad, `cross_track x radial`).
#[derive(Clone, Copy, Debug)]
pub struct LocalBasis {
    pub radial: DVec3,
    pub cross_track: DVec3,
    pub along_track: DVec3,
}

/// Rotate an Earth-Centered Inertial vector into Earth-Centered
/// Earth-Fixed coordinates: a right-handed rotation about +Z by GMST
/// (`t_seconds_since_j2000`).
pub fn eci_to_ecef(eci: DVec3, t_seconds_since_j2000: f64) -> DVec3 {
    let theta = gmst(t_seconds_since_j2000);
    rotate_z(eci, theta)
}

/// Inverse of [`eci_to_ecef`].
pub fn ecef_to_eci(ecef: DVec3, t_seconds_since_j2000: f64) -> DVec3 {
    let theta = gmst(t_seconds_since_j2000);
    rotate_z(ecef, -theta)
}

fn rotate_z(v: DVec3, theta: f64) -> DVec3 {
    let (sin, cos) = theta.sin_cos();
    DVec3::new(cos * v.x - sin * v.y, sin * v.x + cos * v.y, v.z)
}

/// East-North-Up unit vectors at the ECEF position `observer_ecef`,
/// expressed in the same ECEF frame, and the rotation from ECEF into the
/// local ENU frame applied to `target_ecef - observer_ecef`.
pub fn eci_to_enu(observer_ecef: DVec3, target_ecef: DVec3) -> DVec3 {
    let lat = (observer_ecef.z / observer_ecef.length()).asin();
    let lon = observer_ecef.y.atan2(observer_ecef.x);

    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();

    let east = DVec3::new(-sin_lon, cos_lon, 0.0);
    let north = DVec3::new(-sin_lat * cos_lon, -sin_lat * sin_lon, cos_lat);
    let up = DVec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat);

    let delta = target_ecef - observer_ecef;
    DVec3::new(east.dot(delta), north.dot(delta), up.dot(delta))
}

/// Local-vertical/local-horizontal basis at `position`/`velocity`: radial
/// = position direction, cross-track = orbit-normal direction, along-track
/// = `cross_track x radial` (spec section 4.8's convention, shared with
/// [`rsw_basis`]).
pub fn lvlh_basis(position: DVec3, velocity: DVec3) -> LocalBasis {
    let radial = position.normalize();
    let cross_track = position.cross(velocity).normalize();
    let along_track = cross_track.cross(radial);
    LocalBasis { radial, cross_track, along_track }
}

/// RSW (radial/along-track/cross-track) basis — the same axes as
/// [`lvlh_basis`] under spec section 4.8's definition.
pub fn rsw_basis(position: DVec3, velocity: DVec3) -> LocalBasis {
    lvlh_basis(position, velocity)
}

/// `DMat3` whose rows are `(radial, along_track, cross_track)`, mapping
/// an inertial-frame vector into local-basis components via matrix
/// multiplication.
impl LocalBasis {
    pub fn to_matrix(&self) -> DMat3 {
        DMat3::from_cols(self.radial, self.along_track, self.cross_track).transpose()
    }
}

/// Cartesian `(x, y, z)` to spherical `(radius, azimuth, elevation)` where
/// azimuth is the angle from +X toward +Y in the xy-plane and elevation is
/// the angle above the xy-plane.
pub fn cartesian_to_spherical(v: DVec3) -> (f64, f64, f64) {
    let radius = v.length();
    let azimuth = v.y.atan2(v.x);
    let elevation = (v.z / radius).asin();
    (radius, azimuth, elevation)
}

/// Inverse of [`cartesian_to_spherical`].
pub fn spherical_to_cartesian(radius: f64, azimuth: f64, elevation: f64) -> DVec3 {
    let (sin_el, cos_el) = elevation.sin_cos();
    let (sin_az, cos_az) = azimuth.sin_cos();
    DVec3::new(radius * cos_el * cos_az, radius * cos_el * sin_az, radius * sin_el)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eci_ecef_roundtrip_is_identity() {
        let v = DVec3::new(7000.0, 1200.0, -300.0);
        let t = 12345.678;
        let back = ecef_to_eci(eci_to_ecef(v, t), t);
        assert!((back - v).length() < 1e-9);
    }

    #[test]
    fn lvlh_basis_is_orthonormal() {
        let position = DVec3::new(7000.0, 0.0, 0.0);
        let velocity = DVec3::new(0.0, 7.5, 1.0);
        let basis = lvlh_basis(position, velocity);

        assert!((basis.radial.length() - 1.0).abs() < 1e-12);
        assert!((basis.cross_track.length() - 1.0).abs() < 1e-12);
        assert!((basis.along_track.length() - 1.0).abs() < 1e-12);
        assert!(basis.radial.dot(basis.cross_track).abs() < 1e-12);
        assert!(basis.radial.dot(basis.along_track).abs() < 1e-12);
        assert!(basis.cross_track.dot(basis.along_track).abs() < 1e-12);
    }

    #[test]
    fn spherical_roundtrip_recovers_cartesian() {
        let v = DVec3::new(1.0, 2.0, 3.0);
        let (r, az, el) = cartesian_to_spherical(v);
        let back = spherical_to_cartesian(r, az, el);
        assert!((back - v).length() < 1e-9);
    }
}
