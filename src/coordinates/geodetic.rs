//! WGS84 geodetic conversions and ground-track utilities.

use glam::DVec3;

use crate::constants::{R_EARTH, WGS84_A, WGS84_F};

use super::frames::{eci_to_ecef, eci_to_enu};

/// Geodetic latitude/longitude (radians) and height above the WGS84
/// ellipsoid (km).
#[derive(Clone, Copy, Debug)]
pub struct GeodeticCoord {
    pub latitude: f64,
    pub longitude: f64,
    pub height: f64,
}

fn equatorial_radius_km() -> f64 {
    WGS84_A / 1000.0
}

fn eccentricity_squared() -> f64 {
    WGS84_F * (2.0 - WGS84_F)
}

/// Geodetic coordinates to ECEF position (km).
pub fn geodetic_to_ecef(coord: GeodeticCoord) -> DVec3 {
    let a = equatorial_radius_km();
    let e2 = eccentricity_squared();

    let (sin_lat, cos_lat) = coord.latitude.sin_cos();
    let (sin_lon, cos_lon) = coord.longitude.sin_cos();
    let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();

    let x = (n + coord.height) * cos_lat * cos_lon;
    let y = (n + coord.height) * cos_lat * sin_lon;
    let z = (n * (1.0 - e2) + coord.height) * sin_lat;
    DVec3::new(x, y, z)
}

/// ECEF position (km) to geodetic coordinates via Bowring's fixed-point
/// iteration, at most 5 iterations (spec section 4.8).
pub fn ecef_to_geodetic(ecef: DVec3) -> GeodeticCoord {
    let a = equatorial_radius_km();
    let e2 = eccentricity_squared();

    let longitude = ecef.y.atan2(ecef.x);
    let p = (ecef.x * ecef.x + ecef.y * ecef.y).sqrt();

    let mut latitude = ecef.z.atan2(p * (1.0 - e2));
    let mut height = 0.0;

    for _ in 0..5 {
        let sin_lat = latitude.sin();
        let n = a / (1.0 - e2 * sin_lat * sin_lat).sqrt();
        height = p / latitude.cos() - n;
        latitude = ecef.z.atan2(p * (1.0 - e2 * n / (n + height)));
    }

    GeodeticCoord { latitude, longitude, height }
}

/// Great-circle surface distance (km) between two geodetic points via the
/// haversine formula over the mean Earth radius.
pub fn geodetic_haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;
    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();
    R_EARTH * c
}

/// Azimuth (radians, from north toward east) and elevation (radians above
/// the local horizon) of `target_ecef` as seen from `observer_ecef`.
pub fn azimuth_elevation(observer_ecef: DVec3, target_ecef: DVec3) -> (f64, f64) {
    let enu = eci_to_enu(observer_ecef, target_ecef);
    let azimuth = enu.x.atan2(enu.y).rem_euclid(std::f64::consts::TAU);
    let horizontal = (enu.x * enu.x + enu.y * enu.y).sqrt();
    let elevation = enu.z.atan2(horizontal);
    (azimuth, elevation)
}

/// Geodetic coordinates of the point directly beneath an ECI position at
/// time `t_seconds_since_j2000` (the subsatellite point); height is the
/// orbit's own ellipsoidal height, not clamped to the surface.
pub fn subsatellite_point(position_eci: DVec3, t_seconds_since_j2000: f64) -> GeodeticCoord {
    let ecef = eci_to_ecef(position_eci, t_seconds_since_j2000);
    ecef_to_geodetic(ecef)
}
