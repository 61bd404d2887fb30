//! Coordinate services: time/frame conversions and geodetic utilities.
//!
//! Not present upstream (which stays in a single heliocentric ecliptic
//! frame throughout) but named explicitly by spec section 4.8 and required
//! ambient infrastructure for any Earth-centered astrodynamics library.
//! Grounded on the closed-form-rotation style used throughout the
//! upstream `ephemeris::kepler` module and the Bowring/GMST formulas
//! enriched from the pack's ERFA/RINEX reference material, expressed in
//! this crate's own idiom rather than transliterated.

mod frames;
mod geodetic;
mod gmst;

pub use frames::{cartesian_to_spherical, eci_to_ecef, eci_to_enu, ecef_to_eci, lvlh_basis, rsw_basis, spherical_to_cartesian};
pub use geodetic::{azimuth_elevation, ecef_to_geodetic, geodetic_haversine, geodetic_to_ecef, subsatellite_point, GeodeticCoord};
pub use gmst::gmst;
