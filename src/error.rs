//! Typed errors for the solvers that must surface non-convergence or
//! invalid-domain calls rather than silently returning a bad answer.
//!
//! Infeasible-but-valid outcomes (Lambert below the parabolic time-of-flight
//! minimum, adaptive-step exhaustion) are *not* errors — they're returned as
//! data per the policy in spec section 7. These enums only cover the cases
//! that must abort the calling solver.

/// Errors from Kepler's-equation and related anomaly solvers.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum KeplerError {
    #[error("Kepler solver did not converge after {iterations} iterations (residual {residual:e})")]
    NonConvergence { iterations: usize, residual: f64 },

    #[error("hyperbolic Kepler solver called with eccentricity {eccentricity} <= 1")]
    InvalidDomain { eccentricity: f64 },
}

/// Errors from coordinate-frame and geodetic conversions.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum CoordinateError {
    #[error("geodetic iteration did not converge after {iterations} iterations")]
    NonConvergence { iterations: usize },

    #[error("position is at or within the reference ellipsoid's origin")]
    DegenerateState,
}

/// Errors from TLE text parsing.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum TleParseError {
    #[error("line 1 must be exactly 69 characters, got {0}")]
    Line1Length(usize),

    #[error("line 2 must be exactly 69 characters, got {0}")]
    Line2Length(usize),

    #[error("line 1 does not start with '1 '")]
    Line1Prefix,

    #[error("line 2 does not start with '2 '")]
    Line2Prefix,

    #[error("satellite number mismatch between lines ({line1} != {line2})")]
    SatelliteNumberMismatch { line1: u32, line2: u32 },

    #[error("failed to parse field {field}: {value:?}")]
    FieldParse { field: &'static str, value: String },

    #[error("checksum mismatch on line {line} (expected {expected}, computed {computed})")]
    Checksum { line: u32, expected: u8, computed: u8 },
}
