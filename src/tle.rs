//! Two-Line Element (TLE) text parsing.
//!
//! Not present upstream (a heliocentric asteroid simulator has no notion
//! of a near-Earth mean-element catalog format), but named by spec
//! section 3's `TLEData` and required by `propagators::sgp4`'s input.
//! Column layout and checksum handling are enriched from the pack's SGP4
//! reference material's fixed-column field slicing and validation
//! approach, expressed in this crate's own `thiserror` idiom rather than
//! transliterated.

use crate::error::TleParseError;

/// Mean orbital elements and drag terms parsed from a two-line element
/// set, in the units the TLE format itself uses (degrees, revolutions/day)
/// — conversion to radians/seconds is the caller's job (see
/// `propagators::sgp4::ReducedSgp4Propagator::from_tle`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TleData {
    pub satellite_number: u32,
    /// Full four-digit year of the epoch (already expanded from the
    /// TLE's two-digit year per the standard 57-99 -> 1900s, 00-56 ->
    /// 2000s pivot).
    pub epoch_year: u32,
    pub epoch_day: f64,
    pub mean_motion_dot: f64,
    pub mean_motion_ddot: f64,
    pub bstar: f64,
    pub inclination_deg: f64,
    pub raan_deg: f64,
    pub eccentricity: f64,
    pub argument_of_perigee_deg: f64,
    pub mean_anomaly_deg: f64,
    pub mean_motion_rev_per_day: f64,
}

impl TleData {
    /// Parse a standard two-line element set. Both lines must be exactly
    /// 69 characters (the fixed-column TLE format, whitespace-padded) and
    /// pass the modulo-10 checksum in column 69.
    pub fn parse(line1: &str, line2: &str) -> Result<TleData, TleParseError> {
        if line1.chars().count() != 69 {
            return Err(TleParseError::Line1Length(line1.chars().count()));
        }
        if line2.chars().count() != 69 {
            return Err(TleParseError::Line2Length(line2.chars().count()));
        }
        if !line1.starts_with("1 ") {
            return Err(TleParseError::Line1Prefix);
        }
        if !line2.starts_with("2 ") {
            return Err(TleParseError::Line2Prefix);
        }

        verify_checksum(line1, 1)?;
        verify_checksum(line2, 2)?;

        let sat1 = parse_field::<u32>(line1, 2, 7, "satellite_number")?;
        let sat2 = parse_field::<u32>(line2, 2, 7, "satellite_number")?;
        if sat1 != sat2 {
            return Err(TleParseError::SatelliteNumberMismatch { line1: sat1, line2: sat2 });
        }

        let epoch_year_2d = parse_field::<u32>(line1, 18, 20, "epoch_year")?;
        let epoch_year = if epoch_year_2d < 57 { 2000 + epoch_year_2d } else { 1900 + epoch_year_2d };
        let epoch_day = parse_field::<f64>(line1, 20, 32, "epoch_day")?;

        let mean_motion_dot = parse_field::<f64>(line1, 33, 43, "mean_motion_dot")?;
        let mean_motion_ddot = parse_assumed_decimal(line1, 44, 52, "mean_motion_ddot")?;
        let bstar = parse_assumed_decimal(line1, 53, 61, "bstar")?;

        let inclination_deg = parse_field::<f64>(line2, 8, 16, "inclination")?;
        let raan_deg = parse_field::<f64>(line2, 17, 25, "raan")?;
        let eccentricity = parse_assumed_decimal_unsigned(line2, 26, 33, "eccentricity")?;
        let argument_of_perigee_deg = parse_field::<f64>(line2, 34, 42, "argument_of_perigee")?;
        let mean_anomaly_deg = parse_field::<f64>(line2, 43, 51, "mean_anomaly")?;
        let mean_motion_rev_per_day = parse_field::<f64>(line2, 52, 63, "mean_motion")?;

        Ok(TleData {
            satellite_number: sat1,
            epoch_year,
            epoch_day,
            mean_motion_dot,
            mean_motion_ddot,
            bstar,
            inclination_deg,
            raan_deg,
            eccentricity,
            argument_of_perigee_deg,
            mean_anomaly_deg,
            mean_motion_rev_per_day,
        })
    }

    /// Mean motion in rad/min (spec section 3's unit contract for
    /// `TLEData`).
    pub fn mean_motion_rad_per_min(&self) -> f64 {
        self.mean_motion_rev_per_day * std::f64::consts::TAU / 1440.0
    }
}

fn byte_slice(s: &str, start: usize, end: usize) -> &str {
    // TLE columns are conventionally 1-indexed but these bounds are
    // already 0-indexed half-open ranges; all fields are pure ASCII so
    // byte slicing is safe.
    &s[start..end]
}

fn parse_field<T: std::str::FromStr>(s: &str, start: usize, end: usize, field: &'static str) -> Result<T, TleParseError> {
    let raw = byte_slice(s, start, end).trim();
    raw.parse::<T>().map_err(|_| TleParseError::FieldParse { field, value: raw.to_string() })
}

/// TLE's "assumed decimal point" fields: signed mantissa plus a signed
/// power-of-ten exponent, e.g. ` 12345-3` means `0.12345e-3`.
fn parse_assumed_decimal(s: &str, start: usize, end: usize, field: &'static str) -> Result<f64, TleParseError> {
    let raw = byte_slice(s, start, end).trim();
    parse_assumed_decimal_str(raw, field)
}

fn parse_assumed_decimal_unsigned(s: &str, start: usize, end: usize, field: &'static str) -> Result<f64, TleParseError> {
    let raw = byte_slice(s, start, end).trim();
    let value: f64 = raw.parse().map_err(|_| TleParseError::FieldParse { field, value: raw.to_string() })?;
    Ok(value / 1.0e7)
}

fn parse_assumed_decimal_str(raw: &str, field: &'static str) -> Result<f64, TleParseError> {
    if raw.is_empty() {
        return Ok(0.0);
    }
    let (mantissa, exponent) = raw.split_at(raw.len().saturating_sub(2));
    let mantissa: f64 = mantissa.parse().map_err(|_| TleParseError::FieldParse { field, value: raw.to_string() })?;
    let exponent: i32 = exponent.parse().map_err(|_| TleParseError::FieldParse { field, value: raw.to_string() })?;
    Ok(mantissa / 1.0e5 * 10f64.powi(exponent))
}

/// TLE checksum: sum of all digits modulo 10, treating `-` as 1 and all
/// other non-digit characters as 0, over the first 68 columns; compared
/// against the digit in column 69.
fn verify_checksum(line: &str, line_number: u32) -> Result<(), TleParseError> {
    let chars: Vec<char> = line.chars().collect();
    let body = &chars[..68];
    let expected: u8 = chars[68].to_digit(10).map(|d| d as u8).unwrap_or(0);

    let computed: u32 = body
        .iter()
        .map(|c| if *c == '-' { 1 } else { c.to_digit(10).unwrap_or(0) })
        .sum();
    let computed = (computed % 10) as u8;

    if computed != expected {
        return Err(TleParseError::Checksum { line: line_number, expected, computed });
    }
    Ok(())
}
