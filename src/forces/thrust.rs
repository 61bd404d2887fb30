//! Constant-magnitude thrust along a caller-supplied direction, plus the
//! Tsiolkovsky bookkeeping a propagator needs to deplete propellant mass
//! over a burn.
//!
//! Not present upstream; grounded on `ThirdBody`'s closure-parameterized
//! direction pattern and on spec section 4.3's thrust force, which is
//! explicit that mass depletion is the caller's responsibility (this crate
//! has no state-vector slot for mass — `StateVector` is position/velocity/
//! time only) while the force itself only needs `F/m` at the instantaneous
//! mass it's given.

use super::Force;
use crate::constants::STANDARD_GRAVITY;
use glam::DVec3;

/// `a = (F/m) * u`, where `u` is the unit thrust direction returned by
/// `direction_at` and `m` is the mass passed into `acceleration` by the
/// caller (this force does not track remaining propellant itself).
pub struct Thrust {
    thrust_magnitude: f64,
    specific_impulse: f64,
    direction_at: Box<dyn Fn(DVec3, DVec3, f64) -> DVec3>,
    enabled: bool,
}

impl Thrust {
    /// `thrust_magnitude` in N, `specific_impulse` in s. `direction_at`
    /// receives `(position, velocity, time)` and must return a unit vector;
    /// a typical choice is `|_, v, _| v.normalize()` for prograde thrust.
    pub fn new(thrust_magnitude: f64, specific_impulse: f64, direction_at: impl Fn(DVec3, DVec3, f64) -> DVec3 + 'static) -> Self {
        Self { thrust_magnitude, specific_impulse, direction_at: Box::new(direction_at), enabled: true }
    }

    /// `prograde` convenience constructor: thrust always along the current
    /// velocity direction.
    pub fn prograde(thrust_magnitude: f64, specific_impulse: f64) -> Self {
        Self::new(thrust_magnitude, specific_impulse, |_position, velocity, _time| velocity.normalize())
    }

    pub fn specific_impulse(&self) -> f64 {
        self.specific_impulse
    }

    pub fn thrust_magnitude(&self) -> f64 {
        self.thrust_magnitude
    }

    /// Propellant mass flow rate, `mdot = F / (Isp * g0)`, in kg/s.
    pub fn mass_flow_rate(&self) -> f64 {
        self.thrust_magnitude / (self.specific_impulse * STANDARD_GRAVITY)
    }
}

impl Force for Thrust {
    fn name(&self) -> &str {
        "thrust"
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

    fn acceleration(&self, position: DVec3, velocity: DVec3, mass: f64, time: f64) -> DVec3 {
        let direction = (self.direction_at)(position, velocity, time);
        // Newtons -> kg*km/s^2, then divide by kg to get km/s^2.
        direction * (self.thrust_magnitude / mass / 1000.0)
    }
}

/// Mass remaining after burning at `mass_flow_rate` for `elapsed_seconds`,
/// floored at zero (Tsiolkovsky's linear-in-time mass depletion for a
/// constant mass flow rate, not the exponential delta-v relation — that
/// lives in `solvers::maneuver`).
pub fn remaining_mass(initial_mass: f64, mass_flow_rate: f64, elapsed_seconds: f64) -> f64 {
    (initial_mass - mass_flow_rate * elapsed_seconds).max(0.0)
}
