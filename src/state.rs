//! Core physics state and the error metric integrators use to compare
//! candidate steps.
//!
//! Generalizes `types::BodyState` (2D position/velocity/mass) to the
//! 3D, massless kinematic state the integrator/propagator contract needs;
//! mass now lives only where a force actually consumes it
//! (`ForceModel::total_acceleration`).

use glam::DVec3;

/// Position (km), velocity (km/s), and time (s since a caller-defined epoch).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StateVector {
    pub position: DVec3,
    pub velocity: DVec3,
    pub time: f64,
}

impl StateVector {
    pub fn new(position: DVec3, velocity: DVec3, time: f64) -> Self {
        Self { position, velocity, time }
    }

    /// `self + s * other`, time taken from `self` (a derivative's "position"
    /// field carries velocity and its "velocity" field carries acceleration,
    /// so this is also how an `Integrator` advances a state by a derivative).
    pub fn add_scaled(&self, other: &Self, s: f64) -> Self {
        Self {
            position: self.position + other.position * s,
            velocity: self.velocity + other.velocity * s,
            time: self.time,
        }
    }

    pub fn scale(&self, s: f64) -> Self {
        Self {
            position: self.position * s,
            velocity: self.velocity * s,
            time: self.time,
        }
    }

    /// `max(‖Δp‖ / max(‖p1‖, 1), ‖Δv‖ / max(‖v1‖, 1))`, the normalized error
    /// metric adaptive integrators compare against tolerance.
    pub fn error_norm(&self, other: &Self) -> f64 {
        let dp = (self.position - other.position).length();
        let dv = (self.velocity - other.velocity).length();
        let p_scale = self.position.length().max(1.0);
        let v_scale = self.velocity.length().max(1.0);
        (dp / p_scale).max(dv / v_scale)
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.time.is_finite()
    }
}
