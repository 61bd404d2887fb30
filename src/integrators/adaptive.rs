//! Generic adaptive step-size controller wrapping any [`AdaptiveIntegrator`].
//!
//! Generalizes `physics::integrator::IAS15State::compute_new_timestep`'s
//! Verlet-specific, hardcoded-exponent rule into the method-agnostic
//! controller spec section 4.2 describes: accept when `err <= tol`; scale
//! the next step by `safety * (tol/err)^0.2` on growth or `^0.25` on
//! shrink; clamp the relative change to `[0.1x, 5x]` and the absolute step
//! to `[min_step, max_step]`; after `max_iterations` repeated rejections,
//! accept `min_step` anyway and emit a diagnostic (spec section 7,
//! `ResourceExhaustion`).

use super::{AdaptiveIntegrator, Derivative};
use crate::diagnostics::DiagnosticSink;
use crate::state::StateVector;

#[derive(Clone, Copy, Debug)]
pub struct AdaptiveConfig {
    pub tolerance: f64,
    pub min_step: f64,
    pub max_step: f64,
    pub safety: f64,
    pub max_iterations: usize,
}

impl AdaptiveConfig {
    /// Defaults tuned for the generic case (RK4 via Richardson
    /// extrapolation and similar). RKF45 conventionally uses a slightly
    /// more conservative safety factor.
    pub fn generic(tolerance: f64, min_step: f64, max_step: f64) -> Self {
        Self { tolerance, min_step, max_step, safety: 0.9, max_iterations: 10 }
    }

    pub fn rkf45(tolerance: f64, min_step: f64, max_step: f64) -> Self {
        Self { tolerance, min_step, max_step, safety: 0.84, max_iterations: 10 }
    }
}

pub struct AdaptiveStepController<I: AdaptiveIntegrator> {
    pub integrator: I,
    pub config: AdaptiveConfig,
}

impl<I: AdaptiveIntegrator> AdaptiveStepController<I> {
    pub fn new(integrator: I, config: AdaptiveConfig) -> Self {
        Self { integrator, config }
    }

    /// Take one adaptive step starting from `dt_hint`, retrying with a
    /// smaller step until the error is within tolerance or
    /// `max_iterations` rejections are exhausted.
    pub fn step(
        &mut self,
        state: &StateVector,
        f: Derivative,
        dt_hint: f64,
        diagnostics: &mut DiagnosticSink,
    ) -> (StateVector, f64) {
        let mut dt = dt_hint.clamp(self.config.min_step, self.config.max_step);

        for attempt in 0..self.config.max_iterations {
            let (next_state, _, err) = self.integrator.adaptive_step(state, f, dt);

            if err <= self.config.tolerance {
                let next_dt = self.grow_step(dt, err);
                return (next_state, next_dt);
            }

            if attempt + 1 == self.config.max_iterations {
                diagnostics.warn(
                    "adaptive_step",
                    format!(
                        "min_step reached with err {err:e} > tol {:e} after {} rejections; accepting min_step",
                        self.config.tolerance, self.config.max_iterations
                    ),
                );
                let (forced_state, _, _) = self.integrator.adaptive_step(state, f, self.config.min_step);
                return (forced_state, self.config.min_step);
            }

            dt = self.shrink_step(dt, err);
        }

        unreachable!("loop always returns within max_iterations")
    }

    fn grow_step(&self, dt: f64, err: f64) -> f64 {
        let err = err.max(1e-300);
        let ratio = self.config.safety * (self.config.tolerance / err).powf(0.2);
        let ratio = ratio.clamp(0.1, 5.0);
        (dt * ratio).clamp(self.config.min_step, self.config.max_step)
    }

    fn shrink_step(&self, dt: f64, err: f64) -> f64 {
        let err = err.max(1e-300);
        let ratio = self.config.safety * (self.config.tolerance / err).powf(0.25);
        let ratio = ratio.clamp(0.1, 5.0);
        (dt * ratio).clamp(self.config.min_step, self.config.max_step)
    }
}
