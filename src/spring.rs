//! Damped spring steps used for every smooth transition in the carousel.
//!
//! Semi-implicit Euler on a near-critically-damped harmonic oscillator:
//! the target can move every frame and the spring simply chases it, so no
//! explicit transition state machine is needed.

use glam::Vec3;
use serde::Deserialize;

/// Upper bound on a single integration step. Frame deltas beyond this are
/// clamped so a slow or backgrounded frame cannot destabilize the spring.
pub const MAX_STEP_SECS: f32 = 0.033;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SpringOptions {
    pub stiffness: f32,
    pub damping: f32,
}

impl Default for SpringOptions {
    fn default() -> Self {
        Self::POSITION
    }
}

impl SpringOptions {
    /// Position spring: settles in well under a second with no visible
    /// overshoot.
    pub const POSITION: Self = Self {
        stiffness: 40.0,
        damping: 12.0,
    };

    /// Scale spring: snappier than position so the grow/shrink reads as a
    /// response, not a drift.
    pub const SCALE: Self = Self {
        stiffness: 90.0,
        damping: 18.0,
    };
}

/// Advance a vector spring one step toward `target`.
pub fn step_vec3(
    position: &mut Vec3,
    velocity: &mut Vec3,
    target: Vec3,
    opts: &SpringOptions,
    dt: f32,
) {
    let accel = (target - *position) * opts.stiffness - *velocity * opts.damping;
    *velocity += accel * dt;
    *position += *velocity * dt;
}

/// Scalar twin of [`step_vec3`], used for scale.
pub fn step_scalar(value: &mut f32, velocity: &mut f32, target: f32, opts: &SpringOptions, dt: f32) {
    let accel = (target - *value) * opts.stiffness - *velocity * opts.damping;
    *velocity += accel * dt;
    *value += *velocity * dt;
}
