//! Procedural card layouts: the "tree" helix and the "galaxy" scatter.
//!
//! Helix positions are pure functions of `(index, total)` so the tree
//! formation is stable across frames and never needs to be stored.
//! Scatter positions are sampled once per card at creation time.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use rand::Rng;
use serde::Deserialize;

/// Shape of the tree-mode helix.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct HelixOptions {
    /// Total vertical span of the helix.
    pub height: f32,
    /// Vertical offset of the helix midpoint.
    pub y_offset: f32,
    /// Radius at the bottom of the helix.
    pub max_radius: f32,
    /// Fraction of the radius lost from bottom to top.
    pub shrink: f32,
    /// Number of half-turns over the full height.
    pub turns: f32,
    /// Extra angle per card so consecutive cards are not radially stacked.
    pub angle_step: f32,
}

impl Default for HelixOptions {
    fn default() -> Self {
        Self {
            height: 6.0,
            y_offset: 0.5,
            max_radius: 3.0,
            shrink: 0.6,
            turns: 4.0,
            angle_step: 0.6,
        }
    }
}

/// Shape of the galaxy-mode scatter shell.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct GalaxyOptions {
    /// Inner radius of the shell.
    pub r_min: f32,
    /// Radial thickness of the shell.
    pub r_span: f32,
    /// Vertical squash factor producing the disc look.
    pub flatten: f32,
}

impl Default for GalaxyOptions {
    fn default() -> Self {
        Self {
            r_min: 4.0,
            r_span: 3.0,
            flatten: 0.35,
        }
    }
}

/// Deterministic helix position for card `index` of `total`.
///
/// `total` is guarded to at least 1 so an empty or degenerate input list
/// can never divide by zero.
pub fn helix_position(index: usize, total: usize, opts: &HelixOptions) -> Vec3 {
    let total = total.max(1);
    let t = (index as f32 + 0.5) / total as f32;
    let y = t * opts.height - opts.height / 2.0 + opts.y_offset;
    let radius = opts.max_radius * (1.0 - t * opts.shrink);
    let angle = t * opts.turns * PI + index as f32 * opts.angle_step;
    Vec3::new(angle.cos() * radius, y, angle.sin() * radius)
}

/// Sample a galaxy scatter position: a point in a spherical shell, squashed
/// vertically into a disc.
///
/// Radius is uniform in `[r_min, r_min + r_span]`; the direction uses
/// inverse-transform sampling (`acos(2u - 1)` polar) for uniform coverage
/// of the sphere before flattening.
pub fn scatter_position<R: Rng + ?Sized>(opts: &GalaxyOptions, rng: &mut R) -> Vec3 {
    let radius = opts.r_min + rng.random::<f32>() * opts.r_span;
    let azimuth = rng.random::<f32>() * TAU;
    let polar = (2.0 * rng.random::<f32>() - 1.0).acos();
    let dir = Vec3::new(
        polar.sin() * azimuth.cos(),
        polar.cos(),
        polar.sin() * azimuth.sin(),
    );
    let p = dir * radius;
    Vec3::new(p.x, p.y * opts.flatten, p.z)
}
