use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Result, ensure};
use serde::Deserialize;

use crate::layout::{GalaxyOptions, HelixOptions};
use crate::spring::SpringOptions;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct Configuration {
    /// Optional directory to scan recursively for photo sources. When
    /// absent or empty, the built-in default source list is used.
    pub photo_library_path: Option<PathBuf>,
    /// Target interval between animation frames.
    #[serde(with = "humantime_serde")]
    pub frame_interval: Duration,
    /// Maximum number of concurrent image decodes in the acquire task.
    pub loader_max_concurrent_decodes: usize,
    /// Card footprint used to derive the photo area's aspect ratio.
    pub card: CardOptions,
    /// Tree-mode helix shape.
    pub helix: HelixOptions,
    /// Galaxy-mode scatter shape.
    pub galaxy: GalaxyOptions,
    /// Spring constants, target scales, focus point, and idle bob.
    pub motion: MotionOptions,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CardOptions {
    /// Width of the card's photo area in world units.
    pub content_width: f32,
    /// Height of the card's photo area in world units.
    pub content_height: f32,
}

impl CardOptions {
    const fn default_content_width() -> f32 {
        1.0
    }

    const fn default_content_height() -> f32 {
        1.4
    }

    /// Aspect ratio (width / height) the cover fit crops against.
    pub fn aspect(&self) -> f32 {
        self.content_width / self.content_height.max(f32::EPSILON)
    }
}

impl Default for CardOptions {
    fn default() -> Self {
        Self {
            content_width: Self::default_content_width(),
            content_height: Self::default_content_height(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct MotionOptions {
    /// Spring constants driving card position.
    pub position_spring: SpringOptions,
    /// Spring constants driving card scale; snappier than position.
    pub scale_spring: SpringOptions,
    /// Scale of a non-focused card.
    pub ambient_scale: f32,
    /// Scale of the focused card.
    pub focused_scale: f32,
    /// Scale a new card grows in from; must sit below every target scale.
    pub initial_scale: f32,
    /// World position the focused card springs toward.
    pub focus_point: [f32; 3],
    /// Idle bob oscillation frequency (radians per second of phase).
    pub bob_frequency: f32,
    /// Idle bob amplitude in world units.
    pub bob_amplitude: f32,
}

impl Default for MotionOptions {
    fn default() -> Self {
        Self {
            position_spring: SpringOptions::POSITION,
            scale_spring: SpringOptions::SCALE,
            ambient_scale: 1.0,
            focused_scale: 2.2,
            initial_scale: 0.2,
            focus_point: [0.0, 0.5, 4.5],
            bob_frequency: 1.6,
            bob_amplitude: 0.06,
        }
    }
}

impl Configuration {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&s)?)
    }

    /// Validate runtime invariants that cannot be expressed via serde
    /// defaults alone.
    pub fn validated(self) -> Result<Self> {
        ensure!(
            self.frame_interval > Duration::ZERO,
            "frame-interval must be positive"
        );
        ensure!(
            self.loader_max_concurrent_decodes > 0,
            "loader-max-concurrent-decodes must be greater than zero"
        );
        ensure!(
            self.card.content_width > 0.0 && self.card.content_height > 0.0,
            "card content dimensions must be positive"
        );
        for (name, spring) in [
            ("position-spring", self.motion.position_spring),
            ("scale-spring", self.motion.scale_spring),
        ] {
            ensure!(
                spring.stiffness > 0.0 && spring.damping > 0.0,
                "motion.{name} stiffness and damping must be positive"
            );
        }
        ensure!(
            self.motion.ambient_scale > 0.0 && self.motion.focused_scale > 0.0,
            "target scales must be positive"
        );
        ensure!(
            self.motion.initial_scale > 0.0
                && self.motion.initial_scale < self.motion.ambient_scale,
            "motion.initial-scale must be positive and below motion.ambient-scale"
        );
        ensure!(
            self.motion.bob_amplitude >= 0.0 && self.motion.bob_frequency >= 0.0,
            "bob parameters must be non-negative"
        );
        ensure!(self.helix.max_radius > 0.0, "helix.max-radius must be positive");
        ensure!(
            (0.0..1.0).contains(&self.helix.shrink),
            "helix.shrink must be in [0, 1)"
        );
        ensure!(self.galaxy.r_min > 0.0, "galaxy.r-min must be positive");
        ensure!(self.galaxy.r_span >= 0.0, "galaxy.r-span must be non-negative");
        ensure!(
            self.galaxy.flatten > 0.0 && self.galaxy.flatten <= 1.0,
            "galaxy.flatten must be in (0, 1]"
        );
        Ok(self)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            photo_library_path: None,
            frame_interval: Duration::from_millis(16),
            loader_max_concurrent_decodes: 4,
            card: CardOptions::default(),
            helix: HelixOptions::default(),
            galaxy: GalaxyOptions::default(),
            motion: MotionOptions::default(),
        }
    }
}
