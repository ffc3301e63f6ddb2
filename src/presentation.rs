//! Final per-frame transform for each card: integrated position plus idle
//! bob, uniform scale, and a billboard rotation toward the viewpoint.

use glam::{Quat, Vec3};

use crate::config::MotionOptions;
use crate::store::Card;

/// What the rendering substrate needs to draw one card this frame.
#[derive(Debug, Clone, Copy)]
pub struct CardTransform {
    pub slot: usize,
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

/// Derive the draw transform for `card`.
///
/// Non-focused cards get a small vertical oscillation keyed by their
/// per-card phase; the focused card holds still. Every card is rotated to
/// face `viewpoint` since the viewer orbits the layout.
pub fn card_transform(
    slot: usize,
    card: &Card,
    focused: bool,
    viewpoint: Vec3,
    motion: &MotionOptions,
) -> CardTransform {
    let mut position = card.position;
    if !focused {
        position.y += (card.phase * motion.bob_frequency).sin() * motion.bob_amplitude;
    }
    CardTransform {
        slot,
        position,
        rotation: face_toward(position, viewpoint),
        scale: card.scale,
    }
}

/// Rotation taking the card's +Z normal onto the direction of the
/// viewpoint. Degenerate (coincident) cases keep the identity.
pub fn face_toward(position: Vec3, viewpoint: Vec3) -> Quat {
    let dir = viewpoint - position;
    if dir.length_squared() < 1e-8 {
        return Quat::IDENTITY;
    }
    Quat::from_rotation_arc(Vec3::Z, dir.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TextureState;
    use std::path::PathBuf;

    fn card_at(position: Vec3, phase: f32) -> Card {
        Card {
            source: PathBuf::from("a.jpg"),
            home: position,
            scatter: position,
            position,
            velocity: Vec3::ZERO,
            scale: 1.0,
            scale_velocity: 0.0,
            phase,
            texture: TextureState::Pending,
        }
    }

    #[test]
    fn bob_applies_only_when_not_focused() {
        let motion = MotionOptions::default();
        // Pick a phase where sin() is maximal so the offset is visible.
        let phase = std::f32::consts::FRAC_PI_2 / motion.bob_frequency;
        let card = card_at(Vec3::ZERO, phase);
        let viewpoint = Vec3::new(0.0, 0.0, 5.0);

        let ambient = card_transform(0, &card, false, viewpoint, &motion);
        let focused = card_transform(0, &card, true, viewpoint, &motion);

        assert!((ambient.position.y - motion.bob_amplitude).abs() < 1e-5);
        assert_eq!(focused.position.y, 0.0);
    }

    #[test]
    fn facing_straight_on_is_identity() {
        let q = face_toward(Vec3::ZERO, Vec3::new(0.0, 0.0, 5.0));
        assert!(q.angle_between(Quat::IDENTITY) < 1e-5);
    }

    #[test]
    fn facing_rotates_normal_toward_viewpoint() {
        let position = Vec3::new(3.0, 0.0, 0.0);
        let viewpoint = Vec3::new(0.0, 0.0, 6.0);
        let q = face_toward(position, viewpoint);
        let normal = q * Vec3::Z;
        let expect = (viewpoint - position).normalize();
        assert!(normal.distance(expect) < 1e-5);
    }

    #[test]
    fn coincident_viewpoint_keeps_identity() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(face_toward(p, p), Quat::IDENTITY);
    }
}
