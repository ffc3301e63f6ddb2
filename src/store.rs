//! Card state arena: reconciliation, texture application, and the
//! per-frame spring pass.
//!
//! Single-writer rule: only [`CardStore::step`], [`CardStore::reconcile`],
//! and [`CardStore::apply`] mutate card state, and all three run on the
//! frame-loop thread. Completions from the acquire task reach `apply` as
//! messages, never as direct writes.

use std::path::PathBuf;
use std::time::Duration;

use glam::Vec3;
use rand::Rng;
use tracing::debug;

use crate::config::Configuration;
use crate::events::{AcquireTexture, TextureEvent};
use crate::layout::{helix_position, scatter_position};
use crate::spring::{MAX_STEP_SECS, step_scalar, step_vec3};
use crate::texture::{CardImage, placeholder_color};

/// Hard cap on simultaneously animated cards. Extra sources are silently
/// truncated in input order.
pub const MAX_CARDS: usize = 12;

/// Global layout mode for all non-focused cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Tree,
    Galaxy,
}

/// Lifecycle of a card's photo resource.
#[derive(Debug, Clone)]
pub enum TextureState {
    /// Acquisition requested, nothing to draw yet.
    Pending,
    /// Decoded photo plus its cover fit.
    Ready(CardImage),
    /// Load failed; draw a flat color keyed by the card's slot.
    Placeholder([u8; 3]),
}

/// One animated card. Kinematic fields are owned by the spring pass.
#[derive(Debug, Clone)]
pub struct Card {
    pub source: PathBuf,
    /// Tree-mode target, recomputed whenever the set or count changes.
    pub home: Vec3,
    /// Galaxy-mode target, sampled exactly once at card creation.
    pub scatter: Vec3,
    pub position: Vec3,
    pub velocity: Vec3,
    pub scale: f32,
    pub scale_velocity: f32,
    /// Monotonic per-card time used to desynchronize the idle bob.
    pub phase: f32,
    pub texture: TextureState,
}

/// Slot-indexed arena of cards plus the generation counter used to reject
/// stale acquisition completions.
#[derive(Debug, Default)]
pub struct CardStore {
    cards: Vec<Card>,
    epoch: u64,
}

impl CardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Rebuild the arena against a new source list.
    ///
    /// Slots whose source is unchanged keep kinematic state, phase,
    /// scatter position, and any loaded texture; their helix target is
    /// still refreshed because it depends on the total count. New or
    /// changed slots are reinitialized small and pending. Returns the
    /// acquisition requests for every pending slot, tagged with the new
    /// epoch so completions from before this reconcile are recognizably
    /// stale.
    pub fn reconcile<R: Rng + ?Sized>(
        &mut self,
        sources: &[PathBuf],
        cfg: &Configuration,
        rng: &mut R,
    ) -> Vec<AcquireTexture> {
        self.epoch += 1;
        if sources.len() > MAX_CARDS {
            debug!(
                supplied = sources.len(),
                kept = MAX_CARDS,
                "truncating source list"
            );
        }
        let total = sources.len().min(MAX_CARDS);

        for (slot, source) in sources.iter().take(total).enumerate() {
            let home = helix_position(slot, total, &cfg.helix);
            let unchanged = self
                .cards
                .get(slot)
                .is_some_and(|card| card.source == *source);
            if unchanged {
                // Count may have changed even if this source did not.
                self.cards[slot].home = home;
                continue;
            }
            let card = Card {
                source: source.clone(),
                home,
                scatter: scatter_position(&cfg.galaxy, rng),
                position: home,
                velocity: Vec3::ZERO,
                scale: cfg.motion.initial_scale,
                scale_velocity: 0.0,
                phase: rng.random::<f32>() * std::f32::consts::TAU,
                texture: TextureState::Pending,
            };
            if slot < self.cards.len() {
                self.cards[slot] = card;
            } else {
                self.cards.push(card);
            }
        }
        self.cards.truncate(total);

        self.cards
            .iter()
            .enumerate()
            .filter(|(_, card)| matches!(card.texture, TextureState::Pending))
            .map(|(slot, card)| AcquireTexture {
                slot,
                epoch: self.epoch,
                source: card.source.clone(),
            })
            .collect()
    }

    /// Apply an acquisition completion, or drop it if the card it was for
    /// no longer exists in that slot.
    pub fn apply(&mut self, event: TextureEvent) {
        let slot = event.slot();
        let stale = event.epoch() != self.epoch
            || self
                .cards
                .get(slot)
                .is_none_or(|card| card.source != *event.source());
        if stale {
            debug!(slot, source = %event.source().display(), "discarding stale texture completion");
            return;
        }
        match event {
            TextureEvent::Ready { image, .. } => {
                self.cards[slot].texture = TextureState::Ready(image);
            }
            TextureEvent::Failed { .. } => {
                self.cards[slot].texture = TextureState::Placeholder(placeholder_color(slot));
            }
        }
    }

    /// One spring pass over every card. A single sweep keeps frame cost
    /// linear in the card count.
    pub fn step(&mut self, dt: Duration, mode: Mode, focus: Option<usize>, cfg: &Configuration) {
        let dt = dt.as_secs_f32().min(MAX_STEP_SECS);
        if dt <= 0.0 {
            return;
        }
        let motion = &cfg.motion;
        let focus_point = Vec3::from_array(motion.focus_point);

        for (slot, card) in self.cards.iter_mut().enumerate() {
            let (target_position, target_scale) = if focus == Some(slot) {
                (focus_point, motion.focused_scale)
            } else {
                let target = match mode {
                    Mode::Tree => card.home,
                    Mode::Galaxy => card.scatter,
                };
                (target, motion.ambient_scale)
            };

            step_vec3(
                &mut card.position,
                &mut card.velocity,
                target_position,
                &motion.position_spring,
                dt,
            );
            step_scalar(
                &mut card.scale,
                &mut card.scale_velocity,
                target_scale,
                &motion.scale_spring,
                dt,
            );
            card.phase += dt;
        }
    }
}
