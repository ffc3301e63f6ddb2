use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossbeam_channel as xchan;
use glam::Vec3;
use tokio::select;
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::Configuration;
use crate::events::{AcquireTexture, TextureEvent};
use crate::presentation::{CardTransform, card_transform};
use crate::store::{CardStore, Mode};
use crate::tasks::acquire;

/// How long the headless loop dwells in each layout mode.
const MODE_FLIP_SECS: f32 = 8.0;
/// How long the headless loop holds each focus selection.
const FOCUS_DWELL_SECS: f32 = 5.0;
/// Orbit speed of the demo viewpoint, radians per second.
const ORBIT_RATE: f32 = 0.25;
/// Orbit radius and height of the demo viewpoint.
const ORBIT_RADIUS: f32 = 9.0;
const ORBIT_HEIGHT: f32 = 1.5;

/// The carousel controller: owns the card arena and is the only writer of
/// its state.
///
/// Rules:
/// - `tick` drains acquisition completions first, then runs the spring
///   pass, then derives draw transforms; completions therefore become
///   visible on the immediately following frame.
/// - `set_sources` returns the acquisition requests; the caller forwards
///   them to the acquire task. The controller itself never blocks.
pub struct Carousel {
    cfg: Configuration,
    store: CardStore,
    completions: xchan::Receiver<TextureEvent>,
    mode: Mode,
    focus: Option<usize>,
}

impl Carousel {
    pub fn new(cfg: Configuration, completions: xchan::Receiver<TextureEvent>) -> Self {
        Self {
            cfg,
            store: CardStore::new(),
            completions,
            mode: Mode::Tree,
            focus: None,
        }
    }

    pub fn store(&self) -> &CardStore {
        &self.store
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
    }

    /// Focus one card, or `None` to release. Out-of-range indices simply
    /// match no card.
    pub fn set_focus(&mut self, focus: Option<usize>) {
        self.focus = focus;
    }

    /// Reconcile against a new source list and return the acquisition
    /// requests the caller should forward to the acquire task.
    pub fn set_sources(&mut self, sources: &[PathBuf]) -> Vec<AcquireTexture> {
        self.store.reconcile(sources, &self.cfg, &mut rand::rng())
    }

    /// Advance one frame: apply completions, step the springs, and derive
    /// a draw transform per card facing `viewpoint`.
    pub fn tick(&mut self, dt: Duration, viewpoint: Vec3) -> Vec<CardTransform> {
        for event in self.completions.try_iter() {
            self.store.apply(event);
        }
        self.store.step(dt, self.mode, self.focus, &self.cfg);

        let motion = &self.cfg.motion;
        self.store
            .cards()
            .iter()
            .enumerate()
            .map(|(slot, card)| {
                card_transform(slot, card, self.focus == Some(slot), viewpoint, motion)
            })
            .collect()
    }

    /// Worst distance from any card to its current target, for settle
    /// diagnostics.
    fn max_target_distance(&self) -> f32 {
        let focus_point = Vec3::from_array(self.cfg.motion.focus_point);
        self.store
            .cards()
            .iter()
            .enumerate()
            .map(|(slot, card)| {
                let target = if self.focus == Some(slot) {
                    focus_point
                } else {
                    match self.mode {
                        Mode::Tree => card.home,
                        Mode::Galaxy => card.scatter,
                    }
                };
                card.position.distance(target)
            })
            .fold(0.0, f32::max)
    }
}

/// Headless frame loop for the binary: spawns the acquire task, drives the
/// carousel at the configured frame interval, orbits the viewpoint, and
/// walks through modes and focus selections until cancelled.
pub async fn run(
    cfg: Configuration,
    sources: Vec<PathBuf>,
    cancel: CancellationToken,
) -> Result<()> {
    let (req_tx, req_rx) = mpsc::channel::<AcquireTexture>(32);
    let (comp_tx, comp_rx) = xchan::unbounded::<TextureEvent>();

    let acquire_task = tokio::spawn(acquire::run(
        req_rx,
        comp_tx,
        cfg.card.aspect(),
        cancel.clone(),
        cfg.loader_max_concurrent_decodes,
    ));

    let frame_interval = cfg.frame_interval;
    let mut carousel = Carousel::new(cfg, comp_rx);
    for req in carousel.set_sources(&sources) {
        if req_tx.send(req).await.is_err() {
            warn!("acquire task unavailable at startup");
            break;
        }
    }
    info!(cards = carousel.store().len(), "carousel started");

    let mut ticker = tokio::time::interval(frame_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last = Instant::now();
    let mut elapsed = 0.0f32;
    let mut frame: u64 = 0;

    loop {
        select! {
            _ = cancel.cancelled() => {
                info!("cancel received; exiting carousel loop");
                break;
            }

            _ = ticker.tick() => {
                let now = Instant::now();
                let dt = now - last;
                last = now;
                elapsed += dt.as_secs_f32();

                let mode = if (elapsed / MODE_FLIP_SECS) as u64 % 2 == 0 {
                    Mode::Tree
                } else {
                    Mode::Galaxy
                };
                carousel.set_mode(mode);

                // Cycle focus through every card with a no-focus beat
                // between laps.
                let slots = carousel.store().len() + 1;
                let pick = (elapsed / FOCUS_DWELL_SECS) as usize % slots.max(1);
                carousel.set_focus(pick.checked_sub(1));

                let angle = elapsed * ORBIT_RATE;
                let viewpoint = Vec3::new(
                    angle.cos() * ORBIT_RADIUS,
                    ORBIT_HEIGHT,
                    angle.sin() * ORBIT_RADIUS,
                );

                let transforms = carousel.tick(dt, viewpoint);

                frame += 1;
                if frame % 120 == 0 {
                    debug!(
                        frame,
                        cards = transforms.len(),
                        settle = carousel.max_target_distance(),
                        "frame"
                    );
                }
            }
        }
    }

    drop(req_tx);
    let _ = acquire_task.await;
    Ok(())
}
