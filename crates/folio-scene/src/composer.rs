use folio_core::constants::{FADE_DURATION_MS, IDLE_DEADLINE_MS, REVEAL_DELAY_MS};
use folio_core::device::classify_with_reason;
use folio_core::{classify, select_profile, QualityProfile, SignalSource};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::scene::Scene;
use crate::schedule::{Scheduler, Task, TaskHandle, When};

/// Composer lifecycle.
///
/// `Uninitialized -> Profiling -> ReadyHidden -> ReadyVisible`. A constrained
/// device stops at `ReadyHidden` for good. `Unmounted` is entered from any
/// phase on teardown and is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerPhase {
    Uninitialized,
    Profiling,
    ReadyHidden,
    ReadyVisible,
    Unmounted,
}

/// What the host should put on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    /// Profile not known yet; show the static layer.
    Pending,
    /// Constrained device: static gradient layer, no canvas.
    StaticFallback,
    /// Full device: canvas with the animated scene (possibly still transparent).
    Animated,
}

/// Drives profile selection, scene construction and the reveal/fade for the
/// animated background.
pub struct SceneComposer {
    phase: ComposerPhase,
    signals: Box<dyn SignalSource>,
    seed: u64,
    profile: Option<QualityProfile>,
    scene: Option<Scene>,
    pending: Vec<(Task, TaskHandle)>,
    revealed_at_ms: Option<f64>,
}

impl SceneComposer {
    /// `seed` feeds the point-cloud generator.
    pub fn new(signals: Box<dyn SignalSource>, seed: u64) -> Self {
        Self {
            phase: ComposerPhase::Uninitialized,
            signals,
            seed,
            profile: None,
            scene: None,
            pending: Vec::new(),
            revealed_at_ms: None,
        }
    }

    /// Start profiling at the next idle opportunity (bounded by a deadline).
    pub fn mount(&mut self, scheduler: &mut dyn Scheduler) {
        if self.phase != ComposerPhase::Uninitialized {
            log::warn!("mount ignored in phase {:?}", self.phase);
            return;
        }
        let when = When::IdleOrDeadline {
            deadline_ms: IDLE_DEADLINE_MS,
        };
        let handle = scheduler.schedule(Task::Classify, when);
        self.pending.push((Task::Classify, handle));
        self.phase = ComposerPhase::Profiling;
    }

    /// Deliver a scheduled task. `now_ms` is the host clock at delivery.
    pub fn run_task(&mut self, task: Task, now_ms: f64, scheduler: &mut dyn Scheduler) {
        self.pending.retain(|(t, _)| *t != task);

        match (task, self.phase) {
            (Task::Classify, ComposerPhase::Profiling) => self.finish_profiling(scheduler),
            (Task::Reveal, ComposerPhase::ReadyHidden) if self.scene.is_some() => {
                self.phase = ComposerPhase::ReadyVisible;
                self.revealed_at_ms = Some(now_ms);
                log::info!("Background revealed");
            }
            (task, phase) => log::debug!("Dropping {task:?} delivered in phase {phase:?}"),
        }
    }

    fn finish_profiling(&mut self, scheduler: &mut dyn Scheduler) {
        let signals = self.signals.sample();
        let tier = classify(&signals);
        let reason = classify_with_reason(&signals);
        let profile = select_profile(tier, signals.device_pixel_ratio);
        log::info!("Device tier: {tier:?} ({reason})");
        log::debug!(
            "Viewport {}x{} at dpr {}",
            signals.viewport_width,
            signals.viewport_height,
            signals.device_pixel_ratio
        );
        log::info!(
            "Quality: {} + {} particles, skip {}, dpr {:.2}",
            profile.particle_count,
            profile.foreground_particle_count,
            profile.frame_skip,
            profile.pixel_ratio_cap
        );

        self.profile = Some(profile);
        self.phase = ComposerPhase::ReadyHidden;

        if profile.is_animated() {
            let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
            self.scene = Some(Scene::compose(&profile, &mut rng));
            let handle = scheduler.schedule(
                Task::Reveal,
                When::After {
                    delay_ms: REVEAL_DELAY_MS,
                },
            );
            self.pending.push((Task::Reveal, handle));
        }
    }

    /// One host animation frame. Only a mounted scene is advanced; the
    /// static fallback never animates.
    pub fn on_frame(&mut self, elapsed: f32, delta: f32) {
        if let Some(scene) = self.scene.as_mut() {
            scene.advance(elapsed, delta);
        }
    }

    /// Layer opacity at `now_ms`: 0 until revealed, then a linear fade to 1.
    pub fn opacity(&self, now_ms: f64) -> f32 {
        match self.revealed_at_ms {
            Some(start) if self.phase == ComposerPhase::ReadyVisible => {
                ((now_ms - start) / FADE_DURATION_MS).clamp(0.0, 1.0) as f32
            }
            _ => 0.0,
        }
    }

    /// Tear down: cancel everything still scheduled and drop the scene.
    pub fn unmount(&mut self, scheduler: &mut dyn Scheduler) {
        for (task, handle) in self.pending.drain(..) {
            log::debug!("Cancelling pending {task:?}");
            scheduler.cancel(handle);
        }
        self.scene = None;
        self.phase = ComposerPhase::Unmounted;
    }

    pub fn phase(&self) -> ComposerPhase {
        self.phase
    }

    pub fn profile(&self) -> Option<&QualityProfile> {
        self.profile.as_ref()
    }

    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn presentation(&self) -> Presentation {
        match self.profile {
            None => Presentation::Pending,
            Some(p) if p.is_animated() => Presentation::Animated,
            Some(_) => Presentation::StaticFallback,
        }
    }

    /// Handles still owned by this composer.
    pub fn pending_tasks(&self) -> impl Iterator<Item = TaskHandle> + '_ {
        self.pending.iter().map(|(_, h)| *h)
    }
}
