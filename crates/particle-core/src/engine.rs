//! The owning context object for one particle background.
//!
//! `ParticleEngine` holds the field, interaction state, quality controller,
//! effect pool and timer schedule, and drives them from a single
//! [`ParticleEngine::frame`] call per animation frame. Two cooperative tasks
//! run inside a frame: the attraction task (every frame while attracting)
//! and the main tick (rate-limited by the active quality tier).

use crate::color::Theme;
use crate::config::{FieldConfig, FieldError, Viewport};
use crate::connections::{find_connections, Connector, ScrollReach};
use crate::constants::{EXPLOSION_LOOK_MS, EXPLOSION_SETTLE_MS, RIPPLE_PULSE_MS};
use crate::effects::{explosion_bundle, EffectKind, EffectPool, EffectSpec};
use crate::field::ParticleField;
use crate::interaction::{ClickKind, InteractionController, InteractionPhase, InteractionState};
use crate::particle::Particle;
use crate::quality::{QualityCaps, QualityController, QualityTier};
use crate::schedule::{FrameGate, Schedule};
use crate::surface::Surface;
use glam::Vec2;
use rand::prelude::*;

/// Delayed work. `generation` ties an entry to the field it was scheduled
/// for; entries from before a rebuild are ignored.
#[derive(Clone, Debug, PartialEq)]
pub enum TimerEvent {
    Explode { generation: u64 },
    Settle { generation: u64 },
    RevertExplosionLook { generation: u64 },
    RevertPulse { generation: u64, indices: Vec<usize> },
    ExpireEffect { id: u64 },
}

struct ActiveEffect<H> {
    id: u64,
    kind: EffectKind,
    handle: H,
}

pub struct ParticleEngine<S: Surface> {
    surface: S,
    config: FieldConfig,
    theme: Theme,
    field: ParticleField,
    interaction: InteractionController,
    quality: QualityController,
    gate: FrameGate,
    reach: ScrollReach,
    pool: EffectPool<S::Handle>,
    active: Vec<ActiveEffect<S::Handle>>,
    connectors: Vec<S::Handle>,
    scratch: Vec<Connector>,
    schedule: Schedule<TimerEvent>,
    rng: StdRng,
    generation: u64,
    next_effect_id: u64,
}

impl<S: Surface> ParticleEngine<S> {
    pub fn new(surface: S, config: FieldConfig, seed: u64) -> Result<Self, FieldError> {
        config.validate()?;
        Ok(Self {
            surface,
            theme: Theme::default(),
            field: ParticleField::from_particles(Vec::new(), Viewport::new(1.0, 1.0)),
            interaction: InteractionController::new(&config),
            quality: QualityController::default(),
            gate: FrameGate::default(),
            reach: ScrollReach::new(
                config.connection_distance,
                config.scroll_distance_bonus,
                config.scroll_idle_ms,
            ),
            pool: EffectPool::default(),
            active: Vec::new(),
            connectors: Vec::new(),
            scratch: Vec::new(),
            schedule: Schedule::default(),
            rng: StdRng::seed_from_u64(seed),
            generation: 0,
            next_effect_id: 0,
            config,
        })
    }

    // ---------------- Lifecycle ----------------

    pub fn initialize(&mut self, viewport: Viewport, theme: Theme) {
        self.theme = theme;
        self.field = ParticleField::initialize(viewport, self.quality.tier(), &mut self.rng);
        self.surface.mount_particles(self.field.len());
        for (i, paint) in self.field.recolor(theme).enumerate() {
            self.surface.paint_particle(i, &paint);
        }
        for (i, view) in self.field.views(true).enumerate() {
            self.surface.draw_particle(i, &view);
        }
        log::info!(
            "[field] {} particles for {:.0}x{:.0} at {:?}",
            self.field.len(),
            viewport.width,
            viewport.height,
            self.quality.tier()
        );
    }

    /// Tear everything down: scene, pools, pending timers and particles.
    pub fn destroy(&mut self) {
        self.surface.clear();
        self.schedule.clear();
        self.active.clear();
        self.connectors.clear();
        self.pool.clear();
        self.field = ParticleField::from_particles(Vec::new(), self.field.viewport());
        self.interaction.reset_phase();
        self.gate.reset();
        self.reach.reset();
        self.generation += 1;
    }

    /// Full rebuild at a new viewport size.
    pub fn resize(&mut self, viewport: Viewport) {
        self.destroy();
        self.initialize(viewport, self.theme);
    }

    // ---------------- Frame driving ----------------

    /// One animation-frame callback. Returns true when the main tick ran.
    pub fn frame(&mut self, now_ms: f64) -> bool {
        if let Some(tier) = self.quality.record_frame(now_ms) {
            self.apply_tier(tier);
        }
        self.run_due_timers(now_ms);
        self.interaction.accumulate();

        let interval = self.quality.caps().frame_interval_ms();
        if !self.gate.ready(now_ms, interval) {
            return false;
        }
        self.tick(now_ms);
        true
    }

    /// Called when the frame loop restarts after a pause. Catches up on due
    /// timers and starts a fresh frame-rate window so the paused gap is not
    /// counted as a slow second.
    pub fn resume(&mut self, now_ms: f64) {
        self.quality.restart_window();
        self.gate.reset();
        self.run_due_timers(now_ms);
    }

    /// Fire every timer due at `now_ms`. Also used as the pump while the
    /// frame loop is paused.
    pub fn run_due_timers(&mut self, now_ms: f64) {
        for event in self.schedule.drain_due(now_ms) {
            self.handle_timer(event, now_ms);
        }
    }

    fn tick(&mut self, now_ms: f64) {
        self.reach.expire(now_ms);
        self.field.integrate(
            &self.interaction.state,
            self.config.pointer_radius,
            now_ms,
        );
        let floating = !self.interaction.state.busy();
        for (i, view) in self.field.views(floating).enumerate() {
            self.surface.draw_particle(i, &view);
        }
        self.render_connections();
    }

    fn render_connections(&mut self) {
        let budget = self.quality.caps().max_effects;
        for handle in std::mem::take(&mut self.connectors) {
            self.surface.hide(&handle);
            _ = self.pool.release(EffectKind::Connector, handle, budget);
        }
        if self.interaction.state.exploding {
            return;
        }

        let mut found = std::mem::take(&mut self.scratch);
        find_connections(
            self.field.particles(),
            self.quality.caps().max_connections,
            self.reach.distance(),
            &mut found,
        );
        for connector in &found {
            let Some(handle) = self.obtain(EffectKind::Connector) else {
                break;
            };
            self.surface.show_connector(&handle, connector);
            self.connectors.push(handle);
        }
        self.scratch = found;
    }

    fn apply_tier(&mut self, tier: QualityTier) {
        let caps = tier.caps();
        let dropped = self.pool.shrink_to(caps.max_effects);
        log::debug!(
            "[quality] caps now {} connections / {} effects / {} fps (dropped {} pooled)",
            caps.max_connections,
            caps.max_effects,
            caps.target_fps,
            dropped.len()
        );
    }

    // ---------------- Effects ----------------

    fn obtain(&mut self, kind: EffectKind) -> Option<S::Handle> {
        self.pool
            .acquire(kind)
            .or_else(|| self.surface.create_effect(kind))
    }

    fn spawn_effect(&mut self, spec: EffectSpec, now_ms: f64) {
        let Some(handle) = self.obtain(spec.kind) else {
            log::warn!("[effects] could not create {:?}", spec.kind);
            return;
        };
        self.surface.show_effect(&handle, &spec);
        let id = self.next_effect_id;
        self.next_effect_id += 1;
        self.active.push(ActiveEffect {
            id,
            kind: spec.kind,
            handle,
        });
        if let Some(lifetime) = spec.kind.lifetime_ms() {
            self.schedule
                .after(now_ms, lifetime, TimerEvent::ExpireEffect { id });
        }
    }

    fn expire_effect(&mut self, id: u64) {
        let Some(i) = self.active.iter().position(|e| e.id == id) else {
            return;
        };
        let effect = self.active.swap_remove(i);
        self.surface.hide(&effect.handle);
        _ = self
            .pool
            .release(effect.kind, effect.handle, self.quality.caps().max_effects);
    }

    // ---------------- Interaction ----------------

    pub fn pointer_move(&mut self, x: f32, y: f32, now_ms: f64) -> bool {
        self.interaction.pointer_move(Vec2::new(x, y), now_ms)
    }

    pub fn touch_start(&mut self, x: f32, y: f32, now_ms: f64) {
        self.interaction.touch_start(Vec2::new(x, y), now_ms);
    }

    pub fn touch_move(&mut self, x: f32, y: f32, now_ms: f64) -> bool {
        self.interaction.touch_move(Vec2::new(x, y), now_ms)
    }

    /// Touch end at `(x, y)`. Returns true when a double-tap started attraction.
    pub fn touch_end(&mut self, x: f32, y: f32, now_ms: f64) -> bool {
        self.interaction.classify_tap(now_ms) && self.start_attraction(x, y, now_ms)
    }

    pub fn click(&mut self, x: f32, y: f32, now_ms: f64) -> ClickKind {
        let kind = self.interaction.classify_click(now_ms);
        match kind {
            ClickKind::Attract => {
                self.start_attraction(x, y, now_ms);
            }
            ClickKind::Ripple => self.create_click_effect(x, y, now_ms),
            ClickKind::Ignored => {}
        }
        kind
    }

    /// Enter `Attracting` toward `(x, y)` unless a sequence is already running.
    pub fn start_attraction(&mut self, x: f32, y: f32, now_ms: f64) -> bool {
        let center = Vec2::new(x, y);
        if !self.interaction.begin_attraction(center) {
            return false;
        }
        self.field.snapshot_velocities();
        self.spawn_effect(EffectSpec::at(EffectKind::AttractionPoint, center), now_ms);
        let delay = self.config.explosion_delay_min_ms
            + self.rng.gen::<f64>() * self.config.explosion_delay_span_ms;
        self.schedule.after(
            now_ms,
            delay,
            TimerEvent::Explode {
                generation: self.generation,
            },
        );
        true
    }

    /// Stateless ripple at `(x, y)`; also used for swipe gestures.
    pub fn create_click_effect(&mut self, x: f32, y: f32, now_ms: f64) {
        let center = Vec2::new(x, y);
        self.spawn_effect(EffectSpec::at(EffectKind::Ripple, center), now_ms);
        let indices = self.field.ripple(center);
        if !indices.is_empty() {
            self.schedule.after(
                now_ms,
                RIPPLE_PULSE_MS,
                TimerEvent::RevertPulse {
                    generation: self.generation,
                    indices,
                },
            );
        }
    }

    fn handle_timer(&mut self, event: TimerEvent, now_ms: f64) {
        let current = self.generation;
        match event {
            TimerEvent::Explode { generation } => {
                if generation != current || !self.interaction.state.attracting {
                    log::debug!("[interaction] dropping stale explosion trigger");
                    return;
                }
                let center = self.interaction.begin_explosion();
                self.field.explode_from(center, &mut self.rng);
                let bundle = explosion_bundle(
                    center,
                    self.quality.caps().max_effects,
                    &mut self.rng,
                );
                for spec in bundle {
                    self.spawn_effect(spec, now_ms);
                }
                self.schedule.after(
                    now_ms,
                    EXPLOSION_LOOK_MS,
                    TimerEvent::RevertExplosionLook { generation },
                );
                self.schedule
                    .after(now_ms, EXPLOSION_SETTLE_MS, TimerEvent::Settle { generation });
            }
            TimerEvent::Settle { generation } => {
                if generation == current && self.interaction.state.exploding {
                    self.field.restore_velocities();
                    self.interaction.settle();
                }
            }
            TimerEvent::RevertExplosionLook { generation } => {
                if generation == current {
                    self.field.reset_looks();
                }
            }
            TimerEvent::RevertPulse {
                generation,
                indices,
            } => {
                if generation == current {
                    self.field.reset_looks_at(&indices);
                }
            }
            TimerEvent::ExpireEffect { id } => self.expire_effect(id),
        }
    }

    // ---------------- Collaborator hooks ----------------

    /// Repaint every particle for `theme`. Calling it twice is a no-op.
    pub fn update_particle_colors(&mut self, theme: Theme) {
        self.theme = theme;
        for (i, paint) in self.field.recolor(theme).enumerate() {
            self.surface.paint_particle(i, &paint);
        }
    }

    pub fn update_for_scroll(&mut self, scroll_y: f32, now_ms: f64) {
        let height = self.field.viewport().height;
        self.reach.on_scroll(scroll_y, height, now_ms);
    }

    // ---------------- Accessors ----------------

    pub fn particles(&self) -> &[Particle] {
        self.field.particles()
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        self.field.particles_mut()
    }

    pub fn viewport(&self) -> Viewport {
        self.field.viewport()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn phase(&self, now_ms: f64) -> InteractionPhase {
        self.interaction.phase(now_ms)
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction.state
    }

    pub fn tier(&self) -> QualityTier {
        self.quality.tier()
    }

    pub fn caps(&self) -> QualityCaps {
        self.quality.caps()
    }

    /// Feed one per-second frame count directly, bypassing frame timing.
    pub fn record_fps_sample(&mut self, fps: f32) -> Option<QualityTier> {
        let changed = self.quality.record_sample(fps);
        if let Some(tier) = changed {
            self.apply_tier(tier);
        }
        changed
    }

    pub fn connection_distance(&self) -> f32 {
        self.reach.distance()
    }

    pub fn connector_count(&self) -> usize {
        self.connectors.len()
    }

    pub fn pool_len(&self) -> usize {
        self.pool.len()
    }

    pub fn active_effects(&self) -> impl Iterator<Item = EffectKind> + '_ {
        self.active.iter().map(|e| e.kind)
    }

    pub fn pending_timers(&self) -> usize {
        self.schedule.len()
    }

    pub fn next_timer_ms(&self) -> Option<f64> {
        self.schedule.next_due_ms()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
