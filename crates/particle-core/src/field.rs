//! The particle set and its per-tick integration step.

use crate::color::Theme;
use crate::config::Viewport;
use crate::constants::*;
use crate::interaction::InteractionState;
use crate::particle::{Look, Particle, ParticleView};
use crate::quality::QualityTier;
use glam::Vec2;
use rand::Rng;
use std::f32::consts::TAU;

pub struct ParticleField {
    particles: Vec<Particle>,
    viewport: Viewport,
}

/// Unit vector and length of `v`, or `None` when too short to have a direction.
#[inline]
pub fn direction(v: Vec2) -> Option<(Vec2, f32)> {
    let len = v.length();
    (len.is_finite() && len > NEAR_ZERO).then(|| (v / len, len))
}

impl ParticleField {
    pub fn particle_count(viewport: Viewport, tier: QualityTier) -> usize {
        let base = if viewport.width > WIDE_VIEWPORT_PX {
            BASE_COUNT_WIDE
        } else {
            BASE_COUNT_NARROW
        };
        (base as f32 * tier.particle_multiplier()).floor() as usize
    }

    pub fn initialize<R: Rng + ?Sized>(viewport: Viewport, tier: QualityTier, rng: &mut R) -> Self {
        let count = Self::particle_count(viewport, tier);
        let particles = (0..count)
            .map(|_| {
                let speed = SPEED_MIN + rng.gen::<f32>() * SPEED_SPAN;
                Particle {
                    pos: Vec2::new(
                        rng.gen::<f32>() * viewport.width,
                        rng.gen::<f32>() * viewport.height,
                    ),
                    vel: Vec2::new(
                        (rng.gen::<f32>() - 0.5) * speed,
                        (rng.gen::<f32>() - 0.5) * speed,
                    ),
                    original_vel: None,
                    hue: HUE_MIN + rng.gen::<f32>() * HUE_SPAN,
                    size: SIZE_MIN + rng.gen::<f32>() * SIZE_SPAN,
                    pulse_phase: rng.gen::<f32>() * TAU,
                    look: Look::BASELINE,
                }
            })
            .collect();
        Self {
            particles,
            viewport,
        }
    }

    pub fn from_particles(particles: Vec<Particle>, viewport: Viewport) -> Self {
        Self {
            particles,
            viewport,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// One main tick. Forces read only the interaction state and each
    /// particle's own previous position, so a single pass is enough.
    pub fn integrate(&mut self, interaction: &InteractionState, pointer_radius: f32, now_ms: f64) {
        let pointer_mode = interaction.pointer_recent(now_ms)
            && !interaction.attracting
            && !interaction.exploding;
        let (w, h) = (self.viewport.width, self.viewport.height);

        for p in &mut self.particles {
            p.pulse_phase += PULSE_STEP;

            if pointer_mode {
                repel_from_pointer(p, interaction.pointer, pointer_radius);
            }
            if interaction.attracting {
                pull_toward(p, interaction.attraction_center, interaction.attraction_force);
            }

            p.vel = p.vel.clamp(Vec2::splat(-MAX_AXIS_SPEED), Vec2::splat(MAX_AXIS_SPEED));
            p.pos += p.vel;
            p.pos.x = wrap(p.pos.x, w);
            p.pos.y = wrap(p.pos.y, h);
        }
    }

    pub fn views(&self, floating: bool) -> impl Iterator<Item = ParticleView> + '_ {
        self.particles.iter().map(move |p| ParticleView {
            x: p.pos.x,
            y: p.pos.y,
            size: p.size,
            float_offset: if floating {
                p.pulse_phase.sin() * FLOAT_AMPLITUDE
            } else {
                0.0
            },
            look: p.look,
        })
    }

    pub fn snapshot_velocities(&mut self) {
        for p in &mut self.particles {
            p.original_vel = Some(p.vel);
        }
    }

    pub fn restore_velocities(&mut self) {
        for p in &mut self.particles {
            if let Some(v) = p.original_vel.take() {
                p.vel = v;
            }
        }
    }

    /// Outward impulse from `center`, strongest near it, plus random jitter.
    pub fn explode_from<R: Rng + ?Sized>(&mut self, center: Vec2, rng: &mut R) {
        for p in &mut self.particles {
            let impulse = match direction(p.pos - center) {
                Some((dir, dist)) => {
                    dir * (EXPLOSION_FORCE_BASE - dist * EXPLOSION_FALLOFF).max(EXPLOSION_FORCE_FLOOR)
                }
                None => Vec2::ZERO,
            };
            let jitter = Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5) * EXPLOSION_JITTER;
            p.vel = impulse + jitter;
            p.look = Look::explosion();
        }
    }

    /// Nudge particles near `center` toward it. Returns the indices touched.
    pub fn ripple(&mut self, center: Vec2) -> Vec<usize> {
        let mut touched = Vec::new();
        for (i, p) in self.particles.iter_mut().enumerate() {
            let offset = center - p.pos;
            let dist = offset.length();
            if dist < RIPPLE_RADIUS {
                let closeness = (RIPPLE_RADIUS - dist) / RIPPLE_RADIUS;
                p.vel += offset * closeness * RIPPLE_PULL;
                p.look = Look::emphasis(RIPPLE_PULSE, RIPPLE_PULSE);
                touched.push(i);
            }
        }
        touched
    }

    pub fn reset_looks(&mut self) {
        for p in &mut self.particles {
            p.look = Look::BASELINE;
        }
    }

    pub fn reset_looks_at(&mut self, indices: &[usize]) {
        for &i in indices {
            if let Some(p) = self.particles.get_mut(i) {
                p.look = Look::BASELINE;
            }
        }
    }

    pub fn recolor(&self, theme: Theme) -> impl Iterator<Item = crate::color::ParticlePaint> + '_ {
        self.particles.iter().map(move |p| p.paint(theme))
    }
}

fn repel_from_pointer(p: &mut Particle, pointer: Vec2, radius: f32) {
    match direction(p.pos - pointer) {
        Some((away, dist)) if dist < radius => {
            let strength = (radius - dist) / radius;
            p.vel += away * strength * POINTER_IMPULSE;
            p.look = Look::emphasis(POINTER_SCALE, POINTER_BRIGHTNESS);
        }
        Some(_) => p.look = Look::BASELINE,
        None => {}
    }
}

fn pull_toward(p: &mut Particle, center: Vec2, force: f32) {
    let Some((dir, dist)) = direction(center - p.pos) else {
        return;
    };
    if dist <= ATTRACTION_DEAD_ZONE {
        return;
    }
    let damped = force / (dist * ATTRACTION_DAMPING + 1.0);
    p.vel = dir * damped * ATTRACTION_GAIN;
    let glow = (1.0 - dist / ATTRACTION_GLOW_RADIUS).max(0.0);
    p.look = Look::emphasis(
        1.0 + glow * ATTRACTION_GLOW_SCALE,
        1.0 + glow * ATTRACTION_GLOW_BRIGHTNESS,
    );
}

#[inline]
fn wrap(v: f32, extent: f32) -> f32 {
    if v > extent + WRAP_MARGIN {
        -WRAP_MARGIN
    } else if v < -WRAP_MARGIN {
        extent + WRAP_MARGIN
    } else {
        v
    }
}
