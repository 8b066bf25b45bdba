use crate::color::{ParticlePaint, Theme};
use glam::Vec2;

/// Transient visual emphasis layered over a particle's base appearance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Look {
    pub scale: f32,
    pub brightness: f32,
    pub hue_rotate_deg: f32,
    pub contrast: f32,
    pub exploding: bool,
}

impl Default for Look {
    fn default() -> Self {
        Self::BASELINE
    }
}

impl Look {
    pub const BASELINE: Look = Look {
        scale: 1.0,
        brightness: 1.0,
        hue_rotate_deg: 0.0,
        contrast: 1.0,
        exploding: false,
    };

    pub fn emphasis(scale: f32, brightness: f32) -> Self {
        Self {
            scale,
            brightness,
            ..Self::BASELINE
        }
    }

    pub fn explosion() -> Self {
        Self {
            scale: 2.5,
            brightness: 3.0,
            hue_rotate_deg: 180.0,
            contrast: 1.5,
            exploding: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Velocity captured when attraction begins; restored once the explosion settles.
    pub original_vel: Option<Vec2>,
    pub hue: f32,
    pub size: f32,
    pub pulse_phase: f32,
    pub look: Look,
}

impl Particle {
    pub fn paint(&self, theme: Theme) -> ParticlePaint {
        ParticlePaint::for_particle(self.hue, self.size, theme)
    }
}

/// What a surface needs to place one particle for the current tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleView {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    /// Vertical bob added on top of `y`; zero during attraction and explosion.
    pub float_offset: f32,
    pub look: Look,
}
