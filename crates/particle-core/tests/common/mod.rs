// Recording surface shared by the engine-level tests.

#![allow(dead_code)]

use particle_core::*;
use std::collections::HashSet;

#[derive(Default)]
pub struct RecordingSurface {
    pub mounted: usize,
    pub paints: Vec<Option<ParticlePaint>>,
    pub views: Vec<Option<ParticleView>>,
    pub created: Vec<EffectKind>,
    pub shown_effects: Vec<EffectSpec>,
    pub shown_connectors: usize,
    pub visible: HashSet<u32>,
    pub clears: usize,
    next_handle: u32,
}

impl Surface for RecordingSurface {
    type Handle = u32;

    fn mount_particles(&mut self, count: usize) {
        self.mounted = count;
        self.paints = vec![None; count];
        self.views = vec![None; count];
    }

    fn paint_particle(&mut self, index: usize, paint: &ParticlePaint) {
        self.paints[index] = Some(*paint);
    }

    fn draw_particle(&mut self, index: usize, view: &ParticleView) {
        self.views[index] = Some(*view);
    }

    fn create_effect(&mut self, kind: EffectKind) -> Option<u32> {
        self.created.push(kind);
        self.next_handle += 1;
        Some(self.next_handle)
    }

    fn show_effect(&mut self, handle: &u32, effect: &EffectSpec) {
        self.visible.insert(*handle);
        self.shown_effects.push(*effect);
    }

    fn show_connector(&mut self, handle: &u32, _connector: &Connector) {
        self.visible.insert(*handle);
        self.shown_connectors += 1;
    }

    fn hide(&mut self, handle: &u32) {
        self.visible.remove(handle);
    }

    fn clear(&mut self) {
        self.clears += 1;
        self.mounted = 0;
        self.paints.clear();
        self.views.clear();
        self.visible.clear();
    }
}

pub const WIDE: Viewport = Viewport {
    width: 1280.0,
    height: 720.0,
};

pub fn make_engine(seed: u64) -> ParticleEngine<RecordingSurface> {
    let mut engine =
        ParticleEngine::new(RecordingSurface::default(), FieldConfig::default(), seed)
            .expect("default config is valid");
    engine.initialize(WIDE, Theme::Dark);
    engine
}

/// Drive `frame` every 16ms from `from` up to and including `to`.
pub fn run_frames(engine: &mut ParticleEngine<RecordingSurface>, from: f64, to: f64) {
    let mut t = from;
    while t <= to {
        engine.frame(t);
        t += 16.0;
    }
}

pub fn still_particle(x: f32, y: f32) -> Particle {
    Particle {
        pos: glam::Vec2::new(x, y),
        vel: glam::Vec2::ZERO,
        original_vel: None,
        hue: 240.0,
        size: 10.0,
        pulse_phase: 0.0,
        look: Look::BASELINE,
    }
}
