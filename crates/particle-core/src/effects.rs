//! Transient visual effects and the reuse pool behind them.

use crate::color::Rgba;
use crate::constants::*;
use glam::Vec2;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EffectKind {
    AttractionPoint,
    Ring,
    Burst,
    Shockwave,
    EnergyField,
    Ripple,
    Connector,
}

impl EffectKind {
    /// How long a spawned effect stays attached. Connectors live for one tick.
    pub fn lifetime_ms(self) -> Option<f64> {
        match self {
            Self::AttractionPoint => Some(ATTRACTION_POINT_MS),
            Self::Ring => Some(RING_MS),
            Self::Burst => Some(BURST_MS),
            Self::Shockwave => Some(SHOCKWAVE_MS),
            Self::EnergyField => Some(ENERGY_FIELD_MS),
            Self::Ripple => Some(RIPPLE_MS),
            Self::Connector => None,
        }
    }

    /// CSS class used by the DOM surface.
    pub fn class_name(self) -> &'static str {
        match self {
            Self::AttractionPoint => "attraction-point",
            Self::Ring => "explosion-ring",
            Self::Burst => "burst-particle",
            Self::Shockwave => "shockwave-effect",
            Self::EnergyField => "energy-field",
            Self::Ripple => "particle-ripple",
            Self::Connector => "particle-connection",
        }
    }
}

/// Placement for one effect instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectSpec {
    pub kind: EffectKind,
    pub x: f32,
    pub y: f32,
    pub delay_s: f32,
    pub rotation_deg: f32,
    pub tint: Option<Rgba>,
}

impl EffectSpec {
    pub fn at(kind: EffectKind, at: Vec2) -> Self {
        Self {
            kind,
            x: at.x,
            y: at.y,
            delay_s: 0.0,
            rotation_deg: 0.0,
            tint: None,
        }
    }
}

/// Idle handles waiting for reuse, tagged by kind.
///
/// Lookup is a linear scan; the pool never holds more than the effect
/// budget (at most 50 entries).
#[derive(Debug)]
pub struct EffectPool<H> {
    idle: Vec<(EffectKind, H)>,
}

impl<H> Default for EffectPool<H> {
    fn default() -> Self {
        Self { idle: Vec::new() }
    }
}

impl<H> EffectPool<H> {
    /// Take an idle handle of `kind`, or `None` if the caller must create one.
    pub fn acquire(&mut self, kind: EffectKind) -> Option<H> {
        let i = self.idle.iter().position(|(k, _)| *k == kind)?;
        Some(self.idle.swap_remove(i).1)
    }

    /// Keep `handle` for reuse if the pool is under `budget`. Returns the
    /// handle back when it was not retained.
    pub fn release(&mut self, kind: EffectKind, handle: H, budget: usize) -> Option<H> {
        if self.idle.len() < budget {
            self.idle.push((kind, handle));
            None
        } else {
            Some(handle)
        }
    }

    /// Drop idle handles beyond `budget`, e.g. after the budget shrinks.
    pub fn shrink_to(&mut self, budget: usize) -> Vec<H> {
        if self.idle.len() <= budget {
            return Vec::new();
        }
        self.idle.drain(budget..).map(|(_, h)| h).collect()
    }

    pub fn len(&self) -> usize {
        self.idle.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idle.is_empty()
    }

    pub fn count_of(&self, kind: EffectKind) -> usize {
        self.idle.iter().filter(|(k, _)| *k == kind).count()
    }

    pub fn clear(&mut self) {
        self.idle.clear();
    }
}

/// Rings, bursts, shockwaves and an energy field centred on `center`,
/// sized by the current effect budget.
pub fn explosion_bundle<R: Rng + ?Sized>(
    center: Vec2,
    max_effects: usize,
    rng: &mut R,
) -> Vec<EffectSpec> {
    let budget = max_effects as f32;
    let rings = MAX_RINGS.min(budget / 10.0).ceil() as usize;
    let bursts = MAX_BURSTS.min(budget / 2.0).ceil() as usize;
    let mut out = Vec::with_capacity(rings + bursts + SHOCKWAVE_COUNT + 1);

    for i in 0..rings {
        let step = i as u8;
        out.push(EffectSpec {
            delay_s: i as f32 * RING_STAGGER_S,
            tint: Some(Rgba {
                r: 255u8.saturating_sub(step.saturating_mul(30)),
                g: 100u8.saturating_add(step.saturating_mul(20)),
                b: 50u8.saturating_add(step.saturating_mul(30)),
                alpha: 0.8,
            }),
            ..EffectSpec::at(EffectKind::Ring, center)
        });
    }
    for _ in 0..bursts {
        out.push(EffectSpec {
            rotation_deg: rng.gen::<f32>() * 360.0,
            delay_s: rng.gen::<f32>() * BURST_DELAY_MAX_S,
            ..EffectSpec::at(EffectKind::Burst, center)
        });
    }
    for i in 0..SHOCKWAVE_COUNT {
        out.push(EffectSpec {
            delay_s: i as f32 * SHOCKWAVE_STAGGER_S,
            ..EffectSpec::at(EffectKind::Shockwave, center)
        });
    }
    out.push(EffectSpec::at(EffectKind::EnergyField, center));
    out
}
