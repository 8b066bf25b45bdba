//! Proximity connectors between nearby particles.

use crate::color::Hsla;
use crate::constants::{CONNECTOR_ALPHA, CONNECTOR_SHADOW_ALPHA, CONNECTOR_THICKNESS};
use crate::particle::Particle;

/// A line from particle `from` to particle `to`, ready for a surface to place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connector {
    pub from: usize,
    pub to: usize,
    pub x: f32,
    pub y: f32,
    pub length: f32,
    pub angle_rad: f32,
    pub thickness: f32,
    pub opacity: f32,
    pub start_color: Hsla,
    pub end_color: Hsla,
    pub shadow: Hsla,
}

impl Connector {
    fn between(i: usize, j: usize, a: &Particle, b: &Particle, dist: f32, max_dist: f32) -> Self {
        let opacity = 1.0 - dist / max_dist;
        let d = b.pos - a.pos;
        Self {
            from: i,
            to: j,
            x: a.pos.x,
            y: a.pos.y,
            length: dist,
            angle_rad: d.y.atan2(d.x),
            thickness: CONNECTOR_THICKNESS,
            opacity,
            start_color: Hsla::new(a.hue, 80.0, 70.0, opacity * CONNECTOR_ALPHA),
            end_color: Hsla::new(b.hue, 80.0, 70.0, opacity * CONNECTOR_ALPHA),
            shadow: Hsla::new(a.hue, 80.0, 70.0, opacity * CONNECTOR_SHADOW_ALPHA),
        }
    }
}

/// Scan unordered pairs in index order and collect connectors under
/// `max_distance`, stopping as soon as `max_connections` is reached.
pub fn find_connections(
    particles: &[Particle],
    max_connections: usize,
    max_distance: f32,
    out: &mut Vec<Connector>,
) {
    out.clear();
    if max_connections == 0 || max_distance <= 0.0 {
        return;
    }
    'outer: for (i, a) in particles.iter().enumerate() {
        for (j, b) in particles.iter().enumerate().skip(i + 1) {
            let dist = a.pos.distance(b.pos);
            if dist < max_distance {
                out.push(Connector::between(i, j, a, b, dist, max_distance));
                if out.len() >= max_connections {
                    break 'outer;
                }
            }
        }
    }
}

/// Connection distance widened by scroll depth, reset after scrolling idles.
#[derive(Clone, Debug)]
pub struct ScrollReach {
    base: f32,
    bonus: f32,
    idle_ms: f64,
    current: f32,
    reset_at_ms: Option<f64>,
}

impl ScrollReach {
    pub fn new(base: f32, bonus: f32, idle_ms: f64) -> Self {
        Self {
            base,
            bonus,
            idle_ms,
            current: base,
            reset_at_ms: None,
        }
    }

    pub fn distance(&self) -> f32 {
        self.current
    }

    pub fn base(&self) -> f32 {
        self.base
    }

    pub fn on_scroll(&mut self, scroll_y: f32, viewport_height: f32, now_ms: f64) {
        let depth = if viewport_height > 0.0 && scroll_y.is_finite() {
            (scroll_y / viewport_height).clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.current = self.base + depth * self.bonus;
        self.reset_at_ms = Some(now_ms + self.idle_ms);
    }

    /// Returns true when the idle deadline passed and the distance was reset.
    pub fn expire(&mut self, now_ms: f64) -> bool {
        match self.reset_at_ms {
            Some(t) if now_ms >= t => {
                self.current = self.base;
                self.reset_at_ms = None;
                true
            }
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        self.current = self.base;
        self.reset_at_ms = None;
    }
}
