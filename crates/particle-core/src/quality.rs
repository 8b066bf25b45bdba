//! Adaptive quality control driven by observed frame rate.
//!
//! Frames are counted in 1s windows; each completed window becomes one sample
//! in a short trailing history. The mean of that history selects a tier, and
//! each tier carries the caps the rest of the engine reads every tick.

use crate::constants::{
    HIGH_FPS_ABOVE, LOW_FPS_BELOW, MAX_FPS_SAMPLES, MEDIUM_FPS_BELOW, SAMPLE_WINDOW_MS,
};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QualityTier {
    Low,
    Medium,
    High,
}

/// Limits applied by the engine for a given tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityCaps {
    pub max_connections: usize,
    pub max_effects: usize,
    pub target_fps: f32,
}

impl QualityCaps {
    /// Minimum spacing between main ticks.
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.target_fps as f64
    }
}

impl QualityTier {
    pub fn caps(self) -> QualityCaps {
        match self {
            Self::Low => QualityCaps {
                max_connections: 30,
                max_effects: 20,
                target_fps: 30.0,
            },
            Self::Medium => QualityCaps {
                max_connections: 60,
                max_effects: 35,
                target_fps: 45.0,
            },
            Self::High => QualityCaps {
                max_connections: 100,
                max_effects: 50,
                target_fps: 60.0,
            },
        }
    }

    /// Scale applied to the base particle count when the field is rebuilt.
    pub fn particle_multiplier(self) -> f32 {
        match self {
            Self::Low => 0.6,
            Self::Medium => 0.8,
            Self::High => 1.0,
        }
    }

    /// Tier implied by a mean frame rate, or `None` inside the hold band.
    pub fn for_mean_fps(mean: f32) -> Option<Self> {
        if mean < LOW_FPS_BELOW {
            Some(Self::Low)
        } else if mean < MEDIUM_FPS_BELOW {
            Some(Self::Medium)
        } else if mean > HIGH_FPS_ABOVE {
            Some(Self::High)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct QualityController {
    tier: QualityTier,
    samples: VecDeque<f32>,
    window_start_ms: Option<f64>,
    frames_in_window: u32,
}

impl Default for QualityController {
    fn default() -> Self {
        Self::new(QualityTier::High)
    }
}

impl QualityController {
    pub fn new(tier: QualityTier) -> Self {
        Self {
            tier,
            samples: VecDeque::with_capacity(MAX_FPS_SAMPLES + 1),
            window_start_ms: None,
            frames_in_window: 0,
        }
    }

    pub fn tier(&self) -> QualityTier {
        self.tier
    }

    pub fn caps(&self) -> QualityCaps {
        self.tier.caps()
    }

    pub fn samples(&self) -> impl Iterator<Item = f32> + '_ {
        self.samples.iter().copied()
    }

    pub fn mean_fps(&self) -> Option<f32> {
        if self.samples.is_empty() {
            return None;
        }
        Some(self.samples.iter().sum::<f32>() / self.samples.len() as f32)
    }

    /// Count one animation frame. Returns the new tier when this frame closed
    /// a sample window and the tier changed.
    pub fn record_frame(&mut self, now_ms: f64) -> Option<QualityTier> {
        let start = *self.window_start_ms.get_or_insert(now_ms);
        self.frames_in_window += 1;
        if now_ms - start < SAMPLE_WINDOW_MS {
            return None;
        }
        let fps = self.frames_in_window as f32;
        self.frames_in_window = 0;
        self.window_start_ms = Some(now_ms);
        self.record_sample(fps)
    }

    /// Drop the partially counted window, e.g. after the frame loop was
    /// paused. Recorded samples are kept.
    pub fn restart_window(&mut self) {
        self.window_start_ms = None;
        self.frames_in_window = 0;
    }

    /// Push one per-second frame count and re-evaluate the tier.
    pub fn record_sample(&mut self, fps: f32) -> Option<QualityTier> {
        self.samples.push_back(fps);
        while self.samples.len() > MAX_FPS_SAMPLES {
            self.samples.pop_front();
        }
        let mean = self.mean_fps()?;
        match QualityTier::for_mean_fps(mean) {
            Some(next) if next != self.tier => {
                log::info!(
                    "[quality] mean {:.1} fps over {} samples: {:?} -> {:?}",
                    mean,
                    self.samples.len(),
                    self.tier,
                    next
                );
                self.tier = next;
                Some(next)
            }
            _ => None,
        }
    }
}
