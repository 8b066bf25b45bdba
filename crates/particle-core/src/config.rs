use crate::constants::*;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FieldError {
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

/// Viewport in CSS pixels. Never smaller than 1x1 so ratios stay finite.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        let sane = |v: f32| if v.is_finite() { v.max(1.0) } else { 1.0 };
        Self {
            width: sane(width),
            height: sane(height),
        }
    }

    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Runtime knobs for the engine. Defaults mirror `constants.rs`.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub connection_distance: f32,
    pub scroll_distance_bonus: f32,
    pub scroll_idle_ms: f64,
    pub pointer_radius: f32,
    pub pointer_idle_ms: f64,
    pub input_throttle_ms: f64,
    pub double_click_ms: f64,
    pub double_tap_ms: f64,
    pub explosion_delay_min_ms: f64,
    pub explosion_delay_span_ms: f64,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            connection_distance: CONNECTION_DISTANCE,
            scroll_distance_bonus: SCROLL_DISTANCE_BONUS,
            scroll_idle_ms: SCROLL_IDLE_MS,
            pointer_radius: POINTER_RADIUS,
            pointer_idle_ms: POINTER_IDLE_MS,
            input_throttle_ms: INPUT_THROTTLE_MS,
            double_click_ms: DOUBLE_CLICK_MS,
            double_tap_ms: DOUBLE_TAP_MS,
            explosion_delay_min_ms: EXPLOSION_DELAY_MIN_MS,
            explosion_delay_span_ms: EXPLOSION_DELAY_SPAN_MS,
        }
    }
}

impl FieldConfig {
    pub fn validate(&self) -> Result<(), FieldError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.connection_distance as f64) {
            return Err(FieldError::InvalidConfig(
                "connection_distance must be positive",
            ));
        }
        if !self.scroll_distance_bonus.is_finite() || self.scroll_distance_bonus < 0.0 {
            return Err(FieldError::InvalidConfig(
                "scroll_distance_bonus must be non-negative",
            ));
        }
        if !positive(self.pointer_radius as f64) {
            return Err(FieldError::InvalidConfig("pointer_radius must be positive"));
        }
        if !positive(self.double_click_ms) || !positive(self.double_tap_ms) {
            return Err(FieldError::InvalidConfig(
                "double click/tap windows must be positive",
            ));
        }
        if !positive(self.explosion_delay_min_ms)
            || !self.explosion_delay_span_ms.is_finite()
            || self.explosion_delay_span_ms < 0.0
        {
            return Err(FieldError::InvalidConfig("explosion delay range is invalid"));
        }
        if !self.input_throttle_ms.is_finite()
            || self.input_throttle_ms < 0.0
            || !positive(self.pointer_idle_ms)
            || !self.scroll_idle_ms.is_finite()
            || self.scroll_idle_ms < 0.0
        {
            return Err(FieldError::InvalidConfig("input timings are invalid"));
        }
        Ok(())
    }
}
