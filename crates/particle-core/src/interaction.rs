//! Pointer/touch interaction state and the attract -> explode state machine.
//!
//! Input handlers only mutate [`InteractionState`]; the engine reads it on the
//! next tick. Phase changes that touch particles or effects are carried out by
//! the engine, which calls the `begin_*`/`settle` methods here to keep the
//! flags consistent.

use crate::config::FieldConfig;
use crate::constants::ATTRACTION_STEP;
use crate::schedule::Throttle;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InteractionPhase {
    Idle,
    PointerActive,
    Attracting,
    Exploding,
}

#[derive(Clone, Debug, Default)]
pub struct InteractionState {
    pub pointer: Vec2,
    /// Pointer counts as moving until this time; pushed forward on every move.
    pub pointer_active_until_ms: Option<f64>,
    pub attracting: bool,
    pub attraction_center: Vec2,
    /// Grows by a fixed step every animation frame while attracting.
    pub attraction_force: f32,
    pub exploding: bool,
    pub last_click_ms: Option<f64>,
    pub last_tap_ms: Option<f64>,
}

impl InteractionState {
    pub fn pointer_recent(&self, now_ms: f64) -> bool {
        self.pointer_active_until_ms.is_some_and(|t| now_ms < t)
    }

    pub fn phase(&self, now_ms: f64) -> InteractionPhase {
        if self.exploding {
            InteractionPhase::Exploding
        } else if self.attracting {
            InteractionPhase::Attracting
        } else if self.pointer_recent(now_ms) {
            InteractionPhase::PointerActive
        } else {
            InteractionPhase::Idle
        }
    }

    pub fn busy(&self) -> bool {
        self.attracting || self.exploding
    }
}

/// How a click was classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickKind {
    /// Second half of a double-click: start attraction.
    Attract,
    /// Ordinary click: local ripple.
    Ripple,
    /// Double-click while attraction or explosion is already running.
    Ignored,
}

#[derive(Clone, Debug)]
pub struct InteractionController {
    pub state: InteractionState,
    double_click_ms: f64,
    double_tap_ms: f64,
    pointer_idle_ms: f64,
    pointer_throttle: Throttle,
    touch_throttle: Throttle,
}

impl InteractionController {
    pub fn new(config: &FieldConfig) -> Self {
        Self {
            state: InteractionState::default(),
            double_click_ms: config.double_click_ms,
            double_tap_ms: config.double_tap_ms,
            pointer_idle_ms: config.pointer_idle_ms,
            pointer_throttle: Throttle::new(config.input_throttle_ms),
            touch_throttle: Throttle::new(config.input_throttle_ms),
        }
    }

    pub fn phase(&self, now_ms: f64) -> InteractionPhase {
        self.state.phase(now_ms)
    }

    fn touch_pointer(&mut self, at: Vec2, now_ms: f64) {
        self.state.pointer = at;
        self.state.pointer_active_until_ms = Some(now_ms + self.pointer_idle_ms);
    }

    /// Mouse move. Returns false when dropped by the throttle.
    pub fn pointer_move(&mut self, at: Vec2, now_ms: f64) -> bool {
        if !self.pointer_throttle.accept(now_ms) {
            return false;
        }
        self.touch_pointer(at, now_ms);
        true
    }

    pub fn touch_start(&mut self, at: Vec2, now_ms: f64) {
        self.touch_pointer(at, now_ms);
    }

    /// Touch move. Returns false when dropped by the throttle.
    pub fn touch_move(&mut self, at: Vec2, now_ms: f64) -> bool {
        if !self.touch_throttle.accept(now_ms) {
            return false;
        }
        self.touch_pointer(at, now_ms);
        true
    }

    pub fn classify_click(&mut self, now_ms: f64) -> ClickKind {
        let is_double = self
            .state
            .last_click_ms
            .is_some_and(|t| now_ms - t < self.double_click_ms);
        self.state.last_click_ms = Some(now_ms);
        match (is_double, self.state.busy()) {
            (true, false) => ClickKind::Attract,
            (true, true) => ClickKind::Ignored,
            (false, _) => ClickKind::Ripple,
        }
    }

    /// Touch end. Returns true when it completes a double-tap and attraction may start.
    pub fn classify_tap(&mut self, now_ms: f64) -> bool {
        let is_double = self.state.last_tap_ms.is_some_and(|t| {
            let gap = now_ms - t;
            gap > 0.0 && gap < self.double_tap_ms
        });
        self.state.last_tap_ms = Some(now_ms);
        is_double && !self.state.busy()
    }

    pub fn begin_attraction(&mut self, center: Vec2) -> bool {
        if self.state.busy() {
            return false;
        }
        self.state.attracting = true;
        self.state.attraction_center = center;
        self.state.attraction_force = 0.0;
        log::debug!("[interaction] attracting toward ({:.0},{:.0})", center.x, center.y);
        true
    }

    /// One step of the attraction task. Returns false once the phase has
    /// left `Attracting`, which is the task's stop condition.
    pub fn accumulate(&mut self) -> bool {
        if !self.state.attracting {
            return false;
        }
        self.state.attraction_force += ATTRACTION_STEP;
        true
    }

    pub fn begin_explosion(&mut self) -> Vec2 {
        self.state.attracting = false;
        self.state.exploding = true;
        log::debug!(
            "[interaction] exploding after force {:.2}",
            self.state.attraction_force
        );
        self.state.attraction_center
    }

    pub fn settle(&mut self) {
        self.state.exploding = false;
        log::debug!("[interaction] explosion settled");
    }

    /// Drop any in-progress phase, e.g. when the field is rebuilt.
    pub fn reset_phase(&mut self) {
        self.state.attracting = false;
        self.state.exploding = false;
        self.state.attraction_force = 0.0;
    }
}
