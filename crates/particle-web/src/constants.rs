// DOM wiring constants for the web front-end.

pub const CONTAINER_ID: &str = "particles-container";
pub const PARTICLE_CLASS: &str = "particle";
pub const EXPLODING_CLASS: &str = "exploding";
pub const DARK_CLASS: &str = "dark"; // on <html>

pub const RESIZE_DEBOUNCE_MS: i32 = 250;
pub const TIMER_PUMP_MS: i32 = 100; // fires due timers while the frame loop is paused

pub const SWIPE_THRESHOLD_PX: f32 = 50.0;
pub const SWIPE_SCROLL_NUDGE_PX: f32 = 100.0;
