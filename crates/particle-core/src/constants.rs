// Shared tuning constants for the particle background.
// Units are CSS pixels and milliseconds unless noted.

// Field population
pub const WIDE_VIEWPORT_PX: f32 = 768.0; // above this width the wide base count applies
pub const BASE_COUNT_WIDE: usize = 50;
pub const BASE_COUNT_NARROW: usize = 30;

// Particle creation ranges
pub const SIZE_MIN: f32 = 8.0;
pub const SIZE_SPAN: f32 = 12.0;
pub const HUE_MIN: f32 = 220.0; // cool blue-violet band
pub const HUE_SPAN: f32 = 60.0;
pub const SPEED_MIN: f32 = 0.2;
pub const SPEED_SPAN: f32 = 0.8;
pub const GLOW_RADIUS_PER_SIZE: f32 = 3.0;

// Integration
pub const MAX_AXIS_SPEED: f32 = 8.0;
pub const WRAP_MARGIN: f32 = 50.0;
pub const PULSE_STEP: f32 = 0.05; // radians per tick
pub const FLOAT_AMPLITUDE: f32 = 2.0;
pub const NEAR_ZERO: f32 = 1e-3; // distances below this never produce a direction

// Pointer proximity
pub const POINTER_RADIUS: f32 = 120.0;
pub const POINTER_IMPULSE: f32 = 0.5;
pub const POINTER_SCALE: f32 = 1.2;
pub const POINTER_BRIGHTNESS: f32 = 1.3;
pub const POINTER_IDLE_MS: f64 = 2000.0;
pub const INPUT_THROTTLE_MS: f64 = 16.0;

// Attraction
pub const DOUBLE_CLICK_MS: f64 = 300.0;
pub const DOUBLE_TAP_MS: f64 = 500.0;
pub const ATTRACTION_STEP: f32 = 0.08; // force added every animation frame
pub const ATTRACTION_DEAD_ZONE: f32 = 3.0;
pub const ATTRACTION_DAMPING: f32 = 0.005;
pub const ATTRACTION_GAIN: f32 = 8.0;
pub const ATTRACTION_GLOW_RADIUS: f32 = 150.0;
pub const ATTRACTION_GLOW_SCALE: f32 = 1.2;
pub const ATTRACTION_GLOW_BRIGHTNESS: f32 = 1.5;
pub const EXPLOSION_DELAY_MIN_MS: f64 = 4000.0;
pub const EXPLOSION_DELAY_SPAN_MS: f64 = 1000.0;

// Explosion
pub const EXPLOSION_FORCE_BASE: f32 = 35.0;
pub const EXPLOSION_FORCE_FLOOR: f32 = 15.0;
pub const EXPLOSION_FALLOFF: f32 = 0.2; // force lost per pixel of distance
pub const EXPLOSION_JITTER: f32 = 8.0; // full width of the symmetric jitter
pub const EXPLOSION_LOOK_MS: f64 = 1500.0;
pub const EXPLOSION_SETTLE_MS: f64 = 3000.0;

// Click ripple
pub const RIPPLE_RADIUS: f32 = 100.0;
pub const RIPPLE_PULL: f32 = 0.01;
pub const RIPPLE_PULSE: f32 = 1.5;
pub const RIPPLE_PULSE_MS: f64 = 500.0;

// Connections
pub const CONNECTION_DISTANCE: f32 = 150.0;
pub const SCROLL_DISTANCE_BONUS: f32 = 50.0;
pub const SCROLL_IDLE_MS: f64 = 150.0;
pub const CONNECTOR_THICKNESS: f32 = 3.0;
pub const CONNECTOR_ALPHA: f32 = 0.8;
pub const CONNECTOR_SHADOW_ALPHA: f32 = 0.5;

// Effect lifetimes
pub const ATTRACTION_POINT_MS: f64 = 5000.0;
pub const RING_MS: f64 = 3000.0;
pub const BURST_MS: f64 = 2000.0;
pub const SHOCKWAVE_MS: f64 = 2500.0;
pub const ENERGY_FIELD_MS: f64 = 2000.0;
pub const RIPPLE_MS: f64 = 1000.0;

// Explosion bundle sizing
pub const MAX_RINGS: f32 = 5.0;
pub const MAX_BURSTS: f32 = 40.0;
pub const SHOCKWAVE_COUNT: usize = 3;
pub const RING_STAGGER_S: f32 = 0.15;
pub const SHOCKWAVE_STAGGER_S: f32 = 0.2;
pub const BURST_DELAY_MAX_S: f32 = 0.5;

// Quality sampling
pub const SAMPLE_WINDOW_MS: f64 = 1000.0;
pub const MAX_FPS_SAMPLES: usize = 10;
pub const LOW_FPS_BELOW: f32 = 30.0;
pub const MEDIUM_FPS_BELOW: f32 = 45.0;
pub const HIGH_FPS_ABOVE: f32 = 55.0;
