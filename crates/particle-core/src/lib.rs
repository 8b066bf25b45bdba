//! Decorative particle background: a drifting field of particles joined by
//! proximity connectors, with pointer repulsion, a double-click
//! attract/explode sequence, pooled visual effects and frame-rate driven
//! quality tiers.
//!
//! Nothing here touches a browser; rendering goes through [`Surface`].

pub mod color;
pub mod config;
pub mod connections;
pub mod constants;
pub mod effects;
pub mod engine;
pub mod field;
pub mod interaction;
pub mod particle;
pub mod quality;
pub mod schedule;
pub mod surface;

pub use color::*;
pub use config::*;
pub use connections::*;
pub use effects::*;
pub use engine::*;
pub use field::*;
pub use interaction::*;
pub use particle::*;
pub use quality::*;
pub use schedule::*;
pub use surface::*;
