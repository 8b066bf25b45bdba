use crate::color::ParticlePaint;
use crate::connections::Connector;
use crate::effects::{EffectKind, EffectSpec};
use crate::particle::ParticleView;

/// Where the engine puts things on screen.
///
/// Particles are addressed by index and live as long as the field. Effects
/// and connectors are opaque handles that the engine pools and reuses; a
/// surface only creates a new handle when the pool has none of that kind.
pub trait Surface {
    type Handle;

    fn mount_particles(&mut self, count: usize);
    fn paint_particle(&mut self, index: usize, paint: &ParticlePaint);
    fn draw_particle(&mut self, index: usize, view: &ParticleView);

    /// `None` when the surface could not build a node; the effect is skipped.
    fn create_effect(&mut self, kind: EffectKind) -> Option<Self::Handle>;
    fn show_effect(&mut self, handle: &Self::Handle, effect: &EffectSpec);
    fn show_connector(&mut self, handle: &Self::Handle, connector: &Connector);
    fn hide(&mut self, handle: &Self::Handle);

    /// Remove every particle, effect and connector.
    fn clear(&mut self);
}
