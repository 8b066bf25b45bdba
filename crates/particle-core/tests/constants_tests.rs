// Sanity checks on tuning constants and config validation.

use particle_core::constants::*;
use particle_core::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    assert!(BASE_COUNT_WIDE > BASE_COUNT_NARROW);
    assert!(EXPLOSION_FORCE_FLOOR < EXPLOSION_FORCE_BASE);
    assert!(EXPLOSION_FORCE_FLOOR > MAX_AXIS_SPEED);
    assert!(WRAP_MARGIN > 0.0);
    assert!(DOUBLE_CLICK_MS < DOUBLE_TAP_MS);
    assert!(ATTRACTION_DEAD_ZONE > NEAR_ZERO);
    assert!(LOW_FPS_BELOW < MEDIUM_FPS_BELOW && MEDIUM_FPS_BELOW < HIGH_FPS_ABOVE);
}

#[test]
fn effect_lifetimes_fall_in_expected_range() {
    let kinds = [
        EffectKind::AttractionPoint,
        EffectKind::Ring,
        EffectKind::Burst,
        EffectKind::Shockwave,
        EffectKind::EnergyField,
        EffectKind::Ripple,
    ];
    for kind in kinds {
        let ms = kind.lifetime_ms().expect("timed effect");
        assert!((1000.0..=5000.0).contains(&ms), "{kind:?} lives {ms}ms");
    }
    assert_eq!(EffectKind::Connector.lifetime_ms(), None);
}

#[test]
fn caps_grow_with_tier() {
    let tiers = [QualityTier::Low, QualityTier::Medium, QualityTier::High];
    for pair in tiers.windows(2) {
        let (a, b) = (pair[0].caps(), pair[1].caps());
        assert!(a.max_connections < b.max_connections);
        assert!(a.max_effects < b.max_effects);
        assert!(a.target_fps < b.target_fps);
        assert!(pair[0].particle_multiplier() < pair[1].particle_multiplier());
    }
}

#[test]
fn default_config_is_valid() {
    assert_eq!(FieldConfig::default().validate(), Ok(()));
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    struct Nothing;
    impl Surface for Nothing {
        type Handle = ();
        fn mount_particles(&mut self, _: usize) {}
        fn paint_particle(&mut self, _: usize, _: &ParticlePaint) {}
        fn draw_particle(&mut self, _: usize, _: &ParticleView) {}
        fn create_effect(&mut self, _: EffectKind) -> Option<()> {
            Some(())
        }
        fn show_effect(&mut self, _: &(), _: &EffectSpec) {}
        fn show_connector(&mut self, _: &(), _: &Connector) {}
        fn hide(&mut self, _: &()) {}
        fn clear(&mut self) {}
    }

    let config = FieldConfig {
        connection_distance: 0.0,
        ..FieldConfig::default()
    };
    let err = ParticleEngine::new(Nothing, config, 0).err();
    assert!(matches!(err, Some(FieldError::InvalidConfig(_))));

    let config = FieldConfig {
        double_click_ms: f64::NAN,
        ..FieldConfig::default()
    };
    assert!(ParticleEngine::new(Nothing, config, 0).is_err());
}
