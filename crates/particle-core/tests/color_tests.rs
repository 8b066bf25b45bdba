// Theme palette and repaint behaviour.

mod common;

use particle_core::*;

#[test]
fn dark_and_light_palettes() {
    let dark = ParticlePaint::for_particle(240.0, 10.0, Theme::Dark);
    assert_eq!(dark.fill, Hsla::new(240.0, 80.0, 70.0, 0.5));
    assert_eq!(dark.glow, Hsla::new(240.0, 80.0, 70.0, 0.4));
    assert_eq!(dark.glow_radius, 30.0);

    let light = ParticlePaint::for_particle(240.0, 10.0, Theme::Light);
    assert_eq!(light.fill, Hsla::new(240.0, 70.0, 50.0, 0.6));
    assert_eq!(light.glow, Hsla::new(240.0, 70.0, 50.0, 0.5));
}

#[test]
fn css_formatting() {
    assert_eq!(
        Hsla::new(240.0, 80.0, 70.0, 0.5).to_string(),
        "hsla(240.0, 80%, 70%, 0.500)"
    );
    let ring = Rgba {
        r: 255,
        g: 100,
        b: 50,
        alpha: 0.8,
    };
    assert_eq!(ring.to_string(), "rgba(255, 100, 50, 0.8)");
    assert_eq!(Theme::from_dark(true), Theme::Dark);
}

#[test]
fn repeated_color_update_is_idempotent() {
    let mut engine = common::make_engine(5);
    engine.update_particle_colors(Theme::Light);
    let first = engine.surface().paints.clone();
    engine.update_particle_colors(Theme::Light);
    assert_eq!(engine.surface().paints, first);
    assert!(first.iter().all(|p| p.is_some()));
}

#[test]
fn theme_switch_repaints_from_fixed_hue() {
    let mut engine = common::make_engine(6);
    let dark = engine.surface().paints.clone();
    engine.update_particle_colors(Theme::Light);
    let light = engine.surface().paints.clone();
    assert_eq!(engine.theme(), Theme::Light);
    for ((d, l), p) in dark.iter().zip(&light).zip(engine.particles()) {
        let (d, l) = (d.unwrap(), l.unwrap());
        assert_ne!(d, l);
        assert_eq!(d.fill.hue, p.hue);
        assert_eq!(l.fill.hue, p.hue);
    }
}
