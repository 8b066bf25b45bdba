// Click/tap classification and the attract -> explode -> settle sequence.

mod common;

use common::{make_engine, run_frames, still_particle};
use glam::Vec2;
use particle_core::constants::*;
use particle_core::*;
use rand::prelude::*;

fn count_kind(engine: &ParticleEngine<common::RecordingSurface>, kind: EffectKind) -> usize {
    engine.active_effects().filter(|k| *k == kind).count()
}

#[test]
fn two_clicks_250ms_apart_start_attraction() {
    let mut engine = make_engine(1);
    assert_eq!(engine.click(400.0, 300.0, 10_000.0), ClickKind::Ripple);
    assert_eq!(engine.click(400.0, 300.0, 10_250.0), ClickKind::Attract);
    assert_eq!(engine.phase(10_250.0), InteractionPhase::Attracting);
    assert_eq!(engine.interaction().attraction_center, Vec2::new(400.0, 300.0));
    assert_eq!(count_kind(&engine, EffectKind::AttractionPoint), 1);
}

#[test]
fn two_clicks_350ms_apart_are_two_ripples() {
    let mut engine = make_engine(1);
    assert_eq!(engine.click(400.0, 300.0, 10_000.0), ClickKind::Ripple);
    assert_eq!(engine.click(400.0, 300.0, 10_350.0), ClickKind::Ripple);
    assert_eq!(engine.phase(10_350.0), InteractionPhase::Idle);
    assert_eq!(count_kind(&engine, EffectKind::Ripple), 2);
    assert_eq!(count_kind(&engine, EffectKind::AttractionPoint), 0);
}

#[test]
fn double_click_while_busy_is_ignored() {
    let mut engine = make_engine(1);
    assert!(engine.start_attraction(100.0, 100.0, 0.0));
    engine.click(500.0, 500.0, 100.0);
    assert_eq!(engine.click(500.0, 500.0, 200.0), ClickKind::Ignored);
    assert_eq!(engine.interaction().attraction_center, Vec2::new(100.0, 100.0));
    assert!(!engine.start_attraction(1.0, 1.0, 300.0));
}

#[test]
fn double_tap_starts_attraction() {
    let mut engine = make_engine(2);
    assert!(!engine.touch_end(300.0, 300.0, 1_000.0));
    assert!(engine.touch_end(300.0, 300.0, 1_400.0));
    assert_eq!(engine.phase(1_400.0), InteractionPhase::Attracting);
}

#[test]
fn slow_taps_do_not_attract() {
    let mut engine = make_engine(2);
    assert!(!engine.touch_end(300.0, 300.0, 1_000.0));
    assert!(!engine.touch_end(300.0, 300.0, 1_600.0));
    assert_eq!(engine.phase(1_600.0), InteractionPhase::Idle);
}

#[test]
fn pointer_activity_expires_after_two_seconds() {
    let mut engine = make_engine(3);
    assert_eq!(engine.phase(0.0), InteractionPhase::Idle);
    assert!(engine.pointer_move(10.0, 10.0, 1_000.0));
    assert_eq!(engine.phase(1_000.0), InteractionPhase::PointerActive);
    assert_eq!(engine.phase(2_999.0), InteractionPhase::PointerActive);
    assert_eq!(engine.phase(3_000.0), InteractionPhase::Idle);

    // touch input keeps it alive the same way
    engine.touch_start(20.0, 20.0, 3_500.0);
    assert!(engine.touch_move(25.0, 25.0, 4_000.0));
    assert_eq!(engine.phase(5_900.0), InteractionPhase::PointerActive);
}

#[test]
fn moves_inside_the_throttle_window_are_dropped() {
    let mut engine = make_engine(3);
    assert!(engine.pointer_move(10.0, 10.0, 100.0));
    assert!(!engine.pointer_move(50.0, 50.0, 110.0));
    assert_eq!(engine.interaction().pointer, Vec2::new(10.0, 10.0));
    assert!(engine.pointer_move(60.0, 60.0, 116.0));
    assert_eq!(engine.interaction().pointer, Vec2::new(60.0, 60.0));

    // touch moves have their own window
    assert!(engine.touch_move(70.0, 70.0, 117.0));
    assert!(!engine.touch_move(80.0, 80.0, 120.0));
}

#[test]
fn attraction_runs_four_to_five_seconds_then_explodes_then_restores() {
    let mut engine = make_engine(7);
    let before: Vec<Vec2> = engine.particles().iter().map(|p| p.vel).collect();

    let t0 = 20_000.0;
    assert!(engine.start_attraction(640.0, 360.0, t0));

    let mut t = t0;
    while t < t0 + EXPLOSION_DELAY_MIN_MS {
        engine.frame(t);
        assert_eq!(engine.phase(t), InteractionPhase::Attracting, "at +{}ms", t - t0);
        t += 16.0;
    }

    let mut exploded_at = None;
    while t < t0 + 6_000.0 {
        engine.frame(t);
        if engine.phase(t) == InteractionPhase::Exploding {
            exploded_at = Some(t);
            break;
        }
        t += 16.0;
    }
    let exploded_at = exploded_at.expect("explosion should fire");
    assert!(exploded_at - t0 >= EXPLOSION_DELAY_MIN_MS);
    assert!(exploded_at - t0 < EXPLOSION_DELAY_MIN_MS + EXPLOSION_DELAY_SPAN_MS + 16.0);

    // no connectors while the explosion is active
    engine.frame(exploded_at + 20.0);
    assert_eq!(engine.connector_count(), 0);
    assert!(engine.particles().iter().all(|p| p.look.exploding));

    run_frames(&mut engine, exploded_at + 36.0, exploded_at + EXPLOSION_SETTLE_MS + 16.0);
    let settled = exploded_at + EXPLOSION_SETTLE_MS + 16.0;
    assert_eq!(engine.phase(settled), InteractionPhase::Idle);
    let after: Vec<Vec2> = engine.particles().iter().map(|p| p.vel).collect();
    assert_eq!(before, after);
    assert!(engine.particles().iter().all(|p| p.look == Look::BASELINE));
}

#[test]
fn attraction_force_grows_every_frame_even_when_tick_is_gated() {
    let mut engine = make_engine(8);
    engine.start_attraction(100.0, 100.0, 0.0);
    // frames only 5ms apart: the main tick is gated, the attraction task is not
    for i in 0..10 {
        engine.frame(i as f64 * 5.0);
    }
    let expected = 10.0 * ATTRACTION_STEP;
    assert!((engine.interaction().attraction_force - expected).abs() < 1e-4);
}

#[test]
fn explosion_spawns_a_budget_sized_bundle() {
    let mut engine = make_engine(9);
    engine.start_attraction(300.0, 300.0, 0.0);
    engine.run_due_timers(5_000.0);
    assert_eq!(engine.phase(5_000.0), InteractionPhase::Exploding);
    assert_eq!(count_kind(&engine, EffectKind::Ring), 5);
    assert_eq!(count_kind(&engine, EffectKind::Burst), 25);
    assert_eq!(count_kind(&engine, EffectKind::Shockwave), 3);
    assert_eq!(count_kind(&engine, EffectKind::EnergyField), 1);

    let rings: Vec<EffectSpec> = engine
        .surface()
        .shown_effects
        .iter()
        .filter(|e| e.kind == EffectKind::Ring)
        .copied()
        .collect();
    assert_eq!(rings[1].tint.map(|c| (c.r, c.g, c.b)), Some((225, 120, 80)));
    assert!((rings[4].delay_s - 0.6).abs() < 1e-6);
}

#[test]
fn explosion_bundle_shrinks_with_budget() {
    let mut rng = StdRng::seed_from_u64(1);
    let bundle = explosion_bundle(Vec2::ZERO, 35, &mut rng);
    let rings = bundle.iter().filter(|e| e.kind == EffectKind::Ring).count();
    let bursts = bundle.iter().filter(|e| e.kind == EffectKind::Burst).count();
    assert_eq!((rings, bursts), (4, 18));
}

#[test]
fn rebuild_drops_a_pending_explosion() {
    let mut engine = make_engine(10);
    engine.start_attraction(300.0, 300.0, 0.0);
    engine.resize(Viewport::new(500.0, 800.0));
    assert_eq!(engine.pending_timers(), 0);
    run_frames(&mut engine, 0.0, 6_000.0);
    assert_eq!(engine.phase(6_000.0), InteractionPhase::Idle);
    assert_eq!(count_kind(&engine, EffectKind::Ring), 0);
    assert_eq!(engine.particles().len(), 30);
}

#[test]
fn ripple_nudges_nearby_particles_and_reverts_pulse() {
    let mut engine = make_engine(11);
    {
        let ps = engine.particles_mut();
        ps[0] = still_particle(150.0, 100.0);
        ps[1] = still_particle(400.0, 100.0);
    }
    engine.create_click_effect(100.0, 100.0, 0.0);
    let near = &engine.particles()[0];
    let closeness = (RIPPLE_RADIUS - 50.0) / RIPPLE_RADIUS;
    assert!((near.vel.x - (-50.0 * closeness * RIPPLE_PULL)).abs() < 1e-6);
    assert_eq!(near.look.scale, RIPPLE_PULSE);
    assert_eq!(engine.particles()[1].vel, Vec2::ZERO);
    assert_eq!(engine.phase(0.0), InteractionPhase::Idle);

    engine.run_due_timers(RIPPLE_PULSE_MS);
    assert_eq!(engine.particles()[0].look, Look::BASELINE);
}

#[test]
fn expired_effects_are_detached_and_pooled() {
    let mut engine = make_engine(12);
    engine.create_click_effect(100.0, 100.0, 0.0);
    assert_eq!(engine.surface().visible.len(), 1);
    engine.run_due_timers(RIPPLE_MS - 1.0);
    assert_eq!(engine.active_effects().count(), 1);
    engine.run_due_timers(RIPPLE_MS);
    assert_eq!(engine.active_effects().count(), 0);
    assert!(engine.surface().visible.is_empty());
    assert_eq!(engine.pool_len(), 1);

    // the next ripple reuses the pooled handle
    engine.create_click_effect(100.0, 100.0, 2_000.0);
    assert_eq!(engine.surface().created.len(), 1);
}

#[test]
fn destroy_empties_scene_and_pools() {
    let mut engine = make_engine(13);
    engine.create_click_effect(10.0, 10.0, 0.0);
    engine.run_due_timers(RIPPLE_MS);
    engine.frame(2_000.0);
    engine.destroy();
    assert!(engine.particles().is_empty());
    assert_eq!(engine.pool_len(), 0);
    assert_eq!(engine.connector_count(), 0);
    assert_eq!(engine.active_effects().count(), 0);
    assert_eq!(engine.surface().clears, 1);
}
