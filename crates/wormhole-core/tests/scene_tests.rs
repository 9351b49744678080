use glam::Vec3;
use std::time::Duration;
use wormhole_core::constants::INITIAL_EYE;
use wormhole_core::{
    CurveError, FieldId, GeometryError, GeometryRef, JourneyEvent, JourneyPhase, PointerEvent,
    Ray, RecordingSink, Scene, SceneConfig, Tunnel,
};

const STEP: Duration = Duration::from_micros(16_667);

fn dt() -> f64 {
    STEP.as_secs_f32() as f64
}

fn click_centre(scene: &mut Scene) {
    let ray = Ray::from_ndc(scene.camera().view_proj(), 0.0, 0.0);
    assert!(scene.pick_entry(&ray));
    scene.handle_pointer(PointerEvent::HoverEnter);
    let events = scene.handle_pointer(PointerEvent::Click);
    assert_eq!(events.as_slice(), &[JourneyEvent::EntryDisabled]);
}

fn small_config() -> SceneConfig {
    let mut config = SceneConfig::with_seed(1234);
    config.counts.tunnel = 60;
    config.counts.converge = 40;
    config.counts.drift = 50;
    config
}

#[test]
fn default_scene_builds_everything() {
    let scene = Scene::new(SceneConfig::default());
    let tunnel = scene.tunnel().expect("tunnel");
    assert!(!tunnel.tube.mesh.vertices.is_empty());
    assert!(!tunnel.funnel.mesh.vertices.is_empty());
    let config = scene.config();
    assert_eq!(scene.field(FieldId::Tunnel).unwrap().len(), config.counts.tunnel);
    assert_eq!(scene.field(FieldId::Converge).unwrap().len(), config.counts.converge);
    assert_eq!(scene.field(FieldId::Drift).unwrap().len(), config.counts.drift);
    assert_eq!(scene.phase(), JourneyPhase::Idle);
    assert_eq!(scene.camera().eye, INITIAL_EYE);
}

#[test]
fn full_journey_end_to_end() {
    let mut scene = Scene::new(small_config());
    click_centre(&mut scene);
    assert_eq!(scene.phase(), JourneyPhase::Clicked);
    assert!(!scene.entry().is_clickable());

    let mut traveling_at = None;
    let mut arrived_at = None;
    let mut reveals = 0;
    while scene.journey().clock() < 8.0 {
        let events = scene.tick(STEP);
        let now = scene.journey().clock();
        if events.contains(&JourneyEvent::CameraArmed) {
            traveling_at = Some(now);
            assert!(scene.director().is_active());
            assert!(!scene.orbit().is_enabled());
        }
        let n = events
            .iter()
            .filter(|e| **e == JourneyEvent::OverlayRevealed)
            .count();
        if n > 0 {
            arrived_at = Some(now);
        }
        reveals += n;

        if scene.director().is_active() {
            let path = &scene.tunnel().unwrap().camera_path;
            let expected = path.position_at(scene.director().progress());
            assert!((scene.camera().eye - expected).length() < 1e-4);
        }
    }

    let dt = dt();
    let traveling_at = traveling_at.expect("never traveled");
    let arrived_at = arrived_at.expect("never arrived");
    assert!((traveling_at - 1.0).abs() <= dt + 1e-6, "traveling at {traveling_at}");
    assert!((arrived_at - 7.0).abs() <= dt + 1e-6, "arrived at {arrived_at}");
    assert_eq!(reveals, 1);
    assert!(scene.overlay_revealed());
    assert_eq!(scene.phase(), JourneyPhase::Arrived);

    // The camera ends deep in the tunnel, past the mouth.
    assert!(scene.camera().eye.z < -20.0);
}

#[test]
fn second_click_is_ignored() {
    let mut scene = Scene::new(small_config());
    click_centre(&mut scene);
    scene.tick(STEP);
    assert!(scene.handle_pointer(PointerEvent::Click).is_empty());
    assert_eq!(scene.phase(), JourneyPhase::Clicked);
}

#[test]
fn orbit_drives_camera_only_before_travel() {
    let mut scene = Scene::new(small_config());
    scene.orbit_rotate(0.2, 0.0);
    scene.tick(STEP);
    let orbited = scene.camera().eye;
    assert!((orbited - INITIAL_EYE).length() > 0.1);

    scene.orbit_rotate(-0.2, 0.0);
    scene.tick(STEP);
    let ray = Ray::from_ndc(scene.camera().view_proj(), 0.0, 0.0);
    assert!(scene.pick_entry(&ray));
    scene.handle_pointer(PointerEvent::Click);
    while scene.phase() != JourneyPhase::Traveling {
        scene.tick(STEP);
    }
    let before = scene.director().progress();
    scene.orbit_rotate(0.3, 0.3);
    scene.orbit_zoom(-4.0);
    scene.tick(STEP);
    let path = &scene.tunnel().unwrap().camera_path;
    assert!((scene.camera().eye - path.position_at(scene.director().progress())).length() < 1e-4);
    assert!(scene.director().progress() > before);
}

#[test]
fn converging_field_freezes_during_travel() {
    let mut scene = Scene::new(small_config());
    let initial = scene.field(FieldId::Converge).unwrap().particles().to_vec();
    scene.tick(STEP);
    assert_ne!(scene.field(FieldId::Converge).unwrap().particles(), initial.as_slice());

    click_centre(&mut scene);
    while scene.phase() != JourneyPhase::Traveling {
        scene.tick(STEP);
    }
    let frozen = scene.field(FieldId::Converge).unwrap().particles().to_vec();
    let drift = scene.field(FieldId::Drift).unwrap().particles().to_vec();
    for _ in 0..30 {
        scene.tick(STEP);
    }
    assert_eq!(scene.field(FieldId::Converge).unwrap().particles(), frozen.as_slice());
    assert_ne!(scene.field(FieldId::Drift).unwrap().particles(), drift.as_slice());
}

#[test]
fn stalled_frame_is_clamped() {
    let mut scene = Scene::new(small_config());
    click_centre(&mut scene);
    scene.tick(Duration::from_secs(30));
    assert!((scene.journey().clock() - 0.1).abs() < 1e-6);
    assert_eq!(scene.phase(), JourneyPhase::Clicked);
}

#[test]
fn render_submits_every_visible_object() {
    let mut scene = Scene::new(small_config());
    let mut sink = RecordingSink::default();
    scene.tick(STEP);
    scene.render(&mut sink);
    assert_eq!(sink.frames, 1);
    assert_eq!(sink.count(|g| *g == GeometryRef::Tube), 1);
    assert_eq!(sink.count(|g| *g == GeometryRef::Funnel), 1);
    assert_eq!(sink.count(|g| *g == GeometryRef::EntryBox), 1);
    assert_eq!(
        sink.count(|g| matches!(g, GeometryRef::Particle { .. })),
        60 + 40 + 50
    );
    assert_eq!(
        sink.count(|g| matches!(
            g,
            GeometryRef::Particle {
                field: FieldId::Converge,
                ..
            }
        )),
        40
    );

    // Once the entry object has receded it is no longer drawn or pickable.
    click_centre(&mut scene);
    for _ in 0..60 {
        scene.tick(STEP);
    }
    scene.render(&mut sink);
    assert_eq!(sink.frames, 2);
    assert_eq!(sink.count(|g| *g == GeometryRef::EntryBox), 0);
    let ray = Ray::from_ndc(scene.camera().view_proj(), 0.0, 0.0);
    assert!(!scene.pick_entry(&ray));
}

#[test]
fn hover_highlights_until_clicked() {
    let mut scene = Scene::new(small_config());
    let base = scene.entry().color();
    scene.handle_pointer(PointerEvent::HoverEnter);
    assert!(scene.entry().is_hovered());
    assert_ne!(scene.entry().color(), base);
    scene.handle_pointer(PointerEvent::HoverLeave);
    assert_eq!(scene.entry().color(), base);

    scene.handle_pointer(PointerEvent::Click);
    scene.handle_pointer(PointerEvent::HoverEnter);
    assert!(!scene.entry().is_hovered());
}

#[test]
fn entry_spins_with_elapsed_time() {
    let mut scene = Scene::new(small_config());
    for _ in 0..60 {
        scene.tick(STEP);
    }
    let r = scene.entry().rotation();
    let t = scene.elapsed();
    assert!((r.y - t * 0.3).abs() < 1e-5);
    assert!((r.x - t * 0.15).abs() < 1e-5);
}

#[test]
fn pick_misses_when_looking_away() {
    let scene = Scene::new(small_config());
    let ray = Ray {
        origin: INITIAL_EYE,
        dir: Vec3::Z,
    };
    assert!(!scene.pick_entry(&ray));
    let offset = Ray::from_ndc(scene.camera().view_proj(), 0.9, 0.9);
    assert!(!scene.pick_entry(&offset));
}

#[test]
fn teardown_cancels_everything() {
    let mut scene = Scene::new(small_config());
    click_centre(&mut scene);
    while scene.journey().clock() < 2.0 {
        scene.tick(STEP);
    }
    assert_eq!(scene.phase(), JourneyPhase::Traveling);
    scene.teardown();

    assert_eq!(scene.phase(), JourneyPhase::Idle);
    assert!(!scene.director().is_active());
    assert_eq!(scene.journey().pending_timers().count(), 0);
    assert_eq!(scene.camera().eye, INITIAL_EYE);
    assert!(scene.orbit().is_enabled());
    assert!(scene.entry().is_clickable());

    for _ in 0..600 {
        let events = scene.tick(STEP);
        assert!(events.is_empty());
    }
    assert_eq!(scene.phase(), JourneyPhase::Idle);
    assert!(!scene.overlay_revealed());
}

#[test]
fn broken_tunnel_still_reveals_the_overlay() {
    let config = small_config();
    let err = Tunnel::build(&[Vec3::ZERO], 0, &config).err().unwrap();
    assert_eq!(err, GeometryError::Curve(CurveError::TooFewPoints { count: 1 }));

    let mut scene = Scene::with_tunnel(config, Err(err));
    assert!(scene.tunnel().is_none());
    assert!(scene.field(FieldId::Tunnel).is_none());
    assert!(scene.field(FieldId::Drift).is_some());

    click_centre(&mut scene);
    while scene.journey().clock() < 8.0 {
        scene.tick(STEP);
        assert!(!scene.director().is_active());
    }
    assert!(scene.overlay_revealed());
    assert_eq!(scene.phase(), JourneyPhase::Arrived);
    assert_eq!(scene.camera().eye, INITIAL_EYE);

    let mut sink = RecordingSink::default();
    scene.render(&mut sink);
    assert_eq!(sink.count(|g| *g == GeometryRef::Tube), 0);
    assert_eq!(sink.count(|g| *g == GeometryRef::Funnel), 0);
}

#[test]
fn equal_seeds_give_equal_scenes() {
    let mut a = Scene::new(small_config());
    let mut b = Scene::new(small_config());
    for _ in 0..120 {
        a.tick(STEP);
        b.tick(STEP);
    }
    for id in [FieldId::Tunnel, FieldId::Converge, FieldId::Drift] {
        assert_eq!(a.field(id).unwrap().particles(), b.field(id).unwrap().particles());
    }
    let c = Scene::new(SceneConfig {
        seed: 4321,
        ..small_config()
    });
    assert_ne!(
        a.field(FieldId::Tunnel).unwrap().particles(),
        c.field(FieldId::Tunnel).unwrap().particles()
    );
}

#[test]
fn degenerate_particle_ranges_still_build_a_scene() {
    let mut config = small_config();
    config.drift.spread = 0.0;
    config.drift.speed_min = 1.0;
    config.drift.speed_max = 1.0;
    config.converge.ring_inner = config.converge.ring_outer + 1.0;
    let mut scene = Scene::new(config);
    for _ in 0..60 {
        scene.tick(STEP);
    }
    assert_eq!(scene.field(FieldId::Drift).unwrap().len(), 50);
}

#[test]
fn tap_without_hover_starts_the_journey() {
    let mut scene = Scene::new(small_config());
    let ray = Ray::from_ndc(scene.camera().view_proj(), 0.0, 0.0);
    assert!(scene.pick_entry(&ray));
    let events = scene.handle_pointer(PointerEvent::Click);
    assert_eq!(events.as_slice(), &[JourneyEvent::EntryDisabled]);
    assert_eq!(scene.phase(), JourneyPhase::Clicked);
}

#[test]
fn pan_is_ignored_once_traveling() {
    let mut scene = Scene::new(small_config());
    scene.orbit_pan(0.1, 0.0);
    assert!(scene.orbit().target().x < 0.0);
    click_centre_after_pan(&mut scene);
    while scene.phase() != JourneyPhase::Traveling {
        scene.tick(STEP);
    }
    let target = scene.orbit().target();
    scene.orbit_pan(0.3, 0.3);
    assert_eq!(scene.orbit().target(), target);
}

fn click_centre_after_pan(scene: &mut Scene) {
    scene.tick(STEP);
    let entry = scene.entry().world_position();
    let eye = scene.camera().eye;
    let ray = Ray {
        origin: eye,
        dir: (entry - eye).normalize(),
    };
    assert!(scene.pick_entry(&ray));
    scene.handle_pointer(PointerEvent::Click);
}
