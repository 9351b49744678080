//! Headless driver: runs the whole journey at a fixed 60 Hz step, clicking the
//! entry object through a centre-screen pick, and logs what happens.

use std::time::Duration;

use anyhow::{bail, Context};
use glam::Vec3;
use wormhole_core::{
    FieldId, GeometryRef, JourneyPhase, PointerEvent, RecordingSink, Ray, Scene, SceneConfig,
};

const STEP: Duration = Duration::from_micros(16_667);
const CLICK_AT_SECS: f32 = 0.5;
const RUN_SECS: f32 = 9.0;

fn parse_seed() -> anyhow::Result<Option<u64>> {
    match std::env::args().nth(1) {
        Some(arg) => {
            let seed = arg
                .parse::<u64>()
                .with_context(|| format!("seed must be an unsigned integer, got {arg:?}"))?;
            Ok(Some(seed))
        }
        None => Ok(None),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let config = match parse_seed()? {
        Some(seed) => SceneConfig::with_seed(seed),
        None => SceneConfig::default(),
    };
    let mut scene = Scene::new(config);
    let mut sink = RecordingSink::default();

    let mut phase = scene.phase();
    let mut clicked = false;
    let mut arrived_at = None;
    let frames = (RUN_SECS / STEP.as_secs_f32()).ceil() as u64;

    for frame in 0..frames {
        if !clicked && scene.elapsed() >= CLICK_AT_SECS {
            let ray = Ray::from_ndc(scene.camera().view_proj(), 0.0, 0.0);
            if !scene.pick_entry(&ray) {
                bail!("centre-screen pick missed the entry object");
            }
            scene.handle_pointer(PointerEvent::HoverEnter);
            scene.handle_pointer(PointerEvent::Click);
            scene.handle_pointer(PointerEvent::HoverLeave);
            clicked = true;
        }

        scene.tick(STEP);
        scene.render(&mut sink);

        if scene.phase() != phase {
            phase = scene.phase();
            let eye = scene.camera().eye;
            log::info!(
                "frame {frame}: {} at {:.3}s, eye ({:.2}, {:.2}, {:.2})",
                phase.label(),
                scene.journey().clock(),
                eye.x,
                eye.y,
                eye.z
            );
            if phase == JourneyPhase::Arrived {
                arrived_at = Some(scene.journey().clock());
            }
        }
    }

    let particles = sink.count(|g| matches!(g, GeometryRef::Particle { .. }));
    log::info!(
        "{} frames, {} renderables in the last one ({} particles), tunnel {}",
        sink.frames,
        sink.items.len(),
        particles,
        if scene.tunnel().is_some() { "built" } else { "missing" }
    );
    for id in [FieldId::Tunnel, FieldId::Converge, FieldId::Drift] {
        if let Some(field) = scene.field(id) {
            log::info!("{id:?}: {} particles, {} recycled", field.len(), field.recycled());
        }
    }
    let end = scene.camera().eye;
    log::info!(
        "camera at progress {:.3}, {:.2} from origin",
        scene.director().progress(),
        end.distance(Vec3::ZERO)
    );

    match arrived_at {
        Some(t) => log::info!("arrived after {t:.3}s; overlay revealed: {}", scene.overlay_revealed()),
        None => bail!("journey did not arrive within {RUN_SECS}s"),
    }

    scene.teardown();
    log::info!("teardown: back to {}", scene.phase().label());
    Ok(())
}
