//! Top-level composition: geometry built once, then one `tick` per frame.

use crate::camera::{Camera, CameraDirector, CameraPose};
use crate::config::SceneConfig;
use crate::constants::{MAX_FRAME_DT_SECS, SEED_MIX};
use crate::curve::{smooth_points, Curve};
use crate::dataset;
use crate::entry::EntryObject;
use crate::error::GeometryError;
use crate::funnel::{build_funnel_with, FunnelSurface};
use crate::journey::{Journey, JourneyEvent, JourneyEvents, JourneyPhase};
use crate::orbit::OrbitRig;
use crate::particles::{Distribution, ParticleField};
use crate::pick::{PointerEvent, Ray};
use crate::render::{
    FieldId, GeometryRef, RenderSink, Renderable, ENTRY_MATERIAL, FUNNEL_MATERIAL,
    PARTICLE_MATERIAL, TUBE_MATERIAL,
};
use crate::tube::{build_tube_with, TubeSurface};
use glam::{Mat4, Vec3};
use std::rc::Rc;
use std::time::Duration;

/// Static tunnel geometry. The camera path covers approach and tunnel; the
/// tunnel path is the same spline restricted to the tunnel span.
pub struct Tunnel {
    pub camera_path: Rc<Curve>,
    pub tunnel_path: Rc<Curve>,
    pub tube: TubeSurface,
    pub funnel: FunnelSurface,
}

impl Tunnel {
    pub fn build(
        points: &[Vec3],
        tunnel_start: usize,
        config: &SceneConfig,
    ) -> Result<Self, GeometryError> {
        let points = smooth_points(points, config.smooth_passes);
        let camera_path = Curve::build(&points, false)?;
        let tunnel_path = Curve::build_span(&points, tunnel_start..points.len())?;
        let tube = build_tube_with(&tunnel_path, &config.tube)?;

        let mut funnel_params = config.funnel.clone();
        funnel_params.narrow_radius = config.tube.radius;
        let mut funnel = build_funnel_with(&funnel_params)?;
        funnel.align_to(&tunnel_path);

        Ok(Self {
            camera_path: Rc::new(camera_path),
            tunnel_path: Rc::new(tunnel_path),
            tube,
            funnel,
        })
    }
}

pub struct Scene {
    config: SceneConfig,
    camera: Camera,
    orbit: OrbitRig,
    director: CameraDirector,
    journey: Journey,
    entry: EntryObject,
    tunnel: Option<Tunnel>,
    fields: Vec<(FieldId, ParticleField)>,
    elapsed: f32,
    overlay_revealed: bool,
}

impl Scene {
    /// Build from the baked control points.
    pub fn new(config: SceneConfig) -> Self {
        let tunnel = Tunnel::build(dataset::camera_path_points(), dataset::TUNNEL_START, &config);
        Self::with_tunnel(config, tunnel)
    }

    /// Build around an already attempted tunnel. A failed tunnel leaves a
    /// scene with no tube, funnel or flythrough; the rest still works.
    pub fn with_tunnel(config: SceneConfig, tunnel: Result<Tunnel, GeometryError>) -> Self {
        let tunnel = match tunnel {
            Ok(t) => {
                log::info!(
                    "[scene] tunnel: {} tube vertices, {} funnel vertices, path length {:.2}",
                    t.tube.mesh.vertices.len(),
                    t.funnel.mesh.vertices.len(),
                    t.camera_path.length()
                );
                Some(t)
            }
            Err(e) => {
                log::error!("[scene] tunnel disabled: {e}");
                None
            }
        };

        let field_seed = |i: u64| config.seed ^ i.wrapping_mul(SEED_MIX);
        let mut fields = Vec::with_capacity(3);
        if let Some(t) = &tunnel {
            fields.push((
                FieldId::Tunnel,
                ParticleField::init(
                    config.counts.tunnel,
                    Distribution::StaticAlongCurve {
                        curve: &*t.tunnel_path,
                        params: config.tunnel_particles.clone(),
                    },
                    field_seed(0),
                ),
            ));
        }
        fields.push((
            FieldId::Converge,
            ParticleField::init(
                config.counts.converge,
                Distribution::ConvergeToPoint(config.converge.clone()),
                field_seed(1),
            ),
        ));
        fields.push((
            FieldId::Drift,
            ParticleField::init(
                config.counts.drift,
                Distribution::DriftAndWrap(config.drift.clone()),
                field_seed(2),
            ),
        ));

        let camera = Camera::default();
        let initial_pose = camera.pose();
        Self {
            orbit: OrbitRig::from_pose(initial_pose),
            director: CameraDirector::new(initial_pose, config.camera.clone()),
            journey: Journey::new(config.timings.clone()),
            entry: EntryObject::default(),
            camera,
            tunnel,
            fields,
            elapsed: 0.0,
            overlay_revealed: false,
            config,
        }
    }

    /// Pointer events already targeted at the entry object.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> JourneyEvents {
        match event {
            PointerEvent::HoverEnter => {
                self.entry.set_hovered(true);
                JourneyEvents::new()
            }
            PointerEvent::HoverLeave => {
                self.entry.set_hovered(false);
                JourneyEvents::new()
            }
            PointerEvent::Click => {
                if !self.entry.is_clickable() {
                    return JourneyEvents::new();
                }
                let events = self.journey.click();
                self.apply(&events);
                events
            }
        }
    }

    pub fn pick_entry(&self, ray: &Ray) -> bool {
        self.entry.hit(ray)
    }

    /// One frame. `dt` is clamped so a stalled frame cannot skip a phase.
    pub fn tick(&mut self, dt: Duration) -> JourneyEvents {
        let dt = dt.as_secs_f32().min(MAX_FRAME_DT_SECS);
        self.elapsed += dt;

        let mut events = self.journey.tick(dt as f64);
        self.apply(&events);

        if self.director.drive(dt, &mut self.camera) {
            let arrived = self.journey.observe_progress(self.director.progress());
            self.apply(&arrived);
            events.extend(arrived);
        } else if self.journey.phase().orbit_enabled() {
            self.orbit.apply(&mut self.camera);
        }
        debug_assert!(!(self.director.is_active() && self.orbit.is_enabled()));

        self.entry.tick(dt, self.elapsed);
        let phase = self.journey.phase();
        for (_, field) in &mut self.fields {
            field.tick(dt, phase);
        }
        events
    }

    fn apply(&mut self, events: &[JourneyEvent]) {
        for event in events {
            match event {
                JourneyEvent::EntryDisabled => self.entry.disable_and_recede(),
                JourneyEvent::CameraArmed => match &self.tunnel {
                    Some(t) => self.director.arm(t.camera_path.clone()),
                    None => log::warn!("[scene] no camera path; staying put"),
                },
                JourneyEvent::OrbitDisabled => self.orbit.set_enabled(false),
                JourneyEvent::ConvergenceFrozen => {
                    log::debug!("[scene] converging particles frozen")
                }
                JourneyEvent::OverlayRevealed => {
                    self.overlay_revealed = true;
                    log::info!("[scene] overlay revealed");
                }
            }
        }
    }

    /// Free-orbit input; ignored once the journey owns the camera.
    pub fn orbit_rotate(&mut self, dx: f32, dy: f32) {
        self.orbit.rotate(dx, dy);
    }

    pub fn orbit_zoom(&mut self, steps: f32) {
        self.orbit.zoom(steps);
    }

    pub fn orbit_pan(&mut self, dx: f32, dy: f32) {
        self.orbit.pan(dx, dy);
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.camera.aspect = aspect;
        }
    }

    pub fn render(&self, sink: &mut dyn RenderSink) {
        sink.begin_frame(&self.camera);
        if self.tunnel.is_some() {
            sink.submit(Renderable {
                geometry: GeometryRef::Tube,
                material: TUBE_MATERIAL,
                transform: Mat4::IDENTITY,
                color: TUBE_MATERIAL.color,
            });
            sink.submit(Renderable {
                geometry: GeometryRef::Funnel,
                material: FUNNEL_MATERIAL,
                transform: Mat4::IDENTITY,
                color: FUNNEL_MATERIAL.color,
            });
        }
        if self.entry.is_visible() {
            sink.submit(Renderable {
                geometry: GeometryRef::EntryBox,
                material: ENTRY_MATERIAL,
                transform: self.entry.transform(),
                color: self.entry.color(),
            });
        }
        for (id, field) in &self.fields {
            for (index, p) in field.iter().enumerate() {
                sink.submit(Renderable {
                    geometry: GeometryRef::Particle { field: *id, index },
                    material: PARTICLE_MATERIAL,
                    transform: p.transform(),
                    color: p.color().to_array(),
                });
            }
        }
    }

    /// End the session: pending timers go stale, the director lets go and the
    /// camera returns to its initial pose under orbit control.
    pub fn teardown(&mut self) {
        self.journey.reset();
        let pose: CameraPose = self.director.reset();
        self.camera.set_pose(pose);
        self.orbit = OrbitRig::from_pose(pose);
        self.entry = EntryObject::default();
        self.overlay_revealed = false;
    }

    pub fn phase(&self) -> JourneyPhase {
        self.journey.phase()
    }

    pub fn journey(&self) -> &Journey {
        &self.journey
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn director(&self) -> &CameraDirector {
        &self.director
    }

    pub fn orbit(&self) -> &OrbitRig {
        &self.orbit
    }

    pub fn entry(&self) -> &EntryObject {
        &self.entry
    }

    pub fn tunnel(&self) -> Option<&Tunnel> {
        self.tunnel.as_ref()
    }

    pub fn field(&self, id: FieldId) -> Option<&ParticleField> {
        self.fields.iter().find(|(f, _)| *f == id).map(|(_, field)| field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (FieldId, &ParticleField)> {
        self.fields.iter().map(|(id, f)| (*id, f))
    }

    pub fn overlay_revealed(&self) -> bool {
        self.overlay_revealed
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }
}
