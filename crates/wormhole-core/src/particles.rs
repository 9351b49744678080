//! Fixed-size particle pools with one motion rule per field.
//!
//! Particles are never created or destroyed after `init`: a particle that
//! leaves its region is recycled in place, so pool index `i` identifies the
//! same particle for the whole session.

use crate::color::{hsl_to_rgb, wrap_unit};
use crate::constants::*;
use crate::curve::PathSampler;
use crate::journey::JourneyPhase;
use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::prelude::*;
use std::f32::consts::TAU;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MotionParams {
    /// Placed once at curve parameter `t`.
    Static { t: f32 },
    /// Per-particle speed multiplier and spiral direction (+1 / -1).
    Converge { speed_scale: f32, spiral_sign: f32 },
    Drift { speed: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    /// Euler angles (XYZ), radians.
    pub rotation: Vec3,
    pub rotation_speed: Vec3,
    pub hue: f32,
    pub scale: f32,
    pub motion: MotionParams,
}

impl Particle {
    pub fn transform(&self) -> Mat4 {
        let r = self.rotation;
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
            self.position,
        )
    }

    pub fn color(&self) -> Vec3 {
        hsl_to_rgb(self.hue, 0.8, 0.6)
    }
}

#[derive(Clone, Debug)]
pub struct AlongCurveParams {
    pub max_offset: f32,
    pub base_hue: f32,
    pub hue_span: f32,
    pub hue_jitter: f32,
    pub spin: bool,
}

impl Default for AlongCurveParams {
    fn default() -> Self {
        Self {
            max_offset: TUNNEL_PARTICLE_OFFSET,
            base_hue: TUNNEL_BASE_HUE,
            hue_span: TUNNEL_HUE_SPAN,
            hue_jitter: TUNNEL_HUE_JITTER,
            spin: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ConvergeParams {
    pub target: Vec3,
    /// Unit direction from the target towards the spawn annulus.
    pub axis: Vec3,
    pub spawn_depth: f32,
    pub ring_inner: f32,
    pub ring_outer: f32,
    pub base_speed: f32,
    pub proximity_gain: f32,
    pub spiral_rate: f32,
    pub recycle_distance: f32,
    pub hue: f32,
}

impl Default for ConvergeParams {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            axis: Vec3::NEG_Z,
            spawn_depth: CONVERGE_SPAWN_DEPTH,
            ring_inner: CONVERGE_RING_INNER,
            ring_outer: CONVERGE_RING_OUTER,
            base_speed: CONVERGE_BASE_SPEED,
            proximity_gain: CONVERGE_PROXIMITY_GAIN,
            spiral_rate: CONVERGE_SPIRAL_RATE,
            recycle_distance: CONVERGE_RECYCLE_DISTANCE,
            hue: 0.58,
        }
    }
}

#[derive(Clone, Debug)]
pub struct DriftParams {
    /// Unit drift direction.
    pub axis: Vec3,
    /// Coordinate along `axis` where particles re-enter.
    pub near: f32,
    /// Coordinate along `axis` past which particles are recycled.
    pub far: f32,
    pub spread: f32,
    pub speed_min: f32,
    pub speed_max: f32,
}

impl Default for DriftParams {
    fn default() -> Self {
        Self {
            axis: Vec3::Z,
            near: DRIFT_NEAR,
            far: DRIFT_FAR,
            spread: DRIFT_SPREAD,
            speed_min: DRIFT_SPEED_MIN,
            speed_max: DRIFT_SPEED_MAX,
        }
    }
}

/// How a field is populated and how it moves.
pub enum Distribution<'a> {
    StaticAlongCurve {
        curve: &'a dyn PathSampler,
        params: AlongCurveParams,
    },
    ConvergeToPoint(ConvergeParams),
    DriftAndWrap(DriftParams),
}

#[derive(Clone, Debug)]
enum Rule {
    Static,
    Converge(ConvergeParams),
    Drift(DriftParams),
}

pub struct ParticleField {
    particles: Vec<Particle>,
    rule: Rule,
    rng: StdRng,
    recycled: u64,
}

impl ParticleField {
    /// Populate `count` particles. Every random draw comes from an RNG seeded
    /// with `seed`, so equal seeds give identical pools.
    pub fn init(count: usize, distribution: Distribution<'_>, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let (particles, rule): (Vec<Particle>, Rule) = match distribution {
            Distribution::StaticAlongCurve { curve, params } => (
                (0..count)
                    .map(|i| place_on_curve(&mut rng, curve, &params, i, count))
                    .collect(),
                Rule::Static,
            ),
            Distribution::ConvergeToPoint(params) => (
                (0..count)
                    .map(|_| {
                        let mut p = spawn_converging(&mut rng, &params);
                        // Stagger the first wave along the approach.
                        let along = rng.gen_range(0.2_f32..1.0);
                        p.position = params.target + (p.position - params.target) * along;
                        p
                    })
                    .collect(),
                Rule::Converge(params),
            ),
            Distribution::DriftAndWrap(params) => (
                (0..count)
                    .map(|_| {
                        let s = draw(&mut rng, params.near, params.far);
                        spawn_drifting(&mut rng, &params, s)
                    })
                    .collect(),
                Rule::Drift(params),
            ),
        };
        Self {
            particles,
            rule,
            rng,
            recycled: 0,
        }
    }

    /// Advance every particle by `dt` seconds. Converging particles freeze
    /// once the journey is under way.
    pub fn tick(&mut self, dt: f32, phase: JourneyPhase) {
        let Self {
            particles,
            rule,
            rng,
            recycled,
        } = self;
        match rule {
            Rule::Static => {
                for p in particles.iter_mut() {
                    p.rotation += p.rotation_speed * dt;
                }
            }
            Rule::Converge(params) => {
                if phase.freezes_convergence() {
                    return;
                }
                for p in particles.iter_mut() {
                    if step_converging(p, params, dt) {
                        *p = spawn_converging(rng, params);
                        *recycled += 1;
                    }
                }
            }
            Rule::Drift(params) => {
                for p in particles.iter_mut() {
                    if step_drifting(p, params, dt) {
                        *p = spawn_drifting(rng, params, params.near);
                        *recycled += 1;
                    }
                }
            }
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Particle> {
        self.particles.get(index)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Total recycles since `init`.
    pub fn recycled(&self) -> u64 {
        self.recycled
    }
}

/// Uniform draw from `[lo, hi]`. An empty or non-finite range yields `lo`
/// without consuming randomness.
fn draw(rng: &mut StdRng, lo: f32, hi: f32) -> f32 {
    if lo <= hi && (hi - lo).is_finite() {
        rng.gen_range(lo..=hi)
    } else {
        lo
    }
}

fn random_spin(rng: &mut StdRng) -> (Vec3, Vec3) {
    let rotation = Vec3::new(
        rng.gen_range(0.0..TAU),
        rng.gen_range(0.0..TAU),
        rng.gen_range(0.0..TAU),
    );
    let speed = Vec3::new(
        rng.gen_range(-PARTICLE_SPIN_MAX..PARTICLE_SPIN_MAX),
        rng.gen_range(-PARTICLE_SPIN_MAX..PARTICLE_SPIN_MAX),
        rng.gen_range(-PARTICLE_SPIN_MAX..PARTICLE_SPIN_MAX),
    );
    (rotation, speed)
}

/// Two unit vectors spanning the plane perpendicular to `axis`.
fn perpendicular_basis(axis: Vec3) -> (Vec3, Vec3) {
    let u = axis.any_orthonormal_vector();
    (u, axis.cross(u))
}

fn place_on_curve(
    rng: &mut StdRng,
    curve: &dyn PathSampler,
    params: &AlongCurveParams,
    i: usize,
    count: usize,
) -> Particle {
    let t = i as f32 / count as f32;
    let center = curve.position_at(t);
    let tangent = curve.tangent_at(t);
    let raw = Vec3::new(
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
    );
    let across = (raw - tangent * raw.dot(tangent)).normalize_or_zero();
    let offset = across * draw(rng, 0.0, params.max_offset);

    let ripple = 0.03 * (t * TAU * 3.0).sin() + 0.02 * (t * TAU * 7.0).sin();
    let jitter = params.hue_jitter * (rng.gen::<f32>() - 0.5);
    let hue = wrap_unit(params.base_hue - t * params.hue_span + ripple + jitter);

    let (rotation, spin) = random_spin(rng);
    Particle {
        position: center + offset,
        rotation,
        rotation_speed: if params.spin { spin * 0.25 } else { Vec3::ZERO },
        hue,
        scale: rng.gen_range(PARTICLE_SCALE_MIN..PARTICLE_SCALE_MAX),
        motion: MotionParams::Static { t },
    }
}

fn spawn_converging(rng: &mut StdRng, params: &ConvergeParams) -> Particle {
    let (u, v) = perpendicular_basis(params.axis);
    let angle = rng.gen_range(0.0..TAU);
    let r = draw(rng, params.ring_inner, params.ring_outer);
    let (sin, cos) = angle.sin_cos();
    let position = params.target + params.axis * params.spawn_depth + (u * cos + v * sin) * r;
    let (rotation, rotation_speed) = random_spin(rng);
    Particle {
        position,
        rotation,
        rotation_speed,
        hue: wrap_unit(params.hue + rng.gen_range(-0.05_f32..0.05)),
        scale: rng.gen_range(PARTICLE_SCALE_MIN..PARTICLE_SCALE_MAX),
        motion: MotionParams::Converge {
            speed_scale: rng.gen_range(0.7..1.3),
            spiral_sign: if rng.gen_bool(0.5) { 1.0 } else { -1.0 },
        },
    }
}

/// Spiral around the target axis (distance preserved), then close in.
/// Returns true when the particle should be recycled.
fn step_converging(p: &mut Particle, params: &ConvergeParams, dt: f32) -> bool {
    let (speed_scale, spiral_sign) = match p.motion {
        MotionParams::Converge {
            speed_scale,
            spiral_sign,
        } => (speed_scale, spiral_sign),
        _ => (1.0, 1.0),
    };
    let offset = p.position - params.target;
    let d = offset.length();
    let proximity = 1.0 / (d + 1.0);

    let swirl = Quat::from_axis_angle(params.axis, spiral_sign * params.spiral_rate * proximity * dt);
    let offset = swirl * offset;

    let speed = params.base_speed * speed_scale * (1.0 + params.proximity_gain * proximity);
    let step = (speed * dt).min(d);
    let remaining = d - step;
    p.position = params.target + offset.normalize_or_zero() * remaining;
    p.rotation += p.rotation_speed * dt;
    remaining < params.recycle_distance
}

fn spawn_drifting(rng: &mut StdRng, params: &DriftParams, along: f32) -> Particle {
    let (u, v) = perpendicular_basis(params.axis);
    let a = draw(rng, -params.spread, params.spread);
    let b = draw(rng, -params.spread, params.spread);
    let (rotation, rotation_speed) = random_spin(rng);
    Particle {
        position: params.axis * along + u * a + v * b,
        rotation,
        rotation_speed,
        hue: rng.gen_range(0.5..0.75),
        scale: rng.gen_range(PARTICLE_SCALE_MIN..PARTICLE_SCALE_MAX),
        motion: MotionParams::Drift {
            speed: draw(rng, params.speed_min, params.speed_max),
        },
    }
}

/// Returns true when the particle crossed the far boundary.
fn step_drifting(p: &mut Particle, params: &DriftParams, dt: f32) -> bool {
    let speed = match p.motion {
        MotionParams::Drift { speed } => speed,
        _ => params.speed_min,
    };
    p.position += params.axis * speed * dt;
    p.rotation += p.rotation_speed * dt;
    p.position.dot(params.axis) > params.far
}
