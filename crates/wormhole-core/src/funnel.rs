//! Flared tunnel mouth: a profile revolved around an axis (lathe surface).
//!
//! The profile is built in a local frame where the narrow end sits at the
//! origin and the flare opens along +Z. `FunnelSurface::align_to` moves it
//! onto the open start of a tube.

use crate::constants::{
    FUNNEL_LENGTH, FUNNEL_MOUTH_RADIUS, FUNNEL_PROFILE_STEPS, FUNNEL_RADIAL_SEGMENTS,
    FUNNEL_RIM_LIP, FUNNEL_RIPPLE_AMPLITUDE, FUNNEL_RIPPLE_WAVES, TUBE_RADIUS,
};
use crate::curve::PathSampler;
use crate::error::MeshError;
use crate::mesh::{stitch_rings, MeshVertex, Surface};
use glam::{Mat4, Quat, Vec2, Vec3};
use std::f32::consts::{PI, TAU};

/// One point of the revolved profile: distance from the axis and distance
/// along it from the narrow end.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProfilePoint {
    pub radius: f32,
    pub offset: f32,
}

#[derive(Clone, Debug)]
pub struct FunnelParams {
    /// Must equal the tube radius so the two surfaces share a seam.
    pub narrow_radius: f32,
    pub mouth_radius: f32,
    pub length: f32,
    pub steps: usize,
    pub ripple_amplitude: f32,
    pub ripple_waves: f32,
    pub rim_lip: Option<f32>,
    pub radial_segments: usize,
}

impl Default for FunnelParams {
    fn default() -> Self {
        Self {
            narrow_radius: TUBE_RADIUS,
            mouth_radius: FUNNEL_MOUTH_RADIUS,
            length: FUNNEL_LENGTH,
            steps: FUNNEL_PROFILE_STEPS,
            ripple_amplitude: FUNNEL_RIPPLE_AMPLITUDE,
            ripple_waves: FUNNEL_RIPPLE_WAVES,
            rim_lip: Some(FUNNEL_RIM_LIP),
            radial_segments: FUNNEL_RADIAL_SEGMENTS,
        }
    }
}

/// Profile from the narrow end (exactly `narrow_radius`, offset 0) out to the
/// mouth. The flare eases in quadratically; the ripple vanishes at both ends
/// and never pulls the radius below `narrow_radius`.
pub fn flare_profile(params: &FunnelParams) -> Vec<ProfilePoint> {
    let steps = params.steps.max(1);
    let span = params.mouth_radius - params.narrow_radius;
    let mut profile: Vec<ProfilePoint> = (0..=steps)
        .map(|k| {
            let u = k as f32 / steps as f32;
            let ripple = params.ripple_amplitude * (u * PI * params.ripple_waves).sin();
            ProfilePoint {
                radius: (params.narrow_radius + span * u * u + ripple).max(params.narrow_radius),
                offset: u * params.length,
            }
        })
        .collect();
    // The ripple term is not guaranteed to vanish at u = 0 in floating point.
    profile[0].radius = params.narrow_radius;

    if let Some(lip) = params.rim_lip {
        profile.push(ProfilePoint {
            radius: params.mouth_radius + lip * 0.5,
            offset: params.length + lip * 0.25,
        });
        profile.push(ProfilePoint {
            radius: params.mouth_radius + lip,
            offset: params.length,
        });
    }
    profile
}

#[derive(Clone, Debug)]
pub struct FunnelSurface {
    pub mesh: Surface,
    pub profile: Vec<ProfilePoint>,
    /// Where the narrow ring is centred.
    pub origin: Vec3,
    /// Unit direction in which the flare widens.
    pub axis: Vec3,
}

pub fn build_funnel(
    profile: &[ProfilePoint],
    radial_segments: usize,
) -> Result<FunnelSurface, MeshError> {
    if profile.len() < 2 {
        return Err(MeshError::ProfileTooShort {
            count: profile.len(),
        });
    }
    if radial_segments < 3 {
        return Err(MeshError::TooFewSegments {
            what: "funnel circumference",
            got: radial_segments,
            min: 3,
        });
    }
    if let Some(bad) = profile
        .iter()
        .find(|p| !p.radius.is_finite() || p.radius <= 0.0 || !p.offset.is_finite())
    {
        return Err(MeshError::InvalidRadius(bad.radius));
    }

    let last = profile.len() - 1;
    let mut vertices = Vec::with_capacity(profile.len() * radial_segments);
    let mut ring_centers = Vec::with_capacity(profile.len());
    for (k, p) in profile.iter().enumerate() {
        // Profile slope from the neighbours; the surface normal is its perpendicular.
        let a = profile[k.saturating_sub(1)];
        let b = profile[(k + 1).min(last)];
        let (dr, dz) = (b.radius - a.radius, b.offset - a.offset);
        let slope_len = (dr * dr + dz * dz).sqrt().max(f32::EPSILON);
        let (n_radial, n_axial) = (dz / slope_len, -dr / slope_len);

        let center = Vec3::new(0.0, 0.0, p.offset);
        ring_centers.push(center);
        for j in 0..radial_segments {
            let v = j as f32 / radial_segments as f32;
            let (sin, cos) = (v * TAU).sin_cos();
            let position = Vec3::new(p.radius * cos, p.radius * sin, p.offset);
            let normal = Vec3::new(n_radial * cos, n_radial * sin, n_axial);
            vertices.push(MeshVertex::new(
                position,
                normal,
                Vec2::new(v, k as f32 / last as f32),
            ));
        }
    }
    let indices = stitch_rings(profile.len(), radial_segments, false);

    Ok(FunnelSurface {
        mesh: Surface {
            vertices,
            indices,
            ring_size: radial_segments,
            ring_centers,
        },
        profile: profile.to_vec(),
        origin: Vec3::ZERO,
        axis: Vec3::Z,
    })
}

pub fn build_funnel_with(params: &FunnelParams) -> Result<FunnelSurface, MeshError> {
    build_funnel(&flare_profile(params), params.radial_segments)
}

impl FunnelSurface {
    pub fn narrow_radius(&self) -> f32 {
        self.profile[0].radius
    }

    pub fn mouth_radius(&self) -> f32 {
        self.profile
            .iter()
            .map(|p| p.radius)
            .fold(0.0_f32, f32::max)
    }

    /// Put the narrow ring on the start of `path` and flare backwards against
    /// its start tangent, so it caps the tube's open end.
    pub fn align_to(&mut self, path: &impl PathSampler) {
        let origin = path.position_at(0.0);
        let tangent = path.tangent_at(0.0);
        let axis = if tangent.length_squared() > 0.25 {
            -tangent.normalize()
        } else {
            log::warn!("[funnel] tube start has no direction; keeping local axis");
            self.axis
        };
        let rotation = Quat::from_rotation_arc(self.axis, axis);
        let to_local = Mat4::from_translation(-self.origin);
        let m = Mat4::from_rotation_translation(rotation, origin) * to_local;
        self.mesh.transform(m);
        self.origin = origin;
        self.axis = axis;
    }
}
