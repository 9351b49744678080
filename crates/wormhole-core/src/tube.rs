//! Tube surface swept along a curve.

use crate::constants::{TUBE_RADIAL_SEGMENTS, TUBE_RADIUS, TUBE_TUBULAR_SEGMENTS};
use crate::curve::PathSampler;
use crate::error::MeshError;
use crate::mesh::{stitch_rings, MeshVertex, Surface};
use glam::{Quat, Vec2, Vec3};
use std::f32::consts::TAU;

#[derive(Clone, Debug)]
pub struct TubeParams {
    pub tubular_segments: usize,
    pub radius: f32,
    pub radial_segments: usize,
    pub closed: bool,
}

impl Default for TubeParams {
    fn default() -> Self {
        Self {
            tubular_segments: TUBE_TUBULAR_SEGMENTS,
            radius: TUBE_RADIUS,
            radial_segments: TUBE_RADIAL_SEGMENTS,
            closed: false,
        }
    }
}

/// Orthonormal frame at one sample of a path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub tangent: Vec3,
    pub normal: Vec3,
    pub binormal: Vec3,
}

impl Default for Frame {
    fn default() -> Self {
        Self {
            tangent: Vec3::Z,
            normal: Vec3::X,
            binormal: Vec3::Y,
        }
    }
}

impl Frame {
    /// Seed frame: the normal is built off the axis least aligned with the tangent.
    fn initial(tangent: Vec3) -> Self {
        let a = tangent.abs();
        let axis = if a.x <= a.y && a.x <= a.z {
            Vec3::X
        } else if a.y <= a.z {
            Vec3::Y
        } else {
            Vec3::Z
        };
        let side = tangent.cross(axis).normalize();
        let normal = tangent.cross(side);
        Self {
            tangent,
            normal,
            binormal: tangent.cross(normal),
        }
    }

    /// Parallel transport: rotate the previous normal by the turn between tangents.
    fn transported(&self, tangent: Vec3) -> Self {
        let axis = self.tangent.cross(tangent);
        let mut normal = self.normal;
        if axis.length_squared() > f32::EPSILON {
            let angle = self.tangent.dot(tangent).clamp(-1.0, 1.0).acos();
            normal = Quat::from_axis_angle(axis.normalize(), angle) * normal;
        }
        // Re-orthogonalise against drift.
        let normal = (normal - tangent * normal.dot(tangent)).normalize_or_zero();
        if normal == Vec3::ZERO {
            return Self::initial(tangent);
        }
        Self {
            tangent,
            normal,
            binormal: tangent.cross(normal),
        }
    }
}

/// Frames at `samples` evenly spaced parameters `i / (samples - 1)`.
///
/// Samples whose tangent is zero or not finite reuse the previous frame.
pub fn compute_frames(path: &impl PathSampler, samples: usize, closed: bool) -> Vec<Frame> {
    let last = samples.saturating_sub(1).max(1) as f32;
    let mut frames: Vec<Frame> = Vec::with_capacity(samples);
    let mut leading = 0usize;
    for i in 0..samples {
        let t = i as f32 / last;
        let tangent = path.tangent_at(t);
        let valid = tangent.is_finite() && tangent.length_squared() > 0.25;
        let frame = if !valid {
            log::warn!("[tube] degenerate tangent at t={t:.4}; reusing previous frame");
            match frames.last() {
                Some(prev) => *prev,
                None => {
                    leading += 1;
                    continue;
                }
            }
        } else {
            match frames.last() {
                None => Frame::initial(tangent.normalize()),
                Some(prev) => prev.transported(tangent.normalize()),
            }
        };
        frames.push(frame);
    }
    if leading > 0 {
        let first = frames.first().copied().unwrap_or_default();
        let mut filled = vec![first; leading];
        filled.append(&mut frames);
        frames = filled;
    }

    if closed && frames.len() > 1 {
        spread_closing_twist(&mut frames);
    }
    frames
}

// Distribute the mismatch between the first and last normal evenly so a
// closed tube meets itself without a seam.
fn spread_closing_twist(frames: &mut [Frame]) {
    let n = frames.len() - 1;
    let first = frames[0];
    let last = frames[n];
    let mut theta = first.normal.dot(last.normal).clamp(-1.0, 1.0).acos() / n as f32;
    if first.tangent.dot(first.normal.cross(last.normal)) > 0.0 {
        theta = -theta;
    }
    for (i, f) in frames.iter_mut().enumerate().skip(1) {
        let q = Quat::from_axis_angle(f.tangent, theta * i as f32);
        f.normal = q * f.normal;
        f.binormal = f.tangent.cross(f.normal);
    }
}

/// Tube around a path: `rings × radial_segments` vertices at `radius` from the
/// sampled centreline.
#[derive(Clone, Debug)]
pub struct TubeSurface {
    pub mesh: Surface,
    pub radius: f32,
    pub closed: bool,
    pub frames: Vec<Frame>,
}

pub fn build_tube(
    path: &impl PathSampler,
    tubular_segments: usize,
    radius: f32,
    radial_segments: usize,
    closed: bool,
) -> Result<TubeSurface, MeshError> {
    let min_tubular = if closed { 3 } else { 1 };
    if tubular_segments < min_tubular {
        return Err(MeshError::TooFewSegments {
            what: "tube length",
            got: tubular_segments,
            min: min_tubular,
        });
    }
    if radial_segments < 3 {
        return Err(MeshError::TooFewSegments {
            what: "tube circumference",
            got: radial_segments,
            min: 3,
        });
    }
    if !radius.is_finite() || radius <= 0.0 {
        return Err(MeshError::InvalidRadius(radius));
    }

    let mut frames = compute_frames(path, tubular_segments + 1, closed);
    if closed {
        // The last sample duplicates the first ring.
        frames.truncate(tubular_segments);
    }
    let rings = frames.len();

    let mut vertices = Vec::with_capacity(rings * radial_segments);
    let mut ring_centers = Vec::with_capacity(rings);
    for (i, frame) in frames.iter().enumerate() {
        let t = i as f32 / tubular_segments as f32;
        let center = path.position_at(t);
        ring_centers.push(center);
        for j in 0..radial_segments {
            let v = j as f32 / radial_segments as f32;
            let (sin, cos) = (v * TAU).sin_cos();
            let normal = frame.normal * cos + frame.binormal * sin;
            vertices.push(MeshVertex::new(
                center + normal * radius,
                normal,
                Vec2::new(t, v),
            ));
        }
    }
    let indices = stitch_rings(rings, radial_segments, closed);
    log::debug!(
        "[tube] {} rings x {} radial, {} triangles",
        rings,
        radial_segments,
        indices.len() / 3
    );

    Ok(TubeSurface {
        mesh: Surface {
            vertices,
            indices,
            ring_size: radial_segments,
            ring_centers,
        },
        radius,
        closed,
        frames,
    })
}

pub fn build_tube_with(path: &impl PathSampler, params: &TubeParams) -> Result<TubeSurface, MeshError> {
    build_tube(
        path,
        params.tubular_segments,
        params.radius,
        params.radial_segments,
        params.closed,
    )
}
