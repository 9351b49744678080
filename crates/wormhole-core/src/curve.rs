//! Smooth parametric curves through control points.
//!
//! Curves are uniform Catmull-Rom splines: every segment between two
//! control points is shaped by its two neighbours, so the first derivative is
//! continuous at every control point. The global parameter `t` is split evenly
//! across segments (not arc-length normalised).

use crate::constants::{
    LENGTH_SAMPLES, MIN_POINT_SEPARATION, SMOOTH_NEIGHBOR_WEIGHT, SMOOTH_SELF_WEIGHT,
};
use crate::error::CurveError;
use glam::Vec3;
use std::ops::Range;

/// Anything a mesher or camera can walk along.
pub trait PathSampler {
    fn position_at(&self, t: f32) -> Vec3;
    /// Unit tangent, or `Vec3::ZERO` where the path has no direction.
    fn tangent_at(&self, t: f32) -> Vec3;
    fn is_closed(&self) -> bool;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurveSample {
    pub position: Vec3,
    pub tangent: Vec3,
}

#[derive(Clone, Debug)]
pub struct Curve {
    points: Vec<Vec3>,
    // Phantom neighbours before the first / after the last point (open curves).
    lead: Vec3,
    tail: Vec3,
    closed: bool,
}

impl Curve {
    /// Build a curve through every point. `closed` wraps the last segment back
    /// to the first point.
    pub fn build(points: &[Vec3], closed: bool) -> Result<Self, CurveError> {
        validate(points, closed)?;
        let n = points.len();
        Ok(Self {
            points: points.to_vec(),
            lead: points[0] * 2.0 - points[1],
            tail: points[n - 1] * 2.0 - points[n - 2],
            closed,
        })
    }

    /// Build an open curve through `points[range]` that reproduces exactly the
    /// segments a curve over all of `points` would have on that span: the
    /// points just outside the range steer the end tangents.
    pub fn build_span(points: &[Vec3], range: Range<usize>) -> Result<Self, CurveError> {
        let end = range.end.min(points.len());
        let start = range.start.min(end);
        let through = &points[start..end];
        validate(through, false)?;
        let n = through.len();
        let lead = match start.checked_sub(1) {
            Some(i) => guide(points, i)?,
            None => through[0] * 2.0 - through[1],
        };
        let tail = match points.get(end) {
            Some(_) => guide(points, end)?,
            None => through[n - 1] * 2.0 - through[n - 2],
        };
        Ok(Self {
            points: through.to_vec(),
            lead,
            tail,
            closed: false,
        })
    }

    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn segment_count(&self) -> usize {
        if self.closed {
            self.points.len()
        } else {
            self.points.len() - 1
        }
    }

    pub fn position_at(&self, t: f32) -> Vec3 {
        let (i, local) = self.locate(t);
        let [p0, p1, p2, p3] = self.segment(i);
        catmull_rom(p0, p1, p2, p3, local)
    }

    /// Derivative with respect to the global parameter `t`.
    pub fn derivative_at(&self, t: f32) -> Vec3 {
        let (i, local) = self.locate(t);
        let [p0, p1, p2, p3] = self.segment(i);
        catmull_rom_derivative(p0, p1, p2, p3, local) * self.segment_count() as f32
    }

    pub fn tangent_at(&self, t: f32) -> Vec3 {
        let d = self.derivative_at(t);
        if d.length_squared() > f32::EPSILON {
            return d.normalize();
        }
        // Cusp: fall back to a short chord around t.
        let h = 1e-3;
        (self.position_at(t + h) - self.position_at(t - h)).normalize_or_zero()
    }

    pub fn sample(&self, t: f32) -> CurveSample {
        CurveSample {
            position: self.position_at(t),
            tangent: self.tangent_at(t),
        }
    }

    /// Arc length approximated by a fixed number of chords.
    pub fn length(&self) -> f32 {
        let mut total = 0.0;
        let mut prev = self.position_at(0.0);
        for k in 1..=LENGTH_SAMPLES {
            let p = self.position_at(k as f32 / LENGTH_SAMPLES as f32);
            total += p.distance(prev);
            prev = p;
        }
        total
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn locate(&self, t: f32) -> (usize, f32) {
        let t = if self.closed {
            t.rem_euclid(1.0)
        } else {
            t.clamp(0.0, 1.0)
        };
        let segments = self.segment_count();
        let u = t * segments as f32;
        let i = (u.floor() as usize).min(segments - 1);
        (i, u - i as f32)
    }

    fn segment(&self, i: usize) -> [Vec3; 4] {
        let n = self.points.len();
        if self.closed {
            return [
                self.points[(i + n - 1) % n],
                self.points[i % n],
                self.points[(i + 1) % n],
                self.points[(i + 2) % n],
            ];
        }
        let p0 = if i == 0 { self.lead } else { self.points[i - 1] };
        let p3 = self.points.get(i + 2).copied().unwrap_or(self.tail);
        [p0, self.points[i], self.points[i + 1], p3]
    }
}

impl PathSampler for Curve {
    fn position_at(&self, t: f32) -> Vec3 {
        Curve::position_at(self, t)
    }
    fn tangent_at(&self, t: f32) -> Vec3 {
        Curve::tangent_at(self, t)
    }
    fn is_closed(&self) -> bool {
        self.closed
    }
}

fn validate(points: &[Vec3], closed: bool) -> Result<(), CurveError> {
    if points.len() < 2 {
        return Err(CurveError::TooFewPoints {
            count: points.len(),
        });
    }
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
        return Err(CurveError::NonFinitePoint { index });
    }
    let n = points.len();
    let pairs = if closed { n } else { n - 1 };
    for index in 0..pairs {
        let next = (index + 1) % n;
        if points[index].distance(points[next]) < MIN_POINT_SEPARATION {
            return Err(CurveError::CoincidentPoints { index, next });
        }
    }
    Ok(())
}

fn guide(points: &[Vec3], index: usize) -> Result<Vec3, CurveError> {
    let p = points[index];
    if p.is_finite() {
        Ok(p)
    } else {
        Err(CurveError::NonFinitePoint { index })
    }
}

#[inline]
fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    0.5 * (2.0 * p1
        + (p2 - p0) * t
        + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
        + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
}

#[inline]
fn catmull_rom_derivative(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    0.5 * ((p2 - p0)
        + 2.0 * (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t
        + 3.0 * (3.0 * p1 - p0 - 3.0 * p2 + p3) * t * t)
}

/// Soften sharp turns before fitting: every interior point becomes a blend of
/// itself and its two neighbours. Endpoints stay fixed.
pub fn smooth_points(points: &[Vec3], passes: usize) -> Vec<Vec3> {
    let mut current = points.to_vec();
    if current.len() < 3 {
        return current;
    }
    for _ in 0..passes {
        let prev = current.clone();
        for i in 1..prev.len() - 1 {
            current[i] = prev[i] * SMOOTH_SELF_WEIGHT
                + (prev[i - 1] + prev[i + 1]) * SMOOTH_NEIGHBOR_WEIGHT;
        }
    }
    current
}
