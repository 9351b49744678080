//! Pointer events and ray picking against the entry object.

use glam::{Mat4, Vec3, Vec4};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    HoverEnter,
    HoverLeave,
    Click,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction.
    pub dir: Vec3,
}

impl Ray {
    /// World-space ray through normalised device coordinates (`ndc_x`,
    /// `ndc_y` in [-1, 1], y up) for the given view-projection matrix.
    pub fn from_ndc(view_proj: Mat4, ndc_x: f32, ndc_y: f32) -> Self {
        let inv = view_proj.inverse();
        let p_near = inv * Vec4::new(ndc_x, ndc_y, 0.0, 1.0);
        let p_far = inv * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        let p0: Vec3 = p_near.truncate() / p_near.w;
        let p1: Vec3 = p_far.truncate() / p_far.w;
        Self {
            origin: p0,
            dir: (p1 - p0).normalize_or_zero(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_center_half_extent(center: Vec3, half: f32) -> Self {
        Self {
            min: center - Vec3::splat(half),
            max: center + Vec3::splat(half),
        }
    }

    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Slab test. Returns the entry distance along the ray (0 when the origin
    /// is inside).
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        let inv = ray.dir.recip();
        let t0 = (self.min - ray.origin) * inv;
        let t1 = (self.max - ray.origin) * inv;
        let t_near = t0.min(t1).max_element();
        let t_far = t0.max(t1).min_element();
        if t_near.is_nan() || t_far.is_nan() || t_far < t_near.max(0.0) {
            return None;
        }
        Some(t_near.max(0.0))
    }
}
