//! The clickable object that starts the journey.

use crate::color::scale_rgb;
use crate::constants::{
    ENTRY_HALF_EXTENT, ENTRY_HOVER_BOOST, ENTRY_RECEDE_DEPTH, ENTRY_RECEDE_SECS, ENTRY_RGB,
    ENTRY_SPIN_PITCH_RATE, ENTRY_SPIN_YAW_RATE,
};
use crate::pick::{Aabb, Ray};
use glam::{EulerRot, Mat4, Quat, Vec3};

pub struct EntryObject {
    position: Vec3,
    half_extent: f32,
    rotation: Vec3,
    clickable: bool,
    hovered: bool,
    // Seconds since the recede started.
    recede: Option<f32>,
}

impl Default for EntryObject {
    fn default() -> Self {
        Self::new(Vec3::ZERO, ENTRY_HALF_EXTENT)
    }
}

impl EntryObject {
    pub fn new(position: Vec3, half_extent: f32) -> Self {
        Self {
            position,
            half_extent,
            rotation: Vec3::ZERO,
            clickable: true,
            hovered: false,
            recede: None,
        }
    }

    /// Spin follows total elapsed time; the recede animation follows `dt`.
    pub fn tick(&mut self, dt: f32, elapsed: f32) {
        self.rotation.y = elapsed * ENTRY_SPIN_YAW_RATE;
        self.rotation.x = elapsed * ENTRY_SPIN_PITCH_RATE;
        if let Some(t) = self.recede.as_mut() {
            *t += dt;
        }
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered && self.clickable;
    }

    pub fn disable_and_recede(&mut self) {
        self.clickable = false;
        self.hovered = false;
        if self.recede.is_none() {
            self.recede = Some(0.0);
        }
    }

    /// Recede progress in [0, 1], eased out.
    fn recede_amount(&self) -> f32 {
        let Some(t) = self.recede else {
            return 0.0;
        };
        let x = (t / ENTRY_RECEDE_SECS).clamp(0.0, 1.0);
        1.0 - (1.0 - x) * (1.0 - x)
    }

    pub fn scale(&self) -> f32 {
        1.0 - self.recede_amount()
    }

    pub fn world_position(&self) -> Vec3 {
        self.position + Vec3::NEG_Z * ENTRY_RECEDE_DEPTH * self.recede_amount()
    }

    pub fn transform(&self) -> Mat4 {
        let r = self.rotation;
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.half_extent * 2.0 * self.scale()),
            Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
            self.world_position(),
        )
    }

    /// Axis-aligned box enclosing the spinning cube.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_half_extent(
            self.world_position(),
            self.half_extent * 3.0_f32.sqrt() * self.scale(),
        )
    }

    pub fn hit(&self, ray: &Ray) -> bool {
        self.is_visible() && self.bounds().intersect(ray).is_some()
    }

    pub fn color(&self) -> [f32; 3] {
        if self.hovered {
            scale_rgb(ENTRY_RGB, ENTRY_HOVER_BOOST)
        } else {
            ENTRY_RGB
        }
    }

    pub fn is_clickable(&self) -> bool {
        self.clickable
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn is_visible(&self) -> bool {
        self.scale() > 0.0
    }

    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }
}
