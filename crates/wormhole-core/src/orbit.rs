//! Free orbit camera used before the journey takes over.

use crate::camera::{Camera, CameraPose};
use crate::constants::{
    ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE, ORBIT_PAN_SPEED, ORBIT_PITCH_LIMIT,
    ORBIT_ROTATE_SPEED, ORBIT_ZOOM_SPEED,
};
use glam::Vec3;
use std::f32::consts::TAU;

pub struct OrbitRig {
    target: Vec3,
    yaw: f32,
    pitch: f32,
    distance: f32,
    enabled: bool,
}

impl OrbitRig {
    pub fn from_pose(pose: CameraPose) -> Self {
        let offset = pose.eye - pose.target;
        let distance = offset.length().clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
        let dir = offset.normalize_or_zero();
        Self {
            target: pose.target,
            yaw: dir.x.atan2(dir.z),
            pitch: dir.y.clamp(-1.0, 1.0).asin(),
            distance,
            enabled: true,
        }
    }

    /// Drag by a fraction of the viewport height; a full-height drag turns
    /// `ORBIT_ROTATE_SPEED` of a revolution.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        if !self.enabled {
            return;
        }
        self.yaw -= TAU * dx * ORBIT_ROTATE_SPEED;
        self.pitch =
            (self.pitch + TAU * dy * ORBIT_ROTATE_SPEED).clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
    }

    /// Positive steps zoom out, negative zoom in.
    pub fn zoom(&mut self, steps: f32) {
        if !self.enabled {
            return;
        }
        let factor = 0.95_f32.powf(-steps * ORBIT_ZOOM_SPEED);
        self.distance = (self.distance * factor).clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }

    /// Slide the target across the view plane. `dx`/`dy` are fractions of the
    /// viewport height, screen-down positive; the shift scales with distance.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        if !self.enabled {
            return;
        }
        let forward = (self.target - self.eye()).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let up = right.cross(forward);
        let scale = self.distance * ORBIT_PAN_SPEED;
        self.target += (up * dy - right * dx) * scale;
    }

    pub fn eye(&self) -> Vec3 {
        let (sy, cy) = self.yaw.sin_cos();
        let (sp, cp) = self.pitch.sin_cos();
        self.target + Vec3::new(sy * cp, sp, cy * cp) * self.distance
    }

    /// Write the orbit pose. Does nothing while disabled.
    pub fn apply(&self, camera: &mut Camera) -> bool {
        if !self.enabled {
            return false;
        }
        camera.set_pose(CameraPose {
            eye: self.eye(),
            target: self.target,
            up: Vec3::Y,
        });
        true
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }
}
