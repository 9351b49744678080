//! Camera description and the scripted flythrough director.
//!
//! The director only ever writes the camera while its latch is set (from the
//! moment the journey starts traveling until `reset`). Before that the orbit
//! rig owns the camera.

use crate::constants::{
    ARRIVAL_PROGRESS, BANK_AMPLITUDE_RADIANS, BANK_FREQUENCY, CAMERA_FOVY_RADIANS, CAMERA_ZFAR,
    CAMERA_ZNEAR, INITIAL_EYE, INITIAL_TARGET, LOOK_AHEAD, MIN_AIM_DISTANCE, PROGRESS_MAX,
    TRAVEL_DURATION_SECS,
};
use crate::curve::Curve;
use glam::{Mat4, Quat, Vec3};
use std::rc::Rc;

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: INITIAL_EYE,
            target: INITIAL_TARGET,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy_radians: CAMERA_FOVY_RADIANS,
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }
}

impl Camera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            eye: self.eye,
            target: self.target,
            up: self.up,
        }
    }

    pub fn set_pose(&mut self, pose: CameraPose) {
        self.eye = pose.eye;
        self.target = pose.target;
        self.up = pose.up;
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            eye: INITIAL_EYE,
            target: INITIAL_TARGET,
            up: Vec3::Y,
        }
    }
}

#[derive(Clone, Debug)]
pub struct CameraParams {
    /// Progress per second. Constant in curve-parameter space, so perceived
    /// speed varies with how tightly the control points are packed.
    pub progress_rate: f32,
    pub progress_max: f32,
    pub look_ahead: f32,
    pub bank_amplitude: f32,
    pub bank_frequency: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            progress_rate: ARRIVAL_PROGRESS / TRAVEL_DURATION_SECS as f32,
            progress_max: PROGRESS_MAX,
            look_ahead: LOOK_AHEAD,
            bank_amplitude: BANK_AMPLITUDE_RADIANS,
            bank_frequency: BANK_FREQUENCY,
        }
    }
}

pub struct CameraDirector {
    params: CameraParams,
    path: Option<Rc<Curve>>,
    progress: f32,
    elapsed: f32,
    active: bool,
    initial_pose: CameraPose,
}

impl CameraDirector {
    /// `initial_pose` is captured once; `reset` hands it back.
    pub fn new(initial_pose: CameraPose, params: CameraParams) -> Self {
        Self {
            params,
            path: None,
            progress: 0.0,
            elapsed: 0.0,
            active: false,
            initial_pose,
        }
    }

    /// Start the flythrough along `path`. Arming an already active director
    /// keeps the running flight.
    pub fn arm(&mut self, path: Rc<Curve>) {
        if self.active {
            log::debug!("[camera] already armed; ignoring");
            return;
        }
        self.path = Some(path);
        self.progress = 0.0;
        self.elapsed = 0.0;
        self.active = true;
        log::info!("[camera] armed");
    }

    /// Advance and return the new pose, or `None` while not armed.
    pub fn tick(&mut self, dt: f32) -> Option<CameraPose> {
        if !self.active {
            return None;
        }
        let dt = dt.max(0.0);
        self.progress = (self.progress + self.params.progress_rate * dt).min(self.params.progress_max);
        self.elapsed += dt;
        self.pose()
    }

    /// Advance and write straight into `camera`. Returns whether it wrote.
    pub fn drive(&mut self, dt: f32, camera: &mut Camera) -> bool {
        match self.tick(dt) {
            Some(pose) => {
                camera.set_pose(pose);
                true
            }
            None => false,
        }
    }

    /// Pose at the current progress without advancing.
    pub fn pose(&self) -> Option<CameraPose> {
        let path = self.path.as_ref().filter(|_| self.active)?;
        let eye = path.position_at(self.progress);
        let ahead = (self.progress + self.params.look_ahead).min(self.params.progress_max);
        let mut target = path.position_at(ahead);
        if target.distance(eye) < MIN_AIM_DISTANCE {
            // Look-ahead collapsed against the end of the path: aim along it.
            let tangent = path.tangent_at(self.progress);
            target = eye + if tangent == Vec3::ZERO { Vec3::NEG_Z } else { tangent };
        }
        let forward = (target - eye).normalize_or_zero();
        Some(CameraPose {
            eye,
            target,
            up: self.banked_up(forward),
        })
    }

    /// Cosmetic roll: world up tilted around the view direction by a small
    /// sinusoid of elapsed time.
    fn banked_up(&self, forward: Vec3) -> Vec3 {
        if forward == Vec3::ZERO {
            return Vec3::Y;
        }
        let roll = self.bank_angle();
        let up = Quat::from_axis_angle(forward, roll) * Vec3::Y;
        if up.cross(forward).length_squared() < 1e-6 {
            Vec3::Z
        } else {
            up
        }
    }

    pub fn bank_angle(&self) -> f32 {
        self.params.bank_amplitude * (self.elapsed * self.params.bank_frequency).sin()
    }

    /// Clear the latch and drop the path. Returns the pose captured at start.
    pub fn reset(&mut self) -> CameraPose {
        self.active = false;
        self.path = None;
        self.progress = 0.0;
        self.elapsed = 0.0;
        self.initial_pose
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn initial_pose(&self) -> CameraPose {
        self.initial_pose
    }
}
