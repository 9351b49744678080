//! What the scene hands to a render back-end each frame.

use crate::camera::Camera;
use crate::constants::{FUNNEL_RGB, TUBE_RGB};
use glam::Mat4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldId {
    Tunnel,
    Converge,
    Drift,
}

/// Geometry built once and reused every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeometryRef {
    Tube,
    Funnel,
    EntryBox,
    /// Pool slot `index` of a particle field.
    Particle { field: FieldId, index: usize },
}

/// Static material configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub emissive_intensity: f32,
    pub wireframe: bool,
    pub opacity: f32,
    pub transparent: bool,
}

pub const TUBE_MATERIAL: Material = Material {
    color: TUBE_RGB,
    emissive_intensity: 0.6,
    wireframe: true,
    opacity: 0.35,
    transparent: true,
};

pub const FUNNEL_MATERIAL: Material = Material {
    color: FUNNEL_RGB,
    emissive_intensity: 0.8,
    wireframe: true,
    opacity: 0.5,
    transparent: true,
};

pub const ENTRY_MATERIAL: Material = Material {
    color: crate::constants::ENTRY_RGB,
    emissive_intensity: 0.2,
    wireframe: false,
    opacity: 1.0,
    transparent: false,
};

pub const PARTICLE_MATERIAL: Material = Material {
    color: [1.0, 1.0, 1.0],
    emissive_intensity: 1.5,
    wireframe: false,
    opacity: 0.9,
    transparent: true,
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Renderable {
    pub geometry: GeometryRef,
    pub material: Material,
    pub transform: Mat4,
    /// Per-instance colour; equals `material.color` unless tinted.
    pub color: [f32; 3],
}

pub trait RenderSink {
    fn begin_frame(&mut self, _camera: &Camera) {}
    fn submit(&mut self, item: Renderable);
}

/// Keeps the last frame's submissions; used headless and in tests.
#[derive(Default)]
pub struct RecordingSink {
    pub frames: u64,
    pub items: Vec<Renderable>,
}

impl RecordingSink {
    pub fn count(&self, pred: impl Fn(&GeometryRef) -> bool) -> usize {
        self.items.iter().filter(|r| pred(&r.geometry)).count()
    }
}

impl RenderSink for RecordingSink {
    fn begin_frame(&mut self, _camera: &Camera) {
        self.frames += 1;
        self.items.clear();
    }

    fn submit(&mut self, item: Renderable) {
        self.items.push(item);
    }
}
