//! Canvas2D render collaborator: wireframe rings for the tube and funnel,
//! an outlined cube for the entry object, dots for particles.

use crate::input::project_to_canvas;
use glam::{Mat4, Vec2, Vec3};
use web_sys as web;
use wormhole_core::constants::BACKGROUND_RGB;
use wormhole_core::mesh::Surface;
use wormhole_core::{Camera, GeometryRef, RenderSink, Renderable, Tunnel};

/// Every n-th tube ring is drawn.
const TUBE_RING_STRIDE: usize = 4;
/// Every n-th vertex around a ring starts a lengthwise line.
const RADIAL_LINE_STRIDE: usize = 4;
/// Particle radius in px at unit scale and unit clip depth.
const PARTICLE_PX: f32 = 60.0;

const CUBE_CORNERS: [Vec3; 8] = [
    Vec3::new(-0.5, -0.5, -0.5),
    Vec3::new(0.5, -0.5, -0.5),
    Vec3::new(0.5, 0.5, -0.5),
    Vec3::new(-0.5, 0.5, -0.5),
    Vec3::new(-0.5, -0.5, 0.5),
    Vec3::new(0.5, -0.5, 0.5),
    Vec3::new(0.5, 0.5, 0.5),
    Vec3::new(-0.5, 0.5, 0.5),
];

const CUBE_EDGES: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (4, 5),
    (5, 6),
    (6, 7),
    (7, 4),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Wire polylines extracted once from a surface.
struct Wire {
    rings: Vec<Vec<Vec3>>,
    lengthwise: Vec<Vec<Vec3>>,
}

impl Wire {
    fn from_surface(mesh: &Surface, ring_stride: usize) -> Self {
        let count = mesh.ring_count();
        let mut picked: Vec<usize> = (0..count).step_by(ring_stride.max(1)).collect();
        if count > 0 && picked.last() != Some(&(count - 1)) {
            picked.push(count - 1);
        }
        let rings = picked
            .iter()
            .map(|&i| {
                let mut ring: Vec<Vec3> = mesh.ring(i).iter().map(|v| v.pos()).collect();
                if let Some(first) = ring.first().copied() {
                    ring.push(first);
                }
                ring
            })
            .collect();
        let lengthwise = (0..mesh.ring_size)
            .step_by(RADIAL_LINE_STRIDE)
            .map(|j| (0..count).map(|i| mesh.ring(i)[j].pos()).collect())
            .collect();
        Self { rings, lengthwise }
    }
}

pub struct CanvasRenderer {
    tube: Option<Wire>,
    funnel: Option<Wire>,
}

impl CanvasRenderer {
    pub fn new(tunnel: Option<&Tunnel>) -> Self {
        Self {
            tube: tunnel.map(|t| Wire::from_surface(&t.tube.mesh, TUBE_RING_STRIDE)),
            funnel: tunnel.map(|t| Wire::from_surface(&t.funnel.mesh, 1)),
        }
    }

    pub fn sink<'a>(
        &'a self,
        ctx: &'a web::CanvasRenderingContext2d,
        width: f32,
        height: f32,
    ) -> CanvasSink<'a> {
        CanvasSink {
            renderer: self,
            ctx,
            width,
            height,
            view_proj: Mat4::IDENTITY,
        }
    }
}

pub struct CanvasSink<'a> {
    renderer: &'a CanvasRenderer,
    ctx: &'a web::CanvasRenderingContext2d,
    width: f32,
    height: f32,
    view_proj: Mat4,
}

fn css_rgb(rgb: [f32; 3]) -> String {
    let c = |x: f32| (x.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("rgb({},{},{})", c(rgb[0]), c(rgb[1]), c(rgb[2]))
}

impl CanvasSink<'_> {
    fn project(&self, p: Vec3) -> Option<(Vec2, f32)> {
        project_to_canvas(self.view_proj, p, self.width, self.height)
    }

    // Breaks the line wherever a point falls off-screen in depth.
    fn polyline(&self, points: impl Iterator<Item = Vec3>) {
        let mut pen_down = false;
        for p in points {
            match self.project(p) {
                Some((s, _)) if pen_down => self.ctx.line_to(s.x as f64, s.y as f64),
                Some((s, _)) => {
                    self.ctx.move_to(s.x as f64, s.y as f64);
                    pen_down = true;
                }
                None => pen_down = false,
            }
        }
    }

    fn stroke_wire(&self, wire: &Wire, item: &Renderable) {
        self.ctx.set_global_alpha(item.material.opacity as f64);
        self.ctx.set_stroke_style_str(&css_rgb(item.color));
        self.ctx.set_line_width(1.0);
        self.ctx.begin_path();
        for line in wire.rings.iter().chain(&wire.lengthwise) {
            self.polyline(line.iter().map(|p| item.transform.transform_point3(*p)));
        }
        self.ctx.stroke();
    }

    fn stroke_cube(&self, item: &Renderable) {
        let corners = CUBE_CORNERS.map(|c| self.project(item.transform.transform_point3(c)));
        self.ctx.set_global_alpha(item.material.opacity as f64);
        self.ctx.set_stroke_style_str(&css_rgb(item.color));
        self.ctx.set_line_width(2.0);
        self.ctx.begin_path();
        for (a, b) in CUBE_EDGES {
            if let (Some((pa, _)), Some((pb, _))) = (corners[a], corners[b]) {
                self.ctx.move_to(pa.x as f64, pa.y as f64);
                self.ctx.line_to(pb.x as f64, pb.y as f64);
            }
        }
        self.ctx.stroke();
    }

    fn fill_particle(&self, item: &Renderable) {
        let (scale, _, position) = item.transform.to_scale_rotation_translation();
        let Some((s, depth)) = self.project(position) else {
            return;
        };
        let r = (scale.x * PARTICLE_PX / depth).clamp(0.5, 6.0);
        self.ctx.set_global_alpha(item.material.opacity as f64);
        self.ctx.set_fill_style_str(&css_rgb(item.color));
        self.ctx
            .fill_rect((s.x - r) as f64, (s.y - r) as f64, (2.0 * r) as f64, (2.0 * r) as f64);
    }
}

impl RenderSink for CanvasSink<'_> {
    fn begin_frame(&mut self, camera: &Camera) {
        self.view_proj = camera.view_proj();
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_fill_style_str(&css_rgb(BACKGROUND_RGB));
        self.ctx
            .fill_rect(0.0, 0.0, self.width as f64, self.height as f64);
    }

    fn submit(&mut self, item: Renderable) {
        match item.geometry {
            GeometryRef::Tube => {
                if let Some(wire) = &self.renderer.tube {
                    self.stroke_wire(wire, &item);
                }
            }
            GeometryRef::Funnel => {
                if let Some(wire) = &self.renderer.funnel {
                    self.stroke_wire(wire, &item);
                }
            }
            GeometryRef::EntryBox => self.stroke_cube(&item),
            GeometryRef::Particle { .. } => self.fill_particle(&item),
        }
    }
}
