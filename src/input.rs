use glam::{Mat4, Vec2, Vec3, Vec4};
use wormhole_core::PointerEvent;

/// Pointer travel (CSS px) below which a press-release counts as a click.
pub const CLICK_SLOP_PX: f32 = 4.0;
/// Device pixel ratio range honoured for the canvas backing store.
const PIXEL_RATIO_RANGE: (f64, f64) = (1.0, 2.0);
/// Wheel pixels that make one zoom step.
const WHEEL_PIXELS_PER_STEP: f32 = 100.0;
/// Wheel lines that make one zoom step.
const WHEEL_LINES_PER_STEP: f32 = 3.0;

/// What a drag does to the orbit rig.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragMode {
    #[default]
    Rotate,
    Pan,
}

/// Secondary button, or primary with ctrl/meta/shift held, pans.
#[inline]
pub fn drag_mode(button: i16, modifier: bool) -> DragMode {
    match (button, modifier) {
        (2, _) | (0, true) => DragMode::Pan,
        _ => DragMode::Rotate,
    }
}

/// Press-drag-release tracking for the orbit rig.
#[derive(Default, Clone, Copy)]
pub struct DragState {
    pub active: bool,
    pub last: [f32; 2],
    pub travelled: f32,
    pub mode: DragMode,
}

impl DragState {
    pub fn begin(&mut self, x: f32, y: f32) {
        self.begin_with(x, y, DragMode::Rotate);
    }

    pub fn begin_with(&mut self, x: f32, y: f32, mode: DragMode) {
        self.active = true;
        self.last = [x, y];
        self.travelled = 0.0;
        self.mode = mode;
    }

    /// Movement since the last update, in CSS px. Zero when not dragging.
    pub fn update(&mut self, x: f32, y: f32) -> [f32; 2] {
        if !self.active {
            return [0.0, 0.0];
        }
        let delta = [x - self.last[0], y - self.last[1]];
        self.last = [x, y];
        self.travelled += (delta[0] * delta[0] + delta[1] * delta[1]).sqrt();
        delta
    }

    /// Finish the drag. Returns true when a rotate press never moved far
    /// enough to be anything but a click.
    pub fn end(&mut self) -> bool {
        let was_click =
            self.active && self.mode == DragMode::Rotate && self.travelled < CLICK_SLOP_PX;
        self.active = false;
        was_click
    }
}

/// CSS pixel position inside a `width` x `height` box to normalised device
/// coordinates (y up). `None` for an empty box.
#[inline]
pub fn css_to_ndc(x_css: f32, y_css: f32, width: f32, height: f32) -> Option<Vec2> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        (x_css / width) * 2.0 - 1.0,
        1.0 - (y_css / height) * 2.0,
    ))
}

/// Drag delta as fractions of the viewport height, the unit the orbit rig
/// expects for both axes.
#[inline]
pub fn drag_fraction(delta_px: [f32; 2], height: f32) -> [f32; 2] {
    if height <= 0.0 {
        return [0.0, 0.0];
    }
    [delta_px[0] / height, delta_px[1] / height]
}

/// `WheelEvent.deltaY` to zoom steps; positive zooms out.
#[inline]
pub fn wheel_steps(delta_y: f64, delta_mode: u32) -> f32 {
    let d = delta_y as f32;
    match delta_mode {
        0 => d / WHEEL_PIXELS_PER_STEP,
        1 => d / WHEEL_LINES_PER_STEP,
        _ => d.signum(),
    }
}

/// Event to emit when the pick result changes between moves.
#[inline]
pub fn hover_transition(was_hovered: bool, hit: bool) -> Option<PointerEvent> {
    match (was_hovered, hit) {
        (false, true) => Some(PointerEvent::HoverEnter),
        (true, false) => Some(PointerEvent::HoverLeave),
        _ => None,
    }
}

/// World point to canvas pixels plus clip-space depth `w`. `None` behind the
/// camera or outside the depth range.
#[inline]
pub fn project_to_canvas(view_proj: Mat4, p: Vec3, width: f32, height: f32) -> Option<(Vec2, f32)> {
    let clip = view_proj * Vec4::new(p.x, p.y, p.z, 1.0);
    if clip.w <= 1e-4 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    // glam's right-handed perspective maps depth to [0, 1].
    if ndc.z < 0.0 || ndc.z > 1.0 {
        return None;
    }
    Some((
        Vec2::new((ndc.x + 1.0) * 0.5 * width, (1.0 - ndc.y) * 0.5 * height),
        clip.w,
    ))
}

/// Backing-store size in device pixels for a canvas of `css_w` x `css_h`,
/// with the pixel ratio clamped to `PIXEL_RATIO_RANGE`.
#[inline]
pub fn backing_size(css_w: f64, css_h: f64, device_pixel_ratio: f64) -> (u32, u32) {
    let (lo, hi) = PIXEL_RATIO_RANGE;
    let dpr = if device_pixel_ratio.is_finite() {
        device_pixel_ratio.clamp(lo, hi)
    } else {
        lo
    };
    (
        ((css_w * dpr) as u32).max(1),
        ((css_h * dpr) as u32).max(1),
    )
}
