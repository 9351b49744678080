use glam::Vec3;

/// Baked control points for the camera flythrough.
///
/// Indices `0..TUNNEL_START` form the approach from the initial eye, past the
/// entry object at the origin, to the tunnel mouth. Everything from
/// `TUNNEL_START` on is the tunnel itself; the visible tunnel curve is built
/// over that span so both curves share the same geometry.
pub const CAMERA_PATH: [Vec3; 16] = [
    Vec3::new(0.0, 0.0, 3.0),
    Vec3::new(0.05, 0.15, 1.6),
    Vec3::new(0.0, 0.1, 0.2),
    Vec3::new(-0.05, 0.0, -1.4),
    Vec3::new(0.0, 0.0, -3.0), // tunnel mouth
    Vec3::new(0.6, 0.4, -5.0),
    Vec3::new(1.4, -0.2, -7.5),
    Vec3::new(0.8, -1.0, -10.0),
    Vec3::new(-0.5, -0.6, -12.5),
    Vec3::new(-1.2, 0.5, -15.0),
    Vec3::new(-0.4, 1.2, -17.5),
    Vec3::new(0.7, 0.6, -20.0),
    Vec3::new(1.0, -0.3, -22.5),
    Vec3::new(0.2, -0.5, -25.0),
    Vec3::new(0.0, 0.0, -27.5),
    Vec3::new(0.0, 0.0, -30.0),
];

pub const TUNNEL_START: usize = 4;

#[inline]
pub fn camera_path_points() -> &'static [Vec3] {
    &CAMERA_PATH
}

#[inline]
pub fn tunnel_points() -> &'static [Vec3] {
    &CAMERA_PATH[TUNNEL_START..]
}
