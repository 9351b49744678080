use glam::Vec3;

// Shared tuning constants used by the core and both front-ends.

// Journey timing
pub const CLICK_TO_TRAVEL_SECS: f64 = 1.0; // Clicked -> Traveling delay
pub const TRAVEL_DURATION_SECS: f64 = 6.0; // Traveling -> Arrived duration
pub const ARRIVAL_PROGRESS: f32 = 0.995; // progress that also counts as arrival
pub const PROGRESS_MAX: f32 = 0.999; // never sample the curve's exact end
pub const MAX_FRAME_DT_SECS: f32 = 0.1; // clamp for stalled frames

// Camera
pub const INITIAL_EYE: Vec3 = Vec3::new(0.0, 0.0, 3.0);
pub const INITIAL_TARGET: Vec3 = Vec3::ZERO;
pub const CAMERA_FOVY_RADIANS: f32 = std::f32::consts::FRAC_PI_4;
pub const CAMERA_ZNEAR: f32 = 0.05;
pub const CAMERA_ZFAR: f32 = 200.0;
pub const LOOK_AHEAD: f32 = 0.02; // parameter distance to the aim point
pub const MIN_AIM_DISTANCE: f32 = 1e-3; // below this the aim falls back to the tangent
pub const BANK_AMPLITUDE_RADIANS: f32 = 0.08;
pub const BANK_FREQUENCY: f32 = 0.9; // radians per second of elapsed time

// Orbit controls (free camera before the journey starts)
pub const ORBIT_ROTATE_SPEED: f32 = 0.4;
pub const ORBIT_ZOOM_SPEED: f32 = 0.5;
pub const ORBIT_PAN_SPEED: f32 = 0.8;
pub const ORBIT_MIN_DISTANCE: f32 = 1.0;
pub const ORBIT_MAX_DISTANCE: f32 = 10.0;
pub const ORBIT_PITCH_LIMIT: f32 = 1.45; // just short of the poles

// Curve
pub const SMOOTH_SELF_WEIGHT: f32 = 0.6;
pub const SMOOTH_NEIGHBOR_WEIGHT: f32 = 0.2;
pub const MIN_POINT_SEPARATION: f32 = 1e-5;
pub const LENGTH_SAMPLES: usize = 200;

// Tunnel geometry
pub const TUBE_RADIUS: f32 = 0.6;
pub const TUBE_TUBULAR_SEGMENTS: usize = 200;
pub const TUBE_RADIAL_SEGMENTS: usize = 24;
pub const FUNNEL_MOUTH_RADIUS: f32 = 2.4;
pub const FUNNEL_LENGTH: f32 = 1.6;
pub const FUNNEL_PROFILE_STEPS: usize = 24;
pub const FUNNEL_RIPPLE_AMPLITUDE: f32 = 0.04;
pub const FUNNEL_RIPPLE_WAVES: f32 = 3.0;
pub const FUNNEL_RIM_LIP: f32 = 0.06; // extra radius of the rim lip
pub const FUNNEL_RADIAL_SEGMENTS: usize = 32;

// Entry object
pub const ENTRY_HALF_EXTENT: f32 = 0.5;
pub const ENTRY_SPIN_YAW_RATE: f32 = 0.3;
pub const ENTRY_SPIN_PITCH_RATE: f32 = 0.15;
pub const ENTRY_RECEDE_SECS: f32 = 0.8;
pub const ENTRY_RECEDE_DEPTH: f32 = 1.5;
pub const ENTRY_HOVER_BOOST: f32 = 1.4;

// Particle fields
pub const TUNNEL_PARTICLE_COUNT: usize = 600;
pub const TUNNEL_PARTICLE_OFFSET: f32 = 0.35; // max perpendicular displacement
pub const TUNNEL_BASE_HUE: f32 = 0.62;
pub const TUNNEL_HUE_SPAN: f32 = 0.35;
pub const TUNNEL_HUE_JITTER: f32 = 0.04;

pub const CONVERGE_PARTICLE_COUNT: usize = 220;
pub const CONVERGE_SPAWN_DEPTH: f32 = 4.0; // behind the target along its axis
pub const CONVERGE_RING_INNER: f32 = 1.5;
pub const CONVERGE_RING_OUTER: f32 = 4.0;
pub const CONVERGE_BASE_SPEED: f32 = 0.9;
pub const CONVERGE_PROXIMITY_GAIN: f32 = 2.0; // k in 1 + k / (d + 1)
pub const CONVERGE_SPIRAL_RATE: f32 = 2.5; // radians per second at the target
pub const CONVERGE_RECYCLE_DISTANCE: f32 = 0.15;

pub const DRIFT_PARTICLE_COUNT: usize = 400;
pub const DRIFT_SPREAD: f32 = 12.0; // half-width of the perpendicular box
pub const DRIFT_NEAR: f32 = -30.0;
pub const DRIFT_FAR: f32 = 6.0;
pub const DRIFT_SPEED_MIN: f32 = 0.5;
pub const DRIFT_SPEED_MAX: f32 = 2.0;

pub const PARTICLE_SCALE_MIN: f32 = 0.02;
pub const PARTICLE_SCALE_MAX: f32 = 0.06;
pub const PARTICLE_SPIN_MAX: f32 = 1.2; // radians per second per axis

// Palette
pub const BACKGROUND_RGB: [f32; 3] = [0.129, 0.157, 0.165]; // #21282a
pub const ENTRY_RGB: [f32; 3] = [0.392, 0.584, 0.929]; // cornflower
pub const TUBE_RGB: [f32; 3] = [0.35, 0.55, 1.0];
pub const FUNNEL_RGB: [f32; 3] = [0.55, 0.35, 1.0];

// Seeds
pub const DEFAULT_SEED: u64 = 42;
pub const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;
