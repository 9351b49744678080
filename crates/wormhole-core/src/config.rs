use crate::camera::CameraParams;
use crate::constants::{
    CONVERGE_PARTICLE_COUNT, DEFAULT_SEED, DRIFT_PARTICLE_COUNT, TUNNEL_PARTICLE_COUNT,
};
use crate::funnel::FunnelParams;
use crate::journey::JourneyTimings;
use crate::particles::{AlongCurveParams, ConvergeParams, DriftParams};
use crate::tube::TubeParams;

#[derive(Clone, Debug)]
pub struct FieldCounts {
    pub tunnel: usize,
    pub converge: usize,
    pub drift: usize,
}

impl Default for FieldCounts {
    fn default() -> Self {
        Self {
            tunnel: TUNNEL_PARTICLE_COUNT,
            converge: CONVERGE_PARTICLE_COUNT,
            drift: DRIFT_PARTICLE_COUNT,
        }
    }
}

/// Everything a scene is built from. `Default` gives the shipped look.
#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub seed: u64,
    /// Smoothing passes over the control points before fitting.
    pub smooth_passes: usize,
    pub tube: TubeParams,
    pub funnel: FunnelParams,
    pub counts: FieldCounts,
    pub tunnel_particles: AlongCurveParams,
    pub converge: ConvergeParams,
    pub drift: DriftParams,
    pub timings: JourneyTimings,
    pub camera: CameraParams,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            smooth_passes: 1,
            tube: TubeParams::default(),
            funnel: FunnelParams::default(),
            counts: FieldCounts::default(),
            tunnel_particles: AlongCurveParams::default(),
            converge: ConvergeParams::default(),
            drift: DriftParams::default(),
            timings: JourneyTimings::default(),
            camera: CameraParams::default(),
        }
    }
}

impl SceneConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }
}
