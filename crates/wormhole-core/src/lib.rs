pub mod camera;
pub mod color;
pub mod config;
pub mod constants;
pub mod curve;
pub mod dataset;
pub mod entry;
pub mod error;
pub mod funnel;
pub mod journey;
pub mod mesh;
pub mod orbit;
pub mod particles;
pub mod pick;
pub mod render;
pub mod scene;
pub mod timer;
pub mod tube;

pub use camera::*;
pub use config::*;
pub use curve::{Curve, CurveSample, PathSampler};
pub use error::*;
pub use journey::*;
pub use pick::*;
pub use render::*;
pub use scene::*;
