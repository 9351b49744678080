//! Error types for geometry construction.
//!
//! Frame-level anomalies are not errors: the tube mesher recovers from them
//! locally and only logs a warning.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    #[error("curve needs at least 2 control points, got {count}")]
    TooFewPoints { count: usize },
    #[error("control points {index} and {next} coincide")]
    CoincidentPoints { index: usize, next: usize },
    #[error("control point {index} is not finite")]
    NonFinitePoint { index: usize },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeshError {
    #[error("{what} needs at least {min} segments, got {got}")]
    TooFewSegments {
        what: &'static str,
        got: usize,
        min: usize,
    },
    #[error("radius must be finite and positive, got {0}")]
    InvalidRadius(f32),
    #[error("profile needs at least 2 points, got {count}")]
    ProfileTooShort { count: usize },
}

/// Anything that can stop the tunnel geometry from being built.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("invalid curve input: {0}")]
    Curve(#[from] CurveError),
    #[error("invalid mesh parameters: {0}")]
    Mesh(#[from] MeshError),
}
