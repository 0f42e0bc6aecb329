//! # World Errors
//!
//! Error type shared by chunk construction, the material registry, world
//! configuration and ray casting.

use cgmath::Point3;

/// Result alias used throughout the voxel world.
pub type WorldResult<T> = Result<T, WorldError>;

/// Everything that can go wrong while setting up or querying the world.
///
/// Addressing a chunk-local block outside `[0, size)` is not represented here:
/// that is a programming error and panics instead.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    #[error("chunk origin {origin:?} is not a multiple of chunk size {size}")]
    MisalignedOrigin { origin: Point3<i32>, size: i32 },

    #[error("chunk size must be positive, got {0}")]
    InvalidChunkSize(i32),

    #[error("material `{0}' not found")]
    UnknownMaterial(String),

    #[error("material `{0}' is already registered")]
    DuplicateMaterial(String),

    #[error("cannot register more than {limit} {kind} materials")]
    TooManyMaterials { kind: &'static str, limit: usize },

    #[error("ray direction must be finite and non-zero")]
    DegenerateRay,

    #[error("ray range must be finite and positive, got {0}")]
    InvalidRange(f32),

    #[error("ray origin {0:?} lies outside the addressable block range")]
    RayOutOfBounds(Point3<f32>),

    #[error("invalid world configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("could not read world configuration: {0}")]
    Io(#[from] std::io::Error),
}
