//! Error types for geometry construction and skin binding.

/// Errors raised while building procedural geometry.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// A primitive parameter was out of range (zero segments, non-positive size).
    #[error("Invalid geometry parameter '{name}': {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

/// Errors raised while computing or consuming a skin binding.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SkinError {
    #[error("Segment height must be finite and greater than zero, got {0}")]
    InvalidSegmentHeight(f64),

    #[error("Segment count must be greater than zero")]
    InvalidSegmentCount,

    #[error("Half height must be finite, got {0}")]
    InvalidHalfHeight(f64),

    #[error("Cannot bind an empty vertex buffer")]
    EmptyMesh,

    /// An influence with non-zero weight names a bone the skeleton does not have.
    #[error("Vertex {vertex} references bone {bone}, but the skeleton has {bone_count} bones")]
    BoneOutOfRange {
        vertex: usize,
        bone: i32,
        bone_count: usize,
    },

    #[error("Length mismatch: expected {expected} vertices, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Bone index {0} does not exist")]
    NoSuchBone(usize),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
