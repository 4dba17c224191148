//! Error types for point-set construction and queries

use thiserror::Error;

use crate::point::Point;

/// Errors surfaced by [`PointVec`](crate::PointVec).
///
/// A name collision is not listed here: the conflicting name is dropped with
/// a warning and the operation otherwise succeeds.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PointVecError {
    #[error("id {id} out of range (size {len})")]
    OutOfRange { id: usize, len: usize },

    #[error("no point named '{0}'")]
    NotFound(String),

    #[error("name '{name}' refers to input index {index}, but only {len} points were given")]
    InvalidNameIndex { name: String, index: usize, len: usize },

    #[error("relative epsilon must be finite and non-negative, got {0}")]
    InvalidTolerance(f64),

    #[error("point {index} has a non-finite coordinate: {point}")]
    NonFinitePoint { index: usize, point: Point },

    #[error("merge tolerance overflowed to {0}")]
    NonFiniteTolerance(f64),
}

pub type Result<T> = std::result::Result<T, PointVecError>;
