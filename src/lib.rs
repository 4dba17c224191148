#![doc = "Tolerance-based point deduplication with stable canonical ids"]
pub mod aabb;
pub mod config;
pub mod dedup;
pub mod error;
pub mod io;
pub mod point;
pub mod point_vec;
pub mod sort;

#[doc(inline)]
pub use aabb::BoundingBox;

#[doc(inline)]
pub use config::{PointType, PointVecConfig};

#[doc(inline)]
pub use error::{PointVecError, Result};

#[doc(inline)]
pub use point::Point;

#[doc(inline)]
pub use point_vec::PointVec;
