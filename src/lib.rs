pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use error::{BezixError, Result};
pub use geometry::{Curve, CurvedPolygon, Surface};
pub use operations::{all_intersections, Intersection, IntersectionConfig};
