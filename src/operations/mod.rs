mod intersection;

pub use intersection::{all_intersections, Intersection, IntersectionConfig};
