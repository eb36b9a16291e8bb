mod curve;
mod curved_polygon;
mod surface;

pub use curve::Curve;
pub use curved_polygon::CurvedPolygon;
pub use surface::Surface;
