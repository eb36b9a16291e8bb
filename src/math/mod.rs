pub mod bbox;
pub mod de_casteljau;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 2x2 matrix type.
pub type Matrix2 = nalgebra::Matrix2<f64>;

/// Control-point table: one row per control point, one column per ambient
/// coordinate.
pub type NodeMatrix = nalgebra::DMatrix<f64>;

/// A single point in ambient space, stored as a row.
pub type AmbientPoint = nalgebra::RowDVector<f64>;
