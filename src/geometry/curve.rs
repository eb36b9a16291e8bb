use std::sync::OnceLock;

use crate::error::{GeometryError, Result};
use crate::math::{de_casteljau, AmbientPoint, NodeMatrix};

/// A Bezier curve defined by its control points.
///
/// The curve maps `u` in `[0, 1]` into the ambient space spanned by the
/// node columns. Nodes are immutable after construction; derived data such
/// as the subdivision children is computed lazily and memoized for the
/// lifetime of the object.
#[derive(Debug, Clone)]
pub struct Curve {
    nodes: NodeMatrix,
    degree: usize,
    dimension: usize,
    children: OnceLock<Box<(Curve, Curve)>>,
}

impl Curve {
    /// Creates a curve from a control-point table (one row per control
    /// point, one column per ambient coordinate).
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidShape`] if there are fewer than two
    /// control points or the ambient dimension is zero.
    pub fn new(nodes: NodeMatrix) -> Result<Self> {
        if nodes.nrows() < 2 {
            return Err(GeometryError::InvalidShape(format!(
                "a curve requires at least 2 control points, got {}",
                nodes.nrows()
            ))
            .into());
        }
        if nodes.ncols() == 0 {
            return Err(
                GeometryError::InvalidShape("ambient dimension must be at least 1".into()).into(),
            );
        }
        Ok(Self::from_validated(nodes))
    }

    /// Builds a curve from nodes already known to be well-formed.
    fn from_validated(nodes: NodeMatrix) -> Self {
        let degree = nodes.nrows() - 1;
        let dimension = nodes.ncols();
        Self {
            nodes,
            degree,
            dimension,
            children: OnceLock::new(),
        }
    }

    /// Returns the control-point table.
    #[must_use]
    pub fn nodes(&self) -> &NodeMatrix {
        &self.nodes
    }

    /// Returns the polynomial degree (one less than the node count).
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Returns the dimension of the ambient space.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Returns the first control point, which the curve passes through at
    /// `u = 0`.
    #[must_use]
    pub fn first_node(&self) -> AmbientPoint {
        self.nodes.row(0).clone_owned()
    }

    /// Returns the last control point, which the curve passes through at
    /// `u = 1`.
    #[must_use]
    pub fn last_node(&self) -> AmbientPoint {
        self.nodes.row(self.degree).clone_owned()
    }

    /// Evaluates the curve at parameter `u` via de Casteljau's algorithm.
    ///
    /// Stable for `u` in `[0, 1]`; values outside that range extrapolate
    /// the polynomial.
    #[must_use]
    pub fn evaluate(&self, u: f64) -> AmbientPoint {
        de_casteljau::evaluate(&self.nodes, u)
    }

    /// Returns the two halves of the curve over `[0, 0.5]` and `[0.5, 1]`.
    ///
    /// The children are computed on first call and cached for the lifetime
    /// of the curve, so only branches that survive pruning are ever
    /// materialized.
    #[must_use]
    pub fn subdivide(&self) -> &(Curve, Curve) {
        self.children.get_or_init(|| {
            let (left, right) = de_casteljau::split(&self.nodes);
            Box::new((Self::from_validated(left), Self::from_validated(right)))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use crate::error::{BezixError, GeometryError};

    use super::*;

    fn hat_quadratic() -> Curve {
        Curve::new(NodeMatrix::from_row_slice(
            3,
            2,
            &[0.0, 0.0, 0.5, 1.0, 1.0, 0.0],
        ))
        .unwrap()
    }

    #[test]
    fn construction_derives_degree_and_dimension() {
        let curve = hat_quadratic();
        assert_eq!(curve.degree(), 2);
        assert_eq!(curve.dimension(), 2);
    }

    #[test]
    fn construction_rejects_single_node() {
        let result = Curve::new(NodeMatrix::from_row_slice(1, 2, &[0.0, 0.0]));
        assert!(matches!(
            result,
            Err(BezixError::Geometry(GeometryError::InvalidShape(_)))
        ));
    }

    #[test]
    fn construction_rejects_empty_table() {
        let result = Curve::new(NodeMatrix::zeros(0, 2));
        assert!(matches!(
            result,
            Err(BezixError::Geometry(GeometryError::InvalidShape(_)))
        ));
    }

    #[test]
    fn evaluate_hits_endpoints_exactly() {
        let curve = hat_quadratic();
        assert_eq!(curve.evaluate(0.0), curve.first_node());
        assert_eq!(curve.evaluate(1.0), curve.last_node());
    }

    #[test]
    fn subdivide_halves_cover_parent() {
        let curve = hat_quadratic();
        let (left, right) = curve.subdivide();
        assert_eq!(left.degree(), 2);
        assert_eq!(right.degree(), 2);
        assert_eq!(left.first_node(), curve.first_node());
        assert_eq!(right.last_node(), curve.last_node());
        assert_eq!(left.last_node(), right.first_node());

        let parent = curve.evaluate(0.25);
        let child = left.evaluate(0.5);
        assert_relative_eq!(parent[0], child[0], epsilon = 1e-15);
        assert_relative_eq!(parent[1], child[1], epsilon = 1e-15);
    }

    #[test]
    fn subdivide_is_memoized() {
        let curve = hat_quadratic();
        let first = curve.subdivide();
        let second = curve.subdivide();
        assert!(std::ptr::eq(first, second));
    }
}
