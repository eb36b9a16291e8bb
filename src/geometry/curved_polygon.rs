use std::fmt;

use crate::error::{GeometryError, Result, TopologyError};

use super::Curve;

/// A planar region bounded by a piecewise chain of Bezier curves.
///
/// Edge direction matters: every edge must begin exactly where the previous
/// one ended, and the last edge must wrap around to the first. Endpoints
/// are compared by exact floating-point equality, and the invariant is
/// checked once at construction, never again.
#[derive(Debug, Clone)]
pub struct CurvedPolygon {
    edges: Vec<Curve>,
}

impl CurvedPolygon {
    /// Creates a curved polygon from its ordered boundary edges.
    ///
    /// # Errors
    ///
    /// Returns [`TopologyError::TooFewSides`] for fewer than two edges,
    /// [`GeometryError::DimensionMismatch`] if any edge is not planar, or
    /// [`TopologyError::EndpointMismatch`] if consecutive edges (including
    /// the closing pair) do not share an exact endpoint.
    pub fn new(edges: Vec<Curve>) -> Result<Self> {
        if edges.len() < 2 {
            return Err(TopologyError::TooFewSides(edges.len()).into());
        }
        for edge in &edges {
            if edge.dimension() != 2 {
                return Err(GeometryError::DimensionMismatch {
                    expected: 2,
                    actual: edge.dimension(),
                }
                .into());
            }
        }
        for (index, edge) in edges.iter().enumerate() {
            let next = &edges[(index + 1) % edges.len()];
            if edge.last_node() != next.first_node() {
                return Err(TopologyError::EndpointMismatch { index }.into());
            }
        }
        Ok(Self { edges })
    }

    /// Returns the number of sides of the polygon.
    #[must_use]
    pub fn num_sides(&self) -> usize {
        self.edges.len()
    }

    /// Returns the boundary edges in order.
    #[must_use]
    pub fn edges(&self) -> &[Curve] {
        &self.edges
    }
}

impl fmt::Display for CurvedPolygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<CurvedPolygon (num_sides={})>", self.num_sides())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::error::{BezixError, GeometryError, TopologyError};
    use crate::math::NodeMatrix;

    use super::*;

    fn curve(rows: usize, values: &[f64]) -> Curve {
        Curve::new(NodeMatrix::from_row_slice(rows, 2, values)).unwrap()
    }

    fn unit_square_edges() -> Vec<Curve> {
        vec![
            curve(3, &[0.0, 0.0, 0.5, -1.0, 1.0, 0.0]),
            curve(2, &[1.0, 0.0, 1.0, 1.0]),
            curve(3, &[1.0, 1.0, 0.5, 2.0, 0.0, 1.0]),
            curve(2, &[0.0, 1.0, 0.0, 0.0]),
        ]
    }

    #[test]
    fn chained_edges_construct() {
        let polygon = CurvedPolygon::new(unit_square_edges()).unwrap();
        assert_eq!(polygon.num_sides(), 4);
        assert_eq!(polygon.edges().len(), 4);
    }

    #[test]
    fn display_reports_side_count() {
        let polygon = CurvedPolygon::new(unit_square_edges()).unwrap();
        assert_eq!(polygon.to_string(), "<CurvedPolygon (num_sides=4)>");
    }

    #[test]
    fn single_edge_is_rejected() {
        let edges = vec![curve(2, &[0.0, 0.0, 1.0, 0.0])];
        assert!(matches!(
            CurvedPolygon::new(edges),
            Err(BezixError::Topology(TopologyError::TooFewSides(1)))
        ));
    }

    #[test]
    fn mismatched_junction_is_rejected() {
        let mut edges = unit_square_edges();
        // Break the wrap-around junction: the last edge no longer ends at
        // the first edge's start.
        edges[3] = curve(2, &[0.0, 1.0, 0.5, 0.0]);
        assert!(matches!(
            CurvedPolygon::new(edges),
            Err(BezixError::Topology(TopologyError::EndpointMismatch {
                index: 3
            }))
        ));
    }

    #[test]
    fn non_planar_edge_is_rejected() {
        let flat = curve(2, &[0.0, 0.0, 1.0, 0.0]);
        let spatial = Curve::new(NodeMatrix::from_row_slice(
            2,
            3,
            &[1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        ))
        .unwrap();
        assert!(matches!(
            CurvedPolygon::new(vec![flat, spatial]),
            Err(BezixError::Geometry(GeometryError::DimensionMismatch {
                expected: 2,
                actual: 3,
            }))
        ));
    }
}
