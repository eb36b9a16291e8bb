use super::NodeMatrix;

/// Axis-aligned bounding box of a control-point table.
///
/// A Bezier curve lies within the convex hull of its control points, so the
/// box spanned by the nodes is a safe (if not tight) enclosure of the curve
/// itself.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    min: Vec<f64>,
    max: Vec<f64>,
}

impl BoundingBox {
    /// Computes the per-coordinate min/max over all control points.
    #[must_use]
    pub fn from_nodes(nodes: &NodeMatrix) -> Self {
        let dimension = nodes.ncols();
        let mut min = vec![f64::INFINITY; dimension];
        let mut max = vec![f64::NEG_INFINITY; dimension];
        for row in nodes.row_iter() {
            for (j, &value) in row.iter().enumerate() {
                if value < min[j] {
                    min[j] = value;
                }
                if value > max[j] {
                    max[j] = value;
                }
            }
        }
        Self { min, max }
    }

    /// Exact closed-interval overlap test in every dimension.
    ///
    /// Boxes that merely touch count as overlapping: a shared boundary can
    /// still hold a real intersection, and false positives are resolved
    /// later when the corrector fails to converge.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min
            .iter()
            .zip(&self.max)
            .zip(other.min.iter().zip(&other.max))
            .all(|((a_min, a_max), (b_min, b_max))| a_min <= b_max && b_min <= a_max)
    }

    /// Minimum corner of the box.
    #[must_use]
    pub fn min(&self) -> &[f64] {
        &self.min
    }

    /// Maximum corner of the box.
    #[must_use]
    pub fn max(&self) -> &[f64] {
        &self.max
    }
}
