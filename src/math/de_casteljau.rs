use super::{AmbientPoint, NodeMatrix};

/// Evaluates a Bezier curve at parameter `u` via de Casteljau's algorithm.
///
/// `nodes` holds one control point per row. Each round replaces every
/// adjacent pair of points with the affine blend `(1 - u) * P_i + u * P_{i+1}`;
/// after `degree` rounds exactly one point remains. At `u = 0` and `u = 1`
/// this reduces to the first and last control point exactly.
///
/// Numerically stable for `u` in `[0, 1]`; values outside that range
/// extrapolate the polynomial.
#[must_use]
pub fn evaluate(nodes: &NodeMatrix, u: f64) -> AmbientPoint {
    let mut work: Vec<AmbientPoint> = nodes.row_iter().map(|row| row.clone_owned()).collect();
    let mut count = work.len();
    while count > 1 {
        for i in 0..count - 1 {
            let blended = &work[i] * (1.0 - u) + &work[i + 1] * u;
            work[i] = blended;
        }
        count -= 1;
    }
    work.swap_remove(0)
}

/// Subdivides a Bezier curve at `u = 0.5` via the full de Casteljau triangle.
///
/// Returns the control nodes of the two halves covering `[0, 0.5]` and
/// `[0.5, 1]` of the parent parameter interval: the left half's nodes are
/// the left edge of the triangular scheme in order, the right half's the
/// right edge. Exact and degree-preserving.
#[must_use]
pub fn split(nodes: &NodeMatrix) -> (NodeMatrix, NodeMatrix) {
    let rows = nodes.nrows();
    let mut work: Vec<AmbientPoint> = nodes.row_iter().map(|row| row.clone_owned()).collect();
    let mut left: Vec<AmbientPoint> = Vec::with_capacity(rows);
    let mut right: Vec<AmbientPoint> = Vec::with_capacity(rows);

    left.push(work[0].clone());
    right.push(work[rows - 1].clone());
    let mut count = rows;
    while count > 1 {
        for i in 0..count - 1 {
            let blended = (&work[i] + &work[i + 1]) * 0.5;
            work[i] = blended;
        }
        count -= 1;
        left.push(work[0].clone());
        right.push(work[count - 1].clone());
    }
    right.reverse();
    (NodeMatrix::from_rows(&left), NodeMatrix::from_rows(&right))
}

/// Control nodes of the first derivative (hodograph) of a Bezier curve.
///
/// For a degree `d` curve with nodes `P_i`, the derivative is the degree
/// `d - 1` curve with nodes `d * (P_{i+1} - P_i)`.
#[must_use]
pub fn derivative_nodes(nodes: &NodeMatrix) -> NodeMatrix {
    let degree = nodes.nrows() - 1;
    #[allow(clippy::cast_precision_loss)]
    let scale = degree as f64;
    let rows: Vec<AmbientPoint> = (0..degree)
        .map(|i| (nodes.row(i + 1) - nodes.row(i)) * scale)
        .collect();
    NodeMatrix::from_rows(&rows)
}
