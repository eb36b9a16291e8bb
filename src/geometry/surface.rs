use std::fmt;

use crate::error::{GeometryError, Result};
use crate::math::{AmbientPoint, NodeMatrix};

/// A Bezier triangle: a mapping from the unit simplex in barycentric
/// coordinates onto a surface in ambient space.
///
/// Nodes are ordered over the triangular index lattice left-to-right,
/// bottom-to-top: for degree 2 the rows are
/// `v200, v110, v020, v101, v011, v002`.
#[derive(Debug, Clone)]
pub struct Surface {
    nodes: NodeMatrix,
    degree: usize,
    dimension: usize,
    area: Option<f64>,
}

impl Surface {
    /// Creates a surface from a control-point table (one row per control
    /// point, one column per ambient coordinate).
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidShape`] if the node count is not a
    /// triangular number or the ambient dimension is zero.
    pub fn new(nodes: NodeMatrix) -> Result<Self> {
        let degree = Self::degree_from_node_count(nodes.nrows())?;
        if nodes.ncols() == 0 {
            return Err(
                GeometryError::InvalidShape("ambient dimension must be at least 1".into()).into(),
            );
        }
        let dimension = nodes.ncols();
        Ok(Self {
            nodes,
            degree,
            dimension,
            area: None,
        })
    }

    /// Solves `(d + 1)(d + 2) / 2 = num_nodes` for the degree `d`.
    ///
    /// Uses the closed-form inverse `d = (sqrt(8n + 1) - 3) / 2`, rounds to
    /// the nearest integer, then re-verifies the triangular-number identity
    /// exactly so floating-point drift cannot accept a wrong degree.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidShape`] if `num_nodes` is not a
    /// triangular number.
    pub fn degree_from_node_count(num_nodes: usize) -> Result<usize> {
        if num_nodes == 0 {
            return Err(GeometryError::InvalidShape(
                "a surface requires at least 1 control point".into(),
            )
            .into());
        }
        #[allow(clippy::cast_precision_loss)]
        let approximate = 0.5 * ((8.0 * num_nodes as f64 + 1.0).sqrt() - 3.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let degree = approximate.round().max(0.0) as usize;
        if (degree + 1) * (degree + 2) == 2 * num_nodes {
            Ok(degree)
        } else {
            Err(
                GeometryError::InvalidShape(format!("{num_nodes} is not a triangular number"))
                    .into(),
            )
        }
    }

    /// Returns the control-point table.
    #[must_use]
    pub fn nodes(&self) -> &NodeMatrix {
        &self.nodes
    }

    /// Returns the polynomial degree inferred from the node count.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Returns the dimension of the ambient space.
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Evaluates the surface at barycentric coordinates
    /// `(lambda1, lambda2, lambda3)` via the triangular de Casteljau scheme.
    ///
    /// Each round blends the three lattice neighbours of every sub-triangle;
    /// after `degree` rounds a single point remains. Coordinates of points
    /// on the unit simplex are non-negative and sum to 1.
    #[must_use]
    pub fn evaluate(&self, lambda1: f64, lambda2: f64, lambda3: f64) -> AmbientPoint {
        let mut work: Vec<AmbientPoint> = self
            .nodes
            .row_iter()
            .map(|row| row.clone_owned())
            .collect();
        let mut degree = self.degree;
        while degree > 0 {
            let next_degree = degree - 1;
            let mut next = Vec::with_capacity((next_degree + 1) * (next_degree + 2) / 2);
            for k in 0..=next_degree {
                for j in 0..=(next_degree - k) {
                    let a = &work[lattice_index(degree, k, j)];
                    let b = &work[lattice_index(degree, k, j + 1)];
                    let c = &work[lattice_index(degree, k + 1, j)];
                    next.push(a * lambda1 + b * lambda2 + c * lambda3);
                }
            }
            work = next;
            degree = next_degree;
        }
        work.swap_remove(0)
    }

    /// The area of the surface.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::NotImplemented`] if no value has been
    /// cached: the computation itself is not available yet, which is
    /// distinct from a zero area or a bad input.
    pub fn area(&self) -> Result<f64> {
        self.area
            .ok_or_else(|| GeometryError::NotImplemented("surface area").into())
    }

    /// Caches an externally computed area value, after which [`Self::area`]
    /// returns it.
    pub fn set_area(&mut self, area: f64) {
        self.area = Some(area);
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Surface (degree={}, dimension={})>",
            self.degree, self.dimension
        )
    }
}

/// Row-major index of lattice node `(k, j)` in a degree `degree` triangle,
/// where `k` counts rows from the bottom and `j` positions within a row.
fn lattice_index(degree: usize, k: usize, j: usize) -> usize {
    k * (degree + 1) - (k * k - k) / 2 + j
}
