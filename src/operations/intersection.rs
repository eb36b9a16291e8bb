use std::collections::VecDeque;

use crate::error::{GeometryError, Result};
use crate::geometry::Curve;
use crate::math::bbox::BoundingBox;
use crate::math::{de_casteljau, Matrix2, NodeMatrix, Point2, Vector2};

/// A single intersection between two curves.
///
/// Borrows the curves it refers to: `s` parametrizes `left` and `t`
/// parametrizes `right`, with `point = left.evaluate(s)`.
#[derive(Debug, Clone)]
pub struct Intersection<'a> {
    /// Parameter on the left curve.
    pub s: f64,
    /// Parameter on the right curve.
    pub t: f64,
    /// The intersection point in ambient space.
    pub point: Point2,
    /// The left curve.
    pub left: &'a Curve,
    /// The right curve.
    pub right: &'a Curve,
}

/// Tunable thresholds for the intersection search.
#[derive(Debug, Clone)]
pub struct IntersectionConfig {
    /// Minimum parameter-interval width at which subdivision stops and the
    /// Newton corrector takes over.
    pub convergence_threshold: f64,
    /// Maximum parameter distance (max-norm over `(s, t)`) at which two
    /// converged roots count as the same geometric intersection.
    pub dedup_tolerance: f64,
    /// Iteration cap for the Newton corrector.
    pub max_newton_iterations: usize,
    /// Newton step norm below which a candidate counts as converged.
    pub newton_tolerance: f64,
}

impl Default for IntersectionConfig {
    fn default() -> Self {
        let convergence_threshold = 2.0_f64.powi(-20);
        Self {
            convergence_threshold,
            // Scaled to the subdivision cell size rather than machine
            // epsilon: a grazing tangency approached from several branches
            // must still collapse to one reported cluster.
            dedup_tolerance: convergence_threshold * 64.0,
            max_newton_iterations: 20,
            newton_tolerance: 1e-13,
        }
    }
}

/// One side of a candidate pair: a subdivided span of an original curve.
#[derive(Debug, Clone)]
struct Span {
    nodes: NodeMatrix,
    start: f64,
    end: f64,
}

impl Span {
    fn whole(curve: &Curve) -> Self {
        Self {
            nodes: curve.nodes().clone(),
            start: 0.0,
            end: 1.0,
        }
    }

    fn width(&self) -> f64 {
        self.end - self.start
    }

    fn midpoint(&self) -> f64 {
        0.5 * (self.start + self.end)
    }

    fn split(&self) -> (Self, Self) {
        let (left, right) = de_casteljau::split(&self.nodes);
        let mid = self.midpoint();
        (
            Self {
                nodes: left,
                start: self.start,
                end: mid,
            },
            Self {
                nodes: right,
                start: mid,
                end: self.end,
            },
        )
    }
}

/// Finds all intersection points between each pair of curves.
///
/// Bounding-box subdivision prunes the parameter square down to spans
/// narrower than the convergence threshold, a two-variable Newton corrector
/// refines each surviving candidate, and near-identical roots are collapsed
/// into one reported intersection per cluster. Pruned branches and
/// candidates whose corrector fails to converge are dropped silently; both
/// are expected outcomes of the search, not failures.
///
/// Results are deterministic: candidates are processed in queue order and
/// each cluster is reported at its first converged representative.
///
/// # Errors
///
/// Returns [`GeometryError::DimensionMismatch`] if any curve is not planar:
/// the corrector solves a square two-variable system.
pub fn all_intersections<'a>(
    pairs: &[(&'a Curve, &'a Curve)],
    config: &IntersectionConfig,
) -> Result<Vec<Intersection<'a>>> {
    let mut results = Vec::new();
    for &(left, right) in pairs {
        for curve in [left, right] {
            if curve.dimension() != 2 {
                return Err(GeometryError::DimensionMismatch {
                    expected: 2,
                    actual: curve.dimension(),
                }
                .into());
            }
        }
        intersect_pair(left, right, config, &mut results);
    }
    Ok(results)
}

/// Runs the subdivision worklist for one curve pair, appending one
/// intersection per deduplicated root cluster.
fn intersect_pair<'a>(
    left: &'a Curve,
    right: &'a Curve,
    config: &IntersectionConfig,
    results: &mut Vec<Intersection<'a>>,
) {
    let left_hodograph = de_casteljau::derivative_nodes(left.nodes());
    let right_hodograph = de_casteljau::derivative_nodes(right.nodes());

    let mut queue = VecDeque::new();
    queue.push_back((Span::whole(left), Span::whole(right)));
    let mut roots: Vec<(f64, f64)> = Vec::new();

    while let Some((a, b)) = queue.pop_front() {
        let box_a = BoundingBox::from_nodes(&a.nodes);
        let box_b = BoundingBox::from_nodes(&b.nodes);
        if !box_a.overlaps(&box_b) {
            continue;
        }

        let a_converged = a.width() <= config.convergence_threshold;
        let b_converged = b.width() <= config.convergence_threshold;
        if a_converged && b_converged {
            // A corrector that fails here signals a false-positive box
            // overlap; the candidate is dropped, not reported as an error.
            if let Some((s, t)) = refine(
                left.nodes(),
                &left_hodograph,
                right.nodes(),
                &right_hodograph,
                a.midpoint(),
                b.midpoint(),
                config,
            ) {
                let duplicate = roots.iter().any(|&(root_s, root_t)| {
                    (root_s - s).abs() <= config.dedup_tolerance
                        && (root_t - t).abs() <= config.dedup_tolerance
                });
                if !duplicate {
                    roots.push((s, t));
                    let point = left.evaluate(s);
                    results.push(Intersection {
                        s,
                        t,
                        point: Point2::new(point[0], point[1]),
                        left,
                        right,
                    });
                }
            }
        } else if a_converged {
            let (b0, b1) = b.split();
            queue.push_back((a.clone(), b0));
            queue.push_back((a, b1));
        } else if b_converged {
            let (a0, a1) = a.split();
            queue.push_back((a0, b.clone()));
            queue.push_back((a1, b));
        } else {
            let (a0, a1) = a.split();
            let (b0, b1) = b.split();
            queue.push_back((a0.clone(), b0.clone()));
            queue.push_back((a0, b1.clone()));
            queue.push_back((a1.clone(), b0));
            queue.push_back((a1, b1));
        }
    }
}

/// Newton iteration on `F(s, t) = B1(s) - B2(t)` from the interval
/// midpoints. The Jacobian columns are the hodograph evaluations
/// `[B1'(s), -B2'(t)]`; the 2x2 system is solved by LU decomposition.
///
/// Convergence is declared once an applied step is smaller than the Newton
/// tolerance, so the quadratic convergence of the final step leaves the
/// root accurate to a few ULPs. Returns `None` when the iteration stalls,
/// the Jacobian is singular, or the root lies outside the unit parameter
/// square; all of these signal a false-positive box overlap.
#[allow(clippy::similar_names)]
fn refine(
    left_nodes: &NodeMatrix,
    left_hodograph: &NodeMatrix,
    right_nodes: &NodeMatrix,
    right_hodograph: &NodeMatrix,
    s0: f64,
    t0: f64,
    config: &IntersectionConfig,
) -> Option<(f64, f64)> {
    let mut s = s0;
    let mut t = t0;
    for _ in 0..config.max_newton_iterations {
        let p = de_casteljau::evaluate(left_nodes, s);
        let q = de_casteljau::evaluate(right_nodes, t);
        let residual = Vector2::new(p[0] - q[0], p[1] - q[1]);

        let dp = de_casteljau::evaluate(left_hodograph, s);
        let dq = de_casteljau::evaluate(right_hodograph, t);
        let jacobian = Matrix2::new(dp[0], -dq[0], dp[1], -dq[1]);
        let step = jacobian.lu().solve(&residual)?;

        s -= step[0];
        t -= step[1];
        if step.norm() <= config.newton_tolerance {
            let slack = config.convergence_threshold;
            if s < -slack || s > 1.0 + slack || t < -slack || t > 1.0 + slack {
                return None;
            }
            return Some((s.clamp(0.0, 1.0), t.clamp(0.0, 1.0)));
        }
    }
    None
}
