//! # Planar Predicates
//!
//! Cross products, distances and the convex same-side containment test,
//! all projected onto the XZ plane.

use super::edge::Edge;
use config::TolerancePolicy;
use glam::DVec3;

/// 2D cross product of two vectors projected onto XZ.
#[inline]
pub fn cross_xz(a: DVec3, b: DVec3) -> f64 {
    a.x * b.z - a.z * b.x
}

/// Distance between two points projected onto XZ.
#[inline]
pub fn distance_xz(a: DVec3, b: DVec3) -> f64 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

/// Tolerant point equality.
#[inline]
pub fn points_approx_eq(a: DVec3, b: DVec3, epsilon: f64) -> bool {
    a.distance(b) < epsilon
}

/// Hashable key of a point's exact coordinates.
///
/// `-0.0` and `0.0` map to the same key.
#[inline]
pub fn point_key(p: DVec3) -> [u64; 3] {
    [
        (p.x + 0.0).to_bits(),
        (p.y + 0.0).to_bits(),
        (p.z + 0.0).to_bits(),
    ]
}

/// Signed perpendicular distance of `point` from the line through `edge`.
///
/// Returns 0.0 for zero-length edges.
#[inline]
pub fn signed_distance(edge: &Edge, point: DVec3) -> f64 {
    let dir = edge.b - edge.a;
    let len = (dir.x * dir.x + dir.z * dir.z).sqrt();
    if len == 0.0 {
        return 0.0;
    }
    cross_xz(dir, point - edge.a) / len
}

/// Convex-polygon same-side test.
///
/// Walks `edges` in order and requires `point` to lie on the same side of
/// each edge as the far endpoint of the following edge. A point within
/// `tol.on_edge` of an edge line counts as inside only when
/// `edge_inclusive` is set.
///
/// # Arguments
///
/// * `point` - Point to classify (Y ignored)
/// * `edges` - Closed outline of a convex polygon, in order
/// * `edge_inclusive` - Whether boundary points are inside
/// * `tol` - Tolerance policy (`on_edge` is used)
///
/// # Example
///
/// ```rust
/// use liquid_mesh::geometry::{inside_polygon, Edge};
/// use config::TolerancePolicy;
/// use glam::DVec3;
///
/// let a = DVec3::new(0.0, 0.0, 0.0);
/// let b = DVec3::new(1.0, 0.0, 0.0);
/// let c = DVec3::new(0.0, 0.0, 1.0);
/// let edges = [Edge::new(a, b), Edge::new(b, c), Edge::new(c, a)];
/// let tol = TolerancePolicy::default();
///
/// assert!(inside_polygon(DVec3::new(0.2, 0.0, 0.2), &edges, false, &tol));
/// assert!(inside_polygon(DVec3::new(0.5, 0.0, 0.0), &edges, true, &tol));
/// assert!(!inside_polygon(DVec3::new(0.5, 0.0, 0.0), &edges, false, &tol));
/// ```
pub fn inside_polygon(
    point: DVec3,
    edges: &[Edge],
    edge_inclusive: bool,
    tol: &TolerancePolicy,
) -> bool {
    let n = edges.len();
    if n < 3 {
        return false;
    }

    for (i, edge) in edges.iter().enumerate() {
        let next = &edges[(i + 1) % n];
        let side = signed_distance(edge, point);
        if side.abs() <= tol.on_edge {
            if !edge_inclusive {
                return false;
            }
            continue;
        }

        let reference = signed_distance(edge, next.b);
        if reference.abs() <= tol.on_edge {
            // Collinear successor: this edge cannot orient the test.
            continue;
        }
        if side.signum() != reference.signum() {
            return false;
        }
    }

    true
}
