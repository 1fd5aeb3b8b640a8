//! # Edge
//!
//! Line segment with undirected equality and XZ-plane intersection.

use super::polygon::{cross_xz, points_approx_eq, signed_distance};
use config::TolerancePolicy;
use glam::DVec3;

/// A line segment between two points.
///
/// Equality is undirected: `Edge::new(a, b) == Edge::new(b, a)`.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    /// First endpoint.
    pub a: DVec3,
    /// Second endpoint.
    pub b: DVec3,
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        (self.a == other.a && self.b == other.b) || (self.a == other.b && self.b == other.a)
    }
}

impl Edge {
    /// Creates an edge from two endpoints.
    #[inline]
    pub fn new(a: DVec3, b: DVec3) -> Self {
        Self { a, b }
    }

    /// Length in 3D.
    #[inline]
    pub fn length(&self) -> f64 {
        self.a.distance(self.b)
    }

    /// Midpoint of the segment.
    #[inline]
    pub fn midpoint(&self) -> DVec3 {
        (self.a + self.b) * 0.5
    }

    /// Same segment with endpoints swapped.
    #[inline]
    pub fn reversed(&self) -> Edge {
        Edge::new(self.b, self.a)
    }

    /// Tolerant undirected equality.
    pub fn approx_eq(&self, other: &Edge, epsilon: f64) -> bool {
        (points_approx_eq(self.a, other.a, epsilon) && points_approx_eq(self.b, other.b, epsilon))
            || (points_approx_eq(self.a, other.b, epsilon)
                && points_approx_eq(self.b, other.a, epsilon))
    }

    /// Returns true if either endpoint tolerantly equals `point`.
    pub fn has_endpoint(&self, point: DVec3, epsilon: f64) -> bool {
        points_approx_eq(self.a, point, epsilon) || points_approx_eq(self.b, point, epsilon)
    }

    /// Returns true if the two edges have an endpoint in common (exact).
    #[inline]
    pub fn shares_endpoint(&self, other: &Edge) -> bool {
        self.a == other.a || self.a == other.b || self.b == other.a || self.b == other.b
    }

    /// Projection parameter of `point` along the segment in XZ.
    ///
    /// 0.0 at `a`, 1.0 at `b`.
    pub fn param_of(&self, point: DVec3) -> f64 {
        let dir = self.b - self.a;
        let len_sq = dir.x * dir.x + dir.z * dir.z;
        if len_sq == 0.0 {
            return 0.0;
        }
        ((point.x - self.a.x) * dir.x + (point.z - self.a.z) * dir.z) / len_sq
    }

    /// Point at parameter `t`, with Y interpolated along the segment.
    #[inline]
    pub fn point_at(&self, t: f64) -> DVec3 {
        self.a.lerp(self.b, t)
    }

    /// Returns true if `point` lies on the segment within `tol.on_edge`.
    pub fn touches(&self, point: DVec3, tol: &TolerancePolicy) -> bool {
        if signed_distance(self, point).abs() > tol.on_edge {
            return false;
        }
        let t = self.param_of(point);
        let slack = tol.on_edge / self.length().max(f64::MIN_POSITIVE);
        (-slack..=1.0 + slack).contains(&t)
    }

    /// Axis-aligned XZ bounds as `(min_x, min_z, max_x, max_z)`.
    #[inline]
    pub fn bounds_xz(&self) -> (f64, f64, f64, f64) {
        (
            self.a.x.min(self.b.x),
            self.a.z.min(self.b.z),
            self.a.x.max(self.b.x),
            self.a.z.max(self.b.z),
        )
    }

    /// Intersects two segments in the XZ plane.
    ///
    /// Uses the parametric cross-product method. Returns `None` when the
    /// segments are parallel, when the hit falls outside either segment, or,
    /// with `include_endpoints == false`, when the hit coincides with any of
    /// the four endpoints. The returned point lies on `self`; its Y is
    /// interpolated along `self`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use liquid_mesh::geometry::Edge;
    /// use config::TolerancePolicy;
    /// use glam::DVec3;
    ///
    /// let tol = TolerancePolicy::default();
    /// let a = Edge::new(DVec3::new(0.0, 0.0, 0.0), DVec3::new(2.0, 0.0, 2.0));
    /// let b = Edge::new(DVec3::new(0.0, 0.0, 2.0), DVec3::new(2.0, 0.0, 0.0));
    /// let hit = a.intersect(&b, false, &tol).unwrap();
    /// assert!((hit.x - 1.0).abs() < 1e-12 && (hit.z - 1.0).abs() < 1e-12);
    /// ```
    pub fn intersect(
        &self,
        other: &Edge,
        include_endpoints: bool,
        tol: &TolerancePolicy,
    ) -> Option<DVec3> {
        let r = self.b - self.a;
        let s = other.b - other.a;
        let denom = cross_xz(r, s);

        let scale = (r.x * r.x + r.z * r.z).sqrt() * (s.x * s.x + s.z * s.z).sqrt();
        if scale == 0.0 || (denom / scale).abs() < tol.parallel {
            return None;
        }

        let qp = other.a - self.a;
        let t = cross_xz(qp, s) / denom;
        let u = cross_xz(qp, r) / denom;
        if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
            return None;
        }

        let hit = self.point_at(t);
        if !include_endpoints
            && (self.has_endpoint(hit, tol.point_merge) || other.has_endpoint(hit, tol.point_merge))
        {
            return None;
        }

        Some(hit)
    }

    /// Splits the segment at the given points.
    ///
    /// Points are ordered along the segment; points within `epsilon` of an
    /// earlier cut are ignored. Endpoints are always kept, so the pieces
    /// cover the whole segment.
    pub fn split_at(&self, points: &[DVec3], epsilon: f64) -> Vec<Edge> {
        let mut cuts: Vec<(f64, DVec3)> = points
            .iter()
            .map(|p| (self.param_of(*p), *p))
            .filter(|(t, _)| *t > 0.0 && *t < 1.0)
            .collect();
        cuts.sort_by(|l, r| l.0.total_cmp(&r.0));

        let mut pieces = Vec::with_capacity(cuts.len() + 1);
        let mut start = self.a;
        for (_, p) in cuts {
            if points_approx_eq(start, p, epsilon) || points_approx_eq(self.b, p, epsilon) {
                continue;
            }
            pieces.push(Edge::new(start, p));
            start = p;
        }
        if !points_approx_eq(start, self.b, epsilon) || pieces.is_empty() {
            pieces.push(Edge::new(start, self.b));
        }
        pieces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, z: f64) -> DVec3 {
        DVec3::new(x, 0.0, z)
    }

    #[test]
    fn test_edge_equality_is_undirected() {
        let e = Edge::new(p(0.0, 0.0), p(1.0, 2.0));
        assert_eq!(e, e.reversed());
        assert_ne!(e, Edge::new(p(0.0, 0.0), p(1.0, 2.5)));
    }

    #[test]
    fn test_intersect_parallel() {
        let tol = TolerancePolicy::default();
        let a = Edge::new(p(0.0, 0.0), p(1.0, 0.0));
        let b = Edge::new(p(0.0, 1.0), p(1.0, 1.0));
        assert!(a.intersect(&b, true, &tol).is_none());
    }

    #[test]
    fn test_intersect_out_of_range() {
        let tol = TolerancePolicy::default();
        let a = Edge::new(p(0.0, 0.0), p(1.0, 0.0));
        let b = Edge::new(p(2.0, -1.0), p(2.0, 1.0));
        assert!(a.intersect(&b, true, &tol).is_none());
    }

    #[test]
    fn test_intersect_shared_endpoint_suppressed() {
        let tol = TolerancePolicy::default();
        let a = Edge::new(p(0.0, 0.0), p(1.0, 0.0));
        let b = Edge::new(p(1.0, 0.0), p(1.0, 1.0));
        assert!(a.intersect(&b, false, &tol).is_none());
        let hit = a.intersect(&b, true, &tol).unwrap();
        assert!(points_approx_eq(hit, p(1.0, 0.0), 1e-12));
    }

    #[test]
    fn test_shares_endpoint_is_exact() {
        let a = Edge::new(p(0.0, 0.0), p(1.0, 0.0));
        assert!(a.shares_endpoint(&Edge::new(p(1.0, 1.0), p(1.0, 0.0))));
        assert!(!a.shares_endpoint(&Edge::new(p(1.0, 1.0), p(1.0005, 0.0))));
    }

    #[test]
    fn test_intersect_interpolates_height_of_self() {
        let tol = TolerancePolicy::default();
        let a = Edge::new(DVec3::new(0.0, 0.0, 0.0), DVec3::new(2.0, 4.0, 0.0));
        let b = Edge::new(DVec3::new(1.0, 9.0, -1.0), DVec3::new(1.0, 9.0, 1.0));
        let hit = a.intersect(&b, false, &tol).unwrap();
        assert!((hit.y - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_split_at_orders_cuts() {
        let e = Edge::new(p(0.0, 0.0), p(4.0, 0.0));
        let pieces = e.split_at(&[p(3.0, 0.0), p(1.0, 0.0), p(1.0, 0.0)], 1e-6);
        assert_eq!(pieces.len(), 3);
        assert_eq!(pieces[0], Edge::new(p(0.0, 0.0), p(1.0, 0.0)));
        assert_eq!(pieces[2], Edge::new(p(3.0, 0.0), p(4.0, 0.0)));
    }

    #[test]
    fn test_split_at_ignores_endpoints() {
        let e = Edge::new(p(0.0, 0.0), p(1.0, 0.0));
        let pieces = e.split_at(&[p(0.0, 0.0), p(1.0, 0.0)], 1e-6);
        assert_eq!(pieces, vec![e]);
    }

    #[test]
    fn test_touches() {
        let tol = TolerancePolicy::default();
        let e = Edge::new(p(0.0, 0.0), p(1.0, 0.0));
        assert!(e.touches(p(0.5, 0.0), &tol));
        assert!(e.touches(p(1.0, 0.0), &tol));
        assert!(!e.touches(p(1.5, 0.0), &tol));
        assert!(!e.touches(p(0.5, 0.1), &tol));
    }
}
