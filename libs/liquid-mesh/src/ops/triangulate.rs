//! # Greedy Triangulation
//!
//! Closes an unordered set of outline points into triangles, one candidate
//! at a time. Used by the infill pass, the boundary closure and all three
//! clipping cases.
//!
//! ## Algorithm
//!
//! ```text
//! for a in points:
//!     for b in points, nearest to a first:
//!         m = midpoint(a, b)
//!         for c in points, nearest to m first:
//!             accept (a, b, c) unless rejected
//! ```
//!
//! A candidate is rejected when it duplicates an accepted face, is
//! degenerate, fails the caller's filter, meets an occupied edge anywhere but
//! at a shared endpoint, holds another outline point (edges included), or
//! when its shrunk copy still touches an occupied edge. Accepting a face
//! occupies its three edges. Rejections never become acceptances later, so
//! one pass over the enumeration is enough.
//!
//! Neighbour lists are stable-sorted by distance and may be truncated to
//! `candidate_limit`; the order of the kept candidates never changes, which
//! keeps the output stable.

use crate::geometry::{points_approx_eq, Edge, Face};
use config::TolerancePolicy;
use glam::DVec3;

/// Centroid filter supplied by the caller.
pub type FaceFilter<'a> = &'a dyn Fn(&Face) -> bool;

/// Greedy nearest-first triangulator.
///
/// # Example
///
/// ```rust
/// use liquid_mesh::ops::Triangulator;
/// use liquid_mesh::geometry::Edge;
/// use config::TolerancePolicy;
/// use glam::DVec3;
///
/// let corners = [
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(0.0, 0.0, 1.0),
///     DVec3::new(1.0, 0.0, 1.0),
///     DVec3::new(1.0, 0.0, 0.0),
/// ];
/// let mut tri = Triangulator::new(TolerancePolicy::default());
/// for i in 0..4 {
///     tri.add_edge(Edge::new(corners[i], corners[(i + 1) % 4]));
/// }
/// tri.fill_nearest();
/// assert_eq!(tri.faces().len(), 2);
/// ```
pub struct Triangulator<'a> {
    points: Vec<DVec3>,
    occupied: Vec<Edge>,
    faces: Vec<Face>,
    tol: TolerancePolicy,
    candidate_limit: Option<usize>,
    filter: Option<FaceFilter<'a>>,
}

impl<'a> Triangulator<'a> {
    /// Creates an empty triangulator.
    pub fn new(tol: TolerancePolicy) -> Self {
        Self {
            points: Vec::new(),
            occupied: Vec::new(),
            faces: Vec::new(),
            tol,
            candidate_limit: None,
            filter: None,
        }
    }

    /// Caps the neighbours examined per point.
    pub fn with_candidate_limit(mut self, limit: Option<usize>) -> Self {
        self.candidate_limit = limit;
        self
    }

    /// Only accepts faces for which `filter` returns true.
    pub fn with_filter(mut self, filter: FaceFilter<'a>) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Adds an outline point, merging it into an existing one when close.
    ///
    /// Returns the stored point.
    pub fn add_point(&mut self, point: DVec3) -> DVec3 {
        let merge = self.tol.point_merge;
        if let Some(existing) = self
            .points
            .iter()
            .find(|p| points_approx_eq(**p, point, merge))
        {
            return *existing;
        }
        self.points.push(point);
        point
    }

    /// Adds a seed edge and its endpoints.
    ///
    /// Zero-length edges are ignored.
    pub fn add_edge(&mut self, edge: Edge) {
        let a = self.add_point(edge.a);
        let b = self.add_point(edge.b);
        if a == b {
            return;
        }
        let edge = Edge::new(a, b);
        if !self.occupied.contains(&edge) {
            self.occupied.push(edge);
        }
    }

    /// Outline points in insertion order.
    #[inline]
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Accepted faces in acceptance order.
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Consumes the triangulator, returning the accepted faces.
    pub fn into_faces(self) -> Vec<Face> {
        self.faces
    }

    /// Tests one candidate and accepts it if no rule rejects it.
    ///
    /// Accepted faces are stored facing up.
    pub fn try_candidate(&mut self, candidate: Face) -> bool {
        if !self.accepts(&candidate) {
            return false;
        }
        for edge in candidate.edges() {
            if !self.occupied.contains(&edge) {
                self.occupied.push(edge);
            }
        }
        self.faces.push(candidate.facing_up());
        true
    }

    /// Runs the nearest-first enumeration over every point.
    pub fn fill_nearest(&mut self) {
        let n = self.points.len();
        if n < 3 {
            return;
        }

        for ai in 0..n {
            let a = self.points[ai];
            let near_a = self.nearest(a, &[ai]);
            for bi in near_a {
                let b = self.points[bi];
                let m = (a + b) * 0.5;
                for ci in self.nearest(m, &[ai, bi]) {
                    self.try_candidate(Face::new(a, b, self.points[ci]));
                }
            }
        }
    }

    /// Point indices ordered by distance to `target`, stable on ties.
    fn nearest(&self, target: DVec3, skip: &[usize]) -> Vec<usize> {
        let mut order: Vec<(f64, usize)> = self
            .points
            .iter()
            .enumerate()
            .filter(|(i, _)| !skip.contains(i))
            .map(|(i, p)| (p.distance_squared(target), i))
            .collect();
        order.sort_by(|l, r| l.0.total_cmp(&r.0));
        if let Some(limit) = self.candidate_limit {
            order.truncate(limit);
        }
        order.into_iter().map(|(_, i)| i).collect()
    }

    fn accepts(&self, candidate: &Face) -> bool {
        let tol = &self.tol;
        if candidate.is_degenerate(tol) {
            return false;
        }
        if self.faces.iter().any(|f| f.approx_eq(candidate, tol.point_merge)) {
            return false;
        }
        if let Some(filter) = self.filter {
            if !filter(candidate) {
                return false;
            }
        }
        if self.crosses_occupied(&candidate.edges(), false) {
            return false;
        }
        if self.holds_other_point(candidate) {
            return false;
        }
        !self.crosses_occupied(&candidate.shrunk(tol.shrink_factor).edges(), true)
    }

    /// With `include_endpoints == false`, only a meeting at an endpoint both
    /// edges share is ignored; points are welded on insertion, so shared
    /// endpoints compare exactly.
    fn crosses_occupied(&self, edges: &[Edge; 3], include_endpoints: bool) -> bool {
        edges.iter().any(|edge| {
            let (min_x, min_z, max_x, max_z) = edge.bounds_xz();
            self.occupied.iter().any(|other| {
                let (o_min_x, o_min_z, o_max_x, o_max_z) = other.bounds_xz();
                let overlaps = min_x <= o_max_x
                    && o_min_x <= max_x
                    && min_z <= o_max_z
                    && o_min_z <= max_z;
                if !overlaps || (!include_endpoints && edge.shares_endpoint(other)) {
                    return false;
                }
                edge.intersect(other, true, &self.tol).is_some()
            })
        })
    }

    fn holds_other_point(&self, candidate: &Face) -> bool {
        let merge = self.tol.point_merge;
        self.points.iter().any(|p| {
            let own = candidate
                .vertices()
                .iter()
                .any(|v| points_approx_eq(*v, *p, merge));
            !own && candidate.contains(*p, true, &self.tol)
        })
    }
}
