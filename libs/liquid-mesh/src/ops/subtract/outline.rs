//! # Clip Outline
//!
//! The open polygon assembled while clipping one face against one region,
//! plus the helpers shared by the clipping cases.

use super::ClipContext;
use crate::cutout::Region;
use crate::geometry::{points_approx_eq, Edge, Face};
use crate::ops::triangulate::{FaceFilter, Triangulator};
use config::TolerancePolicy;
use glam::DVec3;

/// Tolerantly merged points and undirected edges.
#[derive(Debug, Clone)]
pub(crate) struct Outline {
    points: Vec<DVec3>,
    edges: Vec<Edge>,
    merge: f64,
}

impl Outline {
    pub(crate) fn new(tol: &TolerancePolicy) -> Self {
        Self {
            points: Vec::new(),
            edges: Vec::new(),
            merge: tol.point_merge,
        }
    }

    /// Adds a point, returning the stored copy it was welded to.
    pub(crate) fn add_point(&mut self, point: DVec3) -> DVec3 {
        if let Some(existing) = self
            .points
            .iter()
            .find(|p| points_approx_eq(**p, point, self.merge))
        {
            return *existing;
        }
        self.points.push(point);
        point
    }

    /// Adds an edge with welded endpoints; zero-length and repeated edges
    /// are ignored.
    pub(crate) fn add_edge(&mut self, edge: Edge) {
        let a = self.add_point(edge.a);
        let b = self.add_point(edge.b);
        if a == b {
            return;
        }
        let edge = Edge::new(a, b);
        if !self.edges.contains(&edge) {
            self.edges.push(edge);
        }
    }

    fn degree(&self, point: DVec3) -> usize {
        self.edges
            .iter()
            .filter(|e| e.a == point || e.b == point)
            .count()
    }

    /// Points used by exactly one edge.
    pub(crate) fn open_points(&self) -> Vec<DVec3> {
        self.points
            .iter()
            .copied()
            .filter(|p| self.degree(*p) == 1)
            .collect()
    }

    /// Pairs every open point with its nearest unpaired open point whose
    /// connection does not run through the region interior.
    ///
    /// Points without such a partner stay open.
    pub(crate) fn reseal(&mut self, region: &dyn Region, tol: &TolerancePolicy) {
        let open = self.open_points();
        let mut paired = vec![false; open.len()];

        for i in 0..open.len() {
            if paired[i] {
                continue;
            }
            let partner = (0..open.len())
                .filter(|&j| j != i && !paired[j])
                .filter(|&j| !region.inside((open[i] + open[j]) * 0.5, false, tol))
                .min_by(|&l, &r| {
                    open[i]
                        .distance_squared(open[l])
                        .total_cmp(&open[i].distance_squared(open[r]))
                });

            match partner {
                Some(j) => {
                    paired[i] = true;
                    paired[j] = true;
                    self.add_edge(Edge::new(open[i], open[j]));
                }
                None => log::debug!("outline left open at {}", open[i]),
            }
        }
    }

    /// Seeds a triangulator with every point and edge of the outline.
    pub(crate) fn triangulator<'f>(
        &self,
        ctx: &ClipContext,
        filter: FaceFilter<'f>,
    ) -> Triangulator<'f> {
        let mut tri = Triangulator::new(ctx.tol)
            .with_candidate_limit(ctx.candidate_limit)
            .with_filter(filter);
        for edge in &self.edges {
            tri.add_edge(*edge);
        }
        for point in &self.points {
            tri.add_point(*point);
        }
        tri
    }
}

/// Lifts `point` onto the plane of `face`.
#[inline]
pub(crate) fn project(face: &Face, point: DVec3) -> DVec3 {
    DVec3::new(point.x, face.height_at(point.x, point.z), point.z)
}

/// Points where `edge` meets the region outline, endpoints included.
///
/// The points lie on `edge`.
pub(crate) fn outline_hits(edge: &Edge, region: &dyn Region, tol: &TolerancePolicy) -> Vec<DVec3> {
    region
        .edges()
        .iter()
        .filter_map(|r| edge.intersect(r, true, tol))
        .collect()
}

/// Appends the parts of the region outline that lie on the face.
pub(crate) fn clip_region_edges(
    face: &Face,
    region: &dyn Region,
    tol: &TolerancePolicy,
    outline: &mut Outline,
) {
    let face_edges = face.edges();
    for region_edge in region.edges() {
        let hits: Vec<DVec3> = face_edges
            .iter()
            .filter_map(|f| f.intersect(&region_edge, true, tol))
            .collect();
        for piece in region_edge.split_at(&hits, tol.point_merge) {
            if face.contains(piece.midpoint(), true, tol) {
                outline.add_edge(Edge::new(project(face, piece.a), project(face, piece.b)));
            }
        }
    }
}

/// Reseals the outline and triangulates the face area outside the region.
///
/// Output faces keep the winding of `face`.
pub(crate) fn retriangulate(
    face: &Face,
    region: &dyn Region,
    ctx: &ClipContext,
    mut outline: Outline,
) -> Vec<Face> {
    let tol = &ctx.tol;
    outline.reseal(region, tol);

    let filter = |candidate: &Face| {
        let centroid = candidate.centroid();
        face.contains(centroid, true, tol) && !region.inside(centroid, false, tol)
    };
    let mut tri = outline.triangulator(ctx, &filter);
    tri.fill_nearest();
    tri.into_faces()
        .into_iter()
        .map(|f| f.oriented_like(face))
        .collect()
}
