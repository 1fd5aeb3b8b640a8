//! # Case A: Containment
//!
//! The region lies entirely on the face. The face becomes a ring around the
//! region: fan candidates first, then the nearest-first fill for whatever
//! gaps remain.

use super::outline::{project, Outline};
use super::{ClipCase, ClipContext, ClipKind};
use crate::cutout::Region;
use crate::geometry::{Edge, Face};
use config::TolerancePolicy;

/// Region fully inside the face.
#[derive(Debug, Clone, Copy, Default)]
pub struct Containment;

impl ClipCase for Containment {
    fn kind(&self) -> ClipKind {
        ClipKind::Containment
    }

    fn applies(&self, face: &Face, region: &dyn Region, tol: &TolerancePolicy) -> bool {
        region
            .points()
            .iter()
            .all(|p| face.contains(*p, true, tol))
    }

    fn resolve(&self, face: &Face, region: &dyn Region, ctx: &ClipContext) -> Vec<Face> {
        let tol = &ctx.tol;

        let mut outline = Outline::new(tol);
        let face_edges: Vec<Edge> = face
            .edges()
            .iter()
            .map(|e| Edge::new(outline.add_point(e.a), outline.add_point(e.b)))
            .collect();
        let region_edges: Vec<Edge> = region
            .edges()
            .iter()
            .map(|e| {
                Edge::new(
                    outline.add_point(project(face, e.a)),
                    outline.add_point(project(face, e.b)),
                )
            })
            .collect();
        for edge in face_edges.iter().chain(&region_edges) {
            outline.add_edge(*edge);
        }
        let face_points: Vec<_> = face_edges.iter().map(|e| e.a).collect();
        let region_points: Vec<_> = region_edges.iter().map(|e| e.a).collect();

        let filter = |candidate: &Face| !region.inside(candidate.centroid(), false, tol);
        let mut tri = outline.triangulator(ctx, &filter);

        for edge in &face_edges {
            for point in &region_points {
                tri.try_candidate(Face::new(edge.a, edge.b, *point));
            }
        }
        for edge in &region_edges {
            for point in &face_points {
                tri.try_candidate(Face::new(edge.a, edge.b, *point));
            }
        }
        tri.fill_nearest();

        tri.into_faces()
            .into_iter()
            .map(|f| f.oriented_like(face))
            .collect()
    }
}
