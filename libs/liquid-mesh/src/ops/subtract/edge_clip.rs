//! # Case C: Edge Clip
//!
//! The outlines cross but no face vertex lies in the region. Every face edge
//! is split where it meets the region and the pieces inside are dropped.

use super::outline::{clip_region_edges, outline_hits, retriangulate, Outline};
use super::{ClipCase, ClipContext, ClipKind};
use crate::cutout::Region;
use crate::geometry::Face;
use config::TolerancePolicy;

/// Region outline crossing the face outline.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeClip;

impl ClipCase for EdgeClip {
    fn kind(&self) -> ClipKind {
        ClipKind::EdgeClip
    }

    /// A proper crossing of the outlines, or a region corner strictly on the
    /// face. The second test catches regions whose corners sit exactly on a
    /// face edge, where every crossing is an endpoint.
    fn applies(&self, face: &Face, region: &dyn Region, tol: &TolerancePolicy) -> bool {
        let face_edges = face.edges();
        let crossing = region.edges().iter().any(|r| {
            face_edges
                .iter()
                .any(|f| r.intersect(f, false, tol).is_some())
        });
        crossing
            || region
                .points()
                .iter()
                .any(|p| face.contains(*p, false, tol))
    }

    fn resolve(&self, face: &Face, region: &dyn Region, ctx: &ClipContext) -> Vec<Face> {
        let tol = &ctx.tol;
        let mut outline = Outline::new(tol);

        for edge in face.edges() {
            let hits = outline_hits(&edge, region, tol);
            for piece in edge.split_at(&hits, tol.point_merge) {
                if !region.inside(piece.midpoint(), false, tol) {
                    outline.add_edge(piece);
                }
            }
        }

        clip_region_edges(face, region, tol, &mut outline);

        retriangulate(face, region, ctx, outline)
    }
}
