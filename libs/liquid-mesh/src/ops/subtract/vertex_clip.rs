//! # Case B: Vertex Clip
//!
//! At least one face vertex lies in the region. Face edges are trimmed to
//! the region boundary, the region outline on the face is appended, and the
//! result is resealed and retriangulated.

use super::outline::{clip_region_edges, outline_hits, retriangulate, Outline};
use super::{ClipCase, ClipContext, ClipKind};
use crate::cutout::Region;
use crate::geometry::{Edge, Face};
use config::TolerancePolicy;

/// Face with one or more vertices in the region.
#[derive(Debug, Clone, Copy, Default)]
pub struct VertexClip;

impl ClipCase for VertexClip {
    fn kind(&self) -> ClipKind {
        ClipKind::VertexClip
    }

    fn applies(&self, face: &Face, region: &dyn Region, tol: &TolerancePolicy) -> bool {
        face.vertices()
            .iter()
            .any(|v| region.inside(*v, true, tol))
    }

    fn resolve(&self, face: &Face, region: &dyn Region, ctx: &ClipContext) -> Vec<Face> {
        let tol = &ctx.tol;
        let mut outline = Outline::new(tol);

        for edge in face.edges() {
            let a_in = region.inside(edge.a, true, tol);
            let b_in = region.inside(edge.b, true, tol);
            match (a_in, b_in) {
                (true, true) => {}
                (false, false) => {
                    let hits = outline_hits(&edge, region, tol);
                    for piece in edge.split_at(&hits, tol.point_merge) {
                        if !region.inside(piece.midpoint(), false, tol) {
                            outline.add_edge(piece);
                        }
                    }
                }
                _ => {
                    let outside = if a_in { edge.b } else { edge.a };
                    let nearest = outline_hits(&edge, region, tol)
                        .into_iter()
                        .min_by(|l, r| {
                            l.distance_squared(outside)
                                .total_cmp(&r.distance_squared(outside))
                        });
                    match nearest {
                        Some(hit) => outline.add_edge(Edge::new(outside, hit)),
                        None => log::debug!(
                            "no boundary hit on edge {} -> {}, dropping it",
                            edge.a,
                            edge.b
                        ),
                    }
                }
            }
        }

        clip_region_edges(face, region, tol, &mut outline);

        let faces = retriangulate(face, region, ctx, outline);
        if let [only] = faces.as_slice() {
            if only.approx_eq(face, tol.point_merge) {
                return vec![*face];
            }
        }
        faces
    }
}
