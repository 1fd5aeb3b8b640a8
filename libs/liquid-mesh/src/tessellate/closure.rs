//! Closure pass: stitches the lattice staircase to a circle polygon.
//!
//! The circle runs a small margin outside the farthest open lattice point,
//! so the gap between staircase and circle is a ring the greedy
//! triangulator can fill. Spokes from every open endpoint to the domain
//! center keep triangles from folding across the interior.

use super::GridBuilder;
use crate::domain::{CellCoord, LiquidDomain};
use crate::geometry::{distance_xz, Edge, Face};
use crate::mesh::Mesh;
use crate::ops::Triangulator;
use crate::progress::{BakeStage, Progress};
use config::constants::{circle_segments, CLOSURE_MARGIN};
use glam::DVec3;
use std::f64::consts::TAU;

impl<'a, D: LiquidDomain + ?Sized> GridBuilder<'a, D> {
    pub(super) fn close_boundary(
        &self,
        cells: &[CellCoord],
        mesh: &mut Mesh,
        progress: &mut dyn Progress,
    ) {
        progress.report(BakeStage::Closure, 0, 1);

        let open = self.open_edges(cells);
        if open.is_empty() {
            progress.report(BakeStage::Closure, 1, 1);
            return;
        }

        let cs = self.settings.cell_size;
        let center = DVec3::new(
            self.circle.center.x * cs,
            self.settings.water_level,
            self.circle.center.y * cs,
        );
        let reach = open
            .iter()
            .flat_map(|e| [e.a, e.b])
            .map(|p| distance_xz(p, center))
            .fold(0.0, f64::max);
        let radius = reach + CLOSURE_MARGIN * cs;

        let filter = |face: &Face| {
            let c = face.centroid();
            let cell = CellCoord::new((c.x / cs).floor() as i32, (c.z / cs).floor() as i32);
            distance_xz(c, center) <= radius && !self.circle.contains_cell(cell)
        };
        let mut tri = Triangulator::new(self.settings.tolerance)
            .with_candidate_limit(self.settings.candidate_limit)
            .with_filter(&filter);

        for edge in &open {
            tri.add_edge(*edge);
        }
        let ring = circle_points(center, radius, circle_segments(radius / cs));
        for (i, &p) in ring.iter().enumerate() {
            tri.add_edge(Edge::new(p, ring[(i + 1) % ring.len()]));
        }
        for edge in &open {
            tri.add_edge(Edge::new(edge.a, center));
            tri.add_edge(Edge::new(edge.b, center));
        }

        tri.fill_nearest();
        let faces = tri.into_faces();
        log::info!(
            "closure: {} open edges, {} ring segments, {} faces",
            open.len(),
            ring.len(),
            faces.len()
        );
        for face in faces {
            mesh.add_face(face);
        }
        progress.report(BakeStage::Closure, 1, 1);
    }

    /// Lattice edges of tessellated cells whose neighbour lies outside the domain.
    fn open_edges(&self, cells: &[CellCoord]) -> Vec<Edge> {
        let mut edges = Vec::new();
        for &cell in cells {
            let Some(denom) = self.resolution(cell) else {
                continue;
            };
            for (side, neighbor) in cell.neighbors().into_iter().enumerate() {
                if self.circle.contains_cell(neighbor) {
                    continue;
                }
                let points = self.side_points(cell, side, denom);
                edges.extend(points.windows(2).map(|w| Edge::new(w[0], w[1])));
            }
        }
        edges
    }
}

fn circle_points(center: DVec3, radius: f64, segments: u32) -> Vec<DVec3> {
    (0..segments)
        .map(|k| {
            let angle = TAU * k as f64 / segments as f64;
            center + DVec3::new(angle.cos() * radius, 0.0, angle.sin() * radius)
        })
        .collect()
}
