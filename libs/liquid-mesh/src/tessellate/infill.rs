//! Infill pass: wet cells the fine pass skipped.

use super::GridBuilder;
use crate::domain::{CellCoord, LiquidDomain};
use crate::geometry::{Edge, Face};
use crate::mesh::Mesh;
use crate::ops::Triangulator;
use crate::progress::{BakeStage, Progress};

impl<'a, D: LiquidDomain + ?Sized> GridBuilder<'a, D> {
    pub(super) fn infill_pass(
        &mut self,
        cells: &[CellCoord],
        mesh: &mut Mesh,
        progress: &mut dyn Progress,
    ) {
        let total = cells.len();
        let mut quads = 0usize;
        let mut outlines = 0usize;

        for (done, &cell) in cells.iter().enumerate() {
            progress.report(BakeStage::Infill, done + 1, total);
            if self.resolution.contains_key(&cell) || !self.domain.cell(cell.x, cell.y).is_wet() {
                continue;
            }

            let sides = cell
                .neighbors()
                .map(|n| self.resolution.get(&n).copied().unwrap_or(1));

            if sides.iter().all(|&r| r == 1) {
                let flip = (cell.x as i64 + cell.y as i64).rem_euclid(2) == 1;
                for face in self.quad(cell.x as i64, cell.y as i64, 1, flip) {
                    mesh.add_face(face);
                }
                quads += 1;
            } else {
                for face in self.outline_faces(cell, sides) {
                    mesh.add_face(face);
                }
                outlines += 1;
            }
            self.resolution.insert(cell, 1);
        }

        log::debug!("infill: {quads} quads, {outlines} matched outlines");
    }

    /// Triangulates a cell whose sides are split to match its neighbours.
    fn outline_faces(&self, cell: CellCoord, sides: [u32; 4]) -> Vec<Face> {
        let mut tri = Triangulator::new(self.settings.tolerance)
            .with_candidate_limit(self.settings.candidate_limit);

        for (side, &denom) in sides.iter().enumerate() {
            let points = self.side_points(cell, side, denom);
            for pair in points.windows(2) {
                tri.add_edge(Edge::new(pair[0], pair[1]));
            }
        }
        tri.fill_nearest();

        let faces = tri.into_faces();
        if faces.is_empty() {
            log::warn!("infill produced no faces for cell ({}, {})", cell.x, cell.y);
        }
        faces
    }
}
