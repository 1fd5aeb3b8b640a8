//! # Tessellation Grid Builder
//!
//! Builds the base water surface over a circular region of the world grid.
//!
//! ## Passes
//!
//! 1. **Fine pass**: every in-domain plain liquid cell becomes an N×N
//!    sub-grid with two triangles per sub-cell. The diagonal alternates on
//!    the global sub-cell parity, so neighbouring cells continue the
//!    checkerboard.
//! 2. **Infill**: every remaining wet cell becomes a quad, or, when a
//!    neighbour is finer, an outline whose sides match the neighbour's
//!    resolution, closed by the greedy triangulator.
//! 3. **Closure** (optional): the staircase along the domain edge is
//!    stitched to a circle polygon.
//!
//! ## Lattice coordinates
//!
//! A lattice coordinate is the rational `numer / denom` in cell units.
//! Fractions are reduced before conversion so the same point computed at
//! different resolutions has bitwise identical coordinates. That is what
//! makes shared edges match exactly.

mod closure;
mod infill;


use crate::domain::{CellCoord, CellLiquid, CircularDomain, LiquidDomain};
use crate::geometry::Face;
use crate::mesh::Mesh;
use crate::progress::{BakeStage, Progress};
use config::BakeSettings;
use glam::DVec3;
use std::collections::HashMap;

/// Builds the base mesh of one surface.
///
/// # Example
///
/// ```rust
/// use liquid_mesh::domain::{CellLiquid, CircularDomain};
/// use liquid_mesh::progress::NoProgress;
/// use liquid_mesh::tessellate::GridBuilder;
/// use config::BakeSettings;
/// use glam::DVec2;
///
/// let water = |_x: i32, _y: i32| CellLiquid::Liquid;
/// let circle = CircularDomain::new(DVec2::new(1.0, 1.0), 0.75).unwrap();
/// let settings = BakeSettings::new(2, 1.0).unwrap().with_closure(false);
///
/// let mut builder = GridBuilder::new(&water, circle, settings);
/// let mesh = builder.build(&mut NoProgress);
/// assert_eq!(mesh.face_count(), 2 * 4 * 4);
/// ```
pub struct GridBuilder<'a, D: LiquidDomain + ?Sized> {
    domain: &'a D,
    circle: CircularDomain,
    settings: BakeSettings,
    /// Sub-divisions used per tessellated cell.
    resolution: HashMap<CellCoord, u32>,
}

impl<'a, D: LiquidDomain + ?Sized> GridBuilder<'a, D> {
    pub fn new(domain: &'a D, circle: CircularDomain, settings: BakeSettings) -> Self {
        Self {
            domain,
            circle,
            settings,
            resolution: HashMap::new(),
        }
    }

    /// Resolution recorded for `cell` by the last build.
    pub fn resolution(&self, cell: CellCoord) -> Option<u32> {
        self.resolution.get(&cell).copied()
    }

    /// Runs all passes and returns the surface.
    pub fn build(&mut self, progress: &mut dyn Progress) -> Mesh {
        self.resolution.clear();
        let cells = self.circle.cells();
        let mut mesh = Mesh::new();

        self.fine_pass(&cells, &mut mesh, progress);
        self.infill_pass(&cells, &mut mesh, progress);
        if self.settings.close_boundary {
            self.close_boundary(&cells, &mut mesh, progress);
        }

        log::info!(
            "tessellated {} cells into {} faces",
            self.resolution.len(),
            mesh.face_count()
        );
        mesh
    }

    fn fine_pass(&mut self, cells: &[CellCoord], mesh: &mut Mesh, progress: &mut dyn Progress) {
        let n = self.settings.tessellation_factor;
        let total = cells.len();

        for (done, &cell) in cells.iter().enumerate() {
            if self.domain.cell(cell.x, cell.y) == CellLiquid::Liquid {
                for j in 0..n as i64 {
                    for i in 0..n as i64 {
                        let gx = cell.x as i64 * n as i64 + i;
                        let gz = cell.y as i64 * n as i64 + j;
                        let flip = (gx + gz).rem_euclid(2) == 1;
                        let faces = self.quad(gx, gz, n, flip);
                        mesh.add_face(faces[0]);
                        mesh.add_face(faces[1]);
                    }
                }
                self.resolution.insert(cell, n);
            }
            progress.report(BakeStage::FinePass, done + 1, total);
        }

        log::debug!("fine pass: {} cells at factor {n}", self.resolution.len());
    }

    /// World position of lattice point `(gx / denom, gz / denom)`.
    pub(crate) fn lattice_point(&self, gx: i64, gz: i64, denom: u32) -> DVec3 {
        let cs = self.settings.cell_size;
        DVec3::new(
            lattice(gx, denom, cs),
            self.settings.water_level,
            lattice(gz, denom, cs),
        )
    }

    /// Two upward triangles covering lattice square `(gx, gz)`.
    ///
    /// Without `flip` the diagonal runs from the low corner to the high one.
    pub(crate) fn quad(&self, gx: i64, gz: i64, denom: u32, flip: bool) -> [Face; 2] {
        let p00 = self.lattice_point(gx, gz, denom);
        let p10 = self.lattice_point(gx + 1, gz, denom);
        let p11 = self.lattice_point(gx + 1, gz + 1, denom);
        let p01 = self.lattice_point(gx, gz + 1, denom);
        if flip {
            [Face::new(p00, p01, p10), Face::new(p10, p01, p11)]
        } else {
            [Face::new(p00, p11, p10), Face::new(p00, p01, p11)]
        }
    }

    /// Lattice points along one side of `cell`, split `denom` times.
    ///
    /// `side` follows [`CellCoord::neighbors`]: 0 south, 1 east, 2 north,
    /// 3 west. Both corners are included.
    pub(crate) fn side_points(&self, cell: CellCoord, side: usize, denom: u32) -> Vec<DVec3> {
        let d = denom as i64;
        let x0 = cell.x as i64 * d;
        let z0 = cell.y as i64 * d;
        (0..=d)
            .map(|j| match side {
                0 => (x0 + d - j, z0),
                1 => (x0 + d, z0 + d - j),
                2 => (x0 + j, z0 + d),
                _ => (x0, z0 + j),
            })
            .map(|(gx, gz)| self.lattice_point(gx, gz, denom))
            .collect()
    }
}

/// Convenience wrapper around [`GridBuilder::build`].
pub fn tessellate<D: LiquidDomain + ?Sized>(
    domain: &D,
    circle: CircularDomain,
    settings: BakeSettings,
    progress: &mut dyn Progress,
) -> Mesh {
    GridBuilder::new(domain, circle, settings).build(progress)
}

/// `numer / denom` cells in world units, computed from the reduced fraction.
fn lattice(numer: i64, denom: u32, cell_size: f64) -> f64 {
    let g = gcd(numer.unsigned_abs(), denom as u64).max(1);
    let n = numer / g as i64;
    let d = denom as u64 / g;
    n as f64 * cell_size / d as f64
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
