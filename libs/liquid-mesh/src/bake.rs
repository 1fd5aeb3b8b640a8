//! # Bake Pipeline
//!
//! Ties the passes together for one circular region:
//!
//! ```text
//! water  = tessellate -> subtract every cutout -> cleanup
//! lava   = lava cutout faces, overlaps removed -> cleanup
//! swamp  = swamp cutout faces minus lava and earlier swamps -> cleanup
//! ```
//!
//! Surfaces are returned by value; nothing is written anywhere.

use crate::cutout::{CutoutKind, CutoutRegistry, Region};
use crate::domain::{CellCoord, CircularDomain, LiquidDomain};
use crate::error::MeshError;
use crate::geometry::Face;
use crate::mesh::Mesh;
use crate::ops::{cleanup, CleanupReport, SubtractStats, Subtractor};
use crate::progress::{BakeStage, NoProgress, Progress};
use crate::tessellate::GridBuilder;
use config::BakeSettings;
use glam::DVec3;

/// Counters gathered while baking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BakeStats {
    /// Subtraction of all cutouts from the water surface.
    pub subtract: SubtractStats,
    /// Cleanup of the water surface.
    pub cleanup: CleanupReport,
}

/// Result of [`Baker::bake`].
#[derive(Debug, Clone, Default)]
pub struct BakedSurfaces {
    /// Water surface with every cutout removed.
    pub water: Mesh,
    /// Lava surface, absent when there are no lava cutouts.
    pub lava: Option<Mesh>,
    /// Swamp surface, absent when there are no swamp cutouts.
    pub swamp: Option<Mesh>,
    pub stats: BakeStats,
}

/// Bakes the liquid surfaces of one domain.
///
/// # Example
///
/// ```rust
/// use liquid_mesh::bake::Baker;
/// use liquid_mesh::cutout::{Cutout, CutoutKind, CutoutRegistry};
/// use liquid_mesh::domain::{CellLiquid, CircularDomain};
/// use config::BakeSettings;
/// use glam::DVec2;
///
/// let water = |_x: i32, _y: i32| CellLiquid::Liquid;
/// let circle = CircularDomain::new(DVec2::new(1.0, 1.0), 0.75).unwrap();
/// let settings = BakeSettings::new(2, 1.0).unwrap().with_closure(false);
/// let baker = Baker::new(&water, circle, settings).unwrap();
///
/// let mut registry = CutoutRegistry::new();
/// registry
///     .push(Cutout::square(CutoutKind::Lava, DVec2::new(0.35, 0.12), 0.0, 0.0, 0.05))
///     .unwrap();
///
/// let surfaces = baker.bake(&registry).unwrap();
/// assert!(surfaces.lava.is_some());
/// assert!(surfaces.swamp.is_none());
/// assert!((surfaces.water.area() - 3.99).abs() < 1e-6);
/// ```
pub struct Baker<'a, D: LiquidDomain + ?Sized> {
    domain: &'a D,
    circle: CircularDomain,
    settings: BakeSettings,
}

impl<'a, D: LiquidDomain + ?Sized> Baker<'a, D> {
    /// Creates a baker, validating `settings`.
    pub fn new(
        domain: &'a D,
        circle: CircularDomain,
        settings: BakeSettings,
    ) -> Result<Self, MeshError> {
        let settings = settings.validate()?;
        Ok(Self {
            domain,
            circle,
            settings,
        })
    }

    #[inline]
    pub fn settings(&self) -> &BakeSettings {
        &self.settings
    }

    /// Bakes all surfaces without progress reporting.
    pub fn bake(&self, registry: &CutoutRegistry) -> Result<BakedSurfaces, MeshError> {
        self.bake_with_progress(registry, &mut NoProgress)
    }

    /// Bakes all surfaces, reporting every stage to `progress`.
    pub fn bake_with_progress(
        &self,
        registry: &CutoutRegistry,
        progress: &mut dyn Progress,
    ) -> Result<BakedSurfaces, MeshError> {
        let mut water = GridBuilder::new(self.domain, self.circle, self.settings).build(progress);

        let subtractor = Subtractor::new(&self.settings);
        let mut subtract = SubtractStats::default();
        let total = registry.len();
        for (done, cutout) in registry.iter().enumerate() {
            subtract.absorb(subtractor.subtract(&mut water, cutout));
            progress.report(BakeStage::Subtract, done + 1, total);
        }
        log::info!(
            "subtracted {} cutouts: {} faces clipped, {} removed",
            subtract.regions,
            subtract.clipped(),
            subtract.removed
        );

        let report = cleanup(&mut water, &self.settings.tolerance);
        progress.report(BakeStage::Cleanup, 1, 1);
        log::info!(
            "water surface: {} faces, {} vertices",
            water.face_count(),
            report.vertices
        );

        let lava = self.optional_surface(registry, CutoutKind::Lava)?;
        let swamp = self.optional_surface(registry, CutoutKind::Swamp)?;

        Ok(BakedSurfaces {
            water,
            lava,
            swamp,
            stats: BakeStats {
                subtract,
                cleanup: report,
            },
        })
    }

    fn optional_surface(
        &self,
        registry: &CutoutRegistry,
        kind: CutoutKind,
    ) -> Result<Option<Mesh>, MeshError> {
        if registry.of_kind(kind).next().is_none() {
            return Ok(None);
        }
        cutout_surface(registry, kind, &self.settings).map(Some)
    }

    /// Collision surface of one cell: its quad minus every overlapping cutout.
    ///
    /// Dry cells and cells outside the domain yield an empty mesh.
    pub fn cell_collision(&self, x: i32, y: i32, registry: &CutoutRegistry) -> Mesh {
        let coord = CellCoord::new(x, y);
        if !self.circle.contains_cell(coord) || !self.domain.cell(x, y).is_wet() {
            return Mesh::new();
        }

        let cs = self.settings.cell_size;
        let level = self.settings.water_level;
        let corner = |dx: i32, dz: i32| {
            DVec3::new((x + dx) as f64 * cs, level, (y + dz) as f64 * cs)
        };
        let mut mesh = Mesh::from_faces(vec![
            Face::new(corner(0, 0), corner(1, 1), corner(1, 0)),
            Face::new(corner(0, 0), corner(0, 1), corner(1, 1)),
        ]);

        let stats = Subtractor::new(&self.settings).subtract_all(&mut mesh, registry);
        log::debug!(
            "cell ({x}, {y}) collision: {} cutouts clipped {} faces",
            stats.regions,
            stats.clipped()
        );
        cleanup(&mut mesh, &self.settings.tolerance);
        mesh
    }
}

/// Surface made of every cutout of `kind`.
///
/// Each cutout contributes its faces minus the earlier cutouts of the same
/// kind it overlaps, so overlapping cutouts are not covered twice. Swamp
/// cutouts also lose every overlapping lava cutout.
///
/// # Errors
///
/// Returns [`MeshError::EmptyCutoutList`] when the registry holds no cutout
/// of `kind`.
pub fn cutout_surface(
    registry: &CutoutRegistry,
    kind: CutoutKind,
    settings: &BakeSettings,
) -> Result<Mesh, MeshError> {
    let tol = &settings.tolerance;
    let cutouts: Vec<_> = registry.of_kind(kind).collect();
    if cutouts.is_empty() {
        return Err(MeshError::empty_cutouts(kind));
    }

    let subtractor = Subtractor::new(settings);
    let mut surface = Mesh::new();

    for (i, cutout) in cutouts.iter().enumerate() {
        let mut piece = Mesh::from_faces(cutout.faces());
        for earlier in &cutouts[..i] {
            if cutout.intersects(*earlier, tol) || earlier.intersects(*cutout, tol) {
                subtractor.subtract(&mut piece, *earlier);
            }
        }
        if kind == CutoutKind::Swamp {
            for lava in registry.of_kind(CutoutKind::Lava) {
                if cutout.intersects(lava, tol) || lava.intersects(*cutout, tol) {
                    subtractor.subtract(&mut piece, lava);
                }
            }
        }
        surface.merge(&piece);
    }

    let report = cleanup(&mut surface, tol);
    log::info!(
        "{kind} surface: {} cutouts, {} faces, {} vertices",
        cutouts.len(),
        surface.face_count(),
        report.vertices
    );
    Ok(surface)
}
