//! # Cutout Registry
//!
//! Caller-owned, ordered list of cutouts for one bake.

use super::{Cutout, CutoutKind, Region, ShapedCutout};
use crate::error::MeshError;
use crate::geometry::{Edge, Face};
use config::TolerancePolicy;
use glam::DVec3;

/// Either cutout shape.
#[derive(Debug, Clone, PartialEq)]
pub enum CutoutEntry {
    Rect(Cutout),
    Shaped(ShapedCutout),
}

impl CutoutEntry {
    fn region(&self) -> &dyn Region {
        match self {
            CutoutEntry::Rect(c) => c,
            CutoutEntry::Shaped(s) => s,
        }
    }
}

impl From<Cutout> for CutoutEntry {
    fn from(cutout: Cutout) -> Self {
        CutoutEntry::Rect(cutout)
    }
}

impl From<ShapedCutout> for CutoutEntry {
    fn from(shape: ShapedCutout) -> Self {
        CutoutEntry::Shaped(shape)
    }
}

impl Region for CutoutEntry {
    fn kind(&self) -> CutoutKind {
        self.region().kind()
    }

    fn center(&self) -> DVec3 {
        self.region().center()
    }

    fn height(&self) -> f64 {
        self.region().height()
    }

    fn bounding_radius(&self) -> f64 {
        self.region().bounding_radius()
    }

    fn points(&self) -> Vec<DVec3> {
        self.region().points()
    }

    fn edges(&self) -> Vec<Edge> {
        self.region().edges()
    }

    fn faces(&self) -> Vec<Face> {
        self.region().faces()
    }

    fn inside(&self, point: DVec3, edge_inclusive: bool, tol: &TolerancePolicy) -> bool {
        self.region().inside(point, edge_inclusive, tol)
    }
}

/// Ordered cutout collection.
///
/// Subtraction visits cutouts in insertion order.
///
/// # Example
///
/// ```rust
/// use liquid_mesh::cutout::{Cutout, CutoutKind, CutoutRegistry};
/// use glam::DVec2;
///
/// let mut registry = CutoutRegistry::new();
/// registry.push(Cutout::square(CutoutKind::Lava, DVec2::new(4.0, 4.0), 0.0, 0.0, 1.0))?;
/// registry.push(Cutout::square(CutoutKind::Swamp, DVec2::new(9.0, 4.0), 0.0, 0.0, 1.0))?;
///
/// assert_eq!(registry.len(), 2);
/// assert_eq!(registry.of_kind(CutoutKind::Lava).count(), 1);
/// # Ok::<(), liquid_mesh::MeshError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CutoutRegistry {
    entries: Vec<CutoutEntry>,
}

impl CutoutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from rectangular descriptors.
    pub fn from_cutouts(cutouts: impl IntoIterator<Item = Cutout>) -> Result<Self, MeshError> {
        let mut registry = Self::new();
        for cutout in cutouts {
            registry.push(cutout)?;
        }
        Ok(registry)
    }

    /// Appends a cutout, validating rectangles.
    pub fn push(&mut self, entry: impl Into<CutoutEntry>) -> Result<(), MeshError> {
        let entry = entry.into();
        if let CutoutEntry::Rect(cutout) = &entry {
            cutout.validate()?;
        }
        self.entries.push(entry);
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Cutouts in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, CutoutEntry> {
        self.entries.iter()
    }

    /// Cutouts of one kind, in insertion order.
    pub fn of_kind(&self, kind: CutoutKind) -> impl Iterator<Item = &CutoutEntry> + '_ {
        self.entries.iter().filter(move |e| e.kind() == kind)
    }

    /// Cutouts that [`Region::intersects`] `region`.
    pub fn overlapping<'a>(
        &'a self,
        region: &'a dyn Region,
        tol: &'a TolerancePolicy,
    ) -> impl Iterator<Item = &'a CutoutEntry> + 'a {
        self.entries
            .iter()
            .filter(move |e| e.intersects(region, tol))
    }
}

impl<'a> IntoIterator for &'a CutoutRegistry {
    type Item = &'a CutoutEntry;
    type IntoIter = std::slice::Iter<'a, CutoutEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
