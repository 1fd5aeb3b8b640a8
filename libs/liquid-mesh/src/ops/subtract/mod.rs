//! # Cutout Subtraction
//!
//! Removes cutout regions from a mesh, one region at a time.
//!
//! ## Algorithm
//!
//! For every face of the mesh (in order, ignoring faces inserted for the
//! same region) the first matching [`ClipCase`] replaces the face in place:
//!
//! 1. [`Containment`]: the whole region lies on the face.
//! 2. [`VertexClip`]: a face vertex lies in the region.
//! 3. [`EdgeClip`]: the outlines cross without a contained face vertex.
//!
//! Faces whose bounding circle cannot reach the region are skipped before
//! classification. Points derived from the region take their Y from the
//! face plane.
//!
//! ## Failure policy
//!
//! Missing intersections drop the offending edge and unsealable outlines
//! stay open. Subtraction always terminates and never fails.

mod containment;
mod edge_clip;
mod outline;
mod vertex_clip;


pub use containment::Containment;
pub use edge_clip::EdgeClip;
pub use vertex_clip::VertexClip;

use crate::cutout::Region;
use crate::geometry::{distance_xz, Face};
use crate::mesh::Mesh;
use config::{BakeSettings, TolerancePolicy};
use std::fmt;

// =============================================================================
// CLIP CASES
// =============================================================================

/// Classification of a face against a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipKind {
    Containment,
    VertexClip,
    EdgeClip,
}

impl fmt::Display for ClipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipKind::Containment => f.write_str("containment"),
            ClipKind::VertexClip => f.write_str("vertex clip"),
            ClipKind::EdgeClip => f.write_str("edge clip"),
        }
    }
}

/// Parameters shared by every clip case.
#[derive(Debug, Clone, Copy)]
pub struct ClipContext {
    pub tol: TolerancePolicy,
    pub candidate_limit: Option<usize>,
}

impl From<&BakeSettings> for ClipContext {
    fn from(settings: &BakeSettings) -> Self {
        Self {
            tol: settings.tolerance,
            candidate_limit: settings.candidate_limit,
        }
    }
}

/// One strategy for replacing a face that meets a region.
pub trait ClipCase {
    /// Which case this is.
    fn kind(&self) -> ClipKind;

    /// Returns true if this case handles `face`.
    fn applies(&self, face: &Face, region: &dyn Region, tol: &TolerancePolicy) -> bool;

    /// Faces replacing `face`; empty when the whole face is removed.
    fn resolve(&self, face: &Face, region: &dyn Region, ctx: &ClipContext) -> Vec<Face>;
}

/// Cases in priority order.
pub const CASES: [&dyn ClipCase; 3] = [&Containment, &VertexClip, &EdgeClip];

/// Returns the first case that handles `face`, if any.
pub fn classify(
    face: &Face,
    region: &dyn Region,
    tol: &TolerancePolicy,
) -> Option<&'static dyn ClipCase> {
    CASES
        .iter()
        .copied()
        .find(|case| case.applies(face, region, tol))
}

// =============================================================================
// STATS
// =============================================================================

/// Counters of one or more subtraction passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubtractStats {
    /// Regions processed.
    pub regions: usize,
    /// Faces skipped by the bounding-circle test.
    pub pruned: usize,
    /// Faces within reach that no case applied to.
    pub untouched: usize,
    pub containment: usize,
    pub vertex_clip: usize,
    pub edge_clip: usize,
    /// Faces removed without replacement.
    pub removed: usize,
}

impl SubtractStats {
    fn record(&mut self, kind: ClipKind) {
        match kind {
            ClipKind::Containment => self.containment += 1,
            ClipKind::VertexClip => self.vertex_clip += 1,
            ClipKind::EdgeClip => self.edge_clip += 1,
        }
    }

    /// Number of faces that were replaced.
    pub fn clipped(&self) -> usize {
        self.containment + self.vertex_clip + self.edge_clip
    }

    /// Adds the counters of `other`.
    pub fn absorb(&mut self, other: SubtractStats) {
        self.regions += other.regions;
        self.pruned += other.pruned;
        self.untouched += other.untouched;
        self.containment += other.containment;
        self.vertex_clip += other.vertex_clip;
        self.edge_clip += other.edge_clip;
        self.removed += other.removed;
    }
}

// =============================================================================
// SUBTRACTOR
// =============================================================================

/// Applies regions to a mesh in sequence.
///
/// # Example
///
/// ```rust
/// use liquid_mesh::cutout::{Cutout, CutoutKind};
/// use liquid_mesh::ops::Subtractor;
/// use liquid_mesh::{Face, Mesh};
/// use config::BakeSettings;
/// use glam::{DVec2, DVec3};
///
/// let mut mesh = Mesh::from_faces(vec![Face::new(
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(0.0, 0.0, 4.0),
///     DVec3::new(4.0, 0.0, 0.0),
/// )]);
/// let hole = Cutout::square(CutoutKind::Lava, DVec2::new(1.0, 1.0), 0.0, 0.0, 0.25);
///
/// let stats = Subtractor::new(&BakeSettings::default()).subtract(&mut mesh, &hole);
/// assert_eq!(stats.containment, 1);
/// assert!((mesh.area() - 7.75).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Subtractor {
    ctx: ClipContext,
}

impl Subtractor {
    pub fn new(settings: &BakeSettings) -> Self {
        Self {
            ctx: ClipContext::from(settings),
        }
    }

    /// Removes one region from `mesh`.
    pub fn subtract(&self, mesh: &mut Mesh, region: &dyn Region) -> SubtractStats {
        let tol = &self.ctx.tol;
        let mut stats = SubtractStats {
            regions: 1,
            ..SubtractStats::default()
        };

        let reach = region.bounding_radius() + tol.point_merge;
        let region_center = region.center();

        let mut index = 0;
        while let Some(face) = mesh.face(index).copied() {
            let (center, radius) = face.bounding_circle();
            if distance_xz(center, region_center) > radius + reach {
                stats.pruned += 1;
                index += 1;
                continue;
            }

            let Some(case) = classify(&face, region, tol) else {
                stats.untouched += 1;
                index += 1;
                continue;
            };

            let replacement = case.resolve(&face, region, &self.ctx);
            stats.record(case.kind());
            if replacement.is_empty() {
                stats.removed += 1;
            }
            log::trace!(
                "{} on face {index}: {} faces",
                case.kind(),
                replacement.len()
            );
            index = mesh.replace_face(index, replacement);
        }

        stats
    }

    /// Removes every region in order.
    pub fn subtract_all<'r, R>(
        &self,
        mesh: &mut Mesh,
        regions: impl IntoIterator<Item = &'r R>,
    ) -> SubtractStats
    where
        R: Region + 'r,
    {
        let mut stats = SubtractStats::default();
        for region in regions {
            stats.absorb(self.subtract(mesh, region));
        }
        stats
    }
}
