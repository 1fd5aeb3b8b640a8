//! # Cutout Regions
//!
//! Lava and swamp footprints removed from a liquid surface. A [`Cutout`] is
//! a rotated rectangle; a [`ShapedCutout`] carries an imported triangle list.
//! Both answer the same [`Region`] queries, which is all the subtraction
//! engine sees.
//!
//! ## Winding
//!
//! Corner lists run counter-clockwise seen from +Y, so the fan triangles
//! built from them have upward normals.

mod registry;
mod shaped;

#[cfg(test)]
mod tests;

pub use registry::{CutoutEntry, CutoutRegistry};
pub use shaped::ShapedCutout;

use crate::error::MeshError;
use crate::geometry::{inside_polygon, Edge, Face};
use config::TolerancePolicy;
use glam::{DQuat, DVec2, DVec3};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Liquid carried by a cutout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CutoutKind {
    Swamp,
    Lava,
}

impl fmt::Display for CutoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CutoutKind::Swamp => f.write_str("swamp"),
            CutoutKind::Lava => f.write_str("lava"),
        }
    }
}

// =============================================================================
// REGION TRAIT
// =============================================================================

/// Query surface shared by every cutout shape.
pub trait Region {
    /// Liquid kind.
    fn kind(&self) -> CutoutKind;

    /// World position; Y is the region height.
    fn center(&self) -> DVec3;

    /// Y of the region's own faces.
    fn height(&self) -> f64 {
        self.center().y
    }

    /// XZ radius around [`Region::center`] enclosing the whole region.
    ///
    /// Only used for coarse proximity pruning.
    fn bounding_radius(&self) -> f64;

    /// Outline points in order.
    fn points(&self) -> Vec<DVec3>;

    /// Outline edges in order.
    fn edges(&self) -> Vec<Edge>;

    /// Triangulated interior, upward facing.
    fn faces(&self) -> Vec<Face>;

    /// Returns true if `point` lies in the region (XZ only).
    fn inside(&self, point: DVec3, edge_inclusive: bool, tol: &TolerancePolicy) -> bool {
        self.faces()
            .iter()
            .any(|f| f.contains(point, edge_inclusive, tol))
    }

    /// Approximate overlap test.
    ///
    /// True iff a corner of either region lies inside the other, edges
    /// included. Two regions crossing without any contained corner are
    /// reported as disjoint.
    fn intersects(&self, other: &dyn Region, tol: &TolerancePolicy) -> bool {
        self.points().iter().any(|p| other.inside(*p, true, tol))
            || other.points().iter().any(|p| self.inside(*p, true, tol))
    }
}

// =============================================================================
// RECTANGULAR CUTOUT
// =============================================================================

/// A rectangle rotated about the Y axis.
///
/// # Example
///
/// ```rust
/// use liquid_mesh::cutout::{Cutout, CutoutKind, Region};
/// use config::TolerancePolicy;
/// use glam::{DVec2, DVec3};
///
/// let lava = Cutout::square(CutoutKind::Lava, DVec2::new(10.0, 10.0), 2.0, 0.0, 1.0);
/// let tol = TolerancePolicy::default();
///
/// assert_eq!(lava.points().len(), 4);
/// assert!(lava.inside(DVec3::new(10.5, 0.0, 9.5), false, &tol));
/// assert!(!lava.inside(DVec3::new(11.5, 0.0, 10.0), true, &tol));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cutout {
    /// Liquid kind.
    pub kind: CutoutKind,
    /// Center on the XZ plane (`x` = X, `y` = Z).
    pub center: DVec2,
    /// Y of the cutout surface.
    pub height: f64,
    /// Rotation about +Y in radians.
    pub rotation_y: f64,
    /// Half width along local X and half depth along local Z.
    pub half_extents: DVec2,
}

impl Cutout {
    /// Creates a rectangular cutout.
    pub fn new(
        kind: CutoutKind,
        center: DVec2,
        height: f64,
        rotation_y: f64,
        half_extents: DVec2,
    ) -> Self {
        Self {
            kind,
            center,
            height,
            rotation_y,
            half_extents,
        }
    }

    /// Creates a square cutout with equal half extents.
    pub fn square(
        kind: CutoutKind,
        center: DVec2,
        height: f64,
        rotation_y: f64,
        half_size: f64,
    ) -> Self {
        Self::new(kind, center, height, rotation_y, DVec2::splat(half_size))
    }

    /// Rejects empty or non-finite rectangles.
    pub fn validate(&self) -> Result<(), MeshError> {
        let extents_ok = self.half_extents.x > 0.0
            && self.half_extents.y > 0.0
            && self.half_extents.is_finite();
        if !extents_ok {
            return Err(MeshError::invalid_domain(format!(
                "cutout half extents must be positive: {}",
                self.half_extents
            )));
        }
        if !self.center.is_finite() || !self.height.is_finite() || !self.rotation_y.is_finite() {
            return Err(MeshError::invalid_domain("cutout placement must be finite"));
        }
        Ok(())
    }

    /// The four corners, counter-clockwise seen from +Y.
    pub fn corners(&self) -> [DVec3; 4] {
        let rotation = DQuat::from_rotation_y(self.rotation_y);
        let origin = DVec3::new(self.center.x, self.height, self.center.y);
        let (hx, hz) = (self.half_extents.x, self.half_extents.y);
        [(-hx, -hz), (-hx, hz), (hx, hz), (hx, -hz)]
            .map(|(x, z)| origin + rotation * DVec3::new(x, 0.0, z))
    }
}

impl Region for Cutout {
    fn kind(&self) -> CutoutKind {
        self.kind
    }

    fn center(&self) -> DVec3 {
        DVec3::new(self.center.x, self.height, self.center.y)
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn bounding_radius(&self) -> f64 {
        self.half_extents.length()
    }

    fn points(&self) -> Vec<DVec3> {
        self.corners().to_vec()
    }

    fn edges(&self) -> Vec<Edge> {
        let c = self.corners();
        (0..4).map(|i| Edge::new(c[i], c[(i + 1) % 4])).collect()
    }

    fn faces(&self) -> Vec<Face> {
        let [p0, p1, p2, p3] = self.corners();
        vec![Face::new(p0, p1, p2), Face::new(p0, p2, p3)]
    }

    fn inside(&self, point: DVec3, edge_inclusive: bool, tol: &TolerancePolicy) -> bool {
        inside_polygon(point, &self.edges(), edge_inclusive, tol)
    }
}
