//! # Mesh Cleanup
//!
//! Final pass over a finished surface:
//!
//! 1. Faces pointing down are flipped.
//! 2. Every vertex snaps to the nearest registered vertex within the weld
//!    distance, or is rounded to the snap precision and registered.
//! 3. Faces that collapsed or no longer point up are dropped.
//!
//! Registered vertices are pairwise at least the weld distance apart and
//! rounding is idempotent, so running the pass twice changes nothing.

mod grid;


use crate::geometry::Face;
use crate::mesh::Mesh;
use config::TolerancePolicy;
use glam::DVec3;
use grid::VertexGrid;

/// Counters of one cleanup pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Faces whose winding was reversed.
    pub flipped: usize,
    /// Faces removed after welding.
    pub dropped: usize,
    /// Distinct vertices after welding.
    pub vertices: usize,
}

/// Welds, reorients and filters `mesh` in place.
///
/// # Example
///
/// ```rust
/// use liquid_mesh::ops::cleanup;
/// use liquid_mesh::{Face, Mesh};
/// use config::TolerancePolicy;
/// use glam::DVec3;
///
/// let mut mesh = Mesh::from_faces(vec![Face::new(
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(1.0, 0.0, 0.0),
///     DVec3::new(0.0, 0.0, 1.0),
/// )]);
/// let report = cleanup(&mut mesh, &TolerancePolicy::default());
/// assert_eq!(report.flipped, 1);
/// assert!(mesh.faces()[0].is_facing_up());
/// ```
pub fn cleanup(mesh: &mut Mesh, tol: &TolerancePolicy) -> CleanupReport {
    let mut grid = VertexGrid::new(tol.weld_distance);
    let mut report = CleanupReport::default();
    let mut faces = Vec::with_capacity(mesh.face_count());

    for face in mesh.faces() {
        let face = if face.normal().y < 0.0 {
            report.flipped += 1;
            face.flipped()
        } else {
            *face
        };

        let welded = Face::new(
            snap(&mut grid, face.a, tol),
            snap(&mut grid, face.b, tol),
            snap(&mut grid, face.c, tol),
        );
        if welded.is_degenerate(tol) || welded.normal().y <= 0.0 {
            report.dropped += 1;
            continue;
        }
        faces.push(welded);
    }

    report.vertices = grid.len();
    if report.flipped + report.dropped > 0 {
        log::debug!(
            "cleanup flipped {} and dropped {} faces",
            report.flipped,
            report.dropped
        );
    }
    *mesh = Mesh::from_faces(faces);
    report
}

fn snap(grid: &mut VertexGrid, vertex: DVec3, tol: &TolerancePolicy) -> DVec3 {
    if let Some(existing) = grid.nearest(vertex) {
        return existing;
    }
    let rounded = DVec3::new(tol.round(vertex.x), tol.round(vertex.y), tol.round(vertex.z));
    if let Some(existing) = grid.nearest(rounded) {
        return existing;
    }
    grid.insert(rounded);
    rounded
}
