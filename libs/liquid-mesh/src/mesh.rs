//! # Mesh Data Structure
//!
//! A liquid surface is an ordered list of faces with no adjacency. All
//! queries are brute force over the list; the subtraction engine replaces
//! faces in place and keeps the order stable.

use crate::geometry::{point_key, Face};
use config::TolerancePolicy;
use glam::DVec3;
use std::collections::HashMap;

/// An ordered triangle soup.
///
/// # Example
///
/// ```rust
/// use liquid_mesh::{Face, Mesh};
/// use glam::DVec3;
///
/// let mut mesh = Mesh::new();
/// mesh.add_face(Face::new(
///     DVec3::new(0.0, 0.0, 0.0),
///     DVec3::new(0.0, 0.0, 1.0),
///     DVec3::new(1.0, 0.0, 0.0),
/// ));
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    faces: Vec<Face>,
}

impl Mesh {
    /// Creates an empty mesh.
    pub fn new() -> Self {
        Self { faces: Vec::new() }
    }

    /// Creates a mesh with pre-allocated capacity.
    pub fn with_capacity(face_count: usize) -> Self {
        Self {
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Creates a mesh that takes ownership of `faces`.
    pub fn from_faces(faces: Vec<Face>) -> Self {
        Self { faces }
    }

    /// Returns the number of faces.
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Returns true if the mesh has no faces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Appends a face.
    #[inline]
    pub fn add_face(&mut self, face: Face) {
        self.faces.push(face);
    }

    /// Returns the faces in order.
    #[inline]
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Returns the face at `index`, if any.
    #[inline]
    pub fn face(&self, index: usize) -> Option<&Face> {
        self.faces.get(index)
    }

    /// Consumes the mesh, returning its faces.
    pub fn into_faces(self) -> Vec<Face> {
        self.faces
    }

    /// Replaces the face at `index` by `replacement`, keeping order.
    ///
    /// Returns the index just past the inserted faces.
    pub fn replace_face(&mut self, index: usize, replacement: Vec<Face>) -> usize {
        let end = index + replacement.len();
        self.faces.splice(index..=index, replacement);
        end
    }

    /// Appends all faces of `other`.
    pub fn merge(&mut self, other: &Mesh) {
        self.faces.extend_from_slice(&other.faces);
    }

    /// Total surface area.
    pub fn area(&self) -> f64 {
        self.faces.iter().map(Face::area).sum()
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some(first) = self.faces.first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };

        let mut min = first.a;
        let mut max = first.a;
        for face in &self.faces {
            for v in face.vertices() {
                min = min.min(v);
                max = max.max(v);
            }
        }
        (min, max)
    }

    /// Translates the mesh by a vector.
    pub fn translate(&mut self, offset: DVec3) {
        for face in &mut self.faces {
            face.a += offset;
            face.b += offset;
            face.c += offset;
        }
    }

    /// Validates the mesh for correctness.
    ///
    /// Checks:
    /// - No degenerate faces
    /// - Every normal points towards +Y
    ///
    /// Returns true if valid.
    pub fn validate(&self, tol: &TolerancePolicy) -> bool {
        self.faces
            .iter()
            .all(|f| !f.is_degenerate(tol) && f.normal().y > 0.0)
    }

    /// Number of faces using each undirected edge, keyed by exact endpoints.
    fn edge_uses(&self) -> HashMap<([u64; 3], [u64; 3]), (DVec3, DVec3, usize)> {
        let mut uses = HashMap::new();
        for face in &self.faces {
            for edge in face.edges() {
                let (ka, kb) = (point_key(edge.a), point_key(edge.b));
                let key = if ka <= kb { (ka, kb) } else { (kb, ka) };
                uses.entry(key).or_insert((edge.a, edge.b, 0)).2 += 1;
            }
        }
        uses
    }

    /// Edges used by exactly one face, as endpoint pairs.
    ///
    /// The order is unspecified.
    pub fn open_edges(&self) -> Vec<(DVec3, DVec3)> {
        self.edge_uses()
            .into_values()
            .filter(|(_, _, count)| *count == 1)
            .map(|(a, b, _)| (a, b))
            .collect()
    }

    /// Edges used by more than two faces.
    pub fn overused_edge_count(&self) -> usize {
        self.edge_uses()
            .values()
            .filter(|(_, _, count)| *count > 2)
            .count()
    }

    /// Builds an indexed copy with exactly shared vertices.
    pub fn to_indexed(&self) -> IndexedMesh {
        let mut index: HashMap<[u64; 3], u32> = HashMap::new();
        let mut vertices = Vec::new();
        let mut triangles = Vec::with_capacity(self.faces.len());

        for face in &self.faces {
            let mut tri = [0u32; 3];
            for (slot, v) in tri.iter_mut().zip(face.vertices()) {
                *slot = *index.entry(point_key(v)).or_insert_with(|| {
                    vertices.push(v);
                    (vertices.len() - 1) as u32
                });
            }
            triangles.push(tri);
        }

        IndexedMesh {
            vertices,
            triangles,
        }
    }
}

impl From<Vec<Face>> for Mesh {
    fn from(faces: Vec<Face>) -> Self {
        Self::from_faces(faces)
    }
}

/// Vertex/index form of a [`Mesh`] for serializers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IndexedMesh {
    /// Unique vertex positions.
    pub vertices: Vec<DVec3>,
    /// Triangle vertex indices.
    pub triangles: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Exports vertices as a flattened [x, y, z, x, y, z, ...] f32 array.
    pub fn vertices_f32(&self) -> Vec<f32> {
        let mut result = Vec::with_capacity(self.vertices.len() * 3);
        for v in &self.vertices {
            result.push(v.x as f32);
            result.push(v.y as f32);
            result.push(v.z as f32);
        }
        result
    }

    /// Exports triangle indices as a flattened u32 array.
    pub fn indices_u32(&self) -> Vec<u32> {
        self.triangles.iter().flatten().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, z: f64) -> DVec3 {
        DVec3::new(x, 0.0, z)
    }

    fn unit_square() -> Mesh {
        Mesh::from_faces(vec![
            Face::new(p(0.0, 0.0), p(1.0, 1.0), p(1.0, 0.0)),
            Face::new(p(0.0, 0.0), p(0.0, 1.0), p(1.0, 1.0)),
        ])
    }

    #[test]
    fn test_mesh_new() {
        let mesh = Mesh::new();
        assert!(mesh.is_empty());
        assert_eq!(mesh.face_count(), 0);
        assert_eq!(mesh.bounding_box(), (DVec3::ZERO, DVec3::ZERO));
    }

    #[test]
    fn test_mesh_area_and_bounds() {
        let mesh = unit_square();
        assert!((mesh.area() - 1.0).abs() < 1e-12);
        assert_eq!(mesh.bounding_box(), (p(0.0, 0.0), p(1.0, 1.0)));
    }

    #[test]
    fn test_mesh_validate() {
        let tol = TolerancePolicy::default();
        let mut mesh = unit_square();
        assert!(mesh.validate(&tol));
        mesh.add_face(Face::new(p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)));
        assert!(!mesh.validate(&tol));
    }

    #[test]
    fn test_open_edges_of_square() {
        let mesh = unit_square();
        assert_eq!(mesh.open_edges().len(), 4);
        assert_eq!(mesh.overused_edge_count(), 0);
    }

    #[test]
    fn test_replace_face_keeps_order() {
        let mut mesh = unit_square();
        let extra = Face::new(p(5.0, 5.0), p(5.0, 6.0), p(6.0, 5.0));
        let next = mesh.replace_face(0, vec![extra, extra]);
        assert_eq!(next, 2);
        assert_eq!(mesh.face_count(), 3);
        assert_eq!(mesh.face(0), Some(&extra));
        assert_eq!(mesh.face(2), unit_square().face(1));

        let next = mesh.replace_face(0, Vec::new());
        assert_eq!(next, 0);
        assert_eq!(mesh.face_count(), 2);
    }

    #[test]
    fn test_to_indexed_shares_vertices() {
        let indexed = unit_square().to_indexed();
        assert_eq!(indexed.vertex_count(), 4);
        assert_eq!(indexed.triangle_count(), 2);
        assert_eq!(indexed.indices_u32().len(), 6);
        assert_eq!(indexed.vertices_f32().len(), 12);
    }

    #[test]
    fn test_mesh_merge_and_translate() {
        let mut mesh = unit_square();
        let mut other = unit_square();
        other.translate(DVec3::new(1.0, 0.0, 0.0));
        mesh.merge(&other);
        assert_eq!(mesh.face_count(), 4);
        assert_eq!(mesh.bounding_box().1, p(2.0, 1.0));
    }
}
