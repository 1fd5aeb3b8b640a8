//! # Shaped Cutout
//!
//! A cutout whose footprint is an imported polygon, stored as an explicit
//! world-space triangle list. Its outline is the set of boundary edges of
//! that list.

use super::{CutoutKind, Region};
use crate::error::MeshError;
use crate::geometry::{point_key, Edge, Face};
use config::TolerancePolicy;
use glam::{DQuat, DVec2, DVec3};
use std::collections::HashMap;

/// Cutout backed by an arbitrary triangle list.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapedCutout {
    kind: CutoutKind,
    center: DVec2,
    height: f64,
    rotation_y: f64,
    /// Max local XZ distance of any vertex from the local origin.
    size: f64,
    /// World-space faces, upward facing.
    faces: Vec<Face>,
    /// Boundary edges, chained where they connect.
    boundary: Vec<Edge>,
}

impl ShapedCutout {
    /// Places a local-space triangle list in the world.
    ///
    /// Only local X and Z are used; every vertex is lifted to `height`.
    /// Degenerate triangles are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::InvalidDomain`] when no usable triangle remains
    /// or the placement is not finite.
    pub fn new(
        kind: CutoutKind,
        local_faces: &[Face],
        center: DVec2,
        rotation_y: f64,
        height: f64,
        tol: &TolerancePolicy,
    ) -> Result<Self, MeshError> {
        if !center.is_finite() || !rotation_y.is_finite() || !height.is_finite() {
            return Err(MeshError::invalid_domain("shaped cutout placement must be finite"));
        }

        let rotation = DQuat::from_rotation_y(rotation_y);
        let origin = DVec3::new(center.x, height, center.y);
        let place = |v: DVec3| origin + rotation * DVec3::new(v.x, 0.0, v.z);

        let mut size: f64 = 0.0;
        let mut faces = Vec::with_capacity(local_faces.len());
        for local in local_faces {
            let face = Face::new(place(local.a), place(local.b), place(local.c));
            if face.is_degenerate(tol) {
                log::warn!("skipping degenerate triangle in {kind} shape");
                continue;
            }
            for v in local.vertices() {
                size = size.max(DVec2::new(v.x, v.z).length());
            }
            faces.push(face.facing_up());
        }

        if faces.is_empty() {
            return Err(MeshError::invalid_domain(format!(
                "{kind} shape has no usable triangles"
            )));
        }

        let boundary = boundary_edges(&faces);
        Ok(Self {
            kind,
            center,
            height,
            rotation_y,
            size,
            faces,
            boundary,
        })
    }

    /// Imports a shape from Wavefront OBJ text.
    ///
    /// Reads `v x y z` and `f i j k ...` records. Face indices may carry
    /// `/vt/vn` suffixes and may be negative (relative to the vertices read
    /// so far). Polygons are fan-triangulated. Other records are ignored.
    /// Degenerate triangles are filtered with `tol`, as in [`Self::new`].
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::ShapeImport`] with the 1-based line number for
    /// malformed records, and for sources without any face.
    ///
    /// # Example
    ///
    /// ```rust
    /// use liquid_mesh::cutout::{CutoutKind, Region, ShapedCutout};
    /// use config::TolerancePolicy;
    /// use glam::DVec2;
    ///
    /// let obj = "v -1 0 -1\nv -1 0 1\nv 1 0 1\nv 1 0 -1\nf 1 2 3 4\n";
    /// let tol = TolerancePolicy::default();
    /// let shape =
    ///     ShapedCutout::from_obj(CutoutKind::Swamp, obj, DVec2::ZERO, 0.0, 0.5, &tol).unwrap();
    /// assert_eq!(shape.faces().len(), 2);
    /// assert_eq!(shape.edges().len(), 4);
    /// ```
    pub fn from_obj(
        kind: CutoutKind,
        source: &str,
        center: DVec2,
        rotation_y: f64,
        height: f64,
        tol: &TolerancePolicy,
    ) -> Result<Self, MeshError> {
        let mut vertices: Vec<DVec3> = Vec::new();
        let mut faces: Vec<Face> = Vec::new();
        let mut line_count = 0;

        for (number, raw) in source.lines().enumerate() {
            let line_no = number + 1;
            line_count = line_no;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut tokens = line.split_whitespace();
            match tokens.next() {
                Some("v") => {
                    let mut coords = [0.0f64; 3];
                    for slot in &mut coords {
                        let token = tokens
                            .next()
                            .ok_or_else(|| MeshError::shape_import(line_no, "vertex needs three coordinates"))?;
                        *slot = token.parse().map_err(|_| {
                            MeshError::shape_import(line_no, format!("invalid coordinate '{token}'"))
                        })?;
                    }
                    vertices.push(DVec3::from_array(coords));
                }
                Some("f") => {
                    let corners = tokens
                        .map(|token| resolve_index(token, vertices.len(), line_no))
                        .collect::<Result<Vec<_>, _>>()?;
                    if corners.len() < 3 {
                        return Err(MeshError::shape_import(line_no, "face needs at least three vertices"));
                    }
                    for i in 1..corners.len() - 1 {
                        faces.push(Face::new(
                            vertices[corners[0]],
                            vertices[corners[i]],
                            vertices[corners[i + 1]],
                        ));
                    }
                }
                _ => {}
            }
        }

        if faces.is_empty() {
            return Err(MeshError::shape_import(line_count, "source contains no faces"));
        }

        Self::new(kind, &faces, center, rotation_y, height, tol)
    }

    /// Derived bounding radius in local units.
    #[inline]
    pub fn size(&self) -> f64 {
        self.size
    }

    /// Rotation about +Y in radians.
    #[inline]
    pub fn rotation_y(&self) -> f64 {
        self.rotation_y
    }

    /// Boundary edges of the triangle list.
    #[inline]
    pub fn boundary(&self) -> &[Edge] {
        &self.boundary
    }
}

/// Resolves a 1-based or negative OBJ index against `count` vertices.
fn resolve_index(token: &str, count: usize, line_no: usize) -> Result<usize, MeshError> {
    let head = token.split('/').next().unwrap_or(token);
    let index: i64 = head
        .parse()
        .map_err(|_| MeshError::shape_import(line_no, format!("invalid index '{token}'")))?;

    let resolved = if index > 0 {
        index - 1
    } else {
        count as i64 + index
    };
    if index == 0 || resolved < 0 || resolved >= count as i64 {
        return Err(MeshError::shape_import(
            line_no,
            format!("index {index} out of range ({count} vertices)"),
        ));
    }
    Ok(resolved as usize)
}

/// Edges used by exactly one face, in face winding, chained end to start.
fn boundary_edges(faces: &[Face]) -> Vec<Edge> {
    let mut uses: HashMap<([u64; 3], [u64; 3]), usize> = HashMap::new();
    let key = |e: &Edge| {
        let (ka, kb) = (point_key(e.a), point_key(e.b));
        if ka <= kb {
            (ka, kb)
        } else {
            (kb, ka)
        }
    };
    for face in faces {
        for edge in face.edges() {
            *uses.entry(key(&edge)).or_insert(0) += 1;
        }
    }

    let open: Vec<Edge> = faces
        .iter()
        .flat_map(|f| f.edges())
        .filter(|e| uses.get(&key(e)) == Some(&1))
        .collect();

    // Chain: follow each edge's end to the open edge starting there.
    let mut by_start: HashMap<[u64; 3], Vec<usize>> = HashMap::new();
    for (i, edge) in open.iter().enumerate() {
        by_start.entry(point_key(edge.a)).or_default().push(i);
    }
    let mut used = vec![false; open.len()];
    let mut chained = Vec::with_capacity(open.len());
    for start in 0..open.len() {
        let mut current = start;
        while !used[current] {
            used[current] = true;
            chained.push(open[current]);
            let next = by_start
                .get(&point_key(open[current].b))
                .and_then(|candidates| candidates.iter().copied().find(|&i| !used[i]));
            match next {
                Some(i) => current = i,
                None => break,
            }
        }
    }
    chained
}

impl Region for ShapedCutout {
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
        self.size
    }

    fn points(&self) -> Vec<DVec3> {
        self.boundary.iter().map(|e| e.a).collect()
    }

    fn edges(&self) -> Vec<Edge> {
        self.boundary.clone()
    }

    fn faces(&self) -> Vec<Face> {
        self.faces.clone()
    }

    fn inside(&self, point: DVec3, edge_inclusive: bool, tol: &TolerancePolicy) -> bool {
        let covered = self.faces.iter().any(|f| f.contains(point, true, tol));
        if edge_inclusive || !covered {
            return covered;
        }
        !self.boundary.iter().any(|e| e.touches(point, tol))
    }
}
