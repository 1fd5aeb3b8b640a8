//! # Vertex Grid
//!
//! Spatial hash of registered vertices for nearest-within-radius lookups.
//! Cells are as large as the search radius, so a query only has to look at
//! the 27 cells around the query point.

use glam::DVec3;
use std::collections::HashMap;

/// 3D cell coordinate for spatial hashing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct GridCell {
    x: i64,
    y: i64,
    z: i64,
}

impl GridCell {
    /// Creates a cell coordinate from 3D position.
    fn from_position(pos: DVec3, cell_size: f64) -> Self {
        Self {
            x: (pos.x / cell_size).floor() as i64,
            y: (pos.y / cell_size).floor() as i64,
            z: (pos.z / cell_size).floor() as i64,
        }
    }
}

/// Registry of welded vertices.
#[derive(Debug)]
pub(crate) struct VertexGrid {
    /// Hash grid: cell -> vertex indices
    grid: HashMap<GridCell, Vec<usize>>,
    vertices: Vec<DVec3>,
    cell_size: f64,
}

impl VertexGrid {
    /// Creates an empty grid whose cells are `radius` wide.
    pub(crate) fn new(radius: f64) -> Self {
        Self {
            grid: HashMap::new(),
            vertices: Vec::new(),
            cell_size: radius,
        }
    }

    /// Number of registered vertices.
    pub(crate) fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Registers a vertex.
    pub(crate) fn insert(&mut self, vertex: DVec3) {
        let cell = GridCell::from_position(vertex, self.cell_size);
        self.grid.entry(cell).or_default().push(self.vertices.len());
        self.vertices.push(vertex);
    }

    /// Closest registered vertex strictly closer than the cell size.
    ///
    /// Ties go to the vertex registered first.
    pub(crate) fn nearest(&self, point: DVec3) -> Option<DVec3> {
        let center = GridCell::from_position(point, self.cell_size);
        let mut best: Option<(f64, usize)> = None;

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let cell = GridCell {
                        x: center.x + dx,
                        y: center.y + dy,
                        z: center.z + dz,
                    };
                    let Some(indices) = self.grid.get(&cell) else {
                        continue;
                    };
                    for &index in indices {
                        let distance = self.vertices[index].distance(point);
                        if distance >= self.cell_size {
                            continue;
                        }
                        let better = match best {
                            None => true,
                            Some((d, i)) => distance < d || (distance == d && index < i),
                        };
                        if better {
                            best = Some((distance, index));
                        }
                    }
                }
            }
        }

        best.map(|(_, index)| self.vertices[index])
    }
}
