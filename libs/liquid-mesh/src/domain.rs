//! # Liquid Domain
//!
//! The read-only view of the world grid consumed by the tessellator: a
//! per-cell liquid query and the circular region it is evaluated over.

use crate::error::MeshError;
use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Liquid state of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellLiquid {
    /// Cell has no terrain data.
    NoData,
    /// Plain liquid surface.
    Liquid,
    /// Liquid carrying a swamp cutout; tessellated coarsely.
    Swamp,
    /// Dry land.
    Land,
}

impl CellLiquid {
    /// Returns true for cells that receive a water surface.
    #[inline]
    pub fn is_wet(self) -> bool {
        matches!(self, CellLiquid::Liquid | CellLiquid::Swamp)
    }
}

/// Per-cell liquid query.
///
/// Implementations must be pure: the same cell always reports the same
/// state. Any `Fn(i32, i32) -> CellLiquid` is a domain.
pub trait LiquidDomain {
    /// Liquid state of cell `(x, y)`.
    fn cell(&self, x: i32, y: i32) -> CellLiquid;
}

impl<F> LiquidDomain for F
where
    F: Fn(i32, i32) -> CellLiquid,
{
    fn cell(&self, x: i32, y: i32) -> CellLiquid {
        self(x, y)
    }
}

/// Integer grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    pub x: i32,
    pub y: i32,
}

impl CellCoord {
    #[inline]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbours in side order: south (-y), east (+x), north (+y), west (-x).
    pub fn neighbors(self) -> [CellCoord; 4] {
        [
            CellCoord::new(self.x, self.y - 1),
            CellCoord::new(self.x + 1, self.y),
            CellCoord::new(self.x, self.y + 1),
            CellCoord::new(self.x - 1, self.y),
        ]
    }
}

/// Circular region of the grid, in cell units.
///
/// Grid `x` maps to world X and grid `y` maps to world Z.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircularDomain {
    /// Center in cell units.
    pub center: DVec2,
    /// Radius in cell units.
    pub radius: f64,
}

impl CircularDomain {
    /// Creates a domain, rejecting non-positive or non-finite radii.
    ///
    /// # Example
    ///
    /// ```rust
    /// use liquid_mesh::domain::CircularDomain;
    /// use glam::DVec2;
    ///
    /// let domain = CircularDomain::new(DVec2::new(1.5, 1.5), 1.5).unwrap();
    /// assert_eq!(domain.cells().len(), 9);
    /// assert!(CircularDomain::new(DVec2::ZERO, 0.0).is_err());
    /// ```
    pub fn new(center: DVec2, radius: f64) -> Result<Self, MeshError> {
        if !(radius > 0.0) || !radius.is_finite() {
            return Err(MeshError::invalid_domain(format!(
                "radius must be positive and finite: {radius}"
            )));
        }
        if !center.is_finite() {
            return Err(MeshError::invalid_domain(format!(
                "center must be finite: {center}"
            )));
        }
        Ok(Self { center, radius })
    }

    /// Returns true if the center of cell `coord` lies within the radius.
    #[inline]
    pub fn contains_cell(&self, coord: CellCoord) -> bool {
        let cell_center = DVec2::new(coord.x as f64 + 0.5, coord.y as f64 + 0.5);
        cell_center.distance(self.center) <= self.radius
    }

    /// All in-domain cells, row by row.
    pub fn cells(&self) -> Vec<CellCoord> {
        let min_x = (self.center.x - self.radius).floor() as i32 - 1;
        let max_x = (self.center.x + self.radius).ceil() as i32 + 1;
        let min_y = (self.center.y - self.radius).floor() as i32 - 1;
        let max_y = (self.center.y + self.radius).ceil() as i32 + 1;

        let mut cells = Vec::new();
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let coord = CellCoord::new(x, y);
                if self.contains_cell(coord) {
                    cells.push(coord);
                }
            }
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_domain() {
        let dry = |x: i32, _y: i32| if x < 0 { CellLiquid::Land } else { CellLiquid::Liquid };
        assert_eq!(dry.cell(-1, 0), CellLiquid::Land);
        assert!(dry.cell(2, 0).is_wet());
        assert!(!CellLiquid::NoData.is_wet());
    }

    #[test]
    fn test_cells_in_small_domain() {
        let domain = CircularDomain::new(DVec2::new(1.5, 1.5), 1.5).unwrap();
        let cells = domain.cells();
        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], CellCoord::new(0, 0));
        assert_eq!(cells[8], CellCoord::new(2, 2));
    }

    #[test]
    fn test_contains_cell_uses_cell_center() {
        let domain = CircularDomain::new(DVec2::new(0.0, 0.0), 1.0).unwrap();
        assert!(domain.contains_cell(CellCoord::new(0, 0)));
        assert!(domain.contains_cell(CellCoord::new(-1, -1)));
        assert!(!domain.contains_cell(CellCoord::new(1, 0)));
    }

    #[test]
    fn test_invalid_radius() {
        assert!(CircularDomain::new(DVec2::ZERO, -1.0).is_err());
        assert!(CircularDomain::new(DVec2::ZERO, f64::NAN).is_err());
    }

    #[test]
    fn test_neighbors_order() {
        let n = CellCoord::new(0, 0).neighbors();
        assert_eq!(n[0], CellCoord::new(0, -1));
        assert_eq!(n[1], CellCoord::new(1, 0));
    }
}
