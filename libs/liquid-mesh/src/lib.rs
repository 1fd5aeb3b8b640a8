//! # Liquid Mesh
//!
//! Liquid surface synthesis for a world-scale grid.
//! Turns a per-cell liquid map into triangle meshes with lava and swamp
//! cutouts carved out.
//!
//! ## Architecture
//!
//! ```text
//! LiquidDomain + CircularDomain
//!     → tessellate (fine pass, infill, closure)
//!     → ops::subtract (one cutout at a time)
//!     → ops::cleanup (weld, orient, filter)
//!     → Mesh / IndexedMesh
//! ```
//!
//! ## Algorithms
//!
//! All geometry is evaluated in the XZ plane with Y up:
//! - **Tessellation**: exact rational lattice, checkerboard diagonals
//! - **Clipping**: three clip cases (containment, vertex clip, edge clip)
//! - **Triangulation**: greedy nearest-first candidate search
//! - **Welding**: spatial hash snap with decimal rounding
//!
//! ## Usage
//!
//! ```rust
//! use liquid_mesh::{Baker, CellLiquid, CircularDomain, CutoutRegistry};
//! use config::BakeSettings;
//! use glam::DVec2;
//!
//! let domain = |_x: i32, _y: i32| CellLiquid::Liquid;
//! let circle = CircularDomain::new(DVec2::new(1.0, 1.0), 1.0).unwrap();
//! let settings = BakeSettings::new(2, 1.0).unwrap();
//!
//! let surfaces = Baker::new(&domain, circle, settings)
//!     .unwrap()
//!     .bake(&CutoutRegistry::new())
//!     .unwrap();
//! assert!(surfaces.water.validate(&settings.tolerance));
//! ```

pub mod bake;
pub mod cutout;
pub mod domain;
pub mod error;
pub mod geometry;
pub mod mesh;
pub mod ops;
pub mod progress;
pub mod tessellate;

pub use bake::{cutout_surface, BakedSurfaces, Baker};
pub use cutout::{Cutout, CutoutKind, CutoutRegistry, Region, ShapedCutout};
pub use domain::{CellCoord, CellLiquid, CircularDomain, LiquidDomain};
pub use error::MeshError;
pub use geometry::{Edge, Face};
pub use mesh::{IndexedMesh, Mesh};
pub use progress::{BakeStage, NoProgress, Progress};
