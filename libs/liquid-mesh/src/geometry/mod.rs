//! # Geometry Primitives
//!
//! Immutable segment and triangle value types used by every stage of the
//! pipeline. All shape math happens in the XZ plane; Y only carries the
//! surface height and is interpolated, never tested.
//!
//! ## Equality tiers
//!
//! - **Exact** (`PartialEq`): bitwise coordinates, used for deduplication
//!   while a mesh is being assembled.
//! - **Tolerant** (`approx_eq`): distance below
//!   [`TolerancePolicy::point_merge`](config::TolerancePolicy), used when
//!   merging results of independent intersection computations.

mod edge;
mod face;
mod polygon;

#[cfg(test)]
mod tests;

pub use edge::Edge;
pub use face::Face;
pub use polygon::{cross_xz, distance_xz, inside_polygon, point_key, points_approx_eq, signed_distance};
