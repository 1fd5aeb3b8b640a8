//! # Mesh Operations
//!
//! Operations on liquid meshes: greedy triangulation of outlines, cutout
//! subtraction and the final weld/cleanup pass.

pub mod subtract;
pub mod triangulate;
pub mod weld;

pub use subtract::{ClipCase, ClipContext, ClipKind, SubtractStats, Subtractor};
pub use triangulate::Triangulator;
pub use weld::{cleanup, CleanupReport};
