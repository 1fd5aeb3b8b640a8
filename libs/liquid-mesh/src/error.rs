//! # Mesh Errors
//!
//! Structural failures that abort a bake. Geometric edge cases never end up
//! here; they are recovered locally and logged.

use config::ConfigError;
use thiserror::Error;

/// Errors that can occur while baking liquid surfaces.
#[derive(Debug, Error)]
pub enum MeshError {
    /// A surface was requested for a kind with no cutouts.
    #[error("No cutouts of kind {kind} to build a surface from")]
    EmptyCutoutList { kind: String },

    /// Imported shaped-cutout source could not be read.
    #[error("Shape import failed at line {line}: {message}")]
    ShapeImport { line: usize, message: String },

    /// Invalid bake settings or tolerances.
    #[error("Invalid settings: {0}")]
    InvalidSettings(#[from] ConfigError),

    /// Invalid domain or cutout description.
    #[error("Invalid domain: {message}")]
    InvalidDomain { message: String },
}

impl MeshError {
    /// Creates an empty cutout list error.
    pub fn empty_cutouts(kind: impl ToString) -> Self {
        Self::EmptyCutoutList {
            kind: kind.to_string(),
        }
    }

    /// Creates a shape import error.
    pub fn shape_import(line: usize, message: impl Into<String>) -> Self {
        Self::ShapeImport {
            line,
            message: message.into(),
        }
    }

    /// Creates an invalid domain error.
    pub fn invalid_domain(message: impl Into<String>) -> Self {
        Self::InvalidDomain {
            message: message.into(),
        }
    }
}
