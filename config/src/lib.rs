//! # Config Crate
//!
//! Centralized configuration for the liquid surface baking pipeline.
//! Every floating-point tolerance and tunable parameter used by the
//! tessellator, the cutout clipper and the welder is defined here.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{BakeSettings, TolerancePolicy, DEFAULT_TESSELLATION_FACTOR};
//!
//! let settings = BakeSettings::default();
//! assert_eq!(settings.tessellation_factor, DEFAULT_TESSELLATION_FACTOR);
//!
//! let tol = TolerancePolicy::default();
//! assert!(tol.point_merge > tol.degenerate);
//! ```
//!
//! ## Tolerance families
//!
//! Call sites of the clipper need tolerances ranging from 0.001 to 0.1.
//! Each family is a named field of [`constants::TolerancePolicy`]; they are
//! not interchangeable.

pub mod constants;

pub use constants::{BakeSettings, ConfigError, TolerancePolicy};
