//! # Configuration Constants
//!
//! Centralized constants and validated settings for the liquid surface
//! pipeline. Geometry code never spells out an epsilon literal; it reads the
//! matching field of [`TolerancePolicy`].
//!
//! ## Categories
//!
//! - **Precision**: tolerance families used by intersection, containment,
//!   equality and welding
//! - **Tessellation**: grid subdivision defaults and limits
//! - **Boundary**: circular closure parameters

use std::fmt;

// =============================================================================
// PRECISION CONSTANTS
// =============================================================================

/// Distance below which two independently computed points are the same.
///
/// Used when merging intersection results, welding outline endpoints and
/// comparing a retriangulated face with its source face.
///
/// # Examples
/// ```
/// use config::constants::POINT_MERGE_EPSILON;
/// assert!(POINT_MERGE_EPSILON < 0.01);
/// ```
pub const POINT_MERGE_EPSILON: f64 = 1.0e-3;

/// Snap radius of the final cleanup pass.
///
/// Matches the resolution of [`SNAP_DECIMALS`] so that two freshly rounded
/// vertices never fall within each other's snap radius.
pub const WELD_DISTANCE: f64 = 1.0e-2;

/// Slack for the strict triangle inequality in degeneracy tests.
pub const DEGENERATE_EPSILON: f64 = 1.0e-9;

/// Sine of the angle below which two segments are treated as parallel.
pub const PARALLEL_EPSILON: f64 = 1.0e-9;

/// Perpendicular distance within which a point lies on a polygon edge.
pub const ON_EDGE_EPSILON: f64 = 1.0e-6;

/// Scale applied to a candidate triangle for the shrink check.
///
/// # Examples
/// ```
/// use config::constants::SHRINK_FACTOR;
/// assert!(SHRINK_FACTOR > 0.0 && SHRINK_FACTOR < 1.0);
/// ```
pub const SHRINK_FACTOR: f64 = 0.9;

/// Decimal places kept when a vertex is registered by the welder.
pub const SNAP_DECIMALS: u32 = 2;

/// Largest supported value for [`SNAP_DECIMALS`]-style settings.
pub const MAX_SNAP_DECIMALS: u32 = 9;

// =============================================================================
// TESSELLATION CONSTANTS
// =============================================================================

/// Default number of subdivisions per grid cell in the fine pass.
pub const DEFAULT_TESSELLATION_FACTOR: u32 = 4;

/// Upper bound for the tessellation factor.
///
/// A cell at this factor already emits 2 * 64 * 64 triangles.
pub const MAX_TESSELLATION_FACTOR: u32 = 64;

/// Default world-space edge length of one grid cell.
pub const DEFAULT_CELL_SIZE: f64 = 8192.0;

/// Default height of the generated water plane.
pub const DEFAULT_WATER_LEVEL: f64 = 0.0;

/// Default cap on neighbours examined per point by the greedy triangulator.
///
/// Enumeration stays nearest-first; the cap only truncates the tail.
pub const DEFAULT_CANDIDATE_LIMIT: usize = 32;

// =============================================================================
// BOUNDARY CONSTANTS
// =============================================================================

/// Extra radius (in cells) of the closure circle beyond the domain radius.
pub const CLOSURE_MARGIN: f64 = 0.05;

/// Minimum number of segments of the closure circle.
pub const MIN_CIRCLE_SEGMENTS: u32 = 16;

/// Maximum number of segments of the closure circle.
pub const MAX_CIRCLE_SEGMENTS: u32 = 4096;

// =============================================================================
// TOLERANCE POLICY
// =============================================================================

/// Tolerances used by every geometric predicate of the pipeline.
///
/// Each field covers one family of call sites. The defaults reproduce the
/// values the baking tools have always used; they are deliberately not
/// unified (see crate docs).
///
/// # Examples
/// ```
/// use config::constants::TolerancePolicy;
/// let tol = TolerancePolicy::default().with_weld_distance(0.5).validate().unwrap();
/// assert_eq!(tol.weld_distance, 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TolerancePolicy {
    /// Tolerant point equality (intersection merging, no-op detection).
    pub point_merge: f64,
    /// Cleanup snap radius.
    pub weld_distance: f64,
    /// Slack of the strict triangle inequality.
    pub degenerate: f64,
    /// Parallel-segment threshold (sine of the enclosed angle).
    pub parallel: f64,
    /// On-edge distance for containment tests.
    pub on_edge: f64,
    /// Scale of the shrink check.
    pub shrink_factor: f64,
    /// Decimal places kept when registering welded vertices.
    pub snap_decimals: u32,
}

impl Default for TolerancePolicy {
    fn default() -> Self {
        Self {
            point_merge: POINT_MERGE_EPSILON,
            weld_distance: WELD_DISTANCE,
            degenerate: DEGENERATE_EPSILON,
            parallel: PARALLEL_EPSILON,
            on_edge: ON_EDGE_EPSILON,
            shrink_factor: SHRINK_FACTOR,
            snap_decimals: SNAP_DECIMALS,
        }
    }
}

impl TolerancePolicy {
    /// Returns a copy with a different point-merge tolerance.
    pub fn with_point_merge(mut self, value: f64) -> Self {
        self.point_merge = value;
        self
    }

    /// Returns a copy with a different weld distance.
    pub fn with_weld_distance(mut self, value: f64) -> Self {
        self.weld_distance = value;
        self
    }

    /// Returns a copy with a different snap precision.
    pub fn with_snap_decimals(mut self, value: u32) -> Self {
        self.snap_decimals = value;
        self
    }

    /// Checks every field and returns the policy unchanged when valid.
    ///
    /// # Examples
    /// ```
    /// use config::constants::{ConfigError, TolerancePolicy};
    /// let err = TolerancePolicy::default().with_point_merge(0.0).validate().unwrap_err();
    /// assert_eq!(err, ConfigError::InvalidTolerance { name: "point_merge", value: 0.0 });
    /// ```
    pub fn validate(self) -> Result<Self, ConfigError> {
        let positive = [
            ("point_merge", self.point_merge),
            ("weld_distance", self.weld_distance),
            ("degenerate", self.degenerate),
            ("parallel", self.parallel),
            ("on_edge", self.on_edge),
        ];
        for (name, value) in positive {
            if !(value > 0.0) || !value.is_finite() {
                return Err(ConfigError::InvalidTolerance { name, value });
            }
        }
        if !(self.shrink_factor > 0.0 && self.shrink_factor < 1.0) {
            return Err(ConfigError::InvalidShrinkFactor(self.shrink_factor));
        }
        if self.snap_decimals > MAX_SNAP_DECIMALS {
            return Err(ConfigError::InvalidSnapDecimals(self.snap_decimals));
        }
        Ok(self)
    }

    /// Rounds a coordinate to the configured snap precision.
    ///
    /// # Examples
    /// ```
    /// use config::constants::TolerancePolicy;
    /// let tol = TolerancePolicy::default();
    /// assert_eq!(tol.round(1.23456), 1.23);
    /// assert_eq!(tol.round(tol.round(7.777)), tol.round(7.777));
    /// ```
    #[inline]
    pub fn round(&self, value: f64) -> f64 {
        round_to(value, self.snap_decimals)
    }
}

// =============================================================================
// BAKE SETTINGS
// =============================================================================

/// Parameters of one surface bake.
///
/// # Examples
/// ```
/// use config::constants::BakeSettings;
/// let settings = BakeSettings::new(2, 1.0).expect("valid settings");
/// assert_eq!(settings.tessellation_factor, 2);
/// assert!(settings.close_boundary);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BakeSettings {
    /// Sub-divisions per cell in the fine pass.
    pub tessellation_factor: u32,
    /// World-space edge length of one cell.
    pub cell_size: f64,
    /// Y coordinate of the generated surface.
    pub water_level: f64,
    /// Whether the circular boundary closure runs.
    pub close_boundary: bool,
    /// Neighbour cap of the greedy triangulator (`None` = unbounded).
    pub candidate_limit: Option<usize>,
    /// Geometric tolerances.
    pub tolerance: TolerancePolicy,
}

impl BakeSettings {
    /// Builds settings with default tolerances, validating the grid values.
    pub fn new(tessellation_factor: u32, cell_size: f64) -> Result<Self, ConfigError> {
        Self {
            tessellation_factor,
            cell_size,
            ..Self::default()
        }
        .validate()
    }

    /// Returns a copy with the circular closure toggled.
    pub fn with_closure(mut self, close_boundary: bool) -> Self {
        self.close_boundary = close_boundary;
        self
    }

    /// Returns a copy at a different water level.
    pub fn with_water_level(mut self, water_level: f64) -> Self {
        self.water_level = water_level;
        self
    }

    /// Returns a copy with a different tolerance policy.
    pub fn with_tolerance(mut self, tolerance: TolerancePolicy) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Checks every field and returns the settings unchanged when valid.
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.tessellation_factor == 0 || self.tessellation_factor > MAX_TESSELLATION_FACTOR {
            return Err(ConfigError::InvalidTessellationFactor(self.tessellation_factor));
        }
        if !(self.cell_size > 0.0) || !self.cell_size.is_finite() {
            return Err(ConfigError::InvalidCellSize(self.cell_size));
        }
        if self.candidate_limit == Some(0) {
            return Err(ConfigError::InvalidCandidateLimit);
        }
        self.tolerance.validate()?;
        Ok(self)
    }
}

impl Default for BakeSettings {
    fn default() -> Self {
        Self {
            tessellation_factor: DEFAULT_TESSELLATION_FACTOR,
            cell_size: DEFAULT_CELL_SIZE,
            water_level: DEFAULT_WATER_LEVEL,
            close_boundary: true,
            candidate_limit: Some(DEFAULT_CANDIDATE_LIMIT),
            tolerance: TolerancePolicy::default(),
        }
    }
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// A tolerance is zero, negative or not finite.
    InvalidTolerance {
        /// Field name.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Shrink factor outside the open interval (0, 1).
    InvalidShrinkFactor(f64),
    /// Snap precision beyond [`MAX_SNAP_DECIMALS`].
    InvalidSnapDecimals(u32),
    /// Tessellation factor of zero or above [`MAX_TESSELLATION_FACTOR`].
    InvalidTessellationFactor(u32),
    /// Cell size is zero, negative or not finite.
    InvalidCellSize(f64),
    /// A candidate limit of zero would never accept a triangle.
    InvalidCandidateLimit,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTolerance { name, value } => {
                write!(f, "tolerance '{name}' must be positive and finite: {value}")
            }
            ConfigError::InvalidShrinkFactor(value) => {
                write!(f, "shrink_factor must lie in (0, 1): {value}")
            }
            ConfigError::InvalidSnapDecimals(value) => {
                write!(f, "snap_decimals must be <= {MAX_SNAP_DECIMALS}: {value}")
            }
            ConfigError::InvalidTessellationFactor(value) => {
                write!(
                    f,
                    "tessellation_factor must be in 1..={MAX_TESSELLATION_FACTOR}: {value}"
                )
            }
            ConfigError::InvalidCellSize(value) => {
                write!(f, "cell_size must be positive and finite: {value}")
            }
            ConfigError::InvalidCandidateLimit => {
                write!(f, "candidate_limit must be at least 1")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Rounds `value` to `decimals` decimal places.
///
/// Rounding an already rounded value returns it unchanged, which keeps the
/// welder idempotent.
///
/// # Examples
/// ```
/// use config::constants::round_to;
/// assert_eq!(round_to(2.345678, 2), 2.35);
/// assert_eq!(round_to(-0.004, 2), 0.0);
/// ```
#[inline]
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    // Collapse -0.0 so exact comparisons agree.
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Number of segments for the closure circle of a domain.
///
/// One segment per cell of circumference, clamped to
/// [`MIN_CIRCLE_SEGMENTS`]..=[`MAX_CIRCLE_SEGMENTS`].
///
/// # Examples
/// ```
/// use config::constants::{circle_segments, MIN_CIRCLE_SEGMENTS};
/// assert_eq!(circle_segments(0.5), MIN_CIRCLE_SEGMENTS);
/// assert_eq!(circle_segments(10.0), 63);
/// ```
pub fn circle_segments(radius_cells: f64) -> u32 {
    let segments = (std::f64::consts::TAU * radius_cells).ceil();
    if !segments.is_finite() || segments < MIN_CIRCLE_SEGMENTS as f64 {
        return MIN_CIRCLE_SEGMENTS;
    }
    (segments as u32).min(MAX_CIRCLE_SEGMENTS)
}
