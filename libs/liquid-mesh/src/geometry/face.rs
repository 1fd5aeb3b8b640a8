//! # Face
//!
//! Triangle value type. Equality ignores vertex order, so a face and its
//! flipped or rotated copy compare equal.

use super::edge::Edge;
use super::polygon::{cross_xz, distance_xz, inside_polygon, points_approx_eq};
use config::TolerancePolicy;
use glam::DVec3;

/// A triangle defined by three points.
#[derive(Debug, Clone, Copy)]
pub struct Face {
    pub a: DVec3,
    pub b: DVec3,
    pub c: DVec3,
}

/// The six vertex orderings of a triangle, as indices into `[a, b, c]`.
const PERMUTATIONS: [[usize; 3]; 6] = [
    [0, 1, 2],
    [1, 2, 0],
    [2, 0, 1],
    [0, 2, 1],
    [2, 1, 0],
    [1, 0, 2],
];

impl PartialEq for Face {
    fn eq(&self, other: &Self) -> bool {
        let lhs = self.vertices();
        let rhs = other.vertices();
        PERMUTATIONS
            .iter()
            .any(|p| lhs[0] == rhs[p[0]] && lhs[1] == rhs[p[1]] && lhs[2] == rhs[p[2]])
    }
}

impl Face {
    /// Creates a face from three points.
    #[inline]
    pub fn new(a: DVec3, b: DVec3, c: DVec3) -> Self {
        Self { a, b, c }
    }

    /// Vertices in winding order.
    #[inline]
    pub fn vertices(&self) -> [DVec3; 3] {
        [self.a, self.b, self.c]
    }

    /// Edges `ab`, `bc`, `ca`.
    #[inline]
    pub fn edges(&self) -> [Edge; 3] {
        [
            Edge::new(self.a, self.b),
            Edge::new(self.b, self.c),
            Edge::new(self.c, self.a),
        ]
    }

    /// Unit normal of `cross(b - a, c - a)`, or zero for a degenerate face.
    pub fn normal(&self) -> DVec3 {
        (self.b - self.a).cross(self.c - self.a).normalize_or_zero()
    }

    /// Surface area in 3D.
    pub fn area(&self) -> f64 {
        (self.b - self.a).cross(self.c - self.a).length() * 0.5
    }

    /// Area of the XZ projection.
    pub fn area_xz(&self) -> f64 {
        cross_xz(self.b - self.a, self.c - self.a).abs() * 0.5
    }

    /// Mean of the three vertices.
    #[inline]
    pub fn centroid(&self) -> DVec3 {
        (self.a + self.b + self.c) / 3.0
    }

    /// Returns true if two vertices coincide or the triangle inequality is
    /// not strict.
    ///
    /// # Example
    ///
    /// ```rust
    /// use liquid_mesh::geometry::Face;
    /// use config::TolerancePolicy;
    /// use glam::DVec3;
    ///
    /// let tol = TolerancePolicy::default();
    /// let sliver = Face::new(
    ///     DVec3::new(0.0, 0.0, 0.0),
    ///     DVec3::new(1.0, 0.0, 0.0),
    ///     DVec3::new(2.0, 0.0, 0.0),
    /// );
    /// assert!(sliver.is_degenerate(&tol));
    /// ```
    pub fn is_degenerate(&self, tol: &TolerancePolicy) -> bool {
        let eps = tol.degenerate;
        if points_approx_eq(self.a, self.b, eps)
            || points_approx_eq(self.b, self.c, eps)
            || points_approx_eq(self.c, self.a, eps)
        {
            return true;
        }

        let mut sides = [
            self.a.distance(self.b),
            self.b.distance(self.c),
            self.c.distance(self.a),
        ];
        sides.sort_by(f64::total_cmp);
        sides[0] + sides[1] <= sides[2] + eps
    }

    /// Same triangle with reversed winding.
    #[inline]
    pub fn flipped(&self) -> Face {
        Face::new(self.a, self.c, self.b)
    }

    /// Returns true if the normal points towards +Y.
    #[inline]
    pub fn is_facing_up(&self) -> bool {
        self.normal().y > 0.0
    }

    /// Returns this face wound so that its normal points towards +Y.
    pub fn facing_up(&self) -> Face {
        if self.normal().y < 0.0 {
            self.flipped()
        } else {
            *self
        }
    }

    /// Returns this face wound the same way as `reference`.
    pub fn oriented_like(&self, reference: &Face) -> Face {
        if self.normal().y * reference.normal().y < 0.0 {
            self.flipped()
        } else {
            *self
        }
    }

    /// XZ containment over the face's own edges.
    pub fn contains(&self, point: DVec3, inclusive: bool, tol: &TolerancePolicy) -> bool {
        inside_polygon(point, &self.edges(), inclusive, tol)
    }

    /// Y of the face plane at `(x, z)`, by barycentric interpolation in XZ.
    ///
    /// Falls back to the mean height for faces with no XZ extent.
    pub fn height_at(&self, x: f64, z: f64) -> f64 {
        let p = DVec3::new(x, 0.0, z);
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        let det = cross_xz(ab, ac);
        if det == 0.0 {
            return (self.a.y + self.b.y + self.c.y) / 3.0;
        }
        let ap = p - self.a;
        let wb = cross_xz(ap, ac) / det;
        let wc = cross_xz(ab, ap) / det;
        let wa = 1.0 - wb - wc;
        wa * self.a.y + wb * self.b.y + wc * self.c.y
    }

    /// Copy scaled about the centroid.
    pub fn shrunk(&self, factor: f64) -> Face {
        let center = self.centroid();
        Face::new(
            center + (self.a - center) * factor,
            center + (self.b - center) * factor,
            center + (self.c - center) * factor,
        )
    }

    /// Tolerant equality under any vertex permutation.
    pub fn approx_eq(&self, other: &Face, epsilon: f64) -> bool {
        let lhs = self.vertices();
        let rhs = other.vertices();
        PERMUTATIONS.iter().any(|p| {
            points_approx_eq(lhs[0], rhs[p[0]], epsilon)
                && points_approx_eq(lhs[1], rhs[p[1]], epsilon)
                && points_approx_eq(lhs[2], rhs[p[2]], epsilon)
        })
    }

    /// XZ bounding circle as `(center, radius)`, centered on the centroid.
    pub fn bounding_circle(&self) -> (DVec3, f64) {
        let center = self.centroid();
        let radius = self
            .vertices()
            .iter()
            .map(|v| distance_xz(*v, center))
            .fold(0.0, f64::max);
        (center, radius)
    }

    /// Axis-aligned XZ bounds as `(min_x, min_z, max_x, max_z)`.
    pub fn bounds_xz(&self) -> (f64, f64, f64, f64) {
        (
            self.a.x.min(self.b.x).min(self.c.x),
            self.a.z.min(self.b.z).min(self.c.z),
            self.a.x.max(self.b.x).max(self.c.x),
            self.a.z.max(self.b.z).max(self.c.z),
        )
    }
}
