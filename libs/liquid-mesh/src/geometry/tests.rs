//! Tests for the geometry primitives.

use super::*;
use approx::assert_relative_eq;
use config::TolerancePolicy;
use glam::DVec3;
use proptest::prelude::*;

fn p(x: f64, z: f64) -> DVec3 {
    DVec3::new(x, 0.0, z)
}

fn unit_triangle() -> Face {
    // Wound so the normal points up.
    Face::new(p(0.0, 0.0), p(0.0, 1.0), p(1.0, 0.0))
}

// =============================================================================
// FACE
// =============================================================================

#[test]
fn test_face_equality_under_permutation() {
    let f = unit_triangle();
    assert_eq!(f, Face::new(f.b, f.c, f.a));
    assert_eq!(f, Face::new(f.c, f.a, f.b));
    assert_eq!(f, f.flipped());
    assert_ne!(f, Face::new(f.a, f.b, p(2.0, 0.0)));
}

#[test]
fn test_face_normal_points_up() {
    let f = unit_triangle();
    assert!(f.is_facing_up());
    assert_relative_eq!(f.normal().y, 1.0);
    assert!(!f.flipped().is_facing_up());
    assert!(f.flipped().facing_up().is_facing_up());
}

#[test]
fn test_face_area() {
    let f = unit_triangle();
    assert_relative_eq!(f.area(), 0.5);
    assert_relative_eq!(f.area_xz(), 0.5);
}

#[test]
fn test_face_degenerate_cases() {
    let tol = TolerancePolicy::default();
    assert!(!unit_triangle().is_degenerate(&tol));
    assert!(Face::new(p(0.0, 0.0), p(0.0, 0.0), p(1.0, 0.0)).is_degenerate(&tol));
    assert!(Face::new(p(0.0, 0.0), p(0.5, 0.0), p(1.0, 0.0)).is_degenerate(&tol));
}

#[test]
fn test_face_contains() {
    let tol = TolerancePolicy::default();
    let f = unit_triangle();
    assert!(f.contains(p(0.2, 0.2), false, &tol));
    assert!(f.contains(p(0.5, 0.0), true, &tol));
    assert!(!f.contains(p(0.5, 0.0), false, &tol));
    assert!(!f.contains(p(0.8, 0.8), true, &tol));
}

#[test]
fn test_face_height_at() {
    let f = Face::new(
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(0.0, 2.0, 1.0),
        DVec3::new(1.0, 4.0, 0.0),
    );
    assert_relative_eq!(f.height_at(0.0, 0.0), 0.0);
    assert_relative_eq!(f.height_at(1.0, 0.0), 4.0);
    assert_relative_eq!(f.height_at(0.0, 0.5), 1.0);
    assert_relative_eq!(f.height_at(0.25, 0.25), 1.5);
}

#[test]
fn test_face_shrunk_keeps_centroid() {
    let f = unit_triangle();
    let s = f.shrunk(0.5);
    assert_relative_eq!(s.centroid().x, f.centroid().x, epsilon = 1e-12);
    assert_relative_eq!(s.centroid().z, f.centroid().z, epsilon = 1e-12);
    assert_relative_eq!(s.area(), f.area() * 0.25, epsilon = 1e-12);
}

#[test]
fn test_face_approx_eq() {
    let f = unit_triangle();
    let g = Face::new(f.c + DVec3::splat(1e-5), f.a, f.b);
    assert!(f.approx_eq(&g, 1e-3));
    assert!(!f.approx_eq(&g, 1e-6));
}

#[test]
fn test_face_bounding_circle() {
    let f = unit_triangle();
    let (center, radius) = f.bounding_circle();
    for v in f.vertices() {
        assert!(distance_xz(v, center) <= radius + 1e-12);
    }
}

// =============================================================================
// POLYGON
// =============================================================================

#[test]
fn test_inside_polygon_square() {
    let tol = TolerancePolicy::default();
    let c = [p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
    let edges: Vec<Edge> = (0..4).map(|i| Edge::new(c[i], c[(i + 1) % 4])).collect();
    assert!(inside_polygon(p(0.5, 0.5), &edges, false, &tol));
    assert!(inside_polygon(p(1.0, 1.0), &edges, true, &tol));
    assert!(!inside_polygon(p(1.0, 1.0), &edges, false, &tol));
    assert!(!inside_polygon(p(1.5, 0.5), &edges, true, &tol));
}

#[test]
fn test_inside_polygon_needs_three_edges() {
    let tol = TolerancePolicy::default();
    let edges = [Edge::new(p(0.0, 0.0), p(1.0, 0.0))];
    assert!(!inside_polygon(p(0.5, 0.0), &edges, true, &tol));
}

#[test]
fn test_point_key_normalizes_negative_zero() {
    assert_eq!(point_key(DVec3::new(-0.0, 0.0, 1.0)), point_key(DVec3::new(0.0, -0.0, 1.0)));
}

// =============================================================================
// PROPERTIES
// =============================================================================

fn coord() -> impl Strategy<Value = f64> {
    -100.0f64..100.0
}

fn point() -> impl Strategy<Value = DVec3> {
    (coord(), coord(), coord()).prop_map(|(x, y, z)| DVec3::new(x, y, z))
}

proptest! {
    #[test]
    fn prop_face_equality_ignores_order(a in point(), b in point(), c in point()) {
        let f = Face::new(a, b, c);
        prop_assert_eq!(f, Face::new(c, b, a));
        prop_assert_eq!(f, Face::new(b, c, a));
        prop_assert!(f.approx_eq(&Face::new(b, a, c), 1e-9));
    }

    #[test]
    fn prop_edge_equality_is_undirected(a in point(), b in point()) {
        prop_assert_eq!(Edge::new(a, b), Edge::new(b, a));
    }

    #[test]
    fn prop_facing_up_is_up_unless_flat(a in point(), b in point(), c in point()) {
        let f = Face::new(a, b, c).facing_up();
        prop_assert!(f.normal().y >= 0.0);
    }

    #[test]
    fn prop_intersection_is_symmetric_in_xz(a in point(), b in point(), c in point(), d in point()) {
        let tol = TolerancePolicy::default();
        let e1 = Edge::new(a, b);
        let e2 = Edge::new(c, d);
        let lhs = e1.intersect(&e2, true, &tol);
        let rhs = e2.intersect(&e1, true, &tol);
        prop_assert_eq!(lhs.is_some(), rhs.is_some());
        if let (Some(l), Some(r)) = (lhs, rhs) {
            prop_assert!(distance_xz(l, r) < 1e-4);
        }
    }
}
