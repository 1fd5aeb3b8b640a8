//! Tests for cutout regions and the registry.

use super::*;
use approx::assert_relative_eq;
use std::f64::consts::FRAC_PI_4;

fn p(x: f64, z: f64) -> DVec3 {
    DVec3::new(x, 0.0, z)
}

fn default_tol() -> TolerancePolicy {
    TolerancePolicy::default()
}

/// Imports at the origin with the default tolerance.
fn import(kind: CutoutKind, obj: &str) -> Result<ShapedCutout, MeshError> {
    ShapedCutout::from_obj(kind, obj, DVec2::ZERO, 0.0, 0.0, &default_tol())
}

fn lava(x: f64, z: f64, half: f64) -> Cutout {
    Cutout::square(CutoutKind::Lava, DVec2::new(x, z), 0.0, 0.0, half)
}

#[test]
fn test_cutout_faces_face_up() {
    let c = Cutout::new(CutoutKind::Swamp, DVec2::new(1.0, 2.0), 3.0, 0.3, DVec2::new(2.0, 1.0));
    for face in c.faces() {
        assert!(face.is_facing_up());
        assert_relative_eq!(face.a.y, 3.0);
    }
    let area: f64 = c.faces().iter().map(Face::area).sum();
    assert_relative_eq!(area, 8.0, epsilon = 1e-9);
}

#[test]
fn test_cutout_rotation() {
    let c = Cutout::square(CutoutKind::Lava, DVec2::ZERO, 0.0, FRAC_PI_4, 1.0);
    let tol = TolerancePolicy::default();
    // A diamond now reaches sqrt(2) along the axes.
    assert!(c.inside(p(1.3, 0.0), false, &tol));
    assert!(!c.inside(p(0.9, 0.9), true, &tol));
    assert_relative_eq!(c.bounding_radius(), 2f64.sqrt());
}

#[test]
fn test_cutout_inside_edge_inclusion() {
    let c = lava(0.0, 0.0, 1.0);
    let tol = TolerancePolicy::default();
    assert!(c.inside(p(1.0, 0.0), true, &tol));
    assert!(!c.inside(p(1.0, 0.0), false, &tol));
    assert!(c.inside(p(1.0, 1.0), true, &tol));
}

#[test]
fn test_cutout_validate() {
    assert!(lava(0.0, 0.0, 1.0).validate().is_ok());
    assert!(lava(0.0, 0.0, 0.0).validate().is_err());
    assert!(lava(f64::NAN, 0.0, 1.0).validate().is_err());
}

#[test]
fn test_intersects_by_corner() {
    let tol = TolerancePolicy::default();
    let a = lava(0.0, 0.0, 1.0);
    assert!(a.intersects(&lava(1.5, 1.5, 1.0), &tol));
    assert!(a.intersects(&lava(0.0, 0.0, 0.25), &tol));
    assert!(!a.intersects(&lava(5.0, 0.0, 1.0), &tol));
}

#[test]
fn test_intersects_misses_cross_overlap() {
    // A plus sign: the bars overlap but no corner is inside the other bar.
    let tol = TolerancePolicy::default();
    let wide = Cutout::new(CutoutKind::Lava, DVec2::ZERO, 0.0, 0.0, DVec2::new(3.0, 0.5));
    let tall = Cutout::new(CutoutKind::Lava, DVec2::ZERO, 0.0, 0.0, DVec2::new(0.5, 3.0));
    assert!(!wide.intersects(&tall, &tol));
}

#[test]
fn test_shaped_from_obj_triangle() {
    let obj = "# a triangle\nv 0 0 0\nv 0 5 1\nv 1 0 0\nvt 0 0\nf 1/1 2/1 3/1\n";
    let center = DVec2::new(10.0, 10.0);
    let shape =
        ShapedCutout::from_obj(CutoutKind::Swamp, obj, center, 0.0, 2.0, &default_tol()).unwrap();
    let tol = TolerancePolicy::default();
    assert_eq!(shape.faces().len(), 1);
    assert_eq!(shape.points().len(), 3);
    assert_relative_eq!(shape.size(), 1.0);
    assert_relative_eq!(shape.height(), 2.0);
    assert!(shape.faces()[0].is_facing_up());
    assert!(shape.inside(p(10.2, 10.2), false, &tol));
    assert!(!shape.inside(p(10.5, 10.0), false, &tol));
    assert!(shape.inside(p(10.5, 10.0), true, &tol));
}

#[test]
fn test_shaped_negative_indices() {
    let obj = "v 0 0 0\nv 0 0 1\nv 1 0 0\nf -3 -2 -1\n";
    let shape = import(CutoutKind::Lava, obj).unwrap();
    assert_eq!(shape.faces().len(), 1);
}

#[test]
fn test_shaped_import_errors() {
    let err = import(CutoutKind::Lava, "v 0 0\n").unwrap_err();
    assert!(matches!(err, MeshError::ShapeImport { line: 1, .. }));

    let err = import(CutoutKind::Lava, "v 0 0 0\nf 1 2 3\n").unwrap_err();
    assert!(matches!(err, MeshError::ShapeImport { line: 2, .. }));

    let err = import(CutoutKind::Lava, "v 0 0 0\n").unwrap_err();
    assert!(matches!(err, MeshError::ShapeImport { .. }));

    let err = import(CutoutKind::Lava, "v a 0 0\n").unwrap_err();
    assert!(matches!(err, MeshError::ShapeImport { line: 1, .. }));
}

#[test]
fn test_shaped_import_uses_caller_tolerance() {
    let obj = "v 0 0 0\nv 0 0 4\nv 4 0 0\nv 10 0 0\nv 5 0 0.1\nf 1 2 3\nf 1 4 5\n";
    let strict = import(CutoutKind::Lava, obj).unwrap();
    assert_eq!(strict.faces().len(), 2);

    let loose = TolerancePolicy {
        degenerate: 0.5,
        ..TolerancePolicy::default()
    };
    let filtered = ShapedCutout::from_obj(CutoutKind::Lava, obj, DVec2::ZERO, 0.0, 0.0, &loose)
        .unwrap();
    assert_eq!(filtered.faces().len(), 1);
}

#[test]
fn test_shaped_boundary_chains_outline() {
    let obj = "v -1 0 -1\nv -1 0 1\nv 1 0 1\nv 1 0 -1\nf 1 2 3 4\n";
    let shape = import(CutoutKind::Swamp, obj).unwrap();
    let edges = shape.edges();
    assert_eq!(edges.len(), 4);
    for i in 0..edges.len() {
        assert_eq!(edges[i].b, edges[(i + 1) % edges.len()].a);
    }
}

#[test]
fn test_registry_order_and_kinds() {
    let mut registry = CutoutRegistry::new();
    registry.push(lava(0.0, 0.0, 1.0)).unwrap();
    registry
        .push(Cutout::square(CutoutKind::Swamp, DVec2::new(0.5, 0.5), 0.0, 0.0, 1.0))
        .unwrap();
    registry.push(lava(10.0, 0.0, 1.0)).unwrap();

    assert_eq!(registry.len(), 3);
    assert_eq!(registry.of_kind(CutoutKind::Lava).count(), 2);
    assert_eq!(registry.iter().next().map(Region::kind), Some(CutoutKind::Lava));

    let tol = TolerancePolicy::default();
    let query = lava(0.2, 0.2, 0.1);
    assert_eq!(registry.overlapping(&query, &tol).count(), 2);
}

#[test]
fn test_registry_rejects_invalid() {
    let mut registry = CutoutRegistry::new();
    assert!(registry.push(lava(0.0, 0.0, -1.0)).is_err());
    assert!(registry.is_empty());
    assert!(CutoutRegistry::from_cutouts([lava(0.0, 0.0, 1.0)]).is_ok());
}
