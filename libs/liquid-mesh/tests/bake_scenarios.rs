//! End-to-end bakes over small domains.

use approx::assert_relative_eq;
use config::{BakeSettings, TolerancePolicy};
use glam::{DVec2, DVec3};
use liquid_mesh::ops::cleanup;
use liquid_mesh::{
    cutout_surface, BakeStage, Baker, CellCoord, CellLiquid, CircularDomain, Cutout, CutoutKind,
    CutoutRegistry, Face, Mesh, MeshError,
};
use std::collections::HashMap;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn three_by_three() -> CircularDomain {
    CircularDomain::new(DVec2::new(1.5, 1.5), 1.5).unwrap()
}

fn swamp_center(x: i32, y: i32) -> CellLiquid {
    if (x, y) == (1, 1) {
        CellLiquid::Swamp
    } else {
        CellLiquid::Liquid
    }
}

fn cell_of(face: &Face) -> CellCoord {
    let c = face.centroid();
    CellCoord::new(c.x.floor() as i32, c.z.floor() as i32)
}

fn faces_per_cell(mesh: &Mesh) -> HashMap<CellCoord, Vec<Face>> {
    let mut cells: HashMap<CellCoord, Vec<Face>> = HashMap::new();
    for face in mesh.faces() {
        cells.entry(cell_of(face)).or_default().push(*face);
    }
    cells
}

fn assert_excluded(mesh: &Mesh, samples: &[DVec3]) {
    let tol = TolerancePolicy::default();
    for sample in samples {
        for face in mesh.faces() {
            assert!(
                !face.contains(*sample, false, &tol),
                "{face:?} covers cutout point {sample}"
            );
        }
    }
}

fn p(x: f64, z: f64) -> DVec3 {
    DVec3::new(x, 0.0, z)
}

// =============================================================================
// 3×3 SCENARIO
// =============================================================================

#[test]
fn test_three_by_three_with_swamp_cutout() {
    init_logger();
    let settings = BakeSettings::new(2, 1.0).unwrap().with_closure(false);
    let baker = Baker::new(&swamp_center, three_by_three(), settings).unwrap();

    let mut registry = CutoutRegistry::new();
    registry
        .push(Cutout::square(CutoutKind::Swamp, DVec2::new(1.5, 1.5), 0.0, 0.0, 0.25))
        .unwrap();

    let surfaces = baker.bake(&registry).unwrap();
    let water = &surfaces.water;
    let cells = faces_per_cell(water);

    assert_eq!(cells.len(), 9);
    for (cell, faces) in &cells {
        if *cell == CellCoord::new(1, 1) {
            assert!(faces.len() > 2, "swamp cell has {} faces", faces.len());
            let area: f64 = faces.iter().map(Face::area).sum();
            assert_relative_eq!(area, 0.75, epsilon = 1e-6);
        } else {
            assert_eq!(faces.len(), 8, "cell {cell:?}");
        }
    }

    assert!(water.validate(&settings.tolerance));
    assert_excluded(water, &[p(1.5, 1.5), p(1.3, 1.3), p(1.7, 1.3), p(1.3, 1.7), p(1.7, 1.7)]);
    assert_eq!(surfaces.stats.subtract.regions, 1);

    let swamp = surfaces.swamp.expect("swamp surface");
    assert_eq!(swamp.face_count(), 2);
    assert_relative_eq!(swamp.area(), 0.25, epsilon = 1e-9);
    assert!(surfaces.lava.is_none());
}

#[test]
fn test_cleanup_after_bake_is_stable() {
    let settings = BakeSettings::new(2, 1.0).unwrap().with_closure(false);
    let baker = Baker::new(&swamp_center, three_by_three(), settings).unwrap();
    let mut registry = CutoutRegistry::new();
    registry
        .push(Cutout::square(CutoutKind::Lava, DVec2::new(1.5, 1.5), 0.0, 0.0, 0.25))
        .unwrap();

    let mut water = baker.bake(&registry).unwrap().water;
    let before = water.to_indexed();
    let report = cleanup(&mut water, &settings.tolerance);

    assert_eq!(report.flipped, 0);
    assert_eq!(report.dropped, 0);
    assert_eq!(water.to_indexed(), before);
}

#[test]
fn test_cell_collision() {
    let settings = BakeSettings::new(2, 1.0).unwrap().with_closure(false);
    let baker = Baker::new(&swamp_center, three_by_three(), settings).unwrap();
    let mut registry = CutoutRegistry::new();
    registry
        .push(Cutout::square(CutoutKind::Swamp, DVec2::new(1.5, 1.5), 0.0, 0.0, 0.25))
        .unwrap();

    let holed = baker.cell_collision(1, 1, &registry);
    assert!(holed.face_count() >= 8);
    assert_relative_eq!(holed.area(), 0.75, epsilon = 1e-9);
    assert_excluded(&holed, &[p(1.5, 1.5), p(1.3, 1.6)]);

    let plain = baker.cell_collision(0, 0, &registry);
    assert_eq!(plain.face_count(), 2);
    assert_relative_eq!(plain.area(), 1.0, epsilon = 1e-9);

    assert!(baker.cell_collision(7, 7, &registry).is_empty());
}

// =============================================================================
// CUTOUT SURFACES
// =============================================================================

#[test]
fn test_cutout_surface_requires_cutouts() {
    let registry = CutoutRegistry::new();
    let err = cutout_surface(&registry, CutoutKind::Lava, &BakeSettings::default()).unwrap_err();
    assert!(matches!(err, MeshError::EmptyCutoutList { ref kind } if kind == "lava"));
}

#[test]
fn test_nested_lava_is_not_doubled() {
    let registry = CutoutRegistry::from_cutouts([
        Cutout::square(CutoutKind::Lava, DVec2::ZERO, 0.0, 0.0, 1.0),
        Cutout::square(CutoutKind::Lava, DVec2::new(0.2, 0.1), 0.0, 0.0, 0.3),
    ])
    .unwrap();

    let lava = cutout_surface(&registry, CutoutKind::Lava, &BakeSettings::default()).unwrap();
    assert_eq!(lava.face_count(), 2);
    assert_relative_eq!(lava.area(), 4.0, epsilon = 1e-9);
}

#[test]
fn test_swamp_under_lava_disappears() {
    let registry = CutoutRegistry::from_cutouts([
        Cutout::square(CutoutKind::Lava, DVec2::ZERO, 0.0, 0.0, 1.0),
        Cutout::square(CutoutKind::Swamp, DVec2::new(-0.2, 0.3), 0.0, 0.0, 0.4),
        Cutout::square(CutoutKind::Swamp, DVec2::new(5.0, 5.0), 0.0, 0.0, 0.5),
    ])
    .unwrap();

    let swamp = cutout_surface(&registry, CutoutKind::Swamp, &BakeSettings::default()).unwrap();
    assert_eq!(swamp.face_count(), 2);
    assert_relative_eq!(swamp.area(), 1.0, epsilon = 1e-9);
}

// =============================================================================
// CLOSURE
// =============================================================================

#[test]
fn test_bake_with_closure_and_progress() {
    init_logger();
    let settings = BakeSettings::new(2, 1.0).unwrap();
    let domain = |_x: i32, _y: i32| CellLiquid::Liquid;
    let circle = CircularDomain::new(DVec2::ZERO, 4.0).unwrap();
    let baker = Baker::new(&domain, circle, settings).unwrap();

    let mut registry = CutoutRegistry::new();
    registry
        .push(Cutout::square(CutoutKind::Lava, DVec2::new(0.3, 0.3), 0.0, 0.4, 0.6))
        .unwrap();

    let mut stages = Vec::new();
    let mut progress = |stage: BakeStage, _done: usize, _total: usize| {
        if stages.last() != Some(&stage) {
            stages.push(stage);
        }
    };
    let surfaces = baker.bake_with_progress(&registry, &mut progress).unwrap();

    assert_eq!(
        stages,
        vec![
            BakeStage::FinePass,
            BakeStage::Infill,
            BakeStage::Closure,
            BakeStage::Subtract,
            BakeStage::Cleanup,
        ]
    );
    assert!(surfaces.water.validate(&settings.tolerance));
    assert_excluded(&surfaces.water, &[p(0.3, 0.3), p(0.5, 0.2), p(0.1, 0.45)]);
    assert!(surfaces.lava.is_some());
}

#[test]
fn test_invalid_settings_are_rejected() {
    let domain = |_x: i32, _y: i32| CellLiquid::Liquid;
    let circle = CircularDomain::new(DVec2::ZERO, 2.0).unwrap();
    let mut settings = BakeSettings::default();
    settings.tessellation_factor = 0;

    let result = Baker::new(&domain, circle, settings);
    assert!(matches!(result, Err(MeshError::InvalidSettings(_))));
}
