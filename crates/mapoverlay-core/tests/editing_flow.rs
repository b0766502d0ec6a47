//! End-to-end authoring, editing and selection flows through `MapEngine`.

use mapoverlay_core::geo::{destination, distance_m};
use mapoverlay_core::measure::{circle_area, format_area, format_length};
use mapoverlay_core::shapes::{Polygon, SerializableColor, ShapeInfo, ShapeTrait};
use mapoverlay_core::{
    DragHandle, EditError, EngineConfig, LatLng, MapEngine, Mode, PointOutcome, Shape, ShapeKind,
};
use uuid::Uuid;

fn engine() -> MapEngine {
    MapEngine::new(EngineConfig::default()).unwrap()
}

fn triangle() -> [LatLng; 3] {
    [
        LatLng::new(40.70, -74.02),
        LatLng::new(40.72, -74.00),
        LatLng::new(40.70, -73.98),
    ]
}

#[test]
fn test_circle_area_of_one_kilometer_displays_as_3_14() {
    assert_eq!(format_area(circle_area(1000.0)), "3.14");
    assert!(circle_area(999.0) < circle_area(1000.0));
}

#[test]
fn test_length_formatting() {
    assert_eq!(format_length(500.0), "500m");
    assert_eq!(format_length(1500.0), "1.5km");
}

#[test]
fn test_two_point_polygon_is_not_committed() {
    let mut engine = engine();
    engine.start_authoring(ShapeKind::Polygon);
    for p in &triangle()[..2] {
        engine.click(*p).unwrap();
    }

    assert!(matches!(
        engine.finish(),
        Err(EditError::InsufficientPoints { staged: 2, required: 3, .. })
    ));
    assert_eq!(engine.mode(), Mode::Collecting);
    assert!(engine.store.is_empty());
}

#[test]
fn test_three_point_polygon_commits_in_order() {
    let mut engine = engine();
    engine.start_authoring(ShapeKind::Polygon);
    for p in triangle() {
        engine.click(p).unwrap();
    }

    let report = engine.finish().unwrap();
    assert_eq!(engine.mode(), Mode::Idle);
    let polygons: Vec<&Polygon> = engine.store.polygons().collect();
    assert_eq!(polygons.len(), 1);
    assert_eq!(polygons[0].paths, triangle().to_vec());
    assert_eq!(polygons[0].id(), report.id);
}

#[test]
fn test_cancel_discards_staged_points() {
    let mut engine = engine();
    engine.start_authoring(ShapeKind::Polygon);
    for p in triangle() {
        engine.click(p).unwrap();
    }
    engine.cancel();

    assert_eq!(engine.mode(), Mode::Idle);
    assert_eq!(engine.controller.staged_count(), 0);
    assert!(engine.store.is_empty());
    assert_eq!(engine.click(triangle()[0]), Ok(PointOutcome::Ignored));
}

#[test]
fn test_clear_all_circles_makes_selection_stale() {
    let mut engine = engine();
    let mut ids = Vec::new();
    for p in triangle() {
        engine.start_authoring(ShapeKind::Circle);
        match engine.click(p).unwrap() {
            PointOutcome::Committed(report) => ids.push(report.id),
            other => panic!("expected commit, got {other:?}"),
        }
    }
    assert_eq!(engine.store.count(ShapeKind::Circle), 3);

    engine.select(ids[1]);
    assert!(engine.selected_shape().is_some());

    assert_eq!(engine.clear_all(ShapeKind::Circle), 3);
    assert_eq!(engine.store.list(ShapeKind::Circle).count(), 0);
    assert!(engine.selected_shape().is_none());
    assert!(engine.selection_details().is_none());
}

#[test]
fn test_edge_drag_sets_radius_to_exact_distance() {
    let mut engine = engine();
    engine.controller.start_editing();
    let center = engine.controller.editable_circle().center;
    let edge = LatLng::new(center.lat + 0.013, center.lng - 0.004);

    engine.drag(DragHandle::Edge, edge).unwrap();
    assert_eq!(engine.controller.editable_circle().radius(), distance_m(center, edge));
    assert_eq!(engine.mode(), Mode::Idle);
}

#[test]
fn test_move_then_resize_uses_new_center() {
    let mut engine = engine();
    engine.controller.start_editing();
    let new_center = LatLng::new(51.5, -0.12);
    engine.drag(DragHandle::Center, new_center).unwrap();

    let edge = destination(new_center, 45.0, 750.0);
    engine.drag(DragHandle::Edge, edge).unwrap();
    let circle = engine.controller.editable_circle();
    assert_eq!(circle.center, new_center);
    assert_eq!(circle.radius(), distance_m(new_center, edge));
}

#[test]
fn test_drag_onto_center_is_rejected_and_reverted() {
    let mut engine = engine();
    engine.controller.start_editing();
    let before = engine.controller.editable_circle().clone();

    let err = engine.drag(DragHandle::Edge, before.center).unwrap_err();
    assert_eq!(err, EditError::InvalidRadius(0.0));
    assert_eq!(engine.controller.editable_circle(), &before);
    assert_eq!(engine.mode(), Mode::Idle);
}

#[test]
fn test_locked_circle_cannot_be_dragged() {
    let mut engine = engine();
    assert_eq!(
        engine.drag(DragHandle::Center, LatLng::new(0.0, 0.0)),
        Err(EditError::NotEditable)
    );
}

#[test]
fn test_zone_selection_is_not_toggled_by_reclick() {
    let id = Uuid::new_v4();
    let zone = Polygon::zone(
        id,
        triangle().to_vec(),
        SerializableColor::rgb(0, 255, 0),
        SerializableColor::black(),
        ShapeInfo::new("Zone 1", "Warehouse district"),
    );
    let mut engine = engine().with_shapes([Shape::from(zone)]);

    engine.select(id);
    engine.select(id);
    let details = engine.selection_details().unwrap();
    assert_eq!(details.kind, ShapeKind::Polygon);
    assert_eq!(details.description.as_deref(), Some("Warehouse district"));

    engine.clear_selection();
    assert!(engine.selected_shape().is_none());
}

#[test]
fn test_clear_all_does_not_disturb_authoring() {
    let mut engine = engine();
    engine.start_authoring(ShapeKind::Polyline);
    engine.click(triangle()[0]).unwrap();
    engine.clear_all(ShapeKind::Polyline);

    assert_eq!(engine.mode(), Mode::Collecting);
    engine.click(triangle()[1]).unwrap();
    let report = engine.finish().unwrap();
    assert_eq!(report.kind, ShapeKind::Polyline);
    assert_eq!(engine.store.count(ShapeKind::Polyline), 1);
}

#[test]
fn test_empty_totals_and_single_point_line_display_unsigned_zero() {
    let mut engine = engine();
    assert_eq!(engine.total_circle_area(), "0.00 km²");

    engine.start_authoring(ShapeKind::Polyline);
    engine.click(triangle()[0]).unwrap();
    let report = engine.finish().unwrap();
    assert_eq!(report.measurement.display(), "Length: 0m");
}
