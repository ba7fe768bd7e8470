//! A failed operation leaves the geometry exactly as it found it.

use geometry_edit::errors::EditResult;
use geometry_edit::{
    ErrorKind, Geometry, GeometryIndex, GeometryIndexOperation, GeometryIndexService,
    GeometryType,
};
use geometry_edit_int_test::test_util::{c, idx, mixed_collection, square_ring, two_polygons};

fn assert_fails_untouched(
    geometry: &mut Geometry,
    mut operation: GeometryIndexOperation,
    index: &GeometryIndex,
    expected: ErrorKind,
) {
    let before = geometry.clone();
    let err = operation
        .execute(geometry, index)
        .expect_err("operation should have failed");
    assert_eq!(err.kind(), &expected, "{} at {}: {}", operation.kind(), index, err);
    assert_eq!(*geometry, before, "{} at {} mutated the geometry", operation.kind(), index);
    assert!(!operation.is_executed());
    assert!(operation.geometry_index().is_none());
}

#[test]
fn test_index_type_mismatch_is_side_effect_free() -> EditResult<()> {
    let service = GeometryIndexService::default();
    let mut multi = two_polygons()?;

    assert_fails_untouched(
        &mut multi,
        GeometryIndexOperation::insert_vertex(service.clone(), c(0.0, 0.0)),
        &idx(&[0, 0]),
        ErrorKind::IndexTypeMismatch,
    );
    assert_fails_untouched(
        &mut multi,
        GeometryIndexOperation::insert_geometry(service.clone(), square_ring(1.0, 1.0)?),
        &idx(&[0, 0, 1]),
        ErrorKind::IndexTypeMismatch,
    );
    assert_fails_untouched(
        &mut multi,
        GeometryIndexOperation::delete_vertex(service),
        &idx(&[1]),
        ErrorKind::IndexTypeMismatch,
    );
    Ok(())
}

#[test]
fn test_out_of_bounds_is_side_effect_free() -> EditResult<()> {
    let service = GeometryIndexService::default();
    let mut multi = two_polygons()?;

    // closing vertex of a hole
    assert_fails_untouched(
        &mut multi,
        GeometryIndexOperation::move_vertex(service.clone(), c(9.0, 9.0)),
        &idx(&[0, 1, 4]),
        ErrorKind::IndexOutOfBounds,
    );
    assert_fails_untouched(
        &mut multi,
        GeometryIndexOperation::delete_vertex(service.clone()),
        &idx(&[1, 0, 4]),
        ErrorKind::IndexOutOfBounds,
    );
    // last vertex of a ring starts no edge
    assert_fails_untouched(
        &mut multi,
        GeometryIndexOperation::insert_vertex_on_edge(service.clone(), c(9.0, 9.0)),
        &idx(&[0, 0, 4]),
        ErrorKind::IndexOutOfBounds,
    );
    assert_fails_untouched(
        &mut multi,
        GeometryIndexOperation::insert_vertex_on_edge(service.clone(), c(9.0, 9.0)),
        &idx(&[0, 1, usize::MAX]),
        ErrorKind::IndexOutOfBounds,
    );
    assert_fails_untouched(
        &mut multi,
        GeometryIndexOperation::insert_geometry(service.clone(), square_ring(1.0, 1.0)?),
        &idx(&[0, 3]),
        ErrorKind::IndexOutOfBounds,
    );
    assert_fails_untouched(
        &mut multi,
        GeometryIndexOperation::delete_geometry(service),
        &idx(&[1, 1]),
        ErrorKind::IndexOutOfBounds,
    );
    Ok(())
}

#[test]
fn test_incompatible_child_is_side_effect_free() -> EditResult<()> {
    let service = GeometryIndexService::default();
    let mut multi = two_polygons()?;

    assert_fails_untouched(
        &mut multi,
        GeometryIndexOperation::insert_geometry(service.clone(), Geometry::point(c(1.0, 1.0))),
        &idx(&[0, 1]),
        ErrorKind::GeometryTypeMismatch,
    );
    assert_fails_untouched(
        &mut multi,
        GeometryIndexOperation::insert_geometry(service, square_ring(30.0, 1.0)?),
        &idx(&[2]),
        ErrorKind::GeometryTypeMismatch,
    );
    Ok(())
}

#[test]
fn test_empty_bootstrap_violation_is_side_effect_free() -> EditResult<()> {
    let service = GeometryIndexService::default();
    let mut collection = Geometry::geometry_collection(vec![
        Geometry::empty(GeometryType::Point),
        Geometry::empty(GeometryType::LinearRing),
        Geometry::empty(GeometryType::MultiPoint),
        Geometry::point(c(2.0, 2.0)),
    ])?;

    assert_fails_untouched(
        &mut collection,
        GeometryIndexOperation::insert_vertex(service.clone(), c(0.0, 0.0)),
        &idx(&[1, 2]),
        ErrorKind::EmptyBootstrapViolation,
    );
    assert_fails_untouched(
        &mut collection,
        GeometryIndexOperation::insert_geometry(service.clone(), Geometry::point(c(0.0, 0.0))),
        &idx(&[2, 1]),
        ErrorKind::EmptyBootstrapViolation,
    );
    assert_fails_untouched(
        &mut collection,
        GeometryIndexOperation::insert_vertex(service, c(0.0, 0.0)),
        &idx(&[3, 0]),
        ErrorKind::EmptyBootstrapViolation,
    );
    Ok(())
}

#[test]
fn test_unresolvable_path_is_side_effect_free() -> EditResult<()> {
    let service = GeometryIndexService::default();
    let mut collection = mixed_collection()?;

    // child 9 does not exist
    assert_fails_untouched(
        &mut collection,
        GeometryIndexOperation::move_vertex(service.clone(), c(0.0, 0.0)),
        &idx(&[9, 0]),
        ErrorKind::IndexNotFound,
    );
    // descends past a leaf
    assert_fails_untouched(
        &mut collection,
        GeometryIndexOperation::delete_vertex(service),
        &idx(&[1, 0, 0]),
        ErrorKind::IndexNotFound,
    );
    Ok(())
}

#[test]
fn test_failed_operation_can_be_retried() -> EditResult<()> {
    let service = GeometryIndexService::default();
    let mut multi = two_polygons()?;
    let mut insert = GeometryIndexOperation::insert_vertex_on_edge(service, c(10.0, 5.0));

    assert!(insert.execute(&mut multi, &idx(&[0, 0, 4])).is_err());
    assert_eq!(insert.inverse().unwrap_err().kind(), &ErrorKind::InvalidOperation);

    insert.execute(&mut multi, &idx(&[0, 0, 1]))?;
    assert_eq!(insert.geometry_index(), Some(&idx(&[0, 0, 2])));
    assert!(insert.inverse().is_ok());
    Ok(())
}
