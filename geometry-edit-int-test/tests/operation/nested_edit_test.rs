//! Edits addressed through multi-level geometry indices.

use geometry_edit::errors::EditResult;
use geometry_edit::{
    ErrorKind, Geometry, GeometryIndexOperation, GeometryIndexService, GeometryType, IndexType,
};
use geometry_edit_int_test::test_util::{
    assert_rings_closed, c, idx, mixed_collection, polygon_with_hole, square_ring, two_polygons,
};

#[test]
fn test_drag_hole_corner_in_multi_polygon() -> EditResult<()> {
    let service = GeometryIndexService::default();
    let mut multi = two_polygons()?;

    GeometryIndexOperation::move_vertex(service.clone(), c(3.5, 3.5))
        .execute(&mut multi, &idx(&[0, 1, 0]))?;

    let hole = service.geometry(&multi, &idx(&[0, 1]))?;
    assert_eq!(hole.coordinates()[0], c(3.5, 3.5));
    assert_eq!(hole.coordinates()[4], c(3.5, 3.5));
    assert_rings_closed(&multi);
    Ok(())
}

#[test]
fn test_split_shell_edge_of_second_polygon() -> EditResult<()> {
    let service = GeometryIndexService::default();
    let mut multi = two_polygons()?;

    let mut insert = GeometryIndexOperation::insert_vertex_on_edge(service.clone(), c(22.5, 20.0));
    insert.execute(&mut multi, &idx(&[1, 0, 0]))?;

    assert_eq!(insert.geometry_index(), Some(&idx(&[1, 0, 1])));
    assert_eq!(service.vertex(&multi, &idx(&[1, 0, 1]))?, c(22.5, 20.0));
    assert_eq!(multi.geometries()[1].geometries()[0].coordinates().len(), 6);
    // first polygon is untouched
    assert_eq!(multi.geometries()[0], polygon_with_hole()?);
    Ok(())
}

#[test]
fn test_build_polygon_from_scratch() -> EditResult<()> {
    let service = GeometryIndexService::default();
    let mut multi = Geometry::empty(GeometryType::MultiPolygon);

    GeometryIndexOperation::insert_geometry(service.clone(), Geometry::empty(GeometryType::Polygon))
        .execute(&mut multi, &idx(&[0]))?;
    GeometryIndexOperation::insert_geometry(
        service.clone(),
        Geometry::empty(GeometryType::LinearRing),
    )
    .execute(&mut multi, &idx(&[0, 0]))?;

    let corners = [c(0.0, 0.0), c(4.0, 0.0), c(4.0, 4.0), c(0.0, 4.0)];
    for (i, corner) in corners.iter().enumerate() {
        GeometryIndexOperation::insert_vertex(service.clone(), *corner)
            .execute(&mut multi, &idx(&[0, 0, i]))?;
        assert_rings_closed(&multi);
    }

    let shell = service.geometry(&multi, &idx(&[0, 0]))?;
    assert_eq!(
        shell.coordinates(),
        &[c(0.0, 0.0), c(4.0, 0.0), c(4.0, 4.0), c(0.0, 4.0), c(0.0, 0.0)]
    );
    assert!(multi.validate().is_ok());
    Ok(())
}

#[test]
fn test_collection_children_of_every_type() -> EditResult<()> {
    let service = GeometryIndexService::default();
    let mut collection = mixed_collection()?;

    assert_eq!(service.index_type(&collection, &idx(&[0]))?, IndexType::Geometry);
    assert_eq!(service.index_type(&collection, &idx(&[1, 0]))?, IndexType::Vertex);
    assert_eq!(service.index_type(&collection, &idx(&[3, 1]))?, IndexType::Geometry);

    GeometryIndexOperation::delete_vertex(service.clone()).execute(&mut collection, &idx(&[0, 0]))?;
    assert!(collection.geometries()[0].is_empty());

    GeometryIndexOperation::insert_vertex_on_edge(service.clone(), c(3.0, 1.5))
        .execute(&mut collection, &idx(&[1, 1]))?;
    assert_eq!(collection.geometries()[1].coordinates().len(), 4);

    GeometryIndexOperation::delete_geometry(service.clone()).execute(&mut collection, &idx(&[3, 1]))?;
    assert_eq!(collection.geometries()[3].geometries().len(), 1);

    GeometryIndexOperation::insert_geometry(service, square_ring(7.0, 1.0)?)
        .execute(&mut collection, &idx(&[4]))?;
    assert_eq!(collection.geometries().len(), 5);
    assert_rings_closed(&collection);
    Ok(())
}

#[test]
fn test_vertex_operation_on_geometry_level_is_rejected() -> EditResult<()> {
    let service = GeometryIndexService::default();
    let mut multi = two_polygons()?;
    let before = multi.clone();

    let err = GeometryIndexOperation::move_vertex(service.clone(), c(0.0, 0.0))
        .execute(&mut multi, &idx(&[0, 1]))
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::IndexTypeMismatch);

    let err = GeometryIndexOperation::delete_geometry(service)
        .execute(&mut multi, &idx(&[0, 1, 2]))
        .unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::IndexTypeMismatch);

    assert_eq!(multi, before);
    Ok(())
}

#[test]
fn test_srid_survives_nested_edits() -> EditResult<()> {
    let service = GeometryIndexService::default();
    let mut polygon = polygon_with_hole()?.with_srid(4326);

    GeometryIndexOperation::delete_geometry(service.clone()).execute(&mut polygon, &idx(&[1]))?;
    GeometryIndexOperation::move_vertex(service, c(-1.0, -1.0)).execute(&mut polygon, &idx(&[0, 0]))?;

    assert_eq!(polygon.srid(), 4326);
    Ok(())
}
