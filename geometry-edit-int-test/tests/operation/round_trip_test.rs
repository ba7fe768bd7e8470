//! Every successful edit followed by its inverse restores the geometry.

use geometry_edit::errors::EditResult;
use geometry_edit::{Geometry, GeometryIndexOperation, GeometryIndexService, GeometryType};
use geometry_edit_int_test::test_util::{
    assert_round_trip, c, idx, mixed_collection, random_coordinate, square_ring, two_polygons,
};

#[test]
fn test_vertex_insert_round_trip_at_every_ring_position() -> EditResult<()> {
    let service = GeometryIndexService::default();
    let mut rng = rand::rng();
    let mut multi = two_polygons()?;

    // shell of the first polygon has 5 coordinates, positions 0..=4 are valid
    for position in 0..5 {
        let op = GeometryIndexOperation::insert_vertex(service.clone(), random_coordinate(&mut rng));
        assert_round_trip(&mut multi, op, &idx(&[0, 0, position]))?;
    }
    Ok(())
}

#[test]
fn test_edge_insert_round_trip_on_every_edge() -> EditResult<()> {
    let service = GeometryIndexService::default();
    let mut rng = rand::rng();
    let mut multi = two_polygons()?;

    for edge in 0..4 {
        let op = GeometryIndexOperation::insert_vertex_on_edge(service.clone(), random_coordinate(&mut rng));
        assert_round_trip(&mut multi, op, &idx(&[0, 1, edge]))?;
    }
    let mut line = Geometry::line_string(vec![c(0.0, 0.0), c(1.0, 0.0), c(2.0, 0.0)]);
    for edge in 0..2 {
        let op = GeometryIndexOperation::insert_vertex_on_edge(service.clone(), random_coordinate(&mut rng));
        assert_round_trip(&mut line, op, &idx(&[edge]))?;
    }
    Ok(())
}

#[test]
fn test_vertex_delete_round_trip() -> EditResult<()> {
    let service = GeometryIndexService::default();
    let mut collection = mixed_collection()?;

    // point, line string vertices, ring vertices and polygon hole vertices
    let targets = [
        vec![0, 0],
        vec![1, 0],
        vec![1, 2],
        vec![2, 0],
        vec![2, 3],
        vec![3, 1, 0],
        vec![3, 1, 2],
    ];
    for target in targets.iter() {
        let op = GeometryIndexOperation::delete_vertex(service.clone());
        assert_round_trip(&mut collection, op, &idx(target))?;
    }
    Ok(())
}

#[test]
fn test_delete_down_to_empty_round_trip() -> EditResult<()> {
    let service = GeometryIndexService::default();
    let mut bootstrap = Geometry::linear_ring(vec![c(1.0, 1.0), c(1.0, 1.0)])?;
    assert_round_trip(
        &mut bootstrap,
        GeometryIndexOperation::delete_vertex(service.clone()),
        &idx(&[0]),
    )?;

    let mut single = Geometry::line_string(vec![c(4.0, 4.0)]);
    assert_round_trip(
        &mut single,
        GeometryIndexOperation::delete_vertex(service),
        &idx(&[0]),
    )?;
    Ok(())
}

#[test]
fn test_move_round_trip_with_random_locations() -> EditResult<()> {
    let service = GeometryIndexService::default();
    let mut rng = rand::rng();
    let mut multi = two_polygons()?;

    for _ in 0..50 {
        for target in [[0, 0, 0], [0, 1, 2], [1, 0, 3]].iter() {
            let op = GeometryIndexOperation::move_vertex(service.clone(), random_coordinate(&mut rng));
            assert_round_trip(&mut multi, op, &idx(target))?;
        }
    }
    Ok(())
}

#[test]
fn test_geometry_insert_and_delete_round_trip() -> EditResult<()> {
    let service = GeometryIndexService::default();
    let mut multi = two_polygons()?;

    let hole = square_ring(1.0, 1.0)?;
    for position in 0..3 {
        let op = GeometryIndexOperation::insert_geometry(service.clone(), hole.clone());
        assert_round_trip(&mut multi, op, &idx(&[0, position]))?;
    }
    for position in 0..2 {
        let op = GeometryIndexOperation::delete_geometry(service.clone());
        assert_round_trip(&mut multi, op, &idx(&[position]))?;
    }

    let mut single = Geometry::multi_point(vec![Geometry::point(c(0.0, 0.0))])?;
    let op = GeometryIndexOperation::delete_geometry(service.clone());
    assert_round_trip(&mut single, op, &idx(&[0]))?;

    let mut empty = Geometry::empty(GeometryType::MultiLineString);
    let op = GeometryIndexOperation::insert_geometry(service, Geometry::line_string(vec![]));
    assert_round_trip(&mut empty, op, &idx(&[0]))?;
    Ok(())
}
