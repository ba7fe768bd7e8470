use geometry_edit::errors::EditResult;
use geometry_edit::{Coordinate, Geometry, GeometryIndex, GeometryIndexOperation, GeometryType};
use rand::Rng;

/// Shorthand for a coordinate.
pub fn c(x: f64, y: f64) -> Coordinate {
    Coordinate::new(x, y)
}

/// Shorthand for a non-empty index path.
pub fn idx(path: &[usize]) -> GeometryIndex {
    match GeometryIndex::from_path(path) {
        Ok(index) => index,
        Err(e) => panic!("invalid test index {:?}: {}", path, e),
    }
}

/// A closed axis-aligned square ring.
pub fn square_ring(min: f64, size: f64) -> EditResult<Geometry> {
    Geometry::linear_ring(vec![
        c(min, min),
        c(min + size, min),
        c(min + size, min + size),
        c(min, min + size),
        c(min, min),
    ])
}

/// A 10x10 polygon with one 2x2 hole.
pub fn polygon_with_hole() -> EditResult<Geometry> {
    Geometry::polygon(vec![square_ring(0.0, 10.0)?, square_ring(4.0, 2.0)?])
}

/// A multi-polygon of two polygons, the first one with a hole.
pub fn two_polygons() -> EditResult<Geometry> {
    Geometry::multi_polygon(vec![
        polygon_with_hole()?,
        Geometry::polygon(vec![square_ring(20.0, 5.0)?])?,
    ])
}

/// A collection holding one of each leaf type plus a polygon.
pub fn mixed_collection() -> EditResult<Geometry> {
    Geometry::geometry_collection(vec![
        Geometry::point(c(1.0, 1.0)),
        Geometry::line_string(vec![c(0.0, 0.0), c(3.0, 0.0), c(3.0, 3.0)]),
        square_ring(5.0, 1.0)?,
        polygon_with_hole()?,
    ])
}

pub fn random_coordinate(rng: &mut impl Rng) -> Coordinate {
    c(rng.random_range(-180.0..180.0), rng.random_range(-90.0..90.0))
}

/// Asserts that every linear ring in `geometry` is closed.
pub fn assert_rings_closed(geometry: &Geometry) {
    if geometry.geometry_type() == GeometryType::LinearRing {
        assert!(
            geometry.is_closed_ring(),
            "ring is not closed: {}",
            geometry
        );
    }
    for child in geometry.geometries() {
        assert_rings_closed(child);
    }
}

/// Executes `operation` at `index`, then its inverse at the resolved index,
/// and asserts the geometry is back to where it started.
pub fn assert_round_trip(
    geometry: &mut Geometry,
    mut operation: GeometryIndexOperation,
    index: &GeometryIndex,
) -> EditResult<()> {
    let before = geometry.clone();
    operation.execute(geometry, index)?;
    assert_rings_closed(geometry);

    let at = operation
        .geometry_index()
        .cloned()
        .unwrap_or_else(|| panic!("{:?} has no resolved index", operation));
    operation.inverse()?.execute(geometry, &at)?;
    assert_eq!(*geometry, before, "inverse of {} did not restore", operation.kind());
    Ok(())
}
