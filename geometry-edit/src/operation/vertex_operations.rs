use crate::errors::{EditResult, ErrorKind, GeometryEditError};
use crate::geometry::{close_ring, Coordinate, Geometry, GeometryType};
use crate::index::{resolve, resolve_mut, GeometryIndex, GeometryIndexService, IndexType};
use crate::operation::{failure, require_index_type, VertexTarget};

/// Inserts `coordinate` at a vertex or after an edge, returning the index of
/// the new vertex.
pub(crate) fn insert_vertex(
    service: &GeometryIndexService,
    geometry: &mut Geometry,
    index: &GeometryIndex,
    target: VertexTarget,
    coordinate: Coordinate,
) -> EditResult<GeometryIndex> {
    require_index_type(service, geometry, index, IndexType::Vertex, "insert vertex")?;
    match target {
        VertexTarget::Edge => {
            if !service.is_edge(geometry, index) {
                return Err(failure(
                    &format!("Cannot insert vertex: {} {} not found", IndexType::Edge, index),
                    ErrorKind::IndexOutOfBounds,
                ));
            }
        }
        VertexTarget::Vertex => {
            let (node, value) = resolve(geometry, index)?;
            check_vertex_insert(node, value, index)?;
        }
    }

    let inserted_at = match target {
        VertexTarget::Edge => service.next_vertex(index)?,
        VertexTarget::Vertex => index.clone(),
    };

    let (node, value) = resolve_mut(geometry, index)?;
    let is_ring = node.geometry_type() == GeometryType::LinearRing;
    let coordinates = node.coordinates_mut();
    match target {
        VertexTarget::Edge => coordinates.insert(value + 1, coordinate),
        VertexTarget::Vertex if is_ring && coordinates.is_empty() => {
            coordinates.push(coordinate);
            coordinates.push(coordinate);
        }
        VertexTarget::Vertex => coordinates.insert(value, coordinate),
    }
    if is_ring {
        close_ring(coordinates);
    }
    log::debug!("Inserted vertex {} at {}", coordinate, inserted_at);
    Ok(inserted_at)
}

fn check_vertex_insert(node: &Geometry, value: usize, index: &GeometryIndex) -> EditResult<()> {
    let len = node.coordinates().len();
    match node.geometry_type() {
        GeometryType::Point if len > 0 => Err(failure(
            &format!("Cannot insert vertex {}: POINT already has a coordinate", index),
            ErrorKind::EmptyBootstrapViolation,
        )),
        GeometryType::Point | GeometryType::LineString | GeometryType::LinearRing
            if len == 0 && value != 0 =>
        {
            Err(failure(
                &format!(
                    "Cannot insert vertex {}: empty {} only accepts index 0",
                    index,
                    node.geometry_type()
                ),
                ErrorKind::EmptyBootstrapViolation,
            ))
        }
        GeometryType::LineString if value > len => Err(failure(
            &format!(
                "Cannot insert vertex {}: LINESTRING has {} coordinates",
                index, len
            ),
            ErrorKind::IndexOutOfBounds,
        )),
        GeometryType::LinearRing if len > 0 && value > len - 1 => Err(failure(
            &format!(
                "Cannot insert vertex {}: the closing vertex of a LINEARRING is not an insertion point",
                index
            ),
            ErrorKind::IndexOutOfBounds,
        )),
        GeometryType::Point | GeometryType::LineString | GeometryType::LinearRing => Ok(()),
        other => Err(failure(
            &format!("Cannot insert vertex {}: {} holds no coordinates", index, other),
            ErrorKind::IndexTypeMismatch,
        )),
    }
}

/// Removes the vertex at `index`, returning the removed coordinate.
pub(crate) fn delete_vertex(
    service: &GeometryIndexService,
    geometry: &mut Geometry,
    index: &GeometryIndex,
) -> EditResult<Coordinate> {
    require_index_type(service, geometry, index, IndexType::Vertex, "delete vertex")?;
    {
        let (node, value) = resolve(geometry, index)?;
        let len = node.coordinates().len();
        match node.geometry_type() {
            GeometryType::Point if len != 1 || value != 0 => {
                return Err(failure(
                    &format!("Cannot delete vertex {}: POINT has {} coordinates", index, len),
                    ErrorKind::IndexOutOfBounds,
                ));
            }
            GeometryType::LinearRing if len > 0 && value == len - 1 => {
                return Err(failure(
                    &format!(
                        "Cannot delete vertex {}: the closing vertex of a LINEARRING cannot be deleted, delete index 0 instead",
                        index
                    ),
                    ErrorKind::IndexOutOfBounds,
                ));
            }
            GeometryType::LineString | GeometryType::LinearRing if value >= len => {
                return Err(failure(
                    &format!(
                        "Cannot delete vertex {}: {} has {} coordinates",
                        index,
                        node.geometry_type(),
                        len
                    ),
                    ErrorKind::IndexOutOfBounds,
                ));
            }
            GeometryType::Point | GeometryType::LineString | GeometryType::LinearRing => {}
            other => {
                return Err(failure(
                    &format!("Cannot delete vertex {}: {} holds no coordinates", index, other),
                    ErrorKind::IndexTypeMismatch,
                ));
            }
        }
    }
    let removed = capture_vertex(service, geometry, index, "delete")?;

    let (node, value) = resolve_mut(geometry, index)?;
    let geometry_type = node.geometry_type();
    let coordinates = node.coordinates_mut();
    match geometry_type {
        GeometryType::Point => coordinates.clear(),
        GeometryType::LineString if coordinates.len() == 1 => coordinates.clear(),
        GeometryType::LinearRing if coordinates.len() == 2 => coordinates.clear(),
        GeometryType::LinearRing => {
            coordinates.remove(value);
            close_ring(coordinates);
        }
        _ => {
            coordinates.remove(value);
        }
    }
    log::debug!("Deleted vertex {} at {}", removed, index);
    Ok(removed)
}

/// Moves the vertex at `index` to `location`, returning its previous location.
pub(crate) fn move_vertex(
    service: &GeometryIndexService,
    geometry: &mut Geometry,
    index: &GeometryIndex,
    location: Coordinate,
) -> EditResult<Coordinate> {
    require_index_type(service, geometry, index, IndexType::Vertex, "move vertex")?;
    {
        let (node, value) = resolve(geometry, index)?;
        let len = node.coordinates().len();
        match node.geometry_type() {
            GeometryType::LinearRing if len > 0 && value == len - 1 => {
                return Err(failure(
                    &format!(
                        "Cannot move vertex {}: the closing vertex of a LINEARRING cannot be moved, move index 0 instead",
                        index
                    ),
                    ErrorKind::IndexOutOfBounds,
                ));
            }
            GeometryType::Point | GeometryType::LineString | GeometryType::LinearRing
                if value >= len =>
            {
                return Err(failure(
                    &format!(
                        "Cannot move vertex {}: {} has {} coordinates",
                        index,
                        node.geometry_type(),
                        len
                    ),
                    ErrorKind::IndexOutOfBounds,
                ));
            }
            GeometryType::Point | GeometryType::LineString | GeometryType::LinearRing => {}
            other => {
                return Err(failure(
                    &format!("Cannot move vertex {}: {} holds no coordinates", index, other),
                    ErrorKind::IndexTypeMismatch,
                ));
            }
        }
    }
    let previous = capture_vertex(service, geometry, index, "move")?;

    let (node, value) = resolve_mut(geometry, index)?;
    let is_ring = node.geometry_type() == GeometryType::LinearRing;
    let coordinates = node.coordinates_mut();
    coordinates[value] = location;
    if is_ring && value == 0 {
        close_ring(coordinates);
    }
    log::debug!("Moved vertex {} from {} to {}", index, previous, location);
    Ok(previous)
}

fn capture_vertex(
    service: &GeometryIndexService,
    geometry: &Geometry,
    index: &GeometryIndex,
    action: &str,
) -> EditResult<Coordinate> {
    service.vertex(geometry, index).map_err(|err| {
        log::error!("Cannot {} vertex {}: {}", action, index, err);
        GeometryEditError::new_with_cause(
            &format!("Cannot {} vertex {}", action, index),
            ErrorKind::IndexOutOfBounds,
            err.into(),
        )
    })
}
