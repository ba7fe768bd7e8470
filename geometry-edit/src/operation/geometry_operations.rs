use crate::errors::{EditResult, ErrorKind, GeometryEditError};
use crate::geometry::Geometry;
use crate::index::{resolve, resolve_mut, GeometryIndex, GeometryIndexService, IndexType};
use crate::operation::{failure, require_index_type};

/// Inserts `child` into the composite geometry addressed by `index`.
pub(crate) fn insert_geometry(
    service: &GeometryIndexService,
    geometry: &mut Geometry,
    index: &GeometryIndex,
    child: &Geometry,
) -> EditResult<()> {
    require_index_type(service, geometry, index, IndexType::Geometry, "insert geometry")?;
    {
        let (parent, value) = resolve(geometry, index)?;
        let parent_type = parent.geometry_type();
        if !parent_type.accepts_child(child.geometry_type()) {
            return Err(failure(
                &format!(
                    "Cannot insert geometry {}: {} cannot contain {}",
                    index,
                    parent_type,
                    child.geometry_type()
                ),
                ErrorKind::GeometryTypeMismatch,
            ));
        }
        let len = parent.geometries().len();
        if len == 0 && value != 0 {
            return Err(failure(
                &format!(
                    "Cannot insert geometry {}: empty {} only accepts index 0",
                    index, parent_type
                ),
                ErrorKind::EmptyBootstrapViolation,
            ));
        }
        if value > len {
            return Err(failure(
                &format!(
                    "Cannot insert geometry {}: {} has {} child geometries",
                    index, parent_type, len
                ),
                ErrorKind::IndexOutOfBounds,
            ));
        }
    }

    let (parent, value) = resolve_mut(geometry, index)?;
    parent.geometries_mut().insert(value, child.clone());
    log::debug!("Inserted {} at {}", child.geometry_type(), index);
    Ok(())
}

/// Removes the child geometry addressed by `index`, returning it.
pub(crate) fn delete_geometry(
    service: &GeometryIndexService,
    geometry: &mut Geometry,
    index: &GeometryIndex,
) -> EditResult<Geometry> {
    require_index_type(service, geometry, index, IndexType::Geometry, "delete geometry")?;
    let removed = service
        .geometry(geometry, index)
        .map_err(|err| {
            log::error!("Cannot delete geometry {}: {}", index, err);
            GeometryEditError::new_with_cause(
                &format!("Cannot delete geometry {}", index),
                ErrorKind::IndexOutOfBounds,
                err.into(),
            )
        })?
        .clone();

    let (parent, value) = resolve_mut(geometry, index)?;
    let children = parent.geometries_mut();
    if children.len() == 1 {
        children.clear();
    } else {
        children.remove(value);
    }
    log::debug!("Deleted {} at {}", removed.geometry_type(), index);
    Ok(removed)
}
