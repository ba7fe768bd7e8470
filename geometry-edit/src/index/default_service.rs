use crate::errors::{IndexResolutionError, IndexResult};
use crate::geometry::{Coordinate, Geometry, GeometryType};
use crate::index::index_service::resolve;
use crate::index::{GeometryIndex, GeometryIndexServiceProvider, IndexType};

/// Index service that classifies paths by the shape of the geometry they
/// resolve against.
///
/// A path ending on a point, line string or linear ring addresses a vertex;
/// a path ending on any composite geometry addresses a child geometry. Edges
/// are never inferred, only confirmed through [`is_edge`].
///
/// [`is_edge`]: GeometryIndexServiceProvider::is_edge
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultGeometryIndexService;

impl GeometryIndexServiceProvider for DefaultGeometryIndexService {
    fn index_type(&self, geometry: &Geometry, index: &GeometryIndex) -> IndexResult<IndexType> {
        let (node, _) = resolve(geometry, index)?;
        if node.geometry_type().is_leaf() {
            Ok(IndexType::Vertex)
        } else {
            Ok(IndexType::Geometry)
        }
    }

    fn is_edge(&self, geometry: &Geometry, index: &GeometryIndex) -> bool {
        match resolve(geometry, index) {
            Ok((node, value)) => {
                matches!(
                    node.geometry_type(),
                    GeometryType::LineString | GeometryType::LinearRing
                ) && value < node.coordinates().len().saturating_sub(1)
            }
            Err(_) => false,
        }
    }

    fn vertex(&self, geometry: &Geometry, index: &GeometryIndex) -> IndexResult<Coordinate> {
        let (node, value) = resolve(geometry, index)?;
        node.coordinates()
            .get(value)
            .copied()
            .ok_or_else(|| IndexResolutionError::VertexNotFound(index.to_string()))
    }

    fn geometry<'a>(
        &self,
        geometry: &'a Geometry,
        index: &GeometryIndex,
    ) -> IndexResult<&'a Geometry> {
        let (node, value) = resolve(geometry, index)?;
        node.geometries()
            .get(value)
            .ok_or_else(|| IndexResolutionError::GeometryNotFound(index.to_string()))
    }

    fn next_vertex(&self, index: &GeometryIndex) -> IndexResult<GeometryIndex> {
        index
            .leaf_value()
            .checked_add(1)
            .map(|value| index.with_leaf_value(value))
            .ok_or_else(|| IndexResolutionError::NoNextVertex(index.to_string()))
    }

    fn previous_vertex(&self, index: &GeometryIndex) -> IndexResult<GeometryIndex> {
        match index.leaf_value() {
            0 => Err(IndexResolutionError::NoPreviousVertex(index.to_string())),
            value => Ok(index.with_leaf_value(value - 1)),
        }
    }

    fn edge(
        &self,
        geometry: &Geometry,
        index: &GeometryIndex,
    ) -> IndexResult<(Coordinate, Coordinate)> {
        if !self.is_edge(geometry, index) {
            return Err(IndexResolutionError::EdgeNotFound(index.to_string()));
        }
        let (node, value) = resolve(geometry, index)?;
        let coordinates = node.coordinates();
        Ok((coordinates[value], coordinates[value + 1]))
    }

    fn geometry_type_at(
        &self,
        geometry: &Geometry,
        index: &GeometryIndex,
    ) -> IndexResult<GeometryType> {
        let (node, _) = resolve(geometry, index)?;
        Ok(node.geometry_type())
    }

    fn is_closing_vertex(&self, geometry: &Geometry, index: &GeometryIndex) -> bool {
        match resolve(geometry, index) {
            Ok((node, value)) => {
                node.geometry_type() == GeometryType::LinearRing
                    && !node.coordinates().is_empty()
                    && value == node.coordinates().len() - 1
            }
            Err(_) => false,
        }
    }
}
