use std::ops::Deref;
use std::sync::Arc;

use crate::errors::{IndexResolutionError, IndexResult};
use crate::geometry::{Coordinate, Geometry, GeometryType};
use crate::index::{DefaultGeometryIndexService, GeometryIndex, IndexType};

/// Wrapper for index service providers with thread-safe reference counting.
///
/// Every operation holds a `GeometryIndexService` and consults it to
/// classify indices and to read the vertex or child geometry it is about to
/// replace. Cloning is cheap; all clones share the same provider.
///
/// `GeometryIndexService` implements `Deref` to the provider, so provider
/// methods are called directly on the wrapper.
#[derive(Clone)]
pub struct GeometryIndexService {
    inner: Arc<dyn GeometryIndexServiceProvider>,
}

/// Contract for resolving geometry indices against concrete geometries.
///
/// # Responsibilities
/// - Classify the address a path resolves to
/// - Read individual vertices, edges and child geometries
/// - Derive neighbouring indices at the same nesting level
///
/// Implementations must be read-only with respect to the geometry.
pub trait GeometryIndexServiceProvider: Send + Sync {
    /// Classifies the address `index` resolves to in `geometry`.
    ///
    /// # Returns
    /// [`IndexType::Vertex`] when the path ends on a leaf geometry and
    /// [`IndexType::Geometry`] when it ends on a composite one. The terminal
    /// value itself is not bounds-checked.
    ///
    /// # Errors
    /// `GeometryNotFound` if an intermediate level of the path does not exist.
    fn index_type(&self, geometry: &Geometry, index: &GeometryIndex) -> IndexResult<IndexType>;

    /// Returns `true` if `index` addresses an existing edge of a line string
    /// or linear ring.
    fn is_edge(&self, geometry: &Geometry, index: &GeometryIndex) -> bool;

    /// Reads the coordinate `index` points to.
    ///
    /// # Errors
    /// `VertexNotFound` unless the path resolves to an existing coordinate.
    fn vertex(&self, geometry: &Geometry, index: &GeometryIndex) -> IndexResult<Coordinate>;

    /// Borrows the child geometry `index` points to.
    ///
    /// # Errors
    /// `GeometryNotFound` unless the path resolves to an existing child.
    fn geometry<'a>(&self, geometry: &'a Geometry, index: &GeometryIndex)
        -> IndexResult<&'a Geometry>;

    /// The vertex index directly after the given edge index, at the same level.
    ///
    /// # Errors
    /// `NoNextVertex` when the deepest value is `usize::MAX`.
    fn next_vertex(&self, index: &GeometryIndex) -> IndexResult<GeometryIndex>;

    /// The vertex index directly before the given index, at the same level.
    ///
    /// # Errors
    /// `NoPreviousVertex` when the deepest value is 0.
    fn previous_vertex(&self, index: &GeometryIndex) -> IndexResult<GeometryIndex>;

    /// Reads both endpoints of the edge `index` points to.
    ///
    /// # Errors
    /// `EdgeNotFound` unless [`is_edge`](Self::is_edge) holds.
    fn edge(&self, geometry: &Geometry, index: &GeometryIndex)
        -> IndexResult<(Coordinate, Coordinate)>;

    /// The type of the geometry whose sequence the deepest value indexes.
    fn geometry_type_at(&self, geometry: &Geometry, index: &GeometryIndex)
        -> IndexResult<GeometryType>;

    /// Returns `true` if `index` addresses the closing vertex of a non-empty
    /// linear ring.
    fn is_closing_vertex(&self, geometry: &Geometry, index: &GeometryIndex) -> bool;
}

impl GeometryIndexService {
    /// Creates a new service wrapping a concrete provider.
    pub fn new<T: GeometryIndexServiceProvider + 'static>(inner: T) -> Self {
        GeometryIndexService {
            inner: Arc::new(inner),
        }
    }
}

impl Default for GeometryIndexService {
    fn default() -> Self {
        GeometryIndexService::new(DefaultGeometryIndexService)
    }
}

impl Deref for GeometryIndexService {
    type Target = Arc<dyn GeometryIndexServiceProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

/// Walks `index` down `geometry`, returning the geometry the deepest value
/// applies to together with that value.
pub(crate) fn resolve<'a>(
    geometry: &'a Geometry,
    index: &GeometryIndex,
) -> IndexResult<(&'a Geometry, usize)> {
    let mut node = geometry;
    let mut level = index;
    while let Some(child) = level.child() {
        node = node
            .geometries()
            .get(level.value())
            .ok_or_else(|| IndexResolutionError::GeometryNotFound(index.to_string()))?;
        level = child;
    }
    Ok((node, level.value()))
}

/// Mutable counterpart of [`resolve`].
pub(crate) fn resolve_mut<'a>(
    geometry: &'a mut Geometry,
    index: &GeometryIndex,
) -> IndexResult<(&'a mut Geometry, usize)> {
    match index.child() {
        Some(child) => match geometry.geometries_mut().get_mut(index.value()) {
            Some(next) => resolve_mut(next, child),
            None => Err(IndexResolutionError::GeometryNotFound(index.to_string())),
        },
        None => Ok((geometry, index.value())),
    }
}
