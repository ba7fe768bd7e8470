//! Reversible editing operations addressed by a [`GeometryIndex`].
//!
//! Every operation follows the same three steps: validate the index against
//! the geometry (type, bounds, ring closure, parent/child compatibility),
//! mutate the addressed sequence in place, and record what is needed to
//! build the inverse. A failed validation never reaches the mutation step,
//! so the geometry is untouched whenever `execute` returns an error.
//!
//! ## Example
//!
//! ```rust
//! use geometry_edit::{Coordinate, Geometry, GeometryIndex, GeometryIndexOperation,
//!     GeometryIndexService, GeometryType};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let service = GeometryIndexService::default();
//! let mut line = Geometry::empty(GeometryType::LineString);
//!
//! let mut insert = GeometryIndexOperation::insert_vertex(service.clone(), Coordinate::new(1.0, 2.0));
//! insert.execute(&mut line, &GeometryIndex::new(0))?;
//! assert_eq!(line.coordinates().len(), 1);
//!
//! let mut undo = insert.inverse()?;
//! let at = insert.geometry_index().cloned().ok_or("not executed")?;
//! undo.execute(&mut line, &at)?;
//! assert!(line.is_empty());
//! # Ok(())
//! # }
//! ```

mod geometry_operations;
mod vertex_operations;

use std::fmt::{self, Debug, Display, Formatter};

use crate::errors::{EditResult, ErrorKind, GeometryEditError};
use crate::geometry::{Coordinate, Geometry};
use crate::index::{GeometryIndex, GeometryIndexService, IndexType};

use geometry_operations::{delete_geometry, insert_geometry};
use vertex_operations::{delete_vertex, insert_vertex, move_vertex};

/// Where an inserted vertex goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VertexTarget {
    /// At the addressed vertex position, shifting later vertices right.
    Vertex,
    /// On the addressed edge, directly after its first endpoint.
    Edge,
}

/// The kind of an operation together with its payload.
///
/// Payloads named `removed` and `previous` are captured by `execute` and are
/// `None` until the operation has run.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationKind {
    InsertVertex {
        target: VertexTarget,
        coordinate: Coordinate,
    },
    DeleteVertex {
        removed: Option<Coordinate>,
    },
    MoveVertex {
        location: Coordinate,
        previous: Option<Coordinate>,
    },
    InsertGeometry {
        child: Geometry,
    },
    DeleteGeometry {
        removed: Option<Geometry>,
    },
}

impl Display for OperationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::InsertVertex {
                target: VertexTarget::Vertex,
                ..
            } => write!(f, "insert vertex"),
            OperationKind::InsertVertex {
                target: VertexTarget::Edge,
                ..
            } => write!(f, "insert vertex on edge"),
            OperationKind::DeleteVertex { .. } => write!(f, "delete vertex"),
            OperationKind::MoveVertex { .. } => write!(f, "move vertex"),
            OperationKind::InsertGeometry { .. } => write!(f, "insert geometry"),
            OperationKind::DeleteGeometry { .. } => write!(f, "delete geometry"),
        }
    }
}

/// A single reversible edit of a geometry.
///
/// Operations are created per edit. After a successful [`execute`], the
/// index actually acted upon is available from [`geometry_index`] and the
/// operation undoing the edit from [`inverse`]; the inverse must be executed
/// at that same index.
///
/// [`execute`]: GeometryIndexOperation::execute
/// [`geometry_index`]: GeometryIndexOperation::geometry_index
/// [`inverse`]: GeometryIndexOperation::inverse
#[derive(Clone)]
pub struct GeometryIndexOperation {
    service: GeometryIndexService,
    kind: OperationKind,
    index: Option<GeometryIndex>,
}

impl GeometryIndexOperation {
    fn new(service: GeometryIndexService, kind: OperationKind) -> Self {
        GeometryIndexOperation {
            service,
            kind,
            index: None,
        }
    }

    /// Inserts `coordinate` at a vertex index.
    pub fn insert_vertex(service: GeometryIndexService, coordinate: Coordinate) -> Self {
        Self::new(
            service,
            OperationKind::InsertVertex {
                target: VertexTarget::Vertex,
                coordinate,
            },
        )
    }

    /// Inserts `coordinate` on an edge. The resolved index is the vertex
    /// following the edge's first endpoint.
    pub fn insert_vertex_on_edge(service: GeometryIndexService, coordinate: Coordinate) -> Self {
        Self::new(
            service,
            OperationKind::InsertVertex {
                target: VertexTarget::Edge,
                coordinate,
            },
        )
    }

    pub fn delete_vertex(service: GeometryIndexService) -> Self {
        Self::new(service, OperationKind::DeleteVertex { removed: None })
    }

    pub fn move_vertex(service: GeometryIndexService, location: Coordinate) -> Self {
        Self::new(
            service,
            OperationKind::MoveVertex {
                location,
                previous: None,
            },
        )
    }

    pub fn insert_geometry(service: GeometryIndexService, child: Geometry) -> Self {
        Self::new(service, OperationKind::InsertGeometry { child })
    }

    pub fn delete_geometry(service: GeometryIndexService) -> Self {
        Self::new(service, OperationKind::DeleteGeometry { removed: None })
    }

    pub fn kind(&self) -> &OperationKind {
        &self.kind
    }

    pub fn service(&self) -> &GeometryIndexService {
        &self.service
    }

    /// Applies this operation to `geometry` at `index`.
    ///
    /// Returns the same geometry, mutated in place.
    ///
    /// # Errors
    /// Returns a [`GeometryEditError`] if the index does not fit the
    /// geometry. The geometry and this operation are left unchanged.
    pub fn execute<'g>(
        &mut self,
        geometry: &'g mut Geometry,
        index: &GeometryIndex,
    ) -> EditResult<&'g mut Geometry> {
        let resolved = match &mut self.kind {
            OperationKind::InsertVertex { target, coordinate } => {
                insert_vertex(&self.service, geometry, index, *target, *coordinate)?
            }
            OperationKind::DeleteVertex { removed } => {
                *removed = Some(delete_vertex(&self.service, geometry, index)?);
                index.clone()
            }
            OperationKind::MoveVertex { location, previous } => {
                *previous = Some(move_vertex(&self.service, geometry, index, *location)?);
                index.clone()
            }
            OperationKind::InsertGeometry { child } => {
                insert_geometry(&self.service, geometry, index, child)?;
                index.clone()
            }
            OperationKind::DeleteGeometry { removed } => {
                *removed = Some(delete_geometry(&self.service, geometry, index)?);
                index.clone()
            }
        };
        self.index = Some(resolved);
        Ok(geometry)
    }

    /// The index this operation acted upon, or `None` before execution.
    ///
    /// For an edge insert this is the index of the new vertex; otherwise it
    /// is the index passed to `execute`.
    pub fn geometry_index(&self) -> Option<&GeometryIndex> {
        self.index.as_ref()
    }

    pub fn is_executed(&self) -> bool {
        self.index.is_some()
    }

    /// Builds the operation that undoes this one when executed at
    /// [`geometry_index`](Self::geometry_index).
    ///
    /// # Errors
    /// Returns `InvalidOperation` if this operation has not been executed.
    pub fn inverse(&self) -> EditResult<GeometryIndexOperation> {
        if self.index.is_none() {
            return Err(failure(
                &format!("Cannot invert {}: operation has not been executed", self.kind),
                ErrorKind::InvalidOperation,
            ));
        }
        let service = self.service.clone();
        match &self.kind {
            OperationKind::InsertVertex { .. } => Ok(Self::delete_vertex(service)),
            OperationKind::DeleteVertex {
                removed: Some(coordinate),
            } => Ok(Self::insert_vertex(service, *coordinate)),
            OperationKind::MoveVertex {
                previous: Some(previous),
                ..
            } => Ok(Self::move_vertex(service, *previous)),
            OperationKind::InsertGeometry { .. } => Ok(Self::delete_geometry(service)),
            OperationKind::DeleteGeometry {
                removed: Some(child),
            } => Ok(Self::insert_geometry(service, child.clone())),
            OperationKind::DeleteVertex { removed: None }
            | OperationKind::MoveVertex { previous: None, .. }
            | OperationKind::DeleteGeometry { removed: None } => Err(failure(
                &format!("Cannot invert {}: no captured state", self.kind),
                ErrorKind::InternalError,
            )),
        }
    }
}

impl Debug for GeometryIndexOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeometryIndexOperation")
            .field("kind", &self.kind)
            .field("index", &self.index)
            .finish()
    }
}

/// Logs and builds an operation failure.
pub(crate) fn failure(message: &str, kind: ErrorKind) -> GeometryEditError {
    log::error!("{}", message);
    GeometryEditError::new(message, kind)
}

/// Fails unless `index` resolves to an address of the `expected` type.
pub(crate) fn require_index_type(
    service: &GeometryIndexService,
    geometry: &Geometry,
    index: &GeometryIndex,
    expected: IndexType,
    action: &str,
) -> EditResult<()> {
    let actual = service.index_type(geometry, index).map_err(|err| {
        log::error!("Cannot {} at {}: {}", action, index, err);
        GeometryEditError::new_with_cause(
            &format!("Cannot {} at {}", action, index),
            ErrorKind::IndexNotFound,
            err.into(),
        )
    })?;
    if actual != expected {
        return Err(failure(
            &format!(
                "Cannot {} at {}: expected a {} index, found a {} index",
                action, index, expected, actual
            ),
            ErrorKind::IndexTypeMismatch,
        ));
    }
    Ok(())
}
