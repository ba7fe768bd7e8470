//! # Geometry Edit - Reversible Geometry Editing
//!
//! This crate provides index-addressed editing operations for hierarchical
//! geometries. Every operation can produce its own inverse, which makes the
//! operations the building blocks of undo/redo in interactive editors.
//!
//! ## Features
//!
//! - **Recursive Addressing**: `GeometryIndex` paths reach any vertex, edge or
//!   child geometry, however deeply nested
//! - **Five Operations**: Insert, delete and move a vertex; insert and delete
//!   a child geometry
//! - **Structural Invariants**: Ring closure and parent/child compatibility
//!   are preserved by every edit
//! - **No Partial Edits**: A failed operation leaves the geometry untouched
//! - **Undo/Redo**: `EditSession` records inverses in a bounded history
//!
//! ## Quick Start
//!
//! ```rust
//! use geometry_edit::{Coordinate, Geometry, GeometryIndex, GeometryIndexOperation,
//!     GeometryIndexService, GeometryType};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let service = GeometryIndexService::default();
//! let mut ring = Geometry::empty(GeometryType::LinearRing);
//!
//! // the first vertex of a ring is also its closing vertex
//! GeometryIndexOperation::insert_vertex(service.clone(), Coordinate::new(2.0, 2.0))
//!     .execute(&mut ring, &GeometryIndex::new(0))?;
//! assert_eq!(ring.coordinates().len(), 2);
//!
//! let mut polygon = Geometry::empty(GeometryType::Polygon);
//! GeometryIndexOperation::insert_geometry(service, ring)
//!     .execute(&mut polygon, &GeometryIndex::new(0))?;
//! assert_eq!(polygon.num_points(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`errors`] - Error type, error kinds and result aliases
//! - [`geometry`] - Geometry values and their invariants
//! - [`index`] - Index paths and the index service contract
//! - [`operation`] - The reversible editing operations
//! - [`session`] - Undo/redo history over a geometry

mod common;
pub mod errors;
pub mod geometry;
pub mod index;
pub mod operation;
pub mod session;
mod session_builder;
mod session_config;

pub use errors::{EditResult, ErrorKind, GeometryEditError};
pub use geometry::{BoundingBox, Coordinate, Geometry, GeometryType};
pub use index::{
    DefaultGeometryIndexService, GeometryIndex, GeometryIndexService,
    GeometryIndexServiceProvider, IndexType,
};
pub use operation::{GeometryIndexOperation, OperationKind, VertexTarget};
pub use session::EditSession;
pub use session_builder::EditSessionBuilder;
pub use session_config::{EditSessionConfig, DEFAULT_MAX_HISTORY};
