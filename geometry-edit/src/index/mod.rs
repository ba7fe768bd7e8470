//! Geometry index paths and the service that resolves them.

mod default_service;
mod geometry_index;
mod index_service;

pub use default_service::*;
pub use geometry_index::*;
pub use index_service::{GeometryIndexService, GeometryIndexServiceProvider};
pub(crate) use index_service::{resolve, resolve_mut};
