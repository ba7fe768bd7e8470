//! Undo/redo history over a single geometry.

use std::collections::VecDeque;
use std::fmt::{self, Debug, Formatter};

use crate::common::{atomic, Atomic, ReadExecutor, WriteExecutor};
use crate::errors::{EditResult, ErrorKind, GeometryEditError};
use crate::geometry::Geometry;
use crate::index::{GeometryIndex, GeometryIndexService};
use crate::operation::{failure, GeometryIndexOperation};
use crate::session_builder::EditSessionBuilder;
use crate::session_config::EditSessionConfig;

/// An editing session owning one geometry and its edit history.
///
/// Edits go through [`execute`](Self::execute); each successful edit pushes
/// its inverse onto the undo stack and clears the redo stack. Clones share
/// the same geometry and history, and all access is serialized by a lock.
///
/// ```rust
/// use geometry_edit::{Coordinate, EditSession, Geometry, GeometryIndex,
///     GeometryIndexOperation, GeometryType};
///
/// let session = EditSession::new(Geometry::empty(GeometryType::LineString));
/// let insert = GeometryIndexOperation::insert_vertex(
///     session.service().clone(),
///     Coordinate::new(1.0, 1.0),
/// );
/// session.execute(insert, &GeometryIndex::new(0)).unwrap();
/// assert_eq!(session.geometry().coordinates().len(), 1);
///
/// session.undo().unwrap();
/// assert!(session.geometry().is_empty());
/// session.redo().unwrap();
/// assert_eq!(session.geometry().coordinates().len(), 1);
/// ```
#[derive(Clone)]
pub struct EditSession {
    config: EditSessionConfig,
    service: GeometryIndexService,
    state: Atomic<SessionState>,
}

struct SessionState {
    geometry: Geometry,
    undo_stack: VecDeque<HistoryEntry>,
    redo_stack: Vec<HistoryEntry>,
}

/// An operation ready to run, and the index it must run at.
#[derive(Clone)]
struct HistoryEntry {
    operation: GeometryIndexOperation,
    index: GeometryIndex,
}

impl EditSession {
    /// Opens a session with the default configuration and index service.
    pub fn new(geometry: Geometry) -> Self {
        Self::open(
            EditSessionConfig::default(),
            GeometryIndexService::default(),
            geometry,
        )
    }

    pub fn builder() -> EditSessionBuilder {
        EditSessionBuilder::new()
    }

    pub(crate) fn open(
        config: EditSessionConfig,
        service: GeometryIndexService,
        geometry: Geometry,
    ) -> Self {
        EditSession {
            config,
            service,
            state: atomic(SessionState {
                geometry,
                undo_stack: VecDeque::new(),
                redo_stack: Vec::new(),
            }),
        }
    }

    pub fn config(&self) -> &EditSessionConfig {
        &self.config
    }

    /// The index service operations for this session should be built with.
    pub fn service(&self) -> &GeometryIndexService {
        &self.service
    }

    /// Returns a copy of the current geometry.
    pub fn geometry(&self) -> Geometry {
        self.state.read_with(|state| state.geometry.clone())
    }

    /// Runs `f` with a borrow of the current geometry.
    pub fn with_geometry<R>(&self, f: impl FnOnce(&Geometry) -> R) -> R {
        self.state.read_with(|state| f(&state.geometry))
    }

    /// Executes `operation` at `index` and records its inverse.
    ///
    /// Returns the index the operation acted upon.
    ///
    /// # Errors
    ///
    /// Returns the operation's error, or `InvalidGeometry` when
    /// validation after edit is enabled and the result is invalid. In both
    /// cases the geometry and history are unchanged.
    pub fn execute(
        &self,
        mut operation: GeometryIndexOperation,
        index: &GeometryIndex,
    ) -> EditResult<GeometryIndex> {
        self.state.write_with(|state| {
            let snapshot = state.geometry.clone();

            operation.execute(&mut state.geometry, index)?;
            let entry = match inverse_entry(&operation) {
                Ok(entry) => entry,
                Err(err) => {
                    state.geometry = snapshot;
                    return Err(err);
                }
            };

            if self.config.validate_after_edit() {
                if let Err(err) = state.geometry.validate() {
                    state.geometry = snapshot;
                    log::error!("Rejected {} at {}: {}", operation.kind(), index, err);
                    return Err(GeometryEditError::new_with_cause(
                        &format!("Rejected {} at {}: result is not a valid geometry", operation.kind(), index),
                        ErrorKind::InvalidGeometry,
                        err,
                    ));
                }
            }

            let resolved = entry.index.clone();
            push_bounded(&mut state.undo_stack, entry, self.config.max_history());
            state.redo_stack.clear();
            log::debug!("Executed {} at {}", operation.kind(), resolved);
            Ok(resolved)
        })
    }

    /// Reverts the most recent edit.
    ///
    /// Returns the index the reverting operation acted upon.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` when there is nothing to undo. If the
    /// stored inverse fails, the geometry and history are unchanged.
    pub fn undo(&self) -> EditResult<GeometryIndex> {
        self.state.write_with(|state| {
            let entry = state
                .undo_stack
                .pop_back()
                .ok_or_else(|| failure("Nothing to undo", ErrorKind::InvalidOperation))?;
            match replay(&mut state.geometry, &entry) {
                Ok(redo) => {
                    let index = redo.index.clone();
                    state.redo_stack.push(redo);
                    log::debug!("Undid edit at {}", index);
                    Ok(index)
                }
                Err(err) => {
                    state.undo_stack.push_back(entry);
                    Err(err)
                }
            }
        })
    }

    /// Re-applies the most recently undone edit.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` when there is nothing to redo. If the
    /// stored operation fails, the geometry and history are unchanged.
    pub fn redo(&self) -> EditResult<GeometryIndex> {
        self.state.write_with(|state| {
            let entry = state
                .redo_stack
                .pop()
                .ok_or_else(|| failure("Nothing to redo", ErrorKind::InvalidOperation))?;
            match replay(&mut state.geometry, &entry) {
                Ok(undo) => {
                    let index = undo.index.clone();
                    push_bounded(&mut state.undo_stack, undo, self.config.max_history());
                    log::debug!("Redid edit at {}", index);
                    Ok(index)
                }
                Err(err) => {
                    state.redo_stack.push(entry);
                    Err(err)
                }
            }
        })
    }

    pub fn can_undo(&self) -> bool {
        self.state.read_with(|state| !state.undo_stack.is_empty())
    }

    pub fn can_redo(&self) -> bool {
        self.state.read_with(|state| !state.redo_stack.is_empty())
    }

    /// Number of edits that can currently be undone.
    pub fn undo_len(&self) -> usize {
        self.state.read_with(|state| state.undo_stack.len())
    }

    pub fn redo_len(&self) -> usize {
        self.state.read_with(|state| state.redo_stack.len())
    }

    /// Forgets all undo and redo entries. The geometry is kept as is.
    pub fn clear_history(&self) {
        self.state.write_with(|state| {
            state.undo_stack.clear();
            state.redo_stack.clear();
        });
    }
}

impl Debug for EditSession {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.state.read_with(|state| {
            f.debug_struct("EditSession")
                .field("config", &self.config)
                .field("geometry_type", &state.geometry.geometry_type())
                .field("undo_len", &state.undo_stack.len())
                .field("redo_len", &state.redo_stack.len())
                .finish()
        })
    }
}

/// Runs a history entry and returns the entry that reverts it.
fn replay(geometry: &mut Geometry, entry: &HistoryEntry) -> EditResult<HistoryEntry> {
    let mut operation = entry.operation.clone();
    let before = geometry.clone();
    operation.execute(geometry, &entry.index)?;
    inverse_entry(&operation).inspect_err(|_| *geometry = before)
}

fn inverse_entry(operation: &GeometryIndexOperation) -> EditResult<HistoryEntry> {
    let index = operation.geometry_index().cloned().ok_or_else(|| {
        failure(
            &format!("Executed {} has no resolved index", operation.kind()),
            ErrorKind::InternalError,
        )
    })?;
    Ok(HistoryEntry {
        operation: operation.inverse()?,
        index,
    })
}

fn push_bounded(stack: &mut VecDeque<HistoryEntry>, entry: HistoryEntry, max: usize) {
    stack.push_back(entry);
    while stack.len() > max {
        stack.pop_front();
    }
}
