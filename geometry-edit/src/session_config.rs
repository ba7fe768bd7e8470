//! Configuration for edit sessions.

use crate::errors::{EditResult, ErrorKind, GeometryEditError};

/// Default number of undoable edits kept by a session.
pub const DEFAULT_MAX_HISTORY: usize = 100;

/// Settings of an [`EditSession`](crate::EditSession).
///
/// # Examples
///
/// ```rust
/// use geometry_edit::EditSessionConfig;
///
/// let mut config = EditSessionConfig::new();
/// config.set_max_history(10).unwrap();
/// config.set_validate_after_edit(true);
/// assert_eq!(config.max_history(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSessionConfig {
    max_history: usize,
    validate_after_edit: bool,
}

impl Default for EditSessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSessionConfig {
    pub fn new() -> Self {
        EditSessionConfig {
            max_history: DEFAULT_MAX_HISTORY,
            validate_after_edit: false,
        }
    }

    /// Maximum number of undoable edits; the oldest are dropped first.
    pub fn max_history(&self) -> usize {
        self.max_history
    }

    /// Whether every edit is followed by a full structural validation.
    pub fn validate_after_edit(&self) -> bool {
        self.validate_after_edit
    }

    /// Sets the maximum number of undoable edits.
    ///
    /// # Errors
    ///
    /// Returns `InvalidOperation` if `max_history` is zero.
    pub fn set_max_history(&mut self, max_history: usize) -> EditResult<()> {
        if max_history == 0 {
            log::error!("Edit history size must be at least 1");
            return Err(GeometryEditError::new(
                "Edit history size must be at least 1",
                ErrorKind::InvalidOperation,
            ));
        }
        self.max_history = max_history;
        Ok(())
    }

    /// When enabled, an edit whose result fails [`Geometry::validate`] is
    /// rolled back and reported as `InvalidGeometry`.
    ///
    /// [`Geometry::validate`]: crate::Geometry::validate
    pub fn set_validate_after_edit(&mut self, validate: bool) {
        self.validate_after_edit = validate;
    }
}
