use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;
use thiserror::Error;

use crate::common::{atomic, Atomic, WriteExecutor};

/// Error kinds for geometry editing.
///
/// Every failure surfaced by an operation, the index service or an edit
/// session carries one of these kinds, so callers can decide whether to
/// discard or re-issue an edit without parsing messages.
///
/// # Examples
///
/// ```rust
/// use geometry_edit::errors::{ErrorKind, GeometryEditError};
///
/// let err = GeometryEditError::new("Edge 3 not found", ErrorKind::IndexOutOfBounds);
/// assert_eq!(err.kind(), &ErrorKind::IndexOutOfBounds);
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// The index resolves to a different kind of address than the operation requires
    IndexTypeMismatch,
    /// The index value lies outside the sequence it addresses
    IndexOutOfBounds,
    /// A child geometry is not allowed inside the addressed parent
    GeometryTypeMismatch,
    /// A non-zero insert into an empty sequence, or a second coordinate on a point
    EmptyBootstrapViolation,
    /// The index path does not resolve against the geometry
    IndexNotFound,
    /// The call is not valid in the current state
    InvalidOperation,
    /// The geometry violates a structural invariant
    InvalidGeometry,
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::IndexTypeMismatch => write!(f, "Index type mismatch"),
            ErrorKind::IndexOutOfBounds => write!(f, "Index out of bounds"),
            ErrorKind::GeometryTypeMismatch => write!(f, "Geometry type mismatch"),
            ErrorKind::EmptyBootstrapViolation => write!(f, "Empty bootstrap violation"),
            ErrorKind::IndexNotFound => write!(f, "Index not found"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::InvalidGeometry => write!(f, "Invalid geometry"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// The single public error type of the editing engine.
///
/// `GeometryEditError` carries a message, an [`ErrorKind`], an optional cause
/// and a backtrace. The backtrace is captured unresolved and symbolized only
/// when the error is debug-printed.
#[derive(Clone)]
pub struct GeometryEditError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<GeometryEditError>>,
    backtrace: Atomic<Backtrace>,
}

impl GeometryEditError {
    /// Creates a new error with the specified message and kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        GeometryEditError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new_unresolved()),
        }
    }

    /// Creates a new error wrapping the error that caused it.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: GeometryEditError) -> Self {
        GeometryEditError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new_unresolved()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&GeometryEditError> {
        self.cause.as_deref()
    }
}

impl Display for GeometryEditError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for GeometryEditError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}: {}\nCaused by: {:?}", self.error_kind, self.message, cause),
            None => {
                let trace = self.backtrace.write_with(|bt| {
                    bt.resolve();
                    format!("{:?}", bt)
                });
                write!(f, "{}: {}\n{}", self.error_kind, self.message, trace)
            }
        }
    }
}

impl Error for GeometryEditError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// Result type for editing operations.
pub type EditResult<T> = Result<T, GeometryEditError>;

/// Failures of the index service while resolving a path against a geometry.
///
/// Operations never return these directly; they are wrapped as the cause of a
/// [`GeometryEditError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexResolutionError {
    #[error("No child geometry found at index {0}")]
    GeometryNotFound(String),

    #[error("No vertex found at index {0}")]
    VertexNotFound(String),

    #[error("No edge found at index {0}")]
    EdgeNotFound(String),

    #[error("Index {0} has no previous vertex")]
    NoPreviousVertex(String),

    #[error("Index {0} has no next vertex")]
    NoNextVertex(String),
}

/// Result type for index resolution.
pub type IndexResult<T> = Result<T, IndexResolutionError>;

impl From<IndexResolutionError> for GeometryEditError {
    fn from(err: IndexResolutionError) -> Self {
        GeometryEditError::new(&err.to_string(), ErrorKind::IndexNotFound)
    }
}
