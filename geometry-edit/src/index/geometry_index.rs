#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt::{self, Display};

use crate::errors::{EditResult, ErrorKind, GeometryEditError};

/// The kind of address a [`GeometryIndex`] denotes.
///
/// The kind is never stored on the index. The service classifies paths
/// structurally as [`IndexType::Vertex`] or [`IndexType::Geometry`].
/// [`IndexType::Edge`] is never classified: an edge insert resolves its
/// index as a vertex and then confirms the segment with `is_edge`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndexType {
    /// A coordinate inside a point, line string or linear ring.
    Vertex,
    /// The segment starting at the addressed vertex.
    Edge,
    /// A child geometry inside a composite geometry.
    Geometry,
}

impl Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexType::Vertex => write!(f, "vertex"),
            IndexType::Edge => write!(f, "edge"),
            IndexType::Geometry => write!(f, "geometry"),
        }
    }
}

/// A recursive path into a geometry tree.
///
/// Each level holds the position within the current geometry's coordinate or
/// child sequence; `child` continues the path inside the child geometry at
/// that position. `0.2.5` addresses coordinate 5 of child 2 of child 0.
///
/// ```rust
/// use geometry_edit::GeometryIndex;
///
/// let index = GeometryIndex::from_path(&[0, 2, 5]).unwrap();
/// assert_eq!(index.depth(), 3);
/// assert_eq!(index.leaf_value(), 5);
/// assert_eq!(index.to_string(), "0.2.5");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeometryIndex {
    value: usize,
    child: Option<Box<GeometryIndex>>,
}

impl GeometryIndex {
    /// Creates a single-level index.
    pub fn new(value: usize) -> Self {
        GeometryIndex { value, child: None }
    }

    /// Creates an index that selects child `value` and continues with `child`.
    pub fn nested(value: usize, child: GeometryIndex) -> Self {
        GeometryIndex {
            value,
            child: Some(Box::new(child)),
        }
    }

    /// Builds an index from its values, outermost first.
    ///
    /// # Errors
    /// Returns `InvalidOperation` for an empty path.
    pub fn from_path(values: &[usize]) -> EditResult<Self> {
        let (last, outer) = match values.split_last() {
            Some(split) => split,
            None => {
                log::error!("Geometry index path cannot be empty");
                return Err(GeometryEditError::new(
                    "Geometry index path cannot be empty",
                    ErrorKind::InvalidOperation,
                ));
            }
        };
        Ok(outer
            .iter()
            .rev()
            .fold(GeometryIndex::new(*last), |child, value| {
                GeometryIndex::nested(*value, child)
            }))
    }

    pub fn value(&self) -> usize {
        self.value
    }

    pub fn child(&self) -> Option<&GeometryIndex> {
        self.child.as_deref()
    }

    pub fn has_child(&self) -> bool {
        self.child.is_some()
    }

    /// Number of levels in the path.
    pub fn depth(&self) -> usize {
        1 + self.child.as_ref().map_or(0, |child| child.depth())
    }

    /// The value at the deepest level.
    pub fn leaf_value(&self) -> usize {
        match &self.child {
            Some(child) => child.leaf_value(),
            None => self.value,
        }
    }

    /// All values, outermost first.
    pub fn values(&self) -> SmallVec<[usize; 4]> {
        let mut values = SmallVec::new();
        let mut current = Some(self);
        while let Some(index) = current {
            values.push(index.value);
            current = index.child();
        }
        values
    }

    /// Returns the same path with the deepest value replaced.
    pub fn with_leaf_value(&self, value: usize) -> Self {
        match &self.child {
            Some(child) => GeometryIndex::nested(self.value, child.with_leaf_value(value)),
            None => GeometryIndex::new(value),
        }
    }

    /// Returns the path without its deepest level, or `None` for a
    /// single-level index.
    pub fn parent(&self) -> Option<Self> {
        let child = self.child.as_ref()?;
        Some(match child.parent() {
            Some(parent) => GeometryIndex::nested(self.value, parent),
            None => GeometryIndex::new(self.value),
        })
    }
}

impl Display for GeometryIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)?;
        if let Some(child) = &self.child {
            write!(f, ".{}", child)?;
        }
        Ok(())
    }
}
