//! Geometry values edited by the index operations.
//!
//! A [`Geometry`] is an owned tree. Leaf geometries (points, line strings and
//! linear rings) hold an ordered sequence of [`Coordinate`]s; composite
//! geometries (polygons, multi-geometries and collections) hold an ordered
//! sequence of child geometries. Which of the two sequences is populated is
//! decided by the [`GeometryType`].
//!
//! ## Structural invariants
//!
//! - A geometry holds either coordinates or child geometries, never both.
//! - A non-empty linear ring is closed: its first and last coordinates are
//!   equal. The smallest closed ring is `[c, c]`.
//! - Polygons hold linear rings, multi-polygons hold polygons, multi-line
//!   strings hold line strings and multi-points hold points. Collections hold
//!   anything.
//!
//! Constructors enforce these rules; [`Geometry::validate`] re-checks them on
//! values that arrived from elsewhere.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

use crate::errors::{EditResult, ErrorKind, GeometryEditError};

/// Default SRID for geometries without a spatial reference.
pub const DEFAULT_SRID: i32 = 0;

/// Precision marker meaning "floating, no rounding".
pub const FLOATING_PRECISION: i32 = -1;

/// A 2D coordinate (x, y).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The kind of a geometry node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GeometryType {
    Point,
    LineString,
    LinearRing,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryType {
    /// Returns `true` for types that hold coordinates rather than children.
    pub fn is_leaf(&self) -> bool {
        matches!(
            self,
            GeometryType::Point | GeometryType::LineString | GeometryType::LinearRing
        )
    }

    /// Returns `true` if a geometry of type `child` may be placed inside a
    /// geometry of this type.
    pub fn accepts_child(&self, child: GeometryType) -> bool {
        match self {
            GeometryType::Polygon => child == GeometryType::LinearRing,
            GeometryType::MultiPoint => child == GeometryType::Point,
            GeometryType::MultiLineString => child == GeometryType::LineString,
            GeometryType::MultiPolygon => child == GeometryType::Polygon,
            GeometryType::GeometryCollection => true,
            GeometryType::Point | GeometryType::LineString | GeometryType::LinearRing => false,
        }
    }

    /// Upper-case name used in diagnostics, e.g. `LINEARRING`.
    pub fn name(&self) -> &'static str {
        match self {
            GeometryType::Point => "POINT",
            GeometryType::LineString => "LINESTRING",
            GeometryType::LinearRing => "LINEARRING",
            GeometryType::Polygon => "POLYGON",
            GeometryType::MultiPoint => "MULTIPOINT",
            GeometryType::MultiLineString => "MULTILINESTRING",
            GeometryType::MultiPolygon => "MULTIPOLYGON",
            GeometryType::GeometryCollection => "GEOMETRYCOLLECTION",
        }
    }
}

impl Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Axis-aligned extent of a geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    fn of(coordinate: &Coordinate) -> Self {
        BoundingBox {
            min_x: coordinate.x,
            min_y: coordinate.y,
            max_x: coordinate.x,
            max_y: coordinate.y,
        }
    }

    fn expand(&mut self, coordinate: &Coordinate) {
        self.min_x = self.min_x.min(coordinate.x);
        self.min_y = self.min_y.min(coordinate.y);
        self.max_x = self.max_x.max(coordinate.x);
        self.max_y = self.max_y.max(coordinate.y);
    }

    fn merge(&mut self, other: &BoundingBox) {
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }
}

/// A hierarchical geometry value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Geometry {
    geometry_type: GeometryType,
    srid: i32,
    precision: i32,
    coordinates: Vec<Coordinate>,
    geometries: Vec<Geometry>,
}

impl Geometry {
    /// Creates an empty geometry of the given type.
    pub fn empty(geometry_type: GeometryType) -> Self {
        Geometry {
            geometry_type,
            srid: DEFAULT_SRID,
            precision: FLOATING_PRECISION,
            coordinates: Vec::new(),
            geometries: Vec::new(),
        }
    }

    /// Creates a point at the given coordinate.
    pub fn point(coordinate: Coordinate) -> Self {
        let mut point = Self::empty(GeometryType::Point);
        point.coordinates.push(coordinate);
        point
    }

    /// Creates a line string. Any number of coordinates is accepted, so a
    /// line string can be built up vertex by vertex.
    pub fn line_string(coordinates: Vec<Coordinate>) -> Self {
        let mut line = Self::empty(GeometryType::LineString);
        line.coordinates = coordinates;
        line
    }

    /// Creates a linear ring.
    ///
    /// # Errors
    /// Returns `InvalidGeometry` if the ring is not empty and not closed, or
    /// holds a single coordinate.
    pub fn linear_ring(coordinates: Vec<Coordinate>) -> EditResult<Self> {
        check_ring_closure(&coordinates)?;
        let mut ring = Self::empty(GeometryType::LinearRing);
        ring.coordinates = coordinates;
        Ok(ring)
    }

    /// Creates a polygon from its shell followed by its holes.
    pub fn polygon(rings: Vec<Geometry>) -> EditResult<Self> {
        Self::composite(GeometryType::Polygon, rings)
    }

    pub fn multi_point(points: Vec<Geometry>) -> EditResult<Self> {
        Self::composite(GeometryType::MultiPoint, points)
    }

    pub fn multi_line_string(lines: Vec<Geometry>) -> EditResult<Self> {
        Self::composite(GeometryType::MultiLineString, lines)
    }

    pub fn multi_polygon(polygons: Vec<Geometry>) -> EditResult<Self> {
        Self::composite(GeometryType::MultiPolygon, polygons)
    }

    pub fn geometry_collection(geometries: Vec<Geometry>) -> EditResult<Self> {
        Self::composite(GeometryType::GeometryCollection, geometries)
    }

    /// Creates a composite geometry, checking that every child is allowed
    /// inside the parent type.
    ///
    /// # Errors
    /// Returns `InvalidGeometry` if `geometry_type` is a leaf type and
    /// `GeometryTypeMismatch` if a child is incompatible.
    pub fn composite(geometry_type: GeometryType, geometries: Vec<Geometry>) -> EditResult<Self> {
        if geometry_type.is_leaf() {
            log::error!("{} cannot hold child geometries", geometry_type);
            return Err(GeometryEditError::new(
                &format!("{} cannot hold child geometries", geometry_type),
                ErrorKind::InvalidGeometry,
            ));
        }
        for child in &geometries {
            if !geometry_type.accepts_child(child.geometry_type) {
                log::error!("{} cannot contain {}", geometry_type, child.geometry_type);
                return Err(GeometryEditError::new(
                    &format!("{} cannot contain {}", geometry_type, child.geometry_type),
                    ErrorKind::GeometryTypeMismatch,
                ));
            }
        }
        let mut composite = Self::empty(geometry_type);
        composite.geometries = geometries;
        Ok(composite)
    }

    /// Sets the spatial reference id.
    pub fn with_srid(mut self, srid: i32) -> Self {
        self.srid = srid;
        self
    }

    /// Sets the coordinate precision.
    pub fn with_precision(mut self, precision: i32) -> Self {
        self.precision = precision;
        self
    }

    pub fn geometry_type(&self) -> GeometryType {
        self.geometry_type
    }

    pub fn srid(&self) -> i32 {
        self.srid
    }

    pub fn precision(&self) -> i32 {
        self.precision
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coordinates
    }

    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    pub(crate) fn coordinates_mut(&mut self) -> &mut Vec<Coordinate> {
        &mut self.coordinates
    }

    pub(crate) fn geometries_mut(&mut self) -> &mut Vec<Geometry> {
        &mut self.geometries
    }

    /// Returns `true` if this geometry has neither coordinates nor children.
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty() && self.geometries.is_empty()
    }

    /// Counts every coordinate in this geometry and its descendants.
    pub fn num_points(&self) -> usize {
        self.coordinates.len()
            + self
                .geometries
                .iter()
                .map(Geometry::num_points)
                .sum::<usize>()
    }

    /// Returns `true` for a linear ring whose first and last coordinates are
    /// equal. Empty rings count as closed.
    pub fn is_closed_ring(&self) -> bool {
        self.geometry_type == GeometryType::LinearRing
            && match self.coordinates.as_slice() {
                [] => true,
                [_] => false,
                [first, .., last] => first == last,
            }
    }

    /// Gets the extent of all coordinates, or `None` for an empty geometry.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut bbox: Option<BoundingBox> = None;
        for coordinate in &self.coordinates {
            match bbox.as_mut() {
                Some(b) => b.expand(coordinate),
                None => bbox = Some(BoundingBox::of(coordinate)),
            }
        }
        for child in &self.geometries {
            if let Some(child_box) = child.bounding_box() {
                match bbox.as_mut() {
                    Some(b) => b.merge(&child_box),
                    None => bbox = Some(child_box),
                }
            }
        }
        bbox
    }

    /// Checks the structural invariants on this geometry and all descendants.
    ///
    /// # Errors
    /// Returns `InvalidGeometry` for a leaf holding children, a composite
    /// holding coordinates, a point with more than one coordinate, or an
    /// unclosed ring, and `GeometryTypeMismatch` for an incompatible child.
    pub fn validate(&self) -> EditResult<()> {
        if self.geometry_type.is_leaf() {
            if !self.geometries.is_empty() {
                return Err(invalid(&format!(
                    "{} holds {} child geometries",
                    self.geometry_type,
                    self.geometries.len()
                )));
            }
            match self.geometry_type {
                GeometryType::Point if self.coordinates.len() > 1 => {
                    return Err(invalid(&format!(
                        "POINT holds {} coordinates",
                        self.coordinates.len()
                    )));
                }
                GeometryType::LinearRing => check_ring_closure(&self.coordinates)?,
                _ => {}
            }
            return Ok(());
        }

        if !self.coordinates.is_empty() {
            return Err(invalid(&format!(
                "{} holds {} coordinates",
                self.geometry_type,
                self.coordinates.len()
            )));
        }
        for child in &self.geometries {
            if !self.geometry_type.accepts_child(child.geometry_type) {
                return Err(GeometryEditError::new(
                    &format!("{} cannot contain {}", self.geometry_type, child.geometry_type),
                    ErrorKind::GeometryTypeMismatch,
                ));
            }
            child.validate()?;
        }
        Ok(())
    }
}

/// Rewrites the last coordinate of a ring to equal its first one.
pub(crate) fn close_ring(coordinates: &mut [Coordinate]) {
    if let Some(first) = coordinates.first().copied() {
        if let Some(last) = coordinates.last_mut() {
            *last = first;
        }
    }
}

fn check_ring_closure(coordinates: &[Coordinate]) -> EditResult<()> {
    match coordinates {
        [] => Ok(()),
        [_] => Err(invalid("LINEARRING needs at least 2 coordinates")),
        [first, .., last] if first != last => Err(invalid(&format!(
            "LINEARRING is not closed: {} != {}",
            first, last
        ))),
        _ => Ok(()),
    }
}

fn invalid(message: &str) -> GeometryEditError {
    log::error!("{}", message);
    GeometryEditError::new(message, ErrorKind::InvalidGeometry)
}

impl Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.geometry_type)?;
        if self.is_empty() {
            return write!(f, " EMPTY");
        }
        write!(f, " (")?;
        if self.geometry_type.is_leaf() {
            for (i, coord) in self.coordinates.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{} {}", coord.x, coord.y)?;
            }
        } else {
            for (i, child) in self.geometries.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", child)?;
            }
        }
        write!(f, ")")
    }
}
