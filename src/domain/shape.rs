//! Shape domain model
//!
//! A shape is an identified [`Geometry`]: one of four variants, each carrying
//! a single positive dimension. 2D variants answer `area` and `perimeter`,
//! 3D variants answer `volume` and `surface_area`; asking the wrong kind of
//! shape yields `None`.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::id::{IdError, ShapeId};
use super::unit::Unit;

#[derive(Debug, Error, PartialEq)]
pub enum ShapeError {
    #[error("{kind} {dimension} must be a positive number, got {value}")]
    InvalidDimension {
        kind: ShapeKind,
        dimension: &'static str,
        value: f64,
    },

    #[error(transparent)]
    InvalidId(#[from] IdError),

    #[error("Unknown shape type '{0}' (expected circle, square, cube or sphere)")]
    UnknownKind(String),
}

/// Whether a shape is flat or solid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimensionality {
    #[serde(rename = "2D")]
    TwoD,
    #[serde(rename = "3D")]
    ThreeD,
}

impl Dimensionality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimensionality::TwoD => "2D",
            Dimensionality::ThreeD => "3D",
        }
    }
}

impl fmt::Display for Dimensionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Shape category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeKind {
    Circle,
    Square,
    Cube,
    Sphere,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [
        ShapeKind::Circle,
        ShapeKind::Square,
        ShapeKind::Cube,
        ShapeKind::Sphere,
    ];

    /// Display name, as persisted in the `name` field
    pub fn name(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "Circle",
            ShapeKind::Square => "Square",
            ShapeKind::Cube => "Cube",
            ShapeKind::Sphere => "Sphere",
        }
    }

    /// Lowercase key used in statistics
    pub fn key(&self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Square => "square",
            ShapeKind::Cube => "cube",
            ShapeKind::Sphere => "sphere",
        }
    }

    pub fn dimensionality(&self) -> Dimensionality {
        match self {
            ShapeKind::Circle | ShapeKind::Square => Dimensionality::TwoD,
            ShapeKind::Cube | ShapeKind::Sphere => Dimensionality::ThreeD,
        }
    }

    /// Name of the single dimension this kind carries
    pub fn dimension_name(&self) -> &'static str {
        match self {
            ShapeKind::Circle | ShapeKind::Sphere => "radius",
            ShapeKind::Square | ShapeKind::Cube => "side",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = ShapeError;

    /// Parses case-insensitively; the Spanish labels of older data files are accepted too
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "circle" | "círculo" | "circulo" => Ok(ShapeKind::Circle),
            "square" | "cuadrado" => Ok(ShapeKind::Square),
            "cube" | "cubo" => Ok(ShapeKind::Cube),
            "sphere" | "esfera" => Ok(ShapeKind::Sphere),
            _ => Err(ShapeError::UnknownKind(s.to_string())),
        }
    }
}

/// The variant-specific part of a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Circle { radius: f64 },
    Square { side: f64 },
    Cube { side: f64 },
    Sphere { radius: f64 },
}

impl Geometry {
    /// Builds a geometry of `kind`, validating the dimension
    pub fn new(kind: ShapeKind, dimension: f64) -> Result<Self, ShapeError> {
        validate(kind, dimension)?;
        Ok(match kind {
            ShapeKind::Circle => Geometry::Circle { radius: dimension },
            ShapeKind::Square => Geometry::Square { side: dimension },
            ShapeKind::Cube => Geometry::Cube { side: dimension },
            ShapeKind::Sphere => Geometry::Sphere { radius: dimension },
        })
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Geometry::Circle { .. } => ShapeKind::Circle,
            Geometry::Square { .. } => ShapeKind::Square,
            Geometry::Cube { .. } => ShapeKind::Cube,
            Geometry::Sphere { .. } => ShapeKind::Sphere,
        }
    }

    /// The radius or side length
    pub fn dimension(&self) -> f64 {
        match *self {
            Geometry::Circle { radius } | Geometry::Sphere { radius } => radius,
            Geometry::Square { side } | Geometry::Cube { side } => side,
        }
    }

    pub fn area(&self) -> Option<f64> {
        match *self {
            Geometry::Circle { radius } => Some(PI * radius * radius),
            Geometry::Square { side } => Some(side * side),
            Geometry::Cube { .. } | Geometry::Sphere { .. } => None,
        }
    }

    pub fn perimeter(&self) -> Option<f64> {
        match *self {
            Geometry::Circle { radius } => Some(2.0 * PI * radius),
            Geometry::Square { side } => Some(4.0 * side),
            Geometry::Cube { .. } | Geometry::Sphere { .. } => None,
        }
    }

    pub fn volume(&self) -> Option<f64> {
        match *self {
            Geometry::Cube { side } => Some(side.powi(3)),
            Geometry::Sphere { radius } => Some(4.0 / 3.0 * PI * radius.powi(3)),
            Geometry::Circle { .. } | Geometry::Square { .. } => None,
        }
    }

    pub fn surface_area(&self) -> Option<f64> {
        match *self {
            Geometry::Cube { side } => Some(6.0 * side * side),
            Geometry::Sphere { radius } => Some(4.0 * PI * radius * radius),
            Geometry::Circle { .. } | Geometry::Square { .. } => None,
        }
    }
}

fn validate(kind: ShapeKind, dimension: f64) -> Result<(), ShapeError> {
    if dimension.is_finite() && dimension > 0.0 {
        Ok(())
    } else {
        Err(ShapeError::InvalidDimension {
            kind,
            dimension: kind.dimension_name(),
            value: dimension,
        })
    }
}

/// Every metric a shape supports, in its own unit
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Measurements {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perimeter: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface_area: Option<f64>,
}

impl Measurements {
    /// Re-expresses metrics computed in `from` units in `to` units
    pub fn convert(self, from: Unit, to: Unit) -> Self {
        Self {
            area: self.area.map(|v| from.convert_area(v, to)),
            perimeter: self.perimeter.map(|v| from.convert(v, to)),
            volume: self.volume.map(|v| from.convert_volume(v, to)),
            surface_area: self.surface_area.map(|v| from.convert_area(v, to)),
        }
    }
}

/// A stored shape
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: ShapeId,
    geometry: Geometry,
}

impl Shape {
    /// Creates a shape of `kind` with the given dimension
    pub fn new(id: ShapeId, kind: ShapeKind, dimension: f64) -> Result<Self, ShapeError> {
        Ok(Self {
            id,
            geometry: Geometry::new(kind, dimension)?,
        })
    }

    pub fn circle(id: ShapeId, radius: f64) -> Result<Self, ShapeError> {
        Self::new(id, ShapeKind::Circle, radius)
    }

    pub fn square(id: ShapeId, side: f64) -> Result<Self, ShapeError> {
        Self::new(id, ShapeKind::Square, side)
    }

    pub fn cube(id: ShapeId, side: f64) -> Result<Self, ShapeError> {
        Self::new(id, ShapeKind::Cube, side)
    }

    pub fn sphere(id: ShapeId, radius: f64) -> Result<Self, ShapeError> {
        Self::new(id, ShapeKind::Sphere, radius)
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn kind(&self) -> ShapeKind {
        self.geometry.kind()
    }

    /// Category label ("Circle", "Square", ...)
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn dimensionality(&self) -> Dimensionality {
        self.kind().dimensionality()
    }

    pub fn dimension(&self) -> f64 {
        self.geometry.dimension()
    }

    /// Replaces the radius or side, keeping the old value if the new one is invalid
    pub fn set_dimension(&mut self, dimension: f64) -> Result<(), ShapeError> {
        self.geometry = Geometry::new(self.kind(), dimension)?;
        Ok(())
    }

    pub fn area(&self) -> Option<f64> {
        self.geometry.area()
    }

    pub fn perimeter(&self) -> Option<f64> {
        self.geometry.perimeter()
    }

    pub fn volume(&self) -> Option<f64> {
        self.geometry.volume()
    }

    pub fn surface_area(&self) -> Option<f64> {
        self.geometry.surface_area()
    }

    pub fn measurements(&self) -> Measurements {
        Measurements {
            area: self.area(),
            perimeter: self.perimeter(),
            volume: self.volume(),
            surface_area: self.surface_area(),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} #{} ({}, {} = {})",
            self.name(),
            self.id,
            self.dimensionality(),
            self.kind().dimension_name(),
            self.dimension()
        )
    }
}
