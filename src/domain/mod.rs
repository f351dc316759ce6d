//! Domain models for geoshapes
//!
//! Contains the shape model, identifiers and units without any I/O concerns.

mod id;
mod shape;
mod unit;

pub use id::{IdError, IdGenerator, SequentialIds, ShapeId};
pub use shape::{Dimensionality, Geometry, Measurements, Shape, ShapeError, ShapeKind};
pub use unit::{Unit, UnitError};
