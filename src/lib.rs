//! geoshapes - A local-first manager for geometric shapes
//!
//! Shapes (circles, squares, cubes and spheres) live in a
//! [`ShapeRepository`](storage::ShapeRepository) that hands out unique IDs
//! and mirrors its contents to a hand-editable JSON file.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{IdGenerator, SequentialIds, Shape, ShapeError, ShapeId, ShapeKind, Unit};
pub use storage::{PersistenceError, ShapeFile, ShapeRepository};
