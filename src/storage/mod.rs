//! # Storage Layer
//!
//! Persistence layer for geoshapes with a hand-editable file format.
//!
//! ## Storage Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Shapes | JSON array of flat records | `<data dir>/shapes.json` or `--file` |
//! | Config | TOML | `<config dir>/config.toml` |
//!
//! ## Consistency
//!
//! - Memory is the source of truth; the file is a mirror
//! - Every write replaces the whole file (temp file + rename)
//! - Single writer assumed, no file locking
//!
//! ## Key Types
//!
//! - [`ShapeRepository`] - In-memory collection with automatic saving
//! - [`ShapeFile`] - Read/write shapes as JSON
//! - [`Config`] - User configuration

mod codec;
mod config;
mod repository;

pub use codec::{decode, encode, FileInfo, PersistenceError, RecordError, ShapeFile, ShapeRecord};
pub use config::{Config, ConfigError, DEFAULT_DATA_FILE};
pub use repository::{ShapeRepository, Summary};
