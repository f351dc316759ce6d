//! JSON storage for shapes
//!
//! Shapes are stored as a single JSON array of flat records:
//!
//! ```json
//! [
//!   { "id": 1, "name": "Circle", "tipo": "2D", "radius": 2.5 },
//!   { "id": 2, "name": "Cube", "tipo": "3D", "side": 1.0 }
//! ]
//! ```
//!
//! Loading is best-effort: the file is hand-editable, so records that do not
//! map to a known shape are skipped individually and an unreadable file loads
//! as empty. Writing replaces the whole file via temp file + rename.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::{Geometry, Shape, ShapeError, ShapeId, ShapeKind};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize shapes: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PersistenceError {
    fn io(action: &'static str, path: &Path, source: io::Error) -> Self {
        PersistenceError::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Why a single record could not be turned into a shape
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("{kind} record has no '{key}' field")]
    MissingDimension { kind: ShapeKind, key: &'static str },

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

/// On-disk representation of one shape
///
/// Field aliases accept the Spanish keys written by older versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeRecord {
    #[serde(alias = "id_figura", deserialize_with = "deserialize_id")]
    pub id: u64,

    #[serde(alias = "nombre")]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tipo: Option<String>,

    #[serde(default, alias = "radio", skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,

    #[serde(default, alias = "lado", skip_serializing_if = "Option::is_none")]
    pub side: Option<f64>,
}

impl From<&Shape> for ShapeRecord {
    fn from(shape: &Shape) -> Self {
        let (radius, side) = match *shape.geometry() {
            Geometry::Circle { radius } | Geometry::Sphere { radius } => (Some(radius), None),
            Geometry::Square { side } | Geometry::Cube { side } => (None, Some(side)),
        };

        Self {
            id: shape.id().get(),
            name: shape.name().to_string(),
            tipo: Some(shape.dimensionality().to_string()),
            radius,
            side,
        }
    }
}

impl TryFrom<ShapeRecord> for Shape {
    type Error = RecordError;

    fn try_from(record: ShapeRecord) -> Result<Self, Self::Error> {
        let kind: ShapeKind = record.name.parse()?;
        let id = ShapeId::new(record.id).map_err(ShapeError::from)?;

        let key = kind.dimension_name();
        let dimension = match kind {
            ShapeKind::Circle | ShapeKind::Sphere => record.radius,
            ShapeKind::Square | ShapeKind::Cube => record.side,
        }
        .ok_or(RecordError::MissingDimension { kind, key })?;

        Ok(Shape::new(id, kind, dimension)?)
    }
}

/// Reads an ID written as an integer or as an integral float (`3.0`)
fn deserialize_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = serde_json::Number::deserialize(deserializer)?;
    number
        .as_u64()
        .or_else(|| {
            number
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f < u64::MAX as f64)
                .map(|f| f as u64)
        })
        .ok_or_else(|| de::Error::custom(format!("invalid shape ID {}", number)))
}

/// Serializes shapes to a pretty-printed JSON array, ordered by ID
pub fn encode<'a>(shapes: impl IntoIterator<Item = &'a Shape>) -> Result<String, serde_json::Error> {
    let mut records: Vec<ShapeRecord> = shapes.into_iter().map(ShapeRecord::from).collect();
    records.sort_by_key(|r| r.id);
    serde_json::to_string_pretty(&records)
}

/// Parses a document into shapes, skipping records that do not map
///
/// Fails only when the text is not JSON at all. A document that is JSON but
/// holds no record array decodes as empty.
pub fn decode(text: &str) -> Result<Vec<Shape>, serde_json::Error> {
    let document: Value = serde_json::from_str(text)?;

    let Some(records) = record_array(document) else {
        tracing::warn!("shape file does not contain a record array, ignoring it");
        return Ok(Vec::new());
    };

    let mut shapes = Vec::with_capacity(records.len());
    for (index, value) in records.into_iter().enumerate() {
        match decode_record(value) {
            Ok(shape) => shapes.push(shape),
            Err(e) => tracing::warn!(record = index, error = %e, "skipping shape record"),
        }
    }

    Ok(shapes)
}

fn decode_record(value: Value) -> Result<Shape, RecordError> {
    let record: ShapeRecord = serde_json::from_value(value)?;
    Shape::try_from(record)
}

/// Accepts a bare array or an object wrapping one under `shapes`/`figuras`
fn record_array(document: Value) -> Option<Vec<Value>> {
    match document {
        Value::Array(records) => Some(records),
        Value::Object(mut map) => match map.remove("shapes").or_else(|| map.remove("figuras")) {
            Some(Value::Array(records)) => Some(records),
            _ => None,
        },
        _ => None,
    }
}

/// Metadata about a shape file
#[derive(Debug, Clone, Serialize)]
pub struct FileInfo {
    pub path: PathBuf,
    pub exists: bool,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
}

/// A JSON file holding a shape collection
#[derive(Debug, Clone)]
pub struct ShapeFile {
    path: PathBuf,
}

impl ShapeFile {
    /// Creates a handle for the file at the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path to the file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Reads every shape from the file
    ///
    /// A missing file, an unreadable file or invalid JSON all yield an empty
    /// collection. Only the latter two are logged.
    pub fn load(&self) -> Vec<Shape> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "shape file does not exist yet");
            return Vec::new();
        }

        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read shape file");
                return Vec::new();
            }
        };

        match decode(&text) {
            Ok(shapes) => {
                tracing::debug!(path = %self.path.display(), count = shapes.len(), "loaded shapes");
                shapes
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "shape file is not valid JSON");
                Vec::new()
            }
        }
    }

    /// Writes all shapes to the file (full rewrite)
    pub fn save<'a>(&self, shapes: impl IntoIterator<Item = &'a Shape>) -> Result<(), PersistenceError> {
        let json = encode(shapes)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| PersistenceError::io("create directory", parent, e))?;
        }

        let temp_path = self.temp_path();
        {
            let file = File::create(&temp_path)
                .map_err(|e| PersistenceError::io("create temp file", &temp_path, e))?;
            let mut writer = BufWriter::new(file);
            writer
                .write_all(json.as_bytes())
                .and_then(|_| writer.write_all(b"\n"))
                .and_then(|_| writer.flush())
                .map_err(|e| PersistenceError::io("write", &temp_path, e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            PersistenceError::io("replace", &self.path, e)
        })?;

        tracing::debug!(path = %self.path.display(), "saved shapes");
        Ok(())
    }

    /// Returns size and modification time, if the file exists
    pub fn inspect(&self) -> FileInfo {
        let metadata = fs::metadata(&self.path).ok();

        FileInfo {
            path: self.path.clone(),
            exists: metadata.is_some(),
            size: metadata.as_ref().map(|m| m.len()).unwrap_or(0),
            modified: metadata
                .and_then(|m| m.modified().ok())
                .map(DateTime::<Utc>::from),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}
