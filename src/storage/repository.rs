//! Shape repository
//!
//! Owns the in-memory collection and mirrors it to a [`ShapeFile`]. Memory is
//! the source of truth: when an automatic save fails the mutation is kept,
//! the failure is latched and can be picked up with
//! [`ShapeRepository::take_sync_error`].

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use super::codec::{FileInfo, PersistenceError, ShapeFile};
use crate::domain::{Dimensionality, IdGenerator, Shape, ShapeError, ShapeId, ShapeKind};

/// Totals and averages over the stored shapes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub flat: usize,
    pub solid: usize,
    pub total_area: f64,
    pub total_perimeter: f64,
    pub total_volume: f64,
    pub average_area: f64,
    pub average_perimeter: f64,
    pub average_volume: f64,
    pub ids: Vec<ShapeId>,
}

/// In-memory shape collection backed by a JSON file
pub struct ShapeRepository {
    shapes: HashMap<ShapeId, Shape>,
    file: ShapeFile,
    auto_save: bool,
    ids: Arc<dyn IdGenerator>,
    sync_error: Option<PersistenceError>,
}

impl ShapeRepository {
    /// Opens the repository backed by `path`
    ///
    /// An existing file is loaded and the generator is advanced past every
    /// loaded ID. A missing file is created with an empty collection.
    pub fn open(path: impl Into<PathBuf>, auto_save: bool, ids: Arc<dyn IdGenerator>) -> Self {
        let file = ShapeFile::new(path);
        let mut repo = Self {
            shapes: HashMap::new(),
            file,
            auto_save,
            ids,
            sync_error: None,
        };

        if repo.file.exists() {
            for shape in repo.file.load() {
                repo.ids.advance_if_greater(shape.id());
                repo.shapes.insert(shape.id(), shape);
            }
            tracing::debug!(count = repo.shapes.len(), last_id = repo.ids.current(), "repository opened");
        } else if let Err(e) = repo.file.save(std::iter::empty::<&Shape>()) {
            tracing::debug!(error = %e, "failed to create shape file");
            repo.sync_error = Some(e);
        }

        repo
    }

    /// Returns the backing file path
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn auto_save(&self) -> bool {
        self.auto_save
    }

    /// Returns the ID generator shared with this repository
    pub fn ids(&self) -> &Arc<dyn IdGenerator> {
        &self.ids
    }

    /// Builds a shape with a fresh ID and stores it
    pub fn create(&mut self, kind: ShapeKind, dimension: f64) -> Result<ShapeId, ShapeError> {
        let shape = Shape::new(self.ids.next_id()?, kind, dimension)?;
        Ok(self.store(shape))
    }

    /// Stores a shape under its own ID, replacing any shape with the same ID
    pub fn store(&mut self, shape: Shape) -> ShapeId {
        let id = shape.id();
        self.ids.advance_if_greater(id);
        self.shapes.insert(id, shape);
        tracing::debug!(%id, "stored shape");
        self.sync();
        id
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    /// Returns a snapshot of all shapes, ordered by ID
    pub fn list(&self) -> Vec<Shape> {
        let mut shapes: Vec<Shape> = self.shapes.values().cloned().collect();
        shapes.sort_by_key(|s| s.id());
        shapes
    }

    /// Removes a shape, returning true if it existed
    pub fn delete(&mut self, id: ShapeId) -> bool {
        let removed = self.shapes.remove(&id).is_some();
        if removed {
            tracing::debug!(%id, "deleted shape");
            self.sync();
        }
        removed
    }

    /// Returns shapes whose name matches `name`, ignoring case
    pub fn find_by_type(&self, name: &str) -> Vec<Shape> {
        let wanted = name.trim().to_lowercase();
        let mut found: Vec<Shape> = self
            .shapes
            .values()
            .filter(|s| s.name().to_lowercase() == wanted)
            .cloned()
            .collect();
        found.sort_by_key(|s| s.id());
        found
    }

    /// Removes every shape and restarts IDs at 1
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.ids.reset();
        tracing::debug!("cleared repository");
        self.sync();
    }

    pub fn count(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Counts per variant plus `total`; every key is always present
    pub fn stats(&self) -> BTreeMap<String, usize> {
        let mut stats: BTreeMap<String, usize> = ShapeKind::ALL
            .iter()
            .map(|kind| (kind.key().to_string(), 0))
            .collect();
        stats.insert("total".to_string(), self.shapes.len());

        for shape in self.shapes.values() {
            *stats.entry(shape.kind().key().to_string()).or_insert(0) += 1;
        }

        stats
    }

    pub fn summary(&self) -> Summary {
        let mut flat = 0;
        let mut solid = 0;
        let mut total_area = 0.0;
        let mut total_perimeter = 0.0;
        let mut total_volume = 0.0;

        for shape in self.shapes.values() {
            match shape.dimensionality() {
                Dimensionality::TwoD => flat += 1,
                Dimensionality::ThreeD => solid += 1,
            }
            total_area += shape.area().unwrap_or(0.0);
            total_perimeter += shape.perimeter().unwrap_or(0.0);
            total_volume += shape.volume().unwrap_or(0.0);
        }

        let average = |total: f64, n: usize| if n > 0 { total / n as f64 } else { 0.0 };

        let mut ids: Vec<ShapeId> = self.shapes.keys().copied().collect();
        ids.sort();

        Summary {
            total: self.shapes.len(),
            flat,
            solid,
            total_area,
            total_perimeter,
            total_volume,
            average_area: average(total_area, flat),
            average_perimeter: average(total_perimeter, flat),
            average_volume: average(total_volume, solid),
            ids,
        }
    }

    /// Writes the collection to the backing file
    pub fn save(&self) -> Result<(), PersistenceError> {
        self.file.save(self.shapes.values())
    }

    /// Writes the collection to another file, leaving the backing file alone
    pub fn export_to(&self, path: impl Into<PathBuf>) -> Result<(), PersistenceError> {
        ShapeFile::new(path).save(self.shapes.values())
    }

    /// Merges shapes from another file, returning how many were read
    ///
    /// Imported shapes keep their IDs and replace existing shapes with the
    /// same ID.
    pub fn import_from(&mut self, path: impl Into<PathBuf>) -> usize {
        let loaded = ShapeFile::new(path).load();
        let count = loaded.len();

        for shape in loaded {
            self.ids.advance_if_greater(shape.id());
            self.shapes.insert(shape.id(), shape);
        }

        if count > 0 {
            tracing::debug!(count, "imported shapes");
            self.sync();
        }
        count
    }

    /// Metadata about the backing file
    pub fn file_info(&self) -> FileInfo {
        self.file.inspect()
    }

    /// Returns the last automatic save failure, if any, and clears it
    pub fn take_sync_error(&mut self) -> Option<PersistenceError> {
        self.sync_error.take()
    }

    fn sync(&mut self) {
        if !self.auto_save {
            return;
        }
        match self.save() {
            Ok(()) => self.sync_error = None,
            Err(e) => {
                tracing::debug!(path = %self.file.path().display(), error = %e, "automatic save failed");
                self.sync_error = Some(e);
            }
        }
    }
}
