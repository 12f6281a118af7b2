//! JSON file backed implementation of [`MediaStore`].
//!
//! The whole collection lives in memory behind an `RwLock` and is mirrored
//! by a single JSON array on disk. Every mutation rewrites the file through
//! a temporary file in the same directory which is then renamed over the
//! store file, so readers of the file never observe a partial write.

use std::collections::HashSet;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use super::errors::{MediaStoreError, MediaStoreResult};
use super::models::{CategoryCounts, CreateMediaRequest, MediaCategory, MediaRecord};
use super::trait_def::MediaStore;
use super::validation::validate_create_request;

/// Default file name of the store inside the data directory.
pub const MEDIA_STORE_FILE_NAME: &str = "media_store.json";

#[derive(Debug)]
struct Inventory {
    records: Vec<MediaRecord>,
    /// Next numeric id to hand out, `None` once the counter is used up.
    /// Only ever grows.
    next_id: Option<u64>,
}

impl Inventory {
    fn new(records: Vec<MediaRecord>) -> Self {
        let next_id = records
            .iter()
            .filter_map(|record| record.id.parse::<u64>().ok())
            .max()
            .map_or(Some(1), |max_id| max_id.checked_add(1));
        Inventory { records, next_id }
    }

    fn contains_id(&self, id: &str) -> bool {
        self.records.iter().any(|record| record.id == id)
    }

    fn take_next_id(&mut self) -> Option<String> {
        while let Some(candidate) = self.next_id {
            self.next_id = candidate.checked_add(1);
            let id = candidate.to_string();
            if !self.contains_id(&id) {
                return Some(id);
            }
        }
        None
    }
}

#[derive(Debug)]
pub struct JsonMediaStore {
    file_path: PathBuf,
    inventory: RwLock<Inventory>,
}

impl JsonMediaStore {
    /// Opens the store at `file_path`, loading every record into memory.
    ///
    /// A missing file is an empty store. A file that cannot be decoded as a
    /// list of valid records fails with `CorruptStore`; it is never
    /// replaced by an empty collection.
    pub fn open<P: AsRef<Path>>(file_path: P) -> MediaStoreResult<JsonMediaStore> {
        let file_path = file_path.as_ref().to_path_buf();
        let records = Self::load_records(&file_path)?;
        let inventory = Inventory::new(records);
        match inventory.next_id {
            Some(next_id) => info!(
                "Loaded {} media items from {:?}, next id is {}",
                inventory.records.len(),
                file_path,
                next_id
            ),
            None => warn!(
                "Loaded {} media items from {:?}, no numeric ids left to assign",
                inventory.records.len(),
                file_path
            ),
        }
        Ok(JsonMediaStore {
            file_path,
            inventory: RwLock::new(inventory),
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    fn load_records(file_path: &Path) -> MediaStoreResult<Vec<MediaRecord>> {
        let content = match std::fs::read_to_string(file_path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("No media store at {:?}, starting empty.", file_path);
                return Ok(Vec::new());
            }
            Err(err) if err.kind() == ErrorKind::InvalidData => {
                return Err(MediaStoreError::CorruptStore {
                    path: file_path.to_owned(),
                    reason: err.to_string(),
                });
            }
            Err(source) => {
                return Err(MediaStoreError::Storage {
                    path: file_path.to_owned(),
                    source,
                });
            }
        };

        let records: Vec<MediaRecord> =
            serde_json::from_str(&content).map_err(|err| MediaStoreError::CorruptStore {
                path: file_path.to_owned(),
                reason: err.to_string(),
            })?;

        let mut seen_ids = HashSet::with_capacity(records.len());
        for record in records.iter() {
            if record.id.is_empty() {
                return Err(MediaStoreError::CorruptStore {
                    path: file_path.to_owned(),
                    reason: "record with an empty id".to_string(),
                });
            }
            if !seen_ids.insert(record.id.as_str()) {
                return Err(MediaStoreError::CorruptStore {
                    path: file_path.to_owned(),
                    reason: format!("duplicate id '{}'", record.id),
                });
            }
        }

        Ok(records)
    }

    fn storage_error(&self, source: std::io::Error) -> MediaStoreError {
        MediaStoreError::Storage {
            path: self.file_path.clone(),
            source,
        }
    }

    fn write_records(&self, records: &[MediaRecord]) -> MediaStoreResult<()> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|err| self.storage_error(err.into()))?;

        let dir = match self.file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp_file = NamedTempFile::new_in(dir).map_err(|err| self.storage_error(err))?;
        temp_file
            .write_all(json.as_bytes())
            .map_err(|err| self.storage_error(err))?;
        temp_file
            .as_file()
            .sync_all()
            .map_err(|err| self.storage_error(err))?;
        temp_file
            .persist(&self.file_path)
            .map_err(|err| self.storage_error(err.error))?;
        sync_dir(dir).map_err(|err| self.storage_error(err))?;

        debug!("Wrote {} media items to {:?}", records.len(), self.file_path);
        Ok(())
    }

    // A panic while holding the lock cannot leave the inventory half
    // updated, mutations only touch it after the write succeeded or while
    // rolling back, so a poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, Inventory> {
        self.inventory.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inventory> {
        self.inventory
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Flushes a rename inside `dir` to disk.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> std::io::Result<()> {
    std::fs::File::open(dir)?.sync_all()
}

// Directories cannot be opened as files here; the rename is as durable as
// the platform makes it.
#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}

impl MediaStore for JsonMediaStore {
    fn list_all(&self) -> Vec<MediaRecord> {
        self.read().records.clone()
    }

    fn list_by_category(&self, category: &str) -> Vec<MediaRecord> {
        let category = match category.parse::<MediaCategory>() {
            Ok(category) => category,
            Err(_) => {
                debug!("Listing unknown category '{}', nothing to return.", category);
                return Vec::new();
            }
        };
        self.read()
            .records
            .iter()
            .filter(|record| record.category == category)
            .cloned()
            .collect()
    }

    fn find_by_id(&self, id: &str) -> MediaStoreResult<MediaRecord> {
        self.read()
            .records
            .iter()
            .find(|record| record.id == id)
            .cloned()
            .ok_or_else(|| MediaStoreError::NotFound(id.to_owned()))
    }

    fn search_by_name(&self, name: &str) -> Vec<MediaRecord> {
        let needle = name.to_lowercase();
        self.read()
            .records
            .iter()
            .filter(|record| record.name.to_lowercase() == needle)
            .cloned()
            .collect()
    }

    fn count(&self) -> usize {
        self.read().records.len()
    }

    fn count_by_category(&self) -> CategoryCounts {
        let mut counts = CategoryCounts::default();
        for record in self.read().records.iter() {
            counts.increment(record.category);
        }
        counts
    }

    fn create(&self, request: CreateMediaRequest) -> MediaStoreResult<MediaRecord> {
        let new_record = validate_create_request(request)?;

        let mut inventory = self.write();
        let previous_next_id = inventory.next_id;
        let id = match inventory.take_next_id() {
            Some(id) => id,
            None => {
                inventory.next_id = previous_next_id;
                return Err(self.storage_error(std::io::Error::new(
                    ErrorKind::Other,
                    "no numeric ids left to assign",
                )));
            }
        };
        let record = new_record.into_record(id);
        inventory.records.push(record.clone());

        if let Err(err) = self.write_records(&inventory.records) {
            warn!("Could not persist new media item, rolling back: {}", err);
            inventory.records.pop();
            inventory.next_id = previous_next_id;
            return Err(err);
        }

        info!(
            "Created media item {} ({}, {})",
            record.id, record.name, record.category
        );
        Ok(record)
    }

    fn delete(&self, id: &str) -> MediaStoreResult<()> {
        let mut inventory = self.write();
        let position = inventory
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| MediaStoreError::NotFound(id.to_owned()))?;
        let removed = inventory.records.remove(position);

        if let Err(err) = self.write_records(&inventory.records) {
            warn!("Could not persist deletion of {}, rolling back: {}", id, err);
            inventory.records.insert(position, removed);
            return Err(err);
        }

        info!("Deleted media item {} ({})", removed.id, removed.name);
        Ok(())
    }
}
