use std::collections::HashMap;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::StorageError;

/// A named storage slot. Every collection lives in its own slot, so there is
/// no transactional guarantee across slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Tasks,
    Habits,
    Goals,
    Finance,
    Shopping,
    Notes,
    Student,
    Settings,
}

impl Slot {
    pub const ALL: [Slot; 8] = [
        Slot::Tasks,
        Slot::Habits,
        Slot::Goals,
        Slot::Finance,
        Slot::Shopping,
        Slot::Notes,
        Slot::Student,
        Slot::Settings,
    ];

    /// Key of the slot, also the stem of its file name.
    pub fn key(self) -> &'static str {
        match self {
            Slot::Tasks => "tasks",
            Slot::Habits => "habits",
            Slot::Goals => "goals",
            Slot::Finance => "finance",
            Slot::Shopping => "shopping",
            Slot::Notes => "notes",
            Slot::Student => "student",
            Slot::Settings => "settings",
        }
    }

    pub fn file_name(self) -> String {
        format!("{}.json", self.key())
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A string-keyed storage medium. Implementations replace a slot's contents
/// as a whole: after `write` returns, readers see either the old or the new
/// document, never a mix.
pub trait Storage {
    /// Returns the raw document of a slot, or `None` when it was never written.
    fn read(&self, slot: Slot) -> Result<Option<String>, StorageError>;

    /// Replaces the document of a slot.
    fn write(&mut self, slot: Slot, contents: &str) -> Result<(), StorageError>;

    /// Removes every slot.
    fn clear(&mut self) -> Result<(), StorageError>;
}

/// Loads and decodes a slot.
///
/// A missing slot yields `T::default()`. A slot that no longer parses is
/// logged and replaced by the default as well; the next commit overwrites it.
pub fn load_slot<T>(storage: &dyn Storage, slot: Slot) -> Result<T, StorageError>
where
    T: DeserializeOwned + Default,
{
    let Some(raw) = storage.read(slot)? else {
        return Ok(T::default());
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!(%slot, error = %e, "slot is corrupt, starting fresh");
            Ok(T::default())
        }
    }
}

/// Encodes a collection and replaces its slot.
pub fn save_slot<T>(storage: &mut dyn Storage, slot: Slot, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
{
    let s = serde_json::to_string_pretty(value)
        .map_err(|source| StorageError::Serialize { slot, source })?;
    storage.write(slot, &s)?;
    debug!(%slot, bytes = s.len(), "slot written");
    Ok(())
}

/// Returns the directory holding the slot files.
///
/// The path is determined in the following order:
/// 1. An explicit override (the `--data-dir` flag).
/// 2. `LIFEORG_DIR` environment variable.
/// 3. `~/.local/share/lifeorg` (on Linux).
/// 4. `./.lifeorg` (fallback).
pub fn data_dir(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(p) = explicit {
        return p;
    }
    std::env::var("LIFEORG_DIR").map(PathBuf::from).unwrap_or_else(|_| {
        match dirs::data_local_dir() {
            Some(mut p) => {
                p.push("lifeorg");
                p
            }
            None => PathBuf::from(".lifeorg"),
        }
    })
}

/// Stores each slot as `<dir>/<slot>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, slot: Slot) -> PathBuf {
        self.dir.join(slot.file_name())
    }
}

impl Storage for FileStorage {
    fn read(&self, slot: Slot) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path(slot)) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { slot, source }),
        }
    }

    fn write(&mut self, slot: Slot, contents: &str) -> Result<(), StorageError> {
        let io = |source: std::io::Error| StorageError::Io { slot, source };
        fs::create_dir_all(&self.dir).map_err(io)?;

        // Write to a sibling temp file, then rename over the slot.
        let path = self.path(slot);
        let tmp = path.with_extension("json.tmp");
        let mut f = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&tmp)
            .map_err(io)?;
        f.write_all(contents.as_bytes()).map_err(io)?;
        f.flush().map_err(io)?;
        fs::rename(&tmp, &path).map_err(io)?;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        for slot in Slot::ALL {
            let path = self.path(slot);
            if path.exists() {
                fs::remove_file(path).map_err(|source| StorageError::Io { slot, source })?;
            }
        }
        Ok(())
    }
}

/// Keeps slots in memory. An optional quota caps the total size of all
/// slots, the way a browser caps local storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<Slot, String>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        MemoryStorage { slots: HashMap::new(), quota: Some(quota) }
    }

    /// Raw document of a slot.
    pub fn raw(&self, slot: Slot) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn read(&self, slot: Slot) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(&slot).cloned())
    }

    fn write(&mut self, slot: Slot, contents: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            let others: usize = self
                .slots
                .iter()
                .filter(|(s, _)| **s != slot)
                .map(|(_, v)| v.len())
                .sum();
            let needed = others + contents.len();
            if needed > quota {
                return Err(StorageError::QuotaExceeded { slot, needed, quota });
            }
        }
        self.slots.insert(slot, contents.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StorageError> {
        self.slots.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_slot_loads_default() {
        let storage = MemoryStorage::new();
        let v: Vec<u64> = load_slot(&storage, Slot::Tasks).unwrap();
        assert!(v.is_empty());
    }

    #[test]
    fn corrupt_slot_starts_fresh() {
        let mut storage = MemoryStorage::new();
        storage.write(Slot::Goals, "{ not json").unwrap();
        let v: Vec<u64> = load_slot(&storage, Slot::Goals).unwrap();
        assert!(v.is_empty());
    }

    #[test]
    fn quota_rejects_oversized_write_and_keeps_old_value() {
        let mut storage = MemoryStorage::with_quota(8);
        storage.write(Slot::Notes, "[]").unwrap();
        let err = storage.write(Slot::Notes, "[1,2,3,4,5,6]").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { slot: Slot::Notes, .. }));
        assert_eq!(storage.raw(Slot::Notes), Some("[]"));
    }

    #[test]
    fn file_storage_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("nested"));
        assert_eq!(storage.read(Slot::Tasks).unwrap(), None);

        save_slot(&mut storage, Slot::Tasks, &vec![1u64, 2, 3]).unwrap();
        assert!(dir.path().join("nested/tasks.json").exists());
        assert!(!dir.path().join("nested/tasks.json.tmp").exists());
        let back: Vec<u64> = load_slot(&storage, Slot::Tasks).unwrap();
        assert_eq!(back, vec![1, 2, 3]);

        storage.clear().unwrap();
        assert_eq!(storage.read(Slot::Tasks).unwrap(), None);
    }

    #[test]
    fn explicit_data_dir_wins() {
        let p = data_dir(Some(PathBuf::from("/tmp/elsewhere")));
        assert_eq!(p, PathBuf::from("/tmp/elsewhere"));
    }
}
