//! Key-value snapshot storage behind the plant store.
//!
//! The store only needs "read the text stored under a key" and "replace the
//! text stored under a key"; where the bytes live is up to the implementation.

use crate::error::Result;
use crate::{io, paths};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub const PLANTS_KEY: &str = "plant-care-tracker-data";
pub const ACTIVITY_KEY: &str = "plant-care-tracker-activity";
pub const SESSION_KEY: &str = "plant-care-tracker-session";

pub trait SnapshotStore {
    /// Text stored under `key`, or `None` if nothing was ever saved.
    fn load(&self, key: &str) -> Result<Option<String>>;

    fn save(&self, key: &str, data: &str) -> Result<()>;

    /// Drop whatever is stored under `key`. Missing keys are not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// FileSnapshotStore
// ---------------------------------------------------------------------------

/// One JSON file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    dir: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at `<root>/.plants/data`.
    pub fn for_root(root: &Path) -> Self {
        Self::new(paths::data_dir(root))
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        io::read_if_exists(&paths::snapshot_path(&self.dir, key))
    }

    fn save(&self, key: &str, data: &str) -> Result<()> {
        io::atomic_write(&paths::snapshot_path(&self.dir, key), data.as_bytes())
    }

    fn remove(&self, key: &str) -> Result<()> {
        match std::fs::remove_file(paths::snapshot_path(&self.dir, key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// MemorySnapshotStore
// ---------------------------------------------------------------------------

/// In-process storage. Clones share the same map, so a caller can keep a
/// handle to inspect what a store wrote.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshotStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, data: impl Into<String>) -> Self {
        let store = Self::new();
        store.entries.borrow_mut().insert(key.to_string(), data.into());
        store
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.get(key))
    }

    fn save(&self, key: &str, data: &str) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), data.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
