use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const PLANTS_DIR: &str = ".plants";
pub const DATA_DIR: &str = ".plants/data";
pub const CONFIG_FILE: &str = ".plants/config.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn plants_dir(root: &Path) -> PathBuf {
    root.join(PLANTS_DIR)
}

pub fn data_dir(root: &Path) -> PathBuf {
    root.join(DATA_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// File backing a single snapshot key.
pub fn snapshot_path(dir: &Path, key: &str) -> PathBuf {
    dir.join(format!("{key}.json"))
}
