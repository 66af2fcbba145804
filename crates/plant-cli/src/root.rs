use plant_core::paths::PLANTS_DIR;
use std::path::{Path, PathBuf};

/// Resolve the directory that holds `.plants/`.
///
/// Priority:
/// 1. `--root` flag / `PLANTS_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `.plants/`
/// 3. The user's home directory
/// 4. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut dir = cwd.clone();
    loop {
        if dir.join(PLANTS_DIR).is_dir() {
            return dir;
        }
        match dir.parent() {
            Some(p) => dir = p.to_path_buf(),
            None => break,
        }
    }

    home::home_dir().unwrap_or(cwd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_wins() {
        let dir = TempDir::new().unwrap();
        let result = resolve_root(Some(dir.path()));
        assert_eq!(result, dir.path());
    }
}
