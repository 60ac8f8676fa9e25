//! Local filesystem layout for downloads and extracted units.
//!
//! ## Storage Layout
//!
//! ```text
//! {scratch_dir}/
//! └── {n}_{key}.7z          # Downloaded archive, removed once extracted
//!
//! {result_dir}/
//! ├── 1_{key}/              # One unit per catalog item (flattened files)
//! │   ├── {chart}.jp2
//! │   └── {chart}.xml
//! └── 2_{key}/
//! ```
//!
//! A unit directory existing at all marks its catalog item as processed.

use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};
use crate::models::WalkerConfig;
use crate::storage::DirectoryWalker;
use crate::utils::fs::{ensure_dir, reset_dir};

/// Root of the extracted units.
#[derive(Debug, Clone)]
pub struct ResultStore {
    root_dir: PathBuf,
}

impl ResultStore {
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root_dir
    }

    /// Create the store, or empty it when `wipe` is set.
    pub fn prepare(&self, wipe: bool) -> Result<()> {
        prepare_dir(&self.root_dir, wipe)
    }

    /// Directory holding the unit called `name`.
    pub fn unit_dir(&self, name: &str) -> Result<PathBuf> {
        check_unit_name(name)?;
        Ok(self.root_dir.join(name))
    }

    /// Whether the unit was already extracted (even partially).
    pub fn contains(&self, name: &str) -> bool {
        self.unit_dir(name)
            .map(|dir| dir.symlink_metadata().is_ok())
            .unwrap_or(false)
    }

    /// Iterate the units in counter order.
    pub fn walk(&self, config: &WalkerConfig) -> Result<DirectoryWalker> {
        DirectoryWalker::new(&self.root_dir, config)
    }
}

/// Where downloads land before extraction.
#[derive(Debug, Clone)]
pub struct ScratchArea {
    root_dir: PathBuf,
    extension: String,
}

impl ScratchArea {
    pub fn new(root_dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root_dir: root_dir.into(),
            extension: extension.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root_dir
    }

    /// Create the scratch area, or empty it when `wipe` is set.
    pub fn prepare(&self, wipe: bool) -> Result<()> {
        prepare_dir(&self.root_dir, wipe)
    }

    /// Download target for the unit called `name`.
    pub fn archive_path(&self, name: &str) -> Result<PathBuf> {
        check_unit_name(name)?;
        let file_name = format!("{}.{}", name, self.extension);
        Ok(self.root_dir.join(file_name))
    }
}

fn prepare_dir(path: &Path, wipe: bool) -> Result<()> {
    if wipe {
        log::info!("Wiping {}", path.display());
        reset_dir(path)
    } else {
        ensure_dir(path)
    }
}

/// Unit names become single path components.
fn check_unit_name(name: &str) -> Result<()> {
    let reserved = name.is_empty() || name == "." || name == "..";
    if reserved || name.contains(['/', '\\', '\0']) {
        return Err(AppError::validation(format!(
            "'{}' cannot be used as a unit directory name",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_contains_any_existing_unit() {
        let tmp = TempDir::new().unwrap();
        let store = ResultStore::new(tmp.path());
        assert!(!store.contains("1_a"));

        fs::create_dir(tmp.path().join("1_a")).unwrap();
        assert!(store.contains("1_a"));
    }

    #[test]
    fn test_rejects_path_like_names() {
        let tmp = TempDir::new().unwrap();
        let store = ResultStore::new(tmp.path());
        assert!(store.unit_dir("1_a/b").is_err());
        assert!(store.unit_dir("..").is_err());
        assert!(!store.contains(".."));
        assert_eq!(store.unit_dir("1_a").unwrap(), tmp.path().join("1_a"));
    }

    #[test]
    fn test_prepare_keeps_or_wipes() {
        let tmp = TempDir::new().unwrap();
        let store = ResultStore::new(tmp.path().join("data"));
        store.prepare(false).unwrap();
        fs::create_dir(store.root().join("1_a")).unwrap();

        store.prepare(false).unwrap();
        assert!(store.contains("1_a"));

        store.prepare(true).unwrap();
        assert!(!store.contains("1_a"));
        assert!(store.root().exists());
    }

    #[test]
    fn test_scratch_archive_path() {
        let scratch = ScratchArea::new("/var/tmp/carte", "7z");
        assert_eq!(
            scratch.archive_path("4_FR7142").unwrap(),
            PathBuf::from("/var/tmp/carte/4_FR7142.7z")
        );
    }
}
