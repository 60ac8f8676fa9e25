//! File system utilities.

use std::fs::{self, DirBuilder};
use std::path::Path;

use crate::error::Result;

fn builder(recursive: bool) -> DirBuilder {
    let mut builder = DirBuilder::new();
    builder.recursive(recursive);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o777);
    }
    builder
}

/// Ensure a directory exists, keeping its content.
pub fn ensure_dir(path: &Path) -> Result<()> {
    builder(true).create(path)?;
    Ok(())
}

/// Create a single unit directory; fails if it already exists.
pub fn create_unit_dir(path: &Path) -> Result<()> {
    builder(false).create(path)?;
    Ok(())
}

/// Remove a directory and everything under it, then recreate it empty.
pub fn reset_dir(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }
    ensure_dir(path)
}
