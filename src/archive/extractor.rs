// src/archive/extractor.rs

//! Flattening extraction of an archive into a unit directory.
//!
//! - Entries without an extension are taken for directories and skipped.
//! - Only the base file name is kept; entries sharing a base name overwrite
//!   each other.
//! - The first failing entry stops the extraction. Files already written stay.

use std::path::Path;

use crate::archive::Archive;
use crate::error::{AppError, Result};
use crate::utils::fs::create_unit_dir;

/// Extract the file entries of `archive` into a new `dest_dir`.
///
/// Returns the number of files written. Fails without writing anything if
/// `dest_dir` cannot be created (including when it already exists).
pub fn extract_archive(archive: &mut dyn Archive, dest_dir: &Path) -> Result<usize> {
    create_unit_dir(dest_dir)?;

    let entries = archive.entries().to_vec();
    let mut extracted = 0;

    for entry in &entries {
        if is_directory_marker(entry) {
            log::debug!("Skipping directory entry {}", entry);
            continue;
        }

        let Some(file_name) = base_name(entry) else {
            log::debug!("Skipping unnamed entry {:?}", entry);
            continue;
        };

        archive
            .extract_to_file(entry, &dest_dir.join(file_name))
            .map_err(|e| AppError::entry(entry.as_str(), extracted, e))?;

        extracted += 1;
    }

    Ok(extracted)
}

/// Whether an entry path has no extension, hence is treated as a directory.
pub fn is_directory_marker(entry: &str) -> bool {
    if entry.ends_with(['/', '\\']) {
        return true;
    }
    match last_component(entry) {
        Some(name) => !name.contains('.'),
        None => true,
    }
}

/// Final path component of an archive entry, usable as a file name.
pub fn base_name(entry: &str) -> Option<&str> {
    last_component(entry).filter(|name| *name != "." && *name != "..")
}

fn last_component(entry: &str) -> Option<&str> {
    entry
        .trim_end_matches(['/', '\\'])
        .rsplit(['/', '\\'])
        .next()
        .filter(|name| !name.is_empty())
}
