// src/storage/walker.rs

//! Rediscovery of extracted units in the result store.

use std::fs;
use std::path::{Path, PathBuf};
use std::vec;

use crate::error::{AppError, Result};
use crate::models::{RawData, WalkerConfig};
use crate::utils::compare_unit_names;

/// Single-pass iterator over the units of a result store, in counter order.
///
/// Units missing their image or descriptor are logged and skipped.
pub struct DirectoryWalker {
    units: vec::IntoIter<(String, PathBuf)>,
    matcher: UnitMatcher,
    skipped: usize,
}

/// Recognized extensions, lowercase without the dot.
struct UnitMatcher {
    image_extensions: Vec<String>,
    descriptor_extension: String,
}

impl DirectoryWalker {
    /// List the unit directories under `root`.
    ///
    /// Fails only if `root` itself cannot be read.
    pub fn new(root: &Path, config: &WalkerConfig) -> Result<Self> {
        let mut units = Vec::new();
        for entry in fs::read_dir(root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            units.push((name, entry.path()));
        }
        units.sort_by(|(a, _), (b, _)| compare_unit_names(a, b));

        Ok(Self {
            units: units.into_iter(),
            matcher: UnitMatcher {
                image_extensions: config
                    .image_extensions
                    .iter()
                    .map(|ext| normalize_extension(ext))
                    .collect(),
                descriptor_extension: normalize_extension(&config.descriptor_extension),
            },
            skipped: 0,
        })
    }

    /// Units skipped so far because a file was missing.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl UnitMatcher {
    fn discover(&self, name: &str, dir: &Path) -> Result<RawData> {
        let mut files: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|entry| entry.path())
            .collect();
        files.sort();

        let hd_image_file = pick(name, &files, "image", |ext| {
            self.image_extensions.iter().any(|e| e == ext)
        })?;
        let descriptor_file = pick(name, &files, "descriptor", |ext| {
            ext == self.descriptor_extension
        })?;

        Ok(RawData {
            name: name.to_string(),
            hd_image_file,
            descriptor_file,
        })
    }
}

impl Iterator for DirectoryWalker {
    type Item = RawData;

    fn next(&mut self) -> Option<Self::Item> {
        for (name, dir) in self.units.by_ref() {
            match self.matcher.discover(&name, &dir) {
                Ok(raw) => return Some(raw),
                Err(e) => {
                    log::error!("Skipping unit {} ({}): {}", name, dir.display(), e);
                    self.skipped += 1;
                }
            }
        }
        None
    }
}

/// First file (by name) whose extension satisfies `matches`.
fn pick(
    unit: &str,
    files: &[PathBuf],
    kind: &str,
    matches: impl Fn(&str) -> bool,
) -> Result<PathBuf> {
    let mut found = files.iter().filter(|path| {
        path.extension()
            .map(|ext| matches(&ext.to_string_lossy().to_lowercase()))
            .unwrap_or(false)
    });

    let first = found.next().ok_or_else(|| {
        AppError::discovery(format!("no {} file found in unit {}", kind, unit))
    })?;

    let extra = found.count();
    if extra > 0 {
        log::warn!(
            "Unit {} has {} {} files, using {}",
            unit,
            extra + 1,
            kind,
            first.display()
        );
    }

    Ok(first.clone())
}

fn normalize_extension(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}
