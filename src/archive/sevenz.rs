// src/archive/sevenz.rs

//! 7z container access.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use sevenz_rust::{Password, SevenZReader};

use crate::archive::{Archive, ArchiveOpener};
use crate::error::{AppError, Result};

/// Opens `.7z` files.
#[derive(Debug, Clone, Copy, Default)]
pub struct SevenZipOpener;

impl ArchiveOpener for SevenZipOpener {
    fn open(&self, path: &Path) -> Result<Box<dyn Archive>> {
        Ok(Box::new(SevenZipArchive::open(path)?))
    }
}

/// A 7z archive on disk.
///
/// Entries are listed once at open time; each extraction re-reads the archive
/// and streams until the requested entry.
#[derive(Debug)]
pub struct SevenZipArchive {
    path: PathBuf,
    entries: Vec<String>,
}

impl SevenZipArchive {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let reader = Self::reader(&path)?;
        let entries = reader
            .archive()
            .files
            .iter()
            .map(|entry| entry.name().to_string())
            .collect();

        Ok(Self { path, entries })
    }

    fn reader(path: &Path) -> Result<SevenZReader<File>> {
        SevenZReader::open(path, Password::empty())
            .map_err(|e| AppError::archive(path.display().to_string(), e))
    }
}

impl Archive for SevenZipArchive {
    fn entries(&self) -> &[String] {
        &self.entries
    }

    fn extract_to_file(&mut self, entry: &str, dest: &Path) -> Result<()> {
        let mut reader = Self::reader(&self.path)?;
        let mut written: Option<io::Result<u64>> = None;

        reader
            .for_each_entries(|current, data| {
                if current.name() != entry {
                    return Ok(true);
                }
                let copied = File::create(dest).and_then(|mut file| io::copy(data, &mut file));
                written = Some(copied);
                Ok(false)
            })
            .map_err(|e| AppError::archive(self.path.display().to_string(), e))?;

        match written {
            Some(Ok(bytes)) => {
                log::debug!("{} -> {} ({} bytes)", entry, dest.display(), bytes);
                Ok(())
            }
            Some(Err(e)) => Err(AppError::Io(e)),
            None => Err(AppError::archive(
                self.path.display().to_string(),
                format!("entry {} not found", entry),
            )),
        }
    }
}
