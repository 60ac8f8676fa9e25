//! Archive access and the flattening extraction policy.
//!
//! The container codec is hidden behind `Archive`/`ArchiveOpener`; the
//! filtering and flattening rules live in `extractor`.

mod extractor;
mod sevenz;

use std::path::Path;

use crate::error::Result;

pub use extractor::{base_name, extract_archive, is_directory_marker};
pub use sevenz::{SevenZipArchive, SevenZipOpener};

/// An opened archive: list entries, extract one entry to a file.
pub trait Archive {
    /// Entry paths as stored in the archive, in archive order.
    fn entries(&self) -> &[String];

    /// Write the content of `entry` to `dest`, replacing any existing file.
    fn extract_to_file(&mut self, entry: &str, dest: &Path) -> Result<()>;
}

/// Opens archive files; shared by all extraction workers.
pub trait ArchiveOpener: Send + Sync {
    fn open(&self, path: &Path) -> Result<Box<dyn Archive>>;
}
