//! Storage for downloaded archives and extracted units.
//!
//! - `ScratchArea`: temporary `.7z` downloads
//! - `ResultStore`: one directory per extracted unit, the dedup signal
//! - `DirectoryWalker`: ordered rediscovery of units for normalization

pub mod local;
mod walker;

// Re-export for convenience
pub use local::{ResultStore, ScratchArea};
pub use walker::DirectoryWalker;
