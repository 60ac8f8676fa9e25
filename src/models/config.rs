//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Scratch and result-store locations
    #[serde(default)]
    pub paths: PathsConfig,

    /// Spreadsheet catalog parsing
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// HTTP download behavior
    #[serde(default)]
    pub download: DownloadConfig,

    /// Background extraction pool
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Unit discovery in the result store
    #[serde(default)]
    pub walker: WalkerConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.paths.scratch_dir.as_os_str().is_empty() {
            return Err(AppError::validation("paths.scratch_dir is empty"));
        }
        if self.paths.result_dir.as_os_str().is_empty() {
            return Err(AppError::validation("paths.result_dir is empty"));
        }
        if self.catalog.url_column_marker.trim().is_empty() {
            return Err(AppError::validation("catalog.url_column_marker is empty"));
        }
        if self.catalog.handoff_capacity == 0 {
            return Err(AppError::validation("catalog.handoff_capacity must be > 0"));
        }
        if self.download.user_agent.trim().is_empty() {
            return Err(AppError::validation("download.user_agent is empty"));
        }
        if self.download.timeout_secs == Some(0) {
            return Err(AppError::validation("download.timeout_secs must be > 0"));
        }
        if self.extraction.workers == 0 {
            return Err(AppError::validation("extraction.workers must be > 0"));
        }
        if self.extraction.queue_capacity == 0 {
            return Err(AppError::validation(
                "extraction.queue_capacity must be > 0",
            ));
        }
        if self.walker.image_extensions.is_empty() {
            return Err(AppError::validation("walker.image_extensions is empty"));
        }
        if self.walker.descriptor_extension.trim().is_empty() {
            return Err(AppError::validation("walker.descriptor_extension is empty"));
        }
        Ok(())
    }
}

/// Directory locations shared by both passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Where downloaded archives land before extraction
    #[serde(default = "defaults::scratch_dir")]
    pub scratch_dir: PathBuf,

    /// Root of the result store; one subdirectory per unit
    #[serde(default = "defaults::result_dir")]
    pub result_dir: PathBuf,

    /// Wipe both directories at startup instead of resuming
    #[serde(default)]
    pub wipe_on_start: bool,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            scratch_dir: defaults::scratch_dir(),
            result_dir: defaults::result_dir(),
            wipe_on_start: false,
        }
    }
}

/// Spreadsheet catalog settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Case-insensitive substring identifying the URL column header
    #[serde(default = "defaults::url_column_marker")]
    pub url_column_marker: String,

    /// Column holding the row key used in unit names
    #[serde(default)]
    pub key_column: usize,

    /// Items buffered between the catalog reader and the pipeline
    #[serde(default = "defaults::handoff_capacity")]
    pub handoff_capacity: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url_column_marker: defaults::url_column_marker(),
            key_column: 0,
            handoff_capacity: defaults::handoff_capacity(),
        }
    }
}

/// HTTP download settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds; unset means no timeout
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Extension given to downloaded scratch files
    #[serde(default = "defaults::archive_extension")]
    pub archive_extension: String,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: None,
            archive_extension: defaults::archive_extension(),
        }
    }
}

/// Extraction worker pool settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Number of concurrent extraction workers
    #[serde(default = "defaults::workers")]
    pub workers: usize,

    /// Pending extraction jobs before downloads wait
    #[serde(default = "defaults::queue_capacity")]
    pub queue_capacity: usize,

    /// Remove the scratch archive once its unit is fully extracted
    #[serde(default = "defaults::remove_archives")]
    pub remove_archives: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            workers: defaults::workers(),
            queue_capacity: defaults::queue_capacity(),
            remove_archives: defaults::remove_archives(),
        }
    }
}

/// Result-store discovery settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Extensions (without dot) recognized as the HD image
    #[serde(default = "defaults::image_extensions")]
    pub image_extensions: Vec<String>,

    /// Extension (without dot) of the descriptor file
    #[serde(default = "defaults::descriptor_extension")]
    pub descriptor_extension: String,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            image_extensions: defaults::image_extensions(),
            descriptor_extension: defaults::descriptor_extension(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Path defaults
    pub fn scratch_dir() -> PathBuf {
        PathBuf::from("tmp")
    }
    pub fn result_dir() -> PathBuf {
        PathBuf::from("data")
    }

    // Catalog defaults
    pub fn url_column_marker() -> String {
        "lien".into()
    }
    pub fn handoff_capacity() -> usize {
        1
    }

    // Download defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; carte-ingest/0.1)".into()
    }
    pub fn archive_extension() -> String {
        "7z".into()
    }

    // Extraction defaults
    pub fn workers() -> usize {
        4
    }
    pub fn queue_capacity() -> usize {
        16
    }
    pub fn remove_archives() -> bool {
        true
    }

    // Walker defaults
    pub fn image_extensions() -> Vec<String> {
        vec!["jp2".into()]
    }
    pub fn descriptor_extension() -> String {
        "xml".into()
    }
}
