// src/error.rs

//! Unified error handling for the acquisition and normalization passes.

use std::fmt;

use thiserror::Error;

/// Result type alias for carte operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Workbook could not be opened or a sheet could not be read
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// Descriptor XML could not be read
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Archive container could not be opened or listed
    #[error("Archive error for {path}: {message}")]
    Archive { path: String, message: String },

    /// A single archive entry failed; earlier entries stay on disk
    #[error("Failed to extract {entry} ({extracted} files already extracted): {message}")]
    Entry {
        entry: String,
        extracted: usize,
        message: String,
    },

    /// No header cell matched the URL column marker before the first data row
    #[error("Column with url not found for sheet '{sheet}' (row {row})")]
    ColumnNotFound { sheet: String, row: usize },

    /// Download of a catalog item failed
    #[error("Download of {name} from {url} failed: {message}")]
    Download {
        name: String,
        url: String,
        message: String,
    },

    /// Unit directory is missing the image or descriptor file
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create an archive container error.
    pub fn archive(path: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Archive {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Create a per-entry extraction error.
    pub fn entry(entry: impl Into<String>, extracted: usize, message: impl fmt::Display) -> Self {
        Self::Entry {
            entry: entry.into(),
            extracted,
            message: message.to_string(),
        }
    }

    /// Create a download error with item context.
    pub fn download(
        name: impl Into<String>,
        url: impl Into<String>,
        message: impl fmt::Display,
    ) -> Self {
        Self::Download {
            name: name.into(),
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create a discovery error.
    pub fn discovery(message: impl Into<String>) -> Self {
        Self::Discovery(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether this error must terminate the whole run.
    ///
    /// Everything else is caught at the item boundary.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::ColumnNotFound { .. } | Self::Spreadsheet(_) | Self::Config(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_not_found_is_fatal() {
        let err = AppError::ColumnNotFound {
            sheet: "Feuil1".into(),
            row: 1,
        };
        assert!(err.is_fatal());
        assert!(err.to_string().contains("Feuil1"));
    }

    #[test]
    fn per_item_errors_are_recoverable() {
        assert!(!AppError::download("1_a", "http://x/a.7z", "refused").is_fatal());
        assert!(!AppError::entry("sub/a.jp2", 2, "disk full").is_fatal());
        assert!(!AppError::discovery("no xml").is_fatal());
    }

    #[test]
    fn download_error_carries_context() {
        let err = AppError::download("3_FR123", "http://example.com/3.7z", "timed out");
        let message = err.to_string();
        assert!(message.contains("3_FR123"));
        assert!(message.contains("http://example.com/3.7z"));
    }
}
