// src/models/mod.rs

//! Domain models for the acquisition and normalization passes.

mod catalog;
mod config;
mod metadata;
mod raw_data;
mod report;

// Re-export all public types
pub use catalog::CatalogItem;
pub use config::{
    CatalogConfig, Config, DownloadConfig, ExtractionConfig, PathsConfig, WalkerConfig,
};
pub use metadata::{BoundingBox, CitedParty, Metadata, RawCitedParty};
pub use raw_data::RawData;
pub use report::{AcquisitionReport, NormalizeReport};
