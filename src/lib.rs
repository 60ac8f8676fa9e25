// src/lib.rs

//! Carte ingestion library: catalog acquisition and metadata normalization

pub mod archive;
pub mod catalog;
pub mod error;
pub mod metadata;
pub mod models;
pub mod pipeline;
pub mod storage;
pub mod utils;
