// src/models/report.rs

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Summary of one acquisition pass
#[derive(Debug, Clone, Serialize)]
pub struct AcquisitionReport {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Catalog items read from the workbook
    pub items: usize,
    /// Items whose unit already existed or was already dispatched this run
    pub skipped: usize,
    /// Items whose name cannot be used as a unit directory
    pub rejected: usize,
    pub downloaded: usize,
    pub download_failures: usize,
    /// Units whose archive extracted completely
    pub extracted_units: usize,
    pub extracted_files: usize,
    pub extraction_failures: usize,
}

impl AcquisitionReport {
    pub fn new(start_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            end_time: start_time,
            items: 0,
            skipped: 0,
            rejected: 0,
            downloaded: 0,
            download_failures: 0,
            extracted_units: 0,
            extracted_files: 0,
            extraction_failures: 0,
        }
    }

    pub fn failures(&self) -> usize {
        self.download_failures + self.extraction_failures
    }
}

/// Summary of one normalization pass
#[derive(Debug, Clone, Serialize)]
pub struct NormalizeReport {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Units found with both an image and a descriptor
    pub units: usize,
    /// Records handed to the sink
    pub records: usize,
    pub parse_failures: usize,
    /// Units skipped for a missing image or descriptor
    pub discovery_failures: usize,
}

impl NormalizeReport {
    pub fn new(start_time: DateTime<Utc>) -> Self {
        Self {
            start_time,
            end_time: start_time,
            units: 0,
            records: 0,
            parse_failures: 0,
            discovery_failures: 0,
        }
    }
}
